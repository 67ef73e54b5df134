//! weblinks - a terminal bookmark manager
//!
//! Links live in a local SQLite file and are managed through an
//! interactive menu or one-shot subcommands.

pub mod config;
pub mod storage;
