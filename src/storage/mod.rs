//! Storage layer for weblinks

pub mod db;
pub mod error;
pub mod export;
pub mod models;

pub use db::LinkStore;
pub use error::{Result, StoreError};
pub use export::ExportFormat;
pub use models::*;
