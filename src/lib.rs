//! propstore - Process-local Properties Store
//!
//! A thread-safe store of named configuration containers, populated
//! programmatically or from properties files, and queried by exact name
//! or by `module.name` qualified name.

pub mod cli;
pub mod config;
pub mod error;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use error::{PropstoreError, Result};
pub use store::{
    Container, ImportReport, Item, ParseOptions, PropertiesProvider, PropertyEntry,
    DEFAULT_CONTAINER_NAME, SYSTEM_MODULES,
};
