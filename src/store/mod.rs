//! Properties store
//!
//! This module holds the in-process configuration store: items, the
//! containers that own them, the line parser and the provider that ties
//! them together.

pub mod container;
pub mod item;
pub mod parser;
pub mod provider;

pub use container::*;
pub use item::*;
pub use parser::*;
pub use provider::*;
