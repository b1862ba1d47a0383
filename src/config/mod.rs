//! Configuration management module
//!
//! This module handles the settings of the `pstore` binary, loaded from
//! environment variables, a settings file, and default values. It is
//! separate from the properties store itself.

pub mod settings;

pub use settings::*;
