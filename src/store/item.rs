//! Configuration item
//!
//! A single named entry holding a string value. Items are immutable once
//! built and are owned by exactly one [`Container`](super::Container).

use crate::error::{PropstoreError, Result};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    name: String,
    value: String,
}

impl Item {
    /// Create a new item; the name must not be empty
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(PropstoreError::invalid_argument("Item name cannot be empty"));
        }

        Ok(Self {
            name,
            value: value.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Alias of [`Item::value`]
    pub fn get_string(&self) -> &str {
        &self.value
    }

    /// Check if this item is identified by the given name
    pub fn equal(&self, name: &str) -> bool {
        self.name == name
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_accessors() {
        let item = Item::new("host", "localhost").unwrap();
        assert_eq!(item.name(), "host");
        assert_eq!(item.get_string(), "localhost");
        assert!(item.equal("host"));
        assert!(!item.equal("Host"));
        assert_eq!(item.to_string(), "host=localhost");
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = Item::new("", "value");
        assert!(matches!(result, Err(PropstoreError::InvalidArgument(_))));
    }

    #[test]
    fn test_empty_value_allowed() {
        let item = Item::new("flag", "").unwrap();
        assert_eq!(item.value(), "");
    }
}
