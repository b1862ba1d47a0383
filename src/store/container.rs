//! Configuration container
//!
//! A container owns an ordered set of [`Item`]s under one name. Every
//! access, reads included, goes through the container lock so a reader
//! never observes a half-applied mutation.

use crate::error::{PropstoreError, Result};
use crate::store::item::Item;
use parking_lot::Mutex;
use tracing::{debug, trace};

/// Name of the container holding unqualified properties
pub const DEFAULT_CONTAINER_NAME: &str = "-Default-";

#[derive(Debug)]
pub struct Container {
    name: String,
    items: Mutex<Vec<Item>>,
}

impl Container {
    /// Create an empty container; the name must not be empty
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(PropstoreError::invalid_argument("Container name cannot be empty"));
        }

        debug!("Creating container: {}", name);

        Ok(Self {
            name,
            items: Mutex::new(Vec::new()),
        })
    }

    pub fn default_name() -> &'static str {
        DEFAULT_CONTAINER_NAME
    }

    /// Container name, fixed for the lifetime of the container
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of items currently held
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn get_number(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Replace the contents of `values` with every item value, in container order
    pub fn get_string_list(&self, values: &mut Vec<String>) {
        let items = self.items.lock();
        trace!("Listing {} values of container {}", items.len(), self.name);

        values.clear();
        values.extend(items.iter().map(|item| item.value().to_string()));
    }

    pub fn values(&self) -> Vec<String> {
        let mut values = Vec::new();
        self.get_string_list(&mut values);
        values
    }

    /// Snapshot of the items in insertion order
    pub fn items(&self) -> Vec<Item> {
        self.items.lock().clone()
    }

    /// Append a batch of items; an empty batch is rejected and changes nothing
    pub fn add_list(&self, list: Vec<Item>) -> Result<()> {
        if list.is_empty() {
            return Err(PropstoreError::invalid_argument("Invalid List Size"));
        }

        let count = list.len();
        self.items.lock().extend(list);

        trace!("Added {} items to container {}", count, self.name);
        Ok(())
    }

    pub fn add_item(&self, item: Item) {
        trace!("Adding item {} to container {}", item.name(), self.name);
        self.items.lock().push(item);
    }

    /// Remove the first item with the given name. Returns false when absent.
    pub fn delete_item(&self, name: &str) -> bool {
        let mut items = self.items.lock();

        match items.iter().position(|item| item.equal(name)) {
            Some(index) => {
                items.remove(index);
                trace!("Deleted item {} from container {}", name, self.name);
                true
            }
            None => false,
        }
    }

    /// First item with the given name, in insertion order
    pub fn get_item(&self, name: &str) -> Option<Item> {
        let item = self
            .items
            .lock()
            .iter()
            .find(|item| item.equal(name))
            .cloned();

        trace!(
            "Lookup of item {} in container {}: {}",
            name,
            self.name,
            if item.is_some() { "found" } else { "missing" }
        );
        item
    }

    /// Append the value of every item named `name` to `values`.
    /// Returns the number of values appended.
    pub fn get_values(&self, name: &str, values: &mut Vec<String>) -> usize {
        let items = self.items.lock();
        let before = values.len();

        values.extend(
            items
                .iter()
                .filter(|item| item.equal(name))
                .map(|item| item.value().to_string()),
        );

        let found = values.len() - before;
        trace!("Found {} values for {} in container {}", found, name, self.name);
        found
    }

    pub fn equal(&self, name: &str) -> bool {
        let matched = self.name == name;
        if matched {
            trace!("Found matching container {}", self.name);
        }
        matched
    }
}

impl Drop for Container {
    fn drop(&mut self) {
        debug!(
            "Destroying container {} ({} items)",
            self.name,
            self.items.get_mut().len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, value: &str) -> Item {
        Item::new(name, value).unwrap()
    }

    #[test]
    fn test_add_and_get_item() {
        let container = Container::new("db").unwrap();
        container.add_item(item("host", "localhost"));
        container.add_item(item("port", "5432"));

        assert_eq!(container.get_number(), 2);
        assert_eq!(container.get_item("port").unwrap().get_string(), "5432");
        assert!(container.get_item("user").is_none());
    }

    #[test]
    fn test_delete_item() {
        let container = Container::new("db").unwrap();
        container.add_item(item("host", "localhost"));

        assert!(!container.delete_item("missing"));
        assert_eq!(container.len(), 1);

        assert!(container.delete_item("host"));
        assert!(container.get_item("host").is_none());
        assert!(container.is_empty());
    }

    #[test]
    fn test_add_list_rejects_empty() {
        let container = Container::new("db").unwrap();
        container.add_item(item("host", "localhost"));

        let result = container.add_list(Vec::new());
        assert!(matches!(result, Err(PropstoreError::InvalidArgument(_))));
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn test_get_string_list_clears_output() {
        let container = Container::new("db").unwrap();
        container
            .add_list(vec![item("host", "localhost"), item("port", "5432")])
            .unwrap();

        let mut values = vec!["stale".to_string()];
        container.get_string_list(&mut values);
        assert_eq!(values, vec!["localhost", "5432"]);
    }

    #[test]
    fn test_duplicates_keep_insertion_order() {
        let container = Container::new("hosts").unwrap();
        container.add_item(item("server", "a"));
        container.add_item(item("server", "b"));

        assert_eq!(container.get_item("server").unwrap().value(), "a");

        let mut values = Vec::new();
        assert_eq!(container.get_values("server", &mut values), 2);
        assert_eq!(values, vec!["a", "b"]);

        assert!(container.delete_item("server"));
        assert_eq!(container.get_item("server").unwrap().value(), "b");
    }

    #[test]
    fn test_empty_container_name_rejected() {
        let result = Container::new("");
        assert!(matches!(result, Err(PropstoreError::InvalidArgument(_))));
    }

    #[test]
    fn test_name_and_equal() {
        let container = Container::new(Container::default_name()).unwrap();
        assert_eq!(container.name(), "-Default-");
        assert!(container.equal(DEFAULT_CONTAINER_NAME));
        assert!(!container.equal("db"));
    }
}
