//! Provider routing and lookup tests
//!
//! Tests for qualified and unqualified property routing, container
//! uniqueness and lookup semantics.

use propstore::{PropertiesProvider, DEFAULT_CONTAINER_NAME};

#[test]
fn test_qualified_and_unqualified_routing() {
    let provider = PropertiesProvider::new();
    provider.add_property("db", "host", "localhost").unwrap();
    provider.add_default_property("timeout", "30").unwrap();
    provider.add_property("", "retries", "5").unwrap();

    let mut values = Vec::new();
    assert!(provider.get_property_values("db", "host", &mut values));
    assert_eq!(values, vec!["localhost"]);

    let mut values = Vec::new();
    assert!(provider.get_default_property_values("timeout", &mut values));
    assert_eq!(values, vec!["30"]);

    let default = provider.container(DEFAULT_CONTAINER_NAME).unwrap();
    assert_eq!(default.get_number(), 2);
    assert!(default.get_item("retries").is_some());
}

#[test]
fn test_one_container_per_module() {
    let provider = PropertiesProvider::new();
    provider.add_property("db", "host", "localhost").unwrap();
    provider.add_property("db", "port", "5432").unwrap();
    provider.add_property("cache", "ttl", "60").unwrap();

    assert_eq!(provider.container_count(), 2);
    assert_eq!(provider.container_names(), vec!["db", "cache"]);
}

#[test]
fn test_lookup_is_idempotent() {
    let provider = PropertiesProvider::new();
    provider.add_property("db", "host", "localhost").unwrap();
    provider.add_property("db", "host", "replica").unwrap();

    let mut first = Vec::new();
    let mut second = Vec::new();
    assert!(provider.get_property_values("db", "host", &mut first));
    assert!(provider.get_property_values("db", "host", &mut second));

    assert_eq!(first, second);
    assert_eq!(first, vec!["localhost", "replica"]);
}

#[test]
fn test_values_are_appended() {
    let provider = PropertiesProvider::new();
    provider.add_property("db", "host", "localhost").unwrap();

    let mut values = vec!["existing".to_string()];
    assert!(provider.get_property_values("db", "host", &mut values));
    assert_eq!(values, vec!["existing", "localhost"]);
}

#[test]
fn test_missing_container_returns_false() {
    let provider = PropertiesProvider::new();

    let mut values = Vec::new();
    assert!(!provider.get_property_values("nowhere", "host", &mut values));
    assert!(!provider.get_default_property_values("timeout", &mut values));
    assert!(values.is_empty());
}

#[test]
fn test_container_handle_sees_later_additions() {
    let provider = PropertiesProvider::new();
    provider.add_property("db", "host", "localhost").unwrap();

    let container = provider.container("db").unwrap();
    provider.add_property("db", "port", "5432").unwrap();

    assert_eq!(container.get_number(), 2);
}

#[test]
fn test_isolated_instances_do_not_share_state() {
    let first = PropertiesProvider::new();
    let second = PropertiesProvider::new();
    first.add_property("db", "host", "localhost").unwrap();

    assert_eq!(first.container_count(), 1);
    assert_eq!(second.container_count(), 0);
}

#[test]
fn test_containers_released_with_provider() {
    let provider = PropertiesProvider::new();
    provider.add_property("db", "host", "localhost").unwrap();

    let handle = provider.container("db").unwrap();
    let weak = std::sync::Arc::downgrade(&handle);
    drop(handle);
    assert!(weak.upgrade().is_some());

    drop(provider);
    assert!(weak.upgrade().is_none());
}
