//! Concurrent access tests
//!
//! Tests that containers and the provider stay consistent when many
//! threads add and read properties at the same time.

use propstore::{Container, Item, PropertiesProvider};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 16;

#[test]
fn test_concurrent_add_item_on_one_container() {
    let container = Arc::new(Container::new("shared").unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let container = Arc::clone(&container);
            thread::spawn(move || {
                container.add_item(Item::new(format!("item-{i}"), i.to_string()).unwrap());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(container.get_number(), THREADS);
    for i in 0..THREADS {
        let item = container.get_item(&format!("item-{i}")).unwrap();
        assert_eq!(item.value(), i.to_string());
    }
}

#[test]
fn test_concurrent_add_property_creates_one_container() {
    let provider = Arc::new(PropertiesProvider::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let provider = Arc::clone(&provider);
            thread::spawn(move || {
                provider
                    .add_property("db", &format!("key{i}"), &i.to_string())
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(provider.container_count(), 1);
    assert_eq!(provider.container("db").unwrap().get_number(), THREADS);
}

#[test]
fn test_readers_see_whole_sequences() {
    let container = Arc::new(Container::new("mixed").unwrap());

    let writer = {
        let container = Arc::clone(&container);
        thread::spawn(move || {
            for i in 0..200 {
                container.add_item(Item::new(format!("k{i}"), "v").unwrap());
                if i % 3 == 0 {
                    container.delete_item(&format!("k{i}"));
                }
            }
        })
    };

    let reader = {
        let container = Arc::clone(&container);
        thread::spawn(move || {
            let mut values = Vec::new();
            for _ in 0..200 {
                container.get_string_list(&mut values);
                assert!(values.iter().all(|value| value == "v"));
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();

    // 200 added, every third (0, 3, ..., 198) deleted
    assert_eq!(container.get_number(), 200 - 67);
}

#[test]
fn test_global_provider_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                PropertiesProvider::global()
                    .add_property("concurrency_test", &format!("t{i}"), "1")
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let container = PropertiesProvider::global()
        .container("concurrency_test")
        .unwrap();
    assert_eq!(container.get_number(), 4);
}
