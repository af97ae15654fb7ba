//! Concurrent access to the reader registry and per-reader caches
//!
//! Readers and caches are shared across threads; every thread must observe
//! the same reader and the same cached mapping.

use config_cache::{OnMissing, ReaderRegistry};
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::tempdir;

#[test]
fn test_concurrent_get_instance_single_reader() {
    let dir = tempdir().unwrap();
    let registry = Arc::new(ReaderRegistry::new());
    let num_threads = 8;
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            let path = dir.path().to_path_buf();
            thread::spawn(move || {
                barrier.wait();
                registry.get_instance(&path, None).unwrap()
            })
        })
        .collect();

    let readers: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("Thread should not panic"))
        .collect();

    assert_eq!(registry.len(), 1);
    assert!(readers.iter().all(|r| Arc::ptr_eq(r, &readers[0])));
}

#[test]
fn test_concurrent_reads_share_one_config() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("shared.yaml"), "workers: 4\n").unwrap();
    let registry = ReaderRegistry::new();
    let reader = registry.get_instance(dir.path(), None).unwrap();
    let num_threads = 8;
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let reader = Arc::clone(&reader);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                reader
                    .read_config("shared.yaml", None, OnMissing::Raise)
                    .unwrap()
            })
        })
        .collect();

    let configs: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("Thread should not panic"))
        .collect();

    assert!(configs.iter().all(|c| Arc::ptr_eq(c, &configs[0])));
    assert_eq!(configs[0].get_int("workers", 0), 4);
}

#[test]
fn test_reload_while_reading() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("live.json"), r#"{"n": 1}"#).unwrap();
    let reader = ReaderRegistry::new().get_instance(dir.path(), None).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let reader = Arc::clone(&reader);
            thread::spawn(move || {
                for _ in 0..50 {
                    if i % 2 == 0 {
                        reader.reload(None);
                    } else {
                        let config = reader.read("live.json").unwrap();
                        assert_eq!(config.get_int("n", 0), 1);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread should not panic");
    }
}
