//! Engine conformance tests
//!
//! The same suite runs against every engine, so CRUD and bulk retrieval can
//! rely on identical behavior whichever engine sits underneath:
//! - Basic bucket primitives (get, put, delete, len)
//! - Lazy bucket creation and listing
//! - Key ordering during iteration
//! - Rollback on closure failure or panic
//! - Bucket name rules (empty rejected, long names accepted)
//! - Snapshot isolation under concurrent writers

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use bucketdb_core::{Error, Result};
use bucketdb_storage::{Engine, MemoryEngine, RedbEngine, StoreConfig};
use tempfile::TempDir;

// ============================================================================
// Harness
// ============================================================================

/// Provides fresh engines to the suite.
trait TestHarness {
    type Engine: Engine + 'static;

    /// Create an empty engine; the guard keeps backing files alive.
    fn create_engine() -> (Self::Engine, Option<TempDir>);
}

struct MemoryHarness;

impl TestHarness for MemoryHarness {
    type Engine = MemoryEngine;

    fn create_engine() -> (MemoryEngine, Option<TempDir>) {
        (MemoryEngine::new(), None)
    }
}

struct RedbHarness;

impl TestHarness for RedbHarness {
    type Engine = RedbEngine;

    fn create_engine() -> (RedbEngine, Option<TempDir>) {
        let dir = TempDir::new().unwrap();
        let engine = RedbEngine::open(&StoreConfig::new(dir.path().join("conformance.redb")))
            .expect("failed to open redb engine");
        (engine, Some(dir))
    }
}

fn run_test_suite<H: TestHarness>() {
    test_basic_operations::<H>();
    test_missing_bucket::<H>();
    test_iteration_order::<H>();
    test_bucket_isolation::<H>();
    test_rollback_on_error::<H>();
    test_bucket_listing::<H>();
    test_rollback_on_panic::<H>();
    test_invalid_bucket_names::<H>();
    test_long_bucket_names::<H>();
    test_concurrent_writers::<H>();
    test_readers_see_whole_commits::<H>();
}

fn collect_all(engine: &impl Engine, bucket: &str) -> Vec<(Vec<u8>, Vec<u8>)> {
    engine
        .view(bucket, |b| {
            let mut out = Vec::new();
            if let Some(b) = b {
                b.for_each(&mut |k, v| {
                    out.push((k.to_vec(), v.to_vec()));
                    Ok(())
                })?;
            }
            Ok(out)
        })
        .unwrap()
}

// ============================================================================
// Suite
// ============================================================================

fn test_basic_operations<H: TestHarness>() {
    let (engine, _guard) = H::create_engine();

    engine.update("basic", |b| b.put(b"k1", b"v1")).unwrap();
    engine.update("basic", |b| b.put(b"k1", b"v2")).unwrap();

    let (value, len) = engine
        .view("basic", |b| {
            let b = b.expect("bucket exists");
            Ok((b.get(b"k1")?, b.len()?))
        })
        .unwrap();
    assert_eq!(value, Some(b"v2".to_vec()));
    assert_eq!(len, 1);

    assert!(engine.update("basic", |b| b.delete(b"k1")).unwrap());
    assert!(!engine.update("basic", |b| b.delete(b"k1")).unwrap());

    let empty = engine
        .view("basic", |b| b.expect("bucket survives").is_empty())
        .unwrap();
    assert!(empty);
}

fn test_missing_bucket<H: TestHarness>() {
    let (engine, _guard) = H::create_engine();
    let exists = engine.view("never-written", |b| Ok(b.is_some())).unwrap();
    assert!(!exists);
    assert!(engine.bucket_names().unwrap().is_empty());
}

fn test_iteration_order<H: TestHarness>() {
    let (engine, _guard) = H::create_engine();
    engine
        .update("ordered", |b| {
            b.put(b"c", b"3")?;
            b.put(b"a", b"1")?;
            b.put(b"b", b"2")?;
            b.put(b"aa", b"11")
        })
        .unwrap();

    let keys: Vec<Vec<u8>> = collect_all(&engine, "ordered")
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(
        keys,
        vec![b"a".to_vec(), b"aa".to_vec(), b"b".to_vec(), b"c".to_vec()]
    );
}

fn test_bucket_isolation<H: TestHarness>() {
    let (engine, _guard) = H::create_engine();
    engine.update("left", |b| b.put(b"k", b"left")).unwrap();
    engine.update("right", |b| b.put(b"k", b"right")).unwrap();

    let left = engine.view("left", |b| b.unwrap().get(b"k")).unwrap();
    let right = engine.view("right", |b| b.unwrap().get(b"k")).unwrap();
    assert_eq!(left, Some(b"left".to_vec()));
    assert_eq!(right, Some(b"right".to_vec()));
}

fn test_rollback_on_error<H: TestHarness>() {
    let (engine, _guard) = H::create_engine();
    engine.update("atomic", |b| b.put(b"a", b"1")).unwrap();

    let result: Result<()> = engine.update("atomic", |b| {
        b.put(b"a", b"changed")?;
        b.put(b"b", b"new")?;
        b.delete(b"a")?;
        Err(Error::storage("abort"))
    });
    assert!(matches!(result, Err(Error::Storage(_))));

    assert_eq!(
        collect_all(&engine, "atomic"),
        vec![(b"a".to_vec(), b"1".to_vec())]
    );

    // A failed first write does not create the bucket either
    let result: Result<()> = engine.update("phantom", |_| Err(Error::storage("abort")));
    assert!(result.is_err());
    assert!(!engine.bucket_names().unwrap().contains(&"phantom".to_string()));
}

fn test_bucket_listing<H: TestHarness>() {
    let (engine, _guard) = H::create_engine();
    engine.update("zeta", |_| Ok(())).unwrap();
    engine.update("alpha", |b| b.put(b"k", b"v")).unwrap();

    assert_eq!(
        engine.bucket_names().unwrap(),
        vec!["alpha".to_string(), "zeta".to_string()]
    );

    assert!(engine.drop_bucket("zeta").unwrap());
    assert_eq!(engine.bucket_names().unwrap(), vec!["alpha".to_string()]);
}

fn test_invalid_bucket_names<H: TestHarness>() {
    let (engine, _guard) = H::create_engine();

    assert!(matches!(
        engine.view("", |_| Ok(())),
        Err(Error::InvalidBucket(_))
    ));
    assert!(matches!(
        engine.update("", |_| Ok(())),
        Err(Error::InvalidBucket(_))
    ));
    assert!(matches!(
        engine.drop_bucket(""),
        Err(Error::InvalidBucket(_))
    ));
}

fn test_long_bucket_names<H: TestHarness>() {
    let (engine, _guard) = H::create_engine();
    let long = "b".repeat(300);

    engine.update(&long, |b| b.put(b"k", b"v")).unwrap();
    let value = engine.view(&long, |b| b.unwrap().get(b"k")).unwrap();
    assert_eq!(value, Some(b"v".to_vec()));
    assert_eq!(engine.bucket_names().unwrap(), vec![long.clone()]);
    assert!(engine.drop_bucket(&long).unwrap());
}

fn test_rollback_on_panic<H: TestHarness>() {
    let (engine, _guard) = H::create_engine();
    engine.update("panicky", |b| b.put(b"a", b"1")).unwrap();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let _: Result<()> = engine.update("panicky", |b| {
            b.put(b"a", b"2")?;
            b.put(b"new", b"x")?;
            panic!("writer crashed");
        });
    }));
    assert!(outcome.is_err());

    assert_eq!(
        collect_all(&engine, "panicky"),
        vec![(b"a".to_vec(), b"1".to_vec())]
    );

    // The engine accepts writes again afterwards
    engine.update("panicky", |b| b.put(b"a", b"3")).unwrap();
    let value = engine.view("panicky", |b| b.unwrap().get(b"a")).unwrap();
    assert_eq!(value, Some(b"3".to_vec()));
}

fn test_concurrent_writers<H: TestHarness>() {
    let (engine, _guard) = H::create_engine();
    let engine = Arc::new(engine);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for i in 0..25 {
                    let key = format!("t{}-k{:02}", t, i);
                    engine
                        .update("shared", |b| b.put(key.as_bytes(), key.as_bytes()))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let entries = collect_all(engine.as_ref(), "shared");
    assert_eq!(entries.len(), 200);
    assert!(entries.iter().all(|(k, v)| k == v));
}

fn test_readers_see_whole_commits<H: TestHarness>() {
    let (engine, _guard) = H::create_engine();
    let engine = Arc::new(engine);

    // Two keys always written together with the same generation number
    engine
        .update("pair", |b| {
            b.put(b"x", b"0")?;
            b.put(b"y", b"0")
        })
        .unwrap();

    let writer = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for generation in 1..=100u32 {
                let g = generation.to_string();
                engine
                    .update("pair", |b| {
                        b.put(b"x", g.as_bytes())?;
                        b.put(b"y", g.as_bytes())
                    })
                    .unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..100 {
                    let (x, y) = engine
                        .view("pair", |b| {
                            let b = b.unwrap();
                            Ok((b.get(b"x")?, b.get(b"y")?))
                        })
                        .unwrap();
                    assert_eq!(x, y, "reader observed a torn commit");
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}

// ============================================================================
// Engines
// ============================================================================

#[test]
fn test_memory_engine_conformance() {
    run_test_suite::<MemoryHarness>();
}

#[test]
fn test_redb_engine_conformance() {
    run_test_suite::<RedbHarness>();
}
