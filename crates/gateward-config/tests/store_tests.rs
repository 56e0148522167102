//! Integration tests for the config store against real files.

use std::path::PathBuf;

use gateward_config::{ConfigStore, GateDoc};
use rand::Rng;

/// A config path under a unique temp directory, so parallel tests never
/// collide.
fn temp_config_path() -> PathBuf {
    let unique: u64 = rand::rng().random();
    std::env::temp_dir()
        .join(format!("gateward-store-test-{unique:016x}"))
        .join("whitelist.json")
}

/// Removes the test's temp directory, best effort.
fn cleanup(path: &PathBuf) {
    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

// =========================================================================
// load() on a missing file
// =========================================================================

#[tokio::test]
async fn test_load_missing_file_seeds_and_returns_defaults() {
    let path = temp_config_path();
    let store = ConfigStore::new(&path);

    let doc = store.load().await;

    assert_eq!(doc, GateDoc::default());
    assert!(doc.whitelist);
    assert_eq!(doc.language, "en");
    assert_eq!(doc.whitelisted.len(), 1, "default doc carries one seed name");
    // The defaults were also written out for next time.
    assert!(path.exists(), "default document should be on disk");

    cleanup(&path);
}

#[tokio::test]
async fn test_load_after_seeding_reads_the_seeded_file() {
    let path = temp_config_path();
    let store = ConfigStore::new(&path);

    let first = store.load().await;
    let second = store.load().await;

    assert_eq!(first, second);

    cleanup(&path);
}

// =========================================================================
// save() / load() round-trip
// =========================================================================

#[tokio::test]
async fn test_save_then_load_roundtrips_document() {
    let path = temp_config_path();
    let store = ConfigStore::new(&path);
    let doc = GateDoc {
        whitelist: false,
        language: "ru".to_string(),
        whitelisted: vec!["alice".to_string(), "bob".to_string()],
    };

    store.save(&doc).await;
    let loaded = store.load().await;

    assert_eq!(loaded, doc);

    cleanup(&path);
}

#[tokio::test]
async fn test_load_lowercases_stored_names() {
    // Stored case is not trusted: a hand-edited file with mixed case
    // still loads canonically.
    let path = temp_config_path();
    let store = ConfigStore::new(&path);
    store
        .save(&GateDoc {
            whitelist: true,
            language: "en".to_string(),
            whitelisted: vec!["Alice".to_string(), "BOB".to_string()],
        })
        .await;

    let loaded = store.load().await;

    assert_eq!(loaded.whitelisted, vec!["alice".to_string(), "bob".to_string()]);

    cleanup(&path);
}

#[tokio::test]
async fn test_save_is_a_full_rewrite() {
    // A second save fully replaces the file; removed names don't
    // linger.
    let path = temp_config_path();
    let store = ConfigStore::new(&path);
    store
        .save(&GateDoc {
            whitelisted: vec!["alice".to_string(), "bob".to_string()],
            ..GateDoc::default()
        })
        .await;

    store
        .save(&GateDoc {
            whitelisted: vec!["alice".to_string()],
            ..GateDoc::default()
        })
        .await;

    let loaded = store.load().await;
    assert_eq!(loaded.whitelisted, vec!["alice".to_string()]);

    cleanup(&path);
}

// =========================================================================
// Fail-open behavior
// =========================================================================

#[tokio::test]
async fn test_load_corrupt_file_fails_open_with_empty_set() {
    let path = temp_config_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ this is not a document").unwrap();
    let store = ConfigStore::new(&path);

    let doc = store.load().await;

    // Defaults for the flags, but NOBODY on the list: fail open to
    // "no access", never crash and never admit extra names.
    assert!(doc.whitelist);
    assert_eq!(doc.language, "en");
    assert!(doc.whitelisted.is_empty());

    cleanup(&path);
}

#[tokio::test]
async fn test_load_document_with_missing_fields_uses_defaults() {
    let path = temp_config_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{ "whitelisted": ["Carol"] }"#).unwrap();
    let store = ConfigStore::new(&path);

    let doc = store.load().await;

    assert!(doc.whitelist);
    assert_eq!(doc.language, "en");
    assert_eq!(doc.whitelisted, vec!["carol".to_string()]);

    cleanup(&path);
}

#[tokio::test]
async fn test_try_load_corrupt_file_surfaces_parse_error() {
    let path = temp_config_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json").unwrap();
    let store = ConfigStore::new(&path);

    let result = store.try_load().await;

    assert!(matches!(
        result,
        Err(gateward_config::ConfigError::Parse(_))
    ));

    cleanup(&path);
}

#[tokio::test]
async fn test_load_or_seed_missing_file_seeds_defaults() {
    let path = temp_config_path();
    let store = ConfigStore::new(&path);

    let doc = store.load_or_seed().await.expect("missing file seeds");

    assert_eq!(doc, GateDoc::default());
    assert!(path.exists(), "default document should be on disk");

    cleanup(&path);
}

#[tokio::test]
async fn test_load_or_seed_corrupt_file_surfaces_error() {
    // Unlike load(), the caller hears about the failure and can decide
    // what to keep.
    let path = temp_config_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ this is not a document").unwrap();
    let store = ConfigStore::new(&path);

    let result = store.load_or_seed().await;

    assert!(matches!(
        result,
        Err(gateward_config::ConfigError::Parse(_))
    ));

    cleanup(&path);
}

#[tokio::test]
async fn test_try_load_missing_file_surfaces_io_error() {
    let path = temp_config_path();
    let store = ConfigStore::new(&path);

    let result = store.try_load().await;

    assert!(matches!(result, Err(gateward_config::ConfigError::Io(_))));
}
