use super::*;

#[test]
fn memory_store_get_set() {
    let s = MemoryStore::new();
    assert_eq!(s.get(LANGUAGE_KEY), None);
    s.set(LANGUAGE_KEY, "en").unwrap();
    assert_eq!(s.get(LANGUAGE_KEY).as_deref(), Some("en"));
    s.set(LANGUAGE_KEY, "fr").unwrap();
    assert_eq!(s.get(LANGUAGE_KEY).as_deref(), Some("fr"));
}

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs/site.json");

    let a = FileStore::new(&path);
    assert_eq!(a.get(LANGUAGE_KEY), None);
    a.set(LANGUAGE_KEY, "en").unwrap();
    a.set("other", "1").unwrap();

    let b = FileStore::new(&path);
    assert_eq!(b.get(LANGUAGE_KEY).as_deref(), Some("en"));
    assert_eq!(b.get("other").as_deref(), Some("1"));
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn corrupt_file_reads_as_empty_and_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.json");
    std::fs::write(&path, "{not json").unwrap();

    let s = FileStore::new(&path);
    assert_eq!(s.get(LANGUAGE_KEY), None);
    s.set(LANGUAGE_KEY, "fr").unwrap();
    assert_eq!(s.get(LANGUAGE_KEY).as_deref(), Some("fr"));
    assert_eq!(s.path(), path.as_path());
}

#[test]
fn file_store_write_failure_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let s = FileStore::new(blocker.join("site.json"));
    let err = s.set(LANGUAGE_KEY, "en").unwrap_err();
    assert!(matches!(err, SiteError::Storage(_)), "{err:?}");
    assert!(err.to_string().starts_with("storage error:"));
}
