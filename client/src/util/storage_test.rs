use super::*;

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get("user"), None);
    storage.set("user", "{}").unwrap();
    assert_eq!(storage.get("user").as_deref(), Some("{}"));
    storage.remove("user");
    assert_eq!(storage.get("user"), None);
}

#[test]
fn memory_storage_clones_share_entries() {
    let a = MemoryStorage::new();
    let b = a.clone();
    a.set("k", "v").unwrap();
    assert_eq!(b.get("k").as_deref(), Some("v"));
}

#[test]
fn memory_storage_remove_missing_key_is_noop() {
    let storage = MemoryStorage::new();
    storage.remove("absent");
    assert_eq!(storage.get("absent"), None);
}

#[test]
fn browser_storage_without_browser_reads_nothing() {
    let storage = BrowserStorage;
    assert_eq!(storage.get("user"), None);
    assert_eq!(storage.set("user", "x"), Err(StorageError::Unavailable));
}
