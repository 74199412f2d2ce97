use super::*;

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Draft {
    title: String,
    count: u32,
}

#[test]
fn memory_storage_round_trips_values() {
    let store = MemoryStorage::new();
    assert_eq!(store.get("k"), None);
    store.set("k", "v1");
    store.set("k", "v2");
    assert_eq!(store.get("k").as_deref(), Some("v2"));
    store.remove("k");
    assert_eq!(store.get("k"), None);
}

#[test]
fn memory_storage_remove_missing_key_is_noop() {
    let store = MemoryStorage::new();
    store.remove("absent");
    assert_eq!(store.get("absent"), None);
}

#[test]
fn save_then_load_json() {
    let store = MemoryStorage::new();
    let draft = Draft { title: "pack".to_owned(), count: 3 };
    save_json(&store, "draft", &draft);
    assert_eq!(load_json::<Draft>(&store, "draft"), Some(draft));
}

#[test]
fn load_json_ignores_corrupt_payload() {
    let store = MemoryStorage::new();
    store.set("draft", "{not json");
    assert_eq!(load_json::<Draft>(&store, "draft"), None);
}

#[test]
fn load_json_missing_key_is_none() {
    let store = MemoryStorage::new();
    assert_eq!(load_json::<Draft>(&store, "draft"), None);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_is_inert_outside_hydrate() {
    let store = BrowserStorage;
    store.set("k", "v");
    assert_eq!(store.get("k"), None);
}
