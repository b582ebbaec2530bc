use chrono::{TimeZone, Utc};
use futures::StreamExt;
use settingsbox_store_adapter_redb::{AdapterConfig, RedbStore};
use settingsbox_types::error::Error;
use settingsbox_types::store_adapter::StoreAdapter;
use settingsbox_types::store_value::StoreValue;
use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a temporary adapter for testing
async fn create_test_adapter() -> (RedbStore, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = open_adapter(temp_dir.path()).await;
	(adapter, temp_dir)
}

async fn open_adapter(path: &Path) -> RedbStore {
	let config = AdapterConfig { broadcast_capacity: 100 };
	RedbStore::new(path, config).await.expect("Failed to create adapter")
}

#[tokio::test]
async fn test_values_survive_restart() {
	let (adapter, temp) = create_test_adapter().await;
	let when = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("valid date");

	let collection = adapter.open("settings").await.expect("Failed to open");
	collection.put("darkMode", StoreValue::Bool(true)).expect("put");
	collection.put("volume", StoreValue::Float(0.75)).expect("put");
	collection.put("lastSync", StoreValue::DateTime(when)).expect("put");
	collection
		.put(
			"window",
			StoreValue::Map(BTreeMap::from([
				("width".to_string(), StoreValue::Int(800)),
				("tags".to_string(), StoreValue::List(vec![StoreValue::String("a".into())])),
			])),
		)
		.expect("put");
	collection.close().await.expect("close");
	drop(adapter);

	let adapter = open_adapter(temp.path()).await;
	let collection = adapter.open("settings").await.expect("Failed to reopen");
	assert_eq!(collection.get("darkMode").expect("get"), Some(StoreValue::Bool(true)));
	assert_eq!(collection.get("volume").expect("get"), Some(StoreValue::Float(0.75)));
	assert_eq!(collection.get("lastSync").expect("get"), Some(StoreValue::DateTime(when)));
	assert!(matches!(collection.get("window").expect("get"), Some(StoreValue::Map(_))));
	let keys = collection.keys().expect("keys");
	let keys: Vec<&str> = keys.iter().map(|key| &**key).collect();
	assert_eq!(keys, ["darkMode", "lastSync", "volume", "window"]);
}

#[tokio::test]
async fn test_explicit_null_survives_restart() {
	let (adapter, temp) = create_test_adapter().await;

	let collection = adapter.open("settings").await.expect("Failed to open");
	collection.put("nickname", StoreValue::Null).expect("put");
	collection.close().await.expect("close");
	drop(adapter);

	let adapter = open_adapter(temp.path()).await;
	let collection = adapter.open("settings").await.expect("Failed to reopen");
	assert_eq!(collection.get("nickname").expect("get"), Some(StoreValue::Null));
	assert_eq!(collection.get("missing").expect("get"), None);
}

#[tokio::test]
async fn test_collections_are_separate_files() {
	let (adapter, temp) = create_test_adapter().await;

	let first = adapter.open("first").await.expect("Failed to open");
	let second = adapter.open("second").await.expect("Failed to open");
	first.put("shared", StoreValue::Int(1)).expect("put");

	assert_eq!(second.get("shared").expect("get"), None);
	assert!(temp.path().join("first.redb").exists());
	assert!(temp.path().join("second.redb").exists());
}

#[tokio::test]
async fn test_open_is_idempotent() {
	let (adapter, _temp) = create_test_adapter().await;

	let first = adapter.open("settings").await.expect("Failed to open");
	first.put("a", StoreValue::Int(1)).expect("put");
	let second = adapter.open("settings").await.expect("Failed to open again");

	assert_eq!(second.get("a").expect("get"), Some(StoreValue::Int(1)));
}

#[tokio::test]
async fn test_reopen_after_close() {
	let (adapter, _temp) = create_test_adapter().await;

	let collection = adapter.open("settings").await.expect("Failed to open");
	collection.put("a", StoreValue::String("kept".into())).expect("put");
	collection.close().await.expect("close");
	assert!(matches!(collection.get("a"), Err(Error::StoreClosed(_))));
	assert!(matches!(collection.put("a", StoreValue::Int(2)), Err(Error::StoreClosed(_))));

	let reopened = adapter.open("settings").await.expect("Failed to reopen");
	assert_eq!(reopened.get("a").expect("get"), Some(StoreValue::String("kept".into())));
	assert!(collection.is_closed());
	assert!(!reopened.is_closed());
}

#[tokio::test]
async fn test_watch_emits_committed_writes_in_order() {
	let (adapter, _temp) = create_test_adapter().await;
	let collection = adapter.open("settings").await.expect("Failed to open");
	let mut events = collection.watch("counter").expect("watch");

	for i in 1..=3 {
		collection.put("counter", StoreValue::Int(i)).expect("put");
	}
	collection.put("other", StoreValue::Int(99)).expect("put");
	collection.delete("counter").expect("delete");

	for i in 1..=3 {
		let event = events.next().await.expect("event");
		assert_eq!(event.value(), Some(&StoreValue::Int(i)));
	}
	assert!(events.next().await.expect("delete event").is_delete());
}

#[tokio::test]
async fn test_clear_removes_everything_and_notifies() {
	let (adapter, temp) = create_test_adapter().await;
	let collection = adapter.open("settings").await.expect("Failed to open");
	collection.put("a", StoreValue::Int(1)).expect("put");
	collection.put("b", StoreValue::Null).expect("put");
	let mut events = collection.watch("b").expect("watch");

	collection.clear().await.expect("clear");

	assert!(events.next().await.expect("event").is_delete());
	assert!(collection.keys().expect("keys").is_empty());

	collection.close().await.expect("close");
	drop(adapter);
	let adapter = open_adapter(temp.path()).await;
	let collection = adapter.open("settings").await.expect("Failed to reopen");
	assert!(collection.keys().expect("keys").is_empty());
}

#[tokio::test]
async fn test_close_completes_watchers() {
	let (adapter, _temp) = create_test_adapter().await;
	let collection = adapter.open("settings").await.expect("Failed to open");
	let mut events = collection.watch("a").expect("watch");
	assert_eq!(collection.watcher_count(), 1);

	collection.close().await.expect("close");

	assert!(events.next().await.is_none());
	assert_eq!(collection.watcher_count(), 0);
}

#[tokio::test]
async fn test_delete_missing_key_is_silent() {
	let (adapter, _temp) = create_test_adapter().await;
	let collection = adapter.open("settings").await.expect("Failed to open");
	let mut events = collection.watch("ghost").expect("watch");

	collection.delete("ghost").expect("delete");
	collection.put("ghost", StoreValue::Bool(false)).expect("put");

	let event = events.next().await.expect("event");
	assert_eq!(event.value(), Some(&StoreValue::Bool(false)));
}

#[tokio::test]
async fn test_non_finite_float_is_rejected() {
	let (adapter, _temp) = create_test_adapter().await;
	let collection = adapter.open("settings").await.expect("Failed to open");

	let result = collection.put("ratio", StoreValue::Float(f64::NAN));
	assert!(matches!(result, Err(Error::Serialization(_))));

	let nested = StoreValue::List(vec![StoreValue::Float(f64::INFINITY)]);
	assert!(matches!(collection.put("ratios", nested), Err(Error::Serialization(_))));
	assert_eq!(collection.get("ratio").expect("get"), None);
}

#[tokio::test]
async fn test_invalid_collection_names() {
	let (adapter, _temp) = create_test_adapter().await;

	for name in ["", "../escape", ".hidden", "with space", "slash/name"] {
		let result = adapter.open(name).await;
		assert!(matches!(result, Err(Error::InvalidName(_))), "'{}' should be rejected", name);
	}
}

// vim: ts=4
