//! Store Adapter
//!
//! Traits and types for pluggable key-value backends that hold settings.
//!
//! An adapter opens named collections. Each collection is a flat mapping from
//! setting name to [`StoreValue`], with synchronous reads and writes (backends
//! keep an in-memory view once opened), asynchronous bulk operations, and a
//! per-key change stream.
//!
//! Each adapter implementation provides its own constructor handling backend-specific
//! initialization (storage directory, channel capacity, etc.).

use async_trait::async_trait;
use futures_core::Stream;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::warn;

use crate::error::SbResult;
use crate::store_value::StoreValue;

/// Change event emitted when a key is written or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ChangeEvent {
	/// A value (possibly an explicit null) was stored under the key
	Put { key: Box<str>, value: StoreValue },

	/// The key was removed, either directly or by clearing the collection
	Delete { key: Box<str> },
}

impl ChangeEvent {
	/// Get the key this event refers to.
	pub fn key(&self) -> &str {
		match self {
			ChangeEvent::Put { key, .. } | ChangeEvent::Delete { key } => key,
		}
	}

	/// Get the new value if this is a Put event.
	pub fn value(&self) -> Option<&StoreValue> {
		match self {
			ChangeEvent::Put { value, .. } => Some(value),
			ChangeEvent::Delete { .. } => None,
		}
	}

	/// Check if this is a Delete event.
	pub fn is_delete(&self) -> bool {
		matches!(self, ChangeEvent::Delete { .. })
	}
}

/// Stream of change events for a single key.
pub type ChangeStream = Pin<Box<dyn Stream<Item = ChangeEvent> + Send>>;

/// An open, named collection of settings.
#[async_trait]
pub trait Collection: Debug + Send + Sync {
	/// Name the collection was opened with.
	fn name(&self) -> &str;

	/// Read a value.
	///
	/// # Returns
	/// - `Ok(None)` if the key is absent
	/// - `Ok(Some(StoreValue::Null))` if an explicit null was stored
	/// - `Ok(Some(value))` otherwise
	fn get(&self, key: &str) -> SbResult<Option<StoreValue>>;

	/// Check whether the key holds any value (an explicit null counts).
	fn contains_key(&self, key: &str) -> SbResult<bool>;

	/// List all keys currently present.
	fn keys(&self) -> SbResult<Vec<Box<str>>>;

	/// Store a value, replacing any previous one. Durable when this returns.
	fn put(&self, key: &str, value: StoreValue) -> SbResult<()>;

	/// Remove a key. Emits a Delete event only if the key was present.
	fn delete(&self, key: &str) -> SbResult<()>;

	/// Subscribe to changes of a single key.
	///
	/// The subscription is taken when this is called, so only writes issued
	/// afterwards are observed. The stream completes when the collection closes.
	/// A subscriber that lags beyond the channel capacity skips missed events.
	fn watch(&self, key: &str) -> SbResult<ChangeStream>;

	/// Number of live watch subscriptions.
	fn watcher_count(&self) -> usize;

	/// True once `close` has run on this handle. Opening the collection again
	/// through the adapter yields a new live handle.
	fn is_closed(&self) -> bool;

	/// Remove every key, emitting a Delete event for each one.
	async fn clear(&self) -> SbResult<()>;

	/// Release the collection and complete all active watch streams.
	async fn close(&self) -> SbResult<()>;
}

/// Store Adapter trait.
///
/// Opens named collections. Opening is idempotent: opening the same name twice
/// returns the same live collection.
#[async_trait]
pub trait StoreAdapter: Debug + Send + Sync {
	async fn open(&self, collection: &str) -> SbResult<Arc<dyn Collection>>;
}

/// Turn a broadcast receiver into a stream of the events for one key.
///
/// Lagged receivers skip what they missed and keep going; the stream ends
/// when the sending side is dropped.
pub fn watch_key(mut rx: broadcast::Receiver<ChangeEvent>, key: &str) -> ChangeStream {
	let key: Box<str> = key.into();

	let stream = async_stream::stream! {
		loop {
			match rx.recv().await {
				Ok(event) => {
					if event.key() == key.as_ref() {
						yield event;
					}
				}
				Err(broadcast::error::RecvError::Lagged(n)) => {
					warn!("Watcher for '{}' lagged, missed {} events", key, n);
					continue;
				}
				Err(broadcast::error::RecvError::Closed) => {
					break;
				}
			}
		}
	};

	Box::pin(stream)
}


// vim: ts=4
