//! In-memory store adapter
//!
//! Keeps every collection in a `DashMap` for the lifetime of the adapter.
//! Closing a collection completes its watchers but keeps the data, so opening
//! it again from the same adapter sees the previous values, much like a
//! durable store would after a restart.

#![forbid(unsafe_code)]

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use settingsbox_types::prelude::*;
use settingsbox_types::store_adapter::{watch_key, ChangeStream};

/// Adapter configuration options
#[derive(Debug, Clone)]
pub struct AdapterConfig {
	/// Broadcast channel capacity for change events
	pub broadcast_capacity: usize,
}

impl Default for AdapterConfig {
	fn default() -> Self {
		Self { broadcast_capacity: 1000 }
	}
}

#[derive(Debug, Default)]
pub struct MemoryStore {
	collections: DashMap<Box<str>, Arc<MemoryCollection>>,
	config: AdapterConfig,
}

impl MemoryStore {
	pub fn new(config: AdapterConfig) -> Self {
		Self { collections: DashMap::new(), config }
	}
}

#[async_trait]
impl StoreAdapter for MemoryStore {
	async fn open(&self, collection: &str) -> SbResult<Arc<dyn Collection>> {
		let capacity = self.config.broadcast_capacity.max(1);
		let instance = Arc::clone(
			self.collections
				.entry(collection.into())
				.or_insert_with(|| Arc::new(MemoryCollection::new(collection)))
				.value(),
		);
		instance.reopen(capacity);
		debug!("Opened memory collection '{}'", collection);
		Ok(instance)
	}
}

#[derive(Debug)]
pub struct MemoryCollection {
	name: Box<str>,
	entries: DashMap<Box<str>, StoreValue>,

	/// None once closed
	change_tx: RwLock<Option<broadcast::Sender<ChangeEvent>>>,

	/// Serializes writes so events leave in write order
	write_lock: Mutex<()>,
}

impl MemoryCollection {
	fn new(name: &str) -> Self {
		Self {
			name: name.into(),
			entries: DashMap::new(),
			change_tx: RwLock::new(None),
			write_lock: Mutex::new(()),
		}
	}

	fn reopen(&self, capacity: usize) {
		let mut change_tx = self.change_tx.write();
		if change_tx.is_none() {
			*change_tx = Some(broadcast::channel(capacity).0);
		}
	}

	fn ensure_open(&self) -> SbResult<()> {
		if self.is_closed() {
			return Err(Error::StoreClosed(self.name.clone()));
		}
		Ok(())
	}

	fn notify(&self, event: ChangeEvent) {
		if let Some(tx) = self.change_tx.read().as_ref() {
			// No receivers is not an error
			let _ = tx.send(event);
		}
	}
}

#[async_trait]
impl Collection for MemoryCollection {
	fn name(&self) -> &str {
		&self.name
	}

	fn get(&self, key: &str) -> SbResult<Option<StoreValue>> {
		self.ensure_open()?;
		Ok(self.entries.get(key).map(|entry| entry.value().clone()))
	}

	fn contains_key(&self, key: &str) -> SbResult<bool> {
		self.ensure_open()?;
		Ok(self.entries.contains_key(key))
	}

	fn keys(&self) -> SbResult<Vec<Box<str>>> {
		self.ensure_open()?;
		let mut keys: Vec<Box<str>> = self.entries.iter().map(|entry| entry.key().clone()).collect();
		keys.sort();
		Ok(keys)
	}

	fn put(&self, key: &str, value: StoreValue) -> SbResult<()> {
		self.ensure_open()?;
		// Same rule as the durable adapters, which cannot encode NaN or infinities
		if !value.is_finite() {
			return Err(Error::Serialization(format!(
				"value for '{}' contains a non-finite float",
				key
			)));
		}
		let _guard = self.write_lock.lock();
		self.entries.insert(key.into(), value.clone());
		trace!("Stored '{}' in memory collection '{}'", key, self.name);
		self.notify(ChangeEvent::Put { key: key.into(), value });
		Ok(())
	}

	fn delete(&self, key: &str) -> SbResult<()> {
		self.ensure_open()?;
		let _guard = self.write_lock.lock();
		if self.entries.remove(key).is_some() {
			self.notify(ChangeEvent::Delete { key: key.into() });
		}
		Ok(())
	}

	fn watch(&self, key: &str) -> SbResult<ChangeStream> {
		match self.change_tx.read().as_ref() {
			Some(tx) => Ok(watch_key(tx.subscribe(), key)),
			None => Err(Error::StoreClosed(self.name.clone())),
		}
	}

	fn watcher_count(&self) -> usize {
		self.change_tx.read().as_ref().map_or(0, broadcast::Sender::receiver_count)
	}

	fn is_closed(&self) -> bool {
		self.change_tx.read().is_none()
	}

	async fn clear(&self) -> SbResult<()> {
		self.ensure_open()?;
		let _guard = self.write_lock.lock();
		let keys: Vec<Box<str>> = self.entries.iter().map(|entry| entry.key().clone()).collect();
		self.entries.clear();
		for key in keys {
			self.notify(ChangeEvent::Delete { key });
		}
		debug!("Cleared memory collection '{}'", self.name);
		Ok(())
	}

	async fn close(&self) -> SbResult<()> {
		// Dropping the sender completes every watch stream
		if self.change_tx.write().take().is_some() {
			debug!("Closed memory collection '{}'", self.name);
		}
		Ok(())
	}
}


// vim: ts=4
