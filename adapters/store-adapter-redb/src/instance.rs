use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use redb::{ReadableDatabase, ReadableTable};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

use settingsbox_types::prelude::*;
use settingsbox_types::store_adapter::{watch_key, ChangeStream};

use crate::error::{self, Error as AdapterError};
use crate::storage;

/// An open collection backed by one redb file
///
/// Reads are served from a cache loaded when the file is opened. Writes go to
/// redb first and only reach the cache and the watchers once committed.
#[derive(Debug)]
pub struct CollectionInstance {
	name: Box<str>,
	path: PathBuf,

	/// redb database file, None once closed
	db: RwLock<Option<Arc<redb::Database>>>,

	/// Committed values
	cache: DashMap<Box<str>, StoreValue>,

	/// Broadcast channel for change events
	change_tx: RwLock<Option<broadcast::Sender<ChangeEvent>>>,

	/// Serializes writes so events leave in commit order
	write_lock: Mutex<()>,
}

impl CollectionInstance {
	/// Open (or create) the collection file and load its contents
	pub fn open(name: &str, path: &Path, broadcast_capacity: usize) -> Result<Self, AdapterError> {
		let db = if path.exists() {
			redb::Database::open(path).map_err(error::from_redb_error)?
		} else {
			redb::Database::create(path).map_err(error::from_redb_error)?
		};

		// Initialize tables
		{
			let tx = db.begin_write().map_err(error::from_redb_error)?;
			let _ = tx.open_table(storage::TABLE_SETTINGS).map_err(error::from_redb_error)?;
			tx.commit().map_err(error::from_redb_error)?;
		}

		let cache = DashMap::new();
		{
			let tx = db.begin_read().map_err(error::from_redb_error)?;
			let table = tx.open_table(storage::TABLE_SETTINGS).map_err(error::from_redb_error)?;
			for item in table.iter().map_err(error::from_redb_error)? {
				let (key, raw) = item.map_err(error::from_redb_error)?;
				match storage::decode_value(raw.value()) {
					Ok(value) => {
						cache.insert(Box::<str>::from(key.value()), value);
					}
					Err(err) => warn!("Skipping unreadable setting '{}' in '{}': {}", key.value(), name, err),
				}
			}
		}

		let (change_tx, _) = broadcast::channel(broadcast_capacity.max(1));

		Ok(Self {
			name: name.into(),
			path: path.to_path_buf(),
			db: RwLock::new(Some(Arc::new(db))),
			cache,
			change_tx: RwLock::new(Some(change_tx)),
			write_lock: Mutex::new(()),
		})
	}

	fn db(&self) -> Result<Arc<redb::Database>, AdapterError> {
		self.db.read().as_ref().map(Arc::clone).ok_or_else(|| AdapterError::Closed(self.name.clone()))
	}

	fn ensure_open(&self) -> SbResult<()> {
		if self.is_closed() {
			return Err(Error::StoreClosed(self.name.clone()));
		}
		Ok(())
	}

	fn notify(&self, event: ChangeEvent) {
		if let Some(tx) = self.change_tx.read().as_ref() {
			let _ = tx.send(event);
		}
	}
}

#[async_trait]
impl Collection for CollectionInstance {
	fn name(&self) -> &str {
		&self.name
	}

	fn get(&self, key: &str) -> SbResult<Option<StoreValue>> {
		self.ensure_open()?;
		Ok(self.cache.get(key).map(|entry| entry.value().clone()))
	}

	fn contains_key(&self, key: &str) -> SbResult<bool> {
		self.ensure_open()?;
		Ok(self.cache.contains_key(key))
	}

	fn keys(&self) -> SbResult<Vec<Box<str>>> {
		self.ensure_open()?;
		let mut keys: Vec<Box<str>> = self.cache.iter().map(|entry| entry.key().clone()).collect();
		keys.sort();
		Ok(keys)
	}

	fn put(&self, key: &str, value: StoreValue) -> SbResult<()> {
		let encoded = storage::encode_value(key, &value)?;
		let db = self.db()?;
		let _guard = self.write_lock.lock();

		let tx = db.begin_write().map_err(error::from_redb_error)?;
		{
			let mut table = tx.open_table(storage::TABLE_SETTINGS).map_err(error::from_redb_error)?;
			table.insert(key, encoded.as_str()).map_err(error::from_redb_error)?;
		}
		tx.commit().map_err(error::from_redb_error)?;

		self.cache.insert(key.into(), value.clone());
		trace!("Stored '{}' in '{}'", key, self.name);
		self.notify(ChangeEvent::Put { key: key.into(), value });
		Ok(())
	}

	fn delete(&self, key: &str) -> SbResult<()> {
		let db = self.db()?;
		let _guard = self.write_lock.lock();

		let tx = db.begin_write().map_err(error::from_redb_error)?;
		let existed = {
			let mut table = tx.open_table(storage::TABLE_SETTINGS).map_err(error::from_redb_error)?;
			let removed = table.remove(key).map_err(error::from_redb_error)?;
			removed.is_some()
		};
		tx.commit().map_err(error::from_redb_error)?;

		self.cache.remove(key);
		if existed {
			self.notify(ChangeEvent::Delete { key: key.into() });
		}
		Ok(())
	}

	fn watch(&self, key: &str) -> SbResult<ChangeStream> {
		self.ensure_open()?;
		match self.change_tx.read().as_ref() {
			Some(tx) => Ok(watch_key(tx.subscribe(), key)),
			None => Err(Error::StoreClosed(self.name.clone())),
		}
	}

	fn watcher_count(&self) -> usize {
		self.change_tx.read().as_ref().map_or(0, broadcast::Sender::receiver_count)
	}

	fn is_closed(&self) -> bool {
		self.db.read().is_none()
	}

	async fn clear(&self) -> SbResult<()> {
		let db = self.db()?;
		let _guard = self.write_lock.lock();

		let tx = db.begin_write().map_err(error::from_redb_error)?;
		tx.delete_table(storage::TABLE_SETTINGS).map_err(error::from_redb_error)?;
		let _ = tx.open_table(storage::TABLE_SETTINGS).map_err(error::from_redb_error)?;
		tx.commit().map_err(error::from_redb_error)?;

		let mut keys: Vec<Box<str>> = self.cache.iter().map(|entry| entry.key().clone()).collect();
		keys.sort();
		self.cache.clear();
		for key in keys {
			self.notify(ChangeEvent::Delete { key });
		}
		debug!("Cleared collection '{}'", self.name);
		Ok(())
	}

	async fn close(&self) -> SbResult<()> {
		let _guard = self.write_lock.lock();
		// Dropping the sender completes every watch stream
		self.change_tx.write().take();
		if self.db.write().take().is_some() {
			self.cache.clear();
			debug!("Closed collection '{}' ({})", self.name, self.path.display());
		}
		Ok(())
	}
}

// vim: ts=4
