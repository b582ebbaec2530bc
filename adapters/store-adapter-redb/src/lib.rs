//! redb-based store adapter
//!
//! Every collection lives in its own `<name>.redb` file under the storage
//! directory. Values are stored as JSON-encoded `StoreValue`s, so an explicit
//! null survives a restart as a null rather than as a missing key.

#![forbid(unsafe_code)]

mod error;
mod instance;
pub mod storage;

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

pub use error::Error;
pub use instance::CollectionInstance;

use settingsbox_types::prelude::*;

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

/// redb-based implementation of StoreAdapter.
#[derive(Debug)]
pub struct RedbStore {
	storage_dir: PathBuf,
	instances: Arc<RwLock<HashMap<Box<str>, Arc<CollectionInstance>>>>,
	config: AdapterConfig,
}

impl RedbStore {
	/// Create a new redb store adapter.
	///
	/// # Arguments
	///
	/// * `storage_dir` - Directory where collection files are stored
	/// * `config` - Adapter configuration
	pub async fn new(storage_dir: impl Into<PathBuf>, config: AdapterConfig) -> SbResult<Self> {
		let storage_dir = storage_dir.into();
		tokio::fs::create_dir_all(&storage_dir).await?;
		info!("redb store at {}", storage_dir.display());

		Ok(Self { storage_dir, instances: Arc::new(RwLock::new(HashMap::new())), config })
	}

	pub fn storage_dir(&self) -> &Path {
		&self.storage_dir
	}

	/// Get the redb file path for a collection
	fn collection_path(&self, collection: &str) -> SbResult<PathBuf> {
		Ok(self.storage_dir.join(storage::collection_file_name(collection)?))
	}

	/// Get or open a collection instance
	async fn get_or_open_instance(&self, collection: &str) -> SbResult<Arc<CollectionInstance>> {
		// Fast path: already open
		{
			let instances = self.instances.read().await;
			if let Some(instance) = instances.get(collection) {
				if !instance.is_closed() {
					return Ok(Arc::clone(instance));
				}
			}
		}

		// Slow path: open the file
		let mut instances = self.instances.write().await;

		// Double-checked locking
		if let Some(instance) = instances.get(collection) {
			if !instance.is_closed() {
				return Ok(Arc::clone(instance));
			}
		}

		let path = self.collection_path(collection)?;
		let instance =
			Arc::new(CollectionInstance::open(collection, &path, self.config.broadcast_capacity)?);

		instances.insert(collection.into(), Arc::clone(&instance));
		debug!("Opened collection '{}' at {}", collection, path.display());

		Ok(instance)
	}
}

#[async_trait]
impl StoreAdapter for RedbStore {
	async fn open(&self, collection: &str) -> SbResult<Arc<dyn Collection>> {
		let instance = self.get_or_open_instance(collection).await?;
		Ok(instance)
	}
}

// vim: ts=4
