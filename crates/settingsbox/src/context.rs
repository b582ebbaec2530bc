//! Settings context: store lifecycle and process-wide switches
//!
//! A context owns the handle to the shared collection. Accessors hold a clone
//! of the context and look the collection up on every operation, so creating
//! an accessor is cheap and never touches the store.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use settingsbox_types::store_adapter::{Collection, StoreAdapter};

use crate::config::SettingsConfig;
use crate::prelude::*;

#[derive(Debug)]
struct ContextInner {
	adapter: Arc<dyn StoreAdapter>,
	config: SettingsConfig,
	collection: RwLock<Option<Arc<dyn Collection>>>,
	logging: AtomicBool,
}

#[derive(Debug, Clone)]
pub struct SettingsContext {
	inner: Arc<ContextInner>,
}

impl SettingsContext {
	pub fn new(adapter: Arc<dyn StoreAdapter>, config: SettingsConfig) -> Self {
		let logging = AtomicBool::new(config.logging);
		Self {
			inner: Arc::new(ContextInner {
				adapter,
				config,
				collection: RwLock::new(None),
				logging,
			}),
		}
	}

	/// Open the shared collection. Must complete before any accessor is used.
	///
	/// Calling it again while open is a no-op. Calling it after `close`, or
	/// after another holder of the same collection closed it, opens the
	/// collection again.
	pub async fn open(&self) -> SbResult<()> {
		if self.is_open() {
			return Ok(());
		}

		let collection = self.inner.adapter.open(&self.inner.config.collection).await?;

		let mut slot = self.inner.collection.write();
		if slot.as_ref().is_none_or(|current| current.is_closed()) {
			*slot = Some(collection);
			info!("Opened settings collection '{}'", self.inner.config.collection);
		}

		Ok(())
	}

	/// Close the shared collection. Active watch streams complete.
	pub async fn close(&self) -> SbResult<()> {
		let collection = self.inner.collection.write().take();
		if let Some(collection) = collection {
			collection.close().await?;
			info!("Closed settings collection '{}'", self.inner.config.collection);
		}
		Ok(())
	}

	/// True while the context holds a collection that has not been closed.
	pub fn is_open(&self) -> bool {
		self.inner.collection.read().as_ref().is_some_and(|collection| !collection.is_closed())
	}

	/// Remove every stored setting, for all accessors of this context.
	pub async fn reset_settings(&self) -> SbResult<()> {
		let collection = self.collection()?;
		collection.clear().await?;
		if self.logging_enabled() {
			info!("All settings in '{}' were reset", self.inner.config.collection);
		}
		Ok(())
	}

	/// Names that currently hold a value in the collection.
	pub fn stored_names(&self) -> SbResult<Vec<Box<str>>> {
		self.collection()?.keys()
	}

	pub fn set_logging(&self, enabled: bool) {
		self.inner.logging.store(enabled, Ordering::Relaxed);
	}

	pub fn logging_enabled(&self) -> bool {
		self.inner.logging.load(Ordering::Relaxed)
	}

	pub fn config(&self) -> &SettingsConfig {
		&self.inner.config
	}

	/// The open collection, or `Error::StoreNotOpen`.
	pub fn collection(&self) -> SbResult<Arc<dyn Collection>> {
		self.inner.collection.read().clone().ok_or(Error::StoreNotOpen)
	}

	pub(crate) fn log_change(&self, name: &str, value: &StoreValue) {
		if self.logging_enabled() {
			info!("Setting '{}' changed to {}", name, value);
		}
	}

	pub(crate) fn log_decode_error(&self, name: &str, err: &Error) {
		if self.logging_enabled() {
			error!("Failed to decode setting '{}': {}", name, err);
		}
	}
}

// vim: ts=4
