use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::{env, path};
use tracing::{info, warn};

use settingsbox::prelude::*;
use settingsbox_store_adapter_redb::{AdapterConfig, RedbStore};

pub struct Config {
	pub data_dir: path::PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct User {
	name: String,
	age: u32,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> SbResult<()> {
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_target(false)
		.init();

	let config = Config {
		data_dir: path::PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string())),
	};

	let store = RedbStore::new(config.data_dir.join("settings"), AdapterConfig::default()).await?;
	let ctx = SettingsContext::new(Arc::new(store), SettingsConfig::from_env());
	ctx.open().await?;

	let dark_mode = NonNullSettingsValue::new(&ctx, "darkMode", false);
	let user = SerializableSettingsValue::<User>::with_serde(
		&ctx,
		"user",
		Some(User { name: "John Pork".into(), age: 27 }),
	);

	info!("darkMode = {}", dark_mode.get()?);
	info!("user = {:?}", user.get()?);

	let mut changes = dark_mode.watch()?;
	dark_mode.set(Some(!dark_mode.get()?))?;
	match changes.next().await {
		Some(Ok(value)) => info!("darkMode changed to {}", value),
		Some(Err(err)) => warn!("darkMode change could not be read: {}", err),
		None => warn!("darkMode watch ended"),
	}
	changes.unsubscribe();

	user.set(Some(User { name: "John Doe".into(), age: 22 }))?;
	info!("user = {:?}", user.get()?);

	info!("stored settings: {:?}", ctx.stored_names()?);
	ctx.close().await
}

// vim: ts=4
