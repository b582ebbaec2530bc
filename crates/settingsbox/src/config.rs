//! Settings context configuration

use std::env;

/// Default name of the shared settings collection
pub const DEFAULT_COLLECTION: &str = "settings";

#[derive(Debug, Clone)]
pub struct SettingsConfig {
	/// Name of the collection every accessor of a context reads and writes
	pub collection: Box<str>,

	/// Emit configuration-change and decode-error log events
	pub logging: bool,
}

impl Default for SettingsConfig {
	fn default() -> Self {
		Self { collection: DEFAULT_COLLECTION.into(), logging: true }
	}
}

impl SettingsConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a config from `SETTINGSBOX_COLLECTION` and `SETTINGSBOX_LOGGING`,
	/// falling back to defaults for unset variables.
	pub fn from_env() -> Self {
		let mut config = Self::default();
		if let Ok(collection) = env::var("SETTINGSBOX_COLLECTION") {
			if !collection.trim().is_empty() {
				config.collection = collection.trim().into();
			}
		}
		if let Ok(logging) = env::var("SETTINGSBOX_LOGGING") {
			config.logging = parse_flag(&logging).unwrap_or(config.logging);
		}
		config
	}

	pub fn collection(mut self, collection: impl Into<Box<str>>) -> Self {
		self.collection = collection.into();
		self
	}

	pub fn logging(mut self, logging: bool) -> Self {
		self.logging = logging;
		self
	}
}

fn parse_flag(value: &str) -> Option<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "on" | "yes" => Some(true),
		"0" | "false" | "off" | "no" => Some(false),
		_ => None,
	}
}


// vim: ts=4
