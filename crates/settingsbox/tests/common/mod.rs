//! Common test utilities and helpers
//!
//! Shared context builders and fixtures used across the integration tests.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use settingsbox::{SettingsConfig, SettingsContext};
use settingsbox_store_adapter_memory::MemoryStore;

/// Route tracing output through the test harness. Safe to call from every test.
pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}

/// Context over a fresh memory store, not yet opened
pub fn create_closed_context() -> SettingsContext {
	SettingsContext::new(Arc::new(MemoryStore::default()), SettingsConfig::default())
}

/// Context over a fresh memory store, opened and ready to use
pub async fn create_test_context() -> SettingsContext {
	setup_test_logging();
	let ctx = create_closed_context();
	ctx.open().await.expect("Failed to open settings context");
	ctx
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
	pub name: String,
	pub age: u32,
}

impl User {
	pub fn new(name: &str, age: u32) -> Self {
		Self { name: name.to_string(), age }
	}
}

pub fn user_to_json(user: &User) -> Value {
	json!({ "name": user.name, "age": user.age })
}

pub fn user_from_json(value: Value) -> Result<User, String> {
	let name = value.get("name").and_then(Value::as_str).ok_or("missing name")?;
	let age = value.get("age").and_then(Value::as_u64).ok_or("missing age")?;
	let age = u32::try_from(age).map_err(|e| e.to_string())?;
	Ok(User::new(name, age))
}

// vim: ts=4
