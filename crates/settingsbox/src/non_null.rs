//! Settings that always resolve to a value
//!
//! Wraps a `SettingsValue` together with its mandatory default. Writing `None`
//! stores the default instead, and any read that would produce "no value"
//! (an explicit null written by another accessor, or an undecodable JSON
//! payload) yields the default.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

use crate::codec::{BoxError, JsonCodec, NativeCodec, ValueCodec};
use crate::context::SettingsContext;
use crate::prelude::*;
use crate::value::{Setting, SettingsValue};
use crate::watch::WatchStream;

#[derive(Clone)]
pub struct NonNullSettingsValue<T, C = NativeCodec> {
	inner: SettingsValue<T, C>,
	default: T,
}

impl<T> NonNullSettingsValue<T, NativeCodec>
where
	T: StoreNative + Clone + Send + Sync + 'static,
{
	pub fn new(ctx: &SettingsContext, name: impl Into<Box<str>>, default: T) -> Self {
		Self::with_codec(ctx, name, default, NativeCodec)
	}
}

impl<T> NonNullSettingsValue<T, JsonCodec<T>>
where
	T: Clone + Send + Sync + 'static,
{
	pub fn json<F, G, E>(
		ctx: &SettingsContext,
		name: impl Into<Box<str>>,
		default: T,
		to_json: F,
		from_json: G,
	) -> Self
	where
		F: Fn(&T) -> Value + Send + Sync + 'static,
		G: Fn(Value) -> Result<T, E> + Send + Sync + 'static,
		E: Into<BoxError>,
	{
		Self::with_codec(ctx, name, default, JsonCodec::new(to_json, from_json))
	}

	pub fn with_serde(ctx: &SettingsContext, name: impl Into<Box<str>>, default: T) -> Self
	where
		T: Serialize + DeserializeOwned,
	{
		Self::with_codec(ctx, name, default, JsonCodec::with_serde())
	}
}

impl<T, C> NonNullSettingsValue<T, C>
where
	T: Clone + Send + Sync + 'static,
	C: ValueCodec<T>,
{
	pub fn with_codec(
		ctx: &SettingsContext,
		name: impl Into<Box<str>>,
		default: T,
		codec: C,
	) -> Self {
		let inner = SettingsValue::with_codec(ctx, name, Some(default.clone()), codec);
		Self { inner, default }
	}

	pub fn name(&self) -> &str {
		self.inner.name()
	}

	pub fn default_value(&self) -> &T {
		&self.default
	}

	pub fn get(&self) -> SbResult<T> {
		Ok(self.inner.get()?.unwrap_or_else(|| self.substitute()))
	}

	/// Store a value; `None` stores the default.
	pub fn set(&self, value: Option<T>) -> SbResult<()> {
		let value = value.unwrap_or_else(|| self.default.clone());
		self.inner.set(Some(value))
	}

	pub fn reset(&self) -> SbResult<()> {
		self.inner.set(Some(self.default.clone()))
	}

	pub fn remove(&self) -> SbResult<()> {
		self.inner.remove()
	}

	pub fn is_set(&self) -> SbResult<bool> {
		self.inner.is_set()
	}

	/// Subscribe to writes; "no value" events are reported as the default.
	pub fn watch(&self) -> SbResult<WatchStream<T>> {
		let default = self.default.clone();
		Ok(self.inner.watch()?.map_values(move |value| value.unwrap_or_else(|| default.clone())))
	}

	fn substitute(&self) -> T {
		debug!("Setting '{}' holds no value, using its default", self.inner.name());
		self.default.clone()
	}
}

impl<T, C> Setting for NonNullSettingsValue<T, C>
where
	T: Clone + Send + Sync + 'static,
	C: ValueCodec<T>,
{
	type Value = T;
	type Output = T;

	fn name(&self) -> &str {
		NonNullSettingsValue::name(self)
	}

	fn get(&self) -> SbResult<T> {
		NonNullSettingsValue::get(self)
	}

	fn set(&self, value: Option<T>) -> SbResult<()> {
		NonNullSettingsValue::set(self, value)
	}

	fn reset(&self) -> SbResult<()> {
		NonNullSettingsValue::reset(self)
	}

	fn watch(&self) -> SbResult<WatchStream<T>> {
		NonNullSettingsValue::watch(self)
	}
}

impl<T: Debug, C> Debug for NonNullSettingsValue<T, C> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("NonNullSettingsValue")
			.field("name", &self.inner.name())
			.field("default", &self.default)
			.finish()
	}
}

// vim: ts=4
