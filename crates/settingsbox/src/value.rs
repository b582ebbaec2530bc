//! Typed settings accessors
//!
//! A `SettingsValue` binds a name and an optional default to one slot of the
//! context's collection. It is a lightweight descriptor: it holds no store
//! resources, and any number of accessors with the same name are views of the
//! same slot.
//!
//! Reads resolve in this order:
//! - key absent: the declared default (or `None` when there is none)
//! - explicit null stored: `None`
//! - anything else: decoded by the codec; a failure is either returned or,
//!   for JSON-backed accessors, logged and read as `None`

use std::fmt::Debug;

use settingsbox_types::store_adapter::ChangeEvent;

use crate::codec::{DecodeFailure, NativeCodec, ValueCodec};
use crate::context::SettingsContext;
use crate::prelude::*;
use crate::watch::WatchStream;

/// Operations shared by every accessor kind.
pub trait Setting: Send + Sync {
	/// Type written through `set`
	type Value: Clone + Send + 'static;
	/// Type produced by `get` and `watch`
	type Output: Send + 'static;

	fn name(&self) -> &str;
	fn get(&self) -> SbResult<Self::Output>;
	fn set(&self, value: Option<Self::Value>) -> SbResult<()>;
	fn reset(&self) -> SbResult<()>;
	fn watch(&self) -> SbResult<WatchStream<Self::Output>>;
}

#[derive(Clone)]
pub struct SettingsValue<T, C = NativeCodec> {
	ctx: SettingsContext,
	name: Box<str>,
	default: Option<T>,
	codec: C,
}

impl<T> SettingsValue<T, NativeCodec>
where
	T: StoreNative + Clone + Send + Sync + 'static,
{
	/// Declare a setting holding a natively storable type.
	pub fn new(ctx: &SettingsContext, name: impl Into<Box<str>>, default: Option<T>) -> Self {
		Self::with_codec(ctx, name, default, NativeCodec)
	}
}

impl<T, C> SettingsValue<T, C> {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn default_value(&self) -> Option<&T> {
		self.default.as_ref()
	}

	pub fn context(&self) -> &SettingsContext {
		&self.ctx
	}
}

impl<T, C> SettingsValue<T, C>
where
	T: Clone + Send + Sync + 'static,
	C: ValueCodec<T>,
{
	pub fn with_codec(
		ctx: &SettingsContext,
		name: impl Into<Box<str>>,
		default: Option<T>,
		codec: C,
	) -> Self {
		Self { ctx: ctx.clone(), name: name.into(), default, codec }
	}

	/// Current value; the default when nothing is stored under the name.
	pub fn get(&self) -> SbResult<Option<T>> {
		match self.ctx.collection()?.get(&self.name)? {
			None => Ok(self.default.clone()),
			Some(raw) => self.decode(raw),
		}
	}

	/// Store a value. `None` stores an explicit null.
	pub fn set(&self, value: Option<T>) -> SbResult<()> {
		let raw = match &value {
			None => StoreValue::Null,
			Some(value) => self.codec.encode(value)?,
		};
		self.ctx.collection()?.put(&self.name, raw.clone())?;
		self.ctx.log_change(&self.name, &raw);
		Ok(())
	}

	/// Store the default (an explicit null when there is none).
	pub fn reset(&self) -> SbResult<()> {
		self.set(self.default.clone())
	}

	/// Delete the stored value so reads fall back to the default.
	pub fn remove(&self) -> SbResult<()> {
		self.ctx.collection()?.delete(&self.name)?;
		if self.ctx.logging_enabled() {
			info!("Setting '{}' removed", self.name);
		}
		Ok(())
	}

	/// True if the store holds anything (an explicit null included) for the name.
	pub fn is_set(&self) -> SbResult<bool> {
		self.ctx.collection()?.contains_key(&self.name)
	}

	/// Subscribe to writes made after this call. No current value is replayed.
	pub fn watch(&self) -> SbResult<WatchStream<Option<T>>> {
		let events = self.ctx.collection()?.watch(&self.name)?;
		let this = self.clone();
		Ok(WatchStream::new(&self.name, events, move |event| this.resolve_event(event)))
	}

	fn resolve_event(&self, event: ChangeEvent) -> SbResult<Option<T>> {
		match event {
			ChangeEvent::Put { value, .. } => self.decode(value),
			ChangeEvent::Delete { .. } => Ok(self.default.clone()),
		}
	}

	fn decode(&self, raw: StoreValue) -> SbResult<Option<T>> {
		if raw.is_null() {
			return Ok(None);
		}
		match self.codec.decode(raw) {
			Ok(value) => Ok(Some(value)),
			Err(err) => match self.codec.on_failure() {
				DecodeFailure::Propagate => Err(err),
				DecodeFailure::Absent => {
					self.ctx.log_decode_error(&self.name, &err);
					Ok(None)
				}
			},
		}
	}
}

impl<T, C> Setting for SettingsValue<T, C>
where
	T: Clone + Send + Sync + 'static,
	C: ValueCodec<T>,
{
	type Value = T;
	type Output = Option<T>;

	fn name(&self) -> &str {
		SettingsValue::name(self)
	}

	fn get(&self) -> SbResult<Option<T>> {
		SettingsValue::get(self)
	}

	fn set(&self, value: Option<T>) -> SbResult<()> {
		SettingsValue::set(self, value)
	}

	fn reset(&self) -> SbResult<()> {
		SettingsValue::reset(self)
	}

	fn watch(&self) -> SbResult<WatchStream<Option<T>>> {
		SettingsValue::watch(self)
	}
}

impl<T: Debug, C> Debug for SettingsValue<T, C> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingsValue")
			.field("name", &self.name)
			.field("default", &self.default)
			.finish_non_exhaustive()
	}
}

// vim: ts=4
