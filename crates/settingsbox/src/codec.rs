//! Encode/decode policies plugged into `SettingsValue`
//!
//! - `NativeCodec` stores values the store understands directly and surfaces
//!   shape mismatches as errors.
//! - `JsonCodec` stores any type as JSON text through caller-supplied
//!   conversion functions; a payload that fails to decode reads as "no value".

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::prelude::*;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// What an accessor does when a stored payload cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeFailure {
	/// Return the error to the caller
	Propagate,
	/// Log the error and read as "no value" (the default is not consulted)
	Absent,
}

pub trait ValueCodec<T>: Clone + Send + Sync + 'static {
	fn encode(&self, value: &T) -> SbResult<StoreValue>;

	/// Decode a non-null stored payload.
	fn decode(&self, raw: StoreValue) -> SbResult<T>;

	fn on_failure(&self) -> DecodeFailure {
		DecodeFailure::Propagate
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCodec;

impl<T: StoreNative> ValueCodec<T> for NativeCodec {
	fn encode(&self, value: &T) -> SbResult<StoreValue> {
		Ok(value.to_store())
	}

	fn decode(&self, raw: StoreValue) -> SbResult<T> {
		T::from_store(raw)
	}
}

type ToJsonFn<T> = dyn Fn(&T) -> Result<Value, BoxError> + Send + Sync;
type FromJsonFn<T> = dyn Fn(Value) -> Result<T, BoxError> + Send + Sync;

pub struct JsonCodec<T> {
	to_json: Arc<ToJsonFn<T>>,
	from_json: Arc<FromJsonFn<T>>,
	_marker: PhantomData<fn() -> T>,
}

impl<T: 'static> JsonCodec<T> {
	/// Build a codec from a pair of conversion functions.
	pub fn new<F, G, E>(to_json: F, from_json: G) -> Self
	where
		F: Fn(&T) -> Value + Send + Sync + 'static,
		G: Fn(Value) -> Result<T, E> + Send + Sync + 'static,
		E: Into<BoxError>,
	{
		Self {
			to_json: Arc::new(move |value: &T| -> Result<Value, BoxError> { Ok(to_json(value)) }),
			from_json: Arc::new(move |json: Value| -> Result<T, BoxError> {
				from_json(json).map_err(Into::into)
			}),
			_marker: PhantomData,
		}
	}

	/// Build a codec from the type's `serde` implementations.
	pub fn with_serde() -> Self
	where
		T: Serialize + DeserializeOwned,
	{
		Self {
			to_json: Arc::new(|value: &T| -> Result<Value, BoxError> {
				Ok(serde_json::to_value(value)?)
			}),
			from_json: Arc::new(|json: Value| -> Result<T, BoxError> {
				Ok(serde_json::from_value(json)?)
			}),
			_marker: PhantomData,
		}
	}
}

impl<T> Clone for JsonCodec<T> {
	fn clone(&self) -> Self {
		Self {
			to_json: Arc::clone(&self.to_json),
			from_json: Arc::clone(&self.from_json),
			_marker: PhantomData,
		}
	}
}

impl<T> std::fmt::Debug for JsonCodec<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("JsonCodec").finish_non_exhaustive()
	}
}

impl<T: 'static> ValueCodec<T> for JsonCodec<T> {
	fn encode(&self, value: &T) -> SbResult<StoreValue> {
		let json = (self.to_json)(value).map_err(|e| Error::Serialization(e.to_string()))?;
		Ok(StoreValue::String(serde_json::to_string(&json)?))
	}

	fn decode(&self, raw: StoreValue) -> SbResult<T> {
		let text = match raw {
			StoreValue::String(text) => text,
			other => {
				return Err(Error::TypeMismatch { expected: "string", found: other.type_name() });
			}
		};
		let json: Value =
			serde_json::from_str(&text).map_err(|e| Error::Decode(e.to_string()))?;
		(self.from_json)(json).map_err(|e| Error::Decode(e.to_string()))
	}

	fn on_failure(&self) -> DecodeFailure {
		DecodeFailure::Absent
	}
}


// vim: ts=4
