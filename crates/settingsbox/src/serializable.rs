//! Settings holding arbitrary objects as JSON text
//!
//! The object is converted with caller-supplied functions (or its `serde`
//! implementations) and stored as a JSON string in the same slot a plain
//! accessor would use. Writing `None` stores an explicit null, bypassing the
//! conversion. A stored payload that fails to decode reads as `None` and is
//! logged; the declared default only covers the "never written" case.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::codec::{BoxError, JsonCodec};
use crate::context::SettingsContext;
use crate::value::SettingsValue;

pub type SerializableSettingsValue<T> = SettingsValue<T, JsonCodec<T>>;

impl<T> SettingsValue<T, JsonCodec<T>>
where
	T: Clone + Send + Sync + 'static,
{
	/// Declare a JSON-backed setting with explicit conversion functions.
	pub fn json<F, G, E>(
		ctx: &SettingsContext,
		name: impl Into<Box<str>>,
		default: Option<T>,
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

	/// Declare a JSON-backed setting converted through `serde`.
	pub fn with_serde(ctx: &SettingsContext, name: impl Into<Box<str>>, default: Option<T>) -> Self
	where
		T: Serialize + DeserializeOwned,
	{
		Self::with_codec(ctx, name, default, JsonCodec::with_serde())
	}
}

// vim: ts=4
