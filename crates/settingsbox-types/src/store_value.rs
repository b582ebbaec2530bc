//! Values a store can hold natively
//!
//! `StoreValue` is the payload stored under a setting name. Plain accessors
//! convert their type to and from it through [`StoreNative`]; serializable
//! accessors always store a `StoreValue::String` holding JSON text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::{Error, SbResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum StoreValue {
	/// Explicit null, distinct from an absent key
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
	List(Vec<StoreValue>),
	Map(BTreeMap<String, StoreValue>),
	DateTime(DateTime<Utc>),
}

impl StoreValue {
	pub fn is_null(&self) -> bool {
		matches!(self, StoreValue::Null)
	}

	/// Get the type name for error messages
	pub fn type_name(&self) -> &'static str {
		match self {
			StoreValue::Null => "null",
			StoreValue::Bool(_) => "bool",
			StoreValue::Int(_) => "int",
			StoreValue::Float(_) => "float",
			StoreValue::String(_) => "string",
			StoreValue::List(_) => "list",
			StoreValue::Map(_) => "map",
			StoreValue::DateTime(_) => "datetime",
		}
	}

	/// True if no float anywhere inside this value is NaN or infinite
	pub fn is_finite(&self) -> bool {
		match self {
			StoreValue::Float(f) => f.is_finite(),
			StoreValue::List(items) => items.iter().all(StoreValue::is_finite),
			StoreValue::Map(entries) => entries.values().all(StoreValue::is_finite),
			_ => true,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			StoreValue::String(s) => Some(s),
			_ => None,
		}
	}

	fn mismatch(&self, expected: &'static str) -> Error {
		Error::TypeMismatch { expected, found: self.type_name() }
	}
}

impl fmt::Display for StoreValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			StoreValue::Null => write!(f, "null"),
			StoreValue::Bool(b) => write!(f, "{}", b),
			StoreValue::Int(i) => write!(f, "{}", i),
			StoreValue::Float(x) => write!(f, "{}", x),
			StoreValue::String(s) => write!(f, "{:?}", s),
			StoreValue::List(items) => {
				write!(f, "[")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{}", item)?;
				}
				write!(f, "]")
			}
			StoreValue::Map(entries) => {
				write!(f, "{{")?;
				for (i, (key, value)) in entries.iter().enumerate() {
					if i > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{:?}: {}", key, value)?;
				}
				write!(f, "}}")
			}
			StoreValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
		}
	}
}

/// Types a store can hold without a serialization step
pub trait StoreNative: Sized {
	const TYPE_NAME: &'static str;

	fn to_store(&self) -> StoreValue;

	/// Coerce a stored value back. `StoreValue::Null` never reaches this:
	/// accessors map it to "no value" before decoding.
	fn from_store(value: StoreValue) -> SbResult<Self>;
}

impl StoreNative for StoreValue {
	const TYPE_NAME: &'static str = "value";

	fn to_store(&self) -> StoreValue {
		self.clone()
	}

	fn from_store(value: StoreValue) -> SbResult<Self> {
		Ok(value)
	}
}

impl StoreNative for bool {
	const TYPE_NAME: &'static str = "bool";

	fn to_store(&self) -> StoreValue {
		StoreValue::Bool(*self)
	}

	fn from_store(value: StoreValue) -> SbResult<Self> {
		match value {
			StoreValue::Bool(b) => Ok(b),
			other => Err(other.mismatch(Self::TYPE_NAME)),
		}
	}
}

impl StoreNative for i64 {
	const TYPE_NAME: &'static str = "int";

	fn to_store(&self) -> StoreValue {
		StoreValue::Int(*self)
	}

	fn from_store(value: StoreValue) -> SbResult<Self> {
		match value {
			StoreValue::Int(i) => Ok(i),
			other => Err(other.mismatch(Self::TYPE_NAME)),
		}
	}
}

impl StoreNative for i32 {
	const TYPE_NAME: &'static str = "int";

	fn to_store(&self) -> StoreValue {
		StoreValue::Int(i64::from(*self))
	}

	fn from_store(value: StoreValue) -> SbResult<Self> {
		match value {
			StoreValue::Int(i) => i32::try_from(i)
				.map_err(|_| Error::TypeMismatch { expected: "i32", found: "int out of range" }),
			other => Err(other.mismatch(Self::TYPE_NAME)),
		}
	}
}

impl StoreNative for u32 {
	const TYPE_NAME: &'static str = "int";

	fn to_store(&self) -> StoreValue {
		StoreValue::Int(i64::from(*self))
	}

	fn from_store(value: StoreValue) -> SbResult<Self> {
		match value {
			StoreValue::Int(i) => u32::try_from(i)
				.map_err(|_| Error::TypeMismatch { expected: "u32", found: "int out of range" }),
			other => Err(other.mismatch(Self::TYPE_NAME)),
		}
	}
}

impl StoreNative for f64 {
	const TYPE_NAME: &'static str = "float";

	fn to_store(&self) -> StoreValue {
		StoreValue::Float(*self)
	}

	#[allow(clippy::cast_precision_loss)]
	fn from_store(value: StoreValue) -> SbResult<Self> {
		match value {
			StoreValue::Float(x) => Ok(x),
			StoreValue::Int(i) => Ok(i as f64),
			other => Err(other.mismatch(Self::TYPE_NAME)),
		}
	}
}

impl StoreNative for String {
	const TYPE_NAME: &'static str = "string";

	fn to_store(&self) -> StoreValue {
		StoreValue::String(self.clone())
	}

	fn from_store(value: StoreValue) -> SbResult<Self> {
		match value {
			StoreValue::String(s) => Ok(s),
			other => Err(other.mismatch(Self::TYPE_NAME)),
		}
	}
}

impl StoreNative for DateTime<Utc> {
	const TYPE_NAME: &'static str = "datetime";

	fn to_store(&self) -> StoreValue {
		StoreValue::DateTime(*self)
	}

	fn from_store(value: StoreValue) -> SbResult<Self> {
		match value {
			StoreValue::DateTime(dt) => Ok(dt),
			other => Err(other.mismatch(Self::TYPE_NAME)),
		}
	}
}

impl<T: StoreNative> StoreNative for Vec<T> {
	const TYPE_NAME: &'static str = "list";

	fn to_store(&self) -> StoreValue {
		StoreValue::List(self.iter().map(StoreNative::to_store).collect())
	}

	fn from_store(value: StoreValue) -> SbResult<Self> {
		match value {
			StoreValue::List(items) => items.into_iter().map(T::from_store).collect(),
			other => Err(other.mismatch(Self::TYPE_NAME)),
		}
	}
}

impl<T: StoreNative> StoreNative for BTreeMap<String, T> {
	const TYPE_NAME: &'static str = "map";

	fn to_store(&self) -> StoreValue {
		StoreValue::Map(self.iter().map(|(k, v)| (k.clone(), v.to_store())).collect())
	}

	fn from_store(value: StoreValue) -> SbResult<Self> {
		match value {
			StoreValue::Map(entries) => {
				entries.into_iter().map(|(k, v)| T::from_store(v).map(|v| (k, v))).collect()
			}
			other => Err(other.mismatch(Self::TYPE_NAME)),
		}
	}
}

impl<T: StoreNative> StoreNative for HashMap<String, T> {
	const TYPE_NAME: &'static str = "map";

	fn to_store(&self) -> StoreValue {
		StoreValue::Map(self.iter().map(|(k, v)| (k.clone(), v.to_store())).collect())
	}

	fn from_store(value: StoreValue) -> SbResult<Self> {
		match value {
			StoreValue::Map(entries) => {
				entries.into_iter().map(|(k, v)| T::from_store(v).map(|v| (k, v))).collect()
			}
			other => Err(other.mismatch(Self::TYPE_NAME)),
		}
	}
}


// vim: ts=4
