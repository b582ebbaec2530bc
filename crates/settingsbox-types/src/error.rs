//! Error type shared by the accessor layer and every store adapter

use std::fmt;

pub type SbResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// The settings context has not been opened (or was closed)
	StoreNotOpen,
	/// The named collection was closed by its adapter
	StoreClosed(Box<str>),
	/// A stored value does not have the shape the accessor expects
	TypeMismatch { expected: &'static str, found: &'static str },
	/// A stored payload could not be decoded into the accessor type
	Decode(String),
	Serialization(String),
	InvalidName(String),
	DbError(String),

	// externals
	Io(std::io::Error),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::StoreNotOpen => write!(f, "settings store is not open"),
			Error::StoreClosed(name) => write!(f, "collection '{}' is closed", name),
			Error::TypeMismatch { expected, found } => {
				write!(f, "type mismatch: expected {}, found {}", expected, found)
			}
			Error::Decode(msg) => write!(f, "decode error: {}", msg),
			Error::Serialization(msg) => write!(f, "serialization error: {}", msg),
			Error::InvalidName(msg) => write!(f, "invalid name: {}", msg),
			Error::DbError(msg) => write!(f, "database error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Serialization(err.to_string())
	}
}

// vim: ts=4
