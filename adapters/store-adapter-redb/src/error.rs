use settingsbox_types::error::Error as SbError;
use std::fmt;

/// Internal error type for the redb store adapter
#[derive(Debug)]
pub enum Error {
	RedbError(String),
	JsonError(String),
	IoError(std::io::Error),
	InvalidName(String),
	NonFinite(Box<str>),
	Closed(Box<str>),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::RedbError(msg) => write!(f, "redb error: {}", msg),
			Error::JsonError(msg) => write!(f, "json error: {}", msg),
			Error::IoError(e) => write!(f, "io error: {}", e),
			Error::InvalidName(msg) => write!(f, "invalid collection name: {}", msg),
			Error::NonFinite(key) => write!(f, "value for '{}' contains a non-finite float", key),
			Error::Closed(name) => write!(f, "collection '{}' is closed", name),
		}
	}
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
	fn from(e: std::io::Error) -> Self {
		Error::IoError(e)
	}
}

impl From<serde_json::Error> for Error {
	fn from(e: serde_json::Error) -> Self {
		Error::JsonError(e.to_string())
	}
}

impl From<Error> for SbError {
	fn from(e: Error) -> Self {
		// Map internal errors to settingsbox errors
		match e {
			Error::IoError(io_err) => SbError::Io(io_err),
			Error::InvalidName(msg) => SbError::InvalidName(msg),
			Error::Closed(name) => SbError::StoreClosed(name),
			Error::JsonError(msg) => SbError::Serialization(msg),
			err @ Error::NonFinite(_) => SbError::Serialization(err.to_string()),
			Error::RedbError(msg) => SbError::DbError(msg),
		}
	}
}

/// Helper to convert redb errors
pub fn from_redb_error<E: fmt::Display>(err: E) -> Error {
	Error::RedbError(err.to_string())
}

// vim: ts=4
