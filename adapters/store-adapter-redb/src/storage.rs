use settingsbox_types::store_value::StoreValue;

use crate::Error;

/// Settings table: name -> JSON-encoded `StoreValue`
pub const TABLE_SETTINGS: redb::TableDefinition<&str, &str> = redb::TableDefinition::new("settings");

/// File extension of collection files
pub const FILE_EXTENSION: &str = "redb";

const MAX_NAME_LEN: usize = 128;

/// Encode a value for the settings table
pub fn encode_value(key: &str, value: &StoreValue) -> Result<String, Error> {
	// serde_json would silently write NaN and infinities as null
	if !value.is_finite() {
		return Err(Error::NonFinite(key.into()));
	}
	Ok(serde_json::to_string(value)?)
}

/// Decode a value read from the settings table
pub fn decode_value(raw: &str) -> Result<StoreValue, Error> {
	Ok(serde_json::from_str(raw)?)
}

/// Collection names become file names, so only a conservative character set is accepted
pub fn validate_collection_name(name: &str) -> Result<(), Error> {
	if name.is_empty() {
		return Err(Error::InvalidName("collection name is empty".into()));
	}
	if name.len() > MAX_NAME_LEN {
		return Err(Error::InvalidName(format!("'{}' is longer than {} bytes", name, MAX_NAME_LEN)));
	}
	if name.starts_with('.') {
		return Err(Error::InvalidName(format!("'{}' starts with a dot", name)));
	}
	if let Some(c) = name.chars().find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))) {
		return Err(Error::InvalidName(format!("'{}' contains '{}'", name, c)));
	}
	Ok(())
}

/// File name holding a collection
pub fn collection_file_name(name: &str) -> Result<String, Error> {
	validate_collection_name(name)?;
	Ok(format!("{}.{}", name, FILE_EXTENSION))
}

// vim: ts=4
