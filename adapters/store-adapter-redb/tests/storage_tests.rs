use settingsbox_store_adapter_redb::storage::{
	collection_file_name, decode_value, encode_value, validate_collection_name,
};
use settingsbox_store_adapter_redb::Error;
use settingsbox_types::store_value::StoreValue;

#[test]
fn test_encode_keeps_null_distinct() {
	let encoded = encode_value("a", &StoreValue::Null).expect("encode");
	assert_eq!(decode_value(&encoded).expect("decode"), StoreValue::Null);
}

#[test]
fn test_encode_preserves_int_and_float() {
	let int = encode_value("a", &StoreValue::Int(3)).expect("encode");
	let float = encode_value("b", &StoreValue::Float(3.0)).expect("encode");

	assert_eq!(decode_value(&int).expect("decode"), StoreValue::Int(3));
	assert_eq!(decode_value(&float).expect("decode"), StoreValue::Float(3.0));
}

#[test]
fn test_encode_rejects_non_finite() {
	let result = encode_value("ratio", &StoreValue::Float(f64::NEG_INFINITY));
	assert!(matches!(result, Err(Error::NonFinite(key)) if &*key == "ratio"));
}

#[test]
fn test_decode_rejects_garbage() {
	assert!(matches!(decode_value("not json"), Err(Error::JsonError(_))));
}

#[test]
fn test_collection_names() {
	assert!(validate_collection_name("settings").is_ok());
	assert!(validate_collection_name("user-prefs_v2.beta").is_ok());
	assert!(validate_collection_name(&"x".repeat(129)).is_err());
	assert!(validate_collection_name("ünïcode").is_err());

	assert_eq!(collection_file_name("settings").expect("name"), "settings.redb");
	assert!(matches!(collection_file_name("a/b"), Err(Error::InvalidName(_))));
}

// vim: ts=4
