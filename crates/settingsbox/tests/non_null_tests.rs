mod common;

use settingsbox::prelude::*;

use common::{create_test_context, user_from_json, user_to_json, User};

#[tokio::test]
async fn test_unwritten_reads_default() {
	let ctx = create_test_context().await;
	let dark_mode = NonNullSettingsValue::new(&ctx, "darkMode", false);

	assert!(!dark_mode.get().expect("get"));
	assert!(!*dark_mode.default_value());
}

#[tokio::test]
async fn test_set_none_stores_default() {
	let ctx = create_test_context().await;
	let volume = NonNullSettingsValue::new(&ctx, "volume", 5_i64);

	volume.set(Some(9)).expect("set");
	volume.set(None).expect("set");

	assert_eq!(volume.get().expect("get"), 5);
	let raw = ctx.collection().expect("collection").get("volume").expect("raw get");
	assert_eq!(raw, Some(StoreValue::Int(5)));
}

#[tokio::test]
async fn test_null_written_elsewhere_reads_default() {
	let ctx = create_test_context().await;
	let nullable = SettingsValue::new(&ctx, "volume", Some(1_i64));
	let volume = NonNullSettingsValue::new(&ctx, "volume", 5_i64);

	nullable.set(None).expect("set");

	assert_eq!(volume.get().expect("get"), 5);
}

#[tokio::test]
async fn test_reset_and_remove() {
	let ctx = create_test_context().await;
	let theme = NonNullSettingsValue::new(&ctx, "theme", "light".to_string());

	theme.set(Some("dark".to_string())).expect("set");
	theme.reset().expect("reset");
	assert_eq!(theme.get().expect("get"), "light");
	assert!(theme.is_set().expect("is_set"));

	theme.set(Some("dark".to_string())).expect("set");
	theme.remove().expect("remove");
	assert_eq!(theme.get().expect("get"), "light");
	assert!(!theme.is_set().expect("is_set"));
}

#[tokio::test]
async fn test_json_object_with_undecodable_payload_reads_default() {
	let ctx = create_test_context().await;
	let raw = SettingsValue::new(&ctx, "user", Some(String::new()));
	let user = NonNullSettingsValue::json(
		&ctx,
		"user",
		User::new("John Pork", 27),
		user_to_json,
		user_from_json,
	);

	raw.set(Some("[1, 2, 3]".to_string())).expect("set");

	assert_eq!(user.get().expect("get"), User::new("John Pork", 27));
}

#[tokio::test]
async fn test_json_object_round_trip() {
	let ctx = create_test_context().await;
	let user = NonNullSettingsValue::<User, _>::with_serde(&ctx, "user", User::new("John Pork", 27));

	user.set(Some(User::new("John Doe", 22))).expect("set");
	assert_eq!(user.get().expect("get"), User::new("John Doe", 22));

	user.set(None).expect("set");
	assert_eq!(user.get().expect("get"), User::new("John Pork", 27));
}

#[tokio::test]
async fn test_plain_type_mismatch_still_propagates() {
	let ctx = create_test_context().await;
	let text = SettingsValue::new(&ctx, "count", Some(String::new()));
	let count = NonNullSettingsValue::new(&ctx, "count", 0_i64);

	text.set(Some("three".to_string())).expect("set");

	assert!(matches!(count.get(), Err(Error::TypeMismatch { .. })));
}

// vim: ts=4
