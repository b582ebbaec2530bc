mod common;

use settingsbox::prelude::*;

use common::create_test_context;

#[tokio::test]
async fn test_unwritten_setting_reads_default() {
	let ctx = create_test_context().await;

	let dark_mode = SettingsValue::new(&ctx, "darkMode", Some(false));
	let nickname = SettingsValue::<String>::new(&ctx, "nickname", None);

	assert_eq!(dark_mode.get().expect("get"), Some(false));
	assert_eq!(nickname.get().expect("get"), None);
	assert!(!dark_mode.is_set().expect("is_set"));
}

#[tokio::test]
async fn test_set_then_get_through_other_accessor() {
	let ctx = create_test_context().await;

	let writer = SettingsValue::new(&ctx, "volume", Some(5_i64));
	let reader = SettingsValue::new(&ctx, "volume", Some(0_i64));

	writer.set(Some(11)).expect("set");
	assert_eq!(reader.get().expect("get"), Some(11));
	assert_eq!(writer.get().expect("get"), Some(11));
}

#[tokio::test]
async fn test_set_none_stores_explicit_null() {
	let ctx = create_test_context().await;
	let theme = SettingsValue::new(&ctx, "theme", Some("light".to_string()));

	theme.set(None).expect("set");

	assert_eq!(theme.get().expect("get"), None);
	assert!(theme.is_set().expect("is_set"));
	let raw = ctx.collection().expect("collection").get("theme").expect("raw get");
	assert_eq!(raw, Some(StoreValue::Null));
}

#[tokio::test]
async fn test_reset_restores_default() {
	let ctx = create_test_context().await;
	let volume = SettingsValue::new(&ctx, "volume", Some(3_i64));
	let unset = SettingsValue::<bool>::new(&ctx, "flag", None);

	volume.set(Some(10)).expect("set");
	volume.reset().expect("reset");
	assert_eq!(volume.get().expect("get"), Some(3));

	unset.set(Some(true)).expect("set");
	unset.reset().expect("reset");
	assert_eq!(unset.get().expect("get"), None);
}

#[tokio::test]
async fn test_remove_falls_back_to_default() {
	let ctx = create_test_context().await;
	let ratio = SettingsValue::new(&ctx, "ratio", Some(1.5_f64));

	ratio.set(Some(2.5)).expect("set");
	ratio.remove().expect("remove");

	assert_eq!(ratio.get().expect("get"), Some(1.5));
	assert!(!ratio.is_set().expect("is_set"));
}

#[tokio::test]
async fn test_type_mismatch_is_reported() {
	let ctx = create_test_context().await;
	let as_text = SettingsValue::new(&ctx, "shared", Some("x".to_string()));
	let as_bool = SettingsValue::new(&ctx, "shared", Some(false));

	as_text.set(Some("not a bool".to_string())).expect("set");

	let result = as_bool.get();
	assert!(matches!(result, Err(Error::TypeMismatch { expected: "bool", .. })));
}

#[tokio::test]
async fn test_int_reads_as_float() {
	let ctx = create_test_context().await;
	let as_int = SettingsValue::new(&ctx, "scale", Some(0_i64));
	let as_float = SettingsValue::new(&ctx, "scale", Some(0.0_f64));

	as_int.set(Some(4)).expect("set");
	assert_eq!(as_float.get().expect("get"), Some(4.0));
}

#[tokio::test]
async fn test_structured_native_values() {
	let ctx = create_test_context().await;
	let tags = SettingsValue::new(&ctx, "tags", Some(Vec::<String>::new()));

	tags.set(Some(vec!["a".to_string(), "b".to_string()])).expect("set");
	assert_eq!(tags.get().expect("get"), Some(vec!["a".to_string(), "b".to_string()]));
}

#[tokio::test]
async fn test_accessor_metadata() {
	let ctx = create_test_context().await;
	let volume = SettingsValue::new(&ctx, "volume", Some(7_i64));

	assert_eq!(volume.name(), "volume");
	assert_eq!(volume.default_value(), Some(&7));
}

#[tokio::test]
async fn test_setting_trait_in_generic_code() {
	fn bump<S: Setting<Value = i64, Output = Option<i64>>>(setting: &S) -> SbResult<()> {
		let current = setting.get()?.unwrap_or(0);
		setting.set(Some(current + 1))
	}

	let ctx = create_test_context().await;
	let counter = SettingsValue::new(&ctx, "counter", Some(1_i64));

	bump(&counter).expect("bump");
	bump(&counter).expect("bump");
	assert_eq!(counter.get().expect("get"), Some(3));
}

// vim: ts=4
