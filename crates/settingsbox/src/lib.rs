//! Typed settings accessors over a pluggable key-value store.
//!
//! # Architecture
//!
//! - **Context** (`context.rs`): opens/closes the shared collection, bulk reset, logging switch
//! - **Value** (`value.rs`): `SettingsValue` accessor and the `Setting` trait
//! - **Codec** (`codec.rs`): native and JSON encode/decode policies
//! - **Serializable** (`serializable.rs`): JSON-backed accessor constructors
//! - **NonNull** (`non_null.rs`): accessor that always resolves to a value
//! - **Watch** (`watch.rs`): change subscriptions
//!
//! ```rust,ignore
//! let ctx = SettingsContext::new(adapter, SettingsConfig::default());
//! ctx.open().await?;
//!
//! let dark_mode = NonNullSettingsValue::new(&ctx, "darkMode", false);
//! dark_mode.set(Some(true))?;
//! assert!(dark_mode.get()?);
//! ```

#![forbid(unsafe_code)]

pub mod codec;
pub mod config;
pub mod context;
pub mod non_null;
pub mod prelude;
pub mod serializable;
pub mod value;
pub mod watch;

pub use settingsbox_types::{error, store_adapter, store_value};

pub use codec::{JsonCodec, NativeCodec, ValueCodec};
pub use config::SettingsConfig;
pub use context::SettingsContext;
pub use non_null::NonNullSettingsValue;
pub use serializable::SerializableSettingsValue;
pub use value::{Setting, SettingsValue};
pub use watch::WatchStream;

// vim: ts=4
