pub use crate::config::SettingsConfig;
pub use crate::context::SettingsContext;
pub use crate::non_null::NonNullSettingsValue;
pub use crate::serializable::SerializableSettingsValue;
pub use crate::value::{Setting, SettingsValue};
pub use crate::watch::WatchStream;
pub use settingsbox_types::error::{Error, SbResult};
pub use settingsbox_types::store_value::{StoreNative, StoreValue};

pub use tracing::{debug, error, info, trace, warn};

// vim: ts=4
