pub use crate::error::{Error, SbResult};
pub use crate::store_adapter::{ChangeEvent, ChangeStream, Collection, StoreAdapter};
pub use crate::store_value::{StoreNative, StoreValue};

pub use tracing::{debug, error, info, trace, warn};

// vim: ts=4
