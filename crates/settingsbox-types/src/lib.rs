//! Shared types and adapter traits for settingsbox.
//!
//! This crate contains the pieces shared between the accessor layer and the
//! storage adapters: the error type, natively storable values, and the
//! `StoreAdapter`/`Collection` traits a backend has to implement.

#![forbid(unsafe_code)]

pub mod error;
pub mod prelude;
pub mod store_adapter;
pub mod store_value;

// vim: ts=4
