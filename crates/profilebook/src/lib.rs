//! `profilebook` - In-memory profile management over a JSON REST API
//!
//! This library provides the profile model, its validation rules, the
//! in-memory store that owns profiles and allocates ids, and the axum router
//! that exposes them over HTTP.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod profile;
pub mod store;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use profile::{Gender, NewProfile, Profile, ProfilePatch};
pub use store::{ProfileStore, SharedStore, StoreStats};
pub use validation::{validate_create, validate_update, FieldError, ValidationErrors};
