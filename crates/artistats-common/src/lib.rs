//! # Artistats Common
//!
//! Shared error type, logging setup and test helpers used by every crate in
//! the artistats workspace.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{describe_reqwest_error, ArtistatsError, Result};
pub use logging::{init_default_logging, init_dev_logging, init_logging, LoggingConfig};
