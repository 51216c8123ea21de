//! Utility module: errors, logging, and serde helpers.

pub mod errors;
pub mod logging;
pub mod serde_helpers;

pub use errors::{GovError, Result};
pub use logging::init_logging;
