/*!
 * Core Module
 * Shared types, errors, and constants
 */

pub mod errors;
pub mod limits;
pub mod types;

pub use errors::{TrackError, TrackResult};
pub use types::{Address, Category, RawCall, SessionConfig, Size};
