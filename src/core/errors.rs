/*!
 * Error Types
 * Centralized error handling with thiserror and serde support
 */

use crate::core::types::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Common result type for tracking operations
pub type TrackResult<T> = Result<T, TrackError>;

/// Tracking errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackError {
    /// The underlying system allocation or reallocation refused the request.
    /// No index or counter state was touched.
    #[error("underlying allocation failed: requested {requested} bytes")]
    AllocationFailed { requested: Size },

    /// `start` was called while a session is already running.
    #[error("tracking session already active")]
    AlreadyActive,

    /// `stop` or `handle` was called with no session running. The memory
    /// operation itself is the caller's to perform; the tracker touched
    /// nothing.
    #[error("no tracking session active")]
    NotActive,
}
