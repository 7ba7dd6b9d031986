// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the Tempo decorator library
//!
//! The decorators themselves are infallible: a debounced or throttled wrapper
//! only ever forwards calls. Failures can only arise at the timer facility
//! boundary, for instance when no async runtime is available to host timers or
//! when a simulated clock is asked to drain a set of timers that keeps
//! re-arming itself.
//!
//! # Examples
//!
//! ```
//! use tempo_error::{Result, TempoError};
//!
//! fn drain() -> Result<usize> {
//!     Err(TempoError::resource_limit("virtual timers", 1000))
//! }
//!
//! assert!(drain().unwrap_err().is_recoverable());
//! ```

use std::time::Duration;

/// Root error type for all Tempo operations
#[derive(Debug, thiserror::Error)]
pub enum TempoError {
    /// No async runtime is available to host timers
    ///
    /// Returned when a runtime-backed timer is requested outside of the
    /// runtime it depends on.
    #[error("Timer runtime unavailable: {context}")]
    RuntimeUnavailable {
        /// Which runtime was looked up and why it failed
        context: String,
    },

    /// Resource limit exceeded
    ///
    /// Raised by the virtual clock when draining timers does not terminate
    /// within the configured number of firings.
    #[error("Resource limit exceeded: {resource} (limit: {limit})")]
    ResourceLimitExceeded {
        /// Name of the resource that hit its limit
        resource: String,
        /// The limit that was exceeded
        limit: usize,
    },

    /// Invalid state encountered
    ///
    /// An operation was attempted that would break a timer invariant, such as
    /// moving a clock backwards.
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Description of the invalid state
        message: String,
    },

    /// A clock was asked to move backwards
    #[error("Clock cannot move backwards: now {now:?}, requested {requested:?}")]
    ClockRegression {
        /// Elapsed time of the clock when the request was made
        now: Duration,
        /// Elapsed time that was requested
        requested: Duration,
    },
}

impl TempoError {
    /// Create a runtime unavailable error with the given context
    pub fn runtime_unavailable(context: impl Into<String>) -> Self {
        Self::RuntimeUnavailable {
            context: context.into(),
        }
    }

    /// Create a resource limit exceeded error
    pub fn resource_limit(resource: impl Into<String>, limit: usize) -> Self {
        Self::ResourceLimitExceeded {
            resource: resource.into(),
            limit,
        }
    }

    /// Create an invalid state error with the given message
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a clock regression error
    #[must_use]
    pub const fn clock_regression(now: Duration, requested: Duration) -> Self {
        Self::ClockRegression { now, requested }
    }

    /// Check if this is a recoverable error
    ///
    /// A drained clock that hit its loop limit can be drained again; the
    /// remaining timers are still queued.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::ResourceLimitExceeded { .. })
    }

    /// Check if this error indicates a permanent failure
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::RuntimeUnavailable { .. } | Self::InvalidState { .. } | Self::ClockRegression { .. }
        )
    }
}

/// Specialized Result type for Tempo operations
///
/// ```
/// use tempo_error::Result;
///
/// fn fired() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, TempoError>;
