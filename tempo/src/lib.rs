// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Tempo
//!
//! Time-based call decorators for plain Rust callables.
//!
//! ## Overview
//!
//! - **debounce** runs a function once, `wait` after the last call of a burst,
//!   with the receiver and arguments of that last call.
//! - **throttle** runs the first call immediately, then at most once per
//!   interval, always with the latest suppressed call.
//! - **delay** runs every call after a fixed delay.
//! - **spy** records every call it forwards, for tests.
//!
//! Decorators schedule through the [`Timer`] trait. Production code uses
//! [`TokioTimer`]; tests use [`VirtualClock`], which only moves when told to.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use tempo::prelude::*;
//!
//! # fn main() -> tempo::Result<()> {
//! let clock = VirtualClock::new();
//! let f = spy(|_: (), value: u32| value);
//! let f1000 = throttle(f.as_target(), Duration::from_millis(1000), clock.clone());
//!
//! f1000.call((), 1);
//! f1000.call((), 2);
//! f1000.call((), 3);
//! assert_eq!(f.calls(), vec![1]);
//!
//! clock.advance(Duration::from_millis(1000))?;
//! assert_eq!(f.calls(), vec![1, 3]);
//! # Ok(())
//! # }
//! ```

pub use tempo_decorators::{
    debounce, delay, spy, throttle, Call, DebounceExt, Debounced, DelayExt, Delayed, Spy,
    ThrottleExt, Throttled,
};
pub use tempo_error::{Result, TempoError};
pub use tempo_runtime::{Callback, Timer, VirtualClock, VirtualInstant, VirtualTimerHandle};

#[cfg(feature = "runtime-tokio")]
pub use tempo_decorators::{
    DebounceWithDefaultTimerExt, DelayWithDefaultTimerExt, ThrottleWithDefaultTimerExt,
};
#[cfg(feature = "runtime-tokio")]
pub use tempo_runtime::{TokioTimer, TokioTimerHandle};

/// Prelude module for convenient imports
pub mod prelude {
    pub use tempo_decorators::prelude::*;
    pub use tempo_error::TempoError;
}
