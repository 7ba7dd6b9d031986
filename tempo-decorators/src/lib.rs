// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Timing decorators for plain Rust callables.
//!
//! This crate turns a function into a wrapper that controls *when* the
//! function runs. Every decorator takes the wrapped function, a duration and a
//! [`Timer`] that hosts its timers, and returns a cheap, cloneable handle.
//!
//! # Overview
//!
//! - **[`debounce`]** - Run only the last call of a burst, once a quiet period elapses
//! - **[`throttle`]** - Run at most once per interval, leading call immediately,
//!   latest suppressed call at the end of the window
//! - **[`delay`]** - Run every call after a fixed delay
//! - **[`spy`]** - Forward every call and record its arguments
//! - **[`Call`]** - The explicit receiver + argument list forwarded by every decorator
//!
//! Wrapped functions take an explicit receiver and an argument value,
//! `FnMut(C, A) -> R`. Use `()` when there is no receiver and a tuple for
//! several arguments.
//!
//! # Runtime Support
//!
//! - `VirtualClock` - deterministic simulated time, always available
//! - `runtime-tokio` (default) - `TokioTimer` and the `*WithDefaultTimerExt` traits
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use tempo_decorators::prelude::*;
//!
//! # fn main() -> tempo_error::Result<()> {
//! let clock = VirtualClock::new();
//! let log = spy(|_: (), x: u32| x);
//! let throttled = log
//!     .as_target()
//!     .throttle_with_timer(Duration::from_millis(1000), clock.clone());
//!
//! throttled.call((), 1);
//! throttled.call((), 2);
//! throttled.call((), 3);
//! clock.advance(Duration::from_millis(1000))?;
//!
//! assert_eq!(log.calls(), vec![1, 3]);
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod logging;

mod call;
mod debounce;
mod delay;
mod spy;
mod throttle;

pub mod prelude;

pub use call::Call;
pub use debounce::{debounce, DebounceExt, Debounced};
pub use delay::{delay, DelayExt, Delayed};
pub use spy::{spy, Spy};
pub use throttle::{throttle, ThrottleExt, Throttled};

pub use tempo_runtime::{Timer, VirtualClock};

#[cfg(feature = "runtime-tokio")]
pub use debounce::DebounceWithDefaultTimerExt;
#[cfg(feature = "runtime-tokio")]
pub use delay::DelayWithDefaultTimerExt;
#[cfg(feature = "runtime-tokio")]
pub use throttle::ThrottleWithDefaultTimerExt;

#[cfg(feature = "runtime-tokio")]
pub use tempo_runtime::TokioTimer;
