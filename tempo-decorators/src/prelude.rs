// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting all commonly used traits and types.
//!
//! ```ignore
//! use tempo_decorators::prelude::*;
//!
//! let debounced = on_input.debounce(Duration::from_millis(100));
//! let throttled = on_scroll.throttle(Duration::from_millis(200));
//! ```
//!
//! # Contents
//!
//! ## Extension Traits (Decorators)
//!
//! - [`DebounceExt`] - Run only after a quiet period
//! - [`ThrottleExt`] - Run then suppress for an interval
//! - [`DelayExt`] - Run every call after a delay
//!
//! ## Functions and Types
//!
//! - [`debounce`], [`throttle`], [`delay`], [`spy`]
//! - [`Call`], [`Timer`], [`VirtualClock`]

pub use crate::call::Call;
pub use crate::debounce::{debounce, DebounceExt, Debounced};
pub use crate::delay::{delay, DelayExt, Delayed};
pub use crate::spy::{spy, Spy};
pub use crate::throttle::{throttle, ThrottleExt, Throttled};
pub use tempo_runtime::{Timer, VirtualClock};

#[cfg(feature = "runtime-tokio")]
pub use crate::debounce::DebounceWithDefaultTimerExt;
#[cfg(feature = "runtime-tokio")]
pub use crate::delay::DelayWithDefaultTimerExt;
#[cfg(feature = "runtime-tokio")]
pub use crate::throttle::ThrottleWithDefaultTimerExt;
#[cfg(feature = "runtime-tokio")]
pub use tempo_runtime::TokioTimer;
