// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Timer facility used by the Tempo decorators.
//!
//! A timer schedules a one-shot callback after a duration and can cancel it
//! again. Two implementations are provided:
//!
//! - [`VirtualClock`](impls::virtual_clock::VirtualClock) - a deterministic
//!   simulated clock whose time only moves when a test advances it. Due
//!   callbacks fire synchronously, in deadline order.
//! - [`TokioTimer`](impls::tokio::TokioTimer) (feature `runtime-tokio`) -
//!   hosts each callback as an abortable task on the current `LocalSet`.

#[macro_use]
mod logging;

pub mod impls;
pub mod timer;

pub use impls::virtual_clock::{VirtualClock, VirtualInstant, VirtualTimerHandle};
pub use timer::{Callback, Timer};

#[cfg(feature = "runtime-tokio")]
pub use impls::tokio::{TokioTimer, TokioTimerHandle};
