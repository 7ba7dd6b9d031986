// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Delayed invocation for plain callables.
//!
//! Each call is delayed independently: the wrapper schedules its own timer per
//! call and forwards the receiver and arguments unchanged once it fires. Calls
//! are neither coalesced nor cancelled.

use crate::call::{erase, invoke, Call, Target};
use core::cell::Cell;
use core::fmt;
use core::time::Duration;
use std::rc::Rc;
use tempo_runtime::Timer;

/// Wraps `func` so that every call runs `ms` later.
///
/// ```rust
/// use std::time::Duration;
/// use tempo_decorators::{delay, spy};
/// use tempo_runtime::VirtualClock;
///
/// # fn main() -> tempo_error::Result<()> {
/// let clock = VirtualClock::new();
/// let f = spy(|_: (), _: &str| ());
/// let f1000 = delay(f.as_target(), Duration::from_millis(1000), clock.clone());
///
/// f1000.call((), "test");
/// clock.advance(Duration::from_millis(999))?;
/// assert_eq!(f.call_count(), 0);
///
/// clock.advance(Duration::from_millis(1))?;
/// assert!(f.called_once_with(&"test"));
/// # Ok(())
/// # }
/// ```
pub fn delay<C, A, R, F, TM>(func: F, ms: Duration, timer: TM) -> Delayed<C, A, TM>
where
    F: FnMut(C, A) -> R + 'static,
    C: 'static,
    A: 'static,
    R: 'static,
    TM: Timer,
{
    Delayed {
        state: Rc::new(DelayState {
            target: erase(func),
            ms,
            timer,
            scheduled: Cell::new(0),
        }),
    }
}

/// Handle to a delayed function.
///
/// Scheduled invocations keep the wrapped function alive, so they still run
/// after every handle has been dropped.
pub struct Delayed<C, A, TM: Timer> {
    state: Rc<DelayState<C, A, TM>>,
}

struct DelayState<C, A, TM> {
    target: Target<C, A>,
    ms: Duration,
    timer: TM,
    scheduled: Cell<usize>,
}

impl<C, A, TM> Delayed<C, A, TM>
where
    C: 'static,
    A: 'static,
    TM: Timer,
{
    /// Calls the delayed function with an explicit receiver and arguments.
    pub fn call(&self, receiver: C, args: A) {
        self.apply(Call::new(receiver, args));
    }

    /// Schedules `call` to run once the delay has elapsed.
    pub fn apply(&self, call: Call<C, A>) {
        let state = Rc::clone(&self.state);
        state.scheduled.set(state.scheduled.get() + 1);
        trace!("delay: call scheduled in {:?}", state.ms);

        self.state.timer.schedule_after(
            self.state.ms,
            Box::new(move || {
                state.scheduled.set(state.scheduled.get() - 1);
                invoke(&state.target, call);
            }),
        );
    }
}

impl<C, A, TM: Timer> Delayed<C, A, TM> {
    /// Number of calls waiting for their delay to elapse.
    #[must_use]
    pub fn scheduled(&self) -> usize {
        self.state.scheduled.get()
    }

    /// The delay applied to every call.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.state.ms
    }
}

impl<C, A, TM: Timer> Clone for Delayed<C, A, TM> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<C, A, TM: Timer> fmt::Debug for Delayed<C, A, TM> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delayed")
            .field("delay", &self.state.ms)
            .field("scheduled", &self.scheduled())
            .finish_non_exhaustive()
    }
}

/// Extension trait providing the `delay` decorator for callables.
pub trait DelayExt<C, A, R>: FnMut(C, A) -> R + Sized + 'static {
    /// Delays every call of this function by `ms`.
    fn delay_with_timer<TM: Timer>(self, ms: Duration, timer: TM) -> Delayed<C, A, TM>;
}

impl<F, C, A, R> DelayExt<C, A, R> for F
where
    F: FnMut(C, A) -> R + 'static,
    C: 'static,
    A: 'static,
    R: 'static,
{
    fn delay_with_timer<TM: Timer>(self, ms: Duration, timer: TM) -> Delayed<C, A, TM> {
        delay(self, ms, timer)
    }
}

/// Extension trait for delaying with the tokio timer.
///
/// Calls must be made from within a `tokio::task::LocalSet`.
#[cfg(feature = "runtime-tokio")]
pub trait DelayWithDefaultTimerExt<C, A, R>: DelayExt<C, A, R> {
    /// Delays every call using [`TokioTimer`](tempo_runtime::TokioTimer).
    fn delay(self, ms: Duration) -> Delayed<C, A, tempo_runtime::TokioTimer> {
        self.delay_with_timer(ms, tempo_runtime::TokioTimer)
    }
}

#[cfg(feature = "runtime-tokio")]
impl<F, C, A, R> DelayWithDefaultTimerExt<C, A, R> for F where F: DelayExt<C, A, R> {}
