// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Trailing debounce for plain callables.
//!
//! The debounced wrapper waits for a pause of at least the given duration
//! before calling the wrapped function with the latest call. If a new call
//! arrives before the duration elapses, the pending call is discarded and the
//! timer restarts.
//!
//! This implements **trailing debounce** semantics:
//! - When a call arrives, cancel the pending timer (if any) and arm a new one
//! - Remember only the latest receiver and arguments
//! - When the timer expires, call the function once with the remembered call
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use tempo_decorators::{debounce, spy};
//! use tempo_runtime::VirtualClock;
//!
//! # fn main() -> tempo_error::Result<()> {
//! let clock = VirtualClock::new();
//! let f = spy(|_: (), _: &str| ());
//! let debounced = debounce(f.as_target(), Duration::from_millis(1000), clock.clone());
//!
//! debounced.call((), "a");
//! debounced.call((), "b");
//! assert_eq!(f.call_count(), 0);
//!
//! clock.advance(Duration::from_millis(1000))?;
//! assert_eq!(f.calls(), vec!["b"]);
//! # Ok(())
//! # }
//! ```

use crate::call::{erase, invoke, Call, Target};
use core::cell::{Cell, RefCell};
use core::fmt;
use core::time::Duration;
use std::rc::Rc;
use tempo_runtime::Timer;

/// Wraps `func` so that bursts of calls collapse into one trailing call.
///
/// Every call to the returned wrapper cancels the previously scheduled
/// invocation and schedules a new one `wait` later, carrying that call's
/// receiver and arguments. `func` therefore runs exactly once per burst, with
/// the last call of the burst, `wait` after that last call.
///
/// The return value of `func` is discarded. A panic inside `func` propagates
/// to whatever fires the timer.
pub fn debounce<C, A, R, F, TM>(func: F, wait: Duration, timer: TM) -> Debounced<C, A, TM>
where
    F: FnMut(C, A) -> R + 'static,
    C: 'static,
    A: 'static,
    R: 'static,
    TM: Timer,
{
    Debounced {
        state: Rc::new(DebounceState {
            target: erase(func),
            wait,
            timer,
            pending: RefCell::new(None),
            generation: Cell::new(0),
        }),
    }
}

/// Handle to a debounced function.
///
/// Clones share the same pending call. Once every handle is dropped, a call
/// still waiting for its timer is discarded.
pub struct Debounced<C, A, TM: Timer> {
    state: Rc<DebounceState<C, A, TM>>,
}

struct DebounceState<C, A, TM: Timer> {
    target: Target<C, A>,
    wait: Duration,
    timer: TM,
    pending: RefCell<Option<Pending<C, A, TM::Handle>>>,
    generation: Cell<u64>,
}

struct Pending<C, A, H> {
    handle: H,
    call: Call<C, A>,
}

impl<C, A, TM> Debounced<C, A, TM>
where
    C: 'static,
    A: 'static,
    TM: Timer,
{
    /// Calls the debounced function with an explicit receiver and arguments.
    pub fn call(&self, receiver: C, args: A) {
        self.apply(Call::new(receiver, args));
    }

    /// Replaces any pending call with `call` and restarts the quiet period.
    pub fn apply(&self, call: Call<C, A>) {
        let state = &self.state;

        let superseded = state.pending.borrow_mut().take();
        if let Some(superseded) = superseded {
            trace!("debounce: superseding pending call");
            state.timer.cancel(superseded.handle);
        }

        // Bumped on every call so that a timer which could not be cancelled in
        // time never fires a newer call early.
        let generation = state.generation.get().wrapping_add(1);
        state.generation.set(generation);

        let weak = Rc::downgrade(state);
        let handle = state.timer.schedule_after(
            state.wait,
            Box::new(move || {
                if let Some(state) = weak.upgrade() {
                    state.quiet_period_elapsed(generation);
                }
            }),
        );

        *state.pending.borrow_mut() = Some(Pending { handle, call });
        debug!("debounce: call scheduled in {:?}", state.wait);
    }
}

impl<C, A, TM: Timer> Debounced<C, A, TM> {
    /// Whether a call is waiting for its quiet period to elapse.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.pending.borrow().is_some()
    }

    /// The quiet period this wrapper waits for.
    #[must_use]
    pub fn wait(&self) -> Duration {
        self.state.wait
    }
}

impl<C, A, TM: Timer> DebounceState<C, A, TM> {
    fn quiet_period_elapsed(&self, generation: u64) {
        if self.generation.get() != generation {
            trace!("debounce: ignoring stale timer");
            return;
        }
        let pending = self.pending.borrow_mut().take();
        if let Some(Pending { call, .. }) = pending {
            debug!("debounce: quiet period elapsed, invoking target");
            invoke(&self.target, call);
        }
    }
}

impl<C, A, TM: Timer> Clone for Debounced<C, A, TM> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<C, A, TM: Timer> fmt::Debug for Debounced<C, A, TM> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("wait", &self.state.wait)
            .field("pending", &self.is_pending())
            .finish_non_exhaustive()
    }
}

/// Extension trait providing the `debounce` decorator for callables.
///
/// This trait allows any `FnMut(C, A) -> R` closure or function to be turned
/// into a [`Debounced`] wrapper driven by an explicit timer.
pub trait DebounceExt<C, A, R>: FnMut(C, A) -> R + Sized + 'static {
    /// Debounces this function by the specified duration.
    ///
    /// # Arguments
    ///
    /// * `wait` - The duration of required inactivity before the function runs
    /// * `timer` - The timer facility hosting the quiet-period timers
    fn debounce_with_timer<TM: Timer>(self, wait: Duration, timer: TM) -> Debounced<C, A, TM>;
}

impl<F, C, A, R> DebounceExt<C, A, R> for F
where
    F: FnMut(C, A) -> R + 'static,
    C: 'static,
    A: 'static,
    R: 'static,
{
    fn debounce_with_timer<TM: Timer>(self, wait: Duration, timer: TM) -> Debounced<C, A, TM> {
        debounce(self, wait, timer)
    }
}

/// Extension trait for debouncing with the tokio timer.
///
/// Calls must be made from within a `tokio::task::LocalSet`.
#[cfg(feature = "runtime-tokio")]
pub trait DebounceWithDefaultTimerExt<C, A, R>: DebounceExt<C, A, R> {
    /// Debounces this function using [`TokioTimer`](tempo_runtime::TokioTimer).
    fn debounce(self, wait: Duration) -> Debounced<C, A, tempo_runtime::TokioTimer> {
        self.debounce_with_timer(wait, tempo_runtime::TokioTimer)
    }
}

#[cfg(feature = "runtime-tokio")]
impl<F, C, A, R> DebounceWithDefaultTimerExt<C, A, R> for F where F: DebounceExt<C, A, R> {}
