// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Leading and trailing throttle for plain callables.
//!
//! The throttled wrapper calls the function immediately, then suppresses
//! further calls for the given interval. The latest call received during that
//! cooldown window runs when the window ends and opens a new window.
//!
//! This implements **leading + trailing throttle** semantics:
//! - When a call arrives and we are idle:
//!   - Call the function synchronously
//!   - Start the cooldown timer
//! - When a call arrives while cooling down:
//!   - Remember it, replacing any call remembered earlier in the window
//! - When the cooldown timer expires:
//!   - If a call was remembered, call the function with it and start a new cooldown
//!   - Otherwise become idle
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use tempo_decorators::{spy, throttle};
//! use tempo_runtime::VirtualClock;
//!
//! # fn main() -> tempo_error::Result<()> {
//! let clock = VirtualClock::new();
//! let f = spy(|_: (), _: u32| ());
//! let throttled = throttle(f.as_target(), Duration::from_millis(1000), clock.clone());
//!
//! throttled.call((), 1);
//! throttled.call((), 2);
//! throttled.call((), 3);
//! assert_eq!(f.calls(), vec![1]);
//!
//! clock.advance(Duration::from_millis(1000))?;
//! assert_eq!(f.calls(), vec![1, 3]);
//! # Ok(())
//! # }
//! ```

use crate::call::{erase, invoke, Call, Target};
use core::cell::{Cell, RefCell};
use core::fmt;
use core::time::Duration;
use std::rc::Rc;
use tempo_runtime::Timer;

/// Wraps `func` so that it runs at most once per `interval`.
///
/// The first call runs synchronously. Calls made during the following
/// `interval` are coalesced into the latest one, which runs when the interval
/// ends. The cooldown timer is never cancelled; it always runs to completion
/// and is re-armed whenever a remembered call fires.
///
/// The return value of `func` is discarded. A panic inside `func` propagates
/// to the caller on the leading call, and to whatever fires the timer on a
/// trailing call.
pub fn throttle<C, A, R, F, TM>(func: F, interval: Duration, timer: TM) -> Throttled<C, A, TM>
where
    F: FnMut(C, A) -> R + 'static,
    C: 'static,
    A: 'static,
    R: 'static,
    TM: Timer,
{
    Throttled {
        state: Rc::new(ThrottleState {
            target: erase(func),
            interval,
            timer,
            cooling: Cell::new(false),
            saved: RefCell::new(None),
        }),
    }
}

/// Handle to a throttled function.
///
/// Clones share the same cooldown window. Once every handle is dropped, a
/// remembered trailing call is discarded.
pub struct Throttled<C, A, TM: Timer> {
    state: Rc<ThrottleState<C, A, TM>>,
}

struct ThrottleState<C, A, TM> {
    target: Target<C, A>,
    interval: Duration,
    timer: TM,
    cooling: Cell<bool>,
    saved: RefCell<Option<Call<C, A>>>,
}

impl<C, A, TM> Throttled<C, A, TM>
where
    C: 'static,
    A: 'static,
    TM: Timer,
{
    /// Calls the throttled function with an explicit receiver and arguments.
    pub fn call(&self, receiver: C, args: A) {
        self.apply(Call::new(receiver, args));
    }

    /// Runs `call` now if idle, otherwise remembers it for the end of the
    /// current cooldown window.
    pub fn apply(&self, call: Call<C, A>) {
        if self.state.cooling.get() {
            trace!("throttle: cooling down, remembering latest call");
            *self.state.saved.borrow_mut() = Some(call);
            return;
        }
        fire(&self.state, call);
    }
}

impl<C, A, TM: Timer> Throttled<C, A, TM> {
    /// Whether a cooldown window is active.
    #[must_use]
    pub fn is_cooling(&self) -> bool {
        self.state.cooling.get()
    }

    /// Whether a call is remembered for the end of the current window.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.state.saved.borrow().is_some()
    }

    /// The length of one cooldown window.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.state.interval
    }
}

// Enters (or stays in) the cooling state, arms the cooldown timer and runs
// the call. Cooling is set first so a re-entrant call from inside the target
// is remembered rather than run recursively.
fn fire<C, A, TM>(state: &Rc<ThrottleState<C, A, TM>>, call: Call<C, A>)
where
    C: 'static,
    A: 'static,
    TM: Timer,
{
    state.cooling.set(true);

    let weak = Rc::downgrade(state);
    state.timer.schedule_after(
        state.interval,
        Box::new(move || {
            if let Some(state) = weak.upgrade() {
                cooldown_elapsed(&state);
            }
        }),
    );

    debug!("throttle: invoking target, cooling for {:?}", state.interval);
    invoke(&state.target, call);
}

fn cooldown_elapsed<C, A, TM>(state: &Rc<ThrottleState<C, A, TM>>)
where
    C: 'static,
    A: 'static,
    TM: Timer,
{
    let saved = state.saved.borrow_mut().take();
    match saved {
        Some(call) => {
            debug!("throttle: cooldown elapsed, running trailing call");
            fire(state, call);
        }
        None => {
            debug!("throttle: cooldown elapsed, idle");
            state.cooling.set(false);
        }
    }
}

impl<C, A, TM: Timer> Clone for Throttled<C, A, TM> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<C, A, TM: Timer> fmt::Debug for Throttled<C, A, TM> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttled")
            .field("interval", &self.state.interval)
            .field("cooling", &self.is_cooling())
            .field("pending", &self.has_pending())
            .finish_non_exhaustive()
    }
}

/// Extension trait providing the `throttle` decorator for callables.
pub trait ThrottleExt<C, A, R>: FnMut(C, A) -> R + Sized + 'static {
    /// Throttles this function to at most one run per `interval`.
    ///
    /// # Arguments
    ///
    /// * `interval` - The cooldown window following each run
    /// * `timer` - The timer facility hosting the cooldown timers
    fn throttle_with_timer<TM: Timer>(self, interval: Duration, timer: TM)
        -> Throttled<C, A, TM>;
}

impl<F, C, A, R> ThrottleExt<C, A, R> for F
where
    F: FnMut(C, A) -> R + 'static,
    C: 'static,
    A: 'static,
    R: 'static,
{
    fn throttle_with_timer<TM: Timer>(
        self,
        interval: Duration,
        timer: TM,
    ) -> Throttled<C, A, TM> {
        throttle(self, interval, timer)
    }
}

/// Extension trait for throttling with the tokio timer.
///
/// Calls must be made from within a `tokio::task::LocalSet`.
#[cfg(feature = "runtime-tokio")]
pub trait ThrottleWithDefaultTimerExt<C, A, R>: ThrottleExt<C, A, R> {
    /// Throttles this function using [`TokioTimer`](tempo_runtime::TokioTimer).
    fn throttle(self, interval: Duration) -> Throttled<C, A, tempo_runtime::TokioTimer> {
        self.throttle_with_timer(interval, tempo_runtime::TokioTimer)
    }
}

#[cfg(feature = "runtime-tokio")]
impl<F, C, A, R> ThrottleWithDefaultTimerExt<C, A, R> for F where F: ThrottleExt<C, A, R> {}
