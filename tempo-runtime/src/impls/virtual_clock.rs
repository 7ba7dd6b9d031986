// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Deterministic simulated clock.
//!
//! Virtual time starts at zero and only moves when [`VirtualClock::advance`],
//! [`VirtualClock::advance_to`] or [`VirtualClock::run_all`] is called. Every
//! callback that falls due while time moves is fired synchronously, inside
//! that call, with the clock set to the callback's own deadline.
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Duration;
//! use tempo_runtime::{Timer, VirtualClock};
//!
//! # fn main() -> tempo_error::Result<()> {
//! let clock = VirtualClock::new();
//! let fired = Rc::new(Cell::new(false));
//!
//! let flag = fired.clone();
//! clock.schedule_after(Duration::from_millis(1000), Box::new(move || flag.set(true)));
//!
//! clock.advance(Duration::from_millis(999))?;
//! assert!(!fired.get());
//!
//! clock.advance(Duration::from_millis(1))?;
//! assert!(fired.get());
//! # Ok(())
//! # }
//! ```

use crate::timer::{Callback, Timer};
use core::cell::RefCell;
use core::fmt::{self, Debug};
use core::ops::{Add, Sub};
use core::time::Duration;
use std::collections::BTreeMap;
use std::rc::Rc;
use tempo_error::{Result, TempoError};

/// Maximum number of callbacks [`VirtualClock::run_all`] fires before giving up.
pub const DEFAULT_LOOP_LIMIT: usize = 1000;

/// A point in virtual time, measured from the creation of its clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualInstant(Duration);

impl VirtualInstant {
    pub const ZERO: Self = Self(Duration::ZERO);

    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// Time elapsed between the clock's origin and this instant.
    #[must_use]
    pub const fn since_origin(self) -> Duration {
        self.0
    }
}

impl Add<Duration> for VirtualInstant {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0.saturating_add(rhs))
    }
}

impl Sub<Duration> for VirtualInstant {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self {
        Self(self.0.saturating_sub(rhs))
    }
}

impl Sub<VirtualInstant> for VirtualInstant {
    type Output = Duration;

    fn sub(self, rhs: VirtualInstant) -> Duration {
        self.0.saturating_sub(rhs.0)
    }
}

/// Handle of a callback scheduled on a [`VirtualClock`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VirtualTimerHandle(TimerKey);

impl VirtualTimerHandle {
    /// The instant at which the callback is (or was) due.
    #[must_use]
    pub const fn deadline(&self) -> VirtualInstant {
        VirtualInstant(self.0.deadline)
    }
}

// Ordered by deadline first, then by scheduling order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct TimerKey {
    deadline: Duration,
    seq: u64,
}

struct ClockState {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<TimerKey, Callback>,
    advancing: bool,
    loop_limit: usize,
}

impl Default for ClockState {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BTreeMap::new(),
            advancing: false,
            loop_limit: DEFAULT_LOOP_LIMIT,
        }
    }
}

/// A single-threaded simulated clock implementing [`Timer`].
///
/// Cloning is cheap and every clone observes the same virtual time and the
/// same set of scheduled callbacks.
#[derive(Clone, Default)]
pub struct VirtualClock {
    state: Rc<RefCell<ClockState>>,
}

impl VirtualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many callbacks [`run_all`](Self::run_all) may fire before it
    /// reports [`TempoError::ResourceLimitExceeded`].
    #[must_use]
    pub fn with_loop_limit(self, limit: usize) -> Self {
        self.state.borrow_mut().loop_limit = limit;
        self
    }

    /// Virtual time elapsed since the clock was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of callbacks scheduled and not yet fired or cancelled.
    #[must_use]
    pub fn active_timers(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Deadline of the earliest outstanding callback.
    #[must_use]
    pub fn next_deadline(&self) -> Option<VirtualInstant> {
        self.state
            .borrow()
            .queue
            .first_key_value()
            .map(|(key, _)| VirtualInstant(key.deadline))
    }

    /// Moves virtual time forward by `by`, firing every callback that falls due.
    ///
    /// Returns the number of callbacks fired. Callbacks scheduled by fired
    /// callbacks also run if their deadline lies inside the window.
    ///
    /// # Errors
    /// Returns [`TempoError::InvalidState`] when called from inside a callback
    /// that is itself being fired by this clock.
    ///
    /// # Panics
    /// A panicking callback propagates out of this call. The callback is
    /// removed from the queue before it runs, so the clock stays usable.
    pub fn advance(&self, by: Duration) -> Result<usize> {
        let target = self.elapsed().saturating_add(by);
        self.fire_until(target)
    }

    /// Moves virtual time forward to `instant`.
    ///
    /// # Errors
    /// Returns [`TempoError::ClockRegression`] if `instant` lies in the past,
    /// and [`TempoError::InvalidState`] when called re-entrantly.
    pub fn advance_to(&self, instant: VirtualInstant) -> Result<usize> {
        let now = self.elapsed();
        if instant.0 < now {
            return Err(TempoError::clock_regression(now, instant.0));
        }
        self.fire_until(instant.0)
    }

    /// Fires every outstanding callback, including the ones they schedule,
    /// until no callback remains.
    ///
    /// # Errors
    /// Returns [`TempoError::ResourceLimitExceeded`] once the loop limit is
    /// reached with callbacks still queued, and [`TempoError::InvalidState`]
    /// when called re-entrantly.
    pub fn run_all(&self) -> Result<usize> {
        let _advancing = self.begin_advance()?;
        let limit = self.state.borrow().loop_limit;
        let mut fired = 0;

        while self.active_timers() > 0 {
            if fired >= limit {
                trace!("virtual clock aborting after {} timers", limit);
                return Err(TempoError::resource_limit("virtual timers", limit));
            }
            if let Some(callback) = self.pop_due(Duration::MAX) {
                callback();
                fired += 1;
            }
        }

        Ok(fired)
    }

    fn fire_until(&self, target: Duration) -> Result<usize> {
        let _advancing = self.begin_advance()?;
        let mut fired = 0;

        while let Some(callback) = self.pop_due(target) {
            callback();
            fired += 1;
        }

        self.state.borrow_mut().now = target;
        Ok(fired)
    }

    fn begin_advance(&self) -> Result<Advancing<'_>> {
        let mut state = self.state.borrow_mut();
        if state.advancing {
            return Err(TempoError::invalid_state(
                "virtual clock advanced from inside one of its own callbacks",
            ));
        }
        state.advancing = true;
        Ok(Advancing(&self.state))
    }

    // The borrow is released before the returned callback runs, so callbacks
    // may schedule and cancel on this clock.
    fn pop_due(&self, target: Duration) -> Option<Callback> {
        let mut state = self.state.borrow_mut();
        let key = *state.queue.first_key_value()?.0;
        if key.deadline > target {
            return None;
        }
        state.now = state.now.max(key.deadline);
        trace!("virtual timer #{} fired at {:?}", key.seq, key.deadline);
        state.queue.remove(&key)
    }
}

struct Advancing<'a>(&'a RefCell<ClockState>);

impl Drop for Advancing<'_> {
    fn drop(&mut self) {
        self.0.borrow_mut().advancing = false;
    }
}

impl Timer for VirtualClock {
    type Handle = VirtualTimerHandle;

    type Instant = VirtualInstant;

    fn schedule_after(&self, delay: Duration, callback: Callback) -> Self::Handle {
        let mut state = self.state.borrow_mut();
        let key = TimerKey {
            deadline: state.now.saturating_add(delay),
            seq: state.next_seq,
        };
        state.next_seq += 1;
        state.queue.insert(key, callback);
        trace!("virtual timer #{} scheduled for {:?}", key.seq, key.deadline);
        VirtualTimerHandle(key)
    }

    fn cancel(&self, handle: Self::Handle) {
        if self.state.borrow_mut().queue.remove(&handle.0).is_some() {
            trace!("virtual timer #{} cancelled", handle.0.seq);
        }
    }

    fn now(&self) -> Self::Instant {
        VirtualInstant(self.elapsed())
    }
}

impl Debug for VirtualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("VirtualClock")
            .field("now", &state.now)
            .field("active_timers", &state.queue.len())
            .field("loop_limit", &state.loop_limit)
            .finish()
    }
}
