// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// A one-shot callback run by a [`Timer`] once its deadline is reached.
pub type Callback = Box<dyn FnOnce() + 'static>;

/// Schedules callbacks to run after a delay.
///
/// All callbacks of one timer run on the same logical thread, in
/// non-decreasing order of their deadlines. Callbacks with equal deadlines run
/// in the order they were scheduled.
pub trait Timer: Clone + Debug + 'static {
    /// Identifies one scheduled callback so that it can be cancelled.
    type Handle: Debug;

    type Instant: Copy
        + Debug
        + Ord
        + Add<Duration, Output = Self::Instant>
        + Sub<Self::Instant, Output = Duration>;

    /// Schedules `callback` to run once `delay` has elapsed.
    fn schedule_after(&self, delay: Duration, callback: Callback) -> Self::Handle;

    /// Cancels a scheduled callback.
    ///
    /// Cancelling a callback that already fired or was already cancelled is a
    /// no-op.
    fn cancel(&self, handle: Self::Handle);

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;
}
