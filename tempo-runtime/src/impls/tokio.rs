// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::timer::{Callback, Timer};
use core::time::Duration;
use futures::future::{AbortHandle, Abortable};
use tempo_error::{Result, TempoError};

/// [`Timer`] backed by the tokio time driver.
///
/// Callbacks are not `Send`, so each one is spawned with
/// [`tokio::task::spawn_local`] and therefore must be scheduled from within a
/// [`tokio::task::LocalSet`]. Instants come from [`tokio::time::Instant`], which
/// follows a paused test clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioTimer;

impl TokioTimer {
    /// Returns a timer after checking that a tokio runtime is running.
    ///
    /// # Errors
    /// Returns [`TempoError::RuntimeUnavailable`] outside of a tokio runtime.
    pub fn try_current() -> Result<Self> {
        tokio::runtime::Handle::try_current()
            .map(|_| Self)
            .map_err(|err| TempoError::runtime_unavailable(format!("tokio: {err}")))
    }
}

/// Handle of a callback scheduled on a [`TokioTimer`].
#[derive(Clone, Debug)]
pub struct TokioTimerHandle(AbortHandle);

impl TokioTimerHandle {
    /// Whether the callback was cancelled before it could run.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.is_aborted()
    }
}

impl Timer for TokioTimer {
    type Handle = TokioTimerHandle;

    type Instant = tokio::time::Instant;

    /// # Panics
    /// Panics when called outside of a [`tokio::task::LocalSet`].
    fn schedule_after(&self, delay: Duration, callback: Callback) -> Self::Handle {
        let (handle, registration) = AbortHandle::new_pair();
        // Deadline taken now, not on the task's first poll.
        let deadline = tokio::time::Instant::now() + delay;
        let sleep_then_fire = Abortable::new(
            async move {
                tokio::time::sleep_until(deadline).await;
                callback();
            },
            registration,
        );
        // Detached: the abort handle is the only way to stop it.
        let _task = tokio::task::spawn_local(sleep_then_fire);
        trace!("tokio timer scheduled in {:?}", delay);
        TokioTimerHandle(handle)
    }

    fn cancel(&self, handle: Self::Handle) {
        trace!("tokio timer cancelled");
        handle.0.abort();
    }

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }
}
