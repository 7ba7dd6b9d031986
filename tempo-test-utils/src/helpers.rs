// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::future::Future;
use std::time::Duration;
use tempo_runtime::{Timer, VirtualClock};
use tokio::task::{yield_now, LocalSet};
use tokio::time::sleep;

#[must_use]
pub const fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Schedules `action` on the virtual clock `delay_ms` from now, the way a test
/// script would use `setTimeout` to place a call at a given virtual time.
pub fn call_after(clock: &VirtualClock, delay_ms: u64, action: impl FnOnce() + 'static) {
    clock.schedule_after(ms(delay_ms), Box::new(action));
}

/// Runs `future` inside a fresh `LocalSet`, as required by `TokioTimer`.
pub async fn in_local_set<F: Future>(future: F) -> F::Output {
    LocalSet::new().run_until(future).await
}

/// Lets a paused tokio clock move forward by `millis`, then gives woken local
/// tasks a chance to run.
pub async fn advance_by(millis: u64) {
    sleep(ms(millis)).await;
    yield_now().await;
}
