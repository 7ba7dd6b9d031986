// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tempo_error::TempoError;
use tempo_runtime::{Timer, TokioTimer};
use tokio::task::LocalSet;
use tokio::time::sleep;

#[test]
fn test_try_current_fails_outside_runtime() {
    // Act
    let result = TokioTimer::try_current();

    // Assert
    assert!(matches!(result, Err(TempoError::RuntimeUnavailable { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_callback_fires_after_delay() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            // Arrange
            let timer = TokioTimer::try_current()?;
            let start = timer.now();
            let fired_at = Rc::new(Cell::new(None));
            let slot = fired_at.clone();

            // Act
            timer.schedule_after(
                Duration::from_millis(100),
                Box::new(move || slot.set(Some(timer.now()))),
            );

            // Assert
            sleep(Duration::from_millis(95)).await;
            assert!(fired_at.get().is_none());

            sleep(Duration::from_millis(10)).await;
            let elapsed = fired_at.get().map(|at| at - start).unwrap_or_default();
            assert!(elapsed >= Duration::from_millis(100));
            assert!(elapsed <= Duration::from_millis(101));
            Ok::<(), anyhow::Error>(())
        })
        .await
}

#[tokio::test(start_paused = true)]
async fn test_cancel_prevents_callback() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            // Arrange
            let timer = TokioTimer;
            let fired = Rc::new(Cell::new(false));
            let flag = fired.clone();
            let handle = timer.schedule_after(
                Duration::from_millis(50),
                Box::new(move || flag.set(true)),
            );

            // Act
            timer.cancel(handle.clone());
            timer.cancel(handle.clone());
            sleep(Duration::from_millis(200)).await;

            // Assert
            assert!(handle.is_cancelled());
            assert!(!fired.get());
            Ok(())
        })
        .await
}

#[tokio::test(start_paused = true)]
async fn test_cancel_after_fire_is_noop() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            // Arrange
            let timer = TokioTimer;
            let count = Rc::new(Cell::new(0));
            let counter = count.clone();
            let handle = timer.schedule_after(
                Duration::from_millis(10),
                Box::new(move || counter.set(counter.get() + 1)),
            );

            // Act
            sleep(Duration::from_millis(20)).await;
            timer.cancel(handle);
            sleep(Duration::from_millis(20)).await;

            // Assert
            assert_eq!(count.get(), 1);
            Ok(())
        })
        .await
}

#[tokio::test(start_paused = true)]
async fn test_callbacks_fire_in_deadline_order() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            // Arrange
            let timer = TokioTimer;
            let log = Rc::new(RefCell::new(Vec::new()));

            for (delay, label) in [(300, "late"), (100, "early"), (200, "middle")] {
                let log = log.clone();
                timer.schedule_after(
                    Duration::from_millis(delay),
                    Box::new(move || log.borrow_mut().push(label)),
                );
            }

            // Act
            sleep(Duration::from_millis(150)).await;
            let after_first = log.borrow().clone();
            sleep(Duration::from_millis(200)).await;

            // Assert
            assert_eq!(after_first, vec!["early"]);
            assert_eq!(*log.borrow(), vec!["early", "middle", "late"]);
            Ok(())
        })
        .await
}

#[tokio::test(start_paused = true)]
async fn test_panicking_callback_does_not_stop_other_timers() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            // Arrange
            let timer = TokioTimer;
            let fired = Rc::new(Cell::new(false));
            let flag = fired.clone();
            timer.schedule_after(Duration::from_millis(10), Box::new(|| panic!("boom")));
            timer.schedule_after(Duration::from_millis(20), Box::new(move || flag.set(true)));

            // Act
            sleep(Duration::from_millis(50)).await;

            // Assert
            assert!(fired.get());
            Ok(())
        })
        .await
}
