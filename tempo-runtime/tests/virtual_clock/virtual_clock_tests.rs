// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tempo_runtime::{Timer, VirtualClock, VirtualInstant};

fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnOnce()>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let make = move |label: &'static str| {
        let sink = sink.clone();
        Box::new(move || sink.borrow_mut().push(label)) as Box<dyn FnOnce()>
    };
    (log, make)
}

#[test]
fn test_callback_fires_exactly_at_deadline() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let (log, make) = recorder();
    clock.schedule_after(Duration::from_millis(1000), make("a"));

    // Act & Assert
    assert_eq!(clock.advance(Duration::from_millis(999))?, 0);
    assert!(log.borrow().is_empty());

    assert_eq!(clock.advance(Duration::from_millis(1))?, 1);
    assert_eq!(*log.borrow(), vec!["a"]);
    assert_eq!(clock.active_timers(), 0);

    Ok(())
}

#[test]
fn test_callbacks_fire_in_deadline_order() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let (log, make) = recorder();
    clock.schedule_after(Duration::from_millis(300), make("late"));
    clock.schedule_after(Duration::from_millis(100), make("early"));
    clock.schedule_after(Duration::from_millis(200), make("middle"));

    // Act
    let fired = clock.advance(Duration::from_secs(1))?;

    // Assert
    assert_eq!(fired, 3);
    assert_eq!(*log.borrow(), vec!["early", "middle", "late"]);
    Ok(())
}

#[test]
fn test_equal_deadlines_fire_in_scheduling_order() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let (log, make) = recorder();
    clock.schedule_after(Duration::from_millis(50), make("first"));
    clock.schedule_after(Duration::from_millis(50), make("second"));
    clock.schedule_after(Duration::from_millis(50), make("third"));

    // Act
    clock.advance(Duration::from_millis(50))?;

    // Assert
    assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    Ok(())
}

#[test]
fn test_now_reports_callback_deadline_while_firing() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let observed = Rc::new(RefCell::new(Vec::new()));

    for delay in [250, 700] {
        let observed = observed.clone();
        let inner = clock.clone();
        clock.schedule_after(
            Duration::from_millis(delay),
            Box::new(move || observed.borrow_mut().push(inner.now())),
        );
    }

    // Act
    clock.advance(Duration::from_millis(2000))?;

    // Assert
    assert_eq!(
        *observed.borrow(),
        vec![VirtualInstant::from_millis(250), VirtualInstant::from_millis(700)]
    );
    assert_eq!(clock.now(), VirtualInstant::from_millis(2000));
    Ok(())
}

#[test]
fn test_callbacks_scheduled_while_firing_run_inside_window() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let (log, make) = recorder();
    let inner = clock.clone();
    let chained = make("chained");
    clock.schedule_after(
        Duration::from_millis(100),
        Box::new(move || {
            inner.schedule_after(Duration::from_millis(100), chained);
        }),
    );

    // Act & Assert
    assert_eq!(clock.advance(Duration::from_millis(150))?, 1);
    assert!(log.borrow().is_empty());
    assert_eq!(clock.next_deadline(), Some(VirtualInstant::from_millis(200)));

    assert_eq!(clock.advance(Duration::from_millis(50))?, 1);
    assert_eq!(*log.borrow(), vec!["chained"]);
    Ok(())
}

#[test]
fn test_cancel_prevents_callback() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let (log, make) = recorder();
    let handle = clock.schedule_after(Duration::from_millis(100), make("cancelled"));
    clock.schedule_after(Duration::from_millis(100), make("kept"));

    // Act
    clock.cancel(handle);
    clock.advance(Duration::from_millis(100))?;

    // Assert
    assert_eq!(*log.borrow(), vec!["kept"]);
    Ok(())
}

#[test]
fn test_cancel_is_idempotent() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let (log, make) = recorder();
    let fired = clock.schedule_after(Duration::from_millis(10), make("fired"));
    let cancelled = clock.schedule_after(Duration::from_millis(20), make("cancelled"));

    // Act
    clock.advance(Duration::from_millis(10))?;
    clock.cancel(fired);
    clock.cancel(fired);
    clock.cancel(cancelled);
    clock.cancel(cancelled);
    clock.advance(Duration::from_millis(100))?;

    // Assert
    assert_eq!(*log.borrow(), vec!["fired"]);
    assert_eq!(clock.active_timers(), 0);
    Ok(())
}

#[test]
fn test_callback_can_cancel_sibling() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let (log, make) = recorder();
    let sibling = clock.schedule_after(Duration::from_millis(200), make("sibling"));
    let inner = clock.clone();
    clock.schedule_after(
        Duration::from_millis(100),
        Box::new(move || inner.cancel(sibling)),
    );

    // Act
    let fired = clock.advance(Duration::from_millis(500))?;

    // Assert
    assert_eq!(fired, 1);
    assert!(log.borrow().is_empty());
    Ok(())
}

#[test]
fn test_advance_to_moves_to_absolute_instant() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let (log, make) = recorder();
    let handle = clock.schedule_after(Duration::from_millis(400), make("due"));

    // Act
    clock.advance_to(handle.deadline())?;

    // Assert
    assert_eq!(*log.borrow(), vec!["due"]);
    assert_eq!(clock.elapsed(), Duration::from_millis(400));
    Ok(())
}

#[test]
fn test_run_all_drains_chained_timers() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let (log, make) = recorder();
    let inner = clock.clone();
    let last = make("last");
    clock.schedule_after(
        Duration::from_secs(5),
        Box::new(move || {
            inner.schedule_after(Duration::from_secs(5), last);
        }),
    );

    // Act
    let fired = clock.run_all()?;

    // Assert
    assert_eq!(fired, 2);
    assert_eq!(*log.borrow(), vec!["last"]);
    assert_eq!(clock.elapsed(), Duration::from_secs(10));
    Ok(())
}

#[test]
fn test_clones_share_time_and_queue() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let other = clock.clone();
    let (log, make) = recorder();
    other.schedule_after(Duration::from_millis(30), make("shared"));

    // Act
    clock.advance(Duration::from_millis(30))?;

    // Assert
    assert_eq!(other.elapsed(), Duration::from_millis(30));
    assert_eq!(*log.borrow(), vec!["shared"]);
    Ok(())
}

#[test]
fn test_zero_delay_fires_on_zero_advance() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let (log, make) = recorder();
    clock.schedule_after(Duration::ZERO, make("immediate"));

    // Act & Assert
    assert!(log.borrow().is_empty());
    assert_eq!(clock.advance(Duration::ZERO)?, 1);
    assert_eq!(*log.borrow(), vec!["immediate"]);
    Ok(())
}
