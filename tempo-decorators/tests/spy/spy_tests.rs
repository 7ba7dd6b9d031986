// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::rc::Rc;
use tempo_decorators::{spy, Call, Spy};
use tempo_test_utils::person::{person_alice, Person};

#[test]
fn test_spy_records_calls_in_order() {
    // Arrange
    let work = spy(|(), (a, b): (i32, i32)| a + b);

    // Act
    let first = work.call((), (1, 2));
    let second = work.call((), (4, 5));

    // Assert
    assert_eq!(first, 3);
    assert_eq!(second, 9);
    assert_eq!(work.calls(), vec![(1, 2), (4, 5)]);
    assert_eq!(work.call_count(), 2);
    assert_eq!(work.last_call(), Some((4, 5)));
}

#[test]
fn test_spy_forwards_receiver_and_return_value() {
    // Arrange
    let name_of = spy(|this: Rc<Person>, suffix: &str| format!("{}{suffix}", this.name));
    let alice = person_alice();

    // Act
    let result = name_of.apply(Call::new(alice.clone(), "!"));

    // Assert
    assert_eq!(result, "Alice!");
    assert!(name_of.called_once_with(&"!"));
}

#[test]
fn test_spy_clones_share_log() {
    // Arrange
    let original = Spy::silent();
    let copy = original.clone();
    let mut target = original.as_target();

    // Act
    copy.call((), 'x');
    target((), 'y');

    // Assert
    assert_eq!(original.calls(), vec!['x', 'y']);
    assert!(original.was_called_with(&'y'));
    assert!(!original.was_called_with(&'z'));
}

#[test]
fn test_spy_called_once_with_requires_single_call() {
    // Arrange
    let f = Spy::silent();

    // Act & Assert
    assert!(!f.was_called());
    assert!(!f.called_once_with(&"a"));

    f.call((), "a");
    assert!(f.called_once_with(&"a"));

    f.call((), "a");
    assert!(!f.called_once_with(&"a"));
    assert_eq!(f.last_call(), Some("a"));
}
