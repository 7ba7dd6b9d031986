// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::cell::RefCell;
use std::fmt::{self, Display};
use std::rc::Rc;

/// Append-only string log, cheap to clone, shared by every clone.
#[derive(Clone, Debug, Default)]
pub struct SharedLog {
    entries: Rc<RefCell<String>>,
}

impl SharedLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Display) {
        use std::fmt::Write;
        // Writing into a String cannot fail.
        let _ = write!(self.entries.borrow_mut(), "{entry}");
    }

    #[must_use]
    pub fn contents(&self) -> String {
        self.entries.borrow().clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// A function appending its argument to this log, ignoring the receiver.
    pub fn appender<T: Display + 'static>(&self) -> impl FnMut((), T) + 'static {
        let log = self.clone();
        move |(), value: T| log.push(value)
    }
}

impl Display for SharedLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.entries.borrow())
    }
}

impl PartialEq<&str> for SharedLog {
    fn eq(&self, other: &&str) -> bool {
        self.entries.borrow().as_str() == *other
    }
}

impl PartialEq<str> for SharedLog {
    fn eq(&self, other: &str) -> bool {
        self.entries.borrow().as_str() == other
    }
}
