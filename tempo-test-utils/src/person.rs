// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt::{self, Display};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

impl Person {
    #[must_use]
    pub const fn new(name: String, age: u32) -> Self {
        Self { name, age }
    }

    /// The greeting this person says, `"{phrase}, {who}! I am {name}"`.
    #[must_use]
    pub fn greet(&self, phrase: &str, who: &str) -> String {
        format!("{phrase}, {who}! I am {}", self.name)
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Person[name={}, age={}]", self.name, self.age)
    }
}

#[must_use]
pub fn person_alice() -> Rc<Person> {
    Rc::new(Person::new("Alice".to_string(), 25))
}

#[must_use]
pub fn person_bob() -> Rc<Person> {
    Rc::new(Person::new("Bob".to_string(), 30))
}

#[must_use]
pub fn person_john() -> Rc<Person> {
    Rc::new(Person::new("John".to_string(), 42))
}
