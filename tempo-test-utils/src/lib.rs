// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the Tempo decorator library.
//!
//! This crate provides fixtures and helpers for testing timing decorators. It
//! is designed for use in development and testing only, not for production
//! code.
//!
//! # Key Types
//!
//! ## `SharedLog`
//!
//! An append-only string log shared between a test and the function under
//! test, the Rust counterpart of `let log = ""; f = a => log += a`:
//!
//! ```rust
//! use tempo_test_utils::SharedLog;
//!
//! let log = SharedLog::new();
//! let mut f = log.appender::<u32>();
//!
//! f((), 1);
//! f((), 3);
//! assert_eq!(log, "13");
//! ```
//!
//! ## Test Fixtures
//!
//! - `Person` - a receiver with a name, used to check that decorators forward
//!   the receiver they were called on
//!
//! # Module Organization
//!
//! - `log` - `SharedLog`
//! - `person` - receiver fixtures
//! - `helpers` - virtual clock and paused tokio clock helpers

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod log;
pub mod person;

pub use helpers::{call_after, ms};
pub use log::SharedLog;
pub use person::Person;
