// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Call-recording wrapper.
//!
//! A spy forwards every call to the wrapped function unchanged, returning its
//! result, and appends the call's arguments to an ordered log. It is the
//! observation tool used throughout the decorator tests: hand
//! [`Spy::as_target`] to a decorator and keep the spy to inspect what reached
//! the wrapped function.

use crate::call::Call;
use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

/// Wraps `func` in a [`Spy`].
///
/// ```rust
/// use tempo_decorators::spy;
///
/// let double = spy(|_: (), x: i32| x * 2);
///
/// assert_eq!(double.call((), 4), 8);
/// assert_eq!(double.call((), 5), 10);
/// assert_eq!(double.calls(), vec![4, 5]);
/// ```
pub fn spy<C, A, R, F>(func: F) -> Spy<C, A, R>
where
    F: FnMut(C, A) -> R + 'static,
    A: Clone,
{
    Spy {
        state: Rc::new(SpyState {
            target: RefCell::new(Box::new(func)),
            calls: RefCell::new(Vec::new()),
        }),
    }
}

/// A recording wrapper around a function.
///
/// Clones share the same log.
pub struct Spy<C, A, R> {
    state: Rc<SpyState<C, A, R>>,
}

struct SpyState<C, A, R> {
    target: RefCell<Box<dyn FnMut(C, A) -> R>>,
    calls: RefCell<Vec<A>>,
}

impl<C, A> Spy<C, A, ()>
where
    C: 'static,
    A: Clone + 'static,
{
    /// A spy around a function that does nothing.
    #[must_use]
    pub fn silent() -> Self {
        spy(|_: C, _: A| ())
    }
}

impl<C, A: Clone, R> Spy<C, A, R> {
    /// Records the arguments, then forwards the call and returns its result.
    ///
    /// # Panics
    /// Panics if the wrapped function calls this same spy re-entrantly.
    pub fn call(&self, receiver: C, args: A) -> R {
        self.apply(Call::new(receiver, args))
    }

    pub fn apply(&self, call: Call<C, A>) -> R {
        self.state.calls.borrow_mut().push(call.args.clone());
        let mut func = self.state.target.borrow_mut();
        (*func)(call.receiver, call.args)
    }

    /// Every recorded argument list, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<A> {
        self.state.calls.borrow().clone()
    }

    #[must_use]
    pub fn last_call(&self) -> Option<A> {
        self.state.calls.borrow().last().cloned()
    }
}

impl<C, A, R> Spy<C, A, R> {
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state.calls.borrow().len()
    }

    #[must_use]
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    #[must_use]
    pub fn was_called_with(&self, args: &A) -> bool
    where
        A: PartialEq,
    {
        self.state.calls.borrow().iter().any(|recorded| recorded == args)
    }

    /// True when exactly one call was recorded and it carried `args`.
    #[must_use]
    pub fn called_once_with(&self, args: &A) -> bool
    where
        A: PartialEq,
    {
        matches!(self.state.calls.borrow().as_slice(), [only] if only == args)
    }
}

impl<C, A, R> Spy<C, A, R>
where
    C: 'static,
    A: Clone + 'static,
    R: 'static,
{
    /// A closure forwarding to this spy, for handing to a decorator.
    pub fn as_target(&self) -> impl FnMut(C, A) -> R + 'static {
        let spy = self.clone();
        move |receiver: C, args: A| spy.call(receiver, args)
    }
}

impl<C, A, R> Clone for Spy<C, A, R> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<C, A: fmt::Debug, R> fmt::Debug for Spy<C, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spy")
            .field("calls", &self.state.calls.borrow())
            .finish_non_exhaustive()
    }
}
