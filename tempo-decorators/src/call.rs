// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::cell::RefCell;

/// One reconstructed invocation: the receiver the call was made on and its
/// ordered argument list.
///
/// Decorators store a `Call` while it waits for its timer and hand both parts
/// back to the wrapped function unchanged, so whatever identity the receiver
/// carries (an `Rc`, a reference, a handle) is preserved.
///
/// ```rust
/// use tempo_decorators::Call;
///
/// let call = Call::new("user", ("Hello", "John"));
/// let (receiver, (phrase, who)) = call.into_parts();
/// assert_eq!((receiver, phrase, who), ("user", "Hello", "John"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Call<C, A> {
    pub receiver: C,
    pub args: A,
}

impl<C, A> Call<C, A> {
    pub const fn new(receiver: C, args: A) -> Self {
        Self { receiver, args }
    }

    pub fn into_parts(self) -> (C, A) {
        (self.receiver, self.args)
    }
}

/// A wrapped function whose return value is discarded.
pub(crate) type Target<C, A> = RefCell<Box<dyn FnMut(C, A)>>;

pub(crate) fn erase<C, A, R, F>(mut func: F) -> Target<C, A>
where
    F: FnMut(C, A) -> R + 'static,
    C: 'static,
    A: 'static,
    R: 'static,
{
    RefCell::new(Box::new(move |receiver: C, args: A| {
        func(receiver, args);
    }))
}

// The borrow only guards the target itself; wrappers never hold their own
// state borrowed across this call, so the target may call back into them.
pub(crate) fn invoke<C, A>(target: &Target<C, A>, call: Call<C, A>) {
    let mut func = target.borrow_mut();
    (*func)(call.receiver, call.args);
}
