// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Literal-or-producer item fields.
//!
//! Every menu item field can be given as a fixed value or as a zero-argument
//! producer that is evaluated when the item is rendered. [`Value::resolve`] is
//! the single place a producer runs; it never caches, so each render pass sees
//! current state.
//!
//! ```
//! use understory_menu::value::Value;
//!
//! let fixed: Value<String> = "Copy".into();
//! assert_eq!(fixed.resolve(), "Copy");
//!
//! let lazy = Value::producer(|| 2 + 2);
//! assert_eq!(lazy.resolve(), 4);
//! ```

use alloc::rc::Rc;
use alloc::string::String;

/// A field value that is either known up front or produced on demand.
pub enum Value<T> {
    /// A concrete value.
    Literal(T),
    /// A producer invoked once per resolution.
    Producer(Rc<dyn Fn() -> T>),
}

impl<T> Value<T> {
    /// Wrap a closure as a producer.
    pub fn producer(f: impl Fn() -> T + 'static) -> Self {
        Self::Producer(Rc::new(f))
    }

    /// Returns `true` if this value is computed at render time.
    pub fn is_producer(&self) -> bool {
        matches!(self, Self::Producer(_))
    }
}

impl<T: Clone> Value<T> {
    /// Return the concrete value, invoking the producer (if any) exactly once.
    pub fn resolve(&self) -> T {
        match self {
            Self::Literal(v) => v.clone(),
            Self::Producer(f) => f(),
        }
    }
}

impl<T: Clone> Clone for Value<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(v) => Self::Literal(v.clone()),
            Self::Producer(f) => Self::Producer(Rc::clone(f)),
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

impl<T: Default> Default for Value<T> {
    fn default() -> Self {
        Self::Literal(T::default())
    }
}

impl<T> From<T> for Value<T> {
    fn from(value: T) -> Self {
        Self::Literal(value)
    }
}

impl From<&str> for Value<String> {
    fn from(value: &str) -> Self {
        Self::Literal(String::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn literal_resolves_to_itself() {
        let v: Value<bool> = true.into();
        assert!(v.resolve());
        assert!(!v.is_producer());
    }

    // Each resolve runs the producer once; nothing is cached between calls.
    #[test]
    fn producer_runs_once_per_resolve() {
        let calls = Rc::new(Cell::new(0_u32));
        let c = Rc::clone(&calls);
        let v = Value::producer(move || {
            c.set(c.get() + 1);
            c.get()
        });
        assert_eq!(v.resolve(), 1);
        assert_eq!(calls.get(), 1);
        assert_eq!(v.resolve(), 2);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn clone_shares_producer() {
        let calls = Rc::new(Cell::new(0_u32));
        let c = Rc::clone(&calls);
        let v: Value<String> = Value::producer(move || {
            c.set(c.get() + 1);
            String::from("x")
        });
        let w = v.clone();
        let _ = v.resolve();
        let _ = w.resolve();
        assert_eq!(calls.get(), 2);
    }
}
