//! # Reducer Store
//!
//! Single-owner container shared by the cart and wishlist states.
//!
//! ## Thread Safety
//! The value is wrapped in `Arc<Mutex<T>>`:
//! 1. Several commands may read or dispatch at once
//! 2. A transition runs to completion under the lock
//! 3. Callers receive an owned snapshot, never a guard
//!
//! A poisoned lock is recovered rather than propagated. Reducers are pure
//! and never leave the value half-updated, so the inner value is still
//! consistent after a panic elsewhere.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shopit_core::Reducer;

#[derive(Debug)]
pub struct Store<R> {
    value: Arc<Mutex<R>>,
}

impl<R: Reducer> Store<R> {
    pub fn new(initial: R) -> Self {
        Store {
            value: Arc::new(Mutex::new(initial)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, R> {
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes a function with read access to the current value.
    pub fn with<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&R) -> T,
    {
        let value = self.lock();
        f(&value)
    }

    /// Applies `action` and returns the resulting snapshot.
    pub fn dispatch(&self, action: &R::Action) -> R {
        let mut value = self.lock();
        let next = value.apply(action);
        *value = next.clone();
        next
    }

    pub fn snapshot(&self) -> R {
        self.lock().clone()
    }
}

impl<R> Clone for Store<R> {
    fn clone(&self) -> Self {
        Store {
            value: Arc::clone(&self.value),
        }
    }
}

impl<R: Reducer + Default> Default for Store<R> {
    fn default() -> Self {
        Store::new(R::default())
    }
}
