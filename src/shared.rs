//! Interrupt-safe ownership of a context object.
//!
//! Interrupt handlers cannot take arguments, so whatever they act on has to
//! live in a `static`. [`SharedController`] is that static slot: it starts
//! empty, is filled once during boot, and hands out `&mut` access inside a
//! critical section. On multi-core parts or with nested interrupt
//! priorities this is what keeps a button press and a tick from
//! interleaving.

use core::cell::RefCell;
use critical_section::Mutex;

/// A lazily installed value guarded by a critical section.
pub struct SharedController<C> {
    inner: Mutex<RefCell<Option<C>>>,
}

impl<C> SharedController<C> {
    /// Creates an empty slot. Usable in a `static` initializer.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Stores `value`, returning the previous one if the slot was filled.
    pub fn install(&self, value: C) -> Option<C> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(value))
    }

    /// Removes and returns the stored value.
    pub fn take(&self) -> Option<C> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    /// Returns true once a value has been installed.
    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }

    /// Runs `f` with exclusive access to the stored value.
    ///
    /// Returns `None` without calling `f` if nothing is installed yet, e.g.
    /// an interrupt firing before boot finished.
    pub fn with<R>(&self, f: impl FnOnce(&mut C) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }
}

impl<C> Default for SharedController<C> {
    fn default() -> Self {
        Self::new()
    }
}
