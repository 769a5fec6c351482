//! Observable property cells.
//!
//! A [`Property<T>`] is a shared mutable cell used where a value is owned in
//! one place and read or written from several (for example a typed value that
//! a text field binds to). Change detection is by equality: `set` reports
//! whether the stored value actually changed.

use parking_lot::RwLock;

/// A shared mutable value cell.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T> Property<T> {
    /// Create a property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.read().clone()
    }

    /// Run a closure with a reference to the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.read())
    }

    /// Store a new value without change detection.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }

    /// Store a new value. Returns true if the stored value changed.
    pub fn set(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        let mut guard = self.value.write();
        if *guard == value {
            false
        } else {
            *guard = value;
            true
        }
    }

    /// Store a new value, returning the previous one if it differed.
    pub fn replace(&self, value: T) -> Option<T>
    where
        T: PartialEq,
    {
        let mut guard = self.value.write();
        if *guard == value {
            None
        } else {
            Some(std::mem::replace(&mut *guard, value))
        }
    }
}

impl<T: Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Property").field(&*self.value.read()).finish()
    }
}
