/// Strategy for releasing a pointee owned by a [`ValueBox`](crate::ValueBox).
///
/// A box stores one deleter instance and invokes it exactly once per owned
/// pointee: when the box is dropped, reset, or has its content replaced.
/// [`release`](crate::ValueBox::release) hands the pointer out instead and
/// does not invoke the deleter.
///
/// The box itself never passes a null pointer, but implementations must
/// treat null as a no-op anyway, matching the defensive contract deleters
/// conventionally follow.
///
/// Besides pointers produced by the paired [`Cloner`](crate::Cloner), a
/// deleter used with [`ValueBox`](crate::ValueBox) must accept pointers the
/// box allocates directly via [`Box`] (from
/// [`new`](crate::ValueBox::new), [`set`](crate::ValueBox::set) and
/// [`emplace`](crate::ValueBox::emplace)).
///
/// # Examples
///
/// A deleter that counts how often it runs:
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use value_box::{Deleter, ValueBox};
///
/// #[derive(Clone, Debug)]
/// struct CountingDeleter {
///     destroyed: Rc<Cell<usize>>,
/// }
///
/// impl<T> Deleter<T> for CountingDeleter {
///     unsafe fn destroy(&self, ptr: *mut T) {
///         if ptr.is_null() {
///             return;
///         }
///         self.destroyed.set(self.destroyed.get() + 1);
///         // SAFETY: The caller guarantees `ptr` is an exclusively owned
///         // `Box`-compatible allocation.
///         drop(unsafe { Box::from_raw(ptr) });
///     }
/// }
///
/// let destroyed = Rc::new(Cell::new(0));
/// let boxed = ValueBox::<u32>::builder()
///     .deleter(CountingDeleter {
///         destroyed: Rc::clone(&destroyed),
///     })
///     .build_with(42);
///
/// drop(boxed);
/// assert_eq!(destroyed.get(), 1);
/// ```
pub trait Deleter<T> {
    /// Fully releases the pointee `ptr` refers to, exactly once.
    ///
    /// Must be a no-op when `ptr` is null.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `ptr` is either null or an exclusively
    /// owned pointer compatible with this deleter (produced by the paired
    /// cloner, by the box's own heap allocation, or adopted under the same
    /// contract), and that the pointee is never used again after this call.
    unsafe fn destroy(&self, ptr: *mut T);
}

/// The default release strategy: reconstitute the [`Box`] and drop it.
///
/// Stateless; pairs with [`DefaultCloner`](crate::DefaultCloner) and with the
/// box's own heap allocations. A null pointer is a no-op.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[allow(
    clippy::exhaustive_structs,
    reason = "Unit policy type with no state; callers construct it directly"
)]
pub struct DefaultDeleter;

impl<T> Deleter<T> for DefaultDeleter {
    unsafe fn destroy(&self, ptr: *mut T) {
        if ptr.is_null() {
            return;
        }

        // SAFETY: The caller guarantees `ptr` is an exclusively owned
        // `Box`-compatible allocation that is not used again.
        drop(unsafe { Box::from_raw(ptr) });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::fmt::Debug;
    use std::rc::Rc;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(DefaultDeleter: Clone, Copy, Debug, Default, Send, Sync);

    /// Test helper that tracks whether it has been dropped.
    struct DropTracker {
        dropped: Rc<Cell<bool>>,
    }

    impl Drop for DropTracker {
        fn drop(&mut self) {
            self.dropped.set(true);
        }
    }

    #[test]
    fn destroy_drops_the_pointee() {
        let dropped = Rc::new(Cell::new(false));
        let ptr = Box::into_raw(Box::new(DropTracker {
            dropped: Rc::clone(&dropped),
        }));

        assert!(!dropped.get());

        // SAFETY: `ptr` is the exclusively owned `Box` allocation above.
        unsafe { DefaultDeleter.destroy(ptr) };

        assert!(dropped.get());
    }

    #[test]
    fn destroy_ignores_null() {
        // SAFETY: Null is explicitly a no-op for the deleter contract.
        unsafe { DefaultDeleter.destroy(std::ptr::null_mut::<String>()) };
    }
}
