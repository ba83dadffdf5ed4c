use std::ptr::NonNull;

/// Strategy for producing a new, independently owned copy of a pointee.
///
/// A [`ValueBox`](crate::ValueBox) stores one cloner instance and invokes it
/// whenever the box itself is cloned. Copies of a box inherit the cloner
/// instance (including any state it carries), so they keep cloning the same
/// way the original did.
///
/// The cloner only ever *produces* allocations; releasing them is the job of
/// the paired [`Deleter`](crate::Deleter).
///
/// # Safety
///
/// Implementations must guarantee that every pointer returned by
/// [`clone_value`](Self::clone_value):
///
/// 1. Points to a valid, fully initialized `T` holding a value equivalent
///    to the input.
/// 2. Is exclusively owned by the caller; the cloner retains no copy of it.
/// 3. Can be released by the [`Deleter`](crate::Deleter) it is paired with
///    in the same box.
///
/// Returning a dangling, aliased, or incompatible pointer makes the safe
/// API of [`ValueBox`](crate::ValueBox) unsound.
///
/// # Examples
///
/// A cloner that counts how often it runs:
///
/// ```
/// use std::cell::Cell;
/// use std::ptr::NonNull;
/// use std::rc::Rc;
///
/// use value_box::{Cloner, ValueBox};
///
/// #[derive(Clone, Debug)]
/// struct CountingCloner {
///     clones: Rc<Cell<usize>>,
/// }
///
/// // SAFETY: The returned pointer is a fresh exclusive `Box` allocation,
/// // which the default deleter knows how to release.
/// unsafe impl<T: Clone> Cloner<T> for CountingCloner {
///     fn clone_value(&self, value: &T) -> NonNull<T> {
///         self.clones.set(self.clones.get() + 1);
///         NonNull::from(Box::leak(Box::new(value.clone())))
///     }
/// }
///
/// let clones = Rc::new(Cell::new(0));
/// let original = ValueBox::<u32>::builder()
///     .cloner(CountingCloner {
///         clones: Rc::clone(&clones),
///     })
///     .build_with(42);
/// assert_eq!(clones.get(), 1);
///
/// let copy = original.clone();
/// assert_eq!(*copy, 42);
/// assert_eq!(clones.get(), 2);
/// ```
pub unsafe trait Cloner<T> {
    /// Allocates and returns a new pointee equivalent to `value`.
    ///
    /// The caller becomes the exclusive owner of the returned pointer and
    /// will eventually release it through the paired deleter.
    fn clone_value(&self, value: &T) -> NonNull<T>;
}

/// The default cloning strategy: copy-construct the pointee on the heap.
///
/// Clones the value via its [`Clone`] implementation into a fresh [`Box`]
/// allocation. Stateless; pairs with [`DefaultDeleter`](crate::DefaultDeleter).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[allow(
    clippy::exhaustive_structs,
    reason = "Unit policy type with no state; callers construct it directly"
)]
pub struct DefaultCloner;

// SAFETY: The returned pointer is a fresh `Box` allocation holding a clone of
// the input, exclusively owned by the caller and releasable via
// `Box::from_raw` as the default deleter does.
unsafe impl<T: Clone> Cloner<T> for DefaultCloner {
    fn clone_value(&self, value: &T) -> NonNull<T> {
        NonNull::from(Box::leak(Box::new(value.clone())))
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(DefaultCloner: Clone, Copy, Debug, Default, Send, Sync);

    #[test]
    fn clone_value_produces_equal_value_at_distinct_address() {
        let value = "hello".to_string();

        let ptr = DefaultCloner.clone_value(&value);

        // SAFETY: `clone_value` returned a valid exclusive pointer.
        let cloned = unsafe { ptr.as_ref() };
        assert_eq!(cloned, "hello");
        assert!(!std::ptr::eq(cloned, &value));

        // SAFETY: The pointer is a `Box` allocation we exclusively own.
        drop(unsafe { Box::from_raw(ptr.as_ptr()) });
    }

    #[test]
    fn clone_value_copies_do_not_alias_each_other() {
        let value = 7_u32;

        let first = DefaultCloner.clone_value(&value);
        let second = DefaultCloner.clone_value(&value);

        assert_ne!(first.as_ptr(), second.as_ptr());

        // SAFETY: Both pointers are `Box` allocations we exclusively own.
        drop(unsafe { Box::from_raw(first.as_ptr()) });
        // SAFETY: See above.
        drop(unsafe { Box::from_raw(second.as_ptr()) });
    }
}
