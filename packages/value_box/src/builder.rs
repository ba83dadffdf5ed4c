use std::any;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::{Cloner, DefaultCloner, DefaultDeleter, Deleter, ValueBox};

/// Builder for creating a [`ValueBox`] with custom policy instances.
///
/// Obtained from [`ValueBox::builder()`]. Both policies start out as the
/// stateless defaults; [`cloner()`](Self::cloner) and
/// [`deleter()`](Self::deleter) replace them (changing the built box's type
/// parameters accordingly), preserving any state the supplied instances
/// carry. Finish with [`build_empty()`](Self::build_empty),
/// [`build_with()`](Self::build_with) or
/// [`build_from_raw()`](Self::build_from_raw).
///
/// # Examples
///
/// A stateful cloner whose state survives into the built box:
///
/// ```
/// use std::ptr::NonNull;
///
/// use value_box::{Cloner, ValueBox};
///
/// #[derive(Clone, Debug)]
/// struct TaggedCloner {
///     tag: i32,
/// }
///
/// // SAFETY: Returns a fresh exclusive `Box` allocation.
/// unsafe impl<T: Clone> Cloner<T> for TaggedCloner {
///     fn clone_value(&self, value: &T) -> NonNull<T> {
///         NonNull::from(Box::leak(Box::new(value.clone())))
///     }
/// }
///
/// let empty = ValueBox::<u32>::builder()
///     .cloner(TaggedCloner { tag: -1 })
///     .build_empty();
/// assert_eq!(empty.cloner().tag, -1);
///
/// let engaged = ValueBox::<u32>::builder()
///     .cloner(TaggedCloner { tag: 7 })
///     .build_with(42);
/// assert_eq!(*engaged, 42);
/// assert_eq!(engaged.cloner().tag, 7);
/// ```
#[derive(Clone)]
#[must_use]
pub struct ValueBoxBuilder<T, C = DefaultCloner, D = DefaultDeleter> {
    cloner: C,
    deleter: D,

    // The builder holds no T; it only fixes the pointee type of the box.
    _item: PhantomData<fn() -> T>,
}

impl<T> ValueBoxBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            cloner: DefaultCloner,
            deleter: DefaultDeleter,
            _item: PhantomData,
        }
    }
}

impl<T, C, D> ValueBoxBuilder<T, C, D> {
    /// Sets the cloning strategy the built box will carry.
    ///
    /// The instance is stored as given, so stateful cloners keep their
    /// state.
    #[inline]
    pub fn cloner<C2>(self, cloner: C2) -> ValueBoxBuilder<T, C2, D>
    where
        C2: Cloner<T>,
    {
        ValueBoxBuilder {
            cloner,
            deleter: self.deleter,
            _item: PhantomData,
        }
    }

    /// Sets the release strategy the built box will carry.
    #[inline]
    pub fn deleter<D2>(self, deleter: D2) -> ValueBoxBuilder<T, C, D2>
    where
        D2: Deleter<T>,
    {
        ValueBoxBuilder {
            cloner: self.cloner,
            deleter,
            _item: PhantomData,
        }
    }

    /// Builds an empty box carrying the configured policies.
    #[must_use]
    #[inline]
    pub fn build_empty(self) -> ValueBox<T, C, D>
    where
        D: Deleter<T>,
    {
        ValueBox::from_parts(None, self.cloner, self.deleter)
    }

    /// Builds an engaged box whose pointee is produced by the configured
    /// cloner from `value`.
    ///
    /// Construction is routed through the cloner so the allocation pairs
    /// with the configured deleter. `value` itself is dropped once cloned.
    #[must_use]
    #[inline]
    pub fn build_with(self, value: T) -> ValueBox<T, C, D>
    where
        C: Cloner<T>,
        D: Deleter<T>,
    {
        let ptr = self.cloner.clone_value(&value);
        ValueBox::from_parts(Some(ptr), self.cloner, self.deleter)
    }

    /// Builds a box that adopts `ptr` directly, invoking neither policy.
    ///
    /// A null `ptr` yields an empty box.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `ptr` is either null or an exclusively
    /// owned pointer to a valid `T`, allocated such that the configured
    /// deleter can release it.
    #[must_use]
    #[inline]
    pub unsafe fn build_from_raw(self, ptr: *mut T) -> ValueBox<T, C, D>
    where
        D: Deleter<T>,
    {
        ValueBox::from_parts(NonNull::new(ptr), self.cloner, self.deleter)
    }
}

impl<T, C, D> fmt::Debug for ValueBoxBuilder<T, C, D> {
    #[cfg_attr(test, mutants::skip)] // Diagnostic output only; no test pins its exact shape.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueBoxBuilder")
            .field("item_type", &any::type_name::<T>())
            .field("cloner", &any::type_name_of_val(&self.cloner))
            .field("deleter", &any::type_name_of_val(&self.deleter))
            .finish()
    }
}

#[cfg(test)]
#[allow(
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    reason = "tests focus on succinct code and do not need to tick all the boxes"
)]
mod tests {
    use std::cell::Cell;
    use std::fmt::Debug;
    use std::rc::Rc;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(ValueBoxBuilder<String>: Send, Clone, Debug);

    /// Cloner that counts invocations through a shared counter.
    #[derive(Clone, Debug)]
    struct CountingCloner {
        clones: Rc<Cell<usize>>,
    }

    impl CountingCloner {
        fn new() -> (Self, Rc<Cell<usize>>) {
            let clones = Rc::new(Cell::new(0));
            (
                Self {
                    clones: Rc::clone(&clones),
                },
                clones,
            )
        }
    }

    // SAFETY: Returns a fresh exclusive `Box` allocation, releasable by the
    // default deleter.
    unsafe impl<T: Clone> Cloner<T> for CountingCloner {
        fn clone_value(&self, value: &T) -> NonNull<T> {
            self.clones.set(self.clones.get() + 1);
            NonNull::from(Box::leak(Box::new(value.clone())))
        }
    }

    #[test]
    fn build_empty_is_disengaged_and_keeps_policy_state() {
        let (cloner, clones) = CountingCloner::new();

        let boxed = ValueBox::<u32>::builder().cloner(cloner).build_empty();

        assert!(!boxed.has_value());
        assert_eq!(clones.get(), 0);
        assert_eq!(boxed.cloner().clones.get(), 0);
    }

    #[test]
    fn build_with_routes_through_the_cloner() {
        let (cloner, clones) = CountingCloner::new();

        let boxed = ValueBox::<u32>::builder().cloner(cloner).build_with(42);

        assert_eq!(*boxed, 42);
        assert_eq!(clones.get(), 1);
    }

    #[test]
    fn build_with_default_policies_works() {
        let boxed = ValueBox::<u32>::builder().build_with(42);

        assert_eq!(*boxed, 42);
    }

    #[test]
    fn build_from_raw_invokes_no_policy() {
        let (cloner, clones) = CountingCloner::new();
        let raw = Box::into_raw(Box::new(42_u32));

        let boxed = unsafe { ValueBox::<u32>::builder().cloner(cloner).build_from_raw(raw) };

        assert_eq!(*boxed, 42);
        assert_eq!(clones.get(), 0);
    }

    #[test]
    fn build_from_raw_null_is_empty() {
        let boxed = unsafe {
            ValueBox::<u32>::builder().build_from_raw(std::ptr::null_mut())
        };

        assert!(!boxed.has_value());
    }

    #[test]
    fn policy_state_is_mutable_through_the_box() {
        let (cloner, clones) = CountingCloner::new();
        let mut boxed = ValueBox::<u32>::builder().cloner(cloner).build_empty();

        boxed.cloner_mut().clones.set(7);

        assert_eq!(clones.get(), 7);
    }

    #[test]
    fn cloned_box_inherits_the_cloner_instance() {
        let (cloner, clones) = CountingCloner::new();
        let boxed = ValueBox::<u32>::builder().cloner(cloner).build_with(1);
        assert_eq!(clones.get(), 1);

        let copy = boxed.clone();

        // The copy shares the counting state and keeps counting through it.
        assert_eq!(clones.get(), 2);
        let _again = copy.clone();
        assert_eq!(clones.get(), 3);
    }
}
