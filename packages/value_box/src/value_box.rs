use std::any;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};

use crate::error::{Error, Result};
use crate::{Cloner, DefaultCloner, DefaultDeleter, Deleter, ValueBoxBuilder};

/// An owning heap pointer with value semantics.
///
/// `ValueBox<T>` owns at most one heap-allocated `T` and behaves like a
/// value: [`clone`](Clone::clone) deep-copies the pointee,
/// [`clone_from`](Clone::clone_from) replaces content, and dropping the box
/// releases the owned object. A box that owns nothing is *empty*; an empty
/// box stores no pointer and can be created for any `T`, including types
/// without [`Default`] or [`Clone`].
///
/// Unlike [`Box<T>`], the duplicate and release steps are pluggable: the box
/// carries a [`Cloner`] and a [`Deleter`] policy instance, substituted with
/// stateless defaults ([`DefaultCloner`], [`DefaultDeleter`]) unless the
/// caller supplies its own via [`builder()`](Self::builder). Copies of a box
/// inherit its policy instances, state included.
///
/// # Key properties
///
/// - **Deep copy**: cloning an engaged box produces a new allocation holding
///   an equal value; the two boxes never alias.
/// - **Sole ownership**: exactly one heap resource per engaged box; no
///   reference counting, no weak references.
/// - **Strong replacement safety**: every content-replacing operation
///   ([`clone_from`](Clone::clone_from), [`set`](Self::set),
///   [`emplace`](Self::emplace)) fully constructs the new pointee before
///   releasing the old one, so a panicking clone or constructor leaves the
///   box unchanged.
/// - **Two-tier failure model**: dereferencing an empty box is a contract
///   violation and panics; the [`value`](Self::value) accessor family
///   reports the empty case as [`Error::NoValue`] instead.
///
/// # Examples
///
/// ```
/// use value_box::ValueBox;
///
/// let a = ValueBox::new(('a', 7));
/// let mut b = a.clone();
///
/// // Deep copy: the two boxes hold equal values at distinct addresses.
/// assert_eq!(*a, *b);
/// assert_ne!(a.as_ptr(), b.as_ptr());
///
/// // Mutating one leaves the other untouched.
/// b.1 = 8;
/// assert_eq!(a.1, 7);
/// assert_eq!(b.1, 8);
/// ```
///
/// An empty box holds nothing and reports access attempts:
///
/// ```
/// use value_box::{Error, ValueBox};
///
/// let empty = ValueBox::<String>::empty();
/// assert!(!empty.has_value());
/// assert_eq!(empty.value(), Err(Error::NoValue));
/// assert_eq!(empty.value_or("fallback".to_string()), "fallback");
/// ```
///
/// # Comparison semantics
///
/// By default boxes compare by contained value, with an empty box ordered
/// before every engaged box. Enabling the `compare-pointers` cargo feature
/// switches the relational operators to raw-address comparison; hashing
/// stays value-based in both modes.
///
/// # Thread safety
///
/// The box adds no synchronization of its own. Like [`Box<T>`], it is
/// [`Send`]/[`Sync`] exactly when the pointee and both policies are, and
/// distinct boxes are fully independent.
pub struct ValueBox<T, C = DefaultCloner, D = DefaultDeleter>
where
    D: Deleter<T>,
{
    ptr: Option<NonNull<T>>,
    cloner: C,
    deleter: D,

    // Owns a T, like Box<T> does; informs drop-check and auto traits.
    _owned: PhantomData<T>,
}

impl<T> ValueBox<T> {
    /// Creates an empty box using the default policies.
    ///
    /// Works for any `T`: an empty box stores nothing, so no bounds on the
    /// pointee are required.
    ///
    /// # Examples
    ///
    /// ```
    /// use value_box::ValueBox;
    ///
    /// struct NoDefaultNoClone(#[allow(dead_code)] String);
    ///
    /// let empty = ValueBox::<NoDefaultNoClone>::empty();
    /// assert!(!empty.has_value());
    /// ```
    #[must_use]
    #[inline]
    pub fn empty() -> Self {
        Self::from_parts(None, DefaultCloner, DefaultDeleter)
    }

    /// Creates an engaged box by moving `value` into a fresh heap
    /// allocation.
    ///
    /// To copy a value in instead, clone it at the call site:
    /// `ValueBox::new(value.clone())`.
    ///
    /// # Examples
    ///
    /// ```
    /// use value_box::ValueBox;
    ///
    /// let boxed = ValueBox::new(7);
    /// assert!(boxed.has_value());
    /// assert_eq!(*boxed, 7);
    /// ```
    #[must_use]
    #[inline]
    pub fn new(value: T) -> Self {
        Self::from_parts(
            Some(NonNull::from(Box::leak(Box::new(value)))),
            DefaultCloner,
            DefaultDeleter,
        )
    }

    /// Creates an engaged box whose pointee is produced by `make`.
    ///
    /// This is the in-place construction form: the closure's result
    /// initializes the new allocation directly, with no pointee temporary
    /// observable by the caller. Capture by move or by reference selects
    /// move- or copy-forwarding of the closed-over state.
    ///
    /// # Examples
    ///
    /// ```
    /// use value_box::ValueBox;
    ///
    /// let text = "payload".to_string();
    /// let boxed = ValueBox::new_with(|| (vec![7, 8, 9], 'a', text));
    /// assert_eq!(boxed.0, [7, 8, 9]);
    /// assert_eq!(boxed.2, "payload");
    /// ```
    #[must_use]
    #[inline]
    pub fn new_with<F>(make: F) -> Self
    where
        F: FnOnce() -> T,
    {
        Self::new(make())
    }

    /// Creates a box that adopts `ptr` directly, without cloning.
    ///
    /// A null `ptr` yields an empty box. Neither policy is invoked by the
    /// adoption itself; the deleter will release the pointee when the box
    /// gives it up.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `ptr` is either null or:
    ///
    /// 1. An exclusively owned pointer to a valid `T`; no other entity may
    ///    keep using it.
    /// 2. A `Box`-compatible heap allocation, because the default deleter
    ///    releases via [`Box::from_raw`].
    ///
    /// # Examples
    ///
    /// ```
    /// use value_box::ValueBox;
    ///
    /// let raw = Box::into_raw(Box::new(7));
    ///
    /// // SAFETY: `raw` is an exclusively owned `Box` allocation.
    /// let boxed = unsafe { ValueBox::from_raw(raw) };
    /// assert_eq!(*boxed, 7);
    /// ```
    #[must_use]
    #[inline]
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        Self::from_parts(NonNull::new(ptr), DefaultCloner, DefaultDeleter)
    }

    /// Starts building a box with custom policies.
    ///
    /// The builder begins with the default policies; replace either with
    /// [`cloner()`](ValueBoxBuilder::cloner) /
    /// [`deleter()`](ValueBoxBuilder::deleter), then finish with one of the
    /// `build_*` methods.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ptr::NonNull;
    ///
    /// use value_box::{Cloner, ValueBox};
    ///
    /// #[derive(Clone, Debug)]
    /// struct DoublingCloner;
    ///
    /// // SAFETY: Returns a fresh exclusive `Box` allocation.
    /// unsafe impl Cloner<u32> for DoublingCloner {
    ///     fn clone_value(&self, value: &u32) -> NonNull<u32> {
    ///         NonNull::from(Box::leak(Box::new(value * 2)))
    ///     }
    /// }
    ///
    /// let boxed = ValueBox::<u32>::builder()
    ///     .cloner(DoublingCloner)
    ///     .build_with(21);
    /// assert_eq!(*boxed, 42);
    /// ```
    #[must_use]
    #[inline]
    pub fn builder() -> ValueBoxBuilder<T> {
        ValueBoxBuilder::new()
    }

    /// Consumes the box and returns the owned value, or [`None`] if empty.
    ///
    /// Only available with the default policies: their allocations are
    /// always `Box`-compatible, so the value can be moved out of the heap.
    ///
    /// # Examples
    ///
    /// ```
    /// use value_box::ValueBox;
    ///
    /// let boxed = ValueBox::new("mine".to_string());
    /// assert_eq!(boxed.into_inner(), Some("mine".to_string()));
    ///
    /// assert_eq!(ValueBox::<String>::empty().into_inner(), None);
    /// ```
    #[must_use]
    #[inline]
    pub fn into_inner(mut self) -> Option<T> {
        self.ptr.take().map(|ptr| {
            // SAFETY: Engaged default-policy boxes only ever own
            // `Box`-compatible allocations (`from_raw` requires the same),
            // and taking the pointer makes this box's drop a no-op.
            let boxed = unsafe { Box::from_raw(ptr.as_ptr()) };
            *boxed
        })
    }
}

impl<T, C, D> ValueBox<T, C, D>
where
    D: Deleter<T>,
{
    /// Assembles a box from an optional owned pointer and policy instances.
    pub(crate) fn from_parts(ptr: Option<NonNull<T>>, cloner: C, deleter: D) -> Self {
        Self {
            ptr,
            cloner,
            deleter,
            _owned: PhantomData,
        }
    }

    /// Whether the box currently owns a value.
    #[must_use]
    #[inline]
    pub fn has_value(&self) -> bool {
        self.ptr.is_some()
    }

    /// Returns a pointer to the owned value, or null if the box is empty.
    ///
    /// The box retains ownership; the pointer is valid for reads as long as
    /// the box stays engaged and unmoved-from.
    #[must_use]
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr
            .map_or(ptr::null(), |ptr| ptr.as_ptr().cast_const())
    }

    /// Returns a mutable pointer to the owned value, or null if the box is
    /// empty.
    ///
    /// The box retains ownership.
    #[must_use]
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    /// Borrows the owned value, or returns [`Error::NoValue`] if the box is
    /// empty.
    ///
    /// This is the recoverable counterpart to the dereference operator,
    /// which panics on an empty box.
    ///
    /// # Examples
    ///
    /// ```
    /// use value_box::{Error, ValueBox};
    ///
    /// let engaged = ValueBox::new(42);
    /// assert_eq!(engaged.value(), Ok(&42));
    ///
    /// let empty = ValueBox::<i32>::empty();
    /// assert_eq!(empty.value(), Err(Error::NoValue));
    /// ```
    #[inline]
    pub fn value(&self) -> Result<&T> {
        self.as_value().ok_or(Error::NoValue)
    }

    /// Mutably borrows the owned value, or returns [`Error::NoValue`] if the
    /// box is empty.
    #[inline]
    pub fn value_mut(&mut self) -> Result<&mut T> {
        match self.ptr {
            Some(mut ptr) => {
                // SAFETY: The engaged pointer is valid and exclusively
                // owned; the borrow is tied to `&mut self`.
                Ok(unsafe { ptr.as_mut() })
            }
            None => Err(Error::NoValue),
        }
    }

    /// Returns a clone of the owned value, or `default` if the box is empty.
    ///
    /// `default` is moved in, so no copy of it is made on the empty path.
    ///
    /// # Examples
    ///
    /// ```
    /// use value_box::ValueBox;
    ///
    /// assert_eq!(ValueBox::new(42).value_or(7), 42);
    /// assert_eq!(ValueBox::<i32>::empty().value_or(7), 7);
    /// ```
    #[must_use]
    #[inline]
    pub fn value_or(&self, default: T) -> T
    where
        T: Clone,
    {
        self.as_value().map_or(default, T::clone)
    }

    /// Returns a clone of the owned value, or the result of `make` if the
    /// box is empty.
    ///
    /// Use this when constructing the default is expensive enough to defer.
    #[must_use]
    #[inline]
    pub fn value_or_else<F>(&self, make: F) -> T
    where
        T: Clone,
        F: FnOnce() -> T,
    {
        self.as_value().map_or_else(make, T::clone)
    }

    /// Returns a reference to the stored cloner instance.
    ///
    /// Lets callers observe policy-held state, e.g. counters.
    #[must_use]
    #[inline]
    pub fn cloner(&self) -> &C {
        &self.cloner
    }

    /// Returns a mutable reference to the stored cloner instance.
    #[must_use]
    #[inline]
    pub fn cloner_mut(&mut self) -> &mut C {
        &mut self.cloner
    }

    /// Returns a reference to the stored deleter instance.
    #[must_use]
    #[inline]
    pub fn deleter(&self) -> &D {
        &self.deleter
    }

    /// Returns a mutable reference to the stored deleter instance.
    #[must_use]
    #[inline]
    pub fn deleter_mut(&mut self) -> &mut D {
        &mut self.deleter
    }

    /// Replaces the content with `value`, releasing any previous pointee.
    ///
    /// The new pointee is allocated before the old one is released, so a
    /// panic during allocation leaves the box unchanged. Returns a mutable
    /// borrow of the installed value.
    ///
    /// # Examples
    ///
    /// ```
    /// use value_box::ValueBox;
    ///
    /// let mut boxed = ValueBox::new(7);
    /// boxed.set(42);
    /// assert_eq!(*boxed, 42);
    /// ```
    #[inline]
    pub fn set(&mut self, value: T) -> &mut T {
        self.install(NonNull::from(Box::leak(Box::new(value))))
    }

    /// Replaces the content with a pointee produced by `make`, releasing any
    /// previous pointee.
    ///
    /// The in-place counterpart to [`set`](Self::set): the closure's result
    /// initializes the new allocation directly. The old pointee is released
    /// only after `make` and the allocation succeed, so a panicking closure
    /// leaves the box unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use value_box::ValueBox;
    ///
    /// let mut boxed = ValueBox::<(Vec<i32>, char)>::empty();
    /// boxed.emplace(|| (vec![7, 8, 9], 'a'));
    /// assert_eq!(boxed.0, [7, 8, 9]);
    /// ```
    #[inline]
    pub fn emplace<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.install(NonNull::from(Box::leak(Box::new(make()))))
    }

    /// Releases any owned pointee via the deleter and leaves the box empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use value_box::ValueBox;
    ///
    /// let mut boxed = ValueBox::new(7);
    /// boxed.reset();
    /// assert!(!boxed.has_value());
    /// ```
    #[inline]
    pub fn reset(&mut self) {
        self.destroy_current();
    }

    /// Releases any owned pointee via the deleter, then adopts `ptr`
    /// directly, without cloning.
    ///
    /// A null `ptr` leaves the box empty.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `ptr` is either null or an exclusively
    /// owned pointer to a valid `T`, allocated such that the stored deleter
    /// can release it, and distinct from the pointer currently owned by
    /// this box.
    #[inline]
    pub unsafe fn reset_raw(&mut self, ptr: *mut T) {
        self.destroy_current();
        self.ptr = NonNull::new(ptr);
    }

    /// Disengages the box and returns the owned pointer without invoking
    /// the deleter.
    ///
    /// Returns null if the box was empty. Ownership transfers to the
    /// caller, who becomes responsible for eventually releasing the pointee.
    ///
    /// # Examples
    ///
    /// ```
    /// use value_box::ValueBox;
    ///
    /// let mut boxed = ValueBox::new(7);
    /// let raw = boxed.release();
    /// assert!(!boxed.has_value());
    ///
    /// // SAFETY: `release` hands out an exclusively owned `Box` allocation.
    /// let value = unsafe { Box::from_raw(raw) };
    /// assert_eq!(*value, 7);
    /// ```
    #[must_use = "the returned pointer owns the value; dropping it unreleased leaks the allocation"]
    #[inline]
    pub fn release(&mut self) -> *mut T {
        self.ptr.take().map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    /// Exchanges contents and policy state with `other`.
    ///
    /// Invokes neither the cloner nor the deleter; both boxes remain
    /// independently valid. Equivalent to [`std::mem::swap`].
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Borrows the owned value if the box is engaged.
    pub(crate) fn as_value(&self) -> Option<&T> {
        // SAFETY: An engaged pointer is valid and exclusively owned; the
        // borrow is tied to `&self`.
        self.ptr.map(|ptr| unsafe { ptr.as_ref() })
    }

    /// Installs a freshly allocated pointee, releasing the previous one.
    ///
    /// The new allocation must already exist when this runs, preserving the
    /// construct-before-release ordering.
    fn install(&mut self, mut ptr: NonNull<T>) -> &mut T {
        self.destroy_current();
        self.ptr = Some(ptr);

        // SAFETY: `ptr` was just installed; it is valid, exclusively owned,
        // and the borrow is tied to `&mut self`.
        unsafe { ptr.as_mut() }
    }

    /// Releases the current pointee, if any, leaving the box empty.
    fn destroy_current(&mut self) {
        if let Some(old) = self.ptr.take() {
            // SAFETY: `old` was exclusively owned by this box, came from the
            // paired cloner, the box's own heap allocation, or adoption
            // under the same contract, and is never used again.
            unsafe { self.deleter.destroy(old.as_ptr()) };
        }
    }
}

impl<T, C, D> Drop for ValueBox<T, C, D>
where
    D: Deleter<T>,
{
    fn drop(&mut self) {
        self.destroy_current();
    }
}

impl<T, C, D> Default for ValueBox<T, C, D>
where
    C: Default,
    D: Deleter<T> + Default,
{
    /// Creates an empty box with default-constructed policy instances.
    fn default() -> Self {
        Self::from_parts(None, C::default(), D::default())
    }
}

impl<T> From<T> for ValueBox<T> {
    /// Moves `value` into a new engaged box, like [`ValueBox::new`].
    #[inline]
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T, C, D> Clone for ValueBox<T, C, D>
where
    C: Cloner<T> + Clone,
    D: Deleter<T> + Clone,
{
    /// Deep-copies the box.
    ///
    /// An empty box clones to an empty box. An engaged box clones by
    /// invoking the stored cloner on the pointee; the clone receives copies
    /// of both policy instances and its own, distinct allocation.
    fn clone(&self) -> Self {
        let ptr = self.ptr.map(|ptr| {
            // SAFETY: The engaged pointer is valid per the ownership
            // invariant.
            let value = unsafe { ptr.as_ref() };
            self.cloner.clone_value(value)
        });

        Self::from_parts(ptr, self.cloner.clone(), self.deleter.clone())
    }

    /// Replaces this box's content with a deep copy of `source`.
    ///
    /// The replacement pointee is produced by `source`'s cloner before the
    /// old pointee is released, so a panicking clone leaves this box
    /// unchanged. Both policy instances are adopted from `source`.
    fn clone_from(&mut self, source: &Self) {
        let new_ptr = source.ptr.map(|ptr| {
            // SAFETY: The engaged pointer is valid per the ownership
            // invariant.
            let value = unsafe { ptr.as_ref() };
            source.cloner.clone_value(value)
        });

        // The old pointee pairs with the old deleter, so it is released
        // before the policy instances are overwritten.
        self.destroy_current();
        self.ptr = new_ptr;
        self.cloner.clone_from(&source.cloner);
        self.deleter.clone_from(&source.deleter);
    }
}

impl<T, C, D> Deref for ValueBox<T, C, D>
where
    D: Deleter<T>,
{
    type Target = T;

    /// Dereferences to the owned value.
    ///
    /// # Panics
    ///
    /// Panics if the box is empty. Use [`value()`](ValueBox::value) for a
    /// recoverable check.
    #[inline]
    fn deref(&self) -> &T {
        let ptr = self.ptr.expect("cannot dereference an empty ValueBox");

        // SAFETY: The engaged pointer is valid and exclusively owned; the
        // borrow is tied to `&self`.
        unsafe { ptr.as_ref() }
    }
}

impl<T, C, D> DerefMut for ValueBox<T, C, D>
where
    D: Deleter<T>,
{
    /// Mutably dereferences to the owned value.
    ///
    /// # Panics
    ///
    /// Panics if the box is empty. Use [`value_mut()`](ValueBox::value_mut)
    /// for a recoverable check.
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        let mut ptr = self.ptr.expect("cannot dereference an empty ValueBox");

        // SAFETY: The engaged pointer is valid and exclusively owned; the
        // borrow is tied to `&mut self`.
        unsafe { ptr.as_mut() }
    }
}

impl<T, C, D> fmt::Debug for ValueBox<T, C, D>
where
    D: Deleter<T>,
{
    #[cfg_attr(test, mutants::skip)] // Diagnostic output only; no test pins its exact shape.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueBox")
            .field("type_name", &any::type_name::<T>())
            .field("ptr", &self.ptr)
            .field("cloner", &any::type_name_of_val(&self.cloner))
            .field("deleter", &any::type_name_of_val(&self.deleter))
            .finish()
    }
}

// SAFETY: The box exclusively owns its pointee and policy instances, so
// sending the box sends them; thread-safety is exactly that of the owned
// parts, as with Box<T>.
unsafe impl<T, C, D> Send for ValueBox<T, C, D>
where
    T: Send,
    C: Send,
    D: Deleter<T> + Send,
{
}

// SAFETY: Shared access to the box only hands out shared references to the
// pointee and policies, so sharing the box shares them.
unsafe impl<T, C, D> Sync for ValueBox<T, C, D>
where
    T: Sync,
    C: Sync,
    D: Deleter<T> + Sync,
{
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

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;

    assert_impl_all!(ValueBox<String>: Send, Sync, Clone, Debug, Default);
    assert_not_impl_any!(ValueBox<Rc<u8>>: Send, Sync);

    /// Test helper that counts its drops through a shared counter.
    #[derive(Clone)]
    struct DropCounter {
        drops: Rc<Cell<usize>>,
    }

    impl DropCounter {
        fn new() -> (Self, Rc<Cell<usize>>) {
            let drops = Rc::new(Cell::new(0));
            (
                Self {
                    drops: Rc::clone(&drops),
                },
                drops,
            )
        }
    }

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    #[test]
    fn empty_box_has_no_value() {
        let boxed = ValueBox::<i32>::empty();

        assert!(!boxed.has_value());
        assert!(boxed.as_ptr().is_null());
    }

    #[test]
    fn default_box_has_no_value() {
        let boxed = ValueBox::<i32>::default();

        assert!(!boxed.has_value());
    }

    #[test]
    fn empty_works_without_default_or_clone() {
        struct NoDefaultNoClone(#[allow(dead_code, reason = "only the type matters")] String);

        let boxed = ValueBox::<NoDefaultNoClone>::empty();

        assert!(!boxed.has_value());
    }

    #[test]
    fn new_box_holds_the_value() {
        let boxed = ValueBox::new(7);

        assert!(boxed.has_value());
        assert_eq!(*boxed, 7);
    }

    #[test]
    fn from_value_matches_new() {
        let boxed: ValueBox<i32> = 7.into();

        assert_eq!(*boxed, 7);
    }

    #[test]
    fn new_with_constructs_in_place() {
        let text = "payload".to_string();
        let boxed = ValueBox::new_with(|| (text, 7));

        assert_eq!(boxed.0, "payload");
        assert_eq!(boxed.1, 7);
    }

    #[test]
    fn from_raw_adopts_pointer() {
        let raw = Box::into_raw(Box::new(7));

        let boxed = unsafe { ValueBox::from_raw(raw) };

        assert_eq!(*boxed, 7);
        assert_eq!(boxed.as_ptr(), raw.cast_const());
    }

    #[test]
    fn from_raw_null_is_empty() {
        let boxed = unsafe { ValueBox::<i32>::from_raw(std::ptr::null_mut()) };

        assert!(!boxed.has_value());
    }

    #[test]
    fn clone_is_deep() {
        let a = ValueBox::new(7);

        let b = a.clone();

        assert_eq!(*a, *b);
        assert_ne!(a.as_ptr(), b.as_ptr());
    }

    #[test]
    fn clone_of_empty_is_empty() {
        let a = ValueBox::<i32>::empty();

        let b = a.clone();

        assert!(!b.has_value());
    }

    #[test]
    fn clone_leaves_source_untouched() {
        let a = ValueBox::new("original".to_string());

        let _b = a.clone();

        assert_eq!(*a, "original");
    }

    #[test]
    fn clone_from_engaged_source_replaces_content() {
        let mut target = ValueBox::new(123);
        let source = ValueBox::new(987);

        target.clone_from(&source);

        assert_eq!(*target, 987);
        assert_ne!(target.as_ptr(), source.as_ptr());
    }

    #[test]
    fn clone_from_empty_source_disengages() {
        let mut target = ValueBox::new(123);
        let source = ValueBox::<i32>::empty();

        target.clone_from(&source);

        assert!(!target.has_value());
    }

    #[test]
    fn clone_from_releases_previous_pointee_exactly_once() {
        let (counter, drops) = DropCounter::new();
        let mut target = ValueBox::new(counter);
        let (other, _other_drops) = DropCounter::new();
        let source = ValueBox::new(other);

        target.clone_from(&source);

        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn drop_releases_pointee_exactly_once() {
        let (counter, drops) = DropCounter::new();
        let boxed = ValueBox::new(counter);

        drop(boxed);

        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn move_transfers_ownership_without_dropping() {
        let (counter, drops) = DropCounter::new();
        let a = ValueBox::new(counter);

        let b = a;

        assert_eq!(drops.get(), 0);
        drop(b);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn value_accessors_on_engaged_box() {
        let mut boxed = ValueBox::new(42);

        assert_eq!(boxed.value(), Ok(&42));

        *boxed.value_mut().unwrap() = 7;
        assert_eq!(boxed.value(), Ok(&7));
    }

    #[test]
    fn value_accessors_on_empty_box() {
        let mut boxed = ValueBox::<i32>::empty();

        assert_eq!(boxed.value(), Err(Error::NoValue));
        assert_eq!(boxed.value_mut(), Err(Error::NoValue));
    }

    #[test]
    fn value_or_returns_held_value() {
        let boxed = ValueBox::new(42);

        assert_eq!(boxed.value_or(7), 42);
    }

    #[test]
    fn value_or_returns_default_when_empty() {
        let boxed = ValueBox::<i32>::empty();

        assert_eq!(boxed.value_or(7), 7);
    }

    #[test]
    fn value_or_else_defers_default_construction() {
        let boxed = ValueBox::new(42);

        let result = boxed.value_or_else(|| unreachable!("engaged box must not build a default"));

        assert_eq!(result, 42);
        assert_eq!(ValueBox::<i32>::empty().value_or_else(|| 7), 7);
    }

    #[test]
    fn deref_mut_updates_the_pointee() {
        let mut boxed = ValueBox::new(42);

        *boxed = 7;

        assert_eq!(*boxed, 7);
    }

    #[test]
    fn deref_reaches_members() {
        struct Inner {
            x: i32,
        }

        let mut boxed = ValueBox::new(Inner { x: 42 });

        assert_eq!(boxed.x, 42);
        boxed.x = 7;
        assert_eq!(boxed.x, 7);
    }

    #[test]
    #[should_panic(expected = "empty ValueBox")]
    fn deref_of_empty_box_panics() {
        let boxed = ValueBox::<i32>::empty();

        let _value = *boxed;
    }

    #[test]
    #[should_panic(expected = "empty ValueBox")]
    fn deref_mut_of_empty_box_panics() {
        let mut boxed = ValueBox::<i32>::empty();

        *boxed = 7;
    }

    #[test]
    fn set_replaces_content() {
        let (counter, drops) = DropCounter::new();
        let mut boxed = ValueBox::new(counter);
        let (next, _next_drops) = DropCounter::new();

        boxed.set(next);

        assert_eq!(drops.get(), 1);
        assert!(boxed.has_value());
    }

    #[test]
    fn set_engages_an_empty_box() {
        let mut boxed = ValueBox::<i32>::empty();

        boxed.set(7);

        assert_eq!(*boxed, 7);
    }

    #[test]
    fn emplace_replaces_content_in_place() {
        let mut boxed = ValueBox::<(char, i32)>::empty();

        boxed.emplace(|| ('a', 7));

        assert_eq!(*boxed, ('a', 7));

        boxed.emplace(|| ('b', 8));
        assert_eq!(*boxed, ('b', 8));
    }

    #[test]
    fn reset_disengages_and_drops() {
        let (counter, drops) = DropCounter::new();
        let mut boxed = ValueBox::new(counter);

        boxed.reset();

        assert!(!boxed.has_value());
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn reset_of_empty_box_is_a_no_op() {
        let mut boxed = ValueBox::<i32>::empty();

        boxed.reset();

        assert!(!boxed.has_value());
    }

    #[test]
    fn reset_raw_adopts_replacement() {
        let mut boxed = ValueBox::new(7);
        let raw = Box::into_raw(Box::new(42));

        unsafe { boxed.reset_raw(raw) };

        assert_eq!(*boxed, 42);
    }

    #[test]
    fn reset_raw_null_disengages() {
        let (counter, drops) = DropCounter::new();
        let mut boxed = ValueBox::new(counter);

        unsafe { boxed.reset_raw(std::ptr::null_mut()) };

        assert!(!boxed.has_value());
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn release_hands_out_the_value_undestroyed() {
        let (counter, drops) = DropCounter::new();
        let mut boxed = ValueBox::new(counter);

        let raw = boxed.release();

        assert!(!boxed.has_value());
        assert_eq!(drops.get(), 0);

        drop(unsafe { Box::from_raw(raw) });
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn release_of_empty_box_returns_null() {
        let mut boxed = ValueBox::<i32>::empty();

        assert!(boxed.release().is_null());
    }

    #[test]
    fn swap_exchanges_engaged_and_empty() {
        let mut engaged = ValueBox::new(42);
        let mut empty = ValueBox::<i32>::empty();
        let engaged_ptr = engaged.as_ptr();

        engaged.swap(&mut empty);

        assert!(!engaged.has_value());
        assert!(empty.has_value());
        assert_eq!(*empty, 42);
        assert_eq!(empty.as_ptr(), engaged_ptr);
    }

    #[test]
    fn swap_exchanges_two_engaged_boxes_without_reallocating() {
        let mut a = ValueBox::new(42);
        let mut b = ValueBox::new(7);
        let a_ptr = a.as_ptr();
        let b_ptr = b.as_ptr();

        a.swap(&mut b);

        assert_eq!(*a, 7);
        assert_eq!(*b, 42);
        assert_eq!(a.as_ptr(), b_ptr);
        assert_eq!(b.as_ptr(), a_ptr);
    }

    #[test]
    fn mem_swap_works_as_the_free_function_form() {
        let mut a = ValueBox::new(1);
        let mut b = ValueBox::new(2);

        std::mem::swap(&mut a, &mut b);

        assert_eq!(*a, 2);
        assert_eq!(*b, 1);
    }

    #[test]
    fn into_inner_returns_the_owned_value() {
        let boxed = ValueBox::new("mine".to_string());

        assert_eq!(boxed.into_inner(), Some("mine".to_string()));
    }

    #[test]
    fn into_inner_of_empty_box_is_none() {
        assert_eq!(ValueBox::<String>::empty().into_inner(), None);
    }

    #[test]
    fn into_inner_does_not_double_drop() {
        let (counter, drops) = DropCounter::new();
        let boxed = ValueBox::new(counter);

        let value = boxed.into_inner();

        assert_eq!(drops.get(), 0);
        drop(value);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn pair_mutation_scenario() {
        let boxed = ValueBox::new(('a', 7));
        let mut copy = boxed.clone();

        copy.1 = 8;

        assert_eq!(boxed.1, 7);
        assert_eq!(copy.1, 8);
    }
}
