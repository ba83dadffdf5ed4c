//! Integration tests for the `value_box` package.
//!
//! These exercise the ownership contract end to end: deep copying, policy
//! invocation counts, release/adopt round-trips and drop accounting.

use std::cell::Cell;
use std::ptr::NonNull;
use std::rc::Rc;

use value_box::{Cloner, Deleter, Error, ValueBox};

/// Shared invocation counters for the spy policies.
#[derive(Debug, Default)]
struct SpyCounts {
    clones: Cell<usize>,
    destructions: Cell<usize>,
}

/// Cloner that copy-constructs on the heap and counts invocations.
#[derive(Clone, Debug)]
struct SpyCloner {
    counts: Rc<SpyCounts>,
}

// SAFETY: Returns a fresh exclusive `Box` allocation, releasable both by
// `SpyDeleter` and by the default deleter.
unsafe impl<T: Clone> Cloner<T> for SpyCloner {
    fn clone_value(&self, value: &T) -> NonNull<T> {
        self.counts.clones.set(self.counts.clones.get() + 1);
        NonNull::from(Box::leak(Box::new(value.clone())))
    }
}

/// Deleter that releases `Box`-compatible allocations and counts invocations.
#[derive(Clone, Debug)]
struct SpyDeleter {
    counts: Rc<SpyCounts>,
}

impl<T> Deleter<T> for SpyDeleter {
    unsafe fn destroy(&self, ptr: *mut T) {
        if ptr.is_null() {
            return;
        }
        self.counts.destructions.set(self.counts.destructions.get() + 1);
        // SAFETY: The caller guarantees `ptr` is an exclusively owned
        // `Box`-compatible allocation.
        drop(unsafe { Box::from_raw(ptr) });
    }
}

fn spy_box(value: u32) -> (ValueBox<u32, SpyCloner, SpyDeleter>, Rc<SpyCounts>) {
    let counts = Rc::new(SpyCounts::default());
    let boxed = ValueBox::<u32>::builder()
        .cloner(SpyCloner {
            counts: Rc::clone(&counts),
        })
        .deleter(SpyDeleter {
            counts: Rc::clone(&counts),
        })
        .build_with(value);

    // Constructing from a value goes through the cloner once; each test
    // counts from a clean slate.
    counts.clones.set(0);
    (boxed, counts)
}

#[test]
fn factory_and_direct_construction_agree() {
    let from_new = ValueBox::new(7);
    let from_conversion: ValueBox<i32> = 7.into();
    let from_closure = ValueBox::new_with(|| 7);

    assert_eq!(*from_new, 7);
    assert_eq!(*from_conversion, 7);
    assert_eq!(*from_closure, 7);
    assert!(!ValueBox::<i32>::empty().has_value());
}

#[test]
fn deep_copy_is_equal_but_never_aliases() {
    let a = ValueBox::new("payload".to_string());

    let b = a.clone();

    assert_eq!(*a, *b);
    assert_ne!(a.as_ptr(), b.as_ptr());
}

#[test]
fn copying_invokes_the_custom_cloner_exactly_once() {
    let (a, counts) = spy_box(42);

    let b = a.clone();

    assert_eq!(*b, 42);
    assert_eq!(counts.clones.get(), 1);
    assert_eq!(counts.destructions.get(), 0);
}

#[test]
fn moving_invokes_no_policy() {
    let (a, counts) = spy_box(42);

    let b = a;

    assert_eq!(*b, 42);
    assert_eq!(counts.clones.get(), 0);
    assert_eq!(counts.destructions.get(), 0);
}

#[test]
fn dropping_invokes_the_custom_deleter_exactly_once() {
    let (a, counts) = spy_box(42);

    drop(a);

    assert_eq!(counts.destructions.get(), 1);
}

#[test]
fn reset_invokes_the_custom_deleter_exactly_once() {
    let (mut a, counts) = spy_box(42);

    a.reset();

    assert!(!a.has_value());
    assert_eq!(counts.destructions.get(), 1);

    // Resetting an already-empty box does not release anything further.
    a.reset();
    assert_eq!(counts.destructions.get(), 1);
}

#[test]
fn raw_adoption_invokes_neither_policy() {
    let counts = Rc::new(SpyCounts::default());
    let raw = Box::into_raw(Box::new(42_u32));

    // SAFETY: `raw` is an exclusively owned `Box` allocation, which
    // `SpyDeleter` releases via `Box::from_raw`.
    let adopted = unsafe {
        ValueBox::<u32>::builder()
            .cloner(SpyCloner {
                counts: Rc::clone(&counts),
            })
            .deleter(SpyDeleter {
                counts: Rc::clone(&counts),
            })
            .build_from_raw(raw)
    };

    assert_eq!(*adopted, 42);
    assert_eq!(counts.clones.get(), 0);
    assert_eq!(counts.destructions.get(), 0);

    drop(adopted);
    assert_eq!(counts.destructions.get(), 1);
}

#[test]
fn clone_from_adopts_the_source_policy_state() {
    let (source, source_counts) = spy_box(987);
    let mut target = ValueBox::<u32>::builder()
        .cloner(SpyCloner {
            counts: Rc::new(SpyCounts::default()),
        })
        .deleter(SpyDeleter {
            counts: Rc::new(SpyCounts::default()),
        })
        .build_with(123);

    target.clone_from(&source);

    assert_eq!(*target, 987);
    // The replacement pointee came from the source's cloner.
    assert_eq!(source_counts.clones.get(), 1);
    // The target now shares the source's counters; dropping both boxes
    // releases both pointees through the adopted deleter state.
    drop(target);
    drop(source);
    assert_eq!(source_counts.destructions.get(), 2);
}

#[test]
fn release_transfers_ownership_to_the_caller() {
    let (mut a, counts) = spy_box(7);

    let raw = a.release();

    assert!(!a.has_value());
    assert_eq!(counts.destructions.get(), 0);
    assert!(!raw.is_null());

    // SAFETY: `release` hands out the exclusively owned `Box` allocation.
    let value = unsafe { Box::from_raw(raw) };
    assert_eq!(*value, 7);
}

#[test]
fn swap_exchanges_contents_and_policy_state() {
    let (mut engaged, engaged_counts) = spy_box(42);
    let empty_counts = Rc::new(SpyCounts::default());
    let mut empty = ValueBox::<u32>::builder()
        .cloner(SpyCloner {
            counts: Rc::clone(&empty_counts),
        })
        .deleter(SpyDeleter {
            counts: Rc::clone(&empty_counts),
        })
        .build_empty();

    engaged.swap(&mut empty);

    assert!(!engaged.has_value());
    assert!(empty.has_value());
    assert_eq!(*empty, 42);

    // No policy ran during the swap.
    assert_eq!(engaged_counts.clones.get(), 0);
    assert_eq!(engaged_counts.destructions.get(), 0);

    // The pointee travelled together with its deleter.
    drop(empty);
    assert_eq!(engaged_counts.destructions.get(), 1);
    assert_eq!(empty_counts.destructions.get(), 0);
}

#[test]
fn checked_access_reports_the_empty_box() {
    let mut slot = ValueBox::<u32>::empty();

    assert_eq!(slot.value(), Err(Error::NoValue));
    assert_eq!(slot.value_mut(), Err(Error::NoValue));
    assert_eq!(slot.value_or(7), 7);

    slot.set(42);
    assert_eq!(slot.value(), Ok(&42));
    assert_eq!(slot.value_or(7), 42);
}

#[test]
fn emplace_replaces_without_an_observable_temporary() {
    let mut slot = ValueBox::<(Vec<i32>, char, String)>::empty();

    slot.emplace(|| (vec![7, 8, 9], 'a', "s".to_string()));
    assert_eq!(slot.0, [7, 8, 9]);
    assert_eq!(slot.1, 'a');

    slot.emplace(|| (vec![1], 'b', "t".to_string()));
    assert_eq!(slot.0, [1]);
    assert_eq!(slot.1, 'b');
}

#[test]
fn independent_copies_do_not_observe_each_other() {
    let original = ValueBox::new(('a', 7));
    let mut copy = original.clone();

    copy.1 = 8;

    assert_eq!(original.1, 7);
    assert_eq!(copy.1, 8);
}

#[cfg(not(feature = "compare-pointers"))]
#[test]
fn boxes_work_as_hash_map_keys() {
    use std::collections::HashMap;

    let mut scores = HashMap::new();
    scores.insert(ValueBox::new("a".to_string()), 1);
    scores.insert(ValueBox::new("b".to_string()), 2);

    // A freshly built box with an equal value finds the same entry.
    assert_eq!(scores.get(&ValueBox::new("a".to_string())), Some(&1));
    assert_eq!(scores.len(), 2);
}
