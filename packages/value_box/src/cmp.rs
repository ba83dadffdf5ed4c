//! Relational operators and hashing for [`ValueBox`].
//!
//! The default semantics compare by contained value: an empty box compares
//! less than every engaged box and equal only to another empty box, and
//! mixed comparisons against a bare value delegate to the pointee's own
//! operators. Enabling the `compare-pointers` cargo feature switches the
//! relational operators to raw-address comparison (mixed value comparisons
//! are then unavailable, since a bare value has no address to compare).
//!
//! Hashing is value-based in both modes: an empty box hashes like a null
//! pointer, an engaged box hashes its pointee, so equal values hash equal.
//! Equal boxes hash equal in both modes (under pointer comparison, equal
//! means same pointee).

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ptr;

use crate::{Deleter, ValueBox};

#[cfg(not(feature = "compare-pointers"))]
impl<T, C, D> PartialEq for ValueBox<T, C, D>
where
    T: PartialEq,
    D: Deleter<T>,
{
    fn eq(&self, other: &Self) -> bool {
        match (self.as_value(), other.as_value()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => true,
            _ => false,
        }
    }
}

#[cfg(not(feature = "compare-pointers"))]
impl<T, C, D> Eq for ValueBox<T, C, D>
where
    T: Eq,
    D: Deleter<T>,
{
}

#[cfg(not(feature = "compare-pointers"))]
impl<T, C, D> PartialOrd for ValueBox<T, C, D>
where
    T: PartialOrd,
    D: Deleter<T>,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.as_value(), other.as_value()) {
            (Some(a), Some(b)) => a.partial_cmp(b),
            (None, None) => Some(Ordering::Equal),
            (None, Some(_)) => Some(Ordering::Less),
            (Some(_), None) => Some(Ordering::Greater),
        }
    }
}

#[cfg(not(feature = "compare-pointers"))]
impl<T, C, D> Ord for ValueBox<T, C, D>
where
    T: Ord,
    D: Deleter<T>,
{
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_value(), other.as_value()) {
            (Some(a), Some(b)) => a.cmp(b),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
        }
    }
}

/// Compares a box against a bare value; an empty box is unequal to every
/// value. Only the box-on-the-left order is expressible for a generic
/// pointee under Rust's coherence rules.
#[cfg(not(feature = "compare-pointers"))]
impl<T, C, D> PartialEq<T> for ValueBox<T, C, D>
where
    T: PartialEq,
    D: Deleter<T>,
{
    fn eq(&self, other: &T) -> bool {
        self.as_value() == Some(other)
    }
}

/// Orders a box against a bare value; an empty box orders before every
/// value.
#[cfg(not(feature = "compare-pointers"))]
impl<T, C, D> PartialOrd<T> for ValueBox<T, C, D>
where
    T: PartialOrd,
    D: Deleter<T>,
{
    fn partial_cmp(&self, other: &T) -> Option<Ordering> {
        match self.as_value() {
            Some(value) => value.partial_cmp(other),
            None => Some(Ordering::Less),
        }
    }
}

#[cfg(feature = "compare-pointers")]
impl<T, C, D> PartialEq for ValueBox<T, C, D>
where
    D: Deleter<T>,
{
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.as_ptr(), other.as_ptr())
    }
}

#[cfg(feature = "compare-pointers")]
impl<T, C, D> Eq for ValueBox<T, C, D> where D: Deleter<T> {}

#[cfg(feature = "compare-pointers")]
impl<T, C, D> PartialOrd for ValueBox<T, C, D>
where
    D: Deleter<T>,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(feature = "compare-pointers")]
impl<T, C, D> Ord for ValueBox<T, C, D>
where
    D: Deleter<T>,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_ptr().cmp(&other.as_ptr())
    }
}

impl<T, C, D> Hash for ValueBox<T, C, D>
where
    T: Hash,
    D: Deleter<T>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.as_value() {
            Some(value) => value.hash(state),
            // Fixed sentinel: every empty box hashes like a null pointer.
            None => ptr::null::<T>().hash(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::hash::{DefaultHasher, Hash, Hasher};

    use crate::ValueBox;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[cfg(not(feature = "compare-pointers"))]
    mod value_comparisons {
        use super::hash_of;
        use crate::ValueBox;

        #[test]
        fn engaged_boxes_compare_by_value() {
            let e1 = ValueBox::new(1);
            let e1_again = ValueBox::new(1);
            let e2 = ValueBox::new(2);

            assert_eq!(e1, e1_again);
            assert_ne!(e1, e2);
            assert!(e1 < e2);
            assert!(e1 <= e1_again);
            assert!(e1 >= e1_again);
            assert!(e2 > e1);
        }

        #[test]
        fn empty_boxes_are_equal_to_each_other() {
            let d1 = ValueBox::<i32>::empty();
            let d2 = ValueBox::<i32>::empty();

            assert_eq!(d1, d2);
            assert!(d1 <= d2);
            assert!(d1 >= d2);
            assert!(!(d1 < d2));
        }

        #[test]
        fn empty_orders_before_engaged() {
            let empty = ValueBox::<i32>::empty();
            let engaged = ValueBox::new(i32::MIN);

            assert_ne!(empty, engaged);
            assert!(empty < engaged);
            assert!(engaged > empty);
        }

        #[test]
        fn engaged_box_compares_against_bare_value() {
            let e1 = ValueBox::new(1);

            assert_eq!(e1, 1);
            assert_ne!(e1, 2);
            assert!(e1 < 2);
            assert!(e1 <= 1);
            assert!(e1 >= 1);
            assert!(ValueBox::new(2) > 1);
        }

        #[test]
        fn empty_box_orders_before_bare_value() {
            let empty = ValueBox::<i32>::empty();

            assert_ne!(empty, i32::MIN);
            assert!(empty < i32::MIN);
        }

        #[test]
        fn sorting_puts_empty_boxes_first() {
            let mut boxes = vec![
                ValueBox::new(2),
                ValueBox::<i32>::empty(),
                ValueBox::new(1),
            ];

            boxes.sort();

            assert!(!boxes[0].has_value());
            assert_eq!(*boxes[1], 1);
            assert_eq!(*boxes[2], 2);
        }

        #[test]
        fn equal_values_hash_equal() {
            let a = ValueBox::new(7);
            let b = ValueBox::new(7);

            assert_ne!(a.as_ptr(), b.as_ptr());
            assert_eq!(hash_of(&a), hash_of(&b));
        }

        #[test]
        fn distinct_values_hash_like_the_values_themselves() {
            let a = ValueBox::new(7);
            let b = ValueBox::new(8);

            assert_eq!(hash_of(&a), hash_of(&7));
            assert_eq!(hash_of(&b), hash_of(&8));
        }
    }

    #[cfg(feature = "compare-pointers")]
    mod pointer_comparisons {
        use super::hash_of;
        use crate::ValueBox;

        #[test]
        fn a_box_equals_only_itself() {
            let e1 = ValueBox::new(1);
            let e1_twin = ValueBox::new(1);
            let alias = &e1;

            assert!(e1 == *alias);
            assert_ne!(e1, e1_twin);
        }

        #[test]
        fn ordering_follows_addresses() {
            let e1 = ValueBox::new(1);
            let e2 = ValueBox::new(2);

            let by_op = e1 < e2;
            let by_addr = e1.as_ptr() < e2.as_ptr();
            assert_eq!(by_op, by_addr);
        }

        #[test]
        fn empty_boxes_share_the_null_address() {
            let d1 = ValueBox::<i32>::empty();
            let d2 = ValueBox::<i32>::empty();

            assert_eq!(d1, d2);
            assert!(d1 < ValueBox::new(1));
        }

        #[test]
        fn hashing_stays_value_based() {
            let a = ValueBox::new(7);
            let b = ValueBox::new(7);

            assert_eq!(hash_of(&a), hash_of(&b));
        }
    }

    #[test]
    fn empty_box_hash_is_a_fixed_sentinel() {
        let first = hash_of(&ValueBox::<String>::empty());
        let second = hash_of(&ValueBox::<String>::empty());

        assert_eq!(first, second);
        assert_eq!(first, hash_of(&std::ptr::null::<String>()));
    }
}
