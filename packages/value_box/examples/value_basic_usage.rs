//! Example demonstrating basic usage of `ValueBox` value semantics.
//!
//! Shows deep copying, the empty state and checked access.

use value_box::{Error, ValueBox};

fn main() {
    println!("=== ValueBox: Deep-copying Owning Pointer ===");

    // An engaged box owns one heap value.
    let original = ValueBox::new(('a', 7));
    println!("Original: {:?}", *original);

    // Cloning copies the pointee; the copy is fully independent.
    let mut copy = original.clone();
    copy.1 = 8;
    println!("Original after mutating the copy: {:?}", *original);
    println!("Copy: {:?}", *copy);
    println!(
        "Distinct allocations: {}",
        original.as_ptr() != copy.as_ptr()
    );

    // Boxes may be empty; access is checked or panicking, caller's choice.
    let mut slot = ValueBox::<String>::empty();
    match slot.value() {
        Ok(value) => println!("Unexpected value: {value}"),
        Err(Error::NoValue) => println!("Slot is empty, as expected"),
        Err(other) => println!("Unexpected error: {other}"),
    }

    slot.set("occupied".to_string());
    println!("Slot now holds: {}", *slot);

    // Hand the allocation back out as a raw pointer.
    let raw = slot.release();
    // SAFETY: `release` hands out an exclusively owned `Box` allocation.
    let reclaimed = unsafe { Box::from_raw(raw) };
    println!("Reclaimed from raw pointer: {reclaimed}");
}
