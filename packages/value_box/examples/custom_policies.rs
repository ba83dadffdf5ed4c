//! Example demonstrating custom clone and release strategies.
//!
//! The policies here log their work, making visible exactly when the box
//! duplicates and releases its pointee.

use std::ptr::NonNull;

use value_box::{Cloner, Deleter, ValueBox};

/// Copy-constructs on the heap, announcing each clone.
#[derive(Clone, Debug)]
struct LoggingCloner;

// SAFETY: Returns a fresh exclusive `Box` allocation, releasable by
// `LoggingDeleter` below.
unsafe impl Cloner<String> for LoggingCloner {
    fn clone_value(&self, value: &String) -> NonNull<String> {
        println!("  cloning {value:?}");
        NonNull::from(Box::leak(Box::new(value.clone())))
    }
}

/// Releases `Box`-compatible allocations, announcing each release.
#[derive(Clone, Debug)]
struct LoggingDeleter;

impl Deleter<String> for LoggingDeleter {
    unsafe fn destroy(&self, ptr: *mut String) {
        if ptr.is_null() {
            return;
        }
        // SAFETY: The box guarantees `ptr` is an exclusively owned
        // `Box`-compatible allocation.
        let value = unsafe { Box::from_raw(ptr) };
        println!("  releasing {value:?}");
    }
}

fn main() {
    println!("=== ValueBox: Custom Policies ===");

    println!("Building the original:");
    let original = ValueBox::<String>::builder()
        .cloner(LoggingCloner)
        .deleter(LoggingDeleter)
        .build_with("payload".to_string());

    println!("Cloning the box:");
    let copy = original.clone();
    println!("Copy holds: {}", *copy);

    println!("Dropping both boxes:");
    drop(copy);
    drop(original);

    println!("Done.");
}
