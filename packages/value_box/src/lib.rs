//! An owning heap pointer with value semantics and pluggable copy/release
//! strategies.
//!
//! This crate provides [`ValueBox<T>`], a single-owner box that behaves like
//! a value: cloning it deep-copies the pointee, [`clone_from`](Clone::clone_from)
//! replaces content, and dropping it releases the owned object. It fills the
//! gap between [`Box<T>`] (whose clone behavior is fixed) and
//! `Option<Box<T>>` (which has no policy hooks): the box may be *empty*, and
//! both the duplicate step and the release step are strategy objects the box
//! carries with it.
//!
//! # Key features
//!
//! - **Value semantics**: clones are deep and independent; equality,
//!   ordering and hashing follow the contained value by default
//! - **Empty state**: a box can hold nothing, for any pointee type; the
//!   empty box orders before every engaged box and doubles as the null
//!   marker
//! - **Pluggable policies**: a [`Cloner`] produces copies and a [`Deleter`]
//!   releases them; both may carry state, which copies of the box inherit
//! - **Raw-pointer interop**: [`from_raw`](ValueBox::from_raw),
//!   [`release`](ValueBox::release) and [`reset_raw`](ValueBox::reset_raw)
//!   adopt and surrender exclusively owned pointers without cloning
//! - **Strong replacement safety**: content-replacing operations construct
//!   the new pointee before releasing the old one
//! - **Two-tier failure model**: dereferencing an empty box panics, while
//!   the [`value()`](ValueBox::value) accessor family returns
//!   [`Error::NoValue`]
//!
//! # Examples
//!
//! ## Value semantics
//!
//! ```
//! use value_box::ValueBox;
//!
//! let a = ValueBox::new(('a', 7));
//! let mut b = a.clone();
//! b.1 = 8;
//!
//! // The copy is independent of the original.
//! assert_eq!(a.1, 7);
//! assert_eq!(b.1, 8);
//! assert_ne!(a.as_ptr(), b.as_ptr());
//! ```
//!
//! ## Empty boxes and checked access
//!
//! ```
//! use value_box::{Error, ValueBox};
//!
//! let mut slot = ValueBox::<String>::empty();
//! assert_eq!(slot.value(), Err(Error::NoValue));
//!
//! slot.set("occupied".to_string());
//! assert_eq!(slot.value().map(String::as_str), Ok("occupied"));
//!
//! slot.reset();
//! assert_eq!(slot.value_or("vacant".to_string()), "vacant");
//! ```
//!
//! ## Custom policies
//!
//! ```
//! use std::ptr::NonNull;
//!
//! use value_box::{Cloner, ValueBox};
//!
//! /// Clones by copy-construction but tags each copy's generation.
//! #[derive(Clone, Debug)]
//! struct GenerationCloner {
//!     generation: u32,
//! }
//!
//! // SAFETY: Returns a fresh exclusive `Box` allocation, releasable by the
//! // default deleter.
//! unsafe impl Cloner<(u32, String)> for GenerationCloner {
//!     fn clone_value(&self, value: &(u32, String)) -> NonNull<(u32, String)> {
//!         NonNull::from(Box::leak(Box::new((self.generation, value.1.clone()))))
//!     }
//! }
//!
//! let original = ValueBox::<(u32, String)>::builder()
//!     .cloner(GenerationCloner { generation: 1 })
//!     .build_with((0, "payload".to_string()));
//!
//! let copy = original.clone();
//! assert_eq!(copy.0, 1);
//! assert_eq!(copy.1, "payload");
//! ```
//!
//! # Comparison modes
//!
//! Relational operators compare contained values by default. The
//! `compare-pointers` cargo feature switches them to raw-address identity
//! for the whole crate instantiation; hashing stays value-based either way.
//! The exact semantics are documented on [`ValueBox`].
//!
//! # Thread safety
//!
//! The box adds no synchronization. It is [`Send`]/[`Sync`] exactly when
//! the pointee and the policy instances are, like [`Box<T>`]; distinct
//! boxes are fully independent and may be used concurrently.

mod builder;
mod cloner;
mod cmp;
mod deleter;
mod error;
mod value_box;

pub use builder::ValueBoxBuilder;
pub use cloner::{Cloner, DefaultCloner};
pub use deleter::{DefaultDeleter, Deleter};
pub use error::Error;
pub use value_box::ValueBox;
