#![no_std]
// The doc_cfg feature allows an API be documented as only available in some
// specific platforms. As this is only available on nightly, we gate it behind
// this crate's `nightly` feature flag.
//
// https://doc.rust-lang.org/unstable-book/language-features/doc-cfg.html
#![cfg_attr(feature = "nightly", feature(doc_cfg))]

//! Comparable, hashable and printable identities of Rust types.
//!
//! A [`TypeIndex`] identifies a type, and is created through [`type_id`],
//! [`type_id_with_cvr`] or, for the dynamic type of a value,
//! [`type_id_runtime`]. It is a single `Copy` handle into static storage, and
//! creating one never allocates.
//!
//! ```
//! use typeindex::{type_id, type_id_with_cvr};
//!
//! assert_eq!(type_id::<i32>(), type_id::<&mut i32>());
//! assert_ne!(type_id_with_cvr::<i32>(), type_id_with_cvr::<&mut i32>());
//! assert_eq!(type_id::<i32>().to_string(), "i32");
//! ```
//!
//! Two engines implement identities:
//!
//! - [`native::NativeTypeIndex`] builds on [`core::any::TypeId`]. It is
//!   available with the `native_rtti` feature (enabled by default), and
//!   selected as [`TypeIndex`] unless `force_no_native_rtti` is enabled.
//!
//! - [`ctti::CttiTypeIndex`] derives identities from the names the compiler
//!   renders for probe items, without any runtime type facility.
//!
//! Both implement [`TypeIndexFacade`], so code written against [`TypeIndex`]
//! compiles with either. Identities of the two engines cannot be compared with
//! each other. See [`config`] for all build-time options.

#[cfg(any(feature = "std", test))]
extern crate std;

#[macro_use]
mod logging;

// Public modules:
pub mod config;
pub mod ctti;
pub mod facade;
#[cfg(feature = "native_rtti")]
#[cfg_attr(feature = "nightly", doc(cfg(feature = "native_rtti")))]
pub mod native;
pub mod qualifiers;
pub mod runtime_cast;

pub use facade::{RuntimeTypeIndex, TypeIndexFacade};

/// Shared error type.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TIError {
    /// A checked downcast did not find a value of the requested type.
    ///
    /// Both fields hold rendered type names: `from` of the value searched,
    /// `to` of the requested type.
    #[error("bad runtime cast from `{from}` to `{to}`")]
    BadCast {
        from: &'static str,
        to: &'static str,
    },
}

pub type TIResult<T> = Result<T, TIError>;

/// The type identity of this build.
#[cfg(typeindex_native_facade)]
pub type TypeIndex = native::NativeTypeIndex;

/// The type identity of this build.
#[cfg(not(typeindex_native_facade))]
pub type TypeIndex = ctti::CttiTypeIndex;

/// The descriptor wrapped by [`TypeIndex`].
pub type TypeInfo = <TypeIndex as TypeIndexFacade>::TypeInfo;

/// Identity of `T`, with top-level reference layers removed.
///
/// `type_id::<T>()`, `type_id::<&T>()` and `type_id::<&mut T>()` are equal.
pub fn type_id<T: ?Sized + 'static>() -> TypeIndex {
    <TypeIndex as TypeIndexFacade>::type_id::<T>()
}

/// Identity of `T`, including reference layers.
///
/// For a type without reference layers, this equals [`type_id`].
pub fn type_id_with_cvr<T: ?Sized + 'static>() -> TypeIndex {
    <TypeIndex as TypeIndexFacade>::type_id_with_cvr::<T>()
}

/// Identity of the most-derived type of `value`.
///
/// With the RTTI-free engine, the type of `value` must be registered through
/// [`register_ctti_class!`] or [`register_runtime_class!`], or this fails to
/// compile.
pub fn type_id_runtime<V: ?Sized + RuntimeTypeIndex>(value: &V) -> TypeIndex {
    <TypeIndex as TypeIndexFacade>::type_id_runtime(value)
}
