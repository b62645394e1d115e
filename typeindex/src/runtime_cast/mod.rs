// -*- fill-column: 80; -*-

//! Checked downcasts through type identities.
//!
//! This module emulates a `dynamic_cast`: given a reference to a value through
//! some "base" view (a trait object, or a struct embedding other structs),
//! obtain a reference to a specific type contained within it, or learn that
//! there is no such value. It only relies on [`TypeIndex`] and thus works with
//! either engine.
//!
//! Participating types implement [`RuntimeClass`], usually through
//! [`register_runtime_class!`](crate::register_runtime_class). A type's
//! *bases* are fields holding other registered types, either by value or
//! behind a [`Deref`](core::ops::Deref) pointer such as `Box`:
//!
//! ```
//! use typeindex::register_runtime_class;
//! use typeindex::runtime_cast::{runtime_cast, runtime_pointer_cast, RuntimeClass};
//!
//! struct Base {
//!     id: u32,
//! }
//! register_runtime_class!(Base);
//!
//! struct Derived {
//!     base: Base,
//!     label: &'static str,
//! }
//! register_runtime_class!(Derived { base });
//!
//! let derived = Derived { base: Base { id: 7 }, label: "derived" };
//! let erased: &dyn RuntimeClass = &derived;
//!
//! assert_eq!(runtime_pointer_cast::<Base, _>(erased).unwrap().id, 7);
//! assert_eq!(runtime_cast::<Derived, _>(erased).unwrap().label, "derived");
//! assert!(runtime_pointer_cast::<String, _>(erased).is_none());
//! ```
//!
//! Lookups visit a type's own identity first, followed by its bases in
//! declaration order, depth-first. When a type is reachable through several
//! bases, the first match in that order is returned.
//!
//! With the native engine, `dyn Any` (optionally `+ Send` and `+ Sync`)
//! implements [`RuntimeClass`] as well, and contains exactly its most-derived
//! value.

use core::ptr::NonNull;

use crate::{type_id_with_cvr, TIError, TIResult, TypeIndex};

mod register;

/// Types which can be searched for contained values of a given type.
///
/// # Safety
///
/// When [`find_instance`](RuntimeClass::find_instance) returns `Some(ptr)` for
/// an identity `idx`, `ptr` must point to a valid, properly aligned value of
/// some type `T` for which `type_id_with_cvr::<T>() == *idx`, contained in
/// `self` and valid for as long as the borrow of `self`. The same must hold for
/// [`find_instance_mut`](RuntimeClass::find_instance_mut), where the pointee
/// must additionally be mutably borrowable for as long as the mutable borrow of
/// `self`, and the pointer must be derived from that mutable borrow.
///
/// With the RTTI-free engine, identities of distinct types with an identical
/// rendered name are equal. Types registered in one hierarchy must have
/// distinct names.
pub unsafe trait RuntimeClass {
    fn find_instance(&self, idx: &TypeIndex) -> Option<NonNull<()>>;

    fn find_instance_mut(&mut self, idx: &TypeIndex) -> Option<NonNull<()>>;
}

/// Obtain a reference to the `T` contained in `value`, if any.
///
/// Failing to find a `T` is not an error. This never allocates or logs.
pub fn runtime_pointer_cast<T: 'static, U: ?Sized + RuntimeClass>(value: &U) -> Option<&T> {
    let ptr = value.find_instance(&type_id_with_cvr::<T>())?;
    // Safety: `RuntimeClass` guarantees that `ptr` points to a `T` borrowed
    // from `value`.
    Some(unsafe { ptr.cast::<T>().as_ref() })
}

/// Obtain a mutable reference to the `T` contained in `value`, if any.
pub fn runtime_pointer_cast_mut<T: 'static, U: ?Sized + RuntimeClass>(
    value: &mut U,
) -> Option<&mut T> {
    let ptr = value.find_instance_mut(&type_id_with_cvr::<T>())?;
    // Safety: `RuntimeClass` guarantees that `ptr` points to a `T` mutably
    // borrowed from `value`.
    Some(unsafe { ptr.cast::<T>().as_mut() })
}

fn bad_cast<T: 'static, U: ?Sized>() -> TIError {
    TIError::BadCast {
        from: core::any::type_name::<U>(),
        to: core::any::type_name::<T>(),
    }
}

/// Obtain a reference to the `T` contained in `value`, failing with
/// [`TIError::BadCast`] if there is none.
pub fn runtime_cast<T: 'static, U: ?Sized + RuntimeClass>(value: &U) -> TIResult<&T> {
    runtime_pointer_cast(value).ok_or_else(bad_cast::<T, U>)
}

/// Obtain a mutable reference to the `T` contained in `value`, failing with
/// [`TIError::BadCast`] if there is none.
pub fn runtime_cast_mut<T: 'static, U: ?Sized + RuntimeClass>(value: &mut U) -> TIResult<&mut T> {
    runtime_pointer_cast_mut(value).ok_or_else(bad_cast::<T, U>)
}

#[cfg(typeindex_native_facade)]
macro_rules! any_runtime_class {
    ($($any:ty),*) => {$(
        unsafe impl RuntimeClass for $any {
            fn find_instance(&self, idx: &TypeIndex) -> Option<NonNull<()>> {
                let this: &dyn core::any::Any = &*self;
                let info = idx.type_info();
                if info.is_exact() && core::any::Any::type_id(this) == info.id() {
                    Some(NonNull::from(self).cast())
                } else {
                    None
                }
            }

            fn find_instance_mut(&mut self, idx: &TypeIndex) -> Option<NonNull<()>> {
                let this: &dyn core::any::Any = &*self;
                let info = idx.type_info();
                if info.is_exact() && core::any::Any::type_id(this) == info.id() {
                    Some(NonNull::from(self).cast())
                } else {
                    None
                }
            }
        }
    )*};
}

#[cfg(typeindex_native_facade)]
any_runtime_class!(
    dyn core::any::Any,
    dyn core::any::Any + Send,
    dyn core::any::Any + Send + Sync
);
