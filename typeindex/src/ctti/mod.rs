// -*- fill-column: 80; -*-

//! The RTTI-free type identity engine.
//!
//! A [`CttiTypeIndex`] identifies a type through the name the compiler spells
//! out for it, as sliced out of a probe signature by the [`signature`] module.
//! It never calls into `TypeId` or any other runtime facility, and is thus
//! available in every build configuration. Identities are compared by name:
//! two identities are equal exactly when they were created for types with the
//! same rendered name, even when created in different crates.
//!
//! ## Caveats
//!
//! [`core::any::type_name`] does not guarantee unique names. Two distinct types
//! can render to the same string, for instance when two semver-incompatible
//! versions of a crate are linked into one binary. Such types share a
//! `CttiTypeIndex`. Code using identities to guard unsafe operations (such as
//! the [`runtime_cast`](crate::runtime_cast) extension) must only register
//! types with distinct names.
//!
//! Lifetimes are erased from rendered names, so `&'a T` and `&'static T` share
//! one identity. For this reason, [`CttiTypeIndex::type_id`] does not require
//! `T: 'static`.

pub mod signature;

use core::fmt;

use crate::facade::{hash_bytes, names_before, names_equal, RuntimeTypeIndex, TypeIndexFacade};
use crate::qualifiers::strip_references;
use signature::{ctti_signature, trim_name, PARSING_PARAMS};

/// The descriptor of the RTTI-free engine.
///
/// Refers to the tail of a probe signature in static storage: the type name,
/// followed by `end_skip` bytes of boilerplate which are excluded from the
/// display name only.
#[derive(Clone, Copy)]
pub struct CttiData {
    tail: &'static str,
}

impl CttiData {
    /// The descriptor of `T`, exactly as spelled.
    pub fn of<T: ?Sized>() -> Self {
        CttiData {
            tail: ctti_signature::<T>(),
        }
    }

    /// This descriptor with all top-level reference layers removed.
    pub fn unqualified(self) -> Self {
        CttiData {
            tail: strip_references(self.tail),
        }
    }

    /// The signature tail, with trailing boilerplate still attached.
    pub fn raw(&self) -> &'static str {
        self.tail
    }

    /// The type name, without trailing boilerplate.
    pub fn pretty_name(&self) -> &'static str {
        trim_name(self.tail, PARSING_PARAMS.end_skip)
    }
}

impl fmt::Debug for CttiData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CttiData").field(&self.pretty_name()).finish()
    }
}

/// Type identity derived from compiler-rendered type names.
#[derive(Clone, Copy)]
pub struct CttiTypeIndex {
    data: CttiData,
}

impl CttiTypeIndex {
    pub const fn new(data: CttiData) -> Self {
        CttiTypeIndex { data }
    }

    /// Identity of `T`, with top-level reference layers removed.
    ///
    /// `type_id::<u32>()`, `type_id::<&u32>()` and `type_id::<&mut &u32>()` are
    /// all equal.
    pub fn type_id<T: ?Sized>() -> Self {
        Self::new(CttiData::of::<T>().unqualified())
    }

    /// Identity of `T`, exactly as spelled.
    ///
    /// `type_id_with_cvr::<u32>()` and `type_id_with_cvr::<&u32>()` are
    /// distinct. For types without reference layers, this is equal to
    /// [`CttiTypeIndex::type_id`].
    pub fn type_id_with_cvr<T: ?Sized>() -> Self {
        Self::new(CttiData::of::<T>())
    }

    /// Identity of the most-derived type of `value`.
    ///
    /// The RTTI-free engine cannot query dynamic types on its own. `V` must
    /// implement [`RuntimeTypeIndex<CttiTypeIndex>`], for instance through
    /// [`register_ctti_class!`](crate::register_ctti_class).
    pub fn type_id_runtime<V: ?Sized + RuntimeTypeIndex<Self>>(value: &V) -> Self {
        value.runtime_type_index()
    }

    pub fn type_info(&self) -> &CttiData {
        &self.data
    }

    pub fn raw_name(&self) -> &'static str {
        self.data.raw()
    }

    pub fn pretty_name(&self) -> &'static str {
        self.data.pretty_name()
    }

    pub fn name(&self) -> &'static str {
        self.data.raw()
    }

    pub fn hash_code(&self) -> u64 {
        hash_bytes(self.pretty_name().as_bytes())
    }

    pub fn equal(&self, rhs: &Self) -> bool {
        names_equal(self.raw_name(), rhs.raw_name())
    }

    pub fn before(&self, rhs: &Self) -> bool {
        names_before(self.raw_name(), rhs.raw_name())
    }
}

impl TypeIndexFacade for CttiTypeIndex {
    type TypeInfo = CttiData;

    fn type_info(&self) -> &CttiData {
        CttiTypeIndex::type_info(self)
    }

    fn raw_name(&self) -> &'static str {
        CttiTypeIndex::raw_name(self)
    }

    fn pretty_name(&self) -> &'static str {
        CttiTypeIndex::pretty_name(self)
    }

    fn name(&self) -> &'static str {
        CttiTypeIndex::name(self)
    }

    fn equal(&self, rhs: &Self) -> bool {
        CttiTypeIndex::equal(self, rhs)
    }

    fn before(&self, rhs: &Self) -> bool {
        CttiTypeIndex::before(self, rhs)
    }

    fn hash_code(&self) -> u64 {
        CttiTypeIndex::hash_code(self)
    }

    fn type_id<T: ?Sized + 'static>() -> Self {
        CttiTypeIndex::type_id::<T>()
    }

    fn type_id_with_cvr<T: ?Sized + 'static>() -> Self {
        CttiTypeIndex::type_id_with_cvr::<T>()
    }
}

impl From<CttiData> for CttiTypeIndex {
    fn from(data: CttiData) -> Self {
        CttiTypeIndex::new(data)
    }
}

/// The identity of `()`.
impl Default for CttiTypeIndex {
    fn default() -> Self {
        CttiTypeIndex::type_id::<()>()
    }
}

crate::impl_type_index_operators!(CttiTypeIndex, CttiData);

/// Let the RTTI-free engine query the most-derived type of `Type`.
///
/// Implements [`RuntimeTypeIndex<CttiTypeIndex>`](crate::RuntimeTypeIndex) for
/// `Type`, reporting `Type` itself. Trait objects whose trait has
/// `RuntimeTypeIndex<CttiTypeIndex>` as a supertrait then report the type
/// behind them.
#[macro_export]
macro_rules! register_ctti_class {
    ($ty:ty) => {
        impl $crate::RuntimeTypeIndex<$crate::ctti::CttiTypeIndex> for $ty {
            fn runtime_type_index(&self) -> $crate::ctti::CttiTypeIndex {
                $crate::ctti::CttiTypeIndex::type_id::<Self>()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Local;

    #[test]
    fn test_names() {
        assert_eq!(CttiTypeIndex::type_id::<i32>().pretty_name(), "i32");
        assert_eq!(CttiTypeIndex::type_id::<&mut [u8]>().pretty_name(), "[u8]");
        assert_eq!(CttiTypeIndex::type_id_with_cvr::<&&str>().pretty_name(), "&&str");
        assert_eq!(
            CttiTypeIndex::type_id::<Local>().pretty_name(),
            "typeindex::ctti::tests::Local"
        );

        let idx = CttiTypeIndex::type_id::<u64>();
        assert!(idx.raw_name().starts_with(idx.pretty_name()));
        assert_eq!(idx.name(), idx.raw_name());
    }

    #[test]
    fn test_lifetimes_do_not_matter() {
        fn identity_of<'a>(_: &'a u8) -> CttiTypeIndex {
            CttiTypeIndex::type_id_with_cvr::<&'a u8>()
        }

        let byte = 0u8;
        assert_eq!(identity_of(&byte), CttiTypeIndex::type_id_with_cvr::<&'static u8>());
    }

    #[test]
    fn test_equal_without_shared_storage() {
        let exact = CttiTypeIndex::type_id_with_cvr::<u16>();
        let peeled = CttiTypeIndex::type_id::<&u16>();

        assert!(!core::ptr::eq(exact.raw_name(), peeled.raw_name()));
        assert!(exact.equal(&peeled));
        assert!(!exact.before(&peeled));
        assert!(!peeled.before(&exact));
        assert_eq!(exact.hash_code(), peeled.hash_code());
    }

    #[test]
    fn test_mixed_comparisons() {
        let idx = CttiTypeIndex::type_id::<char>();
        let data = CttiData::of::<char>();
        assert!(idx == data);
        assert!(data == idx);
        assert!(CttiData::of::<bool>() != idx);
        assert_eq!(
            idx.partial_cmp(&CttiData::of::<bool>()),
            Some(CttiTypeIndex::type_id::<char>().cmp(&CttiTypeIndex::type_id::<bool>()))
        );
    }

    #[test]
    fn test_default_is_unit() {
        assert_eq!(CttiTypeIndex::default(), CttiTypeIndex::type_id::<()>());
        assert_eq!(CttiTypeIndex::default().pretty_name(), "()");
    }
}
