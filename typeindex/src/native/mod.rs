//! The type identity engine backed by [`core::any::TypeId`].
//!
//! A [`NativeTypeIndex`] pairs a type's `TypeId` with its rendered name.
//! `TypeId` alone answers "are these the same type", but it carries no name,
//! and its ordering is unrelated to any type's name. This engine adds both,
//! and exposes the dynamic type of values through the blanket
//! [`RuntimeTypeIndex`] implementation for every `'static` type.
//!
//! ## Comparing identities
//!
//! Identities created through [`NativeTypeIndex::type_id_with_cvr`], and
//! through [`NativeTypeIndex::type_id`] on types without reference layers, are
//! *exact*: they compare by `TypeId`. Stable Rust cannot name the referent of
//! an arbitrary `&U`, so [`NativeTypeIndex::type_id`] on a type with reference
//! layers strips them from the type's name only. The `TypeId` of the referent
//! is unknown for such identities, and they compare by name against any other
//! identity.
//!
//! Exact identities are ordered by name first and by `TypeId` within one name.
//!
//! On targets where `TypeId`s are known not to be unique across dynamically
//! linked modules, or with the `compare_by_names` feature enabled,
//! [`COMPARE_BY_NAMES`] is set and all comparisons fall back to names. The
//! hash of an identity is always computed over its name, which is consistent
//! with both comparison modes.
//!
//! Equality is only guaranteed to be transitive among types with distinct
//! names: two different types rendering to the same name compare unequal as
//! exact identities, but both compare equal to a name-only identity for their
//! shared name.

use core::any::{type_name, Any, TypeId};
use core::fmt;

use crate::facade::{hash_bytes, names_before, names_equal, RuntimeTypeIndex, TypeIndexFacade};
use crate::qualifiers::{reference_depth, strip_references};

/// Compare native identities by name only.
pub const COMPARE_BY_NAMES: bool = cfg!(any(feature = "compare_by_names", target_os = "aix"));

/// The descriptor of the native engine.
#[derive(Clone, Copy)]
pub struct NativeTypeInfo {
    id: TypeId,
    name: &'static str,
    exact: bool,
}

impl NativeTypeInfo {
    /// The descriptor of `T`, exactly as spelled.
    pub fn of<T: ?Sized + 'static>() -> Self {
        NativeTypeInfo {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            exact: true,
        }
    }

    /// This descriptor with all top-level reference layers removed.
    ///
    /// Removing at least one layer makes the descriptor name-only.
    pub fn unqualified(self) -> Self {
        NativeTypeInfo {
            id: self.id,
            name: strip_references(self.name),
            exact: self.exact && reference_depth(self.name) == 0,
        }
    }

    /// The `TypeId` of the type this descriptor was created for. For
    /// descriptors which are not [exact](NativeTypeInfo::is_exact), this still
    /// includes the stripped reference layers.
    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether [`id`](NativeTypeInfo::id) identifies the named type.
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    fn ids_comparable(&self, rhs: &Self) -> bool {
        !COMPARE_BY_NAMES && self.exact && rhs.exact
    }
}

impl fmt::Debug for NativeTypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeTypeInfo")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("exact", &self.exact)
            .finish()
    }
}

/// Type identity backed by [`TypeId`].
#[derive(Clone, Copy)]
pub struct NativeTypeIndex {
    info: NativeTypeInfo,
}

impl NativeTypeIndex {
    pub const fn new(info: NativeTypeInfo) -> Self {
        NativeTypeIndex { info }
    }

    /// Identity of `T`, with top-level reference layers removed.
    pub fn type_id<T: ?Sized + 'static>() -> Self {
        Self::new(NativeTypeInfo::of::<T>().unqualified())
    }

    /// Identity of `T`, exactly as spelled.
    pub fn type_id_with_cvr<T: ?Sized + 'static>() -> Self {
        Self::new(NativeTypeInfo::of::<T>())
    }

    /// Identity of the most-derived type of `value`.
    ///
    /// Sized values report their own type. Trait objects report the type
    /// behind them when their trait has [`RuntimeTypeIndex`] as a supertrait.
    pub fn type_id_runtime<V: ?Sized + RuntimeTypeIndex<Self>>(value: &V) -> Self {
        value.runtime_type_index()
    }

    pub fn type_info(&self) -> &NativeTypeInfo {
        &self.info
    }

    pub fn raw_name(&self) -> &'static str {
        self.info.name
    }

    /// Rust type names are never mangled, so this is the
    /// [raw name](NativeTypeIndex::raw_name).
    pub fn pretty_name(&self) -> &'static str {
        self.info.name
    }

    pub fn name(&self) -> &'static str {
        self.info.name
    }

    pub fn hash_code(&self) -> u64 {
        hash_bytes(self.info.name.as_bytes())
    }

    pub fn equal(&self, rhs: &Self) -> bool {
        if self.info.ids_comparable(&rhs.info) {
            self.info.id == rhs.info.id
        } else {
            names_equal(self.info.name, rhs.info.name)
        }
    }

    pub fn before(&self, rhs: &Self) -> bool {
        if names_equal(self.info.name, rhs.info.name) {
            self.info.ids_comparable(&rhs.info) && self.info.id < rhs.info.id
        } else {
            names_before(self.info.name, rhs.info.name)
        }
    }
}

impl TypeIndexFacade for NativeTypeIndex {
    type TypeInfo = NativeTypeInfo;

    fn type_info(&self) -> &NativeTypeInfo {
        NativeTypeIndex::type_info(self)
    }

    fn raw_name(&self) -> &'static str {
        NativeTypeIndex::raw_name(self)
    }

    fn pretty_name(&self) -> &'static str {
        NativeTypeIndex::pretty_name(self)
    }

    fn name(&self) -> &'static str {
        NativeTypeIndex::name(self)
    }

    fn equal(&self, rhs: &Self) -> bool {
        NativeTypeIndex::equal(self, rhs)
    }

    fn before(&self, rhs: &Self) -> bool {
        NativeTypeIndex::before(self, rhs)
    }

    fn hash_code(&self) -> u64 {
        NativeTypeIndex::hash_code(self)
    }

    fn type_id<T: ?Sized + 'static>() -> Self {
        NativeTypeIndex::type_id::<T>()
    }

    fn type_id_with_cvr<T: ?Sized + 'static>() -> Self {
        NativeTypeIndex::type_id_with_cvr::<T>()
    }
}

impl From<NativeTypeInfo> for NativeTypeIndex {
    fn from(info: NativeTypeInfo) -> Self {
        NativeTypeIndex::new(info)
    }
}

/// The identity of `()`.
impl Default for NativeTypeIndex {
    fn default() -> Self {
        NativeTypeIndex::type_id::<()>()
    }
}

crate::impl_type_index_operators!(NativeTypeIndex, NativeTypeInfo);

impl<T: Any> RuntimeTypeIndex<NativeTypeIndex> for T {
    fn runtime_type_index(&self) -> NativeTypeIndex {
        NativeTypeIndex::type_id::<T>()
    }
}
