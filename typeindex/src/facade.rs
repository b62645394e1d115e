// -*- fill-column: 80; -*-

//! The capability contract shared by all type identity engines.
//!
//! This crate ships two engines, the RTTI-free [`CttiTypeIndex`] and the
//! `TypeId`-backed [`NativeTypeIndex`]. Exactly one of them is selected as the
//! crate-wide [`TypeIndex`] when this crate is compiled. There is no runtime
//! polymorphism between them: [`TypeIndex`] is a type alias, and code written
//! against it compiles unchanged under either engine because both implement the
//! [`TypeIndexFacade`] trait with identical operation sets.
//!
//! Users can provide their own engine by implementing [`TypeIndexFacade`] for
//! a type and invoking [`impl_type_index_operators!`] on it, and then write
//! generic code against `E: TypeIndexFacade`.
//!
//! All comparison operators, for pairs of identities as well as for mixed pairs
//! of an identity and its engine's native descriptor
//! ([`TypeIndexFacade::TypeInfo`]), route through [`TypeIndexFacade::equal`] and
//! [`TypeIndexFacade::before`]. [`core::hash::Hash`] writes
//! [`TypeIndexFacade::hash_code`], and [`core::fmt::Display`] prints
//! [`TypeIndexFacade::pretty_name`].
//!
//! [`CttiTypeIndex`]: crate::ctti::CttiTypeIndex
//! [`NativeTypeIndex`]: crate::native::NativeTypeIndex
//! [`TypeIndex`]: crate::TypeIndex

use core::cmp::Ordering;
use core::fmt::{Debug, Display};
use core::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

/// A type identity engine.
///
/// Implementations must uphold the following contract:
///
/// - [`equal`](TypeIndexFacade::equal) is an equivalence relation, and
///   [`before`](TypeIndexFacade::before) is a strict weak ordering consistent
///   with it: for any `a` and `b`, exactly one of `a.before(b)`, `b.before(a)`
///   and `a.equal(b)` holds.
///
/// - `a.equal(b)` implies `a.hash_code() == b.hash_code()`.
///
/// - [`type_id`](TypeIndexFacade::type_id) ignores reference layers on its
///   type argument, [`type_id_with_cvr`](TypeIndexFacade::type_id_with_cvr)
///   does not. Both agree for types without reference layers.
///
/// The default method implementations compare and hash the bytes of
/// [`raw_name`](TypeIndexFacade::raw_name), which is sufficient for engines
/// whose raw names are unique per type.
pub trait TypeIndexFacade:
    Copy + Eq + Ord + Hash + Debug + Display + Default + Send + Sync + 'static
{
    /// The native descriptor this engine wraps.
    type TypeInfo: Copy + Send + Sync + 'static;

    /// The descriptor backing this identity.
    fn type_info(&self) -> &Self::TypeInfo;

    /// The engine's unprocessed name for this type.
    fn raw_name(&self) -> &'static str;

    /// A human-readable name for this type.
    fn pretty_name(&self) -> &'static str {
        self.raw_name()
    }

    /// Alias of [`raw_name`](TypeIndexFacade::raw_name).
    fn name(&self) -> &'static str {
        self.raw_name()
    }

    fn equal(&self, rhs: &Self) -> bool {
        names_equal(self.raw_name(), rhs.raw_name())
    }

    fn before(&self, rhs: &Self) -> bool {
        names_before(self.raw_name(), rhs.raw_name())
    }

    fn hash_code(&self) -> u64 {
        hash_bytes(self.raw_name().as_bytes())
    }

    /// Identity of `T`, with top-level reference layers removed.
    fn type_id<T: ?Sized + 'static>() -> Self;

    /// Identity of `T`, exactly as spelled.
    fn type_id_with_cvr<T: ?Sized + 'static>() -> Self;

    /// Identity of the most-derived type of `value`.
    fn type_id_runtime<V: ?Sized + RuntimeTypeIndex<Self>>(value: &V) -> Self {
        value.runtime_type_index()
    }
}

/// Types which can report the identity of their most-derived type.
///
/// This is the mechanism behind [`type_id_runtime`](crate::type_id_runtime).
/// Make it a supertrait of an object-safe trait to query the dynamic type
/// behind a trait object:
///
/// ```
/// use typeindex::{RuntimeTypeIndex, register_ctti_class, type_id, type_id_runtime};
///
/// trait Shape: RuntimeTypeIndex {}
///
/// struct Circle;
/// impl Shape for Circle {}
///
/// // Only needed when the RTTI-free engine is active, harmless otherwise:
/// register_ctti_class!(Circle);
///
/// let shape: &dyn Shape = &Circle;
/// assert_eq!(type_id_runtime(shape), type_id::<Circle>());
/// ```
///
/// With the native engine, every `'static` type implements this trait for
/// [`NativeTypeIndex`](crate::native::NativeTypeIndex) through a blanket
/// implementation. The RTTI-free [`CttiTypeIndex`](crate::ctti::CttiTypeIndex)
/// has no such facility: types must be registered with
/// [`register_ctti_class!`](crate::register_ctti_class) (or
/// [`register_runtime_class!`](crate::register_runtime_class)), and querying an
/// unregistered type fails to compile.
pub trait RuntimeTypeIndex<E = crate::TypeIndex> {
    fn runtime_type_index(&self) -> E;
}

/// Byte-wise name equality, with a fast path for identical slices.
///
/// The fast path is only an optimization: the same name may well be stored at
/// different addresses when produced by different crates.
#[inline]
pub fn names_equal(lhs: &str, rhs: &str) -> bool {
    core::ptr::eq(lhs, rhs) || lhs.as_bytes() == rhs.as_bytes()
}

/// Byte-wise lexicographic name ordering, with a fast path for identical
/// slices.
#[inline]
pub fn names_before(lhs: &str, rhs: &str) -> bool {
    !core::ptr::eq(lhs, rhs) && lhs.as_bytes() < rhs.as_bytes()
}

/// Content hash over a name's bytes.
pub fn hash_bytes(bytes: &[u8]) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(bytes);
    hasher.finish()
}

/// Total order of two identities, as given by their engine's
/// [`equal`](TypeIndexFacade::equal) and [`before`](TypeIndexFacade::before).
pub fn collate<E: TypeIndexFacade>(lhs: &E, rhs: &E) -> Ordering {
    if lhs.equal(rhs) {
        Ordering::Equal
    } else if lhs.before(rhs) {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Implement comparison, hashing and printing for a [`TypeIndexFacade`].
///
/// `impl_type_index_operators!(Index, Info)` implements `PartialEq`, `Eq`,
/// `PartialOrd`, `Ord`, `Hash`, `Debug` and `Display` for `Index`, and the
/// mixed comparisons `Index <=> Info` and `Info <=> Index`. `Index` must
/// implement `From<Info>`.
#[macro_export]
macro_rules! impl_type_index_operators {
    ($index:ty, $info:ty) => {
        impl ::core::cmp::PartialEq for $index {
            #[inline]
            fn eq(&self, rhs: &Self) -> bool {
                $crate::facade::TypeIndexFacade::equal(self, rhs)
            }
        }

        impl ::core::cmp::Eq for $index {}

        impl ::core::cmp::PartialOrd for $index {
            #[inline]
            fn partial_cmp(&self, rhs: &Self) -> ::core::option::Option<::core::cmp::Ordering> {
                ::core::option::Option::Some($crate::facade::collate(self, rhs))
            }
        }

        impl ::core::cmp::Ord for $index {
            #[inline]
            fn cmp(&self, rhs: &Self) -> ::core::cmp::Ordering {
                $crate::facade::collate(self, rhs)
            }
        }

        impl ::core::hash::Hash for $index {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                state.write_u64($crate::facade::TypeIndexFacade::hash_code(self))
            }
        }

        impl ::core::fmt::Display for $index {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.pad($crate::facade::TypeIndexFacade::pretty_name(self))
            }
        }

        impl ::core::fmt::Debug for $index {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_tuple(::core::stringify!($index))
                    .field(&$crate::facade::TypeIndexFacade::pretty_name(self))
                    .finish()
            }
        }

        impl ::core::cmp::PartialEq<$info> for $index {
            #[inline]
            fn eq(&self, rhs: &$info) -> bool {
                $crate::facade::TypeIndexFacade::equal(self, &<$index as ::core::convert::From<$info>>::from(*rhs))
            }
        }

        impl ::core::cmp::PartialEq<$index> for $info {
            #[inline]
            fn eq(&self, rhs: &$index) -> bool {
                $crate::facade::TypeIndexFacade::equal(&<$index as ::core::convert::From<$info>>::from(*self), rhs)
            }
        }

        impl ::core::cmp::PartialOrd<$info> for $index {
            #[inline]
            fn partial_cmp(&self, rhs: &$info) -> ::core::option::Option<::core::cmp::Ordering> {
                ::core::option::Option::Some($crate::facade::collate(
                    self,
                    &<$index as ::core::convert::From<$info>>::from(*rhs),
                ))
            }
        }

        impl ::core::cmp::PartialOrd<$index> for $info {
            #[inline]
            fn partial_cmp(&self, rhs: &$index) -> ::core::option::Option<::core::cmp::Ordering> {
                ::core::option::Option::Some($crate::facade::collate(
                    &<$index as ::core::convert::From<$info>>::from(*self),
                    rhs,
                ))
            }
        }
    };
}

#[test]
fn test_names_equal_without_shared_storage() {
    use std::string::String;

    let owned = String::from("core::option::Option<u8>");
    let name: &str = "core::option::Option<u8>";
    assert!(!core::ptr::eq(owned.as_str(), name));
    assert!(names_equal(&owned, name));
    assert!(!names_before(&owned, name));
    assert!(!names_before(name, &owned));
    assert_eq!(hash_bytes(owned.as_bytes()), hash_bytes(name.as_bytes()));
}

#[test]
fn test_names_before_is_bytewise() {
    assert!(names_before("i32", "i64"));
    assert!(!names_before("i64", "i32"));
    // A prefix orders before its extensions:
    assert!(names_before("u8", "u8>"));
    // Upper case ASCII sorts before lower case:
    assert!(names_before("Zebra", "aardvark"));
}
