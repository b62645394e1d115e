//! Handling of reference "qualifiers" in type names.
//!
//! Rust has no `const` or `volatile` type qualifiers. The only qualifiers a
//! type parameter can carry on top of its underlying type are reference layers:
//! `&T`, `&mut T`, and any nesting thereof. Stable Rust cannot project `&U` to
//! `U` for an arbitrary type parameter, so both engines strip these layers from
//! the *name* of a type instead.
//!
//! `core::any::type_name` erases lifetimes, so a reference always renders as
//! either `&` or `&mut ` followed by its referent.

const SHARED_REF: &str = "&";
const MUT_REF: &str = "&mut ";

/// Strip all top-level reference layers off a rendered type name.
///
/// The returned slice borrows from `name`, which keeps names in static storage
/// when `name` is `'static`.
///
/// ```
/// use typeindex::qualifiers::strip_references;
///
/// assert_eq!(strip_references("&mut &u8"), "u8");
/// assert_eq!(strip_references("*const u8"), "*const u8");
/// ```
pub fn strip_references(name: &str) -> &str {
    let mut rest = name;
    loop {
        // `&mut ` must be tried first, it shares its first byte with `&`:
        if let Some(referent) = rest.strip_prefix(MUT_REF) {
            rest = referent;
        } else if let Some(referent) = rest.strip_prefix(SHARED_REF) {
            rest = referent;
        } else {
            return rest;
        }
    }
}

/// Number of top-level reference layers in a rendered type name.
pub fn reference_depth(name: &str) -> usize {
    let mut depth = 0;
    let mut rest = name;
    while let Some(referent) = rest.strip_prefix(MUT_REF).or_else(|| rest.strip_prefix(SHARED_REF)) {
        rest = referent;
        depth += 1;
    }
    depth
}

#[test]
fn test_strip_references() {
    assert_eq!(strip_references("i32"), "i32");
    assert_eq!(strip_references("&i32"), "i32");
    assert_eq!(strip_references("&mut i32"), "i32");
    assert_eq!(strip_references("&&mut &[u8]"), "[u8]");
    assert_eq!(strip_references("&dyn core::any::Any"), "dyn core::any::Any");

    // Only top-level layers are qualifiers:
    assert_eq!(strip_references("core::option::Option<&i32>"), "core::option::Option<&i32>");
    assert_eq!(strip_references("*mut &i32"), "*mut &i32");

    // A type whose path merely starts with "mut" is not a mutable reference:
    assert_eq!(strip_references("&mutex::Guard"), "mutex::Guard");
}

#[test]
fn test_reference_depth() {
    assert_eq!(reference_depth("i32"), 0);
    assert_eq!(reference_depth("&i32"), 1);
    assert_eq!(reference_depth("&mut &i32"), 2);
    assert_eq!(reference_depth("(&i32, &i32)"), 0);
}
