//! Build-time configuration of this crate.
//!
//! There is no runtime configuration. All options are fixed when the crate is
//! compiled, through cargo features and environment variables read by the
//! build script:
//!
//! | option                          | effect                                                          |
//! |---------------------------------|-----------------------------------------------------------------|
//! | feature `native_rtti`           | builds [`native`](crate::native) and selects it as [`TypeIndex`](crate::TypeIndex) |
//! | feature `force_no_native_rtti`  | selects [`CttiTypeIndex`](crate::ctti::CttiTypeIndex) even with `native_rtti` |
//! | feature `compare_by_names`      | native identities compare by name instead of `TypeId`           |
//! | `TYPEINDEX_CTTI_SIGNATURE`      | probe shape sliced by the RTTI-free engine                      |
//! | `TYPEINDEX_CTTI_PARSING_PARAMS` | `begin_skip,end_skip,runtime_skip,marker` slicing override      |
//!
//! `TYPEINDEX_CTTI_SIGNATURE` accepts `struct_probe` (the default),
//! `fn_item_probe` and `fn_pointer_probe`. The latter has no built-in parsing
//! parameters, and must be combined with `TYPEINDEX_CTTI_PARSING_PARAMS`, for
//! instance `0,1,true,fn(&`.
//!
//! Malformed values fail the build.

use crate::ctti::signature::{ParsingParams, SignatureFamily};

/// Whether the native engine is the crate-wide [`TypeIndex`](crate::TypeIndex).
pub const NATIVE_FACADE: bool = cfg!(typeindex_native_facade);

/// Whether the RTTI-free engine was forced, regardless of `native_rtti`.
pub const FORCE_NO_NATIVE_RTTI: bool = cfg!(feature = "force_no_native_rtti");

/// The signature family selected through `TYPEINDEX_CTTI_SIGNATURE`.
#[cfg(typeindex_signature = "struct_probe")]
pub const SIGNATURE_FAMILY: SignatureFamily = SignatureFamily::StructProbe;
#[cfg(typeindex_signature = "fn_item_probe")]
pub const SIGNATURE_FAMILY: SignatureFamily = SignatureFamily::FnItemProbe;
#[cfg(typeindex_signature = "fn_pointer_probe")]
pub const SIGNATURE_FAMILY: SignatureFamily = SignatureFamily::FnPointerProbe;
#[cfg(not(any(
    typeindex_signature = "struct_probe",
    typeindex_signature = "fn_item_probe",
    typeindex_signature = "fn_pointer_probe",
)))]
pub const SIGNATURE_FAMILY: SignatureFamily = SignatureFamily::StructProbe;

/// Parsing parameters supplied through `TYPEINDEX_CTTI_PARSING_PARAMS`, if
/// any.
#[cfg(typeindex_user_parsing)]
pub const USER_PARSING_PARAMS: Option<ParsingParams> = {
    let params = ParsingParams::new(
        parse_usize(env!("TYPEINDEX_CTTI_BEGIN_SKIP")),
        parse_usize(env!("TYPEINDEX_CTTI_END_SKIP")),
    );
    if parse_usize(env!("TYPEINDEX_CTTI_RUNTIME_SKIP")) != 0 {
        Some(params.with_runtime_skip(env!("TYPEINDEX_CTTI_RUNTIME_SKIP_MARKER")))
    } else {
        Some(params)
    }
};
#[cfg(not(typeindex_user_parsing))]
pub const USER_PARSING_PARAMS: Option<ParsingParams> = None;

#[cfg(typeindex_user_parsing)]
const fn parse_usize(digits: &str) -> usize {
    let bytes = digits.as_bytes();
    assert!(!bytes.is_empty(), "empty parsing parameter");

    let mut value = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        assert!(bytes[i].is_ascii_digit(), "parsing parameter is not a number");
        value = value * 10 + (bytes[i] - b'0') as usize;
        i += 1;
    }
    value
}

#[test]
fn test_facade_selection_is_consistent() {
    assert_eq!(
        NATIVE_FACADE,
        cfg!(all(feature = "native_rtti", not(feature = "force_no_native_rtti")))
    );
    assert!(!(NATIVE_FACADE && FORCE_NO_NATIVE_RTTI));
}
