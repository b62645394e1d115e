// -*- fill-column: 80; -*-

//! Slicing type names out of compiler-generated signature strings.
//!
//! The RTTI-free engine never asks the runtime about a type. Instead, it
//! instantiates a generic *probe* item on the type `T`, and lets the compiler
//! render the probe's full name through [`core::any::type_name`]. That string
//! lives in read-only static storage and embeds the spelled-out name of `T`,
//! surrounded by boilerplate that is fixed for a given probe shape:
//!
//! ```text
//! typeindex::ctti::signature::Probe<alloc::vec::Vec<u8>>
//! \______________ begin_skip _____/                    \ end_skip
//! ```
//!
//! Slicing is driven by a [`ParsingParams`] table entry per
//! [`SignatureFamily`]. The table can be overridden at build time, see
//! [`config`](crate::config). Entries are checked against the probe's known
//! boilerplate when this crate is compiled, so an inconsistent table fails the
//! build rather than producing garbage names.
//!
//! The begin offset (and an optional runtime marker) is applied when the name
//! is extracted. The end offset is never physically applied: the extracted
//! tail keeps the trailing boilerplate attached, and readers subtract
//! `end_skip` when they need the display name (see [`name_len`]).

use core::any::type_name;
use core::marker::PhantomData;

use crate::config;

/// Offsets used to slice a type name out of a probe signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsingParams {
    /// Number of bytes of boilerplate in front of the type name.
    pub begin_skip: usize,

    /// Number of bytes of boilerplate behind the type name.
    pub end_skip: usize,

    /// After dropping `begin_skip` bytes, additionally drop everything up to
    /// and including the first occurrence of this marker. Signatures without
    /// the marker are left unchanged.
    pub runtime_skip: Option<&'static str>,
}

impl ParsingParams {
    pub const fn new(begin_skip: usize, end_skip: usize) -> Self {
        ParsingParams {
            begin_skip,
            end_skip,
            runtime_skip: None,
        }
    }

    pub const fn with_runtime_skip(self, marker: &'static str) -> Self {
        ParsingParams {
            runtime_skip: Some(marker),
            ..self
        }
    }
}

/// The shape of the generic item whose rendered name embeds the type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureFamily {
    /// `type_name::<Probe<T>>()`, rendered as `<module>::Probe<T>`.
    StructProbe,

    /// The name of the function item `probe::<T>`, rendered as
    /// `<module>::probe<T>`.
    FnItemProbe,

    /// `type_name::<fn(&T)>()`, rendered as `fn(&T)`. The rendering of
    /// function pointers is not pinned down by the compiler, so this family
    /// requires parsing parameters to be supplied at build time.
    FnPointerProbe,
}

#[allow(dead_code)]
struct Probe<T: ?Sized>(PhantomData<T>);

fn probe<T: ?Sized>() {}

impl SignatureFamily {
    /// The full probe signature for `T`.
    pub fn signature<T: ?Sized>(self) -> &'static str {
        match self {
            SignatureFamily::StructProbe => type_name::<Probe<T>>(),
            SignatureFamily::FnItemProbe => core::any::type_name_of_val(&probe::<T>),
            SignatureFamily::FnPointerProbe => type_name::<fn(&T)>(),
        }
    }

    /// The boilerplate surrounding the type name in this family's signatures,
    /// as `(prefix, suffix)`.
    pub const fn boilerplate(self) -> (&'static str, &'static str) {
        match self {
            SignatureFamily::StructProbe => (concat!(module_path!(), "::Probe<"), ">"),
            SignatureFamily::FnItemProbe => (concat!(module_path!(), "::probe<"), ">"),
            SignatureFamily::FnPointerProbe => ("fn(&", ")"),
        }
    }

    /// The built-in table entry for this family, if there is one.
    pub const fn default_params(self) -> Option<ParsingParams> {
        match self {
            SignatureFamily::StructProbe | SignatureFamily::FnItemProbe => {
                let (prefix, suffix) = self.boilerplate();
                Some(ParsingParams::new(prefix.len(), suffix.len()))
            }
            SignatureFamily::FnPointerProbe => None,
        }
    }
}

/// The signature family this crate was built for.
pub const ACTIVE_FAMILY: SignatureFamily = config::SIGNATURE_FAMILY;

/// The parsing parameters this crate was built with: the user-supplied
/// override if present, or the active family's table entry.
pub const PARSING_PARAMS: ParsingParams = match config::USER_PARSING_PARAMS {
    Some(params) => params,
    None => match ACTIVE_FAMILY.default_params() {
        Some(params) => params,
        None => panic!(
            "UnsupportedCompiler: the selected TYPEINDEX_CTTI_SIGNATURE has no \
             built-in parsing parameters, set TYPEINDEX_CTTI_PARSING_PARAMS"
        ),
    },
};

// Every probe signature is `prefix + name + suffix` with a non-empty name.
// Skipping no more than the boilerplate on either side thus always leaves a
// non-empty name behind.
const _: () = {
    let (prefix, suffix) = ACTIVE_FAMILY.boilerplate();
    assert!(
        PARSING_PARAMS.begin_skip <= prefix.len(),
        "MisconfiguredCompiler: begin_skip exceeds the probe signature prefix"
    );
    assert!(
        PARSING_PARAMS.end_skip <= suffix.len(),
        "MisconfiguredCompiler: end_skip exceeds the probe signature suffix"
    );
    if let Some(marker) = PARSING_PARAMS.runtime_skip {
        assert!(
            !marker.is_empty(),
            "MisconfiguredCompiler: the runtime skip marker is empty"
        );
    }
};

#[cold]
fn misconfigured(signature: &str, params: &ParsingParams) -> ! {
    panic!(
        "MisconfiguredCompiler: signature {:?} cannot be sliced with {:?}",
        signature, params,
    )
}

/// Extract the identifying tail of a probe signature.
///
/// Drops `params.begin_skip` bytes and, when a runtime marker is configured,
/// everything up to and including its first occurrence. The trailing
/// `params.end_skip` bytes are kept.
///
/// # Panics
///
/// Panics when `signature` is not longer than `begin_skip + end_skip`. This
/// cannot happen for signatures produced by [`SignatureFamily::signature`]
/// under the parameters this crate was built with.
pub fn extract(signature: &'static str, params: &ParsingParams) -> &'static str {
    if signature.len() <= params.begin_skip + params.end_skip {
        ti_error!(
            "type signature {:?} is too short to skip {} + {} bytes",
            signature,
            params.begin_skip,
            params.end_skip,
        );
        misconfigured(signature, params);
    }

    let Some(tail) = signature.get(params.begin_skip..) else {
        ti_error!(
            "begin_skip {} splits a character in type signature {:?}",
            params.begin_skip,
            signature,
        );
        misconfigured(signature, params);
    };

    match params.runtime_skip {
        None => tail,
        Some(marker) => match tail.split_once(marker) {
            Some((_, rest)) => rest,
            None => {
                ti_debug!(
                    "runtime skip marker {:?} not found in {:?}, keeping it unchanged",
                    marker,
                    tail,
                );
                tail
            }
        },
    }
}

/// Length of the display name within an extracted tail: `end_skip` bytes of
/// boilerplate and any trailing spaces are excluded.
pub fn name_len(tail: &str, end_skip: usize) -> usize {
    let bytes = tail.as_bytes();
    let mut len = bytes.len().saturating_sub(end_skip);
    while len > 0 && bytes[len - 1] == b' ' {
        len -= 1;
    }
    len
}

/// The display name within an extracted tail.
pub fn trim_name(tail: &'static str, end_skip: usize) -> &'static str {
    tail.get(..name_len(tail, end_skip)).unwrap_or(tail)
}

/// The identifying tail of `T`'s signature under the active family.
pub fn ctti_signature<T: ?Sized>() -> &'static str {
    extract(ACTIVE_FAMILY.signature::<T>(), &PARSING_PARAMS)
}

#[test]
fn test_active_signatures_match_boilerplate() {
    let (prefix, suffix) = ACTIVE_FAMILY.boilerplate();
    for signature in [
        ACTIVE_FAMILY.signature::<u8>(),
        ACTIVE_FAMILY.signature::<[u8]>(),
        ACTIVE_FAMILY.signature::<&mut dyn core::fmt::Debug>(),
    ] {
        assert!(signature.starts_with(prefix), "{:?}", signature);
        assert!(signature.ends_with(suffix), "{:?}", signature);
    }
}

#[test]
fn test_ctti_signature_names() {
    let end = PARSING_PARAMS.end_skip;
    assert_eq!(trim_name(ctti_signature::<i32>(), end), "i32");
    assert_eq!(trim_name(ctti_signature::<&i32>(), end), "&i32");
    assert_eq!(trim_name(ctti_signature::<str>(), end), "str");
    assert_eq!(
        trim_name(ctti_signature::<Option<u8>>(), end),
        "core::option::Option<u8>"
    );

    // Repeated extraction yields the very same slice:
    assert!(core::ptr::eq(ctti_signature::<i32>(), ctti_signature::<i32>()));
}

#[test]
fn test_default_params_cover_boilerplate() {
    let params = SignatureFamily::StructProbe.default_params().unwrap();
    assert_eq!(params.begin_skip, "typeindex::ctti::signature::Probe<".len());
    assert_eq!(params.end_skip, 1);
    assert_eq!(params.runtime_skip, None);

    assert_eq!(SignatureFamily::FnPointerProbe.default_params(), None);
}

#[test]
fn test_extract_with_runtime_marker() {
    let params = ParsingParams::new(3, 1).with_runtime_skip("T = ");

    let tail = extract("fn foo() [with T = unsigned int]", &params);
    assert_eq!(tail, "unsigned int]");
    assert_eq!(trim_name(tail, params.end_skip), "unsigned int");

    // Missing markers leave the begin-skipped string unchanged:
    let tail = extract("fn bar<int>", &params);
    assert_eq!(tail, "bar<int>");
}

#[test]
fn test_extract_fn_pointer_signature() {
    let params = ParsingParams::new(0, 1).with_runtime_skip("fn(&");
    let tail = extract("for<'a> fn(&u32)", &params);
    assert_eq!(trim_name(tail, params.end_skip), "u32");

    let tail = extract("fn(&u32)", &params);
    assert_eq!(trim_name(tail, params.end_skip), "u32");
}

#[test]
fn test_trailing_spaces_are_stripped() {
    assert_eq!(name_len("int  >", 1), 3);
    assert_eq!(trim_name("int  >", 1), "int");
    assert_eq!(trim_name("   >", 1), "");
    assert_eq!(trim_name(">", 4), "");
}

#[test]
#[should_panic(expected = "MisconfiguredCompiler")]
fn test_extract_rejects_short_signatures() {
    extract("Probe<>", &ParsingParams::new(6, 1));
}
