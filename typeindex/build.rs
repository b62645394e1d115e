// -*- fill-column: 80; -*-

use std::env;

const SIGNATURE_ENV: &str = "TYPEINDEX_CTTI_SIGNATURE";
const PARSING_PARAMS_ENV: &str = "TYPEINDEX_CTTI_PARSING_PARAMS";

const SIGNATURE_FAMILIES: &[&str] = &["struct_probe", "fn_item_probe", "fn_pointer_probe"];

fn binary_compat_warn(explanation: &str) {
    println!(
        "cargo:warning=\n\
         cargo:warning=--------------------------------------------------\n\
         cargo:warning=\n\
         cargo:warning=TYPEINDEX BINARY-COMPATIBILITY MODE\n\
         cargo:warning=\n\
         cargo:warning={}\n\
         cargo:warning=\n\
         cargo:warning=All crates exchanging type identities must agree on\n\
         cargo:warning=this setting. Identities of the two engines are not\n\
         cargo:warning=comparable with each other.\n\
         cargo:warning=\n\
         cargo:warning=--------------------------------------------------\n\
         cargo:warning=\n\
         ",
        explanation,
    );
}

fn misconfigured(env_var: &str, value: &str, expected: &str) -> ! {
    panic!(
        "typeindex is misconfigured: {}={:?} is invalid, expected {}",
        env_var, value, expected,
    );
}

fn parse_skip(value: &str, field: &str, raw: &str) -> usize {
    value.trim().parse::<usize>().unwrap_or_else(|_| {
        misconfigured(
            PARSING_PARAMS_ENV,
            raw,
            &format!("a non-negative integer as {}", field),
        )
    })
}

fn emit_signature_family() {
    let family = match env::var(SIGNATURE_ENV) {
        Ok(family) => family,
        Err(env::VarError::NotPresent) => "struct_probe".to_string(),
        Err(env::VarError::NotUnicode(_)) => {
            misconfigured(SIGNATURE_ENV, "<non-unicode>", "a signature family name")
        }
    };

    let family = family.trim();
    if !SIGNATURE_FAMILIES.contains(&family) {
        misconfigured(SIGNATURE_ENV, family, &SIGNATURE_FAMILIES.join(" | "));
    }

    println!("cargo::rustc-cfg=typeindex_signature=\"{}\"", family);
}

fn emit_parsing_params() {
    let raw = match env::var(PARSING_PARAMS_ENV) {
        Ok(raw) => raw,
        Err(env::VarError::NotPresent) => return,
        Err(env::VarError::NotUnicode(_)) => misconfigured(
            PARSING_PARAMS_ENV,
            "<non-unicode>",
            "begin_skip,end_skip,runtime_skip,marker",
        ),
    };

    // The marker is last and may itself contain commas:
    let fields: Vec<&str> = raw.splitn(4, ',').collect();
    if fields.len() != 4 {
        misconfigured(PARSING_PARAMS_ENV, &raw, "begin_skip,end_skip,runtime_skip,marker");
    }

    let begin_skip = parse_skip(fields[0], "begin_skip", &raw);
    let end_skip = parse_skip(fields[1], "end_skip", &raw);
    let runtime_skip = match fields[2].trim() {
        "true" | "1" => true,
        "false" | "0" => false,
        _ => misconfigured(PARSING_PARAMS_ENV, &raw, "true or false as runtime_skip"),
    };
    let marker = fields[3];
    if runtime_skip && marker.is_empty() {
        misconfigured(PARSING_PARAMS_ENV, &raw, "a non-empty marker with runtime_skip");
    }

    println!("cargo::rustc-cfg=typeindex_user_parsing");
    println!("cargo::rustc-env=TYPEINDEX_CTTI_BEGIN_SKIP={}", begin_skip);
    println!("cargo::rustc-env=TYPEINDEX_CTTI_END_SKIP={}", end_skip);
    println!("cargo::rustc-env=TYPEINDEX_CTTI_RUNTIME_SKIP={}", runtime_skip as u8);
    println!("cargo::rustc-env=TYPEINDEX_CTTI_RUNTIME_SKIP_MARKER={}", marker);
}

fn main() {
    println!("cargo::rerun-if-changed=build.rs");
    println!("cargo::rerun-if-env-changed={}", SIGNATURE_ENV);
    println!("cargo::rerun-if-env-changed={}", PARSING_PARAMS_ENV);

    println!("cargo::rustc-check-cfg=cfg(typeindex_native_facade)");
    println!("cargo::rustc-check-cfg=cfg(typeindex_user_parsing)");
    println!(
        "cargo::rustc-check-cfg=cfg(typeindex_signature, values(\"{}\"))",
        SIGNATURE_FAMILIES.join("\", \""),
    );

    emit_signature_family();
    emit_parsing_params();

    if cfg!(feature = "native_rtti") && !cfg!(feature = "force_no_native_rtti") {
        println!("cargo::rustc-cfg=typeindex_native_facade");
    }

    if cfg!(feature = "force_no_native_rtti") && cfg!(feature = "native_rtti") {
        binary_compat_warn(
            "The feature \"force_no_native_rtti\" selects the RTTI-free\n\
             cargo:warning=engine even though \"native_rtti\" is enabled.",
        );
    }
}
