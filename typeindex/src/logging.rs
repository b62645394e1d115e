// Crate-internal logging macros. With the `log` feature disabled, these still
// type-check their arguments but never emit anything.

#[cfg(feature = "log")]
macro_rules! ti_debug {
    ($($arg:tt)*) => { ::log::debug!(target: "typeindex", $($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! ti_debug {
    ($($arg:tt)*) => {{
        let _ = ::core::format_args!($($arg)*);
    }};
}

#[cfg(feature = "log")]
macro_rules! ti_error {
    ($($arg:tt)*) => { ::log::error!(target: "typeindex", $($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! ti_error {
    ($($arg:tt)*) => {{
        let _ = ::core::format_args!($($arg)*);
    }};
}
