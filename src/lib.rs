//! # Rigoni
//!
//! Rust bindings for the [Oniguruma](https://github.com/kkos/oniguruma)
//! regular-expression C library, compatible with releases from 5.9.6
//! through current 6.x.
//!
//! The library's C surface is not uniform across those releases:
//! `onig_initialize()` only exists from 6.0.0, the retry-limit tunables
//! only from 6.8.2, and `onig_error_code_to_str()` is variadic. Rigoni
//! hides all of that behind one fixed surface -- `build.rs` detects the
//! installed version and compiles in the matching implementation, so
//! there is no runtime version branching.
//!
//! ## Quick Start
//!
//! ```rust
//! use rigoni::prelude::*;
//!
//! rigoni::initialize(&[Encoding::utf8()]).unwrap();
//!
//! let re = Regex::new(r"(?<year>\d{4})-(?<month>\d{2})").unwrap();
//! let result = re.search("Date: 2026-02").unwrap().unwrap();
//! assert_eq!(result.named_group("year").unwrap(), "2026");
//!
//! let re = Regex::new("[aeiou]").unwrap();
//! assert_eq!(re.gsub("hello", "*").unwrap(), "h*ll*");
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`ffi`] | Raw declarations from `oniguruma.h` |
//! | [`compat`] | Fixed-arity, version-portable entry points |
//! | [`encoding`] | Handles for the built-in encodings |
//! | [`error`] | Crate error type over the C error codes |
//! | [`regex`] | Compiled patterns and search results |
//! | [`gsub`] | Global substitution with group references |
//!
//! ## Initialization
//!
//! [`initialize`] must run once, during startup, before any pattern is
//! compiled and before the engine is used from more than one place. It
//! registers the encodings and raises the engine's retry ceiling (see
//! [`compat::DEFAULT_RETRY_LIMIT_FACTOR`]); both are process-wide
//! configuration, which is why the call is explicit rather than hidden
//! behind lazy init. Repeat calls do not re-enter the native
//! initializer; they observe the first call's status.

use std::ffi::CStr;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Once;

pub mod compat;
pub mod encoding;
pub mod error;
pub mod ffi;
pub mod gsub;
pub mod prelude;
pub mod regex;

use encoding::Encoding;
use error::Error;

static INIT: Once = Once::new();
static INIT_STATUS: AtomicI32 = AtomicI32::new(ffi::ONIG_NORMAL);

/// Initialize the engine for the given encodings.
///
/// Applies [`compat::DEFAULT_RETRY_LIMIT_FACTOR`] to the retry ceiling;
/// use [`initialize_with_retry_limit_factor`] to pick a different
/// factor. See the crate docs for the lifecycle contract.
pub fn initialize(encodings: &[Encoding]) -> Result<(), Error> {
    initialize_with_retry_limit_factor(encodings, compat::DEFAULT_RETRY_LIMIT_FACTOR)
}

/// Initialize the engine, raising the retry ceiling by `factor`.
pub fn initialize_with_retry_limit_factor(
    encodings: &[Encoding],
    factor: u64,
) -> Result<(), Error> {
    INIT.call_once(|| {
        let raw: Vec<ffi::OnigEncoding> = encodings.iter().map(Encoding::as_raw).collect();
        INIT_STATUS.store(
            compat::initialize_with_retry_limit_factor(&raw, factor),
            Ordering::SeqCst,
        );
    });
    match INIT_STATUS.load(Ordering::SeqCst) {
        ffi::ONIG_NORMAL => Ok(()),
        code => Err(Error::library(code)),
    }
}

/// Version string of the linked native library, e.g. `"6.9.4"`.
pub fn version() -> &'static str {
    unsafe { CStr::from_ptr(ffi::onig_version()) }
        .to_str()
        .unwrap_or("unknown")
}
