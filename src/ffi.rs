// ffi.rs - Raw declarations for the C Oniguruma library.
//
// Types and constants mirror oniguruma.h. Symbols that only exist in
// some releases are gated behind the cfg flags emitted by build.rs
// (onig_explicit_init, onig_retry_limit, onig_retry_limit_error).

#![allow(non_camel_case_types, non_upper_case_globals)]

use std::ffi::c_void;
use std::os::raw::{c_char, c_int, c_uint};
#[cfg(onig_retry_limit)]
use std::os::raw::c_ulong;

// --- Basic types ---

pub type OnigUChar = u8;
pub type OnigOptionType = c_uint;

// --- Opaque types ---

#[repr(C)]
pub struct OnigRegexType {
    _opaque: [u8; 0],
}
pub type OnigRegex = *mut OnigRegexType;

#[repr(C)]
pub struct OnigSyntaxType {
    _opaque: [u8; 0],
}

#[repr(C)]
pub struct OnigEncodingType {
    _opaque: [u8; 0],
}
pub type OnigEncoding = *const OnigEncodingType;

// --- OnigRegion ---

#[repr(C)]
pub struct OnigRegion {
    pub allocated: c_int,
    pub num_regs: c_int,
    pub beg: *mut c_int,
    pub end: *mut c_int,
    pub history_root: *mut c_void,
}

// --- OnigErrorInfo ---

#[repr(C)]
pub struct OnigErrorInfo {
    pub enc: OnigEncoding,
    pub par: *const OnigUChar,
    pub par_end: *const OnigUChar,
}

// --- Constants ---

pub const ONIG_NORMAL: c_int = 0;
pub const ONIG_MISMATCH: c_int = -1;

pub const ONIG_MAX_ERROR_MESSAGE_LEN: usize = 90;
pub const ONIG_REGION_NOTPOS: c_int = -1;

pub const ONIG_OPTION_NONE: OnigOptionType = 0;
pub const ONIG_OPTION_DEFAULT: OnigOptionType = ONIG_OPTION_NONE;
// compile time
pub const ONIG_OPTION_IGNORECASE: OnigOptionType = 1;
pub const ONIG_OPTION_EXTEND: OnigOptionType = ONIG_OPTION_IGNORECASE << 1;
pub const ONIG_OPTION_MULTILINE: OnigOptionType = ONIG_OPTION_EXTEND << 1;
pub const ONIG_OPTION_SINGLELINE: OnigOptionType = ONIG_OPTION_MULTILINE << 1;
pub const ONIG_OPTION_FIND_LONGEST: OnigOptionType = ONIG_OPTION_SINGLELINE << 1;
pub const ONIG_OPTION_FIND_NOT_EMPTY: OnigOptionType = ONIG_OPTION_FIND_LONGEST << 1;
pub const ONIG_OPTION_NEGATE_SINGLELINE: OnigOptionType = ONIG_OPTION_FIND_NOT_EMPTY << 1;
pub const ONIG_OPTION_DONT_CAPTURE_GROUP: OnigOptionType = ONIG_OPTION_NEGATE_SINGLELINE << 1;
pub const ONIG_OPTION_CAPTURE_GROUP: OnigOptionType = ONIG_OPTION_DONT_CAPTURE_GROUP << 1;
// search time
pub const ONIG_OPTION_NOTBOL: OnigOptionType = ONIG_OPTION_CAPTURE_GROUP << 1;
pub const ONIG_OPTION_NOTEOL: OnigOptionType = ONIG_OPTION_NOTBOL << 1;

// Error codes shared by every supported release.
pub const ONIGERR_MEMORY: c_int = -5;
pub const ONIGERR_INVALID_ARGUMENT: c_int = -30;

/// Retry limit exceeded during matching. Only defined where the linked
/// library defines it; `compat::is_retry_limit_error` is the portable way
/// to test for it.
#[cfg(onig_retry_limit_error)]
pub const ONIGERR_RETRY_LIMIT_IN_MATCH_OVER: c_int = -17;

// --- Extern declarations ---

extern "C" {
    pub static OnigEncodingUTF8: OnigEncodingType;
    pub static OnigEncodingASCII: OnigEncodingType;
    pub static OnigEncodingISO_8859_1: OnigEncodingType;

    pub static OnigDefaultSyntax: *const OnigSyntaxType;

    #[cfg(onig_explicit_init)]
    pub fn onig_initialize(encodings: *const OnigEncoding, number_of_encodings: c_int) -> c_int;

    pub fn onig_version() -> *const c_char;

    pub fn onig_new(
        reg: *mut OnigRegex,
        pattern: *const OnigUChar,
        pattern_end: *const OnigUChar,
        option: OnigOptionType,
        enc: OnigEncoding,
        syntax: *const OnigSyntaxType,
        einfo: *mut OnigErrorInfo,
    ) -> c_int;

    pub fn onig_free(reg: OnigRegex);

    pub fn onig_search(
        reg: OnigRegex,
        str: *const OnigUChar,
        end: *const OnigUChar,
        start: *const OnigUChar,
        range: *const OnigUChar,
        region: *mut OnigRegion,
        option: OnigOptionType,
    ) -> c_int;

    pub fn onig_region_new() -> *mut OnigRegion;
    pub fn onig_region_free(region: *mut OnigRegion, free_self: c_int);

    pub fn onig_name_to_group_numbers(
        reg: OnigRegex,
        name: *const OnigUChar,
        name_end: *const OnigUChar,
        nums: *mut *mut c_int,
    ) -> c_int;

    // Variadic in C; the fixed-arity wrappers live in crate::compat.
    pub fn onig_error_code_to_str(s: *mut OnigUChar, err_code: c_int, ...) -> c_int;

    #[cfg(onig_retry_limit)]
    pub fn onig_get_retry_limit_in_match() -> c_ulong;
    #[cfg(onig_retry_limit)]
    pub fn onig_set_retry_limit_in_match(n: c_ulong) -> c_int;
}
