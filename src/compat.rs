// compat.rs - Version-compatibility layer over the C library.
//
// One fixed surface over Oniguruma 5.9.6 and 6.x. Which implementation
// is compiled in is decided by build.rs from the detected header version:
// 5.9.6 has no onig_initialize(), no retry-limit tunables and no
// retry-limit error code; 6.x requires initialization before compiling
// patterns. onig_error_code_to_str() is variadic in C, so the two call
// shapes are exposed here as fixed-arity functions.

use std::os::raw::c_int;

use crate::ffi;

/// Factor applied to the engine's retry ceiling by [`initialize`].
///
/// The stock ceiling aborts legitimate but backtracking-heavy patterns;
/// raising it trades worst-case latency for correctness on those
/// patterns. The value is empirical, not principled -- callers whose
/// workload needs a different tradeoff should use
/// [`initialize_with_retry_limit_factor`] instead.
pub const DEFAULT_RETRY_LIMIT_FACTOR: u64 = 100;

/// Register `encodings` with the engine and return the native status.
///
/// Equivalent to [`initialize_with_retry_limit_factor`] with
/// [`DEFAULT_RETRY_LIMIT_FACTOR`].
pub fn initialize(encodings: &[ffi::OnigEncoding]) -> c_int {
    initialize_with_retry_limit_factor(encodings, DEFAULT_RETRY_LIMIT_FACTOR)
}

/// Register `encodings` with the engine, then raise the process-wide
/// retry ceiling by `factor`.
///
/// Mutates process-wide engine configuration; call once during startup,
/// before any pattern is compiled. On libraries older than 6.0.0 there
/// is nothing to initialize and no ceiling to raise: the call is a no-op
/// returning 0.
#[cfg(onig_explicit_init)]
pub fn initialize_with_retry_limit_factor(encodings: &[ffi::OnigEncoding], factor: u64) -> c_int {
    let result =
        unsafe { ffi::onig_initialize(encodings.as_ptr(), encodings.len() as c_int) };
    if result == ffi::ONIG_NORMAL {
        raise_retry_limit(factor);
    }
    result
}

#[cfg(not(onig_explicit_init))]
pub fn initialize_with_retry_limit_factor(encodings: &[ffi::OnigEncoding], factor: u64) -> c_int {
    let _ = (encodings, factor);
    ffi::ONIG_NORMAL
}

#[cfg(onig_retry_limit)]
fn raise_retry_limit(factor: u64) {
    use std::os::raw::c_ulong;
    if factor <= 1 {
        return;
    }
    unsafe {
        let raised = (factor as c_ulong).saturating_mul(ffi::onig_get_retry_limit_in_match());
        ffi::onig_set_retry_limit_in_match(raised);
    }
}

#[cfg(all(onig_explicit_init, not(onig_retry_limit)))]
fn raise_retry_limit(_factor: u64) {}

/// Current retry ceiling for a single match attempt.
#[cfg(onig_retry_limit)]
pub fn retry_limit_in_match() -> u64 {
    unsafe { ffi::onig_get_retry_limit_in_match() as u64 }
}

/// Set the retry ceiling for a single match attempt. Process-wide.
#[cfg(onig_retry_limit)]
pub fn set_retry_limit_in_match(n: u64) -> c_int {
    unsafe { ffi::onig_set_retry_limit_in_match(n as std::os::raw::c_ulong) }
}

/// Write the message for `code` into `buf` and return the native result
/// (the number of bytes written).
///
/// `code` is not validated; unknown codes are formatted by the native
/// library as it sees fit. `buf` must be at least
/// [`ffi::ONIG_MAX_ERROR_MESSAGE_LEN`] bytes; no bounds are checked
/// beyond what the native function itself guarantees.
pub fn error_code_to_str(buf: &mut [u8], code: c_int) -> c_int {
    unsafe { ffi::onig_error_code_to_str(buf.as_mut_ptr(), code) }
}

/// Like [`error_code_to_str`], with extended error info. For codes whose
/// message carries context (e.g. the offending name in a syntax error),
/// the context from `info` is included.
pub fn error_code_with_info_to_str(
    buf: &mut [u8],
    code: c_int,
    info: &ffi::OnigErrorInfo,
) -> c_int {
    unsafe {
        ffi::onig_error_code_to_str(buf.as_mut_ptr(), code, info as *const ffi::OnigErrorInfo)
    }
}

/// Render the message for `code` as an owned string.
pub fn error_message(code: c_int, info: Option<&ffi::OnigErrorInfo>) -> String {
    let mut buf = [0u8; ffi::ONIG_MAX_ERROR_MESSAGE_LEN];
    let len = match info {
        Some(info) => error_code_with_info_to_str(&mut buf, code, info),
        None => error_code_to_str(&mut buf, code),
    };
    if len <= 0 {
        return String::from("unknown error");
    }
    String::from_utf8_lossy(&buf[..len as usize]).into_owned()
}

/// Whether `code` is the engine's "retry limit exceeded in match" error.
///
/// Callers use this to tell "pattern is too expensive" apart from other
/// failures. On libraries that do not define the error code the answer
/// is always `false`: the failure cannot be classified, which is not the
/// same as "no error occurred".
#[cfg(onig_retry_limit_error)]
pub fn is_retry_limit_error(code: c_int) -> bool {
    code == ffi::ONIGERR_RETRY_LIMIT_IN_MATCH_OVER
}

#[cfg(not(onig_retry_limit_error))]
pub fn is_retry_limit_error(_code: c_int) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn message_for_known_code() {
        assert_eq!(
            error_message(ffi::ONIGERR_MEMORY, None),
            "fail to memory allocation"
        );
    }

    #[test]
    fn info_ignored_for_plain_codes() {
        let info = ffi::OnigErrorInfo {
            enc: ptr::null(),
            par: ptr::null(),
            par_end: ptr::null(),
        };
        assert_eq!(
            error_message(ffi::ONIGERR_MEMORY, Some(&info)),
            error_message(ffi::ONIGERR_MEMORY, None)
        );
    }

    #[cfg(onig_retry_limit_error)]
    #[test]
    fn retry_limit_code_classified() {
        assert!(is_retry_limit_error(ffi::ONIGERR_RETRY_LIMIT_IN_MATCH_OVER));
        assert!(!is_retry_limit_error(ffi::ONIG_MISMATCH));
        assert!(!is_retry_limit_error(ffi::ONIG_NORMAL));
        assert!(!is_retry_limit_error(ffi::ONIGERR_MEMORY));
    }

    #[cfg(not(onig_retry_limit_error))]
    #[test]
    fn unclassifiable_without_the_error_code() {
        assert!(!is_retry_limit_error(-17));
        assert!(!is_retry_limit_error(ffi::ONIG_MISMATCH));
    }
}
