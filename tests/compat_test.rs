// compat_test.rs - The version-portable entry points, exercised against
// the linked library.

use std::ptr;

use rigoni::prelude::*;
use rigoni::{compat, ffi};

fn init() {
    rigoni::initialize(&[Encoding::utf8()]).unwrap();
}

#[test]
fn initialization_reports_success() {
    assert!(rigoni::initialize(&[Encoding::utf8()]).is_ok());
}

#[test]
fn formatter_with_and_without_info_agree_on_plain_codes() {
    let info = ffi::OnigErrorInfo {
        enc: ptr::null(),
        par: ptr::null(),
        par_end: ptr::null(),
    };
    for code in [ffi::ONIGERR_MEMORY, ffi::ONIGERR_INVALID_ARGUMENT] {
        let mut without = [0u8; ffi::ONIG_MAX_ERROR_MESSAGE_LEN];
        let mut with = [0u8; ffi::ONIG_MAX_ERROR_MESSAGE_LEN];
        let len_without = compat::error_code_to_str(&mut without, code);
        let len_with = compat::error_code_with_info_to_str(&mut with, code, &info);
        assert!(len_without > 0);
        assert_eq!(len_without, len_with);
        assert_eq!(without[..len_without as usize], with[..len_with as usize]);
    }
}

#[test]
fn formatter_handles_unknown_codes() {
    let mut buf = [0u8; ffi::ONIG_MAX_ERROR_MESSAGE_LEN];
    // Not validated by the shim; the native library formats what it can.
    let len = compat::error_code_to_str(&mut buf, -9999);
    assert!(len >= 0);
}

#[cfg(onig_retry_limit_error)]
#[test]
fn retry_limit_code_classified() {
    assert!(compat::is_retry_limit_error(
        ffi::ONIGERR_RETRY_LIMIT_IN_MATCH_OVER
    ));
    assert!(!compat::is_retry_limit_error(ffi::ONIG_MISMATCH));
    assert!(!compat::is_retry_limit_error(ffi::ONIGERR_MEMORY));
    assert!(!compat::is_retry_limit_error(0));
}

#[cfg(not(onig_retry_limit_error))]
#[test]
fn retry_limit_unclassifiable_on_this_release() {
    assert!(!compat::is_retry_limit_error(-17));
}

#[cfg(onig_retry_limit)]
#[test]
fn initialization_raises_the_retry_ceiling() {
    init();
    // Stock ceiling is 10_000_000; initialize multiplies it by the
    // default factor.
    let ceiling = compat::retry_limit_in_match();
    assert_eq!(ceiling % compat::DEFAULT_RETRY_LIMIT_FACTOR, 0);
    assert!(ceiling >= compat::DEFAULT_RETRY_LIMIT_FACTOR * 10_000_000);
}

#[cfg(onig_retry_limit)]
#[test]
fn retry_ceiling_round_trips() {
    init();
    let current = compat::retry_limit_in_match();
    assert_eq!(compat::set_retry_limit_in_match(current), 0);
    assert_eq!(compat::retry_limit_in_match(), current);
}
