// error.rs - Crate error type.
//
// Groups the library's i32 error codes into semantic variants while
// preserving the original code for interop. Messages are rendered once,
// at construction, through the fixed-arity formatters in crate::compat.

use std::fmt;
use std::os::raw::c_int;

use crate::compat;
use crate::ffi;

/// Error type for compilation, searching and substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pattern failed to compile. The message includes extended
    /// error context (e.g. the offending group name) where the library
    /// provides it.
    Syntax { code: i32, message: String },
    /// A match attempt exceeded the engine's retry ceiling: the pattern
    /// is too expensive for the configured limit, not malformed.
    RetryLimitExceeded { code: i32 },
    /// Any other failure reported by the native library.
    Library { code: i32, message: String },
    /// A capture group name or number that does not exist in the pattern.
    NoSuchCaptureGroup { group: String },
    /// Invalid replacement string passed to a substitution.
    Replacement { message: String },
    /// The native library returned impossible region geometry.
    Internal { message: String },
}

impl Error {
    pub(crate) fn syntax(code: c_int, info: &ffi::OnigErrorInfo) -> Error {
        Error::Syntax {
            code,
            message: compat::error_message(code, Some(info)),
        }
    }

    pub(crate) fn library(code: c_int) -> Error {
        Error::Library {
            code,
            message: compat::error_message(code, None),
        }
    }

    /// Classify a negative `onig_search` result.
    pub(crate) fn from_search_code(code: c_int) -> Error {
        if compat::is_retry_limit_error(code) {
            Error::RetryLimitExceeded { code }
        } else {
            Error::library(code)
        }
    }

    pub(crate) fn no_such_group(group: impl Into<String>) -> Error {
        Error::NoSuchCaptureGroup {
            group: group.into(),
        }
    }

    pub(crate) fn replacement(message: impl Into<String>) -> Error {
        Error::Replacement {
            message: message.into(),
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Error {
        Error::Internal {
            message: message.into(),
        }
    }

    /// The native error code, where one exists.
    pub fn code(&self) -> Option<i32> {
        match self {
            Error::Syntax { code, .. }
            | Error::RetryLimitExceeded { code }
            | Error::Library { code, .. } => Some(*code),
            Error::NoSuchCaptureGroup { .. }
            | Error::Replacement { .. }
            | Error::Internal { .. } => None,
        }
    }

    /// Whether this is the "retry limit exceeded in match" failure.
    ///
    /// `true` means the pattern ran out of backtracking budget; callers
    /// typically fall back to a cheaper pattern or report the input as
    /// unmatchable rather than treating it as a hard error.
    pub fn is_retry_limit(&self) -> bool {
        matches!(self, Error::RetryLimitExceeded { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax { message, .. } => write!(f, "syntax error: {}", message),
            Error::RetryLimitExceeded { .. } => write!(f, "retry-limit-in-match over"),
            Error::Library { message, .. } => write!(f, "{}", message),
            Error::NoSuchCaptureGroup { group } => {
                write!(f, "{}: no such capture group in pattern", group)
            }
            Error::Replacement { message } => {
                write!(f, "syntax error in replacement string: {}", message)
            }
            Error::Internal { message } => write!(f, "internal error: {}", message),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_limit_classification() {
        let err = Error::RetryLimitExceeded { code: -17 };
        assert!(err.is_retry_limit());
        assert_eq!(err.code(), Some(-17));
        assert_eq!(err.to_string(), "retry-limit-in-match over");
    }

    #[test]
    fn other_variants_are_not_retry_limit() {
        assert!(!Error::library(ffi::ONIGERR_MEMORY).is_retry_limit());
        assert!(!Error::no_such_group("user").is_retry_limit());
        assert!(!Error::replacement("invalid escape sequence").is_retry_limit());
    }

    #[test]
    fn no_such_group_display() {
        let err = Error::no_such_group("val");
        assert_eq!(err.to_string(), "val: no such capture group in pattern");
        assert_eq!(err.code(), None);
    }

    #[test]
    fn library_error_carries_native_message() {
        let err = Error::library(ffi::ONIGERR_MEMORY);
        assert_eq!(err.code(), Some(ffi::ONIGERR_MEMORY));
        assert_eq!(err.to_string(), "fail to memory allocation");
    }

    #[cfg(onig_retry_limit_error)]
    #[test]
    fn search_code_classification() {
        let err = Error::from_search_code(ffi::ONIGERR_RETRY_LIMIT_IN_MATCH_OVER);
        assert!(err.is_retry_limit());
        let err = Error::from_search_code(ffi::ONIGERR_MEMORY);
        assert!(!err.is_retry_limit());
    }

    #[test]
    fn error_trait_object() {
        let err: Box<dyn std::error::Error> = Box::new(Error::no_such_group("x"));
        assert!(err.to_string().contains("no such capture group"));
    }
}
