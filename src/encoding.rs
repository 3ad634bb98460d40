// encoding.rs - Safe handles for the library's encoding statics.

use std::fmt;

use crate::ffi;

/// Handle to one of the engine's built-in text encodings.
///
/// The underlying encoding tables are immutable statics owned by the C
/// library; a handle is just a pointer to one of them and is freely
/// copyable.
#[derive(Clone, Copy)]
pub struct Encoding {
    raw: ffi::OnigEncoding,
    name: &'static str,
}

impl Encoding {
    pub fn utf8() -> Encoding {
        Encoding {
            raw: unsafe { &ffi::OnigEncodingUTF8 as ffi::OnigEncoding },
            name: "UTF-8",
        }
    }

    pub fn ascii() -> Encoding {
        Encoding {
            raw: unsafe { &ffi::OnigEncodingASCII as ffi::OnigEncoding },
            name: "US-ASCII",
        }
    }

    pub fn iso_8859_1() -> Encoding {
        Encoding {
            raw: unsafe { &ffi::OnigEncodingISO_8859_1 as ffi::OnigEncoding },
            name: "ISO-8859-1",
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn as_raw(&self) -> ffi::OnigEncoding {
        self.raw
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::utf8()
    }
}

impl fmt::Debug for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Encoding").field(&self.name).finish()
    }
}
