// regex.rs - Compiled patterns and search results.
//
// RAII wrappers over the raw handles: Regex frees the compiled pattern
// on drop, SearchResult frees its region on drop. Capture-group numbers
// for a name are resolved through the library once and cached per regex.

use std::cell::RefCell;
use std::collections::HashMap;
use std::os::raw::c_int;
use std::ptr;

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::encoding::Encoding;
use crate::error::Error;
use crate::ffi;

bitflags! {
    /// Compile-time option bits, mirroring the library's `ONIG_OPTION_*`
    /// constants.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Options: ffi::OnigOptionType {
        const IGNORECASE = ffi::ONIG_OPTION_IGNORECASE;
        const EXTEND = ffi::ONIG_OPTION_EXTEND;
        const MULTILINE = ffi::ONIG_OPTION_MULTILINE;
        const SINGLELINE = ffi::ONIG_OPTION_SINGLELINE;
        const FIND_LONGEST = ffi::ONIG_OPTION_FIND_LONGEST;
        const FIND_NOT_EMPTY = ffi::ONIG_OPTION_FIND_NOT_EMPTY;
        const NEGATE_SINGLELINE = ffi::ONIG_OPTION_NEGATE_SINGLELINE;
        const DONT_CAPTURE_GROUP = ffi::ONIG_OPTION_DONT_CAPTURE_GROUP;
        const CAPTURE_GROUP = ffi::ONIG_OPTION_CAPTURE_GROUP;
    }
}

impl Default for Options {
    fn default() -> Self {
        Options::empty()
    }
}

/// A compiled regular expression.
///
/// The matching engine itself is not thread-safe; keep a `Regex` and its
/// results on a single thread.
///
/// # Examples
///
/// ```
/// use rigoni::prelude::*;
///
/// rigoni::initialize(&[Encoding::utf8()]).unwrap();
///
/// let re = Regex::new(r"(?<num>\d+)").unwrap();
/// let result = re.search("answer: 42").unwrap().unwrap();
/// assert_eq!(result.named_group("num").unwrap(), "42");
/// ```
pub struct Regex {
    raw: ffi::OnigRegex,
    cached_group_numbers: RefCell<HashMap<String, SmallVec<[c_int; 4]>>>,
}

impl Regex {
    /// Compile `pattern` with default options, UTF-8, default syntax.
    pub fn new(pattern: &str) -> Result<Regex, Error> {
        Self::with_options_and_encoding(pattern, Options::default(), Encoding::default())
    }

    /// Compile `pattern` with explicit options, UTF-8.
    pub fn with_options(pattern: &str, options: Options) -> Result<Regex, Error> {
        Self::with_options_and_encoding(pattern, options, Encoding::default())
    }

    /// Compile `pattern` with explicit options and encoding.
    pub fn with_options_and_encoding(
        pattern: &str,
        options: Options,
        encoding: Encoding,
    ) -> Result<Regex, Error> {
        let bytes = pattern.as_bytes();
        let mut raw: ffi::OnigRegex = ptr::null_mut();
        let mut einfo = ffi::OnigErrorInfo {
            enc: ptr::null(),
            par: ptr::null(),
            par_end: ptr::null(),
        };
        let r = unsafe {
            ffi::onig_new(
                &mut raw,
                bytes.as_ptr(),
                bytes.as_ptr().add(bytes.len()),
                options.bits(),
                encoding.as_raw(),
                ffi::OnigDefaultSyntax,
                &mut einfo,
            )
        };
        if r != ffi::ONIG_NORMAL {
            return Err(Error::syntax(r, &einfo));
        }
        Ok(Regex {
            raw,
            cached_group_numbers: RefCell::new(HashMap::new()),
        })
    }

    /// Whether the pattern defines a capture group with this name.
    pub fn has_capture_group(&self, name: &str) -> bool {
        self.group_numbers(name).is_ok()
    }

    /// Search `input` for the first match.
    ///
    /// `Ok(None)` means no match; `Err` is a failure inside the engine,
    /// including the retry-limit abort (see [`Error::is_retry_limit`]).
    pub fn search<'r, 't>(&'r self, input: &'t str) -> Result<Option<SearchResult<'r, 't>>, Error> {
        self.search_from(input, 0)
    }

    /// Search `input` starting at byte offset `from`.
    pub fn search_from<'r, 't>(
        &'r self,
        input: &'t str,
        from: usize,
    ) -> Result<Option<SearchResult<'r, 't>>, Error> {
        let bytes = input.as_bytes();
        if from > bytes.len() {
            return Ok(None);
        }
        let region = unsafe { ffi::onig_region_new() };
        let r = unsafe {
            ffi::onig_search(
                self.raw,
                bytes.as_ptr(),
                bytes.as_ptr().add(bytes.len()),
                bytes.as_ptr().add(from),
                bytes.as_ptr().add(bytes.len()),
                region,
                ffi::ONIG_OPTION_NONE,
            )
        };
        if r >= 0 {
            return Ok(Some(SearchResult {
                regex: self,
                input,
                region,
            }));
        }
        unsafe { ffi::onig_region_free(region, 1) };
        if r == ffi::ONIG_MISMATCH {
            Ok(None)
        } else {
            Err(Error::from_search_code(r))
        }
    }

    /// All group numbers registered for `name`. A name may map to several
    /// groups when the syntax allows multiplex definitions.
    fn group_numbers(&self, name: &str) -> Result<SmallVec<[c_int; 4]>, Error> {
        if let Some(nums) = self.cached_group_numbers.borrow().get(name) {
            return Ok(nums.clone());
        }
        let bytes = name.as_bytes();
        let mut nums: *mut c_int = ptr::null_mut();
        let n = unsafe {
            ffi::onig_name_to_group_numbers(
                self.raw,
                bytes.as_ptr(),
                bytes.as_ptr().add(bytes.len()),
                &mut nums,
            )
        };
        if n <= 0 {
            return Err(Error::no_such_group(name));
        }
        let found: SmallVec<[c_int; 4]> =
            unsafe { std::slice::from_raw_parts(nums, n as usize) }
                .iter()
                .copied()
                .collect();
        self.cached_group_numbers
            .borrow_mut()
            .insert(name.to_string(), found.clone());
        Ok(found)
    }
}

impl Drop for Regex {
    fn drop(&mut self) {
        unsafe { ffi::onig_free(self.raw) }
    }
}

impl std::fmt::Debug for Regex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Regex").finish_non_exhaustive()
    }
}

/// A successful match, borrowing the searched input.
///
/// Group 0 is the entire match. Named lookup follows the multiplex rule:
/// the first participating, non-empty group registered for the name
/// wins; if none is non-empty the result is `""`.
pub struct SearchResult<'r, 't> {
    regex: &'r Regex,
    input: &'t str,
    region: *mut ffi::OnigRegion,
}

impl<'r, 't> SearchResult<'r, 't> {
    /// Byte offset of the start of the match.
    pub fn start(&self) -> usize {
        self.positions(0).map_or(0, |(beg, _)| beg as usize)
    }

    /// Byte offset of the end of the match (exclusive).
    pub fn end(&self) -> usize {
        self.positions(0).map_or(0, |(_, end)| end as usize)
    }

    /// The full matched text.
    pub fn as_str(&self) -> &'t str {
        self.input.get(self.start()..self.end()).unwrap_or("")
    }

    /// Text of capture group `n`. Group 0 is the entire match.
    ///
    /// A group that did not participate in the match yields `""`; a
    /// number the pattern does not have is an error.
    pub fn group(&self, n: usize) -> Result<&'t str, Error> {
        let (beg, end) = self
            .positions(n)
            .ok_or_else(|| Error::no_such_group(n.to_string()))?;
        self.slice(beg, end)
    }

    /// Text of the first non-empty capture group named `name`.
    ///
    /// Yields `""` when every group registered for the name is empty or
    /// did not participate; an unknown name is an error.
    pub fn named_group(&self, name: &str) -> Result<&'t str, Error> {
        let nums = self.regex.group_numbers(name)?;
        for &num in &nums {
            let text = self.group(num as usize)?;
            if !text.is_empty() {
                return Ok(text);
            }
        }
        Ok("")
    }

    fn positions(&self, group: usize) -> Option<(c_int, c_int)> {
        let region = unsafe { &*self.region };
        if group >= region.num_regs as usize {
            return None;
        }
        let beg = unsafe { *region.beg.add(group) };
        let end = unsafe { *region.end.add(group) };
        Some((beg, end))
    }

    fn slice(&self, beg: c_int, end: c_int) -> Result<&'t str, Error> {
        if beg == ffi::ONIG_REGION_NOTPOS && end == ffi::ONIG_REGION_NOTPOS {
            // optional capture, like (x)?, that did not participate
            return Ok("");
        }
        if beg < 0 || beg > end || end as usize > self.input.len() {
            return Err(Error::internal(format!(
                "capture group region [{}:{}] out of bounds",
                beg, end
            )));
        }
        if beg == end {
            return Ok("");
        }
        self.input
            .get(beg as usize..end as usize)
            .ok_or_else(|| {
                Error::internal(format!(
                    "capture group region [{}:{}] splits a character",
                    beg, end
                ))
            })
    }
}

impl Drop for SearchResult<'_, '_> {
    fn drop(&mut self) {
        unsafe { ffi::onig_region_free(self.region, 1) }
    }
}

impl std::fmt::Debug for SearchResult<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchResult")
            .field("start", &self.start())
            .field("end", &self.end())
            .finish_non_exhaustive()
    }
}
