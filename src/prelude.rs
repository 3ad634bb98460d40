// prelude.rs - Convenient re-exports.
//
//! # Prelude
//!
//! ```
//! use rigoni::prelude::*;
//!
//! rigoni::initialize(&[Encoding::utf8()]).unwrap();
//!
//! let re = Regex::new(r"\d+").unwrap();
//! let result = re.search("answer: 42").unwrap().unwrap();
//! assert_eq!(result.as_str(), "42");
//! ```

pub use crate::encoding::Encoding;
pub use crate::error::Error;
pub use crate::gsub::validate_replacement;
pub use crate::regex::{Options, Regex, SearchResult};
pub use crate::{initialize, initialize_with_retry_limit_factor, version};
