//! Syntax errors shared by the host and embedded parsers
//!
//! Every error carries a categorized [`ErrorCode`], an optional hint and
//! any related locations (e.g. where an unclosed `{` was opened).

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::{RelatedInfo, SyntaxError, SyntaxErrorBuilder};
