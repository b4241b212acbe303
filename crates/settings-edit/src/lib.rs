//! Comment-preserving editor for `key=value` settings files
//!
//! This crate updates selected settings in an existing file without touching
//! anything else: comments, blank lines, spacing and unknown keys come out
//! byte-for-byte as they went in.
//!
//! # File Format
//!
//! - One setting per line: `key = value`. The key is trimmed, the value is
//!   everything after the first `=`.
//! - Lines whose first non-whitespace character is `#` are comments.
//! - Blank lines are allowed anywhere.
//! - A leading UTF-8 byte-order mark is skipped.
//!
//! # Rewriting
//!
//! A matched line is replaced by `key=value`; keys that were not found are
//! appended to the end of the file in the order they were requested. Every
//! output line ends with `\n`.
//!
//! ```
//! use settings_edit::rewrite_str;
//!
//! let input = "# Display\nwidth = 80\n\n# height = 24\n";
//! let output = rewrite_str(input, &[("height", "50"), ("depth", "8")], true)?;
//! assert_eq!(output, "# Display\nwidth = 80\n\nheight=50\ndepth=8\n");
//! # Ok::<(), settings_edit::RewriteError>(())
//! ```
//!
//! Note that a commented-out setting whose key matches is replaced as well,
//! which un-comments it.

#![warn(missing_docs)]

mod buffer;
mod error;
pub mod line;
mod options;
mod rewrite;

pub use buffer::LineBuffer;
pub use error::RewriteError;
pub use options::RewriteOptions;
pub use rewrite::{RewriteStats, Rewritten, Settings, rewrite, rewrite_str, rewrite_with_options};

/// Result type for settings rewriting
pub type Result<T> = std::result::Result<T, RewriteError>;
