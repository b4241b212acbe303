//! Options controlling a rewrite

use serde::{Deserialize, Serialize};

/// Options for [`rewrite_with_options`](crate::rewrite_with_options)
///
/// The defaults match [`rewrite`](crate::rewrite) with `validate = false`:
/// malformed lines pass through and a leading byte-order mark is dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteOptions {
    /// Reject non-comment, non-blank lines that contain no `=`
    pub validate: bool,

    /// Re-emit a leading UTF-8 byte-order mark instead of dropping it
    pub keep_bom: bool,
}

impl RewriteOptions {
    /// Default options
    pub const fn new() -> Self {
        Self {
            validate: false,
            keep_bom: false,
        }
    }

    /// Default options with validation enabled
    pub const fn validating() -> Self {
        Self::new().with_validation(true)
    }

    /// Enable or disable validation of setting lines
    #[must_use]
    pub const fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Keep or drop a leading byte-order mark
    #[must_use]
    pub const fn with_keep_bom(mut self, keep_bom: bool) -> Self {
        self.keep_bom = keep_bom;
        self
    }
}
