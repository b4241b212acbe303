//! Single-pass settings rewriter
//!
//! The rewriter walks the input once. Each line whose key matches a requested
//! pair is replaced by `key=value`; every other line is copied unchanged.
//! Requested keys that never matched are appended at the end, in request
//! order.

use tracing::{debug, trace};

use crate::buffer::LineBuffer;
use crate::line::{LineKind, UTF8_BOM, lines, strip_bom};
use crate::options::RewriteOptions;
use crate::{Result, RewriteError};

/// Counters collected during a rewrite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Lines read from the input
    pub lines: usize,
    /// Lines replaced in place
    pub replaced: usize,
    /// Settings appended after the original content
    pub appended: usize,
}

/// Output of a successful rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    contents: Vec<u8>,
    stats: RewriteStats,
}

impl Rewritten {
    /// Rewritten file contents
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Take the rewritten file contents
    pub fn into_contents(self) -> Vec<u8> {
        self.contents
    }

    /// Size of the rewritten contents in bytes
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Whether the rewritten contents are empty
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Counters for this rewrite
    pub const fn stats(&self) -> RewriteStats {
        self.stats
    }
}

impl AsRef<[u8]> for Rewritten {
    fn as_ref(&self) -> &[u8] {
        &self.contents
    }
}

/// Set `pairs` in `contents`
///
/// With `validate` set, a line that is neither blank, a comment, nor contains
/// `=` fails the whole rewrite with [`RewriteError::MissingValue`].
///
/// # Example
///
/// ```
/// use settings_edit::rewrite;
///
/// let input = b"# window\nwidth = 80\nheight = 24";
/// let output = rewrite(input, &[("height", "50"), ("title", "demo")], true)?;
/// assert_eq!(output.contents(), b"# window\nwidth = 80\nheight=50\ntitle=demo\n");
/// # Ok::<(), settings_edit::RewriteError>(())
/// ```
pub fn rewrite<K, V>(contents: &[u8], pairs: &[(K, V)], validate: bool) -> Result<Rewritten>
where
    K: AsRef<[u8]>,
    V: AsRef<[u8]>,
{
    rewrite_with_options(
        contents,
        pairs,
        &RewriteOptions::new().with_validation(validate),
    )
}

/// Text variant of [`rewrite`]
///
/// The output is always valid UTF-8 since it is spliced together from the
/// input and the requested pairs at line boundaries.
pub fn rewrite_str<K, V>(contents: &str, pairs: &[(K, V)], validate: bool) -> Result<String>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let pairs: Vec<(&[u8], &[u8])> = pairs
        .iter()
        .map(|(key, value)| (key.as_ref().as_bytes(), value.as_ref().as_bytes()))
        .collect();

    let output = rewrite(contents.as_bytes(), &pairs, validate)?.into_contents();
    Ok(match String::from_utf8(output) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

/// Set `pairs` in `contents` using explicit options
pub fn rewrite_with_options<K, V>(
    contents: &[u8],
    pairs: &[(K, V)],
    options: &RewriteOptions,
) -> Result<Rewritten>
where
    K: AsRef<[u8]>,
    V: AsRef<[u8]>,
{
    let (body, had_bom) = strip_bom(contents);
    let keep_bom = had_bom && options.keep_bom;

    let mut out = LineBuffer::with_capacity(if keep_bom { contents.len() } else { body.len() })?;
    if keep_bom {
        out.append(UTF8_BOM)?;
    }

    let mut written = vec![false; pairs.len()];
    let mut stats = RewriteStats::default();

    for line in lines(body) {
        stats.lines += 1;

        let key = match line.kind() {
            LineKind::Blank | LineKind::Bare { commented: true } => None,
            LineKind::Bare { commented: false } if options.validate => {
                return Err(RewriteError::MissingValue {
                    key: String::from_utf8_lossy(line.bytes).into_owned(),
                    line: line.number,
                });
            }
            LineKind::Bare { commented: false } => None,
            // Commented settings are matched too and lose their `#`
            LineKind::Setting { key, .. } => Some(key),
        };

        match key.and_then(|key| find_pair(pairs, key)) {
            Some(index) => {
                let (key, value) = &pairs[index];
                trace!(
                    "Replacing line {}: '{}'",
                    line.number,
                    String::from_utf8_lossy(key.as_ref())
                );
                out.append_setting(key.as_ref(), value.as_ref())?;
                written[index] = true;
                stats.replaced += 1;
            }
            None => out.append_line(line.bytes)?,
        }
    }

    for ((key, value), _) in pairs.iter().zip(&written).filter(|(_, written)| !**written) {
        trace!("Appending '{}'", String::from_utf8_lossy(key.as_ref()));
        out.append_setting(key.as_ref(), value.as_ref())?;
        stats.appended += 1;
    }

    debug!(
        "Rewrote {} lines ({} replaced, {} appended, bom {}), {} -> {} bytes",
        stats.lines,
        stats.replaced,
        stats.appended,
        if had_bom && !keep_bom { "dropped" } else { "kept" },
        contents.len(),
        out.len()
    );

    Ok(Rewritten {
        contents: out.into_vec(),
        stats,
    })
}

/// Index of the first pair whose key equals `key`
fn find_pair<K, V>(pairs: &[(K, V)], key: &[u8]) -> Option<usize>
where
    K: AsRef<[u8]>,
{
    pairs.iter().position(|(candidate, _)| candidate.as_ref() == key)
}

/// Ordered set of settings to apply to a file
///
/// ```
/// use settings_edit::{RewriteOptions, Settings};
///
/// let mut settings = Settings::new();
/// settings.set("volume", "7").set("muted", "false");
///
/// let output = settings.apply(b"volume = 3\n", &RewriteOptions::default())?;
/// assert_eq!(output.contents(), b"volume=7\nmuted=false\n");
/// # Ok::<(), settings_edit::RewriteError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pairs: Vec<(Vec<u8>, Vec<u8>)>,
}

impl Settings {
    /// Create an empty set
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Add a setting
    ///
    /// Keys are not deduplicated; a repeated key is appended as its own slot.
    pub fn set(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Number of settings
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no settings were added
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Settings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_slice(), value.as_slice()))
    }

    /// Apply the settings to `contents`
    pub fn apply(&self, contents: &[u8], options: &RewriteOptions) -> Result<Rewritten> {
        rewrite_with_options(contents, &self.pairs, options)
    }
}

impl<K, V> FromIterator<(K, V)> for Settings
where
    K: Into<Vec<u8>>,
    V: Into<Vec<u8>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
