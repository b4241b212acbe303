//! Line splitting and classification
//!
//! Settings files are plain `key=value` text. A line is either blank, a
//! `#` comment, or a setting candidate. Classification never allocates; all
//! spans borrow from the input.

/// UTF-8 byte-order mark
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Split a leading UTF-8 byte-order mark off `contents`
///
/// Returns the remaining bytes and whether a mark was present.
pub fn strip_bom(contents: &[u8]) -> (&[u8], bool) {
    match contents.strip_prefix(UTF8_BOM) {
        Some(rest) => (rest, true),
        None => (contents, false),
    }
}

/// ASCII whitespace as understood by the line parser
///
/// Includes vertical tab, unlike [`u8::is_ascii_whitespace`].
pub const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn skip_leading_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| !is_space(b))
        .unwrap_or(bytes.len());
    &bytes[start..]
}

fn skip_trailing_whitespace(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|&b| !is_space(b))
        .map_or(0, |pos| pos + 1);
    &bytes[..end]
}

/// A single line of input, without its `\n` terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number
    pub number: usize,
    /// Raw bytes of the line
    pub bytes: &'a [u8],
}

impl<'a> Line<'a> {
    /// Classify this line
    pub fn kind(&self) -> LineKind<'a> {
        classify(self.bytes)
    }
}

/// What a line contains, as far as rewriting is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace only
    Blank,
    /// Content without `=`, or a `#` with nothing after it
    Bare {
        /// Line starts with `#`
        commented: bool,
    },
    /// `key=value`, possibly behind a `#`
    Setting {
        /// Key with surrounding whitespace removed
        key: &'a [u8],
        /// Everything after the first `=`, untrimmed
        value: &'a [u8],
        /// Line starts with `#`
        commented: bool,
    },
}

/// Classify a line (without its terminator)
pub fn classify(line: &[u8]) -> LineKind<'_> {
    let mut content = skip_leading_whitespace(line);
    if content.is_empty() {
        return LineKind::Blank;
    }

    let commented = content[0] == b'#';
    if commented {
        content = skip_leading_whitespace(&content[1..]);
    }

    match content.iter().position(|&b| b == b'=') {
        Some(eq) => LineKind::Setting {
            key: skip_trailing_whitespace(&content[..eq]),
            value: &content[eq + 1..],
            commented,
        },
        None => LineKind::Bare { commented },
    }
}

/// Iterator over the lines of a settings file
///
/// A trailing line without `\n` is yielded like any other. Input ending in
/// `\n` does not produce an extra empty line.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: &'a [u8],
    number: usize,
}

impl<'a> Lines<'a> {
    /// Iterate over the lines of `contents`
    pub const fn new(contents: &'a [u8]) -> Self {
        Self {
            rest: contents,
            number: 0,
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let bytes = match self.rest.iter().position(|&b| b == b'\n') {
            Some(end) => {
                let (line, rest) = self.rest.split_at(end);
                self.rest = &rest[1..];
                line
            }
            None => std::mem::take(&mut self.rest),
        };

        self.number += 1;
        Some(Line {
            number: self.number,
            bytes,
        })
    }
}

/// Iterate over the lines of `contents`
pub const fn lines(contents: &[u8]) -> Lines<'_> {
    Lines::new(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(contents: &[u8]) -> Vec<&[u8]> {
        lines(contents).map(|line| line.bytes).collect()
    }

    #[test]
    fn test_split_lines() {
        assert!(collect(b"").is_empty());
        assert_eq!(collect(b"a"), vec![&b"a"[..]]);
        assert_eq!(collect(b"a\n"), vec![&b"a"[..]]);
        assert_eq!(collect(b"a\n\nb"), vec![&b"a"[..], &b""[..], &b"b"[..]]);
        assert_eq!(collect(b"\n"), vec![&b""[..]]);
        assert_eq!(collect(b"a\r\nb\r\n"), vec![&b"a\r"[..], &b"b\r"[..]]);
    }

    #[test]
    fn test_line_numbers() {
        let numbers: Vec<usize> = lines(b"a\n\nc\n").map(|line| line.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom(b"\xEF\xBB\xBFkey=1"), (&b"key=1"[..], true));
        assert_eq!(strip_bom(b"key=1"), (&b"key=1"[..], false));
        assert_eq!(strip_bom(b"\xEF\xBB"), (&b"\xEF\xBB"[..], false));
    }

    #[test]
    fn test_classify_blank() {
        assert_eq!(classify(b""), LineKind::Blank);
        assert_eq!(classify(b" \t\x0b\x0c\r"), LineKind::Blank);
    }

    #[test]
    fn test_classify_bare() {
        assert_eq!(
            classify(b"not-a-setting-line"),
            LineKind::Bare { commented: false }
        );
        assert_eq!(
            classify(b"# unrelated stray text"),
            LineKind::Bare { commented: true }
        );
        assert_eq!(classify(b"  #   "), LineKind::Bare { commented: true });
        assert_eq!(classify(b"#"), LineKind::Bare { commented: true });
    }

    #[test]
    fn test_classify_setting() {
        assert_eq!(
            classify(b"  name \t= some value "),
            LineKind::Setting {
                key: b"name",
                value: b" some value ",
                commented: false,
            }
        );
        assert_eq!(
            classify(b"# name = value"),
            LineKind::Setting {
                key: b"name",
                value: b" value",
                commented: true,
            }
        );
        assert_eq!(
            classify(b"a=b=c"),
            LineKind::Setting {
                key: b"a",
                value: b"b=c",
                commented: false,
            }
        );
        assert_eq!(
            classify(b"=orphan"),
            LineKind::Setting {
                key: b"",
                value: b"orphan",
                commented: false,
            }
        );
    }

    #[test]
    fn test_only_first_hash_is_skipped() {
        assert_eq!(
            classify(b"## seqn = 3136135"),
            LineKind::Setting {
                key: b"# seqn",
                value: b" 3136135",
                commented: true,
            }
        );
    }
}
