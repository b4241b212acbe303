//! Append-only output buffer for rewritten settings files
//!
//! Rewritten files are assembled line by line into a single [`LineBuffer`].
//! Growth doubles the capacity so that appending `n` bytes in total costs
//! O(n) copies regardless of how small the individual appends are.

use crate::Result;

/// Growable byte buffer with line-oriented append helpers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    data: Vec<u8>,
}

impl LineBuffer {
    /// Create an empty buffer able to hold `capacity` bytes without growing
    ///
    /// A capacity of zero is allowed; the first append allocates.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)?;
        Ok(Self { data })
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current capacity in bytes
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// View the written bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Take ownership of the written bytes
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Append a byte span
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_capacity(self.data.len().saturating_add(bytes.len()))?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Append a byte span followed by a single `\n`
    pub fn append_line(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_capacity(self.data.len().saturating_add(bytes.len()).saturating_add(1))?;
        self.data.extend_from_slice(bytes);
        self.data.push(b'\n');
        Ok(())
    }

    /// Append a single byte
    pub fn append_char(&mut self, byte: u8) -> Result<()> {
        self.ensure_capacity(self.data.len().saturating_add(1))?;
        self.data.push(byte);
        Ok(())
    }

    /// Append a `key=value` line
    pub fn append_setting(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.append(key)?;
        self.append_char(b'=')?;
        self.append_line(value)
    }

    /// Grow to at least `required` bytes, doubling the current capacity
    fn ensure_capacity(&mut self, required: usize) -> Result<()> {
        let capacity = self.data.capacity();
        if capacity >= required {
            return Ok(());
        }

        let target = capacity.saturating_mul(2).saturating_add(1).max(required);
        self.data.try_reserve_exact(target - self.data.len())?;
        Ok(())
    }
}

impl AsRef<[u8]> for LineBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<LineBuffer> for Vec<u8> {
    fn from(buffer: LineBuffer) -> Self {
        buffer.into_vec()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity() {
        let mut buffer = LineBuffer::with_capacity(0).unwrap();
        assert!(buffer.is_empty());

        buffer.append(b"abc").unwrap();
        assert_eq!(buffer.as_bytes(), b"abc");
        assert!(buffer.capacity() >= 3);
    }

    #[test]
    fn test_append_line_adds_newline() {
        let mut buffer = LineBuffer::with_capacity(4).unwrap();
        buffer.append_line(b"one").unwrap();
        buffer.append_line(b"").unwrap();
        buffer.append_line(b"two").unwrap();
        assert_eq!(buffer.as_bytes(), b"one\n\ntwo\n");
        assert_eq!(buffer.len(), 9);
    }

    #[test]
    fn test_append_setting() {
        let mut buffer = LineBuffer::default();
        buffer.append_setting(b"name", b" value ").unwrap();
        buffer.append_setting(b"empty", b"").unwrap();
        assert_eq!(buffer.into_vec(), b"name= value \nempty=\n".to_vec());
    }

    #[test]
    fn test_growth_doubles() {
        let mut buffer = LineBuffer::with_capacity(8).unwrap();
        let initial = buffer.capacity();
        assert!(initial >= 8);
        buffer.append(&vec![0u8; initial]).unwrap();
        assert_eq!(buffer.capacity(), initial);

        buffer.append_char(1).unwrap();
        assert!(buffer.capacity() >= 2 * initial + 1);
        assert_eq!(buffer.len(), initial + 1);
    }

    #[test]
    fn test_growth_to_required_when_larger() {
        let mut buffer = LineBuffer::with_capacity(2).unwrap();
        buffer.append(&[7u8; 100]).unwrap();
        assert!(buffer.capacity() >= 100);
        assert_eq!(buffer.as_bytes(), &[7u8; 100][..]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Many small appends yield the concatenation of every chunk
            #[test]
            fn appends_concatenate(
                initial in 0usize..16,
                chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..8), 0..200)
            ) {
                let mut buffer = LineBuffer::with_capacity(initial).unwrap();
                let mut expected = Vec::new();
                for chunk in &chunks {
                    buffer.append(chunk).unwrap();
                    expected.extend_from_slice(chunk);
                }

                prop_assert_eq!(buffer.len(), expected.len());
                prop_assert!(buffer.capacity() >= buffer.len());
                prop_assert_eq!(buffer.into_vec(), expected);
            }

            /// Single-byte appends across many growth steps
            #[test]
            fn single_bytes_accumulate(initial in 0usize..4, count in 0usize..2048) {
                let mut buffer = LineBuffer::with_capacity(initial).unwrap();
                for i in 0..count {
                    buffer.append_char((i % 251) as u8).unwrap();
                }

                prop_assert_eq!(buffer.len(), count);
                let expected: Vec<u8> = (0..count).map(|i| (i % 251) as u8).collect();
                prop_assert_eq!(buffer.as_bytes(), &expected[..]);
            }
        }
    }
}
