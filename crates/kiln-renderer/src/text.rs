//! Reusable scratch storage for text runs
//!
//! The layout engine hands over text as a byte slice with an explicit length.
//! The shaper wants a null-terminated string, so every run is copied into a
//! fixed buffer first. Runs that do not fit are cut at the buffer boundary,
//! and runs with an embedded NUL end there; either cut is reported back
//! instead of being silent.

use kiln_core::types::Dimensions;
use serde::Serialize;
use std::ffi::CStr;

/// Fixed-capacity, null-terminated copy of the text run being shaped
pub struct TextScratch {
    buffer: Box<[u8]>,
}

/// A run materialized in a [`TextScratch`]. Valid until the next load.
#[derive(Debug, Clone, Copy)]
pub struct ScratchText<'s> {
    pub text: &'s CStr,
    /// Bytes of the incoming run that were not copied
    pub dropped: usize,
}

impl ScratchText<'_> {
    pub fn truncated(&self) -> bool {
        self.dropped > 0
    }
}

impl TextScratch {
    /// Create a buffer of `capacity` bytes, terminator included.
    ///
    /// A capacity below two is raised to two so at least one byte fits.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0; capacity.max(2)].into_boxed_slice(),
        }
    }

    /// Total size in bytes, terminator included
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Longest run that is copied without truncation
    pub fn max_text_len(&self) -> usize {
        self.buffer.len() - 1
    }

    /// Copy `text` into the buffer and terminate it.
    ///
    /// The copy stops at the first embedded NUL or at the buffer capacity,
    /// whichever comes first; everything after that point counts as dropped.
    pub fn load(&mut self, text: &[u8]) -> ScratchText<'_> {
        let len = text
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(text.len())
            .min(self.max_text_len());
        self.buffer[..len].copy_from_slice(&text[..len]);
        self.buffer[len] = 0;

        ScratchText {
            text: CStr::from_bytes_until_nul(&self.buffer[..=len]).unwrap_or_default(),
            dropped: text.len() - len,
        }
    }
}

impl std::fmt::Debug for TextScratch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextScratch")
            .field("capacity", &self.buffer.len())
            .finish()
    }
}

/// Result of measuring a text run for the layout engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextMeasurement {
    pub dimensions: Dimensions,
    /// The run was longer than the scratch buffer and only its prefix was measured
    pub truncated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_terminates() {
        let mut scratch = TextScratch::new(16);
        let loaded = scratch.load(b"hello");
        assert_eq!(loaded.text.to_bytes(), b"hello");
        assert!(!loaded.truncated());
    }

    #[test]
    fn test_reuse_overwrites_previous_run() {
        let mut scratch = TextScratch::new(16);
        scratch.load(b"a longer string");
        let loaded = scratch.load(b"short");
        assert_eq!(loaded.text.to_bytes(), b"short");
    }

    #[test]
    fn test_truncates_at_capacity() {
        let mut scratch = TextScratch::new(8);
        assert_eq!(scratch.max_text_len(), 7);

        let exact = scratch.load(b"1234567");
        assert_eq!(exact.text.to_bytes(), b"1234567");
        assert!(!exact.truncated());

        let over = scratch.load(b"123456789");
        assert_eq!(over.text.to_bytes(), b"1234567");
        assert_eq!(over.dropped, 2);
        assert!(over.truncated());
    }

    #[test]
    fn test_default_capacity_boundary() {
        let mut scratch = TextScratch::new(4096);
        let long = vec![b'x'; 5000];
        let loaded = scratch.load(&long);
        assert_eq!(loaded.text.to_bytes().len(), 4095);
        assert_eq!(loaded.dropped, 905);
    }

    #[test]
    fn test_embedded_nul_ends_the_string() {
        let mut scratch = TextScratch::new(16);
        let loaded = scratch.load(b"ab\0cd");
        assert_eq!(loaded.text.to_bytes(), b"ab");
        assert_eq!(loaded.dropped, 3);
        assert!(loaded.truncated());

        let trailing = scratch.load(b"abc\0");
        assert_eq!(trailing.text.to_bytes(), b"abc");
        assert_eq!(trailing.dropped, 1);
    }

    #[test]
    fn test_empty_run() {
        let mut scratch = TextScratch::new(4);
        assert!(scratch.load(b"").text.to_bytes().is_empty());
        assert_eq!(TextScratch::new(0).capacity(), 2);
    }
}
