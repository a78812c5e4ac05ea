//! Sliding dictionary window.
//!
//! The window is a fixed arena of `dictionary_size + max_match` bytes:
//!
//! ```text
//! 0                                   dictionary_size     + max_match
//! ┌──────────────────────────────────────────┬──────────────┐
//! │ addressable window (positions wrap here) │ mirror of 0..│
//! └──────────────────────────────────────────┴──────────────┘
//! ```
//!
//! The tail mirrors the first `max_match` bytes of the window. It is
//! refreshed whenever sector 0 is (re)loaded, so a forward comparison that
//! starts anywhere in the window can read `max_match` bytes without wrapping.

use crate::config::DerivedParams;

/// Fixed-capacity byte arena backing the dictionary.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    /// Window bytes followed by the mirror region.
    data: Vec<u8>,
    /// Addressable window size (power of two).
    size: usize,
    /// Sector size used by `load_sector`.
    sector_size: usize,
    /// Length of the mirror region.
    mirror_len: usize,
}

impl SlidingWindow {
    /// Create a zeroed window for the given parameters.
    pub fn new(derived: &DerivedParams) -> Self {
        Self {
            data: vec![0; derived.dictionary_size + derived.max_match],
            size: derived.dictionary_size,
            sector_size: derived.sector_size,
            mirror_len: derived.max_match,
        }
    }

    /// Zero the whole arena.
    pub fn reset(&mut self) {
        self.data.fill(0);
    }

    /// Addressable window size.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Structural capacity: window plus mirror.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Wrap a position into the window.
    #[inline]
    pub fn wrap(&self, position: usize) -> usize {
        position & (self.size - 1)
    }

    /// Byte at an arena index (window or mirror).
    #[inline]
    pub fn byte_at(&self, index: usize) -> u8 {
        self.data[index]
    }

    /// Store a byte at a window position.
    #[inline]
    pub fn set_byte(&mut self, position: usize, byte: u8) {
        self.data[position] = byte;
    }

    /// The addressable window followed by the mirror.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Number of equal bytes at `a` and `b`, scanning at most `limit` bytes.
    ///
    /// Both runs may extend into the mirror but never past it.
    #[inline]
    pub fn common_prefix(&self, a: usize, b: usize, limit: usize) -> usize {
        self.data[a..a + limit]
            .iter()
            .zip(&self.data[b..b + limit])
            .take_while(|(x, y)| x == y)
            .count()
    }

    /// Copy the next sector of `source` into the window at `position`.
    ///
    /// Copies `min(sector_size, source.len())` bytes and returns that count;
    /// 0 means the source is exhausted. Loading at position 0 also refreshes
    /// the mirror.
    pub fn load_sector(&mut self, position: usize, source: &[u8]) -> usize {
        let count = self.sector_size.min(source.len());
        if count == 0 {
            return 0;
        }

        self.data[position..position + count].copy_from_slice(&source[..count]);
        if position == 0 {
            self.data.copy_within(0..self.mirror_len, self.size);
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Lz77Config;

    fn small_window() -> SlidingWindow {
        // 64-byte window, 32-byte sectors, max match 17.
        let config = Lz77Config::DEFAULT
            .with_dictionary_bits(6)
            .with_sector_bits(5);
        SlidingWindow::new(&DerivedParams::from_config(&config))
    }

    #[test]
    fn test_layout() {
        let window = small_window();
        assert_eq!(window.size(), 64);
        assert_eq!(window.capacity(), 64 + 17);
        assert_eq!(window.wrap(64), 0);
        assert_eq!(window.wrap(70), 6);
    }

    #[test]
    fn test_load_sector_partial_and_exhausted() {
        let mut window = small_window();
        let source: Vec<u8> = (0..40).collect();

        assert_eq!(window.load_sector(0, &source), 32);
        assert_eq!(window.load_sector(32, &source[32..]), 8);
        assert_eq!(window.load_sector(0, &source[40..]), 0);
        assert_eq!(&window.as_slice()[..40], &source[..]);
    }

    #[test]
    fn test_load_at_zero_refreshes_mirror() {
        let mut window = small_window();
        let first: Vec<u8> = (100..132).collect();
        window.load_sector(0, &first);
        assert_eq!(&window.as_slice()[64..], &first[..17]);

        // Loading elsewhere leaves the mirror alone.
        window.load_sector(32, &[0xEE; 32]);
        assert_eq!(&window.as_slice()[64..], &first[..17]);

        let second = [7u8; 32];
        window.load_sector(0, &second);
        assert_eq!(&window.as_slice()[64..], &second[..17]);
    }

    #[test]
    fn test_common_prefix_reads_mirror() {
        let mut window = small_window();
        let data: Vec<u8> = (0..64).map(|i| (i % 8) as u8).collect();
        window.load_sector(32, &data[32..]);
        window.load_sector(0, &data[..32]);

        // Position 56 runs off the window end into the mirror of 0..
        assert_eq!(window.common_prefix(56, 0, 17), 17);
        assert_eq!(window.common_prefix(57, 0, 17), 0);
    }
}
