//! Hash chain index over the sliding window.
//!
//! `head` maps a rolling hash of the bytes at a position to the most recent
//! window position with that hash. `prev` links each hashed position
//! to the occurrence that held the bucket before it, so every bucket forms a
//! singly linked list running backwards through the window.
//!
//! Entries are tagged implicitly by the sector their position falls in;
//! before a sector is overwritten, every entry pointing into it is dropped.

use crate::config::{DerivedParams, Lz77Config};
use crate::window::SlidingWindow;

/// Bucket heads and per-position back links.
#[derive(Debug, Clone)]
pub struct HashChain {
    /// Most recent position per hash bucket.
    head: Vec<Option<u32>>,
    /// Previous position with the same hash, per window position.
    prev: Vec<Option<u32>>,
    /// Bytes of lookahead mixed into each hash beyond the first.
    threshold: usize,
    /// Rolling hash shift.
    shift: u32,
    /// Hash table mask.
    hash_mask: u32,
    /// Selects the sector a position belongs to.
    sector_mask: u32,
}

impl HashChain {
    /// Create an empty index.
    pub fn new(config: &Lz77Config, derived: &DerivedParams) -> Self {
        Self {
            head: vec![None; derived.hash_size],
            prev: vec![None; derived.dictionary_size],
            threshold: config.threshold as usize,
            shift: derived.hash_shift,
            hash_mask: (derived.hash_size - 1) as u32,
            sector_mask: derived.sector_mask as u32,
        }
    }

    /// Forget every entry.
    pub fn reset(&mut self) {
        self.head.fill(None);
        self.prev.fill(None);
    }

    /// Previous occurrence recorded for `position`.
    #[inline]
    pub fn link(&self, position: usize) -> Option<usize> {
        self.prev[position].map(|p| p as usize)
    }

    /// Current head of `bucket`.
    #[inline]
    pub fn bucket_head(&self, bucket: usize) -> Option<usize> {
        self.head[bucket].map(|p| p as usize)
    }

    #[inline]
    fn mix(&self, hash: u32, byte: u8) -> u32 {
        ((hash << self.shift) ^ byte as u32) & self.hash_mask
    }

    /// Drop every entry pointing into the sector that starts at `position`.
    pub fn invalidate_sector(&mut self, position: usize) {
        let tag = position as u32;
        let mask = self.sector_mask;
        for entry in self.prev.iter_mut().chain(self.head.iter_mut()) {
            if matches!(*entry, Some(p) if p & mask == tag) {
                *entry = None;
            }
        }
    }

    /// Index `count` freshly loaded bytes starting at `position`.
    ///
    /// The last `threshold` positions lack the lookahead to be hashed; their
    /// links are cleared instead.
    pub fn hash_sector(&mut self, window: &SlidingWindow, position: usize, count: usize) {
        let t = self.threshold;
        if count <= t {
            self.prev[position..position + count].fill(None);
            return;
        }

        let end = position + count - t;
        self.prev[end..position + count].fill(None);

        // Seeded from the first two bytes whatever the threshold.
        let mut hash = self.mix(
            self.mix(0, window.byte_at(position)),
            window.byte_at(position + 1),
        );
        for i in position..end {
            hash = self.mix(hash, window.byte_at(i + t));
            let bucket = hash as usize;
            self.prev[i] = self.head[bucket];
            self.head[bucket] = Some(i as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(dictionary_bits: u8, sector_bits: u8) -> (Lz77Config, DerivedParams) {
        let config = Lz77Config::DEFAULT
            .with_dictionary_bits(dictionary_bits)
            .with_sector_bits(sector_bits);
        let derived = DerivedParams::from_config(&config);
        (config, derived)
    }

    #[test]
    fn test_repeated_run_links_backwards() {
        let (config, derived) = setup(8, 6);
        let mut window = SlidingWindow::new(&derived);
        let mut chain = HashChain::new(&config, &derived);

        let data = b"abcXabcYabcZ";
        let count = window.load_sector(0, data);
        chain.hash_sector(&window, 0, count);

        // "abc" at 0, 4, 8 shares a bucket.
        assert_eq!(chain.link(8), Some(4));
        assert_eq!(chain.link(4), Some(0));
        assert_eq!(chain.link(0), None);
    }

    #[test]
    fn test_tail_positions_unlinked() {
        let (config, derived) = setup(8, 6);
        let mut window = SlidingWindow::new(&derived);
        let mut chain = HashChain::new(&config, &derived);

        let data = [b'q'; 10];
        let count = window.load_sector(0, &data);
        chain.hash_sector(&window, 0, count);

        assert_eq!(chain.link(7), Some(6));
        assert_eq!(chain.link(8), None);
        assert_eq!(chain.link(9), None);
    }

    #[test]
    fn test_short_sector_clears_links() {
        let (config, derived) = setup(8, 6);
        let mut window = SlidingWindow::new(&derived);
        let mut chain = HashChain::new(&config, &derived);

        chain.prev[0] = Some(5);
        chain.prev[1] = Some(6);
        let count = window.load_sector(0, b"xy");
        chain.hash_sector(&window, 0, count);

        assert_eq!(chain.link(0), None);
        assert_eq!(chain.link(1), None);
    }

    #[test]
    fn test_invalidate_only_touches_target_sector() {
        // 128-byte window of four 32-byte sectors.
        let (config, derived) = setup(7, 5);
        let mut window = SlidingWindow::new(&derived);
        let mut chain = HashChain::new(&config, &derived);

        let data: Vec<u8> = b"0123456789abcdef".iter().copied().cycle().take(128).collect();
        for sector in 0..4 {
            let pos = sector * 32;
            let count = window.load_sector(pos, &data[pos..]);
            chain.hash_sector(&window, pos, count);
        }

        let before_prev = chain.prev.clone();
        let before_head = chain.head.clone();
        chain.invalidate_sector(32);

        for (after, before) in chain.prev.iter().zip(&before_prev) {
            match before {
                Some(p) if (32..64).contains(p) => assert_eq!(*after, None),
                _ => assert_eq!(after, before),
            }
        }
        for (after, before) in chain.head.iter().zip(&before_head) {
            match before {
                Some(p) if (32..64).contains(p) => assert_eq!(*after, None),
                _ => assert_eq!(after, before),
            }
        }
        // Position 80 pointed at 64, which survives.
        assert_eq!(chain.link(80), Some(64));
        // Position 48 linked to 32, inside the evicted sector.
        assert_eq!(chain.link(48), None);
        assert_eq!(before_prev[48], Some(32));
    }

    #[test]
    fn test_seed_uses_two_leading_bytes() {
        let config = Lz77Config::DEFAULT.with_threshold(3).with_sector_bits(5);
        let derived = DerivedParams::from_config(&config);
        let mut window = SlidingWindow::new(&derived);
        let mut chain = HashChain::new(&config, &derived);

        let count = window.load_sector(0, b"abcdefghij");
        chain.hash_sector(&window, 0, count);

        // 'c' is skipped by the seed; position 0 hashes "ab" then 'd'.
        assert_eq!(derived.hash_shift, 3);
        let first = chain.mix(chain.mix(chain.mix(0, b'a'), b'b'), b'd');
        assert_eq!(first, 820);
        assert_eq!(chain.bucket_head(first as usize), Some(0));
        assert_eq!(chain.bucket_head(453), Some(1));
        assert_eq!(chain.link(7), None);
    }

    #[test]
    fn test_reset() {
        let (config, derived) = setup(8, 6);
        let mut window = SlidingWindow::new(&derived);
        let mut chain = HashChain::new(&config, &derived);

        let count = window.load_sector(0, b"abababababab");
        chain.hash_sector(&window, 0, count);
        assert!(chain.link(2).is_some());

        chain.reset();
        assert!(chain.prev.iter().all(Option::is_none));
        assert!((0..derived.hash_size).all(|b| chain.bucket_head(b).is_none()));
    }
}
