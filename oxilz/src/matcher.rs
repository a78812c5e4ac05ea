//! Longest-match search along a hash chain.

use crate::config::{DerivedParams, Lz77Config};
use crate::hash_chain::HashChain;
use crate::window::SlidingWindow;

/// A match found in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Number of matching bytes.
    pub length: usize,
    /// Window position the match starts at.
    pub position: usize,
}

/// Bounded hash-chain walker.
#[derive(Debug, Clone, Copy)]
pub struct MatchFinder {
    max_comparisons: u32,
    max_match: usize,
}

impl MatchFinder {
    /// Create a finder for the given parameters.
    pub fn new(config: &Lz77Config, derived: &DerivedParams) -> Self {
        Self {
            max_comparisons: config.max_comparisons,
            max_match: derived.max_match,
        }
    }

    /// Find a match at `position` strictly longer than `initial_length`.
    ///
    /// Walks at most `max_comparisons` links back from `position`. A
    /// candidate is first checked at the single byte that would extend the
    /// current best; only if that byte agrees is the full run compared.
    /// Later candidates must be strictly longer to win, so ties keep the
    /// nearer occurrence. Returns `None` when nothing beats `initial_length`.
    pub fn find(
        &self,
        window: &SlidingWindow,
        chain: &HashChain,
        position: usize,
        initial_length: usize,
    ) -> Option<Match> {
        debug_assert!(position < window.size());

        if initial_length >= self.max_match {
            return None;
        }

        let mut best: Option<Match> = None;
        let mut best_len = initial_length;
        let mut next_byte = window.byte_at(position + best_len);
        let mut candidate = position;

        for _ in 0..self.max_comparisons {
            let Some(previous) = chain.link(candidate) else {
                break;
            };
            candidate = previous;
            if window.byte_at(candidate + best_len) != next_byte {
                continue;
            }

            let length = window.common_prefix(position, candidate, self.max_match);
            if length > best_len {
                best_len = length;
                best = Some(Match {
                    length,
                    position: candidate,
                });
                if length == self.max_match {
                    break;
                }
                next_byte = window.byte_at(position + best_len);
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        window: SlidingWindow,
        chain: HashChain,
        finder: MatchFinder,
    }

    fn fixture(config: Lz77Config, data: &[u8]) -> Fixture {
        let derived = DerivedParams::from_config(&config);
        let mut window = SlidingWindow::new(&derived);
        let mut chain = HashChain::new(&config, &derived);
        let count = window.load_sector(0, data);
        chain.hash_sector(&window, 0, count);
        Fixture {
            window,
            chain,
            finder: MatchFinder::new(&config, &derived),
        }
    }

    #[test]
    fn test_finds_longest() {
        let f = fixture(Lz77Config::DEFAULT, b"abcd__abcdef__abcdefg");
        let found = f.finder.find(&f.window, &f.chain, 14, 2).unwrap();
        assert_eq!(
            found,
            Match {
                length: 6,
                position: 6
            }
        );
    }

    #[test]
    fn test_no_improvement() {
        let f = fixture(Lz77Config::DEFAULT, b"abcXabcY");
        assert_eq!(f.finder.find(&f.window, &f.chain, 4, 3), None);
        assert_eq!(f.finder.find(&f.window, &f.chain, 0, 2), None);
    }

    #[test]
    fn test_tie_keeps_nearest() {
        let f = fixture(Lz77Config::DEFAULT, b"abcQabcRabcS");
        let found = f.finder.find(&f.window, &f.chain, 8, 2).unwrap();
        assert_eq!(found.position, 4);
        assert_eq!(found.length, 3);
    }

    #[test]
    fn test_stops_at_max_match() {
        let data = [b'z'; 64];
        let f = fixture(Lz77Config::DEFAULT, &data);
        let found = f.finder.find(&f.window, &f.chain, 40, 2).unwrap();
        assert_eq!(found.length, 17);
        assert_eq!(found.position, 39);
        assert_eq!(f.finder.find(&f.window, &f.chain, 40, 17), None);
    }

    #[test]
    fn test_comparison_budget() {
        // The long match sits three links back; a budget of two misses it.
        let data = b"abcdefgh.abc1.abc2.abcdefgh";
        let near = fixture(Lz77Config::DEFAULT.with_max_comparisons(2), data);
        let found = near.finder.find(&near.window, &near.chain, 19, 2);
        assert_eq!(
            found,
            Some(Match {
                length: 3,
                position: 14
            })
        );

        let far = fixture(Lz77Config::DEFAULT.with_max_comparisons(3), data);
        let found = far.finder.find(&far.window, &far.chain, 19, 2).unwrap();
        assert_eq!(found.position, 0);
        assert_eq!(found.length, 8);
    }
}
