// history.rs - Recent state hashes for cycle detection

use std::collections::VecDeque;

pub const DEFAULT_HISTORY_DEPTH: usize = 10;

/// Ring of the last few generation hashes.
///
/// Still lifes and oscillators with a period up to the depth show up as a
/// repeated hash.
#[derive(Debug, Clone)]
pub struct GenerationHistory {
    hashes: VecDeque<u64>,
    depth: usize,
}

impl Default for GenerationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl GenerationHistory {
    pub fn new(depth: usize) -> Self {
        let depth = depth.max(1);
        Self {
            hashes: VecDeque::with_capacity(depth),
            depth,
        }
    }

    /// Records `hash`; returns true if it was already among the recent ones.
    pub fn check_for_cycle(&mut self, hash: u64) -> bool {
        if self.hashes.contains(&hash) {
            return true;
        }
        if self.hashes.len() == self.depth {
            self.hashes.pop_front();
        }
        self.hashes.push_back(hash);
        false
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn clear(&mut self) {
        self.hashes.clear();
    }
}
