// kernel.rs - Weighted 3x3 transition kernel
//
// The classic B3/S23 rule is folded into one integer comparison: the centre
// cell weighs 9 and each neighbour 1, so a dead cell with 3 live neighbours
// sums to 3 and a live cell with 2 or 3 live neighbours sums to 11 or 12.

use crate::board::PackedBuffer;
use crate::error::{LifeError, LifeResult};
use crate::grid::CellAddress;

pub const SELF_WEIGHT: i32 = 9;
pub const NEIGHBOR_WEIGHT: i32 = 1;

pub const DEFAULT_WEIGHTS: [[i32; 3]; 3] = [
    [NEIGHBOR_WEIGHT, NEIGHBOR_WEIGHT, NEIGHBOR_WEIGHT],
    [NEIGHBOR_WEIGHT, SELF_WEIGHT,     NEIGHBOR_WEIGHT],
    [NEIGHBOR_WEIGHT, NEIGHBOR_WEIGHT, NEIGHBOR_WEIGHT],
];

/// Weighted sums that produce a live cell under Conway's rule.
pub const LIFE_SUMS: [i32; 3] = [3, 11, 12];

/// Birth/survival presets, as neighbour counts.
pub mod rules {
    /// Game of Life (B3/S23).
    pub const LIFE: (&[u8], &[u8]) = (&[3], &[2, 3]);

    /// HighLife (B36/S23).
    pub const HIGH_LIFE: (&[u8], &[u8]) = (&[3, 6], &[2, 3]);

    /// Seeds (B2/S).
    pub const SEEDS: (&[u8], &[u8]) = (&[2], &[]);

    /// Day & Night (B3678/S34678).
    pub const DAY_NIGHT: (&[u8], &[u8]) = (&[3, 6, 7, 8], &[3, 4, 6, 7, 8]);

    /// Maze (B3/S12345).
    pub const MAZE: (&[u8], &[u8]) = (&[3], &[1, 2, 3, 4, 5]);
}

/// A 3x3 weight matrix plus the set of sums that decode to "alive".
///
/// Row 0 of the weights is the row above the cell (`dy = -1`), column 0 the
/// column to its left (`dx = -1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionKernel {
    weights: [[i32; 3]; 3],
    alive_sums: Vec<i32>,
}

impl Default for TransitionKernel {
    fn default() -> Self {
        Self::life()
    }
}

impl TransitionKernel {
    /// Conway's Game of Life.
    pub fn life() -> Self {
        Self::new(DEFAULT_WEIGHTS)
    }

    /// Custom weights with the default sum decode (3, 11, 12).
    pub fn new(weights: [[i32; 3]; 3]) -> Self {
        Self {
            weights,
            alive_sums: LIFE_SUMS.to_vec(),
        }
    }

    /// Builds a kernel from arbitrary rows, rejecting anything but 3x3.
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> LifeResult<Self> {
        if rows.len() != 3 {
            return Err(LifeError::kernel(format!(
                "weight matrix needs 3 rows, got {}",
                rows.len()
            )));
        }
        let mut weights = [[0; 3]; 3];
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != 3 {
                return Err(LifeError::kernel(format!(
                    "weight row {i} needs 3 entries, got {}",
                    row.len()
                )));
            }
            weights[i].copy_from_slice(row);
        }
        Ok(Self::new(weights))
    }

    /// Default weights with a birth/survival rule in neighbour counts.
    ///
    /// Birth on `b` neighbours decodes from sum `b`; survival on `s`
    /// neighbours decodes from sum `SELF_WEIGHT + s`.
    pub fn from_birth_survival(birth: &[u8], survive: &[u8]) -> LifeResult<Self> {
        if let Some(n) = birth.iter().chain(survive).find(|&&n| n > 8) {
            return Err(LifeError::kernel(format!("neighbour count {n} is above 8")));
        }
        let mut alive_sums: Vec<i32> = birth
            .iter()
            .map(|&b| i32::from(b))
            .chain(survive.iter().map(|&s| SELF_WEIGHT + i32::from(s)))
            .collect();
        alive_sums.sort_unstable();
        alive_sums.dedup();
        Ok(Self {
            weights: DEFAULT_WEIGHTS,
            alive_sums,
        })
    }

    /// Parses `B3/S23` style rule strings (case-insensitive, either order).
    pub fn parse_rule(rule: &str) -> LifeResult<Self> {
        let mut birth = None;
        let mut survive = None;

        for part in rule.trim().split('/') {
            let part = part.trim();
            let mut chars = part.chars();
            let slot = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survive,
                _ => return Err(LifeError::kernel(format!("malformed rule {rule:?}"))),
            };
            if slot.is_some() {
                return Err(LifeError::kernel(format!("repeated section in rule {rule:?}")));
            }
            let counts = chars
                .map(|c| {
                    c.to_digit(10)
                        .map(|d| d as u8)
                        .ok_or_else(|| LifeError::kernel(format!("bad digit {c:?} in rule {rule:?}")))
                })
                .collect::<LifeResult<Vec<u8>>>()?;
            *slot = Some(counts);
        }

        match (birth, survive) {
            (Some(b), Some(s)) => Self::from_birth_survival(&b, &s),
            _ => Err(LifeError::kernel(format!("rule {rule:?} needs both B and S parts"))),
        }
    }

    pub fn weights(&self) -> &[[i32; 3]; 3] {
        &self.weights
    }

    pub fn alive_sums(&self) -> &[i32] {
        &self.alive_sums
    }

    pub fn weighted_sum(&self, samples: &[[bool; 3]; 3]) -> i32 {
        self.weights
            .iter()
            .flatten()
            .zip(samples.iter().flatten())
            .filter(|&(_, &alive)| alive)
            .map(|(&w, _)| w)
            .sum()
    }

    pub fn decode(&self, sum: i32) -> bool {
        self.alive_sums.contains(&sum)
    }

    /// New state of a cell given its 3x3 neighbourhood.
    pub fn evaluate(&self, samples: &[[bool; 3]; 3]) -> bool {
        self.decode(self.weighted_sum(samples))
    }

    /// Samples the toroidal 3x3 neighbourhood of `address` in `buffer`.
    pub fn sample(buffer: &PackedBuffer, address: CellAddress) -> [[bool; 3]; 3] {
        let layout = buffer.layout();
        let mut samples = [[false; 3]; 3];
        for (row, dy) in (-1isize..=1).enumerate() {
            for (col, dx) in (-1isize..=1).enumerate() {
                samples[row][col] = buffer.get_address(layout.offset(address, dx, dy));
            }
        }
        samples
    }

    pub fn next_cell(&self, read: &PackedBuffer, address: CellAddress) -> bool {
        self.evaluate(&Self::sample(read, address))
    }

    /// Next value of a whole packed word, one bit per section.
    pub fn next_word(&self, read: &PackedBuffer, word_index: usize) -> u32 {
        read.layout()
            .word_addresses(word_index)
            .filter(|&address| self.next_cell(read, address))
            .fold(0, |word, address| word | address.mask())
    }
}
