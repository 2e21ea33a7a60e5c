// board.rs - One packed generation buffer

use std::hash::{DefaultHasher, Hash, Hasher};

use crate::error::{LifeError, LifeResult};
use crate::grid::{CellAddress, SectionLayout};

/// One generation of cells, packed one bit per section into each `u32`.
///
/// Bit-level access goes through [`SectionLayout`] addresses; coordinate
/// access validates against the board bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBuffer {
    layout: SectionLayout,
    words: Vec<u32>,
}

impl PackedBuffer {
    /// Creates an all-dead buffer.
    pub fn new(layout: SectionLayout) -> Self {
        Self {
            layout,
            words: vec![0; layout.word_count()],
        }
    }

    pub fn layout(&self) -> &SectionLayout {
        &self.layout
    }

    /// Raw packed words, indexed by intra-section coordinate.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub(crate) fn words_mut(&mut self) -> &mut [u32] {
        &mut self.words
    }

    /// Reads one bit.
    ///
    /// Fails unless the address belongs to this buffer's layout.
    pub fn get_bit(&self, word_index: usize, section_x: usize, section_y: usize) -> LifeResult<bool> {
        let address = self.checked(CellAddress::new(word_index, section_x, section_y))?;
        Ok(self.get_address(address))
    }

    /// Writes one bit, leaving every other section's bit in the word alone.
    ///
    /// Fails without writing unless the address belongs to this buffer's
    /// layout, so padding bits stay clear.
    pub fn set_bit(&mut self, word_index: usize, section_x: usize, section_y: usize, value: bool) -> LifeResult<()> {
        let address = self.checked(CellAddress::new(word_index, section_x, section_y))?;
        self.set_address(address, value);
        Ok(())
    }

    fn checked(&self, address: CellAddress) -> LifeResult<CellAddress> {
        if self.layout.is_valid(address) {
            Ok(address)
        } else {
            Err(LifeError::config(format!(
                "address {address:?} is outside the {} words of {}x{} sections",
                self.layout.word_count(),
                self.layout.x_sections(),
                self.layout.y_sections()
            )))
        }
    }

    // Addresses reaching these come from the layout itself.
    pub(crate) fn get_address(&self, address: CellAddress) -> bool {
        debug_assert!(self.layout.is_valid(address), "invalid address {address:?}");
        self.words[address.word_index] & address.mask() != 0
    }

    pub(crate) fn set_address(&mut self, address: CellAddress, value: bool) {
        debug_assert!(self.layout.is_valid(address), "invalid address {address:?}");
        let word = &mut self.words[address.word_index];
        if value {
            *word |= address.mask();
        } else {
            *word &= !address.mask();
        }
    }

    pub fn get(&self, x: usize, y: usize) -> LifeResult<bool> {
        Ok(self.get_address(self.layout.encode(x, y)?))
    }

    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> LifeResult<()> {
        let address = self.layout.encode(x, y)?;
        self.set_address(address, alive);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Counts live cells.
    pub fn population(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Coordinates of every live cell, row by row.
    pub fn alive_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::with_capacity(self.population());
        for y in 0..self.layout.height() {
            for x in 0..self.layout.width() {
                if self.get_address(self.layout.encode_unchecked(x, y)) {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    /// Hash of the packed words, used for cycle detection.
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.words.hash(&mut hasher);
        hasher.finish()
    }

    /// Serializes the buffer as little-endian words.
    ///
    /// Byte `4 * i + c` is channel `c` of word `i`: the cells of section row
    /// `c`, with bit `b` of that byte belonging to section column `b`.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    /// Overwrites the buffer from bytes produced by [`PackedBuffer::to_le_bytes`].
    ///
    /// Nothing is written unless the whole input is valid.
    pub fn load_le_bytes(&mut self, bytes: &[u8]) -> LifeResult<()> {
        let expected = self.words.len() * 4;
        if bytes.len() != expected {
            return Err(LifeError::config(format!(
                "packed buffer needs {expected} bytes, got {}",
                bytes.len()
            )));
        }

        let unused = !self.layout.occupied_mask();
        let words: Vec<u32> = bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        if let Some(i) = words.iter().position(|w| w & unused != 0) {
            return Err(LifeError::config(format!(
                "word {i} sets bits outside the {}x{} sections",
                self.layout.x_sections(),
                self.layout.y_sections()
            )));
        }

        self.words.copy_from_slice(&words);
        Ok(())
    }

    /// Text dump, one line per row, `#` for live cells.
    pub fn render_text(&self) -> String {
        let mut out = String::with_capacity((self.layout.width() + 1) * self.layout.height());
        for y in 0..self.layout.height() {
            for x in 0..self.layout.width() {
                let alive = self.get_address(self.layout.encode_unchecked(x, y));
                out.push(if alive { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}
