// grid.rs - Section layout and address translation for the packed board
//
// The board is cut into x_sections * y_sections equal tiles. One u32 word
// holds the bit of every tile at the same intra-tile coordinate:
//
//   word_index = local_y * section_width + local_x
//   channel    = section_y   (one byte per channel, at most 4)
//   bit        = section_x   (bit inside the channel byte, at most 8)
//
// so the bit position inside the word is section_y * 8 + section_x.

use crate::error::{LifeError, LifeResult};

pub const MAX_X_SECTIONS: usize = 8;                  // Bits per channel byte
pub const MAX_Y_SECTIONS: usize = 4;                  // Channel bytes per word
pub const BITS_PER_CHANNEL: usize = 8;
pub const WORD_BITS: usize = 32;

/// Location of one cell inside the packed encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub word_index: usize,
    pub section_x: usize,
    pub section_y: usize,
}

impl CellAddress {
    pub fn new(word_index: usize, section_x: usize, section_y: usize) -> Self {
        Self { word_index, section_x, section_y }
    }

    /// Bit position inside the word.
    pub fn bit(&self) -> u32 {
        (self.section_y * BITS_PER_CHANNEL + self.section_x) as u32
    }

    pub fn mask(&self) -> u32 {
        1u32 << self.bit()
    }
}

/// Geometry of a sectioned board.
///
/// Construction validates every divisibility and bound constraint, so any
/// `SectionLayout` value describes a board that can be packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLayout {
    width: usize,
    height: usize,
    x_sections: usize,
    y_sections: usize,
    section_width: usize,
    section_height: usize,
}

impl SectionLayout {
    pub fn new(width: usize, height: usize, x_sections: usize, y_sections: usize) -> LifeResult<Self> {
        if width == 0 || height == 0 {
            return Err(LifeError::config(format!(
                "board must not be empty, got {width}x{height}"
            )));
        }
        if x_sections == 0 || x_sections > MAX_X_SECTIONS {
            return Err(LifeError::config(format!(
                "x_sections must be in 1..={MAX_X_SECTIONS}, got {x_sections}"
            )));
        }
        if y_sections == 0 || y_sections > MAX_Y_SECTIONS {
            return Err(LifeError::config(format!(
                "y_sections must be in 1..={MAX_Y_SECTIONS}, got {y_sections}"
            )));
        }
        if width % x_sections != 0 {
            return Err(LifeError::config(format!(
                "width {width} is not divisible by x_sections {x_sections}"
            )));
        }
        if height % y_sections != 0 {
            return Err(LifeError::config(format!(
                "height {height} is not divisible by y_sections {y_sections}"
            )));
        }
        let cells = width.checked_mul(height).ok_or_else(|| {
            LifeError::config(format!("board {width}x{height} overflows the cell count"))
        })?;
        if cells % WORD_BITS != 0 {
            return Err(LifeError::config(format!(
                "cell count {cells} is not a multiple of {WORD_BITS}"
            )));
        }

        Ok(Self {
            width,
            height,
            x_sections,
            y_sections,
            section_width: width / x_sections,
            section_height: height / y_sections,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn x_sections(&self) -> usize {
        self.x_sections
    }

    pub fn y_sections(&self) -> usize {
        self.y_sections
    }

    pub fn section_width(&self) -> usize {
        self.section_width
    }

    pub fn section_height(&self) -> usize {
        self.section_height
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Number of packed words in one generation.
    pub fn word_count(&self) -> usize {
        self.section_width * self.section_height
    }

    /// Bits of a word that belong to some section. All other bits stay zero.
    pub fn occupied_mask(&self) -> u32 {
        let channel = (1u32 << self.x_sections) - 1;
        (0..self.y_sections).fold(0, |mask, sy| mask | channel << (sy * BITS_PER_CHANNEL))
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn out_of_range(&self, x: usize, y: usize) -> LifeError {
        LifeError::OutOfRange { x, y, width: self.width, height: self.height }
    }

    /// Maps a board coordinate to its packed address.
    pub fn encode(&self, x: usize, y: usize) -> LifeResult<CellAddress> {
        if !self.contains(x, y) {
            return Err(self.out_of_range(x, y));
        }
        Ok(self.encode_unchecked(x, y))
    }

    pub(crate) fn encode_unchecked(&self, x: usize, y: usize) -> CellAddress {
        let (section_x, local_x) = (x / self.section_width, x % self.section_width);
        let (section_y, local_y) = (y / self.section_height, y % self.section_height);
        CellAddress {
            word_index: local_y * self.section_width + local_x,
            section_x,
            section_y,
        }
    }

    /// Maps a packed address back to its board coordinate.
    pub fn decode(&self, address: CellAddress) -> LifeResult<(usize, usize)> {
        if !self.is_valid(address) {
            return Err(LifeError::config(format!(
                "address {address:?} does not exist in a {}x{} layout with {}x{} sections",
                self.width, self.height, self.x_sections, self.y_sections
            )));
        }
        Ok(self.decode_unchecked(address))
    }

    pub(crate) fn decode_unchecked(&self, address: CellAddress) -> (usize, usize) {
        let local_x = address.word_index % self.section_width;
        let local_y = address.word_index / self.section_width;
        (
            address.section_x * self.section_width + local_x,
            address.section_y * self.section_height + local_y,
        )
    }

    pub fn is_valid(&self, address: CellAddress) -> bool {
        address.word_index < self.word_count()
            && address.section_x < self.x_sections
            && address.section_y < self.y_sections
    }

    /// Address of the cell `(dx, dy)` away from `address` on the torus.
    ///
    /// Stepping past the edge of a section moves into the neighbouring
    /// section; stepping past the edge of the board wraps to the opposite
    /// edge. Both axes wrap.
    pub fn offset(&self, address: CellAddress, dx: isize, dy: isize) -> CellAddress {
        let local_x = address.word_index % self.section_width;
        let local_y = address.word_index / self.section_width;
        let (local_x, section_x) =
            step_axis(local_x, address.section_x, dx, self.section_width, self.x_sections);
        let (local_y, section_y) =
            step_axis(local_y, address.section_y, dy, self.section_height, self.y_sections);
        CellAddress {
            word_index: local_y * self.section_width + local_x,
            section_x,
            section_y,
        }
    }

    /// Wraps a signed board coordinate onto the torus.
    pub fn wrap(&self, x: isize, y: isize) -> (usize, usize) {
        (
            x.rem_euclid(self.width as isize) as usize,
            y.rem_euclid(self.height as isize) as usize,
        )
    }

    /// Every address of one word, section rows outermost.
    pub fn word_addresses(&self, word_index: usize) -> impl Iterator<Item = CellAddress> + '_ {
        (0..self.y_sections).flat_map(move |section_y| {
            (0..self.x_sections).map(move |section_x| CellAddress { word_index, section_x, section_y })
        })
    }
}

// Moves one axis by `delta`, carrying into the section index when the local
// coordinate leaves [0, extent).
fn step_axis(local: usize, section: usize, delta: isize, extent: usize, sections: usize) -> (usize, usize) {
    let mut local = local as isize + delta;
    let mut section = section as isize;
    let extent = extent as isize;
    section += local.div_euclid(extent);
    local = local.rem_euclid(extent);
    (local as usize, section.rem_euclid(sections as isize) as usize)
}
