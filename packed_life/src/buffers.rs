// buffers.rs - Ping-pong generation buffers

use crate::board::PackedBuffer;
use crate::grid::SectionLayout;

/// The two generation buffers. Which one is current is decided by a parity
/// bit (`generation & 1`) owned by the caller; nothing is ever copied
/// between them.
#[derive(Debug, Clone)]
pub struct GenerationBuffers {
    buffers: [PackedBuffer; 2],
}

impl GenerationBuffers {
    pub fn new(layout: SectionLayout) -> Self {
        Self {
            buffers: [PackedBuffer::new(layout), PackedBuffer::new(layout)],
        }
    }

    pub fn layout(&self) -> &SectionLayout {
        self.buffers[0].layout()
    }

    pub fn read(&self, parity: usize) -> &PackedBuffer {
        &self.buffers[parity & 1]
    }

    /// In-place access to the current buffer, for seeding and edits between
    /// steps.
    pub fn read_mut(&mut self, parity: usize) -> &mut PackedBuffer {
        &mut self.buffers[parity & 1]
    }

    /// Splits into the read buffer for `parity` and the other one as the
    /// write target.
    pub fn split(&mut self, parity: usize) -> (&PackedBuffer, &mut PackedBuffer) {
        let [even, odd] = &mut self.buffers;
        if parity & 1 == 0 {
            (&*even, odd)
        } else {
            (&*odd, even)
        }
    }

    pub fn clear(&mut self) {
        for buffer in &mut self.buffers {
            buffer.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_alternates() {
        let layout = SectionLayout::new(32, 32, 2, 2).unwrap();
        let mut buffers = GenerationBuffers::new(layout);
        buffers.read_mut(0).set(1, 1, true).unwrap();

        {
            let (read, write) = buffers.split(0);
            assert!(read.get(1, 1).unwrap());
            write.set(2, 2, true).unwrap();
        }
        assert!(buffers.read(1).get(2, 2).unwrap());

        let (read, write) = buffers.split(1);
        assert!(read.get(2, 2).unwrap());
        assert!(write.get(1, 1).unwrap());
    }

    #[test]
    fn test_clear_both() {
        let layout = SectionLayout::new(32, 32, 2, 2).unwrap();
        let mut buffers = GenerationBuffers::new(layout);
        buffers.read_mut(0).set(1, 1, true).unwrap();
        buffers.read_mut(1).set(3, 3, true).unwrap();
        buffers.clear();
        assert_eq!(buffers.read(0).population(), 0);
        assert_eq!(buffers.read(1).population(), 0);
    }
}
