//! Bit-packed Conway's Game of Life.
//!
//! The board is split into up to 8 x 4 equal sections and every `u32` word
//! holds one cell of each section (channel = section row, bit = section
//! column). Two such buffers alternate as read and write targets, one pass
//! per generation, with every word computed independently.
//!
//! # Example
//!
//! ```
//! use packed_life::Board;
//!
//! let mut board = Board::initialize(64, 32, 4, 2)?;
//! board.seed_cells(&[(7, 3), (8, 3), (9, 3)])?;
//!
//! assert_eq!(board.advance(), 1);
//! assert!(board.get_cell(8, 2)?);
//! assert!(board.get_cell(8, 4)?);
//! # Ok::<(), packed_life::LifeError>(())
//! ```

pub mod backend;
pub mod board;
pub mod buffers;
pub mod config;
pub mod error;
pub mod grid;
pub mod history;
pub mod kernel;
pub mod life;
pub mod patterns;
pub mod scheduler;

pub use backend::{BackendKind, KernelBackend, RayonBackend, SerialBackend, create_backend};
pub use board::PackedBuffer;
pub use buffers::GenerationBuffers;
pub use config::BoardConfig;
pub use error::{LifeError, LifeResult};
pub use grid::{CellAddress, SectionLayout};
pub use history::GenerationHistory;
pub use kernel::{TransitionKernel, rules};
pub use life::Board;
pub use patterns::{PATTERNS, Pattern};
pub use scheduler::{StepScheduler, StepState};
