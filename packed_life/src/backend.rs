// backend.rs - Data-parallel execution of one generation pass
//
// A pass computes every word of the write buffer from the read buffer. Each
// word holds one cell of every section, so one word is one independent unit
// of work with a disjoint write target.

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::board::PackedBuffer;
use crate::error::{LifeError, LifeResult};
use crate::kernel::TransitionKernel;

/// Which backend a board should run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Plain loop on the calling thread.
    Serial,
    /// Rows of words spread over a Rayon thread pool.
    #[default]
    Rayon,
}

/// Executes the transition kernel over a whole board.
///
/// Implementations must produce exactly the words
/// [`TransitionKernel::next_word`] produces, in any order. `read` and
/// `write` always share a layout.
pub trait KernelBackend: Send + Sync {
    fn name(&self) -> &'static str;

    fn kind(&self) -> BackendKind;

    /// Overwrites every word of `write` with the next generation of `read`.
    fn run_pass(&self, kernel: &TransitionKernel, read: &PackedBuffer, write: &mut PackedBuffer);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SerialBackend;

impl KernelBackend for SerialBackend {
    fn name(&self) -> &'static str {
        "serial"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Serial
    }

    fn run_pass(&self, kernel: &TransitionKernel, read: &PackedBuffer, write: &mut PackedBuffer) {
        for (index, word) in write.words_mut().iter_mut().enumerate() {
            *word = kernel.next_word(read, index);
        }
    }
}

/// Parallel-for over rows of words.
///
/// Runs on a dedicated pool when a thread count is given, on Rayon's global
/// pool otherwise.
pub struct RayonBackend {
    pool: Option<rayon::ThreadPool>,
}

impl RayonBackend {
    pub fn new(threads: Option<usize>) -> LifeResult<Self> {
        let pool = match threads {
            Some(0) => return Err(LifeError::backend("rayon backend needs at least one thread")),
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("life-worker-{i}"))
                    .build()
                    .map_err(|e| LifeError::backend(e.to_string()))?,
            ),
            None => None,
        };
        Ok(Self { pool })
    }

    pub fn threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    fn pass(kernel: &TransitionKernel, read: &PackedBuffer, write: &mut PackedBuffer) {
        let row_len = read.layout().section_width();
        write
            .words_mut()
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(row, words)| {
                let base = row * row_len;
                for (offset, word) in words.iter_mut().enumerate() {
                    *word = kernel.next_word(read, base + offset);
                }
            });
    }
}

impl fmt::Debug for RayonBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RayonBackend")
            .field("dedicated_pool", &self.pool.is_some())
            .field("threads", &self.threads())
            .finish()
    }
}

impl KernelBackend for RayonBackend {
    fn name(&self) -> &'static str {
        "rayon"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Rayon
    }

    fn run_pass(&self, kernel: &TransitionKernel, read: &PackedBuffer, write: &mut PackedBuffer) {
        match &self.pool {
            Some(pool) => pool.install(|| Self::pass(kernel, read, write)),
            None => Self::pass(kernel, read, write),
        }
    }
}

/// Builds the backend for `kind`.
pub fn create_backend(kind: BackendKind, threads: Option<usize>) -> LifeResult<Box<dyn KernelBackend>> {
    Ok(match kind {
        BackendKind::Serial => Box::new(SerialBackend),
        BackendKind::Rayon => Box::new(RayonBackend::new(threads)?),
    })
}
