// scheduler.rs - Generation stepping over the ping-pong buffers

use tracing::{debug, trace, warn};

use crate::backend::KernelBackend;
use crate::board::PackedBuffer;
use crate::buffers::GenerationBuffers;
use crate::grid::SectionLayout;
use crate::kernel::TransitionKernel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Idle,
    Stepping,
}

/// Owns both generation buffers and advances them one pass at a time.
///
/// The current buffer is `generation & 1`. A pass writes only the other
/// buffer; the counter (and with it the current buffer) changes only once
/// the pass has finished.
pub struct StepScheduler {
    buffers: GenerationBuffers,
    generation: u64,
    state: StepState,
    backend: Box<dyn KernelBackend>,
}

impl std::fmt::Debug for StepScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepScheduler")
            .field("layout", self.layout())
            .field("generation", &self.generation)
            .field("state", &self.state)
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl StepScheduler {
    pub fn new(layout: SectionLayout, backend: Box<dyn KernelBackend>) -> Self {
        Self {
            buffers: GenerationBuffers::new(layout),
            generation: 0,
            state: StepState::Idle,
            backend,
        }
    }

    pub fn layout(&self) -> &SectionLayout {
        self.buffers.layout()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> StepState {
        self.state
    }

    pub fn parity(&self) -> usize {
        (self.generation & 1) as usize
    }

    pub fn backend(&self) -> &dyn KernelBackend {
        self.backend.as_ref()
    }

    pub fn set_backend(&mut self, backend: Box<dyn KernelBackend>) {
        debug!(from = self.backend.name(), to = backend.name(), "switching kernel backend");
        self.backend = backend;
    }

    pub fn current(&self) -> &PackedBuffer {
        self.buffers.read(self.parity())
    }

    pub(crate) fn current_mut(&mut self) -> &mut PackedBuffer {
        let parity = self.parity();
        self.buffers.read_mut(parity)
    }

    /// Clears both buffers and rewinds to generation 0.
    pub fn reset(&mut self) {
        self.buffers.clear();
        self.generation = 0;
        self.state = StepState::Idle;
    }

    /// Computes the next generation and makes it current.
    ///
    /// A pass that unwound part-way (a panicking backend) leaves the counter
    /// untouched, so the next call recomputes from the last committed
    /// generation.
    pub fn advance(&mut self, kernel: &TransitionKernel) -> u64 {
        if self.state == StepState::Stepping {
            warn!(generation = self.generation, "previous pass was interrupted, restarting it");
        }
        self.state = StepState::Stepping;

        let parity = self.parity();
        let (read, write) = self.buffers.split(parity);
        self.backend.run_pass(kernel, read, write);

        self.generation += 1;
        self.state = StepState::Idle;
        trace!(generation = self.generation, backend = self.backend.name(), "pass committed");
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{RayonBackend, SerialBackend};

    fn scheduler() -> StepScheduler {
        let layout = SectionLayout::new(32, 32, 2, 2).unwrap();
        StepScheduler::new(layout, Box::new(SerialBackend))
    }

    #[test]
    fn test_generation_counts_up() {
        let mut scheduler = scheduler();
        let kernel = TransitionKernel::life();
        assert_eq!(scheduler.generation(), 0);
        for expected in 1..=5 {
            assert_eq!(scheduler.advance(&kernel), expected);
            assert_eq!(scheduler.state(), StepState::Idle);
        }
        assert_eq!(scheduler.parity(), 1);
    }

    #[test]
    fn test_advance_leaves_previous_generation_intact() {
        let mut scheduler = scheduler();
        let kernel = TransitionKernel::life();
        for x in 4..7 {
            scheduler.current_mut().set(x, 10, true).unwrap();
        }
        let before = scheduler.current().clone();

        scheduler.advance(&kernel);

        // Generation 0 still sits untouched in the now-inactive buffer
        assert_eq!(scheduler.buffers.read(0), &before);
        assert_eq!(scheduler.current().alive_cells(), vec![(5, 9), (5, 10), (5, 11)]);
    }

    #[test]
    fn test_reset() {
        let mut scheduler = scheduler();
        scheduler.current_mut().set(0, 0, true).unwrap();
        scheduler.advance(&TransitionKernel::life());
        scheduler.reset();
        assert_eq!(scheduler.generation(), 0);
        assert_eq!(scheduler.current().population(), 0);
    }

    #[test]
    fn test_interrupted_pass_restarts() {
        struct PanickingBackend;

        impl KernelBackend for PanickingBackend {
            fn name(&self) -> &'static str {
                "panicking"
            }

            fn kind(&self) -> crate::backend::BackendKind {
                crate::backend::BackendKind::Serial
            }

            fn run_pass(&self, _: &TransitionKernel, _: &PackedBuffer, write: &mut PackedBuffer) {
                write.set_bit(0, 0, 0, true).unwrap();
                panic!("device lost");
            }
        }

        let layout = SectionLayout::new(32, 32, 2, 2).unwrap();
        let mut scheduler = StepScheduler::new(layout, Box::new(PanickingBackend));
        let kernel = TransitionKernel::life();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            scheduler.advance(&kernel);
        }));
        assert!(result.is_err());
        assert_eq!(scheduler.generation(), 0);
        assert_eq!(scheduler.state(), StepState::Stepping);
        assert_eq!(scheduler.current().population(), 0);

        scheduler.set_backend(Box::new(RayonBackend::new(Some(2)).unwrap()));
        assert_eq!(scheduler.advance(&kernel), 1);
        assert_eq!(scheduler.current().population(), 0);
        assert_eq!(scheduler.state(), StepState::Idle);
    }
}
