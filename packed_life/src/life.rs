// life.rs - Board: the public face of the simulation
//
// A Board owns the layout, the kernel and the scheduler (and through it both
// generation buffers). All mutation goes through &mut self, so a step always
// has exclusive access to the write buffer.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::backend::{BackendKind, KernelBackend, create_backend};
use crate::board::PackedBuffer;
use crate::config::BoardConfig;
use crate::error::{LifeError, LifeResult};
use crate::grid::SectionLayout;
use crate::kernel::TransitionKernel;
use crate::patterns::Pattern;
use crate::scheduler::StepScheduler;

#[derive(Debug)]
pub struct Board {
    kernel: TransitionKernel,
    scheduler: StepScheduler,
}

impl Board {
    /// Validates the geometry and builds an all-dead board at generation 0
    /// running Conway's rule on the default backend.
    pub fn initialize(width: usize, height: usize, x_sections: usize, y_sections: usize) -> LifeResult<Self> {
        let layout = SectionLayout::new(width, height, x_sections, y_sections)?;
        let backend = create_backend(BackendKind::default(), None)?;
        Ok(Self::with_backend(layout, backend))
    }

    pub fn with_backend(layout: SectionLayout, backend: Box<dyn KernelBackend>) -> Self {
        debug!(
            width = layout.width(),
            height = layout.height(),
            x_sections = layout.x_sections(),
            y_sections = layout.y_sections(),
            words = layout.word_count(),
            backend = backend.name(),
            "board initialized"
        );
        Self {
            kernel: TransitionKernel::default(),
            scheduler: StepScheduler::new(layout, backend),
        }
    }

    /// Builds a board from a config. Nothing is returned unless every
    /// setting is valid.
    pub fn from_config(config: &BoardConfig) -> LifeResult<Self> {
        let layout = SectionLayout::new(config.width, config.height, config.x_sections, config.y_sections)?;
        let kernel = match (&config.rule, &config.weights) {
            (Some(_), Some(_)) => {
                return Err(LifeError::config("set either `rule` or `weights`, not both"));
            }
            (Some(rule), None) => TransitionKernel::parse_rule(rule)?,
            (None, Some(weights)) => TransitionKernel::from_rows(weights)?,
            (None, None) => TransitionKernel::default(),
        };
        let backend = create_backend(config.backend, config.threads)?;

        let mut board = Self::with_backend(layout, backend);
        board.kernel = kernel;
        Ok(board)
    }

    pub fn layout(&self) -> &SectionLayout {
        self.scheduler.layout()
    }

    pub fn width(&self) -> usize {
        self.layout().width()
    }

    pub fn height(&self) -> usize {
        self.layout().height()
    }

    pub fn generation(&self) -> u64 {
        self.scheduler.generation()
    }

    pub fn kernel(&self) -> &TransitionKernel {
        &self.kernel
    }

    pub fn backend_name(&self) -> &'static str {
        self.scheduler.backend().name()
    }

    pub fn set_backend(&mut self, backend: Box<dyn KernelBackend>) {
        self.scheduler.set_backend(backend);
    }

    /// Replaces the kernel weights; the decode sums go back to 3, 11, 12.
    pub fn set_kernel<R: AsRef<[i32]>>(&mut self, rows: &[R]) -> LifeResult<()> {
        let kernel = TransitionKernel::from_rows(rows)?;
        debug!(weights = ?kernel.weights(), "kernel weights replaced");
        self.kernel = kernel;
        Ok(())
    }

    /// Switches to a birth/survival rule such as "B36/S23".
    pub fn set_rule(&mut self, rule: &str) -> LifeResult<()> {
        let kernel = TransitionKernel::parse_rule(rule)?;
        debug!(rule, sums = ?kernel.alive_sums(), "rule replaced");
        self.kernel = kernel;
        Ok(())
    }

    pub fn set_transition_kernel(&mut self, kernel: TransitionKernel) {
        self.kernel = kernel;
    }

    // Every seeding call starts a fresh generation 0.
    fn restart(&mut self) -> &mut PackedBuffer {
        self.scheduler.reset();
        self.scheduler.current_mut()
    }

    /// Fills the board at random, each cell alive with `probability`.
    pub fn seed_random(&mut self, probability: f64) -> LifeResult<()> {
        self.seed_random_from(probability, &mut rand::thread_rng())
    }

    /// Reproducible variant of [`Board::seed_random`].
    pub fn seed_random_with(&mut self, probability: f64, seed: u64) -> LifeResult<()> {
        self.seed_random_from(probability, &mut StdRng::seed_from_u64(seed))
    }

    fn seed_random_from<G: Rng>(&mut self, probability: f64, rng: &mut G) -> LifeResult<()> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(LifeError::config(format!(
                "probability must be within [0, 1], got {probability}"
            )));
        }
        let (width, height) = (self.width(), self.height());
        let current = self.restart();
        for y in 0..height {
            for x in 0..width {
                if rng.gen_bool(probability) {
                    current.set(x, y, true)?;
                }
            }
        }
        debug!(probability, population = current.population(), "board seeded at random");
        Ok(())
    }

    /// Clears the board and sets the listed cells alive.
    ///
    /// Every coordinate is checked before anything is written; one bad
    /// coordinate leaves the board as it was.
    pub fn seed_cells(&mut self, coords: &[(usize, usize)]) -> LifeResult<()> {
        let addresses = coords
            .iter()
            .map(|&(x, y)| self.layout().encode(x, y))
            .collect::<LifeResult<Vec<_>>>()?;

        let current = self.restart();
        for address in addresses {
            current.set_address(address, true);
        }
        debug!(cells = coords.len(), "board seeded from coordinates");
        Ok(())
    }

    /// Seeds a named pattern with its top-left corner at `origin`.
    ///
    /// Fails with `OutOfRange`, leaving the board as it was, if any cell of
    /// the pattern would land off the board.
    pub fn seed_pattern(&mut self, pattern: &Pattern, origin: (usize, usize)) -> LifeResult<()> {
        debug!(pattern = pattern.name, ?origin, "seeding pattern");
        let cells = pattern.translated(origin).ok_or(LifeError::OutOfRange {
            x: origin.0,
            y: origin.1,
            width: self.width(),
            height: self.height(),
        })?;
        self.seed_cells(&cells)
    }

    /// Clears the board back to an empty generation 0.
    pub fn clear(&mut self) {
        self.scheduler.reset();
    }

    /// Advances one generation and returns the new generation index.
    ///
    /// Requires a successfully initialized board, which every `Board` value
    /// is: a failed `initialize` never hands one out.
    pub fn advance(&mut self) -> u64 {
        self.scheduler.advance(&self.kernel)
    }

    /// Advances `steps` generations.
    pub fn advance_by(&mut self, steps: u64) -> u64 {
        for _ in 0..steps {
            self.advance();
        }
        self.generation()
    }

    pub fn get_cell(&self, x: usize, y: usize) -> LifeResult<bool> {
        self.current_state().get(x, y)
    }

    /// Edits the current generation in place; the generation index is kept.
    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) -> LifeResult<()> {
        self.scheduler.current_mut().set(x, y, alive)
    }

    pub fn toggle_cell(&mut self, x: usize, y: usize) -> LifeResult<bool> {
        let alive = !self.get_cell(x, y)?;
        self.set_cell(x, y, alive)?;
        Ok(alive)
    }

    /// The current generation, read-only.
    pub fn current_state(&self) -> &PackedBuffer {
        self.scheduler.current()
    }

    pub fn population(&self) -> usize {
        self.current_state().population()
    }

    pub fn state_hash(&self) -> u64 {
        self.current_state().state_hash()
    }

    /// Current generation as little-endian packed words.
    ///
    /// Byte `c` of each 4-byte word is section row `c`; bit `b` of that byte
    /// is section column `b`. Words are ordered by intra-section coordinate,
    /// row-major.
    pub fn export_bytes(&self) -> Vec<u8> {
        self.current_state().to_le_bytes()
    }

    /// Loads bytes from [`Board::export_bytes`] as a new generation 0.
    pub fn import_bytes(&mut self, bytes: &[u8]) -> LifeResult<()> {
        let mut staged = PackedBuffer::new(*self.layout());
        staged.load_le_bytes(bytes)?;
        self.restart().words_mut().copy_from_slice(staged.words());
        debug!(bytes = bytes.len(), "board imported");
        Ok(())
    }

    pub fn render_text(&self) -> String {
        self.current_state().render_text()
    }
}
