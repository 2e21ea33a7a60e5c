// main.rs - Headless runner: ticks a packed board on a fixed interval

use std::error::Error;
use std::path::PathBuf;

use packed_life::{Board, GenerationHistory, LifeResult, patterns};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod ui;

use config::RunnerConfig;

/// A board plus the run-loop bookkeeping around it.
pub struct Simulation {
    board: Board,
    history: GenerationHistory,
    config: RunnerConfig,
}

impl Simulation {
    pub fn new(config: RunnerConfig) -> LifeResult<Self> {
        let board = Board::from_config(&config.board)?;
        Ok(Self {
            board,
            history: GenerationHistory::default(),
            config,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Seeds the configured pattern, or a random fill when none is set.
    pub fn seed(&mut self) -> Result<(), Box<dyn Error>> {
        match &self.config.pattern {
            Some(name) => {
                let pattern = patterns::find(name).ok_or_else(|| format!("unknown pattern {name:?}"))?;
                self.board.seed_pattern(pattern, self.config.origin)?;
            }
            None => match self.config.seed {
                Some(seed) => self.board.seed_random_with(self.config.density, seed)?,
                None => self.board.seed_random(self.config.density)?,
            },
        }
        self.history.clear();
        self.history.check_for_cycle(self.board.state_hash());
        Ok(())
    }

    /// Advances one generation. Returns false once the run should stop.
    pub fn update_generation(&mut self) -> bool {
        let generation = self.board.advance();

        if self.config.render_every > 0 && generation % self.config.render_every == 0 {
            println!("{}", ui::frame(&self.board));
        }

        if self.config.stop_on_cycle && self.history.check_for_cycle(self.board.state_hash()) {
            info!(generation, population = self.board.population(), "board entered a cycle");
            return false;
        }
        if self.config.max_generations > 0 && generation >= self.config.max_generations {
            info!(generation, "generation limit reached");
            return false;
        }
        true
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = std::env::args().nth(1).map(PathBuf::from);
    let config = RunnerConfig::load(path.as_deref())?;
    let interval = config.tick_interval();

    let mut simulation = Simulation::new(config)?;
    simulation.seed()?;

    let board = simulation.board();
    info!(
        width = board.width(),
        height = board.height(),
        backend = board.backend_name(),
        population = board.population(),
        interval_ms = interval.as_millis() as u64,
        "simulation started"
    );
    println!("{}", ui::frame(board));

    let mut ticker = tokio::time::interval(interval);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if !simulation.update_generation() {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                warn!("interrupted");
                break;
            }
        }
    }

    println!("{}", ui::status_line(simulation.board()));
    Ok(())
}
