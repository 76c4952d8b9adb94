use std::io::Write;
use std::time::Duration;

use crate::error::ProbeError;
use crate::proc::Proc;
use crate::source::{Block, BlockSource, CHUNK_SIZE};

/// Value written into every byte of a claimed block.
pub const FILL_BYTE: u8 = 1;

/// Written once, with no line terminator, when the source runs dry.
pub const DIAGNOSTIC: &str = "Out of memory";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub chunk_size: usize,
    pub interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            chunk_size: CHUNK_SIZE,
            interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Terminated,
}

/// Outcome of a single iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Claimed { total: usize },
    Exhausted { total: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub blocks: usize,
    pub total: usize,
}

/// Claims `chunk_size` blocks from a [`BlockSource`] until it refuses one.
///
/// Every claimed block is filled with [`FILL_BYTE`] and kept alive for as long
/// as the probe lives.
pub struct Probe<S> {
    source: S,
    config: Config,
    state: State,
    total: usize,
    blocks: Vec<Block>,
}

impl<S: BlockSource> Probe<S> {
    pub fn new(source: S, config: Config) -> Result<Self, ProbeError> {
        if config.chunk_size == 0 {
            return Err(ProbeError::InvalidChunkSize);
        }

        Ok(Probe {
            source,
            config,
            state: State::Running,
            total: 0,
            blocks: Vec::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Bytes claimed so far.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs one iteration without pausing.
    ///
    /// Once the probe is terminated this only reports the final total.
    pub fn step(&mut self) -> Step {
        if self.state == State::Terminated {
            return Step::Exhausted { total: self.total };
        }

        // the slot retaining the block is an allocation too
        if self.blocks.try_reserve(1).is_err() {
            self.state = State::Terminated;
            return Step::Exhausted { total: self.total };
        }

        let Some(mut block) = self.source.acquire(self.config.chunk_size) else {
            self.state = State::Terminated;
            return Step::Exhausted { total: self.total };
        };

        block.fill(FILL_BYTE);
        self.total += self.config.chunk_size;
        self.blocks.push(block);

        if log_enabled!(log::Level::Debug) {
            match Proc::current().footprint() {
                Ok(mapped) => debug!(
                    "block #{} claimed, total: {} bytes, anonymous mapped: {} bytes",
                    self.blocks.len(),
                    self.total,
                    mapped
                ),
                Err(e) => debug!(
                    "block #{} claimed, total: {} bytes ({})",
                    self.blocks.len(),
                    self.total,
                    e
                ),
            }
        }

        Step::Claimed { total: self.total }
    }

    /// Loops until the source refuses a block, pausing `interval` after each
    /// claimed one, then writes [`DIAGNOSTIC`] to `out`.
    ///
    /// The diagnostic is written only by the call that observes the
    /// transition to [`State::Terminated`].
    pub fn run<W: Write>(&mut self, out: &mut W) -> Summary {
        let was_running = self.state == State::Running;

        loop {
            match self.step() {
                Step::Claimed { .. } => std::thread::sleep(self.config.interval),
                Step::Exhausted { .. } => break,
            }
        }

        if was_running {
            if let Err(e) = write!(out, "{}", DIAGNOSTIC).and_then(|_| out.flush()) {
                warn!("cannot write diagnostic: {}", e);
            }
        }

        let summary = Summary {
            blocks: self.blocks.len(),
            total: self.total,
        };
        info!(
            "source exhausted after {} blocks, {} bytes claimed",
            summary.blocks, summary.total
        );
        summary
    }
}
