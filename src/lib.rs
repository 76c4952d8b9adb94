#[macro_use]
extern crate log;

pub mod error;
pub mod probe;
pub mod proc;
pub mod size;
pub mod source;

pub use crate::error::ProbeError;
pub use crate::probe::{Config, Probe, State, Step, Summary, DIAGNOSTIC, FILL_BYTE};
pub use crate::source::{Block, BlockSource, LimitedSource, SystemSource, CHUNK_SIZE};
