pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::{SimulationConfig, Span};
pub use error::{Result, StemError};
pub use random::{RandomSource, ScriptedSource};
