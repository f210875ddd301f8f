//! STEMulator - generational predator-prey simulation for guided science labs

pub mod core;
pub mod genetics;
pub mod lab;
pub mod llm;
pub mod simulation;

pub use crate::core::error::{Result, StemError};
pub use crate::simulation::Simulation;
