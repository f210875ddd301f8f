//! Generational predator-prey simulation
//!
//! One generation runs, in this order: the survival pass, the reproduction
//! pass, then statistics. Reproduction only sees organisms the survival pass
//! left alive, and statistics only see the population reproduction produced.

pub mod engine;
pub mod organism;
pub mod population;
pub mod reproduction;
pub mod settings;
pub mod state;
pub mod statistics;
pub mod survival;

pub use engine::{GenerationReport, Simulation};
pub use organism::{IdAllocator, Organism};
pub use population::{initialize_population, InitOptions};
pub use settings::{Settings, SettingsPatch, TraitBonus, MAX_MUTATION_RATE};
pub use state::{LabParameters, LabSnapshot, SimulationState, TraitDistribution};
