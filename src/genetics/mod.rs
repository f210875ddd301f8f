//! Heritable traits and mutation

pub mod phenotype;

pub use phenotype::{clamp_trait, Phenotype, Trait, TRAIT_MAX, TRAIT_MIN};
