//! Phenotype - the heritable traits an organism is selected on
//!
//! Every trait lives on the same 0-10 scale. Values are clamped whenever they
//! are created or mutated, so a phenotype can never leave that range.

use serde::{Deserialize, Serialize};

use crate::core::config::Span;
use crate::core::random::RandomSource;

/// Lowest value any trait can take
pub const TRAIT_MIN: f64 = 0.0;

/// Highest value any trait can take
pub const TRAIT_MAX: f64 = 10.0;

/// Clamp a raw trait value into the valid range
pub fn clamp_trait(value: f64) -> f64 {
    value.clamp(TRAIT_MIN, TRAIT_MAX)
}

/// The three evolvable traits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trait {
    Speed,
    Camouflage,
    Size,
}

impl Trait {
    pub const ALL: [Trait; 3] = [Trait::Speed, Trait::Camouflage, Trait::Size];
}

/// Heritable trait values of one organism (each 0-10)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Phenotype {
    /// Harder to catch
    pub speed: f64,
    /// Harder to find
    pub camouflage: f64,
    /// Slightly tougher
    pub size: f64,
}

impl Default for Phenotype {
    fn default() -> Self {
        Self {
            speed: 5.0,
            camouflage: 5.0,
            size: 5.0,
        }
    }
}

impl Phenotype {
    /// Build a phenotype, clamping each value into range
    pub fn new(speed: f64, camouflage: f64, size: f64) -> Self {
        Self {
            speed: clamp_trait(speed),
            camouflage: clamp_trait(camouflage),
            size: clamp_trait(size),
        }
    }

    /// Each trait drawn independently and uniformly from the full range
    ///
    /// Consumes three draws: speed, camouflage, size.
    pub fn uniform(rng: &mut impl RandomSource) -> Self {
        let speed = rng.range(TRAIT_MIN, TRAIT_MAX);
        let camouflage = rng.range(TRAIT_MIN, TRAIT_MAX);
        let size = rng.range(TRAIT_MIN, TRAIT_MAX);
        Self::new(speed, camouflage, size)
    }

    /// Each trait drawn from its own span
    pub fn within(rng: &mut impl RandomSource, speed: Span, camouflage: Span, size: Span) -> Self {
        let speed = rng.range(speed.min, speed.max);
        let camouflage = rng.range(camouflage.min, camouflage.max);
        let size = rng.range(size.min, size.max);
        Self::new(speed, camouflage, size)
    }

    /// Offspring phenotype: every trait jittered by up to `±span * fraction`
    ///
    /// `fraction` is the mutation rate on a 0-1 scale. Consumes three draws
    /// even when `fraction` is zero so the draw sequence stays aligned.
    pub fn mutated(&self, rng: &mut impl RandomSource, fraction: f64, span: f64) -> Self {
        let mut jitter = |value: f64| value + (rng.next_unit() - 0.5) * 2.0 * span * fraction;
        let speed = jitter(self.speed);
        let camouflage = jitter(self.camouflage);
        let size = jitter(self.size);
        Self::new(speed, camouflage, size)
    }

    pub fn get(&self, t: Trait) -> f64 {
        match t {
            Trait::Speed => self.speed,
            Trait::Camouflage => self.camouflage,
            Trait::Size => self.size,
        }
    }

    /// Whether every trait sits inside the valid range
    pub fn in_range(&self) -> bool {
        Trait::ALL
            .iter()
            .all(|t| (TRAIT_MIN..=TRAIT_MAX).contains(&self.get(*t)))
    }
}
