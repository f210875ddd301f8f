//! Simulation configuration with documented constants
//!
//! All magic numbers of the generational model are collected here so they can
//! be tuned from a TOML file without touching the step logic. Defaults
//! reproduce the classroom behaviour students see in the lab.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, StemError};

/// Inclusive range a random draw or clamp is confined to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

/// Configuration for the population simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === POPULATION ===
    /// Organisms created on construction, reset and lab application
    pub initial_population: usize,

    /// Fraction of the initial population created as prey (floor rounded)
    pub prey_fraction: f64,

    /// Hard ceiling on prey after reproduction (carrying capacity)
    pub max_prey: usize,

    /// Hard ceiling on predators after reproduction
    pub max_predators: usize,

    // === CANVAS ===
    /// Logical canvas width used for initial placement
    pub canvas_width: f64,

    /// Logical canvas height used for initial placement
    pub canvas_height: f64,

    /// Horizontal placement range for newborns
    pub offspring_x: Span,

    /// Vertical placement range for newborns
    pub offspring_y: Span,

    // === PREY SURVIVAL ===
    /// Survival probability before traits and pressures are applied
    pub prey_base_survival: f64,

    /// Survival gained per point of effective speed
    pub speed_weight: f64,

    /// Survival gained per point of effective camouflage
    pub camouflage_weight: f64,

    /// Survival gained per point of effective size
    pub size_weight: f64,

    /// Final prey survival probability is clamped into this range
    pub prey_survival_clamp: Span,

    /// Slope of the predator:prey crowding multiplier
    ///
    /// multiplier = min(density_multiplier_cap, 1 + ratio * slope)
    pub density_multiplier_slope: f64,

    /// Ceiling on the crowding multiplier
    pub density_multiplier_cap: f64,

    // === PREDATOR SURVIVAL ===
    /// Predator survival probability with no prey left
    pub predator_base_survival: f64,

    /// Survival gained when every prey individual survived the pass
    pub prey_ratio_weight: f64,

    /// Final predator survival probability is clamped into this range
    pub predator_survival_clamp: Span,

    // === REPRODUCTION ===
    /// Surviving-prey count the density factor reaches zero at
    pub density_divisor: f64,

    /// Lower bound on the prey density factor
    pub density_floor: f64,

    /// Mutation jitter half-width at mutation rate 10
    pub mutation_span: f64,

    /// Trait ranges for predators added to meet the predation floor
    pub synthetic_speed: Span,
    pub synthetic_camouflage: Span,
    pub synthetic_size: Span,

    // === INITIALIZATION BIAS ===
    /// Maximum random speed boost for desert prey
    pub desert_speed_bias: f64,

    /// Maximum random size reduction for desert prey
    pub desert_size_bias: f64,

    /// Maximum random size boost for arctic prey
    pub arctic_size_bias: f64,

    /// Camouflage floor for arctic prey when pale coats are favoured
    pub pale_camouflage_floor: f64,

    // === REPORTING ===
    /// Number of trailing action-log entries exposed in the lab snapshot
    pub snapshot_actions: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_population: 50,
            prey_fraction: 0.85,
            max_prey: 120,
            max_predators: 25,

            canvas_width: 800.0,
            canvas_height: 600.0,
            offspring_x: Span::new(10.0, 790.0),
            offspring_y: Span::new(15.0, 585.0),

            prey_base_survival: 0.8,
            speed_weight: 0.01,
            camouflage_weight: 0.012,
            size_weight: 0.005,
            prey_survival_clamp: Span::new(0.08, 0.95),
            density_multiplier_slope: 2.0,
            density_multiplier_cap: 1.6,

            predator_base_survival: 0.4,
            prey_ratio_weight: 0.45,
            predator_survival_clamp: Span::new(0.1, 0.9),

            density_divisor: 120.0,
            density_floor: 0.1,
            mutation_span: 1.5,
            synthetic_speed: Span::new(4.0, 8.0),
            synthetic_camouflage: Span::new(3.0, 7.0),
            synthetic_size: Span::new(5.0, 9.0),

            desert_speed_bias: 2.0,
            desert_size_bias: 3.0,
            arctic_size_bias: 3.0,
            pale_camouflage_floor: 7.0,

            snapshot_actions: 10,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Number of prey in a freshly initialised population
    pub fn initial_prey(&self) -> usize {
        (self.initial_population as f64 * self.prey_fraction).floor() as usize
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.initial_population == 0 {
            return Err(StemError::InvalidConfig(
                "initial_population must be positive".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.prey_fraction) {
            return Err(StemError::InvalidConfig(format!(
                "prey_fraction ({}) must lie in [0, 1]",
                self.prey_fraction
            )));
        }

        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(StemError::InvalidConfig("canvas must have positive extent".into()));
        }

        // The highest predation floor must fit under the predator cap
        if self.max_predators < 5 {
            return Err(StemError::InvalidConfig(format!(
                "max_predators ({}) must be at least 5",
                self.max_predators
            )));
        }

        if self.max_prey == 0 {
            return Err(StemError::InvalidConfig("max_prey must be positive".into()));
        }

        // Caps are only enforced on offspring, so the founders must already fit
        let initial_prey = self.initial_prey();
        if initial_prey > self.max_prey {
            return Err(StemError::InvalidConfig(format!(
                "initial prey ({}) exceeds max_prey ({})",
                initial_prey, self.max_prey
            )));
        }
        let initial_predators = self.initial_population - initial_prey;
        if initial_predators > self.max_predators {
            return Err(StemError::InvalidConfig(format!(
                "initial predators ({}) exceed max_predators ({})",
                initial_predators, self.max_predators
            )));
        }

        for (name, span) in [
            ("prey_survival_clamp", self.prey_survival_clamp),
            ("predator_survival_clamp", self.predator_survival_clamp),
            ("synthetic_speed", self.synthetic_speed),
            ("synthetic_camouflage", self.synthetic_camouflage),
            ("synthetic_size", self.synthetic_size),
            ("offspring_x", self.offspring_x),
            ("offspring_y", self.offspring_y),
        ] {
            if span.min > span.max {
                return Err(StemError::InvalidConfig(format!(
                    "{} has min {} above max {}",
                    name, span.min, span.max
                )));
            }
        }

        if self.density_divisor <= 0.0 {
            return Err(StemError::InvalidConfig("density_divisor must be positive".into()));
        }

        Ok(())
    }
}
