//! User-adjustable settings and the pressure tables they select
//!
//! Each setting keyword maps onto a fixed numeric effect. The lookups live on
//! the enums so the survival and reproduction passes never index a table with
//! an unknown key.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, StemError};
use crate::core::types::{Environment, FoodAvailability, Predation};

/// Highest accepted mutation rate (0-10 scale)
pub const MAX_MUTATION_RATE: u8 = 10;

/// Effective trait offsets an environment grants prey during survival
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TraitBonus {
    pub speed: f64,
    pub camouflage: f64,
    pub size: f64,
}

impl Environment {
    /// Trait bonuses applied to prey survival in this habitat
    pub fn trait_bonus(&self) -> TraitBonus {
        match self {
            Environment::Forest => TraitBonus { speed: 0.0, camouflage: 2.0, size: 0.0 },
            Environment::Desert => TraitBonus { speed: 1.0, camouflage: 0.0, size: -1.0 },
            Environment::Arctic => TraitBonus { speed: 0.0, camouflage: 1.0, size: 1.0 },
        }
    }
}

impl Predation {
    /// Base mortality subtracted from prey survival
    pub fn pressure(&self) -> f64 {
        match self {
            Predation::Low => 0.05,
            Predation::Medium => 0.18,
            Predation::High => 0.35,
        }
    }

    /// Breeding suppression under predator stress
    pub fn stress_multiplier(&self) -> f64 {
        match self {
            Predation::Low => 1.0,
            Predation::Medium => 0.85,
            Predation::High => 0.65,
        }
    }

    /// Predators guaranteed to exist after every generation
    pub fn min_predators(&self) -> usize {
        match self {
            Predation::Low => 1,
            Predation::Medium => 3,
            Predation::High => 5,
        }
    }
}

impl FoodAvailability {
    /// Starvation penalty subtracted from prey survival
    pub fn scarcity_penalty(&self) -> f64 {
        match self {
            FoodAvailability::Low => 0.20,
            FoodAvailability::Medium => 0.05,
            FoodAvailability::High => 0.0,
        }
    }

    /// Indirect effect on predator survival (more plants, more prey)
    pub fn predator_adjustment(&self) -> f64 {
        match self {
            FoodAvailability::Low => -0.05,
            FoodAvailability::Medium => 0.0,
            FoodAvailability::High => 0.05,
        }
    }

    /// Scales prey offspring per parent
    pub fn breeding_multiplier(&self) -> f64 {
        match self {
            FoodAvailability::Low => 0.4,
            FoodAvailability::Medium => 0.7,
            FoodAvailability::High => 1.0,
        }
    }
}

/// The four knobs a student (or a lab) can turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub environment: Environment,
    pub predation: Predation,
    pub food_availability: FoodAvailability,
    /// 0-10; divided by 10 for mutation jitter
    pub mutation_rate: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: Environment::Forest,
            predation: Predation::Medium,
            food_availability: FoodAvailability::Medium,
            mutation_rate: 5,
        }
    }
}

impl Settings {
    /// Mutation rate on a 0-1 scale
    pub fn mutation_fraction(&self) -> f64 {
        f64::from(self.mutation_rate) / 10.0
    }

    /// Copy of these settings with every field the patch names replaced
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        Self {
            environment: patch.environment.unwrap_or(self.environment),
            predation: patch.predation.unwrap_or(self.predation),
            food_availability: patch.food_availability.unwrap_or(self.food_availability),
            mutation_rate: patch.mutation_rate.unwrap_or(self.mutation_rate),
        }
    }
}

/// Partial settings update; `None` leaves a field untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predation: Option<Predation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_availability: Option<FoodAvailability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutation_rate: Option<u8>,
}

impl SettingsPatch {
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn predation(mut self, predation: Predation) -> Self {
        self.predation = Some(predation);
        self
    }

    pub fn food_availability(mut self, food: FoodAvailability) -> Self {
        self.food_availability = Some(food);
        self
    }

    pub fn mutation_rate(mut self, rate: u8) -> Self {
        self.mutation_rate = Some(rate);
        self
    }

    /// Patch that sets every field to the given settings
    pub fn full(settings: &Settings) -> Self {
        Self {
            environment: Some(settings.environment),
            predation: Some(settings.predation),
            food_availability: Some(settings.food_availability),
            mutation_rate: Some(settings.mutation_rate),
        }
    }

    /// Build a patch from raw keywords, failing on the first unknown value
    pub fn parse(
        environment: Option<&str>,
        predation: Option<&str>,
        food_availability: Option<&str>,
        mutation_rate: Option<i64>,
    ) -> Result<Self> {
        let patch = Self {
            environment: environment.map(str::parse).transpose()?,
            predation: predation.map(str::parse).transpose()?,
            food_availability: food_availability.map(str::parse).transpose()?,
            mutation_rate: mutation_rate
                .map(|rate| {
                    u8::try_from(rate).map_err(|_| StemError::invalid("mutationRate", rate))
                })
                .transpose()?,
        };
        patch.validate()?;
        Ok(patch)
    }

    /// Reject values the typed fields cannot rule out on their own
    pub fn validate(&self) -> Result<()> {
        if let Some(rate) = self.mutation_rate {
            if rate > MAX_MUTATION_RATE {
                return Err(StemError::invalid("mutationRate", rate));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
