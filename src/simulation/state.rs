//! Observable simulation state and the views derived from it

use serde::{Deserialize, Serialize};

use crate::core::types::{Environment, FoodAvailability, Generation, Predation, Role};
use crate::simulation::organism::{count_alive, Organism};
use crate::simulation::settings::Settings;

/// Trait values of currently living prey, one entry per individual
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitDistribution {
    pub speed: Vec<f64>,
    pub camouflage: Vec<f64>,
    pub size: Vec<f64>,
}

impl TraitDistribution {
    /// Recompute from the living prey in `organisms`
    pub fn from_living_prey(organisms: &[Organism]) -> Self {
        let mut dist = Self::default();
        for org in organisms.iter().filter(|o| o.alive && o.is_prey()) {
            dist.speed.push(org.phenotype.speed);
            dist.camouflage.push(org.phenotype.camouflage);
            dist.size.push(org.phenotype.size);
        }
        dist
    }

    pub fn len(&self) -> usize {
        self.speed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speed.is_empty()
    }

    /// Means of (speed, camouflage, size); zero when empty
    pub fn means(&self) -> (f64, f64, f64) {
        (mean(&self.speed), mean(&self.camouflage), mean(&self.size))
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Complete snapshot of one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    pub generation: Generation,
    /// Dead individuals stay here until the next reproduction pass drops them
    pub organisms: Vec<Organism>,
    #[serde(flatten)]
    pub settings: Settings,
    /// Alive count after each completed generation
    pub population_history: Vec<usize>,
    pub trait_distribution: TraitDistribution,
    /// Fraction of the living population that is prey
    pub survival_rate: f64,
    /// Human-readable event log
    pub actions: Vec<String>,
}

impl SimulationState {
    pub fn new(organisms: Vec<Organism>, settings: Settings) -> Self {
        Self {
            generation: 0,
            organisms,
            settings,
            population_history: Vec::new(),
            trait_distribution: TraitDistribution::default(),
            survival_rate: 0.0,
            actions: Vec::new(),
        }
    }

    pub fn environment(&self) -> Environment {
        self.settings.environment
    }

    pub fn predation(&self) -> Predation {
        self.settings.predation
    }

    pub fn food_availability(&self) -> FoodAvailability {
        self.settings.food_availability
    }

    pub fn mutation_rate(&self) -> u8 {
        self.settings.mutation_rate
    }

    pub fn alive_count(&self) -> usize {
        self.organisms.iter().filter(|o| o.alive).count()
    }

    pub fn alive_prey(&self) -> usize {
        count_alive(&self.organisms, Role::Prey)
    }

    pub fn alive_predators(&self) -> usize {
        count_alive(&self.organisms, Role::Predator)
    }

    /// The last `n` action-log entries, oldest first
    pub fn recent_actions(&self, n: usize) -> &[String] {
        let start = self.actions.len().saturating_sub(n);
        &self.actions[start..]
    }
}

/// Settings block of a [`LabSnapshot`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabParameters {
    pub predation: Predation,
    pub food_availability: FoodAvailability,
    pub mutation_rate: u8,
}

/// Compact summary handed to the tutoring service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabSnapshot {
    pub environment: Environment,
    pub parameters: LabParameters,
    pub current_population: usize,
    #[serde(rename = "last10Actions")]
    pub recent_actions: Vec<String>,
}

impl LabSnapshot {
    pub fn from_state(state: &SimulationState, action_window: usize) -> Self {
        Self {
            environment: state.settings.environment,
            parameters: LabParameters {
                predation: state.settings.predation,
                food_availability: state.settings.food_availability,
                mutation_rate: state.settings.mutation_rate,
            },
            current_population: state.alive_count(),
            recent_actions: state.recent_actions(action_window).to_vec(),
        }
    }
}
