//! Population initialization
//!
//! Builds a fresh prey/predator population, optionally biased toward the
//! traits a habitat favours. Used at construction, on reset and whenever a
//! lab configuration is applied.

use crate::core::config::SimulationConfig;
use crate::core::random::RandomSource;
use crate::core::types::{Environment, Role, Vec2};
use crate::genetics::{clamp_trait, Phenotype};
use crate::simulation::organism::{IdAllocator, Organism};

/// Options that shape a freshly initialised population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InitOptions {
    pub environment: Environment,
    /// Give arctic prey pale coats (camouflage floor)
    pub favor_pale_coat: bool,
}

/// Create `count` organisms: floor(count * prey_fraction) prey, the rest predators
///
/// Prey come first, ids are taken from `ids` without gaps. Draw order per
/// prey: three traits, environment bias, position. Per predator: three
/// traits, position.
pub fn initialize_population(
    count: usize,
    options: InitOptions,
    config: &SimulationConfig,
    ids: &mut IdAllocator,
    rng: &mut impl RandomSource,
) -> Vec<Organism> {
    let prey_count = ((count as f64 * config.prey_fraction).floor() as usize).min(count);
    let predator_count = count - prey_count;

    let mut organisms = Vec::with_capacity(count);

    for _ in 0..prey_count {
        let phenotype = biased_prey_phenotype(options, config, rng);
        let position = random_position(config, rng);
        organisms.push(Organism::new(ids.next_id(), Role::Prey, position, phenotype));
    }

    for _ in 0..predator_count {
        let phenotype = Phenotype::uniform(rng);
        let position = random_position(config, rng);
        organisms.push(Organism::new(ids.next_id(), Role::Predator, position, phenotype));
    }

    organisms
}

fn biased_prey_phenotype(
    options: InitOptions,
    config: &SimulationConfig,
    rng: &mut impl RandomSource,
) -> Phenotype {
    let mut speed = rng.range(0.0, 10.0);
    let mut camouflage = rng.range(0.0, 10.0);
    let mut size = rng.range(0.0, 10.0);

    match options.environment {
        Environment::Desert => {
            speed = clamp_trait(speed + rng.range(0.0, config.desert_speed_bias));
            size = clamp_trait(size - rng.range(0.0, config.desert_size_bias));
        }
        Environment::Arctic => {
            size = clamp_trait(size + rng.range(0.0, config.arctic_size_bias));
        }
        Environment::Forest => {}
    }

    if options.favor_pale_coat && options.environment == Environment::Arctic {
        camouflage = camouflage.max(config.pale_camouflage_floor);
    }

    Phenotype::new(speed, camouflage, size)
}

fn random_position(config: &SimulationConfig, rng: &mut impl RandomSource) -> Vec2 {
    let x = rng.range(0.0, config.canvas_width);
    let y = rng.range(0.0, config.canvas_height);
    Vec2::new(x, y)
}
