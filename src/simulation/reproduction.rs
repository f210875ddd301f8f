//! Reproduction pass
//!
//! Survivors carry over, the dead are dropped for good, and parents produce
//! mutated offspring until the carrying capacity of each role is reached.
//! Finally the predator population is topped up to the floor the predation
//! setting demands.

use crate::core::config::SimulationConfig;
use crate::core::random::RandomSource;
use crate::core::types::{Role, Vec2};
use crate::genetics::Phenotype;
use crate::simulation::organism::{IdAllocator, Organism};
use crate::simulation::settings::Settings;

/// What one reproduction pass added
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReproductionOutcome {
    pub prey_offspring: usize,
    pub predator_offspring: usize,
    /// Predators created from scratch to satisfy the predation floor
    pub synthetic_predators: usize,
}

/// Offspring per surviving prey parent before the fractional draw
///
/// base(survivors) * food * predation stress * density, where density falls
/// linearly with the number of survivors down to a floor.
pub fn effective_offspring(survivors: usize, settings: &Settings, config: &SimulationConfig) -> f64 {
    let base = if survivors < 6 {
        3.0
    } else if survivors < 15 {
        2.5
    } else {
        2.0
    };
    let density = (1.0 - survivors as f64 / config.density_divisor).max(config.density_floor);

    base * settings.food_availability.breeding_multiplier()
        * settings.predation.stress_multiplier()
        * density
}

/// Replace the population with survivors plus their offspring
///
/// Draw order: for each prey parent in order, per offspring two position
/// draws and three mutation draws, then one draw for the fractional extra;
/// then the same per predator parent; then synthetic predators (three trait
/// draws, two position draws each).
pub fn reproduce(
    organisms: Vec<Organism>,
    settings: &Settings,
    config: &SimulationConfig,
    ids: &mut IdAllocator,
    rng: &mut impl RandomSource,
) -> (Vec<Organism>, ReproductionOutcome) {
    let survivors: Vec<Organism> = organisms.into_iter().filter(|o| o.alive).collect();
    let prey_parents: Vec<Phenotype> = survivors
        .iter()
        .filter(|o| o.is_prey())
        .map(|o| o.phenotype)
        .collect();
    let predator_parents: Vec<Phenotype> = survivors
        .iter()
        .filter(|o| o.is_predator())
        .map(|o| o.phenotype)
        .collect();

    let mut next = survivors;
    let mut outcome = ReproductionOutcome::default();
    let mutation = settings.mutation_fraction();

    // Prey
    let mut prey_count = prey_parents.len();
    let per_parent = effective_offspring(prey_parents.len(), settings, config);
    let guaranteed = per_parent.floor() as usize;
    let extra_chance = per_parent.fract();

    'prey: for parent in &prey_parents {
        for _ in 0..guaranteed {
            if prey_count >= config.max_prey {
                break 'prey;
            }
            next.push(offspring(parent, Role::Prey, mutation, config, ids, rng));
            prey_count += 1;
            outcome.prey_offspring += 1;
        }
        if prey_count >= config.max_prey {
            break;
        }
        if rng.chance(extra_chance) {
            next.push(offspring(parent, Role::Prey, mutation, config, ids, rng));
            prey_count += 1;
            outcome.prey_offspring += 1;
        }
    }

    // Predators: every second survivor breeds once
    let mut predator_count = predator_parents.len();
    for parent in predator_parents.iter().step_by(2) {
        if predator_count >= config.max_predators {
            break;
        }
        next.push(offspring(parent, Role::Predator, mutation, config, ids, rng));
        predator_count += 1;
        outcome.predator_offspring += 1;
    }

    // Predation floor
    let floor = settings.predation.min_predators();
    while predator_count < floor {
        let phenotype = Phenotype::within(
            rng,
            config.synthetic_speed,
            config.synthetic_camouflage,
            config.synthetic_size,
        );
        let position = offspring_position(config, rng);
        next.push(Organism::new(ids.next_id(), Role::Predator, position, phenotype));
        predator_count += 1;
        outcome.synthetic_predators += 1;
    }

    (next, outcome)
}

fn offspring(
    parent: &Phenotype,
    role: Role,
    mutation: f64,
    config: &SimulationConfig,
    ids: &mut IdAllocator,
    rng: &mut impl RandomSource,
) -> Organism {
    let position = offspring_position(config, rng);
    let phenotype = parent.mutated(rng, mutation, config.mutation_span);
    Organism::new(ids.next_id(), role, position, phenotype)
}

fn offspring_position(config: &SimulationConfig, rng: &mut impl RandomSource) -> Vec2 {
    let x = rng.range(config.offspring_x.min, config.offspring_x.max);
    let y = rng.range(config.offspring_y.min, config.offspring_y.max);
    Vec2::new(x, y)
}
