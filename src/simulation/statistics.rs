//! Per-generation statistics

use crate::simulation::state::{SimulationState, TraitDistribution};

/// Record history and recompute composition and trait distribution
///
/// Must run after reproduction has produced the new population.
pub fn update_statistics(state: &mut SimulationState) {
    let alive = state.alive_count();
    let prey = state.alive_prey();

    state.population_history.push(alive);
    state.survival_rate = if alive > 0 {
        prey as f64 / alive as f64
    } else {
        0.0
    };
    state.trait_distribution = TraitDistribution::from_living_prey(&state.organisms);
}
