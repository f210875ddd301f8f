//! Survival pass
//!
//! Every living organism faces one Bernoulli trial against a probability
//! derived from its traits and the current settings. Prey are judged first;
//! predators then read how many prey made it through the same pass.

use crate::core::config::SimulationConfig;
use crate::core::random::RandomSource;
use crate::core::types::{FoodAvailability, Role};
use crate::genetics::Phenotype;
use crate::simulation::organism::{count_alive, Organism};
use crate::simulation::settings::Settings;

/// Head counts before and after one survival pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurvivalOutcome {
    pub prey_before: usize,
    pub prey_survived: usize,
    pub predators_before: usize,
    pub predators_survived: usize,
}

/// Predator crowding multiplier on predation pressure
///
/// `min(cap, 1 + predators / prey * slope)`; no prey counts as ratio 0.
pub fn density_multiplier(predators: usize, prey: usize, config: &SimulationConfig) -> f64 {
    let ratio = if prey == 0 {
        0.0
    } else {
        predators as f64 / prey as f64
    };
    (1.0 + ratio * config.density_multiplier_slope).min(config.density_multiplier_cap)
}

/// Probability that a prey individual lives through this generation
pub fn prey_survival_probability(
    phenotype: &Phenotype,
    settings: &Settings,
    crowding: f64,
    config: &SimulationConfig,
) -> f64 {
    let bonus = settings.environment.trait_bonus();

    let p = config.prey_base_survival
        + config.speed_weight * (phenotype.speed + bonus.speed)
        + config.camouflage_weight * (phenotype.camouflage + bonus.camouflage)
        + config.size_weight * (phenotype.size + bonus.size)
        - settings.predation.pressure() * crowding
        - settings.food_availability.scarcity_penalty();

    config.prey_survival_clamp.clamp(p)
}

/// Probability that a predator lives through this generation
///
/// `prey_ratio` is the fraction of prey that survived the prey pass.
pub fn predator_survival_probability(
    prey_ratio: f64,
    food: FoodAvailability,
    config: &SimulationConfig,
) -> f64 {
    let p = config.predator_base_survival
        + config.prey_ratio_weight * prey_ratio
        + food.predator_adjustment();
    config.predator_survival_clamp.clamp(p)
}

/// Run the survival pass in place, flipping `alive` on organisms that die
///
/// Draw order: one draw per living prey in population order, then one per
/// living predator in population order.
pub fn run_survival(
    organisms: &mut [Organism],
    settings: &Settings,
    config: &SimulationConfig,
    rng: &mut impl RandomSource,
) -> SurvivalOutcome {
    let prey_before = count_alive(organisms, Role::Prey);
    let predators_before = count_alive(organisms, Role::Predator);
    let crowding = density_multiplier(predators_before, prey_before, config);

    // Prey
    for org in organisms.iter_mut().filter(|o| o.alive && o.is_prey()) {
        let p = prey_survival_probability(&org.phenotype, settings, crowding, config);
        org.alive = rng.chance(p);
    }

    let prey_survived = count_alive(organisms, Role::Prey);
    let prey_ratio = if prey_before == 0 {
        0.0
    } else {
        prey_survived as f64 / prey_before as f64
    };

    // Predators
    let p = predator_survival_probability(prey_ratio, settings.food_availability, config);
    for org in organisms.iter_mut().filter(|o| o.alive && o.is_predator()) {
        org.alive = rng.chance(p);
    }

    SurvivalOutcome {
        prey_before,
        prey_survived,
        predators_before,
        predators_survived: count_alive(organisms, Role::Predator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedSource;
    use crate::core::types::{Environment, OrganismId, Predation, Vec2};
    use crate::simulation::settings::SettingsPatch;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn population(prey: usize, predators: usize) -> Vec<Organism> {
        let mut orgs = Vec::new();
        let mut id = 0;
        for _ in 0..prey {
            orgs.push(Organism::new(OrganismId(id), Role::Prey, Vec2::default(), Phenotype::default()));
            id += 1;
        }
        for _ in 0..predators {
            orgs.push(Organism::new(OrganismId(id), Role::Predator, Vec2::default(), Phenotype::default()));
            id += 1;
        }
        orgs
    }

    #[test]
    fn test_density_multiplier() {
        let config = SimulationConfig::default();
        assert!(approx(density_multiplier(0, 10, &config), 1.0));
        assert!(approx(density_multiplier(1, 10, &config), 1.2));
        assert!(approx(density_multiplier(8, 42, &config), 1.0 + 16.0 / 42.0));
        assert!(approx(density_multiplier(10, 10, &config), 1.6));
        // No prey is treated as ratio zero
        assert!(approx(density_multiplier(5, 0, &config), 1.0));
    }

    #[test]
    fn test_prey_probability_formula() {
        let config = SimulationConfig::default();
        let settings = Settings::default(); // forest / medium / medium
        let p = prey_survival_probability(&Phenotype::new(5.0, 5.0, 5.0), &settings, 1.0, &config);
        // 0.8 + 0.05 + 0.012*7 + 0.025 - 0.18 - 0.05
        assert!(approx(p, 0.8 + 0.05 + 0.084 + 0.025 - 0.18 - 0.05));
    }

    #[test]
    fn test_prey_probability_clamped() {
        let config = SimulationConfig::default();
        let best = Settings::default()
            .merged(&SettingsPatch::default().predation(Predation::Low).food_availability(FoodAvailability::High));
        let p = prey_survival_probability(&Phenotype::new(10.0, 10.0, 10.0), &best, 1.0, &config);
        assert_eq!(p, 0.95);

        let worst = Settings::default().merged(
            &SettingsPatch::default()
                .environment(Environment::Desert)
                .predation(Predation::High)
                .food_availability(FoodAvailability::Low),
        );
        // 0.8 + 0.01 + 0 + 0.005*(-1) - 0.35*1.6 - 0.2 = 0.045 -> 0.08
        let p = prey_survival_probability(&Phenotype::new(0.0, 0.0, 0.0), &worst, 1.6, &config);
        assert_eq!(p, 0.08);
    }

    #[test]
    fn test_predator_probability() {
        let config = SimulationConfig::default();
        assert!(approx(predator_survival_probability(1.0, FoodAvailability::Medium, &config), 0.85));
        assert!(approx(predator_survival_probability(0.0, FoodAvailability::Low, &config), 0.35));
        assert!(approx(predator_survival_probability(1.0, FoodAvailability::High, &config), 0.9));
    }

    #[test]
    fn test_draw_below_probability_survives() {
        let config = SimulationConfig::default();
        let mut orgs = population(3, 2);
        let mut rng = ScriptedSource::constant(0.0);
        let outcome = run_survival(&mut orgs, &Settings::default(), &config, &mut rng);
        assert_eq!(outcome.prey_survived, 3);
        assert_eq!(outcome.predators_survived, 2);
        assert_eq!(rng.draws(), 5);
    }

    #[test]
    fn test_high_draw_kills_everyone() {
        let config = SimulationConfig::default();
        let mut orgs = population(4, 2);
        let mut rng = ScriptedSource::constant(0.99);
        let outcome = run_survival(&mut orgs, &Settings::default(), &config, &mut rng);
        assert_eq!(outcome.prey_before, 4);
        assert_eq!(outcome.prey_survived, 0);
        assert_eq!(outcome.predators_survived, 0);
        assert!(orgs.iter().all(|o| !o.alive));
    }

    #[test]
    fn test_predators_read_prey_outcome() {
        // Prey all die (draw 0.5 against p ~0.3 under high pressure), then
        // predators face 0.4 + 0 = 0.4 and the same 0.5 draw kills them.
        // With every prey surviving instead, predators face 0.85 and live.
        let config = SimulationConfig::default();
        let settings = Settings::default().merged(&SettingsPatch::default().predation(Predation::High));

        let mut orgs = population(2, 2);
        for org in orgs.iter_mut().filter(|o| o.is_prey()) {
            org.phenotype = Phenotype::new(0.0, 0.0, 0.0);
        }
        let mut rng = ScriptedSource::constant(0.5);
        let outcome = run_survival(&mut orgs, &settings, &config, &mut rng);
        assert_eq!(outcome.prey_survived, 0);
        assert_eq!(outcome.predators_survived, 0);

        let mut orgs = population(2, 2);
        let mut rng = ScriptedSource::new(vec![0.0, 0.0, 0.5, 0.5]);
        let outcome = run_survival(&mut orgs, &settings, &config, &mut rng);
        assert_eq!(outcome.prey_survived, 2);
        assert_eq!(outcome.predators_survived, 2);
    }

    #[test]
    fn test_dead_organisms_draw_nothing() {
        let config = SimulationConfig::default();
        let mut orgs = population(3, 1);
        orgs[0].alive = false;
        let mut rng = ScriptedSource::constant(0.0);
        run_survival(&mut orgs, &Settings::default(), &config, &mut rng);
        assert_eq!(rng.draws(), 3);
        assert!(!orgs[0].alive);
    }
}
