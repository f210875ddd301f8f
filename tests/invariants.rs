//! Property tests for invariants that must hold after every generation

use proptest::prelude::*;

use stemulator::core::types::{Environment, FoodAvailability, Predation};
use stemulator::simulation::{SettingsPatch, Simulation};

fn environment() -> impl Strategy<Value = Environment> {
    prop::sample::select(Environment::ALL.to_vec())
}

fn predation() -> impl Strategy<Value = Predation> {
    prop::sample::select(Predation::ALL.to_vec())
}

fn food() -> impl Strategy<Value = FoodAvailability> {
    prop::sample::select(FoodAvailability::ALL.to_vec())
}

fn min_predators(level: Predation) -> usize {
    match level {
        Predation::Low => 1,
        Predation::Medium => 3,
        Predation::High => 5,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn generation_invariants_hold(
        seed in any::<u64>(),
        env in environment(),
        level in predation(),
        food in food(),
        rate in 0u8..=10,
        generations in 1u32..25,
    ) {
        let mut sim = Simulation::with_seed(seed);
        sim.update_settings(
            SettingsPatch::default()
                .environment(env)
                .predation(level)
                .food_availability(food)
                .mutation_rate(rate),
        ).unwrap();

        for step in 1..=generations {
            let report = sim.run_generation();
            let state = sim.state();

            prop_assert_eq!(state.generation, step);
            prop_assert_eq!(state.population_history.len(), step as usize);
            prop_assert!(report.prey <= 120);
            prop_assert!(report.predators <= 25);
            prop_assert!(report.predators >= min_predators(level));
            prop_assert!((0.0..=1.0).contains(&state.survival_rate));
            prop_assert_eq!(state.trait_distribution.len(), state.alive_prey());

            for o in &state.organisms {
                for value in [o.phenotype.speed, o.phenotype.camouflage, o.phenotype.size] {
                    prop_assert!((0.0..=10.0).contains(&value), "trait out of range: {}", value);
                }
            }
        }
    }

    #[test]
    fn ids_stay_unique(seed in any::<u64>(), generations in 1u32..15) {
        let mut sim = Simulation::with_seed(seed);
        sim.run(generations);
        let mut ids: Vec<u64> = sim.state().organisms.iter().map(|o| o.id.0).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
    }

    #[test]
    fn keyword_parsing_rejects_unknown(word in "[a-z]{3,10}") {
        let known = Environment::ALL.iter().any(|e| e.as_str() == word);
        let parsed = SettingsPatch::parse(Some(&word), None, None, None);
        prop_assert_eq!(parsed.is_ok(), known);
    }
}
