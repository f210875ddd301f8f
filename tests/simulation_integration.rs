//! Integration tests for the generation loop
//!
//! These run the engine end to end through its public operations:
//! - Seeded runs are reproducible
//! - History grows by one entry per generation
//! - High predation keeps prey under the cap
//! - Reset restores a fresh population

use std::collections::HashSet;

use stemulator::core::config::SimulationConfig;
use stemulator::core::random::ScriptedSource;
use stemulator::core::types::{Environment, FoodAvailability, Predation};
use stemulator::simulation::{Settings, SettingsPatch, Simulation};

#[test]
fn test_seeded_runs_are_identical() {
    let mut a = Simulation::with_seed(2024);
    let mut b = Simulation::with_seed(2024);
    let patch = SettingsPatch::default()
        .environment(Environment::Arctic)
        .mutation_rate(9);
    a.update_settings(patch).unwrap();
    b.update_settings(patch).unwrap();

    for _ in 0..15 {
        a.run_generation();
        b.run_generation();
        assert_eq!(a.snapshot(), b.snapshot());
    }
}

#[test]
fn test_scripted_source_runs_are_identical() {
    let script = [0.13, 0.71, 0.42, 0.99, 0.05, 0.64, 0.38];
    let config = SimulationConfig::default();
    let mut a = Simulation::from_source(config.clone(), ScriptedSource::new(script)).unwrap();
    let mut b = Simulation::from_source(config, ScriptedSource::new(script)).unwrap();
    a.run(8);
    b.run(8);
    assert_eq!(a.state(), b.state());
}

#[test]
fn test_history_tracks_each_generation() {
    let mut sim = Simulation::with_seed(5);
    let reports = sim.run(12);

    let state = sim.state();
    assert_eq!(state.generation, 12);
    assert_eq!(state.population_history.len(), 12);
    for (report, recorded) in reports.iter().zip(&state.population_history) {
        assert_eq!(report.alive, *recorded);
    }
    assert_eq!(*state.population_history.last().unwrap(), state.alive_count());
    assert_eq!(state.actions.last().unwrap(), &format!("Gen 12: {} alive", state.alive_count()));
}

#[test]
fn test_high_predation_stays_bounded() {
    let mut sim = Simulation::with_seed(77);
    sim.update_settings(SettingsPatch::default().predation(Predation::High))
        .unwrap();
    assert_eq!(sim.state().actions, vec![r#"Settings updated: {"predation":"high"}"#.to_string()]);

    for _ in 0..20 {
        let report = sim.run_generation();
        assert!(report.prey <= 120, "prey over cap: {}", report.prey);
        assert!(report.predators <= 25);
        assert!(report.predators >= 5, "predator floor broken: {}", report.predators);
        assert!((0.0..=1.0).contains(&sim.state().survival_rate));
    }
}

#[test]
fn test_scarce_food_in_desert() {
    let mut sim = Simulation::with_seed(9);
    sim.update_settings(
        SettingsPatch::default()
            .environment(Environment::Desert)
            .food_availability(FoodAvailability::Low)
            .predation(Predation::Low),
    )
    .unwrap();

    sim.run(10);
    let state = sim.state();
    assert!(state.alive_predators() >= 1);
    assert!(state.organisms.iter().all(|o| o.alive));
}

#[test]
fn test_ids_never_repeat_across_generations() {
    let mut sim = Simulation::with_seed(31);
    let mut seen: HashSet<u64> = sim.state().organisms.iter().map(|o| o.id.0).collect();
    let mut high_water = seen.iter().copied().max().unwrap();

    for _ in 0..10 {
        sim.run_generation();
        for organism in &sim.state().organisms {
            if seen.insert(organism.id.0) {
                assert!(organism.id.0 > high_water, "id {} reused or out of order", organism.id);
            }
        }
        high_water = seen.iter().copied().max().unwrap();
    }
}

#[test]
fn test_reset_restores_fresh_population() {
    let mut sim = Simulation::with_seed(14);
    sim.update_settings(SettingsPatch::default().predation(Predation::High))
        .unwrap();
    sim.run(6);
    let before: HashSet<u64> = sim.state().organisms.iter().map(|o| o.id.0).collect();
    let high_water = *before.iter().max().unwrap();

    sim.reset();
    let state = sim.state();
    assert_eq!(state.generation, 0);
    assert!(state.population_history.is_empty());
    assert!(state.actions.is_empty());
    assert_eq!(state.settings, Settings::default());
    assert_eq!(state.organisms.len(), 50);
    assert_eq!(state.alive_prey(), 42);
    assert_eq!(state.alive_predators(), 8);
    assert!(state.organisms.iter().all(|o| o.id.0 > high_water));
}

#[test]
fn test_invalid_update_leaves_state_alone() {
    let mut sim = Simulation::with_seed(4);
    let before = sim.snapshot();
    assert!(sim
        .update_settings(SettingsPatch::default().mutation_rate(11))
        .is_err());
    assert_eq!(sim.snapshot(), before);

    assert!(SettingsPatch::parse(Some("jungle"), None, None, None).is_err());
    assert!(SettingsPatch::parse(None, None, None, Some(-1)).is_err());
}

#[test]
fn test_state_serializes_with_wire_names() {
    let mut sim = Simulation::with_seed(8);
    sim.run(1);
    let json = serde_json::to_value(sim.state()).unwrap();

    assert_eq!(json["generation"], 1);
    assert_eq!(json["environment"], "forest");
    assert_eq!(json["foodAvailability"], "medium");
    assert_eq!(json["mutationRate"], 5);
    assert!(json["populationHistory"].is_array());
    assert!(json["traitDistribution"]["camouflage"].is_array());

    let first = &json["organisms"][0];
    assert!(first["x"].is_number());
    assert!(first["speed"].is_number());
    assert!(first["role"] == "prey" || first["role"] == "predator");
}
