//! The population simulation engine
//!
//! One [`Simulation`] owns its state, its id allocator and its random source.
//! Callers mutate it only through the operations below and read it through
//! [`Simulation::state`] or an owned [`Simulation::snapshot`].

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::random::RandomSource;
use crate::core::types::Generation;
use crate::lab::interpreter::{interpret_setup, LabDirective};
use crate::lab::ScienceLab;
use crate::simulation::organism::{IdAllocator, Organism};
use crate::simulation::population::{initialize_population, InitOptions};
use crate::simulation::reproduction::{reproduce, ReproductionOutcome};
use crate::simulation::settings::{Settings, SettingsPatch};
use crate::simulation::state::{LabSnapshot, SimulationState};
use crate::simulation::statistics::update_statistics;
use crate::simulation::survival::{run_survival, SurvivalOutcome};

/// Summary of one completed generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    pub generation: Generation,
    pub survival: SurvivalOutcome,
    pub reproduction: ReproductionOutcome,
    pub alive: usize,
    pub prey: usize,
    pub predators: usize,
}

/// A single, self-contained population simulation
#[derive(Debug, Clone)]
pub struct Simulation<R: RandomSource = ChaCha8Rng> {
    config: SimulationConfig,
    state: SimulationState,
    ids: IdAllocator,
    rng: R,
}

impl Simulation<ChaCha8Rng> {
    /// Default configuration, seeded from OS entropy
    pub fn new() -> Self {
        let config = SimulationConfig::default();
        Self::build(config, ChaCha8Rng::from_entropy())
    }

    /// Default configuration with a reproducible seed
    pub fn with_seed(seed: u64) -> Self {
        Self::build(SimulationConfig::default(), ChaCha8Rng::seed_from_u64(seed))
    }

    /// Custom configuration; `None` seeds from OS entropy
    pub fn with_config(config: SimulationConfig, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::from_source(config, rng)
    }
}

impl Default for Simulation<ChaCha8Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Custom configuration driven by any random source
    pub fn from_source(config: SimulationConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    fn build(config: SimulationConfig, rng: R) -> Self {
        let mut sim = Self {
            state: SimulationState::new(Vec::new(), Settings::default()),
            ids: IdAllocator::new(),
            config,
            rng,
        };
        sim.state.organisms = sim.populate(InitOptions::default());
        sim
    }

    fn populate(&mut self, options: InitOptions) -> Vec<Organism> {
        initialize_population(
            self.config.initial_population,
            options,
            &self.config,
            &mut self.ids,
            &mut self.rng,
        )
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Borrowed view of the current state
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Owned copy of the current state; later changes are not reflected in it
    pub fn snapshot(&self) -> SimulationState {
        self.state.clone()
    }

    pub fn settings(&self) -> Settings {
        self.state.settings
    }

    pub fn generation(&self) -> Generation {
        self.state.generation
    }

    /// Merge a partial settings update and log it
    ///
    /// Fails without touching state if the patch carries an invalid value.
    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<()> {
        patch.validate()?;
        self.apply_patch(&patch);
        Ok(())
    }

    fn apply_patch(&mut self, patch: &SettingsPatch) {
        self.state.settings = self.state.settings.merged(patch);
        let described = serde_json::to_string(patch).unwrap_or_else(|_| "{}".to_string());
        self.state.actions.push(format!("Settings updated: {}", described));
    }

    /// Configure the simulation from a lab's setup text and repopulate
    ///
    /// Only parts whose id equals `part_id` are read (all parts when `None`).
    /// Settings no keyword mentions keep their current value. The population
    /// is rebuilt for the resolved environment and the history cleared; the
    /// generation counter is left alone.
    pub fn apply_lab(&mut self, lab: &ScienceLab, part_id: Option<u32>) -> LabDirective {
        let parts = lab.parts_matching(part_id);
        if parts.is_empty() {
            tracing::warn!(
                "Lab {} has no part {:?}; keeping current settings",
                lab.id,
                part_id
            );
        }

        let directive = interpret_setup(parts.iter().flat_map(|p| p.setup.iter().map(String::as_str)));
        let resolved = directive.resolve(&self.state.settings);
        self.apply_patch(&SettingsPatch::full(&resolved));

        let options = InitOptions {
            environment: resolved.environment,
            favor_pale_coat: directive.favor_pale_coat,
        };
        self.state.organisms = self.populate(options);
        self.state.population_history.clear();

        let part_label = part_id.map_or_else(|| "all".to_string(), |id| id.to_string());
        self.state
            .actions
            .push(format!("Applied lab {} part {}", lab.id, part_label));

        tracing::info!(
            "Applied lab {} part {}: {} / {} predation / {} food / mutation {}",
            lab.id,
            part_label,
            resolved.environment,
            resolved.predation,
            resolved.food_availability,
            resolved.mutation_rate
        );

        directive
    }

    /// Advance one generation: survive, reproduce, recompute statistics, log
    pub fn run_generation(&mut self) -> GenerationReport {
        self.state.generation += 1;
        let settings = self.state.settings;

        let survival = run_survival(&mut self.state.organisms, &settings, &self.config, &mut self.rng);

        let organisms = std::mem::take(&mut self.state.organisms);
        let (next, reproduction) = reproduce(organisms, &settings, &self.config, &mut self.ids, &mut self.rng);
        self.state.organisms = next;

        update_statistics(&mut self.state);

        let report = GenerationReport {
            generation: self.state.generation,
            survival,
            reproduction,
            alive: self.state.alive_count(),
            prey: self.state.alive_prey(),
            predators: self.state.alive_predators(),
        };

        self.state
            .actions
            .push(format!("Gen {}: {} alive", report.generation, report.alive));

        tracing::debug!(
            "Gen {}: prey {}/{} survived, predators {}/{} survived, +{} prey, +{} predators (+{} synthetic)",
            report.generation,
            survival.prey_survived,
            survival.prey_before,
            survival.predators_survived,
            survival.predators_before,
            reproduction.prey_offspring,
            reproduction.predator_offspring,
            reproduction.synthetic_predators
        );

        report
    }

    /// Run several generations back to back
    pub fn run(&mut self, generations: u32) -> Vec<GenerationReport> {
        (0..generations).map(|_| self.run_generation()).collect()
    }

    /// Discard the population, settings and history and start over
    ///
    /// The id allocator and the random source keep running, so organisms
    /// created after a reset never reuse an id handed out before it.
    pub fn reset(&mut self) {
        self.state = SimulationState::new(Vec::new(), Settings::default());
        self.state.organisms = self.populate(InitOptions::default());
        tracing::info!("Simulation reset");
    }

    /// Summary for the tutoring service
    pub fn lab_snapshot(&self) -> LabSnapshot {
        LabSnapshot::from_state(&self.state, self.config.snapshot_actions)
    }
}
