//! Gather simulation context for coach prompts
//!
//! This module condenses the running simulation into the handful of numbers
//! a tutor needs to talk about it: settings, head counts, and the average
//! trait values of the living prey.

use serde::{Deserialize, Serialize};

use crate::core::types::{Environment, FoodAvailability, Generation, Predation};
use crate::lab::ScienceLab;
use crate::simulation::SimulationState;

/// Persona and ground rules for free-form coaching
const COACH_PERSONA: &str = "You are a friendly, encouraging AI Science Coach for a STEM education \
platform called STEMulator. You are guiding a student through a Natural Selection simulation lab.

Your role:
- Help students understand what's happening in their simulation
- Explain the biology concepts (natural selection, adaptation, survival of the fittest, predator-prey dynamics)
- Ask guiding questions to promote critical thinking rather than giving direct answers
- Relate observations back to real-world ecology
- Keep responses concise (2-4 paragraphs max) and appropriate for high-school / introductory college level";

/// Simulation summary for coach prompts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachContext {
    pub lab_title: String,
    pub discipline: String,
    pub topic: String,
    pub sub_topic: String,
    pub environment: Environment,
    pub predation: Predation,
    pub food_availability: FoodAvailability,
    pub mutation_rate: u8,
    pub generation: Generation,
    pub population_size: usize,
    pub prey_count: usize,
    pub predator_count: usize,
    pub survival_rate: f64,
    pub avg_speed: f64,
    pub avg_camouflage: f64,
    pub avg_size: f64,
}

impl CoachContext {
    /// Build a context from the current state and the lab being worked on
    pub fn from_state(state: &SimulationState, lab: &ScienceLab) -> Self {
        let (avg_speed, avg_camouflage, avg_size) = state.trait_distribution.means();
        Self {
            lab_title: lab.title.clone(),
            discipline: lab.discipline.clone(),
            topic: lab.topic.clone(),
            sub_topic: lab.sub_topic.clone(),
            environment: state.settings.environment,
            predation: state.settings.predation,
            food_availability: state.settings.food_availability,
            mutation_rate: state.settings.mutation_rate,
            generation: state.generation,
            population_size: state.alive_count(),
            prey_count: state.alive_prey(),
            predator_count: state.alive_predators(),
            survival_rate: state.survival_rate,
            avg_speed,
            avg_camouflage,
            avg_size,
        }
    }

    /// Markdown block describing the current simulation
    pub fn render(&self) -> String {
        format!(
            "## Current Simulation State\n\
             - **Lab:** {} ({} → {} → {})\n\
             - **Environment:** {}\n\
             - **Predation level:** {}\n\
             - **Food availability:** {}\n\
             - **Mutation rate:** {}/10\n\
             - **Generation:** {}\n\
             - **Total population:** {} ({} prey, {} predators)\n\
             - **Survival rate:** {:.0}%\n\
             - **Avg traits → speed:** {:.1}, **camouflage:** {:.1}, **size:** {:.1}",
            self.lab_title,
            self.discipline,
            self.topic,
            self.sub_topic,
            self.environment,
            self.predation,
            self.food_availability,
            self.mutation_rate,
            self.generation,
            self.population_size,
            self.prey_count,
            self.predator_count,
            self.survival_rate * 100.0,
            self.avg_speed,
            self.avg_camouflage,
            self.avg_size,
        )
    }

    /// System prompt for a coaching conversation
    pub fn system_prompt(&self) -> String {
        format!("{}\n\n{}", COACH_PERSONA, self.render())
    }
}
