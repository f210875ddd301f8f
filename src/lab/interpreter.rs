//! Keyword rules that turn lab setup text into simulation settings
//!
//! Each setup line is lower-cased and checked against [`SETUP_RULES`] in
//! table order. A matching rule overwrites whatever an earlier rule (or an
//! earlier line) set for the same field, so table order is precedence.

use crate::core::types::{Environment, FoodAvailability, Predation};
use crate::simulation::settings::{Settings, SettingsPatch};

/// When a rule fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Any of the phrases appears in the line
    Any(&'static [&'static str]),
    /// Every phrase appears in the line
    All(&'static [&'static str]),
}

impl Trigger {
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Trigger::Any(phrases) => phrases.iter().any(|p| line.contains(p)),
            Trigger::All(phrases) => phrases.iter().all(|p| line.contains(p)),
        }
    }
}

/// What a rule does once it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Environment(Environment),
    Predation(Predation),
    FoodAvailability(FoodAvailability),
    MutationRate(u8),
    /// Arctic prey start with pale coats
    FavorPaleCoat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupRule {
    pub trigger: Trigger,
    pub effect: Effect,
}

const fn rule(trigger: Trigger, effect: Effect) -> SetupRule {
    SetupRule { trigger, effect }
}

/// The full rule table, in evaluation order
pub const SETUP_RULES: &[SetupRule] = &[
    rule(Trigger::Any(&["desert"]), Effect::Environment(Environment::Desert)),
    rule(Trigger::Any(&["snow", "snowy", "arctic"]), Effect::Environment(Environment::Arctic)),
    rule(Trigger::Any(&["rocky"]), Effect::Environment(Environment::Desert)),
    rule(
        Trigger::Any(&["wolves", "predator", "introduce wolves"]),
        Effect::Predation(Predation::High),
    ),
    rule(
        Trigger::All(&["food availability", "tough"]),
        Effect::FoodAvailability(FoodAvailability::Low),
    ),
    rule(Trigger::Any(&["tough food"]), Effect::FoodAvailability(FoodAvailability::Low)),
    rule(Trigger::Any(&["mutat"]), Effect::MutationRate(8)),
    rule(Trigger::Any(&["white fur"]), Effect::FavorPaleCoat),
];

/// Settings a lab asks for, plus initialization hints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabDirective {
    pub patch: SettingsPatch,
    pub favor_pale_coat: bool,
}

impl LabDirective {
    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Environment(env) => self.patch.environment = Some(env),
            Effect::Predation(level) => self.patch.predation = Some(level),
            Effect::FoodAvailability(level) => self.patch.food_availability = Some(level),
            Effect::MutationRate(rate) => self.patch.mutation_rate = Some(rate),
            Effect::FavorPaleCoat => self.favor_pale_coat = true,
        }
    }

    /// Current settings with every field the lab named replaced
    pub fn resolve(&self, current: &Settings) -> Settings {
        current.merged(&self.patch)
    }
}

/// Scan setup lines (case-insensitive) against the rule table
pub fn interpret_setup<'a, I>(lines: I) -> LabDirective
where
    I: IntoIterator<Item = &'a str>,
{
    let mut directive = LabDirective::default();
    for line in lines {
        let text = line.to_lowercase();
        for rule in SETUP_RULES {
            if rule.trigger.matches(&text) {
                tracing::trace!("setup rule {:?} matched {:?}", rule.effect, line);
                directive.apply(rule.effect);
            }
        }
    }
    directive
}
