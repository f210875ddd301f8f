//! Built-in labs and loading lab lists from disk

use std::path::Path;

use crate::core::error::{Result, StemError};
use crate::lab::descriptor::{Difficulty, LabPart, LearningGoals, ScienceLab};

/// A lookup table of labs by id
#[derive(Debug, Clone, Default)]
pub struct LabCatalog {
    labs: Vec<ScienceLab>,
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl LabCatalog {
    pub fn new(labs: Vec<ScienceLab>) -> Self {
        Self { labs }
    }

    /// The labs shipped with the simulator
    pub fn builtin() -> Self {
        Self::new(vec![
            natural_selection_lab(),
            motion_and_forces_lab(),
            chemical_reactions_lab(),
        ])
    }

    /// Parse a JSON array of labs
    pub fn from_json_str(content: &str) -> Result<Self> {
        let labs: Vec<ScienceLab> = serde_json::from_str(content)?;
        Ok(Self::new(labs))
    }

    /// Load a JSON file holding either one lab or an array of labs
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        if content.trim_start().starts_with('[') {
            Self::from_json_str(&content)
        } else {
            let lab: ScienceLab = serde_json::from_str(&content)?;
            Ok(Self::new(vec![lab]))
        }
    }

    pub fn get(&self, id: &str) -> Result<&ScienceLab> {
        self.labs
            .iter()
            .find(|lab| lab.id == id || lab.lab_id.as_deref() == Some(id))
            .ok_or_else(|| StemError::LabNotFound(id.to_string()))
    }

    pub fn labs(&self) -> &[ScienceLab] {
        &self.labs
    }

    pub fn len(&self) -> usize {
        self.labs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labs.is_empty()
    }
}

/// The rabbits-and-wolves lab the simulator was built for
pub fn natural_selection_lab() -> ScienceLab {
    ScienceLab {
        id: "HS-LS4-2".into(),
        lab_id: None,
        title: "Natural Selection Simulator".into(),
        difficulty: Difficulty::Intermediate,
        discipline: "Life Science".into(),
        topic: "Biological Evolution: Unity and Diversity".into(),
        sub_topic: "Natural Selection".into(),
        description: "This virtual lab explores the principles of natural selection through a \
                      simulation where students manipulate various parameters affecting a rabbit \
                      population."
            .into(),
        learning_goals: LearningGoals {
            big_idea: "Natural selection is a key mechanism of evolution that leads to the \
                       adaptation of species to their environment."
                .into(),
            objectives: lines(&[
                "Describe how environmental factors influence natural selection.",
                "Analyze the impact of mutations on a population's traits.",
                "Evaluate the role of predators in shaping species adaptations.",
                "Predict outcomes based on changes in environmental conditions.",
            ]),
            success_criteria: lines(&[
                "Students can articulate how specific traits affect survival.",
                "Students can provide evidence from the simulation to support their conclusions.",
                "Students can accurately track and interpret data over generations.",
                "Students can make informed predictions about future population trends.",
            ]),
        },
        lab_parts: vec![LabPart {
            part_id: 1,
            title: "Introduction of Predators".into(),
            setup: lines(&[
                "Set initial population with a mix of fur colors.",
                "Introduce wolves as a predator.",
                "Observe the population changes over 10 generations.",
            ]),
            observations: lines(&[
                "How does changing the fur color affect the survival rate of rabbits?",
                "What happens to the population size when predators are introduced?",
                "How do environmental factors influence the traits of the rabbit population?",
            ]),
            evidence: lines(&[
                "Record the initial population size and composition.",
                "Document the survival rate of rabbits after introducing predators.",
                "Track changes in population size over several generations.",
            ]),
            predictions: lines(&[
                "What will happen to the brown fur rabbit population if the environment changes to a snowy landscape?",
                "How might the introduction of wolves affect the rabbits with long teeth?",
            ]),
        }],
    }
}

fn motion_and_forces_lab() -> ScienceLab {
    ScienceLab {
        id: "PH-MO-1".into(),
        lab_id: None,
        title: "Motion and Forces".into(),
        difficulty: Difficulty::Beginner,
        discipline: "Physics".into(),
        topic: "Motion and Forces".into(),
        sub_topic: "Kinematics".into(),
        description: "Explore kinematics and dynamics in interactive simulations.".into(),
        learning_goals: LearningGoals {
            big_idea: "Forces and motion govern the movement of objects.".into(),
            objectives: lines(&[
                "Describe the relationship between force, mass, and acceleration.",
                "Analyze motion using position, velocity, and acceleration graphs.",
            ]),
            success_criteria: lines(&[
                "Students can solve basic kinematics problems.",
                "Students can interpret motion graphs.",
            ]),
        },
        lab_parts: vec![LabPart {
            part_id: 1,
            title: "Constant Velocity".into(),
            setup: lines(&[
                "Set up a cart on a frictionless track.",
                "Apply a constant force.",
                "Observe motion over time.",
            ]),
            observations: lines(&["How does velocity change with constant force?"]),
            evidence: lines(&["Record position and velocity at intervals."]),
            predictions: lines(&["What happens if the force is doubled?"]),
        }],
    }
}

fn chemical_reactions_lab() -> ScienceLab {
    ScienceLab {
        id: "CH-RE-1".into(),
        lab_id: None,
        title: "Chemical Reactions".into(),
        difficulty: Difficulty::Intermediate,
        discipline: "Chemistry".into(),
        topic: "Chemical Reactions".into(),
        sub_topic: "Reaction Types".into(),
        description: "Visualize and experiment with chemical reactions.".into(),
        learning_goals: LearningGoals {
            big_idea: "Chemical reactions transform substances.".into(),
            objectives: lines(&["Identify different types of chemical reactions."]),
            success_criteria: lines(&[
                "Students can classify reactions by type.",
                "Students can balance chemical equations.",
            ]),
        },
        lab_parts: vec![LabPart {
            part_id: 1,
            title: "Synthesis Reaction".into(),
            setup: lines(&["Combine two elements in a beaker.", "Observe the reaction."]),
            observations: lines(&["What new substance is formed?"]),
            evidence: lines(&["Record reactants and products."]),
            predictions: lines(&["What happens if you change the ratio of reactants?"]),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let catalog = LabCatalog::builtin();
        assert_eq!(catalog.len(), 3);
        let lab = catalog.get("HS-LS4-2").unwrap();
        assert_eq!(lab.part(1).unwrap().setup.len(), 3);
        assert!(matches!(catalog.get("XX-00"), Err(StemError::LabNotFound(_))));
    }

    #[test]
    fn test_round_trip_through_json() {
        let catalog = LabCatalog::builtin();
        let json = serde_json::to_string(catalog.labs()).unwrap();
        assert!(json.contains("\"_id\":\"HS-LS4-2\""));
        assert!(json.contains("\"labParts\""));

        let reloaded = LabCatalog::from_json_str(&json).unwrap();
        assert_eq!(reloaded.labs(), catalog.labs());
    }

    #[test]
    fn test_lookup_by_secondary_id() {
        let mut lab = natural_selection_lab();
        lab.lab_id = Some("natural-selection".into());
        let catalog = LabCatalog::new(vec![lab]);
        assert_eq!(catalog.get("natural-selection").unwrap().id, "HS-LS4-2");
    }

    #[test]
    fn test_load_single_lab_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("stemulator-lab-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(&natural_selection_lab()).unwrap()).unwrap();
        let catalog = LabCatalog::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("HS-LS4-2").unwrap().title, "Natural Selection Simulator");
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(LabCatalog::from_json_str("{not json"), Err(StemError::Serde(_))));
    }
}
