//! Lab descriptors as served by the course backend

use serde::{Deserialize, Serialize};

/// How demanding a lab is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningGoals {
    pub big_idea: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub success_criteria: Vec<String>,
}

/// One guided part of a lab
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabPart {
    pub part_id: u32,
    pub title: String,
    /// Instructions; the only text the simulator reads
    #[serde(default)]
    pub setup: Vec<String>,
    #[serde(default)]
    pub observations: Vec<String>,
    #[serde(default)]
    pub evidence: Vec<String>,
    #[serde(default)]
    pub predictions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScienceLab {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub discipline: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub sub_topic: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub learning_goals: LearningGoals,
    #[serde(default)]
    pub lab_parts: Vec<LabPart>,
}

impl ScienceLab {
    pub fn part(&self, part_id: u32) -> Option<&LabPart> {
        self.lab_parts.iter().find(|p| p.part_id == part_id)
    }

    /// Parts with the given id, or every part when `part_id` is `None`
    pub fn parts_matching(&self, part_id: Option<u32>) -> Vec<&LabPart> {
        match part_id {
            Some(id) => self.lab_parts.iter().filter(|p| p.part_id == id).collect(),
            None => self.lab_parts.iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAB_JSON: &str = r#"{
        "_id": "HS-LS4-2",
        "title": "Natural Selection Simulator",
        "difficulty": "Intermediate",
        "discipline": "Life Science",
        "topic": "Biological Evolution",
        "subTopic": "Natural Selection",
        "description": "Rabbits and wolves.",
        "learningGoals": { "bigIdea": "Adaptation", "objectives": [], "successCriteria": [] },
        "labParts": [
            { "partId": 1, "title": "Predators", "setup": ["Introduce wolves as a predator."],
              "observations": [], "evidence": [], "predictions": [] },
            { "partId": 2, "title": "Snow", "setup": ["Change to a snowy landscape."] }
        ],
        "_class": "edu.regis.stemulator.model.STEMLab"
    }"#;

    #[test]
    fn test_parse_backend_json() {
        let lab: ScienceLab = serde_json::from_str(LAB_JSON).unwrap();
        assert_eq!(lab.id, "HS-LS4-2");
        assert_eq!(lab.difficulty, Difficulty::Intermediate);
        assert_eq!(lab.sub_topic, "Natural Selection");
        assert_eq!(lab.lab_parts.len(), 2);
        assert!(lab.lab_parts[1].observations.is_empty());
    }

    #[test]
    fn test_part_selection() {
        let lab: ScienceLab = serde_json::from_str(LAB_JSON).unwrap();
        assert_eq!(lab.part(2).unwrap().title, "Snow");
        assert!(lab.part(3).is_none());
        assert_eq!(lab.parts_matching(Some(1)).len(), 1);
        assert_eq!(lab.parts_matching(None).len(), 2);
        assert!(lab.parts_matching(Some(7)).is_empty());
    }
}
