//! Structured evaluation of a student's lab responses
//!
//! The coach is asked for a strict JSON verdict. Only the outermost `{...}`
//! span of a reply is parsed, so fences and chatter around it are ignored.
//! Anything that still fails to parse degrades into a default verdict
//! carrying the raw text as feedback.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lab::{LabPart, ScienceLab};

/// Instructions fixing the reply schema
pub const EVALUATION_SYSTEM_PROMPT: &str = r#"You are an AI Science Coach evaluating a student's lab work in the STEMulator platform. You must be encouraging but honest. Evaluate the quality and scientific accuracy of their observations.

You MUST respond with ONLY valid JSON (no markdown fences, no extra text) in this exact schema:
{
  "overallScore": <number 0-100>,
  "feedback": "<2-3 sentence overall assessment>",
  "strengths": ["<strength 1>", "<strength 2>"],
  "areasForImprovement": ["<area 1>", "<area 2>"],
  "guidance": "<1-2 sentence next step recommendation>"
}"#;

/// Everything the coach needs to grade one lab part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    pub lab_title: String,
    pub discipline: String,
    pub topic: String,
    pub sub_topic: String,
    pub part_title: String,
    pub setup: Vec<String>,
    pub observations: Vec<String>,
    pub evidence: Vec<String>,
    pub predictions: Vec<String>,
    /// Prompt -> the student's answer
    pub student_responses: BTreeMap<String, String>,
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

impl EvaluationRequest {
    pub fn for_part(lab: &ScienceLab, part: &LabPart, student_responses: BTreeMap<String, String>) -> Self {
        Self {
            lab_title: lab.title.clone(),
            discipline: lab.discipline.clone(),
            topic: lab.topic.clone(),
            sub_topic: lab.sub_topic.clone(),
            part_title: part.title.clone(),
            setup: part.setup.clone(),
            observations: part.observations.clone(),
            evidence: part.evidence.clone(),
            predictions: part.predictions.clone(),
            student_responses,
        }
    }

    /// The user message sent alongside [`EVALUATION_SYSTEM_PROMPT`]
    pub fn user_prompt(&self) -> String {
        let answers = self
            .student_responses
            .iter()
            .map(|(key, value)| format!("- **{}:** {}", key, value))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "## Lab: {}\n\
             **Discipline:** {} | **Topic:** {} → {}\n\n\
             ### Part: {}\n\n\
             **Setup instructions given:**\n{}\n\n\
             **Observation prompts:**\n{}\n\n\
             **Evidence to record:**\n{}\n\n\
             **Predictions expected:**\n{}\n\n\
             ---\n\n\
             ### Student's Responses:\n{}\n\n\
             ---\n\n\
             Evaluate the student's responses for scientific accuracy, depth, and completeness. \
             Return ONLY the JSON object.",
            self.lab_title,
            self.discipline,
            self.topic,
            self.sub_topic,
            self.part_title,
            bullets(&self.setup),
            bullets(&self.observations),
            bullets(&self.evidence),
            bullets(&self.predictions),
            answers,
        )
    }
}

/// The coach's verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// 0-100
    pub overall_score: f64,
    pub feedback: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<String>,
    #[serde(default)]
    pub guidance: String,
}

impl Evaluation {
    /// Verdict used when the reply cannot be parsed
    pub fn fallback(raw: &str) -> Self {
        Self {
            overall_score: 70.0,
            feedback: raw.to_string(),
            strengths: vec!["Engagement with the simulation".into()],
            areas_for_improvement: vec!["Try to be more specific in your observations".into()],
            guidance: "Continue exploring different simulation parameters.".into(),
        }
    }

    /// Parse a coach reply, tolerating markdown fences and surrounding text
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Evaluation>(extract_json(raw)) {
            Ok(mut evaluation) => {
                evaluation.overall_score = evaluation.overall_score.clamp(0.0, 100.0);
                evaluation
            }
            Err(e) => {
                tracing::warn!("Unparseable evaluation reply ({}); using fallback", e);
                Self::fallback(raw)
            }
        }
    }
}

/// The outermost `{...}` span, dropping fences or prose around it
fn extract_json(raw: &str) -> &str {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => raw.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lab::natural_selection_lab;

    #[test]
    fn test_user_prompt_lists_part_and_answers() {
        let lab = natural_selection_lab();
        let part = lab.part(1).unwrap();
        let mut answers = BTreeMap::new();
        answers.insert("observation-1".to_string(), "Fewer rabbits survived.".to_string());
        let req = EvaluationRequest::for_part(&lab, part, answers);

        let prompt = req.user_prompt();
        assert!(prompt.starts_with("## Lab: Natural Selection Simulator\n"));
        assert!(prompt.contains("### Part: Introduction of Predators"));
        assert!(prompt.contains("- Introduce wolves as a predator."));
        assert!(prompt.contains("- **observation-1:** Fewer rabbits survived."));
        assert!(prompt.ends_with("Return ONLY the JSON object."));
    }

    #[test]
    fn test_parse_plain_json() {
        let raw = r#"{"overallScore": 88, "feedback": "Good.", "strengths": ["data"],
                      "areasForImprovement": ["detail"], "guidance": "Keep going."}"#;
        let eval = Evaluation::parse(raw);
        assert_eq!(eval.overall_score, 88.0);
        assert_eq!(eval.strengths, vec!["data".to_string()]);
        assert_eq!(eval.guidance, "Keep going.");
    }

    #[test]
    fn test_parse_fenced_json_and_clamp() {
        let raw = "```json\n{\"overallScore\": 140, \"feedback\": \"Wow\"}\n```";
        let eval = Evaluation::parse(raw);
        assert_eq!(eval.overall_score, 100.0);
        assert_eq!(eval.feedback, "Wow");
        assert!(eval.strengths.is_empty());
    }

    #[test]
    fn test_parse_any_fence_label() {
        for raw in [
            "```JSON\n{\"overallScore\": 64, \"feedback\": \"Ok\"}\n```",
            "```jso\n{\"overallScore\": 64, \"feedback\": \"Ok\"}```",
            "Here is my verdict: {\"overallScore\": 64, \"feedback\": \"Ok\"} Hope it helps!",
        ] {
            let eval = Evaluation::parse(raw);
            assert_eq!(eval.overall_score, 64.0, "reply not parsed: {}", raw);
            assert_eq!(eval.feedback, "Ok");
        }
    }

    #[test]
    fn test_parse_falls_back_on_prose() {
        let raw = "Nice work overall, but add more evidence.";
        let eval = Evaluation::parse(raw);
        assert_eq!(eval.overall_score, 70.0);
        assert_eq!(eval.feedback, raw);
        assert_eq!(eval.areas_for_improvement.len(), 1);
    }
}
