//! Async client for the coaching service
//!
//! The service speaks a chat-completions dialect: we post a list of role-tagged
//! messages and read back one reply. Callers depend on the [`Coach`] trait so
//! that anything able to answer a message list can stand in for the network.

use std::future::Future;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, StemError};
use crate::llm::context::CoachContext;
use crate::llm::evaluation::{Evaluation, EvaluationRequest, EVALUATION_SYSTEM_PROMPT};

/// Endpoint used when `STEMULATOR_API_URL` is unset
pub const DEFAULT_API_URL: &str = "http://localhost:8080/stemulator/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: ChatRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

/// Anything that can answer a conversation
pub trait Coach {
    fn complete(&self, messages: &[ChatMessage]) -> impl Future<Output = Result<String>> + Send;
}

/// HTTP implementation of [`Coach`]
#[derive(Debug, Clone)]
pub struct CoachClient {
    client: Client,
    endpoint: String,
}

impl CoachClient {
    /// `base_url` is the API root; `/chat/completions` is appended
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        }
    }

    /// Create a client from `STEMULATOR_API_URL`, falling back to [`DEFAULT_API_URL`]
    pub fn from_env() -> Self {
        let base = std::env::var("STEMULATOR_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        Self::new(&base)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask a free-form question about the running simulation
    pub async fn chat(
        &self,
        question: &str,
        context: &CoachContext,
        history: &[ChatMessage],
    ) -> Result<String> {
        chat_with_coach(self, question, context, history).await
    }

    /// Grade a student's answers for one lab part
    pub async fn evaluate(&self, request: &EvaluationRequest) -> Result<Evaluation> {
        evaluate_student_work(self, request).await
    }
}

impl Coach for CoachClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = ChatRequest { messages };

        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| StemError::Coach(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StemError::Coach(format!("API error {}: {}", status, error_text)));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| StemError::Coach(e.to_string()))?;

        extract_reply(completion)
    }
}

/// System prompt with live state, prior turns, then the new question
pub async fn chat_with_coach<C: Coach + ?Sized>(
    coach: &C,
    question: &str,
    context: &CoachContext,
    history: &[ChatMessage],
) -> Result<String> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(context.system_prompt()));
    messages.extend(history.iter().cloned());
    messages.push(ChatMessage::user(question));

    tracing::debug!("Asking coach ({} prior turns)", history.len());
    coach.complete(&messages).await
}

/// Request a JSON verdict and parse it leniently
pub async fn evaluate_student_work<C: Coach + ?Sized>(
    coach: &C,
    request: &EvaluationRequest,
) -> Result<Evaluation> {
    let messages = [
        ChatMessage::system(EVALUATION_SYSTEM_PROMPT),
        ChatMessage::user(request.user_prompt()),
    ];
    let raw = coach.complete(&messages).await?;
    let evaluation = Evaluation::parse(&raw);
    tracing::info!(
        "Evaluated part {:?} of {}: {:.0}/100",
        request.part_title,
        request.lab_title,
        evaluation.overall_score
    );
    Ok(evaluation)
}

/// Pull the reply text out of either response shape
fn extract_reply(response: ChatResponse) -> Result<String> {
    let text = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .or(response.content)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(StemError::Coach("Empty response".into()));
    }
    Ok(text)
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}
