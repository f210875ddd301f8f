//! Tutor integration: prompt context, evaluation contract, HTTP client

pub mod client;
pub mod context;
pub mod evaluation;

pub use client::{chat_with_coach, evaluate_student_work, ChatMessage, ChatRole, Coach, CoachClient};
pub use context::CoachContext;
pub use evaluation::{Evaluation, EvaluationRequest};
