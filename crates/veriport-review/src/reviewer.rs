use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use veriport_llm::{ChatModel, ChatRequest, LlmError};

use crate::payload::ReviewPayload;
use crate::prompts::ReviewerPrompts;

/// Inputs handed to the reviewer for one candidate
#[derive(Debug, Clone, Serialize)]
pub struct ReviewRequest {
    pub filename: String,
    pub target_language: String,
    pub original_code: String,
    pub candidate: String,
}

/// Errors from the reviewer capability itself.
///
/// An unparsable verdict is not an error; only the backend call failing
/// is. Callers rely on that distinction to separate fatal aborts from
/// ordinary revise outcomes.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("Reviewer backend error: {0}")]
    Backend(#[from] LlmError),
}

/// The reviewer capability: judges one candidate and returns an opaque
/// payload intended to carry a verdict.
#[async_trait]
pub trait Reviewer: Send + Sync {
    fn name(&self) -> &str;

    async fn review(&self, request: &ReviewRequest) -> Result<ReviewPayload, ReviewError>;
}

/// Reviewer backed by a chat model
pub struct LlmReviewer<'a> {
    model: &'a dyn ChatModel,
}

impl<'a> LlmReviewer<'a> {
    pub fn new(model: &'a dyn ChatModel) -> Self {
        Self { model }
    }
}

#[async_trait]
impl Reviewer for LlmReviewer<'_> {
    fn name(&self) -> &str {
        "Conversion Reviewer"
    }

    async fn review(&self, request: &ReviewRequest) -> Result<ReviewPayload, ReviewError> {
        let prompt = ChatRequest::new(
            ReviewerPrompts::system_prompt(&request.target_language),
            ReviewerPrompts::build_review_prompt(request),
        );

        debug!(
            filename = %request.filename,
            candidate_len = request.candidate.len(),
            "Running review"
        );

        let raw = self.model.complete(&prompt).await?;
        Ok(ReviewPayload::Text(raw))
    }
}
