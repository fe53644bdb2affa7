use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use veriport_llm::{ChatModel, ChatRequest, LlmError};

use crate::prompts::ConverterPrompts;

/// Inputs for one conversion attempt.
///
/// Rebuilt each iteration; previous candidate and feedback are empty on
/// the first attempt.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionRequest {
    pub filename: String,
    pub target_language: String,
    pub original_code: String,
    pub previous_candidate: String,
    pub review_feedback: String,
}

/// Errors from the converter capability itself
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Converter backend error: {0}")]
    Backend(#[from] LlmError),
}

/// The converter capability: produces a translated-code candidate.
///
/// Empty output is not an error; it is reviewed as-is and will
/// typically fail review.
#[async_trait]
pub trait Converter: Send + Sync {
    fn name(&self) -> &str;

    async fn convert(&self, request: &ConversionRequest) -> Result<String, ConvertError>;
}

/// Converter backed by a chat model
pub struct LlmConverter<'a> {
    model: &'a dyn ChatModel,
}

impl<'a> LlmConverter<'a> {
    pub fn new(model: &'a dyn ChatModel) -> Self {
        Self { model }
    }
}

#[async_trait]
impl Converter for LlmConverter<'_> {
    fn name(&self) -> &str {
        "Code Converter"
    }

    async fn convert(&self, request: &ConversionRequest) -> Result<String, ConvertError> {
        let prompt = ChatRequest::new(
            ConverterPrompts::system_prompt(&request.target_language),
            ConverterPrompts::build_conversion_prompt(request),
        );

        debug!(
            filename = %request.filename,
            target_language = %request.target_language,
            has_feedback = !request.review_feedback.is_empty(),
            "Running conversion"
        );

        let candidate = self.model.complete(&prompt).await?;
        Ok(candidate.trim().to_string())
    }
}
