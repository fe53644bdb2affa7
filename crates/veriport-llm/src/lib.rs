mod env;
mod model;
mod openai;

pub use env::{credential_diagnostic, API_KEY_VAR, BASE_URL_VAR};
pub use model::{ChatModel, ChatRequest, LlmError};
pub use openai::OpenAiModel;
