mod payload;
mod prompts;
mod reviewer;
mod verdict;

pub use payload::{ReviewPayload, ReviewVerdict};
pub use prompts::ReviewerPrompts;
pub use reviewer::{LlmReviewer, ReviewError, ReviewRequest, Reviewer};
pub use verdict::extract_verdict;
