use serde::{Deserialize, Serialize};

/// The canonical verdict/feedback pair derived from a reviewer response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewVerdict {
    /// Verdict tag; only the token "approve" (any case) approves
    pub verdict: String,
    /// Free-text revision instructions, possibly empty
    #[serde(default)]
    pub feedback: String,
}

impl ReviewVerdict {
    pub fn new(verdict: impl Into<String>, feedback: impl Into<String>) -> Self {
        Self {
            verdict: verdict.into(),
            feedback: feedback.into(),
        }
    }

    /// The worst-case result when nothing could be extracted
    pub fn empty() -> Self {
        Self::new("", "")
    }

    /// Comparison is case-insensitive; anything but "approve" is a revise
    pub fn is_approve(&self) -> bool {
        self.verdict.trim().eq_ignore_ascii_case("approve")
    }

    /// Lower-cased tag for logging and result records
    pub fn normalized_verdict(&self) -> String {
        self.verdict.trim().to_lowercase()
    }
}

/// Shapes a reviewer response can arrive in.
///
/// Agent frameworks wrap model output in extra layers, so the payload is
/// kept opaque here and the extractor peels the layers off.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewPayload {
    /// Already-typed verdict from a validated backend
    Structured(ReviewVerdict),
    /// Decoded JSON value, possibly a wrapper object
    Json(serde_json::Value),
    /// Raw model text, possibly fenced or prose-wrapped
    Text(String),
}

impl ReviewPayload {
    /// Best-effort text rendering, used as fallback feedback when the
    /// extracted feedback field is empty.
    pub fn raw_text(&self) -> String {
        match self {
            ReviewPayload::Structured(verdict) => verdict.feedback.clone(),
            ReviewPayload::Json(value) => value.to_string(),
            ReviewPayload::Text(text) => text.clone(),
        }
    }
}
