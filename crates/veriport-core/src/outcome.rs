use serde::{Deserialize, Serialize};

/// The final outcome of one refinement loop run.
///
/// Never mutated after construction; earlier attempts' candidates are
/// superseded, not accumulated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Whether some attempt's verdict was "approve"
    pub approved: bool,
    /// Index of the approving attempt, or the configured maximum when
    /// no attempt approved
    pub attempt: usize,
    /// Approved candidate, or the last attempt's candidate
    pub candidate: Option<String>,
    /// Feedback from the deciding attempt
    pub feedback: Option<String>,
    /// Final verdict tag ("approve" or "revise")
    pub verdict: String,
}

impl ConversionResult {
    /// Result for the first approving attempt
    pub fn approved_at(
        attempt: usize,
        candidate: String,
        feedback: String,
        verdict: String,
    ) -> Self {
        Self {
            approved: true,
            attempt,
            candidate: Some(candidate),
            feedback: Some(feedback),
            verdict,
        }
    }

    /// Result when every attempt was exhausted without approval; keeps
    /// only the last attempt's candidate and feedback
    pub fn exhausted(attempts: usize, last_candidate: String, last_feedback: String) -> Self {
        Self {
            approved: false,
            attempt: attempts,
            candidate: (!last_candidate.is_empty()).then_some(last_candidate),
            feedback: (!last_feedback.is_empty()).then_some(last_feedback),
            verdict: "revise".to_string(),
        }
    }

    /// Process exit code for a run that completed normally
    pub fn exit_code(&self) -> i32 {
        if self.approved {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approved_result() {
        let result =
            ConversionResult::approved_at(2, "code".into(), "".into(), "approve".into());
        assert!(result.approved);
        assert_eq!(result.attempt, 2);
        assert_eq!(result.candidate.as_deref(), Some("code"));
        assert_eq!(result.exit_code(), 0);
    }

    #[test]
    fn test_exhausted_result_drops_empty_fields() {
        let result = ConversionResult::exhausted(3, String::new(), String::new());
        assert!(!result.approved);
        assert_eq!(result.attempt, 3);
        assert_eq!(result.candidate, None);
        assert_eq!(result.feedback, None);
        assert_eq!(result.verdict, "revise");
        assert_eq!(result.exit_code(), 1);
    }
}
