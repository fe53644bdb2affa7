use crate::converter::ConversionRequest;

/// Longest previous-candidate excerpt carried into the next prompt
const MAX_PREVIOUS_CANDIDATE_LEN: usize = 20_000;

/// Longest feedback excerpt carried into the next prompt
const MAX_FEEDBACK_LEN: usize = 4_000;

/// Prompt templates for the converter
pub struct ConverterPrompts;

impl ConverterPrompts {
    /// System/backstory prompt for the converter role
    pub fn system_prompt(target_language: &str) -> String {
        format!(
            "You are a seasoned polyglot software engineer with deep expertise in \
             translating codebases across languages while preserving functionality, \
             error handling, and edge cases. You convert source code into high-quality \
             {target_language} code that is functionally equivalent, idiomatic, and \
             complete. You produce clean, runnable code only."
        )
    }

    /// Build the conversion prompt for one attempt
    pub fn build_conversion_prompt(request: &ConversionRequest) -> String {
        format!(
            r#"You are given: (1) Original source file name `{filename}` and its code, (2) The target language `{target_language}`, and (3) Context about any previous attempt and reviewer feedback.

Tasks:
- Convert the original code to {target_language}.
- Preserve functionality, behavior, I/O, and error handling.
- Translate constructs idiomatically to the target language.
- Incorporate reviewer feedback (if provided).

Constraints:
- Output ONLY the full converted code, with no explanations.
- Do not wrap in code fences.

Context for this attempt (may be empty):
Previous attempt code (if any):
{previous_candidate}

Reviewer feedback (if any):
{review_feedback}

Original `{filename}` code:
<ORIGINAL_CODE>
{original_code}
</ORIGINAL_CODE>
"#,
            filename = request.filename,
            target_language = request.target_language,
            previous_candidate =
                truncate_at_line_boundary(&request.previous_candidate, MAX_PREVIOUS_CANDIDATE_LEN),
            review_feedback = truncate_at_line_boundary(&request.review_feedback, MAX_FEEDBACK_LEN),
            original_code = request.original_code,
        )
    }
}

/// Truncate carried-over context, preferring a line boundary
fn truncate_at_line_boundary(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }
    let cut = (0..=max_len)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0);
    match text[..cut].rfind('\n') {
        Some(pos) => &text[..pos],
        None => &text[..cut],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> ConversionRequest {
        ConversionRequest {
            filename: "report.cbl".to_string(),
            target_language: "python".to_string(),
            original_code: "DISPLAY 'HELLO'.".to_string(),
            previous_candidate: String::new(),
            review_feedback: String::new(),
        }
    }

    #[test]
    fn test_prompt_contains_original_code() {
        let prompt = ConverterPrompts::build_conversion_prompt(&sample_request());
        assert!(prompt.contains("report.cbl"));
        assert!(prompt.contains("DISPLAY 'HELLO'."));
        assert!(prompt.contains("python"));
    }

    #[test]
    fn test_prompt_carries_feedback() {
        let mut request = sample_request();
        request.previous_candidate = "print('HELO')".to_string();
        request.review_feedback = "typo in output string".to_string();
        let prompt = ConverterPrompts::build_conversion_prompt(&request);
        assert!(prompt.contains("print('HELO')"));
        assert!(prompt.contains("typo in output string"));
    }

    #[test]
    fn test_truncate_prefers_line_boundary() {
        let text = "line one\nline two\nline three";
        let truncated = truncate_at_line_boundary(text, 12);
        assert_eq!(truncated, "line one");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "é".repeat(10);
        let truncated = truncate_at_line_boundary(&text, 5);
        assert_eq!(truncated, "éé");
    }

    #[test]
    fn test_truncate_without_newline() {
        let text = "abcdefghij";
        assert_eq!(truncate_at_line_boundary(text, 4), "abcd");
        assert_eq!(truncate_at_line_boundary(text, 100), text);
    }
}
