use crate::reviewer::ReviewRequest;

/// Prompt templates for the reviewer
pub struct ReviewerPrompts;

impl ReviewerPrompts {
    /// System/backstory prompt for the reviewer role
    pub fn system_prompt(target_language: &str) -> String {
        format!(
            "You are a meticulous software reviewer ensuring a code conversion is \
             syntactically valid, complete, and functionally equivalent to the original. \
             You deeply compare algorithms, data structures, side-effects, I/O, error \
             handling, and edge cases. Approve only if the {target_language} output is \
             ready to run without missing logic. You return a strict JSON verdict for \
             automation."
        )
    }

    /// Build the review prompt for one candidate
    pub fn build_review_prompt(request: &ReviewRequest) -> String {
        format!(
            r#"Compare the original code and the converted code.

Return a STRICT JSON object with keys:
- verdict: one of ['approve', 'revise']
- feedback: short but concrete instructions for revision (if any)

Criteria:
- Syntactic correctness of converted code in {target_language}.
- Completeness and functional equivalence, including error handling and edge cases.
- Equivalent data flows, side-effects, and I/O behavior.

Response format must be ONLY JSON, no code fences, no commentary.

Original `{filename}` code:
<ORIGINAL_CODE>
{original_code}
</ORIGINAL_CODE>

Converted code candidate:
<CONVERTED_CODE>
{converted_code}
</CONVERTED_CODE>
"#,
            target_language = request.target_language,
            filename = request.filename,
            original_code = request.original_code,
            converted_code = request.candidate,
        )
    }
}
