/// Environment variable holding the API key for the default backend
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable overriding the backend base URL
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Placeholder value shipped in .env templates; treated as missing
const PLACEHOLDER_KEY: &str = "your_openai_api_key_here";

/// Check the credential environment at startup.
///
/// Returns `Some(warning)` when the API key is absent or still the
/// placeholder. The caller decides how to surface it; a missing key is
/// not fatal here since calls fail with a backend error later.
pub fn credential_diagnostic() -> Option<String> {
    match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() && !key.trim().eq_ignore_ascii_case(PLACEHOLDER_KEY) => {
            None
        }
        _ => Some(format!(
            "{} is missing or a placeholder. Set a valid key in your environment or .env file.",
            API_KEY_VAR
        )),
    }
}
