//! Canned assistant responses.
//!
//! The simulated services answer with fixed text. Keeping that text in a
//! table lets configuration override it and lets tests assert
//! against named constants.

use serde::{Deserialize, Serialize};

/// Greeting seeded into every new conversation.
pub const GREETING: &str = "What can we help you with?";

/// Stage A acknowledgement.
pub const ANALYSIS_RESPONSE: &str = "I'm analyzing your medical data to prepare an evidence package for your claim. This will include your diagnosis, medication history, and treatment effectiveness.";

/// Stage B completion message.
pub const COMPLETION_RESPONSE: &str =
    "I've generated an evidence package based on your medical history. You can download it below.";

/// Appended when either stage fails or times out.
pub const FAILURE_RESPONSE: &str =
    "I wasn't able to finish preparing your evidence package. Please try again in a moment.";

/// File name of the generated package.
pub const DEFAULT_ARTIFACT_NAME: &str = "ClaimClear_Evidence_Package.pdf";

/// Transient indicator shown while `generating` is true.
pub const GENERATING_INDICATOR: &str = "Generating evidence package...";

/// Text of every assistant message the workflow can emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseTemplates {
    pub greeting: String,
    pub analysis: String,
    pub completion: String,
    pub failure: String,
}

impl Default for ResponseTemplates {
    fn default() -> Self {
        Self {
            greeting: GREETING.to_string(),
            analysis: ANALYSIS_RESPONSE.to_string(),
            completion: COMPLETION_RESPONSE.to_string(),
            failure: FAILURE_RESPONSE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let templates: ResponseTemplates = toml::from_str(r#"greeting = "Hello Edward""#).unwrap();

        assert_eq!(templates.greeting, "Hello Edward");
        assert_eq!(templates.analysis, ANALYSIS_RESPONSE);
        assert_eq!(templates.completion, COMPLETION_RESPONSE);
        assert_eq!(templates.failure, FAILURE_RESPONSE);
    }
}
