//! Translation review

use super::service::LanguageModel;

/// Shown instead of a review when the request fails
pub const REVIEW_FALLBACK: &str = "Failed to get review. Please try again.";

/// Result of a review request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// Free-form feedback from the model, whitespace-trimmed
    Feedback(String),
    /// The request failed; carries the fallback text to display
    Failed(String),
}

impl ReviewOutcome {
    pub fn is_feedback(&self) -> bool {
        matches!(self, Self::Feedback(_))
    }
}

pub fn build_prompt(original_sentence: &str, user_answer: &str) -> String {
    format!(
        "You are an English teacher. A student translated a Ukrainian sentence into English.\n\
         Ukrainian sentence: \"{original_sentence}\"\n\
         Student's translation: \"{user_answer}\"\n\
         \n\
         1. Say whether the translation is correct.\n\
         2. If it is not correct, give a corrected version and highlight what changed.\n\
         3. Briefly explain any mistakes.\n\
         Keep the answer short."
    )
}

/// Ask the model to review a translation
///
/// Failures are logged and turned into [`ReviewOutcome::Failed`].
pub async fn review<M: LanguageModel + ?Sized>(
    model: &M,
    original_sentence: &str,
    user_answer: &str,
) -> ReviewOutcome {
    let prompt = build_prompt(original_sentence, user_answer);

    match model.complete(&prompt).await {
        Ok(text) if !text.trim().is_empty() => ReviewOutcome::Feedback(text.trim().to_string()),
        Ok(_) => {
            tracing::warn!("Review came back empty");
            ReviewOutcome::Failed(REVIEW_FALLBACK.to_string())
        }
        Err(e) => {
            tracing::warn!("Review request failed: {}", e);
            ReviewOutcome::Failed(REVIEW_FALLBACK.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::practice::service::testing::{ScriptedModel, api_error};

    #[test]
    fn prompt_has_sentence_answer_and_three_parts() {
        let prompt = build_prompt("Я їм яблуко.", "I eat a apple");
        assert!(prompt.contains("\"Я їм яблуко.\""));
        assert!(prompt.contains("\"I eat a apple\""));
        assert!(prompt.contains("1. "));
        assert!(prompt.contains("2. "));
        assert!(prompt.contains("3. "));
    }

    #[tokio::test]
    async fn review_returns_trimmed_text_verbatim() {
        let model = ScriptedModel::new().reply("\n  **Incorrect.** Use *an apple*.\n\n");
        let outcome = review(&model, "Я їм яблуко.", "I eat a apple").await;
        assert_eq!(outcome, ReviewOutcome::Feedback("**Incorrect.** Use *an apple*.".into()));
        assert!(outcome.is_feedback());
    }

    #[tokio::test]
    async fn review_failure_yields_fallback() {
        let model = ScriptedModel::new().fail(api_error(500, "internal"));
        let outcome = review(&model, "Я їм яблуко.", "I eat a apple").await;
        assert_eq!(outcome, ReviewOutcome::Failed(REVIEW_FALLBACK.into()));
    }

    #[tokio::test]
    async fn empty_review_yields_fallback() {
        let model = ScriptedModel::new().reply("   ");
        let outcome = review(&model, "Він біжить.", "He runs").await;
        assert!(!outcome.is_feedback());
    }
}
