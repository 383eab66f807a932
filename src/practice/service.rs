//! Service seams between the session and the hosted language model

use async_trait::async_trait;

use super::error::PracticeError;
use super::generator::{self, GeneratedSentence, GenerationRequest, SeenSentences};
use super::reviewer::{self, ReviewOutcome};
use crate::gemini::GeminiError;

/// A single-turn text completion backend
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send one user prompt and return the generated text
    async fn complete(&self, prompt: &str) -> Result<String, GeminiError>;
}

/// The two operations a practice session needs
#[async_trait]
pub trait PracticeService: Send + Sync {
    /// Generate up to `request.count` new sentences, recording them in `seen`
    async fn generate(
        &self,
        request: &GenerationRequest,
        seen: &mut SeenSentences,
    ) -> Result<Vec<GeneratedSentence>, PracticeError>;

    /// Review a translation; never fails, see [`ReviewOutcome`]
    async fn review(&self, original_sentence: &str, user_answer: &str) -> ReviewOutcome;
}

/// Practice service backed by a language model
pub struct Tutor<M> {
    model: M,
}

impl<M: LanguageModel> Tutor<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

#[async_trait]
impl<M: LanguageModel> PracticeService for Tutor<M> {
    async fn generate(
        &self,
        request: &GenerationRequest,
        seen: &mut SeenSentences,
    ) -> Result<Vec<GeneratedSentence>, PracticeError> {
        generator::generate(&self.model, request, seen).await
    }

    async fn review(&self, original_sentence: &str, user_answer: &str) -> ReviewOutcome {
        reviewer::review(&self.model, original_sentence, user_answer).await
    }
}


#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::testing::ScriptedModel;
    use super::*;
    use crate::tense::Tense;

    #[tokio::test]
    async fn tutor_routes_generate_and_review_through_model() {
        let model = ScriptedModel::new()
            .reply("Я їм яблуко. [Present Simple]")
            .reply("Correct!");
        let tutor = Tutor::new(model);
        let request = GenerationRequest {
            tenses: BTreeSet::from([Tense::PresentSimple]),
            theme: None,
            count: 1,
        };
        let mut seen = SeenSentences::default();

        let sentences = tutor.generate(&request, &mut seen).await.unwrap();
        assert_eq!(sentences.len(), 1);
        assert!(seen.contains("Я їм яблуко."));

        let review = tutor.review("Я їм яблуко.", "I eat an apple").await;
        assert_eq!(review, ReviewOutcome::Feedback("Correct!".into()));
        assert_eq!(tutor.model().prompts().len(), 2);
    }
}
