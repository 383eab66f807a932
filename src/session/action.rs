//! Session transitions
//!
//! [`SessionState::apply`] is a pure transition function: it mutates the
//! state for one action and returns the request, if any, the caller must
//! run. Request completions come back in as actions.

use crate::practice::{
    GeneratedSentence, GenerationRequest, PracticeError, ReviewOutcome, SeenSentences, SetupError,
};
use crate::tense::Tense;

use super::state::{PracticeItem, PracticeSession, Screen, SessionConfig, SessionState};

/// Everything that can change the session
#[derive(Debug)]
pub enum Action {
    ToggleTense(Tense),
    SetTheme(String),
    SetSentenceCount(u32),
    ToggleShowTense,
    SetAnswer(String),
    /// Start a practice session with the current configuration
    Begin,
    /// Generation finished; hands the seen set back
    SentencesGenerated {
        seen: SeenSentences,
        result: Result<Vec<GeneratedSentence>, PracticeError>,
    },
    /// Ask for a review of the current answer
    SubmitAnswer,
    ReviewReceived(ReviewOutcome),
    /// Advance, or finish on the last item
    Next,
    /// Abandon the practice session, keeping the configuration
    Restart,
}

/// Request the caller must run after a transition
#[derive(Debug, Default, PartialEq, Eq)]
pub enum Effect {
    #[default]
    None,
    Generate {
        request: GenerationRequest,
        seen: SeenSentences,
    },
    Review {
        original_sentence: String,
        user_answer: String,
    },
}

impl SessionState {
    /// Apply one action and return the request it triggers
    pub fn apply(&mut self, action: Action) -> Effect {
        match action {
            Action::ToggleShowTense => {
                self.show_tense = !self.show_tense;
                Effect::None
            }
            Action::SentencesGenerated { seen, result } => {
                self.on_sentences_generated(seen, result);
                Effect::None
            }
            Action::ReviewReceived(outcome) => {
                self.on_review_received(outcome);
                Effect::None
            }
            action if self.status.loading => {
                tracing::debug!("Ignoring {:?} while a request is outstanding", action);
                Effect::None
            }
            Action::ToggleTense(tense) => {
                if self.status.screen == Screen::Start {
                    self.config.toggle_tense(tense);
                }
                Effect::None
            }
            Action::SetTheme(theme) => {
                if self.status.screen == Screen::Start {
                    self.config.theme = theme;
                }
                Effect::None
            }
            Action::SetSentenceCount(count) => {
                if self.status.screen == Screen::Start {
                    self.config.set_sentence_count(count);
                }
                Effect::None
            }
            Action::SetAnswer(answer) => {
                if self.status.screen == Screen::Practice {
                    self.answer = answer;
                }
                Effect::None
            }
            Action::Begin => self.begin(),
            Action::SubmitAnswer => self.submit_answer(),
            Action::Next => {
                self.next();
                Effect::None
            }
            Action::Restart => {
                self.restart();
                Effect::None
            }
        }
    }

    fn begin(&mut self) -> Effect {
        if self.status.screen != Screen::Start {
            return Effect::None;
        }
        if let Err(e) = self.config.validate() {
            self.status.last_error = Some(e.to_string());
            return Effect::None;
        }

        tracing::info!(
            "Beginning practice: {} sentences, {} tenses",
            self.config.sentence_count,
            self.config.tenses.len()
        );
        self.seen.clear();
        self.practice = PracticeSession::default();
        self.status.loading = true;
        self.status.last_error = None;

        Effect::Generate { request: self.config.to_request(), seen: std::mem::take(&mut self.seen) }
    }

    fn on_sentences_generated(
        &mut self,
        seen: SeenSentences,
        result: Result<Vec<GeneratedSentence>, PracticeError>,
    ) {
        if !self.status.loading || self.status.screen != Screen::Start {
            tracing::debug!("Ignoring stale generation result");
            return;
        }
        self.status.loading = false;
        self.seen = seen;

        match result {
            Ok(sentences) if !sentences.is_empty() => {
                let items: Vec<PracticeItem> = sentences.into_iter().map(PracticeItem::from).collect();
                tracing::info!("Practice started with {} sentences", items.len());
                self.practice = PracticeSession::new(items);
                self.answer.clear();
                self.review.clear();
                self.status.last_error = None;
                self.status.screen = Screen::Practice;
            }
            Ok(_) => {
                self.practice = PracticeSession::default();
                self.status.last_error = Some(PracticeError::NoSentences.to_string());
            }
            Err(e) => {
                if e.is_recoverable() {
                    tracing::warn!("Sentence generation failed: {}", e);
                } else {
                    tracing::error!("Sentence generation failed: {}", e);
                }
                self.practice = PracticeSession::default();
                self.status.last_error = Some(if e.requires_reauth() {
                    format!("{} Update the key with `tense-trainer key set <KEY>`.", e)
                } else {
                    e.to_string()
                });
            }
        }
    }

    fn submit_answer(&mut self) -> Effect {
        if self.status.screen != Screen::Practice {
            return Effect::None;
        }
        let answer = self.answer.trim().to_string();
        if answer.is_empty() {
            self.status.last_error = Some(SetupError::EmptyAnswer.to_string());
            return Effect::None;
        }
        let Some(item) = self.practice.current_mut() else {
            return Effect::None;
        };

        item.user_answer = answer.clone();
        let original_sentence = item.original_sentence.clone();
        self.status.loading = true;
        self.status.last_error = None;

        Effect::Review { original_sentence, user_answer: answer }
    }

    fn on_review_received(&mut self, outcome: ReviewOutcome) {
        if !self.status.loading || self.status.screen != Screen::Practice {
            tracing::debug!("Ignoring stale review");
            return;
        }
        self.status.loading = false;

        match outcome {
            ReviewOutcome::Feedback(text) => {
                if let Some(item) = self.practice.current_mut() {
                    item.review = text.clone();
                }
                self.review = text;
                self.status.last_error = None;
            }
            ReviewOutcome::Failed(fallback) => {
                self.status.last_error = Some(fallback);
            }
        }
    }

    fn next(&mut self) {
        if self.status.screen != Screen::Practice {
            return;
        }
        let reviewed = self.practice.current().is_some_and(PracticeItem::is_reviewed);
        if !reviewed {
            tracing::debug!("Next ignored: current sentence has no review yet");
            return;
        }

        if self.practice.advance() {
            self.answer.clear();
            self.review.clear();
            self.status.last_error = None;
        } else {
            self.finish();
        }
    }

    fn finish(&mut self) {
        tracing::info!("Practice finished after {} sentences", self.practice.len());
        self.config = SessionConfig::default();
        self.clear_practice();
    }

    fn restart(&mut self) {
        if self.status.screen != Screen::Practice {
            return;
        }
        tracing::info!("Practice abandoned at sentence {}", self.practice.index() + 1);
        self.clear_practice();
    }

    fn clear_practice(&mut self) {
        self.practice = PracticeSession::default();
        self.seen.clear();
        self.answer.clear();
        self.review.clear();
        self.status.last_error = None;
        self.status.screen = Screen::Start;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::gemini::GeminiError;
    use crate::practice::REVIEW_FALLBACK;

    fn generated(sentence: &str) -> GeneratedSentence {
        GeneratedSentence { sentence: sentence.into(), tense: "Present Simple".into() }
    }

    fn configured() -> SessionState {
        let mut state = SessionState::default();
        state.apply(Action::ToggleTense(Tense::PresentSimple));
        state.apply(Action::SetSentenceCount(2));
        state
    }

    /// Begin and complete generation with the given sentences
    fn practising(sentences: &[&str]) -> SessionState {
        let mut state = configured();
        let Effect::Generate { seen, .. } = state.apply(Action::Begin) else {
            panic!("expected generate effect");
        };
        let result = Ok(sentences.iter().map(|s| generated(s)).collect());
        state.apply(Action::SentencesGenerated { seen, result });
        state
    }

    fn reviewed(state: &mut SessionState, text: &str) {
        state.apply(Action::SetAnswer("some answer".into()));
        assert!(matches!(state.apply(Action::SubmitAnswer), Effect::Review { .. }));
        state.apply(Action::ReviewReceived(ReviewOutcome::Feedback(text.into())));
    }

    #[test]
    fn begin_without_tense_is_rejected_locally() {
        let mut state = SessionState::default();
        assert_eq!(state.apply(Action::Begin), Effect::None);
        assert_eq!(state.last_error(), Some("Please select at least one tense."));
        assert!(!state.is_loading());
        assert_eq!(state.screen(), Screen::Start);
    }

    #[test]
    fn begin_emits_generate_and_sets_loading() {
        let mut state = configured();
        state.status.last_error = Some("old".into());
        state.seen.insert("leftover");
        state.apply(Action::SetTheme("school".into()));

        let effect = state.apply(Action::Begin);
        let Effect::Generate { request, seen } = effect else {
            panic!("expected generate effect");
        };
        assert_eq!(request.count, 2);
        assert_eq!(request.theme.as_deref(), Some("school"));
        assert!(request.tenses.contains(&Tense::PresentSimple));
        assert!(seen.is_empty());
        assert!(state.is_loading());
        assert_eq!(state.last_error(), None);
    }

    #[test]
    fn generation_success_enters_practice_at_first_item() {
        let state = practising(&["Я їм яблуко.", "Він біжить."]);

        assert_eq!(state.screen(), Screen::Practice);
        assert!(!state.is_loading());
        assert_eq!(state.practice.index(), 0);
        assert_eq!(
            state.practice.items(),
            &[
                PracticeItem {
                    original_sentence: "Я їм яблуко.".into(),
                    tense_used: "Present Simple".into(),
                    user_answer: String::new(),
                    review: String::new(),
                },
                PracticeItem {
                    original_sentence: "Він біжить.".into(),
                    tense_used: "Present Simple".into(),
                    user_answer: String::new(),
                    review: String::new(),
                },
            ]
        );
    }

    #[test]
    fn generation_failure_stays_on_start_with_error() {
        let mut state = configured();
        let Effect::Generate { seen, .. } = state.apply(Action::Begin) else {
            panic!("expected generate effect");
        };
        let err =
            PracticeError::Model(GeminiError::ApiError { status: 503, message: "overloaded".into() });
        state.apply(Action::SentencesGenerated { seen, result: Err(err) });

        assert_eq!(state.screen(), Screen::Start);
        assert!(!state.is_loading());
        assert!(state.practice.is_empty());
        assert_eq!(state.last_error(), Some("API error (503): overloaded"));
    }

    #[test]
    fn rejected_key_error_points_at_key_command() {
        let mut state = configured();
        let Effect::Generate { seen, .. } = state.apply(Action::Begin) else {
            panic!("expected generate effect");
        };
        let err = PracticeError::Model(GeminiError::ApiError { status: 403, message: "denied".into() });
        state.apply(Action::SentencesGenerated { seen, result: Err(err) });

        assert_eq!(
            state.last_error(),
            Some("API error (403): denied Update the key with `tense-trainer key set <KEY>`.")
        );
    }

    #[test]
    fn empty_generation_result_is_an_error() {
        let state = practising(&[]);
        assert_eq!(state.screen(), Screen::Start);
        assert_eq!(state.last_error(), Some("Could not generate sentences. Please try again."));
    }

    #[test]
    fn actions_are_ignored_while_loading() {
        let mut state = configured();
        assert!(matches!(state.apply(Action::Begin), Effect::Generate { .. }));
        assert_eq!(state.apply(Action::Begin), Effect::None);
        state.apply(Action::ToggleTense(Tense::PastSimple));
        assert!(!state.config.tenses.contains(&Tense::PastSimple));

        let mut state = practising(&["А."]);
        state.apply(Action::SetAnswer("A".into()));
        assert!(matches!(state.apply(Action::SubmitAnswer), Effect::Review { .. }));
        assert_eq!(state.apply(Action::SubmitAnswer), Effect::None);
        state.apply(Action::Next);
        state.apply(Action::Restart);
        assert_eq!(state.screen(), Screen::Practice);
    }

    #[test]
    fn submit_requires_non_empty_answer() {
        let mut state = practising(&["А."]);
        state.apply(Action::SetAnswer("   ".into()));
        assert_eq!(state.apply(Action::SubmitAnswer), Effect::None);
        assert_eq!(state.last_error(), Some("Please enter your translation before asking for a review."));
        assert!(!state.is_loading());
    }

    #[test]
    fn submit_records_answer_and_requests_review() {
        let mut state = practising(&["Я їм яблуко."]);
        state.apply(Action::SetAnswer(" I eat a apple ".into()));
        let effect = state.apply(Action::SubmitAnswer);
        assert_eq!(
            effect,
            Effect::Review {
                original_sentence: "Я їм яблуко.".into(),
                user_answer: "I eat a apple".into(),
            }
        );
        assert_eq!(state.practice.current().unwrap().user_answer, "I eat a apple");
    }

    #[test]
    fn review_feedback_is_stored_on_item_and_display() {
        let mut state = practising(&["Я їм яблуко."]);
        reviewed(&mut state, "Almost: I eat an apple.");
        assert_eq!(state.review, "Almost: I eat an apple.");
        assert_eq!(state.practice.current().unwrap().review, "Almost: I eat an apple.");
        assert!(state.can_advance());
    }

    #[test]
    fn failed_review_keeps_item_and_sets_error() {
        let mut state = practising(&["Я їм яблуко.", "Він біжить."]);
        state.apply(Action::SetAnswer("I eat a apple".into()));
        state.apply(Action::SubmitAnswer);
        state.apply(Action::ReviewReceived(ReviewOutcome::Failed(REVIEW_FALLBACK.into())));

        assert!(!state.is_loading());
        assert_eq!(state.last_error(), Some("Failed to get review. Please try again."));
        assert!(state.review.is_empty());
        assert!(state.practice.current().unwrap().review.is_empty());
        assert_eq!(state.practice.index(), 0);

        state.apply(Action::Next);
        assert_eq!(state.practice.index(), 0);
    }

    #[test]
    fn next_without_review_does_nothing() {
        let mut state = practising(&["А.", "Б."]);
        state.apply(Action::Next);
        assert_eq!(state.practice.index(), 0);
        assert_eq!(state.screen(), Screen::Practice);
    }

    #[test]
    fn next_advances_and_clears_answer_and_review() {
        let mut state = practising(&["А.", "Б."]);
        reviewed(&mut state, "Good");
        state.status.last_error = Some("stale".into());
        state.apply(Action::Next);

        assert_eq!(state.practice.index(), 1);
        assert!(state.answer.is_empty());
        assert!(state.review.is_empty());
        assert_eq!(state.last_error(), None);
        assert_eq!(state.practice.items()[0].review, "Good");
    }

    #[test]
    fn finish_resets_config_and_clears_practice() {
        let mut state = practising(&["А."]);
        state.config.theme = "sport".into();
        state.seen.insert("А.");
        reviewed(&mut state, "Good");
        state.apply(Action::Next);

        assert_eq!(state.screen(), Screen::Start);
        assert_eq!(state.config, SessionConfig::default());
        assert!(state.practice.is_empty());
        assert!(state.seen.is_empty());
    }

    #[test]
    fn restart_keeps_config() {
        let mut state = practising(&["А.", "Б."]);
        state.seen.insert("А.");
        state.apply(Action::Restart);

        assert_eq!(state.screen(), Screen::Start);
        assert!(state.config.tenses.contains(&Tense::PresentSimple));
        assert_eq!(state.config.sentence_count, 2);
        assert!(state.practice.is_empty());
        assert!(state.seen.is_empty());
    }

    #[test]
    fn stale_completions_are_ignored() {
        let mut state = configured();
        state.apply(Action::ReviewReceived(ReviewOutcome::Feedback("x".into())));
        state.apply(Action::SentencesGenerated {
            seen: SeenSentences::default(),
            result: Ok(vec![generated("А.")]),
        });
        assert_eq!(state.screen(), Screen::Start);
        assert!(state.practice.is_empty());
    }

    #[test]
    fn show_tense_toggles_even_while_loading() {
        let mut state = configured();
        state.apply(Action::Begin);
        state.apply(Action::ToggleShowTense);
        assert!(state.show_tense);
    }
}
