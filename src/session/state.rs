//! Session state definitions

use std::collections::BTreeSet;

use crate::identity::Identity;
use crate::practice::{GeneratedSentence, GenerationRequest, SeenSentences, SetupError};
use crate::tense::Tense;

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    /// Configuration screen
    #[default]
    Start,
    /// One sentence at a time
    Practice,
}

/// What the user asked to practise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Selected tenses, at least one needed to begin
    pub tenses: BTreeSet<Tense>,
    /// Free-text theme, may be empty
    pub theme: String,
    /// Number of sentences to generate
    pub sentence_count: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { tenses: BTreeSet::new(), theme: String::new(), sentence_count: Self::DEFAULT_SENTENCES }
    }
}

impl SessionConfig {
    pub const MIN_SENTENCES: u32 = 1;
    pub const MAX_SENTENCES: u32 = 20;
    pub const DEFAULT_SENTENCES: u32 = 5;

    /// Check the preconditions for starting a practice session
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.tenses.is_empty() {
            return Err(SetupError::NoTenseSelected);
        }
        if !(Self::MIN_SENTENCES..=Self::MAX_SENTENCES).contains(&self.sentence_count) {
            return Err(SetupError::InvalidSentenceCount(self.sentence_count));
        }
        Ok(())
    }

    /// Select or deselect a tense
    pub fn toggle_tense(&mut self, tense: Tense) {
        if !self.tenses.remove(&tense) {
            self.tenses.insert(tense);
        }
    }

    /// Set the sentence count, clamped to the allowed range
    pub fn set_sentence_count(&mut self, count: u32) {
        self.sentence_count = count.clamp(Self::MIN_SENTENCES, Self::MAX_SENTENCES);
    }

    /// Build the generation request for this configuration
    pub fn to_request(&self) -> GenerationRequest {
        let theme = self.theme.trim();
        GenerationRequest {
            tenses: self.tenses.clone(),
            theme: (!theme.is_empty()).then(|| theme.to_string()),
            count: self.sentence_count,
        }
    }
}

/// One sentence to translate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PracticeItem {
    /// Ukrainian source sentence
    pub original_sentence: String,
    /// Tense label the sentence was generated for
    pub tense_used: String,
    /// Submitted translation, empty until submitted
    pub user_answer: String,
    /// Review text, empty until fetched
    pub review: String,
}

impl From<GeneratedSentence> for PracticeItem {
    fn from(generated: GeneratedSentence) -> Self {
        Self {
            original_sentence: generated.sentence,
            tense_used: generated.tense,
            user_answer: String::new(),
            review: String::new(),
        }
    }
}

impl PracticeItem {
    pub fn is_reviewed(&self) -> bool {
        !self.review.is_empty()
    }
}

/// Ordered items and the position of the one being practised
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PracticeSession {
    items: Vec<PracticeItem>,
    index: usize,
}

impl PracticeSession {
    pub fn new(items: Vec<PracticeItem>) -> Self {
        Self { items, index: 0 }
    }

    pub fn items(&self) -> &[PracticeItem] {
        &self.items
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current(&self) -> Option<&PracticeItem> {
        self.items.get(self.index)
    }

    pub fn current_mut(&mut self) -> Option<&mut PracticeItem> {
        self.items.get_mut(self.index)
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.items.len()
    }

    /// Move to the next item if the current one is reviewed and not last
    pub fn advance(&mut self) -> bool {
        let reviewed = self.current().is_some_and(PracticeItem::is_reviewed);
        if reviewed && !self.is_last() {
            self.index += 1;
            true
        } else {
            false
        }
    }
}

/// Screen and transient flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiStatus {
    pub screen: Screen,
    /// A generate or review request is outstanding
    pub loading: bool,
    /// Last failure shown to the user, replaced on each new one
    pub last_error: Option<String>,
}

/// The whole state of one user's session
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Practice configuration
    pub config: SessionConfig,
    /// Show the tense label next to each sentence
    pub show_tense: bool,
    /// Sentences of the running practice session
    pub practice: PracticeSession,
    /// Duplicate guard for generation
    pub seen: SeenSentences,
    /// Answer being typed for the current item
    pub answer: String,
    /// Review displayed for the current item
    pub review: String,
    /// Screen, loading and error
    pub status: UiStatus,
    /// Who is practising
    pub identity: Identity,
}

impl SessionState {
    pub fn new(identity: Identity, show_tense: bool) -> Self {
        Self { identity, show_tense, ..Self::default() }
    }

    pub fn screen(&self) -> Screen {
        self.status.screen
    }

    pub fn is_loading(&self) -> bool {
        self.status.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.status.last_error.as_deref()
    }

    /// Whether the next/finish action would do anything right now
    pub fn can_advance(&self) -> bool {
        !self.status.loading
            && self.status.screen == Screen::Practice
            && self.practice.current().is_some_and(PracticeItem::is_reviewed)
    }

    /// Whether a review can be requested right now
    pub fn can_submit(&self) -> bool {
        !self.status.loading && self.status.screen == Screen::Practice && !self.answer.trim().is_empty()
    }

    /// Whether begin would pass validation right now
    pub fn can_begin(&self) -> bool {
        !self.status.loading && self.status.screen == Screen::Start && self.config.validate().is_ok()
    }
}
