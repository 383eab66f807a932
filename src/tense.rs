//! The fixed taxonomy of English tenses offered for practice

use serde::{Deserialize, Serialize};

/// Time frame a tense belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TenseGroup {
    Present,
    Past,
    Future,
}

impl TenseGroup {
    /// Human-readable group name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Past => "Past",
            Self::Future => "Future",
        }
    }

    /// All groups in display order
    pub fn all() -> &'static [TenseGroup] {
        &[Self::Present, Self::Past, Self::Future]
    }

    /// The four tenses of this group in aspect order
    pub fn tenses(&self) -> [Tense; 4] {
        match self {
            Self::Present => [
                Tense::PresentSimple,
                Tense::PresentContinuous,
                Tense::PresentPerfect,
                Tense::PresentPerfectContinuous,
            ],
            Self::Past => [
                Tense::PastSimple,
                Tense::PastContinuous,
                Tense::PastPerfect,
                Tense::PastPerfectContinuous,
            ],
            Self::Future => [
                Tense::FutureSimple,
                Tense::FutureContinuous,
                Tense::FuturePerfect,
                Tense::FuturePerfectContinuous,
            ],
        }
    }
}

/// One of the twelve grammar tenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tense {
    PresentSimple,
    PresentContinuous,
    PresentPerfect,
    PresentPerfectContinuous,
    PastSimple,
    PastContinuous,
    PastPerfect,
    PastPerfectContinuous,
    FutureSimple,
    FutureContinuous,
    FuturePerfect,
    FuturePerfectContinuous,
}

impl Tense {
    /// Tense used for generation when nothing is selected
    pub const DEFAULT: Tense = Tense::PresentSimple;

    /// Label used in prompts and in the `[Tag]` suffix of generated lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::PresentSimple => "Present Simple",
            Self::PresentContinuous => "Present Continuous",
            Self::PresentPerfect => "Present Perfect",
            Self::PresentPerfectContinuous => "Present Perfect Continuous",
            Self::PastSimple => "Past Simple",
            Self::PastContinuous => "Past Continuous",
            Self::PastPerfect => "Past Perfect",
            Self::PastPerfectContinuous => "Past Perfect Continuous",
            Self::FutureSimple => "Future Simple",
            Self::FutureContinuous => "Future Continuous",
            Self::FuturePerfect => "Future Perfect",
            Self::FuturePerfectContinuous => "Future Perfect Continuous",
        }
    }

    /// Group this tense is listed under
    pub fn group(&self) -> TenseGroup {
        match self {
            Self::PresentSimple
            | Self::PresentContinuous
            | Self::PresentPerfect
            | Self::PresentPerfectContinuous => TenseGroup::Present,
            Self::PastSimple
            | Self::PastContinuous
            | Self::PastPerfect
            | Self::PastPerfectContinuous => TenseGroup::Past,
            Self::FutureSimple
            | Self::FutureContinuous
            | Self::FuturePerfect
            | Self::FuturePerfectContinuous => TenseGroup::Future,
        }
    }

    /// Parse a tense from its label, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim();
        Self::all().iter().copied().find(|t| t.label().eq_ignore_ascii_case(wanted))
    }

    /// All tenses, grouped Present, Past, Future
    pub fn all() -> &'static [Tense] {
        &[
            Self::PresentSimple,
            Self::PresentContinuous,
            Self::PresentPerfect,
            Self::PresentPerfectContinuous,
            Self::PastSimple,
            Self::PastContinuous,
            Self::PastPerfect,
            Self::PastPerfectContinuous,
            Self::FutureSimple,
            Self::FutureContinuous,
            Self::FuturePerfect,
            Self::FuturePerfectContinuous,
        ]
    }
}

impl std::fmt::Display for Tense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Tense {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown tense: {}. Run `tense-trainer tenses`", s))
    }
}
