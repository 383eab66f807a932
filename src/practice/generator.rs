//! Sentence generation: prompt, request, and line parsing
//!
//! The model is asked for one sentence per line in the form
//! `<sentence> [<Tense>]`. Lines that do not end in a bracketed tag are
//! skipped, sentences already in the [`SeenSentences`] set are dropped,
//! and the result is cut down to the requested count.

use std::collections::{BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::PracticeError;
use super::service::LanguageModel;
use crate::tense::Tense;

/// `<text> [<tag>]` at the end of a line, tag captured non-greedily
static SENTENCE_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\s*\[([^\[\]]+?)\]\s*$").unwrap());

/// Numbering or bullets models sometimes put in front of each line
static LIST_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(?:\d+[.)]|[-*•])\s+").unwrap());

/// What to ask the model for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Tenses the sentences should use
    pub tenses: BTreeSet<Tense>,
    /// Optional topic for the sentences
    pub theme: Option<String>,
    /// Maximum number of sentences wanted
    pub count: u32,
}

/// A parsed sentence with the tense tag the model gave it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSentence {
    pub sentence: String,
    pub tense: String,
}

/// Sentences already produced in the current practice session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenSentences(HashSet<String>);

impl SeenSentences {
    pub fn contains(&self, sentence: &str) -> bool {
        self.0.contains(sentence)
    }

    /// Record a sentence, returns false if it was already seen
    pub fn insert(&mut self, sentence: impl Into<String>) -> bool {
        self.0.insert(sentence.into())
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build the generation prompt
///
/// An empty tense set falls back to [`Tense::DEFAULT`].
pub fn build_prompt(request: &GenerationRequest) -> String {
    let labels: Vec<&str> = if request.tenses.is_empty() {
        vec![Tense::DEFAULT.label()]
    } else {
        request.tenses.iter().map(Tense::label).collect()
    };

    let mut prompt = format!(
        "Generate {count} unique sentences in Ukrainian for a learner to translate into English.\n\
         Each sentence must use one of these English tenses when translated: {tenses}.\n\
         Write exactly one sentence per line in the format:\n\
         <sentence> [<Tense>]\n\
         where <Tense> is one of: {tenses}.\n\
         Example: Я їм яблуко. [Present Simple]\n\
         Do not number the lines and do not add any other text.",
        count = request.count,
        tenses = labels.join(", "),
    );

    if let Some(theme) = request.theme.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        prompt.push_str(&format!("\nAll sentences should be about the following theme: {}.", theme));
    }

    prompt
}

/// Parse model output into sentences, skipping malformed lines and duplicates
///
/// New sentences are added to `seen`; at most `count` are returned.
pub fn parse_sentences(text: &str, count: u32, seen: &mut SeenSentences) -> Vec<GeneratedSentence> {
    let mut sentences = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let Some(caps) = SENTENCE_LINE_RE.captures(line) else {
            tracing::warn!("Skipping line without a tense tag: {:?}", line);
            continue;
        };

        let sentence = LIST_MARKER_RE.replace(&caps[1], "").trim().to_string();
        let tense = caps[2].trim().to_string();

        if sentence.is_empty() {
            tracing::warn!("Skipping line with an empty sentence: {:?}", line);
            continue;
        }

        if !seen.insert(sentence.clone()) {
            tracing::debug!("Dropping duplicate sentence: {}", sentence);
            continue;
        }

        sentences.push(GeneratedSentence { sentence, tense });
    }

    sentences.truncate(count as usize);
    sentences
}

/// Ask the model for sentences and parse the reply
pub async fn generate<M: LanguageModel + ?Sized>(
    model: &M,
    request: &GenerationRequest,
    seen: &mut SeenSentences,
) -> Result<Vec<GeneratedSentence>, PracticeError> {
    let prompt = build_prompt(request);
    tracing::info!("Requesting {} sentences", request.count);

    let text = model.complete(&prompt).await?;
    let sentences = parse_sentences(&text, request.count, seen);

    if sentences.is_empty() {
        tracing::warn!("No usable sentences in model reply");
        return Err(PracticeError::NoSentences);
    }

    tracing::info!("Generated {} sentences", sentences.len());
    Ok(sentences)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::gemini::GeminiError;
    use crate::practice::service::testing::{ScriptedModel, api_error};

    fn request(tenses: &[Tense], theme: Option<&str>, count: u32) -> GenerationRequest {
        GenerationRequest {
            tenses: tenses.iter().copied().collect(),
            theme: theme.map(str::to_string),
            count,
        }
    }

    fn sentence(text: &str, tense: &str) -> GeneratedSentence {
        GeneratedSentence { sentence: text.to_string(), tense: tense.to_string() }
    }

    #[test]
    fn prompt_lists_tenses_count_and_format() {
        let prompt = build_prompt(&request(&[Tense::PastSimple, Tense::PresentPerfect], None, 3));
        assert!(prompt.contains("Generate 3 unique sentences in Ukrainian"));
        assert!(prompt.contains("Present Perfect, Past Simple"));
        assert!(prompt.contains("<sentence> [<Tense>]"));
        assert!(!prompt.contains("theme"));
    }

    #[test]
    fn prompt_appends_theme() {
        let prompt = build_prompt(&request(&[Tense::PresentSimple], Some("  travel "), 2));
        assert!(prompt.ends_with("about the following theme: travel."));
    }

    #[test]
    fn prompt_ignores_blank_theme() {
        let prompt = build_prompt(&request(&[Tense::PresentSimple], Some("   "), 2));
        assert!(!prompt.contains("theme"));
    }

    #[test]
    fn prompt_falls_back_to_default_tense() {
        let prompt = build_prompt(&request(&[], None, 1));
        assert!(prompt.contains("one of: Present Simple."));
    }

    #[test]
    fn parses_two_well_formed_lines() {
        let mut seen = SeenSentences::default();
        let parsed = parse_sentences(
            "Я їм яблуко. [Present Simple]\nВін біжить. [Present Simple]",
            2,
            &mut seen,
        );
        assert_eq!(
            parsed,
            vec![sentence("Я їм яблуко.", "Present Simple"), sentence("Він біжить.", "Present Simple")]
        );
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn skips_malformed_lines() {
        let mut seen = SeenSentences::default();
        let text = "Here are your sentences:\nЯ читав книгу. [Past Continuous]\nНемає тегу.\n\n";
        let parsed = parse_sentences(text, 5, &mut seen);
        assert_eq!(parsed, vec![sentence("Я читав книгу.", "Past Continuous")]);
    }

    #[test]
    fn drops_duplicates_within_reply_and_against_seen() {
        let mut seen = SeenSentences::default();
        seen.insert("Старе речення.");
        let text = "Нове речення. [Past Simple]\nНове речення. [Past Simple]\nСтаре речення. [Past Simple]";
        let parsed = parse_sentences(text, 5, &mut seen);
        assert_eq!(parsed, vec![sentence("Нове речення.", "Past Simple")]);
    }

    #[test]
    fn tag_is_the_last_bracket_group() {
        let mut seen = SeenSentences::default();
        let parsed = parse_sentences("Він сказав [тихо] це.  [ Past Simple ]  ", 1, &mut seen);
        assert_eq!(parsed, vec![sentence("Він сказав [тихо] це.", "Past Simple")]);
    }

    #[test]
    fn strips_list_markers() {
        let mut seen = SeenSentences::default();
        let parsed = parse_sentences(
            "1. Я сплю. [Present Simple]\n- Ти спиш. [Present Simple]",
            5,
            &mut seen,
        );
        assert_eq!(
            parsed,
            vec![sentence("Я сплю.", "Present Simple"), sentence("Ти спиш.", "Present Simple")]
        );
    }

    #[test]
    fn truncates_to_count() {
        let mut seen = SeenSentences::default();
        let parsed = parse_sentences("А. [Past Simple]\nБ. [Past Simple]\nВ. [Past Simple]", 2, &mut seen);
        assert_eq!(parsed.len(), 2);
    }

    #[tokio::test]
    async fn generate_returns_parsed_sentences() {
        let model = ScriptedModel::new().reply("Я їм яблуко. [Present Simple]\nВін біжить. [Present Simple]");
        let mut seen = SeenSentences::default();
        let result = generate(&model, &request(&[Tense::PresentSimple], Some(""), 2), &mut seen)
            .await
            .unwrap();
        assert_eq!(result.len(), 2);
        assert!(model.prompts()[0].contains("Present Simple"));
    }

    #[tokio::test]
    async fn tags_outside_the_requested_tenses_are_kept_verbatim() {
        let model = ScriptedModel::new()
            .reply("Я їм яблуко. [Present Simple]\nЯ їв яблуко. [Past Simple]\nВін біжить. [present  continuous]");
        let mut seen = SeenSentences::default();
        let result = generate(&model, &request(&[Tense::PresentSimple], None, 5), &mut seen)
            .await
            .unwrap();

        assert_eq!(
            result,
            vec![
                sentence("Я їм яблуко.", "Present Simple"),
                sentence("Я їв яблуко.", "Past Simple"),
                sentence("Він біжить.", "present  continuous"),
            ]
        );
    }

    #[tokio::test]
    async fn generate_with_nothing_usable_is_no_sentences() {
        let model = ScriptedModel::new().reply("Sorry, I can't help with that.");
        let mut seen = SeenSentences::default();
        let err = generate(&model, &request(&[Tense::PresentSimple], None, 2), &mut seen)
            .await
            .unwrap_err();
        assert!(matches!(err, PracticeError::NoSentences));
        assert_eq!(err.to_string(), "Could not generate sentences. Please try again.");
    }

    #[tokio::test]
    async fn generate_propagates_api_errors() {
        let model = ScriptedModel::new().fail(api_error(400, "API key not valid."));
        let mut seen = SeenSentences::default();
        let err = generate(&model, &request(&[Tense::PresentSimple], None, 2), &mut seen)
            .await
            .unwrap_err();
        assert!(matches!(err, PracticeError::Model(GeminiError::ApiError { status: 400, .. })));
        assert_eq!(err.to_string(), "API error (400): API key not valid.");
        assert!(seen.is_empty());
    }

    proptest! {
        #[test]
        fn parsed_sentences_are_unique_bounded_and_tagged(
            lines in prop::collection::vec(("[а-я]{1,6}", 0usize..12, any::<bool>()), 0..15),
            count in 1u32..=20,
        ) {
            let text: String = lines
                .iter()
                .map(|(word, tense, tagged)| {
                    if *tagged {
                        format!("{}. [{}]\n", word, Tense::all()[*tense].label())
                    } else {
                        format!("{}.\n", word)
                    }
                })
                .collect();

            let mut seen = SeenSentences::default();
            let parsed = parse_sentences(&text, count, &mut seen);

            prop_assert!(parsed.len() <= count as usize);
            let unique: HashSet<&str> = parsed.iter().map(|s| s.sentence.as_str()).collect();
            prop_assert_eq!(unique.len(), parsed.len());
            for item in &parsed {
                prop_assert!(!item.sentence.is_empty());
                prop_assert!(Tense::parse(&item.tense).is_some());
                prop_assert!(seen.contains(&item.sentence));
            }
            if lines.iter().any(|(_, _, tagged)| *tagged) {
                prop_assert!(!parsed.is_empty());
            }
        }
    }
}
