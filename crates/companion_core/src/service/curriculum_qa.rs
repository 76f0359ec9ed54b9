//! Curriculum-grounded question answering.
//!
//! # Responsibility
//! - Run classify -> match notes -> generate answer for one question.
//! - Keep citations honest: only ids of notes actually handed to the
//!   generator survive.
//!
//! # Invariants
//! - Classification and generation are external; their failures propagate.
//! - Catalog failures never fail a question; generation then sees no notes.
//!
//! Classifier and generator are traits so model-backed clients can be plugged
//! in without this module knowing about prompts or providers.

use crate::model::note::{ClassificationQuery, NoteExcerpt};
use crate::repo::catalog_repo::CatalogRepository;
use crate::service::note_matcher::NoteMatcher;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Leading text of the generator's refusal for non-study questions.
pub const OFF_TOPIC_PREFIX: &str = "That does not sound like a question";

/// Failure reported by an external model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamError {
    pub message: String,
}

impl UpstreamError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for UpstreamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for UpstreamError {}

#[derive(Debug)]
pub enum QaError {
    EmptyQuestion,
    Classification(UpstreamError),
    Generation(UpstreamError),
}

impl Display for QaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyQuestion => write!(f, "question is empty"),
            Self::Classification(err) => write!(f, "failed to classify question: {err}"),
            Self::Generation(err) => write!(f, "failed to generate an answer: {err}"),
        }
    }
}

impl Error for QaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyQuestion => None,
            Self::Classification(err) | Self::Generation(err) => Some(err),
        }
    }
}

/// Maps a free-text question to curriculum metadata.
pub trait Classifier {
    fn classify(&self, question: &str) -> Result<ClassificationQuery, UpstreamError>;
}

/// Writes an answer grounded in the supplied notes.
pub trait AnswerGenerator {
    fn answer(&self, question: &str, notes: &[NoteExcerpt])
        -> Result<GeneratedAnswer, UpstreamError>;
}

impl<K: Classifier + ?Sized> Classifier for &K {
    fn classify(&self, question: &str) -> Result<ClassificationQuery, UpstreamError> {
        (**self).classify(question)
    }
}

impl<G: AnswerGenerator + ?Sized> AnswerGenerator for &G {
    fn answer(
        &self,
        question: &str,
        notes: &[NoteExcerpt],
    ) -> Result<GeneratedAnswer, UpstreamError> {
        (**self).answer(question, notes)
    }
}

/// Raw generator output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedAnswer {
    pub answer: String,
    pub citations: Vec<String>,
}

/// Answer returned to the caller along with how the question was classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumAnswer {
    pub answer: String,
    /// Subset of matched note ids, in the generator's order.
    pub citations: Vec<String>,
    pub classification: ClassificationQuery,
    /// Set when the generator refused a non-study question.
    pub off_topic: bool,
}

pub struct CurriculumQa<R, K, G>
where
    R: CatalogRepository,
    K: Classifier,
    G: AnswerGenerator,
{
    matcher: NoteMatcher<R>,
    classifier: K,
    generator: G,
}

impl<R, K, G> CurriculumQa<R, K, G>
where
    R: CatalogRepository,
    K: Classifier,
    G: AnswerGenerator,
{
    pub fn new(matcher: NoteMatcher<R>, classifier: K, generator: G) -> Self {
        Self {
            matcher,
            classifier,
            generator,
        }
    }

    pub fn ask(&self, question: &str) -> Result<CurriculumAnswer, QaError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(QaError::EmptyQuestion);
        }

        let classification = self.classifier.classify(question).map_err(|err| {
            warn!("event=qa_classify module=service status=error error={err}");
            QaError::Classification(err)
        })?;

        let notes = self.matcher.match_query(&classification);
        let generated = self.generator.answer(question, &notes).map_err(|err| {
            warn!("event=qa_generate module=service status=error error={err}");
            QaError::Generation(err)
        })?;

        let off_topic = generated.answer.starts_with(OFF_TOPIC_PREFIX);
        let citations = if off_topic {
            Vec::new()
        } else {
            grounded_citations(generated.citations, &notes)
        };

        info!(
            "event=qa_answer module=service status=ok matched_notes={} citations={} off_topic={off_topic}",
            notes.len(),
            citations.len()
        );

        Ok(CurriculumAnswer {
            answer: generated.answer,
            citations,
            classification,
            off_topic,
        })
    }
}

/// Keeps citations that name a supplied note, dropping repeats.
fn grounded_citations(citations: Vec<String>, notes: &[NoteExcerpt]) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(citations.len());
    for citation in citations {
        let known = notes.iter().any(|note| note.id == citation);
        if !known {
            warn!("event=qa_citation module=service status=dropped reason=unknown_note_id");
            continue;
        }
        if !kept.contains(&citation) {
            kept.push(citation);
        }
    }
    kept
}
