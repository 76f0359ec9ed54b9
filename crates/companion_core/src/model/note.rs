//! Curriculum note and classification records.

use serde::{Deserialize, Serialize};

/// One read-only note of the curriculum catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumNote {
    /// Citation id, unique within a catalog (e.g. `C6-MATH-07-01`).
    pub id: String,
    pub subject: String,
    pub class_level: u32,
    pub chapter: String,
    /// Ordered concept labels; the first one seeds sample prompts.
    pub concepts: Vec<String>,
    pub content: String,
}

impl CurriculumNote {
    /// Projects the note to the citation-only shape handed to answer
    /// generation.
    pub fn excerpt(&self) -> NoteExcerpt {
        NoteExcerpt {
            id: self.id.clone(),
            content: self.content.clone(),
        }
    }
}

/// Externally produced classification of a free-text question.
///
/// The matcher trusts this shape; spelling is not validated against the
/// catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationQuery {
    pub subject: String,
    pub class_level: u32,
    /// May be empty; an empty chapter applies no chapter filter.
    #[serde(default)]
    pub chapter: String,
    #[serde(default)]
    pub concepts: Vec<String>,
}

impl ClassificationQuery {
    pub fn new(subject: impl Into<String>, class_level: u32) -> Self {
        Self {
            subject: subject.into(),
            class_level,
            ..Self::default()
        }
    }

    pub fn with_chapter(mut self, chapter: impl Into<String>) -> Self {
        self.chapter = chapter.into();
        self
    }

    pub fn with_concepts<I, S>(mut self, concepts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.concepts = concepts.into_iter().map(Into::into).collect();
        self
    }
}

/// Matcher output item: citation id and raw text, no metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteExcerpt {
    pub id: String,
    pub content: String,
}
