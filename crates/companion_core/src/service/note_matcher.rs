//! Curriculum note matching.
//!
//! # Responsibility
//! - Select the catalog notes relevant to one classification.
//! - Strip matched notes down to citation id and content.
//!
//! # Invariants
//! - A note is returned only when subject (case-insensitive) and class level
//!   both match, and its chapter or one of its concepts matches.
//! - Output keeps catalog order.
//! - Matching never fails from the caller's point of view; an empty result is
//!   a normal outcome.

use crate::model::note::{ClassificationQuery, CurriculumNote, NoteExcerpt};
use crate::repo::catalog_repo::{subject_eq, CatalogRepository, RepoResult};
use log::{debug, warn};

/// Matches classifications against a catalog repository.
pub struct NoteMatcher<R: CatalogRepository> {
    repo: R,
}

impl<R: CatalogRepository> NoteMatcher<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Returns matching excerpts, or an empty list when the catalog is
    /// unreachable (the failure is logged).
    pub fn match_query(&self, query: &ClassificationQuery) -> Vec<NoteExcerpt> {
        match self.try_match(query) {
            Ok(excerpts) => excerpts,
            Err(err) => {
                warn!(
                    "event=note_match module=service status=error error_code=catalog_lookup_failed error={err}"
                );
                Vec::new()
            }
        }
    }

    /// Same as [`match_query`](Self::match_query) but surfaces catalog errors.
    pub fn try_match(&self, query: &ClassificationQuery) -> RepoResult<Vec<NoteExcerpt>> {
        let candidates = self.repo.lookup(&query.subject, query.class_level)?;
        let excerpts: Vec<NoteExcerpt> = candidates
            .iter()
            .filter(|note| note_matches(note, query))
            .map(CurriculumNote::excerpt)
            .collect();

        debug!(
            "event=note_match module=service status=ok class_level={} candidates={} matched={}",
            query.class_level,
            candidates.len(),
            excerpts.len()
        );
        Ok(excerpts)
    }
}

/// Applies the full matching rule to one note.
///
/// An empty or whitespace-only query chapter never counts as a chapter match,
/// so such queries are qualified by concepts alone.
pub fn note_matches(note: &CurriculumNote, query: &ClassificationQuery) -> bool {
    let subject_match = subject_eq(&note.subject, &query.subject);
    let class_match = note.class_level == query.class_level;
    subject_match && class_match && (chapter_matches(note, query) || concepts_match(note, query))
}

fn chapter_matches(note: &CurriculumNote, query: &ClassificationQuery) -> bool {
    if query.chapter.trim().is_empty() {
        return false;
    }
    note.chapter
        .to_lowercase()
        .contains(&query.chapter.to_lowercase())
}

fn concepts_match(note: &CurriculumNote, query: &ClassificationQuery) -> bool {
    let note_concepts: Vec<String> = note
        .concepts
        .iter()
        .map(|concept| concept.to_lowercase())
        .collect();
    query
        .concepts
        .iter()
        .map(|concept| concept.to_lowercase())
        .any(|concept| note_concepts.contains(&concept))
}
