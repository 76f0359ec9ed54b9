//! Starter questions drawn from the catalog.

use crate::model::note::CurriculumNote;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Suggested question shown before a conversation starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SamplePrompt {
    pub title: String,
    pub prompt: String,
}

/// Picks up to `count` distinct notes at random and turns each into a
/// "What is ...?" question about its first concept (or its chapter).
pub fn sample_prompts<R: Rng + ?Sized>(
    notes: &[CurriculumNote],
    count: usize,
    rng: &mut R,
) -> Vec<SamplePrompt> {
    notes
        .choose_multiple(rng, count)
        .map(prompt_for_note)
        .collect()
}

pub fn prompt_for_note(note: &CurriculumNote) -> SamplePrompt {
    let topic = note
        .concepts
        .first()
        .map(String::as_str)
        .unwrap_or(note.chapter.as_str());

    SamplePrompt {
        title: capitalize_first(topic),
        prompt: format!("What is {}?", topic.to_lowercase()),
    }
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
