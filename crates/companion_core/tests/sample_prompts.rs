use companion_core::{sample_notes, sample_prompts};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

#[test]
fn prompts_are_distinct_and_shaped_as_questions() {
    let mut rng = StdRng::seed_from_u64(7);
    let prompts = sample_prompts(sample_notes(), 2, &mut rng);

    assert_eq!(prompts.len(), 2);
    let unique: HashSet<&str> = prompts.iter().map(|p| p.prompt.as_str()).collect();
    assert_eq!(unique.len(), 2);
    for prompt in &prompts {
        assert!(prompt.prompt.starts_with("What is "));
        assert!(prompt.prompt.ends_with('?'));
        assert!(prompt.title.chars().next().unwrap().is_uppercase());
    }
}

#[test]
fn prompts_come_from_first_concepts() {
    let mut rng = StdRng::seed_from_u64(42);
    let prompts = sample_prompts(sample_notes(), sample_notes().len(), &mut rng);

    let expected: HashSet<String> = sample_notes()
        .iter()
        .map(|note| format!("What is {}?", note.concepts[0]))
        .collect();
    let actual: HashSet<String> = prompts.into_iter().map(|p| p.prompt).collect();
    assert_eq!(actual, expected);
}

#[test]
fn count_larger_than_catalog_is_capped() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        sample_prompts(sample_notes(), 50, &mut rng).len(),
        sample_notes().len()
    );
}
