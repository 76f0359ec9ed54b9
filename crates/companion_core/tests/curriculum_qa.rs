use companion_core::{
    AnswerGenerator, Classifier, ClassificationQuery, CurriculumQa, GeneratedAnswer, NoteExcerpt,
    NoteMatcher, QaError, StaticCatalog, UpstreamError,
};
use std::cell::RefCell;

struct FixedClassifier(Result<ClassificationQuery, UpstreamError>);

impl Classifier for FixedClassifier {
    fn classify(&self, _question: &str) -> Result<ClassificationQuery, UpstreamError> {
        self.0.clone()
    }
}

/// Generator that cites every note it receives plus whatever extra ids it is given.
#[derive(Default)]
struct CitingGenerator {
    answer: String,
    extra_citations: Vec<String>,
    seen_notes: RefCell<Vec<NoteExcerpt>>,
    fail: bool,
}

impl AnswerGenerator for CitingGenerator {
    fn answer(
        &self,
        _question: &str,
        notes: &[NoteExcerpt],
    ) -> Result<GeneratedAnswer, UpstreamError> {
        if self.fail {
            return Err(UpstreamError::new("model quota exhausted"));
        }
        self.seen_notes.borrow_mut().extend_from_slice(notes);
        let mut citations: Vec<String> = notes.iter().map(|note| note.id.clone()).collect();
        citations.extend(self.extra_citations.iter().cloned());
        Ok(GeneratedAnswer {
            answer: self.answer.clone(),
            citations,
        })
    }
}

fn fractions_query() -> ClassificationQuery {
    ClassificationQuery::new("Math", 6)
        .with_chapter("Fractions")
        .with_concepts(["proper fractions"])
}

#[test]
fn answer_cites_only_matched_notes() {
    let generator = CitingGenerator {
        answer: "A proper fraction has a smaller numerator.".to_string(),
        extra_citations: vec!["C6-MATH-07-01".to_string(), "MADE-UP-01".to_string()],
        ..CitingGenerator::default()
    };
    let qa = CurriculumQa::new(
        NoteMatcher::new(StaticCatalog::sample()),
        FixedClassifier(Ok(fractions_query())),
        generator,
    );

    let answer = qa.ask("What is a proper fraction?").unwrap();
    assert_eq!(answer.citations, vec!["C6-MATH-07-01".to_string()]);
    assert!(!answer.off_topic);
    assert_eq!(answer.classification, fractions_query());
}

#[test]
fn generator_receives_matched_excerpts() {
    let generator = CitingGenerator {
        answer: "ok".to_string(),
        ..CitingGenerator::default()
    };
    let qa = CurriculumQa::new(
        NoteMatcher::new(StaticCatalog::sample()),
        FixedClassifier(Ok(fractions_query())),
        &generator,
    );

    qa.ask("What is a proper fraction?").unwrap();
    let seen = generator.seen_notes.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].id, "C6-MATH-07-01");
}

#[test]
fn off_topic_refusal_drops_citations() {
    let generator = CitingGenerator {
        answer: "That does not sound like a question about your studies. I can only answer questions about school subjects.".to_string(),
        ..CitingGenerator::default()
    };
    let qa = CurriculumQa::new(
        NoteMatcher::new(StaticCatalog::sample()),
        FixedClassifier(Ok(fractions_query())),
        generator,
    );

    let answer = qa.ask("Who won the match yesterday?").unwrap();
    assert!(answer.off_topic);
    assert!(answer.citations.is_empty());
}

#[test]
fn upstream_failures_propagate() {
    let qa = CurriculumQa::new(
        NoteMatcher::new(StaticCatalog::sample()),
        FixedClassifier(Err(UpstreamError::new("timeout"))),
        CitingGenerator::default(),
    );
    assert!(matches!(
        qa.ask("What is photosynthesis?"),
        Err(QaError::Classification(_))
    ));

    let qa = CurriculumQa::new(
        NoteMatcher::new(StaticCatalog::sample()),
        FixedClassifier(Ok(fractions_query())),
        CitingGenerator {
            fail: true,
            ..CitingGenerator::default()
        },
    );
    assert!(matches!(
        qa.ask("What is a proper fraction?"),
        Err(QaError::Generation(_))
    ));
}

#[test]
fn blank_question_is_rejected_before_classification() {
    let qa = CurriculumQa::new(
        NoteMatcher::new(StaticCatalog::sample()),
        FixedClassifier(Err(UpstreamError::new("should not be called"))),
        CitingGenerator::default(),
    );
    assert!(matches!(qa.ask("   "), Err(QaError::EmptyQuestion)));
}
