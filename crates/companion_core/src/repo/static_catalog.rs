//! Built-in sample curriculum (CBSE classes 5-7).
//!
//! The catalog is loaded once per process and never mutated.

use crate::model::note::CurriculumNote;
use crate::repo::catalog_repo::{subject_eq, CatalogRepository, RepoResult};
use once_cell::sync::Lazy;

static SAMPLE_NOTES: Lazy<Vec<CurriculumNote>> = Lazy::new(|| {
    vec![
        note(
            "C5-SCI-01-01",
            "Science",
            5,
            "Super Senses",
            &["sense of smell", "sense of sight", "sense of hearing", "animals senses"],
            "Animals have different super senses. Ants recognize their friends by their smell. \
             Some male insects can recognize their females from many kilometers away by their smell. \
             Dogs have a strong sense of smell and are used by police to catch thieves. Birds have \
             eyes on either side of their head, which allows them to see two different things at a time.",
        ),
        note(
            "C5-SCI-02-01",
            "Science",
            5,
            "A Snake Charmer’s Story",
            &["snakes", "snake charmers", "kalbeliyas", "poisonous snakes"],
            "Snake charmers (Kalbeliyas) are people who catch snakes and make them dance by playing \
             the been. They know how to remove poisonous fangs from snakes. Most snakes are not \
             poisonous. Only four types of snakes in India are poisonous: Cobra, Common Krait, \
             Russell’s Viper (Duboiya), and Saw-scaled Viper (Afai).",
        ),
        note(
            "C6-MATH-01-01",
            "Math",
            6,
            "Knowing Our Numbers",
            &["comparing numbers", "place value", "large numbers", "estimation"],
            "To compare numbers, we first count the number of digits. The number with more digits \
             is greater. If the digits are the same, we compare the leftmost digit. For example, 92 \
             is greater than 8. 450 is greater than 352. The place value of a digit depends on its \
             position in the number.",
        ),
        note(
            "C6-MATH-07-01",
            "Math",
            6,
            "Fractions",
            &[
                "what is a fraction",
                "fraction on number line",
                "proper fractions",
                "improper fractions",
                "mixed fractions",
            ],
            "A fraction is a number representing part of a whole. It is written as a/b where b is \
             not zero. A proper fraction is a fraction where the numerator is less than the \
             denominator. An improper fraction is where the numerator is greater than or equal to \
             the denominator. A mixed fraction is a whole number and a proper fraction combined.",
        ),
        note(
            "C7-SCI-01-01",
            "Science",
            7,
            "Nutrition in Plants",
            &["photosynthesis", "autotrophs", "heterotrophs", "stomata"],
            "Plants prepare their own food by the process of photosynthesis. They use sunlight, \
             water, carbon dioxide and minerals. This mode of nutrition is called autotrophic. The \
             tiny pores on the surface of leaves through which gaseous exchange occurs are called \
             stomata. Chlorophyll is the green pigment in leaves that helps capture sunlight.",
        ),
        note(
            "C7-SCI-05-01",
            "Science",
            7,
            "Acids, Bases and Salts",
            &["acids", "bases", "neutral substances", "indicators", "litmus paper"],
            "Acids are sour to taste. Examples: curd, lemon juice. Bases are bitter to taste and \
             soapy to touch. Examples: baking soda, soap. Indicators are substances used to test \
             whether a substance is acidic or basic. Litmus is a natural indicator. Acids turn blue \
             litmus red. Bases turn red litmus blue. Neutral substances do not change the color of \
             litmus paper.",
        ),
    ]
});

fn note(
    id: &str,
    subject: &str,
    class_level: u32,
    chapter: &str,
    concepts: &[&str],
    content: &str,
) -> CurriculumNote {
    CurriculumNote {
        id: id.to_string(),
        subject: subject.to_string(),
        class_level,
        chapter: chapter.to_string(),
        concepts: concepts.iter().map(|concept| concept.to_string()).collect(),
        content: content.to_string(),
    }
}

/// Returns the built-in sample notes in catalog order.
pub fn sample_notes() -> &'static [CurriculumNote] {
    SAMPLE_NOTES.as_slice()
}

/// In-memory catalog over a fixed note slice. Lookups never fail.
#[derive(Debug, Clone, Copy)]
pub struct StaticCatalog {
    notes: &'static [CurriculumNote],
}

impl StaticCatalog {
    /// Catalog backed by the built-in sample curriculum.
    pub fn sample() -> Self {
        Self::from_static(sample_notes())
    }

    pub fn from_static(notes: &'static [CurriculumNote]) -> Self {
        Self { notes }
    }

    pub fn notes(&self) -> &'static [CurriculumNote] {
        self.notes
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::sample()
    }
}

impl CatalogRepository for StaticCatalog {
    fn lookup(&self, subject: &str, class_level: u32) -> RepoResult<Vec<CurriculumNote>> {
        Ok(self
            .notes
            .iter()
            .filter(|note| note.class_level == class_level && subject_eq(&note.subject, subject))
            .cloned()
            .collect())
    }

    fn all(&self) -> RepoResult<Vec<CurriculumNote>> {
        Ok(self.notes.to_vec())
    }
}
