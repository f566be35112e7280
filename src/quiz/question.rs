//! Questions and their generation
//!
//! A question shows one icon (the subject) and four names. Ordinary and
//! special questions mix the subject's name with three distinct
//! distractors drawn at random; the branding question repeats the
//! subject's own name four times so any choice is correct.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, IconCatalogEntry},
    constants::quiz::{DISTRACTOR_COUNT, OPTION_COUNT},
    game::Error,
};

use super::config::QuizConfig;

/// A single quiz question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// The icon being asked about
    pub subject: IconCatalogEntry,
    /// The four names in presentation order
    pub options: Vec<String>,
    /// The subject's display name
    pub correct_answer: String,
}

impl Question {
    /// Builds a question for `subject` with distractors drawn from `pool`
    ///
    /// Three distinct names other than the subject's are sampled uniformly
    /// without replacement, and the four options are shuffled uniformly.
    ///
    /// # Errors
    ///
    /// Returns `Error::CatalogTooSmall` if `pool` does not hold three names
    /// besides the subject.
    pub fn generate(
        subject: &IconCatalogEntry,
        pool: &[&IconCatalogEntry],
        rng: &mut fastrand::Rng,
    ) -> Result<Self, Error> {
        let mut distractors = pool
            .iter()
            .map(|entry| entry.display_name.as_str())
            .filter(|name| *name != subject.display_name)
            .unique()
            .collect_vec();

        if distractors.len() < DISTRACTOR_COUNT {
            return Err(Error::CatalogTooSmall {
                required: OPTION_COUNT,
                available: distractors.len() + 1,
            });
        }

        rng.shuffle(&mut distractors);

        let mut options = std::iter::once(subject.display_name.as_str())
            .chain(distractors.into_iter().take(DISTRACTOR_COUNT))
            .map(str::to_owned)
            .collect_vec();
        rng.shuffle(&mut options);

        Ok(Self {
            subject: subject.clone(),
            options,
            correct_answer: subject.display_name.clone(),
        })
    }

    /// Builds the branding question, whose options all equal the subject's name
    pub fn guaranteed(subject: &IconCatalogEntry) -> Self {
        Self {
            subject: subject.clone(),
            options: vec![subject.display_name.clone(); OPTION_COUNT],
            correct_answer: subject.display_name.clone(),
        }
    }

    /// Whether `chosen` is the correct answer
    pub fn is_correct(&self, chosen: &str) -> bool {
        chosen == self.correct_answer
    }

    /// Whether every option is the correct answer
    pub fn is_guaranteed(&self) -> bool {
        self.options.iter().all(|option| *option == self.correct_answer)
    }
}

/// Entries eligible as ordinary subjects and their distractors
pub fn ordinary_pool<'a>(catalog: &'a Catalog, config: &QuizConfig) -> Vec<&'a IconCatalogEntry> {
    let excluded = config.ordinary_exclusions();
    catalog
        .iter()
        .filter(|entry| !excluded.contains(entry.display_name.as_str()))
        .collect_vec()
}

/// Entries eligible as distractors for the special slot
///
/// Only the branding subject is left out.
pub fn special_pool<'a>(catalog: &'a Catalog, config: &QuizConfig) -> Vec<&'a IconCatalogEntry> {
    catalog
        .iter()
        .filter(|entry| Some(entry.display_name.as_str()) != config.branding())
        .collect_vec()
}

/// Resolves a configured display name against the catalog
///
/// # Errors
///
/// Returns `Error::UnknownEntry` when no entry carries the name.
pub fn resolve<'a>(catalog: &'a Catalog, display_name: &str) -> Result<&'a IconCatalogEntry, Error> {
    catalog
        .find(display_name)
        .ok_or_else(|| Error::UnknownEntry(display_name.to_owned()))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn letters(count: usize) -> Catalog {
        Catalog::new(
            ('A'..='Z')
                .take(count)
                .map(|c| IconCatalogEntry::new(format!("{c}.svg"), c.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn test_generate_has_four_distinct_options() {
        let catalog = letters(7);
        let pool = catalog.iter().collect_vec();
        let mut rng = fastrand::Rng::with_seed(7);

        for subject in &catalog {
            let question = Question::generate(subject, &pool, &mut rng).unwrap();
            assert_eq!(question.options.len(), OPTION_COUNT);
            assert!(question.options.iter().all_unique());
            assert!(question.options.contains(&question.correct_answer));
            assert_eq!(question.correct_answer, subject.display_name);
            assert!(!question.is_guaranteed());
        }
    }

    #[test]
    fn test_generate_with_exact_pool() {
        let catalog = letters(4);
        let pool = catalog.iter().collect_vec();
        let mut rng = fastrand::Rng::with_seed(1);

        let question = Question::generate(&catalog.entries()[0], &pool, &mut rng).unwrap();
        let mut options = question.options.clone();
        options.sort();
        assert_eq!(options, ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_generate_pool_too_small() {
        let catalog = letters(3);
        let pool = catalog.iter().collect_vec();
        let mut rng = fastrand::Rng::with_seed(1);

        assert_eq!(
            Question::generate(&catalog.entries()[0], &pool, &mut rng),
            Err(Error::CatalogTooSmall {
                required: OPTION_COUNT,
                available: 3
            })
        );
    }

    #[test]
    fn test_generate_shuffles_correct_position() {
        let catalog = letters(10);
        let pool = catalog.iter().collect_vec();
        let mut rng = fastrand::Rng::with_seed(42);

        let positions = (0..200)
            .map(|_| {
                let question = Question::generate(&catalog.entries()[0], &pool, &mut rng).unwrap();
                question
                    .options
                    .iter()
                    .position(|option| *option == question.correct_answer)
                    .unwrap()
            })
            .unique()
            .count();
        assert_eq!(positions, OPTION_COUNT);
    }

    #[test]
    fn test_guaranteed() {
        let subject = IconCatalogEntry::new("logos/evidi.svg", "Evidi");
        let question = Question::guaranteed(&subject);
        assert_eq!(question.options, vec!["Evidi"; 4]);
        assert!(question.is_guaranteed());
        assert!(question.is_correct("Evidi"));
        assert!(!question.is_correct("Fabric"));
    }

    #[test]
    fn test_pools() {
        let catalog = Catalog::full();
        let config = QuizConfig::extended(["Erlend", "Cathrine"], "Evidi");

        let ordinary = ordinary_pool(&catalog, &config);
        assert_eq!(ordinary.len(), 30);
        assert!(ordinary.iter().all(|entry| entry.display_name != "Erlend"));

        let special = special_pool(&catalog, &config);
        assert_eq!(special.len(), 32);
        assert!(special.iter().any(|entry| entry.display_name == "Cathrine"));
        assert!(special.iter().all(|entry| entry.display_name != "Evidi"));
    }

    #[test]
    fn test_resolve_unknown() {
        assert_eq!(
            resolve(&Catalog::compact(), "Evidi"),
            Err(Error::UnknownEntry("Evidi".to_string()))
        );
    }
}
