//! Quiz mode configuration
//!
//! A [`QuizConfig`] describes one quiz variant: how many questions a session
//! holds, which slots are reserved for special subjects, whether questions
//! may be rotated, and how many correct answers win. The compact,
//! rotating and extended widgets are all expressed as configuration of the
//! same engine.

use std::collections::HashSet;

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::game::Error;

/// The role a slot plays in the question sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotKind {
    /// A random subject from the ordinary pool
    Ordinary,
    /// One of a small fixed set of candidates, rotated by toggling
    Special,
    /// The branding closer: four identical options, always correct
    Branding,
}

impl SlotKind {
    /// Whether questions in this slot can ever be replaced
    pub fn is_rotatable(self) -> bool {
        !matches!(self, Self::Branding)
    }
}

/// A slot restricted to a small set of candidate subjects
///
/// Candidates are named by display name and are removed from the ordinary
/// pool, so they never collide with ordinary slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SpecialSlot {
    /// Display names of the candidate subjects
    #[garde(length(min = 1, max = crate::constants::quiz::MAX_SPECIAL_CANDIDATES))]
    pub candidates: Vec<String>,
}

/// Configuration of one quiz variant
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizConfig {
    /// Total number of slots, reserved slots included
    #[garde(range(
        min = crate::constants::quiz::MIN_QUESTION_COUNT,
        max = crate::constants::quiz::MAX_QUESTION_COUNT
    ))]
    question_count: usize,
    /// Correct answers needed to win
    #[garde(skip)]
    win_threshold: usize,
    /// Whether players may swap out the current question
    #[serde(default)]
    #[garde(skip)]
    rotation: bool,
    /// Optional special slot, placed after the ordinary slots
    #[garde(dive)]
    special_slot: Option<SpecialSlot>,
    /// Optional branding subject, always the last slot
    #[garde(skip)]
    branding: Option<String>,
    /// Display names never used as ordinary subjects or distractors
    #[serde(default)]
    #[garde(skip)]
    excluded: Vec<String>,
}

impl QuizConfig {
    /// Creates a plain configuration with ordinary slots only and no rotation
    pub fn new(question_count: usize, win_threshold: usize) -> Self {
        Self {
            question_count,
            win_threshold,
            rotation: false,
            special_slot: None,
            branding: None,
            excluded: Vec::new(),
        }
    }

    /// Three questions, no rotation, all three must be correct
    pub fn classic() -> Self {
        Self::new(3, 3)
    }

    /// Three questions with rotation, all three must be correct
    pub fn rotating() -> Self {
        Self::classic().with_rotation(true)
    }

    /// Four slots: two ordinary, a two-candidate special slot and a branding closer
    ///
    /// Three correct answers win.
    pub fn extended<S: Into<String>>(
        candidates: impl IntoIterator<Item = S>,
        branding: impl Into<String>,
    ) -> Self {
        Self::new(4, 3)
            .with_rotation(true)
            .with_special_slot(candidates)
            .with_branding(branding)
    }

    /// Replaces the number of slots
    #[must_use]
    pub fn with_question_count(mut self, question_count: usize) -> Self {
        self.question_count = question_count;
        self
    }

    /// Replaces the winning threshold
    #[must_use]
    pub fn with_win_threshold(mut self, win_threshold: usize) -> Self {
        self.win_threshold = win_threshold;
        self
    }

    /// Enables or disables rotation
    #[must_use]
    pub fn with_rotation(mut self, rotation: bool) -> Self {
        self.rotation = rotation;
        self
    }

    /// Reserves a special slot for the given candidates
    #[must_use]
    pub fn with_special_slot<S: Into<String>>(
        mut self,
        candidates: impl IntoIterator<Item = S>,
    ) -> Self {
        self.special_slot = Some(SpecialSlot {
            candidates: candidates.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Reserves the last slot for a branding subject
    #[must_use]
    pub fn with_branding(mut self, branding: impl Into<String>) -> Self {
        self.branding = Some(branding.into());
        self
    }

    /// Excludes entries from ordinary subjects and distractors
    #[must_use]
    pub fn with_excluded<S: Into<String>>(mut self, excluded: impl IntoIterator<Item = S>) -> Self {
        self.excluded.extend(excluded.into_iter().map(Into::into));
        self
    }

    /// Returns the total number of slots
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    /// Returns the number of correct answers needed to win
    pub fn win_threshold(&self) -> usize {
        self.win_threshold
    }

    /// Returns whether rotation is enabled
    pub fn rotation(&self) -> bool {
        self.rotation
    }

    /// Returns the special slot, if any
    pub fn special_slot(&self) -> Option<&SpecialSlot> {
        self.special_slot.as_ref()
    }

    /// Returns the branding subject, if any
    pub fn branding(&self) -> Option<&str> {
        self.branding.as_deref()
    }

    /// Number of slots taken by the special and branding subjects
    pub fn reserved_count(&self) -> usize {
        usize::from(self.special_slot.is_some()) + usize::from(self.branding.is_some())
    }

    /// Number of slots filled from the ordinary pool
    pub fn ordinary_count(&self) -> usize {
        self.question_count.saturating_sub(self.reserved_count())
    }

    /// Returns the kind of every slot, in order
    ///
    /// Ordinary slots come first, then the special slot, then branding.
    pub fn slot_kinds(&self) -> Vec<SlotKind> {
        std::iter::repeat_n(SlotKind::Ordinary, self.ordinary_count())
            .chain(self.special_slot.as_ref().map(|_| SlotKind::Special))
            .chain(self.branding.as_ref().map(|_| SlotKind::Branding))
            .collect_vec()
    }

    /// Display names kept out of the ordinary pool
    ///
    /// This is the explicit exclusion list plus every special candidate and
    /// the branding subject.
    pub fn ordinary_exclusions(&self) -> HashSet<&str> {
        self.excluded
            .iter()
            .map(String::as_str)
            .chain(
                self.special_slot
                    .iter()
                    .flat_map(|slot| slot.candidates.iter().map(String::as_str)),
            )
            .chain(self.branding.as_deref())
            .collect()
    }

    /// Checks field limits and the relations between fields
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` describing the first problem found.
    pub fn check(&self) -> Result<(), Error> {
        self.validate()
            .map_err(|report| Error::InvalidConfig(report.to_string()))?;

        if self.reserved_count() > self.question_count {
            return Err(Error::InvalidConfig(format!(
                "{} reserved slots do not fit in {} questions",
                self.reserved_count(),
                self.question_count
            )));
        }
        if self.win_threshold > self.question_count {
            return Err(Error::InvalidConfig(format!(
                "win threshold {} exceeds {} questions",
                self.win_threshold, self.question_count
            )));
        }
        if let Some(slot) = &self.special_slot {
            if !slot.candidates.iter().all_unique() {
                return Err(Error::InvalidConfig(
                    "special slot candidates must be distinct".to_string(),
                ));
            }
            if let Some(branding) = &self.branding {
                if slot.candidates.contains(branding) {
                    return Err(Error::InvalidConfig(
                        "branding subject cannot be a special candidate".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self::classic()
    }
}
