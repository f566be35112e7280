//! Quiz session engine
//!
//! This module contains the [`Session`] state machine for a single
//! play-through and the [`Engine`] that owns a catalog, a configuration and
//! a random source and starts sessions from them.
//!
//! A session moves `InProgress(0) -> InProgress(1) -> ... -> Complete`.
//! Each step is taken by answering the current question and advancing;
//! rotation replaces the current question in place. Nothing leaves
//! `Complete`; a new session has to be started to play again.

use std::collections::HashSet;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    SyncMessage, UpdateMessage,
    catalog::{Catalog, IconCatalogEntry},
    constants::quiz::OPTION_COUNT,
    quiz::{
        config::{QuizConfig, SlotKind},
        question::{self, Question},
    },
    scoreboard::GameResult,
    session::RenderSink,
    session_id::SessionId,
};

/// Errors raised by the quiz engine
///
/// These are programming or configuration errors; the engine reports them
/// immediately and never swallows them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Queried or answered past the end of the session
    #[error("no question at this position, the session is complete")]
    OutOfRange,
    /// The operation does not fit the session's current state
    #[error("operation not allowed in the current session state")]
    InvalidState,
    /// Not enough usable catalog entries to build distinct questions
    #[error("catalog too small: {required} usable entries required, {available} available")]
    CatalogTooSmall {
        /// Entries needed for the configured slots
        required: usize,
        /// Entries left after exclusions
        available: usize,
    },
    /// A configured special or branding subject is not in the catalog
    #[error("unknown catalog entry: {0}")]
    UnknownEntry(String),
    /// The quiz configuration is inconsistent
    #[error("invalid quiz configuration: {0}")]
    InvalidConfig(String),
}

/// Position of a session in its state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    /// A question is being shown
    InProgress {
        /// Index of the current slot
        index: usize,
        /// Whether the current question was answered but not yet advanced past
        answered: bool,
    },
    /// Every question has been answered
    Complete,
}

/// Feedback on a recorded answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerFeedback {
    /// Slot the answer belongs to
    pub index: usize,
    /// The option the player picked
    pub chosen: String,
    /// Whether the pick was correct
    pub correct: bool,
    /// The name that was expected
    pub correct_answer: String,
    /// Score including this answer
    pub score: usize,
}

/// What the presentation layer needs to show the current question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    /// Index of the current slot (0-based)
    pub index: usize,
    /// Number of slots in the session
    pub count: usize,
    /// Icon to display
    pub identifier: String,
    /// Options in presentation order
    pub options: Vec<String>,
    /// Score so far
    pub score: usize,
    /// Whether the rotate control should be enabled
    pub rotatable: bool,
}

/// Checks that `catalog` can host sessions of `config`
///
/// # Errors
///
/// * `Error::InvalidConfig` - the configuration fails validation
/// * `Error::CatalogTooSmall` - the ordinary or special pool is too small
/// * `Error::UnknownEntry` - a special candidate or the branding subject is missing
pub fn check_requirements(catalog: &Catalog, config: &QuizConfig) -> Result<(), Error> {
    config.check()?;

    let ordinary = config.ordinary_count();
    if ordinary > 0 {
        let required = (ordinary + 1).max(OPTION_COUNT);
        let available = question::ordinary_pool(catalog, config).len();
        if available < required {
            return Err(Error::CatalogTooSmall {
                required,
                available,
            });
        }
    }

    if let Some(slot) = config.special_slot() {
        for candidate in &slot.candidates {
            question::resolve(catalog, candidate)?;
        }
        let available = question::special_pool(catalog, config).len();
        if available < OPTION_COUNT {
            return Err(Error::CatalogTooSmall {
                required: OPTION_COUNT,
                available,
            });
        }
    }

    if let Some(branding) = config.branding() {
        question::resolve(catalog, branding)?;
    }

    Ok(())
}

/// One player's play-through
#[derive(Debug, Clone)]
pub struct Session {
    /// Identifier used in logs and reports
    id: SessionId,
    /// The configuration the session was started with
    config: QuizConfig,
    /// Kind of every slot, parallel to `questions`
    slots: Vec<SlotKind>,
    /// The questions, one per slot
    questions: Vec<Question>,
    /// Index of the current slot, equal to `questions.len()` once complete
    current_index: usize,
    /// Correct answers among advanced-past slots
    score: usize,
    /// Correctness of every advanced-past slot
    breakdown: Vec<bool>,
    /// Answer recorded for the current slot, committed on advance
    pending: Option<AnswerFeedback>,
}

impl Session {
    /// Starts a new session
    ///
    /// Ordinary subjects are drawn without replacement from the catalog minus
    /// excluded entries, each with three random distractors from the same
    /// pool. The special slot takes one of its candidates at random, with
    /// distractors from the whole catalog minus the branding subject. The
    /// branding slot gets four copies of its own name.
    ///
    /// # Errors
    ///
    /// Any error of [`check_requirements`].
    pub fn start(
        catalog: &Catalog,
        config: QuizConfig,
        rng: &mut fastrand::Rng,
    ) -> Result<Self, Error> {
        check_requirements(catalog, &config)?;

        let pool = question::ordinary_pool(catalog, &config);
        let mut subjects = pool.clone();
        rng.shuffle(&mut subjects);

        let mut questions = subjects
            .into_iter()
            .take(config.ordinary_count())
            .map(|subject| Question::generate(subject, &pool, rng))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(slot) = config.special_slot() {
            let candidates = slot
                .candidates
                .iter()
                .map(|name| question::resolve(catalog, name))
                .collect::<Result<Vec<_>, _>>()?;
            let subject = candidates[rng.usize(..candidates.len())];
            let special_pool = question::special_pool(catalog, &config);
            questions.push(Question::generate(subject, &special_pool, rng)?);
        }

        if let Some(branding) = config.branding() {
            questions.push(Question::guaranteed(question::resolve(catalog, branding)?));
        }

        let id = SessionId::from_rng(rng);
        debug!(session = %id, questions = questions.len(), "started quiz session");

        Ok(Self {
            id,
            slots: config.slot_kinds(),
            config,
            questions,
            current_index: 0,
            score: 0,
            breakdown: Vec::new(),
            pending: None,
        })
    }

    /// Returns the session identifier
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the configuration the session was started with
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Returns every question, in slot order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Returns the number of slots
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Returns `true` if the session holds no questions
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Returns the index of the current slot
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Returns the number of correct answers committed so far
    pub fn score(&self) -> usize {
        self.score
    }

    /// Returns the current state
    pub fn state(&self) -> State {
        if self.is_complete() {
            State::Complete
        } else {
            State::InProgress {
                index: self.current_index,
                answered: self.pending.is_some(),
            }
        }
    }

    /// Whether every question has been answered
    pub fn is_complete(&self) -> bool {
        self.current_index == self.questions.len()
    }

    /// Returns the current question
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` once the session is complete.
    pub fn current_question(&self) -> Result<&Question, Error> {
        self.questions
            .get(self.current_index)
            .ok_or(Error::OutOfRange)
    }

    /// Whether the current question may be replaced right now
    pub fn is_rotatable(&self) -> bool {
        self.config.rotation()
            && self.pending.is_none()
            && self
                .slots
                .get(self.current_index)
                .is_some_and(|kind| kind.is_rotatable())
    }

    /// Records an answer for the current question without advancing
    ///
    /// The score is committed when [`Session::advance`] is called, so the
    /// feedback can be shown before moving on.
    ///
    /// # Errors
    ///
    /// * `Error::OutOfRange` - the session is complete
    /// * `Error::InvalidState` - the current question was already answered
    pub fn answer_current(&mut self, chosen: &str) -> Result<AnswerFeedback, Error> {
        let question = self.current_question()?;
        if self.pending.is_some() {
            return Err(Error::InvalidState);
        }

        let correct = question.is_correct(chosen);
        let feedback = AnswerFeedback {
            index: self.current_index,
            chosen: chosen.to_owned(),
            correct,
            correct_answer: question.correct_answer.clone(),
            score: self.score + usize::from(correct),
        };
        self.pending = Some(feedback.clone());
        Ok(feedback)
    }

    /// Commits the recorded answer and moves to the next slot
    ///
    /// # Errors
    ///
    /// * `Error::OutOfRange` - the session is complete
    /// * `Error::InvalidState` - the current question has not been answered
    pub fn advance(&mut self) -> Result<(), Error> {
        if self.is_complete() {
            return Err(Error::OutOfRange);
        }
        let feedback = self.pending.take().ok_or(Error::InvalidState)?;

        self.score = feedback.score;
        self.breakdown.push(feedback.correct);
        self.current_index += 1;
        Ok(())
    }

    /// Answers the current question and advances in one step
    ///
    /// # Errors
    ///
    /// The errors of [`Session::answer_current`].
    pub fn submit_answer(&mut self, chosen: &str) -> Result<AnswerFeedback, Error> {
        let feedback = self.answer_current(chosen)?;
        self.advance()?;
        Ok(feedback)
    }

    /// Replaces the current question with a newly generated one
    ///
    /// The index and score are untouched. The branding slot, and every slot
    /// when rotation is disabled, is left as is. The special slot toggles to
    /// its other candidate. Ordinary slots prefer a subject used by no other
    /// slot; only when none is left is a duplicate accepted.
    ///
    /// # Errors
    ///
    /// * `Error::OutOfRange` - the session is complete
    /// * `Error::InvalidState` - the current question was already answered
    /// * `Error::UnknownEntry` / `Error::CatalogTooSmall` - `catalog` cannot
    ///   supply a replacement
    pub fn rotate_current_question(
        &mut self,
        catalog: &Catalog,
        rng: &mut fastrand::Rng,
    ) -> Result<&Question, Error> {
        if self.is_complete() {
            return Err(Error::OutOfRange);
        }
        if self.pending.is_some() {
            return Err(Error::InvalidState);
        }

        let index = self.current_index;
        if !self.config.rotation() {
            return Ok(&self.questions[index]);
        }

        let replacement = match self.slots[index] {
            SlotKind::Branding => return Ok(&self.questions[index]),
            SlotKind::Ordinary => self.reroll_ordinary(catalog, rng)?,
            SlotKind::Special => self.toggle_special(catalog, rng)?,
        };

        debug!(
            session = %self.id,
            index,
            from = %self.questions[index].correct_answer,
            to = %replacement.correct_answer,
            "rotated question"
        );
        self.questions[index] = replacement;
        Ok(&self.questions[index])
    }

    fn reroll_ordinary(
        &self,
        catalog: &Catalog,
        rng: &mut fastrand::Rng,
    ) -> Result<Question, Error> {
        let index = self.current_index;
        let pool = question::ordinary_pool(catalog, &self.config);
        let current = self.questions[index].subject.display_name.as_str();
        let used: HashSet<&str> = self
            .questions
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, question)| question.subject.display_name.as_str())
            .collect();

        let others = pool
            .iter()
            .copied()
            .filter(|entry| entry.display_name != current)
            .collect_vec();
        let fresh = others
            .iter()
            .copied()
            .filter(|entry| !used.contains(entry.display_name.as_str()))
            .collect_vec();

        let candidates: &[&IconCatalogEntry] = if fresh.is_empty() { &others } else { &fresh };
        let subject = rng
            .choice(candidates.iter().copied())
            .ok_or(Error::CatalogTooSmall {
                required: OPTION_COUNT,
                available: pool.len(),
            })?;

        Question::generate(subject, &pool, rng)
    }

    fn toggle_special(
        &self,
        catalog: &Catalog,
        rng: &mut fastrand::Rng,
    ) -> Result<Question, Error> {
        let slot = self.config.special_slot().ok_or(Error::InvalidState)?;
        let current = &self.questions[self.current_index].subject.display_name;
        let next = slot
            .candidates
            .iter()
            .find(|candidate| *candidate != current)
            .unwrap_or(current);

        let subject = question::resolve(catalog, next)?;
        let pool = question::special_pool(catalog, &self.config);
        Question::generate(subject, &pool, rng)
    }

    /// Builds the result summary
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidState` unless the session is complete.
    pub fn finalize_result(&self) -> Result<GameResult, Error> {
        if !self.is_complete() {
            return Err(Error::InvalidState);
        }
        Ok(self.result())
    }

    fn result(&self) -> GameResult {
        GameResult::new(
            self.id,
            self.breakdown.clone(),
            self.config.win_threshold(),
        )
    }

    /// Returns the view of the current question, or `None` once complete
    pub fn question_view(&self) -> Option<QuestionView> {
        let question = self.current_question().ok()?;
        Some(QuestionView {
            index: self.current_index,
            count: self.questions.len(),
            identifier: question.subject.identifier.clone(),
            options: question.options.clone(),
            score: self.score,
            rotatable: self.is_rotatable(),
        })
    }

    /// Returns the message that brings a freshly attached view up to date
    pub fn state_message(&self) -> SyncMessage {
        match self.question_view() {
            Some(question) => SyncMessage::Question {
                question,
                feedback: self.pending.clone(),
            },
            None => SyncMessage::Summary(self.result()),
        }
    }

    /// Pushes the current question, or the summary once complete, to `sink`
    pub fn announce<T: RenderSink>(&self, sink: &T) {
        let message: UpdateMessage = match self.question_view() {
            Some(question) => question.into(),
            None => self.result().into(),
        };
        sink.send_message(&message);
    }

    /// Pushes the feedback on the pending answer to `sink`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidState` unless the current question was answered
    /// and not yet advanced past.
    pub fn announce_feedback<T: RenderSink>(&self, sink: &T) -> Result<(), Error> {
        let feedback = self.pending.clone().ok_or(Error::InvalidState)?;
        sink.send_message(&feedback.into());
        Ok(())
    }

    /// Brings a freshly attached `sink` up to date
    pub fn sync<T: RenderSink>(&self, sink: &T) {
        sink.send_state(&self.state_message());
    }
}

/// Starts sessions for one catalog and configuration
///
/// The engine owns the random source, so every session and rotation it
/// drives draws from the same generator. Seed it with [`Engine::with_rng`]
/// for reproducible play-throughs.
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Catalog,
    config: QuizConfig,
    rng: fastrand::Rng,
}

impl Engine {
    /// Creates an engine with a randomly seeded generator
    ///
    /// # Errors
    ///
    /// Any error of [`check_requirements`].
    pub fn new(catalog: Catalog, config: QuizConfig) -> Result<Self, Error> {
        Self::with_rng(catalog, config, fastrand::Rng::new())
    }

    /// Creates an engine with the given generator
    ///
    /// # Errors
    ///
    /// Any error of [`check_requirements`].
    pub fn with_rng(
        catalog: Catalog,
        config: QuizConfig,
        rng: fastrand::Rng,
    ) -> Result<Self, Error> {
        check_requirements(&catalog, &config)?;
        Ok(Self {
            catalog,
            config,
            rng,
        })
    }

    /// Returns the catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the configuration
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Starts a fresh session
    ///
    /// # Errors
    ///
    /// Any error of [`Session::start`].
    pub fn start_session(&mut self) -> Result<Session, Error> {
        Session::start(&self.catalog, self.config.clone(), &mut self.rng)
    }

    /// Rotates the current question of `session`
    ///
    /// # Errors
    ///
    /// Any error of [`Session::rotate_current_question`].
    pub fn rotate_current_question<'s>(
        &mut self,
        session: &'s mut Session,
    ) -> Result<&'s Question, Error> {
        session.rotate_current_question(&self.catalog, &mut self.rng)
    }
}
