//! # Icon Quiz Library
//!
//! This library provides the session engine behind a small icon-naming
//! trivia game. A player is shown an icon and four candidate names, picks
//! one, and after a fixed number of questions gets a win or lose summary.
//!
//! The engine builds randomized question sets from an icon catalog, tracks
//! position and score, lets the player rotate the current question, and
//! hands everything it wants shown to a [`session::RenderSink`]. Lead
//! capture payloads and the result report live alongside it.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

use serde::Serialize;
use serde_with::skip_serializing_none;

pub mod constants;

pub mod catalog;
pub mod game;
pub mod lead;
pub mod quiz;
pub mod report;
pub mod scoreboard;
pub mod session;
pub mod session_id;

/// Messages that bring a view fully up to date
///
/// Sent when a view attaches, or reattaches, in the middle of a session.
#[skip_serializing_none]
#[derive(Debug, Serialize, Clone)]
pub enum SyncMessage {
    /// The session is in progress
    Question {
        /// The current question
        question: game::QuestionView,
        /// Feedback when the current question was answered but not advanced past
        feedback: Option<game::AnswerFeedback>,
    },
    /// The session is complete
    Summary(scoreboard::GameResult),
}

impl SyncMessage {
    /// Converts the sync message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// Messages sent as the session progresses
#[derive(Debug, Serialize, Clone, derive_more::From)]
pub enum UpdateMessage {
    /// A question to display
    Question(game::QuestionView),
    /// Feedback on the answer just given
    Feedback(game::AnswerFeedback),
    /// The final summary
    Summary(scoreboard::GameResult),
}

impl UpdateMessage {
    /// Converts the update message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::{catalog::Catalog, game::Session, quiz::config::QuizConfig};

    #[test]
    fn test_update_message_from() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut session = Session::start(&Catalog::compact(), QuizConfig::classic(), &mut rng).unwrap();

        let view = session.question_view().unwrap();
        let message: UpdateMessage = view.clone().into();
        let json = message.to_message();
        assert!(json.starts_with("{\"Question\":"));
        assert!(json.contains(&format!("\"options\":{}", serde_json::to_string(&view.options).unwrap())));

        let answer = session.current_question().unwrap().correct_answer.clone();
        let feedback = session.answer_current(&answer).unwrap();
        let json = UpdateMessage::from(feedback).to_message();
        assert!(json.starts_with("{\"Feedback\":"));
        assert!(json.contains("\"correctAnswer\""));
    }

    #[test]
    fn test_sync_message_skips_missing_feedback() {
        let mut rng = fastrand::Rng::with_seed(2);
        let session = Session::start(&Catalog::compact(), QuizConfig::rotating(), &mut rng).unwrap();

        let json = session.state_message().to_message();
        assert!(json.starts_with("{\"Question\":"));
        assert!(json.contains("\"rotatable\":true"));
        assert!(!json.contains("feedback"));
    }
}
