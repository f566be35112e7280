//! Result reporting
//!
//! Once a session is complete its summary is shown to the player and then
//! reported to the lead backend. The report travels over the network, so it
//! sits behind the [`ResultReporter`] trait and is never allowed to affect
//! the result the player sees.

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    UpdateMessage,
    game::{self, Session},
    lead::{ResultReport, ResultReportResponse},
    scoreboard::GameResult,
    session::RenderSink,
};

/// Errors a [`ResultReporter`] may return
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// The backend could not be reached
    #[error("transport failure: {0}")]
    Transport(String),
    /// The backend answered with a failure status
    #[error("report rejected with status {status}")]
    Rejected {
        /// HTTP-like status code returned by the backend
        status: u16,
    },
}

/// Trait for delivering final scores to the lead backend
pub trait ResultReporter {
    /// Sends the report and returns the backend's verdict
    ///
    /// # Errors
    ///
    /// Returns a `ReportError` if the report could not be delivered.
    fn report(&self, report: &ResultReport) -> Result<ResultReportResponse, ReportError>;
}

/// Finalizes `session`, shows the summary and reports the score
///
/// The summary is pushed to `sink` before the reporter is called. A failed
/// report is logged and otherwise ignored.
///
/// # Errors
///
/// Returns `game::Error::InvalidState` if the session is not complete.
pub fn finish<S: RenderSink, R: ResultReporter>(
    session: &Session,
    email: &str,
    sink: &S,
    reporter: &R,
) -> Result<GameResult, game::Error> {
    let result = session.finalize_result()?;
    sink.send_message(&UpdateMessage::Summary(result.clone()));

    let report = ResultReport {
        email: email.to_owned(),
        score: result.score,
    };
    match reporter.report(&report) {
        Ok(response) => info!(
            session = %result.session_id,
            score = result.score,
            qualified = response.qualified_for_raffle,
            "reported result"
        ),
        Err(error) => warn!(
            session = %result.session_id,
            %error,
            "failed to report result"
        ),
    }

    Ok(result)
}
