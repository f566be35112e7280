//! Presentation boundary
//!
//! This module defines the trait through which a quiz session hands its
//! questions, answer feedback and final summary to whatever renders them.
//! The engine never touches presentation itself; an adapter on the caller's
//! side implements [`RenderSink`] and forwards the player's chosen option
//! back to the session.

use super::{SyncMessage, UpdateMessage};

/// Trait for sending messages to the presentation layer
///
/// Implementations might drive a DOM, a terminal, or a WebSocket connection
/// to a browser.
pub trait RenderSink {
    /// Sends an incremental update, such as the next question or feedback
    /// on the last answer
    fn send_message(&self, message: &UpdateMessage);

    /// Sends the complete state of the session
    ///
    /// Used when a view attaches or reattaches mid-session.
    fn send_state(&self, state: &SyncMessage);

    /// Closes the sink once the play-through is over
    fn close(self);
}
