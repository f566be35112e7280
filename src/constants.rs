//! Configuration constants for the icon quiz
//!
//! This module contains the limits shared by the quiz engine, the quiz
//! configuration, and the lead-capture payloads, so that validation and
//! generation agree on the same boundaries.

/// Quiz session constants
pub mod quiz {
    /// Number of options shown for every question
    pub const OPTION_COUNT: usize = 4;
    /// Number of wrong answers drawn for an ordinary question
    pub const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;
    /// Smallest number of questions a session may hold
    pub const MIN_QUESTION_COUNT: usize = 1;
    /// Largest number of questions a session may hold
    pub const MAX_QUESTION_COUNT: usize = 8;
    /// Largest number of candidates a special slot may toggle between
    pub const MAX_SPECIAL_CANDIDATES: usize = 2;
}

/// Icon catalog constants
pub mod catalog {
    /// Suffix appended to icon file stems by the icon set
    pub const ICON_STYLE_SUFFIX: &str = "_24_regular";
    /// Maximum length of a display name
    pub const MAX_DISPLAY_NAME_LENGTH: usize = 100;
}

/// Registration payload limits, matching the columns of the lead table
pub mod registration {
    /// Maximum length of the registrant's name
    pub const MAX_NAME_LENGTH: usize = 100;
    /// Maximum length of the registrant's email
    pub const MAX_EMAIL_LENGTH: usize = 255;
    /// Maximum length of the experience answer
    pub const MAX_EXPERIENCE_LENGTH: usize = 200;
    /// Maximum length of the self-description answer
    pub const MAX_DESCRIPTION_LENGTH: usize = 500;
    /// Maximum length of the contact-consent answer
    pub const MAX_CAN_CONTACT_LENGTH: usize = 10;
}
