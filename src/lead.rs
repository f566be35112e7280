//! Lead capture payloads
//!
//! The quiz runs at a conference stand: players register before playing and
//! their final score is reported afterwards to decide raffle eligibility.
//! This module holds the JSON payloads exchanged with that backend and the
//! validation applied to a registration before it is sent.

use garde::Validate;
use itertools::Itertools;
use rustrict::CensorStr;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use thiserror::Error;

use crate::constants::registration::{
    MAX_CAN_CONTACT_LENGTH, MAX_DESCRIPTION_LENGTH, MAX_EMAIL_LENGTH, MAX_EXPERIENCE_LENGTH,
    MAX_NAME_LENGTH,
};

type ValidationResult = garde::Result;

fn validate_appropriate(val: &str) -> ValidationResult {
    if val.is_inappropriate() {
        Err(garde::Error::new("name is inappropriate"))
    } else {
        Ok(())
    }
}

/// Errors raised while validating a registration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// One or more fields are empty after trimming
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    /// A field exceeds its limit or is malformed
    #[error("invalid registration: {0}")]
    Invalid(String),
}

/// A player's registration form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct Registration {
    /// Full name
    #[garde(length(chars, max = MAX_NAME_LENGTH), custom(|v, _| validate_appropriate(v)))]
    pub name: String,
    /// Contact address, also the key for result reports
    #[garde(email, length(max = MAX_EMAIL_LENGTH))]
    pub email: String,
    /// Self-reported experience with the product
    #[garde(length(chars, max = MAX_EXPERIENCE_LENGTH))]
    pub fabric_experience: String,
    /// Free-text description of the player's work
    #[garde(length(chars, max = MAX_DESCRIPTION_LENGTH))]
    pub description: String,
    /// Whether the player may be contacted afterwards
    #[garde(length(chars, max = MAX_CAN_CONTACT_LENGTH))]
    pub can_contact: String,
}

impl Registration {
    /// Returns a copy with every field trimmed
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            name: rustrict::trim_whitespace(&self.name).to_owned(),
            email: self.email.trim().to_owned(),
            fabric_experience: self.fabric_experience.trim().to_owned(),
            description: self.description.trim().to_owned(),
            can_contact: self.can_contact.trim().to_owned(),
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("fabricExperience", &self.fabric_experience),
            ("description", &self.description),
            ("canContact", &self.can_contact),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect_vec()
    }

    /// Trims and validates the registration
    ///
    /// # Returns
    ///
    /// The normalized registration, ready to be sent.
    ///
    /// # Errors
    ///
    /// * `Error::MissingFields` - some fields are empty after trimming, listed
    ///   by their JSON names
    /// * `Error::Invalid` - a field is too long, the email is malformed or the
    ///   name is inappropriate
    pub fn checked(&self) -> Result<Self, Error> {
        let normalized = self.normalized();

        let missing = normalized.missing_fields();
        if !missing.is_empty() {
            return Err(Error::MissingFields(missing));
        }

        normalized
            .validate()
            .map_err(|report| Error::Invalid(report.to_string()))?;

        Ok(normalized)
    }
}

/// Asks whether an email is already registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCheck {
    /// Address to look up
    pub email: String,
}

/// Answer to an [`EmailCheck`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCheckResponse {
    /// Whether a registration with that email exists
    pub exists: bool,
}

/// Final score of a registered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultReport {
    /// The player's registered email
    pub email: String,
    /// Number of correct answers
    pub score: usize,
}

/// Answer to a [`ResultReport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultReportResponse {
    /// Whether the score enters the player into the raffle
    pub qualified_for_raffle: bool,
}

/// Answer to a saved registration
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    /// Whether the registration was stored
    pub success: bool,
    /// Human-readable status
    pub message: String,
    /// Row identifier of the stored registration
    pub id: Option<u64>,
    /// Error detail on failure
    pub error: Option<String>,
}

impl SaveResponse {
    /// Builds a successful response
    pub fn saved(id: u64) -> Self {
        Self {
            success: true,
            message: "Data saved successfully".to_string(),
            id: Some(id),
            error: None,
        }
    }

    /// Builds a failed response from a validation error
    pub fn rejected(error: &Error) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            id: None,
            error: None,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn registration() -> Registration {
        Registration {
            name: "  Ada Lovelace ".to_string(),
            email: " ada@example.com".to_string(),
            fabric_experience: "Some".to_string(),
            description: "Data engineer".to_string(),
            can_contact: "Yes ".to_string(),
        }
    }

    #[test]
    fn test_checked_trims_fields() {
        let checked = registration().checked().unwrap();
        assert_eq!(checked.name, "Ada Lovelace");
        assert_eq!(checked.email, "ada@example.com");
        assert_eq!(checked.can_contact, "Yes");
    }

    #[test]
    fn test_missing_fields_listed_by_wire_name() {
        let mut form = registration();
        form.fabric_experience = "   ".to_string();
        form.can_contact = String::new();

        let error = form.checked().unwrap_err();
        assert_eq!(error, Error::MissingFields(vec!["fabricExperience", "canContact"]));
        assert_eq!(
            error.to_string(),
            "Missing required fields: fabricExperience, canContact"
        );
    }

    #[test]
    fn test_default_is_all_missing() {
        assert_eq!(
            Registration::default().checked(),
            Err(Error::MissingFields(vec![
                "name",
                "email",
                "fabricExperience",
                "description",
                "canContact"
            ]))
        );
    }

    #[test]
    fn test_invalid_email() {
        let mut form = registration();
        form.email = "not-an-email".to_string();
        assert!(matches!(form.checked(), Err(Error::Invalid(_))));
    }

    #[test]
    fn test_too_long_fields() {
        let mut form = registration();
        form.description = "a".repeat(MAX_DESCRIPTION_LENGTH + 1);
        assert!(matches!(form.checked(), Err(Error::Invalid(_))));

        let mut form = registration();
        form.can_contact = "absolutely yes".to_string();
        assert!(matches!(form.checked(), Err(Error::Invalid(_))));

        let mut form = registration();
        form.description = "a".repeat(MAX_DESCRIPTION_LENGTH);
        assert!(form.checked().is_ok());
    }

    #[test]
    fn test_inappropriate_name() {
        let mut form = registration();
        form.name = "fuck".to_string();
        assert!(matches!(form.checked(), Err(Error::Invalid(_))));
    }

    #[test]
    fn test_registration_wire_format() {
        let form: Registration = serde_json::from_str(
            r#"{"name":"Ada","email":"ada@example.com","fabricExperience":"None","canContact":"No"}"#,
        )
        .unwrap();
        assert_eq!(form.description, "");
        assert_eq!(form.checked(), Err(Error::MissingFields(vec!["description"])));

        let json = serde_json::to_string(&registration()).unwrap();
        assert!(json.contains("\"fabricExperience\""));
        assert!(json.contains("\"canContact\""));
    }

    #[test]
    fn test_report_payloads() {
        let report = ResultReport {
            email: "ada@example.com".to_string(),
            score: 3,
        };
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"email":"ada@example.com","score":3}"#
        );

        let response: ResultReportResponse =
            serde_json::from_str(r#"{"qualifiedForRaffle":true}"#).unwrap();
        assert!(response.qualified_for_raffle);

        let exists: EmailCheckResponse = serde_json::from_str(r#"{"exists":false}"#).unwrap();
        assert!(!exists.exists);
    }

    #[test]
    fn test_save_response() {
        let json = serde_json::to_string(&SaveResponse::saved(7)).unwrap();
        assert!(json.contains("\"id\":7"));
        assert!(!json.contains("error"));

        let error = Error::MissingFields(vec!["email"]);
        let response = SaveResponse::rejected(&error);
        assert!(!response.success);
        assert_eq!(response.message, "Missing required fields: email");
    }
}
