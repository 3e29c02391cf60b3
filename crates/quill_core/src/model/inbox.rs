//! Inbox records written by site visitors: contact messages and newsletter
//! subscriptions.
//!
//! # Responsibility
//! - Define the two write-only entity shapes plus their insert validation.
//!
//! # Invariants
//! - `created_at` is always store-assigned; insert shapes cannot carry it.
//! - Validation runs in the service layer, before any store call.

use crate::model::{EntityId, EpochMillis};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

// Shape check only; deliverability is out of scope.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Validation failure for caller-supplied insert data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty or whitespace-only.
    MissingField(&'static str),
    /// The email value does not look like an address.
    InvalidEmail(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
        }
    }
}

impl Error for ValidationError {}

/// Message submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Receipt timestamp, assigned by the store at insert time.
    pub created_at: EpochMillis,
}

/// Insert shape for [`ContactMessage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl NewContactMessage {
    /// Checks required fields and email shape.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("name", &self.name)?;
        require_non_blank("subject", &self.subject)?;
        require_non_blank("message", &self.message)?;
        validate_email(&self.email)
    }
}

/// Newsletter subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: EntityId,
    /// Unique per subscriber. The in-memory store does not enforce this;
    /// callers pre-check, and the SQLite schema is the atomic backstop.
    pub email: String,
    /// Subscription timestamp, assigned by the store at insert time.
    pub created_at: EpochMillis,
}

/// Insert shape for [`Subscription`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscription {
    pub email: String,
}

impl NewSubscription {
    /// Checks email shape.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)
    }
}

fn require_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

fn validate_email(value: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(value.to_string()))
    }
}
