//! Use-case services over the storage contract.
//!
//! # Responsibility
//! - Orchestrate store calls into the flows the site's API needs: post
//!   detail assembly, slug-resolved listings, search guarding, inbox
//!   validation and the subscription duplicate pre-check.
//! - Keep transport layers decoupled from storage details.

use crate::model::inbox::ValidationError;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod content_service;
pub mod inbox_service;

/// Service-level error for content and inbox use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Search was called with a blank query.
    EmptyQuery,
    /// Caller-supplied data failed validation before reaching the store.
    Validation(ValidationError),
    /// The email already has a subscription (caller pre-check).
    AlreadySubscribed(String),
    /// Storage-layer failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyQuery => write!(f, "search query must not be blank"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::AlreadySubscribed(email) => {
                write!(f, "email is already subscribed: `{email}`")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
