//! Write-side inbox use-cases: contact messages and subscriptions.
//!
//! # Responsibility
//! - Validate caller-supplied insert data before any store call.
//! - Enforce subscription uniqueness via an explicit pre-insert check.
//!
//! # Invariants
//! - The store is never reached with invalid data.
//! - The check-then-insert sequence is not atomic; under true parallelism
//!   two subscribers can pass the check for the same email. The SQLite
//!   backend's unique constraint is the atomic backstop.

use crate::model::inbox::{ContactMessage, NewContactMessage, NewSubscription, Subscription};
use crate::service::ServiceError;
use crate::store::Storage;
use log::info;

/// Inbox facade over any [`Storage`] backend.
pub struct InboxService<S: Storage> {
    store: S,
}

impl<S: Storage> InboxService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates and records one contact form submission.
    pub fn submit_contact(
        &mut self,
        message: &NewContactMessage,
    ) -> Result<ContactMessage, ServiceError> {
        message.validate()?;
        let recorded = self.store.create_contact_message(message)?;
        info!(
            "event=contact_received module=inbox status=ok id={}",
            recorded.id
        );
        Ok(recorded)
    }

    /// Validates, pre-checks for a duplicate email, then subscribes.
    pub fn subscribe(
        &mut self,
        subscription: &NewSubscription,
    ) -> Result<Subscription, ServiceError> {
        subscription.validate()?;

        if self
            .store
            .subscription_by_email(&subscription.email)?
            .is_some()
        {
            return Err(ServiceError::AlreadySubscribed(
                subscription.email.clone(),
            ));
        }

        let recorded = self.store.create_subscription(subscription)?;
        info!(
            "event=subscription_created module=inbox status=ok id={}",
            recorded.id
        );
        Ok(recorded)
    }
}
