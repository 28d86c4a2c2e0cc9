//! # Email Module
//!
//! The notification-form message type and the seam the delivery collaborator
//! implements.
//!
//! Delivery is synchronous and best-effort: a failed send surfaces to the
//! caller as a [`SendError`] and is never retried here, and nothing about it
//! touches stored state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{ValidationError, ValidationResult};
use crate::validation::validate_email;

// =============================================================================
// Email Message
// =============================================================================

/// A notification composed on the send-email form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    pub subject: String,
    pub message: String,
    pub recipient: String,
}

impl EmailMessage {
    /// Validates the message the way the form layer does: subject and body
    /// required, recipient must look like an email address.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.subject.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "subject".to_string(),
            });
        }

        if self.message.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "message".to_string(),
            });
        }

        validate_email(&self.recipient)
    }
}

// =============================================================================
// Mailer Seam
// =============================================================================

/// Delivery failure reported by a [`Mailer`] implementation.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("email delivery failed: {0}")]
pub struct SendError(pub String);

/// The capability the delivery layer provides: take a composed message,
/// deliver it, report success or failure. Implementations live outside this
/// crate (SMTP in production, a recorder in tests).
pub trait Mailer {
    fn send(&self, message: &EmailMessage) -> Result<(), SendError>;
}

// =============================================================================
// Unit Tests
// =============================================================================
