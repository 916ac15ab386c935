//! Chat transcript types.
//!
//! A transcript is an append-only sequence of [`Message`]s whose insertion
//! order is the display order. Messages carry no identifiers or timestamps;
//! they live only as long as the chat session holding them.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Author of a transcript entry.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Text typed by the person using the client.
    User,
    /// Text produced by the backend (or a synthetic client message).
    Assistant,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// One entry of the chat transcript.
///
/// # Examples
///
/// ```
/// use docchat_models::{Message, Role};
///
/// let msg = Message::user("What is on page 3?");
/// assert_eq!(msg.role, Role::User);
/// assert_eq!(msg.content, "What is on page 3?");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Who wrote the message.
    pub role: Role,
    /// Message text, displayed verbatim.
    pub content: String,
}

impl Message {
    /// Create a message with an explicit role.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a [`Role::User`] message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a [`Role::Assistant`] message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Returns true if the message was written by the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role, self.content)
    }
}
