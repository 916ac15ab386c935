//! Chat transcript state machine.
//!
//! The transcript always starts with [`GREETING`]. A turn is
//! [`ChatSession::begin`] (append the user message, raise `pending`), one
//! [`Backend::chat`] call, then [`ChatSession::finish`] (append the reply or
//! [`CHAT_FALLBACK`], lower `pending`). While a turn is pending further
//! `begin` calls are dropped; there is no queue.

use docchat_models::{ChatResponse, Message};
use tracing::{debug, warn};

use crate::backend::Backend;
use crate::error::SdkError;

/// Synthetic first assistant message.
pub const GREETING: &str = "Hello! Upload a document and ask me questions about it.";

/// Assistant message appended when a turn fails for any reason.
pub const CHAT_FALLBACK: &str = "Sorry, there was an error processing your request.";

/// Proof that a turn was accepted; carries the text to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTicket {
    message: String,
}

impl ChatTicket {
    /// The trimmed text that goes over the wire.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Transcript, input buffer and in-flight flag.
#[derive(Debug, Clone)]
pub struct ChatSession {
    transcript: Vec<Message>,
    input: String,
    pending: bool,
    revision: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self {
            transcript: vec![Message::assistant(GREETING)],
            input: String::new(),
            pending: false,
            revision: 0,
        }
    }
}

impl ChatSession {
    /// A fresh session holding only the greeting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages in display order.
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// True while a turn is outstanding; input should be disabled.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Bumped on every transcript mutation.
    ///
    /// Views remember the last value they rendered and scroll to the newest
    /// message when it changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // --- Input buffer -----------------------------------------------------

    /// Current contents of the input line.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether the send control should be enabled.
    pub fn can_send(&self) -> bool {
        !self.pending && !self.input.trim().is_empty()
    }

    /// Append a typed character.
    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    /// Append pasted text verbatim.
    pub fn push_str(&mut self, s: &str) {
        self.input.push_str(s);
    }

    /// Delete the last character, if any.
    pub fn backspace(&mut self) {
        self.input.pop();
    }

    // --- Turn lifecycle ---------------------------------------------------

    /// Start a turn with `text`.
    ///
    /// Returns `None` without touching any state if the text is blank or a
    /// turn is already pending. Otherwise the trimmed text is appended as a
    /// user message, the input buffer is cleared and `pending` is raised.
    pub fn begin(&mut self, text: &str) -> Option<ChatTicket> {
        let message = text.trim();
        if message.is_empty() {
            return None;
        }
        if self.pending {
            debug!("chat turn already pending, dropping input");
            return None;
        }

        self.push_message(Message::user(message));
        self.input.clear();
        self.pending = true;
        Some(ChatTicket {
            message: message.to_string(),
        })
    }

    /// Start a turn with the contents of the input buffer.
    pub fn submit_input(&mut self) -> Option<ChatTicket> {
        let text = self.input.clone();
        self.begin(&text)
    }

    /// Complete the pending turn with the backend's result.
    pub fn finish(&mut self, result: Result<ChatResponse, SdkError>) {
        if !self.pending {
            warn!("chat result arrived with no turn pending, ignoring");
            return;
        }

        let reply = match result {
            Ok(res) => Message::assistant(res.response),
            Err(e) => {
                warn!(status = ?e.status(), error = %e, "chat turn failed");
                Message::assistant(CHAT_FALLBACK)
            }
        };
        self.push_message(reply);
        self.pending = false;
    }

    /// `begin`, one backend call, `finish`.
    ///
    /// Returns the appended assistant message, or `None` if the turn was not
    /// accepted.
    pub async fn send<B: Backend>(&mut self, backend: &B, text: &str) -> Option<&Message> {
        let ticket = self.begin(text)?;
        let result = backend.chat(ticket.message()).await;
        self.finish(result);
        self.transcript.last()
    }

    fn push_message(&mut self, message: Message) {
        self.transcript.push(message);
        self.revision += 1;
    }
}
