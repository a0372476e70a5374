//! The raw TSO response envelope and its tagged data entries.

use serde::{Deserialize, Serialize};

/// One `TSO MESSAGE` payload: a line of output produced by the address space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsoMessage {
    /// Message format version.
    #[serde(rename = "VERSION", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// The message text.
    #[serde(rename = "DATA", skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// One `TSO PROMPT` payload: the address space is idle and ready for input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsoPrompt {
    /// Prompt format version.
    #[serde(rename = "VERSION", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Whether the prompted input is hidden (password-style).
    #[serde(rename = "HIDDEN", skip_serializing_if = "Option::is_none")]
    pub hidden: Option<String>,
}

/// A single `tsoData` entry, externally tagged on the wire as either
/// `{"TSO MESSAGE": {...}}` or `{"TSO PROMPT": {...}}`.
///
/// Entries with any other tag fail to deserialize, which surfaces malformed
/// payloads at the decode boundary instead of deep inside the poll loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TsoData {
    /// Accumulated output text.
    #[serde(rename = "TSO MESSAGE")]
    Message(TsoMessage),
    /// Ready-for-input signal.
    #[serde(rename = "TSO PROMPT")]
    Prompt(TsoPrompt),
}

impl TsoData {
    /// Message text, if this entry is a message with data.
    pub fn message_text(&self) -> Option<&str> {
        match self {
            TsoData::Message(m) => m.data.as_deref(),
            TsoData::Prompt(_) => None,
        }
    }

    /// Whether this entry is a prompt.
    pub fn is_prompt(&self) -> bool {
        matches!(self, TsoData::Prompt(_))
    }
}

/// One `msgData` entry: a server-side business error delivered over a 2xx
/// HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageData {
    /// Human-readable error text, e.g. an `IZUG1126E` correlation failure.
    #[serde(rename = "messageText")]
    pub message_text: String,
    /// Message identifier.
    #[serde(rename = "messageId", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Server-side stack trace, when the service includes one.
    #[serde(rename = "stackTrace", skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

/// The raw response returned by the TSO resource for start, send, receive,
/// stop, and ping calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TsoResponse {
    /// Address-space session handle. Present on success; required by every
    /// operation except start.
    #[serde(rename = "servletKey", skip_serializing_if = "Option::is_none")]
    pub servlet_key: Option<String>,
    /// Queue identifier, used by app-to-app communication.
    #[serde(rename = "queueID", skip_serializing_if = "Option::is_none")]
    pub queue_id: Option<String>,
    /// Response format version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ver: Option<String>,
    /// Whether the address space was reused.
    #[serde(default)]
    pub reused: bool,
    /// Whether the server-side session timed out.
    #[serde(default)]
    pub timeout: bool,
    /// Server-side session identifier.
    #[serde(rename = "sessionID", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Business-error entries. Non-empty means the server reports a failure.
    #[serde(rename = "msgData", skip_serializing_if = "Option::is_none")]
    pub msg_data: Option<Vec<MessageData>>,
    /// Queued output entries, each tagged as a message or a prompt.
    #[serde(rename = "tsoData", skip_serializing_if = "Option::is_none")]
    pub tso_data: Option<Vec<TsoData>>,
    /// Raw application data, used by the app-communication variant when no
    /// `tsoData` is present.
    #[serde(rename = "appData", skip_serializing_if = "Option::is_none")]
    pub app_data: Option<String>,
}

/// Outcome of classifying a raw response at the decode boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    /// The response carries a servlet key and no error.
    Session {
        /// The address-space handle.
        servlet_key: &'a str,
    },
    /// The server reports a business error.
    ServiceError {
        /// First `msgData` entry; its `messageText` is the error message.
        message: &'a MessageData,
    },
    /// Neither a servlet key nor an error is present; the payload cannot be
    /// interpreted.
    Malformed,
}

impl TsoResponse {
    /// First `msgData` entry, if the server reported an error.
    pub fn first_error(&self) -> Option<&MessageData> {
        self.msg_data.as_ref().and_then(|m| m.first())
    }

    /// Whether this response denotes success (servlet key present).
    pub fn is_success(&self) -> bool {
        self.servlet_key.is_some()
    }

    /// Classify the response shape.
    ///
    /// `msgData` takes precedence: a response carrying both an echoed servlet
    /// key and an error entry is an error (this shape occurs on stop/ping
    /// correlation failures).
    pub fn classify(&self) -> Classification<'_> {
        if let Some(message) = self.first_error() {
            return Classification::ServiceError { message };
        }
        match self.servlet_key.as_deref() {
            Some(key) => Classification::Session { servlet_key: key },
            None => Classification::Malformed,
        }
    }
}
