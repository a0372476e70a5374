//! Error types for TSO address-space operations.

use std::time::Duration;
use thiserror::Error;

/// Errors produced by the TSO client.
#[derive(Error, Debug)]
pub enum TsoError {
    /// A required input was missing or empty. Raised synchronously before
    /// any network call; the message is one of the fixed strings in
    /// [`crate::tso::validation`].
    #[error("{0}")]
    InvalidInput(&'static str),

    /// The server reported a business error in `msgData` over a 2xx
    /// response. The message is the server's `messageText` verbatim.
    #[error("{0}")]
    Service(String),

    /// The composite issue-command flow could not start an address space.
    /// `detail` carries the server's failure text.
    #[error("TSO address space failed to start.")]
    StartFailed {
        /// Server-side failure text from the start response.
        detail: String,
    },

    /// The server answered with a non-2xx HTTP status.
    #[error("z/OSMF request failed with status {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, useful for diagnostics.
        body: String,
    },

    /// Transport-level failure from the HTTP client. Propagated unchanged;
    /// no retry or classification is performed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response could not be interpreted: neither a servlet key nor a
    /// `msgData` error was present, or the payload failed to decode.
    #[error("malformed z/OSMF response: {0}")]
    MalformedResponse(String),

    /// The app-communication receive loop hit its wall-clock timeout before
    /// anything was collected.
    #[error("timed out after {elapsed:?} waiting for application data")]
    ReceiveTimeout {
        /// How long the loop waited.
        elapsed: Duration,
    },
}

/// Result alias for TSO operations.
pub type TsoResult<T> = Result<T, TsoError>;
