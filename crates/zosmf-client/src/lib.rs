//! # z/OSMF TSO Client
//!
//! Async client for the z/OSMF TSO address-space REST API: start an address
//! space, send it input, collect its queued output until a terminal prompt,
//! ping it, and tear it down.
//!
//! The crate layers strictly downward: operation functions in [`tso`] call
//! the [`rest::ZosmfRestClient`] transport wrapper, which authenticates each
//! request from a [`session::ZosmfSession`]. Results flow back up unchanged
//! in shape except for normalization into the typed result structs.
//!
//! ## Start vs. stop error asymmetry
//!
//! **This is deliberate and callers depend on it.** [`tso::start`] reports a
//! server-side failure (a `msgData` response without a servlet key) as a
//! structured `StartStopResult { success: false, .. }` and does *not* return
//! an error. [`tso::stop`], [`tso::ping`], and
//! [`tso::send_data_to_address_space_collect`] convert the same shape into a
//! [`TsoError::Service`] error carrying the server's `messageText` verbatim.
//! Do not "fix" one side to match the other; the composite
//! [`tso::issue_command`] flow relies on start returning a failure object so
//! it can wrap it in [`TsoError::StartFailed`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use zosmf_client::rest::ZosmfRestClient;
//! use zosmf_client::session::ZosmfSession;
//! use zosmf_client::tso;
//!
//! # async fn example() -> Result<(), zosmf_client::TsoError> {
//! let session = ZosmfSession {
//!     host: "mainframe.example.com".to_string(),
//!     user: Some("ibmuser".to_string()),
//!     password: Some("secret".to_string()),
//!     ..Default::default()
//! };
//! let client = ZosmfRestClient::new(session)?;
//!
//! let result = tso::issue_command(&client, "ACCT#", "STATUS", None).await?;
//! println!("{}", result.command_response);
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all
)]
#![deny(unsafe_code)]

pub mod error;
pub mod rest;
pub mod session;
pub mod tso;

pub use error::{TsoError, TsoResult};
pub use rest::ZosmfRestClient;
pub use session::ZosmfSession;
