//! TSO address-space lifecycle operations.
//!
//! Each operation validates its inputs, issues one or more REST calls
//! through [`crate::rest::ZosmfRestClient`], and normalizes the raw
//! response into a typed result. Data flows strictly downward; nothing here
//! caches or pools address spaces. A servlet key is created by [`start`],
//! is the sole handle required by [`send_data_to_address_space_collect`],
//! [`ping`], and [`stop`], and becomes invalid once [`stop`] succeeds.

pub mod app;
pub mod issue;
pub mod ping;
pub mod send;
pub mod start;
pub mod stop;
pub mod validation;

pub use app::{
    AppCommunicationParameters, AppMessage, AppResponse, AppStartParameters, receive_app, send_app,
    start_app,
};
pub use issue::{IssueParameters, IssueResult, issue_command, issue_command_with};
pub use ping::{PingResult, ping};
pub use send::{CollectedResponses, SendResult, collect_responses, send_data_to_address_space_collect};
pub use start::{StartParameters, StartStopResult, start};
pub use stop::stop;
