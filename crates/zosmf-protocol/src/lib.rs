//! # z/OSMF TSO Protocol Types
//!
//! Wire types and constants for the z/OSMF TSO address-space REST API.
//!
//! This crate models the JSON payloads exchanged with the `/zosmf/tsoApp`
//! resource family: the raw TSO response envelope, the tagged
//! `TSO MESSAGE` / `TSO PROMPT` entry union carried in `tsoData`, the
//! `msgData` error entries, and the fixed default table used when starting
//! an address space.
//!
//! ## Response classification
//!
//! A well-formed TSO response identifies itself in exactly one of two ways:
//! a populated `servletKey` (the address space exists and the key is the
//! handle for every follow-up call) or a populated `msgData` array (the
//! server reports a business error in `messageText`). [`TsoResponse::classify`]
//! performs that check at the decode boundary so callers never have to poke
//! at loosely-typed JSON. Responses carrying *both* fields do occur in the
//! wild (a stop against an already-gone address space keeps the echoed key
//! alongside the error); `msgData` takes precedence there.

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all
)]
#![deny(unsafe_code)]

pub mod constants;
mod tso;

pub use tso::{Classification, MessageData, TsoData, TsoMessage, TsoPrompt, TsoResponse};
