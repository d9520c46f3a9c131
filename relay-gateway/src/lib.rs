//! HTTP API gateway for a browser front end.
//!
//! Exposes a weather lookup and a chat endpoint, forwarding each request to
//! a third-party upstream and translating every upstream result or failure
//! into a uniform JSON contract.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
