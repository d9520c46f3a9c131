//! Core types for the relay API gateway.
//!
//! Defines the transport-free domain types shared by the upstream clients
//! and the HTTP front end: validated coordinates, chat bodies, the
//! pass-through weather payload and the upstream outcome classification.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod chat;
pub mod error;
pub mod geo;
pub mod id;
pub mod outcome;
pub mod weather;

pub use chat::{ChatRequest, ChatResponse, PROMPT_PREVIEW_CHARS};
pub use error::CoreError;
pub use geo::{Axis, Latitude, Longitude, WeatherQuery};
pub use id::RequestId;
pub use outcome::{OutcomeKind, UpstreamOutcome};
pub use weather::CurrentWeather;
