//! # CNB Gateway
//!
//! A translation proxy in front of the CNB LLM API (`https://api.cnb.cool`)
//! that re-exposes chat completions, embeddings and model listing under the
//! OpenAI wire contract.
//!
//! The interesting parts live in [`core::providers::cnb`]:
//!
//! - **Batch fan-out**: a multi-input embeddings request is split into one
//!   upstream call per input, issued concurrently, and merged back with
//!   client-visible indices and summed usage counters.
//! - **Response normalization**: upstream payloads arrive in several
//!   incompatible shapes (string-encoded vectors, flat `embeddings` arrays)
//!   and are rewritten into the canonical OpenAI embeddings shape.
//! - **Error translation**: upstream failures - including 3xx redirects to a
//!   login page standing in for 401s - become one OpenAI-style error
//!   envelope.
//!
//! Everything else is request plumbing: bearer token extraction, upstream URL
//! resolution from environment configuration, CORS, and an actix-web facade.

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::{Capability, Config};
pub use utils::error::{ErrorEnvelope, GatewayError, Result};
