//! CNB upstream provider
//!
//! Everything that talks to `api.cnb.cool` or repairs what it sends back:
//!
//! - [`client`] - outbound HTTP calls (redirects disabled so 3xx stays
//!   observable)
//! - [`error`] - translation of upstream failures into [`crate::GatewayError`]
//! - [`normalize`] - pure payload repairs for the embeddings shapes
//! - [`fanout`] - the embeddings batch coordinator

pub mod client;
pub mod error;
pub mod fanout;
pub mod normalize;

pub use client::CnbClient;
