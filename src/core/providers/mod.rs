//! Upstream providers. The CNB backend is the only one this gateway fronts.

pub mod cnb;

pub use cnb::CnbClient;
