//! Core gateway logic: wire types and the CNB upstream provider

pub mod providers;
pub mod types;
