//! Message gating and link helpers

pub mod filters;
pub mod links;
