//! All LINE Messaging API functionality

pub mod client;
pub mod response_builder;

// Re-export main types for convenience
pub use client::{LineClient, ReplySender};
