//! Configuration and the transient data model shared by the API and Worker functions

pub mod config;
pub mod models;
