//! Worker Lambda handler and task processing

pub mod deliver;
pub mod handler;
pub mod services;
pub mod summarize;

// Re-export the main handler for convenience
pub use handler::{handler, process_task};
pub use services::WorkerServices;
