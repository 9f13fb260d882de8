pub mod client;
pub mod protocol;

// Public API exports
pub use client::{HttpBackend, QuizBackend};
pub use protocol::ApiError;
