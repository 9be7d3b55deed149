pub mod concern;
pub mod error;

// Re-export the core types to provide a clean public API.
pub use concern::{normalize_status, Concern, ConcernPayload, NewConcern, DEFAULT_STATUS};
pub use error::CoreError;
