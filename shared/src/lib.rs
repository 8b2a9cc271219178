//! Shared types for the maintenance backend
//!
//! Common types used by the server and its clients: the uniform API
//! response envelope, pagination structures, and the wire payloads of the
//! outbound LINE and approval calls.

pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use response::{ApiResponse, Paginated, Pagination};
