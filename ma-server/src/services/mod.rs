//! Services Module
//!
//! Outbound collaborators: the LINE group chat push and the external
//! approval system. Both are constructed once at startup and injected as
//! trait objects so tests can substitute recording fakes.

pub mod approval;
pub mod line;
pub mod notify;

pub use approval::{ApprovalGateway, HttpApprovalClient, dispatch_approvals};
pub use line::{ChatNotifier, LineClient};
