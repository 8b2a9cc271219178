//! Wire models shared between the server and its clients

pub mod approval;
pub mod notify;
pub mod user;

pub use approval::ApprovalRequest;
pub use notify::{LineMessage, LinePushRequest};
pub use user::UserSummary;
