//! Database Models
//!
//! Row structs are stored as-is (record links as native record ids); the
//! `*View` structs are the hydrated, client-facing shapes with ids rendered
//! as `table:key` strings.

pub mod repair_config;
pub mod status_approve;
pub mod technician;
pub mod user;
pub mod user_log;
pub mod workorder;

pub use repair_config::{RepairConfig, RepairConfigCreate, RepairConfigUpdate, RepairConfigView};
pub use status_approve::{StatusApprove, StatusApproveCreate, StatusApproveView};
pub use technician::{Technician, TechnicianCreate, TechnicianUpdate, TechnicianView};
pub use user::{User, UserCreate, UserView};
pub use user_log::UserLog;
pub use workorder::{
    ApprovedItem, AttachmentRow, AttachmentView, ItemStatusUpdate, ValidItem, Workorder,
    WorkorderCreate, WorkorderItemInput, WorkorderItemRow, WorkorderItemView, WorkorderUpdate,
    WorkorderView,
};
