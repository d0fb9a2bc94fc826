//! Data models for setup, invitations, and dashboard summaries.

pub mod invitation;
pub mod setup;
pub mod summary;

pub use invitation::{Invitation, InviteRole};
pub use setup::SetupPayload;
pub use summary::DashboardSummary;
