//! Team invitation records collected during setup.

use serde::{Deserialize, Serialize};

/// Role assigned to an invited team member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteRole {
    Admin,
    #[default]
    Accountant,
    Viewer,
}

impl InviteRole {
    /// All selectable roles, in display order.
    pub const ALL: [InviteRole; 3] = [InviteRole::Admin, InviteRole::Accountant, InviteRole::Viewer];

    /// Get the display name for the role.
    pub fn label(&self) -> &'static str {
        match self {
            InviteRole::Admin => "Admin",
            InviteRole::Accountant => "Accountant",
            InviteRole::Viewer => "Viewer",
        }
    }
}

/// An invited team member, keyed by email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub email: String,
    pub role: InviteRole,
}
