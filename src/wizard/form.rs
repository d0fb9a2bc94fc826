//! Bound form model for the setup wizard.
//!
//! Every field the wizard collects lives here as a typed value that the UI
//! widgets edit directly. Capturing a step is a pure merge over this
//! structure; nothing is read back from the rendered surface.

use crate::models::{Invitation, InviteRole};

/// VAT filing period options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilingPeriod {
    Monthly,
    #[default]
    Quarterly,
}

impl FilingPeriod {
    pub const ALL: [FilingPeriod; 2] = [FilingPeriod::Monthly, FilingPeriod::Quarterly];

    /// Get the display name for the period.
    pub fn label(&self) -> &'static str {
        match self {
            FilingPeriod::Monthly => "Monthly",
            FilingPeriod::Quarterly => "Quarterly",
        }
    }
}

/// One editable invitation row on the team step.
#[derive(Debug, Clone, Default)]
pub struct InvitationRow {
    pub email: String,
    pub role: InviteRole,
}

/// All wizard input fields, grouped by step.
#[derive(Debug, Clone)]
pub struct SetupForm {
    // Step 1: organization
    pub organization_name: String,
    pub tax_registration_number: String,

    // Step 2: filing settings
    pub filing_period: FilingPeriod,
    pub base_currency: String,
    pub first_filing_month: String,

    // Step 3: team
    pub invite_note: String,
    pub invitations: Vec<InvitationRow>,
}

impl Default for SetupForm {
    fn default() -> Self {
        Self {
            organization_name: String::new(),
            tax_registration_number: String::new(),
            filing_period: FilingPeriod::default(),
            base_currency: "AED".to_string(),
            first_filing_month: String::new(),
            invite_note: String::new(),
            invitations: Vec::new(),
        }
    }
}

impl SetupForm {
    /// Scalar field values belonging to a step, keyed by logical field name.
    ///
    /// Steps without scalar fields return an empty list.
    pub fn step_fields(&self, step: usize) -> Vec<(&'static str, String)> {
        match step {
            1 => vec![
                ("organization_name", self.organization_name.trim().to_string()),
                ("tax_registration_number", self.tax_registration_number.trim().to_string()),
            ],
            2 => vec![
                ("filing_period", self.filing_period.label().to_string()),
                ("base_currency", self.base_currency.trim().to_string()),
                ("first_filing_month", self.first_filing_month.trim().to_string()),
            ],
            3 => vec![("invite_note", self.invite_note.trim().to_string())],
            _ => Vec::new(),
        }
    }

    /// Invitation records derived from the current rows.
    ///
    /// Rows with an empty email are skipped silently.
    pub fn invitation_records(&self) -> Vec<Invitation> {
        self.invitations
            .iter()
            .filter(|row| !row.email.trim().is_empty())
            .map(|row| Invitation {
                email: row.email.trim().to_string(),
                role: row.role,
            })
            .collect()
    }

    /// Append a new empty invitation row.
    pub fn add_invitation_row(&mut self) {
        self.invitations.push(InvitationRow::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_fields_trim_values() {
        let form = SetupForm {
            organization_name: "  Acme Trading LLC  ".to_string(),
            ..Default::default()
        };

        let fields = form.step_fields(1);
        assert_eq!(fields[0], ("organization_name", "Acme Trading LLC".to_string()));
    }

    #[test]
    fn test_unknown_step_has_no_fields() {
        let form = SetupForm::default();
        assert!(form.step_fields(4).is_empty());
        assert!(form.step_fields(99).is_empty());
    }

    #[test]
    fn test_invitation_records_skip_empty_emails() {
        let mut form = SetupForm::default();
        form.add_invitation_row();
        form.add_invitation_row();
        form.invitations[0].email = "lee@acme.example".to_string();
        form.invitations[0].role = InviteRole::Admin;

        let records = form.invitation_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email, "lee@acme.example");
        assert_eq!(records[0].role, InviteRole::Admin);
    }
}
