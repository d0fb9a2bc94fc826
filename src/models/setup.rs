//! Aggregated setup configuration submitted to the backend.

use std::collections::HashMap;

use serde::Serialize;

use super::invitation::Invitation;

/// Full setup configuration gathered by the wizard.
///
/// Scalar fields collected across all steps are flattened into the JSON
/// object; invitations are sent as a nested list.
#[derive(Debug, Clone, Serialize)]
pub struct SetupPayload {
    #[serde(flatten)]
    pub fields: HashMap<String, String>,
    pub invitations: Vec<Invitation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invitation::InviteRole;

    #[test]
    fn test_payload_flattens_fields() {
        let mut fields = HashMap::new();
        fields.insert("organization_name".to_string(), "Acme Trading LLC".to_string());

        let payload = SetupPayload {
            fields,
            invitations: vec![Invitation {
                email: "sam@acme.example".to_string(),
                role: InviteRole::Viewer,
            }],
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["organization_name"], "Acme Trading LLC");
        assert_eq!(json["invitations"][0]["email"], "sam@acme.example");
        assert_eq!(json["invitations"][0]["role"], "viewer");
    }
}
