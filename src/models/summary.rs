//! Dashboard summary computed server-side.

use serde::{Deserialize, Serialize};

/// Reconciliation summary for the current filing period.
///
/// All numbers are computed by the backend; the dashboard only renders them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Human-readable filing period, e.g. "Q3 2026".
    pub period_label: String,
    pub total_invoices: u64,
    pub matched_invoices: u64,
    pub unmatched_invoices: u64,
    /// Compliance score in percent (0-100).
    pub compliance_score: f32,
}
