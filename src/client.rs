//! Compliance backend HTTP client.

use std::sync::mpsc;

use crate::error::{AppError, Result};
use crate::models::{DashboardSummary, SetupPayload};
use crate::wizard::SetupSubmitter;

/// Client for the compliance backend API.
///
/// The backend owns all reconciliation, scoring, and report logic; this
/// client only triggers operations and fetches their results.
#[derive(Clone)]
pub struct ComplianceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ComplianceClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - Backend URL (e.g., "https://compliance.vatdesk.example")
    /// * `timeout_secs` - Request timeout in seconds
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Finalize setup with the aggregated wizard configuration.
    ///
    /// Only the boolean `success` flag of the response is interpreted; a
    /// non-2xx status or a missing flag reads as unconfirmed.
    pub async fn complete_setup(&self, payload: &SetupPayload) -> Result<bool> {
        let url = format!("{base}/api/v1/setup/complete", base = self.base_url);

        let response = self.client.post(&url).json(payload).send().await?;
        if !response.status().is_success() {
            return Ok(false);
        }

        let body: serde_json::Value = response.json().await?;
        Ok(body.get("success").and_then(|v| v.as_bool()).unwrap_or(false))
    }

    /// Fetch the server-computed reconciliation summary for the dashboard.
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary> {
        let url = format!("{base}/api/v1/dashboard/summary", base = self.base_url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::api(format!("Summary request failed: {}", response.status())));
        }

        Ok(response.json::<DashboardSummary>().await?)
    }
}

/// Wizard completion collaborator backed by the HTTP client.
///
/// Fires the call on the app's tokio runtime and reports the confirmation
/// flag over a channel the flow polls each frame. Errors drop the sender,
/// which the flow treats as an absent signal.
pub struct HttpSubmitter {
    client: ComplianceClient,
    handle: tokio::runtime::Handle,
}

impl HttpSubmitter {
    pub fn new(client: ComplianceClient, handle: tokio::runtime::Handle) -> Self {
        Self { client, handle }
    }
}

impl SetupSubmitter for HttpSubmitter {
    fn submit(&self, payload: SetupPayload) -> mpsc::Receiver<bool> {
        let (tx, rx) = mpsc::channel();
        let client = self.client.clone();

        self.handle.spawn(async move {
            match client.complete_setup(&payload).await {
                Ok(confirmed) => {
                    let _ = tx.send(confirmed);
                }
                Err(e) => {
                    tracing::warn!("Setup completion call failed: {e}");
                }
            }
        });

        rx
    }
}
