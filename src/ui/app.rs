//! Main application shell.

use chrono::{DateTime, Local};
use eframe::egui;
use tokio::sync::mpsc;

use crate::client::ComplianceClient;
use crate::config::AppConfig;
use crate::models::DashboardSummary;

use super::dashboard;

/// Messages from async tasks to UI.
pub enum UiMessage {
    SummaryLoaded(DashboardSummary),
    SummaryFailed(String),
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Main application state.
pub struct App {
    handle: tokio::runtime::Handle,
    client: ComplianceClient,

    // Message channel for async communication
    tx: mpsc::UnboundedSender<UiMessage>,
    rx: mpsc::UnboundedReceiver<UiMessage>,

    // Configuration
    pub config: AppConfig,

    // Dashboard data
    pub summary: Option<DashboardSummary>,
    pub is_loading: bool,

    // Log messages
    pub log_messages: Vec<LogEntry>,
}

impl App {
    pub fn new(client: ComplianceClient, handle: tokio::runtime::Handle, config: AppConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut app = Self {
            handle,
            client,
            tx,
            rx,
            config,
            summary: None,
            is_loading: false,
            log_messages: Vec::new(),
        };

        app.refresh_summary();
        app
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        // Keep only last 100 messages
        if self.log_messages.len() > 100 {
            self.log_messages.remove(0);
        }
    }

    /// Fetch the dashboard summary in the background.
    pub fn refresh_summary(&mut self) {
        if self.is_loading {
            return;
        }
        self.is_loading = true;

        let client = self.client.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let msg = match client.dashboard_summary().await {
                Ok(summary) => UiMessage::SummaryLoaded(summary),
                Err(e) => UiMessage::SummaryFailed(e.to_string()),
            };
            let _ = tx.send(msg);
        });
    }

    /// Check for async task results.
    fn poll_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::SummaryLoaded(summary) => {
                    self.is_loading = false;
                    self.log(
                        LogLevel::Success,
                        format!("Summary refreshed for {}", summary.period_label),
                    );
                    self.summary = Some(summary);
                }
                UiMessage::SummaryFailed(e) => {
                    self.is_loading = false;
                    self.log(LogLevel::Error, format!("Summary refresh failed: {e}"));
                }
            }
        }
    }

    /// Render one frame.
    pub fn show(&mut self, ctx: &egui::Context) {
        self.poll_messages();

        if self.is_loading {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard::show(self, ui);
        });
    }
}
