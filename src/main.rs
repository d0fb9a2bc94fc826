//! VatDesk - Desktop VAT compliance and invoice reconciliation companion.

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use vatdesk as app;

use app::client::{ComplianceClient, HttpSubmitter};
use app::config::{AppConfig, ConfigLoadResult};
use app::ui::{App, SetupScreen};
use app::wizard::{Destination, SetupFlow};

/// Desktop VAT compliance and invoice reconciliation companion.
#[derive(Parser)]
#[command(name = "vatdesk")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,
}

/// Which screen the application is currently showing.
enum Stage {
    /// First-run setup wizard.
    Setup(SetupScreen),
    /// Main application at the dashboard.
    Main(App),
}

/// Top-level eframe application: hosts the wizard and switches to the main
/// app when the flow requests the dashboard destination.
struct VatDeskApp {
    rt: tokio::runtime::Runtime,
    client: ComplianceClient,
    stage: Stage,
}

impl eframe::App for VatDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let destination = match &mut self.stage {
            Stage::Setup(screen) => screen.show(ctx),
            Stage::Main(main) => {
                main.show(ctx);
                None
            }
        };

        if let Some(Destination::Dashboard) = destination
            && let Stage::Setup(screen) = &self.stage
        {
            tracing::info!("Setup finished, opening dashboard");
            let config = screen.config().clone();
            self.stage = Stage::Main(App::new(self.client.clone(), self.rt.handle().clone(), config));
        }
    }
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    // Initialize logging: console plus a daily-rolling file
    let file_appender = tracing_appender::rolling::daily(AppConfig::log_dir(), "vatdesk.log");
    let (file_writer, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    tracing::info!("VatDesk starting...");

    // Determine config path based on mode
    let config_path = if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };
    tracing::info!("Config path: {:?}", config_path);

    let (config, setup_needed, initial_error) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            (config, false, None)
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, starting setup wizard");
            (AppConfig::default(), true, None)
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid: {}", e);
            (AppConfig::default(), true, Some(e.to_string()))
        }
    };

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let client = ComplianceClient::new(&config.api.base_url, config.api.timeout_secs);

    let start_maximized = config.ui.start_maximized;
    let stage = if setup_needed {
        let submitter = HttpSubmitter::new(client.clone(), rt.handle().clone());
        let flow = SetupFlow::new(Box::new(submitter));
        Stage::Setup(SetupScreen::new(flow, config, config_path, initial_error))
    } else {
        Stage::Main(App::new(client.clone(), rt.handle().clone(), config))
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("VatDesk")
            .with_inner_size([1000.0, 720.0])
            .with_min_inner_size([800.0, 560.0])
            .with_maximized(start_maximized),
        ..Default::default()
    };

    eframe::run_native(
        "VatDesk",
        options,
        Box::new(move |cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            Ok(Box::new(VatDeskApp { rt, client, stage }))
        }),
    )
}
