//! GUI screens and application state.

pub mod app;
pub mod components;
pub mod dashboard;
pub mod setup_wizard;

pub use app::App;
pub use setup_wizard::SetupScreen;
