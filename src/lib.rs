pub mod api;
pub mod api_worker;
pub mod config;
pub mod controller;
pub mod file_io;
pub mod logger;
pub mod models;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use api::{ApiError, HttpBackend, QuizBackend};
pub use api_worker::spawn_api_worker;
pub use config::{Config, ConfigError};
pub use controller::{Controller, KeyOutcome};
pub use file_io::load_content;
pub use models::{Alert, AlertKind, ApiRequest, ApiResponse, Focus, ViewState};
pub use ui::draw;
