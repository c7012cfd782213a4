//! Shared application service layer for pipetherm.
//!
//! Parses and bounds simulation requests, compiles project files into
//! engine configurations, imports measured series and packages results
//! for the CLI.

pub mod error;
pub mod import;
pub mod project_service;
pub mod request;
pub mod response;
pub mod run_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use import::{ImportedSeries, load_series, parse_series_text};
pub use project_service::{
    compile_config, load_project, preset_config, project_from_config, run_options, save_project,
};
pub use request::{DEFAULT_INTERVAL_S, SimulateRequest, validate_interval};
pub use response::SimulateResponse;
pub use run_service::{RunLimits, RunOptions, run_simulation, run_simulation_with_progress};
