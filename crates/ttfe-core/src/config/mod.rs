//! Configuration system for TTFE.
//! Layered TOML/env/directive/CLI resolution with best-effort parameter
//! substitution.

pub mod logging_config;
pub mod mining_config;
pub mod output_config;
pub mod settings;
pub mod strategy_config;
pub mod ttfe_config;

pub use logging_config::LoggingConfig;
pub use mining_config::MiningConfig;
pub use output_config::{OutputConfig, ReportFormat};
pub use settings::{ParameterSubstitution, Resolution, RunSettings, StrategyFlags};
pub use strategy_config::StrategyConfig;
pub use ttfe_config::{ConfigOverrides, LoadedConfig, TtfeConfig};
