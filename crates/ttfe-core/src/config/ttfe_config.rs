//! Top-level TTFE configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::mining_config::complete_weights;
use super::settings::{ParameterSubstitution, Resolution, RunSettings, StrategyFlags};
use super::{LoggingConfig, MiningConfig, OutputConfig, ReportFormat, StrategyConfig};
use crate::constants::{
    DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_DATABASE, DEFAULT_DEBUG_LEVEL, DEFAULT_TOP_K,
    ENV_PREFIX, MAX_DEBUG_LEVEL, NO_DELTA_TOKENS, PROJECT_CONFIG_FILE, WEIGHT_SUM_TOLERANCE,
};
use crate::errors::{ConfigError, Diagnostic, DiagnosticKind};

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags
/// 2. Environment variables (`TTFE_*`)
/// 3. `key=value` directives inside the dataset
/// 4. Project config (`ttfe.toml` in the working root)
/// 5. User config (`~/.ttfe/config.toml`)
/// 6. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TtfeConfig {
    pub mining: MiningConfig,
    pub strategies: StrategyConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Result of [`TtfeConfig::load`]: the merged config and one diagnostic per
/// config file that had to be ignored.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: TtfeConfig,
    pub skipped: Vec<Diagnostic>,
}

/// A sparse set of overrides, produced by CLI flags or dataset directives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub top_k: Option<i64>,
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    /// `Some(None)` explicitly clears the seed threshold.
    pub delta: Option<Option<f64>>,
    pub database: Option<String>,
    pub strategies: StrategyConfig,
    pub output_path: Option<String>,
    pub format: Option<ReportFormat>,
    pub debug_level: Option<i64>,
}

impl ConfigOverrides {
    /// Returns true if no override is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl TtfeConfig {
    /// Load configuration with layered resolution.
    ///
    /// `directives` are the overrides embedded in the dataset file; they sit
    /// between the config files and the environment. A config file that
    /// cannot be read or parsed is skipped and reported, never fatal.
    pub fn load(
        root: &Path,
        directives: Option<&ConfigOverrides>,
        cli_overrides: Option<&ConfigOverrides>,
    ) -> LoadedConfig {
        let mut config = Self::default();
        let mut skipped = Vec::new();

        // Layer 5 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                config.merge_layer(&user_config_path, &mut skipped);
            }
        }

        // Layer 4: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            config.merge_layer(&project_config_path, &mut skipped);
        }

        // Layer 3: dataset directives
        if let Some(directives) = directives {
            config.apply_overrides(directives);
        }

        // Layer 2: environment variables
        config.apply_env_overrides();

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            config.apply_overrides(cli);
        }

        LoadedConfig { config, skipped }
    }

    fn merge_layer(&mut self, path: &Path, skipped: &mut Vec<Diagnostic>) {
        if let Err(e) = Self::merge_toml_file(self, path) {
            tracing::warn!(error = %e, "config file skipped");
            skipped.push(Diagnostic::new(
                DiagnosticKind::ConfigFileSkipped,
                format!("{e}; layer ignored"),
            ));
        }
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.mining.complete_weights();
        Ok(config)
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Resolve into concrete settings, substituting defaults for anything
    /// out of range. Never fails; every substitution is reported.
    pub fn resolve(&self) -> Resolution {
        let mut substitutions = Vec::new();
        let mut substitute = |field: &str, given: String, substituted: String| {
            tracing::warn!(field, %given, %substituted, "parameter out of range, using default");
            substitutions.push(ParameterSubstitution {
                field: field.to_string(),
                given,
                substituted,
            });
        };

        let top_k = match self.mining.top_k {
            None => DEFAULT_TOP_K,
            Some(k) if k > 0 => k as usize,
            Some(k) => {
                substitute("top_k", k.to_string(), DEFAULT_TOP_K.to_string());
                DEFAULT_TOP_K
            }
        };

        let mut alpha = self.mining.alpha;
        let mut beta = self.mining.beta;
        complete_weights(&mut alpha, &mut beta);
        let (alpha, beta) = match (alpha, beta) {
            (Some(a), Some(b)) if weights_valid(a, b) => (a, b),
            (Some(a), Some(b)) => {
                substitute(
                    "alpha/beta",
                    format!("{a}/{b}"),
                    format!("{DEFAULT_ALPHA}/{DEFAULT_BETA}"),
                );
                (DEFAULT_ALPHA, DEFAULT_BETA)
            }
            _ => (DEFAULT_ALPHA, DEFAULT_BETA),
        };

        let delta = match self.mining.delta {
            Some(d) if d.is_nan() || d == f64::INFINITY => {
                substitute("delta", d.to_string(), "none".to_string());
                None
            }
            Some(d) if d == f64::NEG_INFINITY => None,
            other => other,
        };

        let database = match self.mining.database.as_deref() {
            None => DEFAULT_DATABASE.to_string(),
            Some(name) if is_valid_database_name(name) => name.to_string(),
            Some(name) => {
                substitute("database", name.to_string(), DEFAULT_DATABASE.to_string());
                DEFAULT_DATABASE.to_string()
            }
        };

        let debug_level = match self.logging.debug_level {
            None => DEFAULT_DEBUG_LEVEL,
            Some(level) if (0..=i64::from(MAX_DEBUG_LEVEL)).contains(&level) => level as u8,
            Some(level) => {
                substitute(
                    "debug_level",
                    level.to_string(),
                    DEFAULT_DEBUG_LEVEL.to_string(),
                );
                DEFAULT_DEBUG_LEVEL
            }
        };

        let defaults = StrategyFlags::default();
        let s = &self.strategies;
        let strategies = StrategyFlags {
            seed: s.seed.unwrap_or(defaults.seed),
            realized_value: s.realized_value.unwrap_or(defaults.realized_value),
            pairwise_exact: s.pairwise_exact.unwrap_or(defaults.pairwise_exact),
            pairwise_lower_bound: s
                .pairwise_lower_bound
                .unwrap_or(defaults.pairwise_lower_bound),
            prune_search: s.prune_search.unwrap_or(defaults.prune_search),
            queue_feedback: s.queue_feedback.unwrap_or(defaults.queue_feedback),
            cooccurrence_pruning: s
                .cooccurrence_pruning
                .unwrap_or(defaults.cooccurrence_pruning),
        };

        Resolution {
            settings: RunSettings {
                database,
                top_k,
                alpha,
                beta,
                delta,
                strategies,
                debug_level,
                output_path: self.output.effective_path(),
                format: self.output.effective_format(),
            },
            substitutions,
        }
    }

    /// Overlay a sparse override set. A lone weight implies its complement.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(k) = overrides.top_k {
            self.mining.top_k = Some(k);
        }
        let mut alpha = overrides.alpha;
        let mut beta = overrides.beta;
        complete_weights(&mut alpha, &mut beta);
        if alpha.is_some() {
            self.mining.alpha = alpha;
            self.mining.beta = beta;
        }
        if let Some(delta) = overrides.delta {
            self.mining.delta = delta;
        }
        if let Some(ref db) = overrides.database {
            self.mining.database = Some(db.clone());
        }
        self.strategies.merge_from(&overrides.strategies);
        if let Some(ref path) = overrides.output_path {
            self.output.path = Some(path.clone());
        }
        if let Some(format) = overrides.format {
            self.output.format = Some(format);
        }
        if let Some(level) = overrides.debug_level {
            self.logging.debug_level = Some(level);
        }
    }

    /// Returns the user config path: `~/.ttfe/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".ttfe").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut TtfeConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let mut file_config: TtfeConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        file_config.mining.complete_weights();

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut TtfeConfig, other: &TtfeConfig) {
        if other.mining.top_k.is_some() {
            base.mining.top_k = other.mining.top_k;
        }
        if other.mining.alpha.is_some() {
            base.mining.alpha = other.mining.alpha;
        }
        if other.mining.beta.is_some() {
            base.mining.beta = other.mining.beta;
        }
        if other.mining.delta.is_some() {
            base.mining.delta = other.mining.delta;
        }
        if other.mining.database.is_some() {
            base.mining.database = other.mining.database.clone();
        }

        base.strategies.merge_from(&other.strategies);

        if other.output.path.is_some() {
            base.output.path = other.output.path.clone();
        }
        if other.output.format.is_some() {
            base.output.format = other.output.format;
        }

        if other.logging.debug_level.is_some() {
            base.logging.debug_level = other.logging.debug_level;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `TTFE_TOP_K`, `TTFE_ALPHA`, `TTFE_DELTA`, etc.
    fn apply_env_overrides(&mut self) {
        let mut overrides = ConfigOverrides::default();
        if let Some(v) = env_var("TOP_K").and_then(|v| v.trim().parse::<i64>().ok()) {
            overrides.top_k = Some(v);
        }
        if let Some(v) = env_var("ALPHA").and_then(|v| v.trim().parse::<f64>().ok()) {
            overrides.alpha = Some(v);
        }
        if let Some(v) = env_var("BETA").and_then(|v| v.trim().parse::<f64>().ok()) {
            overrides.beta = Some(v);
        }
        if let Some(v) = env_var("DELTA").and_then(|v| parse_delta(&v)) {
            overrides.delta = Some(v);
        }
        if let Some(v) = env_var("DATABASE") {
            overrides.database = Some(v);
        }
        if let Some(v) = env_var("DEBUG_LEVEL").and_then(|v| v.trim().parse::<i64>().ok()) {
            overrides.debug_level = Some(v);
        }
        if let Some(v) = env_var("OUTPUT") {
            overrides.output_path = Some(v);
        }
        self.apply_overrides(&overrides);
    }
}

/// Read `TTFE_<name>`.
fn env_var(name: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{name}")).ok()
}

/// Parse a threshold value. `Some(None)` is an explicit "no information"
/// token, `None` means the text is not a threshold at all.
pub fn parse_delta(raw: &str) -> Option<Option<f64>> {
    let token = raw.trim().to_ascii_lowercase();
    if NO_DELTA_TOKENS.contains(&token.as_str()) {
        return Some(None);
    }
    match token.parse::<f64>() {
        Ok(v) if v == f64::NEG_INFINITY => Some(None),
        Ok(v) if v.is_finite() => Some(Some(v)),
        _ => None,
    }
}

/// Weights must each lie in [0, 1] and sum to 1.
fn weights_valid(alpha: f64, beta: f64) -> bool {
    (0.0..=1.0).contains(&alpha)
        && (0.0..=1.0).contains(&beta)
        && ((alpha + beta) - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
}

/// Database names follow identifier rules: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_valid_database_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
