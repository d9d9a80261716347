//! Shared constants for the TTFE mining engine.

/// TTFE version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Algorithm name used in reports and the `{algoName}` path placeholder.
pub const ALGORITHM_NAME: &str = "TTFE";

/// Default result-set size.
pub const DEFAULT_TOP_K: usize = 5;

/// Default threat weight.
pub const DEFAULT_ALPHA: f64 = 0.5;

/// Default frequency weight.
pub const DEFAULT_BETA: f64 = 0.5;

/// Default diagnostic verbosity (0 = silent, 3 = everything).
pub const DEFAULT_DEBUG_LEVEL: u8 = 2;

/// Highest accepted debug level.
pub const MAX_DEBUG_LEVEL: u8 = 3;

/// Default database name when none is configured or derivable.
pub const DEFAULT_DATABASE: &str = "ttfe";

/// Default report path template.
pub const DEFAULT_OUTPUT_TEMPLATE: &str = "./output_{database}_{topK}_{alpha}_{beta}.txt";

/// Allowed deviation of `alpha + beta` from 1.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Relative slack applied to every threshold comparison.
pub const THRESHOLD_TOLERANCE: f64 = 1e-9;

/// Allowed deviation between a declared and recomputed transaction total.
pub const TOTAL_CHECK_TOLERANCE: f64 = 1e-6;

/// Number of middle items the pairwise lower-bound strategy removes at most.
pub const MAX_MIDDLE_REMOVALS: usize = 3;

/// Number of positional `switchesN` flags accepted in dataset directives.
pub const SWITCH_COUNT: usize = 6;

/// Tokens meaning "no threshold information" for `delta`.
pub const NO_DELTA_TOKENS: [&str; 6] = [
    "null",
    "none",
    "-inf",
    "-infinity",
    "-float(\"inf\")",
    "-float('inf')",
];

// ---- Environment ----

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV_VAR: &str = "TTFE_LOG";

/// Prefix of configuration environment overrides.
pub const ENV_PREFIX: &str = "TTFE_";

/// Project-level configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "ttfe.toml";
