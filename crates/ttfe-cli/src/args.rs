//! Command-line arguments.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use ttfe_core::config::ttfe_config::parse_delta;
use ttfe_core::config::{ConfigOverrides, ReportFormat, StrategyConfig};

#[derive(Parser, Debug)]
#[command(name = "ttfe", version)]
#[command(about = "Top-K threat/frequency pattern mining", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Mine the top-K patterns of a dataset
    Mine {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Mine threat and frequency separately and merge the results
    Decompose {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Run a grid of topK and beta values, one report per cell
    Sweep {
        #[command(flatten)]
        run: RunArgs,

        /// Result-set sizes to try
        #[arg(long, value_delimiter = ',', default_value = "1,5,10")]
        top_ks: Vec<usize>,

        /// Frequency weights to try; alpha is 1 - beta
        #[arg(long, value_delimiter = ',', default_value = "0,0.5,1")]
        betas: Vec<f64>,
    },
}

/// Options shared by every mining command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Transaction file
    pub input: PathBuf,

    /// Directory searched for ttfe.toml
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Number of patterns to return
    #[arg(short = 'k', long, allow_negative_numbers = true)]
    pub top_k: Option<i64>,

    /// Threat weight
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Frequency weight
    #[arg(long)]
    pub beta: Option<f64>,

    /// Seed threshold, or "none"
    #[arg(long, allow_hyphen_values = true)]
    pub delta: Option<String>,

    /// Name used in reports and output paths
    #[arg(long)]
    pub database: Option<String>,

    /// Report path template
    #[arg(short, long)]
    pub output: Option<String>,

    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Diagnostic verbosity, 0 to 3
    #[arg(long, allow_negative_numbers = true)]
    pub debug_level: Option<i64>,

    /// Switch a strategy on (repeatable)
    #[arg(long, value_enum)]
    pub enable: Vec<StrategyArg>,

    /// Switch a strategy off (repeatable)
    #[arg(long, value_enum)]
    pub disable: Vec<StrategyArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyArg {
    Seed,
    RealizedValue,
    PairwiseExact,
    PairwiseLowerBound,
    PruneSearch,
    QueueFeedback,
    CooccurrencePruning,
}

impl Command {
    pub fn run_args(&self) -> &RunArgs {
        match self {
            Self::Mine { run } | Self::Decompose { run } | Self::Sweep { run, .. } => run,
        }
    }
}

impl RunArgs {
    /// CLI overrides, the highest configuration layer.
    pub fn to_overrides(&self) -> Result<ConfigOverrides> {
        let delta = match self.delta.as_deref() {
            None => None,
            Some(raw) => match parse_delta(raw) {
                Some(delta) => Some(delta),
                None => bail!("invalid --delta value: {raw}"),
            },
        };

        let mut strategies = StrategyConfig::default();
        for (list, on) in [(&self.enable, true), (&self.disable, false)] {
            for strategy in list {
                let slot = match strategy {
                    StrategyArg::Seed => &mut strategies.seed,
                    StrategyArg::RealizedValue => &mut strategies.realized_value,
                    StrategyArg::PairwiseExact => &mut strategies.pairwise_exact,
                    StrategyArg::PairwiseLowerBound => &mut strategies.pairwise_lower_bound,
                    StrategyArg::PruneSearch => &mut strategies.prune_search,
                    StrategyArg::QueueFeedback => &mut strategies.queue_feedback,
                    StrategyArg::CooccurrencePruning => &mut strategies.cooccurrence_pruning,
                };
                *slot = Some(on);
            }
        }

        Ok(ConfigOverrides {
            top_k: self.top_k,
            alpha: self.alpha,
            beta: self.beta,
            delta,
            database: self.database.clone(),
            strategies,
            output_path: self.output.clone(),
            format: self.format.map(|f| match f {
                FormatArg::Text => ReportFormat::Text,
                FormatArg::Json => ReportFormat::Json,
            }),
            debug_level: self.debug_level,
        })
    }
}
