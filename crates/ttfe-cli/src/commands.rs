//! Command handlers.

use anyhow::Result;
use ttfe_core::config::ttfe_config::is_valid_database_name;
use ttfe_core::config::{LoadedConfig, Resolution, RunSettings, TtfeConfig};
use ttfe_core::errors::{Diagnostic, TtfeErrorCode};
use ttfe_mining::sweep::write_reports;
use ttfe_mining::{
    run_sweep, Dataset, DatasetReader, Decomposer, Miner, MiningOutcome, ReportWriter, SweepGrid,
};

use crate::args::{Command, RunArgs};

/// A dataset with its fully resolved run settings.
struct Prepared {
    dataset: Dataset,
    settings: RunSettings,
}

/// Read the dataset, resolve configuration and start logging.
fn prepare(args: &RunArgs) -> Result<Prepared> {
    let mut dataset = DatasetReader::read_path(&args.input)
        .map_err(|e| anyhow::anyhow!(e.coded_string()))?;
    let cli = args.to_overrides()?;
    let LoadedConfig {
        mut config,
        skipped,
    } = TtfeConfig::load(&args.root, Some(&dataset.directives), Some(&cli));
    // Skipped config files are reported alongside the input's own problems.
    let mut diagnostics = skipped;
    diagnostics.append(&mut dataset.diagnostics);
    dataset.diagnostics = diagnostics;
    if config.mining.database.is_none() {
        config.mining.database = dataset.name().filter(|n| is_valid_database_name(n));
    }

    let Resolution {
        settings,
        substitutions,
    } = config.resolve();
    ttfe_core::tracing::init_tracing(settings.debug_level);

    // Reading and resolution ran before a subscriber existed.
    for diagnostic in &dataset.diagnostics {
        tracing::warn!(%diagnostic, "input problem recovered");
    }
    for substitution in &substitutions {
        let diagnostic = substitution.to_diagnostic();
        tracing::warn!(%diagnostic, "parameter substituted");
    }
    tracing::info!(
        input = %args.input.display(),
        database = %settings.database,
        top_k = settings.top_k,
        alpha = settings.alpha,
        beta = settings.beta,
        "run configured"
    );

    Ok(Prepared { dataset, settings })
}

pub fn execute(command: &Command) -> Result<()> {
    let prepared = prepare(command.run_args())?;
    match command {
        Command::Mine { .. } => mine(&prepared),
        Command::Decompose { .. } => decompose(&prepared),
        Command::Sweep { top_ks, betas, .. } => sweep(&prepared, top_ks, betas),
    }
}

fn mine(prepared: &Prepared) -> Result<()> {
    let outcome = Miner::new(prepared.settings.clone())
        .run_dataset(&prepared.dataset)
        .map_err(|e| anyhow::anyhow!(e.coded_string()))?;
    write_and_summarize(&prepared.settings, &outcome, None)
}

fn decompose(prepared: &Prepared) -> Result<()> {
    let result = Decomposer::new(prepared.settings.clone())
        .run(&prepared.dataset.transactions)
        .map_err(|e| anyhow::anyhow!(e.coded_string()))?;
    let mut merged = result.merged;
    let mut diagnostics: Vec<Diagnostic> = prepared.dataset.diagnostics.clone();
    diagnostics.append(&mut merged.diagnostics);
    merged.diagnostics = diagnostics;
    write_and_summarize(
        &prepared.settings,
        &merged,
        Some("approximate: merged from separate threat and frequency runs"),
    )
}

fn sweep(prepared: &Prepared, top_ks: &[usize], betas: &[f64]) -> Result<()> {
    let (grid, _) = SweepGrid::new(top_ks.to_vec(), betas.to_vec()).resolve();
    let cells = run_sweep(&grid, &prepared.settings, &prepared.dataset.transactions)
        .map_err(|e| anyhow::anyhow!(e.coded_string()))?;
    let paths = write_reports(&cells).map_err(|e| anyhow::anyhow!(e.coded_string()))?;
    for (cell, path) in cells.iter().zip(&paths) {
        println!(
            "topK={} beta={} patterns={} delta={} -> {}",
            cell.settings.top_k,
            cell.settings.beta,
            cell.outcome.patterns.len(),
            fmt_delta(cell.outcome.final_delta),
            path.display()
        );
    }
    Ok(())
}

fn write_and_summarize(
    settings: &RunSettings,
    outcome: &MiningOutcome,
    note: Option<&str>,
) -> Result<()> {
    let path = ReportWriter::new(settings.format)
        .write(settings, outcome, note)
        .map_err(|e| anyhow::anyhow!(e.coded_string()))?;
    for pattern in &outcome.patterns {
        println!("{pattern}");
    }
    println!(
        "{} pattern(s), delta {} -> {}, {:.3}s; report: {}",
        outcome.patterns.len(),
        fmt_delta(outcome.initial_delta),
        fmt_delta(outcome.final_delta),
        outcome.stats.elapsed_secs(),
        path.display()
    );
    if settings.debug_level >= 2 {
        eprintln!("{}", outcome.stats);
    }
    Ok(())
}

fn fmt_delta(delta: Option<f64>) -> String {
    delta.map_or_else(|| "none".to_string(), |d| d.to_string())
}
