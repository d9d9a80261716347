//! Parameter sweep: one independent run per `(topK, beta)` grid cell.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use ttfe_core::config::{ParameterSubstitution, RunSettings};
use ttfe_core::constants::{DEFAULT_BETA, DEFAULT_TOP_K};
use ttfe_core::errors::MiningError;
use ttfe_core::types::collections::FxHashMap;

use crate::corpus::Transaction;
use crate::pipeline::{Miner, MiningOutcome};
use crate::report::{render_path, ReportWriter};

/// Grid of result-set sizes and frequency weights (`alpha = 1 - beta`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepGrid {
    pub top_ks: Vec<usize>,
    pub betas: Vec<f64>,
}

impl SweepGrid {
    pub fn new(top_ks: Vec<usize>, betas: Vec<f64>) -> Self {
        Self { top_ks, betas }
    }

    /// Replace a zero `topK` or a `beta` outside `[0, 1]` by its default,
    /// reporting each replacement.
    pub fn resolve(self) -> (Self, Vec<ParameterSubstitution>) {
        let mut substitutions = Vec::new();
        let top_ks = self
            .top_ks
            .into_iter()
            .map(|k| {
                if k > 0 {
                    return k;
                }
                substitutions.push(ParameterSubstitution {
                    field: "sweep top_k".to_string(),
                    given: k.to_string(),
                    substituted: DEFAULT_TOP_K.to_string(),
                });
                DEFAULT_TOP_K
            })
            .collect();
        let betas = self
            .betas
            .into_iter()
            .map(|beta| {
                if (0.0..=1.0).contains(&beta) {
                    return beta;
                }
                substitutions.push(ParameterSubstitution {
                    field: "sweep beta".to_string(),
                    given: beta.to_string(),
                    substituted: DEFAULT_BETA.to_string(),
                });
                DEFAULT_BETA
            })
            .collect();
        for substitution in &substitutions {
            let diagnostic = substitution.to_diagnostic();
            tracing::warn!(%diagnostic, "sweep parameter substituted");
        }
        (Self { top_ks, betas }, substitutions)
    }

    /// Settings for every cell, `top_ks` outer, `betas` inner.
    pub fn cells(&self, base: &RunSettings) -> Vec<RunSettings> {
        self.top_ks
            .iter()
            .flat_map(|&k| {
                self.betas
                    .iter()
                    .map(move |&beta| base.with_top_k(k).with_weights(1.0 - beta, beta))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.top_ks.len() * self.betas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of one grid cell.
#[derive(Debug, Clone, Serialize)]
pub struct SweepCell {
    pub settings: RunSettings,
    /// Report path the cell's settings expand to.
    pub output_path: PathBuf,
    pub outcome: MiningOutcome,
}

/// Run every cell in parallel. Cells share only the read-only input, and
/// every cell gets its own output path.
pub fn run_sweep(
    grid: &SweepGrid,
    base: &RunSettings,
    transactions: &[Transaction],
) -> Result<Vec<SweepCell>, MiningError> {
    tracing::info!(cells = grid.len(), "parameter sweep started");
    let mut cells = grid
        .cells(base)
        .into_par_iter()
        .map(|settings| {
            let outcome = Miner::new(settings.clone()).run(transactions)?;
            let output_path = PathBuf::from(render_path(&settings.output_path, &settings));
            tracing::debug!(
                top_k = settings.top_k,
                beta = settings.beta,
                patterns = outcome.patterns.len(),
                "sweep cell finished"
            );
            Ok(SweepCell {
                settings,
                output_path,
                outcome,
            })
        })
        .collect::<Result<Vec<_>, MiningError>>()?;
    separate_output_paths(&mut cells);
    Ok(cells)
}

/// Suffix `_{topK}_{beta}` onto paths the template rendered identically for
/// several cells, then the cell index if that still collides.
fn separate_output_paths(cells: &mut [SweepCell]) {
    let collisions = |cells: &[SweepCell]| {
        let mut counts: FxHashMap<PathBuf, usize> = FxHashMap::default();
        for cell in cells.iter() {
            *counts.entry(cell.output_path.clone()).or_default() += 1;
        }
        cells
            .iter()
            .map(|cell| counts[&cell.output_path] > 1)
            .collect::<Vec<bool>>()
    };

    let shared = collisions(&*cells);
    if !shared.contains(&true) {
        return;
    }
    tracing::warn!("output template does not separate sweep cells; suffixing report paths");
    for (cell, collides) in cells.iter_mut().zip(shared) {
        if collides {
            let suffix = format!("_{}_{}", cell.settings.top_k, cell.settings.beta);
            cell.output_path = with_suffix(&cell.output_path, &suffix);
        }
    }

    let still_shared = collisions(&*cells);
    for (index, (cell, collides)) in cells.iter_mut().zip(still_shared).enumerate() {
        if collides {
            cell.output_path = with_suffix(&cell.output_path, &format!("_{index}"));
        }
    }
}

/// Insert `suffix` between the file stem and the extension.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    path.with_file_name(name)
}

/// Write one report per cell, in grid order.
pub fn write_reports(cells: &[SweepCell]) -> Result<Vec<PathBuf>, MiningError> {
    cells
        .iter()
        .map(|cell| {
            ReportWriter::new(cell.settings.format)
                .write_to(&cell.output_path, &cell.settings, &cell.outcome, None)
                .map_err(MiningError::from)
        })
        .collect()
}
