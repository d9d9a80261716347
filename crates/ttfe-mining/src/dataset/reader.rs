//! Line-oriented transaction file reader.
//!
//! ```text
//! # comment            (also %, @ and //)
//! topk=10              directive
//! 1 2 3:2 1 4:1 3 1    items : threats : frequencies
//! 1 4:3 1:1 2:3.5      optional fourth field: declared total
//! ```

use std::path::{Path, PathBuf};

use ttfe_core::config::ConfigOverrides;
use ttfe_core::errors::{DatasetError, Diagnostic, DiagnosticKind};
use ttfe_core::ItemId;

use super::directives::{apply_directive, DirectiveError};
use crate::corpus::{Occurrence, Transaction};

const COMMENT_PREFIXES: [&str; 4] = ["#", "%", "@", "//"];

/// A parsed input file.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub transactions: Vec<Transaction>,
    /// `key=value` lines, as config overrides.
    pub directives: ConfigOverrides,
    pub diagnostics: Vec<Diagnostic>,
    pub source: Option<PathBuf>,
}

impl Dataset {
    /// File stem of the source, used as the default database name.
    pub fn name(&self) -> Option<String> {
        self.source
            .as_ref()
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Reads datasets. Malformed content never fails a read; it becomes a
/// diagnostic and the offending part is skipped.
pub struct DatasetReader;

impl DatasetReader {
    /// Read and parse a file. Fails only if the file cannot be read.
    pub fn read_path(path: &Path) -> Result<Dataset, DatasetError> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DatasetError::NotFound {
                path: path.display().to_string(),
            },
            _ => DatasetError::Unreadable {
                path: path.display().to_string(),
                message: e.to_string(),
            },
        })?;
        let mut dataset = Self::parse_str(&text);
        dataset.source = Some(path.to_path_buf());
        tracing::info!(
            path = %path.display(),
            transactions = dataset.transactions.len(),
            diagnostics = dataset.diagnostics.len(),
            "dataset read"
        );
        Ok(dataset)
    }

    /// Parse dataset text.
    pub fn parse_str(text: &str) -> Dataset {
        let mut dataset = Dataset::default();
        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = normalize(raw);
            if line.is_empty() || COMMENT_PREFIXES.iter().any(|p| line.starts_with(p)) {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let rejected = match apply_directive(key, value, &mut dataset.directives) {
                    Ok(()) => None,
                    Err(DirectiveError::Unknown(key)) => Some(Diagnostic::at_line(
                        DiagnosticKind::UnknownDirective,
                        line_no,
                        format!("unknown directive '{key}' ignored"),
                    )),
                    Err(DirectiveError::Malformed(message)) => Some(Diagnostic::at_line(
                        DiagnosticKind::MalformedDirective,
                        line_no,
                        message,
                    )),
                };
                if let Some(diagnostic) = rejected {
                    push_diagnostic(&mut dataset, diagnostic);
                }
                continue;
            }
            if let Some(tx) = parse_data_line(&line, line_no, &mut dataset) {
                dataset.transactions.push(tx);
            }
        }
        dataset
    }
}

/// Trim, turn tabs into spaces, collapse space runs and drop spaces around
/// `:` and `=`.
fn normalize(raw: &str) -> String {
    let collapsed = raw
        .trim()
        .replace('\t', " ")
        .split(' ')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    collapsed
        .replace(" :", ":")
        .replace(": ", ":")
        .replace(" =", "=")
        .replace("= ", "=")
}

fn parse_data_line(line: &str, line_no: usize, dataset: &mut Dataset) -> Option<Transaction> {
    let fields: Vec<&str> = line.split(':').collect();
    if fields.len() < 3 {
        push_diagnostic(
            dataset,
            Diagnostic::at_line(
                DiagnosticKind::MalformedLine,
                line_no,
                format!("expected items:threats:frequencies, found {} field(s)", fields.len()),
            ),
        );
        return None;
    }

    let tokens = |field: &str| -> Vec<String> {
        field.split(' ').filter(|s| !s.is_empty()).map(str::to_string).collect()
    };
    let items = tokens(fields[0]);
    let threats = tokens(fields[1]);
    let frequencies = tokens(fields[2]);
    let count = items.len().max(threats.len()).max(frequencies.len());

    let mut tx = Transaction {
        line: Some(line_no),
        ..Transaction::default()
    };
    for i in 0..count {
        let parsed = parse_occurrence(items.get(i), threats.get(i), frequencies.get(i));
        match parsed {
            Ok(occurrence) => {
                if !tx.push(occurrence) {
                    push_diagnostic(
                        dataset,
                        Diagnostic::at_line(
                            DiagnosticKind::DuplicateItem,
                            line_no,
                            format!("item {} repeated; keeping the first occurrence", occurrence.item),
                        ),
                    );
                }
            }
            Err(reason) => push_diagnostic(
                dataset,
                Diagnostic::at_line(
                    DiagnosticKind::MalformedOccurrence,
                    line_no,
                    format!("occurrence {} dropped: {reason}", i + 1),
                ),
            ),
        }
    }

    if let Some(total) = fields.get(3).map(|f| f.trim()).filter(|f| !f.is_empty()) {
        match total.parse::<f64>() {
            Ok(v) if v.is_finite() => tx.declared_total = Some(v),
            _ => push_diagnostic(
                dataset,
                Diagnostic::at_line(
                    DiagnosticKind::MalformedLine,
                    line_no,
                    format!("declared total '{total}' is not a number; ignored"),
                ),
            ),
        }
    }

    // A transaction with nothing usable left is dropped without comment.
    if tx.is_empty() {
        None
    } else {
        Some(tx)
    }
}

fn parse_occurrence(
    item: Option<&String>,
    threat: Option<&String>,
    frequency: Option<&String>,
) -> Result<Occurrence, String> {
    let item = item
        .ok_or("missing item id")?
        .parse::<u32>()
        .map_err(|_| "item id is not a non-negative integer".to_string())?;
    let threat = parse_measure(threat, "threat")?;
    let frequency = parse_measure(frequency, "frequency")?;
    Ok(Occurrence::new(ItemId(item), threat, frequency))
}

fn parse_measure(token: Option<&String>, name: &str) -> Result<f64, String> {
    let token = token.ok_or_else(|| format!("missing {name}"))?;
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Ok(_) => Err(format!("{name} '{token}' must be a finite non-negative number")),
        Err(_) => Err(format!("{name} '{token}' is not a number")),
    }
}

fn push_diagnostic(dataset: &mut Dataset, diagnostic: Diagnostic) {
    tracing::warn!(%diagnostic, "input problem recovered");
    dataset.diagnostics.push(diagnostic);
}
