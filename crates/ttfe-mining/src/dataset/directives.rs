//! `key=value` lines embedded in a dataset.

use ttfe_core::config::ttfe_config::parse_delta;
use ttfe_core::config::{ConfigOverrides, ReportFormat};
use ttfe_core::constants::SWITCH_COUNT;

/// Why a directive line was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    Unknown(String),
    Malformed(String),
}

/// Apply one directive to `overrides`. Keys are case-insensitive and may
/// contain spaces (`Top K = 3`).
pub fn apply_directive(
    key: &str,
    value: &str,
    overrides: &mut ConfigOverrides,
) -> Result<(), DirectiveError> {
    let key: String = key
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    let value = value.trim();
    let malformed = |what: &str| DirectiveError::Malformed(format!("{key}: {what} '{value}'"));

    match key.as_str() {
        "topk" => {
            overrides.top_k = Some(value.parse().map_err(|_| malformed("not an integer"))?);
        }
        "alpha" => {
            overrides.alpha = Some(parse_number(value).ok_or_else(|| malformed("not a number"))?);
        }
        "beta" => {
            overrides.beta = Some(parse_number(value).ok_or_else(|| malformed("not a number"))?);
        }
        "delta" => {
            overrides.delta = Some(parse_delta(value).ok_or_else(|| malformed("not a threshold"))?);
        }
        "debuglevel" => {
            overrides.debug_level = Some(value.parse().map_err(|_| malformed("not an integer"))?);
        }
        "database" => {
            if value.is_empty() {
                return Err(malformed("empty name"));
            }
            overrides.database = Some(value.to_string());
        }
        "output" => overrides.output_path = Some(value.to_string()),
        "format" => {
            let format = ReportFormat::parse(value).ok_or_else(|| malformed("unknown format"))?;
            overrides.format = Some(format);
        }
        _ => {
            let flag = parse_flag(value).ok_or_else(|| malformed("not a boolean"));
            if let Some(index) = key.strip_prefix("switches") {
                let index: usize = index
                    .parse()
                    .ok()
                    .filter(|i| *i < SWITCH_COUNT)
                    .ok_or_else(|| DirectiveError::Unknown(key.clone()))?;
                overrides.strategies.set_positional(index, flag?);
                return Ok(());
            }
            let strategies = &mut overrides.strategies;
            let slot = match key.as_str() {
                "seed" => &mut strategies.seed,
                "realizedvalue" => &mut strategies.realized_value,
                "pairwiseexact" => &mut strategies.pairwise_exact,
                "pairwiselowerbound" => &mut strategies.pairwise_lower_bound,
                "prunesearch" => &mut strategies.prune_search,
                "queuefeedback" => &mut strategies.queue_feedback,
                "cooccurrencepruning" => &mut strategies.cooccurrence_pruning,
                _ => return Err(DirectiveError::Unknown(key.clone())),
            };
            *slot = Some(flag?);
        }
    }
    Ok(())
}

fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(key: &str, value: &str) -> (ConfigOverrides, Result<(), DirectiveError>) {
        let mut overrides = ConfigOverrides::default();
        let result = apply_directive(key, value, &mut overrides);
        (overrides, result)
    }

    #[test]
    fn test_numeric_directives() {
        assert_eq!(apply("Top K", "3").0.top_k, Some(3));
        assert_eq!(apply("ALPHA", "0.25").0.alpha, Some(0.25));
        assert_eq!(apply("debugLevel", "0").0.debug_level, Some(0));
    }

    #[test]
    fn test_delta_tokens() {
        assert_eq!(apply("delta", "4.5").0.delta, Some(Some(4.5)));
        assert_eq!(apply("delta", "None").0.delta, Some(None));
        assert_eq!(apply("delta", "-float('inf')").0.delta, Some(None));
        assert!(matches!(apply("delta", "abc").1, Err(DirectiveError::Malformed(_))));
    }

    #[test]
    fn test_switches() {
        let (o, r) = apply("switches3", "true");
        assert!(r.is_ok());
        assert_eq!(o.strategies.pairwise_lower_bound, Some(true));
        assert_eq!(apply("CooccurrencePruning", "on").0.strategies.cooccurrence_pruning, Some(true));
        assert!(matches!(apply("switches6", "true").1, Err(DirectiveError::Unknown(_))));
        assert!(matches!(apply("switches0", "maybe").1, Err(DirectiveError::Malformed(_))));
    }

    #[test]
    fn test_unknown_key() {
        let (o, r) = apply("colour", "blue");
        assert_eq!(r, Err(DirectiveError::Unknown("colour".to_string())));
        assert!(o.is_empty());
    }
}
