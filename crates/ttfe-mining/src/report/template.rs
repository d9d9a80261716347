//! Output path placeholders.

use ttfe_core::config::RunSettings;
use ttfe_core::constants::ALGORITHM_NAME;

/// Substitute `{algoName}`, `{database}`, `{topK}`, `{alpha}`, `{beta}`,
/// `{delta}`, `{switches0}`..`{switches5}` and `{debugLevel}`. Unknown
/// placeholders are left as written.
pub fn render_path(template: &str, settings: &RunSettings) -> String {
    let delta = settings
        .delta
        .map_or_else(|| "none".to_string(), |d| d.to_string());
    let mut path = template
        .replace("{algoName}", ALGORITHM_NAME)
        .replace("{database}", &settings.database)
        .replace("{topK}", &settings.top_k.to_string())
        .replace("{alpha}", &settings.alpha.to_string())
        .replace("{beta}", &settings.beta.to_string())
        .replace("{delta}", &delta)
        .replace("{debugLevel}", &settings.debug_level.to_string());
    for (i, on) in settings.strategies.switches().iter().enumerate() {
        path = path.replace(&format!("{{switches{i}}}"), &on.to_string());
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template() {
        let settings = RunSettings {
            database: "retail".to_string(),
            top_k: 10,
            alpha: 0.2,
            beta: 0.8,
            ..RunSettings::default()
        };
        assert_eq!(
            render_path(&settings.output_path, &settings),
            "./output_retail_10_0.2_0.8.txt"
        );
    }

    #[test]
    fn test_all_placeholders() {
        let settings = RunSettings::default();
        let rendered = render_path(
            "{algoName}-{delta}-{switches0}{switches1}-{debugLevel}-{unknown}",
            &settings,
        );
        assert_eq!(rendered, "TTFE-none-falsetrue-2-{unknown}");
    }
}
