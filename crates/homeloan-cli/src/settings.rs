use std::env;
use std::path::Path;

use homeloan_core::MortgageConfig;

use crate::input;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "HOMELOAN_CONFIG";

/// Load the calculation settings: `--config`, then `$HOMELOAN_CONFIG`,
/// then built-in defaults. YAML is used for `.yaml`/`.yml`, JSON otherwise.
pub fn load(path: Option<&str>) -> Result<MortgageConfig, Box<dyn std::error::Error>> {
    let from_env = env::var(CONFIG_ENV).ok().filter(|p| !p.trim().is_empty());
    let Some(path) = path.map(str::to_string).or(from_env) else {
        tracing::debug!("using built-in mortgage configuration");
        return Ok(MortgageConfig::default());
    };

    let text = input::file::read_text(&path)?;
    let config = if is_yaml(&path) {
        MortgageConfig::from_yaml(&text)
    } else {
        MortgageConfig::from_json(&text)
    }
    .map_err(|e| format!("Config '{path}': {e}"))?;

    tracing::debug!(%path, terms = ?config.loan_terms, "loaded mortgage configuration");
    Ok(config)
}

fn is_yaml(path: &str) -> bool {
    matches!(
        Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref(),
        Some("yaml" | "yml")
    )
}
