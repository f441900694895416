//! Configuration lookup and logging setup.

use scanidx::AnalysisConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Get the default configuration file path.
///
/// Uses platform-specific configuration directories:
/// - Linux: `~/.config/scanidx/config.json`
/// - macOS: `~/Library/Application Support/scanidx/config.json`
/// - Windows: `%APPDATA%\scanidx\config.json`
pub(crate) fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scanidx").join("config.json"))
}

/// Load the configuration from `explicit`, else from the default path if a
/// file exists there, else use defaults.
pub(crate) fn load_config(explicit: Option<&Path>) -> scanidx::Result<AnalysisConfig> {
    if let Some(path) = explicit {
        return AnalysisConfig::from_json_file(path);
    }
    match default_config_path() {
        Some(path) if path.is_file() => AnalysisConfig::from_json_file(&path),
        _ => {
            tracing::debug!("No configuration file, using defaults");
            Ok(AnalysisConfig::default())
        }
    }
}

/// Install the stderr subscriber: `debug` with `verbose`, else `RUST_LOG`,
/// else `info`.
pub(crate) fn init_tracing(verbose: bool) {
    let directives = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into())
    };
    tracing_subscriber::registry()
        .with(EnvFilter::new(directives))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config() {
        let path = std::env::temp_dir().join("scanidx_settings_config.json");
        std::fs::write(&path, r#"{"base_year": 2021}"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.base_year, 2021);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_explicit_config() {
        let path = std::env::temp_dir().join("scanidx_settings_absent.json");
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_default_path_layout() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("scanidx/config.json"));
        }
    }
}
