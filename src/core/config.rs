//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.sifr/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! Display preferences are NOT config: they live in the persisted state
//! store, mirrored from the presentation layer.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::search::SearchMode;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SifrConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub corpus_path: Option<String>,
    pub default_mode: Option<SearchMode>,
    pub state_dir: Option<String>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// None means no corpus was configured anywhere; the CLI reports this.
    pub corpus_path: Option<PathBuf>,
    pub default_mode: SearchMode,
    pub state_dir: PathBuf,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.sifr/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".sifr").join("config.toml"))
}

/// Load config from `~/.sifr/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SifrConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SifrConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SifrConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(SifrConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: SifrConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Sifr Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# corpus_path = "corpus.json"   # Or set SIFR_CORPUS env var / pass --corpus
# default_mode = "partial"      # "partial" or "exact"
# state_dir = "~/.sifr/state"   # Where history/scroll/preferences are kept
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_corpus` and `cli_mode` come from CLI flags (None = not specified).
pub fn resolve(
    config: &SifrConfig,
    cli_corpus: Option<PathBuf>,
    cli_mode: Option<SearchMode>,
) -> ResolvedConfig {
    // Corpus: CLI → env → config
    let corpus_path = cli_corpus
        .or_else(|| std::env::var("SIFR_CORPUS").ok().map(PathBuf::from))
        .or_else(|| config.general.corpus_path.clone().map(PathBuf::from));

    // Search mode: CLI → config → default
    let default_mode = cli_mode.or(config.general.default_mode).unwrap_or_default();

    // State dir: env → config → ~/.sifr/state → ./.sifr/state
    let state_dir = std::env::var("SIFR_STATE_DIR")
        .ok()
        .map(PathBuf::from)
        .or_else(|| config.general.state_dir.clone().map(PathBuf::from))
        .unwrap_or_else(default_state_dir);

    ResolvedConfig {
        corpus_path,
        default_mode,
        state_dir,
    }
}

fn default_state_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".sifr").join("state"),
        None => {
            warn!("Could not determine home directory, keeping state in ./.sifr/state");
            PathBuf::from(".sifr").join("state")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = SifrConfig::default();
        assert!(config.general.corpus_path.is_none());
        assert!(config.general.default_mode.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&SifrConfig::default(), None, None);
        assert_eq!(resolved.default_mode, SearchMode::Partial);
        assert!(resolved.state_dir.ends_with("state"));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = SifrConfig {
            general: GeneralConfig {
                corpus_path: Some("bible.json".to_string()),
                default_mode: Some(SearchMode::Exact),
                state_dir: Some("/tmp/sifr-state".to_string()),
            },
        };
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.corpus_path.as_deref(), Some(std::path::Path::new("bible.json")));
        assert_eq!(resolved.default_mode, SearchMode::Exact);
        assert_eq!(resolved.state_dir, PathBuf::from("/tmp/sifr-state"));
    }

    #[test]
    fn test_resolve_cli_flags_win() {
        let config = SifrConfig {
            general: GeneralConfig {
                corpus_path: Some("from-config.json".to_string()),
                default_mode: Some(SearchMode::Partial),
                state_dir: None,
            },
        };
        let resolved = resolve(
            &config,
            Some(PathBuf::from("from-cli.json")),
            Some(SearchMode::Exact),
        );
        assert_eq!(
            resolved.corpus_path.as_deref(),
            Some(std::path::Path::new("from-cli.json"))
        );
        assert_eq!(resolved.default_mode, SearchMode::Exact);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[general]
default_mode = "exact"
"#;
        let config: SifrConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_mode, Some(SearchMode::Exact));
        assert!(config.general.corpus_path.is_none());
    }

    #[test]
    fn test_full_toml_round_trip() {
        let toml_str = r#"
[general]
corpus_path = "corpus.json"
default_mode = "partial"
state_dir = "/var/lib/sifr"
"#;
        let config: SifrConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.corpus_path.as_deref(), Some("corpus.json"));
        assert_eq!(config.general.default_mode, Some(SearchMode::Partial));
        assert_eq!(config.general.state_dir.as_deref(), Some("/var/lib/sifr"));
    }
}
