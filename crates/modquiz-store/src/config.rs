//! modquiz configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level modquiz configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModquizConfig {
    /// JSON file holding courses and attempts.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// Directory used by `export-course` when no output is given.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./modquiz-data/store.json")
}
fn default_export_dir() -> PathBuf {
    PathBuf::from("./modquiz-export")
}

impl Default for ModquizConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            export_dir: default_export_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `modquiz.toml` in the current directory
/// 2. `~/.config/modquiz/config.toml`
///
/// Environment variable override: `MODQUIZ_STORE`.
pub fn load_config() -> Result<ModquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ModquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("modquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<ModquizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => ModquizConfig::default(),
    };

    if let Ok(store) = std::env::var("MODQUIZ_STORE") {
        if !store.is_empty() {
            config.store_path = PathBuf::from(store);
        }
    }

    config.store_path = resolve_path(&config.store_path);
    config.export_dir = resolve_path(&config.export_dir);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("modquiz"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_MODQUIZ_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_MODQUIZ_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_MODQUIZ_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_MODQUIZ_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = ModquizConfig::default();
        assert_eq!(config.store_path, PathBuf::from("./modquiz-data/store.json"));
        assert_eq!(config.export_dir, PathBuf::from("./modquiz-export"));
    }

    #[test]
    fn parse_partial_config() {
        let config: ModquizConfig = toml::from_str(r#"store_path = "/var/lib/modquiz.json""#).unwrap();
        assert_eq!(config.store_path, PathBuf::from("/var/lib/modquiz.json"));
        assert_eq!(config.export_dir, PathBuf::from("./modquiz-export"));
    }

    #[test]
    fn explicit_path_is_loaded_and_resolved() {
        std::env::set_var("_MODQUIZ_TEST_ROOT", "/srv/quiz");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "store_path = \"${_MODQUIZ_TEST_ROOT}/store.json\"\nexport_dir = \"out\"\n",
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        if std::env::var("MODQUIZ_STORE").is_err() {
            assert_eq!(config.store_path, PathBuf::from("/srv/quiz/store.json"));
        }
        assert_eq!(config.export_dir, PathBuf::from("out"));
        std::env::remove_var("_MODQUIZ_TEST_ROOT");
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/modquiz.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
