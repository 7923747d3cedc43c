use crate::domain::models::Config;
use anyhow::Context;
use std::path::{Path, PathBuf};

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/unquarantine/config.toml"))
}

/// Loads `explicit`, or the default config file when present. A missing
/// default file yields the built-in defaults; a missing explicit one is an error.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let Ok(p) = default_config_path() else {
                return Ok(Config::default());
            };
            if !p.exists() {
                return Ok(Config::default());
            }
            p
        }
    };
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::load_config;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn partial_config_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[tools]\nelevate = \"\"\n\n[homebrew]\nprefix = \"/usr/local\"\n\n[output]\ncolor = false\n",
        )
        .unwrap();
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.tools.elevate, "");
        assert_eq!(cfg.tools.xattr, "xattr");
        assert_eq!(cfg.homebrew.prefix, PathBuf::from("/usr/local"));
        assert_eq!(cfg.homebrew.brew, PathBuf::from("/opt/homebrew/bin/brew"));
        assert!(!cfg.output.color);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.logging.audit);
        assert_eq!(cfg.locations.app_dirs, vec!["/Applications", "~/Applications"]);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(load_config(Some(&tmp.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn malformed_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[tools\nxattr = 1").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("parsing config"));
    }
}
