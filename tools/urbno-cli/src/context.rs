//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use urbno_store::{FileBackend, Store};

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Config file in use, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(resolve(&cwd, path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config: config.with_env_overrides(),
            output,
            cwd,
            config_path,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config, config_path)),
                        Err(e) => tracing::warn!(path = %config_path.display(), error = %e, "skipping unreadable config"),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory of the file store.
    pub fn store_dir(&self) -> PathBuf {
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(&self.cwd);
        if self.config.store.dir.is_absolute() {
            self.config.store.dir.clone()
        } else {
            base.join(&self.config.store.dir)
        }
    }

    /// Open the file store, creating its directory.
    pub fn store(&self) -> Result<Store<FileBackend>> {
        let dir = self.store_dir();
        Store::open_dir(&dir).with_context(|| format!("Failed to open store at {}", dir.display()))
    }
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("urbno.toml"), "[store]\ndir = \"state\"\n").unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = Context::find_config(&nested).unwrap();
        assert_eq!(config.store.dir, PathBuf::from("state"));
        assert_eq!(path, root.path().join("urbno.toml"));
    }

    #[test]
    fn test_store_dir_relative_to_config() {
        let root = tempfile::tempdir().unwrap();
        let ctx = Context {
            config: CliConfig::default(),
            output: Output::new(false, true),
            cwd: root.path().join("elsewhere"),
            config_path: Some(root.path().join("urbno.toml")),
        };
        assert_eq!(ctx.store_dir(), root.path().join(".urbno"));

        let ctx = Context {
            config_path: None,
            ..ctx
        };
        assert_eq!(ctx.store_dir(), root.path().join("elsewhere").join(".urbno"));
    }
}
