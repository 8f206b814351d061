//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_commerce::Storefront;
use storefront_kv::{FileStore, KvStore};

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Config file in use, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory the store files live in.
    ///
    /// Relative paths are taken from the config file's directory, or the
    /// working directory when there is no config file.
    pub fn data_dir(&self) -> PathBuf {
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(&self.cwd);
        resolve(base, &self.config.store.data_dir)
    }

    /// Open the storefront over the data directory.
    pub fn open_storefront(&self) -> Result<Storefront<FileStore>> {
        let dir = self.data_dir();
        let store = FileStore::open(dir.clone())
            .with_context(|| format!("Failed to open data directory: {}", dir.display()))?;
        let config = self.config.storefront_config()?;

        self.output.debug(&format!("Using data directory {}", dir.display()));
        let mut storefront = Storefront::open(store, config);
        self.warn_if_unsaved(&storefront);

        let output = self.output.clone();
        storefront.subscribe(move |change| output.debug(&format!("Saved {}", change)));
        Ok(storefront)
    }

    /// Warn when the last change could not be written to disk.
    ///
    /// Returns `true` if a warning was shown.
    pub fn warn_if_unsaved<S: KvStore>(&self, storefront: &Storefront<S>) -> bool {
        match storefront.save_error() {
            Some(e) => {
                self.output.warn(&format!("Changes were applied but could not be saved: {}", e));
                true
            }
            None => false,
        }
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

/// Resolve a path relative to `base`.
fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::catalog::ProductDraft;
    use storefront_commerce::StorefrontConfig;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".storefront.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(dir.path().join(".storefront.toml")));
    }

    #[test]
    fn test_find_config_prefers_first_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("storefront.json"), "{}").unwrap();
        std::fs::write(dir.path().join("storefront.toml"), "").unwrap();

        assert_eq!(find_config(dir.path()), Some(dir.path().join("storefront.toml")));
    }

    #[test]
    fn test_data_dir_is_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context {
            config: CliConfig::default(),
            config_path: Some(dir.path().join("storefront.toml")),
            output: Output::new(false, true),
            cwd: PathBuf::from("/somewhere/else"),
        };
        assert_eq!(ctx.data_dir(), dir.path().join(".storefront"));
    }

    #[test]
    fn test_open_storefront_seeds_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context {
            config: CliConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.path().to_path_buf(),
        };

        let storefront = ctx.open_storefront().unwrap();
        assert!(!storefront.catalog().is_empty());
        assert!(dir.path().join(".storefront").join("products.json").is_file());
    }

    #[test]
    fn test_warn_if_unsaved_after_failed_write() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        let ctx = Context {
            config: CliConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.path().to_path_buf(),
        };
        let config = StorefrontConfig {
            seed_catalog: false,
            ..Default::default()
        };
        let mut storefront = Storefront::open(FileStore::open(&data).unwrap(), config);
        assert!(!ctx.warn_if_unsaved(&storefront));

        std::fs::remove_dir_all(&data).unwrap();
        storefront.add_product(ProductDraft::new("Lamp", "LED", 10.0));
        assert_eq!(storefront.catalog().len(), 1);
        assert!(ctx.warn_if_unsaved(&storefront));
    }
}
