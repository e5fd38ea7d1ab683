//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use boutique_cache::FileStore;
use boutique_commerce::cart::CartStore;
use boutique_commerce::catalog::Catalog;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["boutique.toml", ".boutique.toml", "boutique.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some(config),
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

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Directory holding the persisted cart.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.cart.storage_dir)
    }

    /// Open the cart store and restore the persisted cart.
    pub fn open_cart(&self) -> Result<CartStore<FileStore>> {
        let dir = self.storage_dir();
        let backend = FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;
        self.output
            .debug(&format!("Cart storage: {}", backend.dir().display()));
        Ok(CartStore::open(backend, self.config.cart_options()))
    }

    /// Read and parse the catalog document.
    pub async fn load_catalog(&self, path_override: Option<&str>) -> Result<Catalog> {
        let path = self.resolve_path(path_override.unwrap_or(&self.config.catalog.path));
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        Catalog::from_json(&content)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))
    }
}
