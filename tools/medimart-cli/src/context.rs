//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use medimart_cache::FileStore;
use medimart_commerce::cart::CartStore;
use medimart_commerce::catalog::Medicine;
use medimart_commerce::checkout::Checkout;

use crate::config::CliConfig;
use crate::output::Output;

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
        let config_names = ["medimart.toml", ".medimart.toml", "medimart.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => {
                            tracing::debug!(path = %config_path.display(), "loaded config");
                            return Some(config);
                        }
                        Err(e) => {
                            tracing::warn!(path = %config_path.display(), error = %e, "skipping unreadable config");
                        }
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
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Open the file-backed store holding the cart and order slots.
    pub fn store(&self) -> Result<FileStore> {
        let dir = self.resolve_path(&self.config.storage.data_dir);
        FileStore::open(&dir)
            .with_context(|| format!("Failed to open data directory: {}", dir.display()))
    }

    /// The persisted cart.
    pub fn carts(&self) -> Result<CartStore<FileStore>> {
        Ok(CartStore::with_key(
            self.store()?,
            self.config.storage.cart_key.clone(),
        ))
    }

    /// Checkout over the persisted cart.
    pub fn checkout(&self) -> Result<Checkout<FileStore>> {
        let store = self.store()?;
        Ok(Checkout::with_cart(
            CartStore::with_key(store.clone(), self.config.storage.cart_key.clone()),
            store,
            self.config.pricing.clone(),
        )
        .with_order_key(self.config.storage.order_key.clone()))
    }

    /// Read a catalog JSON file (an array of medicines).
    pub fn load_catalog(&self, path: Option<&Path>) -> Result<Vec<Medicine>> {
        let path = self.resolve_path(path.unwrap_or(self.config.listing.catalog.as_path()));
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        let medicines: Vec<Medicine> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;

        for medicine in &medicines {
            if let Err(e) = medicine.validate() {
                tracing::warn!(id = %medicine.id, error = %e, "catalog item fails validation");
            }
        }
        Ok(medicines)
    }

    /// Find one medicine in the catalog.
    pub fn find_medicine(&self, catalog: Option<&Path>, id: &str) -> Result<Medicine> {
        self.load_catalog(catalog)?
            .into_iter()
            .find(|m| m.id.as_str() == id)
            .with_context(|| format!("No medicine with id {} in the catalog", id))
    }
}
