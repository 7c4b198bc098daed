use anyhow::{bail, Context, Result};
use packs_core::{AllocatorConfig, Catalog, Strategy, DEFAULT_TABLE_LIMIT, MAX_TABLE_LIMIT};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up from the working directory upward
pub const CONFIG_FILE: &str = "packs.toml";

/// The packs configuration file structure (packs.toml)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PacksConfig {
    /// Initial pack catalog
    pub catalog: CatalogConfig,

    /// Allocation strategy settings
    pub allocator: AllocatorSection,
}

/// Pack catalog configuration
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Pack sizes (e.g., sizes = [250, 500, 1000])
    pub sizes: Option<Vec<i64>>,
}

/// Allocator configuration
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AllocatorSection {
    /// Strategy name: reachability, greedy-merge or greedy-divide
    pub strategy: Option<String>,

    /// Largest total covered by the reachability table
    pub table_limit: Option<u64>,
}

impl PacksConfig {
    /// Load configuration from packs.toml, searching upward from the given directory
    pub fn load(start_dir: &Path) -> Result<Option<Self>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE);

            if config_path.exists() {
                return Self::from_file(&config_path).map(Some);
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Load configuration by searching upward from the current working directory
    pub fn load_from_cwd() -> Result<Option<Self>> {
        let cwd = std::env::current_dir()?;
        Self::load(&cwd)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: PacksConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(sizes) = lookup("PACKS_SIZES") {
            self.catalog.sizes = Some(
                parse_sizes(&sizes).with_context(|| format!("Invalid PACKS_SIZES \"{}\"", sizes))?,
            );
        }
        if let Some(strategy) = lookup("PACKS_STRATEGY") {
            self.allocator.strategy = Some(strategy);
        }
        if let Some(limit) = lookup("PACKS_TABLE_LIMIT") {
            let limit = limit
                .trim()
                .parse()
                .with_context(|| format!("Invalid PACKS_TABLE_LIMIT \"{}\"", limit))?;
            self.allocator.table_limit = Some(limit);
        }
        Ok(())
    }

    /// Resolve the initial catalog and allocator settings.
    ///
    /// A strategy given on the command line takes precedence over the loaded
    /// configuration, which falls back to the built-in defaults.
    pub fn resolve(&self, strategy: Option<Strategy>) -> Result<(Catalog, AllocatorConfig)> {
        let catalog = match &self.catalog.sizes {
            Some(sizes) => Catalog::new(sizes.iter().copied())?,
            None => Catalog::default(),
        };

        let strategy = match (strategy, &self.allocator.strategy) {
            (Some(strategy), _) => strategy,
            (None, Some(name)) => name.parse()?,
            (None, None) => Strategy::default(),
        };

        let table_limit = self.allocator.table_limit.unwrap_or(DEFAULT_TABLE_LIMIT);
        if table_limit > MAX_TABLE_LIMIT {
            bail!(
                "table_limit {} exceeds the maximum of {}",
                table_limit,
                MAX_TABLE_LIMIT
            );
        }

        let config = AllocatorConfig::default()
            .strategy(strategy)
            .table_limit(table_limit);

        Ok((catalog, config))
    }
}

/// Parse a comma-separated list of pack sizes
pub fn parse_sizes(input: &str) -> Result<Vec<i64>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("\"{}\" is not a pack size", s))
        })
        .collect()
}

/// Resolve a `--config` path, or search for packs.toml from the working
/// directory, then apply environment overrides read through `lookup`
pub fn load<F>(explicit: Option<&PathBuf>, lookup: F) -> Result<PacksConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match explicit {
        Some(path) => PacksConfig::from_file(path)?,
        None => PacksConfig::load_from_cwd()?.unwrap_or_default(),
    };
    config.apply_env_from(lookup)?;
    Ok(config)
}
