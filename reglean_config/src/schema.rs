use anyhow::Context;
use reglean_core::{Gleaner, GleanerConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub gleaner: GleanerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct OutputConfig {
    /// Pretty-print JSON results.
    #[serde(default)]
    pub pretty: bool,
    /// Include the gleaned input next to its fields.
    #[serde(default)]
    pub include_input: bool,
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("reglean"))
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load `~/reglean/config.json`.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::default_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'reglean init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    /// Load an explicit config file, or the default one when `path` is `None`.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        path.map_or_else(Self::load, Self::load_from)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        debug!(
            "Loaded {} categories from {}",
            config.gleaner.categories.len(),
            path.display()
        );
        Ok(config)
    }

    /// Build a gleaner and compile every pattern it carries.
    pub fn build_gleaner(&self) -> anyhow::Result<Gleaner> {
        let gleaner =
            Gleaner::from_config(&self.gleaner).context("Invalid translation in config")?;
        gleaner.validate().context("Invalid pattern in config")?;
        Ok(gleaner)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    /// Template written by `reglean init`.
    #[must_use]
    pub fn template() -> Self {
        Self {
            gleaner: GleanerConfig::example(),
            output: OutputConfig::default(),
        }
    }

    /// Write the template to `path`, refusing to overwrite.
    pub fn create_config_at(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&Self::template())?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        info!("Created config file at: {}", path.display());
        Ok(())
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        Self::create_config_at(&config_path)?;

        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Next steps:");
        println!("   1. Replace the example categories with your own patterns");
        println!("   2. Run 'reglean check' to compile every pattern");
        println!("   3. Run 'reglean glean <NAME>...' or pipe names on stdin");
        println!();
        println!("Configuration options:");
        println!("   - gleaner.categories: name -> pattern, or {{pattern, cast}}");
        println!("   - gleaner.translations: literal or regex rules per category");
        println!("   - gleaner.fill: value for categories that find nothing");
        println!("   - output.pretty: pretty-print JSON results");
        println!();
        Ok(())
    }
}
