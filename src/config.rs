use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

/// Handle suffixes in the order they are probed.
pub const DEFAULT_HANDLES: [&str; 10] = [
    "@ybl",
    "@axl",
    "@ptsbi",
    "@upi",
    "@oksbi",
    "@okaxis",
    "@okicici",
    "@ibl",
    "@okhdfcbank",
    "@ptyes",
];

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub lookup: LookupConfig,
    pub batch: BatchConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LookupConfig {
    /// Endpoint with a `{}` placeholder for the candidate address.
    pub url_template: String,
    pub timeout_secs: u64,
    pub handles: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BatchConfig {
    /// Minimum delay between two numbers.
    pub delay_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookup: LookupConfig {
                url_template: "https://api.example.com/upi?upi_id={}".to_string(),
                timeout_secs: 10,
                handles: DEFAULT_HANDLES.iter().map(|h| h.to_string()).collect(),
            },
            batch: BatchConfig { delay_ms: 1000 },
            export: ExportConfig {
                output_dir: PathBuf::from("output"),
            },
        }
    }
}

impl Config {
    /// Defaults, then the TOML file at `path` (if present), then `UPI_*` env vars.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let defaults = Config::default();
        let handles: Vec<String> = defaults.lookup.handles.clone();

        let config = config::Config::builder()
            .set_default("lookup.url_template", defaults.lookup.url_template)?
            .set_default("lookup.timeout_secs", defaults.lookup.timeout_secs)?
            .set_default("lookup.handles", handles)?
            .set_default("batch.delay_ms", defaults.batch.delay_ms)?
            .set_default(
                "export.output_dir",
                defaults.export.output_dir.to_string_lossy().to_string(),
            )?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("UPI")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.lookup.url_template.contains("{}") {
            anyhow::bail!("lookup.url_template must contain a {{}} placeholder");
        }
        if self.lookup.timeout_secs == 0 {
            anyhow::bail!("lookup.timeout_secs must be greater than zero");
        }
        if self.lookup.handles.is_empty() {
            anyhow::bail!("lookup.handles must not be empty");
        }

        let mut seen = HashSet::new();
        for handle in &self.lookup.handles {
            if !handle.starts_with('@') || handle.len() < 2 {
                anyhow::bail!("Invalid handle suffix: {:?}", handle);
            }
            if !seen.insert(handle.as_str()) {
                anyhow::bail!("Duplicate handle suffix: {}", handle);
            }
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.lookup.timeout_secs)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
