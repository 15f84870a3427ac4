use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::EvictionPolicy;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub collector: CollectorConfig,
    pub storage: StorageConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: "DEMO_KEY".to_string(),
            base_url: "https://api.open.fec.gov/v1".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CollectorConfig {
    /// Jurisdiction (state code) passed to the candidate listing
    pub state: String,
    pub candidate_status: String,
    pub election_years: Vec<u16>,
    pub per_page: u32,
    /// Smallest single contribution that qualifies a candidate
    pub min_amount: u64,
    pub contributor_type: String,
    pub transaction_period: u16,
    pub rate_limit_delay_ms: u64,
    pub max_retries: u32,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            state: "PA".to_string(),
            candidate_status: "C".to_string(),
            election_years: vec![2022, 2024],
            per_page: 100,
            min_amount: 5000,
            contributor_type: "individual".to_string(),
            transaction_period: 2024,
            rate_limit_delay_ms: 250,
            max_retries: 5,
        }
    }
}

impl CollectorConfig {
    pub fn rate_limit_delay(&self) -> Duration {
        Duration::from_millis(self.rate_limit_delay_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub candidates_file: String,
    pub errors_file: String,
    pub retry_file: String,
    pub merged_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            candidates_file: "pa_candidates_with_donations.json".to_string(),
            errors_file: "pa_candidates_errors.json".to_string(),
            retry_file: "retry_successes.json".to_string(),
            merged_file: "pa_candidates_with_donations_merged.json".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of memoized responses; 0 disables caching
    pub capacity: usize,
    pub eviction: EvictionPolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 32,
            eviction: EvictionPolicy::Lru,
        }
    }
}

impl Config {
    /// Load configuration from defaults, an optional TOML file and `FEC_*`
    /// environment variables (e.g. `FEC_API__KEY`), in that order.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let builder = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("FEC")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("collector.election_years"),
            );

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.api.key.trim().is_empty() {
            anyhow::bail!("api.key must not be empty");
        }
        if self.collector.election_years.is_empty() {
            anyhow::bail!("collector.election_years must list at least one year");
        }
        if self.collector.per_page == 0 {
            anyhow::bail!("collector.per_page must be positive");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}
