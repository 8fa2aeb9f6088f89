use serde::Deserialize;
use staypark_core::CollectionLayout;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub aggregation: AggregationConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_customers_collection")]
    pub customers_collection: String,
    #[serde(default = "default_bookings_collection")]
    pub bookings_collection: String,
    /// JSON fixture loaded into the in-memory store at start-up
    pub seed_file: Option<String>,
}

fn default_customers_collection() -> String { "users".to_string() }
fn default_bookings_collection() -> String { "bookings".to_string() }

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            customers_collection: default_customers_collection(),
            bookings_collection: default_bookings_collection(),
            seed_file: None,
        }
    }
}

impl StoreConfig {
    pub fn layout(&self) -> CollectionLayout {
        CollectionLayout::new(&self.customers_collection, &self.bookings_collection)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AggregationConfig {
    #[serde(default = "default_max_concurrent_partitions")]
    pub max_concurrent_partitions: usize,
}

fn default_max_concurrent_partitions() -> usize { 8 }

impl Default for AggregationConfig {
    fn default() -> Self {
        Self { max_concurrent_partitions: default_max_concurrent_partitions() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// 0 disables caching of stats and catalog reads
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

fn default_ttl_seconds() -> u64 { 30 }

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_seconds: default_ttl_seconds() }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `STAYPARK__SERVER__PORT=9000`
            .add_source(config::Environment::with_prefix("STAYPARK").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_toml(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
