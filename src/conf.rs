use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::pkg::internal::store::StoreConfig;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub service_name: String,
    pub listen_port: String,
    pub database_url: String,
    pub database_name: String,
    pub collection_name: String,
    pub connect_timeout_secs: u64,
    pub op_timeout_secs: u64,
    pub max_page_size: i64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix("JOBBOARD"))
    }

    pub fn load(env: Environment) -> Result<Self, ConfigError> {
        let conf = Self::defaults()?.add_source(env).build()?;
        conf.try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("service_name", "jobboard")?
            .set_default("listen_port", "8080")?
            .set_default("database_url", "mongodb://127.0.0.1:27017")?
            .set_default("database_name", "jobboard")?
            .set_default("collection_name", "jobs")?
            .set_default("connect_timeout_secs", 60)?
            .set_default("op_timeout_secs", 30)?
            .set_default("max_page_size", 100)
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            uri: self.database_url.clone(),
            database: self.database_name.clone(),
            collection: self.collection_name.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            op_timeout: Duration::from_secs(self.op_timeout_secs),
            max_page_size: self.max_page_size,
        }
    }
}
