//! Runtime configuration: serialized defaults overlaid with `MEDSCHED_*`
//! environment variables (e.g. `MEDSCHED_DATABASE_URL`, `MEDSCHED_LOGLEVEL`).

use crate::error::SchedError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "MEDSCHED_";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub database_url: String,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:medsched.db".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self, SchedError> {
        Ok(Self::figment().extract()?)
    }
}
