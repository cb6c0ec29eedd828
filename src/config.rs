use crate::error::StepperResult;
use crate::runner::control::{clamp_speed, DEFAULT_SPEED};
use crate::utils::random_collection::MAX_COLLECTION;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_COLLECTION_SIZE: usize = 10;
pub const DEFAULT_WEB_PORT: u16 = 8787;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepperConfig {
    pub speed: u32,
    pub collection_size: usize,
    pub seed: Option<u64>,
    pub web_port: u16,
    pub log_filter: String,
}

impl Default for StepperConfig {
    fn default() -> Self {
        StepperConfig {
            speed: DEFAULT_SPEED,
            collection_size: DEFAULT_COLLECTION_SIZE,
            seed: None,
            web_port: DEFAULT_WEB_PORT,
            log_filter: "info".to_string(),
        }
    }
}

impl StepperConfig {
    pub fn from_toml_str(source: &str) -> StepperResult<Self> {
        let config: StepperConfig = toml::from_str(source)?;
        Ok(config.normalized())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> StepperResult<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// No path means defaults; a path that cannot be read is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> StepperResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(StepperConfig::default()),
        }
    }

    pub fn normalized(mut self) -> Self {
        self.speed = clamp_speed(self.speed);
        self.collection_size = self.collection_size.clamp(1, MAX_COLLECTION);
        if self.log_filter.trim().is_empty() {
            self.log_filter = "info".to_string();
        }
        self
    }
}
