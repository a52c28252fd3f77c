use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

pub fn load_config<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, ConfigError> {
    let source = fs::read_to_string(path.as_ref())?;
    let config = parse_config(&source)?;
    log::debug!("loaded config from {}", path.as_ref().display());
    Ok(config)
}

/// Parses a config already held in memory, e.g. one embedded with `include_str!`.
pub fn parse_config<T: DeserializeOwned>(source: &str) -> Result<T, ConfigError> {
    Ok(serde_yaml::from_str(source)?)
}
