use stan_core::errors::RegionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),

    #[error("Failed to parse YAML config {0}: {1}")]
    YamlError(String, serde_yaml::Error),

    #[error("Failed to parse TOML config {0}: {1}")]
    TomlError(String, toml::de::Error),

    #[error("{0} must be positive")]
    NotPositive(&'static str),

    #[error(transparent)]
    Region(#[from] RegionError),
}
