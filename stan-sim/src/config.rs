use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stan_core::models::MarkerRegions;

use crate::consts::*;
use crate::errors::ConfigError;

// ============================================================================
// Simulation Configuration
// ============================================================================

/// Parameters of one simulation run.
///
/// Every field has a default, so a config file only needs to list the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of target haplotypes
    pub targets: usize,
    /// Number of neighbor haplotypes
    pub neighbors: usize,
    /// Length of the simulated locus
    pub length: usize,
    /// Comma-separated 1-based marker regions, e.g. "1501-2000,3501-4000"
    pub regions: String,
    /// Background mutation rate, theta per nucleotide
    pub mutation_rate: f64,
    /// Marker mutation rate in neighbors, theta per nucleotide; negative deletes the markers
    pub marker_rate: f64,
    /// Seed for the random number generator; 0 seeds from the clock
    pub seed: u64,
    pub target_dir: PathBuf,
    pub neighbor_dir: PathBuf,
    pub print_tree: bool,
    pub print_haplotypes: bool,
    pub overwrite: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            targets: DEFAULT_TARGETS,
            neighbors: DEFAULT_NEIGHBORS,
            length: DEFAULT_LENGTH,
            regions: DEFAULT_REGIONS.to_string(),
            mutation_rate: DEFAULT_MUTATION_RATE,
            marker_rate: DEFAULT_MARKER_RATE,
            seed: 0,
            target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
            neighbor_dir: PathBuf::from(DEFAULT_NEIGHBOR_DIR),
            print_tree: false,
            print_haplotypes: false,
            overwrite: false,
        }
    }
}

impl SimulationConfig {
    /// Helper function to resolve a path relative to a base directory
    /// If the path is already absolute, returns it unchanged
    fn resolve_config_path(path: &Path, base_dir: &Path) -> PathBuf {
        if path.is_absolute() || path.as_os_str().is_empty() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    ///
    /// Load a config file. Files ending in `.toml` are read as TOML, all
    /// others as YAML. Relative output directories are resolved against
    /// the directory containing the config file.
    ///
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError(display.clone(), e))?;

        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

        let mut config: Self = if is_toml {
            toml::from_str(&content).map_err(|e| ConfigError::TomlError(display, e))?
        } else {
            serde_yaml::from_str(&content).map_err(|e| ConfigError::YamlError(display, e))?
        };

        if let Some(config_dir) = path.parent() {
            config.target_dir = Self::resolve_config_path(&config.target_dir, config_dir);
            config.neighbor_dir = Self::resolve_config_path(&config.neighbor_dir, config_dir);
        }

        Ok(config)
    }

    ///
    /// Check sample counts and locus length, then parse the marker regions
    /// and check them against the locus.
    ///
    pub fn marker_regions(&self) -> Result<MarkerRegions, ConfigError> {
        if self.targets == 0 {
            return Err(ConfigError::NotPositive("number of targets"));
        }
        if self.neighbors == 0 {
            return Err(ConfigError::NotPositive("number of neighbors"));
        }
        if self.length == 0 {
            return Err(ConfigError::NotPositive("sequence length"));
        }

        let regions: MarkerRegions = self.regions.parse()?;
        regions.validate(self.length)?;
        Ok(regions)
    }

    /// Whether the marker regions are removed from the neighbor sequences.
    pub fn deletion_mode(&self) -> bool {
        self.marker_rate < 0.0
    }

    /// The configured seed, or one derived from the current time if it is 0.
    pub fn resolve_seed(&self) -> u64 {
        if self.seed != 0 {
            return self.seed;
        }
        chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_else(|| chrono::Utc::now().timestamp_micros()) as u64
    }
}
