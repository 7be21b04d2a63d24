pub const STAN_CMD: &str = "stan";
pub const SIMULATE_CMD: &str = "simulate";
pub const CONFIG_CMD: &str = "config";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_TARGETS: usize = 10;
pub const DEFAULT_NEIGHBORS: usize = 10;
pub const DEFAULT_TARGET_DIR: &str = "targets";
pub const DEFAULT_NEIGHBOR_DIR: &str = "neighbors";
pub const DEFAULT_LENGTH: usize = 10_000;
pub const DEFAULT_REGIONS: &str = "4501-5500";
pub const DEFAULT_MUTATION_RATE: f64 = 0.01;
pub const DEFAULT_MARKER_RATE: f64 = -0.1;
pub const DEFAULT_CONFIG_FILE: &str = "stan_config.yaml";

pub const TARGET_PREFIX: &str = "t";
pub const NEIGHBOR_PREFIX: &str = "n";

/// Nucleotide alphabet for ancestral and derived bases.
pub const NUCLEOTIDES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Marks rows removed from neighbor columns in deletion mode.
pub const DELETED: u8 = 0;

pub const FASTA_LINE_WIDTH: usize = 70;
