//! # Stan: Simulate Targets And Neighbors
//!
//! Simulates sequence samples from two populations, targets and neighbors,
//! for benchmarking methods that look for regions distinguishing them.
//!
//! ## Overview
//!
//! Each population is a coalescent partition; the two partitions are joined
//! at a synthetic root one exponential waiting time above the older of them.
//! Mutations are thrown onto the branches under an infinite-sites model,
//! separately for two classes of sites:
//!
//! - **Marker sites** inside the configured marker regions. Targets mutate
//!   them at the background rate, neighbors at their own marker rate. A
//!   negative neighbor marker rate deletes the marker regions from all
//!   neighbor sequences.
//! - **Background sites**, everything else, mutating at the background rate.
//!
//! ## Example Workflow
//!
//! ```bash
//! stan simulate -t 7 -n 13 -r 1501-2000,3501-4000 -s 3 -c
//! ```
//! This writes `targets/t1.fasta`..`targets/t7.fasta` and
//! `neighbors/n1.fasta`..`neighbors/n13.fasta` and prints the tree.
//!
//! ```rust
//! use stan_sim::{SimulationConfig, Simulator};
//!
//! let config = SimulationConfig { targets: 7, neighbors: 13, seed: 3, ..Default::default() };
//! let simulation = Simulator::new(config)?.run();
//!
//! assert_eq!(simulation.targets.len(), 7);
//! assert!(simulation.targets.iter().all(|s| s.len() == 10_000));
//! // the default marker rate is negative: the 1000 bp marker region is deleted
//! assert!(simulation.neighbors.iter().all(|s| s.len() == 9_000));
//! # Ok::<(), stan_sim::errors::ConfigError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`tree`] - Arena representation of the coalescent tree
//! - [`coalescent`] - Growing and joining the partitions
//! - [`mutation`] - Poisson mutation counts per branch
//! - [`haplotype`] - Mutation positions and inheritance
//! - [`alignment`] - Ancestral sequence, derived alleles and deletion
//! - [`simulator`] - The pipeline tying the stages together
//! - [`cli`] - Command-line interface implementation

pub mod alignment;
pub mod cli;
pub mod coalescent;
pub mod config;
pub mod consts;
pub mod errors;
pub mod haplotype;
pub mod models;
pub mod mutation;
pub mod newick;
pub mod simulator;
pub mod tree;

// Re-export commonly used types
pub use alignment::Alignment;
pub use config::SimulationConfig;
pub use consts::STAN_CMD;
pub use models::{HaplotypeEvent, MutationCounts, SiteClass, SiteCounts, SiteRates};
pub use simulator::{Simulation, SimulationContext, Simulator};
pub use tree::{CoalescentTree, Node, NodeIndex};
