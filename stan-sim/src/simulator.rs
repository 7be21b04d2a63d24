//! The simulation pipeline.
//!
//! A run walks through a fixed sequence of stages, all drawing from the one
//! random number generator held by the [`SimulationContext`]:
//!
//! 1. grow the target partition, then the neighbor partition
//! 2. join both under a synthetic root and derive branch lengths
//! 3. sample mutation counts on the target subtree, then the neighbor subtree
//! 4. build haplotype events over the whole tree
//! 5. draw the ancestral sequence, apply the events and, in deletion mode,
//!    remove the marker regions from the neighbor columns
//!
//! The order of the stages fixes the order of the random draws, so the same
//! seed and configuration always reproduce the same output.

use std::io::{self, Write};

use fxhash::FxHashMap;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stan_core::models::{MarkerRegions, Sequence};

use crate::alignment::{ancestral_sequence, Alignment};
use crate::coalescent::{grow_partition, join_partitions};
use crate::config::SimulationConfig;
use crate::consts::{NEIGHBOR_PREFIX, TARGET_PREFIX};
use crate::errors::ConfigError;
use crate::haplotype::{assign_columns, build_haplotypes, write_haplotypes, PositionTables};
use crate::models::{HaplotypeEvent, MutationCounts, SiteClass, SiteCounts, SiteRates};
use crate::mutation::sample_mutations;
use crate::newick::to_newick;
use crate::tree::{CoalescentTree, NodeIndex};

///
/// State of a single run, threaded through the pipeline stages.
///
pub struct SimulationContext {
    pub sites: SiteCounts,
    pub target_count: usize,
    pub neighbor_count: usize,
    pub leaf_columns: FxHashMap<NodeIndex, usize>,
    pub counts: Vec<MutationCounts>,
    pub events: Vec<HaplotypeEvent>,
    pub rng: StdRng,
}

impl SimulationContext {
    pub fn new(sites: SiteCounts, target_count: usize, neighbor_count: usize, seed: u64) -> Self {
        Self {
            sites,
            target_count,
            neighbor_count,
            leaf_columns: FxHashMap::default(),
            counts: Vec::new(),
            events: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn sample_count(&self) -> usize {
        self.target_count + self.neighbor_count
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub seed: u64,
    pub tree: CoalescentTree,
    pub counts: Vec<MutationCounts>,
    pub events: Vec<HaplotypeEvent>,
    pub alignment: Alignment,
    /// Sample label per haplotype column
    pub labels: Vec<String>,
    pub targets: Vec<Sequence>,
    pub neighbors: Vec<Sequence>,
}

impl Simulation {
    /// The joined tree in Newick notation.
    pub fn newick(&self) -> String {
        to_newick(&self.tree)
    }

    pub fn write_haplotypes<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_haplotypes(writer, &self.events, &self.labels)
    }
}

///
/// A validated simulation setup. Creating it checks the configuration and
/// builds the site tables but consumes no randomness.
///
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
    regions: MarkerRegions,
    marker_positions: Vec<usize>,
    background_positions: Vec<usize>,
    seed: u64,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let regions = config.marker_regions()?;
        let marker_positions = regions.marker_positions();
        let background_positions = regions.background_positions(config.length);
        let seed = config.resolve_seed();

        Ok(Self {
            config,
            regions,
            marker_positions,
            background_positions,
            seed,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn regions(&self) -> &MarkerRegions {
        &self.regions
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn sites(&self) -> SiteCounts {
        SiteCounts::new(self.marker_positions.len(), self.background_positions.len())
    }

    /// Run the pipeline once.
    pub fn run(&self) -> Simulation {
        let config = &self.config;
        let mut ctx = SimulationContext::new(self.sites(), config.targets, config.neighbors, self.seed);
        let total = ctx.sample_count();

        let mut tree = CoalescentTree::with_capacity(total);
        let target_root = grow_partition(&mut tree, ctx.target_count, total, TARGET_PREFIX, &mut ctx.rng);
        let neighbor_root = grow_partition(&mut tree, ctx.neighbor_count, total, NEIGHBOR_PREFIX, &mut ctx.rng);
        join_partitions(&mut tree, target_root, neighbor_root, &mut ctx.rng);
        tree.derive_branch_lengths();

        // targets mutate their marker sites at the background rate
        let target_rates = SiteRates::new(config.mutation_rate, config.mutation_rate);
        let neighbor_rates = SiteRates::new(config.marker_rate, config.mutation_rate);
        ctx.counts = vec![MutationCounts::default(); tree.len()];
        sample_mutations(&tree, target_root, target_rates, ctx.sites, &mut ctx.counts, &mut ctx.rng);
        sample_mutations(&tree, neighbor_root, neighbor_rates, ctx.sites, &mut ctx.counts, &mut ctx.rng);

        ctx.leaf_columns = assign_columns(&tree, target_root, neighbor_root);
        let tables = PositionTables {
            marker: &self.marker_positions,
            background: &self.background_positions,
        };
        ctx.events = build_haplotypes(&tree, &ctx.counts, &ctx.leaf_columns, tables, &mut ctx.rng);

        let ancestral = ancestral_sequence(config.length, &mut ctx.rng);
        let mut alignment = Alignment::new(ancestral, total);
        alignment.apply_events(&ctx.events, &mut ctx.rng);
        if config.deletion_mode() {
            alignment.compact_rows(&self.background_positions, ctx.target_count);
        }

        let mut labels = vec![String::new(); total];
        for (&leaf, &column) in &ctx.leaf_columns {
            labels[column] = tree[leaf].label.clone().unwrap_or_default();
        }
        let (targets, neighbors) = alignment.to_sequences(&labels, ctx.target_count);

        let marker_events = ctx.events.iter().filter(|e| e.class == SiteClass::Marker).count();
        info!(
            "Simulated {} targets and {} neighbors (seed {}): tree height {:.4}, {} mutations ({} marker, {} background)",
            ctx.target_count,
            ctx.neighbor_count,
            self.seed,
            tree.height(),
            ctx.events.len(),
            marker_events,
            ctx.events.len() - marker_events,
        );
        if config.deletion_mode() {
            info!(
                "Deleted marker regions {} from neighbors ({} bp)",
                self.regions,
                self.marker_positions.len()
            );
        }

        Simulation {
            seed: self.seed,
            tree,
            counts: ctx.counts,
            events: ctx.events,
            alignment,
            labels,
            targets,
            neighbors,
        }
    }
}
