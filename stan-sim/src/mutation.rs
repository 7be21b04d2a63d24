//! Poisson mutation counts per branch and site class.

use rand::Rng;

use crate::models::{MutationCounts, SiteCounts, SiteRates};
use crate::tree::{CoalescentTree, NodeIndex};

///
/// Expected number of mutations of one site class on a branch:
/// `rate * sites / 2 * branch_length`.
///
pub fn expected_mutations(rate: f64, sites: usize, branch_length: f64) -> f64 {
    rate * sites as f64 / 2.0 * branch_length
}

///
/// Draw a Poisson(`lambda`) count by inverse transform: multiply uniform
/// draws into a running product until it drops to `exp(-lambda)`; the
/// number of factors minus one is the count.
///
/// The product is kept as a sum of logarithms, since `exp(-lambda)`
/// underflows to 0 for `lambda` beyond ~745.
///
/// A non-positive (or NaN) `lambda` returns 0 without consuming a draw.
///
pub fn poisson_count<R: Rng + ?Sized>(lambda: f64, rng: &mut R) -> u32 {
    if !(lambda > 0.0) {
        return 0;
    }

    let threshold = -lambda;
    let mut log_product = 0.0;
    let mut factors = 0;
    while log_product > threshold {
        log_product += rng.gen::<f64>().ln();
        factors += 1;
    }

    factors - 1
}

///
/// Annotate every node of the subtree rooted at `from` with its mutation
/// counts, visiting nodes in preorder and drawing the marker count before
/// the background count at each node.
///
/// `counts` is indexed by node and must cover the whole tree.
///
pub fn sample_mutations<R: Rng + ?Sized>(
    tree: &CoalescentTree,
    from: NodeIndex,
    rates: SiteRates,
    sites: SiteCounts,
    counts: &mut [MutationCounts],
    rng: &mut R,
) {
    for index in tree.preorder(from) {
        let length = tree[index].branch_length;
        let marker = poisson_count(expected_mutations(rates.marker, sites.marker, length), rng);
        let background = poisson_count(expected_mutations(rates.background, sites.background, length), rng);
        counts[index] = MutationCounts { marker, background };
    }
}
