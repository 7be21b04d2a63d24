//! Random coalescent genealogies for the two sample partitions.
//!
//! Each partition is grown independently into the shared arena; the two
//! partition roots are then joined under a synthetic root whose height is
//! one exponential draw above the older of the two.

use log::debug;
use rand::Rng;
use rand_distr::Exp1;

use crate::tree::{CoalescentTree, NodeIndex};

///
/// Grow a coalescent tree over `size` leaves labeled `prefix1..prefix{size}`
/// and return its root.
///
/// While more than one lineage is active, a waiting time is drawn from an
/// exponential with rate `C(active, 2) * size / total`, then two active
/// lineages are picked uniformly and merged into a node stamped with the
/// cumulative time. A partition of size 1 is a single leaf and consumes no
/// random draws.
///
/// # Panics
/// Panics if `size` is 0 or exceeds `total`.
///
pub fn grow_partition<R: Rng + ?Sized>(
    tree: &mut CoalescentTree,
    size: usize,
    total: usize,
    prefix: &str,
    rng: &mut R,
) -> NodeIndex {
    assert!(size > 0 && size <= total, "partition size must be in 1..={}", total);

    let mut active: Vec<NodeIndex> = (1..=size)
        .map(|i| tree.add_leaf(format!("{}{}", prefix, i)))
        .collect();

    let scale = size as f64 / total as f64;
    let mut time = 0.0;

    while active.len() > 1 {
        let lineages = active.len();
        let rate = (lineages * (lineages - 1) / 2) as f64 * scale;
        let waiting: f64 = rng.sample(Exp1);
        time += waiting / rate;

        // the last lineage fills the slot of the first pick,
        // the merged node takes the slot of the second
        let left = active.swap_remove(rng.gen_range(0..lineages));
        let slot = rng.gen_range(0..lineages - 1);
        let right = active[slot];
        active[slot] = tree.add_internal(vec![left, right], time);
    }

    let root = active[0];
    debug!(
        "Grew partition '{}' with {} leaves, root time {:.6}",
        prefix, size, tree[root].time
    );
    root
}

///
/// Join the target and neighbor partition roots under a synthetic root and
/// make it the root of `tree`. The root time is the older partition root's
/// time plus one Exp(1) draw.
///
pub fn join_partitions<R: Rng + ?Sized>(
    tree: &mut CoalescentTree,
    target_root: NodeIndex,
    neighbor_root: NodeIndex,
    rng: &mut R,
) -> NodeIndex {
    let divergence: f64 = rng.sample(Exp1);
    let time = tree[target_root].time.max(tree[neighbor_root].time) + divergence;

    let root = tree.add_internal(vec![target_root, neighbor_root], time);
    tree.set_root(root);
    debug!("Joined partitions at time {:.6}", time);
    root
}
