//! Haplotype events: where each mutation falls and which samples inherit it.

use std::io::{self, Write};

use fxhash::FxHashMap;
use rand::Rng;

use crate::models::{HaplotypeEvent, MutationCounts, SiteClass};
use crate::tree::{CoalescentTree, NodeIndex};

///
/// Map every leaf to its haplotype column: leaves under `target_root` take
/// columns `0..T` and leaves under `neighbor_root` take `T..T+N`, each in
/// the order the leaves were created (`t1, t2, ...`, then `n1, n2, ...`).
///
pub fn assign_columns(
    tree: &CoalescentTree,
    target_root: NodeIndex,
    neighbor_root: NodeIndex,
) -> FxHashMap<NodeIndex, usize> {
    let mut targets = tree.leaves_under(target_root);
    let mut neighbors = tree.leaves_under(neighbor_root);
    targets.sort_unstable();
    neighbors.sort_unstable();

    targets
        .into_iter()
        .chain(neighbors)
        .enumerate()
        .map(|(column, leaf)| (leaf, column))
        .collect()
}

/// Site tables the events draw their positions from.
#[derive(Debug, Clone, Copy)]
pub struct PositionTables<'a> {
    pub marker: &'a [usize],
    pub background: &'a [usize],
}

///
/// Turn the per-node mutation counts into haplotype events.
///
/// Nodes are visited in preorder from the root. At each node the marker
/// events come first, each drawing its position uniformly from the marker
/// table, followed by the background events drawing from the background
/// table. Every event is inherited by exactly the leaves below the node.
///
pub fn build_haplotypes<R: Rng + ?Sized>(
    tree: &CoalescentTree,
    counts: &[MutationCounts],
    leaf_columns: &FxHashMap<NodeIndex, usize>,
    positions: PositionTables<'_>,
    rng: &mut R,
) -> Vec<HaplotypeEvent> {
    let columns = leaf_columns.len();
    let mut events = Vec::new();

    for index in tree.preorder(tree.root_index()) {
        let node_counts = counts[index];
        if node_counts.total() == 0 {
            continue;
        }

        let mut carriers = vec![false; columns];
        for leaf in tree.leaves_under(index) {
            carriers[leaf_columns[&leaf]] = true;
        }

        let classes = [
            (SiteClass::Marker, node_counts.marker, positions.marker),
            (SiteClass::Background, node_counts.background, positions.background),
        ];
        for (class, count, table) in classes {
            for _ in 0..count {
                let position = table[rng.gen_range(0..table.len())];
                events.push(HaplotypeEvent {
                    position,
                    class,
                    carriers: carriers.clone(),
                });
            }
        }
    }

    events
}

///
/// Write the events as a haplotype matrix: a `Positions:` line with the
/// 1-based position of every event, then one row per column with the
/// sample label, padded to a common width, and its 0/1 inheritance string.
///
pub fn write_haplotypes<W: Write>(writer: &mut W, events: &[HaplotypeEvent], labels: &[String]) -> io::Result<()> {
    write!(writer, "Positions:")?;
    for event in events {
        write!(writer, " {}", event.position + 1)?;
    }
    writeln!(writer)?;

    let width = labels.iter().map(|l| l.len()).max().unwrap_or(0) + 1;
    for (column, label) in labels.iter().enumerate() {
        let row: String = events
            .iter()
            .map(|e| if e.carriers[column] { '1' } else { '0' })
            .collect();
        writeln!(writer, "{:<width$}{} ", label, row, width = width)?;
    }

    Ok(())
}
