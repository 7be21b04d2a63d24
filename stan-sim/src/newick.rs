//! Newick serialization of the joined coalescent tree.

use crate::tree::{CoalescentTree, NodeIndex};

/// Each internal node: "(,)" ~= 3 chars
const INTERNAL_NODE_CHARS: usize = 3;
/// Branch lengths, e.g. ":0.009529961339106089"
const BRANCH_LENGTH_CHARS: usize = 20;

///
/// Returns the Newick representation of `tree` with closing semicolon.
///
/// Leaves are written with their labels, internal nodes without; every node
/// except the root carries its branch length, e.g. `((t1:0.5,t2:0.5):1.2,n1:1.7);`.
///
pub fn to_newick(tree: &CoalescentTree) -> String {
    // Recursive helper for building the Newick string
    fn build_newick(tree: &CoalescentTree, newick: &mut String, index: NodeIndex) {
        let node = &tree[index];

        if node.is_leaf() {
            newick.push_str(node.label.as_deref().unwrap_or_default());
        } else {
            newick.push('(');
            for (i, &child) in node.children.iter().enumerate() {
                if i > 0 {
                    newick.push(',');
                }
                build_newick(tree, newick, child);
            }
            newick.push(')');
        }

        if !node.is_root() {
            newick.push(':');
            newick.push_str(&node.branch_length.to_string());
        }
    }

    let capacity = tree.len() * (INTERNAL_NODE_CHARS + BRANCH_LENGTH_CHARS);
    let mut newick = String::with_capacity(capacity);

    build_newick(tree, &mut newick, tree.root_index());
    newick.push(';');

    newick
}
