//! Arena representation of the joined coalescent tree.
//!
//! Nodes are stored in one vector and refer to each other by [`NodeIndex`].
//! Children are owned through their index list, the parent index is a plain
//! back-reference. Leaves carry the sample label (`t1`, `n3`, ...), internal
//! nodes carry the cumulative coalescence time at which their children merged.

/// Index of a node in the tree arena.
pub type NodeIndex = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub index: NodeIndex,
    pub label: Option<String>,
    pub children: Vec<NodeIndex>,
    pub parent: Option<NodeIndex>,
    /// Cumulative coalescence time, 0 for leaves.
    pub time: f64,
    /// Distance to the parent; 0 for the root and before branch lengths are derived.
    pub branch_length: f64,
}

impl Node {
    fn new(index: NodeIndex, label: Option<String>, children: Vec<NodeIndex>, time: f64) -> Self {
        Self {
            index,
            label,
            children,
            parent: None,
            time,
            branch_length: 0.0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CoalescentTree {
    nodes: Vec<Node>,
    root: Option<NodeIndex>,
}

impl CoalescentTree {
    /// Creates an empty tree with room for a binary tree on `num_leaves` leaves.
    pub fn with_capacity(num_leaves: usize) -> Self {
        Self {
            nodes: Vec::with_capacity((2 * num_leaves).saturating_sub(1)),
            root: None,
        }
    }

    /// Adds a labeled leaf at time 0 and returns its index.
    pub fn add_leaf(&mut self, label: String) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(Node::new(index, Some(label), Vec::new(), 0.0));
        index
    }

    /// Adds an internal node over `children`, stamped with `time`, and
    /// returns its index. The children's parent links are set.
    pub fn add_internal(&mut self, children: Vec<NodeIndex>, time: f64) -> NodeIndex {
        let index = self.nodes.len();
        for &child in &children {
            self.nodes[child].parent = Some(index);
        }
        self.nodes.push(Node::new(index, None, children, time));
        index
    }

    pub fn set_root(&mut self, index: NodeIndex) {
        self.root = Some(index);
    }

    /// Index of the root.
    ///
    /// # Panics
    /// Panics if no root has been set yet.
    pub fn root_index(&self) -> NodeIndex {
        self.root.expect("tree root has not been set")
    }

    pub fn root(&self) -> &Node {
        &self.nodes[self.root_index()]
    }

    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Height of the tree, i.e. the cumulative time of the root.
    pub fn height(&self) -> f64 {
        self.root().time
    }

    ///
    /// Set every node's branch length to `parent.time - node.time`; the
    /// root gets length 0. Must run once the tree is joined.
    ///
    pub fn derive_branch_lengths(&mut self) {
        for index in 0..self.nodes.len() {
            self.nodes[index].branch_length = match self.nodes[index].parent {
                Some(parent) => self.nodes[parent].time - self.nodes[index].time,
                None => 0.0,
            };
        }
    }

    ///
    /// Indices of the subtree rooted at `from` in preorder: a node first,
    /// then the subtrees of its children in child order.
    ///
    pub fn preorder(&self, from: NodeIndex) -> Vec<NodeIndex> {
        let mut order = Vec::new();
        let mut stack = vec![from];
        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(self.nodes[index].children.iter().rev());
        }
        order
    }

    /// Leaves of the subtree rooted at `from`, in preorder.
    pub fn leaves_under(&self, from: NodeIndex) -> Vec<NodeIndex> {
        self.preorder(from)
            .into_iter()
            .filter(|&i| self.nodes[i].is_leaf())
            .collect()
    }

    /// Sum of all branch lengths.
    pub fn total_branch_length(&self) -> f64 {
        self.nodes.iter().map(|n| n.branch_length).sum()
    }
}

impl std::ops::Index<NodeIndex> for CoalescentTree {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}
