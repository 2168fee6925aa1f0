//! # Folder Tree
//!
//! Builds a labelled tree out of `/`-separated paths. The knowledge base uses it
//! to turn the flat `_dir:<path>` tag namespace into a folder view, but the tree
//! itself only knows about paths and attached values.
//!
//! ## Representation
//!
//! Nodes live in an arena (`Vec<Node<V>>`) and refer to each other by
//! [`NodeId`]. A parent owns its children through the arena; the `parent`
//! field is a plain handle used for walking upwards ([`Tree::full_name`],
//! [`Tree::root_of`]) and never for lifetime management.
//!
//! ```text
//! ""            (root, unlabeled)
//! └── foo       value: [post A]
//!     └── bar   value: [post B]
//! ```
//!
//! ## Ordering
//!
//! Siblings keep insertion order. [`build_tree`] inserts paths in sorted
//! order, so the resulting layout is deterministic and effectively
//! lexicographic by full path.
//!
//! ## Paths
//!
//! Leading and trailing separators are ignored: `"/foo/bar/"` and `"foo/bar"`
//! name the same node. The empty path names the node the lookup starts from.

use crate::model::Post;
use std::collections::BTreeMap;

pub const PATH_SEPARATOR: char = '/';

/// Handle to a node inside one [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct Node<V> {
    label: String,
    value: Vec<V>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl<V> Node<V> {
    fn new(label: String, parent: Option<NodeId>) -> Self {
        Self {
            label,
            value: Vec::new(),
            parent,
            children: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &[V] {
        &self.value
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Tree of posts as produced by the folder view.
pub type PostTree = Tree<Post>;

#[derive(Debug, Clone)]
pub struct Tree<V> {
    nodes: Vec<Node<V>>,
}

impl<V> Default for Tree<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.trim_matches(PATH_SEPARATOR)
        .split(PATH_SEPARATOR)
        .filter(|s| !s.is_empty())
}

impl<V> Tree<V> {
    /// A tree holding only the unlabeled root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(String::new(), None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<V>> {
        self.nodes.get(id.0)
    }

    /// Panics if `id` was not handed out by this tree.
    pub fn node(&self, id: NodeId) -> &Node<V> {
        match self.get(id) {
            Some(node) => node,
            None => panic!("node {:?} does not belong to this tree", id),
        }
    }

    pub fn label(&self, id: NodeId) -> &str {
        self.node(id).label()
    }

    pub fn value(&self, id: NodeId) -> &[V] {
        self.node(id).value()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent()
    }

    pub fn set_value(&mut self, id: NodeId, value: Vec<V>) {
        self.nodes[id.0].value = value;
    }

    fn child_labelled(&self, parent: NodeId, label: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&c| self.label(c) == label)
    }

    /// Returns the node at `path` below `node`, creating any missing nodes on
    /// the way. Calling it again with the same arguments returns the same handle.
    pub fn new_or_existing(&mut self, node: NodeId, path: &str) -> NodeId {
        let mut current = node;
        for segment in segments(path) {
            current = match self.child_labelled(current, segment) {
                Some(existing) => existing,
                None => {
                    let id = NodeId(self.nodes.len());
                    self.nodes
                        .push(Node::new(segment.to_string(), Some(current)));
                    self.nodes[current.0].children.push(id);
                    id
                }
            };
        }
        current
    }

    /// Looks up `path` below `node` without creating anything. Any segment
    /// that does not match yields `None`.
    pub fn search(&self, node: NodeId, path: &str) -> Option<NodeId> {
        segments(path).try_fold(node, |current, segment| self.child_labelled(current, segment))
    }

    /// Topmost ancestor of `node`.
    pub fn root_of(&self, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// `/`-joined labels from the root (exclusive) down to `node`.
    pub fn full_name(&self, node: NodeId) -> String {
        let mut labels = Vec::new();
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            labels.push(self.label(current));
            current = parent;
        }
        labels.reverse();
        labels.join(PATH_SEPARATOR.to_string().as_str())
    }

    /// Depth-first, pre-order traversal starting at `node` (depth 0).
    /// Children are visited in insertion order.
    pub fn walk<F>(&self, node: NodeId, mut visit: F)
    where
        F: FnMut(usize, NodeId),
    {
        let mut stack = vec![(0usize, node)];
        while let Some((depth, id)) = stack.pop() {
            visit(depth, id);
            for &child in self.children(id).iter().rev() {
                stack.push((depth + 1, child));
            }
        }
    }
}

/// Builds a tree from a mapping of paths to values.
///
/// Paths are inserted in sorted order. Paths that differ only in leading or
/// trailing separators land on the same node and their values are concatenated.
pub fn build_tree<V, I>(mapping: I) -> Tree<V>
where
    I: IntoIterator<Item = (String, Vec<V>)>,
{
    let sorted: BTreeMap<String, Vec<V>> = mapping.into_iter().collect();
    let mut tree = Tree::new();
    let root = tree.root();
    for (path, values) in sorted {
        let id = tree.new_or_existing(root, &path);
        tree.nodes[id.0].value.extend(values);
    }
    tree
}
