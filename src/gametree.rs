//! Branching game record: trees of move nodes with variations.
//!
//! A [`GameRecord`] owns every node and tree of one game in two arenas.
//! Nodes and trees refer to each other through [`NodeId`] / [`TreeId`]
//! handles, so the back-references (node to branch, branch to parent
//! branch, sibling to sibling) are plain indices instead of owning cycles.
//!
//! A tree (branch) holds a trunk: an ordered run of nodes linked as
//! siblings. Variations hang off the end of the trunk as child trees.
//!
//! ```
//! use eido_replay::gametree::GameRecord;
//!
//! let json = r#"{"nodes": [{"SZ": "9"}, {"B": "ee"}], "trees": []}"#;
//! let record = GameRecord::from_json(json).unwrap();
//! let trunk = record.tree(record.root()).nodes();
//! assert_eq!(trunk.len(), 2);
//! ```

use std::cell::Cell;
use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::Color;
use crate::constants::{PROP_BLACK, PROP_COMMENT, PROP_LABEL, PROP_WHITE, RESERVED_PROPERTIES};
use crate::error::Result;

/// Handle to a node inside a [`GameRecord`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Handle to a tree (branch) inside a [`GameRecord`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeId(usize);

/// A property value: a single string or an ordered list of strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    One(String),
    Many(Vec<String>),
}

impl PropValue {
    /// The value as a single string; lists yield their first element.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::One(s) => Some(s),
            PropValue::Many(v) => v.first().map(String::as_str),
        }
    }

    /// All values, whether stored as one string or a list.
    pub fn values(&self) -> &[String] {
        match self {
            PropValue::One(s) => std::slice::from_ref(s),
            PropValue::Many(v) => v,
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::One(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::One(s)
    }
}

impl From<Vec<String>> for PropValue {
    fn from(v: Vec<String>) -> Self {
        PropValue::Many(v)
    }
}

/// Open set of named node properties, in stable key order.
pub type Properties = BTreeMap<String, PropValue>;

/// Structured game record as handed over by a parser:
/// `{ id?, nodes: [ {prop: value, ...}, ... ], trees: [ <same shape> ] }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub nodes: Vec<Properties>,
    #[serde(default)]
    pub trees: Vec<TreeRecord>,
}

/// Monotonic id source, one per record so separate sessions never share state.
#[derive(Clone, Debug)]
struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    fn new() -> Self {
        Self { next: 1 }
    }

    fn next(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Relational fields of a node. Kept apart from the property map so generic
/// property assignment can never rewire the tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct NodeLinks {
    parent: Option<TreeId>,
    next_sibling: Option<NodeId>,
    previous_sibling: Option<NodeId>,
}

/// One move or annotation record.
#[derive(Clone, Debug)]
pub struct GameNode {
    id: u64,
    links: NodeLinks,
    properties: Properties,
}

impl GameNode {
    /// Record-unique id, assigned at creation and never reused.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The branch whose trunk holds this node (`None` until appended).
    pub fn parent(&self) -> Option<TreeId> {
        self.links.parent
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.links.next_sibling
    }

    pub fn previous_sibling(&self) -> Option<NodeId> {
        self.links.previous_sibling
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropValue> {
        self.properties.get(name)
    }

    /// Set a property. Reserved relational names are silently dropped and
    /// `false` is returned.
    pub fn set_property(&mut self, name: &str, value: impl Into<PropValue>) -> bool {
        if RESERVED_PROPERTIES.iter().any(|r| *r == name) {
            debug!("node {}: ignoring reserved property '{name}'", self.id);
            return false;
        }
        self.properties.insert(name.to_string(), value.into());
        true
    }

    /// Copy every property of `props` into this node.
    pub fn load(&mut self, props: &Properties) {
        for (name, value) in props {
            self.set_property(name, value.clone());
        }
    }

    /// The move played at this node as (color, raw SGF coordinate).
    /// A white move wins if a node carries both.
    pub fn get_move(&self) -> Option<(Color, &str)> {
        if let Some(w) = self.property(PROP_WHITE).and_then(PropValue::as_str) {
            return Some((Color::White, w));
        }
        self.property(PROP_BLACK)
            .and_then(PropValue::as_str)
            .map(|b| (Color::Black, b))
    }

    pub fn comment(&self) -> Option<&str> {
        self.property(PROP_COMMENT).and_then(PropValue::as_str)
    }

    /// Point labels as (SGF point, text) pairs; malformed entries are skipped.
    pub fn labels(&self) -> Vec<(&str, &str)> {
        self.property(PROP_LABEL)
            .map(|v| v.values().iter().filter_map(|l| l.split_once(':')).collect())
            .unwrap_or_default()
    }
}

/// A branch: a trunk of nodes plus the variations that follow it.
#[derive(Clone, Debug)]
pub struct GameTree {
    id: u64,
    explicit_id: bool,
    nodes: Vec<NodeId>,
    trees: Vec<TreeId>,
    parent: Option<TreeId>,
    preferred: Cell<usize>,
}

impl GameTree {
    /// Record-unique id, unless overridden by the loaded record.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The trunk, in play order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Variations, highest priority first.
    pub fn trees(&self) -> &[TreeId] {
        &self.trees
    }

    pub fn parent(&self) -> Option<TreeId> {
        self.parent
    }

    pub fn first_node(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn last_node(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Index of the variation followed last (0 until one is chosen).
    pub fn preferred(&self) -> usize {
        self.preferred.get()
    }

    /// Navigation memory only; does not change the record's structure.
    pub(crate) fn set_preferred(&self, index: usize) {
        self.preferred.set(index);
    }
}

/// Owner of one game's nodes and trees.
#[derive(Clone, Debug)]
pub struct GameRecord {
    nodes: Vec<GameNode>,
    trees: Vec<GameTree>,
    root: TreeId,
    node_ids: IdGenerator,
    tree_ids: IdGenerator,
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRecord {
    /// A record whose root tree has an empty trunk, ready for authoring.
    pub fn new() -> Self {
        let mut record = Self {
            nodes: Vec::new(),
            trees: Vec::new(),
            root: TreeId(0),
            node_ids: IdGenerator::new(),
            tree_ids: IdGenerator::new(),
        };
        record.root = record.new_tree();
        record
    }

    /// Rebuild a record from structured data. Every loaded branch ends up
    /// with at least one node; empty trunks get a blank placeholder.
    pub fn load(data: &TreeRecord) -> Self {
        let mut record = Self {
            nodes: Vec::new(),
            trees: Vec::new(),
            root: TreeId(0),
            node_ids: IdGenerator::new(),
            tree_ids: IdGenerator::new(),
        };
        record.root = record.load_tree(data);
        record
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let data: TreeRecord = serde_json::from_str(json)?;
        Ok(Self::load(&data))
    }

    fn load_tree(&mut self, data: &TreeRecord) -> TreeId {
        let tree = self.new_tree();
        for props in &data.nodes {
            let node = self.new_node(props);
            self.append_node(tree, node);
        }
        if data.nodes.is_empty() {
            let node = self.new_node(&Properties::new());
            self.append_node(tree, node);
        }
        for child in &data.trees {
            let child = self.load_tree(child);
            self.append_tree(tree, child);
        }
        // 0 means "no id", as in records that write a default
        if let Some(id) = data.id.filter(|&id| id != 0) {
            let t = &mut self.trees[tree.0];
            t.id = id;
            t.explicit_id = true;
        }
        tree
    }

    /// Export the subtree rooted at `tree` back into structured form.
    pub fn to_record(&self, tree: TreeId) -> TreeRecord {
        let t = self.tree(tree);
        TreeRecord {
            id: t.explicit_id.then_some(t.id),
            nodes: t
                .nodes
                .iter()
                .map(|&n| self.node(n).properties.clone())
                .collect(),
            trees: t.trees.iter().map(|&c| self.to_record(c)).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_record(self.root))?)
    }

    pub fn root(&self) -> TreeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &GameNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut GameNode {
        &mut self.nodes[id.0]
    }

    pub fn tree(&self, id: TreeId) -> &GameTree {
        &self.trees[id.0]
    }

    /// Number of nodes created in this record, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Create a detached node holding a copy of `props`.
    pub fn new_node(&mut self, props: &Properties) -> NodeId {
        let mut node = GameNode {
            id: self.node_ids.next(),
            links: NodeLinks::default(),
            properties: Properties::new(),
        };
        node.load(props);
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Create a detached tree with an empty trunk.
    pub fn new_tree(&mut self) -> TreeId {
        self.trees.push(GameTree {
            id: self.tree_ids.next(),
            explicit_id: false,
            nodes: Vec::new(),
            trees: Vec::new(),
            parent: None,
            preferred: Cell::new(0),
        });
        TreeId(self.trees.len() - 1)
    }

    /// Append `node` to the end of `tree`'s trunk, linking it to the former
    /// last node.
    ///
    /// # Panics
    /// If `node` already belongs to a branch.
    pub fn append_node(&mut self, tree: TreeId, node: NodeId) {
        assert!(
            self.nodes[node.0].links.parent.is_none(),
            "node {node:?} is already attached"
        );
        let previous = self.trees[tree.0].last_node();
        if let Some(prev) = previous {
            self.nodes[prev.0].links.next_sibling = Some(node);
        }
        let links = &mut self.nodes[node.0].links;
        links.parent = Some(tree);
        links.previous_sibling = previous;
        self.trees[tree.0].nodes.push(node);
    }

    /// Append `child` as the last variation of `tree`.
    ///
    /// # Panics
    /// If `child` already has a parent or is the root.
    pub fn append_tree(&mut self, tree: TreeId, child: TreeId) {
        assert!(
            child != self.root && self.trees[child.0].parent.is_none(),
            "tree {child:?} is already attached"
        );
        self.trees[child.0].parent = Some(tree);
        self.trees[tree.0].trees.push(child);
    }

    /// Zero-based index of `node` in its branch's trunk.
    ///
    /// # Panics
    /// If the node is detached or missing from its branch, which means the
    /// record is corrupt.
    pub fn node_position(&self, node: NodeId) -> usize {
        let Some(parent) = self.node(node).parent() else {
            panic!("node {node:?} is not attached to a branch");
        };
        match self.tree(parent).nodes.iter().position(|&n| n == node) {
            Some(i) => i,
            None => panic!("node {node:?} missing from branch {parent:?}"),
        }
    }

    /// Zero-based index of `tree` among its parent's variations, or `None`
    /// for a tree without a parent.
    ///
    /// # Panics
    /// If the parent does not list `tree` as a child.
    pub fn tree_position(&self, tree: TreeId) -> Option<usize> {
        let parent = self.tree(tree).parent()?;
        match self.tree(parent).trees.iter().position(|&t| t == tree) {
            Some(i) => Some(i),
            None => panic!("tree {tree:?} missing from parent {parent:?}"),
        }
    }
}
