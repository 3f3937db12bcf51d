//! Navigation over a [`GameRecord`].
//!
//! A [`GameCursor`] points at one node and walks the record in play order,
//! hiding where one branch's trunk ends and a variation begins. Cursors borrow
//! the record, so they cannot outlive it; any number of them can be live at
//! once.
//!
//! ## Play order
//!
//! - Forward: the next sibling in the trunk, otherwise the first node of a
//!   variation (the remembered one unless the caller picks another).
//! - Backward: the previous sibling, otherwise the last trunk node of the
//!   parent branch, which is where the variation forked off.

use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::error::Error;
use crate::gametree::{GameNode, GameRecord, NodeId, TreeId};

/// Address of a node: one variation index per branch boundary crossed from
/// the root, then the node's index within its trunk.
///
/// Its text form is comma separated, e.g. `"1,0,4"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Variation indices, root first.
    pub fn variations(&self) -> &[usize] {
        self.0.split_last().map(|(_, v)| v).unwrap_or(&[])
    }

    /// Index of the node within its trunk.
    pub fn node_index(&self) -> Option<usize> {
        self.0.last().copied()
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

impl FromStr for NodePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('#');
        if s.is_empty() {
            return Ok(Self::default());
        }
        s.split(',')
            .map(|part| part.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
            .map_err(|_| Error::InvalidPath {
                value: s.to_string(),
            })
    }
}

/// A position within a game record.
#[derive(Clone, Copy, Debug)]
pub struct GameCursor<'a> {
    record: &'a GameRecord,
    node: Option<NodeId>,
}

impl<'a> GameCursor<'a> {
    pub fn new(record: &'a GameRecord, node: Option<NodeId>) -> Self {
        Self { record, node }
    }

    /// A cursor on the first node of the record (none for an empty root).
    pub fn at_root(record: &'a GameRecord) -> Self {
        Self::new(record, record.tree(record.root()).first_node())
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn current(&self) -> Option<&'a GameNode> {
        self.node.map(|n| self.record.node(n))
    }

    /// The branch holding the current node.
    pub fn branch(&self) -> Option<TreeId> {
        self.current().and_then(GameNode::parent)
    }

    /// Step to the next node of the same trunk; never enters a variation.
    pub fn next_node(&mut self) -> bool {
        match self.current().and_then(GameNode::next_sibling) {
            Some(next) => {
                self.node = Some(next);
                true
            }
            None => false,
        }
    }

    /// Step forward in play order.
    ///
    /// A next sibling always wins and `variation` is then ignored. At the end
    /// of a trunk, descend into variation `variation` (remembering it as the
    /// branch's preferred line), or into the preferred line if `None`.
    /// Returns `false`, without moving, if there is nowhere to go or
    /// `variation` is out of range.
    pub fn next(&mut self, variation: Option<usize>) -> bool {
        let Some((target, choice)) = self.next_target(variation) else {
            return false;
        };
        if let Some((branch, index)) = choice {
            if variation.is_some() {
                self.record.tree(branch).set_preferred(index);
            }
            trace!("entering variation {index} of branch {branch:?}");
        }
        self.node = Some(target);
        true
    }

    pub fn has_next(&self) -> bool {
        self.next_target(None).is_some()
    }

    /// Step backward in play order, leaving a variation for the node it
    /// forked from when at the start of a trunk.
    pub fn previous(&mut self) -> bool {
        match self.previous_target() {
            Some(target) => {
                self.node = Some(target);
                true
            }
            None => false,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.previous_target().is_some()
    }

    /// Where `next` would land, and which variation it would pick if it has
    /// to leave the trunk.
    fn next_target(&self, variation: Option<usize>) -> Option<(NodeId, Option<(TreeId, usize)>)> {
        let node = self.current()?;
        if let Some(next) = node.next_sibling() {
            return Some((next, None));
        }
        let branch = node.parent()?;
        let tree = self.record.tree(branch);
        let index = variation.unwrap_or_else(|| tree.preferred());
        let child = *tree.trees().get(index)?;
        let first = self.record.tree(child).first_node()?;
        Some((first, Some((branch, index))))
    }

    fn previous_target(&self) -> Option<NodeId> {
        let node = self.current()?;
        if let Some(prev) = node.previous_sibling() {
            return Some(prev);
        }
        let parent = self.record.tree(node.parent()?).parent()?;
        self.record.tree(parent).last_node()
    }

    /// The path from the root to the current node.
    ///
    /// Empty if the cursor points nowhere.
    pub fn path(&self) -> NodePath {
        let Some(node) = self.node else {
            return NodePath::default();
        };
        let mut path = vec![self.record.node_position(node)];
        let mut branch = self.branch();
        if let Some(index) = branch.and_then(|b| self.record.tree_position(b)) {
            path.push(index);
        }

        let mut walker = *self;
        while walker.previous() {
            let current = walker.branch();
            if current != branch {
                branch = current;
                if let Some(index) = branch.and_then(|b| self.record.tree_position(b)) {
                    path.push(index);
                }
            }
        }
        path.reverse();
        NodePath(path)
    }

    /// Move to the node addressed by `path`, starting from the root.
    ///
    /// Chosen variations become their branches' preferred lines. Returns
    /// `false` and leaves the cursor and every preferred line as they were if
    /// the path does not address a node.
    pub fn go_to(&mut self, path: &NodePath) -> bool {
        let Some((target, choices)) = self.resolve(path) else {
            return false;
        };
        for (branch, index) in choices {
            self.record.tree(branch).set_preferred(index);
        }
        self.node = Some(target);
        true
    }

    /// The node addressed by `path`, without moving or touching preferred
    /// lines.
    pub fn find(&self, path: &NodePath) -> Option<NodeId> {
        self.resolve(path).map(|(target, _)| target)
    }

    /// Walk `path` from the root, collecting the variation taken at each fork.
    fn resolve(&self, path: &NodePath) -> Option<(NodeId, Vec<(TreeId, usize)>)> {
        let node_index = path.node_index()?;
        let mut walker = Self::at_root(self.record);
        walker.node?;
        let mut choices = Vec::with_capacity(path.variations().len());
        for &variation in path.variations() {
            while walker.next_node() {}
            let (first, choice) = walker.next_target(Some(variation))?;
            choices.extend(choice);
            walker.node = Some(first);
        }
        for _ in 0..node_index {
            if !walker.next_node() {
                return None;
            }
        }
        Some((walker.node?, choices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORKED: &str = r#"{
        "nodes": [{"C": "A"}, {"C": "B"}],
        "trees": [
            {"nodes": [{"C": "C"}, {"C": "D"}]},
            {"nodes": [{"C": "E"}], "trees": [
                {"nodes": [{"C": "F"}]},
                {"nodes": [{"C": "G"}, {"C": "H"}]}
            ]}
        ]
    }"#;

    fn comment(cursor: &GameCursor<'_>) -> String {
        cursor
            .current()
            .and_then(GameNode::comment)
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_next_descends_into_first_variation() {
        let record = GameRecord::from_json(FORKED).unwrap();
        let mut cursor = GameCursor::at_root(&record);
        assert!(cursor.next(None));
        assert_eq!(comment(&cursor), "B");
        assert!(cursor.next(None));
        assert_eq!(comment(&cursor), "C");
        assert!(cursor.previous());
        assert_eq!(comment(&cursor), "B");
    }

    #[test]
    fn test_next_node_stays_in_trunk() {
        let record = GameRecord::from_json(FORKED).unwrap();
        let mut cursor = GameCursor::at_root(&record);
        assert!(cursor.next_node());
        assert!(!cursor.next_node());
        assert_eq!(comment(&cursor), "B");
    }

    #[test]
    fn test_chosen_variation_is_remembered() {
        let record = GameRecord::from_json(FORKED).unwrap();
        let mut cursor = GameCursor::at_root(&record);
        cursor.next_node();
        assert!(cursor.next(Some(1)));
        assert_eq!(comment(&cursor), "E");
        assert_eq!(record.tree(record.root()).preferred(), 1);

        assert!(cursor.previous());
        assert!(cursor.next(None));
        assert_eq!(comment(&cursor), "E");
    }

    #[test]
    fn test_out_of_range_variation() {
        let record = GameRecord::from_json(FORKED).unwrap();
        let mut cursor = GameCursor::at_root(&record);
        cursor.next_node();
        assert!(!cursor.next(Some(2)));
        assert_eq!(comment(&cursor), "B");
        assert_eq!(record.tree(record.root()).preferred(), 0);
    }

    #[test]
    fn test_sibling_wins_over_variation_index() {
        let record = GameRecord::from_json(FORKED).unwrap();
        let mut cursor = GameCursor::at_root(&record);
        assert!(cursor.next(Some(1)));
        assert_eq!(comment(&cursor), "B");
        assert_eq!(record.tree(record.root()).preferred(), 0);
    }

    #[test]
    fn test_root_boundaries() {
        let record = GameRecord::from_json(FORKED).unwrap();
        let mut cursor = GameCursor::at_root(&record);
        assert!(!cursor.has_previous());
        assert!(!cursor.previous());
        assert_eq!(comment(&cursor), "A");
        assert!(cursor.has_next());

        let empty = GameCursor::new(&record, None);
        assert!(!empty.has_next());
        assert!(!empty.has_previous());
        assert!(empty.path().is_empty());
    }

    #[test]
    fn test_leaf_has_no_next() {
        let record = GameRecord::from_json(FORKED).unwrap();
        let mut cursor = GameCursor::at_root(&record);
        while cursor.next(None) {}
        assert_eq!(comment(&cursor), "D");
        assert!(!cursor.has_next());
        assert!(cursor.has_previous());
    }

    #[test]
    fn test_nested_variation_walks_back_to_fork() {
        let record = GameRecord::from_json(FORKED).unwrap();
        let mut cursor = GameCursor::at_root(&record);
        assert!(cursor.go_to(&NodePath::from(vec![1, 1, 1])));
        assert_eq!(comment(&cursor), "H");

        let mut seen = vec![comment(&cursor)];
        while cursor.previous() {
            seen.push(comment(&cursor));
        }
        assert_eq!(seen, vec!["H", "G", "E", "B", "A"]);
    }

    #[test]
    fn test_path_of_each_node() {
        let record = GameRecord::from_json(FORKED).unwrap();
        let cases: &[(&[usize], &str)] = &[
            (&[0], "A"),
            (&[1], "B"),
            (&[0, 0], "C"),
            (&[0, 1], "D"),
            (&[1, 0], "E"),
            (&[1, 0, 0], "F"),
            (&[1, 1, 0], "G"),
            (&[1, 1, 1], "H"),
        ];
        for &(path, expected) in cases {
            let path = NodePath::from(path.to_vec());
            let mut cursor = GameCursor::at_root(&record);
            assert!(cursor.go_to(&path), "path {path} should resolve");
            assert_eq!(comment(&cursor), expected);
            assert_eq!(cursor.path(), path);
        }
    }

    #[test]
    fn test_go_to_invalid_path_leaves_cursor() {
        let record = GameRecord::from_json(FORKED).unwrap();
        let mut cursor = GameCursor::at_root(&record);
        cursor.next_node();
        for bad in [vec![], vec![5], vec![3, 0], vec![0, 0, 0]] {
            assert!(!cursor.go_to(&NodePath::from(bad)));
            assert_eq!(comment(&cursor), "B");
        }
    }

    #[test]
    fn test_failed_go_to_keeps_preferred_lines() {
        let record = GameRecord::from_json(
            r#"{"nodes": [{"C": "A"}, {"C": "B"}],
                "trees": [{"nodes": [{"C": "X"}]}, {"nodes": [{"C": "Y"}]}]}"#,
        )
        .unwrap();
        let mut cursor = GameCursor::at_root(&record);
        assert!(!cursor.go_to(&NodePath::from(vec![1, 5])));
        assert_eq!(comment(&cursor), "A");
        assert_eq!(record.tree(record.root()).preferred(), 0);

        let mut fresh = GameCursor::at_root(&record);
        while fresh.next(None) {}
        assert_eq!(comment(&fresh), "X");
    }

    #[test]
    fn test_find_does_not_move() {
        let record = GameRecord::from_json(FORKED).unwrap();
        let cursor = GameCursor::at_root(&record);
        let found = cursor.find(&NodePath::from(vec![1, 1, 1])).unwrap();
        assert_eq!(record.node(found).comment(), Some("H"));
        assert_eq!(comment(&cursor), "A");
        assert_eq!(record.tree(record.root()).preferred(), 0);
        assert_eq!(cursor.find(&NodePath::from(vec![0, 2])), None);
    }

    #[test]
    fn test_path_text_form() {
        let path: NodePath = "1,0, 4".parse().unwrap();
        assert_eq!(path.as_slice(), &[1, 0, 4]);
        assert_eq!(path.variations(), &[1, 0]);
        assert_eq!(path.node_index(), Some(4));
        assert_eq!(path.to_string(), "1,0,4");
        assert_eq!("#2".parse::<NodePath>().unwrap().as_slice(), &[2]);
        assert!("".parse::<NodePath>().unwrap().is_empty());
        assert!("1,x".parse::<NodePath>().is_err());
    }
}
