//! Replay session: a game record, the board it produces, and undo history.
//!
//! [`Replay`] drives the capture engine from the record. Every node is
//! applied in two steps: setup stones (`AB`/`AW`/`AE`) are written straight to
//! the board, then the node's move is played through [`rules::play`]. A stack
//! of board snapshots makes [`Replay::back`] exact, whatever was captured.
//!
//! ## Example
//!
//! ```
//! use eido_replay::gametree::GameRecord;
//! use eido_replay::replay::Replay;
//!
//! let record = GameRecord::from_json(
//!     r#"{"nodes": [{"SZ": "9"}, {"B": "ee"}, {"W": "ef"}]}"#,
//! ).unwrap();
//! let mut replay = Replay::new(record).unwrap();
//! while replay.forward(None).unwrap() {}
//! assert_eq!(replay.path().to_string(), "2");
//! ```

use log::{debug, trace};

use crate::board::{Board, Color, Point};
use crate::constants::{
    DEFAULT_BOARD_SIZE, PROP_ADD_BLACK, PROP_ADD_EMPTY, PROP_ADD_WHITE, PROP_SIZE,
};
use crate::cursor::{GameCursor, NodePath};
use crate::error::{Error, Result};
use crate::gametree::{GameNode, GameRecord, NodeId, PropValue};
use crate::rules::{self, MoveResult};

pub struct Replay {
    record: GameRecord,
    board: Board,
    position: Option<NodeId>,
    /// Board before each applied node, root excluded.
    history: Vec<Board>,
    last_result: Option<MoveResult>,
}

impl Replay {
    /// Start a replay at the record's first node, sized from its `SZ`
    /// property or [`DEFAULT_BOARD_SIZE`].
    pub fn new(record: GameRecord) -> Result<Self> {
        let size = record_size(&record)?.unwrap_or(DEFAULT_BOARD_SIZE);
        Self::with_size(record, size)
    }

    /// Start a replay on a board of `size`, ignoring the record's `SZ`.
    pub fn with_size(record: GameRecord, size: usize) -> Result<Self> {
        let mut replay = Self {
            board: Board::with_size(size)?,
            record,
            position: None,
            history: Vec::new(),
            last_result: None,
        };
        replay.reset()?;
        Ok(replay)
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The node whose position is on the board.
    pub fn node(&self) -> Option<&GameNode> {
        self.position.map(|n| self.record.node(n))
    }

    pub fn cursor(&self) -> GameCursor<'_> {
        GameCursor::new(&self.record, self.position)
    }

    /// Capture outcome of the current node's move, if it had one.
    pub fn last_result(&self) -> Option<MoveResult> {
        self.last_result
    }

    /// Number of nodes played since the root.
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    pub fn path(&self) -> NodePath {
        self.cursor().path()
    }

    /// Clear the board and apply the record's first node.
    pub fn reset(&mut self) -> Result<()> {
        self.board.clear();
        self.history.clear();
        self.position = self.record.tree(self.record.root()).first_node();
        self.last_result = match self.position {
            Some(root) => apply_node(&mut self.board, self.record.node(root))?,
            None => None,
        };
        Ok(())
    }

    /// Advance one node in play order (see [`GameCursor::next`]).
    ///
    /// Returns `Ok(false)` at the end of a line. If the next node holds a
    /// malformed coordinate the error is returned and nothing changes.
    pub fn forward(&mut self, variation: Option<usize>) -> Result<bool> {
        let mut cursor = GameCursor::new(&self.record, self.position);
        if !cursor.next(variation) {
            return Ok(false);
        }
        let Some(next) = cursor.node() else {
            return Ok(false);
        };

        let mut board = self.board.clone();
        let result = apply_node(&mut board, self.record.node(next))?;
        self.history.push(std::mem::replace(&mut self.board, board));
        self.position = Some(next);
        self.last_result = result;
        trace!("forward to {}", cursor.path());
        Ok(true)
    }

    /// Step back one node, restoring the board exactly as it was.
    pub fn back(&mut self) -> bool {
        let mut cursor = GameCursor::new(&self.record, self.position);
        if !cursor.previous() {
            return false;
        }
        let Some(board) = self.history.pop() else {
            return false;
        };
        self.board = board;
        self.position = cursor.node();
        self.last_result = None;
        trace!("back to {}", cursor.path());
        true
    }

    /// Replay from the root to the node addressed by `path`.
    ///
    /// The line is replayed on a scratch board; on any error the session
    /// keeps its position, board and preferred lines.
    pub fn go_to(&mut self, path: &NodePath) -> Result<()> {
        let Some(target) = GameCursor::at_root(&self.record).find(path) else {
            return Err(Error::PathNotFound {
                path: path.to_string(),
            });
        };

        let mut line = vec![target];
        let mut walker = GameCursor::new(&self.record, Some(target));
        while walker.previous() {
            line.extend(walker.node());
        }
        line.reverse();

        let mut board = self.board.clone();
        board.clear();
        let mut history = Vec::with_capacity(line.len());
        let mut last_result = None;
        for (i, &node) in line.iter().enumerate() {
            if i > 0 {
                history.push(board.clone());
            }
            last_result = apply_node(&mut board, self.record.node(node))?;
        }

        // record the chosen variations as preferred lines
        GameCursor::at_root(&self.record).go_to(path);
        self.board = board;
        self.history = history;
        self.position = Some(target);
        self.last_result = last_result;
        debug!("jumped to {path} at depth {}", self.depth());
        Ok(())
    }
}

/// Board size named by the record's first node, if any.
fn record_size(record: &GameRecord) -> Result<Option<usize>> {
    let Some(root) = record.tree(record.root()).first_node() else {
        return Ok(None);
    };
    let Some(value) = record.node(root).property(PROP_SIZE).and_then(PropValue::as_str) else {
        return Ok(None);
    };
    // rectangular boards ("19:13") are not supported; take the width
    let width = value.split(':').next().unwrap_or(value).trim();
    match width.parse::<usize>() {
        Ok(size) => Ok(Some(size)),
        Err(_) => Err(Error::InvalidProperty {
            name: PROP_SIZE.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Apply one node's setup stones and move to `board`.
fn apply_node(board: &mut Board, node: &GameNode) -> Result<Option<MoveResult>> {
    let size = board.size();
    for (prop, stone) in [
        (PROP_ADD_BLACK, Some(Color::Black)),
        (PROP_ADD_WHITE, Some(Color::White)),
        (PROP_ADD_EMPTY, None),
    ] {
        let Some(values) = node.property(prop).map(PropValue::values) else {
            continue;
        };
        for value in values {
            for pt in Point::expand_sgf(value, size)? {
                board.set(pt, stone);
            }
        }
    }

    let Some((color, coord)) = node.get_move() else {
        return Ok(None);
    };
    match Point::from_sgf(coord, size)? {
        Some(pt) => Ok(Some(rules::play(board, pt, color))),
        None => {
            trace!("{color:?} passes");
            Ok(Some(MoveResult::default()))
        }
    }
}
