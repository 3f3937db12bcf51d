//! Capture engine.
//!
//! Called right after a stone has been written to the board. Removes every
//! opposing group left without liberties, then removes the placed stone's own
//! group if the move was a suicide. Legality (ko, occupied points) is not
//! checked here: a replayed record is taken as given.

use log::debug;

use crate::board::{Board, Color, Point};

/// What a stone placement did to the board.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// Opposing stones removed (credited to the placing color).
    pub captures: usize,
    /// Own stones removed because the move was a suicide (credited to nobody).
    pub suicide: usize,
}

impl MoveResult {
    pub fn is_suicide(&self) -> bool {
        self.suicide > 0
    }
}

/// Write a stone of `color` at `pt` and resolve captures.
///
/// Off-board points are ignored.
pub fn play(board: &mut Board, pt: Point, color: Color) -> MoveResult {
    if !board.contains(pt) {
        return MoveResult::default();
    }
    board.set(pt, Some(color));
    apply(board, pt, color)
}

/// Resolve captures for a stone of `color` that was just placed at `pt`.
///
/// Opposing groups touching `pt` are checked first, so a move that captures
/// is never a suicide. Only opponent stones count towards `color`'s capture
/// counter.
pub fn apply(board: &mut Board, pt: Point, color: Color) -> MoveResult {
    let size = board.size();
    let captures: usize = pt
        .neighbors(size)
        .map(|n| capture_group(board, n, color))
        .sum();
    let suicide = capture_group(board, pt, color.opponent());

    board.add_captures(color, captures);
    if suicide > 0 {
        debug!("suicide at {pt} removed {suicide} {:?} stone(s)", color);
    }
    MoveResult { captures, suicide }
}

/// Remove the group at `pt` if it has no liberties, from the point of view of
/// `color` (the side that would be capturing).
///
/// Returns the number of stones removed. Off-board points, empty points and
/// stones of `color` itself are no-ops. The search stops at the first
/// liberty it finds; the visited set lives only for this call.
pub fn capture_group(board: &mut Board, pt: Point, color: Color) -> usize {
    let Some(group) = board.get(pt) else {
        return 0;
    };
    if group == color {
        return 0;
    }

    let size = board.size();
    let mut visited = vec![false; size * size];
    let mut pending: Vec<Point> = Vec::new();
    let mut stack = vec![pt];
    visited[board.idx(pt)] = true;

    while let Some(p) = stack.pop() {
        pending.push(p);
        for n in p.neighbors(size) {
            match board.get(n) {
                // a liberty: the whole group lives
                None => return 0,
                Some(c) if c == group => {
                    let i = board.idx(n);
                    if !visited[i] {
                        visited[i] = true;
                        stack.push(n);
                    }
                }
                Some(_) => {}
            }
        }
    }

    for &p in &pending {
        board.set(p, None);
    }
    debug!("captured {} {:?} stone(s) at {pt}", pending.len(), group);
    pending.len()
}

/// Number of distinct liberties of the group at `pt` (0 for an empty point).
pub fn liberties(board: &Board, pt: Point) -> usize {
    let Some(group) = board.get(pt) else {
        return 0;
    };
    let size = board.size();
    let mut visited = vec![false; size * size];
    let mut liberty_visited = vec![false; size * size];
    let mut stack = vec![pt];
    visited[board.idx(pt)] = true;
    let mut libs = 0;

    while let Some(p) = stack.pop() {
        for n in p.neighbors(size) {
            let i = board.idx(n);
            match board.get(n) {
                None => {
                    if !liberty_visited[i] {
                        liberty_visited[i] = true;
                        libs += 1;
                    }
                }
                Some(c) if c == group && !visited[i] => {
                    visited[i] = true;
                    stack.push(n);
                }
                _ => {}
            }
        }
    }
    libs
}
