//! Random game records.
//!
//! Generates plausible branching records for the demo and for stress tests:
//! colors alternate, every move lands on a point that is empty at that moment
//! in its own line, and captures happen as the rules engine dictates.

use fastrand::Rng;

use crate::board::{Board, Color, Point};
use crate::constants::{PROP_BLACK, PROP_SIZE, PROP_WHITE};
use crate::gametree::{Properties, TreeRecord};
use crate::rules;

/// Probability that a generated move is a pass.
const PASS_PROB: f64 = 0.02;

/// Variations created at each fork.
const FORK_WIDTH: usize = 2;

/// Build a record with a root node (`SZ`) followed by `moves` moves along
/// every line, forking into variations `forks` times along the main line.
///
/// Fewer forks are made when `moves` is too short to hold them all.
///
/// # Panics
///
/// Panics if `size` is outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
pub fn random_record(rng: &mut Rng, size: usize, moves: usize, forks: usize) -> TreeRecord {
    let mut board = Board::new(size);
    let mut record = random_tree(rng, &mut board, Color::Black, moves, forks);
    let mut root = Properties::new();
    root.insert(PROP_SIZE.to_string(), size.to_string().into());
    record.nodes.insert(0, root);
    record
}

fn random_tree(
    rng: &mut Rng,
    board: &mut Board,
    mut color: Color,
    moves: usize,
    forks: usize,
) -> TreeRecord {
    // leave at least one move per remaining fork below this one
    let trunk = if forks > 0 && moves > forks {
        rng.usize(1..=moves - forks)
    } else {
        moves
    };

    let mut record = TreeRecord::default();
    for _ in 0..trunk {
        record.nodes.push(random_move(rng, board, color));
        color = color.opponent();
    }

    let rest = moves - trunk;
    if forks > 0 && rest > 0 {
        for i in 0..FORK_WIDTH {
            let mut line = board.clone();
            let sub_forks = if i == 0 { forks - 1 } else { 0 };
            record
                .trees
                .push(random_tree(rng, &mut line, color, rest, sub_forks));
        }
    }
    record
}

/// Play a random move for `color` and return it as node properties.
fn random_move(rng: &mut Rng, board: &mut Board, color: Color) -> Properties {
    let size = board.size();
    let empty: Vec<Point> = (0..size * size)
        .map(|i| Point::new(i % size, i / size))
        .filter(|&p| board.get(p).is_none())
        .collect();

    let coord = if empty.is_empty() || rng.f64() < PASS_PROB {
        String::new()
    } else {
        let pt = empty[rng.usize(..empty.len())];
        rules::play(board, pt, color);
        pt.to_sgf()
    };

    let key = match color {
        Color::Black => PROP_BLACK,
        Color::White => PROP_WHITE,
    };
    let mut props = Properties::new();
    props.insert(key.to_string(), coord.into());
    props
}
