//! Randomised replay tests.
//!
//! Random records from `playout::random_record` are replayed forward and
//! backward. Seeds are fixed so failures reproduce.

use fastrand::Rng;

use eido_replay::board::{Board, Point};
use eido_replay::cursor::NodePath;
use eido_replay::gametree::{GameRecord, TreeId};
use eido_replay::playout::random_record;
use eido_replay::replay::Replay;
use eido_replay::rules::liberties;

// =============================================================================
// Helper functions
// =============================================================================

const SEEDS: [u64; 6] = [1, 2, 3, 17, 4242, 90210];

fn random_replay(seed: u64, size: usize, moves: usize, forks: usize) -> Replay {
    let mut rng = Rng::with_seed(seed);
    let data = random_record(&mut rng, size, moves, forks);
    Replay::new(GameRecord::load(&data)).unwrap()
}

fn all_paths(record: &GameRecord) -> Vec<NodePath> {
    fn walk(record: &GameRecord, tree: TreeId, prefix: &mut Vec<usize>, out: &mut Vec<NodePath>) {
        let t = record.tree(tree);
        for i in 0..t.nodes().len() {
            let mut path = prefix.clone();
            path.push(i);
            out.push(NodePath::from(path));
        }
        for (i, &child) in t.trees().iter().enumerate() {
            prefix.push(i);
            walk(record, child, prefix, out);
            prefix.pop();
        }
    }
    let mut out = Vec::new();
    walk(record, record.root(), &mut Vec::new(), &mut out);
    out
}

/// No stone on the board may belong to a group without liberties.
fn assert_no_dead_groups(board: &Board, context: &str) {
    for (pt, _) in board.stones() {
        assert!(
            liberties(board, pt) > 0,
            "{context}: group at {pt} has no liberties\n{board}"
        );
    }
}

// =============================================================================
// Forward / backward
// =============================================================================

#[test]
fn test_back_restores_every_board() {
    for seed in SEEDS {
        let mut replay = random_replay(seed, 9, 80, 3);
        let mut boards = vec![replay.board().clone()];
        while replay.forward(None).unwrap() {
            boards.push(replay.board().clone());
        }
        assert_eq!(replay.depth(), 80, "seed {seed}");

        while let Some(expected) = boards.pop() {
            assert_eq!(replay.board(), &expected, "seed {seed} depth {}", replay.depth());
            if !replay.back() {
                break;
            }
        }
        assert!(boards.is_empty(), "seed {seed}: stopped early");
        assert_eq!(replay.depth(), 0);
    }
}

#[test]
fn test_no_dead_groups_after_any_move() {
    for seed in SEEDS {
        let mut replay = random_replay(seed, 7, 120, 0);
        while replay.forward(None).unwrap() {
            assert_no_dead_groups(replay.board(), &format!("seed {seed} at {}", replay.path()));
        }
    }
}

#[test]
fn test_capture_counters_never_decrease() {
    for seed in SEEDS {
        let mut replay = random_replay(seed, 5, 100, 0);
        let mut last = replay.board().captures();
        while replay.forward(None).unwrap() {
            let now = replay.board().captures();
            assert!(now.black >= last.black && now.white >= last.white, "seed {seed}");
            let result = replay.last_result().unwrap();
            let gained = (now.black - last.black) + (now.white - last.white);
            assert_eq!(gained, result.captures, "seed {seed}");
            last = now;
        }
    }
}

#[test]
fn test_random_walk_forward_and_back() {
    for seed in SEEDS {
        let mut rng = Rng::with_seed(seed ^ 0xfeed);
        let mut replay = random_replay(seed, 9, 40, 4);
        let mut trail: Vec<Board> = Vec::new();

        for _ in 0..500 {
            if rng.bool() {
                let before = replay.board().clone();
                let variation = rng.bool().then(|| rng.usize(..2));
                if replay.forward(variation).unwrap() {
                    trail.push(before);
                }
            } else if replay.back() {
                let expected = trail.pop().expect("back without forward");
                assert_eq!(replay.board(), &expected, "seed {seed}");
            } else {
                assert!(trail.is_empty(), "seed {seed}: back refused above the root");
            }
            assert_eq!(replay.depth(), trail.len());
        }
    }
}

// =============================================================================
// Paths
// =============================================================================

#[test]
fn test_go_to_matches_manual_walk() {
    for seed in SEEDS {
        let mut replay = random_replay(seed, 9, 30, 3);
        let paths = all_paths(replay.record());
        for path in paths {
            replay.go_to(&path).unwrap();
            assert_eq!(replay.path(), path, "seed {seed}");
            let board = replay.board().clone();

            // walk back to the root and forward again along the same line
            let depth = replay.depth();
            while replay.back() {}
            for _ in 0..depth {
                assert!(replay.forward(None).unwrap());
            }
            assert_eq!(replay.path(), path, "seed {seed}");
            assert_eq!(replay.board(), &board, "seed {seed} path {path}");
        }
    }
}

#[test]
fn test_path_text_round_trip_from_random_positions() {
    let mut rng = Rng::with_seed(5);
    let mut replay = random_replay(77, 9, 50, 5);
    for _ in 0..50 {
        while replay.forward(rng.bool().then(|| rng.usize(..2))).unwrap() {
            if rng.u8(..4) == 0 {
                break;
            }
        }
        let text = replay.path().to_string();
        let parsed: NodePath = text.parse().unwrap();
        let stones: Vec<(Point, _)> = replay.board().stones().collect();

        replay.go_to(&parsed).unwrap();
        assert_eq!(replay.path().to_string(), text);
        assert_eq!(replay.board().stones().collect::<Vec<_>>(), stones);
        replay.reset().unwrap();
    }
}
