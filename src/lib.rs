//! Eido-Replay: a replay engine for recorded games of Go.
//!
//! A game record is a branching tree of moves. This crate loads such a
//! record, walks it forward and backward across variations, and keeps a board
//! in step with the walk by resolving captures exactly as the rules of Go do.
//!
//! ## Modules
//!
//! - [`constants`] - Board size limits and property keys
//! - [`board`] - Board state, points and capture counters
//! - [`rules`] - Capture engine (group liberty search, suicide)
//! - [`gametree`] - Arena-backed game record: nodes, branches, variations
//! - [`cursor`] - Navigation in play order, node paths
//! - [`replay`] - Board + record session with exact undo
//! - [`playout`] - Random record generation
//! - [`error`] - Error type
//!
//! ## Example
//!
//! ```
//! use eido_replay::gametree::GameRecord;
//! use eido_replay::replay::Replay;
//!
//! let json = r#"{
//!     "nodes": [{"SZ": "9", "AW": ["de", "fe", "ed"]}, {"B": "ee"}, {"W": "ef"}],
//!     "trees": []
//! }"#;
//! let mut replay = Replay::new(GameRecord::from_json(json).unwrap()).unwrap();
//! replay.forward(None).unwrap();
//! replay.forward(None).unwrap();
//! assert_eq!(replay.board().captures().white, 1);
//! ```

pub mod board;
pub mod constants;
pub mod cursor;
pub mod error;
pub mod gametree;
pub mod playout;
pub mod replay;
pub mod rules;

pub use error::{Error, Result};
