//! Constants for board geometry, SGF coordinates, and node property keys.
//!
//! Board size is a runtime value in this crate (a game record can carry its
//! own `SZ`), so only the limits and the fallback live here.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size used when neither the caller nor the record names one.
pub const DEFAULT_BOARD_SIZE: usize = 19;

/// Smallest accepted board.
pub const MIN_BOARD_SIZE: usize = 1;

/// Largest board addressable with SGF letter coordinates (`a`-`z`, `A`-`Z`).
pub const MAX_BOARD_SIZE: usize = 52;

/// Boards up to this size treat the coordinate `tt` as a pass.
pub const TT_PASS_MAX_SIZE: usize = 19;

/// Legacy SGF pass coordinate.
pub const SGF_PASS: &str = "tt";

// =============================================================================
// Node Properties
// =============================================================================

/// Relational field names that generic property assignment must never touch.
pub const RESERVED_PROPERTIES: [&str; 3] = ["parent", "nextSibling", "previousSibling"];

/// Black move.
pub const PROP_BLACK: &str = "B";

/// White move.
pub const PROP_WHITE: &str = "W";

/// Comment text.
pub const PROP_COMMENT: &str = "C";

/// Setup: add black stones.
pub const PROP_ADD_BLACK: &str = "AB";

/// Setup: add white stones.
pub const PROP_ADD_WHITE: &str = "AW";

/// Setup: clear points.
pub const PROP_ADD_EMPTY: &str = "AE";

/// Board size (root node only).
pub const PROP_SIZE: &str = "SZ";

/// Point labels, `"pt:text"`.
pub const PROP_LABEL: &str = "LB";
