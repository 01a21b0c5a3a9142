//! Rules engine for a 4×4 sliding-tile merge puzzle.
//!
//! - [`Grid`] owns the cells; a [`Cell`] owns at most one resident [`Tile`]
//!   plus a transient merge occupant while a turn resolves.
//! - [`slide_tiles`] is the whole movement algorithm, one pass per line of
//!   travel; [`can_move`] and [`is_game_over`] are the legality and
//!   terminal tests built on the same acceptance rule.
//!
//! The crate is runtime-free and side-effect-free: resolution returns
//! motion/merge/spawn records and the embedding layer decides how (and how
//! long) to surface them.

mod cell;
mod grid;
mod slide;
mod tile;

pub use cell::{Cell, MergeRecord};
pub use grid::{Grid, SpawnRecord, GRID_SIZE};
pub use slide::{can_move, is_game_over, slide_tiles, Motion, Move};
pub use tile::{Tile, TileId};
