use serde::{Deserialize, Serialize};

use crate::grid::{Grid, GRID_SIZE};
use crate::tile::TileId;

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

/// One tile's movement during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Motion {
    pub tile: TileId,
    pub from: (usize, usize),
    pub to: (usize, usize),
}

/// Cell indices for each line of travel, near end first.
///
/// Sliding is always toward index 0 of a line; a direction is nothing more
/// than the choice of row or column view, reversed for the far-edge moves.
fn oriented_lines(direction: Move) -> Vec<[usize; GRID_SIZE]> {
    let by_row = matches!(direction, Move::Left | Move::Right);
    let mut lines: Vec<[usize; GRID_SIZE]> = (0..GRID_SIZE)
        .map(|l| {
            let mut line = [0; GRID_SIZE];
            for (i, slot) in line.iter_mut().enumerate() {
                *slot = if by_row {
                    l * GRID_SIZE + i
                } else {
                    i * GRID_SIZE + l
                };
            }
            line
        })
        .collect();
    if matches!(direction, Move::Right | Move::Down) {
        for line in &mut lines {
            line.reverse();
        }
    }
    lines
}

/// Slide every tile as far as it goes in `direction`.
///
/// Tiles land directly at their final destination, no intermediate stops.
/// An equal-valued destination takes the mover into its merge slot instead
/// of its resident slot, to be folded by [`Grid::finalize_merges`] once the
/// turn's visual transitions have been acknowledged. Returns one motion per
/// moved tile, in resolution order.
pub fn slide_tiles(grid: &mut Grid, direction: Move) -> Vec<Motion> {
    let mut motions = Vec::new();
    for line in oriented_lines(direction) {
        for i in 1..line.len() {
            let Some(moving) = grid.cell(line[i]).tile() else {
                continue;
            };
            // Walk toward the near end, keeping the furthest cell that
            // still accepts the tile; stop at the first that refuses.
            let mut destination = None;
            for &near in line[..i].iter().rev() {
                if !grid.cell(near).can_accept(moving) {
                    break;
                }
                destination = Some(near);
            }
            let Some(destination) = destination else {
                continue;
            };
            let Some(tile) = grid.cell_mut(line[i]).take_tile() else {
                continue;
            };
            let id = tile.id();
            let from = tile.position();
            let target = grid.cell_mut(destination);
            if target.tile().is_some() {
                target.set_merge_tile(tile);
            } else {
                target.set_tile(tile);
            }
            motions.push(Motion {
                tile: id,
                from,
                to: (target.x(), target.y()),
            });
        }
    }
    motions
}

/// Cheap legality test: true iff some tile could take at least one step.
///
/// One step of lookahead is enough. Any tile whose immediate neighbor in
/// the travel direction accepts it is guaranteed to move during
/// resolution, and a tile with a refusing neighbor cannot move past it.
pub fn can_move(grid: &Grid, direction: Move) -> bool {
    oriented_lines(direction).iter().any(|line| {
        line.iter().enumerate().skip(1).any(|(i, &idx)| {
            match grid.cell(idx).tile() {
                Some(tile) => grid.cell(line[i - 1]).can_accept(tile),
                None => false,
            }
        })
    })
}

/// Terminal test: no direction has a legal move left.
pub fn is_game_over(grid: &Grid) -> bool {
    Move::ALL.iter().all(|&direction| !can_move(grid, direction))
}
