use std::fmt;

use rand::Rng;

use crate::cell::{Cell, MergeRecord};
use crate::tile::{Tile, TileId};

/// Board edge length. The grid is always `GRID_SIZE` × `GRID_SIZE`.
pub const GRID_SIZE: usize = 4;

/// Fixed 4×4 collection of cells, row-major.
///
/// Cells are created once and live for the whole game; tiles come and go.
/// Row and column views are derived on demand, there is no second storage.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    next_tile_id: u32,
}

/// A tile freshly placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnRecord {
    pub tile: TileId,
    pub value: u32,
    pub x: usize,
    pub y: usize,
}

impl Grid {
    pub fn new() -> Self {
        let cells = (0..GRID_SIZE * GRID_SIZE)
            .map(|idx| Cell::new(idx % GRID_SIZE, idx / GRID_SIZE))
            .collect();
        Self {
            cells,
            next_tile_id: 0,
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn cell_at(&self, x: usize, y: usize) -> &Cell {
        &self.cells[y * GRID_SIZE + x]
    }

    pub(crate) fn cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    pub(crate) fn cell_mut(&mut self, idx: usize) -> &mut Cell {
        &mut self.cells[idx]
    }

    /// Rows top to bottom, each ordered by x ascending.
    pub fn rows(&self) -> Vec<Vec<&Cell>> {
        (0..GRID_SIZE)
            .map(|y| (0..GRID_SIZE).map(|x| self.cell_at(x, y)).collect())
            .collect()
    }

    /// Columns left to right, each ordered by y ascending.
    pub fn columns(&self) -> Vec<Vec<&Cell>> {
        (0..GRID_SIZE)
            .map(|x| (0..GRID_SIZE).map(|y| self.cell_at(x, y)).collect())
            .collect()
    }

    /// Uniformly pick one empty cell, or `None` if the board is full.
    pub fn random_empty_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(usize, usize)> {
        let empty: Vec<&Cell> = self.cells.iter().filter(|c| c.is_empty()).collect();
        if empty.is_empty() {
            return None;
        }
        let cell = empty[rng.gen_range(0..empty.len())];
        Some((cell.x(), cell.y()))
    }

    /// Spawn a tile at a random empty cell, using the provided RNG.
    ///
    /// The tile's value is 4 with probability `four_chance` and 2
    /// otherwise. Returns `None` when no empty cell exists; a caller that
    /// just completed a move may rely on at least one cell having been
    /// vacated.
    pub fn spawn_random<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        four_chance: f64,
    ) -> Option<SpawnRecord> {
        let (x, y) = self.random_empty_cell(rng)?;
        let value = if rng.gen_bool(four_chance) { 4 } else { 2 };
        let tile = self.place_tile(x, y, value);
        Some(SpawnRecord { tile, value, x, y })
    }

    /// Put a tile of `value` at `(x, y)`, replacing any resident.
    ///
    /// Deterministic escape hatch for setting up positions (tests, tools);
    /// gameplay goes through [`Grid::spawn_random`].
    pub fn place_tile(&mut self, x: usize, y: usize, value: u32) -> TileId {
        let id = TileId(self.next_tile_id);
        self.next_tile_id += 1;
        let tile = Tile::new(id, value, x, y);
        self.cells[y * GRID_SIZE + x].set_tile(tile);
        id
    }

    /// Snapshot of resident tile values, indexed `[y][x]`, 0 for empty.
    pub fn tile_values(&self) -> [[u32; GRID_SIZE]; GRID_SIZE] {
        let mut out = [[0; GRID_SIZE]; GRID_SIZE];
        for cell in &self.cells {
            if let Some(tile) = cell.tile() {
                out[cell.y()][cell.x()] = tile.value();
            }
        }
        out
    }

    /// Fold every pending merge into its resident tile, one record per
    /// merge so callers can report the doubled value and the destroyed
    /// tile.
    pub fn finalize_merges(&mut self) -> Vec<MergeRecord> {
        self.cells.iter_mut().filter_map(Cell::merge_pending).collect()
    }

    /// Largest tile value on the board (0 when empty).
    pub fn highest_tile(&self) -> u32 {
        self.cells
            .iter()
            .filter_map(|c| c.tile().map(Tile::value))
            .max()
            .unwrap_or(0)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.tile_values();
        for (y, row) in values.iter().enumerate() {
            if y > 0 {
                writeln!(f, "{}", "-".repeat(GRID_SIZE * 7 - 1))?;
            }
            let line: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: u32) -> String {
    if val == 0 {
        " ".repeat(6)
    } else {
        format!("{val:^6}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rows_and_columns_are_derived_views() {
        let mut grid = Grid::new();
        grid.place_tile(2, 1, 8);
        grid.place_tile(0, 3, 16);

        let rows = grid.rows();
        assert_eq!(rows.len(), GRID_SIZE);
        assert_eq!(rows[1][2].tile().map(Tile::value), Some(8));
        assert_eq!(rows[3][0].tile().map(Tile::value), Some(16));

        let columns = grid.columns();
        assert_eq!(columns[2][1].tile().map(Tile::value), Some(8));
        assert_eq!(columns[0][3].tile().map(Tile::value), Some(16));
    }

    #[test]
    fn random_empty_cell_only_returns_empty_cells() {
        let mut grid = Grid::new();
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                if (x, y) != (2, 3) {
                    grid.place_tile(x, y, 2);
                }
            }
        }
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..8 {
            assert_eq!(grid.random_empty_cell(&mut rng), Some((2, 3)));
        }

        grid.place_tile(2, 3, 2);
        assert_eq!(grid.random_empty_cell(&mut rng), None);
        assert!(grid.spawn_random(&mut rng, 0.5).is_none());
    }

    #[test]
    fn spawn_value_follows_four_chance() {
        let mut rng = StdRng::seed_from_u64(1);

        let mut grid = Grid::new();
        for _ in 0..8 {
            let spawn = grid.spawn_random(&mut rng, 0.0).expect("room to spawn");
            assert_eq!(spawn.value, 2);
        }

        let mut grid = Grid::new();
        for _ in 0..8 {
            let spawn = grid.spawn_random(&mut rng, 1.0).expect("room to spawn");
            assert_eq!(spawn.value, 4);
        }
    }

    #[test]
    fn spawned_tiles_land_where_reported() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut grid = Grid::new();
        let spawn = grid.spawn_random(&mut rng, 0.5).expect("room to spawn");
        let cell = grid.cell_at(spawn.x, spawn.y);
        let tile = cell.tile().expect("spawned tile is resident");
        assert_eq!(tile.id(), spawn.tile);
        assert_eq!(tile.value(), spawn.value);
        assert_eq!(tile.position(), (spawn.x, spawn.y));
    }

    #[test]
    fn place_tile_hands_out_fresh_ids() {
        let mut grid = Grid::new();
        let a = grid.place_tile(0, 0, 2);
        let b = grid.place_tile(1, 0, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn highest_tile_scans_the_whole_board() {
        let mut grid = Grid::new();
        assert_eq!(grid.highest_tile(), 0);
        grid.place_tile(0, 0, 2);
        grid.place_tile(3, 3, 64);
        grid.place_tile(1, 2, 16);
        assert_eq!(grid.highest_tile(), 64);
    }
}
