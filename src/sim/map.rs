//! Static tile grid the arena is built on
//!
//! The layout is fixed: a walled border plus two horizontal and two vertical
//! interior wall segments. Movement and projectile checks are tile-granular.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAP_COLS, MAP_ROWS, TILE_SIZE};

/// A single map tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Open,
    Wall,
}

/// Immutable tile grid, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMap {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Default for GridMap {
    fn default() -> Self {
        Self::arena()
    }
}

impl GridMap {
    /// Build the fixed arena layout
    pub fn arena() -> Self {
        let mut map = Self {
            cols: MAP_COLS,
            rows: MAP_ROWS,
            cells: vec![Cell::Open; MAP_COLS * MAP_ROWS],
        };

        for x in 0..MAP_COLS {
            map.set_wall(x, 0);
            map.set_wall(x, MAP_ROWS - 1);
        }
        for y in 0..MAP_ROWS {
            map.set_wall(0, y);
            map.set_wall(MAP_COLS - 1, y);
        }

        for x in 5..=9 {
            map.set_wall(x, 3);
            map.set_wall(x, 8);
        }
        for y in 4..=8 {
            map.set_wall(7, y);
            map.set_wall(12, y);
        }

        map
    }

    fn set_wall(&mut self, x: usize, y: usize) {
        self.cells[y * self.cols + x] = Cell::Wall;
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Whether a tile coordinate lies on the grid
    #[inline]
    pub fn in_bounds(&self, tile_x: i32, tile_y: i32) -> bool {
        tile_x >= 0 && tile_y >= 0 && (tile_x as usize) < self.cols && (tile_y as usize) < self.rows
    }

    /// Cell at a tile coordinate, `None` off the grid
    pub fn cell(&self, tile_x: i32, tile_y: i32) -> Option<Cell> {
        if self.in_bounds(tile_x, tile_y) {
            Some(self.cells[tile_y as usize * self.cols + tile_x as usize])
        } else {
            None
        }
    }

    /// Off-grid tiles are open: callers outside the grid are never blocked by it
    pub fn is_wall(&self, tile_x: i32, tile_y: i32) -> bool {
        self.cell(tile_x, tile_y) == Some(Cell::Wall)
    }

    /// Tile containing a world position (truncates toward zero)
    #[inline]
    pub fn tile_of(pos: Vec2) -> (i32, i32) {
        ((pos.x / TILE_SIZE) as i32, (pos.y / TILE_SIZE) as i32)
    }

    /// Cell under a world position, `Open` off the grid
    pub fn cell_at(&self, pos: Vec2) -> Cell {
        let (tx, ty) = Self::tile_of(pos);
        self.cell(tx, ty).unwrap_or(Cell::Open)
    }

    #[inline]
    pub fn is_wall_at(&self, pos: Vec2) -> bool {
        self.cell_at(pos) == Cell::Wall
    }

    /// One row of cells, for static drawing
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.cols..(y + 1) * self.cols]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_is_walled() {
        let map = GridMap::arena();
        for x in 0..MAP_COLS as i32 {
            assert!(map.is_wall(x, 0));
            assert!(map.is_wall(x, MAP_ROWS as i32 - 1));
        }
        for y in 0..MAP_ROWS as i32 {
            assert!(map.is_wall(0, y));
            assert!(map.is_wall(MAP_COLS as i32 - 1, y));
        }
    }

    #[test]
    fn test_interior_layout() {
        let map = GridMap::arena();
        for x in 5..=9 {
            assert!(map.is_wall(x, 3));
            assert!(map.is_wall(x, 8));
        }
        for y in 4..=8 {
            assert!(map.is_wall(7, y));
            assert!(map.is_wall(12, y));
        }
        assert!(!map.is_wall(4, 3));
        assert!(!map.is_wall(10, 3));
        assert!(!map.is_wall(3, 3));
        assert!(!map.is_wall(12, 3));
        assert!(!map.is_wall(12, 9));

        // 52 border cells + 5 + 5 + 4 (col 7 shares a cell with row 8) + 5
        let walls = (0..map.rows())
            .flat_map(|y| map.row(y).iter())
            .filter(|c| **c == Cell::Wall)
            .count();
        assert_eq!(walls, 71);
    }

    #[test]
    fn test_out_of_bounds_is_open() {
        let map = GridMap::arena();
        assert!(!map.in_bounds(-1, 0));
        assert!(!map.in_bounds(16, 0));
        assert!(!map.in_bounds(0, 12));
        assert!(!map.is_wall(-1, 5));
        assert!(!map.is_wall(100, 100));
        assert_eq!(map.cell(16, 0), None);
        assert_eq!(map.cell_at(Vec2::new(2000.0, 100.0)), Cell::Open);
    }

    #[test]
    fn test_tile_of() {
        assert_eq!(GridMap::tile_of(Vec2::new(200.0, 200.0)), (3, 3));
        assert_eq!(GridMap::tile_of(Vec2::new(63.9, 64.0)), (0, 1));
        assert_eq!(GridMap::tile_of(Vec2::new(1023.0, 767.0)), (15, 11));
        // Truncation, not floor
        assert_eq!(GridMap::tile_of(Vec2::new(-10.0, 10.0)), (0, 0));
    }

    #[test]
    fn test_world_queries() {
        let map = GridMap::arena();
        assert!(map.is_wall_at(Vec2::new(10.0, 10.0)));
        assert!(map.is_wall_at(Vec2::new(7.5 * TILE_SIZE, 5.5 * TILE_SIZE)));
        assert!(!map.is_wall_at(Vec2::new(200.0, 200.0)));
    }
}
