// engine/src/world/grid.rs
#![forbid(unsafe_code)]

use thiserror::Error;

use super::constants::{GRID_H, GRID_W};
use super::tile::Tile;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum GridShapeError {
    #[error("expected {GRID_H} rows, got {0}")]
    Rows(usize),
    #[error("row {row}: expected {GRID_W} columns, got {cols}")]
    Cols { row: usize, cols: usize },
}

/// Screen-relative snapshot of the game area. Read-only input for one step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TileGrid {
    cells: [[Tile; GRID_W]; GRID_H],
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::empty()
    }
}

impl TileGrid {
    pub fn empty() -> Self {
        Self {
            cells: [[Tile::Empty; GRID_W]; GRID_H],
        }
    }

    pub fn from_code_rows(rows: &[[u8; GRID_W]; GRID_H]) -> Self {
        let mut cells = [[Tile::Empty; GRID_W]; GRID_H];
        for r in 0..GRID_H {
            for c in 0..GRID_W {
                cells[r][c] = Tile::from_code(rows[r][c]);
            }
        }
        Self { cells }
    }

    /// Build from dynamically sized rows (e.g. decoded JSON). Shape must match exactly.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridShapeError> {
        if rows.len() != GRID_H {
            return Err(GridShapeError::Rows(rows.len()));
        }
        let mut cells = [[Tile::Empty; GRID_W]; GRID_H];
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != GRID_W {
                return Err(GridShapeError::Cols {
                    row: r,
                    cols: row.len(),
                });
            }
            for (c, &code) in row.iter().enumerate() {
                cells[r][c] = Tile::from_code(code);
            }
        }
        Ok(Self { cells })
    }

    pub fn to_code_rows(&self) -> [[u8; GRID_W]; GRID_H] {
        let mut out = [[0u8; GRID_W]; GRID_H];
        for r in 0..GRID_H {
            for c in 0..GRID_W {
                out[r][c] = self.cells[r][c].code();
            }
        }
        out
    }

    /// Signed lookup. Anything outside the view is `None` (no wrap-around).
    #[inline]
    pub fn at(&self, row: i32, col: i32) -> Option<Tile> {
        if row < 0 || col < 0 || row >= GRID_H as i32 || col >= GRID_W as i32 {
            return None;
        }
        Some(self.cells[row as usize][col as usize])
    }

    #[inline]
    pub fn is(&self, row: i32, col: i32, tile: Tile) -> bool {
        self.at(row, col) == Some(tile)
    }

    /// Fixture helper. The decision core never writes to a grid.
    pub fn set(&mut self, row: usize, col: usize, tile: Tile) {
        self.cells[row][col] = tile;
    }

    /// (row, col, tile), top to bottom, then left to right.
    pub fn iter_row_major(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        (0..GRID_H).flat_map(move |r| (0..GRID_W).map(move |c| (r, c, self.cells[r][c])))
    }

    /// (row, col, tile), left to right, then top to bottom within a column.
    pub fn iter_column_major(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        (0..GRID_W).flat_map(move |c| (0..GRID_H).map(move |r| (r, c, self.cells[r][c])))
    }

    pub fn render_ascii(&self) -> String {
        let border = format!("+{}+\n", "-".repeat(GRID_W));
        let mut s = String::with_capacity((GRID_W + 3) * (GRID_H + 2));
        s.push_str(&border);
        for row in &self.cells {
            s.push('|');
            for &t in row {
                s.push(t.glyph());
            }
            s.push_str("|\n");
        }
        s.push_str(&border);
        s
    }
}
