use serde::{Serialize, Serializer};

use super::{CELL_COUNT, PIXEL_WIDTH, TRANSLATED_WIDTH};

/// Position of a single cell inside the 20x20 grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellIndex {
    /// Zero-based row, top to bottom.
    pub row: usize,
    /// Zero-based column, left to right.
    pub col: usize,
}

impl CellIndex {
    /// Map a surface coordinate to the cell beneath it.
    ///
    /// Returns `None` for any point outside the surface, including points
    /// whose flat index would still land inside the bitmap after wrapping.
    /// Row and column are bounded separately, so (205, 15) is rejected even
    /// though a flat-index check would paint it into row 2.
    pub fn from_point(x: f32, y: f32) -> Option<Self> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let col = (x / PIXEL_WIDTH).floor();
        let row = (y / PIXEL_WIDTH).floor();
        let limit = TRANSLATED_WIDTH as f32;
        if col < 0.0 || row < 0.0 || col >= limit || row >= limit {
            return None;
        }
        Some(Self {
            row: row as usize,
            col: col as usize,
        })
    }

    /// Row-major index into the flat bitmap.
    pub fn flat(self) -> usize {
        self.row * TRANSLATED_WIDTH + self.col
    }

    /// Inverse of [`CellIndex::flat`].
    pub fn from_flat(index: usize) -> Option<Self> {
        (index < CELL_COUNT).then(|| Self {
            row: index / TRANSLATED_WIDTH,
            col: index % TRANSLATED_WIDTH,
        })
    }

    /// Top-left corner of the cell in surface units.
    pub fn origin(self) -> (f32, f32) {
        (
            self.col as f32 * PIXEL_WIDTH,
            self.row as f32 * PIXEL_WIDTH,
        )
    }
}

/// Fixed 20x20 grid of binary cells, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalBitmap {
    cells: Vec<u8>,
}

impl Default for LogicalBitmap {
    fn default() -> Self {
        Self::new()
    }
}

impl LogicalBitmap {
    /// All-blank bitmap.
    pub fn new() -> Self {
        Self {
            cells: vec![0; CELL_COUNT],
        }
    }

    /// Paint the cell under a surface coordinate.
    ///
    /// Returns the painted cell, or `None` when the point is off the surface
    /// and nothing changed.
    pub fn paint_at(&mut self, x: f32, y: f32) -> Option<CellIndex> {
        let cell = CellIndex::from_point(x, y)?;
        self.cells[cell.flat()] = 1;
        Some(cell)
    }

    pub fn is_painted(&self, cell: CellIndex) -> bool {
        self.cells.get(cell.flat()).is_some_and(|value| *value == 1)
    }

    /// True when no cell has been painted.
    pub fn is_blank(&self) -> bool {
        !self.cells.contains(&1)
    }

    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|value| **value == 1).count()
    }

    /// Iterate painted cells in row-major order.
    pub fn painted_cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, value)| **value == 1)
            .filter_map(|(index, _)| CellIndex::from_flat(index))
    }

    /// Zero every cell.
    pub fn reset(&mut self) {
        self.cells.fill(0);
    }

    /// Raw row-major cell values.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Detached copy taken at submission time.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}

impl Serialize for LogicalBitmap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.cells.iter())
    }
}
