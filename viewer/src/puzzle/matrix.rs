// puzzle/matrix.rs - Rectangular matrix of building heights

use serde::{Deserialize, Serialize};

use super::{PuzzleError, Result};

/// Rows of non-negative cell values; every row has the same length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct PuzzleMatrix {
    rows: Vec<Vec<u32>>,
}

impl PuzzleMatrix {
    /// Rejects empty and ragged input
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self> {
        let expected = rows.first().map(Vec::len).ok_or(PuzzleError::EmptyMatrix)?;
        if expected == 0 {
            return Err(PuzzleError::EmptyMatrix);
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(PuzzleError::NonRectangularMatrix { row, expected, actual: r.len() });
        }
        Ok(Self { rows })
    }

    /// Row-major values into rows of `cols`. Caller guarantees `values.len() % cols == 0`.
    pub(crate) fn from_row_major(values: &[u32], cols: usize) -> Result<Self> {
        if cols == 0 {
            return Err(PuzzleError::EmptyMatrix);
        }
        Self::from_rows(values.chunks(cols).map(<[u32]>::to_vec).collect())
    }

    /// The 4×4 board shown before any input is committed
    pub fn initial() -> Self {
        Self {
            rows: vec![
                vec![1, 2, 3, 4],
                vec![4, 3, 2, 1],
                vec![2, 1, 4, 3],
                vec![3, 4, 1, 2],
            ],
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows[0].len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }

    /// `(row, col, value)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().enumerate().map(move |(j, v)| (i, j, *v)))
    }
}

impl TryFrom<Vec<Vec<u32>>> for PuzzleMatrix {
    type Error = PuzzleError;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<PuzzleMatrix> for Vec<Vec<u32>> {
    fn from(matrix: PuzzleMatrix) -> Self {
        matrix.rows
    }
}

impl Default for PuzzleMatrix {
    fn default() -> Self {
        Self::initial()
    }
}
