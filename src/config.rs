use crate::errors::*;
use crate::units::{ColumnsCount, RowsCount};

/// What maze to generate.
///
/// Without a seed a fresh one is picked when the engine is built; the engine reports it so the
/// maze can be generated again.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct MazeConfig {
    pub rows: RowsCount,
    pub columns: ColumnsCount,
    pub seed: Option<u64>,
}

impl MazeConfig {
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> MazeConfig {
        MazeConfig {
            rows: rows,
            columns: columns,
            seed: None,
        }
    }

    pub fn with_seed(self, seed: u64) -> MazeConfig {
        MazeConfig { seed: Some(seed), ..self }
    }

    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.rows, self.columns)
    }

    #[inline]
    pub fn cells_count(&self) -> usize {
        self.rows.0 * self.columns.0
    }
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig::new(RowsCount(10), ColumnsCount(10))
    }
}

pub fn validate_dimensions(rows: RowsCount, columns: ColumnsCount) -> Result<()> {
    if rows.0 < 1 || columns.0 < 1 {
        Err(ErrorKind::InvalidDimension(rows.0, columns.0).into())
    } else {
        Ok(())
    }
}
