use crate::units::{ColumnIndex, RowIndex, SetId};

/// One position in the maze.
///
/// `right_wall` and `bottom_wall` are the bit exact contract with renderers: `true` means a wall
/// is drawn on that edge. The top edge of the first row and the left edge of the first column are
/// never represented here, they are always walled.
///
/// `set_id` only means something relative to the other cells of the row it was generated in.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    pub row_index: RowIndex,
    pub col_index: ColumnIndex,
    pub right_wall: bool,
    pub bottom_wall: bool,
    pub set_id: SetId,
}

impl Cell {
    /// A fully walled cell.
    pub fn new(row_index: RowIndex, col_index: ColumnIndex, set_id: SetId) -> Cell {
        Cell {
            row_index: row_index,
            col_index: col_index,
            right_wall: true,
            bottom_wall: true,
            set_id: set_id,
        }
    }

    #[inline]
    pub fn has_right_passage(&self) -> bool {
        !self.right_wall
    }

    #[inline]
    pub fn has_bottom_passage(&self) -> bool {
        !self.bottom_wall
    }

    /// Row major index of this cell in a grid `columns` wide.
    #[inline]
    pub fn row_major_index(&self, columns: usize) -> usize {
        self.row_index.0 * columns + self.col_index.0
    }
}
