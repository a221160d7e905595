use smallvec::SmallVec;

use crate::cells::Cell;
use crate::units::{ColumnIndex, ColumnsCount, RowIndex, SetId};
use crate::utils::{fnv_hashmap, FnvHashMap};

/// Column indices of the cells in one connectivity set, in the order they joined it.
pub type SetMembers = SmallVec<[usize; 8]>;

/// Issues connectivity set ids. Ids are never reused for the lifetime of the counter, so all the
/// sets alive in a row are always distinct.
#[derive(Debug, Clone, Default)]
pub struct SetIdCounter {
    issued: u64,
}

impl SetIdCounter {
    pub fn new() -> SetIdCounter {
        SetIdCounter { issued: 0 }
    }

    #[inline]
    pub fn next_id(&mut self) -> SetId {
        self.issued += 1;
        SetId(self.issued)
    }

    /// How many ids have been handed out so far.
    #[inline]
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

/// The cells of the row being generated plus their partition into connectivity sets.
///
/// Cells are stored flat, indexed by column. Sets refer to their members by column index, so there
/// are no references between cells. The set order is the order in which each set first appeared,
/// which keeps random draws over the sets reproducible under a fixed seed.
#[derive(Debug, Clone)]
pub struct RowState {
    row_index: RowIndex,
    cells: Vec<Cell>,
    sets: FnvHashMap<SetId, SetMembers>,
    set_order: Vec<SetId>,
}

impl RowState {
    fn with_capacity(row_index: RowIndex, columns: usize) -> RowState {
        RowState {
            row_index: row_index,
            cells: Vec::with_capacity(columns),
            sets: fnv_hashmap(columns),
            set_order: Vec::with_capacity(columns),
        }
    }

    /// A row where every cell is walled in and alone in its own set.
    pub fn first_row(columns: ColumnsCount, ids: &mut SetIdCounter) -> RowState {
        let mut row = RowState::with_capacity(RowIndex(0), columns.0);
        for col in 0..columns.0 {
            row.create_singleton(ColumnIndex(col), ids);
        }
        row
    }

    /// Derive the next row from this one's vertical passage decisions.
    ///
    /// A cell below an open bottom wall inherits the set of the cell above it, any other cell
    /// starts a new set. Every wall of the new row starts closed.
    pub fn carry_down(&self, ids: &mut SetIdCounter) -> RowState {
        let row_index = RowIndex(self.row_index.0 + 1);
        let mut next = RowState::with_capacity(row_index, self.cells.len());

        for above in &self.cells {
            if above.bottom_wall {
                next.create_singleton(above.col_index, ids);
            } else {
                next.push_cell(Cell::new(row_index, above.col_index, above.set_id));
            }
        }

        next
    }

    /// Append a walled cell at `col` in a brand new set.
    pub fn create_singleton(&mut self, col: ColumnIndex, ids: &mut SetIdCounter) -> SetId {
        let id = ids.next_id();
        self.push_cell(Cell::new(self.row_index, col, id));
        id
    }

    fn push_cell(&mut self, cell: Cell) {
        debug_assert_eq!(cell.col_index.0, self.cells.len());
        let index = self.cells.len();
        let id = cell.set_id;
        self.cells.push(cell);

        let set_order = &mut self.set_order;
        self.sets
            .entry(id)
            .or_insert_with(|| {
                set_order.push(id);
                SetMembers::new()
            })
            .push(index);
    }

    /// Move every member of set `absorb` into set `keep`.
    ///
    /// Panics if the two ids are the same set or either set does not exist: joining a set to
    /// itself means a wall inside one set was opened, a cycle in the maze. Callers check
    /// `same_set` first.
    pub fn union(&mut self, keep: SetId, absorb: SetId) {
        assert_ne!(keep, absorb, "union of a connectivity set with itself");
        assert!(self.sets.contains_key(&keep), "union into unknown set {:?}", keep);

        let absorbed = match self.sets.remove(&absorb) {
            Some(members) => members,
            None => panic!("union from unknown set {:?}", absorb),
        };
        for &i in absorbed.iter() {
            self.cells[i].set_id = keep;
        }
        if let Some(members) = self.sets.get_mut(&keep) {
            members.extend(absorbed.into_iter());
        }
        self.set_order.retain(|&id| id != absorb);
    }

    /// Column indices of the live members of a set.
    pub fn members_of(&self, id: SetId) -> Option<&[usize]> {
        self.sets.get(&id).map(|members| &members[..])
    }

    #[inline]
    pub fn set_of(&self, col: usize) -> SetId {
        self.cells[col].set_id
    }

    #[inline]
    pub fn same_set(&self, a: usize, b: usize) -> bool {
        self.cells[a].set_id == self.cells[b].set_id
    }

    /// Live set ids in the order they first appeared in the row.
    #[inline]
    pub fn set_ids(&self) -> &[SetId] {
        &self.set_order
    }

    #[inline]
    pub fn set_count(&self) -> usize {
        self.set_order.len()
    }

    #[inline]
    pub fn row_index(&self) -> RowIndex {
        self.row_index
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn open_right(&mut self, col: usize) {
        self.cells[col].right_wall = false;
    }

    #[inline]
    pub fn open_bottom(&mut self, col: usize) {
        self.cells[col].bottom_wall = false;
    }

    #[inline]
    pub fn close_bottom(&mut self, col: usize) {
        self.cells[col].bottom_wall = true;
    }

    /// Does every cell belong to exactly one indexed set, with the index agreeing with the cells?
    pub fn is_consistent(&self) -> bool {
        if self.sets.len() != self.set_order.len() {
            return false;
        }

        let mut seen = vec![false; self.cells.len()];
        for id in &self.set_order {
            let members = match self.sets.get(id) {
                Some(members) if !members.is_empty() => members,
                _ => return false,
            };
            for &i in members.iter() {
                if i >= self.cells.len() || seen[i] || self.cells[i].set_id != *id {
                    return false;
                }
                seen[i] = true;
            }
        }

        seen.into_iter().all(|s| s)
    }
}
