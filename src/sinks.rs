use crate::cells::Cell;
use crate::errors::*;
use crate::units::RowIndex;

/// Consumer of the rows a maze generator emits.
///
/// `emit_row` is called once per row in increasing row order, starting at row 0, with `is_final`
/// set only on the last call. The cells are fully decided and must be treated as read only.
/// Returning an error stops generation.
pub trait RowSink {
    fn emit_row(&mut self, row: &[Cell], row_index: RowIndex, is_final: bool) -> Result<()>;
}

impl<F> RowSink for F
    where F: FnMut(&[Cell], RowIndex, bool) -> Result<()>
{
    fn emit_row(&mut self, row: &[Cell], row_index: RowIndex, is_final: bool) -> Result<()> {
        self(row, row_index, is_final)
    }
}

/// An absent sink accepts and drops every row.
impl<S: RowSink> RowSink for Option<S> {
    fn emit_row(&mut self, row: &[Cell], row_index: RowIndex, is_final: bool) -> Result<()> {
        match *self {
            Some(ref mut sink) => sink.emit_row(row, row_index, is_final),
            None => Ok(()),
        }
    }
}

/// Forwards every row to two sinks, the first one first.
#[derive(Debug)]
pub struct Tee<A: RowSink, B: RowSink> {
    first: A,
    second: B,
}

impl<A: RowSink, B: RowSink> Tee<A, B> {
    pub fn new(first: A, second: B) -> Tee<A, B> {
        Tee {
            first: first,
            second: second,
        }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: RowSink, B: RowSink> RowSink for Tee<A, B> {
    fn emit_row(&mut self, row: &[Cell], row_index: RowIndex, is_final: bool) -> Result<()> {
        self.first.emit_row(row, row_index, is_final)?;
        self.second.emit_row(row, row_index, is_final)
    }
}

/// Keeps only running totals of what it has been sent.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct RowCounter {
    pub rows: usize,
    pub cells: usize,
    pub passages: usize,
    pub finished: bool,
}

impl RowCounter {
    pub fn new() -> RowCounter {
        RowCounter::default()
    }
}

impl RowSink for RowCounter {
    fn emit_row(&mut self, row: &[Cell], _: RowIndex, is_final: bool) -> Result<()> {
        self.rows += 1;
        self.cells += row.len();
        self.passages += row.iter()
            .map(|c| c.has_right_passage() as usize + c.has_bottom_passage() as usize)
            .sum::<usize>();
        self.finished = is_final;
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::units::{ColumnIndex, SetId};

    fn walled_row(row: usize, columns: usize) -> Vec<Cell> {
        (0..columns)
            .map(|col| Cell::new(RowIndex(row), ColumnIndex(col), SetId(col as u64 + 1)))
            .collect()
    }

    #[test]
    fn counter_totals() {
        let mut counter = RowCounter::new();
        let mut row = walled_row(0, 3);
        row[0].right_wall = false;
        row[2].bottom_wall = false;
        counter.emit_row(&row, RowIndex(0), false).unwrap();
        assert_eq!(counter,
                   RowCounter {
                       rows: 1,
                       cells: 3,
                       passages: 2,
                       finished: false,
                   });

        counter.emit_row(&walled_row(1, 3), RowIndex(1), true).unwrap();
        assert_eq!(counter.rows, 2);
        assert_eq!(counter.cells, 6);
        assert_eq!(counter.passages, 2);
        assert!(counter.finished);
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = vec![];
        {
            let mut sink = |row: &[Cell], index: RowIndex, is_final: bool| -> Result<()> {
                seen.push((row.len(), index, is_final));
                Ok(())
            };
            sink.emit_row(&walled_row(0, 2), RowIndex(0), false).unwrap();
            sink.emit_row(&walled_row(1, 2), RowIndex(1), true).unwrap();
        }
        assert_eq!(seen, vec![(2, RowIndex(0), false), (2, RowIndex(1), true)]);
    }

    #[test]
    fn tee_feeds_both_sinks() {
        let mut tee = Tee::new(RowCounter::new(), RowCounter::new());
        tee.emit_row(&walled_row(0, 4), RowIndex(0), true).unwrap();
        let (a, b) = tee.into_inner();
        assert_eq!(a, b);
        assert_eq!(a.cells, 4);
        assert!(a.finished);
    }

    #[test]
    fn optional_sinks() {
        let mut present = Some(RowCounter::new());
        let mut absent: Option<RowCounter> = None;
        present.emit_row(&walled_row(0, 2), RowIndex(0), true).unwrap();
        absent.emit_row(&walled_row(0, 2), RowIndex(0), true).unwrap();
        assert_eq!(present.map(|c| c.rows), Some(1));
        assert!(absent.is_none());
    }

    #[test]
    fn tee_stops_at_first_failure() {
        let failing = |_: &[Cell], _: RowIndex, _: bool| -> Result<()> { Err("sink full".into()) };
        let mut tee = Tee::new(failing, RowCounter::new());
        assert!(tee.emit_row(&walled_row(0, 1), RowIndex(0), false).is_err());
        let (_, counter) = tee.into_inner();
        assert_eq!(counter.rows, 0);
    }
}
