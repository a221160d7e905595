use log::{debug, trace};
use rand::XorShiftRng;

use crate::config::{validate_dimensions, MazeConfig};
use crate::errors::*;
use crate::random::{random_seed, seeded_rng, RandomSource};
use crate::row_state::{RowState, SetIdCounter, SetMembers};
use crate::sinks::RowSink;
use crate::units::{ColumnsCount, RowIndex, RowsCount};

/// Where a `MazeEngine` is in the construction of its maze.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum EngineState {
    /// No row generated yet.
    Empty,
    /// Row 0 has been emitted and more rows follow.
    FirstRow,
    /// A row after the first and before the last has been emitted.
    MiddleRow,
    /// The last row is being finalized.
    FinalRow,
    /// Every row has been emitted. Terminal.
    Done,
}

/// Eller's algorithm, one row at a time.
///
/// Only the row being built is held in memory. Each step derives the next row from the vertical
/// passages of the previous one, randomly joins neighbouring cells of different sets, then opens
/// at least one passage down from every set so that no part of the maze gets cut off. The last
/// row instead joins every remaining set, which leaves a perfect maze: exactly one path between
/// any two cells.
///
/// An engine builds a single maze; once `Done` it emits nothing more.
#[derive(Debug)]
pub struct MazeEngine<R: RandomSource> {
    rows: RowsCount,
    columns: ColumnsCount,
    seed: Option<u64>,
    rng: R,
    ids: SetIdCounter,
    current: Option<RowState>,
    state: EngineState,
}

impl<R: RandomSource> MazeEngine<R> {
    /// Fails with `InvalidDimension` if there is not at least one row and one column.
    pub fn new(rows: RowsCount, columns: ColumnsCount, rng: R) -> Result<MazeEngine<R>> {
        validate_dimensions(rows, columns)?;

        Ok(MazeEngine {
            rows: rows,
            columns: columns,
            seed: None,
            rng: rng,
            ids: SetIdCounter::new(),
            current: None,
            state: EngineState::Empty,
        })
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// The seed of the engine's random generator, when the engine was built from a seed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.state == EngineState::Done
    }

    /// Build the next row and hand it to the sink.
    ///
    /// Returns the index of the emitted row, or `None` when the maze is already complete.
    /// A sink error ends generation: the engine moves to `Done` and the error is returned.
    pub fn step<S: RowSink + ?Sized>(&mut self, sink: &mut S) -> Result<Option<RowIndex>> {
        if self.state == EngineState::Done {
            return Ok(None);
        }

        let mut row = match self.current.take() {
            None => {
                debug!("Generating {} x {} maze, seed {:?}", self.rows.0, self.columns.0, self.seed);
                RowState::first_row(self.columns, &mut self.ids)
            }
            Some(previous) => previous.carry_down(&mut self.ids),
        };
        let row_index = row.row_index();
        let is_final = row_index.0 + 1 == self.rows.0;

        if is_final {
            self.state = EngineState::FinalRow;
            finalize_row(&mut row);
        } else {
            merge_horizontally(&mut row, &mut self.rng);
            connect_vertically(&mut row, &mut self.rng);
        }

        trace!("Row {} decided with {} sets", row_index.0, row.set_count());
        if let Err(e) = sink.emit_row(row.cells(), row_index, is_final) {
            self.state = EngineState::Done;
            return Err(e);
        }

        if is_final {
            debug!("Maze complete after {} rows, {} sets issued", self.rows.0, self.ids.issued());
            self.state = EngineState::Done;
        } else {
            self.state = if row_index.0 == 0 {
                EngineState::FirstRow
            } else {
                EngineState::MiddleRow
            };
            self.current = Some(row);
        }

        Ok(Some(row_index))
    }

    /// Emit every remaining row.
    pub fn run<S: RowSink + ?Sized>(mut self, sink: &mut S) -> Result<()> {
        while self.step(sink)?.is_some() {}
        Ok(())
    }
}

impl MazeEngine<XorShiftRng> {
    /// An engine seeded from the config, or from a fresh random seed when it has none.
    pub fn from_config(config: &MazeConfig) -> Result<MazeEngine<XorShiftRng>> {
        let seed = config.seed.unwrap_or_else(random_seed);
        let mut engine = MazeEngine::new(config.rows, config.columns, seeded_rng(seed))?;
        engine.seed = Some(seed);
        Ok(engine)
    }
}

/// Generate a complete maze into `sink`, returning the seed that was used.
pub fn generate<S: RowSink + ?Sized>(config: &MazeConfig, sink: &mut S) -> Result<u64> {
    let engine = MazeEngine::from_config(config)?;
    let seed = engine.seed().unwrap_or_default();
    engine.run(sink)?;
    Ok(seed)
}

/// Randomly open walls between neighbours that are not yet connected, left to right.
///
/// Neighbours in the same set are already connected, so the wall between them always stays.
pub fn merge_horizontally<R: RandomSource + ?Sized>(row: &mut RowState, rng: &mut R) {
    for col in 0..row.len().saturating_sub(1) {
        if row.same_set(col, col + 1) {
            continue;
        }

        if rng.coin_flip() {
            row.open_right(col);
            let (keep, absorb) = (row.set_of(col), row.set_of(col + 1));
            row.union(keep, absorb);
        }
    }
}

/// Open at least one passage down from every set, and from any other member on a coin flip.
pub fn connect_vertically<R: RandomSource + ?Sized>(row: &mut RowState, rng: &mut R) {
    let set_ids = row.set_ids().to_vec();

    for id in set_ids {
        let mut members: SetMembers = match row.members_of(id) {
            Some(members) => members.iter().cloned().collect(),
            None => continue,
        };

        let forced = members.remove(rng.index_below(members.len()));
        row.open_bottom(forced);

        while !members.is_empty() {
            let member = members.remove(rng.index_below(members.len()));
            if rng.coin_flip() {
                row.open_bottom(member);
            }
        }
    }

    debug_assert!(every_set_reaches_down(row));
}

/// Close the bottom of every cell and join every set that is still apart.
///
/// Panics unless exactly one set remains, as the maze would otherwise be disconnected.
pub fn finalize_row(row: &mut RowState) {
    let len = row.len();

    for col in 0..len {
        row.close_bottom(col);

        if col + 1 < len && !row.same_set(col, col + 1) {
            row.open_right(col);
            let (keep, absorb) = (row.set_of(col), row.set_of(col + 1));
            row.union(keep, absorb);
        }
    }

    assert_eq!(row.set_count(), 1, "final row left more than one connectivity set");
}

/// Does every set in the row have at least one member with an open bottom wall?
pub fn every_set_reaches_down(row: &RowState) -> bool {
    row.set_ids().iter().all(|&id| {
        row.members_of(id)
            .map_or(false, |members| members.iter().any(|&i| row.cells()[i].has_bottom_passage()))
    })
}
