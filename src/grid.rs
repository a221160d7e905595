use petgraph::algo::{connected_components, is_cyclic_undirected};
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};
use std::fmt;

use crate::cells::Cell;
use crate::config::MazeConfig;
use crate::errors::*;
use crate::generators;
use crate::renderers;
use crate::sinks::RowSink;
use crate::units::{ColumnIndex, ColumnsCount, EdgesCount, NodesCount, RowIndex, RowsCount};

/// Cells as graph nodes in row major order, passages as edges.
pub type MazeGraph = Graph<(), (), Undirected, u32>;

/// A sink that keeps every row it is sent, for when the whole maze is wanted in memory.
#[derive(Debug, Clone, Default)]
pub struct MazeGrid {
    rows: Vec<Vec<Cell>>,
    complete: bool,
}

impl MazeGrid {
    pub fn new() -> MazeGrid {
        MazeGrid::default()
    }

    /// Generate a whole maze into a new grid.
    pub fn generate(config: &MazeConfig) -> Result<MazeGrid> {
        let mut grid = MazeGrid::new();
        generators::generate(config, &mut grid)?;
        Ok(grid)
    }

    #[inline]
    pub fn rows_count(&self) -> RowsCount {
        RowsCount(self.rows.len())
    }

    #[inline]
    pub fn columns_count(&self) -> ColumnsCount {
        ColumnsCount(self.rows.first().map_or(0, |row| row.len()))
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.rows_count().0 * self.columns_count().0
    }

    /// Has the final row been received?
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    #[inline]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cell(&self, row: RowIndex, col: ColumnIndex) -> Option<&Cell> {
        self.rows.get(row.0).and_then(|cells| cells.get(col.0))
    }

    pub fn passages_count(&self) -> usize {
        self.iter_links().count()
    }

    /// Every open passage as a pair of row major cell indices, the lower index first.
    ///
    /// Bottom passages out of the last row held are skipped, there is no cell for them to reach.
    pub fn iter_links<'a>(&'a self) -> impl Iterator<Item = (usize, usize)> + 'a {
        let columns = self.columns_count().0;
        let size = self.size();

        self.rows.iter().flat_map(move |row| {
            row.iter().flat_map(move |cell| {
                let index = cell.row_major_index(columns);
                let right = if cell.has_right_passage() && cell.col_index.0 + 1 < columns {
                    Some((index, index + 1))
                } else {
                    None
                };
                let down = if cell.has_bottom_passage() && index + columns < size {
                    Some((index, index + columns))
                } else {
                    None
                };
                right.into_iter().chain(down)
            })
        })
    }

    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        (NodesCount(self.size()), EdgesCount(self.passages_count()))
    }

    pub fn to_graph(&self) -> MazeGraph {
        let (NodesCount(nodes), EdgesCount(edges)) = self.graph_size();
        let mut graph = MazeGraph::with_capacity(nodes, edges);
        for _ in 0..nodes {
            let _ = graph.add_node(());
        }
        for (a, b) in self.iter_links() {
            let _ = graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
        }
        graph
    }

    /// Is the maze a spanning tree of its grid: connected, without cycles, `n - 1` passages?
    pub fn is_perfect(&self) -> bool {
        if !self.complete || self.size() == 0 {
            return false;
        }

        let graph = self.to_graph();
        graph.edge_count() == self.size() - 1 && connected_components(&graph) == 1 &&
        !is_cyclic_undirected(&graph)
    }
}

impl RowSink for MazeGrid {
    fn emit_row(&mut self, row: &[Cell], row_index: RowIndex, is_final: bool) -> Result<()> {
        if self.complete {
            bail_out(format!("row {} sent after the final row", row_index.0))?;
        }
        if row_index.0 != self.rows.len() {
            bail_out(format!("expected row {}, received row {}", self.rows.len(), row_index.0))?;
        }
        if let Some(first) = self.rows.first() {
            if first.len() != row.len() {
                bail_out(format!("row {} has {} cells, expected {}",
                                 row_index.0,
                                 row.len(),
                                 first.len()))?;
            }
        }

        self.rows.push(row.to_vec());
        self.complete = is_final;
        Ok(())
    }
}

fn bail_out(message: String) -> Result<()> {
    Err(message.into())
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (n, row) in self.rows.iter().enumerate() {
            write!(f, "{}", renderers::render_row_text(row, RowIndex(n)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::generators::MazeEngine;
    use crate::random::tests::ScriptedCoins;
    use crate::units::SetId;
    use itertools::Itertools;
    use quickcheck::quickcheck;

    fn grid(rows: usize, columns: usize, seed: u64) -> MazeGrid {
        MazeGrid::generate(&MazeConfig::new(RowsCount(rows), ColumnsCount(columns)).with_seed(seed))
            .expect("valid dimensions")
    }

    fn scripted_grid(rows: usize, columns: usize, flips: &[bool]) -> MazeGrid {
        let engine = MazeEngine::new(RowsCount(rows), ColumnsCount(columns), ScriptedCoins::new(flips))
            .expect("valid dimensions");
        let mut grid = MazeGrid::new();
        engine.run(&mut grid).expect("generation failed");
        grid
    }

    fn links_sorted(g: &MazeGrid) -> Vec<(usize, usize)> {
        g.iter_links().sorted()
    }

    // The 2 x 2 grid graph is a 4 cycle, so its spanning trees are the cycle minus any one edge.
    fn two_by_two_spanning_trees() -> Vec<Vec<(usize, usize)>> {
        let cycle = [(0, 1), (0, 2), (1, 3), (2, 3)];
        (0..cycle.len())
            .map(|skip| {
                cycle.iter()
                    .enumerate()
                    .filter(|&(i, _)| i != skip)
                    .map(|(_, &edge)| edge)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn collects_rows() {
        let g = grid(4, 7, 1);
        assert!(g.is_complete());
        assert_eq!(g.rows_count(), RowsCount(4));
        assert_eq!(g.columns_count(), ColumnsCount(7));
        assert_eq!(g.size(), 28);
        assert_eq!(g.cell(RowIndex(3), ColumnIndex(6)).map(|c| c.col_index), Some(ColumnIndex(6)));
        assert!(g.cell(RowIndex(4), ColumnIndex(0)).is_none());
        assert!(g.cell(RowIndex(0), ColumnIndex(7)).is_none());
    }

    #[test]
    fn spanning_tree_on_assorted_shapes() {
        for &(rows, columns) in &[(1, 1), (1, 9), (9, 1), (2, 2), (3, 17), (20, 20), (64, 5)] {
            for seed in 0..5 {
                let g = grid(rows, columns, seed);
                assert!(g.is_perfect(), "{} x {} seed {}", rows, columns, seed);
                assert_eq!(g.passages_count(), rows * columns - 1);
            }
        }
    }

    #[test]
    fn single_cell_has_no_passages() {
        let g = grid(1, 1, 0);
        assert_eq!(g.passages_count(), 0);
        assert!(g.is_perfect());
        let cell = g.cell(RowIndex(0), ColumnIndex(0)).unwrap();
        assert!(cell.right_wall && cell.bottom_wall);
    }

    #[test]
    fn two_by_two_seeded_mazes_are_spanning_trees() {
        let trees = two_by_two_spanning_trees();
        let mut seen = vec![false; trees.len()];
        for seed in 0..300 {
            let links = links_sorted(&grid(2, 2, seed));
            let position = trees.iter().position(|tree| *tree == links);
            assert!(position.is_some(), "seed {} gave {:?}", seed, links);
            seen[position.unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s), "some 2 x 2 trees never generated: {:?}", seen);
    }

    #[test]
    fn two_by_two_scripted_mazes_are_spanning_trees() {
        let trees = two_by_two_spanning_trees();
        for script in 0..8u8 {
            let flips = (0..3).map(|bit| script & (1 << bit) != 0).collect::<Vec<bool>>();
            let links = links_sorted(&scripted_grid(2, 2, &flips));
            assert!(trees.contains(&links), "script {:?} gave {:?}", flips, links);
        }
    }

    #[test]
    fn two_by_two_known_scripts() {
        // Join the first row, then drop down from both of its cells.
        let g = scripted_grid(2, 2, &[true, true]);
        assert_eq!(links_sorted(&g), vec![(0, 1), (0, 2), (1, 3)]);

        // Keep the first row apart; each cell must then drop down and the last row joins them.
        let g = scripted_grid(2, 2, &[false]);
        assert_eq!(links_sorted(&g), vec![(0, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn every_set_drops_down_before_the_last_row() {
        let g = grid(30, 12, 4);
        for row in &g.rows()[..29] {
            let set_ids: Vec<SetId> = row.iter().map(|c| c.set_id).sorted();
            for id in set_ids.into_iter().dedup() {
                assert!(row.iter().any(|c| c.set_id == id && c.has_bottom_passage()));
            }
        }
        let last = &g.rows()[29];
        assert!(last.iter().all(|c| c.set_id == last[0].set_id));
    }

    #[test]
    fn graph_matches_links() {
        let g = grid(6, 6, 12);
        let graph = g.to_graph();
        assert_eq!(graph.node_count(), 36);
        assert_eq!(graph.edge_count(), 35);
        assert_eq!(g.graph_size(), (NodesCount(36), EdgesCount(35)));
        for (a, b) in g.iter_links() {
            assert!(a < b);
            assert!(b == a + 1 || b == a + 6);
        }
    }

    #[test]
    fn incomplete_or_broken_grids_are_not_perfect() {
        assert!(!MazeGrid::new().is_perfect());

        let mut g = grid(3, 3, 2);
        g.complete = false;
        assert!(!g.is_perfect());

        // Knock an extra hole into an inner wall that is still standing: a cycle.
        let mut g = grid(3, 3, 2);
        let mut knocked = false;
        'search: for r in 0..3 {
            for c in 0..3 {
                if c < 2 && g.rows[r][c].right_wall {
                    g.rows[r][c].right_wall = false;
                    knocked = true;
                    break 'search;
                }
                if r < 2 && g.rows[r][c].bottom_wall {
                    g.rows[r][c].bottom_wall = false;
                    knocked = true;
                    break 'search;
                }
            }
        }
        assert!(knocked);
        assert_eq!(g.passages_count(), 9);
        assert!(!g.is_perfect());
    }

    #[test]
    fn rejects_rows_out_of_order() {
        let row = vec![Cell::new(RowIndex(1), ColumnIndex(0), SetId(1))];
        let mut g = MazeGrid::new();
        assert!(g.emit_row(&row, RowIndex(1), false).is_err());
        assert!(g.rows().is_empty());
    }

    #[test]
    fn rejects_rows_of_different_width() {
        let mut g = MazeGrid::new();
        let row0 = vec![Cell::new(RowIndex(0), ColumnIndex(0), SetId(1)),
                        Cell::new(RowIndex(0), ColumnIndex(1), SetId(2))];
        let row1 = vec![Cell::new(RowIndex(1), ColumnIndex(0), SetId(3))];
        g.emit_row(&row0, RowIndex(0), false).unwrap();
        assert!(g.emit_row(&row1, RowIndex(1), true).is_err());
    }

    #[test]
    fn rejects_rows_after_final() {
        let mut g = grid(1, 2, 0);
        let row = vec![Cell::new(RowIndex(1), ColumnIndex(0), SetId(1)),
                       Cell::new(RowIndex(1), ColumnIndex(1), SetId(1))];
        assert!(g.emit_row(&row, RowIndex(1), true).is_err());
    }

    #[test]
    fn display_matches_text_rendering() {
        let g = scripted_grid(2, 2, &[true, true]);
        assert_eq!(g.to_string(),
                   concat!(" ___ ___\n",
                           "|       |\n",
                           "        \n",
                           "|   |   |\n",
                           " ___ ___\n"));
    }

    #[test]
    fn quickcheck_spanning_tree() {
        fn p(rows: u8, columns: u8, seed: u64) -> bool {
            let (rows, columns) = (rows as usize % 24 + 1, columns as usize % 24 + 1);
            let g = grid(rows, columns, seed);
            g.is_perfect() && g.passages_count() == rows * columns - 1
        }
        quickcheck(p as fn(u8, u8, u64) -> bool);
    }

    #[test]
    fn quickcheck_same_seed_same_maze() {
        fn p(rows: u8, columns: u8, seed: u64) -> bool {
            let (rows, columns) = (rows as usize % 16 + 1, columns as usize % 16 + 1);
            grid(rows, columns, seed).rows() == grid(rows, columns, seed).rows()
        }
        quickcheck(p as fn(u8, u8, u64) -> bool);
    }
}
