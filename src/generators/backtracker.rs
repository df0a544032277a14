use rand::prelude::*;

use crate::generators::Generator;
use crate::grids::wall_grid::WallGrid;
use crate::grids::CellState;

const START_CELL: (usize, usize) = (0, 0);

/// Randomized depth-first traversal with an explicit stack standing in for
/// recursion. Every completed run leaves a spanning tree of open walls.
pub struct RecursiveBacktracker {
    grid: WallGrid,
    stack: Vec<(usize, usize)>,
    rng: ThreadRng,
    current: Option<(usize, usize)>,
    pub done: bool,
}

impl RecursiveBacktracker {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            grid: WallGrid::with_dims(rows, cols),
            stack: Vec::new(),
            rng: rand::thread_rng(),
            current: None,
            done: false,
        }
    }
}

impl Generator for RecursiveBacktracker {
    fn start(&mut self) {
        self.stack.clear();
        self.grid.mark_visited(START_CELL.0, START_CELL.1);
        self.grid.set_state(START_CELL.0, START_CELL.1, CellState::Current);
        self.current = Some(START_CELL);
        self.done = false;
    }

    fn reset(&mut self) {
        self.grid = WallGrid::with_dims(self.grid.dims.rows, self.grid.dims.columns);
        self.stack.clear();
        self.current = None;
        self.done = false;
        log::debug!(
            "generator reset to a fresh {}x{} grid",
            self.grid.dims.rows,
            self.grid.dims.columns
        );
    }

    fn step_generation(&mut self) {
        if self.done {
            return;
        }
        let (row, column) = match self.current {
            Some(coords) => coords,
            None => return,
        };

        self.grid.mark_visited(row, column);

        let unvisited: Vec<(usize, usize)> = self
            .grid
            .neighborhood_of(row, column)
            .filter(|(cell, _)| !cell.visited)
            .map(|(cell, _)| (cell.row, cell.column))
            .collect();

        if !unvisited.is_empty() {
            let chosen = unvisited[self.rng.gen_range(0, unvisited.len())];

            self.stack.push((row, column));
            self.grid.mark_visited(chosen.0, chosen.1);
            self.grid.remove_wall_between((row, column), chosen);

            self.grid.set_state(row, column, CellState::Visited);
            self.grid.set_state(chosen.0, chosen.1, CellState::Current);
            self.current = Some(chosen);
        } else if let Some(prev) = self.stack.pop() {
            // walls here are already resolved, just walk back
            self.grid.set_state(row, column, CellState::Backtracked);
            self.grid.set_state(prev.0, prev.1, CellState::Current);
            self.current = Some(prev);
        } else {
            self.done = true;
            log::debug!("maze generation reached done");
        }
    }

    fn next_step(&mut self) -> &WallGrid {
        self.step_generation();
        &self.grid
    }

    fn generate_maze(&mut self) -> &WallGrid {
        if !self.is_started() {
            self.start();
        }
        loop {
            self.step_generation();
            if self.done {
                break;
            }
        }
        &self.grid
    }

    fn grid(&self) -> &WallGrid {
        &self.grid
    }

    fn is_started(&self) -> bool {
        self.current.is_some()
    }

    fn is_done(&self) -> bool {
        self.done
    }
}
