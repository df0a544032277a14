const DEFAULT_DIMS: (usize, usize) = (20, 20);

pub const GRID_SCALE: f32 = 1.3;
// half thickness of a wall segment in ndc units
pub const WALL_WIDTH: f32 = 0.004;
pub const WALL_COLOR: [f32; 4] = [0.9, 0.9, 0.9, 1.0];

use crate::grids::{CellState, Dimensions, Direction, Neighborhood};
use crate::renderer::Vertex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Walls {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Walls {
    pub fn sealed() -> Self {
        Self {
            top: true,
            bottom: true,
            left: true,
            right: true,
        }
    }

    pub fn clear(&mut self, direction: Direction) {
        match direction {
            Direction::North => self.top = false,
            Direction::South => self.bottom = false,
            Direction::East => self.right = false,
            Direction::West => self.left = false,
            Direction::Sentinel => unreachable!(),
        }
    }

    pub fn is_open(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => !self.top,
            Direction::South => !self.bottom,
            Direction::East => !self.right,
            Direction::West => !self.left,
            Direction::Sentinel => unreachable!(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
    pub walls: Walls,
    pub visited: bool,
    pub state: CellState,
}

impl Cell {
    fn new(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            walls: Walls::sealed(),
            visited: false,
            state: CellState::Unvisited,
        }
    }
}

/// Row-major cell storage, index = row * columns + column. Row 0 renders at
/// the bottom of the window, so Direction::North is row + 1.
pub struct WallGrid {
    pub dims: Dimensions,

    pub cells: Vec<Cell>,
}

impl WallGrid {
    pub fn new() -> Self {
        Self::with_dims(DEFAULT_DIMS.0, DEFAULT_DIMS.1)
    }

    pub fn with_dims(rows: usize, columns: usize) -> Self {
        assert!(
            rows > 0 && columns > 0,
            "grid dimensions must be non-zero, got {}x{}",
            rows,
            columns
        );

        Self {
            cells: (0..rows * columns)
                .map(|index| Cell::new(index / columns, index % columns))
                .collect(),
            dims: Dimensions { rows, columns },
        }
    }

    #[inline]
    fn index_of(&self, row: usize, column: usize) -> usize {
        (self.dims.columns * row) + column
    }

    pub fn cell_at(&self, row: usize, column: usize) -> Option<&Cell> {
        if row < self.dims.rows && column < self.dims.columns {
            Some(&self.cells[self.index_of(row, column)])
        } else {
            None
        }
    }

    // yields existing neighbors in North, South, East, West order
    pub fn neighborhood_of(&self, row: usize, column: usize) -> Neighborhood {
        let mut neighbors = Neighborhood::new();

        neighbors.north = self.cell_at(row + 1, column).copied();
        neighbors.south = row
            .checked_sub(1)
            .and_then(|r| self.cell_at(r, column))
            .copied();
        neighbors.east = self.cell_at(row, column + 1).copied();
        neighbors.west = column
            .checked_sub(1)
            .and_then(|c| self.cell_at(row, c))
            .copied();

        neighbors
    }

    /// The only way wall flags change. Panics unless `one` and `two` are
    /// exactly one cardinal step apart.
    pub fn remove_wall_between(&mut self, one: (usize, usize), two: (usize, usize)) {
        let d_row = two.0 as isize - one.0 as isize;
        let d_col = two.1 as isize - one.1 as isize;

        let direction = match (d_row, d_col) {
            (1, 0) => Direction::North,
            (-1, 0) => Direction::South,
            (0, 1) => Direction::East,
            (0, -1) => Direction::West,
            _ => panic!("cells {:?} and {:?} are not grid-adjacent", one, two),
        };

        let index_one = self.index_of(one.0, one.1);
        let index_two = self.index_of(two.0, two.1);

        self.cells[index_one].walls.clear(direction);
        self.cells[index_two].walls.clear(-direction);
    }

    #[inline]
    pub fn mark_visited(&mut self, row: usize, column: usize) {
        let index = self.index_of(row, column);
        self.cells[index].visited = true;
    }

    #[inline]
    pub fn set_state(&mut self, row: usize, column: usize, state: CellState) -> CellState {
        let index = self.index_of(row, column);
        let prev_state = self.cells[index].state;
        self.cells[index].state = state;
        prev_state
    }

    fn get_ndc_params(&self, size: winit::dpi::PhysicalSize<u32>, scale: f32) -> (f32, f32, f32, f32) {
        let ratio = size.width as f32 / size.height as f32;
        let (sq_width, sq_height) = if ratio >= 1.0 {
            (
                scale / self.dims.columns as f32 / ratio,
                scale / self.dims.rows as f32,
            )
        } else {
            (
                scale / self.dims.columns as f32,
                scale / self.dims.rows as f32 * ratio,
            )
        };

        let bottom_left_x = -(sq_width * self.dims.columns as f32) / 2.0;
        let bottom_left_y = -(sq_height * self.dims.rows as f32) / 2.0;

        (sq_width, sq_height, bottom_left_x, bottom_left_y)
    }

    pub fn render(&self, size: winit::dpi::PhysicalSize<u32>, scale: f32) -> Vec<Vertex> {
        let mut fills = Vec::new();
        let mut walls = Vec::new();
        let (sq_width, sq_height, bottom_left_x, bottom_left_y) = self.get_ndc_params(size, scale);

        let mut offset_x = bottom_left_x;
        let mut offset_y = bottom_left_y;

        for row in 0..self.dims.rows {
            for col in 0..self.dims.columns {
                let low_x = offset_x;
                let low_y = offset_y;

                let up_x = low_x + sq_width;
                let up_y = low_y + sq_height;

                let cell = &self.cells[self.index_of(row, col)];

                // untouched cells stay the clear color, like the bare canvas
                if cell.state != CellState::Unvisited {
                    push_quad(&mut fills, low_x, low_y, up_x, up_y, cell.state.into());
                }

                if cell.walls.bottom {
                    push_quad(
                        &mut walls,
                        low_x - WALL_WIDTH,
                        low_y - WALL_WIDTH,
                        up_x + WALL_WIDTH,
                        low_y + WALL_WIDTH,
                        WALL_COLOR,
                    );
                }
                if cell.walls.top {
                    push_quad(
                        &mut walls,
                        low_x - WALL_WIDTH,
                        up_y - WALL_WIDTH,
                        up_x + WALL_WIDTH,
                        up_y + WALL_WIDTH,
                        WALL_COLOR,
                    );
                }
                if cell.walls.left {
                    push_quad(
                        &mut walls,
                        low_x - WALL_WIDTH,
                        low_y - WALL_WIDTH,
                        low_x + WALL_WIDTH,
                        up_y + WALL_WIDTH,
                        WALL_COLOR,
                    );
                }
                if cell.walls.right {
                    push_quad(
                        &mut walls,
                        up_x - WALL_WIDTH,
                        low_y - WALL_WIDTH,
                        up_x + WALL_WIDTH,
                        up_y + WALL_WIDTH,
                        WALL_COLOR,
                    );
                }

                offset_x += sq_width;
            }
            offset_y += sq_height;
            offset_x = bottom_left_x;
        }

        // walls draw over the fills
        fills.append(&mut walls);
        fills
    }
}

fn push_quad(verts: &mut Vec<Vertex>, low_x: f32, low_y: f32, up_x: f32, up_y: f32, color: [f32; 4]) {
    verts.extend_from_slice(&[
        // lower left triangle
        Vertex {
            position: [low_x, low_y],
            color,
        },
        Vertex {
            position: [up_x, low_y],
            color,
        },
        Vertex {
            position: [low_x, up_y],
            color,
        },
        // upper right triangle
        Vertex {
            position: [low_x, up_y],
            color,
        },
        Vertex {
            position: [up_x, low_y],
            color,
        },
        Vertex {
            position: [up_x, up_y],
            color,
        },
    ]);
}

#[cfg(test)]
mod test_wall_grid {
    use super::*;

    #[test]
    fn fresh_cells_are_sealed() {
        let grid = WallGrid::with_dims(3, 4);

        assert_eq!(grid.cells.len(), 12);
        for cell in &grid.cells {
            assert_eq!(cell.walls, Walls::sealed());
            assert!(!cell.visited);
            assert_eq!(cell.state, CellState::Unvisited);
        }
    }

    #[test]
    fn index_is_a_bijection() {
        let grid = WallGrid::with_dims(5, 7);

        for row in 0..5 {
            for column in 0..7 {
                let cell = grid.cell_at(row, column).unwrap();
                assert_eq!((cell.row, cell.column), (row, column));
                assert_eq!(grid.index_of(row, column), row * 7 + column);
            }
        }
    }

    #[test]
    fn out_of_range_lookup_is_none() {
        let grid = WallGrid::with_dims(4, 6);

        assert!(grid.cell_at(3, 5).is_some());
        assert!(grid.cell_at(4, 0).is_none());
        assert!(grid.cell_at(0, 6).is_none());
        assert!(grid.cell_at(4, 6).is_none());
        assert!(grid.cell_at(usize::max_value(), 0).is_none());
    }

    #[test]
    fn neighborhood_order_and_truncation() {
        let grid = WallGrid::with_dims(3, 3);

        let dirs: Vec<Direction> = grid.neighborhood_of(1, 1).map(|(_, dir)| dir).collect();
        assert_eq!(
            dirs,
            vec![
                Direction::North,
                Direction::South,
                Direction::East,
                Direction::West
            ]
        );

        let dirs: Vec<Direction> = grid.neighborhood_of(0, 0).map(|(_, dir)| dir).collect();
        assert_eq!(dirs, vec![Direction::North, Direction::East]);

        let dirs: Vec<Direction> = grid.neighborhood_of(2, 2).map(|(_, dir)| dir).collect();
        assert_eq!(dirs, vec![Direction::South, Direction::West]);

        let coords: Vec<(usize, usize)> = grid
            .neighborhood_of(0, 1)
            .map(|(cell, _)| (cell.row, cell.column))
            .collect();
        assert_eq!(coords, vec![(1, 1), (0, 2), (0, 0)]);
    }

    #[test]
    fn remove_wall_is_symmetric_and_minimal() {
        let mut grid = WallGrid::with_dims(3, 3);

        grid.remove_wall_between((1, 1), (2, 1));

        assert!(!grid.cell_at(1, 1).unwrap().walls.top);
        assert!(!grid.cell_at(2, 1).unwrap().walls.bottom);

        let closed: usize = grid
            .cells
            .iter()
            .map(|cell| {
                [
                    cell.walls.top,
                    cell.walls.bottom,
                    cell.walls.left,
                    cell.walls.right,
                ]
                .iter()
                .filter(|wall| **wall)
                .count()
            })
            .sum();
        assert_eq!(closed, 4 * 9 - 2);
    }

    #[test]
    fn remove_wall_handles_all_four_directions() {
        let mut grid = WallGrid::with_dims(3, 3);

        grid.remove_wall_between((1, 1), (0, 1));
        assert!(!grid.cell_at(1, 1).unwrap().walls.bottom);
        assert!(!grid.cell_at(0, 1).unwrap().walls.top);

        grid.remove_wall_between((1, 1), (1, 2));
        assert!(!grid.cell_at(1, 1).unwrap().walls.right);
        assert!(!grid.cell_at(1, 2).unwrap().walls.left);

        grid.remove_wall_between((1, 1), (1, 0));
        assert!(!grid.cell_at(1, 1).unwrap().walls.left);
        assert!(!grid.cell_at(1, 0).unwrap().walls.right);
    }

    #[test]
    #[should_panic(expected = "not grid-adjacent")]
    fn remove_wall_rejects_diagonal() {
        let mut grid = WallGrid::with_dims(3, 3);
        grid.remove_wall_between((0, 0), (1, 1));
    }

    #[test]
    #[should_panic(expected = "not grid-adjacent")]
    fn remove_wall_rejects_same_cell() {
        let mut grid = WallGrid::with_dims(3, 3);
        grid.remove_wall_between((1, 1), (1, 1));
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn zero_dims_rejected() {
        WallGrid::with_dims(0, 4);
    }

    #[test]
    fn mark_visited_is_idempotent() {
        let mut grid = WallGrid::with_dims(2, 2);

        grid.mark_visited(1, 0);
        grid.mark_visited(1, 0);

        assert!(grid.cell_at(1, 0).unwrap().visited);
        assert!(!grid.cell_at(0, 0).unwrap().visited);
    }

    #[test]
    fn set_state_returns_previous() {
        let mut grid = WallGrid::with_dims(2, 2);

        assert_eq!(grid.set_state(0, 1, CellState::Current), CellState::Unvisited);
        assert_eq!(grid.set_state(0, 1, CellState::Visited), CellState::Current);
        assert_eq!(grid.cell_at(0, 1).unwrap().state, CellState::Visited);
    }
}
