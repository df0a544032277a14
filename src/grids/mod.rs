#[allow(dead_code)]
pub mod wall_grid;

use self::wall_grid::Cell;

pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    North = 0,
    South = 1,
    East = 2,
    West = 3,

    Sentinel = 255,
}

impl std::ops::Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Self::Output {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Sentinel => Direction::Sentinel,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Neighborhood {
    pub north: Option<Cell>,
    pub south: Option<Cell>,
    pub east: Option<Cell>,
    pub west: Option<Cell>,

    counter: Direction,
}

impl Neighborhood {
    pub fn new() -> Self {
        Self {
            north: None,
            south: None,
            east: None,
            west: None,
            counter: Direction::North,
        }
    }
}

impl Iterator for Neighborhood {
    type Item = (Cell, Direction);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.counter {
                Direction::North => {
                    self.counter = Direction::South;
                    if let Some(north) = self.north {
                        return Some((north, Direction::North));
                    }
                }
                Direction::South => {
                    self.counter = Direction::East;
                    if let Some(south) = self.south {
                        return Some((south, Direction::South));
                    }
                }
                Direction::East => {
                    self.counter = Direction::West;
                    if let Some(east) = self.east {
                        return Some((east, Direction::East));
                    }
                }
                Direction::West => {
                    // reset counter
                    self.counter = Direction::Sentinel;

                    return if let Some(west) = self.west {
                        Some((west, Direction::West))
                    } else {
                        None
                    };
                }
                Direction::Sentinel => {
                    self.counter = Direction::North;

                    return None;
                }
            }
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum CellState {
    Unvisited,
    Current,
    Visited,
    Backtracked,
}

impl From<CellState> for [f32; 4] {
    fn from(state: CellState) -> Self {
        match state {
            CellState::Unvisited => [0.1, 0.2, 0.3, 1.0],
            CellState::Current => [0.0, 0.0, 0.0, 1.0],
            CellState::Visited => [0.55, 0.15, 0.55, 1.0],
            CellState::Backtracked => [0.4, 0.1, 0.45, 1.0],
        }
    }
}
