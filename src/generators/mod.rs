pub mod backtracker;

use crate::grids::wall_grid::WallGrid;

pub trait Generator {
    fn start(&mut self);
    fn reset(&mut self);
    fn step_generation(&mut self);
    fn next_step(&mut self) -> &WallGrid;
    fn generate_maze(&mut self) -> &WallGrid;
    fn grid(&self) -> &WallGrid;
    fn is_started(&self) -> bool;
    fn is_done(&self) -> bool;
}
