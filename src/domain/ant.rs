//! Langton's Ant.
//!
//! Unlike the per-cell rules this one carries global state (the agent) and
//! mutates exactly one cell per step, so it is strictly sequential.

use super::{CellState, Coord, Grid};

/// Orientation of the ant. Screen convention: y grows downwards, so North is
/// `(0, -1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    /// Unit vector `(dx, dy)`
    pub const fn vector(self) -> (isize, isize) {
        match self {
            Heading::North => (0, -1),
            Heading::East => (1, 0),
            Heading::South => (0, 1),
            Heading::West => (-1, 0),
        }
    }

    /// Rotate 90 degrees clockwise
    pub const fn turn_clockwise(self) -> Self {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    /// Rotate 90 degrees counter-clockwise
    pub const fn turn_counter_clockwise(self) -> Self {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }
}

/// Position and orientation of the ant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentState {
    pub position: Coord,
    pub heading: Heading,
}

impl AgentState {
    /// Ant at the center of the grid, facing West
    pub fn centered(grid: &Grid) -> Self {
        let (w, h) = grid.width_height();
        Self {
            position: [(w / 2) as isize, (h / 2) as isize, 0],
            heading: Heading::West,
        }
    }
}

/// Langton's Ant rule: on white turn clockwise, on black turn counter-clockwise,
/// flip the cell, then move one step forward with toroidal wrap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LangtonAnt;

impl LangtonAnt {
    pub const COLORS: usize = 2;

    pub fn name(&self) -> &'static str {
        "Langton's Ant"
    }

    pub fn description(&self) -> &'static str {
        "White: turn right, black: turn left"
    }

    /// Advance the agent one step. Returns the coordinate of the flipped cell.
    pub fn step_agent(&self, grid: &mut Grid, agent: &mut AgentState) -> Coord {
        let cell = agent.position;
        let current = grid.get(cell);

        agent.heading = if current.is_alive() {
            agent.heading.turn_counter_clockwise()
        } else {
            agent.heading.turn_clockwise()
        };
        grid.set(cell, if current.is_alive() { CellState::ZERO } else { CellState::ALIVE });

        let (w, h) = grid.width_height();
        let (dx, dy) = agent.heading.vector();
        agent.position = [
            super::grid::wrap(cell[0] + dx, w) as isize,
            super::grid::wrap(cell[1] + dy, h) as isize,
            0,
        ];
        cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dimensions;

    #[test]
    fn test_turns_are_inverse() {
        for h in [Heading::North, Heading::East, Heading::South, Heading::West] {
            assert_eq!(h.turn_clockwise().turn_counter_clockwise(), h);
            assert_eq!(h.turn_clockwise().turn_clockwise().turn_clockwise().turn_clockwise(), h);
        }
    }

    #[test]
    fn test_clockwise_matches_vector_rotation() {
        // Clockwise on screen: (x, y) -> (-y, x)
        for h in [Heading::North, Heading::East, Heading::South, Heading::West] {
            let (x, y) = h.vector();
            assert_eq!(h.turn_clockwise().vector(), (-y, x));
        }
    }

    #[test]
    fn test_white_cell_turns_clockwise() {
        let mut grid = Grid::new(Dimensions::Two(10, 10)).unwrap();
        let mut agent = AgentState::centered(&grid);
        assert_eq!(agent.position, [5, 5, 0]);

        let flipped = LangtonAnt.step_agent(&mut grid, &mut agent);
        assert_eq!(flipped, [5, 5, 0]);
        assert_eq!(grid.get([5, 5, 0]), CellState::ALIVE);
        // West turned clockwise is North
        assert_eq!(agent.heading, Heading::North);
        assert_eq!(agent.position, [5, 4, 0]);
    }

    #[test]
    fn test_black_cell_turns_counter_clockwise() {
        let mut grid = Grid::new(Dimensions::Two(10, 10)).unwrap();
        grid.set([5, 5, 0], CellState::ALIVE);
        let mut agent = AgentState::centered(&grid);

        LangtonAnt.step_agent(&mut grid, &mut agent);
        assert_eq!(grid.get([5, 5, 0]), CellState::ZERO);
        assert_eq!(agent.heading, Heading::South);
        assert_eq!(agent.position, [5, 6, 0]);
    }

    #[test]
    fn test_agent_wraps() {
        let mut grid = Grid::new(Dimensions::Two(4, 4)).unwrap();
        let mut agent = AgentState {
            position: [0, 0, 0],
            heading: Heading::West,
        };
        LangtonAnt.step_agent(&mut grid, &mut agent);
        assert_eq!(agent.position, [0, 3, 0]);
    }

    #[test]
    fn test_four_steps_draw_a_square() {
        let mut grid = Grid::new(Dimensions::Two(10, 10)).unwrap();
        let mut agent = AgentState::centered(&grid);
        for _ in 0..4 {
            LangtonAnt.step_agent(&mut grid, &mut agent);
        }
        assert_eq!(grid.count_alive(), 4);
        // Back at the start, facing West again
        assert_eq!(agent.position, [5, 5, 0]);
        assert_eq!(agent.heading, Heading::West);
    }
}
