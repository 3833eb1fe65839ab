//! Moore neighborhoods for 1D, 2D and 3D grids.
//!
//! The offsets are every non-zero vector in `{-1, 0, 1}^rank`, giving 2, 8 and
//! 26 neighbors. Lookups go through `Grid::get`, so they wrap toroidally.

use super::{CellState, Coord, Grid};

/// Precomputed neighbor offsets for one dimensionality
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Neighborhood {
    rank: usize,
    offsets: Vec<Coord>,
}

impl Neighborhood {
    /// Moore neighborhood for a grid of the given rank (1, 2 or 3)
    pub fn moore(rank: usize) -> Self {
        let span = |axis: usize| if axis < rank { -1isize..=1 } else { 0..=0 };

        let offsets = span(2)
            .flat_map(|dz| span(1).flat_map(move |dy| span(0).map(move |dx| [dx, dy, dz])))
            .filter(|offset| *offset != [0, 0, 0])
            .collect();

        Self { rank, offsets }
    }

    pub const fn rank(&self) -> usize {
        self.rank
    }

    /// Number of neighbors per cell
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn offsets(&self) -> &[Coord] {
        &self.offsets
    }

    /// Wrapped neighbor coordinates of a cell
    pub fn coords(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.offsets
            .iter()
            .map(move |o| [coord[0] + o[0], coord[1] + o[1], coord[2] + o[2]])
    }

    /// States of all neighbors of a cell
    pub fn neighbors<'a>(&'a self, grid: &'a Grid, coord: Coord) -> impl Iterator<Item = CellState> + 'a {
        self.coords(coord).map(move |c| grid.get(c))
    }

    /// Count neighbors matching a predicate
    #[inline]
    pub fn count(&self, grid: &Grid, coord: Coord, pred: impl Fn(CellState) -> bool) -> usize {
        self.neighbors(grid, coord).filter(|&s| pred(s)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dimensions;

    #[test]
    fn test_sizes_per_rank() {
        assert_eq!(Neighborhood::moore(1).len(), 2);
        assert_eq!(Neighborhood::moore(2).len(), 8);
        assert_eq!(Neighborhood::moore(3).len(), 26);
    }

    #[test]
    fn test_1d_is_left_and_right() {
        let hood = Neighborhood::moore(1);
        assert_eq!(hood.offsets(), &[[-1, 0, 0], [1, 0, 0]]);
    }

    #[test]
    fn test_offsets_unique_and_nonzero() {
        let hood = Neighborhood::moore(3);
        let mut offsets = hood.offsets().to_vec();
        offsets.sort();
        offsets.dedup();
        assert_eq!(offsets.len(), 26);
        assert!(!offsets.contains(&[0, 0, 0]));
    }

    #[test]
    fn test_corner_has_eight_neighbors() {
        let grid = Grid::new(Dimensions::Two(5, 5)).unwrap();
        let hood = Neighborhood::moore(2);
        for coord in [[0, 0, 0], [4, 0, 0], [0, 4, 0], [4, 4, 0], [2, 2, 0]] {
            assert_eq!(hood.neighbors(&grid, coord).count(), 8);
        }
    }

    #[test]
    fn test_corner_neighbors_wrap() {
        let mut grid = Grid::new(Dimensions::Two(5, 5)).unwrap();
        // Opposite corners are neighbors of (0, 0) on a torus
        grid.set([4, 4, 0], CellState::ALIVE);
        grid.set([4, 0, 0], CellState::ALIVE);
        grid.set([0, 4, 0], CellState::ALIVE);
        let hood = Neighborhood::moore(2);
        assert_eq!(hood.count(&grid, [0, 0, 0], CellState::is_alive), 3);
    }

    #[test]
    fn test_3d_neighbors_wrap_through_depth() {
        let mut grid = Grid::new(Dimensions::Three(3, 3, 3)).unwrap();
        grid.set([0, 0, 2], CellState(5));
        let hood = Neighborhood::moore(3);
        assert_eq!(hood.count(&grid, [0, 0, 0], |s| s == CellState(5)), 1);
    }
}
