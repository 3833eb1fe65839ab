use super::CellState;
use crate::error::{AutomatonError, Result};
use rand::Rng;

/// Cell coordinate. Unused axes of 1D/2D grids are ignored (they have extent 1,
/// so any value wraps to 0).
pub type Coord = [isize; 3];

/// Extent of a 1D, 2D or 3D grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimensions {
    One(usize),
    Two(usize, usize),
    Three(usize, usize, usize),
}

impl Dimensions {
    /// Number of axes in use
    pub const fn rank(&self) -> usize {
        match self {
            Dimensions::One(_) => 1,
            Dimensions::Two(..) => 2,
            Dimensions::Three(..) => 3,
        }
    }

    /// Extents of all three axes, padding unused ones with 1
    pub const fn extents(&self) -> [usize; 3] {
        match *self {
            Dimensions::One(w) => [w, 1, 1],
            Dimensions::Two(w, h) => [w, h, 1],
            Dimensions::Three(w, h, d) => [w, h, d],
        }
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        let [w, h, d] = self.extents();
        w * h * d
    }

    /// Extents of the axes in use only
    pub fn size(&self) -> Vec<usize> {
        self.extents()[..self.rank()].to_vec()
    }

    fn validate(&self) -> Result<()> {
        if self.extents().contains(&0) {
            return Err(AutomatonError::InvalidDimensions(self.size()));
        }
        Ok(())
    }
}

/// Wrap one coordinate onto an axis of extent `n`
#[inline]
pub const fn wrap(i: isize, n: usize) -> usize {
    let n = n as isize;
    ((i % n + n) % n) as usize
}

/// Grid is a toroidal container of cell states.
/// Every access wraps modulo the axis extent, so `-1` aliases the last index
/// and `extent` aliases `0` on every axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    dims: Dimensions,
    cells: Vec<CellState>,
}

impl Grid {
    /// Create a grid with every cell at id 0
    pub fn new(dims: Dimensions) -> Result<Self> {
        dims.validate()?;
        Ok(Self {
            dims,
            cells: vec![CellState::ZERO; dims.cell_count()],
        })
    }

    /// Grid dimensions
    pub const fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Number of axes in use
    pub const fn rank(&self) -> usize {
        self.dims.rank()
    }

    /// Extents of the axes in use
    pub fn size(&self) -> Vec<usize> {
        self.dims.size()
    }

    /// Width and height, for the 2D callers (1D grids report a height of 1)
    pub const fn width_height(&self) -> (usize, usize) {
        let [w, h, _] = self.dims.extents();
        (w, h)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert a (wrapped) coordinate to a flat index, x fastest
    #[inline]
    pub fn index_of(&self, coord: Coord) -> usize {
        let [w, h, d] = self.dims.extents();
        let x = wrap(coord[0], w);
        let y = wrap(coord[1], h);
        let z = wrap(coord[2], d);
        (z * h + y) * w + x
    }

    /// Convert a flat index back to its coordinate
    #[inline]
    pub fn coord_of(&self, index: usize) -> Coord {
        let [w, h, _] = self.dims.extents();
        let x = index % w;
        let y = (index / w) % h;
        let z = index / (w * h);
        [x as isize, y as isize, z as isize]
    }

    /// Cell at a coordinate, wrapping every axis
    #[inline]
    pub fn get(&self, coord: Coord) -> CellState {
        self.cells[self.index_of(coord)]
    }

    /// Set the cell at a coordinate, wrapping every axis
    #[inline]
    pub fn set(&mut self, coord: Coord, state: CellState) {
        let idx = self.index_of(coord);
        self.cells[idx] = state;
    }

    /// Uniform fill
    pub fn fill(&mut self, state: CellState) {
        self.cells.fill(state);
    }

    /// Bulk initialization from a function of the coordinate
    pub fn fill_with(&mut self, mut f: impl FnMut(Coord) -> CellState) {
        let dims = self.dims;
        let [w, h, _] = dims.extents();
        self.cells.iter_mut().enumerate().for_each(|(i, cell)| {
            let coord = [(i % w) as isize, ((i / w) % h) as isize, (i / (w * h)) as isize];
            *cell = f(coord);
        });
    }

    /// Fill with ids drawn uniformly from `[0, color_count)`
    pub fn randomize(&mut self, color_count: usize, rng: &mut impl Rng) {
        let color_count = color_count.max(1);
        self.cells
            .iter_mut()
            .for_each(|cell| *cell = CellState(rng.random_range(0..color_count) as u8));
    }

    /// Read-only view of the flat cell buffer
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [CellState] {
        &mut self.cells
    }

    /// Number of cells holding a given id
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Number of cells with a non-zero id
    pub fn count_alive(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Iterate over all cells with their coordinates
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| (self.coord_of(i), cell))
    }
}
