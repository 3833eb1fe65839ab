use super::{CellState, Grid};
use crate::error::{AutomatonError, Result};
use rand::Rng;

/// Attempts at finding a free spot before giving up on a random placement
const PLACEMENT_ATTEMPTS: usize = 256;

/// Represents a pattern that can be placed on a 2D grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<(usize, usize)>, // Relative coordinates of alive cells
}

/// Axis-aligned footprint of a placed pattern
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Placement {
    fn overlaps(&self, other: &Placement) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

impl Pattern {
    /// Create a new pattern from alive cell coordinates
    pub fn new(name: &'static str, description: &'static str, cells: Vec<(usize, usize)>) -> Self {
        let width = cells.iter().map(|(x, _)| *x).max().unwrap_or(0) + 1;
        let height = cells.iter().map(|(_, y)| *y).max().unwrap_or(0) + 1;
        Self { name, description, width, height, cells }
    }

    /// Create a pattern from a 0/1 matrix, one slice per row. The matrix size
    /// is kept as the bounding box even when edge rows or columns are empty.
    pub fn from_rows(name: &'static str, description: &'static str, rows: &[&[u8]]) -> Self {
        let cells = rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &v)| v != 0)
                    .map(move |(x, _)| (x, y))
            })
            .collect();
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        Self { name, description, width, height: rows.len(), cells }
    }

    /// Same pattern with rows and columns swapped
    pub fn transposed(&self) -> Self {
        Self {
            name: self.name,
            description: self.description,
            width: self.height,
            height: self.width,
            cells: self.cells.iter().map(|&(x, y)| (y, x)).collect(),
        }
    }

    /// Same pattern flipped left to right
    pub fn mirrored(&self) -> Self {
        Self {
            name: self.name,
            description: self.description,
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|&(x, y)| (self.width - 1 - x, y)).collect(),
        }
    }

    /// A differently looking orientation: the transpose when it differs,
    /// otherwise the mirror image. `None` for fully symmetric patterns.
    pub fn alternate_orientation(&self) -> Option<Self> {
        [self.transposed(), self.mirrored()]
            .into_iter()
            .find(|candidate| !self.same_shape(candidate))
    }

    pub fn has_orientations(&self) -> bool {
        self.alternate_orientation().is_some()
    }

    fn same_shape(&self, other: &Pattern) -> bool {
        let mut a = self.cells.clone();
        let mut b = other.cells.clone();
        a.sort_unstable();
        b.sort_unstable();
        (self.width, self.height) == (other.width, other.height) && a == b
    }

    pub fn population(&self) -> usize {
        self.cells.len()
    }

    /// Place pattern on grid at specified position, writing live cells only.
    /// Positions wrap toroidally like every other grid access.
    pub fn place_on(&self, grid: &mut Grid, x: usize, y: usize, state: CellState) {
        for &(dx, dy) in &self.cells {
            grid.set([(x + dx) as isize, (y + dy) as isize, 0], state);
        }
    }

    /// Place pattern at a uniformly random in-bounds offset whose bounding box
    /// does not overlap any of `taken`. The new footprint is appended to `taken`.
    pub fn place_randomly(
        &self,
        grid: &mut Grid,
        state: CellState,
        taken: &mut Vec<Placement>,
        rng: &mut impl Rng,
    ) -> Result<Placement> {
        let (grid_width, grid_height) = grid.width_height();
        if self.width > grid_width || self.height > grid_height {
            return Err(AutomatonError::PatternTooLarge {
                name: self.name,
                width: self.width,
                height: self.height,
                grid_width,
                grid_height,
            });
        }

        for _ in 0..PLACEMENT_ATTEMPTS {
            let candidate = Placement {
                x: rng.random_range(0..=grid_width - self.width),
                y: rng.random_range(0..=grid_height - self.height),
                width: self.width,
                height: self.height,
            };
            if taken.iter().any(|p| p.overlaps(&candidate)) {
                continue;
            }
            self.place_on(grid, candidate.x, candidate.y, state);
            taken.push(candidate);
            return Ok(candidate);
        }

        Err(AutomatonError::NoRoomForPattern(self.name))
    }
}

/// Classic Game of Life patterns library
pub mod presets {
    use super::*;

    /// Glider - simplest spaceship, moves diagonally
    pub fn glider() -> Pattern {
        Pattern::new(
            "Glider",
            "Moves diagonally (period 4)",
            vec![
                (1, 0),
                (2, 1),
                (0, 2), (1, 2), (2, 2),
            ],
        )
    }

    /// Blinker - period 2 oscillator, horizontal
    pub fn blinker() -> Pattern {
        Pattern::from_rows("Blinker", "Oscillator (period 2)", &[&[1, 1, 1]])
    }

    /// Toad - period 2 oscillator
    pub fn toad() -> Pattern {
        Pattern::from_rows(
            "Toad",
            "Oscillator (period 2)",
            &[
                &[0, 1, 1, 1],
                &[1, 1, 1, 0],
            ],
        )
    }

    /// Beacon - period 2 oscillator
    pub fn beacon() -> Pattern {
        Pattern::from_rows(
            "Beacon",
            "Oscillator (period 2)",
            &[
                &[1, 1, 0, 0],
                &[1, 1, 0, 0],
                &[0, 0, 1, 1],
                &[0, 0, 1, 1],
            ],
        )
    }

    /// Pulsar - period 3 oscillator
    pub fn pulsar() -> Pattern {
        Pattern::from_rows(
            "Pulsar",
            "Oscillator (period 3)",
            &[
                &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
                &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
                &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
                &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
                &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
                &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
                &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
                &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
            ],
        )
    }

    /// Pentadecathlon - period 15 oscillator
    pub fn pentadecathlon() -> Pattern {
        Pattern::from_rows(
            "Pentadecathlon",
            "Oscillator (period 15)",
            &[
                &[0, 0, 1, 0, 0, 0, 0, 1, 0, 0],
                &[1, 1, 0, 1, 1, 1, 1, 0, 1, 1],
                &[0, 0, 1, 0, 0, 0, 0, 1, 0, 0],
            ],
        )
    }

    /// Lightweight Spaceship (LWSS)
    pub fn lwss() -> Pattern {
        Pattern::new(
            "LWSS",
            "Lightweight Spaceship (period 4)",
            vec![
                (1, 0), (4, 0),
                (0, 1),
                (0, 2), (4, 2),
                (0, 3), (1, 3), (2, 3), (3, 3),
            ],
        )
    }

    /// Gosper Glider Gun - produces gliders indefinitely
    pub fn glider_gun() -> Pattern {
        Pattern::new(
            "Gosper Glider Gun",
            "Produces gliders (period 30)",
            vec![
                (0, 4), (0, 5), (1, 4), (1, 5),
                (10, 4), (10, 5), (10, 6),
                (11, 3), (11, 7),
                (12, 2), (12, 8),
                (13, 2), (13, 8),
                (14, 5),
                (15, 3), (15, 7),
                (16, 4), (16, 5), (16, 6),
                (17, 5),
                (20, 2), (20, 3), (20, 4),
                (21, 2), (21, 3), (21, 4),
                (22, 1), (22, 5),
                (24, 0), (24, 1), (24, 5), (24, 6),
                (34, 2), (34, 3), (35, 2), (35, 3),
            ],
        )
    }

    /// R-pentomino - classic methuselah (stabilizes after 1103 generations)
    pub fn r_pentomino() -> Pattern {
        Pattern::new(
            "R-pentomino",
            "Methuselah - stabilizes at gen 1103",
            vec![
                (1, 0), (2, 0),
                (0, 1), (1, 1),
                (1, 2),
            ],
        )
    }

    /// Acorn - small methuselah that stabilizes after 5206 generations
    pub fn acorn() -> Pattern {
        Pattern::new(
            "Acorn",
            "Methuselah - stabilizes at gen 5206",
            vec![
                (1, 0),
                (3, 1),
                (0, 2), (1, 2), (4, 2), (5, 2), (6, 2),
            ],
        )
    }

    /// Block - simple still life
    pub fn block() -> Pattern {
        Pattern::from_rows("Block", "Still life", &[&[1, 1], &[1, 1]])
    }

    /// Oscillators seeded by the pattern-set initial state
    pub fn oscillators() -> Vec<Pattern> {
        vec![blinker(), beacon(), pulsar(), pentadecathlon()]
    }

    /// Get all available patterns
    pub fn all_patterns() -> Vec<Pattern> {
        vec![
            block(),
            blinker(),
            toad(),
            beacon(),
            pulsar(),
            pentadecathlon(),
            glider(),
            lwss(),
            glider_gun(),
            r_pentomino(),
            acorn(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dimensions;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_from_rows_keeps_matrix_bounds() {
        let pulsar = presets::pulsar();
        assert_eq!((pulsar.width, pulsar.height), (13, 13));
        assert_eq!(pulsar.population(), 48);
    }

    #[test]
    fn test_transpose() {
        let blinker = presets::blinker();
        assert_eq!((blinker.width, blinker.height), (3, 1));
        let vertical = blinker.transposed();
        assert_eq!((vertical.width, vertical.height), (1, 3));
        assert_eq!(vertical.cells, vec![(0, 0), (0, 1), (0, 2)]);
        assert!(blinker.has_orientations());
        assert!(!presets::block().has_orientations());
    }

    #[test]
    fn test_beacon_falls_back_to_mirror() {
        let beacon = presets::beacon();
        let alternate = beacon.alternate_orientation().unwrap();
        assert_eq!((alternate.width, alternate.height), (4, 4));

        let mut cells = alternate.cells.clone();
        cells.sort_unstable();
        assert_eq!(cells, vec![(0, 2), (0, 3), (1, 2), (1, 3), (2, 0), (2, 1), (3, 0), (3, 1)]);
        assert_eq!(presets::blinker().alternate_orientation(), Some(presets::blinker().transposed()));
        assert_eq!(presets::block().alternate_orientation(), None);
    }

    #[test]
    fn test_place_on_wraps() {
        let mut grid = Grid::new(Dimensions::Two(5, 5)).unwrap();
        presets::block().place_on(&mut grid, 4, 4, CellState::ALIVE);
        assert_eq!(grid.count_alive(), 4);
        assert!(grid.get([0, 0, 0]).is_alive());
        assert!(grid.get([4, 0, 0]).is_alive());
    }

    #[test]
    fn test_too_large_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = Grid::new(Dimensions::Two(10, 10)).unwrap();
        let result = presets::pulsar().place_randomly(&mut grid, CellState::ALIVE, &mut Vec::new(), &mut rng);
        assert!(matches!(result, Err(AutomatonError::PatternTooLarge { .. })));
        assert_eq!(grid.count_alive(), 0);
    }

    #[test]
    fn test_random_placements_do_not_overlap() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = Grid::new(Dimensions::Two(60, 60)).unwrap();
        let mut taken = Vec::new();
        for pattern in presets::oscillators() {
            let placement = pattern
                .place_randomly(&mut grid, CellState::ALIVE, &mut taken, &mut rng)
                .unwrap();
            assert!(placement.x + placement.width <= 60);
            assert!(placement.y + placement.height <= 60);
        }
        for (i, a) in taken.iter().enumerate() {
            for b in &taken[i + 1..] {
                assert!(!a.overlaps(b));
            }
        }
        let expected: usize = presets::oscillators().iter().map(Pattern::population).sum();
        assert_eq!(grid.count_alive(), expected);
    }

    #[test]
    fn test_no_room_reported() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::new(Dimensions::Two(2, 2)).unwrap();
        let mut taken = Vec::new();
        presets::block().place_randomly(&mut grid, CellState::ALIVE, &mut taken, &mut rng).unwrap();
        let again = presets::block().place_randomly(&mut grid, CellState::ALIVE, &mut taken, &mut rng);
        assert!(matches!(again, Err(AutomatonError::NoRoomForPattern("Block"))));
    }
}
