use super::{CellState, Coord, Grid, Neighborhood};
use crate::error::{AutomatonError, Result};

/// Largest id space a `CellState` can address
pub const MAX_COLORS: usize = 256;

/// Trait for per-cell automaton rules.
/// A rule is a pure function of the previous generation: it reads the grid
/// and returns the next state of one cell, so every cell can be evaluated
/// independently.
pub trait Rule: Send + Sync {
    /// Name of the rule
    fn name(&self) -> &'static str;

    /// Short description
    fn description(&self) -> &'static str;

    /// Size of the id space the rule works in
    fn color_count(&self) -> usize;

    /// Grid rank the rule is defined for
    fn rank(&self) -> usize;

    /// Compute the next state of the cell at `coord`
    fn next_state(&self, grid: &Grid, coord: Coord) -> CellState;
}

pub(crate) fn validate_color_count(color_count: usize) -> Result<()> {
    if color_count == 0 || color_count > MAX_COLORS {
        return Err(AutomatonError::InvalidColorCount(color_count));
    }
    Ok(())
}

/// Cyclic cellular automaton.
/// A cell advances to its successor id when at least `threshold` neighbors
/// already hold that successor; otherwise it keeps its id.
#[derive(Clone, Debug)]
pub struct CyclicRule {
    color_count: usize,
    threshold: usize,
    neighborhood: Neighborhood,
}

impl CyclicRule {
    /// Default number of colors
    pub const DEFAULT_COLORS: usize = 8;

    /// Default threshold for a rank; the 1D neighborhood only has two cells
    pub const fn default_threshold(rank: usize) -> usize {
        if rank == 1 { 1 } else { 2 }
    }

    /// Thresholds above the neighborhood size are accepted: the rule then
    /// never fires and every cell stays frozen.
    pub fn new(color_count: usize, threshold: usize, rank: usize) -> Result<Self> {
        validate_color_count(color_count)?;
        let neighborhood = Neighborhood::moore(rank);
        if threshold == 0 {
            return Err(AutomatonError::ThresholdOutOfRange {
                threshold,
                neighbors: neighborhood.len(),
            });
        }
        if threshold > neighborhood.len() {
            tracing::warn!(
                threshold,
                neighbors = neighborhood.len(),
                "CCA threshold exceeds neighborhood size, cells will never advance"
            );
        }
        Ok(Self {
            color_count,
            threshold,
            neighborhood,
        })
    }

    pub const fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn neighborhood(&self) -> &Neighborhood {
        &self.neighborhood
    }
}

impl Rule for CyclicRule {
    fn name(&self) -> &'static str {
        "CCA"
    }

    fn description(&self) -> &'static str {
        "Cyclic - advance when enough neighbors hold the next color"
    }

    fn color_count(&self) -> usize {
        self.color_count
    }

    fn rank(&self) -> usize {
        self.neighborhood.rank()
    }

    fn next_state(&self, grid: &Grid, coord: Coord) -> CellState {
        let current = grid.get(coord);
        let next = current.successor(self.color_count);
        if next == current {
            return current;
        }
        let matching = self.neighborhood.count(grid, coord, |s| s == next);
        if matching >= self.threshold { next } else { current }
    }
}

/// Life-like birth/survival rule.
/// Any non-zero id is alive. With more than two colors, a newborn cell takes
/// the majority color among its live neighbors, ties going to the lowest id.
#[derive(Clone, Debug)]
pub struct LifeRule {
    name: &'static str,
    description: &'static str,
    birth: u32,
    survival: u32,
    color_count: usize,
    neighborhood: Neighborhood,
}

fn mask(counts: &[usize]) -> u32 {
    counts.iter().filter(|&&n| n < 32).fold(0, |m, &n| m | (1 << n))
}

fn mask_digits(mask: u32) -> String {
    (0..32)
        .filter(|n| mask & (1 << n) != 0)
        .map(|n| n.to_string())
        .collect()
}

impl LifeRule {
    /// Custom life-like rule
    pub fn new(
        name: &'static str,
        birth: &[usize],
        survival: &[usize],
        color_count: usize,
        rank: usize,
    ) -> Result<Self> {
        validate_color_count(color_count)?;
        if color_count < 2 {
            return Err(AutomatonError::InvalidColorCount(color_count));
        }
        Ok(Self {
            name,
            description: "Life-like",
            birth: mask(birth),
            survival: mask(survival),
            color_count,
            neighborhood: Neighborhood::moore(rank),
        })
    }

    fn preset(
        name: &'static str,
        description: &'static str,
        birth: &[usize],
        survival: &[usize],
        color_count: usize,
    ) -> Self {
        Self {
            name,
            description,
            birth: mask(birth),
            survival: mask(survival),
            color_count,
            neighborhood: Neighborhood::moore(2),
        }
    }

    /// Conway's Game of Life (B3/S23)
    pub fn conway() -> Self {
        Self::preset("Conway", "B3/S23 - Classic", &[3], &[2, 3], 2)
    }

    /// Immigration: Conway with two live colors
    pub fn immigration() -> Self {
        Self::preset("Immigration", "B3/S23 - Two competing colors", &[3], &[2, 3], 3)
    }

    /// QuadLife: Conway with four live colors
    pub fn quad_life() -> Self {
        Self::preset("QuadLife", "B3/S23 - Four competing colors", &[3], &[2, 3], 5)
    }

    /// HighLife (B36/S23), known for replicators
    pub fn high_life() -> Self {
        Self::preset("HighLife", "B36/S23 - Replicators", &[3, 6], &[2, 3], 2)
    }

    /// Seeds (B2/S): every live cell dies each generation
    pub fn seeds() -> Self {
        Self::preset("Seeds", "B2/S - Exploding", &[2], &[], 2)
    }

    /// Day & Night (B3678/S34678), symmetric under inversion
    pub fn day_and_night() -> Self {
        Self::preset("Day&Night", "B3678/S34678", &[3, 6, 7, 8], &[3, 4, 6, 7, 8], 2)
    }

    /// Birth/survival notation, e.g. `B3/S23`
    pub fn notation(&self) -> String {
        format!("B{}/S{}", mask_digits(self.birth), mask_digits(self.survival))
    }

    #[inline]
    pub const fn is_birth(&self, live_neighbors: usize) -> bool {
        live_neighbors < 32 && self.birth & (1 << live_neighbors) != 0
    }

    #[inline]
    pub const fn is_survival(&self, live_neighbors: usize) -> bool {
        live_neighbors < 32 && self.survival & (1 << live_neighbors) != 0
    }

    /// Color of a newborn cell
    fn birth_color(&self, grid: &Grid, coord: Coord) -> CellState {
        if self.color_count == 2 {
            return CellState::ALIVE;
        }
        let mut tally = [0u8; MAX_COLORS];
        self.neighborhood
            .neighbors(grid, coord)
            .filter(|s| s.is_alive())
            .for_each(|s| tally[s.index()] += 1);

        // Strict comparison keeps the lowest id on ties
        let (best, _) = (1..self.color_count).fold((1, 0u8), |(best, most), id| {
            if tally[id] > most { (id, tally[id]) } else { (best, most) }
        });
        CellState(best as u8)
    }
}

impl Rule for LifeRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn color_count(&self) -> usize {
        self.color_count
    }

    fn rank(&self) -> usize {
        self.neighborhood.rank()
    }

    fn next_state(&self, grid: &Grid, coord: Coord) -> CellState {
        let current = grid.get(coord);
        let live = self.neighborhood.count(grid, coord, CellState::is_alive);
        match (current.is_alive(), live) {
            (true, n) if self.is_survival(n) => current,
            (false, n) if self.is_birth(n) => self.birth_color(grid, coord),
            _ => CellState::ZERO,
        }
    }
}

/// Wolfram elementary rule on a 1D ring.
/// The next state of a cell is bit `left << 2 | center << 1 | right` of the code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementaryRule {
    code: u8,
}

impl ElementaryRule {
    pub const fn new(code: u8) -> Self {
        Self { code }
    }

    pub const fn code(&self) -> u8 {
        self.code
    }

    /// Table lookup for one neighborhood
    #[inline]
    pub const fn apply(&self, left: bool, center: bool, right: bool) -> bool {
        let index = (left as u8) << 2 | (center as u8) << 1 | (right as u8);
        (self.code >> index) & 1 == 1
    }
}

impl Rule for ElementaryRule {
    fn name(&self) -> &'static str {
        match self.code {
            30 => "Rule 30",
            90 => "Rule 90",
            110 => "Rule 110",
            _ => "Elementary",
        }
    }

    fn description(&self) -> &'static str {
        match self.code {
            30 => "Chaotic",
            90 => "Sierpinski triangle",
            110 => "Turing complete",
            _ => "Wolfram elementary rule",
        }
    }

    fn color_count(&self) -> usize {
        2
    }

    fn rank(&self) -> usize {
        1
    }

    fn next_state(&self, grid: &Grid, coord: Coord) -> CellState {
        let [x, y, z] = coord;
        let left = grid.get([x - 1, y, z]).is_alive();
        let center = grid.get(coord).is_alive();
        let right = grid.get([x + 1, y, z]).is_alive();
        if self.apply(left, center, right) {
            CellState::ALIVE
        } else {
            CellState::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dimensions;

    fn grid_2d(w: usize, h: usize) -> Grid {
        Grid::new(Dimensions::Two(w, h)).unwrap()
    }

    #[test]
    fn test_cca_advances_at_threshold() {
        let rule = CyclicRule::new(4, 2, 2).unwrap();
        let mut grid = grid_2d(5, 5);
        grid.set([1, 1, 0], CellState(1));
        assert_eq!(rule.next_state(&grid, [2, 2, 0]), CellState(0));

        grid.set([3, 3, 0], CellState(1));
        assert_eq!(rule.next_state(&grid, [2, 2, 0]), CellState(1));
    }

    #[test]
    fn test_cca_ignores_non_successor_colors() {
        let rule = CyclicRule::new(4, 1, 2).unwrap();
        let mut grid = grid_2d(5, 5);
        grid.set([2, 2, 0], CellState(1));
        // Id 3 is not the successor of 1
        grid.set([1, 2, 0], CellState(3));
        assert_eq!(rule.next_state(&grid, [2, 2, 0]), CellState(1));
        grid.set([3, 2, 0], CellState(2));
        assert_eq!(rule.next_state(&grid, [2, 2, 0]), CellState(2));
    }

    #[test]
    fn test_cca_last_color_wraps_to_zero() {
        let rule = CyclicRule::new(3, 1, 2).unwrap();
        let mut grid = grid_2d(3, 3);
        grid.fill(CellState(2));
        grid.set([0, 0, 0], CellState(0));
        assert_eq!(rule.next_state(&grid, [1, 1, 0]), CellState(0));
    }

    #[test]
    fn test_cca_single_color_is_noop() {
        let rule = CyclicRule::new(1, 1, 2).unwrap();
        let grid = grid_2d(3, 3);
        assert_eq!(rule.next_state(&grid, [1, 1, 0]), CellState(0));
    }

    #[test]
    fn test_cca_threshold_validation() {
        assert!(matches!(
            CyclicRule::new(8, 0, 2),
            Err(AutomatonError::ThresholdOutOfRange { neighbors: 8, .. })
        ));
        // Frozen but valid
        let frozen = CyclicRule::new(8, 9, 2).unwrap();
        let mut grid = grid_2d(3, 3);
        grid.fill(CellState(1));
        grid.set([1, 1, 0], CellState(0));
        assert_eq!(frozen.next_state(&grid, [1, 1, 0]), CellState(0));
    }

    #[test]
    fn test_cca_color_count_validation() {
        assert!(CyclicRule::new(0, 2, 2).is_err());
        assert!(CyclicRule::new(257, 2, 2).is_err());
        assert!(CyclicRule::new(256, 2, 2).is_ok());
    }

    #[test]
    fn test_conway_rules() {
        let rule = LifeRule::conway();
        assert!(!rule.is_survival(1));
        assert!(rule.is_survival(2));
        assert!(rule.is_survival(3));
        assert!(!rule.is_survival(4));
        assert!(rule.is_birth(3));
        assert!(!rule.is_birth(2));
        assert_eq!(rule.notation(), "B3/S23");
    }

    #[test]
    fn test_highlife_reproduction() {
        let rule = LifeRule::high_life();
        assert!(rule.is_birth(6));
        assert!(rule.is_birth(3));
        assert_eq!(rule.notation(), "B36/S23");
    }

    #[test]
    fn test_seeds_always_dies() {
        let rule = LifeRule::seeds();
        for n in 0..=8 {
            assert!(!rule.is_survival(n));
        }
        assert!(rule.is_birth(2));
        assert!(!rule.is_birth(3));
    }

    #[test]
    fn test_life_birth_and_death_on_grid() {
        let rule = LifeRule::conway();
        let mut grid = grid_2d(6, 6);
        grid.set([1, 1, 0], CellState::ALIVE);
        grid.set([2, 1, 0], CellState::ALIVE);
        grid.set([3, 1, 0], CellState::ALIVE);
        // Above and below the middle of a horizontal blinker are born
        assert_eq!(rule.next_state(&grid, [2, 0, 0]), CellState::ALIVE);
        assert_eq!(rule.next_state(&grid, [2, 2, 0]), CellState::ALIVE);
        // Ends die of underpopulation
        assert_eq!(rule.next_state(&grid, [1, 1, 0]), CellState::ZERO);
        assert_eq!(rule.next_state(&grid, [2, 1, 0]), CellState::ALIVE);
    }

    #[test]
    fn test_immigration_majority_color() {
        let rule = LifeRule::immigration();
        let mut grid = grid_2d(5, 5);
        grid.set([1, 1, 0], CellState(2));
        grid.set([2, 1, 0], CellState(2));
        grid.set([3, 1, 0], CellState(1));
        assert_eq!(rule.next_state(&grid, [2, 2, 0]), CellState(2));
    }

    #[test]
    fn test_quadlife_tie_goes_to_lowest_id() {
        let rule = LifeRule::quad_life();
        let mut grid = grid_2d(5, 5);
        grid.set([1, 1, 0], CellState(4));
        grid.set([2, 1, 0], CellState(2));
        grid.set([3, 1, 0], CellState(3));
        assert_eq!(rule.next_state(&grid, [2, 2, 0]), CellState(2));
    }

    #[test]
    fn test_survivor_keeps_its_color() {
        let rule = LifeRule::quad_life();
        let mut grid = grid_2d(5, 5);
        grid.set([1, 1, 0], CellState(1));
        grid.set([2, 1, 0], CellState(3));
        grid.set([3, 1, 0], CellState(1));
        assert_eq!(rule.next_state(&grid, [2, 1, 0]), CellState(3));
    }

    #[test]
    fn test_elementary_rule_30_table() {
        let rule = ElementaryRule::new(30);
        // 111 110 101 100 011 010 001 000 -> 0 0 0 1 1 1 1 0
        let expected = [false, true, true, true, true, false, false, false];
        for (index, &alive) in expected.iter().enumerate() {
            let l = index & 4 != 0;
            let c = index & 2 != 0;
            let r = index & 1 != 0;
            assert_eq!(rule.apply(l, c, r), alive, "pattern {index:03b}");
        }
    }

    #[test]
    fn test_elementary_wraps_at_edges() {
        let rule = ElementaryRule::new(90);
        let mut grid = Grid::new(Dimensions::One(5)).unwrap();
        grid.set([0, 0, 0], CellState::ALIVE);
        // Rule 90 is left XOR right; the last cell sees cell 0 as its right neighbor
        assert_eq!(rule.next_state(&grid, [4, 0, 0]), CellState::ALIVE);
        assert_eq!(rule.next_state(&grid, [1, 0, 0]), CellState::ALIVE);
        assert_eq!(rule.next_state(&grid, [0, 0, 0]), CellState::ZERO);
    }
}
