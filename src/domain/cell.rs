/// CellState is the fundamental unit of every automaton: a plain integer id
/// in `[0, color_count)`. Colors live in a separate lookup table, never here.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct CellState(pub u8);

impl CellState {
    /// Id 0: white for Langton's Ant, dead for the life family
    pub const ZERO: Self = Self(0);

    /// Id 1: the canonical live state
    pub const ALIVE: Self = Self(1);

    /// Raw id
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Raw id as an index into palettes and tables
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Binary interpretation used by the life family: any non-zero id is alive
    pub const fn is_alive(self) -> bool {
        self.0 > 0
    }

    /// Next id in the cycle `0 -> 1 -> ... -> color_count-1 -> 0`
    pub const fn successor(self, color_count: usize) -> Self {
        if color_count <= 1 || self.0 as usize + 1 >= color_count {
            Self(0)
        } else {
            Self(self.0 + 1)
        }
    }

    /// Flip between id 0 and id 1
    pub const fn toggle(self) -> Self {
        if self.0 == 0 { Self(1) } else { Self(0) }
    }
}

impl From<u8> for CellState {
    fn from(id: u8) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successor_wraps() {
        assert_eq!(CellState(0).successor(8), CellState(1));
        assert_eq!(CellState(6).successor(8), CellState(7));
        assert_eq!(CellState(7).successor(8), CellState(0));
    }

    #[test]
    fn test_single_color_is_its_own_successor() {
        assert_eq!(CellState(0).successor(1), CellState(0));
    }

    #[test]
    fn test_successor_of_full_id_range() {
        assert_eq!(CellState(255).successor(256), CellState(0));
        assert_eq!(CellState(254).successor(256), CellState(255));
    }

    #[test]
    fn test_alive() {
        assert!(!CellState::ZERO.is_alive());
        assert!(CellState::ALIVE.is_alive());
        assert!(CellState(3).is_alive());
    }

    #[test]
    fn test_toggle() {
        assert_eq!(CellState::ZERO.toggle(), CellState::ALIVE);
        assert_eq!(CellState::ALIVE.toggle(), CellState::ZERO);
    }
}
