//! Error types for automaton construction.
//!
//! Stepping never fails; everything here is a configuration or precondition
//! problem surfaced when a grid, rule, palette or engine is built.

use thiserror::Error;

/// Errors raised while building an automaton.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    /// A grid axis has zero extent
    #[error("invalid grid dimensions: every axis must be at least 1, got {0:?}")]
    InvalidDimensions(Vec<usize>),

    /// Color count of zero, or more ids than a cell state can hold
    #[error("invalid color count {0}: must be between 1 and 256")]
    InvalidColorCount(usize),

    /// Rule requires a fixed number of states
    #[error("{rule} requires exactly {expected} colors, got {got}")]
    ColorCountMismatch {
        rule: &'static str,
        expected: usize,
        got: usize,
    },

    /// Cell id outside the automaton's id space
    #[error("cell id {state} is outside the id space of {color_count} colors")]
    StateOutOfRange { state: u8, color_count: usize },

    /// CCA threshold below 1
    #[error("threshold {threshold} out of range: must be at least 1 (neighborhood has {neighbors} cells)")]
    ThresholdOutOfRange { threshold: usize, neighbors: usize },

    /// Threshold given for a rule that has none
    #[error("{0} takes no threshold")]
    ThresholdNotApplicable(&'static str),

    /// Rule used on a grid of the wrong dimensionality
    #[error("{rule} needs a {expected}D grid, got {got}D")]
    RankMismatch {
        rule: &'static str,
        expected: usize,
        got: usize,
    },

    /// Pattern bounding box does not fit inside the grid
    #[error("pattern '{name}' ({width}x{height}) does not fit in a {grid_width}x{grid_height} grid")]
    PatternTooLarge {
        name: &'static str,
        width: usize,
        height: usize,
        grid_width: usize,
        grid_height: usize,
    },

    /// Random placement could not find a free spot
    #[error("no free space left for pattern '{0}'")]
    NoRoomForPattern(&'static str),

    /// Explicit palette shorter than the id space
    #[error("palette has {got} colors but {needed} are required")]
    PaletteTooSmall { needed: usize, got: usize },

    /// Explicit palette repeats a color, so two ids would look alike
    #[error("palette colors {first} and {second} are identical")]
    DuplicatePaletteColor { first: usize, second: usize },

    /// Color map is not a bijection over the id space
    #[error("color map is not a permutation of 0..{0}")]
    InvalidColorMap(usize),

    /// Route name that matches no automaton
    #[error("unknown automaton '{0}'")]
    UnknownAutomaton(String),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, AutomatonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_descriptive() {
        let err = AutomatonError::ColorCountMismatch {
            rule: "Conway",
            expected: 2,
            got: 8,
        };
        assert_eq!(err.to_string(), "Conway requires exactly 2 colors, got 8");

        let err = AutomatonError::RankMismatch {
            rule: "Langton's Ant",
            expected: 2,
            got: 3,
        };
        assert!(err.to_string().contains("2D"));
    }
}
