// Domain layer - grids, neighborhoods, rules, palettes
pub mod domain;

// Application layer - engine, configuration, session state
pub mod application;

pub mod error;

// Infrastructure layer - UI, rendering, input
pub mod ui;
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Automaton, CellState, Coord, Dimensions, Grid, Neighborhood, Palette, Pattern, Rule, presets};
pub use application::{
    AppConfig, AutomatonConfig, AutomatonKind, Camera, Engine, EngineState, ExecutionMode, GameState, InitialState,
    StepReport,
};
pub use error::{AutomatonError, Result};
