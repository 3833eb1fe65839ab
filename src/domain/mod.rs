mod cell;
mod grid;
mod neighborhood;
mod rules;
mod ant;
mod patterns;
mod palette;
mod automaton;

pub use cell::CellState;
pub use grid::{Coord, Dimensions, Grid, wrap};
pub use neighborhood::Neighborhood;
pub use rules::{Rule, CyclicRule, LifeRule, ElementaryRule, MAX_COLORS};
pub use ant::{AgentState, Heading, LangtonAnt};
pub use patterns::{Pattern, Placement, presets};
pub use palette::{ColorMap, Palette, Rgb};
pub use automaton::Automaton;
