mod camera;
mod config;
mod engine;
mod execution;
mod game_state;

pub use camera::Camera;
pub use config::{
    AppConfig, AutomatonConfig, AutomatonKind, DEFAULT_INTERVAL, DEFAULT_MAX_GENERATIONS, InitialState, MAX_3D_SIZE,
    RendererPreference,
};
pub use engine::{Engine, EngineState, Frame, StepReport};
pub use execution::ExecutionMode;
pub use game_state::{GameState, HISTORY_ROWS, Plane};
