use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use super::{AutomatonConfig, AutomatonKind, Engine, ExecutionMode, StepReport};
use crate::domain::{CellState, Coord, Pattern, wrap};
use crate::error::Result;

/// Rows kept for the space-time view of 1D automata
pub const HISTORY_ROWS: usize = 200;

/// Color-index image of whatever the 2D view shows: the grid itself for
/// rank 2, stacked past generations for rank 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plane {
    pub width: usize,
    pub height: usize,
    /// Palette indices, row-major
    pub indices: Vec<usize>,
}

impl Plane {
    pub fn index_at(&self, x: usize, y: usize) -> usize {
        self.indices[y * self.width + x]
    }

    /// RGBA8 bytes through a palette
    pub fn to_rgba(&self, palette: &crate::domain::Palette) -> Vec<u8> {
        self.indices
            .iter()
            .flat_map(|&i| palette.color(i).to_rgba())
            .collect()
    }
}

/// GameState orchestrates the interactive session around an engine.
pub struct GameState {
    pub engine: Engine,
    pub config: AutomatonConfig,
    pub updates_per_second: f32,
    pub last_step_time_ms: f32,  // Step performance metric
    pub last_render_time_ms: f32, // Render performance metric
    /// Index of pattern pending placement (None = normal mode)
    pub pending_pattern_index: Option<usize>,
    /// Id written by the left mouse button
    pub paint_state: CellState,
    history: VecDeque<Vec<CellState>>,
}

impl GameState {
    pub fn new(config: AutomatonConfig) -> Result<Self> {
        let engine = config.clone().build()?;
        let updates_per_second = 1.0 / config.interval.as_secs_f32().max(f32::EPSILON);
        let mut state = Self {
            engine,
            config,
            updates_per_second,
            last_step_time_ms: 0.0,
            last_render_time_ms: 0.0,
            pending_pattern_index: None,
            paint_state: CellState::ALIVE,
            history: VecDeque::with_capacity(HISTORY_ROWS),
        };
        state.restart_history();
        Ok(state)
    }

    pub fn kind(&self) -> AutomatonKind {
        self.config.kind
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    /// Switch automaton, keeping side length and seed
    pub fn set_kind(&mut self, kind: AutomatonKind) -> Result<()> {
        let size = kind.clamp_size(self.side_length());
        let mut config = AutomatonConfig::for_kind(kind, size)
            .with_execution(self.engine.execution())
            .with_interval(self.engine.interval());
        config.seed = self.config.seed;
        self.rebuild(config)
    }

    /// Rebuild with a new side length
    pub fn resize(&mut self, size: usize) -> Result<()> {
        let mut config = self.config.clone();
        config.dimensions = config.kind.dimensions(config.kind.clamp_size(size));
        config.execution = self.engine.execution();
        config.interval = self.engine.interval();
        self.rebuild(config)
    }

    fn rebuild(&mut self, config: AutomatonConfig) -> Result<()> {
        self.engine = config.clone().build()?;
        info!(kind = config.kind.route(), "automaton switched");
        self.config = config;
        self.pending_pattern_index = None;
        self.paint_state = CellState::ALIVE;
        self.restart_history();
        Ok(())
    }

    fn side_length(&self) -> usize {
        self.config.dimensions.extents()[0]
    }

    pub fn set_execution(&mut self, execution: ExecutionMode) {
        self.engine.set_execution(execution);
    }

    /// Toggle play/pause state
    pub fn toggle_running(mut self) -> Self {
        if self.engine.is_running() {
            self.engine.stop();
        } else if self.engine.grid().rank() == 1 {
            // One run fills the space-time view
            self.engine
                .start(self.engine.interval(), Some(HISTORY_ROWS as u64 - 1));
        } else {
            self.engine.resume();
        }
        self
    }

    /// Stop and zero the grid
    pub fn clear(mut self) -> Self {
        self.engine.clear();
        self.restart_history();
        self
    }

    /// Reseed from the initial-state policy
    pub fn reset(mut self) -> Self {
        match self.engine.reset() {
            Ok(()) => self.restart_history(),
            Err(err) => warn!(%err, "reset failed, keeping the current generation"),
        }
        self
    }

    /// Advance exactly one generation regardless of the run state
    pub fn step_once(mut self) -> Self {
        let report = self.timed_step(|engine| Some(engine.step()));
        self.record(report);
        self
    }

    /// Adjust simulation speed
    pub fn adjust_speed(mut self, delta: f32) -> Self {
        self.updates_per_second = (self.updates_per_second + delta).clamp(1.0, 120.0);
        self.engine
            .set_interval(Duration::from_secs_f32(1.0 / self.updates_per_second));
        self
    }

    pub fn toggle_execution(mut self) -> Self {
        let execution = self.engine.execution().toggled();
        self.engine.set_execution(execution);
        info!(execution = execution.name(), "execution mode changed");
        self
    }

    /// Cycle the id painted by the left mouse button through the live ids
    pub fn cycle_paint_state(mut self) -> Self {
        let colors = self.engine.color_count();
        let next = self.paint_state.successor(colors);
        self.paint_state = if next == CellState::ZERO && colors > 1 {
            CellState::ALIVE
        } else {
            next
        };
        self
    }

    /// Update simulation by one frame
    pub fn tick(mut self, delta_time: f32) -> Self {
        let elapsed = Duration::from_secs_f32(delta_time.max(0.0));
        let report = self.timed_step(|engine| engine.tick(elapsed));
        self.record(report);
        self
    }

    fn timed_step(&mut self, step: impl FnOnce(&mut Engine) -> Option<StepReport>) -> Option<StepReport> {
        let start = Instant::now();
        let report = step(&mut self.engine);
        if report.is_some() {
            self.last_step_time_ms = start.elapsed().as_secs_f32() * 1000.0;
        }
        report
    }

    fn record(&mut self, report: Option<StepReport>) {
        if report.is_some() && self.engine.grid().rank() == 1 {
            self.push_history();
        }
    }

    fn restart_history(&mut self) {
        self.history.clear();
        if self.engine.grid().rank() == 1 {
            self.push_history();
        }
    }

    fn push_history(&mut self) {
        if self.history.len() == HISTORY_ROWS {
            self.history.pop_front();
        }
        self.history.push_back(self.engine.grid().cells().to_vec());
    }

    /// Past generations of a 1D automaton, oldest first
    pub fn history(&self) -> impl Iterator<Item = &[CellState]> {
        self.history.iter().map(Vec::as_slice)
    }

    /// The 2D image to draw. Returns `None` for 3D grids.
    pub fn plane(&self) -> Option<Plane> {
        let grid = self.engine.grid();
        let map = self.engine.color_map();
        match grid.rank() {
            1 => {
                let width = grid.len();
                let mut indices = vec![map.color_index(CellState::ZERO); width * HISTORY_ROWS];
                for (row, cells) in self.history.iter().enumerate() {
                    let start = row * width;
                    for (slot, &cell) in indices[start..start + width].iter_mut().zip(cells) {
                        *slot = map.color_index(cell);
                    }
                }
                Some(Plane {
                    width,
                    height: HISTORY_ROWS,
                    indices,
                })
            }
            2 => {
                let (width, height) = grid.width_height();
                Some(Plane {
                    width,
                    height,
                    indices: self.engine.frame().color_indices(map),
                })
            }
            _ => None,
        }
    }

    /// Paint one cell of a 2D grid; positions wrap
    pub fn paint(&mut self, x: isize, y: isize, erase: bool) {
        if self.engine.grid().rank() != 2 {
            return;
        }
        let state = if erase { CellState::ZERO } else { self.paint_state };
        let coord: Coord = [x, y, 0];
        if let Err(err) = self.engine.set_cell(coord, state) {
            warn!(%err, "paint rejected");
        }
    }

    /// Stamp a pattern centered on a grid position
    pub fn place_pattern(&mut self, pattern: &Pattern, x: isize, y: isize) {
        let (width, height) = self.engine.grid().width_height();
        let px = wrap(x - pattern.width as isize / 2, width);
        let py = wrap(y - pattern.height as isize / 2, height);
        let state = if self.engine.color_count() > 1 { self.paint_state } else { CellState::ZERO };
        match self.engine.place_pattern(pattern, px, py, state) {
            Ok(()) => info!(pattern = pattern.name, x = px, y = py, "pattern placed"),
            Err(err) => warn!(%err, "pattern rejected"),
        }
        self.pending_pattern_index = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{EngineState, InitialState};
    use crate::domain::presets;

    fn session(kind: AutomatonKind, size: usize) -> GameState {
        GameState::new(AutomatonConfig::for_kind(kind, size).with_seed(3)).unwrap()
    }

    #[test]
    fn test_toggle_running() {
        let state = session(AutomatonKind::Cca2D, 20).toggle_running();
        assert!(state.is_running());
        let state = state.toggle_running();
        assert_eq!(state.engine.state(), EngineState::Stopped);
    }

    #[test]
    fn test_tick_steps_only_while_running() {
        let state = session(AutomatonKind::Conway, 20).tick(1.0);
        assert_eq!(state.engine.generation(), 0);

        let state = state.toggle_running().tick(1.0);
        assert_eq!(state.engine.generation(), 1);
    }

    #[test]
    fn test_adjust_speed_updates_interval() {
        let state = session(AutomatonKind::Conway, 10);
        let before = state.engine.interval();
        let state = state.adjust_speed(-30.0);
        assert!(state.engine.interval() > before);
        let state = state.adjust_speed(-1000.0);
        assert_eq!(state.updates_per_second, 1.0);
    }

    #[test]
    fn test_history_tracks_1d_generations() {
        let mut state = session(AutomatonKind::Rule90, 31);
        assert_eq!(state.history().count(), 1);
        for _ in 0..5 {
            state = state.step_once();
        }
        assert_eq!(state.history().count(), 6);

        let plane = state.plane().unwrap();
        assert_eq!(plane.width, 31);
        assert_eq!(plane.height, HISTORY_ROWS);
        // Rule 90 from a single seed: row 1 has the two cells beside the center
        assert_eq!(plane.index_at(14, 1), 1);
        assert_eq!(plane.index_at(16, 1), 1);
        assert_eq!(plane.index_at(15, 1), 0);

        let state = state.clear();
        assert_eq!(state.history().count(), 1);
    }

    #[test]
    fn test_1d_run_stops_when_view_is_full() {
        let state = session(AutomatonKind::Rule110, 16).toggle_running();
        assert_eq!(state.engine.max_generations(), Some(HISTORY_ROWS as u64 - 1));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut state = session(AutomatonKind::Rule30, 16);
        for _ in 0..HISTORY_ROWS + 10 {
            state = state.step_once();
        }
        assert_eq!(state.history().count(), HISTORY_ROWS);
    }

    #[test]
    fn test_3d_has_no_plane() {
        let state = session(AutomatonKind::Cca3D, 6);
        assert!(state.plane().is_none());
    }

    #[test]
    fn test_paint_wraps_and_erases() {
        let mut state = GameState::new(
            AutomatonConfig::for_kind(AutomatonKind::Conway, 10)
                .with_initial_state(InitialState::Uniform(CellState::ZERO)),
        )
        .unwrap();
        state.paint(-1, -1, false);
        assert!(state.engine.grid().get([9, 9, 0]).is_alive());
        state.paint(9, 9, true);
        assert_eq!(state.engine.grid().count_alive(), 0);
    }

    #[test]
    fn test_cycle_paint_state_skips_zero() {
        let state = session(AutomatonKind::Immigration, 10);
        let state = state.cycle_paint_state();
        assert_eq!(state.paint_state, CellState(2));
        let state = state.cycle_paint_state();
        assert_eq!(state.paint_state, CellState(1));
    }

    #[test]
    fn test_switch_kind_and_resize() {
        let mut state = session(AutomatonKind::Cca2D, 24);
        state.set_kind(AutomatonKind::Langton).unwrap();
        assert_eq!(state.kind(), AutomatonKind::Langton);
        assert_eq!(state.engine.grid().size(), vec![24, 24]);

        state.resize(12).unwrap();
        assert_eq!(state.engine.grid().size(), vec![12, 12]);
        assert!(state.engine.agent().is_some());
    }

    #[test]
    fn test_3d_side_is_capped() {
        let mut state = session(AutomatonKind::Cca2D, 100);
        state.set_kind(AutomatonKind::Cca3D).unwrap();
        assert_eq!(state.engine.grid().size(), vec![32, 32, 32]);
    }

    #[test]
    fn test_place_pattern_centered() {
        let mut state = GameState::new(
            AutomatonConfig::for_kind(AutomatonKind::Conway, 20)
                .with_initial_state(InitialState::Uniform(CellState::ZERO)),
        )
        .unwrap();
        state.pending_pattern_index = Some(0);
        state.place_pattern(&presets::block(), 10, 10);
        assert_eq!(state.engine.grid().count_alive(), 4);
        assert!(state.engine.grid().get([9, 9, 0]).is_alive());
        assert!(state.pending_pattern_index.is_none());
    }
}
