use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::{info, trace};

use super::{AutomatonConfig, ExecutionMode, InitialState};
use crate::domain::{
    AgentState, Automaton, CellState, ColorMap, Coord, Dimensions, Grid, Palette, Pattern, Rule,
};
use crate::error::{AutomatonError, Result};

/// Lifecycle of an engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// Freshly seeded, not started
    Idle,
    /// Stepping on every elapsed interval
    Running,
    /// Halted by `stop`, `clear` or the generation limit
    Stopped,
}

/// Outcome of one generation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// Index of the generation just produced
    pub generation: u64,
    /// Cells whose id differs from the previous generation
    pub changed_cells: usize,
}

impl StepReport {
    /// Whether anything needs redrawing
    pub const fn changed(&self) -> bool {
        self.changed_cells > 0
    }
}

/// Read-only view of the current generation handed to renderers
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub generation: u64,
    pub dimensions: Dimensions,
    pub cells: &'a [CellState],
}

impl Frame<'_> {
    /// Palette index of every cell, in grid order
    pub fn color_indices(&self, map: &ColorMap) -> Vec<usize> {
        self.cells.iter().map(|&c| map.color_index(c)).collect()
    }

    /// RGBA8 buffer, x fastest, for texture uploads
    pub fn to_rgba(&self, palette: &Palette, map: &ColorMap) -> Vec<u8> {
        self.cells
            .iter()
            .flat_map(|&c| palette.color(map.color_index(c)).to_rgba())
            .collect()
    }
}

/// Engine owns the grid and advances it one generation at a time.
///
/// Two generation buffers are kept; `active` indexes the current one and a
/// step writes the other before swapping the index, so every neighbor read of
/// generation n+1 sees generation n only.
pub struct Engine {
    automaton: Automaton,
    buffers: [Grid; 2],
    active: usize,
    generation: u64,
    state: EngineState,
    execution: ExecutionMode,
    initial_state: InitialState,
    palette: Palette,
    color_map: ColorMap,
    rng: StdRng,
    interval: Duration,
    max_generations: Option<u64>,
    steps_since_start: u64,
    since_last_step: Duration,
    /// Cell flipped by the last agent step, used to bring the back buffer up to date
    last_flip: Option<Coord>,
    /// Back buffer differs from the previous generation by more than `last_flip`
    needs_resync: bool,
}

/// Current and next buffers, borrowed disjointly
fn split_buffers(buffers: &mut [Grid; 2], active: usize) -> (&Grid, &mut Grid) {
    let [first, second] = buffers;
    if active == 0 { (&*first, second) } else { (&*second, first) }
}

fn advance_serial(rule: &dyn Rule, current: &Grid, next: &mut Grid) -> usize {
    next.cells_mut()
        .iter_mut()
        .enumerate()
        .map(|(i, cell)| {
            *cell = rule.next_state(current, current.coord_of(i));
            (*cell != current.cells()[i]) as usize
        })
        .sum()
}

fn advance_parallel(rule: &dyn Rule, current: &Grid, next: &mut Grid) -> usize {
    next.cells_mut()
        .par_iter_mut()
        .enumerate()
        .map(|(i, cell)| {
            *cell = rule.next_state(current, current.coord_of(i));
            (*cell != current.cells()[i]) as usize
        })
        .sum()
}

impl Engine {
    /// Build and seed an engine. All configuration errors surface here.
    pub fn new(config: AutomatonConfig) -> Result<Self> {
        let grid = Grid::new(config.dimensions)?;
        let automaton = config.build_automaton(&grid)?;
        let color_count = automaton.color_count();

        let initial_state = config.initial_state();
        if let InitialState::Uniform(state) = &initial_state {
            if state.index() >= color_count {
                return Err(AutomatonError::StateOutOfRange {
                    state: state.id(),
                    color_count,
                });
            }
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let palette = Palette::generate(color_count, config.palette_colors.as_deref(), &mut rng)?;

        let mut engine = Self {
            automaton,
            buffers: [grid.clone(), grid],
            active: 0,
            generation: 0,
            state: EngineState::Idle,
            execution: config.execution,
            initial_state,
            palette,
            color_map: ColorMap::identity(color_count),
            rng,
            interval: config.interval,
            max_generations: config.max_generations,
            steps_since_start: 0,
            since_last_step: Duration::ZERO,
            last_flip: None,
            needs_resync: false,
        };
        engine.reset()?;

        info!(
            automaton = engine.automaton.name(),
            size = ?engine.grid().size(),
            colors = color_count,
            execution = engine.execution.name(),
            "engine created"
        );
        Ok(engine)
    }

    /// Reseed the grid from the initial-state policy and return to `Idle`.
    /// The new generation is built off to the side; on error the engine is
    /// left exactly as it was.
    pub fn reset(&mut self) -> Result<()> {
        let color_count = self.automaton.color_count();
        let mut grid = self.buffers[self.active].clone();

        match &self.initial_state {
            InitialState::Random => grid.randomize(color_count, &mut self.rng),
            InitialState::Uniform(state) => grid.fill(*state),
            InitialState::CenterSeed => {
                grid.fill(CellState::ZERO);
                let [w, h, d] = grid.dimensions().extents();
                grid.set([(w / 2) as isize, (h / 2) as isize, (d / 2) as isize], CellState::ALIVE);
            }
            InitialState::PatternSet(patterns) => {
                grid.fill(CellState::ZERO);
                seed_patterns(&mut grid, patterns, color_count, &mut self.rng)?;
            }
        }

        if let Automaton::Langton { agent, .. } = &mut self.automaton {
            *agent = AgentState::centered(&grid);
        }

        self.buffers[self.active] = grid;
        self.sync_back_buffer();
        self.generation = 0;
        self.steps_since_start = 0;
        self.since_last_step = Duration::ZERO;
        self.state = EngineState::Idle;
        info!(automaton = self.automaton.name(), "grid reset");
        Ok(())
    }

    /// Begin stepping every `interval`, stopping after `max_generations`
    /// steps when a limit is given
    pub fn start(&mut self, interval: Duration, max_generations: Option<u64>) {
        self.interval = interval;
        self.max_generations = max_generations;
        self.steps_since_start = 0;
        self.since_last_step = Duration::ZERO;
        self.state = EngineState::Running;
        info!(?interval, ?max_generations, "engine started");
    }

    /// Start with the configured interval and limit
    pub fn resume(&mut self) {
        self.start(self.interval, self.max_generations);
    }

    /// Cancel pending steps. The grid is left as it is.
    pub fn stop(&mut self) {
        if self.state == EngineState::Running {
            info!(generation = self.generation, "engine stopped");
        }
        self.state = EngineState::Stopped;
    }

    /// Stop, then fill the grid with id 0. Langton's ant also returns to the
    /// center facing West.
    pub fn clear(&mut self) {
        self.stop();
        self.buffers[self.active].fill(CellState::ZERO);
        if let Automaton::Langton { agent, .. } = &mut self.automaton {
            *agent = AgentState::centered(&self.buffers[self.active]);
        }
        self.sync_back_buffer();
        self.generation = 0;
        info!("grid cleared");
    }

    /// Compute the next generation and swap buffers
    pub fn step(&mut self) -> StepReport {
        let changed_cells = if self.automaton.is_per_cell() {
            self.step_cells()
        } else {
            self.step_agent()
        };
        self.generation += 1;
        trace!(generation = self.generation, changed_cells, "step");
        StepReport {
            generation: self.generation,
            changed_cells,
        }
    }

    /// Cooperative scheduler. Call with the time since the previous call; runs
    /// at most one step once the interval has elapsed.
    pub fn tick(&mut self, elapsed: Duration) -> Option<StepReport> {
        if self.state != EngineState::Running {
            return None;
        }
        if self.limit_reached() {
            self.finish_run();
            return None;
        }

        self.since_last_step += elapsed;
        if self.since_last_step < self.interval {
            return None;
        }
        self.since_last_step = Duration::ZERO;

        let report = self.step();
        self.steps_since_start += 1;
        if self.limit_reached() {
            self.finish_run();
        }
        Some(report)
    }

    fn limit_reached(&self) -> bool {
        self.max_generations
            .is_some_and(|max| self.steps_since_start >= max)
    }

    fn finish_run(&mut self) {
        info!(steps = self.steps_since_start, "generation limit reached");
        self.stop();
    }

    fn step_cells(&mut self) -> usize {
        let Self {
            automaton,
            buffers,
            active,
            execution,
            last_flip,
            needs_resync,
            ..
        } = self;
        let Some(rule) = automaton.cell_rule() else {
            return 0;
        };
        let (current, next) = split_buffers(buffers, *active);
        let changed = match execution {
            ExecutionMode::Serial => advance_serial(rule, current, next),
            ExecutionMode::Parallel => advance_parallel(rule, current, next),
        };
        *active = 1 - *active;
        *last_flip = None;
        *needs_resync = false;
        changed
    }

    /// Langton's Ant: the back buffer holds the generation before the current
    /// one, so it is brought forward before the single flip.
    fn step_agent(&mut self) -> usize {
        let Self {
            automaton,
            buffers,
            active,
            last_flip,
            needs_resync,
            ..
        } = self;
        let Automaton::Langton { ant, agent } = automaton else {
            return 0;
        };
        let (current, next) = split_buffers(buffers, *active);
        if *needs_resync {
            next.clone_from(current);
            *needs_resync = false;
        } else if let Some(cell) = *last_flip {
            next.set(cell, current.get(cell));
        }
        *last_flip = Some(ant.step_agent(next, agent));
        *active = 1 - *active;
        1
    }

    fn sync_back_buffer(&mut self) {
        let (current, back) = split_buffers(&mut self.buffers, self.active);
        back.clone_from(current);
        self.last_flip = None;
        self.needs_resync = false;
    }

    /// Current generation
    pub fn grid(&self) -> &Grid {
        &self.buffers[self.active]
    }

    /// Generation before the current one
    pub fn previous_grid(&self) -> &Grid {
        &self.buffers[1 - self.active]
    }

    /// Snapshot for renderers
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            generation: self.generation,
            dimensions: self.grid().dimensions(),
            cells: self.grid().cells(),
        }
    }

    /// Flat indices of cells that changed in the last generation
    pub fn dirty_cells(&self) -> Vec<usize> {
        self.grid()
            .cells()
            .iter()
            .zip(self.previous_grid().cells())
            .enumerate()
            .filter(|(_, (now, before))| now != before)
            .map(|(i, _)| i)
            .collect()
    }

    /// Overwrite one cell of the current generation
    pub fn set_cell(&mut self, coord: Coord, state: CellState) -> Result<()> {
        self.check_state(state)?;
        self.buffers[self.active].set(coord, state);
        self.needs_resync = true;
        Ok(())
    }

    /// Stamp a pattern onto the current generation
    pub fn place_pattern(&mut self, pattern: &Pattern, x: usize, y: usize, state: CellState) -> Result<()> {
        self.check_state(state)?;
        pattern.place_on(&mut self.buffers[self.active], x, y, state);
        self.needs_resync = true;
        Ok(())
    }

    fn check_state(&self, state: CellState) -> Result<()> {
        let color_count = self.automaton.color_count();
        if state.index() >= color_count {
            return Err(AutomatonError::StateOutOfRange {
                state: state.id(),
                color_count,
            });
        }
        Ok(())
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn agent(&self) -> Option<&AgentState> {
        self.automaton.agent()
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn color_count(&self) -> usize {
        self.automaton.color_count()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn color_map(&self) -> &ColorMap {
        &self.color_map
    }

    /// Replace the id -> palette mapping; it must cover the same id space
    pub fn set_color_map(&mut self, map: ColorMap) -> Result<()> {
        if map.color_count() != self.color_count() {
            return Err(AutomatonError::InvalidColorMap(self.color_count()));
        }
        self.color_map = map;
        Ok(())
    }

    pub fn execution(&self) -> ExecutionMode {
        self.execution
    }

    pub fn set_execution(&mut self, execution: ExecutionMode) {
        self.execution = execution;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the cadence without restarting
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn max_generations(&self) -> Option<u64> {
        self.max_generations
    }
}

/// Place every pattern at a random free spot, each in a random orientation
/// and, for multi-color rules, a random live color.
fn seed_patterns(grid: &mut Grid, patterns: &[Pattern], color_count: usize, rng: &mut StdRng) -> Result<()> {
    use rand::Rng;

    let mut taken = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        let state = if color_count > 2 {
            CellState(rng.random_range(1..color_count) as u8)
        } else {
            CellState::ALIVE
        };
        let oriented = match pattern.alternate_orientation() {
            Some(alternate) if rng.random_bool(0.5) => alternate,
            _ => pattern.clone(),
        };
        oriented.place_randomly(grid, state, &mut taken, rng)?;
    }
    Ok(())
}
