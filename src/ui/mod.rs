mod button;
mod dropdown;

pub use button::Button;
pub use dropdown::Dropdown;

use macroquad::prelude::{screen_height, screen_width};

use crate::application::{AutomatonKind, ExecutionMode, GameState};
use crate::domain::presets;

pub const PANEL_WIDTH: f32 = 200.0;
pub const BUTTON_HEIGHT: f32 = 36.0;
pub const CELL_SIZE: f32 = 4.0;

/// Get the X position where the panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the width of the grid area
pub fn grid_area_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the height of the grid area
pub fn grid_area_height() -> f32 {
    screen_height()
}

/// Side length options; 3D grids are capped separately
pub const GRID_SIZES: &[(usize, &str)] = &[
    (16, "16"),
    (32, "32"),
    (64, "64"),
    (100, "100"),
    (200, "200"),
    (400, "400"),
    (800, "800"),
];

/// Button actions, in panel order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    StartStop,
    Step,
    Clear,
    Reset,
}

impl ButtonAction {
    pub fn all() -> [ButtonAction; 4] {
        [ButtonAction::StartStop, ButtonAction::Step, ButtonAction::Clear, ButtonAction::Reset]
    }

    pub fn label(&self, running: bool) -> &'static str {
        match self {
            ButtonAction::StartStop if running => "Stop",
            ButtonAction::StartStop => "Start",
            ButtonAction::Step => "Step",
            ButtonAction::Clear => "Clear",
            ButtonAction::Reset => "Reset",
        }
    }

    pub fn apply(&self, state: GameState) -> GameState {
        match self {
            ButtonAction::StartStop => state.toggle_running(),
            ButtonAction::Step => state.step_once(),
            ButtonAction::Clear => state.clear(),
            ButtonAction::Reset => state.reset(),
        }
    }
}

/// Create UI buttons with standard layout
pub fn create_buttons(running: bool) -> Vec<(ButtonAction, Button)> {
    let px = panel_x();
    let half = (PANEL_WIDTH - 6.0) / 2.0;
    ButtonAction::all()
        .into_iter()
        .enumerate()
        .map(|(i, action)| {
            let x = px + (i % 2) as f32 * (half + 6.0);
            let y = 200.0 + (i / 2) as f32 * (BUTTON_HEIGHT + 6.0);
            let button = Button::new(x, y, half, BUTTON_HEIGHT, action.label(running))
                .with_highlight(running && action == ButtonAction::StartStop);
            (action, button)
        })
        .collect()
}

/// The panel's selectors
pub struct Selectors {
    pub automaton: Dropdown,
    pub size: Dropdown,
    pub execution: Dropdown,
    pub pattern: Dropdown,
}

impl Selectors {
    pub fn new(kind: AutomatonKind, size: usize, execution: ExecutionMode) -> Self {
        let px = panel_x();
        let mut automaton = Dropdown::new(px, 20.0, PANEL_WIDTH, "Automaton", AutomatonKind::all().iter().map(|k| k.name()));
        automaton.select_where(|i| AutomatonKind::all()[i] == kind);

        let mut size_dropdown = Dropdown::new(px, 65.0, PANEL_WIDTH, "Grid Size", GRID_SIZES.iter().map(|(_, name)| *name));
        size_dropdown.select_where(|i| GRID_SIZES[i].0 == size);

        let mut execution_dropdown = Dropdown::new(px, 110.0, PANEL_WIDTH, "Execution", ExecutionMode::all().iter().map(|m| m.name()));
        execution_dropdown.select_where(|i| ExecutionMode::all()[i] == execution);

        let pattern = Dropdown::new(px, 155.0, PANEL_WIDTH, "Pattern", presets::all_patterns().iter().map(|p| p.name));

        Self {
            automaton,
            size: size_dropdown,
            execution: execution_dropdown,
            pattern,
        }
    }

    /// Follow the panel when the window is resized
    pub fn layout(&mut self) {
        let px = panel_x();
        for (i, dropdown) in self.all_mut().into_iter().enumerate() {
            dropdown.set_position(px, 20.0 + i as f32 * 45.0);
        }
    }

    fn all_mut(&mut self) -> [&mut Dropdown; 4] {
        [&mut self.automaton, &mut self.size, &mut self.execution, &mut self.pattern]
    }

    pub fn all(&self) -> [&Dropdown; 4] {
        [&self.automaton, &self.size, &self.execution, &self.pattern]
    }

    /// Only one dropdown may be open at a time
    pub fn close_others(&mut self, keep: usize) {
        for (i, dropdown) in self.all_mut().into_iter().enumerate() {
            if i != keep {
                dropdown.close();
            }
        }
    }

    pub fn any_open(&self) -> bool {
        self.all().iter().any(|d| d.is_open())
    }
}
