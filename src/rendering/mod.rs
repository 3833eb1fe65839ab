mod cubes;
mod shapes;
mod texture;

pub use cubes::CubeRenderer;
pub use shapes::ShapesRenderer;
pub use texture::{TextureRenderer, texture_size};

use macroquad::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

use crate::application::{Camera, EngineState, GameState, RendererPreference};
use crate::domain::{Pattern, Rgb};
use crate::ui::{Button, ButtonAction, CELL_SIZE, Dropdown, PANEL_WIDTH, panel_x};

/// Why a renderer cannot draw a grid
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("a {width}x{height} plane exceeds the maximum texture size")]
    TextureTooLarge { width: usize, height: usize },

    #[error("{renderer} renderer cannot draw {rank}D grids")]
    UnsupportedRank { renderer: &'static str, rank: usize },
}

/// Draws the current generation into the grid area
pub trait GridRenderer {
    fn name(&self) -> &'static str;
    fn draw(&mut self, state: &GameState, camera: &Camera);
}

/// Pick a renderer for the session: cubes for 3D grids, otherwise the
/// preferred 2D renderer, falling back to shapes when textures are unusable.
pub fn select_renderer(preference: RendererPreference, state: &GameState) -> Box<dyn GridRenderer> {
    let renderer: Box<dyn GridRenderer> = match (state.plane(), preference) {
        (None, _) => Box::new(CubeRenderer),
        (Some(_), RendererPreference::Shapes) => Box::new(ShapesRenderer),
        (Some(plane), RendererPreference::Texture) => match TextureRenderer::new(plane.width, plane.height) {
            Ok(renderer) => Box::new(renderer),
            Err(err) => {
                warn!(%err, "texture renderer unavailable, falling back to shapes");
                Box::new(ShapesRenderer)
            }
        },
    };
    info!(renderer = renderer.name(), "renderer selected");
    renderer
}

pub(crate) fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb.0, rgb.1, rgb.2, 255)
}

/// Format large numbers with K/M/B suffixes
fn format_number(n: usize) -> String {
    if n >= 1_000_000_000 {
        format!("{:.1}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Traffic-light color for a timing in milliseconds
fn timing_color(ms: f32, budget: f32) -> Color {
    if ms < 5.0 {
        Color::from_rgba(0, 255, 0, 255)
    } else if ms < budget {
        Color::from_rgba(255, 255, 0, 255)
    } else if ms < budget * 3.0 {
        Color::from_rgba(255, 165, 0, 255)
    } else {
        Color::from_rgba(255, 0, 0, 255)
    }
}

/// Draw a semi-transparent preview of a pattern at the cursor position
pub fn draw_pattern_preview(pattern: &Pattern, color: Rgb, camera: &Camera, mouse_pos: (f32, f32)) {
    let cell_size = CELL_SIZE * camera.zoom;

    // Calculate grid position centered on cursor
    let (grid_x, grid_y) = camera.screen_to_grid(mouse_pos.0, mouse_pos.1, CELL_SIZE);
    let start_x = grid_x - (pattern.width as i32 / 2);
    let start_y = grid_y - (pattern.height as i32 / 2);

    let fill = Color::from_rgba(color.0, color.1, color.2, 120);
    let outline = Color::from_rgba(color.0, color.1, color.2, 200);
    for &(dx, dy) in &pattern.cells {
        let gx = start_x + dx as i32;
        let gy = start_y + dy as i32;
        if gx < 0 || gy < 0 {
            continue;
        }
        let (screen_x, screen_y) = camera.grid_to_screen(gx as usize, gy as usize, CELL_SIZE);
        draw_rectangle(screen_x, screen_y, cell_size, cell_size, fill);
        draw_rectangle_lines(screen_x, screen_y, cell_size, cell_size, 1.5, outline);
    }

    if start_x >= 0 && start_y >= 0 {
        let (box_x, box_y) = camera.grid_to_screen(start_x as usize, start_y as usize, CELL_SIZE);
        draw_rectangle_lines(
            box_x,
            box_y,
            pattern.width as f32 * cell_size,
            pattern.height as f32 * cell_size,
            2.0,
            Color::from_rgba(255, 255, 0, 180),
        );
    }
}

/// One swatch per id; the paint id gets a frame
fn draw_palette(state: &GameState, x: f32, y: f32) {
    let palette = state.engine.palette();
    let map = state.engine.color_map();
    let count = state.engine.color_count();
    let swatch = (PANEL_WIDTH / count.max(1) as f32).min(20.0);
    for id in 0..count {
        let state_id = crate::domain::CellState(id as u8);
        let sx = x + id as f32 * swatch;
        draw_rectangle(sx, y, swatch, 14.0, to_color(palette.color(map.color_index(state_id))));
        if state_id == state.paint_state {
            draw_rectangle_lines(sx, y, swatch, 14.0, 2.0, WHITE);
        }
    }
}

/// Draw the control panel with buttons, dropdowns, and info
pub fn draw_controls(
    state: &GameState,
    camera: &Camera,
    renderer: &dyn GridRenderer,
    buttons: &[(ButtonAction, Button)],
    dropdowns: &[&Dropdown],
    mouse_pos: (f32, f32),
) {
    draw_rectangle(panel_x(), 0.0, PANEL_WIDTH, screen_height(), Color::from_rgba(30, 30, 30, 255));

    buttons.iter().for_each(|(_, btn)| btn.draw(mouse_pos));

    let px = panel_x();
    let engine = &state.engine;

    let controls = [
        ("Controls:", 290.0, 14.0, WHITE),
        ("LMB: Paint  RMB: Erase", 305.0, 12.0, GRAY),
        ("Space: Play  N: Step", 318.0, 12.0, GRAY),
        ("C: Clear  R: Reset", 331.0, 12.0, GRAY),
        ("P: Paint color  E: Threads", 344.0, 12.0, GRAY),
        ("Wheel: Zoom  Mid-drag: Pan", 357.0, 12.0, GRAY),
    ];
    controls.iter().for_each(|(text, y, size, color)| {
        draw_text(text, px, *y, *size, *color);
    });

    let cells = engine.grid().len();
    let size = engine
        .grid()
        .size()
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join("x");
    let info = format!("{} | {} colors", engine.automaton().name(), engine.color_count());
    draw_text(&info, px, 380.0, 12.0, Color::from_rgba(150, 150, 150, 255));
    let grid_info = format!("Grid: {} | Cells: {}", size, format_number(cells));
    draw_text(&grid_info, px, 393.0, 12.0, Color::from_rgba(150, 150, 150, 255));
    draw_palette(state, px, 400.0);

    let step_ms = state.last_step_time_ms;
    let render_ms = state.last_render_time_ms;
    draw_text(&format!("Step: {:.1}ms", step_ms), px, 432.0, 13.0, timing_color(step_ms, 33.0));
    draw_text(&format!("Render: {:.1}ms", render_ms), px, 447.0, 13.0, timing_color(render_ms, 16.0));
    draw_text(
        &format!("{} | {} | FPS: {}", engine.execution().name(), renderer.name(), get_fps()),
        px,
        462.0,
        12.0,
        GRAY,
    );
    if step_ms > 0.0 && state.is_running() {
        let cells_per_sec = cells as f64 / (step_ms as f64 / 1000.0);
        draw_text(
            &format!("Throughput: {}/s", format_number(cells_per_sec as usize)),
            px,
            477.0,
            11.0,
            Color::from_rgba(100, 200, 255, 255),
        );
    }

    let (status, status_color) = match engine.state() {
        EngineState::Idle => ("Idle", GRAY),
        EngineState::Running => ("Running", Color::from_rgba(0, 255, 0, 255)),
        EngineState::Stopped => ("Stopped", Color::from_rgba(255, 165, 0, 255)),
    };
    let limit = engine
        .max_generations()
        .map_or_else(|| "no limit".to_string(), |max| format!("limit {}", max));
    let labels = [
        ("Speed:".to_string(), 700.0, 16.0, WHITE),
        (format!("{:.0} gen/s ({})", state.updates_per_second, limit), 718.0, 13.0, LIGHTGRAY),
        ("Generation:".to_string(), 742.0, 16.0, WHITE),
        (engine.generation().to_string(), 762.0, 20.0, Color::from_rgba(0, 255, 150, 255)),
        (format!("Status: {}", status), 785.0, 16.0, status_color),
        (format!("Zoom: {:.1}x", camera.zoom), 800.0, 13.0, LIGHTGRAY),
    ];
    labels.iter().for_each(|(text, y, size, color)| {
        draw_text(text, px, *y, *size, *color);
    });

    // Open dropdown last so its menu covers the rest
    dropdowns
        .iter()
        .filter(|d| !d.is_open())
        .chain(dropdowns.iter().filter(|d| d.is_open()))
        .for_each(|d| d.draw(mouse_pos));
}
