use macroquad::prelude::*;

use super::{GridRenderer, to_color};
use crate::application::{Camera, GameState};
use crate::ui::{CELL_SIZE, grid_area_height, grid_area_width};

/// One rectangle per visible cell, culled to the viewport
pub struct ShapesRenderer;

impl GridRenderer for ShapesRenderer {
    fn name(&self) -> &'static str {
        "Shapes"
    }

    fn draw(&mut self, state: &GameState, camera: &Camera) {
        let Some(plane) = state.plane() else {
            return;
        };
        let palette = state.engine.palette();
        let background = state.engine.color_map().color_index(crate::domain::CellState::ZERO);
        let cell_size = CELL_SIZE * camera.zoom;
        let area_width = grid_area_width();
        let area_height = grid_area_height();

        let (min_x, min_y, max_x, max_y) = camera.visible_bounds(area_width, area_height, CELL_SIZE);
        let start_x = min_x.max(0) as usize;
        let start_y = min_y.max(0) as usize;
        let end_x = (max_x + 1).clamp(0, plane.width as i32) as usize;
        let end_y = (max_y + 1).clamp(0, plane.height as i32) as usize;

        // Id 0 fills the whole plane once; only the other ids get rectangles
        draw_rectangle(
            camera.offset_x,
            camera.offset_y,
            plane.width as f32 * cell_size,
            plane.height as f32 * cell_size,
            to_color(palette.color(background)),
        );

        let grid_line_color = Color::from_rgba(40, 40, 40, 255);
        let draw_grid_lines = cell_size >= 6.0;

        for y in start_y..end_y {
            for x in start_x..end_x {
                let (screen_x, screen_y) = camera.grid_to_screen(x, y, CELL_SIZE);
                let index = plane.index_at(x, y);
                if index != background {
                    draw_rectangle(screen_x, screen_y, cell_size, cell_size, to_color(palette.color(index)));
                }
                if draw_grid_lines {
                    draw_rectangle_lines(screen_x, screen_y, cell_size, cell_size, 1.0, grid_line_color);
                }
            }
        }
    }
}
