use macroquad::prelude::*;

use super::{GridRenderer, to_color};
use crate::application::{Camera, GameState};
use crate::domain::CellState;

/// Orbiting perspective view of a 3D grid, one cube per non-zero cell
pub struct CubeRenderer;

impl GridRenderer for CubeRenderer {
    fn name(&self) -> &'static str {
        "Cubes"
    }

    fn draw(&mut self, state: &GameState, camera: &Camera) {
        let grid = state.engine.grid();
        let palette = state.engine.palette();
        let map = state.engine.color_map();
        let [w, h, d] = grid.dimensions().extents();
        let extent = w.max(h).max(d) as f32;
        let [ex, ey, ez] = camera.eye(extent);

        set_camera(&Camera3D {
            position: vec3(ex, ey, ez),
            target: Vec3::ZERO,
            up: Vec3::Y,
            ..Default::default()
        });

        let center = vec3(w as f32, h as f32, d as f32) / 2.0;
        let cube = Vec3::splat(0.85);
        for (coord, cell) in grid.iter_cells() {
            if cell == CellState::ZERO {
                continue;
            }
            let position = vec3(coord[0] as f32, coord[1] as f32, coord[2] as f32) - center + Vec3::splat(0.5);
            draw_cube(position, cube, None, to_color(palette.color(map.color_index(cell))));
        }
        draw_cube_wires(Vec3::ZERO, vec3(w as f32, h as f32, d as f32), GRAY);

        set_default_camera();
    }
}
