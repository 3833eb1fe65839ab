use macroquad::prelude::*;

use crate::application::{Camera, GameState};
use crate::ui::{Button, ButtonAction, CELL_SIZE, grid_area_width};

/// Handle zoom with mouse wheel
pub fn handle_zoom(camera: &mut Camera, mouse_pos: (f32, f32)) {
    if mouse_pos.0 >= grid_area_width() {
        return;
    }
    let wheel = mouse_wheel().1;
    if wheel > 0.0 {
        camera.zoom_in(1.1);
    } else if wheel < 0.0 {
        camera.zoom_out(1.1);
    }
}

/// Middle-drag pans 2D views and orbits 3D ones
pub fn handle_drag(camera: &mut Camera, mouse_pos: (f32, f32), orbit: bool) {
    let cursor = is_mouse_button_down(MouseButton::Middle).then_some(mouse_pos);
    let (dx, dy) = camera.drag(cursor);
    if orbit {
        camera.orbit(dx * 0.01, dy * 0.01);
    } else {
        camera.pan(dx, dy);
    }
}

/// Handle mouse painting on the grid (with camera support)
pub fn handle_mouse_paint(state: &mut GameState, camera: &Camera, mouse_pos: (f32, f32)) {
    if state.is_running() || mouse_pos.0 >= grid_area_width() {
        return;
    }
    let (width, height) = state.engine.grid().width_height();
    let (grid_x, grid_y) = camera.screen_to_grid(mouse_pos.0, mouse_pos.1, CELL_SIZE);
    if grid_x < 0 || grid_y < 0 || grid_x >= width as i32 || grid_y >= height as i32 {
        return;
    }

    if is_mouse_button_down(MouseButton::Left) {
        state.paint(grid_x as isize, grid_y as isize, false);
    } else if is_mouse_button_down(MouseButton::Right) {
        state.paint(grid_x as isize, grid_y as isize, true);
    }
}

/// Process keyboard input functionally
pub fn process_keyboard_input(state: GameState, camera: &mut Camera) -> GameState {
    type KeyAction = (KeyCode, fn(GameState) -> GameState);

    let actions: [KeyAction; 8] = [
        (KeyCode::Space, GameState::toggle_running),
        (KeyCode::N, GameState::step_once),
        (KeyCode::C, GameState::clear),
        (KeyCode::R, GameState::reset),
        (KeyCode::E, GameState::toggle_execution),
        (KeyCode::P, GameState::cycle_paint_state),
        (KeyCode::Up, |s| s.adjust_speed(5.0)),
        (KeyCode::Down, |s| s.adjust_speed(-5.0)),
    ];

    let new_state = actions.iter().fold(state, |s, (key, action)| {
        if is_key_pressed(*key) { action(s) } else { s }
    });

    // Reset camera with 'H' (home)
    if is_key_pressed(KeyCode::H) {
        camera.reset();
    }
    if is_key_pressed(KeyCode::O) {
        camera.auto_rotate = !camera.auto_rotate;
    }
    if is_key_down(KeyCode::Left) {
        camera.orbit(-0.03, 0.0);
    }
    if is_key_down(KeyCode::Right) {
        camera.orbit(0.03, 0.0);
    }

    new_state
}

/// Process button clicks functionally
pub fn process_button_clicks(
    state: GameState,
    buttons: &[(ButtonAction, Button)],
    mouse_pos: (f32, f32),
) -> GameState {
    buttons.iter().fold(state, |s, (action, btn)| {
        if btn.is_clicked(mouse_pos) { action.apply(s) } else { s }
    })
}
