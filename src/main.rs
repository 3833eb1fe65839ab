use macroquad::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cellular_automata::{
    AppConfig, AutomatonKind, Camera, ExecutionMode, GameState,
    domain::presets,
    input,
    rendering::{self, GridRenderer},
    ui::{self, GRID_SIZES, Selectors},
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Cellular Automata".to_owned(),
        window_width: 1100,
        window_height: 820,
        window_resizable: true,
        ..Default::default()
    }
}

/// Fit 2D views into the grid area; 3D views orbit instead
fn frame_view(camera: &mut Camera, state: &GameState) {
    match state.plane() {
        Some(plane) => camera.fit(plane.width, plane.height, ui::grid_area_width(), ui::grid_area_height(), ui::CELL_SIZE),
        None => camera.reset(),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app = AppConfig::from_env();
    info!(kind = app.kind.route(), renderer = ?app.renderer, size = app.size, "starting");

    let mut state = match GameState::new(app.automaton_config()) {
        Ok(state) => state,
        Err(err) => {
            error!(%err, "could not build automaton");
            return;
        }
    };
    let mut camera = Camera::new();
    frame_view(&mut camera, &state);
    let mut renderer = rendering::select_renderer(app.renderer, &state);
    let mut selectors = Selectors::new(app.kind, app.size, state.engine.execution());
    let patterns = presets::all_patterns();

    // Engine steps only while running; start right away like a page load would
    state = state.toggle_running();

    loop {
        let mouse_pos = mouse_position();
        selectors.layout();
        let buttons = ui::create_buttons(state.is_running());

        let mut rebuilt = None;
        if selectors.automaton.update(mouse_pos) {
            let kind = AutomatonKind::all()[selectors.automaton.selected()];
            rebuilt = Some(state.set_kind(kind));
        }
        if selectors.automaton.is_open() {
            selectors.close_others(0);
        }
        if selectors.size.update(mouse_pos) {
            rebuilt = Some(state.resize(GRID_SIZES[selectors.size.selected()].0));
        }
        if selectors.size.is_open() {
            selectors.close_others(1);
        }
        if selectors.execution.update(mouse_pos) {
            state.set_execution(ExecutionMode::all()[selectors.execution.selected()]);
        }
        if selectors.execution.is_open() {
            selectors.close_others(2);
        }
        if selectors.pattern.update(mouse_pos) && state.engine.grid().rank() == 2 {
            state.pending_pattern_index = Some(selectors.pattern.selected());
            state.engine.stop();
        }
        if selectors.pattern.is_open() {
            selectors.close_others(3);
        }

        match rebuilt {
            Some(Ok(())) => {
                frame_view(&mut camera, &state);
                renderer = rendering::select_renderer(app.renderer, &state);
            }
            Some(Err(err)) => error!(%err, "could not rebuild automaton"),
            None => {}
        }

        // Pattern placement mode
        if let Some(index) = state.pending_pattern_index {
            if is_mouse_button_pressed(MouseButton::Right) || is_key_pressed(KeyCode::Escape) {
                state.pending_pattern_index = None;
            } else if is_mouse_button_pressed(MouseButton::Left)
                && mouse_pos.0 < ui::grid_area_width()
                && !selectors.any_open()
            {
                let (x, y) = camera.screen_to_grid(mouse_pos.0, mouse_pos.1, ui::CELL_SIZE);
                state.place_pattern(&patterns[index], x as isize, y as isize);
            }
        }

        state = input::process_button_clicks(state, &buttons, mouse_pos);
        input::handle_zoom(&mut camera, mouse_pos);
        input::handle_drag(&mut camera, mouse_pos, state.engine.grid().rank() == 3);
        if state.pending_pattern_index.is_none() && !selectors.any_open() {
            input::handle_mouse_paint(&mut state, &camera, mouse_pos);
        }
        state = input::process_keyboard_input(state, &mut camera);

        let frame_time = get_frame_time();
        camera.update(frame_time);
        state = state.tick(frame_time);

        let render_start = std::time::Instant::now();
        clear_background(BLACK);
        renderer.draw(&state, &camera);

        if let Some(index) = state.pending_pattern_index {
            if mouse_pos.0 < ui::grid_area_width() {
                let color = state.engine.palette().color(state.engine.color_map().color_index(state.paint_state));
                rendering::draw_pattern_preview(&patterns[index], color, &camera, mouse_pos);
            }
        }

        rendering::draw_controls(&state, &camera, renderer.as_ref(), &buttons, &selectors.all(), mouse_pos);
        state.last_render_time_ms = render_start.elapsed().as_secs_f32() * 1000.0;

        next_frame().await;
    }
}
