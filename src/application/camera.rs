use std::f32::consts::FRAC_PI_2;

/// Camera manages the 2D viewport and the orbit around 3D grids
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub offset_x: f32,
    pub offset_y: f32,
    pub zoom: f32,  // 1.0 = normal, 2.0 = 2x zoomed in
    /// Orbit angle around the vertical axis, radians
    pub yaw: f32,
    /// Orbit elevation, radians
    pub pitch: f32,
    /// Orbit radius in grid extents
    pub distance: f32,
    pub auto_rotate: bool,
    drag_anchor: Option<(f32, f32)>,
}

impl Camera {
    /// Radians per second while auto-rotating
    pub const ROTATION_SPEED: f32 = 0.4;

    pub fn new() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
            yaw: 0.6,
            pitch: 0.5,
            distance: 1.8,
            auto_rotate: true,
            drag_anchor: None,
        }
    }

    /// Zoom in by factor
    pub fn zoom_in(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(0.1, 10.0);
        self.distance = (self.distance / factor).clamp(0.8, 6.0);
    }

    /// Zoom out by factor
    pub fn zoom_out(&mut self, factor: f32) {
        self.zoom = (self.zoom / factor).clamp(0.1, 10.0);
        self.distance = (self.distance * factor).clamp(0.8, 6.0);
    }

    /// Pan camera
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Feed the cursor while a drag button is held; `None` ends the drag.
    /// Returns the movement since the previous call.
    pub fn drag(&mut self, cursor: Option<(f32, f32)>) -> (f32, f32) {
        let delta = match (self.drag_anchor, cursor) {
            (Some(last), Some(now)) => (now.0 - last.0, now.1 - last.1),
            _ => (0.0, 0.0),
        };
        self.drag_anchor = cursor;
        delta
    }

    /// Rotate the 3D view; pitch stays short of the poles
    pub fn orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw = (self.yaw + d_yaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + d_pitch).clamp(-FRAC_PI_2 + 0.05, FRAC_PI_2 - 0.05);
    }

    /// Advance auto-rotation by a frame
    pub fn update(&mut self, delta_time: f32) {
        if self.auto_rotate {
            self.orbit(Self::ROTATION_SPEED * delta_time, 0.0);
        }
    }

    /// Eye position for a cube of side `extent` centered on the origin
    pub fn eye(&self, extent: f32) -> [f32; 3] {
        let radius = self.distance * extent;
        [
            radius * self.pitch.cos() * self.yaw.cos(),
            radius * self.pitch.sin(),
            radius * self.pitch.cos() * self.yaw.sin(),
        ]
    }

    /// Convert screen coordinates to grid coordinates
    pub fn screen_to_grid(&self, screen_x: f32, screen_y: f32, cell_size: f32) -> (i32, i32) {
        let grid_x = ((screen_x - self.offset_x) / (cell_size * self.zoom)).floor() as i32;
        let grid_y = ((screen_y - self.offset_y) / (cell_size * self.zoom)).floor() as i32;
        (grid_x, grid_y)
    }

    /// Convert grid coordinates to screen coordinates
    pub fn grid_to_screen(&self, grid_x: usize, grid_y: usize, cell_size: f32) -> (f32, f32) {
        let screen_x = grid_x as f32 * cell_size * self.zoom + self.offset_x;
        let screen_y = grid_y as f32 * cell_size * self.zoom + self.offset_y;
        (screen_x, screen_y)
    }

    /// Get visible grid bounds for culling
    pub fn visible_bounds(&self, viewport_width: f32, viewport_height: f32, cell_size: f32) -> (i32, i32, i32, i32) {
        let (min_x, min_y) = self.screen_to_grid(0.0, 0.0, cell_size);
        let (max_x, max_y) = self.screen_to_grid(viewport_width, viewport_height, cell_size);
        (min_x, min_y, max_x, max_y)
    }

    /// Zoom so that a `width` x `height` plane fills the viewport
    pub fn fit(&mut self, width: usize, height: usize, viewport_width: f32, viewport_height: f32, cell_size: f32) {
        self.reset();
        let fit_x = viewport_width / (width.max(1) as f32 * cell_size);
        let fit_y = viewport_height / (height.max(1) as f32 * cell_size);
        self.zoom = fit_x.min(fit_y).clamp(0.1, 10.0);
    }

    /// Reset camera to default
    pub fn reset(&mut self) {
        *self = Self {
            auto_rotate: self.auto_rotate,
            ..Self::new()
        };
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
