use macroquad::prelude::*;

const IDLE: Color = Color::new(0.27, 0.51, 0.71, 1.0);
const HOVER: Color = Color::new(0.39, 0.58, 0.93, 1.0);
const HIGHLIGHT: Color = Color::new(0.70, 0.33, 0.25, 1.0);
const FONT_SIZE: u16 = 18;

/// Panel button; highlighted buttons mark an engaged toggle such as a running engine
#[derive(Clone, Debug)]
pub struct Button {
    bounds: Rect,
    text: String,
    highlighted: bool,
}

impl Button {
    pub fn new(x: f32, y: f32, width: f32, height: f32, text: impl Into<String>) -> Self {
        Self {
            bounds: Rect::new(x, y, width, height),
            text: text.into(),
            highlighted: false,
        }
    }

    pub fn with_highlight(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Edges count as inside
    pub fn contains(&self, point: (f32, f32)) -> bool {
        let Rect { x, y, w, h } = self.bounds;
        (x..=x + w).contains(&point.0) && (y..=y + h).contains(&point.1)
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        let Rect { x, y, w, h } = self.bounds;
        let fill = match (self.contains(mouse_pos), self.highlighted) {
            (true, _) => HOVER,
            (false, true) => HIGHLIGHT,
            (false, false) => IDLE,
        };
        draw_rectangle(x, y, w, h, fill);
        draw_rectangle_lines(x, y, w, h, 2.0, WHITE);

        let label = measure_text(&self.text, None, FONT_SIZE, 1.0);
        draw_text(
            &self.text,
            x + (w - label.width) / 2.0,
            y + (h + label.height) / 2.0,
            FONT_SIZE as f32,
            WHITE,
        );
    }

    /// Left press over the button this frame
    pub fn is_clicked(&self, mouse_pos: (f32, f32)) -> bool {
        self.contains(mouse_pos) && is_mouse_button_pressed(MouseButton::Left)
    }
}
