use macroquad::prelude::*;
use tracing::debug;

use super::{GridRenderer, RenderError};
use crate::application::{Camera, GameState};
use crate::ui::CELL_SIZE;

/// Check that a plane fits in a single texture
pub fn texture_size(width: usize, height: usize) -> Result<(u16, u16), RenderError> {
    match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(RenderError::TextureTooLarge { width, height }),
    }
}

/// One texel per cell, re-uploaded every frame and scaled with nearest filtering
pub struct TextureRenderer {
    width: u16,
    height: u16,
    texture: Option<Texture2D>,
}

impl TextureRenderer {
    pub fn new(width: usize, height: usize) -> Result<Self, RenderError> {
        let (width, height) = texture_size(width, height)?;
        Ok(Self {
            width,
            height,
            texture: None,
        })
    }
}

impl GridRenderer for TextureRenderer {
    fn name(&self) -> &'static str {
        "Texture"
    }

    fn draw(&mut self, state: &GameState, camera: &Camera) {
        let Some(plane) = state.plane() else {
            return;
        };
        let Ok((width, height)) = texture_size(plane.width, plane.height) else {
            return;
        };
        let bytes = plane.to_rgba(state.engine.palette());

        if (width, height) != (self.width, self.height) {
            debug!(width, height, "texture resized");
            self.width = width;
            self.height = height;
            self.texture = None;
        }

        match &self.texture {
            Some(texture) => texture.update(&Image { bytes, width, height }),
            None => {
                let texture = Texture2D::from_rgba8(width, height, &bytes);
                texture.set_filter(FilterMode::Nearest);
                self.texture = Some(texture);
            }
        }
        let Some(texture) = &self.texture else {
            return;
        };

        let scale = CELL_SIZE * camera.zoom;
        draw_texture_ex(
            texture,
            camera.offset_x,
            camera.offset_y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(width as f32 * scale, height as f32 * scale)),
                ..Default::default()
            },
        );
    }
}
