//! Palette generation and the id -> color mapping.
//!
//! Simulation state only ever holds ids; the renderer resolves them through a
//! `ColorMap` into a `Palette` entry.

use super::CellState;
use super::rules::validate_color_count;
use crate::error::{AutomatonError, Result};
use rand::Rng;

/// Share of the gradient trimmed at each end
const GRADIENT_PADDING: f32 = 0.05;

/// Tries at drawing gradient endpoints that give distinct colors
const GRADIENT_ATTEMPTS: usize = 8;

/// 8-bit RGB triple
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }

    /// Fully saturated color from a hue in degrees
    fn from_hue(hue: f32) -> Rgb {
        let h = hue.rem_euclid(360.0) / 60.0;
        let x = 1.0 - (h % 2.0 - 1.0).abs();
        let (r, g, b) = match h as u32 {
            0 => (1.0, x, 0.0),
            1 => (x, 1.0, 0.0),
            2 => (0.0, 1.0, x),
            3 => (0.0, x, 1.0),
            4 => (x, 0.0, 1.0),
            _ => (1.0, 0.0, x),
        };
        let to_byte = |v: f32| (v * 255.0).round() as u8;
        Rgb(to_byte(r), to_byte(g), to_byte(b))
    }

    pub const fn to_rgba(self) -> [u8; 4] {
        [self.0, self.1, self.2, 255]
    }
}

/// Ordered list of distinct colors, one per cell id. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Build a palette of `color_count` colors. Explicit colors win when given;
    /// otherwise a gradient between two random endpoints is used.
    pub fn generate(color_count: usize, explicit: Option<&[Rgb]>, rng: &mut impl Rng) -> Result<Self> {
        validate_color_count(color_count)?;

        if let Some(colors) = explicit {
            if colors.len() < color_count {
                return Err(AutomatonError::PaletteTooSmall {
                    needed: color_count,
                    got: colors.len(),
                });
            }
            if colors.len() > color_count {
                tracing::warn!(
                    given = colors.len(),
                    used = color_count,
                    "explicit palette is longer than the id space, extra colors ignored"
                );
            }
            let colors = &colors[..color_count];
            if let Some((first, second)) = first_duplicate(colors) {
                return Err(AutomatonError::DuplicatePaletteColor { first, second });
            }
            return Ok(Self { colors: colors.to_vec() });
        }

        for _ in 0..GRADIENT_ATTEMPTS {
            let from = Rgb(rng.random(), rng.random(), rng.random());
            let to = Rgb(rng.random(), rng.random(), rng.random());
            let palette = Self::gradient(from, to, color_count);
            if palette.is_distinct() {
                return Ok(palette);
            }
        }

        let offset = rng.random_range(0.0..360.0);
        Ok(Self::hues(color_count, offset))
    }

    /// Evenly spaced colors between two endpoints, padded at both ends
    pub fn gradient(from: Rgb, to: Rgb, color_count: usize) -> Self {
        let span = 1.0 - 2.0 * GRADIENT_PADDING;
        let colors = (0..color_count)
            .map(|i| {
                let t = if color_count == 1 {
                    0.5
                } else {
                    GRADIENT_PADDING + span * i as f32 / (color_count - 1) as f32
                };
                from.lerp(to, t)
            })
            .collect();
        Self { colors }
    }

    /// Colors spread around the hue wheel
    pub fn hues(color_count: usize, offset: f32) -> Self {
        let colors = (0..color_count)
            .map(|i| Rgb::from_hue(offset + 360.0 * i as f32 / color_count as f32))
            .collect();
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Color at a palette index, wrapping out-of-range indices
    pub fn color(&self, index: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }

    /// Whether no two entries are equal
    pub fn is_distinct(&self) -> bool {
        first_duplicate(&self.colors).is_none()
    }
}

/// Indices of the first repeated color, if any
fn first_duplicate(colors: &[Rgb]) -> Option<(usize, usize)> {
    colors.iter().enumerate().find_map(|(i, c)| {
        colors[i + 1..]
            .iter()
            .position(|other| other == c)
            .map(|offset| (i, i + 1 + offset))
    })
}

/// Bijection between cell ids and palette indices
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorMap {
    to_color: Vec<usize>,
    to_state: Vec<u8>,
}

impl ColorMap {
    /// Id `i` maps to palette index `i`
    pub fn identity(color_count: usize) -> Self {
        Self {
            to_color: (0..color_count).collect(),
            to_state: (0..color_count).map(|i| i as u8).collect(),
        }
    }

    /// Id `i` maps to palette index `order[i]`; `order` must be a permutation
    pub fn from_order(order: Vec<usize>) -> Result<Self> {
        let n = order.len();
        validate_color_count(n)?;
        let mut to_state = vec![u8::MAX; n];
        let mut seen = vec![false; n];
        for (id, &color) in order.iter().enumerate() {
            if color >= n || seen[color] {
                return Err(AutomatonError::InvalidColorMap(n));
            }
            seen[color] = true;
            to_state[color] = id as u8;
        }
        Ok(Self { to_color: order, to_state })
    }

    pub fn color_count(&self) -> usize {
        self.to_color.len()
    }

    /// Palette index for a cell id
    #[inline]
    pub fn color_index(&self, state: CellState) -> usize {
        self.to_color[state.index() % self.to_color.len()]
    }

    /// Cell id for a palette index
    pub fn state_for(&self, color_index: usize) -> Option<CellState> {
        self.to_state.get(color_index).map(|&id| CellState(id))
    }

    /// Successor id in the cycle
    pub fn successor(&self, state: CellState) -> CellState {
        state.successor(self.color_count())
    }
}
