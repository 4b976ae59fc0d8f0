//! Bitmap-font text component.
//!
//! A [`Text`] wraps a parsed [`TextComponent`] together with its draw scale
//! and alignment. Glyphs come from a 256×256 atlas holding 16×16 cells of
//! 16 px each, indexed by the character code (`c % 16` column, `c / 16` row).
//!
//! [`Text::glyphs`] lays the text out into [`GlyphQuad`]s in world units;
//! the render pass projects them like any other textured quad.

use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Rectangle};

use crate::components::boundingbox::BoundingBox;
use crate::components::textcomponent::{GLYPH_HALF_EXTENT, TextComponent, is_narrow};
use crate::namespacedkey::NamespacedKey;

const ATLAS_CELL: f32 = 16.0;
const GLYPH_SRC_WIDTH: f32 = 14.0;
const GLYPH_SRC_HEIGHT: f32 = 15.0;
const ADVANCE: f32 = 1.1;
const WIDE_NARROW_SHRINK: f32 = 0.4;
const NARROW_SHRINK: f32 = 0.2;
const AFTER_NARROW_SHIFT: f32 = 0.025;
const SHADOW_OFFSET: f32 = 0.05;
const SHADOW_DARKEN: f32 = 1.5;
const BOLD_OFFSET: f32 = 0.075;

/// Atlas texture used for every text.
pub fn font_atlas_key() -> NamespacedKey {
    NamespacedKey::default_ns("text/ascii")
}

/// Glyphs whose tail reaches below the baseline get one extra source row.
fn is_low_hanging(c: char) -> bool {
    matches!(c, 'g' | 'j' | 'p' | 'q' | 'y' | ',' | ';')
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawStyle {
    /// Text centred on its position.
    Centered,
    /// Text starting at its position.
    Absolute,
}

/// One glyph ready to be projected, in world units.
#[derive(Clone, Copy, Debug)]
pub struct GlyphQuad {
    pub x: f32,
    pub y: f32,
    pub half_extent: f32,
    pub src: Rectangle,
    pub color: Color,
}

#[derive(Component, Clone, Debug)]
pub struct Text {
    component: TextComponent,
    pub scale: f32,
    pub style: DrawStyle,
    bounding_box: BoundingBox,
}

impl Text {
    pub fn new(markup: &str, scale: f32, style: DrawStyle) -> Self {
        Self::from_component(TextComponent::parse(markup), scale, style)
    }

    pub fn from_component(component: TextComponent, scale: f32, style: DrawStyle) -> Self {
        let bounding_box = component.bounding_box().mul_all(scale);
        Self {
            component,
            scale,
            style,
            bounding_box,
        }
    }

    pub fn component(&self) -> &TextComponent {
        &self.component
    }

    /// Replace the content, recomputing the bounding box.
    pub fn set_markup(&mut self, markup: &str) {
        self.set_component(TextComponent::parse(markup));
    }

    pub fn set_component(&mut self, component: TextComponent) {
        self.bounding_box = component.bounding_box().mul_all(self.scale);
        self.component = component;
    }

    /// Box in world units, already scaled.
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Lay the text out at `(x, y)`. `ratio` is the window aspect ratio applied
    /// to the horizontal layout coordinate.
    pub fn glyphs(&self, x: f32, y: f32, ratio: f32) -> Vec<GlyphQuad> {
        let s = self.scale;
        let mut cursor = match self.style {
            DrawStyle::Centered => self.bounding_box.left_x + x * ratio + s * s,
            DrawStyle::Absolute => x * ratio,
        };
        let half_extent = GLYPH_HALF_EXTENT * s;
        let mut out = Vec::new();

        for run in self.component.runs() {
            // Kerning after a narrow glyph stays inside its run
            let mut previous_narrow = false;
            for c in run.text.chars() {
                if previous_narrow {
                    cursor -= AFTER_NARROW_SHIFT * s;
                }
                let src = glyph_source(c);
                if run.shadow {
                    out.push(GlyphQuad {
                        x: cursor - SHADOW_OFFSET * s,
                        y: y - SHADOW_OFFSET * s,
                        half_extent,
                        src,
                        color: shadow_color(run.color),
                    });
                }
                out.push(GlyphQuad {
                    x: cursor,
                    y,
                    half_extent,
                    src,
                    color: opaque(run.color),
                });
                if run.bold {
                    out.push(GlyphQuad {
                        x: cursor + BOLD_OFFSET * s,
                        y,
                        half_extent,
                        src,
                        color: opaque(run.color),
                    });
                }

                let mut advance = ADVANCE * s;
                if is_narrow(c) {
                    advance -= if matches!(c, 'i' | '\'' | ' ') {
                        WIDE_NARROW_SHRINK * s
                    } else {
                        NARROW_SHRINK * s
                    };
                }
                cursor += advance;
                previous_narrow = is_narrow(c);
            }
        }
        out
    }
}

/// Atlas cell for a character. Anything outside the 8-bit range draws as `?`.
pub fn glyph_source(c: char) -> Rectangle {
    let code = if (c as u32) < 256 { c as u32 } else { '?' as u32 };
    let height = if is_low_hanging(c) {
        GLYPH_SRC_HEIGHT + 1.0
    } else {
        GLYPH_SRC_HEIGHT
    };
    Rectangle::new(
        (code % 16) as f32 * ATLAS_CELL,
        (code / 16) as f32 * ATLAS_CELL,
        GLYPH_SRC_WIDTH,
        height,
    )
}

fn opaque(color: Color) -> Color {
    Color::new(color.r, color.g, color.b, 255)
}

fn shadow_color(color: Color) -> Color {
    let dim = |v: u8| (v as f32 / SHADOW_DARKEN) as u8;
    Color::new(dim(color.r), dim(color.g), dim(color.b), dim(color.a))
}
