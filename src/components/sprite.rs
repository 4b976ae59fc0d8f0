//! Textured sprite component and draw properties.
//!
//! A [`Sprite`] names the texture an entity draws and carries a list of
//! [`DrawProperty`] modifiers. At render time [`build_quad`] turns texture,
//! position and properties into a [`TexturedQuad`] in world units:
//!
//! - the quad is centred on `(x · aspect, y)`
//! - its half extents are `dimensions × scale`, dimensions defaulting to the
//!   texture's pixel size (one frame for animations)
//! - `Stretch` ignores position and size and covers the visible area
//! - the tint's alpha is always forced to opaque

use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Rectangle};
use smallvec::SmallVec;

use crate::components::drawinstance::DrawInstance;
use crate::namespacedkey::NamespacedKey;
use crate::resources::texturestore::{DrawError, TextureLayout};

#[derive(Clone, Copy, Debug)]
pub enum DrawProperty {
    Scale(f32),
    /// Counter-clockwise rotation in degrees.
    Rotation(f32),
    ColorTransform(Color),
    Dimensions { width: f32, height: f32 },
    Stretch,
}

/// Properties folded into concrete values. Later entries win.
#[derive(Clone, Copy, Debug)]
pub struct DrawParams {
    pub scale: f32,
    pub rotation: f32,
    pub tint: Color,
    pub dimensions: Option<(f32, f32)>,
    pub stretch: bool,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: 0.0,
            tint: Color::WHITE,
            dimensions: None,
            stretch: false,
        }
    }
}

impl DrawParams {
    pub fn from_properties(properties: &[DrawProperty]) -> Self {
        let mut params = Self::default();
        for property in properties {
            match *property {
                DrawProperty::Scale(scale) => params.scale = scale,
                DrawProperty::Rotation(degrees) => params.rotation = degrees,
                DrawProperty::ColorTransform(color) => params.tint = Color::new(color.r, color.g, color.b, 255),
                DrawProperty::Dimensions { width, height } => params.dimensions = Some((width, height)),
                DrawProperty::Stretch => params.stretch = true,
            }
        }
        params
    }
}

#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub texture: NamespacedKey,
    pub properties: SmallVec<[DrawProperty; 4]>,
}

impl Sprite {
    pub fn new(texture: NamespacedKey) -> Self {
        Self {
            texture,
            properties: SmallVec::new(),
        }
    }

    /// Builder-style: append a property.
    pub fn with(mut self, property: DrawProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn params(&self) -> DrawParams {
        DrawParams::from_properties(&self.properties)
    }
}

/// One quad in world units, before projection.
#[derive(Clone, Copy, Debug)]
pub struct TexturedQuad {
    pub texture: NamespacedKey,
    pub x: f32,
    pub y: f32,
    pub half_width: f32,
    pub half_height: f32,
    pub src: Rectangle,
    pub rotation: f32,
    pub tint: Color,
}

/// Geometry of one textured draw.
///
/// `view_half_extents` is the half size of the visible area, used by
/// `Stretch`. Animated textures without an `instance` are rejected.
#[allow(clippy::too_many_arguments)]
pub fn build_quad(
    texture: NamespacedKey,
    layout: &TextureLayout,
    instance: Option<&DrawInstance>,
    x: f32,
    y: f32,
    properties: &[DrawProperty],
    ratio: f32,
    view_half_extents: (f32, f32),
) -> Result<TexturedQuad, DrawError> {
    let src = layout.source(texture, instance)?;
    let params = DrawParams::from_properties(properties);
    let (x, y, half_width, half_height) = if params.stretch {
        (0.0, 0.0, view_half_extents.0, view_half_extents.1)
    } else {
        let (w, h) = params.dimensions.unwrap_or_else(|| layout.pixel_size());
        (x * ratio, y, w * params.scale, h * params.scale)
    };
    Ok(TexturedQuad {
        texture,
        x,
        y,
        half_width,
        half_height,
        src,
        rotation: params.rotation,
        tint: params.tint,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::texturestore::{AnimatedGameTexture, AnimationMeta};

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn layout() -> TextureLayout {
        TextureLayout::Static {
            width: 20.0,
            height: 40.0,
        }
    }

    #[test]
    fn test_defaults() {
        let params = DrawParams::from_properties(&[]);
        assert!(approx_eq(params.scale, 1.0));
        assert!(approx_eq(params.rotation, 0.0));
        assert_eq!(params.tint.r, 255);
        assert!(params.dimensions.is_none());
        assert!(!params.stretch);
    }

    #[test]
    fn test_later_property_wins_and_alpha_is_forced() {
        let params = DrawParams::from_properties(&[
            DrawProperty::Scale(0.5),
            DrawProperty::Scale(0.1),
            DrawProperty::ColorTransform(Color::new(10, 20, 30, 40)),
        ]);
        assert!(approx_eq(params.scale, 0.1));
        assert_eq!((params.tint.r, params.tint.g, params.tint.b, params.tint.a), (10, 20, 30, 255));
    }

    #[test]
    fn test_quad_uses_texture_size_times_scale() {
        let key = NamespacedKey::default_ns("textures/player/placeholder_player");
        let quad = build_quad(key, &layout(), None, 2.0, 3.0, &[DrawProperty::Scale(0.1)], 1.5, (15.0, 10.0)).unwrap();
        assert!(approx_eq(quad.x, 3.0));
        assert!(approx_eq(quad.y, 3.0));
        assert!(approx_eq(quad.half_width, 2.0));
        assert!(approx_eq(quad.half_height, 4.0));
        assert!(approx_eq(quad.src.width, 20.0));
    }

    #[test]
    fn test_dimensions_override_texture_size() {
        let key = NamespacedKey::default_ns("textures/buttons/button");
        let props = [DrawProperty::Scale(0.5), DrawProperty::Dimensions { width: 12.0, height: 1.75 }];
        let quad = build_quad(key, &layout(), None, 0.0, 0.0, &props, 1.0, (10.0, 10.0)).unwrap();
        assert!(approx_eq(quad.half_width, 6.0));
        assert!(approx_eq(quad.half_height, 0.875));
    }

    #[test]
    fn test_stretch_covers_view() {
        let key = NamespacedKey::default_ns("textures/backgrounds/title");
        let quad = build_quad(key, &layout(), None, 5.0, 5.0, &[DrawProperty::Stretch], 4.0 / 3.0, (13.3, 10.0)).unwrap();
        assert!(approx_eq(quad.x, 0.0));
        assert!(approx_eq(quad.half_width, 13.3));
        assert!(approx_eq(quad.half_height, 10.0));
    }

    #[test]
    fn test_animated_without_instance_fails() {
        let key = NamespacedKey::default_ns("textures/clouds/bolt");
        let anim = AnimatedGameTexture::new(
            key,
            16.0,
            64.0,
            AnimationMeta {
                frames: 4,
                wpf: 16,
                duration: 50,
            },
        )
        .unwrap();
        let layout = TextureLayout::Animated(anim);
        assert!(build_quad(key, &layout, None, 0.0, 0.0, &[], 1.0, (10.0, 10.0)).is_err());

        let instance = DrawInstance {
            current_frame: 3,
            elapsed: 0.0,
        };
        let quad = build_quad(key, &layout, Some(&instance), 0.0, 0.0, &[], 1.0, (10.0, 10.0)).unwrap();
        assert!(approx_eq(quad.src.y, 48.0));
        assert!(approx_eq(quad.half_height, 16.0));
    }
}
