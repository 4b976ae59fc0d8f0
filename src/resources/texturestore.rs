//! Texture cache.
//!
//! Every texture is loaded once per [`NamespacedKey`] and kept until the
//! process exits. A texture with a sibling `.json` file is an animation: the
//! image is a vertical strip of `frames` frames, each `wpf` pixels wide and
//! `height / frames` pixels tall, shown for `duration` milliseconds each.
//!
//! ```json
//! { "frames": 4, "wpf": 32, "duration": 80 }
//! ```

use raylib::prelude::{Rectangle, Texture2D};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::components::drawinstance::DrawInstance;
use crate::namespacedkey::NamespacedKey;
use crate::resources::assetprovider::AssetError;

#[derive(Debug, Error)]
pub enum DrawError {
    #[error("{0} is animated and can only be drawn through a DrawInstance")]
    MissingDrawInstance(NamespacedKey),
}

/// Contents of an animation metadata file.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationMeta {
    pub frames: u32,
    /// Width of one frame in pixels.
    pub wpf: u32,
    /// Frame duration in milliseconds.
    pub duration: u32,
}

/// Frame-strip geometry of an animated texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatedGameTexture {
    pub width: f32,
    pub height: f32,
    pub meta: AnimationMeta,
}

impl AnimatedGameTexture {
    pub fn new(key: NamespacedKey, width: f32, height: f32, meta: AnimationMeta) -> Result<Self, AssetError> {
        if meta.frames == 0 {
            return Err(AssetError::Metadata {
                key,
                reason: "frames must be at least 1".to_string(),
            });
        }
        if meta.wpf as f32 > width {
            return Err(AssetError::Metadata {
                key,
                reason: format!("wpf {} is wider than the texture ({})", meta.wpf, width),
            });
        }
        Ok(Self { width, height, meta })
    }

    pub fn total_frames(&self) -> u32 {
        self.meta.frames
    }

    /// Seconds per frame.
    pub fn frame_duration(&self) -> f32 {
        self.meta.duration as f32 / 1000.0
    }

    pub fn frame_height(&self) -> f32 {
        self.height / self.meta.frames as f32
    }

    pub fn frame_width(&self) -> f32 {
        if self.meta.wpf == 0 {
            self.width
        } else {
            self.meta.wpf as f32
        }
    }

    pub fn frame_source(&self, frame: u32) -> Rectangle {
        let frame = frame % self.meta.frames;
        let frame_height = self.frame_height();
        Rectangle::new(0.0, frame as f32 * frame_height, self.frame_width(), frame_height)
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TextureLayout {
    Static { width: f32, height: f32 },
    Animated(AnimatedGameTexture),
}

impl TextureLayout {
    /// Size of what a single draw shows: the whole image, or one frame.
    pub fn pixel_size(&self) -> (f32, f32) {
        match self {
            TextureLayout::Static { width, height } => (*width, *height),
            TextureLayout::Animated(anim) => (anim.frame_width(), anim.frame_height()),
        }
    }

    /// Source rectangle for a draw. Animated textures need the drawing
    /// entity's instance to know which frame to show.
    pub fn source(&self, key: NamespacedKey, instance: Option<&DrawInstance>) -> Result<Rectangle, DrawError> {
        match (self, instance) {
            (TextureLayout::Static { width, height }, _) => Ok(Rectangle::new(0.0, 0.0, *width, *height)),
            (TextureLayout::Animated(anim), Some(instance)) => Ok(anim.frame_source(instance.current_frame)),
            (TextureLayout::Animated(_), None) => Err(DrawError::MissingDrawInstance(key)),
        }
    }

    pub fn animation(&self) -> Option<&AnimatedGameTexture> {
        match self {
            TextureLayout::Animated(anim) => Some(anim),
            TextureLayout::Static { .. } => None,
        }
    }
}

/// GPU texture plus how to slice it.
pub struct GameTexture {
    pub texture: Texture2D,
    pub layout: TextureLayout,
}

/// Non-Send store of loaded textures.
///
/// Tied to the OpenGL context, so it lives as a NonSend resource inside the
/// asset manager.
#[derive(Default)]
pub struct TextureStore {
    map: FxHashMap<NamespacedKey, GameTexture>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: NamespacedKey, texture: GameTexture) {
        self.map.insert(key, texture);
    }

    pub fn get(&self, key: NamespacedKey) -> Option<&GameTexture> {
        self.map.get(&key)
    }

    pub fn contains(&self, key: NamespacedKey) -> bool {
        self.map.contains_key(&key)
    }

    pub fn layout(&self, key: NamespacedKey) -> Option<TextureLayout> {
        self.map.get(&key).map(|t| t.layout)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn bolt() -> AnimatedGameTexture {
        let meta: AnimationMeta = serde_json::from_str(r#"{"frames": 4, "wpf": 32, "duration": 80}"#).unwrap();
        AnimatedGameTexture::new(NamespacedKey::default_ns("textures/clouds/bolt"), 32.0, 256.0, meta).unwrap()
    }

    #[test]
    fn test_metadata_parses() {
        let anim = bolt();
        assert_eq!(anim.total_frames(), 4);
        assert!(approx_eq(anim.frame_duration(), 0.08));
        assert!(approx_eq(anim.frame_height(), 64.0));
    }

    #[test]
    fn test_zero_frames_is_rejected() {
        let meta = AnimationMeta {
            frames: 0,
            wpf: 16,
            duration: 100,
        };
        let result = AnimatedGameTexture::new(NamespacedKey::default_ns("x"), 16.0, 16.0, meta);
        assert!(matches!(result, Err(AssetError::Metadata { .. })));
    }

    #[test]
    fn test_frame_source_walks_down_the_strip() {
        let anim = bolt();
        let src = anim.frame_source(2);
        assert!(approx_eq(src.x, 0.0));
        assert!(approx_eq(src.y, 128.0));
        assert!(approx_eq(src.width, 32.0));
        assert!(approx_eq(src.height, 64.0));
        // out of range frames wrap
        assert!(approx_eq(anim.frame_source(6).y, 128.0));
    }

    #[test]
    fn test_animated_source_requires_instance() {
        let key = NamespacedKey::default_ns("textures/clouds/bolt");
        let layout = TextureLayout::Animated(bolt());
        assert!(matches!(
            layout.source(key, None),
            Err(DrawError::MissingDrawInstance(k)) if k == key
        ));
        let instance = DrawInstance {
            current_frame: 1,
            elapsed: 0.0,
        };
        let src = layout.source(key, Some(&instance)).unwrap();
        assert!(approx_eq(src.y, 64.0));
    }

    #[test]
    fn test_static_source_is_whole_image() {
        let layout = TextureLayout::Static {
            width: 24.0,
            height: 12.0,
        };
        let src = layout.source(NamespacedKey::default_ns("textures/buttons/button"), None).unwrap();
        assert!(approx_eq(src.width, 24.0));
        assert!(approx_eq(src.height, 12.0));
        assert_eq!(layout.pixel_size(), (24.0, 12.0));
    }
}
