//! Render system.
//!
//! Each frame the drawable entities of the drawn screens are gathered into
//! [`DrawItem`]s, sorted into layers and resolved into [`TexturedQuad`]s in
//! world units. Quads outside the visible area are culled, the rest are
//! projected to pixels and drawn inside the textured shader.
//!
//! Layer order:
//! 1. overlaid screen, projection layer then camera layer
//! 2. current screen, projection layer then camera layer
//! 3. debug overlay
//!
//! Inside a layer entities draw by [`ZIndex`]; for one entity the button body
//! comes before its label.
use std::time::Instant;

use bevy_ecs::prelude::*;
use log::error;
use raylib::prelude::*;
use smallvec::SmallVec;

use crate::components::background::{BOLT_DROP, BOLT_SCALE, LightningStrike, bolt_texture};
use crate::components::boundingbox::BoundingBox;
use crate::components::drawinstance::DrawInstance;
use crate::components::gui::{Button, GuiElement};
use crate::components::position::Position;
use crate::components::screen::{DrawSpace, ScreenOwned};
use crate::components::sprite::{DrawProperty, Sprite, TexturedQuad, build_quad};
use crate::components::text::{GlyphQuad, Text, font_atlas_key};
use crate::components::zindex::ZIndex;
use crate::namespacedkey::NamespacedKey;
use crate::resources::assetmanager::{AssetManager, fatal};
use crate::resources::debugmode::{DebugMode, FrameStats};
use crate::resources::renderer::GameRenderer;
use crate::resources::shaderstore::textured_shader_key;
use crate::resources::texturestore::TextureLayout;

/// Slot of the debug overlay, after every screen.
const OVERLAY_SLOT: usize = usize::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LayerKey {
    pub slot: usize,
    pub space: u8,
    pub z: i32,
    pub kind: u8,
}

impl LayerKey {
    pub fn new(slot: usize, space: DrawSpace, z: Option<&ZIndex>, kind: u8) -> Self {
        Self {
            slot,
            space: match space {
                DrawSpace::Projection => 0,
                DrawSpace::Camera => 1,
            },
            z: z.map_or(0, |z| z.0),
            kind,
        }
    }
}

const KIND_SPRITE: u8 = 0;
const KIND_BUTTON: u8 = 1;
const KIND_STRIKE: u8 = 2;
const KIND_TEXT: u8 = 3;

#[derive(Clone, Debug)]
pub enum DrawSource {
    Textured {
        texture: NamespacedKey,
        properties: SmallVec<[DrawProperty; 4]>,
        instance: Option<DrawInstance>,
        x: f32,
        y: f32,
    },
    Glyphs(Vec<GlyphQuad>),
}

#[derive(Clone, Debug)]
pub struct DrawItem {
    pub key: LayerKey,
    pub space: DrawSpace,
    pub source: DrawSource,
}

impl DrawItem {
    fn textures(&self) -> SmallVec<[NamespacedKey; 1]> {
        match &self.source {
            DrawSource::Textured { texture, .. } => SmallVec::from_elem(*texture, 1),
            DrawSource::Glyphs(glyphs) if glyphs.is_empty() => SmallVec::new(),
            DrawSource::Glyphs(_) => SmallVec::from_elem(font_atlas_key(), 1),
        }
    }
}

fn glyph_quad(glyph: &GlyphQuad) -> TexturedQuad {
    TexturedQuad {
        texture: font_atlas_key(),
        x: glyph.x,
        y: glyph.y,
        half_width: glyph.half_extent,
        half_height: glyph.half_extent,
        src: glyph.src,
        rotation: 0.0,
        tint: glyph.color,
    }
}

fn is_visible(quad: &TexturedQuad, renderer: &GameRenderer, space: DrawSpace) -> bool {
    let bounding_box = if quad.rotation == 0.0 {
        BoundingBox::rectangle(quad.half_width, quad.half_height)
    } else {
        BoundingBox::square(quad.half_width.hypot(quad.half_height))
    };
    bounding_box.is_screen_visible(quad.x, quad.y, renderer.matrix_for(space))
}

/// Sort the items into layers and turn them into visible quads.
/// `layout_of` must know every texture the items reference.
pub fn resolve_quads(
    mut items: Vec<DrawItem>,
    layout_of: impl Fn(NamespacedKey) -> Option<TextureLayout>,
    renderer: &GameRenderer,
) -> Vec<(DrawSpace, TexturedQuad)> {
    items.sort_by_key(|item| item.key);
    let ratio = renderer.aspect_ratio();
    let view = renderer.view_half_extents();
    let mut quads = Vec::new();
    for item in items {
        match item.source {
            DrawSource::Textured {
                texture,
                properties,
                instance,
                x,
                y,
            } => {
                let Some(layout) = layout_of(texture) else {
                    continue;
                };
                match build_quad(texture, &layout, instance.as_ref(), x, y, &properties, ratio, view) {
                    Ok(quad) => {
                        if is_visible(&quad, renderer, item.space) {
                            quads.push((item.space, quad));
                        }
                    }
                    Err(err) => {
                        error!("{}", err);
                        panic!("Draw error: {}", err);
                    }
                }
            }
            DrawSource::Glyphs(glyphs) => {
                quads.extend(
                    glyphs
                        .iter()
                        .map(glyph_quad)
                        .filter(|quad| is_visible(quad, renderer, item.space))
                        .map(|quad| (item.space, quad)),
                );
            }
        }
    }
    quads
}

type SpriteQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Sprite,
        &'static Position,
        &'static ScreenOwned,
        Option<&'static DrawInstance>,
        Option<&'static DrawSpace>,
        Option<&'static ZIndex>,
    ),
>;
type ButtonQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Button,
        &'static GuiElement,
        &'static Position,
        &'static BoundingBox,
        &'static ScreenOwned,
        Option<&'static ZIndex>,
    ),
>;
type TextQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Text,
        &'static Position,
        &'static ScreenOwned,
        Option<&'static DrawSpace>,
        Option<&'static ZIndex>,
    ),
>;
type StrikeQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static LightningStrike,
        &'static Position,
        &'static DrawInstance,
        &'static ScreenOwned,
        Option<&'static ZIndex>,
    ),
>;

#[allow(clippy::too_many_arguments)]
fn collect_items(
    renderer: &GameRenderer,
    overlay: Option<&FrameStats>,
    sprites: &SpriteQuery,
    buttons: &ButtonQuery,
    texts: &TextQuery,
    strikes: &StrikeQuery,
) -> Vec<DrawItem> {
    let screens = renderer.drawn_screens();
    let slot_of = |owner: &ScreenOwned| screens.iter().position(|s| *s == owner.0);
    let ratio = renderer.aspect_ratio();
    let mut items = Vec::new();

    for (sprite, position, owner, instance, space, z) in sprites.iter() {
        let Some(slot) = slot_of(owner) else { continue };
        let space = space.copied().unwrap_or_default();
        items.push(DrawItem {
            key: LayerKey::new(slot, space, z, KIND_SPRITE),
            space,
            source: DrawSource::Textured {
                texture: sprite.texture,
                properties: sprite.properties.clone(),
                instance: instance.copied(),
                x: position.x(),
                y: position.y(),
            },
        });
    }

    for (button, element, position, bounding_box, owner, z) in buttons.iter() {
        let Some(slot) = slot_of(owner) else { continue };
        let (texture, properties) = button.sprite(element.hovered, bounding_box);
        items.push(DrawItem {
            key: LayerKey::new(slot, DrawSpace::Projection, z, KIND_BUTTON),
            space: DrawSpace::Projection,
            source: DrawSource::Textured {
                texture,
                properties: SmallVec::from_slice(&properties),
                instance: None,
                x: position.x(),
                y: position.y(),
            },
        });
    }

    for (strike, position, instance, owner, z) in strikes.iter() {
        let Some(slot) = slot_of(owner) else { continue };
        for segment in &strike.segments {
            items.push(DrawItem {
                key: LayerKey::new(slot, DrawSpace::Projection, z, KIND_STRIKE),
                space: DrawSpace::Projection,
                source: DrawSource::Textured {
                    texture: bolt_texture(),
                    properties: SmallVec::from_slice(&[
                        DrawProperty::Rotation(segment.rotation),
                        DrawProperty::Scale(BOLT_SCALE),
                    ]),
                    instance: Some(*instance),
                    x: position.x() + segment.dx,
                    y: position.y() + segment.dy - BOLT_DROP,
                },
            });
        }
    }

    for (text, position, owner, space, z) in texts.iter() {
        let Some(slot) = slot_of(owner) else { continue };
        let space = space.copied().unwrap_or_default();
        items.push(DrawItem {
            key: LayerKey::new(slot, space, z, KIND_TEXT),
            space,
            source: DrawSource::Glyphs(text.glyphs(position.x(), position.y(), ratio)),
        });
    }

    if let Some(stats) = overlay {
        for (x, y, text) in stats.overlay() {
            items.push(DrawItem {
                key: LayerKey::new(OVERLAY_SLOT, DrawSpace::Projection, None, KIND_TEXT),
                space: DrawSpace::Projection,
                source: DrawSource::Glyphs(text.glyphs(x, y, ratio)),
            });
        }
    }

    items
}

#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    mut assets: NonSendMut<AssetManager>,
    renderer: Res<GameRenderer>,
    debug: Option<Res<DebugMode>>,
    mut stats: ResMut<FrameStats>,
    sprites: SpriteQuery,
    buttons: ButtonQuery,
    texts: TextQuery,
    strikes: StrikeQuery,
) {
    let start = Instant::now();
    let overlay = debug.is_some().then_some(&*stats);
    let items = collect_items(&renderer, overlay, &sprites, &buttons, &texts, &strikes);

    for item in &items {
        for key in item.textures() {
            if let Err(err) = assets.texture(&mut rl, &th, key) {
                fatal(err);
            }
        }
    }
    if let Err(err) = assets.shader(&mut rl, &th, textured_shader_key()) {
        fatal(err);
    }

    let quads = resolve_quads(items, |key| assets.texture_layout(key), &renderer);
    let textures = assets.textures();

    {
        let mut d = rl.begin_drawing(&th);
        d.clear_background(Color::BLACK);
        if let Some(shader) = assets.shaders().get(textured_shader_key()) {
            let mut s = d.begin_shader_mode(&shader.shader);
            for (space, quad) in &quads {
                let Some(texture) = textures.get(quad.texture) else {
                    continue;
                };
                let dest = renderer.screen_rect(
                    renderer.matrix_for(*space),
                    quad.x,
                    quad.y,
                    quad.half_width,
                    quad.half_height,
                );
                let origin = Vector2::new(dest.width / 2.0, dest.height / 2.0);
                s.draw_texture_pro(&texture.texture, quad.src, dest, origin, -quad.rotation, quad.tint);
            }
        }
    }

    stats.record_render(start.elapsed().as_secs_f32());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::text::DrawStyle;

    fn textured(slot: usize, space: DrawSpace, z: i32, kind: u8, x: f32) -> DrawItem {
        DrawItem {
            key: LayerKey::new(slot, space, Some(&ZIndex(z)), kind),
            space,
            source: DrawSource::Textured {
                texture: NamespacedKey::default_ns("textures/test"),
                properties: SmallVec::new(),
                instance: None,
                x,
                y: 0.0,
            },
        }
    }

    fn layout(_: NamespacedKey) -> Option<TextureLayout> {
        Some(TextureLayout::Static {
            width: 1.0,
            height: 1.0,
        })
    }

    #[test]
    fn test_layers_sort_screen_then_space_then_z() {
        let renderer = GameRenderer::new(800.0, 800.0);
        let items = vec![
            textured(1, DrawSpace::Projection, 0, KIND_SPRITE, 4.0),
            textured(0, DrawSpace::Camera, 0, KIND_SPRITE, 3.0),
            textured(0, DrawSpace::Projection, 5, KIND_SPRITE, 2.0),
            textured(0, DrawSpace::Projection, -1, KIND_SPRITE, 1.0),
        ];
        let order: Vec<f32> = resolve_quads(items, layout, &renderer)
            .iter()
            .map(|(_, q)| q.x)
            .collect();
        assert_eq!(order, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_offscreen_quads_are_culled() {
        let renderer = GameRenderer::new(800.0, 800.0);
        let items = vec![
            textured(0, DrawSpace::Projection, 0, KIND_SPRITE, 0.0),
            textured(0, DrawSpace::Projection, 0, KIND_SPRITE, 50.0),
        ];
        assert_eq!(resolve_quads(items, layout, &renderer).len(), 1);
    }

    #[test]
    fn test_unknown_texture_is_skipped() {
        let renderer = GameRenderer::new(800.0, 800.0);
        let items = vec![textured(0, DrawSpace::Projection, 0, KIND_SPRITE, 0.0)];
        assert!(resolve_quads(items, |_| None, &renderer).is_empty());
    }

    #[test]
    fn test_text_becomes_atlas_quads() {
        let renderer = GameRenderer::new(800.0, 800.0);
        let text = Text::new("<white>Hi", 1.0, DrawStyle::Absolute);
        let item = DrawItem {
            key: LayerKey::new(0, DrawSpace::Projection, None, KIND_TEXT),
            space: DrawSpace::Projection,
            source: DrawSource::Glyphs(text.glyphs(0.0, 0.0, 1.0)),
        };
        assert_eq!(item.textures().as_slice(), &[font_atlas_key()]);
        let quads = resolve_quads(vec![item], |_| None, &renderer);
        assert_eq!(quads.len(), 2);
        assert!(quads.iter().all(|(_, q)| q.texture == font_atlas_key()));
    }

    #[test]
    #[should_panic]
    fn test_animated_texture_without_instance_panics() {
        use crate::resources::texturestore::{AnimatedGameTexture, AnimationMeta};
        let renderer = GameRenderer::new(800.0, 800.0);
        let key = NamespacedKey::default_ns("textures/test");
        let animated = AnimatedGameTexture::new(
            key,
            16.0,
            48.0,
            AnimationMeta {
                frames: 3,
                wpf: 16,
                duration: 100,
            },
        )
        .unwrap();
        let items = vec![textured(0, DrawSpace::Projection, 0, KIND_SPRITE, 0.0)];
        resolve_quads(items, |_| Some(TextureLayout::Animated(animated)), &renderer);
    }
}
