//! GUI widgets.
//!
//! A widget is an entity with a [`GuiElement`], a `Position`, a
//! `BoundingBox` and one of:
//!
//! - [`Button`]: centred text label on a button texture, or a fixed-size
//!   textured sprite; optionally runs a [`ButtonAction`] when clicked
//! - `Text`: a plain label
//! - [`InputBox`]: an invisible hover area
//!
//! Widgets belong to one screen and are ordered by [`GuiElement::order`];
//! the tab walk follows that order over selectable widgets only.

use bevy_ecs::prelude::Component;

use crate::components::boundingbox::BoundingBox;
use crate::components::sprite::DrawProperty;
use crate::components::text::Text;
use crate::namespacedkey::NamespacedKey;

pub const BUTTON_SCALE: f32 = 0.5;
/// Width of a button that does not fit its text, before scaling.
const BUTTON_WIDTH: f32 = 24.0;
const FIT_TEXT_PADDING: f32 = 0.25;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GuiElement {
    pub order: usize,
    pub hovered: bool,
    pub selectable: bool,
}

impl GuiElement {
    pub fn selectable(order: usize) -> Self {
        Self {
            order,
            hovered: false,
            selectable: true,
        }
    }

    pub fn passive(order: usize) -> Self {
        Self {
            order,
            hovered: false,
            selectable: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    NewGame,
    Options,
    BackToTitle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ButtonStyle {
    /// Button texture sized around the entity's `Text` label.
    Default { fit_text: bool },
    Textured {
        texture: NamespacedKey,
        hover_texture: Option<NamespacedKey>,
        width: f32,
        height: f32,
    },
}

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Button {
    pub style: ButtonStyle,
    pub action: Option<ButtonAction>,
}

impl Button {
    pub fn labelled(fit_text: bool, action: Option<ButtonAction>) -> Self {
        Self {
            style: ButtonStyle::Default { fit_text },
            action,
        }
    }

    pub fn textured(texture: NamespacedKey, width: f32, height: f32, action: Option<ButtonAction>) -> Self {
        Self {
            style: ButtonStyle::Textured {
                texture,
                hover_texture: None,
                width,
                height,
            },
            action,
        }
    }

    /// Bounding box given the entity's label, if any.
    pub fn bounding_box(&self, label: Option<&Text>) -> BoundingBox {
        match self.style {
            ButtonStyle::Default { fit_text } => {
                let text_box = label.map(Text::bounding_box).unwrap_or(BoundingBox::EMPTY);
                if fit_text {
                    text_box
                } else {
                    BoundingBox::rectangle(BUTTON_WIDTH / 2.0 * BUTTON_SCALE, text_box.top_y)
                }
            }
            ButtonStyle::Textured { width, height, .. } => {
                BoundingBox::rectangle(width * BUTTON_SCALE, height * BUTTON_SCALE)
            }
        }
    }

    /// Texture and draw properties for the button body.
    pub fn sprite(&self, hovered: bool, bounding_box: &BoundingBox) -> (NamespacedKey, [DrawProperty; 2]) {
        match self.style {
            ButtonStyle::Default { fit_text } => {
                let texture = if hovered {
                    NamespacedKey::default_ns("textures/buttons/button_highlighted")
                } else {
                    NamespacedKey::default_ns("textures/buttons/button")
                };
                let width = if fit_text {
                    bounding_box.right_x / BUTTON_SCALE + FIT_TEXT_PADDING
                } else {
                    BUTTON_WIDTH * BUTTON_SCALE
                };
                let height = bounding_box.top_y / BUTTON_SCALE;
                (
                    texture,
                    [
                        DrawProperty::Scale(BUTTON_SCALE),
                        DrawProperty::Dimensions { width, height },
                    ],
                )
            }
            ButtonStyle::Textured {
                texture,
                hover_texture,
                width,
                height,
            } => {
                let texture = if hovered {
                    hover_texture.unwrap_or(texture)
                } else {
                    texture
                };
                (
                    texture,
                    [
                        DrawProperty::Scale(BUTTON_SCALE),
                        DrawProperty::Dimensions { width, height },
                    ],
                )
            }
        }
    }
}

/// Invisible hover area of a fixed size.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct InputBox {
    pub width: f32,
    pub height: f32,
}

impl InputBox {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::rectangle(self.width / 2.0, self.height / 2.0)
    }
}

/// Next element in tab order after `last`, skipping non-selectable ones.
/// `None` once the end is reached; a walk from `None` starts over.
pub fn next_tab(last: Option<usize>, selectable: &[bool]) -> Option<usize> {
    let start = last.map_or(0, |i| i + 1);
    (start..selectable.len()).find(|&i| selectable[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::text::DrawStyle;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_tab_visits_each_selectable_once() {
        let selectable = [true, false, true, true, false];
        let mut visited = Vec::new();
        let mut current = next_tab(None, &selectable);
        while let Some(i) = current {
            visited.push(i);
            current = next_tab(Some(i), &selectable);
        }
        assert_eq!(visited, vec![0, 2, 3]);
        // and starts over afterwards
        assert_eq!(next_tab(None, &selectable), Some(0));
    }

    #[test]
    fn test_tab_with_nothing_selectable() {
        assert_eq!(next_tab(None, &[false, false]), None);
        assert_eq!(next_tab(None, &[]), None);
    }

    #[test]
    fn test_tab_from_last_selectable_returns_none() {
        assert_eq!(next_tab(Some(1), &[false, true, false]), None);
    }

    #[test]
    fn test_fixed_width_button_box() {
        let label = Text::new("<shadow>New Game", BUTTON_SCALE, DrawStyle::Centered);
        let button = Button::labelled(false, Some(ButtonAction::NewGame));
        let bb = button.bounding_box(Some(&label));
        assert!(approx_eq(bb.right_x, 6.0));
        assert!(approx_eq(bb.left_x, -6.0));
        assert!(approx_eq(bb.top_y, label.bounding_box().top_y));

        let (texture, props) = button.sprite(false, &bb);
        assert_eq!(texture, NamespacedKey::default_ns("textures/buttons/button"));
        match props[1] {
            DrawProperty::Dimensions { width, height } => {
                assert!(approx_eq(width, 12.0));
                assert!(approx_eq(height * BUTTON_SCALE, bb.top_y));
            }
            _ => panic!("expected dimensions"),
        }
    }

    #[test]
    fn test_fit_text_button_box() {
        let label = Text::new("Ok", BUTTON_SCALE, DrawStyle::Centered);
        let button = Button::labelled(true, None);
        let bb = button.bounding_box(Some(&label));
        assert_eq!(bb, label.bounding_box());
        let (_, props) = button.sprite(false, &bb);
        match props[1] {
            DrawProperty::Dimensions { width, .. } => {
                assert!(approx_eq(width, bb.right_x / BUTTON_SCALE + 0.25));
            }
            _ => panic!("expected dimensions"),
        }
    }

    #[test]
    fn test_hover_swaps_texture() {
        let button = Button::labelled(false, None);
        let (texture, _) = button.sprite(true, &BoundingBox::square(1.0));
        assert_eq!(texture, NamespacedKey::default_ns("textures/buttons/button_highlighted"));

        let plain = NamespacedKey::default_ns("textures/gui/icon");
        let hover = NamespacedKey::default_ns("textures/gui/icon_hover");
        let mut textured = Button::textured(plain, 4.0, 2.0, None);
        assert_eq!(textured.sprite(true, &BoundingBox::EMPTY).0, plain);
        textured.style = ButtonStyle::Textured {
            texture: plain,
            hover_texture: Some(hover),
            width: 4.0,
            height: 2.0,
        };
        assert_eq!(textured.sprite(true, &BoundingBox::EMPTY).0, hover);
        assert_eq!(textured.bounding_box(None), BoundingBox::rectangle(2.0, 1.0));
    }

    #[test]
    fn test_input_box() {
        let input = InputBox::new(8.0, 1.5);
        assert_eq!(input.bounding_box(), BoundingBox::rectangle(4.0, 0.75));
    }
}
