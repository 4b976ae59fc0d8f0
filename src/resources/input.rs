//! Keybindings and per-frame input state.
//!
//! A [`Keybinding`] is a namespaced name (`ro:key/jump`) resolved to a key
//! code through the keymap file `ro:keymaps/default_<layout>.json`:
//!
//! ```json
//! { "ro:key/move_right": 68, "ro:key/move_left": 65, "ro:key/jump": 32, "ro:key/escape": 256 }
//! ```
//!
//! Bindings missing from the keymap are unbound ([`UNBOUND`]) and never
//! report as down. [`GameInputHandler`] also keeps which keys and mouse
//! buttons are held and where the cursor points, fed by the input system each
//! frame.
use bevy_ecs::prelude::*;
use log::{info, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::components::position::Point2D;
use crate::namespacedkey::NamespacedKey;
use crate::resources::assetmanager::AssetManager;
use crate::resources::assetprovider::AssetError;

/// Key code of a binding absent from the keymap.
pub const UNBOUND: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keybinding(pub NamespacedKey);

impl Keybinding {
    /// Binding `ro:key/<name>`.
    pub fn named(name: &str) -> Self {
        Keybinding(NamespacedKey::default_ns(&format!("key/{}", name)))
    }

    pub fn move_right() -> Self {
        Self::named("move_right")
    }

    pub fn move_left() -> Self {
        Self::named("move_left")
    }

    pub fn jump() -> Self {
        Self::named("jump")
    }

    pub fn escape() -> Self {
        Self::named("escape")
    }

    /// Every binding the game registers at startup.
    pub fn all() -> [Keybinding; 4] {
        [Self::move_right(), Self::move_left(), Self::jump(), Self::escape()]
    }
}

/// Keymap file for a keyboard layout.
pub fn keymap_key(layout: &str) -> NamespacedKey {
    NamespacedKey::default_ns(&format!("keymaps/default_{}.json", layout))
}

#[derive(Resource, Debug, Clone, Default)]
pub struct GameInputHandler {
    keymap: FxHashMap<String, i32>,
    bindings: FxHashMap<Keybinding, i32>,
    keys_down: FxHashSet<i32>,
    keys_released: FxHashSet<i32>,
    mouse_down: FxHashSet<i32>,
    modifiers: u32,
    cursor: Point2D,
}

impl GameInputHandler {
    pub fn new(keymap: FxHashMap<String, i32>) -> Self {
        Self {
            keymap,
            ..Default::default()
        }
    }

    /// Load the keymap for `layout`. A missing or malformed file is an error.
    pub fn from_keymap(assets: &AssetManager, layout: &str) -> Result<Self, AssetError> {
        let key = keymap_key(layout);
        let keymap: FxHashMap<String, i32> = assets.load_json(key)?;
        info!("Loaded keymap {} with {} entries", key, keymap.len());
        Ok(Self::new(keymap))
    }

    /// Resolve a binding against the keymap. Registering twice keeps the
    /// first resolution.
    pub fn register(&mut self, binding: Keybinding) -> i32 {
        let keymap = &self.keymap;
        *self.bindings.entry(binding).or_insert_with(|| {
            let code = keymap.get(&binding.0.to_string()).copied().unwrap_or(UNBOUND);
            if code == UNBOUND {
                warn!("Keybinding {} is not bound", binding.0);
            }
            code
        })
    }

    /// Key code for a binding, [`UNBOUND`] when unknown.
    pub fn key_code(&self, binding: Keybinding) -> i32 {
        self.bindings.get(&binding).copied().unwrap_or(UNBOUND)
    }

    /// Start of frame: forget last frame's releases.
    pub fn begin_frame(&mut self, modifiers: u32) {
        self.keys_released.clear();
        self.modifiers = modifiers;
    }

    pub fn key_pressed(&mut self, code: i32) {
        self.keys_down.insert(code);
    }

    pub fn key_released(&mut self, code: i32) {
        self.keys_down.remove(&code);
        self.keys_released.insert(code);
    }

    pub fn is_key_down(&self, code: i32) -> bool {
        code != UNBOUND && self.keys_down.contains(&code)
    }

    pub fn is_down(&self, binding: Keybinding) -> bool {
        self.is_key_down(self.key_code(binding))
    }

    /// Released during the current frame.
    pub fn was_released(&self, binding: Keybinding) -> bool {
        let code = self.key_code(binding);
        code != UNBOUND && self.keys_released.contains(&code)
    }

    pub fn mouse_pressed(&mut self, button: i32) {
        self.mouse_down.insert(button);
    }

    pub fn mouse_released(&mut self, button: i32) {
        self.mouse_down.remove(&button);
    }

    pub fn is_mouse_down(&self, button: i32) -> bool {
        self.mouse_down.contains(&button)
    }

    pub fn modifiers(&self) -> u32 {
        self.modifiers
    }

    /// Cursor in world units under the projection.
    pub fn cursor(&self) -> Point2D {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Point2D) {
        self.cursor = cursor;
    }
}
