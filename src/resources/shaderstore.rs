//! Shader storage.
//!
//! Shader programs are compiled and linked once per [`NamespacedKey`] from a
//! `vertex.glsl` / `fragment.glsl` pair and cached for the process lifetime.
//! Sources follow raylib's default attribute and uniform names
//! (`vertexPosition`, `vertexTexCoord`, `vertexColor`, `mvp`, `texture0`,
//! `colDiffuse`).

use raylib::prelude::Shader;
use rustc_hash::FxHashMap;

use crate::namespacedkey::NamespacedKey;

/// Key of the program every textured quad is drawn with.
pub fn textured_shader_key() -> NamespacedKey {
    NamespacedKey::default_ns("shader/textured")
}

/// A linked vertex + fragment program.
pub struct GameShader {
    pub key: NamespacedKey,
    pub shader: Shader,
}

/// Non-Send resource storing loaded shaders.
///
/// This is a `NonSend` store because shaders are tied to the OpenGL context.
#[derive(Default)]
pub struct ShaderStore {
    shaders: FxHashMap<NamespacedKey, GameShader>,
}

impl ShaderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, shader: GameShader) {
        self.shaders.insert(shader.key, shader);
    }

    pub fn get(&self, key: NamespacedKey) -> Option<&GameShader> {
        self.shaders.get(&key)
    }

    pub fn contains(&self, key: NamespacedKey) -> bool {
        self.shaders.contains_key(&key)
    }
}
