//! Asset manager.
//!
//! Owns the [`AssetProvider`] and the texture/shader caches. Lives in the
//! world as a NonSend resource since GPU handles are bound to the main thread.
//!
//! Loading is lazy: the first request for a key reads, decodes and uploads
//! it, every later request hits the cache. A failure to load is fatal for the
//! caller; [`fatal`] logs the error and aborts.

use log::{error, info};
use raylib::ffi;
use raylib::prelude::*;
use serde::de::DeserializeOwned;

use crate::namespacedkey::NamespacedKey;
use crate::resources::assetprovider::{
    AssetError, AssetProvider, metadata_path, resource_path, shader_paths, texture_path,
};
use crate::resources::shaderstore::{GameShader, ShaderStore};
use crate::resources::texturestore::{
    AnimatedGameTexture, AnimationMeta, GameTexture, TextureLayout, TextureStore,
};

pub struct AssetManager {
    provider: Box<dyn AssetProvider>,
    textures: TextureStore,
    shaders: ShaderStore,
}

impl AssetManager {
    pub fn new(provider: impl AssetProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            textures: TextureStore::new(),
            shaders: ShaderStore::new(),
        }
    }

    pub fn provider(&self) -> &dyn AssetProvider {
        self.provider.as_ref()
    }

    pub fn textures(&self) -> &TextureStore {
        &self.textures
    }

    pub fn shaders(&self) -> &ShaderStore {
        &self.shaders
    }

    /// Parse the JSON resource stored at `/assets/<ns>/<path>`.
    pub fn load_json<T: DeserializeOwned>(&self, key: NamespacedKey) -> Result<T, AssetError> {
        let path = resource_path(key);
        let text = self.provider.read_to_string(&path)?;
        serde_json::from_str(&text).map_err(|source| AssetError::Json { path, source })
    }

    /// Animation metadata for a texture key, if it has any.
    pub fn animation_meta(&self, key: NamespacedKey) -> Result<Option<AnimationMeta>, AssetError> {
        let path = metadata_path(key);
        if !self.provider.exists(&path) {
            return Ok(None);
        }
        let text = self.provider.read_to_string(&path)?;
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| AssetError::Json { path, source })
    }

    /// Cached texture for `key`, loading it on first use.
    pub fn texture(
        &mut self,
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        key: NamespacedKey,
    ) -> Result<&GameTexture, AssetError> {
        if !self.textures.contains(key) {
            let texture = self.load_texture(rl, th, key)?;
            self.textures.insert(key, texture);
        }
        self.textures.get(key).ok_or_else(|| AssetError::NotFound {
            path: texture_path(key),
        })
    }

    /// Layout of a texture already in the cache.
    pub fn texture_layout(&self, key: NamespacedKey) -> Option<TextureLayout> {
        self.textures.layout(key)
    }

    fn load_texture(
        &self,
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        key: NamespacedKey,
    ) -> Result<GameTexture, AssetError> {
        let bytes = self.provider.read(&texture_path(key))?;
        let image = Image::load_image_from_mem(".png", &bytes).map_err(|e| AssetError::Decode {
            key,
            reason: e.to_string(),
        })?;
        let texture = rl
            .load_texture_from_image(th, &image)
            .map_err(|e| AssetError::Decode {
                key,
                reason: e.to_string(),
            })?;
        unsafe {
            ffi::SetTextureFilter(*texture, TextureFilter::TEXTURE_FILTER_POINT as i32);
        }
        let (width, height) = (texture.width as f32, texture.height as f32);
        let layout = match self.animation_meta(key)? {
            Some(meta) => TextureLayout::Animated(AnimatedGameTexture::new(key, width, height, meta)?),
            None => TextureLayout::Static { width, height },
        };
        info!("Loaded texture {} ({}x{})", key, width, height);
        Ok(GameTexture { texture, layout })
    }

    /// Cached shader program for `key`, compiling it on first use.
    pub fn shader(
        &mut self,
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        key: NamespacedKey,
    ) -> Result<&GameShader, AssetError> {
        if !self.shaders.contains(key) {
            let (vertex_path, fragment_path) = shader_paths(key);
            let vertex = self.provider.read_to_string(&vertex_path)?;
            let fragment = self.provider.read_to_string(&fragment_path)?;
            let shader = rl.load_shader_from_memory(th, Some(vertex.as_str()), Some(fragment.as_str()));
            info!("Loaded shader {}", key);
            self.shaders.insert(GameShader { key, shader });
        }
        self.shaders.get(key).ok_or_else(|| AssetError::NotFound {
            path: resource_path(key),
        })
    }
}

/// Abort on an asset that could not be loaded.
pub fn fatal(err: AssetError) -> ! {
    error!("{}", err);
    panic!("Fatal asset error: {}", err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::assetprovider::MemoryAssetProvider;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Sample {
        name: String,
    }

    #[test]
    fn test_load_json_reads_resource_path() {
        let provider = MemoryAssetProvider::new().with("/assets/ro/data/sample.json", r#"{"name": "bolt"}"#);
        let assets = AssetManager::new(provider);
        let sample: Sample = assets.load_json(NamespacedKey::default_ns("data/sample.json")).unwrap();
        assert_eq!(sample.name, "bolt");
    }

    #[test]
    fn test_load_json_missing_is_not_found() {
        let assets = AssetManager::new(MemoryAssetProvider::new());
        let result: Result<Sample, _> = assets.load_json(NamespacedKey::default_ns("data/none.json"));
        assert!(matches!(result, Err(AssetError::NotFound { .. })));
    }

    #[test]
    fn test_load_json_malformed() {
        let provider = MemoryAssetProvider::new().with("/assets/ro/data/bad.json", "{ name: ");
        let assets = AssetManager::new(provider);
        let result: Result<Sample, _> = assets.load_json(NamespacedKey::default_ns("data/bad.json"));
        assert!(matches!(result, Err(AssetError::Json { .. })));
    }

    #[test]
    fn test_animation_meta_is_optional() {
        let provider = MemoryAssetProvider::new().with(
            "/assets/ro/textures/clouds/bolt.json",
            r#"{"frames": 5, "wpf": 64, "duration": 60}"#,
        );
        let assets = AssetManager::new(provider);
        let meta = assets
            .animation_meta(NamespacedKey::default_ns("textures/clouds/bolt"))
            .unwrap();
        assert_eq!(
            meta,
            Some(AnimationMeta {
                frames: 5,
                wpf: 64,
                duration: 60
            })
        );
        let none = assets
            .animation_meta(NamespacedKey::default_ns("textures/buttons/button"))
            .unwrap();
        assert!(none.is_none());
    }
}
