//! Interned `namespace:path` identifiers.
//!
//! Every asset (texture, shader, keymap) and every keybinding is addressed by a
//! [`NamespacedKey`]. Keys are interned in a process-wide registry: asking for
//! the same `(namespace, path)` twice yields the same instance, so equality and
//! hashing are pointer based and keys are cheap to copy around as map keys.
//!
//! ```
//! use rogues_odyssey::namespacedkey::NamespacedKey;
//!
//! let a = NamespacedKey::get("ro", "textures/player/placeholder_player");
//! let b = NamespacedKey::default_ns("textures/player/placeholder_player");
//! assert_eq!(a, b);
//! assert_eq!(a.to_string(), "ro:textures/player/placeholder_player");
//! ```

use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{LazyLock, Mutex};

/// Namespace used by the game's own assets.
pub const DEFAULT_NAMESPACE: &str = "ro";

#[derive(Debug)]
struct KeyData {
    namespace: String,
    path: String,
}

static REGISTRY: LazyLock<Mutex<FxHashMap<(String, String), &'static KeyData>>> =
    LazyLock::new(|| Mutex::new(FxHashMap::default()));

/// Interned asset identifier.
#[derive(Clone, Copy)]
pub struct NamespacedKey(&'static KeyData);

impl NamespacedKey {
    /// Look up (or register) the key for `namespace:path`.
    pub fn get(namespace: &str, path: &str) -> Self {
        let mut registry = REGISTRY.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let lookup = (namespace.to_owned(), path.to_owned());
        if let Some(data) = registry.get(&lookup) {
            return NamespacedKey(data);
        }
        let data: &'static KeyData = Box::leak(Box::new(KeyData {
            namespace: lookup.0.clone(),
            path: lookup.1.clone(),
        }));
        registry.insert(lookup, data);
        NamespacedKey(data)
    }

    /// Key in the game's own namespace.
    pub fn default_ns(path: &str) -> Self {
        Self::get(DEFAULT_NAMESPACE, path)
    }

    /// Parse the `namespace:path` form. A string without a colon lands in the
    /// default namespace.
    pub fn parse(s: &str) -> Self {
        match s.split_once(':') {
            Some((namespace, path)) => Self::get(namespace, path),
            None => Self::default_ns(s),
        }
    }

    pub fn namespace(&self) -> &'static str {
        &self.0.namespace
    }

    pub fn path(&self) -> &'static str {
        &self.0.path
    }

    /// Key with the same namespace and `suffix` appended to the path.
    pub fn child(&self, suffix: &str) -> Self {
        Self::get(self.namespace(), &format!("{}{}", self.path(), suffix))
    }

    /// True when both handles point at the same registry entry.
    pub fn same_instance(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl PartialEq for NamespacedKey {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other)
    }
}

impl Eq for NamespacedKey {}

impl Hash for NamespacedKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.0, state);
    }
}

impl fmt::Display for NamespacedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.0.namespace, self.0.path)
    }
}

impl fmt::Debug for NamespacedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamespacedKey({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_twice_returns_identical_instance() {
        let a = NamespacedKey::get("ro", "textures/buttons/button");
        let b = NamespacedKey::get("ro", "textures/buttons/button");
        assert!(a.same_instance(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_namespace_is_different_key() {
        let a = NamespacedKey::get("ro", "text/ascii");
        let b = NamespacedKey::get("mod", "text/ascii");
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_uses_colon_form() {
        let key = NamespacedKey::get("ro", "key/jump");
        assert_eq!(key.to_string(), "ro:key/jump");
        assert_eq!(key.namespace(), "ro");
        assert_eq!(key.path(), "key/jump");
    }

    #[test]
    fn test_parse_round_trips_display() {
        let key = NamespacedKey::get("ro", "keymaps/default_qwerty.json");
        assert_eq!(NamespacedKey::parse(&key.to_string()), key);
        assert_eq!(NamespacedKey::parse("shader/textured"), NamespacedKey::default_ns("shader/textured"));
    }

    #[test]
    fn test_child_appends_to_path() {
        let key = NamespacedKey::default_ns("clouds/moody/Cloud_");
        assert_eq!(key.child("3"), NamespacedKey::default_ns("clouds/moody/Cloud_3"));
    }

    #[test]
    fn test_usable_as_hash_map_key() {
        let mut map = FxHashMap::default();
        map.insert(NamespacedKey::default_ns("a"), 1);
        map.insert(NamespacedKey::default_ns("b"), 2);
        assert_eq!(map.get(&NamespacedKey::default_ns("a")), Some(&1));
        assert_eq!(map.len(), 2);
    }
}
