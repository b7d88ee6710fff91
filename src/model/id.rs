use std::fmt;

/// Namespace used when a name carries none.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A namespaced resource location such as `minecraft:block/stone`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId {
    /// Namespace (`minecraft` unless stated).
    pub namespace: String,
    /// `/`-separated path inside the namespace.
    pub path: String,
}

impl ResourceId {
    /// Split `namespace:path`, falling back to `default_namespace`.
    pub fn parse(name: &str, default_namespace: &str) -> Self {
        match name.split_once(':') {
            Some((namespace, path)) if !namespace.is_empty() => Self {
                namespace: namespace.to_string(),
                path: path.to_string(),
            },
            Some((_, path)) => Self {
                namespace: default_namespace.to_string(),
                path: path.to_string(),
            },
            None => Self {
                namespace: default_namespace.to_string(),
                path: name.to_string(),
            },
        }
    }

    /// Parse a model name. A bare id without a `/` lives under `block/`.
    pub fn model(name: &str, default_namespace: &str) -> Self {
        let mut id = Self::parse(name, default_namespace);
        if !id.path.contains('/') {
            id.path = format!("block/{}", id.path);
        }
        id
    }

    /// `assets/<ns>/models/<path>.json`
    pub fn model_path(&self) -> String {
        format!("assets/{}/models/{}.json", self.namespace, self.path)
    }

    /// `assets/<ns>/textures/<path>.png`
    pub fn texture_path(&self) -> String {
        format!("assets/{}/textures/{}.png", self.namespace, self.path)
    }

    /// `assets/<ns>/textures/<path>.png.mcmeta`
    pub fn texture_meta_path(&self) -> String {
        format!("{}.mcmeta", self.texture_path())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/id.rs"]
mod tests;
