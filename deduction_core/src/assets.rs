//! Lookup from asset names to whatever the presentation side renders.

use mystery_rules::AssetRef;
use std::collections::HashMap;
use tracing::warn;

/// Opaque handle to a loaded visual.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetHandle(pub String);

/// Registered visuals by name.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    assets: HashMap<String, AssetHandle>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name whose handle is the name itself.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for name in names {
            let name = name.into();
            registry.register(name.clone(), AssetHandle(name));
        }
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, handle: AssetHandle) {
        self.assets.insert(name.into(), handle);
    }

    /// Resolve a reference. Unknown names are logged and resolve to nothing.
    pub fn resolve(&self, asset: &AssetRef) -> Option<&AssetHandle> {
        if asset.is_none() {
            return None;
        }
        let handle = self.assets.get(asset.as_str());
        if handle.is_none() {
            warn!(asset = %asset, "no sprite registered for asset");
        }
        handle
    }

    /// Resolve several references, dropping the ones that are absent.
    pub fn resolve_all(&self, assets: &[AssetRef]) -> Vec<AssetHandle> {
        assets
            .iter()
            .filter_map(|a| self.resolve(a))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_and_unknown() {
        let registry = AssetRegistry::with_names(["Photo", "Victim"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.resolve(&AssetRef::new("Photo")),
            Some(&AssetHandle("Photo".to_string()))
        );
        assert!(registry.resolve(&AssetRef::new("Missing")).is_none());
        assert!(registry.resolve(&AssetRef::none()).is_none());
    }

    #[test]
    fn test_resolve_all_skips_missing() {
        let registry = AssetRegistry::with_names(["HeadRed"]);
        let resolved = registry.resolve_all(&[
            AssetRef::new("HeadRed"),
            AssetRef::new("HeadBlue"),
            AssetRef::new("None"),
        ]);
        assert_eq!(resolved, vec![AssetHandle("HeadRed".to_string())]);
    }
}
