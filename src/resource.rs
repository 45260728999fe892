//! Locally addressable handles for generated image bytes.
//!
//! A handle behaves like a browser object URL: it names bytes held by the
//! registry until someone revokes it. The controller revokes a handle when a
//! new generation replaces it and when the view is torn down, so the registry
//! holds at most one live image per view.

use std::collections::HashMap;
use std::fmt;

/// URL-like reference to a blob held by a [`ResourceRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    id: u64,
}

impl ImageHandle {
    /// Numeric id, unique within the registry that issued it.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Address suitable for display, e.g. `blob:promptcanvas/3`.
    pub fn url(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blob:promptcanvas/{}", self.id)
    }
}

/// Owns the bytes behind every live [`ImageHandle`].
#[derive(Debug)]
pub struct ResourceRegistry {
    blobs: HashMap<u64, Vec<u8>>,
    next_id: u64,
}

impl ResourceRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            blobs: HashMap::new(),
            next_id: 1,
        }
    }

    /// Stores bytes and returns a fresh handle for them.
    pub fn create(&mut self, data: Vec<u8>) -> ImageHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.blobs.insert(id, data);
        tracing::trace!(id, live = self.blobs.len(), "created image handle");
        ImageHandle { id }
    }

    /// Bytes behind a live handle.
    pub fn resolve(&self, handle: &ImageHandle) -> Option<&[u8]> {
        self.blobs.get(&handle.id).map(Vec::as_slice)
    }

    /// Releases a handle. Returns false if it was already revoked.
    pub fn revoke(&mut self, handle: &ImageHandle) -> bool {
        let removed = self.blobs.remove(&handle.id).is_some();
        if removed {
            tracing::trace!(id = handle.id, live = self.blobs.len(), "revoked image handle");
        }
        removed
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// True if no handle is live.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    /// Revokes everything.
    pub fn clear(&mut self) {
        self.blobs.clear();
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_resolve_revoke() {
        let mut registry = ResourceRegistry::new();
        let handle = registry.create(vec![1, 2, 3]);

        assert_eq!(registry.resolve(&handle), Some(&[1u8, 2, 3][..]));
        assert_eq!(registry.len(), 1);

        assert!(registry.revoke(&handle));
        assert!(!registry.revoke(&handle));
        assert_eq!(registry.resolve(&handle), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_handles_are_unique() {
        let mut registry = ResourceRegistry::new();
        let a = registry.create(vec![1]);
        let b = registry.create(vec![1]);
        assert_ne!(a, b);
        assert_eq!(a.url(), "blob:promptcanvas/1");
        assert_eq!(b.to_string(), "blob:promptcanvas/2");

        registry.clear();
        assert!(registry.is_empty());
    }
}
