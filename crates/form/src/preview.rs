//! Image preview handles.
//!
//! Deriving a displayable handle from a picked file is host-specific (object
//! URLs in a browser, temp files on a desktop), so the store takes the
//! resolver as a dependency.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use uuid::Uuid;

use skuforge_products::ImageFile;

/// Turns a picked file into a displayable handle.
pub trait PreviewResolver: Send + Sync {
    /// Mint a handle for `file`. Called once per added image.
    fn resolve(&self, file: &ImageFile) -> String;

    /// Give a handle back. The store never calls this; hosts that track
    /// handle lifetimes call it themselves.
    fn release(&self, _preview: &str) {}
}

/// In-process stand-in for browser object URLs: `blob:<origin>/<uuid>`.
///
/// Keeps the set of handles it minted and has not seen released.
#[derive(Debug)]
pub struct ObjectUrlResolver {
    origin: String,
    live: Mutex<HashSet<String>>,
}

impl ObjectUrlResolver {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            live: Mutex::new(HashSet::new()),
        }
    }

    /// Number of minted handles not yet released.
    pub fn live_handles(&self) -> usize {
        self.live.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for ObjectUrlResolver {
    fn default() -> Self {
        Self::new("skuforge")
    }
}

impl PreviewResolver for ObjectUrlResolver {
    fn resolve(&self, file: &ImageFile) -> String {
        let handle = format!("blob:{}/{}", self.origin, Uuid::now_v7());
        tracing::debug!(file = file.name(), bytes = file.len(), %handle, "minted preview handle");
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(handle.clone());
        handle
    }

    fn release(&self, preview: &str) {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(preview);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> ImageFile {
        ImageFile::new("front.png", Some("image/png".to_string()), vec![7u8; 16])
    }

    #[test]
    fn handles_are_unique_and_tracked() {
        let resolver = ObjectUrlResolver::new("http://localhost:3000");
        let a = resolver.resolve(&file());
        let b = resolver.resolve(&file());

        assert_ne!(a, b);
        assert!(a.starts_with("blob:http://localhost:3000/"));
        assert_eq!(resolver.live_handles(), 2);

        resolver.release(&a);
        assert_eq!(resolver.live_handles(), 1);

        // Releasing twice is harmless.
        resolver.release(&a);
        assert_eq!(resolver.live_handles(), 1);
    }
}
