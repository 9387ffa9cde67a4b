//! Image loading behind a trait so rendering can be tested without
//! touching the filesystem.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use bloomlog_common::{BloomlogError, BloomlogResult};

/// Source of decoded photos for the compositor and sequencer.
pub trait ImageLoader: Send + Sync {
    fn load(&self, path: &Path) -> BloomlogResult<RgbaImage>;
}

/// Loads and decodes photos from disk.
#[derive(Debug, Default, Clone)]
pub struct FsImageLoader;

impl FsImageLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ImageLoader for FsImageLoader {
    fn load(&self, path: &Path) -> BloomlogResult<RgbaImage> {
        if !path.exists() {
            return Err(BloomlogError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let img = image::open(path)
            .map_err(|e| BloomlogError::decode(path, e.to_string()))?;
        Ok(img.to_rgba8())
    }
}

/// In-memory loader for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryLoader {
    images: HashMap<PathBuf, RgbaImage>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, image: RgbaImage) {
        self.images.insert(path.into(), image);
    }
}

impl ImageLoader for MemoryLoader {
    fn load(&self, path: &Path) -> BloomlogResult<RgbaImage> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| BloomlogError::FileNotFound {
                path: path.to_path_buf(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_loader_missing_file() {
        let loader = FsImageLoader::new();
        let err = loader.load(Path::new("/nonexistent/photo.jpg")).unwrap_err();
        assert!(matches!(err, BloomlogError::FileNotFound { .. }));
    }

    #[test]
    fn test_memory_loader_round_trip() {
        let mut loader = MemoryLoader::new();
        loader.insert("a.png", RgbaImage::new(4, 4));
        assert!(loader.load(Path::new("a.png")).is_ok());
        assert!(loader.load(Path::new("b.png")).is_err());
    }
}
