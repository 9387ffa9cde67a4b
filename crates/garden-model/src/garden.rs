//! Garden metadata and the on-disk bundle.
//!
//! A garden is the top-level container that ties together plants, their
//! photo timelines, free-form garden logs, and the notebook.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::notebook::Notebook;
use crate::photo::PhotoRef;

/// Top-level garden file (`meta/garden.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Garden {
    /// Schema version.
    pub version: String,

    /// Human-readable garden name.
    pub name: String,

    /// Unique garden identifier (UUID).
    pub id: String,

    /// Creation timestamp (ISO 8601).
    pub created_at: String,

    /// Last modified timestamp (ISO 8601).
    pub modified_at: String,

    /// Plants tracked in this garden.
    pub plants: Vec<Plant>,

    /// Garden-wide log entries (not tied to a single plant).
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

/// A tracked plant with an optional primary photo and a log timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    /// Unique plant identifier.
    pub id: String,

    /// Display name ("Cherry tomato, raised bed 2").
    pub name: String,

    /// Primary photo shown in listings.
    pub photo: Option<PhotoRef>,

    /// Dated log entries for this plant.
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

/// A dated log entry, optionally carrying a photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique entry identifier.
    pub id: String,

    /// Entry date.
    pub date: NaiveDate,

    /// Free-form note text.
    pub note: String,

    /// Photo attached to this entry.
    pub photo: Option<PhotoRef>,
}

/// The complete in-memory representation of a loaded garden bundle.
#[derive(Debug, Clone)]
pub struct LoadedGarden {
    /// Filesystem path to the garden directory.
    pub root: PathBuf,

    /// Garden metadata.
    pub garden: Garden,

    /// Notebook items.
    pub notebook: Notebook,
}

impl Garden {
    /// Create a new garden with defaults.
    pub fn new(name: impl Into<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            version: "1.0".to_string(),
            name: name.into(),
            id: uuid_v4(),
            created_at: now.clone(),
            modified_at: now,
            plants: vec![],
            logs: vec![],
        }
    }

    /// Union of all photos known to the garden: plant primary photos,
    /// plant log photos, and garden log photos, in that order.
    pub fn all_photos(&self) -> Vec<PhotoRef> {
        let mut photos = vec![];
        for plant in &self.plants {
            if let Some(photo) = &plant.photo {
                photos.push(photo.clone());
            }
            for log in &plant.logs {
                if let Some(photo) = &log.photo {
                    photos.push(photo.clone());
                }
            }
        }
        for log in &self.logs {
            if let Some(photo) = &log.photo {
                photos.push(photo.clone());
            }
        }
        photos
    }

    /// A single plant's photo timeline: primary photo plus all log photos.
    /// Returns `None` if the plant id is unknown.
    pub fn plant_timeline(&self, plant_id: &str) -> Option<Vec<PhotoRef>> {
        let plant = self.plants.iter().find(|p| p.id == plant_id)?;
        let mut photos = vec![];
        if let Some(photo) = &plant.photo {
            photos.push(photo.clone());
        }
        for log in &plant.logs {
            if let Some(photo) = &log.photo {
                photos.push(photo.clone());
            }
        }
        Some(photos)
    }
}

impl LoadedGarden {
    /// Load a garden from a directory.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, GardenError> {
        let root = root.as_ref().to_path_buf();

        let garden_path = root.join("meta").join("garden.json");
        let notebook_path = root.join("meta").join("notebook.json");

        let garden_json =
            std::fs::read_to_string(&garden_path).map_err(|e| GardenError::IoError {
                path: garden_path.clone(),
                source: e,
            })?;

        let garden: Garden =
            serde_json::from_str(&garden_json).map_err(|e| GardenError::ParseError {
                path: garden_path,
                source: e,
            })?;

        let notebook = if notebook_path.exists() {
            let notebook_json =
                std::fs::read_to_string(&notebook_path).map_err(|e| GardenError::IoError {
                    path: notebook_path.clone(),
                    source: e,
                })?;
            serde_json::from_str(&notebook_json).map_err(|e| GardenError::ParseError {
                path: notebook_path,
                source: e,
            })?
        } else {
            Notebook::new()
        };

        Ok(Self {
            root,
            garden,
            notebook,
        })
    }

    /// Save garden and notebook to disk.
    pub fn save(&self) -> Result<(), GardenError> {
        let meta_dir = self.root.join("meta");
        std::fs::create_dir_all(&meta_dir).map_err(|e| GardenError::IoError {
            path: meta_dir.clone(),
            source: e,
        })?;

        let garden_path = meta_dir.join("garden.json");
        let garden_json =
            serde_json::to_string_pretty(&self.garden).map_err(|e| GardenError::ParseError {
                path: garden_path.clone(),
                source: e,
            })?;
        std::fs::write(&garden_path, garden_json).map_err(|e| GardenError::IoError {
            path: garden_path,
            source: e,
        })?;

        let notebook_path = meta_dir.join("notebook.json");
        let notebook_json =
            serde_json::to_string_pretty(&self.notebook).map_err(|e| GardenError::ParseError {
                path: notebook_path.clone(),
                source: e,
            })?;
        std::fs::write(&notebook_path, notebook_json).map_err(|e| GardenError::IoError {
            path: notebook_path,
            source: e,
        })?;

        Ok(())
    }

    /// Create a new garden on disk with the standard directory structure.
    pub fn create(root: impl AsRef<Path>, name: impl Into<String>) -> Result<Self, GardenError> {
        let root = root.as_ref().to_path_buf();

        for subdir in &["photos", "meta", "exports"] {
            std::fs::create_dir_all(root.join(subdir)).map_err(|e| GardenError::IoError {
                path: root.join(subdir),
                source: e,
            })?;
        }

        let loaded = Self {
            root,
            garden: Garden::new(name),
            notebook: Notebook::new(),
        };
        loaded.save()?;
        Ok(loaded)
    }

    /// Validate that all referenced photo files exist.
    pub fn validate_photos(&self) -> Vec<String> {
        let mut errors = vec![];
        for photo in self.garden.all_photos() {
            let path = self.root.join(&photo.path);
            if !path.exists() {
                errors.push(format!("Photo missing: {}", photo.path));
            }
        }
        errors
    }
}

/// Errors that can occur when working with garden bundles.
#[derive(Debug, thiserror::Error)]
pub enum GardenError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid garden: {message}")]
    ValidationError { message: String },
}

/// Generate a simple UUID v4 without external dependency.
pub fn uuid_v4() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!(
        "{:08x}-{:04x}-4{:03x}-{:04x}-{:012x}",
        (seed & 0xFFFFFFFF) as u32,
        ((seed >> 32) & 0xFFFF) as u16,
        ((seed >> 48) & 0x0FFF) as u16,
        (((seed >> 60) & 0x3F) | 0x80) as u16 | (((seed >> 66) & 0x3FF) as u16) << 6,
        (seed >> 76) & 0xFFFFFFFFFFFF,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(id: &str, path: &str) -> PhotoRef {
        PhotoRef {
            id: id.to_string(),
            path: path.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 12).unwrap(),
        }
    }

    #[test]
    fn test_garden_creation() {
        let garden = Garden::new("Balcony");
        assert_eq!(garden.name, "Balcony");
        assert_eq!(garden.version, "1.0");
        assert!(garden.plants.is_empty());
    }

    #[test]
    fn test_all_photos_union_order() {
        let mut garden = Garden::new("Test");
        garden.plants.push(Plant {
            id: "plant-1".to_string(),
            name: "Basil".to_string(),
            photo: Some(photo("a", "photos/a.jpg")),
            logs: vec![LogEntry {
                id: "log-1".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 4, 20).unwrap(),
                note: "repotted".to_string(),
                photo: Some(photo("b", "photos/b.jpg")),
            }],
        });
        garden.logs.push(LogEntry {
            id: "log-2".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 21).unwrap(),
            note: "first frost".to_string(),
            photo: Some(photo("c", "photos/c.jpg")),
        });

        let ids: Vec<_> = garden.all_photos().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_plant_timeline_unknown_plant() {
        let garden = Garden::new("Test");
        assert!(garden.plant_timeline("missing").is_none());
    }

    #[test]
    fn test_loaded_garden_create_and_load() {
        let dir = std::env::temp_dir().join("bloomlog_test_garden");
        let _ = std::fs::remove_dir_all(&dir);

        let created = LoadedGarden::create(&dir, "Integration Test").unwrap();
        assert_eq!(created.garden.name, "Integration Test");

        let loaded = LoadedGarden::load(&dir).unwrap();
        assert_eq!(loaded.garden.name, "Integration Test");
        assert_eq!(loaded.notebook.version, "1.0");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_validate_photos_reports_missing() {
        let dir = std::env::temp_dir().join("bloomlog_test_validate");
        let _ = std::fs::remove_dir_all(&dir);

        let mut loaded = LoadedGarden::create(&dir, "Validate Test").unwrap();
        loaded.garden.plants.push(Plant {
            id: "plant-1".to_string(),
            name: "Fern".to_string(),
            photo: Some(photo("a", "photos/missing.jpg")),
            logs: vec![],
        });

        let errors = loaded.validate_photos();
        assert!(!errors.is_empty());
        assert!(errors.iter().any(|e| e.contains("photos/missing.jpg")));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_uuid_shape() {
        let id = uuid_v4();
        assert_eq!(id.len(), 36);
        assert_eq!(id.chars().filter(|c| *c == '-').count(), 4);
    }
}
