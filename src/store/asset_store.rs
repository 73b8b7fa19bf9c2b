//! Brush records as JSON files in a brushes directory

use std::path::{Path, PathBuf};

use crate::brush::{BrushId, BrushKind, BrushLibrary, TemplateLibrary};
use crate::core::{Error, Result};

use super::record::{default_templates, BrushRecord, TemplateFile};

/// File extension for brush records
pub const BRUSH_FILE_EXTENSION: &str = "json";

/// Persistent brush storage
pub struct AssetStore {
    base_dir: PathBuf,
}

impl AssetStore {
    /// Open a brushes directory, creating it if needed
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Record path for a brush name
    pub fn path_for(&self, name: &str) -> PathBuf {
        let stem: String = name
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.base_dir.join(format!("{stem}.{BRUSH_FILE_EXTENSION}"))
    }

    /// First free name of the form `name`, `name 1`, `name 2`, ...
    fn unique_name(&self, library: &BrushLibrary, name: &str) -> String {
        let taken = |n: &str| library.find_by_name(n).is_some() || self.path_for(n).exists();
        if !taken(name) {
            return name.to_string();
        }
        (1..)
            .map(|i| format!("{name} {i}"))
            .find(|n| !taken(n.as_str()))
            .unwrap_or_else(|| name.to_string())
    }

    /// Create a brush of `kind`, register it and write its record
    pub fn create(
        &self,
        library: &mut BrushLibrary,
        templates: &TemplateLibrary,
        kind: &str,
        name: &str,
    ) -> Result<BrushId> {
        let kind: BrushKind = kind.parse()?;
        let name = self.unique_name(library, name);
        let id = library.create_brush(kind.name(), name)?;
        self.save(library, templates, id)?;
        Ok(id)
    }

    /// Write one brush's record
    pub fn save(&self, library: &BrushLibrary, templates: &TemplateLibrary, id: BrushId) -> Result<PathBuf> {
        let brush = library.get(id).ok_or(Error::BrushNotFound(id))?;
        let record = BrushRecord::from_brush(brush, library, templates)?;
        let path = self.path_for(&brush.name);
        std::fs::write(&path, serde_json::to_string_pretty(&record)?)?;
        log::debug!("Saved brush '{}' to {}", brush.name, path.display());
        Ok(path)
    }

    /// Write every brush
    pub fn save_all(&self, library: &BrushLibrary, templates: &TemplateLibrary) -> Result<()> {
        for brush in library.iter() {
            self.save(library, templates, brush.id())?;
        }
        Ok(())
    }

    /// Read one record file
    pub fn load(&self, path: &Path) -> Result<BrushRecord> {
        if path.extension().and_then(|e| e.to_str()) != Some(BRUSH_FILE_EXTENSION) {
            return Err(Error::InvalidStoreEntry(path.display().to_string()));
        }
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Every readable record in the directory, sorted by file name.
    /// Other files and unreadable records are skipped with a warning.
    pub fn find_all(&self) -> Result<Vec<BrushRecord>> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(&self.base_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect();
        paths.sort();

        let mut records = Vec::new();
        for path in paths {
            match self.load(&path) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }
        Ok(records)
    }

    /// Delete a brush's record file
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.path_for(name);
        std::fs::remove_file(&path)?;
        log::info!("Deleted brush record {}", path.display());
        Ok(())
    }

    /// Move an external record into the directory, keyed by its brush name
    pub fn import(&self, source: &Path) -> Result<PathBuf> {
        let record = self.load(source)?;
        let target = self.path_for(&record.name);
        if std::fs::rename(source, &target).is_err() {
            // Different filesystem
            std::fs::copy(source, &target)?;
            std::fs::remove_file(source)?;
        }
        log::info!("Imported brush '{}' from {}", record.name, source.display());
        Ok(target)
    }

    /// Load every record into a library and resolve sub-brush references by name
    pub fn load_library(&self, templates: &TemplateLibrary) -> Result<BrushLibrary> {
        let records = self.find_all()?;
        let mut library = BrushLibrary::new();
        let mut loaded = Vec::new();
        for record in records {
            match record.to_brush(templates) {
                Ok(brush) => loaded.push((library.insert(brush), record.sub_brushes)),
                Err(e) => log::warn!("Skipping brush '{}': {}", record.name, e),
            }
        }

        for (id, subs) in loaded {
            for sub_name in subs {
                let Some(sub) = library.find_by_name(&sub_name).map(|b| b.id()) else {
                    log::warn!("Unknown sub-brush '{}' referenced by {:?}", sub_name, id);
                    continue;
                };
                if let Err(e) = library.add_sub_brush(id, sub) {
                    log::warn!("Sub-brush '{}' not linked: {}", sub_name, e);
                }
            }
        }
        log::info!("Loaded {} brushes from {}", library.len(), self.base_dir.display());
        Ok(library)
    }
}

/// Load template definitions, falling back to the stock set when the file is missing
pub fn load_templates(path: &Path) -> Result<TemplateLibrary> {
    if path.exists() {
        let json = std::fs::read_to_string(path)?;
        let file: TemplateFile = serde_json::from_str(&json)?;
        let library = file.to_library()?;
        log::info!("Loaded {} templates from {}", library.len(), path.display());
        Ok(library)
    } else {
        log::info!("No template file at {}, using stock templates", path.display());
        default_templates().to_library()
    }
}
