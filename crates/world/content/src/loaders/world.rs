//! World document loader.
//!
//! A document bundles a world snapshot with the characters its actors refer
//! to. JSON is the interchange format; RON is accepted for hand-written
//! fixtures.
//!
//! Rule trees use internally tagged and flattened enums, which RON cannot
//! read back directly. RON documents therefore go through a
//! [`serde_json::Value`] tree and are written in RON map syntax
//! (`{"world": {...}}`).

use std::path::Path;

use serde::{Deserialize, Serialize};
use world_core::{Characters, World};

use crate::loaders::{LoadResult, read_file, write_file};

/// Persisted bundle of a world and its characters.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorldDocument {
    pub world: World,
    #[serde(default)]
    pub characters: Characters,
}

impl WorldDocument {
    pub fn new(world: World, characters: Characters) -> Self {
        Self { world, characters }
    }
}

/// Encoding of a world document on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Ron,
}

impl DocumentFormat {
    /// Picks the format from the file extension (`.json` or `.ron`).
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("ron") => Ok(Self::Ron),
            _ => Err(anyhow::anyhow!(
                "Unsupported world document extension: {} (expected .json or .ron)",
                path.display()
            )),
        }
    }
}

/// Loader for world documents.
pub struct WorldLoader;

impl WorldLoader {
    /// Load a world document, choosing the format by extension.
    pub fn load(path: &Path) -> LoadResult<WorldDocument> {
        let format = DocumentFormat::from_path(path)?;
        let content = read_file(path)?;
        let document = Self::parse(&content, format)?;

        tracing::debug!(
            path = %path.display(),
            stages = document.world.stages.len(),
            characters = document.characters.len(),
            "loaded world document"
        );
        Ok(document)
    }

    /// Save a world document, choosing the format by extension.
    pub fn save(path: &Path, document: &WorldDocument) -> LoadResult<()> {
        let format = DocumentFormat::from_path(path)?;
        let content = Self::render(document, format)?;
        write_file(path, &content)
    }

    pub fn parse(content: &str, format: DocumentFormat) -> LoadResult<WorldDocument> {
        match format {
            DocumentFormat::Json => serde_json::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse world JSON: {}", e)),
            DocumentFormat::Ron => {
                let value: serde_json::Value = ron::from_str(content)
                    .map_err(|e| anyhow::anyhow!("Failed to parse world RON: {}", e))?;
                serde_json::from_value(value)
                    .map_err(|e| anyhow::anyhow!("Invalid world RON document: {}", e))
            }
        }
    }

    pub fn render(document: &WorldDocument, format: DocumentFormat) -> LoadResult<String> {
        match format {
            DocumentFormat::Json => serde_json::to_string_pretty(document)
                .map_err(|e| anyhow::anyhow!("Failed to serialize world JSON: {}", e)),
            DocumentFormat::Ron => {
                let value = serde_json::to_value(document)
                    .map_err(|e| anyhow::anyhow!("Failed to encode world document: {}", e))?;
                ron::ser::to_string_pretty(&value, ron::ser::PrettyConfig::default())
                    .map_err(|e| anyhow::anyhow!("Failed to serialize world RON: {}", e))
            }
        }
    }
}
