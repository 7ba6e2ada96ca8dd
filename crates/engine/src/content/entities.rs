use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::world::EntityRecord;

#[derive(Debug, Error)]
pub enum EntityListError {
    #[error("failed to read entity list {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed entity list {origin}: {message}")]
    Parse { origin: String, message: String },
    #[error("entity list {origin}: entry [{index}] has an empty id")]
    EmptyId { origin: String, index: usize },
    #[error("entity list {origin}: duplicate entity id '{id}'")]
    DuplicateId { origin: String, id: String },
}

pub fn load_entity_list(path: &Path) -> Result<Vec<EntityRecord>, EntityListError> {
    let raw = fs::read_to_string(path).map_err(|source| EntityListError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_entity_list(&raw, &path.display().to_string())
}

/// Parses a JSON array of records. Order is kept; it drives grid placement.
pub fn parse_entity_list(raw: &str, origin: &str) -> Result<Vec<EntityRecord>, EntityListError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    let records = serde_path_to_error::deserialize::<_, Vec<EntityRecord>>(&mut deserializer)
        .map_err(|error| {
            let path = error.path().to_string();
            let source = error.into_inner();
            let message = if path.is_empty() || path == "." {
                source.to_string()
            } else {
                format!("at {path}: {source}")
            };
            EntityListError::Parse {
                origin: origin.to_string(),
                message,
            }
        })?;

    let mut seen = HashSet::<&str>::new();
    for (index, record) in records.iter().enumerate() {
        let id = record.id.as_str();
        if id.trim().is_empty() {
            return Err(EntityListError::EmptyId {
                origin: origin.to_string(),
                index,
            });
        }
        if !seen.insert(id) {
            return Err(EntityListError::DuplicateId {
                origin: origin.to_string(),
                id: id.to_string(),
            });
        }
    }

    info!(origin, entities = records.len(), "entity_list_loaded");
    Ok(records)
}
