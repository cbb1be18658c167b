// Per-collection `.mangainfo` descriptor parsing

use crate::error::DescriptorError;
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::BufReader;
use std::path::{Component, Path};

pub const DESCRIPTOR_FILE_NAME: &str = ".mangainfo";

// Absent and `null` fields both fall back to their empty value.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MangaDescriptor {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub chapters: Vec<ChapterDescriptor>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ChapterDescriptor {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Sub-directory of the collection holding this chapter's pages.
    #[serde(default, deserialize_with = "null_as_default")]
    pub dir: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pages: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Reads and validates the descriptor stored inside `collection_dir`.
pub fn read_descriptor(collection_dir: &Path) -> Result<MangaDescriptor, DescriptorError> {
    let path = collection_dir.join(DESCRIPTOR_FILE_NAME);
    let file = File::open(&path).map_err(|source| DescriptorError::Read {
        path: path.clone(),
        source,
    })?;
    let descriptor: MangaDescriptor = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| DescriptorError::Parse {
            path: path.clone(),
            source,
        })?;
    validate(&descriptor).map_err(|value| DescriptorError::InvalidPath { path, value })?;
    Ok(descriptor)
}

// Returns the first offending path fragment
fn validate(descriptor: &MangaDescriptor) -> Result<(), String> {
    for chapter in &descriptor.chapters {
        if !is_contained(&chapter.dir) {
            return Err(chapter.dir.clone());
        }
        if let Some(page) = chapter.pages.iter().find(|p| p.is_empty() || !is_contained(p)) {
            return Err(page.clone());
        }
    }
    Ok(())
}

/// True when `fragment` is a relative path that cannot climb out of its parent.
fn is_contained(fragment: &str) -> bool {
    Path::new(fragment)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
