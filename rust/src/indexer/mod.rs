//! Builds the in-memory manga index from a directory tree.
//!
//! Every immediate sub-directory of the root is a candidate collection that
//! must carry a `.mangainfo` descriptor. Identifiers are handed out in the
//! order entities are appended, so an id is always the entity's slot in its
//! flat list.

pub mod descriptor;

pub use descriptor::{read_descriptor, ChapterDescriptor, MangaDescriptor, DESCRIPTOR_FILE_NAME};

use crate::error::{DescriptorError, IndexError};
use crate::model::{Chapter, ChapterId, Manga, MangaId, Page, PageId};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Debug, Default, Serialize)]
pub struct Index {
    pub mangas: Vec<Manga>,
    pub chapters: Vec<Chapter>,
    pub pages: Vec<Page>,
    /// Candidate directories left out of the index.
    #[serde(skip)]
    pub skipped: Vec<SkippedCollection>,
}

#[derive(Debug)]
pub struct SkippedCollection {
    pub dir: PathBuf,
    pub reason: DescriptorError,
}

/// Result of inspecting one candidate collection directory.
#[derive(Debug)]
pub enum CollectionOutcome {
    Indexed(MangaDescriptor),
    Skipped(SkippedCollection),
}

pub fn scan_collection(dir: &Path) -> CollectionOutcome {
    match read_descriptor(dir) {
        Ok(descriptor) => CollectionOutcome::Indexed(descriptor),
        Err(reason) => CollectionOutcome::Skipped(SkippedCollection {
            dir: dir.to_path_buf(),
            reason,
        }),
    }
}

/// Walks `root` and indexes every collection directory found directly under it.
///
/// Only a root that cannot be resolved or listed fails the whole build. A
/// collection whose descriptor is missing or invalid is logged, recorded in
/// [`Index::skipped`] and contributes nothing.
pub fn build_index(root: impl AsRef<Path>) -> Result<Index, IndexError> {
    let root = std::path::absolute(root.as_ref()).map_err(|source| IndexError::ResolveRoot {
        root: root.as_ref().to_path_buf(),
        source,
    })?;
    let meta = fs::metadata(&root).map_err(|source| IndexError::ResolveRoot {
        root: root.clone(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(IndexError::NotADirectory { root });
    }

    let mut index = Index::default();
    let walker = WalkDir::new(&root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(IndexError::ListRoot { root, source: err });
            }
            Err(err) => {
                let dir = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                index.skip(SkippedCollection {
                    dir,
                    reason: DescriptorError::Entry(err),
                });
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        match scan_collection(entry.path()) {
            CollectionOutcome::Indexed(descriptor) => {
                let id = index.insert(entry.path(), descriptor);
                debug!(manga = %id, dir = %entry.path().display(), "indexed collection");
            }
            CollectionOutcome::Skipped(skipped) => index.skip(skipped),
        }
    }

    info!(
        root = %root.display(),
        mangas = index.mangas.len(),
        chapters = index.chapters.len(),
        pages = index.pages.len(),
        skipped = index.skipped.len(),
        "index built"
    );
    Ok(index)
}

impl Index {
    fn skip(&mut self, skipped: SkippedCollection) {
        let name = skipped
            .dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        warn!(collection = %name, error = %skipped.reason, "skipping collection");
        self.skipped.push(skipped);
    }

    /// Appends one parsed collection, allocating ids in declaration order.
    fn insert(&mut self, collection_dir: &Path, descriptor: MangaDescriptor) -> MangaId {
        let manga_id = MangaId::new(self.mangas.len());
        let mut chapter_ids = Vec::with_capacity(descriptor.chapters.len());

        for chapter in descriptor.chapters {
            let chapter_id = ChapterId::new(self.chapters.len());
            let chapter_dir = collection_dir.join(&chapter.dir);
            let mut page_ids = Vec::with_capacity(chapter.pages.len());

            for file in &chapter.pages {
                let page_id = PageId::new(self.pages.len());
                self.pages.push(Page {
                    id: page_id,
                    chapter_id,
                    path: chapter_dir.join(file),
                });
                page_ids.push(page_id);
            }

            self.chapters.push(Chapter {
                id: chapter_id,
                manga_id,
                name: chapter.name,
                page_ids,
            });
            chapter_ids.push(chapter_id);
        }

        self.mangas.push(Manga {
            id: manga_id,
            name: descriptor.name,
            chapter_ids,
        });
        manga_id
    }

    pub fn into_parts(self) -> (Vec<Manga>, Vec<Chapter>, Vec<Page>) {
        (self.mangas, self.chapters, self.pages)
    }
}
