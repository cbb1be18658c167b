use crate::indexer::Index;
use crate::model::{Chapter, ChapterId, Manga, MangaId, Page, PageId};

/// Read-only store over a built index.
///
/// Every accessor hands out owned clones, so callers can never reach into
/// the stored collections.
#[derive(Debug, Default)]
pub struct Repository {
    mangas: Vec<Manga>,
    chapters: Vec<Chapter>,
    pages: Vec<Page>,
}

impl Repository {
    pub fn new(mangas: Vec<Manga>, chapters: Vec<Chapter>, pages: Vec<Page>) -> Self {
        Self {
            mangas,
            chapters,
            pages,
        }
    }

    /// All mangas in construction order.
    pub fn all_mangas(&self) -> Vec<Manga> {
        self.mangas.clone()
    }

    pub fn manga(&self, id: MangaId) -> Option<Manga> {
        self.mangas.iter().find(|m| m.id == id).cloned()
    }

    /// Direct slot lookup: ids minted by the indexer equal their position.
    pub fn chapter(&self, id: ChapterId) -> Option<Chapter> {
        self.chapters.get(id.index()).cloned()
    }

    pub fn page(&self, id: PageId) -> Option<Page> {
        self.pages.get(id.index()).cloned()
    }

    /// Chapters of `manga` in descriptor order.
    pub fn chapters_of(&self, manga: &Manga) -> Vec<Chapter> {
        manga
            .chapter_ids
            .iter()
            .filter_map(|&id| self.chapter(id))
            .collect()
    }

    pub fn manga_count(&self) -> usize {
        self.mangas.len()
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl From<Index> for Repository {
    fn from(index: Index) -> Self {
        let (mangas, chapters, pages) = index.into_parts();
        Self::new(mangas, chapters, pages)
    }
}
