pub mod config;
pub mod error;
pub mod indexer;
pub mod logging;
pub mod model;
pub mod repository;
pub mod server;

// Re-export main types and functions
pub use error::{DescriptorError, IndexError};
pub use indexer::{build_index, scan_collection, CollectionOutcome, Index, SkippedCollection};
pub use model::{Chapter, ChapterId, Manga, MangaId, Page, PageId};
pub use repository::Repository;
