use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(usize);

        impl $name {
            pub fn new(value: usize) -> Self {
                Self(value)
            }

            /// Storage slot of the entity in its flat collection.
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`Manga`], equal to its position in the manga list.
    MangaId
);
entity_id!(
    /// Identifier of a [`Chapter`], equal to its position in the chapter list.
    ChapterId
);
entity_id!(
    /// Identifier of a [`Page`], equal to its position in the page list.
    PageId
);

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Manga {
    pub id: MangaId,
    pub name: String,
    pub chapter_ids: Vec<ChapterId>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub id: ChapterId,
    pub manga_id: MangaId,
    pub name: String,
    pub page_ids: Vec<PageId>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: PageId,
    pub chapter_id: ChapterId,
    /// Absolute path of the image file.
    pub path: PathBuf,
}
