use crate::model::{ChapterId, MangaId, PageId};
use crate::server::error::ApiError;
use crate::server::views::{self, ChapterView};
use crate::server::AppState;
use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::response::Response;
use maud::Markup;
use std::io::ErrorKind;
use std::str::FromStr;
use std::sync::Arc;
use tower_http::services::ServeFile;

// Unparsable ids are treated like unknown ones
fn parse_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    raw.parse().map_err(|_| ApiError::not_found())
}

pub(crate) async fn home(State(state): State<Arc<AppState>>) -> Markup {
    let mut mangas = state.repo.all_mangas();
    mangas.sort_by(|a, b| a.name.cmp(&b.name));
    views::home(&mangas)
}

pub(crate) async fn manga(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Markup, ApiError> {
    let id: MangaId = parse_id(&id)?;
    let manga = state.repo.manga(id).ok_or_else(ApiError::not_found)?;
    let chapters = state.repo.chapters_of(&manga);
    Ok(views::manga(&manga, &chapters))
}

pub(crate) async fn chapter(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Markup, ApiError> {
    let id: ChapterId = parse_id(&id)?;
    let chapter = state.repo.chapter(id).ok_or_else(ApiError::not_found)?;
    let manga = state.repo.manga(chapter.manga_id).ok_or_else(|| {
        ApiError::internal(format!(
            "chapter {} references missing manga {}",
            chapter.id, chapter.manga_id
        ))
    })?;

    let position = manga.chapter_ids.iter().position(|&c| c == chapter.id);
    let neighbour = |offset: isize| {
        position
            .and_then(|p| p.checked_add_signed(offset))
            .and_then(|p| manga.chapter_ids.get(p))
            .and_then(|&c| state.repo.chapter(c))
    };
    let prev = neighbour(-1);
    let next = neighbour(1);

    Ok(views::chapter(&ChapterView {
        manga: &manga,
        chapter: &chapter,
        prev: prev.as_ref(),
        next: next.as_ref(),
    }))
}

/// Streams the page file. Range and conditional requests are honoured and
/// the content type is guessed from the extension.
pub(crate) async fn page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Response, ApiError> {
    let id: PageId = parse_id(&id)?;
    let page = state.repo.page(id).ok_or_else(ApiError::not_found)?;

    let meta = match tokio::fs::metadata(&page.path).await {
        Ok(meta) => meta,
        Err(err) if err.kind() == ErrorKind::NotFound => return Err(ApiError::not_found()),
        Err(err) => {
            return Err(ApiError::internal(format!(
                "failed to stat {}: {}",
                page.path.display(),
                err
            )))
        }
    };
    if !meta.is_file() {
        return Err(ApiError::internal(format!(
            "{} is not a file",
            page.path.display()
        )));
    }

    let response = ServeFile::new(&page.path)
        .try_call(request)
        .await
        .map_err(|e| ApiError::internal(format!("failed to read {}: {}", page.path.display(), e)))?;
    Ok(response.map(Body::new))
}

pub(crate) async fn fallback() -> ApiError {
    ApiError::not_found()
}
