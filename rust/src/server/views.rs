use crate::model::{Chapter, Manga};
use maud::{html, Markup, DOCTYPE};

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href="/asset/style.css";
            }
            body {
                nav { a href="/" { "Library" } }
                main { (body) }
            }
        }
    }
}

pub fn home(mangas: &[Manga]) -> Markup {
    layout(
        "Library",
        html! {
            h1 { "Library" }
            @if mangas.is_empty() {
                p.empty { "No manga found." }
            } @else {
                ul.mangas {
                    @for manga in mangas {
                        li { a href={ "/m/" (manga.id) } { (manga.name) } }
                    }
                }
            }
        },
    )
}

pub fn manga(manga: &Manga, chapters: &[Chapter]) -> Markup {
    layout(
        &manga.name,
        html! {
            h1 { (manga.name) }
            ol.chapters {
                @for chapter in chapters {
                    li { a href={ "/c/" (chapter.id) } { (chapter.name) } }
                }
            }
        },
    )
}

pub struct ChapterView<'a> {
    pub manga: &'a Manga,
    pub chapter: &'a Chapter,
    pub prev: Option<&'a Chapter>,
    pub next: Option<&'a Chapter>,
}

pub fn chapter(view: &ChapterView<'_>) -> Markup {
    let title = format!("{} - {}", view.manga.name, view.chapter.name);
    let pager = html! {
        nav.pager {
            @if let Some(prev) = view.prev {
                a.prev href={ "/c/" (prev.id) } { "Previous: " (prev.name) }
            }
            a.up href={ "/m/" (view.manga.id) } { (view.manga.name) }
            @if let Some(next) = view.next {
                a.next href={ "/c/" (next.id) } { "Next: " (next.name) }
            }
        }
    };
    layout(
        &title,
        html! {
            h1 { (view.manga.name) }
            h2 { (view.chapter.name) }
            (pager)
            div.pages {
                @for (n, page_id) in view.chapter.page_ids.iter().enumerate() {
                    img src={ "/p/" (page_id) } alt={ "Page " (n + 1) } loading="lazy";
                }
            }
            (pager)
        },
    )
}
