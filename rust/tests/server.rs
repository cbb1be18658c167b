mod common;

use common::{simple_descriptor, write_collection, ALPHA};
use mangashelf::server::{router, AppState, Server};
use mangashelf::{build_index, Repository};
use reqwest::StatusCode;
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    server: Server,
}

impl Fixture {
    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.server.addr(), path)
    }
}

async fn start() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("library");
    let assets = dir.path().join("asset");
    fs::create_dir_all(&assets).unwrap();
    fs::write(assets.join("style.css"), "body {}").unwrap();

    write_collection(&root, "alpha", ALPHA);
    write_collection(&root, "zulu", &simple_descriptor("Zulu", &[("Z1", 1)]));
    write_collection(&root, "beta", &simple_descriptor("Beta", &[("B1", 1), ("B2", 1)]));

    let repo = Repository::from(build_index(&root).unwrap());
    let app = router(Arc::new(AppState { repo }), &assets);
    let server = Server::bind("127.0.0.1:0", app).await.expect("bind");
    Fixture { _dir: dir, server }
}

async fn get(url: &str) -> (StatusCode, String) {
    let resp = reqwest::get(url).await.expect("request");
    let status = resp.status();
    (status, resp.text().await.expect("body"))
}

#[tokio::test]
async fn home_lists_mangas_sorted_by_name() {
    let fx = start().await;
    let (status, body) = get(&fx.url("/")).await;
    assert_eq!(status, StatusCode::OK);

    let alpha = body.find("Alpha").expect("Alpha listed");
    let beta = body.find("Beta").expect("Beta listed");
    let zulu = body.find("Zulu").expect("Zulu listed");
    assert!(alpha < beta && beta < zulu);
    // ids come from directory order: alpha, beta, zulu
    assert!(body.contains("href=\"/m/1\""));
    fx.server.stop(Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn manga_page_lists_chapters() {
    let fx = start().await;
    let (status, body) = get(&fx.url("/m/0")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Chapter 1"));
    assert!(body.contains("href=\"/c/1\""));
}

#[tokio::test]
async fn chapter_page_shows_its_own_manga() {
    let fx = start().await;
    // chapter 3 is Beta's second chapter; a lookup keyed by the chapter id
    // would wrongly resolve manga 3, which does not exist
    let (status, body) = get(&fx.url("/c/3")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Beta"));
    assert!(body.contains("B2"));
    assert!(body.contains("href=\"/c/2\""), "previous chapter link");
    assert!(!body.contains("Next:"));
    assert!(body.contains("src=\"/p/4\""));
}

#[tokio::test]
async fn page_serves_file_bytes() {
    let fx = start().await;
    let resp = reqwest::get(fx.url("/p/0")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "image/png");
    assert_eq!(resp.bytes().await.unwrap().as_ref(), b"01.png");
}

#[tokio::test]
async fn unknown_or_invalid_ids_are_not_found() {
    let fx = start().await;
    for path in ["/m/5", "/m/abc", "/m/-1", "/c/99", "/p/99", "/p/1.5", "/nope"] {
        let (status, _) = get(&fx.url(path)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn missing_page_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("library");
    fs::create_dir_all(root.join("solo")).unwrap();
    fs::write(
        root.join("solo/.mangainfo"),
        r#"{"name":"Solo","chapters":[{"name":"c","dir":"c","pages":["gone.png","c"]}]}"#,
    )
    .unwrap();
    fs::create_dir_all(root.join("solo/c/c")).unwrap();

    let repo = Repository::from(build_index(&root).unwrap());
    let app = router(Arc::new(AppState { repo }), dir.path());
    let server = Server::bind("127.0.0.1:0", app).await.unwrap();

    let (status, _) = get(&format!("http://{}/p/0", server.addr())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    // a directory where a file is expected is a server-side fault
    let (status, _) = get(&format!("http://{}/p/1", server.addr())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn assets_are_served() {
    let fx = start().await;
    let (status, body) = get(&fx.url("/asset/style.css")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "body {}");
}

#[tokio::test]
async fn page_honours_range_requests() {
    let fx = start().await;
    let client = reqwest::Client::new();
    let resp = client
        .get(fx.url("/p/1"))
        .header("range", "bytes=0-1")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(resp.headers()["content-range"], "bytes 0-1/6");
    assert_eq!(resp.bytes().await.unwrap().as_ref(), b"01");
}

#[tokio::test]
async fn page_honours_conditional_requests() {
    let fx = start().await;
    let client = reqwest::Client::new();
    let first = client.get(fx.url("/p/1")).send().await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.headers()["content-type"], "image/jpeg");
    let last_modified = first.headers()["last-modified"].clone();

    let again = client
        .get(fx.url("/p/1"))
        .header("if-modified-since", last_modified)
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_MODIFIED);
}
