#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub const ALPHA: &str = include_str!("../fixtures/mangainfo.json");

/// Creates `root/dir` with the given descriptor body, and touches every page it lists.
pub fn write_collection(root: &Path, dir: &str, descriptor: &str) {
    let collection = root.join(dir);
    fs::create_dir_all(&collection).unwrap();
    fs::write(collection.join(".mangainfo"), descriptor).unwrap();

    let Ok(value) = serde_json::from_str::<serde_json::Value>(descriptor) else {
        return;
    };
    for chapter in value["chapters"].as_array().into_iter().flatten() {
        let chapter_dir = collection.join(chapter["dir"].as_str().unwrap_or(""));
        fs::create_dir_all(&chapter_dir).unwrap();
        for page in chapter["pages"].as_array().into_iter().flatten() {
            if let Some(name) = page.as_str() {
                fs::write(chapter_dir.join(name), name.as_bytes()).unwrap();
            }
        }
    }
}

pub fn simple_descriptor(name: &str, chapters: &[(&str, usize)]) -> String {
    let chapters: Vec<_> = chapters
        .iter()
        .enumerate()
        .map(|(i, (chapter, pages))| {
            serde_json::json!({
                "name": chapter,
                "dir": format!("c{}", i),
                "pages": (0..*pages).map(|p| format!("{:03}.png", p)).collect::<Vec<_>>(),
            })
        })
        .collect();
    serde_json::json!({ "name": name, "chapters": chapters }).to_string()
}
