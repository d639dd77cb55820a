use centauri::{ContentStore, DirectoryStore, Error};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, relative: &str, contents: &str) {
    let path = dir.path().join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn post(title: &str, date: &str) -> String {
    format!("---\ntitle: {title}\nauthor: Staff\npubDate: {date}\ntags: [demo]\n---\nBody of {title}.\n")
}

#[test]
fn loads_markdown_in_path_order() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir, "b-rust.md", &post("Rust Basics", "2024-03-01"));
    write(&dir, "a-go.md", &post("Intro to Go", "2024-01-01"));
    write(&dir, "guides/TypeScript Tips.md", &post("TypeScript Tips", "2024-02-01"));
    write(&dir, "notes.txt", "not an article");

    let store = DirectoryStore::open(dir.path()).unwrap();
    let slugs: Vec<&str> = store.fetch_all().iter().map(|a| a.slug.as_str()).collect();

    assert_eq!(slugs, vec!["a-go", "b-rust", "guides/typescript-tips"]);
    let tips = store.fetch_by_key("guides/typescript-tips").unwrap();
    assert_eq!(tips.title, "TypeScript Tips");
    assert_eq!(tips.tags, vec!["demo"]);
    assert_eq!(tips.body, "Body of TypeScript Tips.\n");
}

#[test]
fn empty_directory_is_an_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirectoryStore::open(dir.path()).unwrap();
    assert!(store.fetch_all().is_empty());
}

#[test]
fn duplicate_slugs_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir, "Hello World.md", &post("One", "2024-01-01"));
    write(&dir, "hello-world.md", &post("Two", "2024-01-02"));

    let err = DirectoryStore::open(dir.path()).unwrap_err();
    assert!(matches!(err, Error::DuplicateSlug { slug } if slug == "hello-world"));
}

#[test]
fn malformed_publish_date_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir, "bad.md", &post("Bad", "sometime in May"));

    let err = DirectoryStore::open(dir.path()).unwrap_err();
    assert!(matches!(err, Error::InvalidDate { .. }));
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = DirectoryStore::open(dir.path().join("missing")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
