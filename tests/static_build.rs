use centauri::{Config, DirectoryStore, Site, Ssg};
use std::fs;
use std::path::PathBuf;

#[test]
fn builds_every_static_page() {
    let content = tempfile::tempdir().unwrap();
    fs::write(
        content.path().join("rust-basics.md"),
        "---\ntitle: Rust Basics\nauthor: Ada\npubDate: 2024-03-01\n---\n# Ownership\n",
    )
    .unwrap();
    fs::write(
        content.path().join("intro-to-go.md"),
        "---\ntitle: Intro to Go\nauthor: Rob\npubDate: 2024-01-01\n---\nGoroutines.\n",
    )
    .unwrap();

    let out = tempfile::tempdir().unwrap();
    let config = Config::default();
    let store = DirectoryStore::open(content.path()).unwrap();
    let site = Site::new(&config, Box::new(store)).unwrap();

    let written = Ssg::new(out.path().to_path_buf()).process(&site).unwrap();

    for file in [
        "index.html",
        "articles/index.html",
        "about/index.html",
        "404.html",
        "api/posts.json",
        "api/hello.json",
        "articles/rust-basics/index.html",
        "articles/intro-to-go/index.html",
    ] {
        assert!(written.contains(&PathBuf::from(file)), "{file} not reported");
        assert!(out.path().join(file).is_file(), "{file} not written");
    }

    let detail = fs::read_to_string(out.path().join("articles/rust-basics/index.html")).unwrap();
    assert!(detail.contains("<h1>Ownership</h1>"));

    let listing = fs::read_to_string(out.path().join("articles/index.html")).unwrap();
    let newer = listing.find("/articles/rust-basics").unwrap();
    let older = listing.find("/articles/intro-to-go").unwrap();
    assert!(newer < older);
}

#[test]
fn reserved_slug_fails_the_build_setup() {
    let content = tempfile::tempdir().unwrap();
    fs::write(
        content.path().join("search.md"),
        "---\ntitle: How Search Works\nauthor: Ada\npubDate: 2024-03-01\n---\nSubstrings.\n",
    )
    .unwrap();

    let store = DirectoryStore::open(content.path()).unwrap();
    let err = Site::new(&Config::default(), Box::new(store)).err().unwrap();
    assert!(matches!(err, centauri::Error::ReservedSlug { .. }));
}
