use crate::error::{Error, SiteResult};
use crate::site::Site;
use std::path::{Path, PathBuf};
use tracing::info;

/// Request target, expected status and output file, relative to the
/// destination directory.
const STATIC_PAGES: [(&str, u16, &str); 6] = [
    ("/", 200, "index.html"),
    ("/articles", 200, "articles/index.html"),
    ("/about", 200, "about/index.html"),
    ("/404", 404, "404.html"),
    ("/api/posts.json", 200, "api/posts.json"),
    ("/api/hello.json", 200, "api/hello.json"),
];

#[derive(Debug)]
pub struct Ssg {
    dest: PathBuf,
}

impl Ssg {
    pub fn new(dest: PathBuf) -> Ssg {
        Ssg { dest }
    }

    fn write_page(
        &self,
        site: &Site,
        target: &str,
        expected: u16,
        file: &Path,
    ) -> SiteResult<()> {
        let dest_path = self.dest.join(file);
        info!("Processing {} -> {}", target, dest_path.display());

        let response = site.respond(target);
        if response.status != expected {
            return Err(Error::Build {
                target: target.to_string(),
                status: response.status,
            });
        }

        if let Some(parent) = dest_path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| Error::io(parent, err))?;
        }
        std::fs::write(&dest_path, response.body.into_bytes())
            .map_err(|err| Error::io(&dest_path, err))?;
        Ok(())
    }

    /// Writes every static route and one page per article. Returns the files
    /// written, relative to the destination.
    pub fn process(&self, site: &Site) -> SiteResult<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.dest).map_err(|err| Error::io(&self.dest, err))?;

        let mut res = vec![];
        for (target, expected, file) in STATIC_PAGES {
            let file = PathBuf::from(file);
            self.write_page(site, target, expected, &file)?;
            res.push(file);
        }

        for article in site.store().fetch_all() {
            let target = format!("/articles/{}", article.slug);
            let file = Path::new("articles").join(&article.slug).join("index.html");
            self.write_page(site, &target, 200, &file)?;
            res.push(file);
        }

        info!("Wrote {} files to {}", res.len(), self.dest.display());
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::content::MemoryStore;
    use crate::test_support::sample_articles;

    #[test]
    fn unexpected_status_fails_without_writing() {
        let out = tempfile::tempdir().unwrap();
        let store = MemoryStore::new(sample_articles()).unwrap();
        let site = Site::new(&Config::default(), Box::new(store)).unwrap();
        let ssg = Ssg::new(out.path().to_path_buf());

        let file = Path::new("articles/missing/index.html");
        let err = ssg
            .write_page(&site, "/articles/missing", 200, file)
            .unwrap_err();
        assert!(matches!(err, Error::Build { status: 302, .. }));
        assert!(!out.path().join(file).exists());

        let err = ssg
            .write_page(&site, "/articles/search", 200, Path::new("search.html"))
            .unwrap_err();
        assert!(matches!(err, Error::Build { status: 400, .. }));
    }
}
