//! Link target resolution.
//!
//! The renderer asks a [`LinkResolver`] whether each link target exists.
//! Targets that do not resolve are rendered as plain text.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Decides whether a link target points at a real page.
pub trait LinkResolver {
    /// Return `true` if `target` resolves.
    fn resolve(&self, target: &str) -> bool;
}

impl<R: LinkResolver + ?Sized> LinkResolver for &R {
    fn resolve(&self, target: &str) -> bool {
        (**self).resolve(target)
    }
}

impl<R: LinkResolver + ?Sized> LinkResolver for Box<R> {
    fn resolve(&self, target: &str) -> bool {
        (**self).resolve(target)
    }
}

/// Resolver that accepts every link.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAllLinks;

impl LinkResolver for AcceptAllLinks {
    fn resolve(&self, _target: &str) -> bool {
        true
    }
}

/// Resolver backed by a fixed set of page names.
///
/// Fragments and query strings are ignored, so `a.html#details` resolves
/// when `a.html` is known.
#[derive(Clone, Debug, Default)]
pub struct KnownLinks {
    pages: HashSet<String>,
}

impl KnownLinks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a known page.
    pub fn insert(&mut self, page: impl Into<String>) {
        self.pages.insert(page.into());
    }
}

impl<S: Into<String>> FromIterator<S> for KnownLinks {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl LinkResolver for KnownLinks {
    fn resolve(&self, target: &str) -> bool {
        match page_path(target) {
            "" => true,
            page => self.pages.contains(page),
        }
    }
}

/// Resolver that checks for files under a documentation directory.
///
/// External URLs and fragment-only links are not checked.
#[derive(Clone, Debug)]
pub struct DirectoryLinks {
    root: PathBuf,
}

impl DirectoryLinks {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LinkResolver for DirectoryLinks {
    fn resolve(&self, target: &str) -> bool {
        if is_external(target) {
            return true;
        }
        match page_path(target) {
            "" => true,
            page => self.root.join(page.trim_start_matches('/')).is_file(),
        }
    }
}

/// Target without fragment or query string.
fn page_path(target: &str) -> &str {
    target.split(['#', '?']).next().unwrap_or_default()
}

/// Whether a target carries a URL scheme.
pub(crate) fn is_external(target: &str) -> bool {
    target.contains("://") || target.starts_with("mailto:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_all() {
        assert!(AcceptAllLinks.resolve("missing.html"));
    }

    #[test]
    fn test_known_links_ignore_fragment() {
        let links: KnownLinks = ["class_data_flash.html"].into_iter().collect();

        assert!(links.resolve("class_data_flash.html"));
        assert!(links.resolve("class_data_flash.html#a3f2"));
        assert!(links.resolve("#top"));
        assert!(!links.resolve("class_foo.html"));
    }

    #[test]
    fn test_directory_links_check_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("class_foo.html"), "<html></html>").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let links = DirectoryLinks::new(dir.path());

        assert!(links.resolve("class_foo.html"));
        assert!(links.resolve("class_foo.html?x=1#member"));
        assert!(!links.resolve("class_bar.html"));
        assert!(!links.resolve("sub"));
        assert!(links.resolve("https://example.com/missing.html"));
    }

    #[test]
    fn test_boxed_resolver() {
        let links: Box<dyn LinkResolver> = Box::new(KnownLinks::from_iter(["a.html"]));

        assert!(links.resolve("a.html"));
        assert!(!links.resolve("b.html"));
    }
}
