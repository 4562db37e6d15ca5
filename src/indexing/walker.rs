//! Artifact discovery for the declaration index
//!
//! An artifact root is laid out like a class output directory: every `.json`
//! file below it is one compiled class record holding the class's binary name
//! and, when the class has any, its raw declaration metadata.
//!
//! ```json
//! { "name": "io/github/bot/api/Foo$Bar", "metadata": { "version": [2, 0, 0], "kind": "class", ... } }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::declaration::split_binary_name;
use crate::error::{IndexError, IndexResult};

/// A compiled class and its undecoded metadata blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawClass {
    #[serde(rename = "name")]
    pub binary_name: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl RawClass {
    pub fn new(binary_name: impl Into<String>, metadata: Option<serde_json::Value>) -> Self {
        Self {
            binary_name: binary_name.into(),
            metadata,
        }
    }

    /// Dotted package name, empty for the default package
    pub fn package(&self) -> String {
        split_binary_name(&self.binary_name).0
    }
}

/// Restricts a scan to a set of packages and everything nested below them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageFilter {
    prefixes: Vec<String>,
}

impl PackageFilter {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(Into::into)
                .filter(|prefix: &String| !prefix.is_empty())
                .collect(),
        }
    }

    /// Filter that keeps every package
    pub fn all() -> Self {
        Self::default()
    }

    pub fn accepts(&self, package: &str) -> bool {
        self.prefixes.is_empty()
            || self.prefixes.iter().any(|prefix| {
                package == prefix
                    || package
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with('.'))
            })
    }
}

/// Enumerates compiled classes and reads their metadata blobs.
///
/// This is called once, while the index is built.
pub trait ArtifactSource: Send + Sync {
    fn scan(&self, filter: &PackageFilter) -> IndexResult<Vec<RawClass>>;
}

/// Walks artifact roots on disk
#[derive(Debug, Clone)]
pub struct ArtifactWalker {
    roots: Vec<PathBuf>,
}

impl ArtifactWalker {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Walk one root and return the class records below it, in file name order
    pub fn walk(&self, root: &Path) -> IndexResult<Vec<RawClass>> {
        let metadata = std::fs::metadata(root).map_err(|source| IndexError::ArtifactRoot {
            path: root.to_path_buf(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(IndexError::ArtifactRoot {
                path: root.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotADirectory,
                    "artifact root is not a directory",
                ),
            });
        }

        let classes = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable artifact entry: {e}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| is_class_record(entry.path()))
            .filter_map(|entry| read_class(entry.path()))
            .collect();

        Ok(classes)
    }
}

impl ArtifactSource for ArtifactWalker {
    fn scan(&self, filter: &PackageFilter) -> IndexResult<Vec<RawClass>> {
        let mut classes = Vec::new();
        for root in &self.roots {
            let found = self.walk(root)?;
            debug!("Found {} class records in {}", found.len(), root.display());
            classes.extend(
                found
                    .into_iter()
                    .filter(|class| filter.accepts(&class.package())),
            );
        }
        Ok(classes)
    }
}

/// Class records held in memory, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryArtifactSource {
    classes: Vec<RawClass>,
}

impl InMemoryArtifactSource {
    pub fn new(classes: Vec<RawClass>) -> Self {
        Self { classes }
    }

    pub fn push(&mut self, class: RawClass) {
        self.classes.push(class);
    }
}

impl ArtifactSource for InMemoryArtifactSource {
    fn scan(&self, filter: &PackageFilter) -> IndexResult<Vec<RawClass>> {
        Ok(self
            .classes
            .iter()
            .filter(|class| filter.accepts(&class.package()))
            .cloned()
            .collect())
    }
}

fn is_class_record(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'));
    !hidden && path.extension().is_some_and(|ext| ext == "json")
}

fn read_class(path: &Path) -> Option<RawClass> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Skipping unreadable class record '{}': {e}", path.display());
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(class) => Some(class),
        Err(e) => {
            warn!("Skipping invalid class record '{}': {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write_record(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_package_filter() {
        let filter = PackageFilter::new(["io.github.bot.api"]);
        assert!(filter.accepts("io.github.bot.api"));
        assert!(filter.accepts("io.github.bot.api.core"));
        assert!(!filter.accepts("io.github.bot.apix"));
        assert!(!filter.accepts("io.github.bot"));
        assert!(PackageFilter::all().accepts(""));
        assert!(PackageFilter::new([""]).accepts("anything"));
    }

    #[test]
    fn test_walk_reads_records_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        write_record(root, "bot/api/B.json", r#"{"name": "bot/api/B"}"#);
        write_record(
            root,
            "bot/api/A.json",
            r#"{"name": "bot/api/A", "metadata": {"version": [2, 0, 0], "kind": "synthetic_class"}}"#,
        );
        write_record(root, "bot/api/notes.txt", "not a class");
        write_record(root, "bot/api/.hidden.json", r#"{"name": "bot/api/Hidden"}"#);

        let classes = ArtifactWalker::new([root]).walk(root).unwrap();
        let names: Vec<_> = classes.iter().map(|c| c.binary_name.as_str()).collect();
        assert_eq!(names, vec!["bot/api/A", "bot/api/B"]);
        assert!(classes[0].metadata.is_some());
        assert!(classes[1].metadata.is_none());
    }

    #[test]
    fn test_invalid_records_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        write_record(root, "Broken.json", "{ not json");
        write_record(root, "Fine.json", r#"{"name": "Fine"}"#);

        let classes = ArtifactWalker::new([root]).walk(root).unwrap();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].binary_name, "Fine");
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let result = ArtifactWalker::new([&missing]).scan(&PackageFilter::all());
        assert!(matches!(result, Err(IndexError::ArtifactRoot { .. })));
    }

    #[test]
    fn test_scan_applies_package_filter() {
        let source = InMemoryArtifactSource::new(vec![
            RawClass::new("io/github/bot/api/Kept", Some(json!({}))),
            RawClass::new("io/github/bot/internal/Dropped", Some(json!({}))),
        ]);

        let classes = source
            .scan(&PackageFilter::new(["io.github.bot.api"]))
            .unwrap();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].binary_name, "io/github/bot/api/Kept");
    }
}
