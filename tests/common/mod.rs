#![allow(dead_code)]

use doclink::{ArtifactWalker, DeclarationIndex, LinkBuilder, LinkResolver, PackageFilter};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// An artifact root on disk, filled with class records
pub struct TestProject {
    pub dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Write the record of `binary_name` (e.g. `bot/api/Foo$Bar`)
    pub fn add_class(&self, binary_name: &str, metadata: Option<Value>) -> PathBuf {
        let record = json!({"name": binary_name, "metadata": metadata});
        self.add_file(&format!("{binary_name}.json"), &record.to_string())
    }

    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.dir.path().join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn build_index(&self, filter: PackageFilter) -> DeclarationIndex {
        DeclarationIndex::build(&ArtifactWalker::new([self.path()]), filter)
            .expect("Failed to build index")
    }

    pub fn resolver(&self) -> LinkResolver {
        LinkResolver::new(
            Arc::new(self.build_index(PackageFilter::all())),
            LinkBuilder::default(),
        )
    }
}

pub mod metadata {
    use serde_json::{Value, json};

    pub fn class(module: &str, class_kind: &str) -> Value {
        json!({"version": [2, 0, 0], "kind": "class", "module": module, "class_kind": class_kind})
    }

    pub fn facade(module: &str) -> Value {
        json!({"version": [2, 0, 0], "kind": "file_facade", "module": module})
    }

    pub fn with_functions(mut metadata: Value, names: &[&str]) -> Value {
        metadata["functions"] = members(names);
        metadata
    }

    pub fn with_properties(mut metadata: Value, names: &[&str]) -> Value {
        metadata["properties"] = members(names);
        metadata
    }

    pub fn with_enum_entries(mut metadata: Value, names: &[&str]) -> Value {
        metadata["enum_entries"] = json!(names);
        metadata
    }

    pub fn with_companion(mut metadata: Value, name: &str) -> Value {
        metadata["companion_object"] = json!(name);
        metadata
    }

    fn members(names: &[&str]) -> Value {
        names.iter().map(|name| json!({"name": name})).collect()
    }
}
