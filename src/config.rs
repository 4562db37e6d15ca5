//! Layered configuration for the link resolver.
//!
//! Sources, later ones overriding earlier ones:
//! - Default values
//! - TOML configuration file (`.doclink/settings.toml`)
//! - Environment variables
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `DOCLINK_` and use double
//! underscores to separate nested levels:
//! - `DOCLINK_DOCS__ROOT_URL=https://docs.example/v3` sets `docs.root_url`
//! - `DOCLINK_INDEX__PARALLEL_THREADS=8` sets `index.parallel_threads`
//! - `DOCLINK_SERVER__BIND=0.0.0.0:16069` sets `server.bind`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::indexing::PackageFilter;
use crate::link::{DEFAULT_DOC_ROOT, LinkBuilder};

/// Directory holding the settings file, relative to the workspace root
pub const CONFIG_DIR: &str = ".doclink";

const ENV_PREFIX: &str = "DOCLINK_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Directory containing `.doclink`; relative artifact roots are resolved against it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,

    /// Global debug mode
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub docs: DocsConfig,

    #[serde(default)]
    pub index: IndexConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DocsConfig {
    /// Root every generated documentation URL starts with
    #[serde(default = "default_root_url")]
    pub root_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IndexConfig {
    /// Directories holding compiled class records
    #[serde(default = "default_artifact_roots")]
    pub artifact_roots: Vec<PathBuf>,

    /// Packages to index, with everything nested below them. Empty indexes all.
    #[serde(default)]
    pub package_prefixes: Vec<String>,

    /// Threads decoding metadata, 0 lets the thread pool decide
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address the HTTP link server listens on
    #[serde(default = "default_bind_address")]
    pub bind: String,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_root_url() -> String {
    DEFAULT_DOC_ROOT.to_string()
}
fn default_artifact_roots() -> Vec<PathBuf> {
    vec![PathBuf::from("build/classes")]
}
fn default_parallel_threads() -> usize {
    num_cpus::get()
}
fn default_bind_address() -> String {
    "127.0.0.1:16069".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            workspace_root: None,
            debug: false,
            docs: DocsConfig::default(),
            index: IndexConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            root_url: default_root_url(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            artifact_roots: default_artifact_roots(),
            package_prefixes: Vec::new(),
            parallel_threads: default_parallel_threads(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind_address(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        // Try to find the workspace root by looking for the .doclink directory
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| Path::new(CONFIG_DIR).join("settings.toml"));

        Self::figment(&config_path)
            .extract()
            .map_err(Box::new)
            .map(|mut settings: Settings| {
                if settings.workspace_root.is_none() {
                    settings.workspace_root = Self::workspace_root();
                }
                settings
            })
    }

    /// Load configuration from a specific file
    ///
    /// Relative artifact roots resolve against the directory holding the
    /// file's `.doclink` directory, or the file's own directory otherwise.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        let path = path.as_ref();
        Self::figment(path)
            .extract()
            .map_err(Box::new)
            .map(|mut settings: Settings| {
                if settings.workspace_root.is_none() {
                    settings.workspace_root = Self::workspace_of(path);
                }
                settings
            })
    }

    fn workspace_of(config_path: &Path) -> Option<PathBuf> {
        let dir = config_path.parent()?;
        let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
        match dir.file_name() {
            Some(name) if name == CONFIG_DIR => dir.parent().map(Path::to_path_buf),
            _ => Some(dir.to_path_buf()),
        }
    }

    fn figment(config_path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_path))
            // Double underscore separates nested levels, single underscores stay
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
    }

    /// Find the settings file by looking for `.doclink` from the current
    /// directory up to the filesystem root
    fn find_workspace_config() -> Option<PathBuf> {
        Self::workspace_root().map(|root| root.join(CONFIG_DIR).join("settings.toml"))
    }

    /// Get the workspace root directory (where `.doclink` is located)
    pub fn workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        current
            .ancestors()
            .find(|ancestor| ancestor.join(CONFIG_DIR).is_dir())
            .map(Path::to_path_buf)
    }

    /// Artifact roots with relative paths resolved against the workspace root
    pub fn artifact_roots(&self) -> Vec<PathBuf> {
        self.index
            .artifact_roots
            .iter()
            .map(|root| match &self.workspace_root {
                Some(workspace) if root.is_relative() => workspace.join(root),
                _ => root.clone(),
            })
            .collect()
    }

    pub fn package_filter(&self) -> PackageFilter {
        PackageFilter::new(self.index.package_prefixes.iter().cloned())
    }

    pub fn link_builder(&self) -> LinkBuilder {
        LinkBuilder::new(self.docs.root_url.clone())
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a commented settings file in `<workspace>/.doclink/`
    pub fn init_config_file(
        workspace: impl AsRef<Path>,
        force: bool,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = workspace.as_ref().join(CONFIG_DIR).join("settings.toml");

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = format!(
            r#"# doclink configuration file

# Version of the configuration schema
version = 1

# Global debug mode
debug = false

[docs]
# Root of the published documentation
root_url = "{root_url}"

[index]
# Directories holding compiled class records (relative to the workspace root)
artifact_roots = ["build/classes"]

# Only index these packages and the packages nested below them
# package_prefixes = ["io.github.example.api"]
package_prefixes = []

# Number of threads decoding metadata (defaults to CPU count)
# parallel_threads = {threads}

[server]
# Address of the HTTP link server
bind = "{bind}"
"#,
            root_url = default_root_url(),
            threads = default_parallel_threads(),
            bind = default_bind_address(),
        );

        std::fs::write(&config_path, template)?;
        Ok(config_path)
    }
}
