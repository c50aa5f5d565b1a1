use crate::consts::{
    DEFAULT_ARTIFACTS_PATH, DEFAULT_CACHE_PATH, DEFAULT_SOURCES_PATH, DEFAULT_TESTS_PATH,
};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Project directories, as written in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Paths {
    pub artifacts: String,
    pub cache: String,
    pub sources: String,
    pub tests: String,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            artifacts: DEFAULT_ARTIFACTS_PATH.to_string(),
            cache: DEFAULT_CACHE_PATH.to_string(),
            sources: DEFAULT_SOURCES_PATH.to_string(),
            tests: DEFAULT_TESTS_PATH.to_string(),
        }
    }
}

/// Project directories joined onto the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub root: PathBuf,
    pub artifacts: PathBuf,
    pub cache: PathBuf,
    pub sources: PathBuf,
    pub tests: PathBuf,
}

impl Paths {
    /// `(field name, value)` pairs in declaration order.
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("artifacts", self.artifacts.as_str()),
            ("cache", self.cache.as_str()),
            ("sources", self.sources.as_str()),
            ("tests", self.tests.as_str()),
        ]
    }

    /// Absolute paths are kept as is, relative ones are joined onto `root`.
    pub fn resolve(&self, root: &Path) -> ResolvedPaths {
        let root = normalize(root);
        let resolve = |path: &str| normalize(&root.join(path));
        ResolvedPaths {
            artifacts: resolve(&self.artifacts),
            cache: resolve(&self.cache),
            sources: resolve(&self.sources),
            tests: resolve(&self.tests),
            root,
        }
    }
}

/// Lexically drops `.` components and folds `..` into the preceding
/// component, without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                ) {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}
