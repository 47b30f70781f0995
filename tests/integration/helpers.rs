//! Shared helpers for writing task lists and configs to a temp directory

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use tasklint::template::TEMPLATE;

/// A temp directory holding the files under test
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `content` to `name` inside the workspace and return its path
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// The canonical template with `from` replaced by `to`, asserting the replacement hit
pub fn template_with(from: &str, to: &str) -> String {
    assert!(TEMPLATE.contains(from), "template does not contain {from:?}");
    TEMPLATE.replacen(from, to, 1)
}
