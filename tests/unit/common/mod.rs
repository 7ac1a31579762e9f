//! Shared test fixtures and helpers

use std::fs;
use std::path::{Path, PathBuf};

use chatpatch::rule::DEFAULT_TARGET;
use tempfile::TempDir;

/// Unpatched lead modal containing each built-in search text exactly once
pub const LEAD_MODAL: &str = include_str!("../../fixtures/lead_modal.tsx");

/// A throwaway project root with a `components/` directory
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Create a project whose lead modal holds `content`
    pub fn with_modal(content: &str) -> Self {
        let project = Self::empty();
        project.write(content);
        project
    }

    /// Create a project with an unpatched lead modal
    pub fn new() -> Self {
        Self::with_modal(LEAD_MODAL)
    }

    /// Create a project without the target file
    pub fn empty() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        fs::create_dir_all(dir.path().join("components")).unwrap();
        Self { dir }
    }

    /// Project root
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of the lead modal
    pub fn target(&self) -> PathBuf {
        self.dir.path().join(DEFAULT_TARGET)
    }

    /// Overwrite the lead modal
    pub fn write(&self, content: &str) {
        fs::write(self.target(), content).unwrap();
    }

    /// Current lead modal content
    pub fn read(&self) -> String {
        fs::read_to_string(self.target()).unwrap()
    }
}
