//! The filesystem boundary (§6): `SourceFile::save` and project-level file
//! loading go through this trait rather than touching `std::fs` directly,
//! so tests can swap in an in-memory host.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use crate::errors::{CoreError, CoreResult};

pub trait FileSystemHost {
    fn read_file(&self, path: &str) -> CoreResult<String>;
    fn write_file(&self, path: &str, contents: &str) -> CoreResult<()>;
    fn file_exists(&self, path: &str) -> bool;
    fn delete_file(&self, path: &str) -> CoreResult<()>;
}

/// Reads and writes through `std::fs`. The host a real `Project` uses by
/// default.
#[derive(Default)]
pub struct RealFileSystemHost;

impl FileSystemHost for RealFileSystemHost {
    fn read_file(&self, path: &str) -> CoreResult<String> {
        std::fs::read_to_string(path).map_err(|_| CoreError::FileNotFound(path.to_string()))
    }

    fn write_file(&self, path: &str, contents: &str) -> CoreResult<()> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                let _ = std::fs::create_dir_all(parent);
            }
        }
        std::fs::write(path, contents).map_err(|e| CoreError::InvalidOperation(format!("failed to write {path}: {e}")))
    }

    fn file_exists(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }

    fn delete_file(&self, path: &str) -> CoreResult<()> {
        std::fs::remove_file(path).map_err(|_| CoreError::FileNotFound(path.to_string()))
    }
}

/// An entirely in-memory host, used by tests and by callers that never
/// intend to touch disk (§8 scenarios run against this).
#[derive(Default)]
pub struct InMemoryFileSystemHost {
    files: RefCell<HashMap<String, String>>,
}

impl InMemoryFileSystemHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.borrow_mut().insert(path.into(), contents.into());
        self
    }
}

impl FileSystemHost for InMemoryFileSystemHost {
    fn read_file(&self, path: &str) -> CoreResult<String> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| CoreError::FileNotFound(path.to_string()))
    }

    fn write_file(&self, path: &str, contents: &str) -> CoreResult<()> {
        self.files.borrow_mut().insert(path.to_string(), contents.to_string());
        Ok(())
    }

    fn file_exists(&self, path: &str) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn delete_file(&self, path: &str) -> CoreResult<()> {
        self.files
            .borrow_mut()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| CoreError::FileNotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_host_round_trips() {
        let host = InMemoryFileSystemHost::new();
        host.write_file("a.ts", "class A {}").unwrap();
        assert!(host.file_exists("a.ts"));
        assert_eq!(host.read_file("a.ts").unwrap(), "class A {}");
        host.delete_file("a.ts").unwrap();
        assert!(!host.file_exists("a.ts"));
    }

    #[test]
    fn in_memory_host_missing_file_errors() {
        let host = InMemoryFileSystemHost::new();
        assert!(host.read_file("missing.ts").is_err());
    }
}
