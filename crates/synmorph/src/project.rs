//! A convenience entry point that owns a `GlobalContainer` plus the set of
//! source files loaded through it, keyed by path. Nothing below this layer
//! needs a `Project` to exist — `GlobalContainer` and `SourceFile` work
//! fine standalone — but most callers want one `Project` per run.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::errors::{CoreError, CoreResult};
use crate::fs_host::{FileSystemHost, RealFileSystemHost};
use crate::global_container::GlobalContainer;
use crate::settings::ManipulationSettings;
use crate::source_file::SourceFile;

pub struct Project {
    container: Rc<GlobalContainer>,
    sources: RefCell<HashMap<String, SourceFile>>,
}

impl Project {
    #[must_use]
    pub fn new(settings: ManipulationSettings) -> Self {
        Self::with_fs_host(settings, Rc::new(RealFileSystemHost))
    }

    #[must_use]
    pub fn with_fs_host(settings: ManipulationSettings, fs_host: Rc<dyn FileSystemHost>) -> Self {
        Project {
            container: GlobalContainer::new(settings, fs_host),
            sources: RefCell::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn container(&self) -> Rc<GlobalContainer> {
        self.container.clone()
    }

    /// Parses `text` as `path` and registers it. Replaces any existing
    /// source file already registered at `path`.
    pub fn create_source_file(&self, path: impl Into<String>, text: impl Into<String>) -> SourceFile {
        let path = path.into();
        let source = SourceFile::from_parts(path.clone(), text, &self.container);
        self.sources.borrow_mut().insert(path, source.clone());
        source
    }

    /// Loads `path` through the filesystem host and registers it.
    pub fn add_source_file_at_path(&self, path: impl Into<String>) -> CoreResult<SourceFile> {
        let path = path.into();
        let text = self.container.fs_host().read_file(&path)?;
        Ok(self.create_source_file(path, text))
    }

    #[must_use]
    pub fn get_source_file(&self, path: &str) -> Option<SourceFile> {
        self.sources.borrow().get(path).cloned()
    }

    pub fn get_source_file_or_throw(&self, path: &str) -> CoreResult<SourceFile> {
        self.get_source_file(path).ok_or_else(|| CoreError::FileNotFound(path.to_string()))
    }

    #[must_use]
    pub fn get_source_files(&self) -> Vec<SourceFile> {
        self.sources.borrow().values().cloned().collect()
    }

    /// Saves every registered source file through the filesystem host.
    pub fn save(&self) -> CoreResult<()> {
        for source in self.sources.borrow().values() {
            source.save()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_fetch_round_trips() {
        let project = Project::with_fs_host(ManipulationSettings::default(), Rc::new(crate::fs_host::InMemoryFileSystemHost::new()));
        project.create_source_file("a.ts", "class A {}");
        let fetched = project.get_source_file_or_throw("a.ts").unwrap();
        assert_eq!(fetched.get_full_text(), "class A {}");
    }

    #[test]
    fn missing_source_file_errors() {
        let project = Project::with_fs_host(ManipulationSettings::default(), Rc::new(crate::fs_host::InMemoryFileSystemHost::new()));
        assert!(project.get_source_file_or_throw("missing.ts").is_err());
    }

    #[test]
    fn save_writes_through_the_fs_host() {
        let host = Rc::new(crate::fs_host::InMemoryFileSystemHost::new());
        let project = Project::with_fs_host(ManipulationSettings::default(), host.clone());
        let source = project.create_source_file("a.ts", "class A {}");
        source.set_full_text("class B {}").unwrap();
        project.save().unwrap();
        assert_eq!(host.read_file("a.ts").unwrap(), "class B {}");
    }
}
