use crate::config::FilesConfig;
use crate::errors::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Collects source files under a root, honoring `.gitignore` and ignore globs
pub struct FileWalker {
    root: PathBuf,
    extensions: Vec<String>,
    ignore_patterns: Vec<glob::Pattern>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            extensions: vec!["py".to_string()],
            ignore_patterns: vec![],
        }
    }

    pub fn from_config(root: &Path, files: &FilesConfig) -> Self {
        let patterns = files
            .ignore
            .iter()
            .filter_map(|pattern| match glob::Pattern::new(pattern) {
                Ok(compiled) => Some(compiled),
                Err(e) => {
                    log::warn!("Ignoring invalid ignore pattern '{}': {}", pattern, e);
                    None
                }
            })
            .collect();

        Self {
            root: root.to_path_buf(),
            extensions: files.extensions.clone(),
            ignore_patterns: patterns,
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Matching files in sorted order. A root that is itself a file is returned as-is.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .require_git(false)
            .build();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && self.should_process(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        log::debug!(
            "Found {} files under {}",
            files.len(),
            self.root.display()
        );
        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        let Some(ext) = path.extension() else {
            return false;
        };
        let ext = ext.to_string_lossy();
        if !self.extensions.iter().any(|allowed| allowed == ext.as_ref()) {
            return false;
        }

        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        !self
            .ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x = 1\n").unwrap();
    }

    #[test]
    fn test_walk_filters_by_extension_and_sorts() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.py");
        touch(dir.path(), "a.py");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "pkg/c.py");

        let files = FileWalker::new(dir.path().to_path_buf()).walk().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.py"),
                PathBuf::from("b.py"),
                PathBuf::from("pkg/c.py")
            ]
        );
    }

    #[test]
    fn test_ignore_patterns_are_relative_to_root() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "app.py");
        touch(dir.path(), "venv/lib/site.py");
        touch(dir.path(), "pkg/__pycache__/cached.py");

        let files = FileWalker::from_config(dir.path(), &FilesConfig::default())
            .walk()
            .unwrap();
        assert_eq!(files, vec![dir.path().join("app.py")]);
    }

    #[test]
    fn test_extra_extensions() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "gui.pyw");
        touch(dir.path(), "main.py");

        let files = FileWalker::new(dir.path().to_path_buf())
            .with_extensions(vec!["py".into(), "pyw".into()])
            .walk()
            .unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_invalid_ignore_pattern_is_skipped() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "app.py");
        touch(dir.path(), "build/gen.py");
        let files = FilesConfig {
            extensions: vec!["py".into()],
            ignore: vec!["[".into(), "build/**".into()],
        };

        let found = FileWalker::from_config(dir.path(), &files).walk().unwrap();
        assert_eq!(found, vec![dir.path().join("app.py")]);
    }

    #[test]
    fn test_file_root_is_returned_directly() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "only.txt");
        let root = dir.path().join("only.txt");
        let files = FileWalker::new(root.clone()).walk().unwrap();
        assert_eq!(files, vec![root]);
    }
}
