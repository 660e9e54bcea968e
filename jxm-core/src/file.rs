use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

/// Copy `src` to `dest`, creating parent directories as needed.
///
/// Copying onto a destination that already holds the same bytes is a no-op.
pub fn copy_file(src: &Path, dest: &Path) -> Result<WriteResult> {
    let bytes = std::fs::read(src).wrap_err_with(|| format!("failed to read '{}'", src.display()))?;

    if dest.is_file() {
        let existing =
            std::fs::read(dest).wrap_err_with(|| format!("failed to read '{}'", dest.display()))?;
        if existing == bytes {
            return Ok(WriteResult::Skipped);
        }
    }

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    std::fs::copy(src, dest).wrap_err_with(|| {
        format!("failed to copy '{}' to '{}'", src.display(), dest.display())
    })?;
    Ok(WriteResult::Written)
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists or already up to date)
    Skipped,
}

/// A file to be written
pub struct File {
    path: PathBuf,
    content: String,
    overwrite: Overwrite,
}

impl File {
    /// Create a new file with the given path and content (always overwrites)
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            overwrite: Overwrite::Always,
        }
    }

    /// Change how an existing file at the same path is handled
    pub fn with_overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file according to its overwrite rule
    pub fn write(&self) -> Result<WriteResult> {
        match self.overwrite {
            Overwrite::Always => {
                write_file(&self.path, &self.content)?;
                Ok(WriteResult::Written)
            }
            Overwrite::IfMissing => {
                if self.exists() {
                    Ok(WriteResult::Skipped)
                } else {
                    write_file(&self.path, &self.content)?;
                    Ok(WriteResult::Written)
                }
            }
        }
    }
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite (migrated templates)
    Always,
    /// Only create if file doesn't exist (config scaffolding)
    IfMissing,
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("c").join("test.jinja");

        write_file(&path, "nested").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_write_file_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.jinja");

        write_file(&path, "first").unwrap();
        write_file(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_copy_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("Card.css");
        fs::write(&src, ".card {}").unwrap();
        let dest = temp.path().join("static").join("ui").join("Card.css");

        let result = copy_file(&src, &dest).unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&dest).unwrap(), ".card {}");
    }

    #[test]
    fn test_copy_file_twice_is_noop() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("Card.css");
        fs::write(&src, ".card {}").unwrap();
        let dest = temp.path().join("out").join("Card.css");

        assert_eq!(copy_file(&src, &dest).unwrap(), WriteResult::Written);
        assert_eq!(copy_file(&src, &dest).unwrap(), WriteResult::Skipped);
    }

    #[test]
    fn test_copy_file_replaces_stale_destination() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("Card.css");
        fs::write(&src, ".card { color: red; }").unwrap();
        let dest = temp.path().join("Copy.css");
        fs::write(&dest, ".card {}").unwrap();

        assert_eq!(copy_file(&src, &dest).unwrap(), WriteResult::Written);
        assert_eq!(fs::read_to_string(&dest).unwrap(), ".card { color: red; }");
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        let result = copy_file(&temp.path().join("nope.css"), &temp.path().join("x.css"));
        assert!(result.is_err());
    }

    #[test]
    fn test_file_write_if_missing_skips_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("jxm.toml");
        fs::write(&path, "original").unwrap();

        let file = File::new(&path, "should not write").with_overwrite(Overwrite::IfMissing);

        assert_eq!(file.write().unwrap(), WriteResult::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn test_file_write_if_missing_creates_new() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("jxm.toml");

        let file = File::new(&path, "new content").with_overwrite(Overwrite::IfMissing);

        assert_eq!(file.write().unwrap(), WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new content");
    }

    #[test]
    fn test_file_exists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.jinja");

        let file = File::new(&path, "content");
        assert!(!file.exists());

        fs::write(&path, "content").unwrap();
        assert!(file.exists());
    }
}
