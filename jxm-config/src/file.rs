use std::path::{Path, PathBuf};

use crate::{Config, Error, Result, SourceContext};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "jxm.toml";

/// Represents a jxm.toml file with both raw content and parsed configuration.
///
/// Relative paths inside the file are resolved against the directory that
/// contains it, and every configured folder is checked to exist.
#[derive(Debug)]
pub struct ConfigFile {
    path: PathBuf,
    content: String,
    config: Config,
}

impl ConfigFile {
    /// Open, parse and validate a jxm.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let ctx = SourceContext::new(content.as_str(), filename.as_str());

        let mut config = Config::from_str_with_filename(&content, &filename)?;
        config.validate(&ctx)?;

        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        config.resolve_paths(&base);
        config.check_folders_exist(&ctx)?;

        tracing::debug!(path = %path.display(), folders = config.folders.len(), "loaded config");

        Ok(Self {
            path,
            content,
            config,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the file and return the parsed configuration.
    pub fn into_config(self) -> Config {
        self.config
    }
}
