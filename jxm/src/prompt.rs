//! Interactive prompts for building a configuration.

use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use eyre::{Context, Result};
use jxmigrate_config::{CatalogFolder, Config, DEFAULT_URL_PREFIX, SourceContext};

use crate::commands::UnwrapOrExit;

/// Ask for folders, the static folder and the URL prefix.
///
/// Paths are kept as typed, relative to the current directory. The init
/// command rebases them onto the config file's folder.
pub fn collect_config() -> Result<Config> {
    let theme = ColorfulTheme::default();
    let folders = prompt_folders(&theme)?;

    let static_folder: String = Input::with_theme(&theme)
        .with_prompt("Static folder for component assets")
        .default("static".to_string())
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            let path = Path::new(input.trim());
            if path.exists() && !path.is_dir() {
                Err(format!("'{}' exists and is not a directory", input.trim()))
            } else {
                Ok(())
            }
        })
        .interact_text()
        .wrap_err("Failed to read static folder")?;

    let url_prefix: String = Input::with_theme(&theme)
        .with_prompt("URL prefix the static folder is served under")
        .default(DEFAULT_URL_PREFIX.to_string())
        .interact_text()
        .wrap_err("Failed to read URL prefix")?;

    let config = Config::new(folders, PathBuf::from(static_folder.trim()), &url_prefix);
    let ctx = SourceContext::new(config.to_toml(), "<prompt>");
    config.validate(&ctx).unwrap_or_exit();
    Ok(config)
}

fn prompt_folders(theme: &ColorfulTheme) -> Result<Vec<CatalogFolder>> {
    let mut folders: Vec<CatalogFolder> = Vec::new();

    loop {
        let path: String = Input::with_theme(theme)
            .with_prompt("Component folder (leave empty to finish)")
            .allow_empty(true)
            .interact_text()
            .wrap_err("Failed to read component folder")?;
        let path = path.trim();

        if path.is_empty() {
            if folders.is_empty() {
                eprintln!("At least one component folder is required.");
                continue;
            }
            return Ok(folders);
        }
        if !Path::new(path).is_dir() {
            eprintln!("'{}' is not a directory.", path);
            continue;
        }

        let prefix: String = Input::with_theme(theme)
            .with_prompt("Prefix for this folder (leave empty for none)")
            .allow_empty(true)
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                let input = input.trim();
                if !input.is_empty() && folders.iter().any(|f| f.prefix.as_deref() == Some(input)) {
                    Err(format!("prefix '{}' is already used", input))
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .wrap_err("Failed to read folder prefix")?;

        folders.push(CatalogFolder::new(path, Some(prefix.trim().to_string())));
    }
}

/// Ask a yes/no question, defaulting to no.
pub fn confirm(prompt: &str) -> Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .wrap_err("Failed to read confirmation")
}
