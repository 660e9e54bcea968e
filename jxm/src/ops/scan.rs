//! Scan operation - list the component registry.

use jxmigrate_config::Config;
use jxmigrate_migrate::plan::build_registry;

use crate::reports::ScanReport;

/// Build the registry and describe every component in it.
pub fn scan(config: &Config) -> jxmigrate_migrate::Result<ScanReport> {
    let (registry, folders) = build_registry(config)?;

    Ok(ScanReport::new(folders, registry.iter().cloned().collect()))
}
