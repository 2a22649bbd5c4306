//! Reading the optional connection string from `tmp/setup.cfg`
//!
//! The test suite connects to whatever database the developer configured in
//! a `tmp/setup.cfg` file somewhere up the directory chain. A missing file
//! or missing entry is normal (tests fall back to their own defaults); a
//! file that is present but malformed is a developer error and fails hard.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

const SETUP_FILENAME: &str = "setup.cfg";

/// The subset of a section the harness cares about.
#[derive(Debug, Deserialize)]
struct SectionConfig {
    #[serde(rename = "connection-string")]
    connection_string: Option<String>,
}

/// Read the connection string for `section` from the nearest
/// `tmp/setup.cfg`, starting at the process working directory.
///
/// Returns `Ok(None)` if no config file exists anywhere up the chain, or if
/// the file exists but has no `connection-string` entry under `section`.
/// A file that cannot be parsed fails with [`Error::ConfigParse`].
pub fn load_setup_connection_string(section: &str) -> Result<Option<String>> {
    let start = std::env::current_dir()?;
    load_setup_connection_string_from(&start, section)
}

/// Same as [`load_setup_connection_string`], searching upward from `start`.
pub fn load_setup_connection_string_from(
    start: &Path,
    section: &str,
) -> Result<Option<String>> {
    let Some(path) = find_setup_file(start) else {
        return Ok(None);
    };
    debug!(path = %path.display(), "found setup config");

    let content = fs::read_to_string(&path)?;
    let table: toml::Table = content.parse().map_err(|e: toml::de::Error| {
        Error::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        }
    })?;

    let Some(value) = table.get(section) else {
        return Ok(None);
    };
    let config: SectionConfig =
        value
            .clone()
            .try_into()
            .map_err(|e: toml::de::Error| Error::ConfigParse {
                path,
                message: e.to_string(),
            })?;

    Ok(config.connection_string)
}

/// Walk parent directories looking for `<dir>/tmp/setup.cfg`.
///
/// Stops when a directory has no further parent (filesystem root).
fn find_setup_file(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        let candidate = dir.join("tmp").join(SETUP_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}
