//! Locating freshly built binding artifacts
//!
//! After a build, the compiled extension lands somewhere under
//! `<repo-root>/<library>/build/` in a directory whose name is tagged with
//! the interpreter version it was built for (e.g. `lib.linux-x86_64-3.11`).
//! The locator walks that tree and returns the directory holding the
//! artifact so the caller can put it at the front of its own module search
//! list. Tests then exercise the just-built library instead of whatever is
//! installed.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// The embedded interpreter version a binding build is tagged with.
///
/// Renders as the `-{major}.{minor}` suffix that build directories carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
}

impl ApiVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Directory-name suffix used to filter build directories.
    fn dir_suffix(&self) -> String {
        format!("-{}.{}", self.major, self.minor)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Platform suffixes a compiled extension module may carry.
#[cfg(all(unix, not(target_os = "macos")))]
const EXTENSION_SUFFIXES: &[&str] = &[".so"];
#[cfg(target_os = "macos")]
const EXTENSION_SUFFIXES: &[&str] = &[".so", ".dylib"];
#[cfg(windows)]
const EXTENSION_SUFFIXES: &[&str] = &[".pyd", ".dll"];

/// Filenames that count as a compiled artifact for `library`.
///
/// The bare name with each platform suffix, plus the `lib`-prefixed spelling
/// that cdylib builds produce on unix.
pub fn candidate_names(library: &str) -> Vec<String> {
    let mut names = Vec::with_capacity(EXTENSION_SUFFIXES.len() * 2);
    for ext in EXTENSION_SUFFIXES {
        names.push(format!("{library}{ext}"));
        if cfg!(unix) {
            names.push(format!("lib{library}{ext}"));
        }
    }
    names
}

/// Search `<repo_root>/<library>/build` for a freshly built artifact.
///
/// Only directories whose name ends with `-{major}.{minor}` are descended
/// into, so artifacts left over from builds against other interpreter
/// versions are never picked up. The first directory containing a candidate
/// filename wins and the walk stops there.
///
/// Returns `Ok(None)` when the build tree exists but holds no matching
/// artifact; the caller should fall back to an installed version. A missing
/// build root is a setup error and fails with [`Error::BuildRootMissing`].
pub fn find_built_library(
    repo_root: &Path,
    library: &str,
    version: ApiVersion,
) -> Result<Option<PathBuf>> {
    let build_root = repo_root.join(library).join("build");
    if !build_root.is_dir() {
        return Err(Error::BuildRootMissing(build_root));
    }

    let names = candidate_names(library);
    let suffix = version.dir_suffix();
    let found = walk(&build_root, &names, &suffix);

    if found.is_none() {
        info!(
            library,
            build_root = %build_root.display(),
            "did not find the built library; an installed version will be used"
        );
    }

    Ok(found)
}

/// Top-down walk with version-suffix pruning.
///
/// Checks the current directory's files before descending. Subdirectories
/// not ending in `suffix` are pruned, never descended into. Entries that
/// cannot be read are skipped with a warning; a stray unreadable directory
/// under `build/` must not turn a soft miss into a hard error.
fn walk(dir: &Path, names: &[String], suffix: &str) -> Option<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            return None;
        }
    };

    let mut subdirs = Vec::new();

    for entry in entries {
        let Ok(entry) = entry else { continue };
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            if name.ends_with(suffix) {
                subdirs.push(entry.path());
            } else {
                debug!(dir = %entry.path().display(), "pruned: version suffix mismatch");
            }
        } else if names.iter().any(|candidate| candidate == name.as_ref()) {
            return Some(dir.to_path_buf());
        }
    }

    subdirs
        .into_iter()
        .find_map(|sub| walk(&sub, names, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_renders_as_dir_suffix() {
        let v = ApiVersion::new(3, 11);
        assert_eq!(v.dir_suffix(), "-3.11");
        assert_eq!(v.to_string(), "3.11");
    }

    #[test]
    fn candidates_cover_platform_suffixes() {
        let names = candidate_names("odbcdrv");
        assert!(!names.is_empty());
        for name in &names {
            assert!(name.contains("odbcdrv"));
            assert!(EXTENSION_SUFFIXES.iter().any(|ext| name.ends_with(ext)));
        }
        #[cfg(unix)]
        assert!(names.iter().any(|n| n.starts_with("lib")));
    }

    #[cfg(windows)]
    #[test]
    fn windows_candidates_include_both_module_suffixes() {
        let names = candidate_names("odbcdrv");
        assert!(names.contains(&"odbcdrv.pyd".to_string()));
        assert!(names.contains(&"odbcdrv.dll".to_string()));
    }

    #[test]
    fn missing_build_root_is_fatal() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = find_built_library(tmp.path(), "odbcdrv", ApiVersion::new(3, 11))
            .expect_err("build root does not exist");
        assert!(matches!(err, Error::BuildRootMissing(_)));
        assert!(err.is_fatal());
    }
}
