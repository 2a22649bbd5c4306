//! Error types for the test harness
//!
//! Two of these are fatal in the harness sense: a missing build root and a
//! malformed `setup.cfg` both indicate a broken development environment, not
//! a condition the test run should paper over. Library code returns them as
//! ordinary errors; harness entry points funnel them through [`or_exit`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the test harness
#[derive(Error, Debug)]
pub enum Error {
    // === Fatal: broken development environment ===
    #[error("Build dir not found: {}", .0.display())]
    BuildRootMissing(PathBuf),

    #[error("Unable to parse {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    // === Suite construction ===
    #[error("Test '{0}' is not in the registry")]
    TestNotFound(String),

    // === Live driver queries ===
    #[error("Driver query failed: {0}")]
    Driver(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether this error should terminate the harness process.
    ///
    /// Missing or incomplete configuration is a normal soft case and never
    /// reaches this type; the fatal variants mean the development
    /// environment itself is broken.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::BuildRootMissing(_) | Error::ConfigParse { .. })
    }
}

/// Unwrap a harness result, exiting the process on error.
///
/// Prints the error to stderr and exits with status 1. Used by harness entry
/// points that keep the fail-fast contract; library callers that want to
/// recover match on the `Result` instead.
pub fn or_exit<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_classification() {
        assert!(Error::BuildRootMissing(PathBuf::from("/x/build")).is_fatal());
        assert!(Error::ConfigParse {
            path: PathBuf::from("tmp/setup.cfg"),
            message: "bad".into()
        }
        .is_fatal());
        assert!(!Error::TestNotFound("test_x".into()).is_fatal());
        assert!(!Error::Driver("timeout".into()).is_fatal());
    }

    #[test]
    fn messages_name_the_path() {
        let e = Error::BuildRootMissing(PathBuf::from("/repo/lib/build"));
        assert!(e.to_string().contains("/repo/lib/build"));

        let e = Error::ConfigParse {
            path: PathBuf::from("/repo/tmp/setup.cfg"),
            message: "expected `=`".into(),
        };
        let s = e.to_string();
        assert!(s.contains("setup.cfg"));
        assert!(s.contains("expected `=`"));
    }
}
