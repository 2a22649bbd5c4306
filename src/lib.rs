//! Test-harness utilities for ODBC database-driver bindings
//!
//! Everything a driver binding's test suite needs around the tests
//! themselves: finding the freshly built artifact so tests run against the
//! just-built library, reading the developer's connection string from
//! `tmp/setup.cfg`, printing driver/environment diagnostics, and assembling
//! runnable suites from a named-test registry.

pub mod diagnostics;
pub mod error;
pub mod locator;
pub mod logging;
pub mod setup;
pub mod suite;

// Re-export the common entry points
pub use diagnostics::{print_driver_info, DriverConnection, DriverModule};
pub use error::{or_exit, Error, Result};
pub use locator::{find_built_library, ApiVersion};
pub use setup::{load_setup_connection_string, load_setup_connection_string_from};
pub use suite::{SuiteReport, TestSuite};
