//! Building runnable suites from a named-test registry
//!
//! Driver test modules declare their tests as an explicit table of
//! `("test_...", fn)` pairs rather than relying on reflection. The builder
//! selects either one named test or every `test_`-prefixed entry, and every
//! case runs against the same shared context (typically the connection
//! string and options the suite was configured with).

use tracing::debug;

use crate::error::{Error, Result};

const TEST_PREFIX: &str = "test_";

/// A test function taking the suite's shared context.
pub type TestFn<C> = fn(&C) -> Result<()>;

/// One selected test case.
#[derive(Debug)]
pub struct TestCase<C> {
    name: String,
    func: TestFn<C>,
}

impl<C> TestCase<C> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Outcome of running a suite.
#[derive(Debug, Default)]
pub struct SuiteReport {
    pub passed: usize,
    /// Failed case names with their error messages.
    pub failed: Vec<(String, String)>,
}

impl SuiteReport {
    pub fn success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A runnable collection of test cases sharing one context value.
#[derive(Debug)]
pub struct TestSuite<C> {
    context: C,
    cases: Vec<TestCase<C>>,
}

impl<C> TestSuite<C> {
    /// Build a suite from `registry`.
    ///
    /// With `name` given, the suite holds exactly that test; a missing
    /// `test_` prefix is supplied, so `"a"` selects `test_a`. An unknown
    /// name is [`Error::TestNotFound`]. Without a name, every registry
    /// entry whose name starts with `test_` is selected, in registry order.
    pub fn build(
        registry: &[(&'static str, TestFn<C>)],
        name: Option<&str>,
        context: C,
    ) -> Result<Self> {
        let cases = match name {
            Some(name) => {
                let name = normalize_test_name(name);
                let func = registry
                    .iter()
                    .find(|(entry, _)| *entry == name)
                    .map(|(_, func)| *func)
                    .ok_or_else(|| Error::TestNotFound(name.clone()))?;
                vec![TestCase { name, func }]
            }
            None => registry
                .iter()
                .filter(|(entry, _)| entry.starts_with(TEST_PREFIX))
                .map(|(entry, func)| TestCase {
                    name: (*entry).to_owned(),
                    func: *func,
                })
                .collect(),
        };

        Ok(Self { context, cases })
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Names of the selected cases, in execution order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(|case| case.name.as_str())
    }

    /// Run every case against the shared context.
    pub fn run(&self) -> SuiteReport {
        let mut report = SuiteReport::default();
        for case in &self.cases {
            debug!(test = case.name.as_str(), "running");
            match (case.func)(&self.context) {
                Ok(()) => report.passed += 1,
                Err(e) => report.failed.push((case.name.clone(), e.to_string())),
            }
        }
        report
    }
}

fn normalize_test_name(name: &str) -> String {
    if name.starts_with(TEST_PREFIX) {
        name.to_owned()
    } else {
        format!("{TEST_PREFIX}{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Ctx {
        fail_b: bool,
    }

    fn test_a(_ctx: &Ctx) -> Result<()> {
        Ok(())
    }

    fn test_b(ctx: &Ctx) -> Result<()> {
        if ctx.fail_b {
            return Err(Error::Driver("b failed".into()));
        }
        Ok(())
    }

    fn helper(_ctx: &Ctx) -> Result<()> {
        Ok(())
    }

    fn registry() -> Vec<(&'static str, TestFn<Ctx>)> {
        vec![("test_a", test_a), ("test_b", test_b), ("helper", helper)]
    }

    #[test]
    fn no_name_selects_every_prefixed_test() {
        let suite =
            TestSuite::build(&registry(), None, Ctx { fail_b: false }).expect("build");
        assert_eq!(suite.len(), 2);
        assert_eq!(suite.names().collect::<Vec<_>>(), ["test_a", "test_b"]);
    }

    #[test]
    fn bare_name_gets_the_prefix() {
        let suite =
            TestSuite::build(&registry(), Some("a"), Ctx { fail_b: false }).expect("build");
        assert_eq!(suite.names().collect::<Vec<_>>(), ["test_a"]);
    }

    #[test]
    fn prefixed_name_is_used_as_is() {
        let suite = TestSuite::build(&registry(), Some("test_b"), Ctx { fail_b: false })
            .expect("build");
        assert_eq!(suite.names().collect::<Vec<_>>(), ["test_b"]);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = TestSuite::build(&registry(), Some("missing"), Ctx { fail_b: false })
            .expect_err("unknown test");
        match err {
            Error::TestNotFound(name) => assert_eq!(name, "test_missing"),
            other => panic!("expected TestNotFound, got {other:?}"),
        }
    }

    #[test]
    fn run_reports_failures_by_name() {
        let suite =
            TestSuite::build(&registry(), None, Ctx { fail_b: true }).expect("build");
        let report = suite.run();
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "test_b");
        assert!(report.failed[0].1.contains("b failed"));
        assert!(!report.success());
    }
}
