//! Printing environment and driver facts for the connection under test
//!
//! Test logs for driver issues are useless without knowing which driver,
//! ODBC version, and unicode configuration they were produced against, so
//! every suite prints this block first.

use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;

/// Connection metadata fields queried from the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoKind {
    OdbcVersion,
    DriverName,
    DriverVersion,
    DriverOdbcVersion,
}

/// SQL type categories whose maximum length is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    Varchar,
    Wvarchar,
    Binary,
}

impl SqlType {
    /// The fixed set of types the printer reports on.
    pub const ALL: [SqlType; 3] = [SqlType::Varchar, SqlType::Wvarchar, SqlType::Binary];

    pub fn name(self) -> &'static str {
        match self {
            SqlType::Varchar => "VARCHAR",
            SqlType::Wvarchar => "WVARCHAR",
            SqlType::Binary => "BINARY",
        }
    }
}

/// One row of a driver's type-info result set, reduced to what the printer
/// needs.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    pub type_name: String,
    pub column_size: Option<u64>,
}

/// Static facts about the loaded driver binding.
pub trait DriverModule {
    /// Binding name as shown in the diagnostics header.
    fn name(&self) -> &str;

    /// Binding version string.
    fn version(&self) -> &str;

    /// Path the binding was loaded from.
    fn module_path(&self) -> &Path;

    /// Version of the interpreter the binding is embedded in.
    fn interpreter_version(&self) -> String;

    /// Width in bytes of the interpreter's unicode character type.
    fn unicode_size(&self) -> usize;

    /// Width in bytes the binding was compiled with for SQLWCHAR.
    fn sqlwchar_size(&self) -> usize;
}

/// Live metadata queries against an open connection.
///
/// Failures are not handled by the printer; they propagate to the caller.
pub trait DriverConnection {
    fn info(&self, kind: InfoKind) -> Result<String>;

    /// Type info for `ty`, or `None` when the driver has no such type.
    fn type_info(&self, ty: SqlType) -> Result<Option<TypeInfo>>;
}

/// Print the diagnostics block to stdout.
pub fn print_driver_info(
    module: &dyn DriverModule,
    cnxn: &dyn DriverConnection,
) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_driver_info(&mut stdout, module, cnxn)
}

pub(crate) fn write_driver_info<W: Write>(
    out: &mut W,
    module: &dyn DriverModule,
    cnxn: &dyn DriverConnection,
) -> Result<()> {
    writeln!(out, "interpreter: {}", module.interpreter_version())?;
    writeln!(
        out,
        "{}:  {} {}",
        module.name(),
        module.version(),
        module.module_path().display()
    )?;
    writeln!(out, "odbc:    {}", cnxn.info(InfoKind::OdbcVersion)?)?;
    writeln!(
        out,
        "driver:  {} {}",
        cnxn.info(InfoKind::DriverName)?,
        cnxn.info(InfoKind::DriverVersion)?
    )?;
    writeln!(
        out,
        "         supports ODBC version {}",
        cnxn.info(InfoKind::DriverOdbcVersion)?
    )?;

    let os = os_info::get();
    writeln!(out, "os:      {}", os.os_type())?;
    writeln!(
        out,
        "unicode: unicode={} SQLWCHAR={}",
        module.unicode_size(),
        module.sqlwchar_size()
    )?;

    for ty in SqlType::ALL {
        match cnxn.type_info(ty)?.and_then(|t| t.column_size) {
            Some(size) => writeln!(out, "Max {} = {}", ty.name(), size)?,
            None => writeln!(out, "Max {} = (not supported)", ty.name())?,
        }
    }

    if cfg!(windows) {
        writeln!(out, "         {}", os.version())?;
    }

    Ok(())
}
