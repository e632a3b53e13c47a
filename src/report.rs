//! Verdict output and exit status.
//!
//! Exactly one line is written: `OK: ...` to stdout on success, `FAIL: ...`
//! to stderr otherwise. Exit status is 0 for healthy and 1 for everything else.

use std::io::{self, Write};
use std::process::ExitCode;

use crate::error::CheckError;

/// Exit status for a healthy indexer
pub const EXIT_HEALTHY: u8 = 0;

/// Exit status for any failure
pub const EXIT_UNHEALTHY: u8 = 1;

/// Write the verdict line for `outcome` and return the exit status
pub fn write_verdict<O, E>(
    outcome: &Result<i64, CheckError>,
    stdout: &mut O,
    stderr: &mut E,
) -> io::Result<u8>
where
    O: Write,
    E: Write,
{
    match outcome {
        Ok(delay) => {
            writeln!(stdout, "OK: Indexer delay is {} seconds.", delay)?;
            stdout.flush()?;
            Ok(EXIT_HEALTHY)
        }
        Err(err) => {
            writeln!(stderr, "FAIL: {}", err)?;
            stderr.flush()?;
            Ok(EXIT_UNHEALTHY)
        }
    }
}

/// Report `outcome` on the process's stdout/stderr and convert it to an exit code
pub fn report(outcome: &Result<i64, CheckError>) -> ExitCode {
    let status = write_verdict(outcome, &mut io::stdout().lock(), &mut io::stderr().lock())
        // Nowhere left to report a broken pipe; the status still carries the verdict.
        .unwrap_or_else(|_| match outcome {
            Ok(_) => EXIT_HEALTHY,
            Err(_) => EXIT_UNHEALTHY,
        });
    ExitCode::from(status)
}
