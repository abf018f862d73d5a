//! Run outcome tracking and the diagnostic sink.

use std::fmt::Display;
use std::io::Write;

/// The exit status of a run.
///
/// Once set to a failure by [`ExitStatus::set`] it keeps that value; only
/// [`ExitStatus::force`] can overwrite it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus(i32);

impl ExitStatus {
    pub const SUCCESS: ExitStatus = ExitStatus(0);
    pub const FAILURE: ExitStatus = ExitStatus(1);

    /// Records `code` unless a failure has already been recorded.
    pub fn set(&mut self, code: i32) {
        if self.0 == 0 {
            self.0 = code;
        }
    }

    /// Records `code` whatever was recorded before.
    pub fn force(&mut self, code: i32) {
        self.0 = code;
    }

    pub fn code(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self.0 == 0
    }
}

/// Collects the outcome of a run and writes its diagnostics.
///
/// Diagnostics are meant for the user and go to the supplied writer
/// (stdout from the binary). Write errors on that stream are ignored.
pub struct Report<'a> {
    out: Box<dyn Write + 'a>,
    status: ExitStatus,
}

impl<'a> Report<'a> {
    pub fn new(out: impl Write + 'a) -> Self {
        Self {
            out: Box::new(out),
            status: ExitStatus::SUCCESS,
        }
    }

    /// Prints a problem that fails the run.
    pub fn failure(&mut self, message: impl Display) {
        let _ = writeln!(self.out, "{message}");
        self.status.set(ExitStatus::FAILURE.0);
    }

    /// Prints a problem that does not by itself fail the run.
    pub fn notice(&mut self, message: impl Display) {
        let _ = writeln!(self.out, "{message}");
    }

    /// Prints a problem that stops the run, overwriting any earlier status.
    pub fn abort(&mut self, message: impl Display) {
        let _ = writeln!(self.out, "{message}");
        self.status.force(ExitStatus::FAILURE.0);
    }

    pub fn status(&self) -> ExitStatus {
        self.status
    }
}
