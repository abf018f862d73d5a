//! Second pass of a check: compare the target directory with the template.

use log::debug;
use std::fs;
use std::io;
use std::path::Path;

use super::{log_skip, mode_of, skip_reason, CheckRegistry, Strategy};
use crate::config::Permissions;
use crate::error::Error;
use crate::status::Report;
use crate::template::{Template, TemplateEntry, TemplateNode};

/// Checks that each template entry is present in the target and that every
/// target file passes its content checks.
///
/// Permission mismatches are reported but never fail the run. Template
/// names that can't be parsed are left to the [`CheckCollector`] pass that
/// built the registry, which has already reported them.
///
/// [`CheckCollector`]: super::CheckCollector
#[derive(Debug)]
pub struct Checker<'r> {
    registry: &'r CheckRegistry,
    perms: Permissions,
    check_perms: bool,
    report_all: bool,
}

impl<'r> Checker<'r> {
    pub fn new(registry: &'r CheckRegistry, perms: Permissions) -> Self {
        Self {
            registry,
            perms,
            check_perms: false,
            report_all: false,
        }
    }

    /// Also compare permissions with the configured ones.
    pub fn check_perms(mut self, check_perms: bool) -> Self {
        self.check_perms = check_perms;
        self
    }

    /// Mention optional files that are missing rather than ignoring them.
    pub fn report_all(mut self, report_all: bool) -> Self {
        self.report_all = report_all;
        self
    }

    /// Checks that `path` is a directory with the expected permissions.
    ///
    /// Returns false if the path does not refer to a directory.
    pub fn check_dir(&self, path: &Path, report: &mut Report<'_>) -> bool {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                report.failure(format!("directory {path:?} does not exist"));
                return false;
            }
            Err(e) => {
                report.failure(format!("Cannot check the directory ({path:?}):\n\t{e}"));
                return false;
            }
        };
        if !metadata.is_dir() {
            report.failure(format!("{path:?} is not a directory"));
            return false;
        }
        debug!("{:?}: is a directory", path);

        self.compare_perms("Directory", path, &metadata, self.perms.dir, report);
        true
    }

    /// Checks that the target of `entry` is a readable regular file that
    /// passes every check registered for it. The first failing check ends
    /// the checking of that file.
    pub fn check_file(&self, entry: &TemplateEntry, report: &mut Report<'_>) {
        let path = entry.target_path.as_path();

        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if !entry.is_optional {
                    report.failure(format!("{path:?} does not exist"));
                } else if self.report_all {
                    report.notice(format!("{path:?} does not exist (it is optional)"));
                } else {
                    debug!("{:?}: file does not exist but is optional", path);
                }
                return;
            }
            Err(e) => {
                report.failure(format!("Cannot check the file ({path:?}):\n\t{e}"));
                return;
            }
        };
        if !metadata.is_file() {
            report.failure(format!("{path:?} is not a regular file"));
            return;
        }

        self.compare_perms("File", path, &metadata, self.perms.file, report);

        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) => {
                report.failure(format!("File: {path:?} can't be read: {e}"));
                return;
            }
        };

        for check in self.registry.checks_for(path) {
            if let Some(message) = check.diagnose(path, &content) {
                report.failure(message);
                return;
            }
        }
        debug!("{:?}: contents OK", path);
    }

    fn compare_perms(
        &self,
        what: &str,
        path: &Path,
        metadata: &fs::Metadata,
        expected: u32,
        report: &mut Report<'_>,
    ) {
        if !self.check_perms {
            return;
        }
        if let Some(actual) = mode_of(metadata) {
            if actual != expected {
                report.notice(format!(
                    "{what}: {path:?} has unexpected permissions\n\
                     \texpected permissions {expected:04o}\n\
                     \t  actual permissions {actual:04o}"
                ));
            }
        }
    }
}

impl Strategy for Checker<'_> {
    fn visit(&mut self, _template: &Template, entry: &TemplateEntry, report: &mut Report<'_>) {
        if let Some(reason) = skip_reason(entry) {
            log_skip(entry, reason);
            return;
        }
        if entry.is_dir {
            self.check_dir(&entry.target_path, report);
        } else {
            self.check_file(entry, report);
        }
    }

    fn reject(&mut self, node: &TemplateNode, error: Error, _report: &mut Report<'_>) {
        debug!("{}: not checked ({})", node.path, error);
    }
}
