//! Repairing an existing target directory by adding what is missing.

use log::{debug, trace};
use std::fs;
use std::io;

use super::{log_skip, make_dir, skip_reason, write_new_file, Strategy};
use crate::config::Permissions;
use crate::status::Report;
use crate::template::{Template, TemplateEntry};

/// Creates the directories and files of the template that are missing from
/// the target. Nothing that exists is changed.
#[derive(Debug, Clone, Copy)]
pub struct Fixer {
    perms: Permissions,
    create_optional: bool,
}

impl Fixer {
    /// # Arguments
    /// * `perms` - Permissions for anything created
    /// * `create_optional` - Whether missing optional files are created too
    pub fn new(perms: Permissions, create_optional: bool) -> Self {
        Self {
            perms,
            create_optional,
        }
    }

    fn fix_dir(&self, entry: &TemplateEntry, report: &mut Report<'_>) {
        let target = &entry.target_path;
        match fs::metadata(target) {
            Ok(metadata) if metadata.is_dir() => trace!("{:?}: already there", target),
            Ok(_) => report.failure(format!("{target:?} is not a directory")),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                match make_dir(target, self.perms.dir, false) {
                    Ok(()) => report.notice(format!("created: {target:?}")),
                    Err(e) => report.failure(format!("Can't create directory {target:?}: {e}")),
                }
            }
            Err(e) => report.failure(format!("Cannot check the directory ({target:?}):\n\t{e}")),
        }
    }

    fn fix_file(&self, template: &Template, entry: &TemplateEntry, report: &mut Report<'_>) {
        let target = &entry.target_path;
        match fs::metadata(target) {
            Ok(metadata) if metadata.is_file() => {
                trace!("{:?}: already there", target);
                return;
            }
            Ok(_) => {
                report.failure(format!("{target:?} is not a regular file"));
                return;
            }
            Err(e) if e.kind() != io::ErrorKind::NotFound => {
                report.failure(format!("Cannot check the file ({target:?}):\n\t{e}"));
                return;
            }
            Err(_) => {}
        }

        if entry.is_optional && !self.create_optional {
            debug!("{:?}: missing but optional, not created", target);
            return;
        }

        let content = match template.content(entry) {
            Ok(content) => content,
            Err(e) => {
                report.failure(e);
                return;
            }
        };
        match write_new_file(target, &content, self.perms.file) {
            Ok(()) => report.notice(format!("created: {target:?}")),
            Err(e) => report.failure(format!("Can't create {target:?}: {e}")),
        }
    }
}

impl Strategy for Fixer {
    fn visit(&mut self, template: &Template, entry: &TemplateEntry, report: &mut Report<'_>) {
        if let Some(reason) = skip_reason(entry) {
            log_skip(entry, reason);
            return;
        }
        if entry.is_dir {
            self.fix_dir(entry, report);
        } else {
            self.fix_file(template, entry, report);
        }
    }
}
