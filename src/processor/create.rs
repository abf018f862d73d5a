//! Creating the target directory from the template.

use log::debug;
use std::path::Path;

use super::{log_skip, make_dir, skip_reason, write_new_file, Strategy};
use crate::config::Permissions;
use crate::status::Report;
use crate::template::{Template, TemplateEntry};

/// Creates each directory and file of the template under the target.
#[derive(Debug, Clone, Copy)]
pub struct Creator {
    perms: Permissions,
}

impl Creator {
    pub fn new(perms: Permissions) -> Self {
        Self { perms }
    }

    /// Makes the target directory itself, with any missing parents.
    ///
    /// Returns false (having reported why) if it could not be made.
    pub fn create_root(&self, root: &Path, report: &mut Report<'_>) -> bool {
        debug!("Making the program directory {:?}", root);
        match make_dir(root, self.perms.dir, true) {
            Ok(()) => true,
            Err(e) => {
                report.failure(format!(
                    "Cannot create the program directory ({root:?}): {e}"
                ));
                false
            }
        }
    }
}

impl Strategy for Creator {
    fn visit(&mut self, template: &Template, entry: &TemplateEntry, report: &mut Report<'_>) {
        if let Some(reason) = skip_reason(entry) {
            log_skip(entry, reason);
            return;
        }
        let target = &entry.target_path;

        if entry.is_dir {
            if let Err(e) = make_dir(target, self.perms.dir, false) {
                report.failure(format!("Can't create directory {target:?}: {e}"));
            }
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
            Ok(()) => debug!("Created {:?}", target),
            Err(e) => report.failure(format!("Can't create {target:?}: {e}")),
        }
    }
}
