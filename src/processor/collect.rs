//! First pass of a check: turn every check file into a content check.

use log::debug;

use super::{log_skip, CheckRegistry, Strategy};
use crate::checks::{CheckKind, ContentCheck};
use crate::error::{Error, Result};
use crate::status::Report;
use crate::template::{Template, TemplateEntry};

/// Builds the [`CheckRegistry`] from the check files in a template.
#[derive(Debug, Default)]
pub struct CheckCollector {
    registry: CheckRegistry,
}

impl CheckCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_registry(self) -> CheckRegistry {
        self.registry
    }

    fn make_check(
        &self,
        template: &Template,
        entry: &TemplateEntry,
        kind: CheckKind,
    ) -> Result<ContentCheck> {
        let pattern = template.content(entry)?;
        ContentCheck::new(kind, &pattern).map_err(|source| Error::CheckPatternError {
            path: entry.template_path.clone(),
            source,
        })
    }
}

impl Strategy for CheckCollector {
    fn visit(&mut self, template: &Template, entry: &TemplateEntry, report: &mut Report<'_>) {
        let Some(check) = &entry.check else {
            log_skip(entry, "not a check file");
            return;
        };
        debug!(
            "{}: a {:?} check on {:?}",
            entry.template_path, check.kind, entry.target_path
        );

        match self.make_check(template, entry, check.kind) {
            Ok(content_check) => self
                .registry
                .add(entry.target_path.clone(), content_check),
            Err(e) => report.failure(e),
        }
    }
}
