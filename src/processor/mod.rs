//! Walking a template and acting on each entry.
//!
//! The walk visits the template root first and every directory before its
//! contents. What happens to each entry is up to the [`Strategy`]: the
//! walker only turns nodes into entries and reports entries it can't make
//! sense of.

use indexmap::IndexMap;
use log::trace;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::checks::ContentCheck;
use crate::error::{Error, Result};
use crate::status::Report;
use crate::template::{Template, TemplateEntry, TemplateNode};

pub mod check;
pub mod collect;
pub mod create;
pub mod fix;

pub use check::Checker;
pub use collect::CheckCollector;
pub use create::Creator;
pub use fix::Fixer;

/// Something done to every entry of a template.
pub trait Strategy {
    /// Handles one entry. Problems are written to the report; they don't
    /// stop the walk.
    fn visit(&mut self, template: &Template, entry: &TemplateEntry, report: &mut Report<'_>);

    /// Handles a node that could not be made into an entry. It fails the run
    /// unless the strategy knows it has been reported already.
    fn reject(&mut self, node: &TemplateNode, error: Error, report: &mut Report<'_>) {
        trace!("{}: rejected", node.path);
        report.failure(error);
    }
}

/// Walks the whole template, handing each entry to `strategy`.
///
/// An entry that can't be interpreted (a badly named check file, say) goes
/// to [`Strategy::reject`] and the walk goes on.
///
/// # Errors
/// * `Error::WalkError` if the template tree itself can't be traversed.
///   Entries before the failure have already been visited.
pub fn walk<S: Strategy + ?Sized>(
    template: &Template,
    strategy: &mut S,
    report: &mut Report<'_>,
) -> Result<()> {
    for node in template.source().nodes() {
        let node = node?;
        trace!("Template file: {:?}", node.path);
        match template.entry(&node) {
            Ok(entry) => strategy.visit(template, &entry, report),
            Err(e) => strategy.reject(&node, e, report),
        }
    }
    Ok(())
}

/// The content checks to run, by target file, in the order they were found.
#[derive(Debug, Default)]
pub struct CheckRegistry {
    checks: IndexMap<PathBuf, Vec<ContentCheck>>,
}

impl CheckRegistry {
    pub fn add(&mut self, target: PathBuf, check: ContentCheck) {
        self.checks.entry(target).or_default().push(check);
    }

    /// The checks for `target`; empty if there are none.
    pub fn checks_for(&self, target: &Path) -> &[ContentCheck] {
        self.checks.get(target).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of target files with at least one check.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

/// Why an entry is not acted on, if it isn't.
pub(crate) fn skip_reason(entry: &TemplateEntry) -> Option<&'static str> {
    if entry.is_template_root {
        Some("is the template dir")
    } else if entry.is_check_descriptor() {
        Some("is a check file")
    } else {
        None
    }
}

pub(crate) fn log_skip(entry: &TemplateEntry, reason: &str) {
    trace!("{}: ** Skipping ** - {}", entry.template_path, reason);
}

#[cfg(unix)]
pub(crate) fn make_dir(path: &Path, mode: u32, recursive: bool) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new()
        .recursive(recursive)
        .mode(mode)
        .create(path)
}

#[cfg(not(unix))]
pub(crate) fn make_dir(path: &Path, _mode: u32, recursive: bool) -> io::Result<()> {
    fs::DirBuilder::new().recursive(recursive).create(path)
}

/// Writes a file that must not already exist.
pub(crate) fn write_new_file(path: &Path, content: &[u8], mode: u32) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    options.open(path)?.write_all(content)
}

/// The permission bits of a file, where the platform has them.
pub(crate) fn mode_of(metadata: &fs::Metadata) -> Option<u32> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(metadata.permissions().mode() & 0o777)
    }
    #[cfg(not(unix))]
    {
        let _ = metadata;
        None
    }
}
