//! Top-level orchestration: set up the template and run the chosen action.

use log::{debug, info};
use std::io::Write;

use crate::checks::verify_check_types;
use crate::config::{Action, Config};
use crate::error::{Error, Result};
use crate::macros::MacroCache;
use crate::processor::{walk, CheckCollector, Checker, Creator, Fixer};
use crate::status::{ExitStatus, Report};
use crate::template::Template;

/// Runs the configured action, writing diagnostics to `out`.
///
/// # Returns
/// * `Result<ExitStatus>` - The status to exit with; non-zero if any check
///   or creation step failed
///
/// # Errors
/// Only problems that stop the run before any walk starts: inconsistent
/// built-in tables, bad macro delimiters, a missing template or a target
/// directory in the wrong state for the action.
pub fn run<'a>(config: &Config, out: impl Write + 'a) -> Result<ExitStatus> {
    verify_check_types()?;

    let mut macros = MacroCache::new(&config.macro_start, &config.macro_end)?;
    macros.add_program_macros(&config.prog_name);

    config.template.validate()?;
    info!("Using the {}", config.template);
    let template = Template::new(config.template.clone(), &config.target, macros);

    let mut report = Report::new(out);
    match config.action {
        Action::Create => create_all(&template, config, &mut report)?,
        Action::Check => check_all(&template, config, &mut report),
        Action::Fix => fix_all(&template, config, &mut report)?,
    }
    Ok(report.status())
}

/// Creates the target directory and everything the template puts in it.
fn create_all(template: &Template, config: &Config, report: &mut Report<'_>) -> Result<()> {
    let root = template.target_root();
    if root.exists() {
        return Err(Error::TargetExistsError {
            target: root.display().to_string(),
        });
    }

    let mut creator = Creator::new(config.perms);
    if !creator.create_root(root, report) {
        return Ok(());
    }

    debug!("Walking the template directory");
    if let Err(e) = walk(template, &mut creator, report) {
        report.abort(e);
    }
    Ok(())
}

/// Collects the content checks, then checks the target directory against
/// the template.
fn check_all(template: &Template, config: &Config, report: &mut Report<'_>) {
    let mut collector = CheckCollector::new();
    debug!("Collecting the file checks");
    if let Err(e) = walk(template, &mut collector, report) {
        report.abort(e);
        return;
    }
    let registry = collector.into_registry();
    debug!("{} file(s) have content checks", registry.len());

    let mut checker = Checker::new(&registry, config.perms)
        .check_perms(config.check_perms)
        .report_all(config.report_all);
    if !checker.check_dir(template.target_root(), report) {
        return;
    }

    debug!("Walking the template directory");
    if let Err(e) = walk(template, &mut checker, report) {
        report.abort(e);
    }
}

/// Adds whatever is missing from an existing target directory.
fn fix_all(template: &Template, config: &Config, report: &mut Report<'_>) -> Result<()> {
    let root = template.target_root();
    if !root.is_dir() {
        return Err(Error::TargetMissingError {
            target: root.display().to_string(),
        });
    }

    let mut fixer = Fixer::new(config.perms, config.report_all);
    debug!("Walking the template directory");
    if let Err(e) = walk(template, &mut fixer, report) {
        report.abort(e);
    }
    Ok(())
}
