//! Run configuration.
//! Turns the command-line arguments into a checked [`Config`].

use clap::ValueEnum;
use log::debug;
use regex::Regex;
use std::path::{Component, Path, PathBuf};

use crate::cli::Args;
use crate::constants::{
    DEFAULT_FILE_PERMS, DEFAULT_TEMPLATE, DIR_SEARCH_PERMS, MACRO_END, MACRO_START, MAX_PERMS,
};
use crate::error::{Error, Result};
use crate::template::TemplateSource;

/// Program names must start with a letter.
const PROG_NAME_PATTERN: &str = r"^[a-zA-Z][-_.a-zA-Z0-9]*$";

/// What to do with the target directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Create the program directory and populate it with the standard files
    Create,
    /// Check that the directory exists and that the standard files are all present
    Check,
    /// Add any missing standard files to an existing directory
    Fix,
}

/// Permissions for created files and directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    pub file: u32,
    pub dir: u32,
}

impl Permissions {
    /// Directories get the file permissions plus search permission.
    pub fn from_file_perms(file: u32) -> Self {
        Self {
            file,
            dir: file | DIR_SEARCH_PERMS,
        }
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::from_file_perms(DEFAULT_FILE_PERMS)
    }
}

/// Everything a run needs to know.
#[derive(Debug, Clone)]
pub struct Config {
    pub action: Action,
    pub target: PathBuf,
    pub prog_name: String,
    pub template: TemplateSource,
    pub perms: Permissions,
    pub check_perms: bool,
    pub report_all: bool,
    pub macro_start: String,
    pub macro_end: String,
}

impl Config {
    /// A configuration with default settings for the built-in template.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the target does not end in a valid program name
    pub fn new(action: Action, target: impl Into<PathBuf>) -> Result<Self> {
        let target = target.into();
        let prog_name = prog_name_from(&target)?;
        Ok(Self {
            action,
            target,
            prog_name,
            template: TemplateSource::Embedded(DEFAULT_TEMPLATE.to_string()),
            perms: Permissions::default(),
            check_perms: false,
            report_all: false,
            macro_start: MACRO_START.to_string(),
            macro_end: MACRO_END.to_string(),
        })
    }

    /// Builds and validates the configuration from the command line.
    ///
    /// # Errors
    /// * `Error::ConfigError` for inconsistent or out-of-range values
    /// * `Error::TemplateError` if the template can't be found
    /// * `Error::TargetExistsError` / `Error::TargetMissingError` if the target
    ///   directory is not in the state the action needs
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = Self::new(args.action(), &args.target)?;

        if let Some(dir) = &args.template_dir {
            config.template = TemplateSource::FileSystem(dir.clone());
        }
        config.perms = Permissions::from_file_perms(args.permissions);
        if let Some(dir_perms) = args.dir_permissions {
            config.perms.dir = dir_perms;
        }
        config.check_perms = args.check_permissions;
        config.report_all = args.report_missing_optional_files;
        config.macro_start = args.macro_start.clone();
        config.macro_end = args.macro_end.clone();

        config.validate()?;
        debug!("Configuration: {:?}", config);
        Ok(config)
    }

    /// Checks the settings against each other and against the file system.
    pub fn validate(&self) -> Result<()> {
        for perms in [self.perms.file, self.perms.dir] {
            if perms > MAX_PERMS {
                return Err(Error::ConfigError(format!(
                    "permissions {perms:o} are out of range (the maximum is {MAX_PERMS:o})"
                )));
            }
        }

        if self.report_all && self.action == Action::Create {
            return Err(Error::ConfigError(
                "you have asked for missing optional files to be reported \
                 but the action to be performed is still to create the directory"
                    .to_string(),
            ));
        }

        self.template.validate()?;

        let target = self.target.display().to_string();
        match self.action {
            Action::Create if self.target.exists() => Err(Error::TargetExistsError { target }),
            Action::Check | Action::Fix if !self.target.is_dir() => {
                Err(Error::TargetMissingError { target })
            }
            _ => Ok(()),
        }
    }
}

/// Resolves `.` and `..` without touching the file system.
///
/// A `..` removes the name before it; one with nothing to remove is kept.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }
    parts.iter().collect()
}

/// Takes the program name from the last part of the cleaned target path.
///
/// # Errors
/// * `Error::ConfigError` if the last part is missing or is not a valid name
pub fn prog_name_from(target: &Path) -> Result<String> {
    let name = match clean_path(target).components().next_back() {
        Some(Component::Normal(name)) => name.to_string_lossy().into_owned(),
        _ => {
            return Err(Error::ConfigError(format!(
                "bad name - the last part of the path ('{}') is not a name",
                target.display()
            )))
        }
    };

    let pattern = Regex::new(PROG_NAME_PATTERN).map_err(|e| Error::InternalError(e.to_string()))?;
    if !pattern.is_match(&name) {
        return Err(Error::ConfigError(format!(
            "bad name '{name}' - it should start with a letter followed by zero or more \
             letters, digits, '.', '-' or '_'"
        )));
    }
    Ok(name)
}
