//! Command-line interface implementation for progdir.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::fmt::Write;
use std::path::PathBuf;

use crate::checks::{CheckKind, CHECK_TYPES};
use crate::config::Action;
use crate::constants::{
    CHECK_SUFFIX, DIR_SEARCH_PERMS, GENERATE_SUFFIX, MACRO_END, MACRO_START, MAX_PERMS,
    OPTIONAL_SUFFIX,
};
use crate::macros::AVAILABLE_MACROS;

/// Command-line arguments structure for progdir.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "progdir: populate a directory with the files for a skeleton program, \
             or check that an existing one still has them",
    long_about = None,
    after_long_help = notes()
)]
pub struct Args {
    /// The program directory to create, check or fix.
    /// The last part of the path is the program name
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// The action to perform
    #[arg(short, long, value_enum, default_value_t = Action::Create)]
    pub action: Action,

    /// Check that all the standard files are present (same as --action check)
    #[arg(long, conflicts_with_all = ["action", "fix"])]
    pub check: bool,

    /// Create any of the standard files that are missing (same as --action fix)
    #[arg(long, conflicts_with = "action")]
    pub fix: bool,

    /// Template directory to use instead of the built-in template
    #[arg(short, long, value_name = "DIR", visible_alias = "template")]
    pub template_dir: Option<PathBuf>,

    /// Permissions (octal) to create files with, subject to the umask
    #[arg(short, long, value_name = "OCTAL", value_parser = parse_perms, default_value = "664")]
    pub permissions: u32,

    /// Permissions (octal) to create directories with.
    /// Defaults to the file permissions with search permission added
    #[arg(long, value_name = "OCTAL", value_parser = parse_perms)]
    pub dir_permissions: Option<u32>,

    /// Check that the permissions of files and directories match the given values
    #[arg(long, visible_alias = "chk-perms")]
    pub check_permissions: bool,

    /// Report optional files missing from the target instead of silently ignoring them
    #[arg(long, visible_alias = "report-all-files")]
    pub report_missing_optional_files: bool,

    /// Text that starts a macro name in generated files
    #[arg(long, value_name = "TEXT", default_value = MACRO_START)]
    pub macro_start: String,

    /// Text that ends a macro name in generated files
    #[arg(long, value_name = "TEXT", default_value = MACRO_END)]
    pub macro_end: String,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// The action, taking the --check and --fix shortcuts into account.
    pub fn action(&self) -> Action {
        if self.check {
            Action::Check
        } else if self.fix {
            Action::Fix
        } else {
            self.action
        }
    }
}

/// Parses an octal permission value such as `644` or `0o644`.
pub fn parse_perms(s: &str) -> Result<u32, String> {
    let digits = s.strip_prefix("0o").unwrap_or(s);
    let perms =
        u32::from_str_radix(digits, 8).map_err(|e| format!("'{s}' is not an octal number: {e}"))?;
    if perms > MAX_PERMS {
        return Err(format!("{perms:o} is larger than {MAX_PERMS:o}"));
    }
    Ok(perms)
}

/// The notes shown after `--help`.
pub fn notes() -> String {
    let mut notes = String::new();

    notes.push_str(
        "Template directories:\n  \
         You can provide your own template directory in place of the built-in one \
         (see --template-dir). A minimal template directory simply contains the files \
         that you want copied into the target directory. You can also add files that \
         generate checks on the content of the resulting files, and files that are \
         not copied as they are but have values substituted at run time.\n\n",
    );

    let _ = write!(
        notes,
        "Generated files:\n  \
         Add the suffix '{GENERATE_SUFFIX}' to a template file name to pass its \
         content through macro substitution. The created file has the name of the \
         template file without the suffix. A macro name is written between '{MACRO_START}' \
         and '{MACRO_END}' (see --macro-start and --macro-end). The macros are:\n"
    );
    for info in AVAILABLE_MACROS {
        let _ = writeln!(notes, "  - {} : {}", info.name, info.description);
    }

    let _ = write!(
        notes,
        "\nOptional files:\n  \
         Add the suffix '{OPTIONAL_SUFFIX}' to a template file name (before any \
         '{GENERATE_SUFFIX}') if the file may be removed from the target directory. \
         A check will not complain if it is missing.\n\n\
         Check files:\n  \
         To check the content of a file, add an entry to the template directory with \
         the name of the file to check, a check-type suffix, an optional numeric ID \
         (so that there can be several checks of the same type) and '{CHECK_SUFFIX}'. \
         No file is created for it. The check types are:\n"
    );
    for ct in CHECK_TYPES {
        let _ = writeln!(notes, "  - {} : {}", ct.suffix, ct.description);
    }

    if let Some(contains) = CheckKind::Contains.info() {
        let _ = write!(
            notes,
            "\n  For example 'xxx{sfx}{CHECK_SUFFIX}' checks that {desc}; the target \
             file is 'xxx'. 'xxx{sfx}.1{CHECK_SUFFIX}{GENERATE_SUFFIX}' adds a second \
             such check whose content has macros substituted first.\n",
            sfx = contains.suffix,
            desc = contains.description,
        );
    }

    let _ = write!(
        notes,
        "\nPermissions:\n  \
         Directories are created with the file permissions plus search ({DIR_SEARCH_PERMS:03o}) \
         permission unless --dir-permissions is given. Permission mismatches found by \
         --check-permissions are reported but do not change the exit status.\n"
    );

    notes
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
