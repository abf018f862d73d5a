//! Common constants used throughout progdir.

/// Marks a template file whose content goes through macro substitution
pub const GENERATE_SUFFIX: &str = "--Generate";

/// Marks a template file whose target may be absent
pub const OPTIONAL_SUFFIX: &str = "--Optional";

/// Marks a template file that describes a check rather than a target file
pub const CHECK_SUFFIX: &str = "--Check";

/// Name of the embedded template used when no template directory is given
pub const DEFAULT_TEMPLATE: &str = "Rust";

/// Permissions used for created files unless overridden
pub const DEFAULT_FILE_PERMS: u32 = 0o664;

/// Search (execute) bits added to the file permissions for directories
pub const DIR_SEARCH_PERMS: u32 = 0o111;

/// Largest permission value accepted on the command line
pub const MAX_PERMS: u32 = 0o777;

/// Default opening delimiter of a macro name
pub const MACRO_START: &str = "${";

/// Default closing delimiter of a macro name
pub const MACRO_END: &str = "}";

/// How much of a target file to show when a check fails
pub const MAX_CONTENT_TO_SHOW: usize = 40;
