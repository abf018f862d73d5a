//! Decoding of the directives carried in template file names.
//!
//! A template file name may end with any of these suffixes, which are
//! looked for (and stripped) in this order:
//!
//! 1. `--Generate` - the content goes through macro substitution
//! 2. `--Optional` - the target file may be absent
//! 3. `--Check` - the file describes a check on another file. The name
//!    before it may end with a `.<digits>` id, which is dropped, and must
//!    then end with one of the check-type suffixes (`.contains` etc). What
//!    remains is the name of the file to be checked.
//!
//! So `xxx.contains.1--Check--Generate` is a check on `xxx` whose pattern
//! is macro-substituted before use.

use crate::checks::{split_check_type, CheckKind};
use crate::constants::{CHECK_SUFFIX, GENERATE_SUFFIX, OPTIONAL_SUFFIX};
use crate::error::{Error, Result};

/// The check described by a check file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckDirective {
    pub kind: CheckKind,
    /// The `.<digits>` id, only there to keep check file names distinct
    pub id: Option<String>,
}

/// The directives decoded from a template file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    /// The template path with every directive suffix removed
    pub base: String,
    pub generated: bool,
    pub optional: bool,
    pub check: Option<CheckDirective>,
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Generate,
    Optional,
    Check,
}

const RULES: [(&str, Rule); 3] = [
    (GENERATE_SUFFIX, Rule::Generate),
    (OPTIONAL_SUFFIX, Rule::Optional),
    (CHECK_SUFFIX, Rule::Check),
];

/// Decodes the directives in the name of a template file.
///
/// # Arguments
/// * `path` - Slash-separated path of a (non-directory) template entry
///
/// # Errors
/// * `Error::CheckTypeError` if a check file has no known check-type suffix
/// * `Error::CheckTargetError` if nothing is left to name the checked file
pub fn parse(path: &str) -> Result<Directives> {
    let mut directives = Directives::default();
    let mut name = path;

    for (suffix, rule) in RULES {
        let Some(rest) = name.strip_suffix(suffix) else {
            continue;
        };
        name = rest;

        match rule {
            Rule::Generate => directives.generated = true,
            Rule::Optional => directives.optional = true,
            Rule::Check => {
                let (rest, id) = split_id(name);
                let (check_type, rest) = split_check_type(rest).ok_or_else(|| {
                    Error::CheckTypeError {
                        path: path.to_string(),
                    }
                })?;
                if rest.is_empty() || rest.ends_with('/') {
                    return Err(Error::CheckTargetError {
                        path: path.to_string(),
                    });
                }
                directives.check = Some(CheckDirective {
                    kind: check_type.kind,
                    id,
                });
                name = rest;
            }
        }
    }

    directives.base = name.to_string();
    Ok(directives)
}

// strips a trailing `.<digits>`
fn split_id(name: &str) -> (&str, Option<String>) {
    match name.rsplit_once('.') {
        Some((head, id)) if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) => {
            (head, Some(id.to_string()))
        }
        _ => (name, None),
    }
}
