//! Content checks generated from `*--Check` template files.
//!
//! Each check type is identified by a suffix on the check file's name. The
//! content of the check file is the pattern; the resulting [`ContentCheck`]
//! is run against the content of the target file.

use log::trace;
use regex::bytes::Regex;
use std::borrow::Cow;
use std::path::Path;

use crate::constants::MAX_CONTENT_TO_SHOW;
use crate::error::{Error, Result};

/// The kinds of content check a template can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Begins,
    Ends,
    Contains,
    DoesNotContain,
    Matches,
    DoesNotMatch,
}

impl CheckKind {
    /// Every check kind, in the order they are documented.
    pub const ALL: [CheckKind; 6] = [
        CheckKind::Begins,
        CheckKind::Ends,
        CheckKind::Contains,
        CheckKind::DoesNotContain,
        CheckKind::Matches,
        CheckKind::DoesNotMatch,
    ];

    /// Looks up the registered suffix and description for this kind.
    pub fn info(self) -> Option<&'static CheckType> {
        CHECK_TYPES.iter().find(|ct| ct.kind == self)
    }
}

/// A registered check type: the kind, the file-name suffix that selects it,
/// and the description shown in the help notes.
#[derive(Debug)]
pub struct CheckType {
    pub kind: CheckKind,
    pub suffix: &'static str,
    pub description: &'static str,
}

/// The check-type registry.
pub const CHECK_TYPES: &[CheckType] = &[
    CheckType {
        kind: CheckKind::Begins,
        suffix: ".begins",
        description: "the contents of the target file begins with the contents of this file",
    },
    CheckType {
        kind: CheckKind::Ends,
        suffix: ".ends",
        description: "the contents of the target file ends with the contents of this file",
    },
    CheckType {
        kind: CheckKind::Contains,
        suffix: ".contains",
        description: "the contents of this file appear somewhere in the target file",
    },
    CheckType {
        kind: CheckKind::DoesNotContain,
        suffix: ".doesNotContain",
        description: "the contents of this file do not appear anywhere in the target file",
    },
    CheckType {
        kind: CheckKind::Matches,
        suffix: ".matches",
        description: "the contents of this file (as a Regular Expression) \
                      match the contents of the target file",
    },
    CheckType {
        kind: CheckKind::DoesNotMatch,
        suffix: ".doesNotMatch",
        description: "the contents of this file (as a Regular Expression) \
                      do not match the contents of the target file",
    },
];

/// Verifies that every check kind is registered exactly once and that no
/// two registrations share a suffix.
///
/// # Errors
/// * `Error::InternalError` naming the first inconsistency found
pub fn verify_check_types() -> Result<()> {
    for kind in CheckKind::ALL {
        let count = CHECK_TYPES.iter().filter(|ct| ct.kind == kind).count();
        if count != 1 {
            return Err(Error::InternalError(format!(
                "check kind {kind:?} is registered {count} times"
            )));
        }
    }
    for (i, ct) in CHECK_TYPES.iter().enumerate() {
        if CHECK_TYPES[i + 1..].iter().any(|other| other.suffix == ct.suffix) {
            return Err(Error::InternalError(format!(
                "check-type suffix {:?} is registered more than once",
                ct.suffix
            )));
        }
    }
    Ok(())
}

/// Splits a trailing check-type suffix off `name`.
///
/// Returns the matched check type and the remainder of the name. When more
/// than one suffix matches the longest one wins.
pub fn split_check_type(name: &str) -> Option<(&'static CheckType, &str)> {
    CHECK_TYPES
        .iter()
        .filter(|ct| name.ends_with(ct.suffix))
        .max_by_key(|ct| ct.suffix.len())
        .map(|ct| (ct, &name[..name.len() - ct.suffix.len()]))
}

#[derive(Debug, Clone)]
enum Pattern {
    Text(Vec<u8>),
    Regex(Regex),
}

/// A single check on the content of a target file.
#[derive(Debug, Clone)]
pub struct ContentCheck {
    kind: CheckKind,
    pattern: Pattern,
}

impl ContentCheck {
    /// Builds a check of the given kind from the content of a check file.
    ///
    /// For `Matches` and `DoesNotMatch` the pattern is compiled here, so a
    /// bad expression is caught before any target file is looked at.
    pub fn new(kind: CheckKind, pattern: &[u8]) -> std::result::Result<Self, regex::Error> {
        let pattern = match kind {
            CheckKind::Matches | CheckKind::DoesNotMatch => {
                Pattern::Regex(Regex::new(&String::from_utf8_lossy(pattern))?)
            }
            _ => Pattern::Text(pattern.to_vec()),
        };
        Ok(Self { kind, pattern })
    }

    pub fn kind(&self) -> CheckKind {
        self.kind
    }

    /// Returns true if `content` satisfies this check.
    pub fn passes(&self, content: &[u8]) -> bool {
        match (&self.pattern, self.kind) {
            (Pattern::Text(text), CheckKind::Begins) => content.starts_with(text),
            (Pattern::Text(text), CheckKind::Ends) => content.ends_with(text),
            (Pattern::Text(text), CheckKind::DoesNotContain) => !contains(content, text),
            (Pattern::Text(text), _) => contains(content, text),
            (Pattern::Regex(re), CheckKind::DoesNotMatch) => !re.is_match(content),
            (Pattern::Regex(re), _) => re.is_match(content),
        }
    }

    /// Runs the check, returning the diagnostic to show if it fails.
    ///
    /// The first line names the file, the rest show what was expected and,
    /// for `Begins` and `Ends`, the relevant end of what was found.
    pub fn diagnose(&self, path: &Path, content: &[u8]) -> Option<String> {
        if self.passes(content) {
            trace!("{:?} passed a {:?} check", path, self.kind);
            return None;
        }

        let heading = format!("{path:?} has unexpected content");
        let message = match (&self.pattern, self.kind) {
            (Pattern::Text(text), CheckKind::Begins) => format!(
                "{heading}\n\tit should start with:\n{}\n\tactually starts with:\n{}",
                String::from_utf8_lossy(text),
                head_of(content),
            ),
            (Pattern::Text(text), CheckKind::Ends) => format!(
                "{heading}\n\tit should end with:\n{}\n\tactually ends with:\n{}",
                String::from_utf8_lossy(text),
                tail_of(content),
            ),
            (Pattern::Text(text), CheckKind::DoesNotContain) => {
                format!("{heading}\n\tcontains:\n{}", String::from_utf8_lossy(text))
            }
            (Pattern::Text(text), _) => {
                format!("{heading}\n\tdoes not contain:\n{}", String::from_utf8_lossy(text))
            }
            (Pattern::Regex(re), CheckKind::DoesNotMatch) => {
                format!("{heading}\n\tmatches:\n{}", re.as_str())
            }
            (Pattern::Regex(re), _) => format!("{heading}\n\tdoes not match:\n{}", re.as_str()),
        };
        Some(message)
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}

fn head_of(content: &[u8]) -> Cow<'_, str> {
    if content.len() <= MAX_CONTENT_TO_SHOW {
        return String::from_utf8_lossy(content);
    }
    Cow::Owned(format!(
        "{}...",
        String::from_utf8_lossy(&content[..MAX_CONTENT_TO_SHOW])
    ))
}

fn tail_of(content: &[u8]) -> Cow<'_, str> {
    if content.len() <= MAX_CONTENT_TO_SHOW {
        return String::from_utf8_lossy(content);
    }
    Cow::Owned(format!(
        "...{}",
        String::from_utf8_lossy(&content[content.len() - MAX_CONTENT_TO_SHOW..])
    ))
}
