//! Macro substitution for generated template files.
//!
//! A macro is a name surrounded by the start and end delimiters, `${ProgName}`
//! with the defaults. Every macro in a generated file must be known.

use cruet::Inflector;
use indexmap::IndexMap;
use log::debug;
use regex::Regex;

use crate::error::{Error, Result};

pub const MACRO_PROG_NAME: &str = "ProgName";
pub const MACRO_PROG_NAME_SNAKE: &str = "ProgNameSnake";
pub const MACRO_PROG_NAME_PASCAL: &str = "ProgNamePascal";

/// Describes a macro for the help notes.
#[derive(Debug)]
pub struct MacroInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// The macros set up by [`MacroCache::add_program_macros`].
pub const AVAILABLE_MACROS: &[MacroInfo] = &[
    MacroInfo {
        name: MACRO_PROG_NAME,
        description: "this translates to the program name",
    },
    MacroInfo {
        name: MACRO_PROG_NAME_SNAKE,
        description: "the program name in snake_case, usable as a Rust identifier",
    },
    MacroInfo {
        name: MACRO_PROG_NAME_PASCAL,
        description: "the program name in PascalCase, usable as a type name",
    },
];

/// Name to value mapping used to expand macros.
#[derive(Debug, Clone)]
pub struct MacroCache {
    start: String,
    end: String,
    token: Regex,
    values: IndexMap<String, String>,
}

impl MacroCache {
    /// Creates an empty cache using the given delimiters.
    ///
    /// # Errors
    /// * `Error::MacroError` if either delimiter is empty
    pub fn new(start: &str, end: &str) -> Result<Self> {
        if start.is_empty() || end.is_empty() {
            return Err(Error::MacroError {
                origin: "the macro cache".to_string(),
                message: "the macro delimiters must not be empty".to_string(),
            });
        }
        let token = Regex::new(&format!("{}.*?{}", regex::escape(start), regex::escape(end)))
            .map_err(|e| Error::MacroError {
                origin: "the macro cache".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            start: start.to_string(),
            end: end.to_string(),
            token,
            values: IndexMap::new(),
        })
    }

    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Adds the program name and its derived spellings.
    pub fn add_program_macros(&mut self, prog_name: &str) {
        self.add(MACRO_PROG_NAME, prog_name);
        self.add(MACRO_PROG_NAME_SNAKE, prog_name.to_snake_case());
        self.add(MACRO_PROG_NAME_PASCAL, prog_name.to_pascal_case());
        debug!("Macros: {:?}", self.values);
    }

    /// Replaces every macro in `content` by its value.
    ///
    /// # Arguments
    /// * `content` - Text to expand
    /// * `origin` - Where the text came from, used in error messages
    ///
    /// # Errors
    /// * `Error::MacroError` naming the first unknown macro and its line
    pub fn substitute(&self, content: &str, origin: &str) -> Result<String> {
        let mut expanded = String::with_capacity(content.len());
        let mut last = 0;

        for token in self.token.find_iter(content) {
            let text = token.as_str();
            let name = &text[self.start.len()..text.len() - self.end.len()];
            let value = self.get(name).ok_or_else(|| Error::MacroError {
                origin: origin.to_string(),
                message: format!(
                    "unknown macro {name:?} at line {}",
                    content[..token.start()].matches('\n').count() + 1
                ),
            })?;
            expanded.push_str(&content[last..token.start()]);
            expanded.push_str(value);
            last = token.end();
        }
        expanded.push_str(&content[last..]);

        Ok(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> MacroCache {
        let mut mc = MacroCache::new("${", "}").unwrap();
        mc.add_program_macros("my-prog");
        mc
    }

    #[test]
    fn test_substitute() {
        let out = cache()
            .substitute("name = \"${ProgName}\"\n// ${ProgName}: done\n", "Cargo.toml")
            .unwrap();
        assert_eq!(out, "name = \"my-prog\"\n// my-prog: done\n");
    }

    #[test]
    fn test_derived_names() {
        let mc = cache();
        assert_eq!(mc.get(MACRO_PROG_NAME_SNAKE), Some("my_prog"));
        assert_eq!(mc.get(MACRO_PROG_NAME_PASCAL), Some("MyProg"));
    }

    #[test]
    fn test_no_macros() {
        let text = "fn main() {}\n";
        assert_eq!(cache().substitute(text, "main.rs").unwrap(), text);
    }

    #[test]
    fn test_unknown_macro() {
        match cache().substitute("one\ntwo ${Nope}\n", "main.rs") {
            Err(Error::MacroError { origin, message }) => {
                assert_eq!(origin, "main.rs");
                assert!(message.contains("\"Nope\""));
                assert!(message.contains("line 2"));
            }
            other => panic!("Expected MacroError, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_delimiters() {
        let mut mc = MacroCache::new("<<", ">>").unwrap();
        mc.add("X", "1");
        assert_eq!(mc.substitute("${X} <<X>>", "f").unwrap(), "${X} 1");
    }

    #[test]
    fn test_empty_delimiter() {
        assert!(MacroCache::new("", "}").is_err());
    }
}
