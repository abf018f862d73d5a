//! Template sources and the entries derived from them.
//!
//! A template is either one of the templates built into the binary or a
//! directory on disk. Either way it is presented as a sequence of nodes with
//! '/' separated paths, directories before their contents and siblings in
//! name order.

use log::{debug, trace};
use rust_embed::RustEmbed;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::directive::{self, CheckDirective};
use crate::error::{Error, Result};
use crate::macros::MacroCache;
use crate::paths::TargetMapper;

#[derive(RustEmbed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// Where the template comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A template built into the binary, by name
    Embedded(String),
    /// A template directory on disk
    FileSystem(PathBuf),
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::Embedded(name) => write!(f, "built-in template: '{name}'"),
            TemplateSource::FileSystem(path) => write!(f, "local path: '{}'", path.display()),
        }
    }
}

/// One file or directory in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateNode {
    /// '/' separated path; the template root has the source's base as its path
    pub path: String,
    pub is_dir: bool,
}

impl TemplateSource {
    /// Names of the templates built into the binary.
    pub fn embedded_names() -> Vec<String> {
        let mut names: Vec<String> = EmbeddedTemplates::iter()
            .filter_map(|p| p.split('/').next().map(str::to_string))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Checks that the template can be used.
    ///
    /// # Errors
    /// * `Error::TemplateError` if there is no such built-in template or the
    ///   template directory does not exist
    pub fn validate(&self) -> Result<()> {
        match self {
            TemplateSource::Embedded(name) => {
                if Self::embedded_names().iter().any(|n| n == name) {
                    Ok(())
                } else {
                    Err(Error::TemplateError(format!(
                        "there is no built-in template called '{name}'"
                    )))
                }
            }
            TemplateSource::FileSystem(path) => {
                if path.is_dir() {
                    Ok(())
                } else {
                    Err(Error::TemplateError(format!(
                        "template directory '{}' does not exist or is not a directory",
                        path.display()
                    )))
                }
            }
        }
    }

    /// The path of the template root. Node paths start with it.
    pub fn base(&self) -> &str {
        match self {
            TemplateSource::Embedded(name) => name,
            TemplateSource::FileSystem(_) => "",
        }
    }

    /// Walks the template.
    ///
    /// An `Err` item means the walk itself failed; no further items should
    /// be expected to make sense after it.
    pub fn nodes(&self) -> Box<dyn Iterator<Item = Result<TemplateNode>> + '_> {
        match self {
            TemplateSource::Embedded(name) => Box::new(
                embedded_nodes(name)
                    .into_iter()
                    .map(Ok::<TemplateNode, Error>),
            ),
            TemplateSource::FileSystem(root) => {
                let root = root.as_path();
                Box::new(
                    WalkDir::new(root)
                        .sort_by_file_name()
                        .into_iter()
                        .map(move |entry| -> Result<TemplateNode> {
                            let entry = entry?;
                            Ok(TemplateNode {
                                path: relative_path(root, entry.path()),
                                is_dir: entry.file_type().is_dir(),
                            })
                        }),
                )
            }
        }
    }

    /// Reads the content of a template file.
    pub fn read(&self, path: &str) -> Result<Vec<u8>> {
        let read_error = |source| Error::TemplateReadError {
            path: path.to_string(),
            source,
        };
        match self {
            TemplateSource::Embedded(_) => EmbeddedTemplates::get(path)
                .map(|file| file.data.into_owned())
                .ok_or_else(|| {
                    read_error(io::Error::new(
                        io::ErrorKind::NotFound,
                        "not in the built-in templates",
                    ))
                }),
            TemplateSource::FileSystem(root) => fs::read(root.join(path)).map_err(read_error),
        }
    }
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// rust-embed only records files, so the directories are rebuilt from their paths
fn embedded_nodes(name: &str) -> Vec<TemplateNode> {
    let prefix = format!("{name}/");
    let mut files: Vec<String> = EmbeddedTemplates::iter()
        .filter(|p| p.starts_with(prefix.as_str()))
        .map(|p| p.into_owned())
        .collect();
    files.sort_by(|a, b| a.split('/').cmp(b.split('/')));

    let mut nodes = vec![TemplateNode {
        path: name.to_string(),
        is_dir: true,
    }];
    for file in files {
        let parts: Vec<&str> = file.split('/').collect();
        for depth in 2..parts.len() {
            let dir = parts[..depth].join("/");
            if !nodes.iter().any(|n| n.is_dir && n.path == dir) {
                nodes.push(TemplateNode {
                    path: dir,
                    is_dir: true,
                });
            }
        }
        nodes.push(TemplateNode {
            path: file,
            is_dir: false,
        });
    }
    nodes
}

/// What a template node means for the target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub template_path: String,
    pub target_path: PathBuf,
    pub is_dir: bool,
    /// The template root itself; never created or checked
    pub is_template_root: bool,
    pub is_generated: bool,
    pub is_optional: bool,
    /// Set for check files, which describe a check on `target_path`
    pub check: Option<CheckDirective>,
}

impl TemplateEntry {
    pub fn is_check_descriptor(&self) -> bool {
        self.check.is_some()
    }
}

/// A template bound to a target directory and a set of macros.
#[derive(Debug)]
pub struct Template {
    source: TemplateSource,
    mapper: TargetMapper,
    macros: MacroCache,
}

impl Template {
    pub fn new(source: TemplateSource, target_root: impl Into<PathBuf>, macros: MacroCache) -> Self {
        let mapper = TargetMapper::new(source.base(), target_root);
        Self {
            source,
            mapper,
            macros,
        }
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    pub fn target_root(&self) -> &Path {
        self.mapper.target_root()
    }

    /// Works out what a template node stands for.
    ///
    /// # Errors
    /// * Any error from [`directive::parse`] for badly named check files
    pub fn entry(&self, node: &TemplateNode) -> Result<TemplateEntry> {
        let mut entry = TemplateEntry {
            template_path: node.path.clone(),
            target_path: PathBuf::new(),
            is_dir: node.is_dir,
            is_template_root: false,
            is_generated: false,
            is_optional: false,
            check: None,
        };

        if node.path == self.source.base() {
            entry.is_template_root = true;
            return Ok(entry);
        }
        if node.is_dir {
            entry.target_path = self.mapper.map(&node.path);
            return Ok(entry);
        }

        let directives = directive::parse(&node.path)?;
        entry.target_path = self.mapper.map(&directives.base);
        entry.is_generated = directives.generated;
        entry.is_optional = directives.optional;
        entry.check = directives.check;
        trace!("{:?} -> {:?}", node.path, entry);
        Ok(entry)
    }

    /// Reads the content of a template file, expanding macros if it is generated.
    ///
    /// # Errors
    /// * `Error::TemplateReadError` if the file can't be read
    /// * `Error::MacroError` if a generated file is not UTF-8 or uses an unknown macro
    pub fn content(&self, entry: &TemplateEntry) -> Result<Vec<u8>> {
        let raw = self.source.read(&entry.template_path)?;
        if !entry.is_generated {
            return Ok(raw);
        }

        debug!("Generating content from {}", entry.template_path);
        let text = String::from_utf8(raw).map_err(|_| Error::MacroError {
            origin: entry.template_path.clone(),
            message: "the content is not valid UTF-8".to_string(),
        })?;
        Ok(self
            .macros
            .substitute(&text, &entry.template_path)?
            .into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_source_display() {
        let fs_source = TemplateSource::FileSystem(PathBuf::from("/path/to/template"));
        assert_eq!(format!("{}", fs_source), "local path: '/path/to/template'");

        let embedded = TemplateSource::Embedded("Rust".to_string());
        assert_eq!(format!("{}", embedded), "built-in template: 'Rust'");
    }

    #[test]
    fn test_embedded_nodes_are_ordered() {
        let nodes = embedded_nodes("Rust");
        assert_eq!(nodes[0].path, "Rust");
        assert!(nodes[0].is_dir);
        for (i, node) in nodes.iter().enumerate().skip(1) {
            let parent = node.path.rsplit_once('/').map(|(p, _)| p).unwrap();
            assert!(
                nodes[..i].iter().any(|n| n.is_dir && n.path == parent),
                "{} comes before its directory",
                node.path
            );
        }
    }

    #[test]
    fn test_unknown_embedded_template() {
        assert!(TemplateSource::Embedded("Cobol".to_string())
            .validate()
            .is_err());
        assert!(TemplateSource::Embedded("Rust".to_string())
            .validate()
            .is_ok());
    }
}
