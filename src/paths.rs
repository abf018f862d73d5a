//! Mapping of template paths onto the target directory.
//!
//! Template paths always use '/' as the separator (embedded templates have
//! no host separator of their own), target paths use the host's.

use std::path::{Path, PathBuf};

/// Maps slash-separated template paths to paths under the target directory.
#[derive(Debug, Clone)]
pub struct TargetMapper {
    template_base: String,
    target_root: PathBuf,
}

impl TargetMapper {
    /// # Arguments
    /// * `template_base` - The template path of the template root ("" if paths are relative)
    /// * `target_root` - The directory being created or checked
    pub fn new(template_base: impl Into<String>, target_root: impl Into<PathBuf>) -> Self {
        Self {
            template_base: template_base.into(),
            target_root: target_root.into(),
        }
    }

    pub fn target_root(&self) -> &Path {
        &self.target_root
    }

    /// Builds the target path for a template path.
    ///
    /// The template base is removed, the rest is split on '/' and the parts
    /// are joined onto the target root.
    pub fn map(&self, template_path: &str) -> PathBuf {
        let relative = self.strip_base(template_path);
        let mut target = self.target_root.clone();
        for part in relative.split('/').filter(|p| !p.is_empty() && *p != ".") {
            target.push(part);
        }
        target
    }

    fn strip_base<'a>(&self, template_path: &'a str) -> &'a str {
        if self.template_base.is_empty() || self.template_base == "." {
            return template_path;
        }
        if template_path == self.template_base {
            return "";
        }
        template_path
            .strip_prefix(self.template_base.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(template_path)
    }
}
