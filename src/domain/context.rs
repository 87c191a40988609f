//! Docker build contexts: naming, tagging and parent-image extraction.

use std::path::{Component, Path, PathBuf};

use itertools::Itertools;
use regex::Regex;

use crate::domain::error::DomainError;
use crate::domain::node::Indexed;

/// A directory holding a Dockerfile.
///
/// Identified in the hierarchy by its image tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Basename of the context directory
    pub name: String,
    /// Context directory
    pub path: PathBuf,
    /// Image tag derived from the directory's position below the search root
    pub tag: String,
    /// Image named by the Dockerfile's parent directive
    pub parent: String,
}

impl Indexed for BuildContext {
    fn index(&self) -> &str {
        &self.tag
    }
}

/// Derive the image tag of a context directory.
///
/// The path relative to `search_root` is joined with `/`, then the first `-`
/// becomes `:` and the first `_` becomes `-`:
/// `base/debian-jdk7_ui` → `base/debian:jdk7-ui`.
pub fn compute_tag(search_root: &Path, context_dir: &Path) -> String {
    let relative = context_dir.strip_prefix(search_root).unwrap_or(context_dir);
    let joined = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .join("/");
    joined.replacen('-', ":", 1).replacen('_', "-", 1)
}

/// Extracts the parent image from Dockerfile content.
#[derive(Debug, Clone)]
pub struct ParentParser {
    directive: Regex,
    unknown: String,
}

impl ParentParser {
    /// `directive` is matched literally anywhere in a line (e.g. `FROM `);
    /// `unknown` is returned when no line carries it.
    pub fn new(directive: &str, unknown: &str) -> Result<Self, DomainError> {
        let pattern = format!("{}(.*)", regex::escape(directive));
        let directive = Regex::new(&pattern).map_err(|e| DomainError::InvalidDirective {
            directive: directive.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            directive,
            unknown: unknown.to_string(),
        })
    }

    /// Image reference of the first directive line.
    ///
    /// Option flags such as `--platform=...` are skipped and a trailing
    /// `AS <stage>` is ignored: only the image reference is kept.
    pub fn parent_image(&self, content: &str) -> String {
        content
            .lines()
            .find_map(|line| self.directive.captures(line))
            .and_then(|caps| {
                caps.get(1).and_then(|rest| {
                    rest.as_str()
                        .split_whitespace()
                        .find(|token| !token.starts_with("--"))
                        .map(str::to_string)
                })
            })
            .unwrap_or_else(|| self.unknown.clone())
    }
}
