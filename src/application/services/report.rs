//! Tabular and textual reports over discovered contexts.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::services::context::ContextsByName;
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::board;
use crate::domain::{BuildContext, HierarchyIndex, Indexed};
use crate::infrastructure::traits::FileSystem;

pub const CONTEXT_TITLE: &str = "CONTEXT";
pub const TAG_TITLE: &str = "IMAGE TAG";
pub const BASE_IMAGE_TITLE: &str = "BASE IMAGE";
pub const DISTRIBUTION_TITLE: &str = "DISTRIBUTION";
pub const SECTION: &str = "------------------------------";
pub const ALINEA: &str = "+++";

/// Prefix of Dockerfile lines carrying an embedded shell script
pub const SCRIPT_TAG: &str = "#@";
pub const SCRIPT_BEGIN: &str = "[--DOCKTITUDE-SCRIPT";
pub const SCRIPT_END: &str = "DOCKTITUDE-SCRIPT--]";
pub const SCRIPT_SUFFIX: &str = "[ SHELL SCRIPT ]";
/// Script lines starting with this are heredoc terminators and not listed.
pub const END_OF_SCRIPT: &str = "EOF";
pub const NO_SCRIPT: &str = "No docktitude script tags defined !";

/// Share of all stored images built on one base image.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub root: String,
    pub count: usize,
    pub percent: f64,
}

pub struct ReportService {
    fs: Arc<dyn FileSystem>,
}

impl ReportService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Board of context name → image tag.
    pub fn tag_board(&self, contexts: &ContextsByName) -> Vec<String> {
        let rows: Vec<(&str, &str)> = contexts
            .values()
            .map(|c| (c.name.as_str(), c.tag.as_str()))
            .collect();
        board::two_columns(&rows, Some((CONTEXT_TITLE, TAG_TITLE)))
    }

    /// Number of stored nodes per root, in root order.
    pub fn distribution<T>(&self, index: &HierarchyIndex<T>) -> Vec<Distribution> {
        let total = index.node_count();
        let mut counts: Vec<(String, usize)> = index
            .roots()
            .iter()
            .map(|root| (root.index().to_string(), 0))
            .collect();

        for (parent, children) in index.nodes_by_parent_id() {
            let Some(root) = index.root_of(parent.as_str()) else {
                continue;
            };
            if let Some(slot) = counts.iter_mut().find(|(id, _)| id == root.index()) {
                slot.1 += children.len();
            }
        }

        counts
            .into_iter()
            .map(|(root, count)| Distribution {
                percent: if total == 0 {
                    0.0
                } else {
                    count as f64 * 100.0 / total as f64
                },
                root,
                count,
            })
            .collect()
    }

    /// Board of base image → `<percent> %  (<count>)`.
    pub fn distribution_board<T>(&self, index: &HierarchyIndex<T>) -> Vec<String> {
        let rows: Vec<(String, String)> = self
            .distribution(index)
            .into_iter()
            .map(|d| {
                let cell = format!("{} %  ({})", to_precision(d.percent, 4), d.count);
                (d.root, cell)
            })
            .collect();
        let title = format!("{} ({})", DISTRIBUTION_TITLE, index.node_count());
        board::two_columns(&rows, Some((BASE_IMAGE_TITLE, title.as_str())))
    }

    /// Dockerfile of one context framed by section separators.
    #[instrument(level = "debug", skip(self))]
    pub fn dockerfile_listing(
        &self,
        context: &BuildContext,
        dockerfile: &str,
    ) -> ApplicationResult<Vec<String>> {
        let path = context.path.join(dockerfile);
        let content = self
            .fs
            .read_to_string(&path)
            .with_path_context("read Dockerfile", &path)?;

        let mut lines = vec![
            SECTION.to_string(),
            format!("{} {}", ALINEA, context.name),
            format!("[{}]", path.display()),
            SECTION.to_string(),
        ];
        lines.extend(content.lines().map(str::to_string));
        lines.push(SECTION.to_string());
        Ok(lines)
    }

    /// Shell script embedded in a context's Dockerfile as `#@` comment lines.
    ///
    /// The tagged lines must open with [`SCRIPT_BEGIN`] and close with
    /// [`SCRIPT_END`]; anything else yields the single line [`NO_SCRIPT`].
    #[instrument(level = "debug", skip(self))]
    pub fn script_listing(
        &self,
        context: &BuildContext,
        dockerfile: &str,
    ) -> ApplicationResult<Vec<String>> {
        let path = context.path.join(dockerfile);
        let content = self
            .fs
            .read_to_string(&path)
            .with_path_context("read Dockerfile", &path)?;

        let Some(script) = embedded_script(&content) else {
            debug!("no script tags in {}", path.display());
            return Ok(vec![NO_SCRIPT.to_string()]);
        };

        let mut lines = vec![
            SECTION.to_string(),
            format!("{} {} {}", ALINEA, context.name, SCRIPT_SUFFIX),
            SECTION.to_string(),
        ];
        lines.extend(
            script
                .into_iter()
                .filter(|line| !line.starts_with(END_OF_SCRIPT))
                .map(str::to_string),
        );
        lines.push(SECTION.to_string());
        Ok(lines)
    }
}

/// Lines between the script markers with the tag (and one space) removed.
fn embedded_script(content: &str) -> Option<Vec<&str>> {
    let tagged: Vec<&str> = content
        .lines()
        .filter(|line| line.starts_with(SCRIPT_TAG))
        .collect();

    match tagged.as_slice() {
        [first, body @ .., last]
            if !body.is_empty() && first.contains(SCRIPT_BEGIN) && last.contains(SCRIPT_END) =>
        {
            Some(
                body.iter()
                    .copied()
                    .map(|line| {
                        line.strip_prefix("#@ ")
                            .or_else(|| line.strip_prefix(SCRIPT_TAG))
                            .unwrap_or(line)
                    })
                    .collect(),
            )
        }
        _ => None,
    }
}

/// Format with `digits` significant digits: 33.333 → `33.33`, 5 → `5.000`.
pub fn to_precision(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{:.*}", digits.saturating_sub(1), 0.0);
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (digits as i32 - 1 - magnitude).max(0) as usize;
    let rounded = format!("{:.*}", decimals, value);
    // rounding can carry into a new leading digit (99.996 -> 100.00)
    match rounded.parse::<f64>() {
        Ok(r) if r.abs() >= 10f64.powi(magnitude + 1) && decimals > 0 => {
            format!("{:.*}", decimals - 1, value)
        }
        _ => rounded,
    }
}
