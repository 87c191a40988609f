//! Build-context discovery
//!
//! Finds every Dockerfile below a search directory, derives tag and parent
//! image per context and assembles the parent-keyed adjacency the hierarchy
//! is built from.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{compute_tag, BuildContext, DomainError, HierarchyIndex, ParentParser};
use crate::infrastructure::traits::FileSystem;

/// Contexts keyed by name, sorted.
pub type ContextsByName = BTreeMap<String, BuildContext>;

/// Service discovering Docker build contexts.
pub struct ContextService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl ContextService {
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Discover all build contexts below `dir`.
    ///
    /// A context is a sub-directory (at any depth, but not `dir` itself)
    /// holding a Dockerfile. Context names are directory basenames and must
    /// be unique.
    #[instrument(level = "debug", skip(self))]
    pub fn find_contexts(&self, dir: &Path) -> ApplicationResult<ContextsByName> {
        if !self.fs.is_dir(dir) {
            return Err(DomainError::InvalidSearchDir(dir.to_path_buf()).into());
        }
        let root = self
            .fs
            .canonicalize(dir)
            .with_path_context("canonicalize", dir)?;
        let parser = ParentParser::new(
            &self.settings.parent_directive,
            &self.settings.unknown_parent,
        )?;

        let dirs_by_name = self.scan(&root)?;
        if dirs_by_name.is_empty() {
            return Err(DomainError::NoContext(root).into());
        }
        if let Some((name, paths)) = dirs_by_name.iter().find(|(_, paths)| paths.len() > 1) {
            return Err(DomainError::DuplicatedContext {
                name: name.clone(),
                paths: paths.clone(),
            }
            .into());
        }

        let mut contexts = ContextsByName::new();
        for (name, mut paths) in dirs_by_name {
            // uniqueness checked above
            let Some(path) = paths.pop() else { continue };
            let dockerfile = path.join(&self.settings.dockerfile);
            let content = self
                .fs
                .read_to_string(&dockerfile)
                .with_path_context("read Dockerfile", &dockerfile)?;
            let context = BuildContext {
                tag: compute_tag(&root, &path),
                parent: parser.parent_image(&content),
                name: name.clone(),
                path,
            };
            debug!("context {} -> {} (parent {})", context.name, context.tag, context.parent);
            contexts.insert(name, context);
        }
        Ok(contexts)
    }

    /// Look up a single context by name.
    #[instrument(level = "debug", skip(self))]
    pub fn find_context(&self, dir: &Path, name: &str) -> ApplicationResult<BuildContext> {
        self.find_contexts(dir)?
            .remove(name)
            .ok_or_else(|| DomainError::ContextNotFound(name.to_string()).into())
    }

    /// Discover contexts and arrange them by parent image.
    #[instrument(level = "debug", skip(self))]
    pub fn hierarchy(&self, dir: &Path) -> ApplicationResult<HierarchyIndex<BuildContext>> {
        let contexts = self.find_contexts(dir)?;
        Ok(Self::build_hierarchy(contexts.into_values()))
    }

    /// Group contexts under their parent image.
    pub fn build_hierarchy<I>(contexts: I) -> HierarchyIndex<BuildContext>
    where
        I: IntoIterator<Item = BuildContext>,
    {
        let mut nodes_by_parent_id: BTreeMap<String, Vec<BuildContext>> = BTreeMap::new();
        for context in contexts {
            nodes_by_parent_id
                .entry(context.parent.clone())
                .or_default()
                .push(context);
        }
        HierarchyIndex::new(nodes_by_parent_id)
    }

    /// Context directories grouped by basename.
    fn scan(&self, root: &Path) -> ApplicationResult<BTreeMap<String, Vec<PathBuf>>> {
        let mut walker = WalkDir::new(root).min_depth(2).sort_by_file_name();
        if let Some(max_depth) = self.settings.max_depth {
            walker = walker.max_depth(max_depth);
        }

        let mut dirs_by_name: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        for entry in walker {
            let entry = entry.with_path_context("scan directory", root)?;
            if !entry.file_type().is_file() || entry.file_name() != self.settings.dockerfile.as_str()
            {
                continue;
            }
            let Some(dir) = entry.path().parent() else {
                continue;
            };
            let Some(name) = dir.file_name() else {
                continue;
            };
            dirs_by_name
                .entry(name.to_string_lossy().into_owned())
                .or_default()
                .push(dir.to_path_buf());
        }
        debug!("scan: {} context names below {}", dirs_by_name.len(), root.display());
        Ok(dirs_by_name)
    }
}
