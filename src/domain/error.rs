//! Domain-level errors (no external dependencies)

use std::path::PathBuf;

use itertools::Itertools;
use thiserror::Error;

/// Domain errors represent violations of the build-context layout.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("no Docker context found in {0}")]
    NoContext(PathBuf),

    #[error("duplicated Docker context '{name}': {}", format_paths(.paths))]
    DuplicatedContext { name: String, paths: Vec<PathBuf> },

    #[error("Docker context not found: {0}")]
    ContextNotFound(String),

    #[error("not a directory: {0}")]
    InvalidSearchDir(PathBuf),

    #[error("invalid parent directive '{directive}': {message}")]
    InvalidDirective { directive: String, message: String },
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display()).join(", ")
}
