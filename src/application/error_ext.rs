//! Error conversion helpers for filesystem access during context discovery.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Attach an action and a path to a failed filesystem call.
///
/// ```ignore
/// let content = fs.read_to_string(&dockerfile)
///     .with_path_context("read Dockerfile", &dockerfile)?;
/// ```
pub trait IoResultExt<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}

impl<T> IoResultExt<T> for Result<T, walkdir::Error> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| {
            let at = e.path().unwrap_or(path).display().to_string();
            ApplicationError::OperationFailed {
                context: format!("{}: {}", action, at),
                source: Box::new(e),
            }
        })
    }
}
