//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(InfraError::Io { .. }) => crate::exitcode::IOERR,
            CliError::Infra(InfraError::Application(e)) => match e {
                ApplicationError::Domain(d) => match d {
                    DomainError::NoContext(_)
                    | DomainError::ContextNotFound(_)
                    | DomainError::InvalidSearchDir(_) => crate::exitcode::NOINPUT,
                    DomainError::DuplicatedContext { .. } => crate::exitcode::DATAERR,
                    DomainError::InvalidDirective { .. } => crate::exitcode::CONFIG,
                },
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn given_missing_context_when_mapping_exit_code_then_noinput() {
        let err: CliError =
            ApplicationError::from(DomainError::ContextNotFound("alpine".into())).into();
        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);
    }

    #[test]
    fn given_duplicated_context_when_mapping_exit_code_then_dataerr() {
        let err: CliError = ApplicationError::from(DomainError::DuplicatedContext {
            name: "alpine".into(),
            paths: vec![PathBuf::from("a/alpine"), PathBuf::from("b/alpine")],
        })
        .into();
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
        assert_eq!(
            err.to_string(),
            "duplicated Docker context 'alpine': a/alpine, b/alpine"
        );
    }

    #[test]
    fn given_no_context_when_mapping_exit_code_then_noinput_not_success() {
        let err: CliError =
            ApplicationError::from(DomainError::NoContext(PathBuf::from("/work/empty"))).into();
        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);
        assert_eq!(err.to_string(), "no Docker context found in /work/empty");
    }
}
