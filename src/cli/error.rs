//! Top-level error and its process exit code

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// Everything a command can fail with, as reported to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// sysexits code: missing input, bad data, bad config or I/O failure.
    pub fn exit_code(&self) -> i32 {
        let CliError::Infra(e) = self;
        match e {
            InfraError::Console { .. } | InfraError::WorkingDir(_) => crate::exitcode::IOERR,
            InfraError::Application(app) => match app {
                ApplicationError::NotFound(_) => crate::exitcode::NOINPUT,
                ApplicationError::Parse { .. } | ApplicationError::Domain(_) => crate::exitcode::DATAERR,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::Io { .. } => crate::exitcode::IOERR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use std::path::PathBuf;

    #[test]
    fn given_missing_file_then_exit_code_is_noinput() {
        let err = CliError::from(ApplicationError::NotFound(PathBuf::from("x.txt")));
        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);
    }

    #[test]
    fn given_parse_failure_then_exit_code_is_dataerr() {
        let err = CliError::from(ApplicationError::Parse {
            path: PathBuf::from("x.txt"),
            source: DomainError::InvalidName("=".into()).at_line(3),
        });
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn given_stdout_failure_then_exit_code_is_ioerr() {
        let err = CliError::from(InfraError::console(
            "write to stdout",
            std::io::Error::from(std::io::ErrorKind::BrokenPipe),
        ));
        assert_eq!(err.exit_code(), crate::exitcode::IOERR);
    }
}
