//! Errors of the process environment around the services

use std::io;

use thiserror::Error;

use crate::application::ApplicationError;

#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Writing results to the terminal failed, e.g. a closed pipe.
    #[error("cannot {action}: {source}")]
    Console {
        action: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("cannot determine working directory: {0}")]
    WorkingDir(#[source] io::Error),
}

impl InfraError {
    pub fn console(action: &'static str, source: io::Error) -> Self {
        Self::Console { action, source }
    }
}
