//! Makefile generation errors.

use std::path::PathBuf;

use idefix_arch::ArchError;
use thiserror::Error;

/// Errors that can occur while generating a Makefile.
#[derive(Debug, Error)]
pub enum MakefileError {
    #[error(transparent)]
    Arch(#[from] ArchError),

    #[error("could not read template {}", path.display())]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not write to {}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid placeholder pattern")]
    Pattern(#[from] regex::Error),
}

/// Result type for Makefile generation.
pub type Result<T> = std::result::Result<T, MakefileError>;
