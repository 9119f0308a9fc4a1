//! Makefile generation for Idefix build directories.
//!
//! The pipeline is:
//! 1. [`derive_options`] turns resolved architectures and build flags into a
//!    flat [`MakefileOptions`] record keyed by template placeholder.
//! 2. [`write_makefile`] substitutes the record into `Makefile.in` and writes
//!    the result next to the user's setup.
//! 3. [`ConfigReport`] summarises what was configured.

pub mod error;
pub mod options;
pub mod platform;
pub mod report;
pub mod template;

pub use error::{MakefileError, Result};
pub use options::{derive_options, BuildFlags, MakefileOptions};
pub use platform::sed_command;
pub use report::ConfigReport;
pub use template::{render, template_path, write_makefile, MAKEFILE_NAME, TEMPLATE_NAME};
