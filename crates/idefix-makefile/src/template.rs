//! `Makefile.in` rendering.
//!
//! Placeholders are `@name@` tokens. Rendering runs in two phases: every
//! token naming a key of the [`MakefileOptions`] is replaced by its value in
//! a single left-to-right pass, then any placeholder still present is
//! removed. Substituted values are not scanned again for known keys.

use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tempfile::NamedTempFile;

use crate::error::{MakefileError, Result};
use crate::options::MakefileOptions;

/// Template file name under the Idefix root.
pub const TEMPLATE_NAME: &str = "Makefile.in";
/// Generated file name in the target directory.
pub const MAKEFILE_NAME: &str = "Makefile";

/// Any residual placeholder. `$@` and recipe-silencing `@` never match since
/// a name must sit between two `@`.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[A-Za-z_][A-Za-z0-9_-]*@").expect("valid placeholder pattern"));

/// Location of the Makefile template below the Idefix root.
pub fn template_path(root: &Path) -> PathBuf {
    root.join(TEMPLATE_NAME)
}

/// Substitute `options` into `template` and strip unknown placeholders.
pub fn render(template: &str, options: &MakefileOptions) -> Result<String> {
    let substituted = if options.is_empty() {
        Cow::Borrowed(template)
    } else {
        let alternation = options
            .keys()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
        let known = Regex::new(&format!("@({alternation})@"))?;
        known.replace_all(template, |caps: &Captures<'_>| {
            options.get(&caps[1]).to_string()
        })
    };

    Ok(PLACEHOLDER.replace_all(&substituted, "").into_owned())
}

/// Render `<root>/Makefile.in` into `<directory>/Makefile`.
///
/// The output is written to a temporary file in `directory` and renamed over
/// the target, so a failed write never leaves a truncated Makefile behind.
pub fn write_makefile(root: &Path, directory: &Path, options: &MakefileOptions) -> Result<PathBuf> {
    let source = template_path(root);
    tracing::debug!(template = %source.display(), "reading template");
    let template = fs::read_to_string(&source).map_err(|e| MakefileError::TemplateRead {
        path: source.clone(),
        source: e,
    })?;

    let rendered = render(&template, options)?;

    let target = directory.join(MAKEFILE_NAME);
    let write_err = |e: std::io::Error| MakefileError::Write {
        path: target.clone(),
        source: e,
    };

    let mut tmp = NamedTempFile::new_in(directory).map_err(write_err)?;
    tmp.write_all(rendered.as_bytes()).map_err(write_err)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }
    tmp.persist(&target).map_err(|e| write_err(e.error))?;

    tracing::debug!(path = %target.display(), "wrote makefile");
    Ok(target)
}
