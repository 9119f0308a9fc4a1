//! Command-line spelling compatibility.
//!
//! The setup script has always taken single-dash long options (`-mhd`,
//! `-arch SKX`). They are rewritten to their `--` form before parsing.

use std::ffi::OsString;

/// Long options that may be spelled with a single dash.
const LONG_FLAGS: &[&str] = &["mhd", "gpu", "cxx", "arch", "openmp", "mpi"];

/// Rewrite `-name` and `-name=value` to `--name` / `--name=value`.
///
/// Everything after a bare `--` is passed through untouched.
pub fn normalize<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;
    for arg in args {
        if passthrough {
            out.push(arg);
            continue;
        }
        let rewritten = match arg.to_str() {
            Some("--") => {
                passthrough = true;
                None
            }
            Some(s) => rewrite(s),
            None => None,
        };
        out.push(rewritten.map(OsString::from).unwrap_or(arg));
    }
    out
}

fn rewrite(arg: &str) -> Option<String> {
    let body = arg.strip_prefix('-')?;
    if body.starts_with('-') {
        return None;
    }
    let name = body.split_once('=').map_or(body, |(name, _)| name);
    LONG_FLAGS.contains(&name).then(|| format!("-{arg}"))
}
