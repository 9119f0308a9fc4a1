//! Host-platform details passed through to the generated Makefile.

/// In-place `sed` invocation understood by the host's `sed`.
///
/// BSD sed (macOS) requires an explicit, possibly empty, backup suffix after
/// `-i`; GNU sed does not accept one as a separate argument.
pub fn sed_command() -> &'static str {
    if cfg!(target_os = "macos") {
        "sed -i '' "
    } else {
        "sed -i"
    }
}
