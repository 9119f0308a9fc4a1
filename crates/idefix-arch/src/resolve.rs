//! Resolution of user-requested architectures against the known tables.

use std::collections::BTreeSet;

use crate::error::{ArchError, Result};
use crate::known::TargetKind;

/// Maximum number of identifiers a single build can request.
const MAX_REQUESTED: usize = 2;

/// The architecture chosen for each target kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedArchs {
    pub cpu: &'static str,
    pub gpu: &'static str,
}

impl Default for ResolvedArchs {
    fn default() -> Self {
        Self {
            cpu: TargetKind::Cpu.default_arch(),
            gpu: TargetKind::Gpu.default_arch(),
        }
    }
}

impl ResolvedArchs {
    /// The architecture selected for `kind`.
    pub fn get(&self, kind: TargetKind) -> &'static str {
        match kind {
            TargetKind::Cpu => self.cpu,
            TargetKind::Gpu => self.gpu,
        }
    }

    fn set(&mut self, kind: TargetKind, arch: &'static str) {
        match kind {
            TargetKind::Cpu => self.cpu = arch,
            TargetKind::Gpu => self.gpu = arch,
        }
    }
}

/// Resolve requested architectures into one CPU and one GPU choice.
///
/// An empty request yields the defaults. At most two identifiers may be
/// given, and at most one distinct identifier per kind; a kind with no
/// request keeps its default.
pub fn resolve_archs<S: AsRef<str>>(requested: &[S]) -> Result<ResolvedArchs> {
    let mut resolved = ResolvedArchs::default();
    if requested.is_empty() {
        return Ok(resolved);
    }

    if requested.len() > MAX_REQUESTED {
        return Err(ArchError::TooMany {
            requested: requested.iter().map(|a| a.as_ref().to_string()).collect(),
        });
    }

    let mut cpu = BTreeSet::new();
    let mut gpu = BTreeSet::new();
    for name in requested {
        let name = name.as_ref();
        match TargetKind::classify(name) {
            Some((TargetKind::Cpu, arch)) => cpu.insert(arch),
            Some((TargetKind::Gpu, arch)) => gpu.insert(arch),
            None => {
                return Err(ArchError::Unknown { name: name.into() });
            }
        };
    }

    for (kind, matched) in [(TargetKind::Cpu, cpu), (TargetKind::Gpu, gpu)] {
        let mut iter = matched.iter();
        match (iter.next(), iter.next()) {
            (None, _) => {}
            (Some(arch), None) => resolved.set(kind, *arch),
            (Some(_), Some(_)) => {
                return Err(ArchError::Conflicting {
                    kind,
                    conflicting: matched.iter().map(|a| a.to_string()).collect(),
                });
            }
        }
    }

    tracing::debug!(cpu = resolved.cpu, gpu = resolved.gpu, "resolved architectures");
    Ok(resolved)
}

/// Whether any requested identifier names a GPU architecture.
pub fn is_gpu_requested<S: AsRef<str>>(requested: &[S]) -> bool {
    requested
        .iter()
        .any(|a| TargetKind::Gpu.archs().contains(&a.as_ref()))
}
