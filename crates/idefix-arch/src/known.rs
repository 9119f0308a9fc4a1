//! Static architecture tables.

use std::fmt;

/// CPU architectures, alphabetically ordered.
pub const CPU_ARCHS: &[&str] = &["BDW", "EPYC", "HSW", "SKX", "WSM"];

/// GPU architectures, alphabetically ordered.
pub const GPU_ARCHS: &[&str] = &[
    "Kepler30",
    "Maxwell50",
    "Pascal60",
    "Pascal61",
    "Turing75",
    "Volta70",
    "Volta72",
];

/// CPU architecture used when none is requested.
pub const DEFAULT_CPU: &str = "BDW";

/// GPU architecture used when none is requested.
pub const DEFAULT_GPU: &str = "Pascal60";

/// The two kinds of execution target an architecture can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TargetKind {
    Cpu,
    Gpu,
}

impl TargetKind {
    /// Both kinds, CPU first.
    pub const ALL: [TargetKind; 2] = [TargetKind::Cpu, TargetKind::Gpu];

    /// The table of identifiers belonging to this kind.
    pub fn archs(self) -> &'static [&'static str] {
        match self {
            TargetKind::Cpu => CPU_ARCHS,
            TargetKind::Gpu => GPU_ARCHS,
        }
    }

    /// The identifier used when the user requests nothing of this kind.
    pub fn default_arch(self) -> &'static str {
        match self {
            TargetKind::Cpu => DEFAULT_CPU,
            TargetKind::Gpu => DEFAULT_GPU,
        }
    }

    /// Classify an identifier, returning the table entry it matched.
    pub fn classify(name: &str) -> Option<(TargetKind, &'static str)> {
        Self::ALL.into_iter().find_map(|kind| {
            kind.archs()
                .iter()
                .find(|known| **known == name)
                .map(|known| (kind, *known))
        })
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Cpu => write!(f, "CPU"),
            TargetKind::Gpu => write!(f, "GPU"),
        }
    }
}

/// Every known identifier, CPU table first.
pub fn all_archs() -> impl Iterator<Item = &'static str> {
    CPU_ARCHS.iter().chain(GPU_ARCHS.iter()).copied()
}
