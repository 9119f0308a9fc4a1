//! Human-readable summary of a configured build.

use std::fmt;

use idefix_arch::{is_gpu_requested, resolve_archs, TargetKind};

use crate::error::Result;
use crate::options::{keys, MakefileOptions};

const RULE: &str = "-----------------------------------------------------------";

/// Summary printed after a successful configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigReport {
    pub mhd: bool,
    /// Effective compiler.
    pub compiler: String,
    pub mpi: bool,
    /// Execution target kind.
    pub target: TargetKind,
    /// Architecture selected for `target`.
    pub arch: &'static str,
    /// OpenMP status; only meaningful for CPU targets.
    pub openmp: Option<bool>,
    pub cflags: String,
}

impl ConfigReport {
    /// Build the report from the architectures exactly as requested.
    ///
    /// The execution target and its architecture are recomputed from
    /// `requested`, so the report reflects the same resolution rules as the
    /// generated Makefile.
    pub fn new<S: AsRef<str>>(
        requested: &[S],
        openmp: bool,
        mpi: bool,
        mhd: bool,
        options: &MakefileOptions,
    ) -> Result<Self> {
        let resolved = resolve_archs(requested)?;
        let target = if is_gpu_requested(requested) {
            TargetKind::Gpu
        } else {
            TargetKind::Cpu
        };

        Ok(Self {
            mhd,
            compiler: options.get(keys::CXX).to_string(),
            mpi,
            target,
            arch: resolved.get(target),
            openmp: (target == TargetKind::Cpu).then_some(openmp),
            cflags: options.get(keys::CXXFLAGS).to_string(),
        })
    }
}

fn status(flag: bool) -> &'static str {
    if flag {
        "enabled"
    } else {
        "disabled"
    }
}

impl fmt::Display for ConfigReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "Idefix successfully configured with the following options:")?;
        writeln!(f)?;
        writeln!(f, "MHD: {}", status(self.mhd))?;
        writeln!(f, "Compiler: {}", self.compiler)?;
        writeln!(f, "MPI: {}", status(self.mpi))?;
        writeln!(f, "Execution target: {}", self.target)?;
        writeln!(f, "Target architecture: {}", self.arch)?;
        if let Some(openmp) = self.openmp {
            writeln!(f, "OpenMP: {}", status(openmp))?;
        }
        writeln!(f, "Cflags: {}", self.cflags)?;
        write!(f, "{RULE}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{derive_options, BuildFlags};
    use idefix_arch::ResolvedArchs;

    const NONE: &[&str] = &[];

    #[test]
    fn cpu_report_lines() {
        let flags = BuildFlags {
            openmp: true,
            mhd: true,
            ..Default::default()
        };
        let options = derive_options(&ResolvedArchs::default(), false, &flags);
        let report = ConfigReport::new(NONE, true, false, true, &options)
            .unwrap()
            .to_string();

        assert!(report.contains("MHD: enabled"));
        assert!(report.contains("MPI: disabled"));
        assert!(report.contains("Execution target: CPU"));
        assert!(report.contains("Target architecture: BDW"));
        assert!(report.contains("OpenMP: enabled"));
        assert!(report.contains("Compiler: g++"));
        assert!(report.contains("Cflags: -O3 -DMHD=YES"));
    }

    #[test]
    fn gpu_report_omits_openmp() {
        let requested = ["SKX", "Turing75"];
        let resolved = resolve_archs(&requested).unwrap();
        let flags = BuildFlags {
            mpi: true,
            ..Default::default()
        };
        let options = derive_options(&resolved, true, &flags);
        let report = ConfigReport::new(&requested, false, true, false, &options).unwrap();

        assert_eq!(report.target, TargetKind::Gpu);
        assert_eq!(report.arch, "Turing75");
        assert_eq!(report.openmp, None);

        let text = report.to_string();
        assert!(text.contains("Execution target: GPU"));
        assert!(text.contains("MPI: enabled"));
        assert!(!text.contains("OpenMP"));
    }

    #[test]
    fn report_layout() {
        let options: MakefileOptions = [("cxx", "g++"), ("cxxflags", "-O3 -DMHD=NO")]
            .into_iter()
            .collect();
        let report = ConfigReport::new(&["EPYC"], false, false, false, &options).unwrap();
        let expected = [
            RULE,
            "Idefix successfully configured with the following options:",
            "",
            "MHD: disabled",
            "Compiler: g++",
            "MPI: disabled",
            "Execution target: CPU",
            "Target architecture: EPYC",
            "OpenMP: disabled",
            "Cflags: -O3 -DMHD=NO",
            RULE,
        ]
        .join("\n");
        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn invalid_request_is_an_error() {
        let options = MakefileOptions::new();
        assert!(ConfigReport::new(&["BDW", "SKX"], false, false, false, &options).is_err());
    }
}
