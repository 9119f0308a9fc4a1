//! The configure pipeline: resolve architectures, derive options, write the
//! Makefile, report.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use idefix_arch::{is_gpu_requested, resolve_archs};
use idefix_makefile::{derive_options, sed_command, write_makefile, BuildFlags, ConfigReport};

const GPU_FLAG_DEPRECATION: &str = "The -gpu flag is deprecated. Using it will raise an error in a future release. \
     Please explicitly request a GPU architecture via the -arch argument.";

/// Everything the user asked for on the command line.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub directory: PathBuf,
    pub mhd: bool,
    pub gpu: bool,
    pub cxx: Option<String>,
    pub archs: Vec<String>,
    pub openmp: bool,
    pub mpi: bool,
}

/// Generate `<directory>/Makefile` from `<root>/Makefile.in`.
pub fn run(root: &Path, request: Request) -> Result<ConfigReport> {
    let resolved = resolve_archs(&request.archs)?;
    let use_gpu = is_gpu_requested(&request.archs);

    for warning in warnings(&request, use_gpu, resolved.gpu) {
        eprintln!("warning: {warning}");
    }
    let openmp = request.openmp && !use_gpu;

    let flags = BuildFlags {
        cxx: request.cxx,
        openmp,
        mpi: request.mpi,
        mhd: request.mhd,
        sed_command: sed_command().to_string(),
    };
    let options = derive_options(&resolved, use_gpu, &flags);

    let written = write_makefile(root, &request.directory, &options)?;
    tracing::info!(path = %written.display(), "makefile generated");

    ConfigReport::new(&request.archs, openmp, request.mpi, request.mhd, &options)
        .context("building configuration report")
}

/// Non-fatal diagnostics about deprecated or ignored flags.
fn warnings(request: &Request, use_gpu: bool, default_gpu: &str) -> Vec<String> {
    let mut out = Vec::new();
    if request.gpu {
        out.push(GPU_FLAG_DEPRECATION.to_string());
        if !use_gpu {
            out.push(format!(
                "-gpu flag was received, but no GPU architecture was specified. Defaulting to {default_gpu}"
            ));
        }
    }
    if request.openmp && use_gpu {
        out.push("with a GPU arch, -openmp flag is ignored.".to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn setup(template: &str) -> (tempfile::TempDir, tempfile::TempDir) {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("Makefile.in"), template).unwrap();
        (root, tempfile::tempdir().unwrap())
    }

    #[test]
    fn cpu_build_writes_makefile() {
        let (root, out) = setup("CXX=@cxx@\nARCH=@kokkosArch@\nDEV=@kokkosDevices@\nX=@unused@");
        let request = Request {
            directory: out.path().to_path_buf(),
            openmp: true,
            archs: vec!["SKX".into()],
            ..Default::default()
        };

        let report = run(root.path(), request).unwrap();
        let makefile = fs::read_to_string(out.path().join("Makefile")).unwrap();
        assert_eq!(makefile, "CXX=g++\nARCH=SKX\nDEV=\"OpenMP\"\nX=");
        assert_eq!(report.openmp, Some(true));
    }

    #[test]
    fn gpu_build_forces_openmp_off() {
        let (root, out) = setup("CXX=@cxx@\nDEV=@kokkosDevices@@extraLine@");
        let request = Request {
            directory: out.path().to_path_buf(),
            openmp: true,
            cxx: Some("clang++".into()),
            archs: vec!["Volta70".into()],
            ..Default::default()
        };

        let report = run(root.path(), request).unwrap();
        let makefile = fs::read_to_string(out.path().join("Makefile")).unwrap();
        assert_eq!(
            makefile,
            "CXX=${KOKKOS_PATH}/bin/nvcc_wrapper\nDEV=\"Cuda\"\n\
             KOKKOS_CUDA_OPTIONS = \"enable_lambda\"\n\
             export NVCC_WRAPPER_DEFAULT_COMPILER = clang++"
        );
        assert_eq!(report.openmp, None);
        assert_eq!(report.arch, "Volta70");
    }

    #[test]
    fn invalid_archs_write_nothing() {
        let (root, out) = setup("CXX=@cxx@");
        let request = Request {
            directory: out.path().to_path_buf(),
            archs: vec!["BDW".into(), "SKX".into()],
            ..Default::default()
        };

        let err = run(root.path(), request).unwrap_err();
        assert!(format!("{err:#}").contains("(BDW, SKX)"));
        assert!(!out.path().join("Makefile").exists());
    }

    #[test]
    fn deprecated_gpu_flag_warnings() {
        let request = Request {
            gpu: true,
            ..Default::default()
        };
        let w = warnings(&request, false, "Pascal60");
        assert_eq!(w.len(), 2);
        assert!(w[0].starts_with("The -gpu flag is deprecated."));
        assert!(w[1].ends_with("Defaulting to Pascal60"));

        let with_arch = Request {
            gpu: true,
            archs: vec!["Turing75".into()],
            ..Default::default()
        };
        assert_eq!(warnings(&with_arch, true, "Turing75").len(), 1);
    }

    #[test]
    fn openmp_with_gpu_warns() {
        let request = Request {
            openmp: true,
            ..Default::default()
        };
        assert!(warnings(&request, false, "Pascal60").is_empty());
        assert_eq!(
            warnings(&request, true, "Pascal60"),
            ["with a GPU arch, -openmp flag is ignored."]
        );
    }
}
