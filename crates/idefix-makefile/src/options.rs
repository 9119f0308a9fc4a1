//! Derivation of Makefile placeholder values from the build configuration.

use std::collections::BTreeMap;

use idefix_arch::ResolvedArchs;

/// Placeholder names understood by `Makefile.in`.
pub mod keys {
    pub const CXX: &str = "cxx";
    pub const CXXFLAGS: &str = "cxxflags";
    pub const SED_COMMAND: &str = "sed-command";
    pub const EXTRA_LINE: &str = "extraLine";
    pub const KOKKOS_DEVICES: &str = "kokkosDevices";
    pub const KOKKOS_ARCH: &str = "kokkosArch";
    pub const EXTRA_INCLUDE_DIR: &str = "extraIncludeDir";
    pub const EXTRA_VPATH: &str = "extraVpath";
    pub const EXTRA_OBJ: &str = "extraObj";
}

/// Optimisation level every build starts from.
const BASE_CXXFLAGS: &str = "-O3";
/// Kokkos' nvcc wrapper, used as the compiler for every GPU build.
const NVCC_WRAPPER: &str = "${KOKKOS_PATH}/bin/nvcc_wrapper";
/// Compiler wrapper provided by the MPI installation.
const MPI_CXX: &str = "mpicxx";
/// Host compiler when nothing else is requested.
const DEFAULT_CXX: &str = "g++";

/// Flags chosen by the user that shape the Makefile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildFlags {
    /// Explicit compiler override.
    pub cxx: Option<String>,
    /// OpenMP backend; expected to be off already for GPU builds.
    pub openmp: bool,
    pub mpi: bool,
    pub mhd: bool,
    /// Platform in-place `sed` invocation, passed through untouched.
    pub sed_command: String,
}

/// Placeholder name to substitution value. Missing keys read as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MakefileOptions {
    values: BTreeMap<String, String>,
}

impl MakefileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, or the empty string if it was never set.
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Replace the value for `key`.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Append to the value for `key`, starting from `""` if unset.
    pub fn append(&mut self, key: &str, value: &str) {
        self.values.entry(key.to_string()).or_default().push_str(value);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MakefileOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Build the placeholder record for a validated configuration.
pub fn derive_options(archs: &ResolvedArchs, use_gpu: bool, flags: &BuildFlags) -> MakefileOptions {
    let mut options = MakefileOptions::new();
    options.set(keys::CXXFLAGS, BASE_CXXFLAGS);
    options.set(keys::SED_COMMAND, flags.sed_command.as_str());

    if use_gpu {
        options.set(keys::EXTRA_LINE, "\nKOKKOS_CUDA_OPTIONS = \"enable_lambda\"");
        options.set(keys::CXX, NVCC_WRAPPER);
        options.set(keys::KOKKOS_DEVICES, "\"Cuda\"");
        options.set(keys::KOKKOS_ARCH, format!("{},{}", archs.cpu, archs.gpu));

        // nvcc_wrapper forwards host code to this compiler
        let backend = match (&flags.cxx, flags.mpi) {
            (Some(cxx), _) => Some(cxx.as_str()),
            (None, true) => Some(MPI_CXX),
            (None, false) => None,
        };
        if let Some(backend) = backend {
            options.append(
                keys::EXTRA_LINE,
                &format!("\nexport NVCC_WRAPPER_DEFAULT_COMPILER = {backend}"),
            );
        }
    } else {
        let cxx = match (&flags.cxx, flags.mpi) {
            (Some(cxx), _) => cxx.as_str(),
            (None, true) => MPI_CXX,
            (None, false) => DEFAULT_CXX,
        };
        options.set(keys::CXX, cxx);
        options.set(keys::KOKKOS_ARCH, archs.cpu);
        options.set(
            keys::KOKKOS_DEVICES,
            if flags.openmp { "\"OpenMP\"" } else { "\"Serial\"" },
        );
    }

    if flags.mpi {
        options.append(keys::EXTRA_INCLUDE_DIR, " -I$(SRC)/dataBlock/mpi");
        options.append(keys::EXTRA_VPATH, ":$(SRC)/dataBlock/mpi");
        options.append(keys::EXTRA_OBJ, " mpi.o");
        options.append(keys::CXXFLAGS, " -DWITH_MPI");
    }

    let (solvers, mhd) = if flags.mhd {
        ("MHDsolvers", "YES")
    } else {
        ("HDsolvers", "NO")
    };
    options.append(keys::EXTRA_INCLUDE_DIR, &format!(" -I$(SRC)/hydro/{solvers}"));
    options.append(keys::EXTRA_VPATH, &format!(":$(SRC)/hydro/{solvers}"));
    options.append(keys::CXXFLAGS, &format!(" -DMHD={mhd}"));

    tracing::debug!(?options, "derived makefile options");
    options
}
