//! Kokkos target architectures known to the Idefix build.
//!
//! A build targets exactly one CPU architecture and, when compiled for a
//! device, exactly one GPU architecture. Users request at most one of each;
//! whatever they leave out falls back to [`DEFAULT_CPU`] / [`DEFAULT_GPU`].

pub mod error;
pub mod known;
pub mod resolve;

pub use error::{ArchError, Result};
pub use known::{all_archs, TargetKind, CPU_ARCHS, DEFAULT_CPU, DEFAULT_GPU, GPU_ARCHS};
pub use resolve::{is_gpu_requested, resolve_archs, ResolvedArchs};
