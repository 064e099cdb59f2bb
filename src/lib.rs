//! Lanewise: portable fixed-width lane-parallel integer vectors
//!
//! **Lanewise** provides immutable SIMD-style vectors of `N` signed 32-bit
//! lanes, where `N` is fixed by a [`Species`] (element type plus register
//! shape). Every operation is a pure function with an exact scalar reference:
//!
//! 1. **Elementwise** - wraparound arithmetic, bitwise ops, shifts taken
//!    modulo 32, saturating and unsigned variants, masked pass-through
//! 2. **Reductions** - associative folds with identity elements, masked and
//!    widened forms, whole-buffer AllReduce
//! 3. **Masks and shuffles** - boolean lane sets, rearrange, select-from,
//!    compress/expand, slice/unslice
//! 4. **Construction** - broadcast, zero, slice I/O, lane access, hashing
//!
//! # Design Principles
//!
//! - **Write once, every element type**: operations are generic over
//!   [`element::LaneElement`]
//! - **One operator enum, one entry point**: [`Vector::lanewise`] takes a
//!   [`BinaryOp`] tag instead of one method per operator
//! - **Runtime dispatch**: the plain arithmetic kernels use the best SIMD
//!   backend detected on the running CPU
//! - **Zero unsafe in public API**: `unsafe` is isolated in [`backends`]
//!
//! # Quick Start
//!
//! ```rust
//! use lanewise::{BinaryOp, IntVector, Mask, ReductionOp, Species, VectorShape};
//!
//! let species = Species::of(VectorShape::S128Bit);
//! let a = IntVector::from_slice(species, &[10, 10, 10, 10], 0).unwrap();
//! let b = IntVector::broadcast(species, 1);
//! let m = Mask::from_bools(species, &[true, false, true, false], 0).unwrap();
//!
//! // Unset lanes keep the first operand
//! let r = a.lanewise_masked(BinaryOp::Sub, &b, &m).unwrap();
//! assert_eq!(r.to_vec(), vec![9, 10, 9, 10]);
//! assert_eq!(r.reduce_lanes(ReductionOp::Add), 38);
//! ```

use std::sync::OnceLock;

pub mod backends;
pub mod buffer;
pub mod config;
pub mod element;
pub mod error;
pub mod generators;
pub mod mask;
pub mod ops;
pub mod permute;
pub mod reduction;
pub mod shuffle;
pub mod species;
pub mod vector;

pub use config::LaneConfig;
pub use element::LaneElement;
pub use error::{LaneError, Result};
pub use mask::Mask;
pub use ops::{BinaryOp, Comparison, ReductionOp, TernaryOp, TestOp, UnaryOp};
pub use shuffle::Shuffle;
pub use species::{ElementType, Species, VectorShape};
pub use vector::{IntVector, Operand, Vector};

/// Backend execution target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Scalar fallback (no SIMD)
    Scalar,
    /// SSE2 (x86_64 baseline)
    SSE2,
    /// AVX (256-bit, no integer ops)
    AVX,
    /// AVX2 (256-bit integer)
    AVX2,
    /// AVX-512 (512-bit)
    AVX512,
    /// ARM NEON
    NEON,
    /// WebAssembly SIMD128
    WasmSIMD,
    /// Auto-select best available
    Auto,
}

impl Backend {
    /// Select the best available backend for the current platform
    ///
    /// This is a convenience wrapper around `select_best_available_backend()`
    pub fn select_best() -> Self {
        select_best_available_backend()
    }

    /// Widest register of this backend, the size of `VectorShape::SMaxBit`
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::Backend;
    ///
    /// assert_eq!(Backend::AVX512.max_vector_bits(), 512);
    /// assert_eq!(Backend::AVX2.max_vector_bits(), 256);
    /// assert_eq!(Backend::Scalar.max_vector_bits(), 128);
    /// ```
    pub fn max_vector_bits(self) -> usize {
        match self {
            Backend::AVX512 => 512,
            Backend::AVX | Backend::AVX2 => 256,
            Backend::SSE2 | Backend::NEON | Backend::WasmSIMD | Backend::Scalar => 128,
            Backend::Auto => detected_backend().max_vector_bits(),
        }
    }
}

/// Detect best SIMD backend for x86/x86_64 platforms
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
fn detect_x86_backend() -> Backend {
    if is_x86_feature_detected!("avx512f") {
        return Backend::AVX512;
    }
    if is_x86_feature_detected!("avx2") {
        return Backend::AVX2;
    }
    if is_x86_feature_detected!("avx") {
        return Backend::AVX;
    }
    if is_x86_feature_detected!("sse2") {
        return Backend::SSE2;
    }
    Backend::Scalar
}

/// Detect best SIMD backend for ARM platforms
#[cfg(any(target_arch = "aarch64", target_arch = "arm"))]
fn detect_arm_backend() -> Backend {
    #[cfg(target_feature = "neon")]
    {
        Backend::NEON
    }
    #[cfg(not(target_feature = "neon"))]
    {
        Backend::Scalar
    }
}

/// Detect best SIMD backend for WebAssembly
#[cfg(target_arch = "wasm32")]
fn detect_wasm_backend() -> Backend {
    #[cfg(target_feature = "simd128")]
    {
        Backend::WasmSIMD
    }
    #[cfg(not(target_feature = "simd128"))]
    {
        Backend::Scalar
    }
}

/// Select the best available backend for the current platform
///
/// Performs runtime CPU feature detection. Priority:
///
/// **x86/x86_64**: AVX-512, AVX2, AVX, SSE2, Scalar
///
/// **ARM**: NEON, Scalar
///
/// **WASM**: SIMD128, Scalar
///
/// **Other platforms**: Scalar
///
/// # Examples
///
/// ```
/// use lanewise::select_best_available_backend;
///
/// let backend = select_best_available_backend();
/// println!("Using backend: {:?}", backend);
/// ```
pub fn select_best_available_backend() -> Backend {
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    {
        detect_x86_backend()
    }

    #[cfg(any(target_arch = "aarch64", target_arch = "arm"))]
    {
        detect_arm_backend()
    }

    #[cfg(target_arch = "wasm32")]
    {
        detect_wasm_backend()
    }

    #[cfg(not(any(
        target_arch = "x86_64",
        target_arch = "x86",
        target_arch = "aarch64",
        target_arch = "arm",
        target_arch = "wasm32"
    )))]
    {
        Backend::Scalar
    }
}

/// Backend detected once per process and reused by every vector operation
pub fn detected_backend() -> Backend {
    static DETECTED: OnceLock<Backend> = OnceLock::new();
    *DETECTED.get_or_init(|| {
        let backend = select_best_available_backend();
        #[cfg(feature = "tracing")]
        tracing::debug!(?backend, bits = backend.max_vector_bits(), "lane backend detected");
        backend
    })
}

/// Whether `backend` can run on this CPU
///
/// `Scalar` and `Auto` are always available.
pub fn is_backend_available(backend: Backend) -> bool {
    match backend {
        Backend::Scalar | Backend::Auto => true,
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Backend::SSE2 => is_x86_feature_detected!("sse2"),
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Backend::AVX => is_x86_feature_detected!("avx"),
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Backend::AVX2 => is_x86_feature_detected!("avx2"),
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Backend::AVX512 => is_x86_feature_detected!("avx512f"),
        Backend::NEON | Backend::WasmSIMD => select_best_available_backend() == backend,
        #[allow(unreachable_patterns)]
        _ => false,
    }
}
