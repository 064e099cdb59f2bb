//! Runtime configuration
//!
//! [`LaneConfig`] selects the backend used by the whole-buffer drivers in
//! [`crate::buffer`], the register width of their species, and the length at
//! which reductions switch to the parallel path.
//!
//! # Examples
//!
//! ```
//! use lanewise::{Backend, LaneConfig};
//!
//! // Portable preset: scalar kernels on 128-bit vectors
//! let portable = LaneConfig::portable().build().unwrap();
//! assert_eq!(portable.species().length(), 4);
//!
//! // Custom configuration using builder pattern
//! let config = LaneConfig::new()
//!     .with_backend(Backend::Scalar)
//!     .with_max_bits(256)
//!     .with_parallel_threshold(1 << 16)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.species().length(), 8);
//! ```

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::{LaneError, Result};
use crate::species::Species;
use crate::Backend;

/// Smallest accepted register width
pub const MIN_VECTOR_BITS: usize = 64;
/// Largest accepted register width
pub const MAX_VECTOR_BITS: usize = 2048;
/// Default input length above which reductions run on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 20;

/// Backend, width and parallelism settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneConfig {
    /// Requested backend, `Auto` for runtime detection
    pub backend: Backend,
    /// Register width override for the `SMaxBit` shape
    pub max_bits: Option<usize>,
    /// Input length at or above which [`crate::buffer::par_reduce`] splits work
    pub parallel_threshold: usize,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Auto,
            max_bits: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl LaneConfig {
    /// Auto-detected backend and width
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Override the `SMaxBit` register width
    pub fn with_max_bits(mut self, bits: usize) -> Self {
        self.max_bits = Some(bits);
        self
    }

    pub fn with_parallel_threshold(mut self, len: usize) -> Self {
        self.parallel_threshold = len;
        self
    }

    /// Validate the configuration
    ///
    /// Fails with [`LaneError::InvalidArgument`] when the width override is not
    /// a power of two in `[64, 2048]`, and with
    /// [`LaneError::UnsupportedBackend`] when the requested backend cannot run
    /// on this CPU.
    #[cfg_attr(feature = "tracing", instrument(level = "debug"))]
    pub fn build(self) -> Result<Self> {
        if let Some(bits) = self.max_bits {
            if !bits.is_power_of_two() || !(MIN_VECTOR_BITS..=MAX_VECTOR_BITS).contains(&bits) {
                return Err(LaneError::InvalidArgument(format!(
                    "max_bits must be a power of two in [{MIN_VECTOR_BITS}, {MAX_VECTOR_BITS}], got {bits}"
                )));
            }
        }
        if !crate::is_backend_available(self.backend) {
            return Err(LaneError::UnsupportedBackend(self.backend));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            backend = ?self.resolved_backend(),
            max_bits = self.max_shape_bits(),
            "lane config resolved"
        );

        Ok(self)
    }

    /// Scalar kernels on 128-bit vectors, identical on every platform
    pub fn portable() -> Self {
        Self::new().with_backend(Backend::Scalar).with_max_bits(128)
    }

    /// Best backend and widest register of the running CPU
    pub fn native() -> Self {
        Self::new().with_backend(Backend::Auto)
    }

    /// The concrete backend, with `Auto` replaced by the detected one
    pub fn resolved_backend(&self) -> Backend {
        match self.backend {
            Backend::Auto => crate::detected_backend(),
            other => other,
        }
    }

    /// Register width used for the `SMaxBit` shape
    pub fn max_shape_bits(&self) -> usize {
        self.max_bits
            .unwrap_or_else(|| self.resolved_backend().max_vector_bits())
    }

    /// `SMaxBit` species for this configuration
    pub fn species(&self) -> Species {
        Species::with_max_bits(self.max_shape_bits())
    }
}
