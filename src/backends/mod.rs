//! Accelerated slice kernels for the plain wraparound binary operators
//!
//! Vectors evaluate every operator through the scalar reference in
//! [`crate::ops`]. For the eight operators whose SIMD lowering is a single
//! instruction, the lane loop may instead be handed to one of these backends.
//! All backends must produce results bit-identical to [`scalar::ScalarBackend`].
//!
//! # Safety
//!
//! All `unsafe` code is isolated within backend implementations. The public API
//! remains safe.
//!
//! # Backends
//!
//! - `scalar`: portable baseline, also the reference
//! - `sse2`: x86_64 baseline SIMD (128-bit, 4 lanes per register)
//! - `avx2`: x86_64 advanced SIMD (256-bit, 8 lanes per register)

pub mod scalar;

#[cfg(target_arch = "x86_64")]
pub mod sse2;

#[cfg(target_arch = "x86_64")]
pub mod avx2;

/// Slice kernels over `i32` lanes
///
/// # Safety
///
/// Implementations may use unsafe SIMD intrinsics. Callers must ensure:
/// - `a`, `b` and `out` have the same length
/// - the CPU supports the instruction set of the implementation
pub trait LaneBackend {
    /// Wrapping addition: `out[i] = a[i] + b[i]`
    ///
    /// # Safety
    ///
    /// See the trait-level contract.
    unsafe fn add(a: &[i32], b: &[i32], out: &mut [i32]);

    /// Wrapping subtraction: `out[i] = a[i] - b[i]`
    ///
    /// # Safety
    ///
    /// See the trait-level contract.
    unsafe fn sub(a: &[i32], b: &[i32], out: &mut [i32]);

    /// Wrapping multiplication (low 32 bits of the product)
    ///
    /// # Safety
    ///
    /// See the trait-level contract.
    unsafe fn mul(a: &[i32], b: &[i32], out: &mut [i32]);

    /// # Safety
    ///
    /// See the trait-level contract.
    unsafe fn and(a: &[i32], b: &[i32], out: &mut [i32]);

    /// # Safety
    ///
    /// See the trait-level contract.
    unsafe fn or(a: &[i32], b: &[i32], out: &mut [i32]);

    /// # Safety
    ///
    /// See the trait-level contract.
    unsafe fn xor(a: &[i32], b: &[i32], out: &mut [i32]);

    /// Signed minimum
    ///
    /// # Safety
    ///
    /// See the trait-level contract.
    unsafe fn min(a: &[i32], b: &[i32], out: &mut [i32]);

    /// Signed maximum
    ///
    /// # Safety
    ///
    /// See the trait-level contract.
    unsafe fn max(a: &[i32], b: &[i32], out: &mut [i32]);
}
