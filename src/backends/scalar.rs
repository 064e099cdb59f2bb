//! Scalar (non-SIMD) backend implementation
//!
//! Portable baseline that works on all platforms. It is also the reference
//! the SIMD backends are tested against.

use super::LaneBackend;

/// Scalar backend (portable, no SIMD)
pub struct ScalarBackend;

// SAFETY (all methods): slice accesses are bounds-checked by the iterators, no
// raw pointer arithmetic is performed. Marked unsafe only to match the trait.
impl LaneBackend for ScalarBackend {
    unsafe fn add(a: &[i32], b: &[i32], out: &mut [i32]) {
        for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
            *o = x.wrapping_add(y);
        }
    }

    unsafe fn sub(a: &[i32], b: &[i32], out: &mut [i32]) {
        for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
            *o = x.wrapping_sub(y);
        }
    }

    unsafe fn mul(a: &[i32], b: &[i32], out: &mut [i32]) {
        for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
            *o = x.wrapping_mul(y);
        }
    }

    unsafe fn and(a: &[i32], b: &[i32], out: &mut [i32]) {
        for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
            *o = x & y;
        }
    }

    unsafe fn or(a: &[i32], b: &[i32], out: &mut [i32]) {
        for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
            *o = x | y;
        }
    }

    unsafe fn xor(a: &[i32], b: &[i32], out: &mut [i32]) {
        for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
            *o = x ^ y;
        }
    }

    unsafe fn min(a: &[i32], b: &[i32], out: &mut [i32]) {
        for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
            *o = x.min(y);
        }
    }

    unsafe fn max(a: &[i32], b: &[i32], out: &mut [i32]) {
        for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
            *o = x.max(y);
        }
    }
}
