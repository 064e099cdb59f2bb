//! SSE2 backend implementation (x86_64 baseline SIMD)
//!
//! 128-bit registers hold four `i32` lanes. SSE2 has no 32-bit low multiply
//! and no signed 32-bit min/max (both arrived with SSE4.1), so those three
//! kernels run the scalar loop.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::scalar::ScalarBackend;
use super::LaneBackend;

/// SSE2 backend (128-bit SIMD for x86_64)
pub struct Sse2Backend;

const LANES: usize = 4;

/// Four lanes per iteration, scalar tail
macro_rules! sse2_kernel {
    ($a:ident, $b:ident, $out:ident, $intrinsic:ident, $scalar:expr) => {{
        let len = $a.len();
        let mut i = 0;

        while i + LANES <= len {
            let va = _mm_loadu_si128($a.as_ptr().add(i) as *const __m128i);
            let vb = _mm_loadu_si128($b.as_ptr().add(i) as *const __m128i);
            let vr = $intrinsic(va, vb);
            _mm_storeu_si128($out.as_mut_ptr().add(i) as *mut __m128i, vr);
            i += LANES;
        }

        let scalar: fn(i32, i32) -> i32 = $scalar;
        for j in i..len {
            $out[j] = scalar($a[j], $b[j]);
        }
    }};
}

impl LaneBackend for Sse2Backend {
    #[target_feature(enable = "sse2")]
    unsafe fn add(a: &[i32], b: &[i32], out: &mut [i32]) {
        sse2_kernel!(a, b, out, _mm_add_epi32, i32::wrapping_add);
    }

    #[target_feature(enable = "sse2")]
    unsafe fn sub(a: &[i32], b: &[i32], out: &mut [i32]) {
        sse2_kernel!(a, b, out, _mm_sub_epi32, i32::wrapping_sub);
    }

    unsafe fn mul(a: &[i32], b: &[i32], out: &mut [i32]) {
        ScalarBackend::mul(a, b, out);
    }

    #[target_feature(enable = "sse2")]
    unsafe fn and(a: &[i32], b: &[i32], out: &mut [i32]) {
        sse2_kernel!(a, b, out, _mm_and_si128, |x, y| x & y);
    }

    #[target_feature(enable = "sse2")]
    unsafe fn or(a: &[i32], b: &[i32], out: &mut [i32]) {
        sse2_kernel!(a, b, out, _mm_or_si128, |x, y| x | y);
    }

    #[target_feature(enable = "sse2")]
    unsafe fn xor(a: &[i32], b: &[i32], out: &mut [i32]) {
        sse2_kernel!(a, b, out, _mm_xor_si128, |x, y| x ^ y);
    }

    unsafe fn min(a: &[i32], b: &[i32], out: &mut [i32]) {
        ScalarBackend::min(a, b, out);
    }

    unsafe fn max(a: &[i32], b: &[i32], out: &mut [i32]) {
        ScalarBackend::max(a, b, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Kernel = unsafe fn(&[i32], &[i32], &mut [i32]);

    fn inputs(len: usize) -> (Vec<i32>, Vec<i32>) {
        let corner = [i32::MIN, i32::MAX, 0, -1, 1, 0x5555_5555, -0x5555_5556];
        let a = (0..len).map(|i| corner[i % corner.len()]).collect();
        let b = (0..len)
            .map(|i| corner[(i * 3 + 1) % corner.len()].wrapping_mul(i as i32 + 1))
            .collect();
        (a, b)
    }

    fn assert_matches_scalar(name: &str, simd: Kernel, scalar: Kernel) {
        for len in 0..=19 {
            let (a, b) = inputs(len);
            let mut expected = vec![0; len];
            let mut actual = vec![0; len];
            unsafe {
                scalar(&a, &b, &mut expected);
                simd(&a, &b, &mut actual);
            }
            assert_eq!(actual, expected, "{name} differs at len {len}");
        }
    }

    #[test]
    fn test_sse2_add() {
        if !is_x86_feature_detected!("sse2") {
            eprintln!("Skipping SSE2 test: CPU does not support SSE2");
            return;
        }

        let a = [i32::MAX, 2, 3, 4, 5];
        let b = [1, 8, 7, 6, 5];
        let mut out = [0; 5];
        unsafe { Sse2Backend::add(&a, &b, &mut out) };
        assert_eq!(out, [i32::MIN, 10, 10, 10, 10]);
    }

    #[test]
    fn test_sse2_matches_scalar() {
        if !is_x86_feature_detected!("sse2") {
            eprintln!("Skipping SSE2 test: CPU does not support SSE2");
            return;
        }

        assert_matches_scalar("add", Sse2Backend::add, ScalarBackend::add);
        assert_matches_scalar("sub", Sse2Backend::sub, ScalarBackend::sub);
        assert_matches_scalar("mul", Sse2Backend::mul, ScalarBackend::mul);
        assert_matches_scalar("and", Sse2Backend::and, ScalarBackend::and);
        assert_matches_scalar("or", Sse2Backend::or, ScalarBackend::or);
        assert_matches_scalar("xor", Sse2Backend::xor, ScalarBackend::xor);
        assert_matches_scalar("min", Sse2Backend::min, ScalarBackend::min);
        assert_matches_scalar("max", Sse2Backend::max, ScalarBackend::max);
    }
}
