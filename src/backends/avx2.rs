//! AVX2 backend implementation (x86_64 advanced SIMD)
//!
//! 256-bit registers hold eight `i32` lanes. AVX2 covers every kernel of
//! [`LaneBackend`] with a single instruction, including the 32-bit low
//! multiply and signed min/max.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::LaneBackend;

/// AVX2 backend (256-bit SIMD for x86_64)
pub struct Avx2Backend;

const LANES: usize = 8;

/// Eight lanes per iteration, scalar tail
macro_rules! avx2_kernel {
    ($a:ident, $b:ident, $out:ident, $intrinsic:ident, $scalar:expr) => {{
        let len = $a.len();
        let mut i = 0;

        while i + LANES <= len {
            let va = _mm256_loadu_si256($a.as_ptr().add(i) as *const __m256i);
            let vb = _mm256_loadu_si256($b.as_ptr().add(i) as *const __m256i);
            let vr = $intrinsic(va, vb);
            _mm256_storeu_si256($out.as_mut_ptr().add(i) as *mut __m256i, vr);
            i += LANES;
        }

        let scalar: fn(i32, i32) -> i32 = $scalar;
        for j in i..len {
            $out[j] = scalar($a[j], $b[j]);
        }
    }};
}

impl LaneBackend for Avx2Backend {
    #[target_feature(enable = "avx2")]
    unsafe fn add(a: &[i32], b: &[i32], out: &mut [i32]) {
        avx2_kernel!(a, b, out, _mm256_add_epi32, i32::wrapping_add);
    }

    #[target_feature(enable = "avx2")]
    unsafe fn sub(a: &[i32], b: &[i32], out: &mut [i32]) {
        avx2_kernel!(a, b, out, _mm256_sub_epi32, i32::wrapping_sub);
    }

    #[target_feature(enable = "avx2")]
    unsafe fn mul(a: &[i32], b: &[i32], out: &mut [i32]) {
        avx2_kernel!(a, b, out, _mm256_mullo_epi32, i32::wrapping_mul);
    }

    #[target_feature(enable = "avx2")]
    unsafe fn and(a: &[i32], b: &[i32], out: &mut [i32]) {
        avx2_kernel!(a, b, out, _mm256_and_si256, |x, y| x & y);
    }

    #[target_feature(enable = "avx2")]
    unsafe fn or(a: &[i32], b: &[i32], out: &mut [i32]) {
        avx2_kernel!(a, b, out, _mm256_or_si256, |x, y| x | y);
    }

    #[target_feature(enable = "avx2")]
    unsafe fn xor(a: &[i32], b: &[i32], out: &mut [i32]) {
        avx2_kernel!(a, b, out, _mm256_xor_si256, |x, y| x ^ y);
    }

    #[target_feature(enable = "avx2")]
    unsafe fn min(a: &[i32], b: &[i32], out: &mut [i32]) {
        avx2_kernel!(a, b, out, _mm256_min_epi32, i32::min);
    }

    #[target_feature(enable = "avx2")]
    unsafe fn max(a: &[i32], b: &[i32], out: &mut [i32]) {
        avx2_kernel!(a, b, out, _mm256_max_epi32, i32::max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::scalar::ScalarBackend;

    type Kernel = unsafe fn(&[i32], &[i32], &mut [i32]);

    fn inputs(len: usize) -> (Vec<i32>, Vec<i32>) {
        let corner = [i32::MIN, i32::MAX, 0, -1, 1, 0x3333_3333, -100];
        let a = (0..len).map(|i| corner[i % corner.len()] ^ (i as i32)).collect();
        let b = (0..len)
            .map(|i| corner[(i * 5 + 2) % corner.len()].wrapping_add(i as i32))
            .collect();
        (a, b)
    }

    fn assert_matches_scalar(name: &str, simd: Kernel, scalar: Kernel) {
        for len in 0..=35 {
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
    fn test_avx2_mul_wraps() {
        if !is_x86_feature_detected!("avx2") {
            eprintln!("Skipping AVX2 test: CPU does not support AVX2");
            return;
        }

        let a = [65536, 2, 3, 4, 5, 6, 7, 8, i32::MAX];
        let b = [65536, 8, 7, 6, 5, 4, 3, 2, 2];
        let mut out = [0; 9];
        unsafe { Avx2Backend::mul(&a, &b, &mut out) };
        assert_eq!(out, [0, 16, 21, 24, 25, 24, 21, 16, -2]);
    }

    #[test]
    fn test_avx2_matches_scalar() {
        if !is_x86_feature_detected!("avx2") {
            eprintln!("Skipping AVX2 test: CPU does not support AVX2");
            return;
        }

        assert_matches_scalar("add", Avx2Backend::add, ScalarBackend::add);
        assert_matches_scalar("sub", Avx2Backend::sub, ScalarBackend::sub);
        assert_matches_scalar("mul", Avx2Backend::mul, ScalarBackend::mul);
        assert_matches_scalar("and", Avx2Backend::and, ScalarBackend::and);
        assert_matches_scalar("or", Avx2Backend::or, ScalarBackend::or);
        assert_matches_scalar("xor", Avx2Backend::xor, ScalarBackend::xor);
        assert_matches_scalar("min", Avx2Backend::min, ScalarBackend::min);
        assert_matches_scalar("max", Avx2Backend::max, ScalarBackend::max);
    }
}
