//! Scalar reference semantics for lane elements
//!
//! [`LaneElement`] captures everything a lane-parallel vector needs to know
//! about its element type: bit width, identity constants, wraparound and
//! saturating arithmetic, shift normalization and the bit-manipulation
//! primitives. Vector operations are written once against this trait and are
//! correct by construction whenever the scalar implementation is.
//!
//! Only `i32` is provided. Shift amounts are always reduced modulo
//! [`LaneElement::BITS`] before use.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{BitAnd, BitOr, BitXor, Not};

use crate::backends::scalar::ScalarBackend;
#[cfg(target_arch = "x86_64")]
use crate::backends::{avx2::Avx2Backend, sse2::Sse2Backend};
use crate::backends::LaneBackend;
use crate::ops::BinaryOp;
use crate::species::ElementType;
use crate::Backend;

/// Element type of a lane vector
pub trait LaneElement:
    Copy
    + Default
    + Eq
    + Ord
    + Hash
    + Debug
    + Display
    + Send
    + Sync
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + 'static
{
    /// Runtime tag carried by the species
    const ELEMENT_TYPE: ElementType;
    /// Element width in bits
    const BITS: u32;
    /// Additive identity
    const ZERO: Self;
    /// Multiplicative identity
    const ONE: Self;
    /// Smallest signed value
    const MIN: Self;
    /// Largest signed value
    const MAX: Self;
    /// Every bit set (`-1`)
    const ALL_ONES: Self;

    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    fn wrapping_neg(self) -> Self;
    /// `abs` that maps `MIN` to itself
    fn wrapping_abs(self) -> Self;

    /// Truncating division, `None` for a zero divisor. `MIN / -1` wraps.
    fn checked_div(self, rhs: Self) -> Option<Self>;

    fn saturating_add(self, rhs: Self) -> Self;
    fn saturating_sub(self, rhs: Self) -> Self;
    fn unsigned_saturating_add(self, rhs: Self) -> Self;
    fn unsigned_saturating_sub(self, rhs: Self) -> Self;

    /// Ordering of the same bits read as an unsigned integer
    fn unsigned_cmp(self, rhs: Self) -> std::cmp::Ordering;

    /// Logical left shift by `amount mod BITS`
    fn shl_lanes(self, amount: Self) -> Self;
    /// Logical (zero-filling) right shift by `amount mod BITS`
    fn lshr_lanes(self, amount: Self) -> Self;
    /// Arithmetic (sign-filling) right shift by `amount mod BITS`
    fn ashr_lanes(self, amount: Self) -> Self;
    fn rotate_left_lanes(self, amount: Self) -> Self;
    fn rotate_right_lanes(self, amount: Self) -> Self;

    fn bit_count(self) -> Self;
    fn leading_zeros_count(self) -> Self;
    fn trailing_zeros_count(self) -> Self;
    fn reverse_bits(self) -> Self;
    fn reverse_bytes(self) -> Self;

    /// Gather the bits of `self` selected by `mask` into the low bits
    fn compress_bits(self, mask: Self) -> Self;
    /// Scatter the low bits of `self` to the positions selected by `mask`
    fn expand_bits(self, mask: Self) -> Self;

    /// Narrow a wide scalar, `None` when the value does not round-trip
    fn from_i64_exact(value: i64) -> Option<Self>;
    fn to_i64(self) -> i64;
    fn to_f64(self) -> f64;

    /// Element hash as used by the content hash of vectors and shuffles
    fn content_hash(self) -> i32;

    /// Accelerated slice kernel for `op`, when `backend` provides one.
    ///
    /// Returns `false` when the caller must fall back to the scalar loop.
    fn accelerated_binary(
        _backend: Backend,
        _op: BinaryOp,
        _a: &[Self],
        _b: &[Self],
        _out: &mut [Self],
    ) -> bool {
        false
    }
}

impl LaneElement for i32 {
    const ELEMENT_TYPE: ElementType = ElementType::Int;
    const BITS: u32 = i32::BITS;
    const ZERO: Self = 0;
    const ONE: Self = 1;
    const MIN: Self = i32::MIN;
    const MAX: Self = i32::MAX;
    const ALL_ONES: Self = -1;

    #[inline]
    fn wrapping_add(self, rhs: Self) -> Self {
        i32::wrapping_add(self, rhs)
    }

    #[inline]
    fn wrapping_sub(self, rhs: Self) -> Self {
        i32::wrapping_sub(self, rhs)
    }

    #[inline]
    fn wrapping_mul(self, rhs: Self) -> Self {
        i32::wrapping_mul(self, rhs)
    }

    #[inline]
    fn wrapping_neg(self) -> Self {
        i32::wrapping_neg(self)
    }

    #[inline]
    fn wrapping_abs(self) -> Self {
        i32::wrapping_abs(self)
    }

    #[inline]
    fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs == 0 {
            None
        } else {
            Some(i32::wrapping_div(self, rhs))
        }
    }

    #[inline]
    fn saturating_add(self, rhs: Self) -> Self {
        i32::saturating_add(self, rhs)
    }

    #[inline]
    fn saturating_sub(self, rhs: Self) -> Self {
        i32::saturating_sub(self, rhs)
    }

    #[inline]
    fn unsigned_saturating_add(self, rhs: Self) -> Self {
        (self as u32).saturating_add(rhs as u32) as i32
    }

    #[inline]
    fn unsigned_saturating_sub(self, rhs: Self) -> Self {
        (self as u32).saturating_sub(rhs as u32) as i32
    }

    #[inline]
    fn unsigned_cmp(self, rhs: Self) -> std::cmp::Ordering {
        (self as u32).cmp(&(rhs as u32))
    }

    #[inline]
    fn shl_lanes(self, amount: Self) -> Self {
        self.wrapping_shl(amount as u32)
    }

    #[inline]
    fn lshr_lanes(self, amount: Self) -> Self {
        (self as u32).wrapping_shr(amount as u32) as i32
    }

    #[inline]
    fn ashr_lanes(self, amount: Self) -> Self {
        self.wrapping_shr(amount as u32)
    }

    #[inline]
    fn rotate_left_lanes(self, amount: Self) -> Self {
        self.rotate_left(amount as u32 & (i32::BITS - 1))
    }

    #[inline]
    fn rotate_right_lanes(self, amount: Self) -> Self {
        self.rotate_right(amount as u32 & (i32::BITS - 1))
    }

    #[inline]
    fn bit_count(self) -> Self {
        self.count_ones() as i32
    }

    #[inline]
    fn leading_zeros_count(self) -> Self {
        self.leading_zeros() as i32
    }

    #[inline]
    fn trailing_zeros_count(self) -> Self {
        self.trailing_zeros() as i32
    }

    #[inline]
    fn reverse_bits(self) -> Self {
        i32::reverse_bits(self)
    }

    #[inline]
    fn reverse_bytes(self) -> Self {
        self.swap_bytes()
    }

    fn compress_bits(self, mask: Self) -> Self {
        let (value, mut mask) = (self as u32, mask as u32);
        let mut result = 0u32;
        let mut out_bit = 0;
        while mask != 0 {
            let bit = mask.trailing_zeros();
            result |= ((value >> bit) & 1) << out_bit;
            out_bit += 1;
            mask &= mask - 1;
        }
        result as i32
    }

    fn expand_bits(self, mask: Self) -> Self {
        let (value, mut mask) = (self as u32, mask as u32);
        let mut result = 0u32;
        let mut in_bit = 0;
        while mask != 0 {
            let bit = mask.trailing_zeros();
            result |= ((value >> in_bit) & 1) << bit;
            in_bit += 1;
            mask &= mask - 1;
        }
        result as i32
    }

    #[inline]
    fn from_i64_exact(value: i64) -> Option<Self> {
        i32::try_from(value).ok()
    }

    #[inline]
    fn to_i64(self) -> i64 {
        i64::from(self)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn content_hash(self) -> i32 {
        self
    }

    fn accelerated_binary(
        backend: Backend,
        op: BinaryOp,
        a: &[Self],
        b: &[Self],
        out: &mut [Self],
    ) -> bool {
        // SAFETY: Vector guarantees `a`, `b` and `out` have equal length, and
        // the x86 backends are only reached after runtime feature detection
        // produced the matching `Backend` variant.
        unsafe {
            match backend {
                Backend::Scalar => dispatch::<ScalarBackend>(op, a, b, out),
                #[cfg(target_arch = "x86_64")]
                Backend::SSE2 | Backend::AVX => dispatch::<Sse2Backend>(op, a, b, out),
                #[cfg(target_arch = "x86_64")]
                Backend::AVX2 | Backend::AVX512 => dispatch::<Avx2Backend>(op, a, b, out),
                _ => dispatch::<ScalarBackend>(op, a, b, out),
            }
        }
    }
}

/// Route `op` to the backend kernel, if the backend has one
///
/// # Safety
///
/// Same contract as [`LaneBackend`]: equal-length slices, CPU support for `B`.
unsafe fn dispatch<B: LaneBackend>(op: BinaryOp, a: &[i32], b: &[i32], out: &mut [i32]) -> bool {
    match op {
        BinaryOp::Add => B::add(a, b, out),
        BinaryOp::Sub => B::sub(a, b, out),
        BinaryOp::Mul => B::mul(a, b, out),
        BinaryOp::And => B::and(a, b, out),
        BinaryOp::Or => B::or(a, b, out),
        BinaryOp::Xor => B::xor(a, b, out),
        BinaryOp::Min => B::min(a, b, out),
        BinaryOp::Max => B::max(a, b, out),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraparound() {
        assert_eq!(LaneElement::wrapping_add(i32::MAX, 1), i32::MIN);
        assert_eq!(LaneElement::wrapping_sub(i32::MIN, 1), i32::MAX);
        assert_eq!(LaneElement::wrapping_mul(i32::MAX, 2), -2);
        assert_eq!(LaneElement::wrapping_neg(i32::MIN), i32::MIN);
        assert_eq!(LaneElement::wrapping_abs(i32::MIN), i32::MIN);
        assert_eq!(LaneElement::wrapping_abs(-7i32), 7);
    }

    #[test]
    fn test_checked_div() {
        assert_eq!(LaneElement::checked_div(-10i32, 3), Some(-3));
        assert_eq!(LaneElement::checked_div(7i32, 0), None);
        assert_eq!(LaneElement::checked_div(i32::MIN, -1), Some(i32::MIN));
    }

    #[test]
    fn test_saturating() {
        assert_eq!(LaneElement::saturating_add(i32::MAX, 1), i32::MAX);
        assert_eq!(LaneElement::saturating_sub(i32::MIN, 1), i32::MIN);
        // -1 is UINT_MAX when read unsigned
        assert_eq!(LaneElement::unsigned_saturating_add(-1i32, 5), -1);
        assert_eq!(LaneElement::unsigned_saturating_add(1i32, 2), 3);
        assert_eq!(LaneElement::unsigned_saturating_sub(3i32, 5), 0);
        assert_eq!(LaneElement::unsigned_saturating_sub(-1i32, 1), -2);
    }

    #[test]
    fn test_shift_amount_is_reduced_mod_32() {
        assert_eq!(1i32.shl_lanes(33), 2);
        assert_eq!(1i32.shl_lanes(-1), i32::MIN);
        assert_eq!((-8i32).ashr_lanes(1), -4);
        assert_eq!((-8i32).lshr_lanes(1), 0x7FFF_FFFC);
        assert_eq!((-8i32).lshr_lanes(32), -8);
        assert_eq!(1i32.rotate_left_lanes(-1), i32::MIN);
        assert_eq!(1i32.rotate_right_lanes(1), i32::MIN);
        assert_eq!(i32::MIN.rotate_left_lanes(33), 1);
    }

    #[test]
    fn test_bit_counts() {
        assert_eq!(LaneElement::bit_count(-1i32), 32);
        assert_eq!(LaneElement::leading_zeros_count(0i32), 32);
        assert_eq!(LaneElement::leading_zeros_count(1i32), 31);
        assert_eq!(LaneElement::trailing_zeros_count(0i32), 32);
        assert_eq!(LaneElement::trailing_zeros_count(8i32), 3);
        assert_eq!(LaneElement::reverse_bits(1i32), i32::MIN);
        assert_eq!(LaneElement::reverse_bytes(0x0102_0304i32), 0x0403_0201);
    }

    #[test]
    fn test_compress_expand_bits() {
        // 0b1011_0110 compressed by mask 0b1111_0000 keeps the high nibble
        assert_eq!(0b1011_0110i32.compress_bits(0b1111_0000), 0b1011);
        assert_eq!(0b1011i32.expand_bits(0b1111_0000), 0b1011_0000);
        assert_eq!(0x1234_5678i32.compress_bits(0), 0);
        assert_eq!((-1i32).compress_bits(-1), -1);
        assert_eq!(0b101i32.expand_bits(0b1010_1000), 0b1000_1000);
    }

    #[test]
    fn test_compress_then_expand_is_masking() {
        for &(v, m) in &[(0x7ABC_DEF0i32, 0x0F0F_0F0F), (-1, 0x55AA_55AA), (12345, -1)] {
            assert_eq!(v.compress_bits(m).expand_bits(m), v & m);
        }
    }

    #[test]
    fn test_from_i64_exact() {
        assert_eq!(<i32 as LaneElement>::from_i64_exact(-5), Some(-5));
        assert_eq!(<i32 as LaneElement>::from_i64_exact(1 << 31), None);
        assert_eq!(<i32 as LaneElement>::from_i64_exact(i64::from(i32::MIN)), Some(i32::MIN));
    }

    #[test]
    fn test_unsigned_cmp() {
        use std::cmp::Ordering;
        assert_eq!(LaneElement::unsigned_cmp(-1i32, 1), Ordering::Greater);
        assert_eq!(LaneElement::unsigned_cmp(0i32, i32::MIN), Ordering::Less);
        assert_eq!(LaneElement::unsigned_cmp(5i32, 5), Ordering::Equal);
    }
}
