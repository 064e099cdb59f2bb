//! Fixed-width lane vectors
//!
//! A [`Vector`] is an immutable sequence of `N` lanes whose length is fixed by
//! its [`Species`]. Every operation returns a new vector (or mask, or scalar);
//! operands of different species are rejected with
//! [`LaneError::SpeciesMismatch`].
//!
//! # Operator dispatch
//!
//! Lanewise operators are named by the tags in [`crate::ops`] and evaluated
//! through [`Vector::lanewise`], [`Vector::unary`] and [`Vector::ternary`].
//! The right operand may be another vector, a scalar broadcast across all
//! lanes, or a wide `i64` scalar that must be exactly representable:
//!
//! ```
//! use lanewise::{BinaryOp, IntVector, Operand, Species, VectorShape};
//!
//! let species = Species::of(VectorShape::S128Bit);
//! let a = IntVector::from_slice(species, &[1, 2, 3, 4], 0).unwrap();
//!
//! let sum = a.lanewise(BinaryOp::Add, &a).unwrap();
//! assert_eq!(sum.to_vec(), vec![2, 4, 6, 8]);
//!
//! let shifted = a.lanewise(BinaryOp::Lshl, 2).unwrap();
//! assert_eq!(shifted.to_vec(), vec![4, 8, 12, 16]);
//!
//! let wide = a.lanewise(BinaryOp::Mul, Operand::Wide(-1)).unwrap();
//! assert_eq!(wide.to_vec(), vec![-1, -2, -3, -4]);
//! ```
//!
//! # Masking
//!
//! Masked operations evaluate the operator only in set lanes. Unset lanes
//! keep the lane of the receiver (the first operand) unchanged.

use std::borrow::Cow;
use std::fmt;

use crate::element::LaneElement;
use crate::error::{LaneError, Result};
use crate::mask::Mask;
use crate::ops::{BinaryOp, Comparison, TernaryOp, TestOp, UnaryOp};
use crate::species::{Species, VectorShape};
use crate::Backend;

/// Right-hand operand of a lanewise operation
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a, T: LaneElement> {
    /// Lane-by-lane operand
    Vector(&'a Vector<T>),
    /// Scalar broadcast to every lane
    Scalar(T),
    /// Wide scalar, narrowed exactly before broadcast
    Wide(i64),
}

impl<'a, T: LaneElement> From<&'a Vector<T>> for Operand<'a, T> {
    fn from(v: &'a Vector<T>) -> Self {
        Operand::Vector(v)
    }
}

impl<'a, T: LaneElement> From<T> for Operand<'a, T> {
    fn from(value: T) -> Self {
        Operand::Scalar(value)
    }
}

/// Immutable vector of `N` lanes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vector<T: LaneElement> {
    species: Species,
    lanes: Vec<T>,
}

/// Vector of signed 32-bit lanes
pub type IntVector = Vector<i32>;

impl<T: LaneElement> Vector<T> {
    /// All-zero vector
    pub fn zero(species: Species) -> Self {
        Self::broadcast(species, T::ZERO)
    }

    /// Every lane set to `value`
    pub fn broadcast(species: Species, value: T) -> Self {
        Self {
            species,
            lanes: vec![value; species.length()],
        }
    }

    /// Every lane set to `value`, which must be exactly representable
    ///
    /// ```
    /// use lanewise::{IntVector, LaneError, Species, VectorShape};
    ///
    /// let species = Species::of(VectorShape::S64Bit);
    /// assert_eq!(IntVector::broadcast_wide(species, -3).unwrap().to_vec(), vec![-3, -3]);
    /// assert_eq!(
    ///     IntVector::broadcast_wide(species, 1 << 40),
    ///     Err(LaneError::UnrepresentableValue(1 << 40))
    /// );
    /// ```
    pub fn broadcast_wide(species: Species, value: i64) -> Result<Self> {
        Ok(Self::broadcast(species, narrow(value)?))
    }

    /// Vector whose lane `i` is `f(i)`
    pub fn from_fn(species: Species, f: impl FnMut(usize) -> T) -> Self {
        Self {
            species,
            lanes: (0..species.length()).map(f).collect(),
        }
    }

    /// Load `N` lanes from `data[offset..]`
    pub fn from_slice(species: Species, data: &[T], offset: usize) -> Result<Self> {
        species.check_window(offset, data.len())?;
        Ok(Self {
            species,
            lanes: data[offset..offset + species.length()].to_vec(),
        })
    }

    /// Load only the set lanes of `mask`; unset lanes are zero
    ///
    /// Only set lanes are bounds-checked, so a masked load may run past the
    /// end of `data` as long as the overhanging lanes are unset.
    pub fn from_slice_masked(
        species: Species,
        data: &[T],
        offset: usize,
        mask: &Mask,
    ) -> Result<Self> {
        mask.check_species(&species)?;
        check_masked_window(&species, offset, data.len(), mask)?;
        Ok(Self::from_fn(species, |i| {
            if mask.is_set(i) {
                data[offset + i]
            } else {
                T::ZERO
            }
        }))
    }

    /// Store the lanes into `out[offset..offset + N]`
    pub fn into_slice(&self, out: &mut [T], offset: usize) -> Result<()> {
        self.species.check_window(offset, out.len())?;
        out[offset..offset + self.lanes.len()].copy_from_slice(&self.lanes);
        Ok(())
    }

    /// Store only the set lanes of `mask`, leaving the rest of `out` untouched
    pub fn into_slice_masked(&self, out: &mut [T], offset: usize, mask: &Mask) -> Result<()> {
        mask.check_species(&self.species)?;
        check_masked_window(&self.species, offset, out.len(), mask)?;
        for (i, &lane) in self.lanes.iter().enumerate() {
            if mask.is_set(i) {
                out[offset + i] = lane;
            }
        }
        Ok(())
    }

    pub fn species(&self) -> Species {
        self.species
    }

    /// Number of lanes
    #[inline]
    pub fn length(&self) -> usize {
        self.lanes.len()
    }

    /// Lane width in bits
    pub fn element_size(&self) -> usize {
        T::BITS as usize
    }

    pub fn shape(&self) -> VectorShape {
        self.species.shape()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.lanes
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.lanes.clone()
    }

    /// Lanes sign-extended to `i64`
    pub fn to_i64_vec(&self) -> Vec<i64> {
        self.lanes.iter().map(|x| x.to_i64()).collect()
    }

    /// Lanes converted to `f64` (exact for 32-bit lanes)
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.lanes.iter().map(|x| x.to_f64()).collect()
    }

    pub fn lane(&self, index: usize) -> Result<T> {
        self.species.check_index(index)?;
        Ok(self.lanes[index])
    }

    /// Copy of `self` with lane `index` replaced by `value`
    pub fn with_lane(&self, index: usize, value: T) -> Result<Self> {
        self.species.check_index(index)?;
        let mut lanes = self.lanes.clone();
        lanes[index] = value;
        Ok(Self {
            species: self.species,
            lanes,
        })
    }

    /// Build a vector from lanes already known to match `species`
    #[inline]
    pub(crate) fn from_lanes(species: Species, lanes: Vec<T>) -> Self {
        debug_assert_eq!(lanes.len(), species.length());
        Self { species, lanes }
    }

    pub(crate) fn check_same_species(&self, other: &Vector<T>) -> Result<()> {
        self.species.check(&other.species)
    }

    /// Lane source for a right-hand operand
    fn resolve<'b>(&self, rhs: Operand<'b, T>) -> Result<Cow<'b, [T]>> {
        match rhs {
            Operand::Vector(v) => {
                self.check_same_species(v)?;
                Ok(Cow::Borrowed(v.lanes.as_slice()))
            }
            Operand::Scalar(x) => Ok(Cow::Owned(vec![x; self.lanes.len()])),
            Operand::Wide(x) => Ok(Cow::Owned(vec![narrow(x)?; self.lanes.len()])),
        }
    }

    fn binary_lanes(&self, op: BinaryOp, rhs: &[T], mask: Option<&Mask>) -> Result<Vec<T>> {
        let mut out = Vec::with_capacity(self.lanes.len());
        for (i, (&a, &b)) in self.lanes.iter().zip(rhs).enumerate() {
            if mask.is_some_and(|m| !m.is_set(i)) {
                out.push(a);
                continue;
            }
            match op.apply(a, b) {
                Some(r) => out.push(r),
                None => return Err(LaneError::DivisionByZero { lane: i }),
            }
        }
        Ok(out)
    }

    /// `op(self[i], rhs[i])` in every lane
    ///
    /// Division by a zero lane fails the whole operation with
    /// [`LaneError::DivisionByZero`] naming the first zero divisor.
    pub fn lanewise<'a>(&self, op: BinaryOp, rhs: impl Into<Operand<'a, T>>) -> Result<Self> {
        self.binary_on(crate::detected_backend(), op, rhs.into())
    }

    /// [`Vector::lanewise`] with an explicit backend for the accelerated kernels
    ///
    /// Fails with [`LaneError::UnsupportedBackend`] when `backend` cannot run
    /// on this CPU.
    pub fn lanewise_on<'a>(
        &self,
        backend: Backend,
        op: BinaryOp,
        rhs: impl Into<Operand<'a, T>>,
    ) -> Result<Self> {
        if !crate::is_backend_available(backend) {
            return Err(LaneError::UnsupportedBackend(backend));
        }
        self.binary_on(backend, op, rhs.into())
    }

    /// `backend` must already be known to run on this CPU
    pub(crate) fn binary_on(
        &self,
        backend: Backend,
        op: BinaryOp,
        rhs: Operand<'_, T>,
    ) -> Result<Self> {
        let rhs = self.resolve(rhs)?;
        let mut out = vec![T::ZERO; self.lanes.len()];
        if T::accelerated_binary(backend, op, &self.lanes, &rhs, &mut out) {
            return Ok(Self::from_lanes(self.species, out));
        }
        let lanes = self.binary_lanes(op, &rhs, None)?;
        Ok(Self::from_lanes(self.species, lanes))
    }

    /// `mask[i] ? op(self[i], rhs[i]) : self[i]`
    ///
    /// Only set lanes can fail a division.
    pub fn lanewise_masked<'a>(
        &self,
        op: BinaryOp,
        rhs: impl Into<Operand<'a, T>>,
        mask: &Mask,
    ) -> Result<Self> {
        mask.check_species(&self.species)?;
        let rhs = self.resolve(rhs.into())?;
        let lanes = self.binary_lanes(op, &rhs, Some(mask))?;
        Ok(Self::from_lanes(self.species, lanes))
    }

    pub fn unary(&self, op: UnaryOp) -> Self {
        Self::from_lanes(self.species, self.lanes.iter().map(|&a| op.apply(a)).collect())
    }

    pub fn unary_masked(&self, op: UnaryOp, mask: &Mask) -> Result<Self> {
        mask.check_species(&self.species)?;
        Ok(Self::from_fn(self.species, |i| {
            let a = self.lanes[i];
            if mask.is_set(i) {
                op.apply(a)
            } else {
                a
            }
        }))
    }

    /// `op(self[i], b[i], c[i])` in every lane
    pub fn ternary<'a, 'b>(
        &self,
        op: TernaryOp,
        b: impl Into<Operand<'a, T>>,
        c: impl Into<Operand<'b, T>>,
    ) -> Result<Self> {
        let b = self.resolve(b.into())?;
        let c = self.resolve(c.into())?;
        Ok(Self::from_fn(self.species, |i| {
            op.apply(self.lanes[i], b[i], c[i])
        }))
    }

    /// `mask[i] ? op(self[i], b[i], c[i]) : self[i]`
    pub fn ternary_masked<'a, 'b>(
        &self,
        op: TernaryOp,
        b: impl Into<Operand<'a, T>>,
        c: impl Into<Operand<'b, T>>,
        mask: &Mask,
    ) -> Result<Self> {
        mask.check_species(&self.species)?;
        let b = self.resolve(b.into())?;
        let c = self.resolve(c.into())?;
        Ok(Self::from_fn(self.species, |i| {
            let a = self.lanes[i];
            if mask.is_set(i) {
                op.apply(a, b[i], c[i])
            } else {
                a
            }
        }))
    }

    /// Mask of lanes where `op(self[i], rhs[i])` holds
    pub fn compare<'a>(&self, op: Comparison, rhs: impl Into<Operand<'a, T>>) -> Result<Mask> {
        let rhs = self.resolve(rhs.into())?;
        Ok(Mask::from_fn(self.species, |i| op.test(self.lanes[i], rhs[i])))
    }

    /// [`Vector::compare`] restricted to the set lanes of `mask`
    pub fn compare_masked<'a>(
        &self,
        op: Comparison,
        rhs: impl Into<Operand<'a, T>>,
        mask: &Mask,
    ) -> Result<Mask> {
        mask.check_species(&self.species)?;
        let rhs = self.resolve(rhs.into())?;
        Ok(Mask::from_fn(self.species, |i| {
            mask.is_set(i) && op.test(self.lanes[i], rhs[i])
        }))
    }

    /// Mask of lanes satisfying the predicate
    pub fn test(&self, op: TestOp) -> Mask {
        Mask::from_fn(self.species, |i| op.test(self.lanes[i]))
    }

    pub fn test_masked(&self, op: TestOp, mask: &Mask) -> Result<Mask> {
        mask.check_species(&self.species)?;
        Ok(Mask::from_fn(self.species, |i| {
            mask.is_set(i) && op.test(self.lanes[i])
        }))
    }

    /// `mask[i] ? rhs[i] : self[i]`
    pub fn blend<'a>(&self, rhs: impl Into<Operand<'a, T>>, mask: &Mask) -> Result<Self> {
        mask.check_species(&self.species)?;
        let rhs = self.resolve(rhs.into())?;
        Ok(Self::from_fn(self.species, |i| {
            if mask.is_set(i) {
                rhs[i]
            } else {
                self.lanes[i]
            }
        }))
    }

    pub fn add<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Self> {
        self.lanewise(BinaryOp::Add, rhs)
    }

    pub fn sub<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Self> {
        self.lanewise(BinaryOp::Sub, rhs)
    }

    pub fn mul<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Self> {
        self.lanewise(BinaryOp::Mul, rhs)
    }

    pub fn div<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Self> {
        self.lanewise(BinaryOp::Div, rhs)
    }

    pub fn and<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Self> {
        self.lanewise(BinaryOp::And, rhs)
    }

    pub fn or<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Self> {
        self.lanewise(BinaryOp::Or, rhs)
    }

    pub fn xor<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Self> {
        self.lanewise(BinaryOp::Xor, rhs)
    }

    pub fn min<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Self> {
        self.lanewise(BinaryOp::Min, rhs)
    }

    pub fn max<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Self> {
        self.lanewise(BinaryOp::Max, rhs)
    }

    pub fn neg(&self) -> Self {
        self.unary(UnaryOp::Neg)
    }

    pub fn abs(&self) -> Self {
        self.unary(UnaryOp::Abs)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(&self) -> Self {
        self.unary(UnaryOp::Not)
    }

    /// `31 * (31 + species_hash) + hash(lanes)`
    pub fn content_hash(&self) -> i32 {
        let lanes = self
            .lanes
            .iter()
            .fold(1i32, |h, x| h.wrapping_mul(31).wrapping_add(x.content_hash()));
        31i32
            .wrapping_add(self.species.content_hash())
            .wrapping_mul(31)
            .wrapping_add(lanes)
    }
}

impl<T: LaneElement> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, x) in self.lanes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{x}")?;
        }
        f.write_str("]")
    }
}

fn narrow<T: LaneElement>(value: i64) -> Result<T> {
    T::from_i64_exact(value).ok_or(LaneError::UnrepresentableValue(value))
}

/// Bounds check covering only the set lanes of `mask`
fn check_masked_window(species: &Species, offset: usize, len: usize, mask: &Mask) -> Result<()> {
    let last = mask.last_true();
    if last < 0 {
        return Ok(());
    }
    match offset.checked_add(last as usize) {
        Some(end) if end < len => Ok(()),
        _ => Err(LaneError::ArrayOutOfBounds {
            offset,
            lanes: species.length(),
            len,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::VectorShape;

    fn s4() -> Species {
        Species::of(VectorShape::S128Bit)
    }

    fn s8() -> Species {
        Species::of(VectorShape::S256Bit)
    }

    fn v4(lanes: [i32; 4]) -> IntVector {
        IntVector::from_slice(s4(), &lanes, 0).unwrap()
    }

    fn m4(bits: [bool; 4]) -> Mask {
        Mask::from_bools(s4(), &bits, 0).unwrap()
    }

    /// A backend that can never run on the build target
    fn foreign_backend() -> Backend {
        if cfg!(any(target_arch = "x86_64", target_arch = "x86")) {
            Backend::NEON
        } else {
            Backend::AVX2
        }
    }

    #[test]
    fn test_lanewise_on_rejects_unavailable_backend() {
        let a = v4([1, 2, 3, 4]);
        let backend = foreign_backend();
        assert_eq!(
            a.lanewise_on(backend, BinaryOp::Add, &a),
            Err(LaneError::UnsupportedBackend(backend))
        );
        assert_eq!(
            a.lanewise_on(Backend::Scalar, BinaryOp::Add, &a).unwrap().to_vec(),
            vec![2, 4, 6, 8]
        );
    }

    #[test]
    fn test_add_wraps() {
        let a = v4([i32::MAX, 1, -1, 0]);
        let b = v4([1, 1, 1, 1]);
        assert_eq!(a.add(&b).unwrap().to_vec(), vec![i32::MIN, 2, 0, 1]);
    }

    #[test]
    fn test_add_eight_lanes() {
        let a = IntVector::from_slice(s8(), &[5, -5, 10, -10, 0, 7, -7, 3], 0).unwrap();
        let b = IntVector::broadcast(s8(), 1);
        assert_eq!(
            a.add(&b).unwrap().to_vec(),
            vec![6, -4, 11, -9, 1, 8, -6, 4]
        );
    }

    #[test]
    fn test_every_backend_agrees() {
        let a = IntVector::from_slice(s8(), &[i32::MIN, i32::MAX, -1, 0, 1, 2, 3, 65536], 0)
            .unwrap();
        let b = IntVector::from_slice(s8(), &[-1, 2, i32::MIN, 5, -6, 7, 8, 65536], 0).unwrap();
        for op in BinaryOp::ALL {
            if op == BinaryOp::Div {
                continue;
            }
            let expected = a.lanewise_on(Backend::Scalar, op, &b).unwrap();
            let actual = a.lanewise(op, &b).unwrap();
            assert_eq!(actual, expected, "{op:?}");
        }
    }

    #[test]
    fn test_masked_sub_passes_first_operand() {
        let a = v4([10, 10, 10, 10]);
        let b = v4([1, 1, 1, 1]);
        let m = m4([true, false, true, false]);
        let r = a.lanewise_masked(BinaryOp::Sub, &b, &m).unwrap();
        assert_eq!(r.to_vec(), vec![9, 10, 9, 10]);
    }

    #[test]
    fn test_scalar_and_wide_operands() {
        let a = v4([1, 2, 3, 4]);
        assert_eq!(a.lanewise(BinaryOp::Lshl, 2).unwrap().to_vec(), vec![4, 8, 12, 16]);
        assert_eq!(
            a.lanewise(BinaryOp::Add, Operand::Wide(-1)).unwrap().to_vec(),
            vec![0, 1, 2, 3]
        );
        assert_eq!(
            a.lanewise(BinaryOp::Add, Operand::Wide(i64::from(i32::MAX) + 1)),
            Err(LaneError::UnrepresentableValue(1 << 31))
        );
    }

    #[test]
    fn test_division() {
        let a = v4([10, -10, 7, 0]);
        let b = v4([2, 3, 1, 5]);
        assert_eq!(a.div(&b).unwrap().to_vec(), vec![5, -3, 7, 0]);

        let zero = v4([2, 3, 0, 0]);
        assert_eq!(a.div(&zero), Err(LaneError::DivisionByZero { lane: 2 }));
    }

    #[test]
    fn test_masked_division_ignores_inactive_zero() {
        let a = v4([10, -10, 7, 9]);
        let b = v4([2, 0, 0, 3]);
        let m = m4([true, false, false, true]);
        let r = a.lanewise_masked(BinaryOp::Div, &b, &m).unwrap();
        assert_eq!(r.to_vec(), vec![5, -10, 7, 3]);

        let m = m4([true, false, true, true]);
        assert_eq!(
            a.lanewise_masked(BinaryOp::Div, &b, &m),
            Err(LaneError::DivisionByZero { lane: 2 })
        );
    }

    #[test]
    fn test_species_mismatch() {
        let a = v4([1, 2, 3, 4]);
        let b = IntVector::zero(s8());
        assert_eq!(
            a.add(&b),
            Err(LaneError::SpeciesMismatch {
                expected: s4(),
                actual: s8()
            })
        );
        let m = s8().mask_all(true);
        assert!(a.lanewise_masked(BinaryOp::Add, 1, &m).is_err());
    }

    #[test]
    fn test_unary_ops() {
        let a = v4([i32::MIN, -3, 0, 5]);
        assert_eq!(a.neg().to_vec(), vec![i32::MIN, 3, 0, -5]);
        assert_eq!(a.abs().to_vec(), vec![i32::MIN, 3, 0, 5]);
        assert_eq!(a.not().to_vec(), vec![i32::MAX, 2, -1, -6]);
        let m = m4([false, true, false, true]);
        assert_eq!(
            a.unary_masked(UnaryOp::Neg, &m).unwrap().to_vec(),
            vec![i32::MIN, 3, 0, -5]
        );
        assert_eq!(
            a.unary_masked(UnaryOp::ZeroOrMinusOne, &m).unwrap().to_vec(),
            vec![i32::MIN, -1, 0, -1]
        );
    }

    #[test]
    fn test_bitwise_blend() {
        let a = v4([0b1111, 0b1111, 0, -1]);
        let b = v4([0, 0, -1, 0]);
        let c = v4([0b0101, 0, -1, 0x0F]);
        let r = a.ternary(TernaryOp::BitwiseBlend, &b, &c).unwrap();
        assert_eq!(r.to_vec(), vec![0b1010, 0b1111, -1, !0x0F]);

        let m = m4([true, false, false, false]);
        let r = a.ternary_masked(TernaryOp::BitwiseBlend, &b, &c, &m).unwrap();
        assert_eq!(r.to_vec(), vec![0b1010, 0b1111, 0, -1]);

        let r = a.ternary(TernaryOp::BitwiseBlend, 0, -1).unwrap();
        assert_eq!(r.to_vec(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_compare_and_test() {
        let a = v4([-1, 0, 1, 2]);
        assert_eq!(
            a.compare(Comparison::Lt, 1).unwrap().to_vec(),
            vec![true, true, false, false]
        );
        assert_eq!(
            a.compare(Comparison::Ult, 1).unwrap().to_vec(),
            vec![false, true, false, false]
        );
        let m = m4([true, true, false, false]);
        assert_eq!(
            a.compare_masked(Comparison::Ge, Operand::Wide(0), &m).unwrap().to_vec(),
            vec![false, true, false, false]
        );
        assert_eq!(a.test(TestOp::IsNegative).to_vec(), vec![true, false, false, false]);
        assert_eq!(
            a.test_masked(TestOp::IsDefault, &m4([false; 4])).unwrap().true_count(),
            0
        );
    }

    #[test]
    fn test_blend() {
        let a = v4([1, 2, 3, 4]);
        let m = m4([false, true, false, true]);
        assert_eq!(a.blend(9, &m).unwrap().to_vec(), vec![1, 9, 3, 9]);
        let b = v4([5, 6, 7, 8]);
        assert_eq!(a.blend(&b, &m).unwrap().to_vec(), vec![1, 6, 3, 8]);
    }

    #[test]
    fn test_lane_access() {
        let a = v4([1, 2, 3, 4]);
        assert_eq!(a.lane(2), Ok(3));
        assert_eq!(
            a.lane(4),
            Err(LaneError::LaneIndexOutOfBounds { index: 4, lanes: 4 })
        );
        let b = a.with_lane(0, 42).unwrap();
        assert_eq!(b.to_vec(), vec![42, 2, 3, 4]);
        assert_eq!(a.to_vec(), vec![1, 2, 3, 4]);
        assert!(a.with_lane(7, 0).is_err());
    }

    #[test]
    fn test_slice_round_trip() {
        let data = [0, 1, 2, 3, 4, 5, 6, 7, 8];
        let a = IntVector::from_slice(s4(), &data, 3).unwrap();
        assert_eq!(a.to_vec(), vec![3, 4, 5, 6]);
        let mut out = [0; 9];
        a.into_slice(&mut out, 5).unwrap();
        assert_eq!(out, [0, 0, 0, 0, 0, 3, 4, 5, 6]);
        assert!(IntVector::from_slice(s4(), &data, 6).is_err());
        assert!(a.into_slice(&mut out, 6).is_err());
    }

    #[test]
    fn test_masked_slice_io() {
        let data = [1, 2, 3, 4, 5];
        let m = m4([true, true, false, false]);
        // Lanes 2 and 3 would run past the end but are unset
        let a = IntVector::from_slice_masked(s4(), &data, 3, &m).unwrap();
        assert_eq!(a.to_vec(), vec![4, 5, 0, 0]);
        assert!(IntVector::from_slice_masked(s4(), &data, 3, &s4().mask_all(true)).is_err());

        let mut out = [9; 6];
        v4([1, 2, 3, 4]).into_slice_masked(&mut out, 4, &m).unwrap();
        assert_eq!(out, [9, 9, 9, 9, 1, 2]);

        let none = s4().mask_all(false);
        assert!(v4([1, 2, 3, 4]).into_slice_masked(&mut out, 100, &none).is_ok());
    }

    #[test]
    fn test_widening_views() {
        let a = v4([i32::MIN, -1, 0, i32::MAX]);
        assert_eq!(
            a.to_i64_vec(),
            vec![i64::from(i32::MIN), -1, 0, i64::from(i32::MAX)]
        );
        assert_eq!(a.to_f64_vec(), vec![-2147483648.0, -1.0, 0.0, 2147483647.0]);
    }

    #[test]
    fn test_display_and_hash() {
        let a = v4([1, -2, 3, 0]);
        assert_eq!(a.to_string(), "[1, -2, 3, 0]");
        assert_eq!(a.content_hash(), v4([1, -2, 3, 0]).content_hash());
        assert_ne!(a.content_hash(), v4([1, -2, 3, 1]).content_hash());
        // Same lanes, different species
        let wide = IntVector::from_slice(s8(), &[1, -2, 3, 0, 0, 0, 0, 0], 0).unwrap();
        assert_ne!(a, wide);
    }

    #[test]
    fn test_metadata() {
        let a = IntVector::zero(s8());
        assert_eq!(a.length(), 8);
        assert_eq!(a.element_size(), 32);
        assert_eq!(a.shape(), VectorShape::S256Bit);
        assert_eq!(a.species(), s8());
    }
}
