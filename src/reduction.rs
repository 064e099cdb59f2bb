//! Lane reductions
//!
//! A reduction folds the lanes of a vector into one scalar with an
//! associative [`ReductionOp`], starting from the operator's identity. Lanes
//! unset in a mask are left out of the fold entirely, so a reduction over an
//! empty mask yields the identity.

use crate::element::LaneElement;
use crate::error::Result;
use crate::mask::Mask;
use crate::ops::ReductionOp;
use crate::vector::Vector;

impl<T: LaneElement> Vector<T> {
    /// Fold every lane with `op`
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::{IntVector, ReductionOp, Species, VectorShape};
    ///
    /// let species = Species::of(VectorShape::S128Bit);
    /// let v = IntVector::from_slice(species, &[1, 2, 3, 4], 0).unwrap();
    /// assert_eq!(v.reduce_lanes(ReductionOp::Add), 10);
    /// assert_eq!(v.reduce_lanes(ReductionOp::Max), 4);
    /// ```
    pub fn reduce_lanes(&self, op: ReductionOp) -> T {
        self.as_slice()
            .iter()
            .fold(op.identity(), |acc, &x| op.combine(acc, x))
    }

    /// Fold the set lanes of `mask` with `op`
    pub fn reduce_lanes_masked(&self, op: ReductionOp, mask: &Mask) -> Result<T> {
        mask.check_species(&self.species())?;
        Ok(self
            .as_slice()
            .iter()
            .enumerate()
            .filter(|&(i, _)| mask.is_set(i))
            .fold(op.identity(), |acc, (_, &x)| op.combine(acc, x)))
    }

    /// [`Vector::reduce_lanes`] widened to `i64`
    ///
    /// The fold runs in lane arithmetic (wrapping for `Add` and `Mul`) and the
    /// result is sign-extended.
    pub fn reduce_lanes_to_i64(&self, op: ReductionOp) -> i64 {
        self.reduce_lanes(op).to_i64()
    }

    /// [`Vector::reduce_lanes_masked`] widened to `i64`
    pub fn reduce_lanes_to_i64_masked(&self, op: ReductionOp, mask: &Mask) -> Result<i64> {
        Ok(self.reduce_lanes_masked(op, mask)?.to_i64())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::LaneError;
    use crate::ops::ReductionOp;
    use crate::species::{Species, VectorShape};
    use crate::vector::IntVector;
    use crate::Mask;

    fn s4() -> Species {
        Species::of(VectorShape::S128Bit)
    }

    fn v4(lanes: [i32; 4]) -> IntVector {
        IntVector::from_slice(s4(), &lanes, 0).unwrap()
    }

    #[test]
    fn test_add_reduction() {
        let v = v4([1, 2, 3, 4]);
        assert_eq!(v.reduce_lanes(ReductionOp::Add), 10);
        let m = Mask::from_bools(s4(), &[true, false, true, false], 0).unwrap();
        assert_eq!(v.reduce_lanes_masked(ReductionOp::Add, &m), Ok(4));
    }

    #[test]
    fn test_identity_laws() {
        assert_eq!(s4().broadcast(-1).reduce_lanes(ReductionOp::And), -1);
        assert_eq!(s4().zero().reduce_lanes(ReductionOp::Add), 0);
        let none = s4().mask_all(false);
        let v = v4([5, 6, 7, 8]);
        for op in ReductionOp::ALL {
            assert_eq!(
                v.reduce_lanes_masked(op, &none),
                Ok(op.identity::<i32>()),
                "{op:?}"
            );
        }
        assert_eq!(v.reduce_lanes_masked(ReductionOp::Mul, &none), Ok(1));
    }

    #[test]
    fn test_every_operator() {
        let v = v4([3, -1, 0, 6]);
        assert_eq!(v.reduce_lanes(ReductionOp::And), 0);
        assert_eq!(v.reduce_lanes(ReductionOp::Or), -1);
        assert_eq!(v.reduce_lanes(ReductionOp::Xor), 3 ^ -1 ^ 6);
        assert_eq!(v.reduce_lanes(ReductionOp::Mul), 0);
        assert_eq!(v.reduce_lanes(ReductionOp::Min), -1);
        assert_eq!(v.reduce_lanes(ReductionOp::Max), 6);
        assert_eq!(v.reduce_lanes(ReductionOp::UMin), 0);
        assert_eq!(v.reduce_lanes(ReductionOp::UMax), -1);
        assert_eq!(v.reduce_lanes(ReductionOp::UnsignedSaturatingAdd), -1);
        assert_eq!(v.reduce_lanes(ReductionOp::FirstNonzero), 3);
        assert_eq!(v4([0, 0, 9, 4]).reduce_lanes(ReductionOp::FirstNonzero), 9);
    }

    #[test]
    fn test_add_wraps_before_widening() {
        let v = v4([i32::MAX, 1, 0, 0]);
        assert_eq!(v.reduce_lanes(ReductionOp::Add), i32::MIN);
        assert_eq!(v.reduce_lanes_to_i64(ReductionOp::Add), i64::from(i32::MIN));
        let m = Mask::from_bools(s4(), &[true, false, false, false], 0).unwrap();
        assert_eq!(
            v.reduce_lanes_to_i64_masked(ReductionOp::Add, &m),
            Ok(i64::from(i32::MAX))
        );
    }

    #[test]
    fn test_masked_species_mismatch() {
        let v = v4([1, 2, 3, 4]);
        let m = Species::of(VectorShape::S256Bit).mask_all(true);
        assert!(matches!(
            v.reduce_lanes_masked(ReductionOp::Add, &m),
            Err(LaneError::SpeciesMismatch { .. })
        ));
    }
}
