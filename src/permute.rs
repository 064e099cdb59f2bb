//! Lane permutations
//!
//! Rearrange, select-from, compress/expand and slice/unslice. All of them move
//! lanes without changing their values; lanes with no source are zero-filled.

use crate::element::LaneElement;
use crate::error::{LaneError, Result};
use crate::mask::Mask;
use crate::shuffle::{wrap, Shuffle};
use crate::vector::Vector;

impl<T: LaneElement> Vector<T> {
    /// `result[i] = self[shuffle[i]]`
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::{IntVector, Shuffle, Species, VectorShape};
    ///
    /// let species = Species::of(VectorShape::S128Bit);
    /// let a = IntVector::from_slice(species, &[10, 20, 30, 40], 0).unwrap();
    /// let s = Shuffle::from_slice(species, &[1, 0, 3, 2], 0).unwrap();
    /// assert_eq!(a.rearrange(&s).unwrap().to_vec(), vec![20, 10, 40, 30]);
    /// ```
    pub fn rearrange(&self, shuffle: &Shuffle) -> Result<Self> {
        self.species().check(&shuffle.species())?;
        let src = self.as_slice();
        Ok(Self::from_fn(self.species(), |i| src[shuffle.indices()[i]]))
    }

    /// [`Vector::rearrange`] with unset lanes zero-filled
    pub fn rearrange_masked(&self, shuffle: &Shuffle, mask: &Mask) -> Result<Self> {
        self.species().check(&shuffle.species())?;
        mask.check_species(&self.species())?;
        let src = self.as_slice();
        Ok(Self::from_fn(self.species(), |i| {
            if mask.is_set(i) {
                src[shuffle.indices()[i]]
            } else {
                T::ZERO
            }
        }))
    }

    /// Gather from `v` using the lanes of `self` as indices, wrapped mod `N`
    pub fn select_from(&self, v: &Vector<T>) -> Result<Self> {
        self.check_same_species(v)?;
        let n = self.length();
        let src = v.as_slice();
        Ok(Self::from_fn(self.species(), |i| {
            src[wrap(self.as_slice()[i].to_i64(), n)]
        }))
    }

    /// [`Vector::select_from`] with unset lanes zero-filled
    pub fn select_from_masked(&self, v: &Vector<T>, mask: &Mask) -> Result<Self> {
        self.check_same_species(v)?;
        mask.check_species(&self.species())?;
        let n = self.length();
        let src = v.as_slice();
        Ok(Self::from_fn(self.species(), |i| {
            if mask.is_set(i) {
                src[wrap(self.as_slice()[i].to_i64(), n)]
            } else {
                T::ZERO
            }
        }))
    }

    /// Two-source gather: index `floorMod(x, 2N)` picks `v1` below `N` and
    /// `v2` at or above it
    pub fn select_from_two(&self, v1: &Vector<T>, v2: &Vector<T>) -> Result<Self> {
        self.check_same_species(v1)?;
        self.check_same_species(v2)?;
        let n = self.length();
        let (a, b) = (v1.as_slice(), v2.as_slice());
        Ok(Self::from_fn(self.species(), |i| {
            let j = wrap(self.as_slice()[i].to_i64(), 2 * n);
            if j < n {
                a[j]
            } else {
                b[j - n]
            }
        }))
    }

    /// Pack the set lanes of `mask` at the low end, zero-fill the rest
    ///
    /// ```
    /// use lanewise::{IntVector, Mask, Species, VectorShape};
    ///
    /// let species = Species::of(VectorShape::S128Bit);
    /// let v = IntVector::from_slice(species, &[1, 2, 3, 4], 0).unwrap();
    /// let m = Mask::from_bools(species, &[false, true, false, true], 0).unwrap();
    /// assert_eq!(v.compress(&m).unwrap().to_vec(), vec![2, 4, 0, 0]);
    /// assert_eq!(v.expand(&m).unwrap().to_vec(), vec![0, 1, 0, 2]);
    /// ```
    pub fn compress(&self, mask: &Mask) -> Result<Self> {
        mask.check_species(&self.species())?;
        let mut lanes: Vec<T> = self
            .as_slice()
            .iter()
            .enumerate()
            .filter(|&(i, _)| mask.is_set(i))
            .map(|(_, &x)| x)
            .collect();
        lanes.resize(self.length(), T::ZERO);
        Ok(Self::from_lanes(self.species(), lanes))
    }

    /// Inverse of [`Vector::compress`]: the `k`-th set lane of `mask` receives
    /// lane `k` of `self`, unset lanes are zero
    pub fn expand(&self, mask: &Mask) -> Result<Self> {
        mask.check_species(&self.species())?;
        let src = self.as_slice();
        let mut next = 0;
        Ok(Self::from_fn(self.species(), |i| {
            if mask.is_set(i) {
                let x = src[next];
                next += 1;
                x
            } else {
                T::ZERO
            }
        }))
    }

    /// Lanes `origin..N` of `self` followed by lanes `0..origin` of `w`
    ///
    /// `origin` must be in `[0, N]`.
    pub fn slice(&self, origin: usize, w: &Vector<T>) -> Result<Self> {
        self.check_same_species(w)?;
        let n = self.check_origin(origin)?;
        let (a, b) = (self.as_slice(), w.as_slice());
        Ok(Self::from_fn(self.species(), |i| {
            let j = i + origin;
            if j < n {
                a[j]
            } else {
                b[j - n]
            }
        }))
    }

    /// [`Vector::slice`] with a zero background
    pub fn slice_zero(&self, origin: usize) -> Result<Self> {
        self.slice(origin, &Self::zero(self.species()))
    }

    /// [`Vector::slice`] with unset result lanes zero-filled
    pub fn slice_masked(&self, origin: usize, w: &Vector<T>, mask: &Mask) -> Result<Self> {
        mask.check_species(&self.species())?;
        let sliced = self.slice(origin, w)?;
        Self::zero(self.species()).blend(&sliced, mask)
    }

    /// Insert `self` into background `w` at `origin`, the inverse of
    /// [`Vector::slice`]
    ///
    /// `part` 0 yields the low half of the two-vector window: `w[0..origin]`
    /// followed by `self[0..N - origin]`. `part` 1 yields the high half:
    /// `self[N - origin..N]` followed by `w[origin..N]`.
    pub fn unslice(&self, origin: usize, w: &Vector<T>, part: usize) -> Result<Self> {
        self.check_same_species(w)?;
        let n = self.check_origin(origin)?;
        let (a, b) = (self.as_slice(), w.as_slice());
        match part {
            0 => Ok(Self::from_fn(self.species(), |i| {
                if i < origin {
                    b[i]
                } else {
                    a[i - origin]
                }
            })),
            1 => Ok(Self::from_fn(self.species(), |i| {
                if i < origin {
                    a[n - origin + i]
                } else {
                    b[i]
                }
            })),
            _ => Err(LaneError::InvalidArgument(format!(
                "unslice part must be 0 or 1, got {part}"
            ))),
        }
    }

    /// [`Vector::unslice`] part 0 with a zero background
    pub fn unslice_zero(&self, origin: usize) -> Result<Self> {
        self.unslice(origin, &Self::zero(self.species()), 0)
    }

    /// [`Vector::unslice`] inserting only the set lanes of `self`
    ///
    /// `mask` selects source lanes. Unset lanes are taken from `w` rotated
    /// left by `origin`, so they land back on their own positions of `w`
    /// after the insertion.
    ///
    /// ```
    /// use lanewise::{IntVector, Mask, Species, VectorShape};
    ///
    /// let species = Species::of(VectorShape::S128Bit);
    /// let a = IntVector::from_slice(species, &[1, 2, 3, 4], 0).unwrap();
    /// let w = IntVector::from_slice(species, &[-1, -2, -3, -4], 0).unwrap();
    /// let m = Mask::from_bools(species, &[true, true, false, true], 0).unwrap();
    /// assert_eq!(a.unslice_masked(1, &w, 0, &m).unwrap().to_vec(), vec![-1, 1, 2, -4]);
    /// assert_eq!(a.unslice_masked(1, &w, 1, &m).unwrap().to_vec(), vec![4, -2, -3, -4]);
    /// ```
    pub fn unslice_masked(
        &self,
        origin: usize,
        w: &Vector<T>,
        part: usize,
        mask: &Mask,
    ) -> Result<Self> {
        mask.check_species(&self.species())?;
        let background = w.slice(origin, w)?;
        background.blend(self, mask)?.unslice(origin, w, part)
    }

    fn check_origin(&self, origin: usize) -> Result<usize> {
        let n = self.length();
        if origin > n {
            return Err(LaneError::LaneIndexOutOfBounds {
                index: origin,
                lanes: n,
            });
        }
        Ok(n)
    }
}
