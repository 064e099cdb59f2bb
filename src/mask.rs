//! Lane masks
//!
//! A [`Mask`] is an immutable per-lane boolean selector tied to a species.
//! Masked vector operations apply their operator only where the mask is set
//! and pass the first operand through everywhere else.

use std::fmt;

use crate::error::{LaneError, Result};
use crate::species::Species;
use crate::vector::IntVector;

/// Java-compatible `Boolean.hashCode` values
const TRUE_HASH: i32 = 1231;
const FALSE_HASH: i32 = 1237;

/// Per-lane boolean selector
///
/// # Examples
///
/// ```
/// use lanewise::{Mask, Species, VectorShape};
///
/// let species = Species::of(VectorShape::S128Bit);
/// let m = Mask::from_bools(species, &[true, false, true, false], 0).unwrap();
/// assert_eq!(m.true_count(), 2);
/// assert_eq!(m.first_true(), 0);
/// assert_eq!(m.last_true(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mask {
    species: Species,
    bits: Vec<bool>,
}

impl Mask {
    /// Mask whose lane `i` is `f(i)`
    pub fn from_fn(species: Species, f: impl FnMut(usize) -> bool) -> Self {
        Self {
            species,
            bits: (0..species.length()).map(f).collect(),
        }
    }

    /// Load `N` lanes from `values[offset..]`
    pub fn from_bools(species: Species, values: &[bool], offset: usize) -> Result<Self> {
        species.check_window(offset, values.len())?;
        Ok(Self {
            species,
            bits: values[offset..offset + species.length()].to_vec(),
        })
    }

    /// Lane `i` is bit `i` of `bits`; bits at and above `N` are ignored
    pub fn from_bits(species: Species, bits: u64) -> Self {
        Self::from_fn(species, |i| i < 64 && (bits >> i) & 1 == 1)
    }

    pub fn species(&self) -> Species {
        self.species
    }

    /// Number of lanes
    pub fn length(&self) -> usize {
        self.bits.len()
    }

    /// Lane set-state as a bit field, lane `i` in bit `i`
    pub fn to_bits(&self) -> u64 {
        self.bits
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b)
            .fold(0u64, |acc, (i, _)| acc | (1u64 << i))
    }

    pub fn to_vec(&self) -> Vec<bool> {
        self.bits.clone()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Store the lanes into `out[offset..offset + N]`
    pub fn into_slice(&self, out: &mut [bool], offset: usize) -> Result<()> {
        self.species.check_window(offset, out.len())?;
        out[offset..offset + self.bits.len()].copy_from_slice(&self.bits);
        Ok(())
    }

    pub fn lane_is_set(&self, index: usize) -> Result<bool> {
        self.species.check_index(index)?;
        Ok(self.bits[index])
    }

    /// Unchecked lane read for callers that already validated the species
    #[inline]
    pub(crate) fn is_set(&self, index: usize) -> bool {
        self.bits[index]
    }

    fn zip_with(&self, other: &Mask, f: impl Fn(bool, bool) -> bool) -> Result<Mask> {
        self.species.check(&other.species)?;
        Ok(Mask {
            species: self.species,
            bits: self
                .bits
                .iter()
                .zip(&other.bits)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    pub fn and(&self, other: &Mask) -> Result<Mask> {
        self.zip_with(other, |a, b| a && b)
    }

    pub fn or(&self, other: &Mask) -> Result<Mask> {
        self.zip_with(other, |a, b| a || b)
    }

    pub fn xor(&self, other: &Mask) -> Result<Mask> {
        self.zip_with(other, |a, b| a != b)
    }

    /// `self & !other`
    pub fn and_not(&self, other: &Mask) -> Result<Mask> {
        self.zip_with(other, |a, b| a && !b)
    }

    /// Lanewise equality (`!(a ^ b)`)
    pub fn lane_eq(&self, other: &Mask) -> Result<Mask> {
        self.zip_with(other, |a, b| a == b)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(&self) -> Mask {
        Mask {
            species: self.species,
            bits: self.bits.iter().map(|b| !b).collect(),
        }
    }

    /// Clear every lane `j` for which `offset + j` is outside `[0, limit)`
    pub fn index_in_range(&self, offset: i64, limit: i64) -> Mask {
        Mask::from_fn(self.species, |j| {
            self.bits[j] && crate::species::in_range(offset, j, limit)
        })
    }

    pub fn true_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Index of the first set lane, or `N` when none is set
    pub fn first_true(&self) -> usize {
        self.bits
            .iter()
            .position(|&b| b)
            .unwrap_or(self.bits.len())
    }

    /// Index of the last set lane, or `-1` when none is set
    pub fn last_true(&self) -> isize {
        self.bits
            .iter()
            .rposition(|&b| b)
            .map_or(-1, |i| i as isize)
    }

    pub fn any_true(&self) -> bool {
        self.bits.iter().any(|&b| b)
    }

    pub fn all_true(&self) -> bool {
        self.bits.iter().all(|&b| b)
    }

    /// Mask with the first `true_count()` lanes set and the rest clear
    pub fn compress(&self) -> Mask {
        let count = self.true_count();
        Mask::from_fn(self.species, |i| i < count)
    }

    /// Vector with `-1` in set lanes and `0` elsewhere
    pub fn to_vector(&self) -> IntVector {
        IntVector::from_fn(self.species, |i| if self.bits[i] { -1 } else { 0 })
    }

    /// `31 * (31 + species_hash) + hash(lanes)` with Java boolean hashes
    pub fn content_hash(&self) -> i32 {
        let lanes = self.bits.iter().fold(1i32, |h, &b| {
            h.wrapping_mul(31)
                .wrapping_add(if b { TRUE_HASH } else { FALSE_HASH })
        });
        31i32
            .wrapping_add(self.species.content_hash())
            .wrapping_mul(31)
            .wrapping_add(lanes)
    }

    /// Fail unless the mask belongs to `species`
    pub(crate) fn check_species(&self, species: &Species) -> Result<()> {
        species.check(&self.species)
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mask[")?;
        for (i, b) in self.bits.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{b}")?;
        }
        f.write_str("]")
    }
}

impl TryFrom<(Species, &[bool])> for Mask {
    type Error = LaneError;

    fn try_from((species, values): (Species, &[bool])) -> Result<Self> {
        if values.len() != species.length() {
            return Err(LaneError::InvalidArgument(format!(
                "mask needs {} lanes, got {}",
                species.length(),
                values.len()
            )));
        }
        Mask::from_bools(species, values, 0)
    }
}
