//! Lane shuffles
//!
//! A [`Shuffle`] is an immutable list of `N` source lane indices. Indices are
//! normalized into `[0, N)` with `floorMod` when the shuffle is built, so every
//! stored index is a valid lane.

use std::fmt;

use crate::error::Result;
use crate::species::Species;
use crate::vector::IntVector;

/// Per-lane source indices for [`IntVector::rearrange`]
///
/// # Examples
///
/// ```
/// use lanewise::{Shuffle, Species, VectorShape};
///
/// let species = Species::of(VectorShape::S128Bit);
/// let s = Shuffle::from_slice(species, &[1, 0, -1, 6], 0).unwrap();
/// assert_eq!(s.to_vec(), vec![1, 0, 3, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shuffle {
    species: Species,
    indices: Vec<usize>,
}

impl Shuffle {
    /// Shuffle whose lane `i` is `f(i) mod N`
    pub fn from_fn(species: Species, mut f: impl FnMut(usize) -> i32) -> Self {
        let n = species.length();
        Self {
            species,
            indices: (0..n).map(|i| wrap(i64::from(f(i)), n)).collect(),
        }
    }

    /// Load `N` indices from `indices[offset..]`, wrapping each into `[0, N)`
    pub fn from_slice(species: Species, indices: &[i32], offset: usize) -> Result<Self> {
        species.check_window(offset, indices.len())?;
        Ok(Self::from_fn(species, |i| indices[offset + i]))
    }

    /// `start, start + step, start + 2 * step, ...` wrapped into `[0, N)`
    ///
    /// ```
    /// use lanewise::{Shuffle, Species, VectorShape};
    ///
    /// let species = Species::of(VectorShape::S128Bit);
    /// assert_eq!(Shuffle::iota(species, 1, 1).to_vec(), vec![1, 2, 3, 0]);
    /// assert_eq!(Shuffle::iota(species, 3, -1).to_vec(), vec![3, 2, 1, 0]);
    /// ```
    pub fn iota(species: Species, start: i32, step: i32) -> Self {
        let n = species.length();
        Self {
            species,
            indices: (0..n)
                .map(|i| wrap(i64::from(start) + i as i64 * i64::from(step), n))
                .collect(),
        }
    }

    pub fn species(&self) -> Species {
        self.species
    }

    /// Number of lanes
    pub fn length(&self) -> usize {
        self.indices.len()
    }

    /// Source lane for destination lane `i`
    pub fn index(&self, i: usize) -> Result<usize> {
        self.species.check_index(i)?;
        Ok(self.indices[i])
    }

    #[inline]
    pub(crate) fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.indices.clone()
    }

    /// Indices as an integer vector of the same species
    pub fn to_vector(&self) -> IntVector {
        IntVector::from_fn(self.species, |i| self.indices[i] as i32)
    }

    /// `31 * (31 + species_hash) + hash(indices)`
    pub fn content_hash(&self) -> i32 {
        let lanes = self
            .indices
            .iter()
            .fold(1i32, |h, &x| h.wrapping_mul(31).wrapping_add(x as i32));
        31i32
            .wrapping_add(self.species.content_hash())
            .wrapping_mul(31)
            .wrapping_add(lanes)
    }
}

impl fmt::Display for Shuffle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Shuffle[")?;
        for (i, x) in self.indices.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{x}")?;
        }
        f.write_str("]")
    }
}

/// `floorMod(index, n)`
#[inline]
pub(crate) fn wrap(index: i64, n: usize) -> usize {
    index.rem_euclid(n as i64) as usize
}
