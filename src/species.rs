//! Species: element type, shape and lane count of a vector
//!
//! Vectors, masks and shuffles only interoperate when their species are equal.
//! A species is a small `Copy` value; comparing two of them is the whole
//! compatibility check.

use std::fmt;
use std::sync::OnceLock;

use crate::error::{LaneError, Result};
use crate::mask::Mask;
use crate::vector::IntVector;

/// Lane element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Signed 32-bit integer
    Int,
}

impl ElementType {
    /// Element width in bits
    pub fn bits(self) -> usize {
        match self {
            ElementType::Int => 32,
        }
    }

    /// Lower-case element name as it appears in species strings
    pub fn name(self) -> &'static str {
        match self {
            ElementType::Int => "int",
        }
    }
}

/// Vector register widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorShape {
    S64Bit,
    S128Bit,
    S256Bit,
    S512Bit,
    /// Widest register of the running CPU
    SMaxBit,
}

impl VectorShape {
    /// All shapes, fixed widths first
    pub const ALL: [VectorShape; 5] = [
        VectorShape::S64Bit,
        VectorShape::S128Bit,
        VectorShape::S256Bit,
        VectorShape::S512Bit,
        VectorShape::SMaxBit,
    ];

    /// Register width in bits
    ///
    /// For [`VectorShape::SMaxBit`] this is the width preferred by the
    /// detected backend (see [`crate::Backend::max_vector_bits`]).
    pub fn vector_bit_size(self) -> usize {
        match self {
            VectorShape::S64Bit => 64,
            VectorShape::S128Bit => 128,
            VectorShape::S256Bit => 256,
            VectorShape::S512Bit => 512,
            VectorShape::SMaxBit => detected_max_bits(),
        }
    }

    /// Fixed shape with exactly `bits` bits
    pub fn for_bit_size(bits: usize) -> Result<Self> {
        match bits {
            64 => Ok(VectorShape::S64Bit),
            128 => Ok(VectorShape::S128Bit),
            256 => Ok(VectorShape::S256Bit),
            512 => Ok(VectorShape::S512Bit),
            _ => Err(LaneError::InvalidArgument(format!(
                "no fixed vector shape has {bits} bits"
            ))),
        }
    }

    fn label(self) -> &'static str {
        match self {
            VectorShape::S64Bit => "S_64_BIT",
            VectorShape::S128Bit => "S_128_BIT",
            VectorShape::S256Bit => "S_256_BIT",
            VectorShape::S512Bit => "S_512_BIT",
            VectorShape::SMaxBit => "S_Max_BIT",
        }
    }
}

impl fmt::Display for VectorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn detected_max_bits() -> usize {
    static MAX_BITS: OnceLock<usize> = OnceLock::new();
    *MAX_BITS.get_or_init(|| crate::detected_backend().max_vector_bits())
}

/// Element type, shape and lane count
///
/// # Examples
///
/// ```
/// use lanewise::{Species, VectorShape};
///
/// let species = Species::of(VectorShape::S256Bit);
/// assert_eq!(species.length(), 8);
/// assert_eq!(species.to_string(), "Species[int, 8, S_256_BIT]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Species {
    element: ElementType,
    shape: VectorShape,
    bits: usize,
    length: usize,
}

impl Species {
    /// Integer species of the given shape
    pub fn of(shape: VectorShape) -> Self {
        Self::from_parts(ElementType::Int, shape, shape.vector_bit_size())
    }

    /// Integer species of the widest shape the CPU supports
    pub fn max() -> Self {
        Self::of(VectorShape::SMaxBit)
    }

    /// `SMaxBit` species with an explicit register width
    ///
    /// `bits` must already be validated by the caller.
    pub(crate) fn with_max_bits(bits: usize) -> Self {
        Self::from_parts(ElementType::Int, VectorShape::SMaxBit, bits)
    }

    fn from_parts(element: ElementType, shape: VectorShape, bits: usize) -> Self {
        Self {
            element,
            shape,
            bits,
            length: bits / element.bits(),
        }
    }

    /// Number of lanes (`N`)
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Lane width in bits
    pub fn element_size(&self) -> usize {
        self.element.bits()
    }

    pub fn element_type(&self) -> ElementType {
        self.element
    }

    /// Total vector width in bits
    pub fn vector_bit_size(&self) -> usize {
        self.bits
    }

    pub fn shape(&self) -> VectorShape {
        self.shape
    }

    /// Same element type, different shape
    pub fn with_shape(&self, shape: VectorShape) -> Self {
        Self::from_parts(self.element, shape, shape.vector_bit_size())
    }

    /// Same shape, different element type
    pub fn with_lanes(&self, element: ElementType) -> Self {
        Self::from_parts(element, self.shape, self.bits)
    }

    /// Largest multiple of the lane count not exceeding `len`
    ///
    /// ```
    /// use lanewise::{Species, VectorShape};
    ///
    /// let species = Species::of(VectorShape::S128Bit);
    /// assert_eq!(species.loop_bound(10), 8);
    /// assert_eq!(species.loop_bound(3), 0);
    /// ```
    #[inline]
    pub fn loop_bound(&self, len: usize) -> usize {
        len - len % self.length
    }

    /// Mask with lane `j` set iff `0 <= offset + j < limit`
    ///
    /// Offsets may be negative, so a window that starts before index zero
    /// masks off its leading lanes.
    pub fn index_in_range(&self, offset: i64, limit: i64) -> Mask {
        Mask::from_fn(*self, |j| in_range(offset, j, limit))
    }

    /// Mask with every lane set to `bit`
    pub fn mask_all(&self, bit: bool) -> Mask {
        Mask::from_fn(*self, |_| bit)
    }

    /// All-zero vector of this species
    pub fn zero(&self) -> IntVector {
        IntVector::zero(*self)
    }

    /// Vector with every lane set to `value`
    pub fn broadcast(&self, value: i32) -> IntVector {
        IntVector::broadcast(*self, value)
    }

    /// Deterministic hash combining element type, lane count and width
    ///
    /// Used as the species term of vector, mask and shuffle content hashes.
    pub fn content_hash(&self) -> i32 {
        let mut h: i32 = 1;
        h = h.wrapping_mul(31).wrapping_add(self.element.bits() as i32);
        h = h.wrapping_mul(31).wrapping_add(self.length as i32);
        h.wrapping_mul(31).wrapping_add(self.bits as i32)
    }

    /// Fail with [`LaneError::SpeciesMismatch`] unless `other` equals `self`
    #[inline]
    pub(crate) fn check(&self, other: &Species) -> Result<()> {
        if self == other {
            Ok(())
        } else {
            Err(LaneError::SpeciesMismatch {
                expected: *self,
                actual: *other,
            })
        }
    }

    /// Fail with [`LaneError::LaneIndexOutOfBounds`] unless `index < N`
    #[inline]
    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index < self.length {
            Ok(())
        } else {
            Err(LaneError::LaneIndexOutOfBounds {
                index,
                lanes: self.length,
            })
        }
    }

    /// Fail with [`LaneError::ArrayOutOfBounds`] unless `[offset, offset + N)`
    /// fits in `len`
    #[inline]
    pub(crate) fn check_window(&self, offset: usize, len: usize) -> Result<()> {
        match offset.checked_add(self.length) {
            Some(end) if end <= len => Ok(()),
            _ => Err(LaneError::ArrayOutOfBounds {
                offset,
                lanes: self.length,
                len,
            }),
        }
    }
}

/// `0 <= offset + j < limit` without overflow
pub(crate) fn in_range(offset: i64, j: usize, limit: i64) -> bool {
    let index = i128::from(offset) + j as i128;
    index >= 0 && index < i128::from(limit)
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Species[{}, {}, {}]",
            self.element.name(),
            self.length,
            self.shape
        )
    }
}
