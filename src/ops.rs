//! Lane operators
//!
//! Every lanewise operation is named by a tag from one of the enums below and
//! evaluated through a single `apply` entry point. Vectors lift these scalar
//! definitions over all lanes, so the scalar `apply` is also the reference
//! oracle the conformance tests compare against.

use std::cmp::Ordering;

use crate::element::LaneElement;

/// Binary lanewise operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Wrapping addition
    Add,
    /// Wrapping subtraction
    Sub,
    /// Wrapping multiplication
    Mul,
    /// Truncating division, fails on a zero divisor
    Div,
    /// `a & b`
    And,
    /// `a & !b`
    AndNot,
    /// `a | b`
    Or,
    /// `a ^ b`
    Xor,
    /// Signed minimum
    Min,
    /// Signed maximum
    Max,
    /// Unsigned minimum
    UMin,
    /// Unsigned maximum
    UMax,
    /// Signed saturating addition
    SaturatingAdd,
    /// Signed saturating subtraction
    SaturatingSub,
    /// Unsigned saturating addition
    UnsignedSaturatingAdd,
    /// Unsigned saturating subtraction
    UnsignedSaturatingSub,
    /// `a` if `a != 0`, else `b`
    FirstNonzero,
    /// Logical shift left
    Lshl,
    /// Logical shift right
    Lshr,
    /// Arithmetic shift right
    Ashr,
    /// Rotate left
    Rol,
    /// Rotate right
    Ror,
    /// Parallel bit compress of `a` keyed by `b`
    CompressBits,
    /// Parallel bit expand of `a` keyed by `b`
    ExpandBits,
}

impl BinaryOp {
    /// All binary operators
    pub const ALL: [BinaryOp; 24] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::And,
        BinaryOp::AndNot,
        BinaryOp::Or,
        BinaryOp::Xor,
        BinaryOp::Min,
        BinaryOp::Max,
        BinaryOp::UMin,
        BinaryOp::UMax,
        BinaryOp::SaturatingAdd,
        BinaryOp::SaturatingSub,
        BinaryOp::UnsignedSaturatingAdd,
        BinaryOp::UnsignedSaturatingSub,
        BinaryOp::FirstNonzero,
        BinaryOp::Lshl,
        BinaryOp::Lshr,
        BinaryOp::Ashr,
        BinaryOp::Rol,
        BinaryOp::Ror,
        BinaryOp::CompressBits,
        BinaryOp::ExpandBits,
    ];

    /// Apply the operator to one pair of lanes
    ///
    /// Returns `None` only for [`BinaryOp::Div`] with a zero divisor.
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::BinaryOp;
    ///
    /// assert_eq!(BinaryOp::Add.apply(i32::MAX, 1), Some(i32::MIN));
    /// assert_eq!(BinaryOp::Div.apply(7, 0), None);
    /// ```
    #[inline]
    pub fn apply<T: LaneElement>(self, a: T, b: T) -> Option<T> {
        let r = match self {
            BinaryOp::Add => a.wrapping_add(b),
            BinaryOp::Sub => a.wrapping_sub(b),
            BinaryOp::Mul => a.wrapping_mul(b),
            BinaryOp::Div => return a.checked_div(b),
            BinaryOp::And => a & b,
            BinaryOp::AndNot => a & !b,
            BinaryOp::Or => a | b,
            BinaryOp::Xor => a ^ b,
            BinaryOp::Min => a.min(b),
            BinaryOp::Max => a.max(b),
            BinaryOp::UMin => {
                if a.unsigned_cmp(b) == Ordering::Greater {
                    b
                } else {
                    a
                }
            }
            BinaryOp::UMax => {
                if a.unsigned_cmp(b) == Ordering::Less {
                    b
                } else {
                    a
                }
            }
            BinaryOp::SaturatingAdd => a.saturating_add(b),
            BinaryOp::SaturatingSub => a.saturating_sub(b),
            BinaryOp::UnsignedSaturatingAdd => a.unsigned_saturating_add(b),
            BinaryOp::UnsignedSaturatingSub => a.unsigned_saturating_sub(b),
            BinaryOp::FirstNonzero => {
                if a != T::ZERO {
                    a
                } else {
                    b
                }
            }
            BinaryOp::Lshl => a.shl_lanes(b),
            BinaryOp::Lshr => a.lshr_lanes(b),
            BinaryOp::Ashr => a.ashr_lanes(b),
            BinaryOp::Rol => a.rotate_left_lanes(b),
            BinaryOp::Ror => a.rotate_right_lanes(b),
            BinaryOp::CompressBits => a.compress_bits(b),
            BinaryOp::ExpandBits => a.expand_bits(b),
        };
        Some(r)
    }

    /// Shift and rotate operators
    pub fn is_shift(self) -> bool {
        matches!(
            self,
            BinaryOp::Lshl | BinaryOp::Lshr | BinaryOp::Ashr | BinaryOp::Rol | BinaryOp::Ror
        )
    }
}

/// Unary lanewise operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Wrapping negation
    Neg,
    /// Absolute value (`MIN` maps to itself)
    Abs,
    /// Bitwise complement
    Not,
    /// Zero-or-minus-one: `0` for `0`, `-1` otherwise
    ZeroOrMinusOne,
    /// Population count
    BitCount,
    /// Trailing zero count
    TrailingZerosCount,
    /// Leading zero count
    LeadingZerosCount,
    /// Bit reversal
    Reverse,
    /// Byte reversal
    ReverseBytes,
}

impl UnaryOp {
    /// All unary operators
    pub const ALL: [UnaryOp; 9] = [
        UnaryOp::Neg,
        UnaryOp::Abs,
        UnaryOp::Not,
        UnaryOp::ZeroOrMinusOne,
        UnaryOp::BitCount,
        UnaryOp::TrailingZerosCount,
        UnaryOp::LeadingZerosCount,
        UnaryOp::Reverse,
        UnaryOp::ReverseBytes,
    ];

    /// Apply the operator to one lane
    #[inline]
    pub fn apply<T: LaneElement>(self, a: T) -> T {
        match self {
            UnaryOp::Neg => a.wrapping_neg(),
            UnaryOp::Abs => a.wrapping_abs(),
            UnaryOp::Not => !a,
            UnaryOp::ZeroOrMinusOne => {
                if a == T::ZERO {
                    T::ZERO
                } else {
                    T::ALL_ONES
                }
            }
            UnaryOp::BitCount => a.bit_count(),
            UnaryOp::TrailingZerosCount => a.trailing_zeros_count(),
            UnaryOp::LeadingZerosCount => a.leading_zeros_count(),
            UnaryOp::Reverse => a.reverse_bits(),
            UnaryOp::ReverseBytes => a.reverse_bytes(),
        }
    }
}

/// Ternary lanewise operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TernaryOp {
    /// `(a & !c) | (b & c)`: take bits of `b` where `c` is set
    BitwiseBlend,
}

impl TernaryOp {
    /// Apply the operator to one lane triple
    #[inline]
    pub fn apply<T: LaneElement>(self, a: T, b: T, c: T) -> T {
        match self {
            TernaryOp::BitwiseBlend => (a & !c) | (b & c),
        }
    }
}

/// Associative operators usable in lane reductions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReductionOp {
    And,
    Or,
    Xor,
    Add,
    Mul,
    Min,
    Max,
    UMin,
    UMax,
    UnsignedSaturatingAdd,
    FirstNonzero,
}

impl ReductionOp {
    /// All reduction operators
    pub const ALL: [ReductionOp; 11] = [
        ReductionOp::And,
        ReductionOp::Or,
        ReductionOp::Xor,
        ReductionOp::Add,
        ReductionOp::Mul,
        ReductionOp::Min,
        ReductionOp::Max,
        ReductionOp::UMin,
        ReductionOp::UMax,
        ReductionOp::UnsignedSaturatingAdd,
        ReductionOp::FirstNonzero,
    ];

    /// Identity element: `fold(identity, x) == x` for every `x`
    ///
    /// An empty (fully masked-off) reduction returns this value.
    pub fn identity<T: LaneElement>(self) -> T {
        match self {
            ReductionOp::And => T::ALL_ONES,
            ReductionOp::Or
            | ReductionOp::Xor
            | ReductionOp::Add
            | ReductionOp::UnsignedSaturatingAdd
            | ReductionOp::FirstNonzero => T::ZERO,
            ReductionOp::Mul => T::ONE,
            ReductionOp::Min => T::MAX,
            ReductionOp::Max => T::MIN,
            // Unsigned extremes: all ones is UINT_MAX, zero is 0
            ReductionOp::UMin => T::ALL_ONES,
            ReductionOp::UMax => T::ZERO,
        }
    }

    /// The binary operator this reduction folds with
    pub fn binary_op(self) -> BinaryOp {
        match self {
            ReductionOp::And => BinaryOp::And,
            ReductionOp::Or => BinaryOp::Or,
            ReductionOp::Xor => BinaryOp::Xor,
            ReductionOp::Add => BinaryOp::Add,
            ReductionOp::Mul => BinaryOp::Mul,
            ReductionOp::Min => BinaryOp::Min,
            ReductionOp::Max => BinaryOp::Max,
            ReductionOp::UMin => BinaryOp::UMin,
            ReductionOp::UMax => BinaryOp::UMax,
            ReductionOp::UnsignedSaturatingAdd => BinaryOp::UnsignedSaturatingAdd,
            ReductionOp::FirstNonzero => BinaryOp::FirstNonzero,
        }
    }

    /// Combine two partial results
    #[inline]
    pub fn combine<T: LaneElement>(self, acc: T, x: T) -> T {
        // None of the fold operators can fail
        self.binary_op().apply(acc, x).unwrap_or(acc)
    }
}

/// Lane comparisons producing masks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// Unsigned less-than
    Ult,
    /// Unsigned less-or-equal
    Ule,
    /// Unsigned greater-than
    Ugt,
    /// Unsigned greater-or-equal
    Uge,
}

impl Comparison {
    /// All comparisons
    pub const ALL: [Comparison; 10] = [
        Comparison::Eq,
        Comparison::Ne,
        Comparison::Lt,
        Comparison::Le,
        Comparison::Gt,
        Comparison::Ge,
        Comparison::Ult,
        Comparison::Ule,
        Comparison::Ugt,
        Comparison::Uge,
    ];

    /// Evaluate the comparison on one lane pair
    #[inline]
    pub fn test<T: LaneElement>(self, a: T, b: T) -> bool {
        match self {
            Comparison::Eq => a == b,
            Comparison::Ne => a != b,
            Comparison::Lt => a < b,
            Comparison::Le => a <= b,
            Comparison::Gt => a > b,
            Comparison::Ge => a >= b,
            Comparison::Ult => a.unsigned_cmp(b) == Ordering::Less,
            Comparison::Ule => a.unsigned_cmp(b) != Ordering::Greater,
            Comparison::Ugt => a.unsigned_cmp(b) == Ordering::Greater,
            Comparison::Uge => a.unsigned_cmp(b) != Ordering::Less,
        }
    }
}

/// Single-lane predicates producing masks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestOp {
    /// Lane equals the default value (zero)
    IsDefault,
    /// Lane is negative
    IsNegative,
}

impl TestOp {
    /// Evaluate the predicate on one lane
    #[inline]
    pub fn test<T: LaneElement>(self, a: T) -> bool {
        match self {
            TestOp::IsDefault => a == T::ZERO,
            TestOp::IsNegative => a < T::ZERO,
        }
    }
}
