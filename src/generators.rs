//! Deterministic input tables for conformance testing
//!
//! Each [`Generator`] is a named pure function from buffer index to value, so
//! a failing case can be reproduced from its name and length alone. The
//! integer tables mix arithmetic progressions with the corner cases
//! `i32::MIN`, `i32::MAX` and `0`.
//!
//! ```
//! use lanewise::generators::{corner_case_value, int_generators};
//!
//! assert_eq!(corner_case_value(1), i32::MIN);
//! let names: Vec<_> = int_generators().iter().map(|g| g.name()).collect();
//! assert!(names.contains(&"int[cornerCaseValue(i)]"));
//! ```

use std::fmt;

/// Fixed amount used by the constant-shift forms
pub const CONST_SHIFT: i32 = i32::BITS as i32 / 2;

/// Named index-to-value function
#[derive(Clone, Copy)]
pub struct Generator<T> {
    name: &'static str,
    f: fn(usize) -> T,
}

impl<T> Generator<T> {
    pub const fn new(name: &'static str, f: fn(usize) -> T) -> Self {
        Self { name, f }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn value(&self, i: usize) -> T {
        (self.f)(i)
    }

    /// Values for indices `0..len`
    pub fn generate(&self, len: usize) -> Vec<T> {
        (0..len).map(self.f).collect()
    }
}

impl<T> fmt::Debug for Generator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl<T> fmt::Display for Generator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Named `(index, lane count) -> lane index` function for shuffles
#[derive(Clone, Copy)]
pub struct IndexGenerator {
    name: &'static str,
    f: fn(usize, usize) -> i32,
}

impl IndexGenerator {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Indices for `0..len`, each computed against `lanes` lanes
    pub fn generate(&self, len: usize, lanes: usize) -> Vec<i32> {
        (0..len).map(|i| (self.f)(i, lanes)).collect()
    }
}

impl fmt::Debug for IndexGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// `MAX, MIN, MIN, MAX, 0` repeating
pub fn corner_case_value(i: usize) -> i32 {
    match i % 5 {
        0 => i32::MAX,
        1 | 2 => i32::MIN,
        3 => i32::MAX,
        _ => 0,
    }
}

/// General-purpose integer inputs
pub fn int_generators() -> Vec<Generator<i32>> {
    vec![
        Generator::new("int[-i * 5]", |i| (i as i32).wrapping_mul(-5)),
        Generator::new("int[i * 5]", |i| (i as i32).wrapping_mul(5)),
        Generator::new("int[i + 1]", |i| {
            let v = (i as i32).wrapping_add(1);
            if v == 0 {
                1
            } else {
                v
            }
        }),
        Generator::new("int[cornerCaseValue(i)]", corner_case_value),
    ]
}

/// Inputs that drive saturating arithmetic into both clamps
pub fn saturating_generators() -> Vec<Generator<i32>> {
    vec![
        Generator::new("int[i32::MIN]", |_| i32::MIN),
        Generator::new("int[i32::MAX]", |_| i32::MAX),
        Generator::new("int[i32::MAX - 100]", |_| i32::MAX - 100),
        Generator::new("int[i32::MIN + 100]", |_| i32::MIN + 100),
        Generator::new("int[-i * 5]", |i| (i as i32).wrapping_mul(-5)),
        Generator::new("int[i * 5]", |i| (i as i32).wrapping_mul(5)),
    ]
}

/// Operand triples for associativity checks of saturating addition
pub fn saturating_assoc_generators() -> Vec<Generator<i32>> {
    vec![
        Generator::new("int[i32::MAX]", |_| i32::MAX),
        Generator::new("int[i32::MAX - 100]", |_| i32::MAX - 100),
        Generator::new("int[-1]", |_| -1),
    ]
}

/// Shift amounts, including negative and out-of-range ones
pub fn shift_generators() -> Vec<Generator<i32>> {
    vec![
        Generator::new("shift[i]", |i| i as i32),
        Generator::new("shift[-i]", |i| -(i as i32)),
        Generator::new("shift[i * 7 + 31]", |i| (i as i32).wrapping_mul(7).wrapping_add(31)),
        Generator::new("shift[CONST_SHIFT]", |_| CONST_SHIFT),
    ]
}

/// Lane masks
pub fn mask_generators() -> Vec<Generator<bool>> {
    vec![
        Generator::new("mask[true]", |_| true),
        Generator::new("mask[false]", |_| false),
        Generator::new("mask[i % 2]", |i| i % 2 == 0),
        Generator::new("mask[i % 3]", |i| i % 3 == 0),
        Generator::new("mask[i % 5 != 4]", |i| i % 5 != 4),
    ]
}

/// Lane-index patterns for shuffles and select-from
pub fn index_generators() -> Vec<IndexGenerator> {
    vec![
        IndexGenerator {
            name: "index[i % n]",
            f: |i, n| (i % n) as i32,
        },
        IndexGenerator {
            name: "index[n - 1 - i % n]",
            f: |i, n| (n - 1 - i % n) as i32,
        },
        IndexGenerator {
            name: "index[(i + 1) % n]",
            f: |i, n| ((i + 1) % n) as i32,
        },
        IndexGenerator {
            name: "index[i * 3 - n]",
            f: |i, n| (i as i32).wrapping_mul(3).wrapping_sub(n as i32),
        },
    ]
}

/// Copy of `data` with every zero replaced by one, for division divisors
pub fn replace_zero(data: &[i32]) -> Vec<i32> {
    data.iter().map(|&x| if x == 0 { 1 } else { x }).collect()
}

/// Replace zeros only where `mask[i % mask.len()]` is set
pub fn replace_zero_masked(data: &[i32], mask: &[bool]) -> Vec<i32> {
    if mask.is_empty() {
        return data.to_vec();
    }
    data.iter()
        .enumerate()
        .map(|(i, &x)| {
            if x == 0 && mask[i % mask.len()] {
                1
            } else {
                x
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_case_cycle() {
        let v: Vec<i32> = (0..10).map(corner_case_value).collect();
        assert_eq!(
            v,
            vec![
                i32::MAX,
                i32::MIN,
                i32::MIN,
                i32::MAX,
                0,
                i32::MAX,
                i32::MIN,
                i32::MIN,
                i32::MAX,
                0
            ]
        );
    }

    #[test]
    fn test_int_generators() {
        let gens = int_generators();
        assert_eq!(gens.len(), 4);
        assert_eq!(gens[0].generate(4), vec![0, -5, -10, -15]);
        assert_eq!(gens[1].generate(3), vec![0, 5, 10]);
        assert_eq!(gens[2].generate(3), vec![1, 2, 3]);
        assert_eq!(gens[3].value(4), 0);
        assert_eq!(format!("{:?}", gens[1]), "int[i * 5]");
    }

    #[test]
    fn test_saturating_tables() {
        let assoc = saturating_assoc_generators();
        assert_eq!(assoc[0].value(7), i32::MAX);
        assert_eq!(assoc[1].value(0), i32::MAX - 100);
        assert_eq!(assoc[2].value(3), -1);
        assert_eq!(saturating_generators().len(), 6);
    }

    #[test]
    fn test_shift_generators_include_constant() {
        let gens = shift_generators();
        assert!(gens.iter().any(|g| g.generate(8).iter().all(|&s| s == 16)));
        assert_eq!(CONST_SHIFT, 16);
    }

    #[test]
    fn test_mask_generators() {
        let gens = mask_generators();
        assert!(gens[0].generate(8).iter().all(|&b| b));
        assert!(gens[1].generate(8).iter().all(|&b| !b));
        assert_eq!(gens[2].generate(4), vec![true, false, true, false]);
    }

    #[test]
    fn test_index_generators() {
        let gens = index_generators();
        assert_eq!(gens[0].generate(6, 4), vec![0, 1, 2, 3, 0, 1]);
        assert_eq!(gens[1].generate(4, 4), vec![3, 2, 1, 0]);
        assert_eq!(gens[2].generate(4, 4), vec![1, 2, 3, 0]);
        assert_eq!(gens[3].generate(3, 4), vec![-4, -1, 2]);
    }

    #[test]
    fn test_replace_zero() {
        assert_eq!(replace_zero(&[0, 5, 0, -3]), vec![1, 5, 1, -3]);
        assert_eq!(
            replace_zero_masked(&[0, 0, 0, 7], &[true, false]),
            vec![1, 0, 1, 7]
        );
        assert_eq!(replace_zero_masked(&[0, 2], &[]), vec![0, 2]);
    }
}
