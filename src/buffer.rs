//! Whole-buffer drivers
//!
//! Buffers longer than one vector are processed in `N`-lane steps up to
//! [`Species::loop_bound`], and the remaining tail is handled with an
//! [`Species::index_in_range`] mask so no lane past the end is touched.
//! Reductions combine the per-vector results with the same operator used
//! inside each vector, which makes the chunked result identical to a
//! sequential fold over the whole buffer.
//!
//! # Examples
//!
//! ```
//! use lanewise::{buffer, BinaryOp, LaneConfig, ReductionOp};
//!
//! let config = LaneConfig::portable().build().unwrap();
//! let a: Vec<i32> = (0..10).collect();
//! let b = vec![1; 10];
//! let mut out = vec![0; 10];
//!
//! buffer::lanewise(&config, BinaryOp::Add, &a, &b, &mut out).unwrap();
//! assert_eq!(out, (1..11).collect::<Vec<i32>>());
//! assert_eq!(buffer::reduce(&config, ReductionOp::Add, &out).unwrap(), 55);
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::config::LaneConfig;
use crate::element::LaneElement;
use crate::error::{LaneError, Result};
use crate::ops::{BinaryOp, ReductionOp};
use crate::species::Species;
use crate::vector::{Operand, Vector};

/// `out[i] = op(a[i], b[i])` over whole slices
///
/// A division by zero reports the buffer index of the first zero divisor.
/// Every check runs before the first write, so `out` is left untouched
/// whenever an error is returned.
#[cfg_attr(
    feature = "tracing",
    instrument(skip(a, b, out), fields(len = a.len()))
)]
pub fn lanewise<T: LaneElement>(
    config: &LaneConfig,
    op: BinaryOp,
    a: &[T],
    b: &[T],
    out: &mut [T],
) -> Result<()> {
    if a.len() != b.len() || a.len() != out.len() {
        return Err(LaneError::InvalidArgument(format!(
            "buffer lengths differ: {}, {} and {}",
            a.len(),
            b.len(),
            out.len()
        )));
    }

    let species = config.species();
    let backend = config.resolved_backend();
    if !crate::is_backend_available(backend) {
        return Err(LaneError::UnsupportedBackend(backend));
    }
    if op == BinaryOp::Div {
        if let Some(lane) = b.iter().position(|&x| x == T::ZERO) {
            return Err(LaneError::DivisionByZero { lane });
        }
    }

    let n = species.length();
    let bound = species.loop_bound(a.len());

    let mut i = 0;
    while i < bound {
        let va = Vector::from_slice(species, a, i)?;
        let vb = Vector::from_slice(species, b, i)?;
        let r = va.binary_on(backend, op, Operand::Vector(&vb))?;
        r.into_slice(out, i)?;
        i += n;
    }

    if i < a.len() {
        let m = species.index_in_range(i as i64, a.len() as i64);
        let va = Vector::from_slice_masked(species, a, i, &m)?;
        let vb = Vector::from_slice_masked(species, b, i, &m)?;
        let r = va.lanewise_masked(op, &vb, &m)?;
        r.into_slice_masked(out, i, &m)?;
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(vectors = bound / n, tail = a.len() - bound, "buffer lanewise done");

    Ok(())
}

/// Fold a whole slice with `op`, one vector at a time
#[cfg_attr(feature = "tracing", instrument(skip(data), fields(len = data.len())))]
pub fn reduce<T: LaneElement>(config: &LaneConfig, op: ReductionOp, data: &[T]) -> Result<T> {
    reduce_with(config.species(), op, data)
}

fn reduce_with<T: LaneElement>(species: Species, op: ReductionOp, data: &[T]) -> Result<T> {
    let n = species.length();
    let bound = species.loop_bound(data.len());

    let mut acc = op.identity();
    let mut i = 0;
    while i < bound {
        let v = Vector::from_slice(species, data, i)?;
        acc = op.combine(acc, v.reduce_lanes(op));
        i += n;
    }

    if i < data.len() {
        let m = species.index_in_range(i as i64, data.len() as i64);
        let v = Vector::from_slice_masked(species, data, i, &m)?;
        acc = op.combine(acc, v.reduce_lanes_masked(op, &m)?);
    }

    Ok(acc)
}

/// [`reduce`] split across the rayon pool for inputs of at least
/// `config.parallel_threshold` elements
///
/// Chunks are whole multiples of the lane count and partial results are
/// combined in buffer order, so the result equals [`reduce`] for every
/// operator.
#[cfg_attr(feature = "tracing", instrument(skip(data), fields(len = data.len())))]
pub fn par_reduce<T: LaneElement>(config: &LaneConfig, op: ReductionOp, data: &[T]) -> Result<T> {
    let species = config.species();

    #[cfg(feature = "parallel")]
    {
        if data.len() >= config.parallel_threshold && data.len() > species.length() {
            let chunk = chunk_len(species, data.len(), rayon::current_num_threads());

            #[cfg(feature = "tracing")]
            tracing::debug!(chunk, threads = rayon::current_num_threads(), "parallel reduce");

            let partials = data
                .par_chunks(chunk)
                .map(|c| reduce_with(species, op, c))
                .collect::<Result<Vec<T>>>()?;
            return Ok(partials
                .into_iter()
                .fold(op.identity(), |acc, x| op.combine(acc, x)));
        }
    }

    reduce_with(species, op, data)
}

/// Per-thread chunk length, rounded up to a whole number of vectors
#[cfg(feature = "parallel")]
fn chunk_len(species: Species, len: usize, threads: usize) -> usize {
    let n = species.length();
    let per_thread = len.div_ceil(threads.max(1));
    per_thread.div_ceil(n) * n
}
