/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Frequency selection
//!
//! Given a quantization table, find the AC frequencies with enough
//! quanta to carry two payload bits each. The walk starts at the highest
//! zig-zag index and works downward: high frequencies are quantized most
//! heavily, their coefficients are almost always zero after
//! quantization, so writing small values there is both recompression
//! stable and visually negligible.

use veil_core::quant::{QuantTable, BLOCK_SIZE};

/// Most frequencies an embedding code can reference per block.
pub(crate) const MAX_FREQS: usize = 8;

/// Frequencies consumed per embedded byte, two bits each.
pub(crate) const FREQS_PER_BYTE: usize = 4;

/// The embedding code's frequency configuration, resolved once per
/// image when the plan is built.
pub(crate) struct FrequencySpec {
    /// Candidate AC indices in selection order, `candidates[..nfreqs]`
    /// being meaningful.
    pub candidates: [usize; MAX_FREQS],
    /// How many candidates are in use. The byte-per-block code needs
    /// exactly [`FREQS_PER_BYTE`].
    pub nfreqs:     usize,
    /// Permutation seed shared by both sides, 0 disabling permutation.
    pub seed:       u32
}

impl FrequencySpec {
    /// The candidate indices in use.
    pub(crate) fn in_use(&self) -> &[usize] {
        &self.candidates[..self.nfreqs]
    }
}

/// Append AC indices with at least `nlevels` quanta to `out`, walking
/// from index 63 down to 1 and stopping when `out` is full. Returns how
/// many were found.
///
/// The DC index 0 is never a candidate; the block predicate depends on
/// it surviving untouched.
pub(crate) fn select_frequencies(table: &QuantTable, out: &mut [usize], nlevels: usize) -> usize {
    let mut found = 0;

    for j in (1..BLOCK_SIZE).rev() {
        if found == out.len() {
            break;
        }
        if usize::from(table.quanta(j)) >= nlevels {
            out[found] = j;
            found += 1;
        }
    }

    found
}
