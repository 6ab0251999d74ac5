/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! JPEG quantization tables
//!
//! A quantization table is the set of 64 divisors an encoder applied to
//! one component's DCT coefficients. The embedding engine reads it to
//! decide which frequencies can hold distinguishable values and to map
//! DC coefficients back to a luminance estimate.

use core::fmt;
use core::fmt::Formatter;

/// Number of coefficients in an 8x8 DCT block.
pub const BLOCK_SIZE: usize = 64;

/// A JPEG quantization table in zig-zag order.
///
/// Entry 0 divides the DC coefficient, entries `1..64` the AC
/// coefficients. Every entry is non zero, a zero divisor cannot occur in
/// a valid JPEG stream.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct QuantTable {
    values: [u16; BLOCK_SIZE]
}

impl QuantTable {
    /// Create a table from 64 divisors in zig-zag order.
    ///
    /// Returns `None` when any entry is zero.
    pub fn new(values: [u16; BLOCK_SIZE]) -> Option<QuantTable> {
        if values.iter().any(|v| *v == 0) {
            return None;
        }
        Some(QuantTable { values })
    }

    /// Create a table from a slice of divisors in zig-zag order.
    ///
    /// Returns `None` when the slice is not exactly 64 entries long or
    /// any entry is zero.
    pub fn from_slice(values: &[u16]) -> Option<QuantTable> {
        let values: [u16; BLOCK_SIZE] = values.try_into().ok()?;

        QuantTable::new(values)
    }

    /// The DC divisor, entry 0.
    #[must_use]
    pub const fn dc(&self) -> u16 {
        self.values[0]
    }

    /// The divisor at zig-zag position `index`.
    ///
    /// # Panics
    /// If `index` is not below 64.
    #[must_use]
    pub const fn value(&self, index: usize) -> u16 {
        self.values[index]
    }

    /// Number of distinguishable quanta a coefficient at zig-zag
    /// position `index` can take in the 8-bit sample range.
    ///
    /// A heavily quantized frequency has few quanta, so small values
    /// written there survive requantization at the same quality.
    ///
    /// # Panics
    /// If `index` is not below 64.
    #[must_use]
    pub const fn quanta(&self, index: usize) -> u16 {
        255 / self.values[index]
    }

    /// All 64 divisors in zig-zag order.
    #[must_use]
    pub const fn values(&self) -> &[u16; BLOCK_SIZE] {
        &self.values
    }
}

impl fmt::Debug for QuantTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Formats the table as the 8x8 grid it describes, handy when tracing
/// why a frequency set was or wasn't selected.
impl fmt::Display for QuantTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.values.chunks_exact(8) {
            for value in row {
                write!(f, "{value:4} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
