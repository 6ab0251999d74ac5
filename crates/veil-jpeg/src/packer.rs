/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Byte to coefficient packing
//!
//! One byte rides in four coefficients, two bits each, least
//! significant pair first. Packing assigns rather than xors: whatever
//! the coefficients held is destroyed, which is acceptable because the
//! frequency selector only offers indices whose coefficients are
//! typically zero and perceptually cheap.

use veil_core::coeffs::CoefBlock;

/// Pack `v` into the four coefficients named by `freqs`.
pub(crate) fn pack_byte(v: u8, freqs: &[usize], block: &mut CoefBlock) {
    block[freqs[0]] = i16::from(v & 0x03);
    block[freqs[1]] = i16::from((v >> 2) & 0x03);
    block[freqs[2]] = i16::from((v >> 4) & 0x03);
    block[freqs[3]] = i16::from((v >> 6) & 0x03);
}

/// Reassemble the byte packed at `freqs`.
///
/// Masking keeps the low two bits of each coefficient in two's
/// complement, so reading a block nobody packed yields a well defined,
/// if meaningless, byte.
pub(crate) fn unpack_byte(freqs: &[usize], block: &CoefBlock) -> u8 {
    ((block[freqs[0]] & 0x03)
        | ((block[freqs[1]] & 0x03) << 2)
        | ((block[freqs[2]] & 0x03) << 4)
        | ((block[freqs[3]] & 0x03) << 6)) as u8
}
