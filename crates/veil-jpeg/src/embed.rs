/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The embed driver
//!
//! Walks the luminance blocks in raster order, band by band the way
//! libjpeg pages its virtual coefficient arrays, and packs one byte
//! into every usable block: first the four length-prefix bytes when the
//! length is embedded, then the message bytes, stopping as soon as the
//! message is out.

use log::{trace, warn};
use veil_core::coeffs::CoefficientBuffer;

use crate::ecc;
use crate::errors::StegoErrors;
use crate::freqs::FREQS_PER_BYTE;
use crate::mcu;
use crate::packer;
use crate::plan::StegoPlan;
use crate::shuffle::{self, Lcg};

/// Usable blocks consumed by the little-endian length prefix.
pub(crate) const LENGTH_PREFIX_BYTES: usize = 4;

impl StegoPlan {
    /// Embed `payload` into `image`, mutating its coefficients in
    /// place.
    ///
    /// Returns the number of *plaintext* bytes embedded: the full
    /// payload length when everything fit, or the partial count written
    /// before the image ran out of usable blocks. A short return is not
    /// an error here, the caller decides whether a truncated message is
    /// fatal. When error correction is active the partial count is in
    /// codeword bytes, since no prefix of the plaintext is recoverable
    /// from a truncated codeword anyway.
    pub fn embed<T>(&self, image: &mut T, payload: &[u8]) -> Result<usize, StegoErrors>
    where
        T: CoefficientBuffer + ?Sized
    {
        let component = self.options.get_component();
        let info = image
            .component_info(component)
            .ok_or(StegoErrors::NoSuchComponent(component))?;
        let band_rows = info.v_samp_factor.max(1);

        let outgoing = ecc::encode_outgoing(&self.options, self.ecc_ref(), payload)?;
        let message: &[u8] = &outgoing.bytes;
        let msglen = message.len();

        trace!("embedding {msglen} message bytes, ecc active: {}", outgoing.ecc_active);

        let dc_quant = self.quant.dc();
        let mut prng = (self.freqs.seed != 0).then(|| Lcg::new(self.freqs.seed));
        let mut working = [0_usize; FREQS_PER_BYTE];

        let mut remaining_prefix = if self.options.get_embed_length() {
            LENGTH_PREFIX_BYTES
        } else {
            0
        };
        let mut length_out = msglen as u32;
        let mut k = 0;

        let mut blk_y = 0;
        while blk_y < info.height_in_blocks && k < msglen {
            let band = image.rows_mut(component, blk_y, band_rows);

            for block in band {
                if k >= msglen {
                    break;
                }
                if !mcu::is_usable(block, dc_quant) {
                    continue;
                }
                shuffle::fill_working(self.freqs.in_use(), prng.as_mut(), &mut working);

                if remaining_prefix > 0 {
                    packer::pack_byte((length_out & 0xFF) as u8, &working, block);
                    length_out >>= 8;
                    remaining_prefix -= 1;
                } else {
                    packer::pack_byte(message[k], &working, block);
                    k += 1;
                }
            }

            blk_y += band_rows;
        }

        if k < msglen {
            warn!("image exhausted after {k} of {msglen} message bytes");
            return Ok(k);
        }

        Ok(if outgoing.ecc_active { payload.len() } else { k })
    }
}
