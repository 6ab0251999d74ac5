/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The extract driver
//!
//! The mirror of the embed walk, read-only: the same bands, the same
//! usable-block gate and the same per-block frequency order, so the
//! bytes come back out in the order they went in. The length prefix is
//! accumulated first when one was embedded, then the payload bytes,
//! then the whole collection is run back through the error corrector
//! when one is in play.

use alloc::vec::Vec;

use log::{trace, warn};
use veil_core::coeffs::CoefficientBuffer;
use veil_core::options::EccMethod;

use crate::ecc;
use crate::embed::LENGTH_PREFIX_BYTES;
use crate::errors::StegoErrors;
use crate::freqs::FREQS_PER_BYTE;
use crate::mcu;
use crate::packer;
use crate::plan::StegoPlan;
use crate::shuffle::{self, Lcg};

impl StegoPlan {
    /// Extract the payload embedded in `image`.
    ///
    /// With an embedded length the first four usable blocks announce
    /// how many bytes follow; that announcement is clamped to the
    /// configured maximum so a forged prefix cannot demand unbounded
    /// memory. Without one, the shared-secret length from the options
    /// drives the walk. A mismatched frequency seed or quantization
    /// table yields garbage bytes, not an error; the wire format does
    /// not self-identify.
    pub fn extract<T>(&self, image: &T) -> Result<Vec<u8>, StegoErrors>
    where
        T: CoefficientBuffer + ?Sized
    {
        let component = self.options.get_component();
        let info = image
            .component_info(component)
            .ok_or(StegoErrors::NoSuchComponent(component))?;
        let band_rows = info.v_samp_factor.max(1);

        let embed_length = self.options.get_embed_length();
        let max_message_len = self.options.get_max_message_len();

        // how many bytes the walk should collect; reset by the prefix
        // once it has been read in full
        let mut msglen = if embed_length {
            LENGTH_PREFIX_BYTES
        } else if self.options.get_ecc_method() == EccMethod::Rs {
            match self.ecc_ref() {
                Some(corrector) => {
                    corrector.message_length(self.options.get_shared_length(), false)
                }
                None => self.options.get_shared_length()
            }
        } else {
            self.options.get_shared_length()
        };

        let dc_quant = self.quant.dc();
        let mut prng = (self.freqs.seed != 0).then(|| Lcg::new(self.freqs.seed));
        let mut working = [0_usize; FREQS_PER_BYTE];

        let mut remaining_prefix = if embed_length { LENGTH_PREFIX_BYTES } else { 0 };
        let mut length_in: u32 = 0;
        let mut bits_up = 0;
        let mut collected: Vec<u8> = Vec::new();
        let mut k = 0;

        let mut blk_y = 0;
        while blk_y < info.height_in_blocks && k < msglen {
            let band = image.rows(component, blk_y, band_rows);

            for block in band {
                if k >= msglen {
                    break;
                }
                if !mcu::is_usable(block, dc_quant) {
                    continue;
                }
                shuffle::fill_working(self.freqs.in_use(), prng.as_mut(), &mut working);

                let v = packer::unpack_byte(&working, block);

                if remaining_prefix > 0 {
                    length_in |= u32::from(v) << bits_up;
                    bits_up += 8;
                    remaining_prefix -= 1;

                    if remaining_prefix == 0 {
                        msglen = length_in as usize;
                        if msglen > max_message_len {
                            warn!(
                                "embedded length {length_in} exceeds the configured maximum \
                                 {max_message_len}, clamping"
                            );
                            msglen = max_message_len;
                        }
                        trace!("embedded length = {length_in} bytes");
                    }
                } else {
                    collected.push(v);
                    k += 1;
                }
            }

            blk_y += band_rows;
        }

        if k < msglen {
            warn!("image exhausted after {k} of {msglen} extracted bytes");
        }

        ecc::decode_incoming(&self.options, self.ecc_ref(), &mut collected);

        Ok(collected)
    }
}
