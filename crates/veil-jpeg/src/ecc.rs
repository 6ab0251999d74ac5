/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Error correction bridge
//!
//! The Reed-Solomon coder itself lives outside this crate. Drivers talk
//! to whatever the caller attaches through [`ErrorCorrector`], and this
//! module adapts that contract to the embed and extract walks: choosing
//! the framed or unframed variant, falling back to plaintext when
//! encoding fails, and rounding collected byte counts up to the coder's
//! block boundary before decoding.
//!
//! Scratch codewords are plain `Vec`s owned by the driver call, so they
//! are released on every exit path.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use log::{trace, warn};
use veil_core::options::{EccMethod, EmbedOptions};

use crate::errors::StegoErrors;

/// A block error correcting coder, Reed-Solomon in practice.
///
/// The framed variants write the plaintext length inside the codeword;
/// the unframed ones leave the plaintext length to be carried out of
/// band. Encoders and decoders return `None` on failure, which the
/// drivers treat as "transmit/keep the raw bytes", never as a hard
/// error.
pub trait ErrorCorrector {
    /// Encode `raw` into a codeword that frames its own length.
    fn encode(&self, raw: &[u8]) -> Option<Vec<u8>>;

    /// Encode `raw` without framing; the plaintext length becomes a
    /// shared secret.
    fn encode_nolength(&self, raw: &[u8]) -> Option<Vec<u8>>;

    /// Decode a length-framed codeword back to plaintext.
    fn decode(&self, codeword: &[u8]) -> Option<Vec<u8>>;

    /// Decode an unframed codeword into `plain_len` plaintext bytes.
    fn decode_nolength(&self, codeword: &[u8], plain_len: usize) -> Option<Vec<u8>>;

    /// Round `len` up to the next codeword block boundary.
    fn block_length(&self, len: usize) -> usize;

    /// Codeword length produced for `plain_len` plaintext bytes.
    fn message_length(&self, plain_len: usize, framed: bool) -> usize;

    /// Pre-encode check on the payload. A `false` here is reported but
    /// not fatal unless the options escalate it.
    fn sanity_check(&self, _raw: &[u8]) -> bool {
        true
    }
}

/// What the embed driver actually writes into the image.
pub(crate) struct Outgoing<'a> {
    pub bytes:      Cow<'a, [u8]>,
    /// Whether `bytes` is a codeword rather than the plaintext. Cleared
    /// when encoding failed and the driver fell back to plaintext.
    pub ecc_active: bool
}

/// Run the payload through the corrector when the options ask for it.
pub(crate) fn encode_outgoing<'a>(
    options: &EmbedOptions, corrector: Option<&dyn ErrorCorrector>, payload: &'a [u8]
) -> Result<Outgoing<'a>, StegoErrors> {
    let plain = Outgoing {
        bytes:      Cow::Borrowed(payload),
        ecc_active: false
    };

    if options.get_ecc_method() != EccMethod::Rs {
        return Ok(plain);
    }
    let corrector = match corrector {
        Some(corrector) => corrector,
        None => {
            warn!("rs error correction requested but no corrector is attached, embedding plaintext");
            return Ok(plain);
        }
    };

    if !corrector.sanity_check(payload) {
        if options.get_ecc_sanity_is_fatal() {
            return Err(StegoErrors::EccSanityFailed);
        }
        warn!("payload failed the corrector's sanity check, carrying on");
    }

    let encoded = if options.get_embed_length() {
        corrector.encode(payload)
    } else {
        corrector.encode_nolength(payload)
    };

    match encoded {
        Some(codeword) => {
            trace!(
                "ecc enabled, {} bytes of payload encoded in {} bytes",
                payload.len(),
                codeword.len()
            );
            Ok(Outgoing {
                bytes:      Cow::Owned(codeword),
                ecc_active: true
            })
        }
        None => {
            warn!("ecc encode failed, embedding plaintext instead");
            Ok(plain)
        }
    }
}

/// Decode `collected` in place when the options ask for it.
///
/// The collected count is rounded up to the coder's block boundary and
/// zero filled to there, which is deterministic where the original
/// C implementation read whatever trailed the caller's buffer. On
/// decode failure the raw coefficient bytes are kept as they were.
pub(crate) fn decode_incoming(
    options: &EmbedOptions, corrector: Option<&dyn ErrorCorrector>, collected: &mut Vec<u8>
) {
    if options.get_ecc_method() != EccMethod::Rs {
        return;
    }
    let corrector = match corrector {
        Some(corrector) => corrector,
        None => {
            warn!("rs error correction requested but no corrector is attached, keeping raw bytes");
            return;
        }
    };

    let raw_count = collected.len();
    let padded = corrector.block_length(raw_count);
    collected.resize(padded, 0);
    trace!("rounded {raw_count} extracted bytes up to {padded} for decoding");

    let decoded = if options.get_embed_length() {
        corrector.decode(collected)
    } else {
        corrector.decode_nolength(collected, options.get_shared_length())
    };

    match decoded {
        Some(plain) => {
            trace!(
                "ecc enabled, {} codeword bytes decoded into {} bytes of payload",
                padded,
                plain.len()
            );
            *collected = plain;
        }
        None => {
            warn!("ecc decode failed, returning raw coefficient bytes");
            collected.truncate(raw_count);
        }
    }
}
