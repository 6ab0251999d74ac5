/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Embedding and extraction options
//!
//! One options value configures both sides of the channel. The two
//! parties must agree on every field here, plus the quantization tables
//! and the error corrector, to recover the same bytes; the wire format
//! does not self-identify.

/// Error correction applied to the payload before embedding.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EccMethod {
    /// Payload bytes are embedded as they are.
    None,
    /// Payload goes through a Reed-Solomon coder first.
    Rs
}

/// Options shared by the embed and extract drivers.
///
/// Diagnostic verbosity is not an option here; per-block diagnostics go
/// out at `trace` level and configuration echoes at `debug`, so the log
/// framework's filter is the verbosity knob.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmbedOptions {
    /// Minimum number of distinguishable quanta an AC frequency must
    /// support to become an embedding candidate.
    ///
    /// - Default value: 4
    nlevels:             usize,
    /// Whether a 4-byte little-endian length prefix is embedded ahead of
    /// the payload. When false the payload length is a shared secret
    /// carried in [`shared_length`](EmbedOptions::set_shared_length).
    ///
    /// - Default value: true
    embed_length:        bool,
    /// Error correction applied to the payload.
    ///
    /// - Default value: [`EccMethod::None`]
    ecc_method:          EccMethod,
    /// Seed for the per-block frequency permutation; 0 disables the
    /// permutation entirely.
    ///
    /// - Default value: 0
    freq_seed:           u32,
    /// Upper bound on the recovered payload length. A forged or
    /// corrupted length prefix is clamped to this, so a hostile image
    /// cannot make the extractor allocate without bound.
    ///
    /// - Default value: `1 << 20`
    max_message_len:     usize,
    /// Plaintext length both parties agreed on out of band, read only
    /// when `embed_length` is false.
    ///
    /// - Default value: 0
    shared_length:       usize,
    /// Whether a failed pre-encode ECC sanity check aborts the embed
    /// call instead of logging and carrying on.
    ///
    /// - Default value: false
    ecc_sanity_is_fatal: bool,
    /// Index of the component carrying the payload. Component 0 is
    /// luminance in any sane image and the only component the engine
    /// writes to; chroma planes are too fragile to carry bits.
    ///
    /// - Default value: 0
    component:           usize
}

impl Default for EmbedOptions {
    fn default() -> Self {
        EmbedOptions {
            nlevels:             4,
            embed_length:        true,
            ecc_method:          EccMethod::None,
            freq_seed:           0,
            max_message_len:     1 << 20,
            shared_length:       0,
            ecc_sanity_is_fatal: false,
            component:           0
        }
    }
}

impl EmbedOptions {
    /// Create options with their defaults.
    #[must_use]
    pub fn new() -> EmbedOptions {
        EmbedOptions::default()
    }

    /// Get the minimum quanta a candidate frequency must support.
    #[must_use]
    pub const fn get_nlevels(&self) -> usize {
        self.nlevels
    }

    /// Get whether a length prefix is embedded.
    #[must_use]
    pub const fn get_embed_length(&self) -> bool {
        self.embed_length
    }

    /// Get the configured error correction method.
    #[must_use]
    pub const fn get_ecc_method(&self) -> EccMethod {
        self.ecc_method
    }

    /// Get the frequency permutation seed.
    #[must_use]
    pub const fn get_freq_seed(&self) -> u32 {
        self.freq_seed
    }

    /// Get the recovered-length cap.
    #[must_use]
    pub const fn get_max_message_len(&self) -> usize {
        self.max_message_len
    }

    /// Get the shared-secret plaintext length.
    #[must_use]
    pub const fn get_shared_length(&self) -> usize {
        self.shared_length
    }

    /// Get whether an ECC sanity failure is fatal.
    #[must_use]
    pub const fn get_ecc_sanity_is_fatal(&self) -> bool {
        self.ecc_sanity_is_fatal
    }

    /// Get the component the payload rides in.
    #[must_use]
    pub const fn get_component(&self) -> usize {
        self.component
    }

    /// Set the minimum quanta a candidate frequency must support.
    #[must_use]
    pub fn set_nlevels(mut self, nlevels: usize) -> Self {
        self.nlevels = nlevels;
        self
    }

    /// Set whether a 4-byte little-endian length prefix is embedded
    /// ahead of the payload.
    #[must_use]
    pub fn set_embed_length(mut self, yes: bool) -> Self {
        self.embed_length = yes;
        self
    }

    /// Set the error correction method.
    #[must_use]
    pub fn set_ecc_method(mut self, method: EccMethod) -> Self {
        self.ecc_method = method;
        self
    }

    /// Set the frequency permutation seed, 0 disabling permutation.
    #[must_use]
    pub fn set_freq_seed(mut self, seed: u32) -> Self {
        self.freq_seed = seed;
        self
    }

    /// Set the upper bound on the recovered payload length.
    #[must_use]
    pub fn set_max_message_len(mut self, len: usize) -> Self {
        self.max_message_len = len;
        self
    }

    /// Set the out-of-band plaintext length used when no length prefix
    /// is embedded.
    #[must_use]
    pub fn set_shared_length(mut self, len: usize) -> Self {
        self.shared_length = len;
        self
    }

    /// Set whether a failed ECC sanity check aborts the embed call.
    #[must_use]
    pub fn set_ecc_sanity_is_fatal(mut self, yes: bool) -> Self {
        self.ecc_sanity_is_fatal = yes;
        self
    }

    /// Set the component the payload rides in.
    #[must_use]
    pub fn set_component(mut self, component: usize) -> Self {
        self.component = component;
        self
    }
}
