/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Coefficient-domain steganography for JPEG images
//!
//! This crate hides an arbitrary byte payload inside the quantized DCT
//! coefficients of a JPEG image, one byte per usable 8x8 luminance
//! block, and extracts it losslessly later. Because the payload lives in
//! the coefficients themselves it survives re-encoding at the same
//! quality.
//!
//! The engine does not parse JPEG streams. It drives any codec that
//! exposes its coefficient storage through the
//! [`CoefficientBuffer`](veil_core::coeffs::CoefficientBuffer) facade;
//! [`MemoryBlocks`](veil_core::coeffs::MemoryBlocks) covers the common
//! case of a coefficient dump decoded elsewhere.
//!
//! # How a byte travels
//! - Four AC frequencies with enough quantization headroom are picked
//!   from the quant table, most heavily quantized first.
//! - Blocks whose DC value sits near black or white are skipped; both
//!   sides skip the same blocks.
//! - Each usable block carries one byte, two bits per coefficient.
//! - Optionally, the first four usable blocks carry a little-endian
//!   length prefix, and the payload can be routed through a
//!   Reed-Solomon coder supplied via the [`ErrorCorrector`] trait.
//!
//! # Usage
//! ```
//! use veil_core::coeffs::{ComponentInfo, MemoryBlocks};
//! use veil_core::options::EmbedOptions;
//! use veil_core::quant::QuantTable;
//! use veil_jpeg::StegoPlan;
//!
//! let quant = QuantTable::new([16; 64]).unwrap();
//! let info = ComponentInfo {
//!     height_in_blocks: 4,
//!     width_in_blocks:  8,
//!     v_samp_factor:    1
//! };
//! let blocks = vec![[0_i16; 64]; 32];
//! let mut image = MemoryBlocks::single_component(info, quant, blocks).unwrap();
//!
//! let options = EmbedOptions::new();
//! let plan = StegoPlan::for_embedding(&image, options).unwrap();
//! let written = plan.embed(&mut image, b"hello").unwrap();
//! assert_eq!(written, 5);
//!
//! let plan = StegoPlan::for_extraction(&image, options).unwrap();
//! let recovered = plan.extract(&image).unwrap();
//! assert_eq!(recovered, b"hello");
//! ```
//!
//! # Wire format
//! Two parties with identical options, quantization tables and error
//! corrector recover identical bytes. Nothing in the image announces
//! that a payload is present; mismatched configuration yields garbage,
//! not an error.
//!
//! # Features
//! - `std`: on by default, enables `std` facilities in `veil-core`.
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(clippy::correctness, clippy::perf, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
extern crate alloc;

pub use veil_core;

pub use crate::ecc::ErrorCorrector;
pub use crate::errors::StegoErrors;
pub use crate::plan::StegoPlan;
pub use crate::survey::EnergyRange;

pub mod ecc;
mod embed;
pub mod errors;
mod extract;
mod freqs;
mod mcu;
mod packer;
mod plan;
mod shuffle;
mod survey;
