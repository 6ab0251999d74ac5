/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core primitives shared by the `veil` steganography crates
//!
//! This crate provides the types the embedding engine and any codec
//! adapter agree on:
//!
//! - [`quant::QuantTable`], a JPEG quantization table in zig-zag order
//! - [`coeffs::CoefficientBuffer`], the facade a JPEG codec implements to
//!   expose its quantized DCT coefficient storage, together with
//!   [`coeffs::MemoryBlocks`], an in-memory implementation for callers
//!   that decode coefficients elsewhere (and for tests)
//! - [`options::EmbedOptions`], the configuration surface shared by the
//!   embed and extract drivers
//!
//! The crate is `#[no_std]` with `alloc`, which is needed for the
//! in-memory coefficient storage.
//!
//! # Features
//! - `std`: Enables `std` facilities.
//! - `serde`: Enables serializing of the option types present in the
//!   crate
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub mod coeffs;
pub mod options;
pub mod quant;
