/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors surfaced while planning or driving an embed or extract walk.
//!
//! Running out of image is not here: a truncated embed returns the
//! partial byte count and a clamped length prefix returns the capped
//! bytes, both with a warning, because the caller decides whether a
//! short message is a failure.

use core::fmt::{Debug, Display, Formatter};

/// Steganography errors.
pub enum StegoErrors {
    /// Fewer than four AC frequencies carry enough quanta at this
    /// quality; the byte-per-block code cannot run. Holds the number of
    /// frequencies that did qualify.
    InsufficientFrequencies(usize),
    /// The coefficient facade has no such component.
    NoSuchComponent(usize),
    /// The coefficient facade exposes no quantization table for the
    /// component.
    MissingQuantTable(usize),
    /// The payload failed the error corrector's pre-encode sanity check
    /// and the options escalate that to a hard error.
    EccSanityFailed,
    /// A generic error.
    Generic(&'static str)
}

impl Debug for StegoErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            StegoErrors::InsufficientFrequencies(found) => {
                writeln!(
                    f,
                    "Not enough usable frequencies at this quality factor, needed 4 but found {found}"
                )
            }
            StegoErrors::NoSuchComponent(component) => {
                writeln!(f, "No such component {component}")
            }
            StegoErrors::MissingQuantTable(component) => {
                writeln!(f, "No quantization table for component {component}")
            }
            StegoErrors::EccSanityFailed => {
                writeln!(f, "Payload failed the error corrector's sanity check")
            }
            StegoErrors::Generic(message) => {
                writeln!(f, "{message}")
            }
        }
    }
}

impl From<&'static str> for StegoErrors {
    fn from(value: &'static str) -> Self {
        StegoErrors::Generic(value)
    }
}

impl Display for StegoErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StegoErrors {}
