/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![allow(dead_code)]

use veil_core::coeffs::{CoefBlock, ComponentInfo, MemoryBlocks};
use veil_core::quant::{QuantTable, BLOCK_SIZE};
use veil_jpeg::ErrorCorrector;

/// With an all-16 table the selector picks 63..=60 and a zeroed block
/// decodes to mid gray, so every block is usable.
pub fn flat_image(height_in_blocks: usize, width_in_blocks: usize) -> MemoryBlocks {
    let info = ComponentInfo {
        height_in_blocks,
        width_in_blocks,
        v_samp_factor: 1
    };
    let quant = QuantTable::new([16; BLOCK_SIZE]).unwrap();
    let blocks = vec![[0_i16; BLOCK_SIZE]; height_in_blocks * width_in_blocks];

    MemoryBlocks::single_component(info, quant, blocks).unwrap()
}

/// One block per DC coefficient given, `dcs.len() / width` rows deep.
pub fn image_with_dcs(dcs: &[i16], width_in_blocks: usize, v_samp_factor: usize) -> MemoryBlocks {
    assert_eq!(dcs.len() % width_in_blocks, 0);

    let info = ComponentInfo {
        height_in_blocks: dcs.len() / width_in_blocks,
        width_in_blocks,
        v_samp_factor
    };
    let quant = QuantTable::new([16; BLOCK_SIZE]).unwrap();
    let blocks = dcs
        .iter()
        .map(|dc| {
            let mut block = [0_i16; BLOCK_SIZE];
            block[0] = *dc;
            block
        })
        .collect();

    MemoryBlocks::single_component(info, quant, blocks).unwrap()
}

/// A plausible coefficient plane: random DC values, sparse random AC
/// noise, deterministic for a given seed.
pub fn noisy_image(height_in_blocks: usize, width_in_blocks: usize, seed: u64) -> MemoryBlocks {
    let info = ComponentInfo {
        height_in_blocks,
        width_in_blocks,
        v_samp_factor: 1
    };
    let quant = QuantTable::new([16; BLOCK_SIZE]).unwrap();

    let mut rng = fastrand::Rng::with_seed(seed);
    let blocks = (0..height_in_blocks * width_in_blocks)
        .map(|_| {
            let mut block = [0_i16; BLOCK_SIZE];
            block[0] = rng.i16(-120..120);

            for coef in &mut block[1..] {
                if rng.usize(0..10) > 6 {
                    *coef = rng.i16(-8..=8);
                }
            }
            block
        })
        .collect();

    MemoryBlocks::single_component(info, quant, blocks).unwrap()
}

/// Read the byte a block carries under the unpermuted all-16-table
/// code, frequencies 63..=60 least significant pair first.
pub fn read_byte(block: &CoefBlock) -> u8 {
    ((block[63] & 0x03)
        | ((block[62] & 0x03) << 2)
        | ((block[61] & 0x03) << 4)
        | ((block[60] & 0x03) << 6)) as u8
}

/// Write a byte the same way, for forging streams by hand.
pub fn write_byte(block: &mut CoefBlock, v: u8) {
    block[63] = i16::from(v & 0x03);
    block[62] = i16::from((v >> 2) & 0x03);
    block[61] = i16::from((v >> 4) & 0x03);
    block[60] = i16::from((v >> 6) & 0x03);
}

const REPEATS: usize = 3;

/// Stand-in for the Reed-Solomon coder: every framed byte is sent three
/// times and decoding takes a bitwise majority vote, so any single
/// corrupted copy per triple is repaired.
pub struct TripleRedundancy;

impl TripleRedundancy {
    fn spread(raw: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(raw.len() * REPEATS);

        for byte in raw {
            out.extend_from_slice(&[*byte; REPEATS]);
        }
        out
    }

    fn vote(codeword: &[u8]) -> Vec<u8> {
        codeword
            .chunks_exact(REPEATS)
            .map(|c| (c[0] & c[1]) | (c[0] & c[2]) | (c[1] & c[2]))
            .collect()
    }
}

impl ErrorCorrector for TripleRedundancy {
    fn encode(&self, raw: &[u8]) -> Option<Vec<u8>> {
        let len = u32::try_from(raw.len()).ok()?;
        let mut framed = Vec::with_capacity(raw.len() + 4);

        framed.extend_from_slice(&len.to_le_bytes());
        framed.extend_from_slice(raw);
        Some(TripleRedundancy::spread(&framed))
    }

    fn encode_nolength(&self, raw: &[u8]) -> Option<Vec<u8>> {
        Some(TripleRedundancy::spread(raw))
    }

    fn decode(&self, codeword: &[u8]) -> Option<Vec<u8>> {
        let framed = TripleRedundancy::vote(codeword);
        let header = framed.get(..4)?;
        let len = u32::from_le_bytes(header.try_into().unwrap()) as usize;
        let body = framed.get(4..4 + len)?;

        Some(body.to_vec())
    }

    fn decode_nolength(&self, codeword: &[u8], plain_len: usize) -> Option<Vec<u8>> {
        let mut raw = TripleRedundancy::vote(codeword);

        if raw.len() < plain_len {
            return None;
        }
        raw.truncate(plain_len);
        Some(raw)
    }

    fn block_length(&self, len: usize) -> usize {
        (len + REPEATS - 1) / REPEATS * REPEATS
    }

    fn message_length(&self, plain_len: usize, framed: bool) -> usize {
        (plain_len + if framed { 4 } else { 0 }) * REPEATS
    }
}
