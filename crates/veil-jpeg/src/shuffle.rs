/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Per-block frequency permutation
//!
//! With a non-zero seed, each usable block packs its byte into the
//! candidate frequencies in a shuffled order. Both sides must replay the
//! identical shuffle stream, so the generator and the exact shape of the
//! shuffle loop below are part of the wire format and must never change.
//!
//! The generator is seeded once per image walk and advances across
//! blocks; there is no per-block reseed.

/// The linear congruential generator both sides of the channel share.
///
/// State advances as `s = s * 1103515245 + 12345` over wrapping `u32`
/// arithmetic, initial state is the seed, and each draw yields
/// `s & 0x7fff_ffff`.
pub(crate) struct Lcg {
    state: u32
}

impl Lcg {
    pub(crate) const fn new(seed: u32) -> Lcg {
        Lcg { state: seed }
    }

    pub(crate) fn draw(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12345);
        self.state & 0x7fff_ffff
    }
}

/// Shuffle `candidates` into `working` by an inside-out walk.
///
/// Position 0 never draws; position `i > 0` draws `j = draw % i`. The
/// resulting order is biased, but it is the order the extractor
/// reproduces, which is all that matters here.
pub(crate) fn permute(candidates: &[usize], prng: &mut Lcg, working: &mut [usize]) {
    for (i, candidate) in candidates.iter().enumerate() {
        let j = if i > 0 { prng.draw() as usize % i } else { 0 };

        if j != i {
            working[i] = working[j];
        }
        working[j] = *candidate;
    }
}

/// Write the frequency order for the next block into `working`: the
/// candidate order verbatim when no generator is in play, a fresh
/// permutation otherwise.
pub(crate) fn fill_working(candidates: &[usize], prng: Option<&mut Lcg>, working: &mut [usize]) {
    match prng {
        Some(rng) => permute(candidates, rng, working),
        None => working[..candidates.len()].copy_from_slice(candidates)
    }
}
