/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use veil_core::coeffs::CoefficientBuffer;
use veil_core::options::EmbedOptions;
use veil_jpeg::{StegoErrors, StegoPlan};

mod common;

use common::{flat_image, image_with_dcs, write_byte};

#[test]
fn oversized_payload_embeds_partially() {
    // 8 rows of 25 usable blocks, one row of unusable ones
    let mut dcs = vec![0_i16; 200];
    dcs.extend_from_slice(&[-100; 25]);
    let mut image = image_with_dcs(&dcs, 25, 1);

    let options = EmbedOptions::new();
    let plan = StegoPlan::for_embedding(&image, options).unwrap();
    assert_eq!(plan.capacity(&image).unwrap(), 200);

    let payload = vec![0x5A_u8; 10_000];
    let written = plan.embed(&mut image, &payload).unwrap();

    // four blocks go to the prefix, the rest carry payload
    assert_eq!(written, 196);
    assert!(written <= 200);

    // the unusable row was never touched
    for block in image.rows(0, 8, 1) {
        assert_eq!(&block[1..], &[0_i16; 63][..]);
    }
}

#[test]
fn extraction_never_exceeds_capacity() {
    let mut image = flat_image(8, 8);
    let options = EmbedOptions::new();

    let plan = StegoPlan::for_embedding(&image, options).unwrap();
    let capacity = plan.capacity(&image).unwrap();
    plan.embed(&mut image, &vec![7_u8; 1000]).unwrap();

    let plan = StegoPlan::for_extraction(&image, options).unwrap();
    let recovered = plan.extract(&image).unwrap();

    assert!(recovered.len() <= capacity);
}

#[test]
fn forged_length_prefix_is_clamped() {
    let mut image = flat_image(8, 8);

    // forge a stream announcing 4 GiB by hand
    {
        let blocks = image.rows_mut(0, 0, 8);
        for (block, prefix_byte) in blocks.iter_mut().zip(u32::MAX.to_le_bytes()) {
            write_byte(block, prefix_byte);
        }
        for block in blocks.iter_mut().skip(4) {
            write_byte(block, b'x');
        }
    }

    let options = EmbedOptions::new().set_max_message_len(16);
    let plan = StegoPlan::for_extraction(&image, options).unwrap();
    let recovered = plan.extract(&image).unwrap();

    assert_eq!(recovered, vec![b'x'; 16]);
}

#[test]
fn truncated_image_yields_partial_extraction() {
    let mut image = flat_image(2, 4);

    let options = EmbedOptions::new();
    let plan = StegoPlan::for_embedding(&image, options).unwrap();
    // prefix claims 10 bytes but only 4 blocks remain after it
    assert_eq!(plan.embed(&mut image, &[9_u8; 10]).unwrap(), 4);

    let plan = StegoPlan::for_extraction(&image, options).unwrap();
    assert_eq!(plan.extract(&image).unwrap(), vec![9_u8; 4]);
}

#[test]
fn empty_payload_embeds_nothing() {
    let mut image = flat_image(2, 4);
    let options = EmbedOptions::new();

    let plan = StegoPlan::for_embedding(&image, options).unwrap();
    assert_eq!(plan.embed(&mut image, b"").unwrap(), 0);

    // not even the prefix went out, every coefficient is untouched
    for block in image.rows(0, 0, 2) {
        assert_eq!(block, &[0_i16; 64]);
    }
}

#[test]
fn unusable_images_have_zero_capacity() {
    // every block pinned to black
    let image = image_with_dcs(&[-100; 12], 4, 1);
    let options = EmbedOptions::new();

    let plan = StegoPlan::for_embedding(&image, options).unwrap();
    assert_eq!(plan.capacity(&image).unwrap(), 0);

    let plan = StegoPlan::for_extraction(&image, options).unwrap();
    assert_eq!(plan.extract(&image).unwrap(), b"");
}

#[test]
fn absent_component_is_an_error() {
    let image = flat_image(2, 2);
    let options = EmbedOptions::new().set_component(1);

    assert!(matches!(
        StegoPlan::for_embedding(&image, options),
        Err(StegoErrors::MissingQuantTable(1))
    ));
}
