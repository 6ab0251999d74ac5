/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Capacity and energy surveys
//!
//! Read-only walks over the same blocks the drivers visit. Capacity
//! bounds how many payload bytes an image can take before ECC overhead;
//! the energy survey is a diagnostic for judging how loud the image is
//! outside the embedding frequencies.

use log::{info, trace};
use veil_core::coeffs::CoefficientBuffer;

use crate::errors::StegoErrors;
use crate::mcu;
use crate::plan::StegoPlan;

/// Range of per-block peak AC energies seen across an image.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EnergyRange {
    pub min: i32,
    pub max: i32
}

impl StegoPlan {
    /// Count the blocks that may carry a byte.
    ///
    /// An upper bound on the payload size in bytes, before the length
    /// prefix and any ECC expansion are paid for. No side effects.
    pub fn capacity<T>(&self, image: &T) -> Result<usize, StegoErrors>
    where
        T: CoefficientBuffer + ?Sized
    {
        let component = self.options.get_component();
        let info = image
            .component_info(component)
            .ok_or(StegoErrors::NoSuchComponent(component))?;
        let band_rows = info.v_samp_factor.max(1);
        let dc_quant = self.quant.dc();

        let mut capacity = 0;
        let mut blk_y = 0;

        while blk_y < info.height_in_blocks {
            let band = image.rows(component, blk_y, band_rows);

            capacity += band
                .iter()
                .filter(|block| mcu::is_usable(block, dc_quant))
                .count();

            blk_y += band_rows;
        }

        Ok(capacity)
    }

    /// Survey per-block peak AC energy outside the embedding
    /// frequencies, logging each block at trace level.
    ///
    /// Returns `None` for an image with no blocks.
    pub fn log_energies<T>(&self, image: &T) -> Result<Option<EnergyRange>, StegoErrors>
    where
        T: CoefficientBuffer + ?Sized
    {
        let component = self.options.get_component();
        let info = image
            .component_info(component)
            .ok_or(StegoErrors::NoSuchComponent(component))?;
        let band_rows = info.v_samp_factor.max(1);

        let mut range: Option<EnergyRange> = None;
        let mut blk_y = 0;

        while blk_y < info.height_in_blocks {
            let band = image.rows(component, blk_y, band_rows);

            for block in band {
                let energy = mcu::peak_ac_energy(block, &self.quant, self.freqs.in_use());

                trace!("block energy {energy}");
                range = Some(match range {
                    Some(range) => EnergyRange {
                        min: range.min.min(energy),
                        max: range.max.max(energy)
                    },
                    None => EnergyRange {
                        min: energy,
                        max: energy
                    }
                });
            }

            blk_y += band_rows;
        }

        if let Some(range) = range {
            info!("peak ac energy range: {} to {}", range.min, range.max);
        }

        Ok(range)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use veil_core::coeffs::{ComponentInfo, MemoryBlocks};
    use veil_core::options::EmbedOptions;
    use veil_core::quant::{QuantTable, BLOCK_SIZE};

    use super::*;

    fn image_with_dc(dc_values: &[i16]) -> MemoryBlocks {
        let info = ComponentInfo {
            height_in_blocks: 1,
            width_in_blocks:  dc_values.len(),
            v_samp_factor:    1
        };
        let quant = QuantTable::new([16; BLOCK_SIZE]).unwrap();
        let blocks = dc_values
            .iter()
            .map(|dc| {
                let mut block = [0_i16; BLOCK_SIZE];
                block[0] = *dc;
                block
            })
            .collect();

        MemoryBlocks::single_component(info, quant, blocks).unwrap()
    }

    #[test]
    fn capacity_counts_only_usable_blocks() {
        // dc values 128, -72, 128, 240, 128
        let image = image_with_dc(&[0, -100, 0, 56, 0]);
        let plan = StegoPlan::for_embedding(&image, EmbedOptions::new()).unwrap();

        assert_eq!(plan.capacity(&image).unwrap(), 3);
    }

    #[test]
    fn capacity_does_not_mutate() {
        let image = image_with_dc(&[0, -100, 0]);
        let plan = StegoPlan::for_embedding(&image, EmbedOptions::new()).unwrap();

        let before: Vec<_> = image.rows(0, 0, 1).to_vec();
        plan.capacity(&image).unwrap();

        assert_eq!(image.rows(0, 0, 1), &before[..]);
    }

    #[test]
    fn energy_range_tracks_extremes() {
        let mut image = image_with_dc(&[0, 0]);
        {
            let blocks = image.rows_mut(0, 0, 1);
            blocks[0][10] = 3;
            blocks[1][20] = -5;
            // embedding frequencies never count
            blocks[0][63] = 100;
        }
        let plan = StegoPlan::for_embedding(&image, EmbedOptions::new()).unwrap();

        let range = plan.log_energies(&image).unwrap().unwrap();
        assert_eq!(
            range,
            EnergyRange {
                min: 3 * 16,
                max: 5 * 16
            }
        );
    }

    #[test]
    fn empty_component_has_no_energies() {
        let image = image_with_dc(&[]);
        let plan = StegoPlan::for_embedding(&image, EmbedOptions::new()).unwrap();

        assert_eq!(plan.capacity(&image).unwrap(), 0);
        assert!(plan.log_energies(&image).unwrap().is_none());
    }
}
