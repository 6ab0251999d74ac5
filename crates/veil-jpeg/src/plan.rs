/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! One-time planning for embed and extract walks
//!
//! All configuration resolution happens here, once per image: the
//! frequency set is selected from the right quantization table, the DC
//! quantizer for the block predicate is captured, and the error
//! corrector is attached. The drivers then walk the image against an
//! immutable plan, so embed, extract, capacity and the energy survey
//! cannot disagree about the code in use.

use alloc::boxed::Box;

use log::{debug, error, trace};
use veil_core::coeffs::CoefficientBuffer;
use veil_core::options::EmbedOptions;
use veil_core::quant::QuantTable;

use crate::ecc::ErrorCorrector;
use crate::errors::StegoErrors;
use crate::freqs::{select_frequencies, FrequencySpec, FREQS_PER_BYTE, MAX_FREQS};

/// An immutable embedding plan for one image.
///
/// Build one with [`for_embedding`](StegoPlan::for_embedding) or
/// [`for_extraction`](StegoPlan::for_extraction); construction fails
/// when the quantization table cannot support the byte-per-block code.
/// A plan must not be shared across images, the frequency set and DC
/// quantizer are the image's own.
pub struct StegoPlan {
    pub(crate) freqs:   FrequencySpec,
    /// Source quantization table of the embedding component; the block
    /// predicate and the energy survey both dequantize against it.
    pub(crate) quant:   QuantTable,
    pub(crate) options: EmbedOptions,
    pub(crate) ecc:     Option<Box<dyn ErrorCorrector>>
}

impl StegoPlan {
    /// Plan an embed walk over `image`.
    ///
    /// Frequency selection prefers the table the image will be
    /// re-encoded with, when the facade announces one, and falls back
    /// to the source table; the block predicate always uses the source
    /// table.
    pub fn for_embedding<T>(image: &T, options: EmbedOptions) -> Result<StegoPlan, StegoErrors>
    where
        T: CoefficientBuffer + ?Sized
    {
        let component = options.get_component();
        let source = image
            .quant_table(component)
            .ok_or(StegoErrors::MissingQuantTable(component))?;
        let selection = image.output_quant_table(component).unwrap_or(source);

        StegoPlan::from_tables(source, selection, options)
    }

    /// Plan an extract walk over `image`. Selection runs on the source
    /// table, which is what the embedder's output table became once the
    /// image was re-encoded.
    pub fn for_extraction<T>(image: &T, options: EmbedOptions) -> Result<StegoPlan, StegoErrors>
    where
        T: CoefficientBuffer + ?Sized
    {
        let component = options.get_component();
        let source = image
            .quant_table(component)
            .ok_or(StegoErrors::MissingQuantTable(component))?;

        StegoPlan::from_tables(source, source, options)
    }

    fn from_tables(
        source: &QuantTable, selection: &QuantTable, options: EmbedOptions
    ) -> Result<StegoPlan, StegoErrors> {
        let mut candidates = [0_usize; MAX_FREQS];
        let nfreqs = select_frequencies(
            selection,
            &mut candidates[..FREQS_PER_BYTE],
            options.get_nlevels()
        );

        if nfreqs < FREQS_PER_BYTE {
            error!("not enough usable frequencies at this quality factor, found {nfreqs}");
            return Err(StegoErrors::InsufficientFrequencies(nfreqs));
        }

        debug!("selected frequencies: {:?}", &candidates[..nfreqs]);
        trace!("selection quant table:\n{selection}");

        Ok(StegoPlan {
            freqs: FrequencySpec {
                candidates,
                nfreqs,
                seed: options.get_freq_seed()
            },
            quant: *source,
            options,
            ecc: None
        })
    }

    /// Attach the error corrector the payload is routed through when
    /// the options select [`EccMethod::Rs`](veil_core::options::EccMethod).
    #[must_use]
    pub fn with_error_corrector(mut self, corrector: Box<dyn ErrorCorrector>) -> StegoPlan {
        self.ecc = Some(corrector);
        self
    }

    /// The AC indices the plan packs bits into, in unpermuted order.
    #[must_use]
    pub fn frequencies(&self) -> &[usize] {
        self.freqs.in_use()
    }

    /// The options the plan was built with.
    #[must_use]
    pub const fn options(&self) -> &EmbedOptions {
        &self.options
    }

    pub(crate) fn ecc_ref(&self) -> Option<&dyn ErrorCorrector> {
        self.ecc.as_deref()
    }
}
