/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Coefficient views over a decoded JPEG
//!
//! The embedding engine never parses a JPEG stream itself. It walks the
//! quantized DCT coefficients of one component through the
//! [`CoefficientBuffer`] facade, which any codec that exposes its
//! coefficient storage can implement. [`MemoryBlocks`] is the in-memory
//! implementation used when the coefficients were decoded elsewhere, and
//! by the test suite.

use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

use crate::quant::{QuantTable, BLOCK_SIZE};

/// One 8x8 block of quantized DCT coefficients in zig-zag order.
///
/// Entry 0 is the DC coefficient; mutating entries in place is the only
/// way the engine influences the re-encoded image.
pub type CoefBlock = [i16; BLOCK_SIZE];

/// Geometry of one image component in block units.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ComponentInfo {
    /// Component height in 8x8 blocks.
    pub height_in_blocks: usize,
    /// Component width in 8x8 blocks.
    pub width_in_blocks:  usize,
    /// Rows of blocks fetched per access, the component's vertical
    /// sampling factor.
    pub v_samp_factor:    usize
}

/// Facade over a JPEG codec's quantized coefficient storage.
///
/// Components are indexed from zero, component 0 being luminance in any
/// sane image. Row bands mirror how libjpeg-style codecs page virtual
/// coefficient arrays: a band starts at `row_start` block rows and spans
/// `nrows` of them, returned row-major with `width_in_blocks` blocks per
/// row.
///
/// Implementations clamp out-of-range bands to what the component
/// actually holds (an empty slice when `row_start` is past the end)
/// rather than panicking, since the walk bounds come from
/// [`component_info`](CoefficientBuffer::component_info).
pub trait CoefficientBuffer {
    /// Quantization table the source image was encoded with.
    fn quant_table(&self, component: usize) -> Option<&QuantTable>;

    /// Quantization table the image will be re-encoded with, when it
    /// differs from the source.
    ///
    /// Returns `None` unless the caller explicitly configured an output
    /// quality; the engine then falls back to the source table.
    fn output_quant_table(&self, _component: usize) -> Option<&QuantTable> {
        None
    }

    /// Geometry of `component`, `None` when the component does not
    /// exist.
    fn component_info(&self, component: usize) -> Option<ComponentInfo>;

    /// Borrow a band of block rows read-only.
    fn rows(&self, component: usize, row_start: usize, nrows: usize) -> &[CoefBlock];

    /// Borrow a band of block rows for in-place mutation.
    fn rows_mut(&mut self, component: usize, row_start: usize, nrows: usize)
        -> &mut [CoefBlock];
}

/// Errors building or reconfiguring an in-memory coefficient buffer.
pub enum BufferErrors {
    /// Block count does not match the declared component geometry.
    GeometryMismatch(usize, usize),
    /// The component does not exist.
    NoSuchComponent(usize)
}

impl Debug for BufferErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            BufferErrors::GeometryMismatch(expected, found) => {
                writeln!(
                    f,
                    "Geometry mismatch, component declares {expected} blocks but {found} were supplied"
                )
            }
            BufferErrors::NoSuchComponent(component) => {
                writeln!(f, "No such component {component}")
            }
        }
    }
}

#[derive(Clone)]
struct Plane {
    info:         ComponentInfo,
    quant:        QuantTable,
    output_quant: Option<QuantTable>,
    blocks:       Vec<CoefBlock>
}

/// In-memory coefficient storage implementing [`CoefficientBuffer`].
///
/// Each component owns its blocks in raster order. This is the
/// counterpart of handing the engine a decoded coefficient dump instead
/// of a live codec.
#[derive(Clone, Default)]
pub struct MemoryBlocks {
    planes: Vec<Plane>
}

impl MemoryBlocks {
    /// Create an empty buffer with no components.
    #[must_use]
    pub fn new() -> MemoryBlocks {
        MemoryBlocks { planes: Vec::new() }
    }

    /// Create a buffer holding a single component, usually luminance.
    pub fn single_component(
        info: ComponentInfo, quant: QuantTable, blocks: Vec<CoefBlock>
    ) -> Result<MemoryBlocks, BufferErrors> {
        let mut buffer = MemoryBlocks::new();
        buffer.push_component(info, quant, blocks)?;

        Ok(buffer)
    }

    /// Append a component, returning its index.
    ///
    /// `blocks` are raster order, `height_in_blocks * width_in_blocks`
    /// of them.
    pub fn push_component(
        &mut self, info: ComponentInfo, quant: QuantTable, blocks: Vec<CoefBlock>
    ) -> Result<usize, BufferErrors> {
        let expected = info.height_in_blocks * info.width_in_blocks;

        if blocks.len() != expected {
            return Err(BufferErrors::GeometryMismatch(expected, blocks.len()));
        }
        self.planes.push(Plane {
            info,
            quant,
            output_quant: None,
            blocks
        });

        Ok(self.planes.len() - 1)
    }

    /// Declare the table `component` will be re-encoded with.
    pub fn set_output_quant_table(
        &mut self, component: usize, table: QuantTable
    ) -> Result<(), BufferErrors> {
        match self.planes.get_mut(component) {
            Some(plane) => {
                plane.output_quant = Some(table);
                Ok(())
            }
            None => Err(BufferErrors::NoSuchComponent(component))
        }
    }

    fn band_bounds(plane: &Plane, row_start: usize, nrows: usize) -> (usize, usize) {
        let width = plane.info.width_in_blocks;
        let height = plane.info.height_in_blocks;
        let start = row_start.min(height) * width;
        let end = row_start.saturating_add(nrows).min(height) * width;

        (start, end)
    }
}

impl CoefficientBuffer for MemoryBlocks {
    fn quant_table(&self, component: usize) -> Option<&QuantTable> {
        self.planes.get(component).map(|plane| &plane.quant)
    }

    fn output_quant_table(&self, component: usize) -> Option<&QuantTable> {
        self.planes
            .get(component)
            .and_then(|plane| plane.output_quant.as_ref())
    }

    fn component_info(&self, component: usize) -> Option<ComponentInfo> {
        self.planes.get(component).map(|plane| plane.info)
    }

    fn rows(&self, component: usize, row_start: usize, nrows: usize) -> &[CoefBlock] {
        match self.planes.get(component) {
            Some(plane) => {
                let (start, end) = MemoryBlocks::band_bounds(plane, row_start, nrows);
                &plane.blocks[start..end]
            }
            None => &[]
        }
    }

    fn rows_mut(&mut self, component: usize, row_start: usize, nrows: usize)
        -> &mut [CoefBlock] {
        match self.planes.get_mut(component) {
            Some(plane) => {
                let (start, end) = MemoryBlocks::band_bounds(plane, row_start, nrows);
                &mut plane.blocks[start..end]
            }
            None => &mut []
        }
    }
}
