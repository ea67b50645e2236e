// Copyright (c) the dct2 Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Blockwise DCT with high-frequency truncation.
//!
//! A matrix is cropped to a whole number of `F x F` blocks, every block is
//! transformed with the 2D DCT, and only the coefficients on the first `d`
//! anti-diagonals (`u + v < d`) are kept, in row-major order. Kept
//! coefficients can be narrowed to `i8` with [`EncodedBlocks::quantize`], and
//! multi-channel images are encoded plane by plane with [`encode_planes`].

use tracing::{debug, instrument};

use crate::context::CoefficientMode;
use crate::dct2d::{matrix_shape, Transform2d};
use crate::error::{Error, Result};
use crate::options::TransformOptions;
use crate::util::{try_zeroed_matrix, TryWithCapacity};

/// `n * (n + 1) / 2` without overflowing for any `n <= block_size`.
fn triangle(n: usize) -> usize {
    if n % 2 == 0 {
        n / 2 * (n + 1)
    } else {
        n * n.div_ceil(2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockParams {
    block_size: usize,
    cutoff: usize,
}

impl BlockParams {
    /// `block_size` must be positive with `block_size^2` representable, and
    /// `cutoff`, the first anti-diagonal to drop, at most `2 * block_size - 1`.
    pub fn new(block_size: usize, cutoff: usize) -> Result<Self> {
        let max_cutoff = block_size
            .checked_mul(block_size)
            .and_then(|_| block_size.checked_mul(2))
            .and_then(|twice| twice.checked_sub(1));
        match max_cutoff {
            Some(max_cutoff) if cutoff <= max_cutoff => Ok(Self { block_size, cutoff }),
            _ => Err(Error::InvalidBlockParams { block_size, cutoff }),
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn cutoff(&self) -> usize {
        self.cutoff
    }

    /// Whether coefficient `(u, v)` of a block survives truncation.
    #[inline]
    pub fn keeps(&self, u: usize, v: usize) -> bool {
        u + v < self.cutoff
    }

    /// Number of coefficients kept per block.
    pub fn compressed_len(&self) -> usize {
        let (f, d) = (self.block_size, self.cutoff);
        if d <= f {
            triangle(d)
        } else {
            // Everything except the dropped triangle in the bottom-right corner.
            f * f - triangle(2 * f - 1 - d)
        }
    }

    /// Fraction of coefficients discarded, ignoring storage width.
    pub fn savings_ratio(&self) -> f64 {
        let side = self.block_size as f64;
        1.0 - self.compressed_len() as f64 / (side * side)
    }

    /// Largest `(rows, cols)` not exceeding the input whose sides are
    /// multiples of the block size.
    pub fn cropped_shape(&self, rows: usize, cols: usize) -> (usize, usize) {
        (
            rows - rows % self.block_size,
            cols - cols % self.block_size,
        )
    }

    /// Expands the kept coefficients of one block back to a full block, with
    /// zeros in the truncated positions.
    pub fn decompress_block(&self, kept: &[f64]) -> Result<Vec<Vec<f64>>> {
        if kept.len() != self.compressed_len() {
            return Err(Error::BufferLengthMismatch {
                expected: self.compressed_len(),
                actual: kept.len(),
            });
        }
        let mut block = try_zeroed_matrix(self.block_size, self.block_size)?;
        let mut kept = kept.iter();
        for (u, row) in block.iter_mut().enumerate() {
            for (v, value) in row.iter_mut().enumerate() {
                if self.keeps(u, v) {
                    // Lengths were checked above.
                    if let Some(&coefficient) = kept.next() {
                        *value = coefficient;
                    }
                }
            }
        }
        Ok(block)
    }
}

/// Truncated block coefficients, blocks stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedBlocks {
    params: BlockParams,
    blocks_y: usize,
    blocks_x: usize,
    blocks: Vec<Vec<f64>>,
}

impl EncodedBlocks {
    pub fn params(&self) -> BlockParams {
        self.params
    }

    /// Number of blocks vertically and horizontally.
    pub fn grid(&self) -> (usize, usize) {
        (self.blocks_y, self.blocks_x)
    }

    pub fn block(&self, by: usize, bx: usize) -> &[f64] {
        &self.blocks[by * self.blocks_x + bx]
    }

    pub fn blocks(&self) -> impl Iterator<Item = &[f64]> {
        self.blocks.iter().map(Vec::as_slice)
    }

    /// Rounds every kept coefficient to `i8` (ties to even), clamping to
    /// `[-128, 127]` first. NaN becomes 0.
    pub fn quantize(&self) -> Result<QuantizedBlocks> {
        let mut blocks = Vec::try_with_capacity(self.blocks.len())?;
        for block in &self.blocks {
            let mut quantized = Vec::try_with_capacity(block.len())?;
            quantized.extend(block.iter().map(|&c| quantize_coefficient(c)));
            blocks.push(quantized);
        }
        Ok(QuantizedBlocks {
            params: self.params,
            blocks_y: self.blocks_y,
            blocks_x: self.blocks_x,
            blocks,
        })
    }
}

#[inline]
fn quantize_coefficient(c: f64) -> i8 {
    // Saturating float-to-int cast maps NaN to 0.
    c.clamp(-128.0, 127.0).round_ties_even() as i8
}

/// [`EncodedBlocks`] with coefficients stored as `i8`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedBlocks {
    params: BlockParams,
    blocks_y: usize,
    blocks_x: usize,
    blocks: Vec<Vec<i8>>,
}

impl QuantizedBlocks {
    pub fn params(&self) -> BlockParams {
        self.params
    }

    pub fn grid(&self) -> (usize, usize) {
        (self.blocks_y, self.blocks_x)
    }

    pub fn block(&self, by: usize, bx: usize) -> &[i8] {
        &self.blocks[by * self.blocks_x + bx]
    }

    pub fn blocks(&self) -> impl Iterator<Item = &[i8]> {
        self.blocks.iter().map(Vec::as_slice)
    }

    /// Widens the stored coefficients back to `f64`.
    pub fn dequantize(&self) -> Result<EncodedBlocks> {
        let mut blocks = Vec::try_with_capacity(self.blocks.len())?;
        for block in &self.blocks {
            let mut widened = Vec::try_with_capacity(block.len())?;
            widened.extend(block.iter().map(|&c| f64::from(c)));
            blocks.push(widened);
        }
        Ok(EncodedBlocks {
            params: self.params,
            blocks_y: self.blocks_y,
            blocks_x: self.blocks_x,
            blocks,
        })
    }
}

/// Crops `matrix` to whole blocks, transforms each block and keeps the
/// low-frequency coefficients.
#[instrument(level = "debug", skip_all, fields(block_size = params.block_size, cutoff = params.cutoff))]
pub fn encode_blocks<R: AsRef<[f64]>>(matrix: &[R], params: BlockParams) -> Result<EncodedBlocks> {
    let (rows, cols) = matrix_shape(matrix)?;
    for (row, values) in matrix.iter().enumerate() {
        let actual = values.as_ref().len();
        if actual != cols {
            return Err(Error::DimensionMismatch {
                row,
                expected: cols,
                actual,
            });
        }
    }
    let (cropped_rows, cropped_cols) = params.cropped_shape(rows, cols);
    let f = params.block_size;
    if cropped_rows == 0 || cropped_cols == 0 {
        return Err(Error::InvalidLength(rows.min(cols)));
    }

    let (blocks_y, blocks_x) = (cropped_rows / f, cropped_cols / f);
    debug!(blocks_y, blocks_x, kept = params.compressed_len(), "encoding blocks");

    // Every block has the same shape, so one plan with precomputed cosines
    // serves all of them.
    let options = TransformOptions::default()
        .with_coefficients(CoefficientMode::Table)
        .with_share_row_context(true);
    let mut plan = Transform2d::new(f, f, options)?;
    let mut block = try_zeroed_matrix(f, f)?;
    let mut blocks = Vec::try_with_capacity(blocks_y * blocks_x)?;

    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            for (dst, src) in block.iter_mut().zip(&matrix[by * f..(by + 1) * f]) {
                dst.copy_from_slice(&src.as_ref()[bx * f..(bx + 1) * f]);
            }
            let coefficients = plan.transform(&block)?;
            let mut kept = Vec::try_with_capacity(params.compressed_len())?;
            for (u, row) in coefficients.iter().enumerate() {
                kept.extend(
                    row.iter()
                        .enumerate()
                        .filter(|&(v, _)| params.keeps(u, v))
                        .map(|(_, &c)| c),
                );
            }
            blocks.push(kept);
        }
    }

    Ok(EncodedBlocks {
        params,
        blocks_y,
        blocks_x,
        blocks,
    })
}

/// Encodes every plane of a multi-channel image (for example R, G and B)
/// separately. All planes must share one shape.
#[instrument(level = "debug", skip_all, fields(planes = planes.len()))]
pub fn encode_planes<P, R>(planes: &[P], params: BlockParams) -> Result<Vec<EncodedBlocks>>
where
    P: AsRef<[R]>,
    R: AsRef<[f64]>,
{
    let Some(first) = planes.first() else {
        return Err(Error::NullInput("no planes to encode"));
    };
    let expected = matrix_shape(first.as_ref())?;
    let mut encoded = Vec::try_with_capacity(planes.len())?;
    for (plane, matrix) in planes.iter().enumerate() {
        let matrix = matrix.as_ref();
        let actual = (matrix.len(), matrix.first().map_or(0, |row| row.as_ref().len()));
        if actual != expected {
            return Err(Error::PlaneShapeMismatch {
                plane,
                expected,
                actual,
            });
        }
        encoded.push(encode_blocks(matrix, params)?);
    }
    Ok(encoded)
}
