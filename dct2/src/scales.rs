// Copyright (c) the dct2 Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::f64::consts::{PI, SQRT_2};

use crate::error::{Error, Result};
use crate::util::try_zeroed;

/// Scalars that depend only on the transform length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformScalars {
    len: usize,
    sqrt_n: f64,
    sqrt_two: f64,
    angle_step: f64,
}

impl TransformScalars {
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(Error::InvalidLength(len));
        }
        Ok(Self {
            len,
            sqrt_n: (len as f64).sqrt(),
            sqrt_two: SQRT_2,
            angle_step: PI / (2.0 * len as f64),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: zero-length scalars cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn sqrt_n(&self) -> f64 {
        self.sqrt_n
    }

    #[inline]
    pub fn sqrt_two(&self) -> f64 {
        self.sqrt_two
    }

    /// `π / (2N)`, multiplied by `k * (2i + 1)` to get the basis angle.
    #[inline]
    pub fn angle_step(&self) -> f64 {
        self.angle_step
    }
}

/// Precomputed basis `cos(angle_step * k * (2i + 1))`, one row per frequency `k`.
///
/// The values are computed with exactly the same expression as the on-the-fly
/// path, so both produce bit-identical coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct CosineTable {
    len: usize,
    table: Vec<f64>,
}

impl CosineTable {
    pub fn new(scalars: &TransformScalars) -> Result<Self> {
        let len = scalars.len();
        let area = len
            .checked_mul(len)
            .ok_or(Error::InvalidLength(len))?;
        let mut table = try_zeroed(area)?;
        for (k, row) in table.chunks_exact_mut(len).enumerate() {
            let coeff_k = scalars.angle_step() * k as f64;
            for (i, value) in row.iter_mut().enumerate() {
                *value = (coeff_k * (2 * i + 1) as f64).cos();
            }
        }
        Ok(Self { len, table })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Basis values for frequency `k`, indexed by sample position.
    #[inline]
    pub fn row(&self, k: usize) -> &[f64] {
        &self.table[k * self.len..(k + 1) * self.len]
    }
}
