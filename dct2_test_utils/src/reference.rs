// Copyright (c) the dct2 Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Slow matrix-form DCT-II, written independently of the kernel so tests can
//! compare against it.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

#[inline(always)]
fn alpha(u: usize) -> f64 {
    if u == 0 {
        FRAC_1_SQRT_2
    } else {
        1.0
    }
}

/// Orthonormal DCT-II of every column of `input_matrix`.
pub fn dct_columns(input_matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let num_rows = input_matrix.len();

    if num_rows == 0 {
        return Vec::new();
    }

    let num_cols = input_matrix[0].len();
    let scale = (2.0 / num_rows as f64).sqrt();

    // Basis matrix, num_rows x num_rows.
    let mut dct_coeff_matrix = vec![vec![0.0f64; num_rows]; num_rows];
    for (u_freq, row) in dct_coeff_matrix.iter_mut().enumerate() {
        let alpha_u_val = alpha(u_freq);
        for (y_spatial, coeff) in row.iter_mut().enumerate() {
            *coeff = alpha_u_val
                * ((y_spatial as f64 + 0.5) * u_freq as f64 * PI / num_rows as f64).cos()
                * scale;
        }
    }

    let mut output_matrix = vec![vec![0.0f64; num_cols]; num_rows];
    for x_col_idx in 0..num_cols {
        for (u_freq_idx, out_row) in output_matrix.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (y_spatial_idx, row) in input_matrix.iter().enumerate() {
                sum += dct_coeff_matrix[u_freq_idx][y_spatial_idx] * row[x_col_idx];
            }
            out_row[x_col_idx] = sum;
        }
    }

    output_matrix
}

pub fn dct1d(input: &[f64]) -> Vec<f64> {
    let column: Vec<Vec<f64>> = input.iter().map(|&v| vec![v]).collect();
    dct_columns(&column).into_iter().map(|row| row[0]).collect()
}

pub fn transpose(matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
    if matrix.is_empty() {
        return Vec::new();
    }
    let num_rows = matrix.len();
    let num_cols = matrix[0].len();
    let mut transposed = vec![vec![0.0; num_rows]; num_cols];
    for i in 0..num_rows {
        for j in 0..num_cols {
            transposed[j][i] = matrix[i][j];
        }
    }
    transposed
}

/// Columns first, then rows.
pub fn dct2d(input: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let columns_done = dct_columns(input);
    transpose(&dct_columns(&transpose(&columns_done)))
}
