// Copyright (c) the dct2 Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use tracing::trace;

use crate::error::Result;
use crate::scales::{CosineTable, TransformScalars};
use crate::util::try_zeroed;

/// Orthonormal DCT-II of `input`, written to `output`.
///
/// `output[k] = sqrt(2 / N) * sum_i cos(pi * k * (2i + 1) / (2N)) * input[i]`,
/// with the DC term further divided by `sqrt(2)`.
///
/// Time: O(N^2). Both slices must have length `scalars.len()`; callers check
/// this before getting here.
pub(crate) fn dct1d_into(
    input: &[f64],
    scalars: &TransformScalars,
    cosines: Option<&CosineTable>,
    output: &mut [f64],
) {
    debug_assert_eq!(input.len(), scalars.len());
    debug_assert_eq!(output.len(), scalars.len());
    trace!(len = scalars.len(), table = cosines.is_some(), "dct1d");

    let sqrt_n = scalars.sqrt_n();
    let sqrt_2 = scalars.sqrt_two();

    match cosines {
        Some(table) => {
            for (k, out) in output.iter_mut().enumerate() {
                let mut a_k = 0.0;
                for (&c, &v) in table.row(k).iter().zip(input) {
                    a_k += c * v;
                }
                *out = a_k / sqrt_n * sqrt_2;
            }
        }
        None => {
            let coeff = scalars.angle_step();
            for (k, out) in output.iter_mut().enumerate() {
                let coeff_k = coeff * k as f64;
                let mut a_k = 0.0;
                for (i, &v) in input.iter().enumerate() {
                    a_k += (coeff_k * (2 * i + 1) as f64).cos() * v;
                }
                *out = a_k / sqrt_n * sqrt_2;
            }
        }
    }
    output[0] /= sqrt_2;
}

/// Orthonormal DCT-II of a sequence into a freshly allocated buffer.
///
/// Computes its own scalars for `input.len()`; for many transforms of the same
/// length prefer a [`crate::context::TransformContext`].
pub fn transform_1d(input: &[f64]) -> Result<Vec<f64>> {
    let scalars = TransformScalars::new(input.len())?;
    let mut output = try_zeroed(input.len())?;
    dct1d_into(input, &scalars, None, &mut output);
    Ok(output)
}

#[cfg(test)]
mod test {
    use dct2_test_utils::{assert_all_almost_eq, assert_almost_eq, fixtures};
    use test_log::test;

    use super::*;
    use crate::error::Error;

    #[test]
    fn known_values() -> Result<()> {
        let output = transform_1d(&fixtures::DCT_INPUT)?;
        assert_all_almost_eq!(output, fixtures::DCT_EXPECTED, fixtures::DCT_TOLERANCE);
        Ok(())
    }

    #[test]
    fn empty_input_is_invalid() {
        assert_eq!(transform_1d(&[]), Err(Error::InvalidLength(0)));
    }

    #[test]
    fn single_sample_is_identity() -> Result<()> {
        let output = transform_1d(&[42.5])?;
        assert_eq!(output.len(), 1);
        assert_almost_eq!(output[0], 42.5, 1e-12);
        Ok(())
    }

    #[test]
    fn ramp_matches_scipy() -> Result<()> {
        // scipy.fft.dct(list(range(8)), norm='ortho')
        let output = transform_1d(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0])?;
        let expected = [
            9.899494936611665,
            -6.442323022705137,
            0.0,
            -0.6734548009039396,
            0.0,
            -0.20090290373599218,
            0.0,
            -0.050702322759649136,
        ];
        assert_all_almost_eq!(output, expected, 1e-12);
        Ok(())
    }

    #[test]
    fn table_and_on_the_fly_agree() -> Result<()> {
        let scalars = TransformScalars::new(13)?;
        let table = CosineTable::new(&scalars)?;
        let input: Vec<f64> = (0..13).map(|i| ((i * 37) % 11) as f64 - 4.5).collect();
        let mut a = vec![0.0; 13];
        let mut b = vec![0.0; 13];
        dct1d_into(&input, &scalars, None, &mut a);
        dct1d_into(&input, &scalars, Some(&table), &mut b);
        assert_eq!(a, b);
        Ok(())
    }
}
