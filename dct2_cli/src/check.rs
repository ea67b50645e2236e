// Copyright (c) the dct2 Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Known-value self-test of the 1D and 2D transforms.

use color_eyre::eyre::{Result, eyre};
use dct2::{TransformContext, transform_1d, transform_2d};
use dct2_test_utils::fixtures;
use tracing::info;

/// Largest absolute difference between `actual` and `expected`, or an error
/// naming the first index that exceeds `tolerance`.
fn compare(what: &str, actual: &[f64], expected: &[f64], tolerance: f64) -> Result<f64> {
    if actual.len() != expected.len() {
        return Err(eyre!(
            "{what}: got {} values, expected {}",
            actual.len(),
            expected.len()
        ));
    }
    let mut max_error = 0.0f64;
    for (index, (&a, &e)) in actual.iter().zip(expected).enumerate() {
        let error = (a - e).abs();
        if error.is_nan() || error > tolerance {
            return Err(eyre!(
                "{what}[{index}]: got {a}, expected {e} (tolerance {tolerance})"
            ));
        }
        max_error = max_error.max(error);
    }
    Ok(max_error)
}

pub fn run_check() -> Result<()> {
    let output = transform_1d(&fixtures::DCT_INPUT)?;
    let max_error = compare(
        "dct1d",
        &output,
        &fixtures::DCT_EXPECTED,
        fixtures::DCT_TOLERANCE,
    )?;
    info!(max_error, "dct1d matches known values");

    let mut context = TransformContext::new(fixtures::DCT_INPUT.len())?;
    let reused = context.transform(&fixtures::DCT_INPUT)?;
    compare("dct1d context", reused, &output, 0.0)?;

    let output = transform_2d(&fixtures::DCT2_INPUT)?;
    let mut max_error = 0.0f64;
    for (row, (actual, expected)) in output.iter().zip(&fixtures::DCT2_EXPECTED).enumerate() {
        let error = compare(
            &format!("dct2d row {row}"),
            actual,
            expected,
            fixtures::DCT2_TOLERANCE,
        )?;
        max_error = max_error.max(error);
    }
    info!(max_error, "dct2d matches known values");
    Ok(())
}
