// Copyright (c) the dct2 Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::context::CoefficientMode;

/// Tuning knobs for the 2D transform. None of them change the result beyond
/// floating point rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct TransformOptions {
    /// Coefficient source for the shared contexts.
    pub coefficients: CoefficientMode,
    /// Transform all rows through one context of the row length instead of
    /// computing fresh scalars for every row.
    /// Default: false.
    pub share_row_context: bool,
    /// Run the row and column passes on the rayon thread pool. Ignored when the
    /// crate is built without the `parallel` feature.
    /// Default: false.
    pub parallel: bool,
}

impl TransformOptions {
    pub fn with_coefficients(mut self, coefficients: CoefficientMode) -> Self {
        self.coefficients = coefficients;
        self
    }

    pub fn with_share_row_context(mut self, share_row_context: bool) -> Self {
        self.share_row_context = share_row_context;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
