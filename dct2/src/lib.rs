// Copyright (c) the dct2 Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Orthonormal DCT-II of real sequences and of real matrices.
//!
//! - [`transform_1d`] computes the transform of one sequence.
//! - [`TransformContext`] caches the length-dependent scalars (and optionally a
//!   cosine table) plus an output buffer for repeated transforms of one length.
//! - [`transform_2d`] and [`Transform2d`] apply the 1D transform to every row
//!   and then to every column.
//! - [`blocks`] truncates blockwise transforms to their low frequencies.

pub mod blocks;
pub mod context;
pub mod dct;
pub mod dct2d;
pub mod error;
pub mod options;
pub mod scales;
pub mod util;

pub use context::{CoefficientMode, TransformContext};
pub use dct::transform_1d;
pub use dct2d::{transform_2d, transform_2d_sized, transform_2d_with_options, Transform2d};
pub use error::{Error, Result};
pub use options::TransformOptions;
