// Copyright (c) the dct2 Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid transform length: {0}")]
    InvalidLength(usize),
    #[error("Dimension mismatch: row {row} has {actual} elements, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Missing input: {0}")]
    NullInput(&'static str),
    #[error("Context of length {context} used for a sequence of length {input}")]
    ContextLengthMismatch { context: usize, input: usize },
    #[error("Buffer of length {actual} provided, expected {expected}")]
    BufferLengthMismatch { expected: usize, actual: usize },
    #[error("Invalid block parameters: block size {block_size}, cutoff {cutoff}")]
    InvalidBlockParams { block_size: usize, cutoff: usize },
    #[error("Plane {plane} has shape {actual:?}, expected {expected:?}")]
    PlaneShapeMismatch {
        plane: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("Out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),
}

pub type Result<T> = std::result::Result<T, Error>;
