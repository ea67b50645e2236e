// Copyright (c) the dct2 Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use tracing::trace;

use crate::dct::dct1d_into;
use crate::error::{Error, Result};
use crate::scales::{CosineTable, TransformScalars};
use crate::util::try_zeroed;

/// How a context obtains the cosine basis values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoefficientMode {
    /// Evaluate `cos` inside the kernel on every call. O(1) extra memory.
    #[default]
    OnTheFly,
    /// Precompute an N x N table once when the context is built.
    Table,
}

/// Reusable state for repeated 1D transforms of one fixed length.
///
/// A context owns the length-dependent scalars, an optional cosine table and a
/// scratch output buffer. [`TransformContext::transform`] writes into the
/// scratch buffer and lends it out until the next mutable use of the context;
/// [`TransformContext::consume_result`] moves it out instead and binds a fresh
/// buffer in its place.
#[derive(Debug, Clone)]
pub struct TransformContext {
    scalars: TransformScalars,
    cosines: Option<CosineTable>,
    scratch: Option<Vec<f64>>,
    holds_result: bool,
}

impl TransformContext {
    pub fn new(len: usize) -> Result<Self> {
        Self::with_mode(len, CoefficientMode::OnTheFly)
    }

    pub fn with_mode(len: usize, mode: CoefficientMode) -> Result<Self> {
        let scalars = TransformScalars::new(len)?;
        let cosines = match mode {
            CoefficientMode::OnTheFly => None,
            CoefficientMode::Table => Some(CosineTable::new(&scalars)?),
        };
        Ok(Self {
            scalars,
            cosines,
            scratch: None,
            holds_result: false,
        })
    }

    /// Binds caller-provided memory as the scratch output buffer.
    pub fn bind_buffer(&mut self, buffer: Vec<f64>) -> Result<()> {
        if buffer.len() != self.transform_len() {
            return Err(Error::BufferLengthMismatch {
                expected: self.transform_len(),
                actual: buffer.len(),
            });
        }
        self.scratch = Some(buffer);
        self.holds_result = false;
        Ok(())
    }

    #[inline]
    pub fn transform_len(&self) -> usize {
        self.scalars.len()
    }

    #[inline]
    pub fn scalars(&self) -> &TransformScalars {
        &self.scalars
    }

    pub fn mode(&self) -> CoefficientMode {
        if self.cosines.is_some() {
            CoefficientMode::Table
        } else {
            CoefficientMode::OnTheFly
        }
    }

    /// Whether the scratch buffer has been bound yet.
    pub fn has_buffer(&self) -> bool {
        self.scratch.is_some()
    }

    /// Transforms `input` into the context's scratch buffer and returns it.
    pub fn transform(&mut self, input: &[f64]) -> Result<&[f64]> {
        self.check_len(input.len())?;
        let mut output = match self.scratch.take() {
            Some(buffer) => buffer,
            None => {
                trace!(len = self.transform_len(), "binding scratch buffer");
                try_zeroed(self.transform_len())?
            }
        };
        dct1d_into(input, &self.scalars, self.cosines.as_ref(), &mut output);
        self.holds_result = true;
        Ok(self.scratch.insert(output).as_slice())
    }

    /// Hands out ownership of the last result and rebinds a fresh scratch
    /// buffer. The context is left untouched if the new buffer cannot be
    /// allocated.
    pub fn consume_result(&mut self) -> Result<Vec<f64>> {
        match self.scratch.as_mut() {
            Some(scratch) if self.holds_result => {
                let fresh = try_zeroed(self.scalars.len())?;
                self.holds_result = false;
                Ok(std::mem::replace(scratch, fresh))
            }
            _ => Err(Error::NullInput("context holds no transform result")),
        }
    }

    /// Transforms `input` into `output` without touching the scratch buffer.
    ///
    /// Only reads the context, so one context can serve many threads at once
    /// as long as each brings its own output buffer.
    pub fn transform_into(&self, input: &[f64], output: &mut [f64]) -> Result<()> {
        self.check_len(input.len())?;
        if output.len() != self.transform_len() {
            return Err(Error::BufferLengthMismatch {
                expected: self.transform_len(),
                actual: output.len(),
            });
        }
        dct1d_into(input, &self.scalars, self.cosines.as_ref(), output);
        Ok(())
    }

    fn check_len(&self, input: usize) -> Result<()> {
        if input == 0 {
            return Err(Error::InvalidLength(input));
        }
        if input != self.transform_len() {
            return Err(Error::ContextLengthMismatch {
                context: self.transform_len(),
                input,
            });
        }
        Ok(())
    }
}
