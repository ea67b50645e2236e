// Copyright (c) the dct2 Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use tracing::{debug, instrument};

use crate::context::TransformContext;
use crate::dct::dct1d_into;
use crate::error::{Error, Result};
use crate::options::TransformOptions;
use crate::scales::TransformScalars;
use crate::util::{try_zeroed, try_zeroed_matrix};

const MISSING_ROWS: Error = Error::NullInput("matrix has fewer rows than declared");

/// Rows and columns of a matrix, rejecting empty and ragged input.
pub(crate) fn matrix_shape<R: AsRef<[f64]>>(matrix: &[R]) -> Result<(usize, usize)> {
    let rows = matrix.len();
    if rows == 0 {
        return Err(Error::InvalidLength(rows));
    }
    let cols = matrix[0].as_ref().len();
    if cols == 0 {
        return Err(Error::InvalidLength(cols));
    }
    Ok((rows, cols))
}

/// The leading `rows` rows of `matrix`, each checked to hold exactly `cols`
/// values.
fn declared_rows<R: AsRef<[f64]>>(matrix: &[R], rows: usize, cols: usize) -> Result<&[R]> {
    let matrix = matrix.get(..rows).ok_or(MISSING_ROWS)?;
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
    Ok(matrix)
}

/// A separable 2D DCT-II for one fixed `rows` x `cols` shape.
///
/// The transform runs in two phases:
/// - the row pass applies a length-`cols` transform to every row;
/// - the column pass applies a length-`rows` transform to every column of the
///   row pass output, through one shared context and one gather buffer.
///
/// Building the plan once and calling [`Transform2d::transform`] repeatedly
/// keeps the column context (and its cosine table, if any) alive across
/// matrices of the same shape.
#[derive(Debug, Clone)]
pub struct Transform2d {
    rows: usize,
    cols: usize,
    options: TransformOptions,
    row_context: Option<TransformContext>,
    column_context: TransformContext,
    column: Vec<f64>,
}

impl Transform2d {
    pub fn new(rows: usize, cols: usize, options: TransformOptions) -> Result<Self> {
        if cols == 0 {
            return Err(Error::InvalidLength(cols));
        }
        let column_context = TransformContext::with_mode(rows, options.coefficients)?;
        let row_context = if options.share_row_context {
            Some(TransformContext::with_mode(cols, options.coefficients)?)
        } else {
            None
        };
        Ok(Self {
            rows,
            cols,
            options,
            row_context,
            column_context,
            column: try_zeroed(rows)?,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Transforms the leading `rows` rows of `matrix` into a new matrix.
    #[instrument(level = "debug", skip_all, fields(rows = self.rows, cols = self.cols))]
    pub fn transform<R: AsRef<[f64]> + Sync>(&mut self, matrix: &[R]) -> Result<Vec<Vec<f64>>> {
        let matrix = declared_rows(matrix, self.rows, self.cols)?;
        let mut result = try_zeroed_matrix(self.rows, self.cols)?;
        self.row_pass(matrix, &mut result)?;
        self.column_pass(&mut result)?;
        Ok(result)
    }

    fn row_pass<R: AsRef<[f64]> + Sync>(&self, matrix: &[R], result: &mut [Vec<f64>]) -> Result<()> {
        debug!(
            len = self.cols,
            shared = self.row_context.is_some(),
            "row pass"
        );
        let row_context = self.row_context.as_ref();
        let transform_row = |input: &R, output: &mut Vec<f64>| -> Result<()> {
            let input = input.as_ref();
            match row_context {
                Some(context) => context.transform_into(input, output),
                None => {
                    let scalars = TransformScalars::new(input.len())?;
                    dct1d_into(input, &scalars, None, output);
                    Ok(())
                }
            }
        };

        #[cfg(feature = "parallel")]
        {
            if self.options.parallel {
                use rayon::prelude::*;
                return matrix
                    .par_iter()
                    .zip(result.par_iter_mut())
                    .try_for_each(|(input, output)| transform_row(input, output));
            }
        }

        matrix
            .iter()
            .zip(result.iter_mut())
            .try_for_each(|(input, output)| transform_row(input, output))
    }

    fn column_pass(&mut self, result: &mut [Vec<f64>]) -> Result<()> {
        debug!(len = self.rows, "column pass");

        #[cfg(feature = "parallel")]
        {
            if self.options.parallel {
                return self.parallel_column_pass(result);
            }
        }

        let column = &mut self.column;
        let context = &mut self.column_context;
        for j in 0..self.cols {
            for (dst, row) in column.iter_mut().zip(result.iter()) {
                *dst = row[j];
            }
            let transformed = context.transform(column.as_slice())?;
            for (row, &value) in result.iter_mut().zip(transformed) {
                row[j] = value;
            }
        }
        Ok(())
    }

    /// Every column task gathers into and transforms to its own buffers; only
    /// the read-only part of the column context is shared.
    #[cfg(feature = "parallel")]
    fn parallel_column_pass(&self, result: &mut [Vec<f64>]) -> Result<()> {
        use rayon::prelude::*;

        let rows = self.rows;
        let context = &self.column_context;
        let source: &[Vec<f64>] = result;
        let columns = (0..self.cols)
            .into_par_iter()
            .map(|j| -> Result<Vec<f64>> {
                let mut column = try_zeroed(rows)?;
                for (dst, row) in column.iter_mut().zip(source) {
                    *dst = row[j];
                }
                let mut output = try_zeroed(rows)?;
                context.transform_into(&column, &mut output)?;
                Ok(output)
            })
            .collect::<Result<Vec<_>>>()?;

        for (j, column) in columns.iter().enumerate() {
            for (row, &value) in result.iter_mut().zip(column) {
                row[j] = value;
            }
        }
        Ok(())
    }
}

/// Orthonormal 2D DCT-II of a matrix given as a slice of equally long rows.
pub fn transform_2d<R: AsRef<[f64]> + Sync>(matrix: &[R]) -> Result<Vec<Vec<f64>>> {
    transform_2d_with_options(matrix, TransformOptions::default())
}

pub fn transform_2d_with_options<R: AsRef<[f64]> + Sync>(
    matrix: &[R],
    options: TransformOptions,
) -> Result<Vec<Vec<f64>>> {
    let (rows, cols) = matrix_shape(matrix)?;
    Transform2d::new(rows, cols, options)?.transform(matrix)
}

/// Like [`transform_2d`], with the shape declared by the caller: the leading
/// `rows` rows are read and each must hold exactly `cols` values.
pub fn transform_2d_sized<R: AsRef<[f64]> + Sync>(
    matrix: &[R],
    rows: usize,
    cols: usize,
) -> Result<Vec<Vec<f64>>> {
    // Checked before the plan allocates anything sized by `rows`.
    if rows != 0 && matrix.len() < rows {
        return Err(MISSING_ROWS);
    }
    Transform2d::new(rows, cols, TransformOptions::default())?.transform(matrix)
}

#[cfg(test)]
mod test {
    use dct2_test_utils::{assert_all_almost_eq, fixtures};
    use test_log::test;

    use super::*;
    use crate::context::CoefficientMode;
    use crate::dct::transform_1d;

    fn sample_matrix(rows: usize, cols: usize) -> Vec<Vec<f64>> {
        (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| ((r * 31 + c * 17) % 23) as f64 * 3.5 - 20.0)
                    .collect()
            })
            .collect()
    }

    fn assert_matrix_eq(a: &[Vec<f64>], b: &[Vec<f64>], max_error: f64) {
        assert_eq!(a.len(), b.len());
        for (row_a, row_b) in a.iter().zip(b) {
            assert_all_almost_eq!(row_a, row_b, max_error);
        }
    }

    #[test]
    fn known_values() -> Result<()> {
        let output = transform_2d(&fixtures::DCT2_INPUT)?;
        for (row, expected) in output.iter().zip(fixtures::DCT2_EXPECTED.iter()) {
            assert_all_almost_eq!(row, expected, fixtures::DCT2_TOLERANCE);
        }
        Ok(())
    }

    #[test]
    fn known_values_are_closer_than_fixture_tolerance() -> Result<()> {
        // The fixture lists three significant digits, so 1% of the largest
        // magnitude is plenty.
        let output = transform_2d(&fixtures::DCT2_INPUT)?;
        for (row, expected) in output.iter().zip(fixtures::DCT2_EXPECTED.iter()) {
            assert_all_almost_eq!(row, expected, 11.1);
        }
        Ok(())
    }

    #[test]
    fn single_row_is_1d_transform() -> Result<()> {
        let output = transform_2d(&[fixtures::DCT_INPUT])?;
        let expected = transform_1d(&fixtures::DCT_INPUT)?;
        assert_eq!(output.len(), 1);
        assert_all_almost_eq!(output[0], expected, 1e-12);
        Ok(())
    }

    #[test]
    fn preserves_dimensions() -> Result<()> {
        for (rows, cols) in [(1, 1), (3, 5), (5, 3), (8, 8), (2, 13)] {
            let output = transform_2d(&sample_matrix(rows, cols))?;
            assert_eq!(output.len(), rows);
            assert!(output.iter().all(|row| row.len() == cols));
        }
        Ok(())
    }

    #[test]
    fn empty_matrix_is_invalid() {
        let empty: [Vec<f64>; 0] = [];
        assert_eq!(transform_2d(&empty), Err(Error::InvalidLength(0)));
        assert_eq!(
            transform_2d(&[Vec::<f64>::new(), Vec::new()]),
            Err(Error::InvalidLength(0))
        );
    }

    #[test]
    fn ragged_matrix_is_dimension_mismatch() {
        let matrix = vec![vec![1.0; 4], vec![1.0; 4], vec![1.0; 3]];
        assert_eq!(
            transform_2d(&matrix),
            Err(Error::DimensionMismatch {
                row: 2,
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn sized_checks_declared_shape() -> Result<()> {
        let matrix = sample_matrix(4, 6);
        assert_eq!(
            transform_2d_sized(&matrix, 4, 5),
            Err(Error::DimensionMismatch {
                row: 0,
                expected: 5,
                actual: 6
            })
        );
        assert!(matches!(
            transform_2d_sized(&matrix, 5, 6),
            Err(Error::NullInput(_))
        ));
        assert_eq!(
            transform_2d_sized(&matrix, 0, 6),
            Err(Error::InvalidLength(0))
        );
        assert_eq!(
            transform_2d_sized(&matrix, 4, 0),
            Err(Error::InvalidLength(0))
        );

        let prefix = transform_2d_sized(&matrix, 3, 6)?;
        let expected = transform_2d(&matrix[..3])?;
        assert_matrix_eq(&prefix, &expected, 1e-12);
        Ok(())
    }

    #[test]
    fn sized_huge_declared_rows_is_null_input() {
        let matrix = [vec![1.0]];
        assert!(matches!(
            transform_2d_sized(&matrix, usize::MAX / 2 + 1, 1),
            Err(Error::NullInput(_))
        ));
        assert!(matches!(
            transform_2d_sized(&matrix, usize::MAX, 1),
            Err(Error::NullInput(_))
        ));
    }

    #[test]
    fn huge_plan_is_out_of_memory() {
        assert!(matches!(
            Transform2d::new(usize::MAX / 2 + 1, 1, TransformOptions::default()),
            Err(Error::OutOfMemory(_))
        ));
    }

    #[test]
    fn options_do_not_change_result() -> Result<()> {
        let matrix = sample_matrix(7, 12);
        let baseline = transform_2d(&matrix)?;
        for coefficients in [CoefficientMode::OnTheFly, CoefficientMode::Table] {
            for share_row_context in [false, true] {
                for parallel in [false, true] {
                    let options = TransformOptions::default()
                        .with_coefficients(coefficients)
                        .with_share_row_context(share_row_context)
                        .with_parallel(parallel);
                    let output = transform_2d_with_options(&matrix, options)?;
                    assert_matrix_eq(&output, &baseline, 1e-9);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn parallel_is_bit_identical() -> Result<()> {
        let matrix = sample_matrix(9, 6);
        let sequential = transform_2d(&matrix)?;
        let parallel =
            transform_2d_with_options(&matrix, TransformOptions::default().with_parallel(true))?;
        assert_eq!(sequential, parallel);
        Ok(())
    }

    #[test]
    fn plan_is_reusable() -> Result<()> {
        let options = TransformOptions::default().with_coefficients(CoefficientMode::Table);
        let mut plan = Transform2d::new(6, 4, options)?;
        assert_eq!((plan.rows(), plan.cols()), (6, 4));
        for seed in 0..3 {
            let matrix: Vec<Vec<f64>> = sample_matrix(6, 4)
                .into_iter()
                .map(|row| row.into_iter().map(|v| v + seed as f64).collect())
                .collect();
            let expected = transform_2d(&matrix)?;
            let output = plan.transform(&matrix)?;
            assert_matrix_eq(&output, &expected, 1e-9);
        }
        Ok(())
    }

    #[test]
    fn accepts_borrowed_rows() -> Result<()> {
        let owned = sample_matrix(3, 4);
        let borrowed: Vec<&[f64]> = owned.iter().map(Vec::as_slice).collect();
        assert_eq!(transform_2d(&borrowed)?, transform_2d(&owned)?);
        Ok(())
    }
}
