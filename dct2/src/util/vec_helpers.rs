// Copyright (c) the dct2 Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::collections::TryReserveError;

pub trait TryWithCapacity {
    type Output;
    type Error;
    fn try_with_capacity(capacity: usize) -> Result<Self::Output, Self::Error>;
}

impl<T> TryWithCapacity for Vec<T> {
    type Output = Vec<T>;
    type Error = TryReserveError;

    fn try_with_capacity(capacity: usize) -> Result<Self::Output, Self::Error> {
        let mut vec = Vec::new();
        vec.try_reserve(capacity)?;
        Ok(vec)
    }
}

/// Allocates a zero-filled buffer of `len` samples, reporting allocation failure
/// instead of aborting.
pub fn try_zeroed(len: usize) -> Result<Vec<f64>, TryReserveError> {
    let mut vec = Vec::try_with_capacity(len)?;
    vec.resize(len, 0.0);
    Ok(vec)
}

/// Allocates a zero-filled `rows` x `cols` matrix with independently owned rows.
pub fn try_zeroed_matrix(rows: usize, cols: usize) -> Result<Vec<Vec<f64>>, TryReserveError> {
    let mut matrix = Vec::try_with_capacity(rows)?;
    for _ in 0..rows {
        matrix.push(try_zeroed(cols)?);
    }
    Ok(matrix)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zeroed_has_requested_len() {
        let buf = try_zeroed(17).unwrap();
        assert_eq!(buf.len(), 17);
        assert!(buf.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn zeroed_matrix_shape() {
        let m = try_zeroed_matrix(3, 5).unwrap();
        assert_eq!(m.len(), 3);
        assert!(m.iter().all(|row| row.len() == 5));
    }

    #[test]
    fn huge_allocation_fails() {
        assert!(try_zeroed(usize::MAX / 2).is_err());
    }
}
