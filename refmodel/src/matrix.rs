// Copyright 2024 RISC Zero, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Row-major `i16` matrix shared by the generators, the reference model and
//! the text codec.

use std::fmt;
use std::ops::Index;

use crate::error::{RefModelError, Result};

/// Two-dimensional, row-major matrix of signed 16-bit values.
///
/// Zero-sized matrices are representable (a stride larger than the input
/// yields one); the reference model rejects them as inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<i16>,
}

impl Matrix {
    /// Wrap row-major `data`. Its length must equal `rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<i16>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(RefModelError::InvalidDimensions(format!(
                "data length {} != {rows}x{cols}",
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// Build a matrix by evaluating `f(row, col)` in row-major order.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> i16) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    /// Build a matrix from a list of rows, all of which must have equal length.
    pub fn from_rows<R: AsRef<[i16]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(RefModelError::RaggedRows {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn as_slice(&self) -> &[i16] {
        &self.data
    }

    pub fn row(&self, r: usize) -> &[i16] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[i16]> + '_ {
        (0..self.rows).map(move |r| self.row(r))
    }

    pub fn min(&self) -> Option<i16> {
        self.data.iter().copied().min()
    }

    pub fn max(&self) -> Option<i16> {
        self.data.iter().copied().max()
    }

    /// Sum of all elements, widened so it cannot overflow.
    pub fn sum(&self) -> i64 {
        self.data.iter().map(|&v| v as i64).sum()
    }

    pub(crate) fn set(&mut self, r: usize, c: usize, value: i16) {
        self.data[r * self.cols + c] = value;
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = i16;

    fn index(&self, (r, c): (usize, usize)) -> &i16 {
        assert!(
            r < self.rows && c < self.cols,
            "index ({r}, {c}) out of {}x{}",
            self.rows,
            self.cols
        );
        &self.data[r * self.cols + c]
    }
}

/// Testbench text layout: one row per line, values separated by a single
/// space, every row terminated by a newline.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{v}")?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
