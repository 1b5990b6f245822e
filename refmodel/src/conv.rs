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

//! Strided, zero-padded, saturating 2D convolution.
//!
//! This is the bit-exact reference for the hardware datapath: every tap is an
//! `i16 * i16` product summed in a wide accumulator, taps that fall outside
//! the input are skipped, and the final sum is clamped to the `i16` range.

use crate::error::{RefModelError, Result};
use crate::matrix::Matrix;

/// Stride used by the testbench configuration (224x224 -> 112x112).
pub const DEFAULT_STRIDE: usize = 2;
/// Kernel side length used by the testbench configuration.
pub const KERNEL_SIZE: usize = 3;

/// Clamp an accumulator value to `[i16::MIN, i16::MAX]`.
#[inline]
pub fn saturate_i16(acc: i64) -> i16 {
    acc.clamp(i16::MIN as i64, i16::MAX as i64) as i16
}

/// Output shape for an `rows x cols` input sampled every `stride` positions.
#[inline]
pub fn output_dims(rows: usize, cols: usize, stride: usize) -> (usize, usize) {
    (rows / stride, cols / stride)
}

fn validate(input: &Matrix, kernel: &Matrix, stride: usize) -> Result<()> {
    if stride == 0 {
        return Err(RefModelError::InvalidStride(stride));
    }
    if input.rows() == 0 || input.cols() == 0 {
        return Err(RefModelError::InvalidDimensions(format!(
            "input is {}x{}",
            input.rows(),
            input.cols()
        )));
    }
    if kernel.rows() == 0 || !kernel.is_square() || kernel.rows() % 2 == 0 {
        return Err(RefModelError::InvalidDimensions(format!(
            "kernel must be square with odd side length, got {}x{}",
            kernel.rows(),
            kernel.cols()
        )));
    }
    Ok(())
}

/// Saturated convolution value at output position `(i, j)`.
///
/// The kernel center sits on input position `(i * stride, j * stride)`.
/// Operands are checked the same way as in [`compute`], and `(i, j)` must lie
/// inside the output shape.
pub fn compute_cell(
    input: &Matrix,
    kernel: &Matrix,
    i: usize,
    j: usize,
    stride: usize,
) -> Result<i16> {
    validate(input, kernel, stride)?;
    let (out_rows, out_cols) = output_dims(input.rows(), input.cols(), stride);
    if i >= out_rows || j >= out_cols {
        return Err(RefModelError::InvalidDimensions(format!(
            "output position ({i}, {j}) outside {out_rows}x{out_cols}"
        )));
    }
    Ok(cell_value(input, kernel, i, j, stride))
}

/// Operands must already have passed [`validate`].
fn cell_value(input: &Matrix, kernel: &Matrix, i: usize, j: usize, stride: usize) -> i16 {
    let (rows, cols) = (input.rows() as isize, input.cols() as isize);
    let k = kernel.rows();
    let half = (k / 2) as isize;
    let in_i = (i * stride) as isize;
    let in_j = (j * stride) as isize;

    let mut sum: i64 = 0;
    for ki in 0..k {
        let row = in_i + ki as isize - half;
        if row < 0 || row >= rows {
            continue;
        }
        for kj in 0..k {
            let col = in_j + kj as isize - half;
            if col < 0 || col >= cols {
                continue;
            }
            let x = input[(row as usize, col as usize)] as i64;
            let w = kernel[(ki, kj)] as i64;
            sum += x * w;
        }
    }
    saturate_i16(sum)
}

/// Convolve `input` with `kernel` at every `stride`-sampled position.
///
/// Output shape is `(rows / stride) x (cols / stride)`.
pub fn compute(input: &Matrix, kernel: &Matrix, stride: usize) -> Result<Matrix> {
    ConvolutionReferenceModel::new(stride).compute(input, kernel)
}

/// Reference model bound to a fixed stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvolutionReferenceModel {
    stride: usize,
}

impl Default for ConvolutionReferenceModel {
    fn default() -> Self {
        Self {
            stride: DEFAULT_STRIDE,
        }
    }
}

impl ConvolutionReferenceModel {
    pub fn new(stride: usize) -> Self {
        Self { stride }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn compute(&self, input: &Matrix, kernel: &Matrix) -> Result<Matrix> {
        self.compute_with_progress(input, kernel, |_, _| {})
    }

    /// Like [`compute`](Self::compute), calling `on_row(done, total)` after
    /// each output row is populated.
    pub fn compute_with_progress(
        &self,
        input: &Matrix,
        kernel: &Matrix,
        mut on_row: impl FnMut(usize, usize),
    ) -> Result<Matrix> {
        validate(input, kernel, self.stride)?;

        let (out_rows, out_cols) = output_dims(input.rows(), input.cols(), self.stride);
        tracing::debug!(
            input_rows = input.rows(),
            input_cols = input.cols(),
            kernel_size = kernel.rows(),
            stride = self.stride,
            out_rows,
            out_cols,
            "computing reference convolution"
        );

        let mut output = Matrix::zeros(out_rows, out_cols);
        for i in 0..out_rows {
            for j in 0..out_cols {
                output.set(i, j, cell_value(input, kernel, i, j, self.stride));
            }
            on_row(i + 1, out_rows);
        }
        Ok(output)
    }
}
