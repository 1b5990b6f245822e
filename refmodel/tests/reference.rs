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

use conv_refmodel::{
    compute, output_dims, ConvolutionReferenceModel, InputPattern, KernelType, Matrix,
    RefModelError,
};
use proptest::prelude::*;

fn filled(rows: usize, cols: usize, v: i16) -> Matrix {
    Matrix::from_fn(rows, cols, |_, _| v)
}

/// Materialize a zero-padded copy of `input` and slide the kernel over it.
fn padded_oracle(input: &Matrix, kernel: &Matrix, stride: usize) -> Matrix {
    let k = kernel.rows();
    let pad = k / 2;
    let (rows, cols) = input.dims();
    let mut padded = vec![vec![0i64; cols + 2 * pad]; rows + 2 * pad];
    for r in 0..rows {
        for c in 0..cols {
            padded[r + pad][c + pad] = input[(r, c)] as i64;
        }
    }
    let (out_rows, out_cols) = output_dims(rows, cols, stride);
    Matrix::from_fn(out_rows, out_cols, |i, j| {
        let mut acc = 0i64;
        for ki in 0..k {
            for kj in 0..k {
                acc += padded[i * stride + ki][j * stride + kj] * kernel[(ki, kj)] as i64;
            }
        }
        acc.clamp(-32768, 32767) as i16
    })
}

#[test]
fn identity_kernel_reproduces_input() {
    let input = InputPattern::Random.generate(9, 7, 3);
    let out = compute(&input, &KernelType::Identity.generate(), 1).unwrap();
    assert_eq!(out, input);
}

#[test]
fn zero_padding_at_corner() {
    let out = compute(&filled(4, 4, 5), &KernelType::Simple.generate(), 1).unwrap();
    assert_eq!(out[(0, 0)], 20);
    assert_eq!(out[(3, 3)], 20);
    assert_eq!(out[(1, 2)], 45);
}

#[test]
fn stride_two_sampling() {
    let out = compute(&filled(4, 4, 1), &filled(3, 3, 1), 2).unwrap();
    assert_eq!(out, Matrix::from_rows(&[[4i16, 6], [6, 9]]).unwrap());
}

#[test]
fn positive_overflow_saturates() {
    let out = compute(&filled(5, 5, i16::MAX), &KernelType::Simple.generate(), 1).unwrap();
    assert_eq!(out[(2, 2)], 32767);
    assert_eq!(out[(0, 0)], 32767);
}

#[test]
fn negative_overflow_saturates() {
    let out = compute(&filled(5, 5, i16::MIN), &KernelType::Simple.generate(), 1).unwrap();
    assert_eq!(out[(2, 2)], -32768);
}

#[test]
fn mixed_sign_sum_does_not_clamp_partials() {
    // Partial sums pass 32767 before the negative taps bring the total back in range.
    let input = Matrix::from_rows(&[
        [30000i16, 30000, 30000],
        [0, 0, 0],
        [-30000, -30000, -29990],
    ])
    .unwrap();
    let out = compute(&input, &KernelType::Simple.generate(), 1).unwrap();
    assert_eq!(out[(1, 1)], 10);
}

#[test]
fn default_configuration_shape_and_values() {
    let input = InputPattern::Simple.generate(224, 224, 0);
    let kernel = KernelType::Simple.generate();
    let out = ConvolutionReferenceModel::default().compute(&input, &kernel).unwrap();
    assert_eq!(out.dims(), (112, 112));
    // Anchor (0, 0): taps 0, 1, 224, 225.
    assert_eq!(out[(0, 0)], 450);
    // Anchor (2, 2): nine taps centred on 450.
    assert_eq!(out[(1, 1)], 4050);
}

#[test]
fn sobel_x_on_gradient_is_constant_in_the_interior() {
    let input = InputPattern::Gradient.generate(8, 8, 0);
    let out = compute(&input, &KernelType::SobelX.generate(), 2).unwrap();
    // Left column minus right column of a ramp with step 100, weights 1+2+1.
    assert_eq!(out[(1, 1)], -800);
    assert_eq!(out[(2, 3)], -800);
}

#[test]
fn input_smaller_than_stride_gives_empty_output() {
    let out = compute(&filled(1, 5, 1), &filled(3, 3, 1), 2).unwrap();
    assert_eq!(out.dims(), (0, 2));
    assert!(out.is_empty());
}

#[test]
fn invalid_kernels_are_rejected() {
    let input = filled(4, 4, 1);
    assert!(matches!(
        compute(&input, &filled(4, 4, 1), 2),
        Err(RefModelError::InvalidDimensions(_))
    ));
    assert!(matches!(
        compute(&input, &filled(3, 5, 1), 2),
        Err(RefModelError::InvalidDimensions(_))
    ));
}

#[test_log::test]
fn repeated_runs_are_identical() {
    let input = InputPattern::Sine.generate(32, 48, 0);
    let kernel = KernelType::Edge.generate();
    let a = compute(&input, &kernel, 2).unwrap();
    let b = compute(&input, &kernel, 2).unwrap();
    assert_eq!(a, b);
}

fn odd_kernel() -> impl Strategy<Value = Matrix> {
    prop_oneof![Just(1usize), Just(3usize), Just(5usize)].prop_flat_map(|k| {
        proptest::collection::vec(any::<i16>(), k * k)
            .prop_map(move |data| Matrix::new(k, k, data).unwrap())
    })
}

fn input_matrix() -> impl Strategy<Value = Matrix> {
    (1usize..=12, 1usize..=12).prop_flat_map(|(r, c)| {
        proptest::collection::vec(any::<i16>(), r * c)
            .prop_map(move |data| Matrix::new(r, c, data).unwrap())
    })
}

proptest! {
    #[test]
    fn output_dims_follow_floor_division(
        input in input_matrix(),
        kernel in odd_kernel(),
        stride in 1usize..=4,
    ) {
        let out = compute(&input, &kernel, stride).unwrap();
        prop_assert_eq!(out.rows(), input.rows() / stride);
        prop_assert_eq!(out.cols(), input.cols() / stride);
    }

    #[test]
    fn skipping_taps_matches_materialized_padding(
        input in input_matrix(),
        kernel in odd_kernel(),
        stride in 1usize..=4,
    ) {
        let out = compute(&input, &kernel, stride).unwrap();
        prop_assert_eq!(out, padded_oracle(&input, &kernel, stride));
    }

    #[test]
    fn identity_holds_for_any_input(input in input_matrix()) {
        let out = compute(&input, &KernelType::Identity.generate(), 1).unwrap();
        prop_assert_eq!(out, input);
    }
}
