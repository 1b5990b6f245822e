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

//! Bit-exact reference model for a strided, zero-padded, saturating 2D
//! convolution datapath, plus the input and kernel generators that feed it.
//!
//! ```
//! use conv_refmodel::{compute, InputPattern, KernelType};
//!
//! let input = InputPattern::Simple.generate(224, 224, 0);
//! let kernel = KernelType::Simple.generate();
//! let expected = compute(&input, &kernel, 2).unwrap();
//! assert_eq!(expected.dims(), (112, 112));
//! ```

pub mod conv;
pub mod error;
pub mod kernels;
pub mod matrix;
pub mod patterns;

pub use conv::{
    compute, compute_cell, output_dims, saturate_i16, ConvolutionReferenceModel, DEFAULT_STRIDE,
    KERNEL_SIZE,
};
pub use error::{RefModelError, Result};
pub use kernels::KernelType;
pub use matrix::Matrix;
pub use patterns::InputPattern;
