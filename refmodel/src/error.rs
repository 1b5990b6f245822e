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

use thiserror::Error;

/// Errors raised by the reference model when its preconditions do not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefModelError {
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),
    #[error("invalid stride: {0} (must be >= 1)")]
    InvalidStride(usize),
    #[error("ragged rows: row {row} has {found} values, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T, E = RefModelError> = std::result::Result<T, E>;
