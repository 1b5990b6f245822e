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

//! Fixed 3x3 kernels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::conv::KERNEL_SIZE;
use crate::matrix::Matrix;

type Weights = [[i16; KERNEL_SIZE]; KERNEL_SIZE];

const SOBEL_X: Weights = [[1, 0, -1], [2, 0, -2], [1, 0, -1]];
const SOBEL_Y: Weights = [[1, 2, 1], [0, 0, 0], [-1, -2, -1]];
const GAUSSIAN: Weights = [[1, 2, 1], [2, 4, 2], [1, 2, 1]];
const SHARPEN: Weights = [[0, -1, 0], [-1, 5, -1], [0, -1, 0]];
const EDGE: Weights = [[-1, -1, -1], [-1, 8, -1], [-1, -1, -1]];
const IDENTITY: Weights = [[0, 0, 0], [0, 1, 0], [0, 0, 0]];
const SIMPLE: Weights = [[1, 1, 1], [1, 1, 1], [1, 1, 1]];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelType {
    SobelX,
    SobelY,
    /// Unnormalized binomial blur, weights sum to 16.
    Gaussian,
    Sharpen,
    Edge,
    Identity,
    /// All ones.
    #[default]
    Simple,
}

impl KernelType {
    pub const ALL: [KernelType; 7] = [
        KernelType::SobelX,
        KernelType::SobelY,
        KernelType::Gaussian,
        KernelType::Sharpen,
        KernelType::Edge,
        KernelType::Identity,
        KernelType::Simple,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            KernelType::SobelX => "sobel_x",
            KernelType::SobelY => "sobel_y",
            KernelType::Gaussian => "gaussian",
            KernelType::Sharpen => "sharpen",
            KernelType::Edge => "edge",
            KernelType::Identity => "identity",
            KernelType::Simple => "simple",
        }
    }

    fn weights(&self) -> &'static Weights {
        match self {
            KernelType::SobelX => &SOBEL_X,
            KernelType::SobelY => &SOBEL_Y,
            KernelType::Gaussian => &GAUSSIAN,
            KernelType::Sharpen => &SHARPEN,
            KernelType::Edge => &EDGE,
            KernelType::Identity => &IDENTITY,
            KernelType::Simple => &SIMPLE,
        }
    }

    pub fn generate(&self) -> Matrix {
        let w = self.weights();
        Matrix::from_fn(KERNEL_SIZE, KERNEL_SIZE, |r, c| w[r][c])
    }
}

impl fmt::Display for KernelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KernelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|k| k.name()).collect();
                format!("unknown kernel type '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_sums() {
        let sums: Vec<i64> = KernelType::ALL.iter().map(|k| k.generate().sum()).collect();
        // sobel_x, sobel_y, gaussian, sharpen, edge, identity, simple
        assert_eq!(sums, vec![0, 0, 16, 1, 0, 1, 9]);
    }

    #[test]
    fn every_kernel_is_three_by_three() {
        for k in KernelType::ALL {
            assert_eq!(k.generate().dims(), (3, 3), "{k}");
        }
    }

    #[test]
    fn sobel_x_layout() {
        let m = KernelType::SobelX.generate();
        assert_eq!(m.row(1), &[2, 0, -2]);
        assert_eq!(m[(2, 2)], -1);
    }

    #[test]
    fn parses_snake_and_kebab_case() {
        assert_eq!("sobel_y".parse::<KernelType>().unwrap(), KernelType::SobelY);
        assert_eq!("Sobel-X".parse::<KernelType>().unwrap(), KernelType::SobelX);
        assert!("laplace".parse::<KernelType>().is_err());
    }
}
