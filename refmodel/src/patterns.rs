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

//! Synthetic input data for the testbench.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::matrix::Matrix;

/// Named input data patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPattern {
    /// Horizontal ramp, `col * 100`.
    Gradient,
    /// `1000` on cells where `row + col` is even, `0` elsewhere.
    Checkerboard,
    /// Uniform in `[-1000, 1000)` from a seeded generator.
    Random,
    /// `1000 * sin(col / 20) * cos(row / 20)`, truncated toward zero.
    Sine,
    /// Row-major counter wrapped to 16 bits, reduced modulo 1000.
    #[default]
    Simple,
}

impl InputPattern {
    pub const ALL: [InputPattern; 5] = [
        InputPattern::Gradient,
        InputPattern::Checkerboard,
        InputPattern::Random,
        InputPattern::Sine,
        InputPattern::Simple,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InputPattern::Gradient => "gradient",
            InputPattern::Checkerboard => "checkerboard",
            InputPattern::Random => "random",
            InputPattern::Sine => "sine",
            InputPattern::Simple => "simple",
        }
    }

    /// Produce a `rows x cols` matrix. `seed` only affects [`InputPattern::Random`].
    ///
    /// Integer patterns wrap at 16 bits before any further reduction, so grids
    /// larger than `i16::MAX` cells reproduce the stored element type exactly.
    pub fn generate(&self, rows: usize, cols: usize, seed: u64) -> Matrix {
        match self {
            InputPattern::Gradient => {
                Matrix::from_fn(rows, cols, |_, c| (c as i16).wrapping_mul(100))
            }
            InputPattern::Checkerboard => {
                Matrix::from_fn(rows, cols, |r, c| if (r + c) % 2 == 0 { 1000 } else { 0 })
            }
            InputPattern::Random => {
                let mut rng = StdRng::seed_from_u64(seed);
                Matrix::from_fn(rows, cols, |_, _| rng.gen_range(-1000..1000))
            }
            InputPattern::Sine => Matrix::from_fn(rows, cols, |r, c| {
                let x = c as f64 / 20.0;
                let y = r as f64 / 20.0;
                (1000.0 * x.sin() * y.cos()) as i16
            }),
            InputPattern::Simple => {
                Matrix::from_fn(rows, cols, |r, c| ((r * cols + c) as i16).rem_euclid(1000))
            }
        }
    }
}

impl fmt::Display for InputPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|p| p.name()).collect();
                format!("unknown input pattern '{s}' (expected one of: {})", names.join(", "))
            })
    }
}
