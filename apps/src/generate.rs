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

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use conv_refmodel::{ConvolutionReferenceModel, InputPattern, KernelType, Matrix};

use crate::matrix_file::{load_matrix, write_matrix};
use crate::summary::Summary;

pub const INPUT_FILE: &str = "input_data.txt";
pub const KERNEL_FILE: &str = "kernel_data.txt";
pub const OUTPUT_FILE: &str = "expected_output.txt";
pub const SUMMARY_FILE: &str = "summary.json";

/// Log progress every this many output rows.
const PROGRESS_EVERY: usize = 25;

/// Where the input matrix comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Pattern {
        pattern: InputPattern,
        rows: usize,
        cols: usize,
        seed: u64,
    },
    File(PathBuf),
}

/// Where the kernel comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelSource {
    Builtin(KernelType),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub input: InputSource,
    pub kernel: KernelSource,
    pub stride: usize,
    pub output_dir: PathBuf,
    pub summary_json: bool,
}

impl InputSource {
    fn describe(&self) -> String {
        match self {
            InputSource::Pattern { pattern, .. } => format!("pattern:{pattern}"),
            InputSource::File(path) => format!("file:{}", path.display()),
        }
    }

    fn produce(&self) -> Result<Matrix> {
        match self {
            InputSource::Pattern {
                pattern,
                rows,
                cols,
                seed,
            } => {
                tracing::info!("Generating input data (pattern: {pattern})...");
                Ok(pattern.generate(*rows, *cols, *seed))
            }
            InputSource::File(path) => {
                tracing::info!("Loading input data from: {}", path.display());
                load_matrix(path)
            }
        }
    }
}

impl KernelSource {
    fn describe(&self) -> String {
        match self {
            KernelSource::Builtin(kind) => format!("kernel:{kind}"),
            KernelSource::File(path) => format!("file:{}", path.display()),
        }
    }

    fn produce(&self) -> Result<Matrix> {
        match self {
            KernelSource::Builtin(kind) => {
                tracing::info!("Generating kernel (type: {kind})...");
                Ok(kind.generate())
            }
            KernelSource::File(path) => {
                tracing::info!("Loading kernel from: {}", path.display());
                load_matrix(path)
            }
        }
    }
}

/// Produce the three testbench files in `config.output_dir`.
pub fn generate_test_files(config: &GenerateConfig) -> Result<Summary> {
    let out_dir = config.output_dir.as_path();
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    let input = config.input.produce()?;
    let input_file = out_dir.join(INPUT_FILE);
    write_matrix(&input_file, &input)?;

    let kernel = config.kernel.produce()?;
    let kernel_file = out_dir.join(KERNEL_FILE);
    write_matrix(&kernel_file, &kernel)?;
    tracing::info!("Kernel:\n{kernel}");

    tracing::info!("Generating expected output...");
    let expected = compute_expected(&input, &kernel, config.stride)?;
    let output_file = out_dir.join(OUTPUT_FILE);
    write_matrix(&output_file, &expected)?;

    let summary = Summary::new(
        config.input.describe(),
        config.kernel.describe(),
        config.stride,
        &input,
        &kernel,
        &expected,
        out_dir,
        vec![input_file, kernel_file, output_file],
    );
    if config.summary_json {
        let path = out_dir.join(SUMMARY_FILE);
        summary.write_json(&path)?;
        tracing::info!("Summary written to {}", path.display());
    }
    Ok(summary)
}

fn compute_expected(input: &Matrix, kernel: &Matrix, stride: usize) -> Result<Matrix> {
    tracing::info!("Computing convolution (this may take a moment)...");
    let model = ConvolutionReferenceModel::new(stride);
    let expected = model
        .compute_with_progress(input, kernel, |done, total| {
            if done % PROGRESS_EVERY == 0 {
                tracing::info!("  Processing output row {done}/{total}...");
            }
        })
        .context("reference convolution failed")?;
    tracing::info!("Convolution complete!");
    Ok(expected)
}
