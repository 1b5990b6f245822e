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

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use conv_refmodel::{InputPattern, KernelType, DEFAULT_STRIDE};

mod generate;
mod matrix_file;
mod summary;

use generate::{generate_test_files, GenerateConfig, InputSource, KernelSource};

/// Arguments for the convolution testbench file generator
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Input data pattern: gradient, checkerboard, random, sine or simple.
    #[clap(long, env, default_value_t = InputPattern::Simple)]
    input_pattern: InputPattern,
    /// Kernel type: sobel_x, sobel_y, gaussian, sharpen, edge, identity or simple.
    #[clap(long, env, default_value_t = KernelType::Simple)]
    kernel_type: KernelType,
    /// Directory that receives the generated files. Created if missing.
    #[clap(short, long, env, default_value = ".")]
    output_dir: PathBuf,
    /// Rows of generated input data (ignored with --input-file).
    #[clap(long, default_value_t = 224)]
    rows: usize,
    /// Columns of generated input data (ignored with --input-file).
    #[clap(long, default_value_t = 224)]
    cols: usize,
    /// Convolution stride.
    #[clap(short, long, default_value_t = DEFAULT_STRIDE)]
    stride: usize,
    /// Seed for the random input pattern.
    #[clap(long, env = "PATTERN_SEED", default_value_t = 0)]
    seed: u64,
    /// Load input data from a file (whitespace, comma or JSON rows).
    /// Takes precedence over --input-pattern.
    #[clap(long)]
    input_file: Option<PathBuf>,
    /// Load the kernel from a file. Takes precedence over --kernel-type.
    #[clap(long)]
    kernel_file: Option<PathBuf>,
    /// Also write summary.json next to the generated files.
    #[clap(long)]
    summary_json: bool,
}

impl Args {
    fn into_config(self) -> Result<GenerateConfig> {
        if self.rows == 0 || self.cols == 0 {
            bail!("--rows and --cols must be at least 1");
        }
        let input = match self.input_file {
            Some(path) => InputSource::File(path),
            None => InputSource::Pattern {
                pattern: self.input_pattern,
                rows: self.rows,
                cols: self.cols,
                seed: self.seed,
            },
        };
        let kernel = match self.kernel_file {
            Some(path) => KernelSource::File(path),
            None => KernelSource::Builtin(self.kernel_type),
        };
        Ok(GenerateConfig {
            input,
            kernel,
            stride: self.stride,
            output_dir: self.output_dir,
            summary_json: self.summary_json,
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment variables from {:?}", path),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => bail!("failed to load .env file: {}", e),
    }
    let args = Args::parse();
    let config = args.into_config()?;

    tracing::info!("Convolution testbench file generator");
    let summary = generate_test_files(&config)?;
    summary.log();
    tracing::info!("Test files generated successfully");

    Ok(())
}
