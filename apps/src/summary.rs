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
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use conv_refmodel::Matrix;
use serde::Serialize;

/// Statistics reported at the end of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub input_source: String,
    pub kernel_source: String,
    pub stride: usize,
    pub input_dims: (usize, usize),
    pub input_range: Option<(i16, i16)>,
    pub kernel_sum: i64,
    pub output_dims: (usize, usize),
    pub output_range: Option<(i16, i16)>,
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

fn range(m: &Matrix) -> Option<(i16, i16)> {
    Some((m.min()?, m.max()?))
}

fn fmt_range(r: Option<(i16, i16)>) -> String {
    match r {
        Some((lo, hi)) => format!("[{lo}, {hi}]"),
        None => "n/a".to_string(),
    }
}

impl Summary {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        input_source: String,
        kernel_source: String,
        stride: usize,
        input: &Matrix,
        kernel: &Matrix,
        output: &Matrix,
        output_dir: &Path,
        files: Vec<PathBuf>,
    ) -> Self {
        Self {
            input_source,
            kernel_source,
            stride,
            input_dims: input.dims(),
            input_range: range(input),
            kernel_sum: kernel.sum(),
            output_dims: output.dims(),
            output_range: range(output),
            output_dir: output_dir.to_path_buf(),
            files,
        }
    }

    pub fn log(&self) {
        tracing::info!("Generation summary");
        tracing::info!("Input data range: {}", fmt_range(self.input_range));
        tracing::info!("Kernel sum: {}", self.kernel_sum);
        tracing::info!("Expected output range: {}", fmt_range(self.output_range));
        tracing::info!("Output directory: {}", self.output_dir.display());
        for file in &self.files {
            tracing::info!("  - {}", file.display());
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize summary")?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_ranges_and_kernel_sum() {
        let input = Matrix::from_rows(&[[-3i16, 4], [9, 0]]).unwrap();
        let kernel = Matrix::from_rows(&[[1i16, 2, 1], [2, 4, 2], [1, 2, 1]]).unwrap();
        let output = Matrix::zeros(1, 0);
        let s = Summary::new(
            "pattern:simple".into(),
            "kernel:gaussian".into(),
            2,
            &input,
            &kernel,
            &output,
            Path::new("out"),
            vec![],
        );
        assert_eq!(s.input_range, Some((-3, 9)));
        assert_eq!(s.kernel_sum, 16);
        assert_eq!(s.output_range, None);
        assert_eq!(fmt_range(s.output_range), "n/a");
    }

    #[test]
    fn serializes_to_json() {
        let m = Matrix::from_rows(&[[1i16]]).unwrap();
        let s = Summary::new(
            "a".into(),
            "b".into(),
            1,
            &m,
            &m,
            &m,
            Path::new("d"),
            vec!["d/x.txt".into()],
        );
        let v: serde_json::Value = serde_json::to_value(&s).unwrap();
        assert_eq!(v["input_range"], serde_json::json!([1, 1]));
        assert_eq!(v["output_dims"], serde_json::json!([1, 1]));
        assert_eq!(v["files"], serde_json::json!(["d/x.txt"]));
    }
}
