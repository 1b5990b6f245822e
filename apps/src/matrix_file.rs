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
use std::path::Path;

use anyhow::{bail, Context, Result};
use conv_refmodel::Matrix;

/// Write `matrix` in the testbench layout (space separated, one row per line).
pub fn write_matrix(path: &Path, matrix: &Matrix) -> Result<()> {
    fs::write(path, matrix.to_string())
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("Written {}x{} values to {}", matrix.rows(), matrix.cols(), path.display());
    Ok(())
}

/// Load a matrix from disk. See [`parse_matrix`] for the accepted layouts.
pub fn load_matrix(path: &Path) -> Result<Matrix> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_matrix(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

/// Parse a matrix from text.
///
/// Supports a JSON array of rows, comma-separated rows, or the
/// whitespace-separated layout produced by [`write_matrix`]. Blank lines are
/// ignored.
pub fn parse_matrix(contents: &str) -> Result<Matrix> {
    let rows: Vec<Vec<i16>> = if contents.trim_start().starts_with('[') {
        tracing::debug!("Parsing JSON matrix");
        serde_json::from_str(contents).context("invalid JSON matrix")?
    } else if contents.contains(',') {
        tracing::debug!("Parsing comma-separated matrix");
        parse_rows(contents, comma_fields)?
    } else {
        parse_rows(contents, |line| line.split_whitespace().collect())?
    };

    if rows.is_empty() || rows[0].is_empty() {
        bail!("matrix is empty");
    }
    Ok(Matrix::from_rows(&rows)?)
}

/// Split one comma-separated row. A single trailing comma is allowed; any
/// other empty field is kept so that it fails to parse.
fn comma_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() > 1 && fields.last() == Some(&"") {
        fields.pop();
    }
    fields
}

fn parse_rows(contents: &str, split: impl Fn(&str) -> Vec<&str>) -> Result<Vec<Vec<i16>>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            split(line)
                .into_iter()
                .map(|s| {
                    s.parse::<i16>()
                        .with_context(|| format!("line {}: failed to parse number: '{}'", n + 1, s))
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect()
}
