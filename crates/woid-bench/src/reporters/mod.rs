// Woid - type-erasure benchmark analysis
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Presentation of analysis results.
//!
//! Whether results are shown or saved is decided by the caller through an
//! explicit [`OutputMode`].
//!
//! # Modules
//!
//! - `console`: human-readable speedup tables
//! - `csv`: per-benchmark speedup tables and raw medians
//! - `json`: full machine-readable report

pub mod console;
pub mod csv;
pub mod json;

pub use console::{print_report, write_report};
pub use self::csv::{export_medians_csv, export_speedup_csv};
pub use json::export_json;

use crate::analysis::AnalysisReport;
use crate::config::{AnalysisConfig, ExportFormat};
use crate::error::{BenchError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

/// How analysis results are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Print tables to standard output.
    #[default]
    Show,
    /// Write files to the configured output directory.
    Save,
}

/// File stem used for a benchmark's saved results.
///
/// ```
/// use woid_bench::reporters::file_stem;
///
/// assert_eq!(file_stem("BM_Insert<std::any>"), "BM_Insert_std::any_");
/// ```
pub fn file_stem(benchmark: &str) -> String {
    benchmark
        .chars()
        .map(|c| match c {
            '<' | '>' | '/' | '\\' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

/// Returns `stem`, or `stem_2`, `stem_3`, ... if it is already taken.
///
/// Distinct benchmark names can map to the same [`file_stem`]; each gets
/// its own file.
fn claim_stem(stem: String, taken: &mut BTreeSet<String>) -> String {
    let unique = if taken.contains(&stem) {
        (2..)
            .map(|n| format!("{}_{}", stem, n))
            .find(|candidate| !taken.contains(candidate))
            .unwrap_or_default()
    } else {
        stem
    };
    taken.insert(unique.clone());
    unique
}

/// Presents a report in the given mode.
///
/// In [`OutputMode::Show`] the report is printed and no files are written.
/// In [`OutputMode::Save`] every enabled export format is written to the
/// configured output directory; the written paths are returned.
pub fn present(
    report: &AnalysisReport,
    config: &AnalysisConfig,
    mode: OutputMode,
) -> Result<Vec<PathBuf>> {
    match mode {
        OutputMode::Show => {
            print_report(report, config);
            Ok(Vec::new())
        }
        OutputMode::Save => save(report, config),
    }
}

fn save(report: &AnalysisReport, config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    let dir = &config.output_dir;
    fs::create_dir_all(dir).map_err(|e| BenchError::io_error(dir, e))?;

    let mut written = Vec::new();

    if config.has_format(ExportFormat::Csv) {
        let mut stems = BTreeSet::new();
        for comparison in report.comparisons.values() {
            if comparison.speedups.is_empty() {
                continue;
            }
            let base = file_stem(&comparison.benchmark);
            let stem = claim_stem(base.clone(), &mut stems);
            if stem != base {
                tracing::warn!(
                    benchmark = comparison.benchmark.as_str(),
                    stem = stem.as_str(),
                    "file name already used by another benchmark"
                );
            }
            let path = dir.join(format!("{}_speedup.csv", stem));
            export_speedup_csv(comparison, config, &path)?;
            tracing::info!(path = %path.display(), "speedup table saved");
            written.push(path);
        }

        let path = dir.join("medians.csv");
        export_medians_csv(report, &path)?;
        written.push(path);
    }

    if config.has_format(ExportFormat::Json) {
        let path = dir.join("report.json");
        export_json(report, &path)?;
        written.push(path);
    }

    if config.has_format(ExportFormat::Console) {
        print_report(report, config);
    }

    Ok(written)
}
