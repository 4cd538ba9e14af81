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

//! Analyze command - speedups from previously captured benchmark output

use super::{finish, read_captures};
use crate::error::CliError;
use std::path::PathBuf;
use woid_bench::{AnalysisConfig, Analyzer, OutputMode};

/// Analyze one or more files of captured benchmark output.
///
/// All files are treated as repetitions of the same benchmark binary: their
/// lines are pooled before medians are taken.
///
/// # Errors
///
/// Returns `Err` if no files are given, a file cannot be read, saving fails,
/// or the baseline policy matches none of the benchmarks found.
pub fn analyze(
    files: &[PathBuf],
    config: &AnalysisConfig,
    mode: OutputMode,
) -> Result<(), CliError> {
    if files.is_empty() {
        return Err(CliError::invalid_input("no capture files given"));
    }

    let runs = read_captures(files)?;
    let report = Analyzer::new(config.baselines.clone()).analyze_runs(&runs);
    tracing::info!(
        files = files.len(),
        records = report.record_count,
        benchmarks = report.benchmark_count(),
        "analysis complete"
    );

    finish(&report, config, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use woid_bench::{BaselinePolicy, ExportFormat};

    #[test]
    fn test_analyze_requires_files() {
        let err = analyze(&[], &AnalysisConfig::default(), OutputMode::Show).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }

    #[test]
    fn test_analyze_saves_results() {
        let dir = TempDir::new().unwrap();
        let capture = dir.path().join("run.txt");
        fs::write(
            &capture,
            "BM_Copy<std::any>/8   100 ns   100 ns  1000\n\
             BM_Copy<woid::Any>/8   50 ns    50 ns  1000\n",
        )
        .unwrap();

        let out = dir.path().join("out");
        let config = AnalysisConfig::default()
            .with_output_dir(&out)
            .with_export_formats(vec![ExportFormat::Csv]);
        analyze(&[capture], &config, OutputMode::Save).unwrap();

        assert!(out.join("BM_Copy_speedup.csv").exists());
        assert!(out.join("medians.csv").exists());
        assert!(!out.join("report.json").exists());
    }

    #[test]
    fn test_analyze_unmatched_policy() {
        let dir = TempDir::new().unwrap();
        let capture = dir.path().join("run.txt");
        fs::write(&capture, "BM_Copy<woid::Any>/8 50 ns\n").unwrap();

        let config = AnalysisConfig::new(BaselinePolicy::new(["VShape"]).unwrap())
            .with_output_dir(dir.path())
            .with_export_formats(vec![ExportFormat::Json]);
        let err = analyze(&[capture], &config, OutputMode::Save).unwrap_err();
        assert!(matches!(err, CliError::Analysis(_)));
        assert!(dir.path().join("report.json").exists());
    }
}
