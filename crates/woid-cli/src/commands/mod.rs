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

//! CLI command implementations

mod analyze;
mod completion;
mod run;

pub use analyze::analyze;
pub use completion::{completion, install_hint, parse_shell, write_completion};
pub use run::{run, RunOptions};

use crate::error::CliError;
use colored::Colorize;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use woid_bench::{present, AnalysisConfig, AnalysisReport, CapturedRun, OutputMode};

/// Default maximum capture file size (1 GB).
/// Can be overridden via the `WOID_MAX_CAPTURE_SIZE` environment variable.
pub const DEFAULT_MAX_CAPTURE_SIZE: u64 = 1024 * 1024 * 1024;

/// Number of capture files from which reading switches to the rayon pool.
pub const PARALLEL_READ_THRESHOLD: usize = 4;

fn get_max_capture_size() -> u64 {
    std::env::var("WOID_MAX_CAPTURE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_CAPTURE_SIZE)
}

/// Read a capture file from disk with size validation.
///
/// Files larger than the configured maximum are rejected before any
/// memory is allocated for them.
///
/// # Errors
///
/// Returns `Err` if the metadata cannot be read, the file is too large, or
/// the contents cannot be read as UTF-8.
pub fn read_file(path: &Path) -> Result<String, CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max_size = get_max_capture_size();
    if metadata.len() > max_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_size));
    }

    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Read capture files as successful runs, preserving the input order.
///
/// Each file is labelled with its path. Reading happens in parallel once
/// the number of files reaches [`PARALLEL_READ_THRESHOLD`].
///
/// # Arguments
///
/// * `paths` - Capture files, one per benchmark run
///
/// # Errors
///
/// Returns the first error of any file that cannot be read.
pub fn read_captures(paths: &[PathBuf]) -> Result<Vec<CapturedRun>, CliError> {
    let read_one = |path: &PathBuf| -> Result<CapturedRun, CliError> {
        let stdout = read_file(path)?;
        tracing::debug!(path = %path.display(), bytes = stdout.len(), "read capture");
        Ok(CapturedRun::new(path.display().to_string(), stdout))
    };

    if paths.len() < PARALLEL_READ_THRESHOLD {
        paths.iter().map(read_one).collect()
    } else {
        paths.par_iter().map(read_one).collect()
    }
}

/// Presents a finished report and checks that the baseline policy fit.
///
/// Results are presented before the policy check so that a report with no
/// reference implementation is still visible.
pub(crate) fn finish(
    report: &AnalysisReport,
    config: &AnalysisConfig,
    mode: OutputMode,
) -> Result<(), CliError> {
    let written = present(report, config, mode)?;
    for path in &written {
        eprintln!("{} {}", "Saved".green().bold(), path.display());
    }

    if let Err(e) = report.ensure_policy_matched() {
        tracing::error!(
            policy = ?report.policy,
            benchmarks = report.benchmark_count(),
            "baseline policy matched no benchmark"
        );
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn capture_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_file_missing() {
        let err = read_file(Path::new("/nonexistent/capture.txt")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn test_read_captures_preserves_order() {
        let files: Vec<NamedTempFile> = (0..6)
            .map(|i| capture_file(&format!("BM_A<x>/{} 1 ns\n", i + 1)))
            .collect();
        let paths: Vec<PathBuf> = files.iter().map(|f| f.path().to_path_buf()).collect();

        let runs = read_captures(&paths).unwrap();
        assert_eq!(runs.len(), 6);
        for (i, run) in runs.iter().enumerate() {
            assert_eq!(run.label, paths[i].display().to_string());
            assert!(run.succeeded());
            assert_eq!(run.stdout, format!("BM_A<x>/{} 1 ns\n", i + 1));
        }
    }

    #[test]
    fn test_read_captures_fails_on_any_missing() {
        let file = capture_file("BM_A<x>/1 1 ns\n");
        let paths = vec![file.path().to_path_buf(), PathBuf::from("/nonexistent/b.txt")];
        assert!(read_captures(&paths).is_err());
    }
}
