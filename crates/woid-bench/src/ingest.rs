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

//! Raw process results fed into the analysis.
//!
//! Each build-and-run cycle under a fresh link-shuffle seed yields one
//! [`CapturedRun`]. Only runs that exited successfully contribute
//! measurement lines.

use crate::harness::Diagnostic;
use serde::{Deserialize, Serialize};

/// Captured output of one benchmark process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedRun {
    /// Human-readable label, usually the link-shuffle seed.
    pub label: String,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Exit code; `None` if the process was killed by a signal.
    pub status: Option<i32>,
}

impl CapturedRun {
    /// Creates a successful run with the given standard output.
    pub fn new(label: impl Into<String>, stdout: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            stdout: stdout.into(),
            stderr: String::new(),
            status: Some(0),
        }
    }

    /// Sets the exit status.
    pub fn with_status(mut self, status: Option<i32>) -> Self {
        self.status = status;
        self
    }

    /// Sets the captured standard error.
    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    /// Returns true if the process exited with status 0.
    pub fn succeeded(&self) -> bool {
        self.status == Some(0)
    }

    /// Standard output split into lines, trailing whitespace removed.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.stdout.lines().map(str::trim_end)
    }
}

/// Concatenates the output lines of all successful runs.
///
/// Failed runs are reported as [`Diagnostic::FailedRun`] and contribute no
/// lines.
pub fn collect_lines<'a>(
    runs: &'a [CapturedRun],
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<&'a str> {
    let mut lines = Vec::new();

    for run in runs {
        if run.succeeded() {
            lines.extend(run.lines());
        } else {
            tracing::warn!(
                label = run.label.as_str(),
                status = ?run.status,
                "benchmark run failed, dropping its output"
            );
            diagnostics.push(Diagnostic::FailedRun {
                label: run.label.clone(),
                status: run.status,
            });
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_lines_skips_failed_runs() {
        let runs = vec![
            CapturedRun::new("seed 1", "BM_A<x>/1 1 ns\nnoise  \n"),
            CapturedRun::new("seed 2", "BM_A<x>/1 2 ns").with_status(Some(134)),
            CapturedRun::new("seed 3", "BM_A<x>/1 3 ns").with_status(None),
        ];
        let mut diagnostics = Vec::new();
        let lines = collect_lines(&runs, &mut diagnostics);

        assert_eq!(lines, vec!["BM_A<x>/1 1 ns", "noise"]);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(
            diagnostics[0],
            Diagnostic::FailedRun {
                label: "seed 2".to_string(),
                status: Some(134),
            }
        );
    }

    #[test]
    fn test_run_builders() {
        let run = CapturedRun::new("seed 9", "").with_stderr("boom");
        assert!(run.succeeded());
        assert_eq!(run.stderr, "boom");
    }
}
