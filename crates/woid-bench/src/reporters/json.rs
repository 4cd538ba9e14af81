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

//! JSON export for analysis reports.

use crate::analysis::AnalysisReport;
use crate::error::{BenchError, Result};
use std::fs;
use std::path::Path;

/// Exports the full analysis report as pretty-printed JSON.
///
/// NaN speedups are written as `null`.
pub fn export_json(report: &AnalysisReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).map_err(|e| BenchError::io_error(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::harness::BaselinePolicy;
    use tempfile::NamedTempFile;

    #[test]
    fn test_export_json() {
        let report = analyze(
            ["BM_Call<VShape>/8 40 ns", "BM_Call<woid::Fun>/8 20 ns"],
            &BaselinePolicy::default(),
        );
        let temp = NamedTempFile::new().unwrap();

        export_json(&report, temp.path()).unwrap();

        let content = fs::read_to_string(temp.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["comparisons"]["BM_Call"]["baseline"], "VShape");
        assert_eq!(value["grouped"]["BM_Call"]["woid::Fun"]["times"][0], 20.0);
    }
}
