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

//! Centralized analysis configuration.
//!
//! Holds the baseline policy, display rules for variant labels, and export
//! settings. Configurations can be built in code or loaded from JSON:
//!
//! ```json
//! {
//!   "baselines": ["VShape", "std::any"],
//!   "label_strip": [", alignof(void*)"],
//!   "output_dir": "plots",
//!   "export_formats": ["csv", "json"]
//! }
//! ```

use crate::error::{BenchError, Result};
use crate::harness::{display_variant, BaselinePolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffixes removed from variant names when they are displayed.
pub const DEFAULT_LABEL_STRIP: &[&str] = &[", alignof(void*)"];

/// Export format options for saved results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Full report as JSON.
    Json,
    /// Per-benchmark speedup tables and raw medians as CSV.
    Csv,
    /// Console tables.
    Console,
}

/// Analysis configuration.
///
/// # Example
///
/// ```
/// use woid_bench::config::{AnalysisConfig, ExportFormat};
/// use woid_bench::harness::BaselinePolicy;
///
/// let config = AnalysisConfig::default()
///     .with_baselines(BaselinePolicy::new(["VShape"]).unwrap())
///     .with_export_format(ExportFormat::Json);
/// assert!(config.has_format(ExportFormat::Json));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Baseline candidates in priority order.
    pub baselines: BaselinePolicy,
    /// Substrings removed from variant names in labels.
    pub label_strip: Vec<String>,
    /// Directory that saved results are written to.
    pub output_dir: PathBuf,
    /// Formats written when results are saved.
    pub export_formats: Vec<ExportFormat>,
}

impl AnalysisConfig {
    /// Creates a configuration with the given baseline policy.
    pub fn new(baselines: BaselinePolicy) -> Self {
        Self {
            baselines,
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| BenchError::io_error(path, e))?;
        Self::from_json_str(&text)
    }

    /// Sets the baseline policy.
    pub fn with_baselines(mut self, baselines: BaselinePolicy) -> Self {
        self.baselines = baselines;
        self
    }

    /// Sets the label suffixes to strip.
    pub fn with_label_strip<I, S>(mut self, strip: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.label_strip = strip.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the output directory for saved results.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Adds an export format.
    pub fn with_export_format(mut self, format: ExportFormat) -> Self {
        if !self.export_formats.contains(&format) {
            self.export_formats.push(format);
        }
        self
    }

    /// Sets all export formats.
    pub fn with_export_formats(mut self, formats: Vec<ExportFormat>) -> Self {
        self.export_formats = formats;
        self
    }

    /// Returns whether a specific export format is enabled.
    pub fn has_format(&self, format: ExportFormat) -> bool {
        self.export_formats.contains(&format)
    }

    /// Display label for a variant name.
    pub fn variant_label(&self, name: &str) -> String {
        self.label_strip
            .iter()
            .filter(|s| !s.is_empty())
            .fold(display_variant(name).to_string(), |label, strip| {
                label.replace(strip.as_str(), "")
            })
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            baselines: BaselinePolicy::default(),
            label_strip: DEFAULT_LABEL_STRIP.iter().map(|s| s.to_string()).collect(),
            output_dir: PathBuf::from("."),
            export_formats: vec![ExportFormat::Csv, ExportFormat::Json],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.baselines, BaselinePolicy::default());
        assert!(config.has_format(ExportFormat::Csv));
        assert!(config.has_format(ExportFormat::Json));
        assert!(!config.has_format(ExportFormat::Console));
    }

    #[test]
    fn test_variant_label() {
        let config = AnalysisConfig::default();
        assert_eq!(
            config.variant_label("woid::Any<Big, alignof(void*)>"),
            "woid::Any<Big>"
        );
        assert_eq!(config.variant_label("std::any"), "std::any");
        assert_eq!(config.variant_label(crate::harness::UNNAMED_VARIANT), "(unnamed)");

        let plain = AnalysisConfig::default().with_label_strip(Vec::<String>::new());
        assert_eq!(
            plain.variant_label("woid::Any<Big, alignof(void*)>"),
            "woid::Any<Big, alignof(void*)>"
        );
    }

    #[test]
    fn test_from_json_partial() {
        let config = AnalysisConfig::from_json_str(r#"{"baselines": ["VShape"]}"#).unwrap();
        assert_eq!(config.baselines.candidates(), &["VShape"]);
        assert_eq!(config.label_strip, vec![", alignof(void*)".to_string()]);
    }

    #[test]
    fn test_from_json_rejects_bad_policy() {
        assert!(AnalysisConfig::from_json_str(r#"{"baselines": []}"#).is_err());
        assert!(AnalysisConfig::from_json_str(r#"{"baselines": ["VShape<int>"]}"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"baselines": ["std::function"], "export_formats": ["console"]}}"#
        )
        .unwrap();

        let config = AnalysisConfig::load(file.path()).unwrap();
        assert_eq!(config.baselines.candidates(), &["std::function"]);
        assert_eq!(config.export_formats, vec![ExportFormat::Console]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = AnalysisConfig::load(Path::new("/nonexistent/woid.json")).unwrap_err();
        assert!(matches!(err, BenchError::Io { .. }));
    }

    #[test]
    fn test_export_format_builders() {
        let config = AnalysisConfig::default()
            .with_export_formats(vec![ExportFormat::Json])
            .with_export_format(ExportFormat::Json)
            .with_output_dir("out");
        assert_eq!(config.export_formats, vec![ExportFormat::Json]);
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }
}
