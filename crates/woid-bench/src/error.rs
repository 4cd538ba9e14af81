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

//! Error types for woid benchmark analysis.
//!
//! Malformed benchmark output is never an error: unparseable lines are
//! dropped and irregular series become diagnostics on the report. The
//! variants here cover configuration mistakes and the I/O performed by
//! the reporters.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors that can occur while configuring or exporting an analysis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BenchError {
    /// The baseline policy matched no benchmark in the whole input.
    ///
    /// This usually means the policy was written for a different set of
    /// benchmark binaries than the one that produced the output.
    #[error("No baseline from policy {policy:?} matched any of {benchmarks} benchmark(s)")]
    NoBaselineMatched {
        /// The policy entries that were tried
        policy: Vec<String>,
        /// Number of benchmarks that were examined
        benchmarks: usize,
    },

    /// Invalid configuration parameter.
    #[error("Invalid configuration parameter '{parameter}': {reason}")]
    InvalidConfig {
        /// Parameter name
        parameter: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A series was constructed with inconsistent columns.
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    /// I/O operation failed while exporting or loading.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV export error.
    #[error("CSV error: {0}")]
    Csv(String),
}

impl BenchError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json(source.to_string())
    }
}

impl From<csv::Error> for BenchError {
    fn from(source: csv::Error) -> Self {
        Self::Csv(source.to_string())
    }
}
