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

//! Structured error types for the woid CLI.
//!
//! All CLI operations return `Result<T, CliError>` for consistent error
//! reporting. Analysis errors from `woid-bench` convert automatically.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use woid_bench::BenchError;

/// The main error type for woid CLI operations.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (file read, write, or metadata access).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Capture file exceeds the configured size limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)")]
    FileTooLarge {
        /// The file path that exceeded the limit
        path: PathBuf,
        /// The actual file size in bytes
        actual: u64,
        /// The maximum allowed file size in bytes
        max: u64,
        /// The maximum allowed file size in MB (for display)
        max_mb: u64,
    },

    /// The benchmark binary was not produced by the build.
    #[error("Binary not found at path: {path}")]
    BinaryNotFound {
        /// Expected binary location
        path: PathBuf,
    },

    /// An external program could not be started.
    #[error("Failed to launch '{command}': {message}")]
    Launch {
        /// Program that failed to start
        command: String,
        /// The error message
        message: String,
    },

    /// An external program exited unsuccessfully.
    #[error("Command '{command}' failed ({})", describe_status(*.status))]
    CommandFailed {
        /// Full command line
        command: String,
        /// Exit code, `None` if terminated by a signal
        status: Option<i32>,
    },

    /// Analysis or export error.
    #[error(transparent)]
    Analysis(#[from] BenchError),

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn describe_status(status: Option<i32>) -> String {
    match status {
        Some(code) => format!("return code {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a file-too-large error.
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    /// Create a launch error for a program that could not be started.
    pub fn launch(command: impl Into<String>, source: io::Error) -> Self {
        Self::Launch {
            command: command.into(),
            message: source.to_string(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = CliError::io_error(
            "capture.txt",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("capture.txt"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_file_too_large_display() {
        let err = CliError::file_too_large("big.txt", 200_000_000, 100 * 1024 * 1024);
        let msg = err.to_string();
        assert!(msg.contains("200000000 bytes"));
        assert!(msg.contains("100 MB"));
    }

    #[test]
    fn test_command_failed_display() {
        let err = CliError::CommandFailed {
            command: "cmake --build build".to_string(),
            status: Some(2),
        };
        assert_eq!(
            err.to_string(),
            "Command 'cmake --build build' failed (return code 2)"
        );

        let err = CliError::CommandFailed {
            command: "build/CopyBench".to_string(),
            status: None,
        };
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_analysis_error_is_transparent() {
        let err: CliError = BenchError::invalid_config("baselines", "empty").into();
        assert_eq!(
            err.to_string(),
            "Invalid configuration parameter 'baselines': empty"
        );
    }
}
