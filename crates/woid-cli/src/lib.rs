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

//! Woid CLI library.
//!
//! # Commands
//!
//! - **analyze**: compute speedups from files of captured benchmark output
//! - **run**: rebuild a CMake benchmark target under several link-shuffle
//!   seeds, execute it and analyze the pooled output
//! - **completion**: generate shell completion scripts
//!
//! Both analysis commands either print console tables (`--mode show`) or
//! write CSV and JSON results (`--mode save`).
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use woid_bench::{AnalysisConfig, OutputMode};
//! use woid_cli::commands::analyze;
//!
//! # fn main() -> Result<(), woid_cli::error::CliError> {
//! analyze(&[PathBuf::from("run.txt")], &AnalysisConfig::default(), OutputMode::Show)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod process;
