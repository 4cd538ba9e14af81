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

//! Building and running benchmark binaries.
//!
//! Each repetition reconfigures the CMake project with a new link-shuffle
//! seed, rebuilds the target and captures its output. This averages out
//! code-layout effects across runs.

use crate::error::CliError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use std::process::Command;
use woid_bench::CapturedRun;

/// Largest link-shuffle seed handed to the build.
pub const MAX_SHUFFLE_SEED: u64 = 999_999;

/// Derives `reps` link-shuffle seeds from a master seed.
///
/// The same master seed always yields the same sequence.
pub fn shuffle_seeds(master_seed: u64, reps: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(master_seed);
    (0..reps)
        .map(|_| rng.gen_range(1..=MAX_SHUFFLE_SEED))
        .collect()
}

/// CMake build settings for the benchmark project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Project source directory.
    pub source_dir: PathBuf,
    /// Build directory.
    pub build_dir: PathBuf,
    /// `CMAKE_BUILD_TYPE`.
    pub build_type: String,
    /// Compiler family passed as `CC_SELECTION`.
    pub compiler: String,
    /// Parallel build jobs.
    pub jobs: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            build_dir: PathBuf::from("build"),
            build_type: "Release".to_string(),
            compiler: "clang".to_string(),
            jobs: 20,
        }
    }
}

impl BuildConfig {
    /// Arguments for the configure step with a given link-shuffle seed.
    pub fn configure_args(&self, seed: u64) -> Vec<String> {
        vec![
            "-S".to_string(),
            self.source_dir.display().to_string(),
            "-B".to_string(),
            self.build_dir.display().to_string(),
            format!("-DCMAKE_BUILD_TYPE={}", self.build_type),
            format!("-DCC_SELECTION={}", self.compiler),
            format!("-DSHUFFLE_SEED={}", seed),
        ]
    }

    /// Arguments for building a single target.
    pub fn build_args(&self, target: &str) -> Vec<String> {
        vec![
            "--build".to_string(),
            self.build_dir.display().to_string(),
            "--target".to_string(),
            target.to_string(),
            format!("-j{}", self.jobs),
        ]
    }

    /// Location of a built target.
    pub fn binary_path(&self, target: &str) -> PathBuf {
        self.build_dir.join(target)
    }

    /// Configures the project with a link-shuffle seed.
    pub fn configure(&self, seed: u64) -> Result<(), CliError> {
        tracing::info!(seed, build_dir = %self.build_dir.display(), "configuring");
        run_checked("cmake", &self.configure_args(seed))
    }

    /// Builds a target.
    pub fn build(&self, target: &str) -> Result<(), CliError> {
        tracing::info!(build_target = target, "building");
        run_checked("cmake", &self.build_args(target))
    }
}

/// Runs a program, streaming its output, and fails on a non-zero exit.
fn run_checked(program: &str, args: &[String]) -> Result<(), CliError> {
    let command = command_line(program, args);
    tracing::debug!(command = command.as_str(), "running");

    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| CliError::launch(program, e))?;

    if status.success() {
        Ok(())
    } else {
        Err(CliError::CommandFailed {
            command,
            status: status.code(),
        })
    }
}

/// Executes a benchmark binary and captures its output.
///
/// A non-zero exit is not an error here; it is recorded in the returned
/// run's status.
///
/// # Arguments
///
/// * `binary` - Path of the built benchmark
/// * `args` - Arguments forwarded to the benchmark
/// * `label` - Name of the run in reports, usually its seed
///
/// # Errors
///
/// Returns [`CliError::BinaryNotFound`] if `binary` is not a file, or
/// [`CliError::Launch`] if it cannot be started.
pub fn execute(binary: &Path, args: &[String], label: &str) -> Result<CapturedRun, CliError> {
    if !binary.is_file() {
        return Err(CliError::BinaryNotFound {
            path: binary.to_path_buf(),
        });
    }

    let program = binary.display().to_string();
    tracing::info!(command = command_line(&program, args).as_str(), "executing");

    let output = Command::new(binary)
        .args(args)
        .output()
        .map_err(|e| CliError::launch(&program, e))?;

    let run = CapturedRun::new(label, String::from_utf8_lossy(&output.stdout))
        .with_stderr(String::from_utf8_lossy(&output.stderr))
        .with_status(output.status.code());

    tracing::debug!(
        label,
        status = ?run.status,
        lines = run.lines().count(),
        "captured output"
    );
    Ok(run)
}

fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
