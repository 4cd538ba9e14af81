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

//! Baseline variant resolution.
//!
//! Variant names often carry template arguments (`VShape<int>`,
//! `std::function<void()>`), so matching is done on the base identifier
//! only: everything before the first `<`.

use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};

/// Marker that starts a template-argument suffix in a variant name.
pub const TEMPLATE_MARKER: char = '<';

/// Reference implementations accepted as baselines, in priority order.
pub const DEFAULT_BASELINES: &[&str] = &[
    "std::any",
    "std::function",
    "std::move_only_function",
    "VShape",
    "ProxyTrivialShape",
];

/// Returns the variant name without its template-argument suffix.
///
/// ```
/// use woid_bench::harness::baseline::variant_base;
///
/// assert_eq!(variant_base("VShape<int>"), "VShape");
/// assert_eq!(variant_base("std::function"), "std::function");
/// ```
pub fn variant_base(name: &str) -> &str {
    name.split_once(TEMPLATE_MARKER)
        .map_or(name, |(base, _)| base)
}

/// Ordered list of variant identifiers that may serve as the baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct BaselinePolicy {
    candidates: Vec<String>,
}

impl BaselinePolicy {
    /// Creates a policy from candidates in priority order.
    ///
    /// Fails if the list is empty, or if any entry is empty or carries a
    /// template suffix (entries are matched against base identifiers).
    pub fn new<I, S>(candidates: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates: Vec<String> = candidates.into_iter().map(Into::into).collect();

        if candidates.is_empty() {
            return Err(BenchError::invalid_config(
                "baselines",
                "at least one baseline candidate is required",
            ));
        }
        if let Some(bad) = candidates
            .iter()
            .find(|c| c.trim().is_empty() || c.contains(TEMPLATE_MARKER))
        {
            return Err(BenchError::invalid_config(
                "baselines",
                format!("'{}' is not a base variant identifier", bad),
            ));
        }

        Ok(Self { candidates })
    }

    /// Candidates in priority order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Picks the baseline among the observed variant names.
    ///
    /// Candidates are tried in priority order; the first one whose base
    /// identifier matches an observed variant wins. If several observed
    /// variants share that base, the lexicographically smallest is chosen
    /// so the result does not depend on input order.
    pub fn resolve<'a, I>(&self, observed: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let observed: Vec<&'a str> = observed.into_iter().collect();

        self.candidates.iter().find_map(|candidate| {
            observed
                .iter()
                .copied()
                .filter(|name| variant_base(name) == candidate)
                .min()
        })
    }
}

impl Default for BaselinePolicy {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_BASELINES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for BaselinePolicy {
    type Error = BenchError;

    fn try_from(candidates: Vec<String>) -> Result<Self> {
        Self::new(candidates)
    }
}

impl From<BaselinePolicy> for Vec<String> {
    fn from(policy: BaselinePolicy) -> Self {
        policy.candidates
    }
}

/// Resolves the baseline for one benchmark's observed variants.
pub fn resolve_baseline<'a, I>(policy: &BaselinePolicy, observed: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    policy.resolve(observed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_base() {
        assert_eq!(variant_base("VShape<int>"), "VShape");
        assert_eq!(variant_base("woid::Any<Big, alignof(void*)>"), "woid::Any");
        assert_eq!(variant_base("Outer<Inner<int>>"), "Outer");
        assert_eq!(variant_base("std::any"), "std::any");
        assert_eq!(variant_base(""), "");
    }

    #[test]
    fn test_resolve_follows_policy_order() {
        let policy = BaselinePolicy::new(["std::any", "std::function"]).unwrap();
        let observed = ["std::function", "VShape<int>"];
        assert_eq!(policy.resolve(observed), Some("std::function"));
    }

    #[test]
    fn test_resolve_prefers_earlier_candidate() {
        let policy = BaselinePolicy::new(["std::any", "std::function"]).unwrap();
        let observed = ["std::function", "std::any", "woid::Any"];
        assert_eq!(policy.resolve(observed), Some("std::any"));
    }

    #[test]
    fn test_resolve_matches_template_suffix() {
        let policy = BaselinePolicy::new(["VShape"]).unwrap();
        assert_eq!(
            policy.resolve(["woid::Fun<8>", "VShape<int>"]),
            Some("VShape<int>")
        );
    }

    #[test]
    fn test_resolve_requires_exact_base() {
        let policy = BaselinePolicy::new(["VShape"]).unwrap();
        assert_eq!(policy.resolve(["VShapeFast", "VShape2<int>"]), None);
    }

    #[test]
    fn test_resolve_is_order_independent() {
        let policy = BaselinePolicy::new(["VShape"]).unwrap();
        let forward = policy.resolve(["VShape<long>", "VShape<int>"]);
        let backward = policy.resolve(["VShape<int>", "VShape<long>"]);
        assert_eq!(forward, Some("VShape<int>"));
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_resolve_none() {
        let policy = BaselinePolicy::default();
        assert_eq!(policy.resolve(["woid::Any", "woid::Fun"]), None);
        assert_eq!(policy.resolve(std::iter::empty()), None);
    }

    #[test]
    fn test_policy_validation() {
        assert!(BaselinePolicy::new(Vec::<String>::new()).is_err());
        assert!(BaselinePolicy::new(["std::any", ""]).is_err());
        assert!(BaselinePolicy::new(["VShape<int>"]).is_err());
    }

    #[test]
    fn test_default_policy() {
        let policy = BaselinePolicy::default();
        assert_eq!(policy.candidates().len(), DEFAULT_BASELINES.len());
        assert_eq!(policy.candidates()[0], "std::any");
    }

    #[test]
    fn test_policy_serde() {
        let policy: BaselinePolicy = serde_json::from_str(r#"["VShape", "std::any"]"#).unwrap();
        assert_eq!(policy.candidates(), &["VShape", "std::any"]);
        assert_eq!(
            serde_json::to_string(&policy).unwrap(),
            r#"["VShape","std::any"]"#
        );

        assert!(serde_json::from_str::<BaselinePolicy>("[]").is_err());
    }
}
