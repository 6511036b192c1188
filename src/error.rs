// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MiningError>;

/// Errors surfaced by a mining or rule generation run. A run that fails
/// returns no itemsets or rules at all.
///
/// Degenerate metric denominators (conviction when confidence or the
/// consequent support is exactly 1) are not errors; see `metrics::conviction`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MiningError {
    /// Bad thresholds, unknown metric or strategy names, or empty input in
    /// strict mode.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A downward closure or support consistency check failed. This is a
    /// bug in the miner, not a problem with the data.
    #[error("Internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

impl MiningError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InternalInvariantViolation(msg.into())
    }
}
