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

//! Run configuration for mining and rule derivation.

use crate::error::{MiningError, Result};
use crate::metrics::Metric;
use std::fmt;
use std::str::FromStr;

/// Frequent itemset mining algorithm.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Level-wise candidate generation with downward closure pruning.
    #[default]
    Apriori,
    /// Recursive mining of conditional FPTrees.
    FpGrowth,
}

impl FromStr for Strategy {
    type Err = MiningError;

    fn from_str(s: &str) -> Result<Strategy> {
        match s {
            "apriori" | "level-wise" => Ok(Strategy::Apriori),
            "fpgrowth" | "fp-growth" | "tree" => Ok(Strategy::FpGrowth),
            _ => Err(MiningError::invalid_config(format!(
                "unknown algorithm '{}', expected 'apriori' or 'fpgrowth'",
                s
            ))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strategy::Apriori => write!(f, "apriori"),
            Strategy::FpGrowth => write!(f, "fpgrowth"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MiningConfig {
    /// Minimum itemset support, in (0,1]. Inclusive.
    pub min_support: f64,
    pub strategy: Strategy,
    /// Treat an empty transaction sequence as a configuration error
    /// instead of returning an empty collection.
    pub strict: bool,
}

impl Default for MiningConfig {
    fn default() -> Self {
        MiningConfig {
            min_support: 0.02,
            strategy: Strategy::Apriori,
            strict: false,
        }
    }
}

impl MiningConfig {
    pub fn new(min_support: f64, strategy: Strategy) -> MiningConfig {
        MiningConfig {
            min_support,
            strategy,
            strict: false,
        }
    }

    pub fn strict(mut self, strict: bool) -> MiningConfig {
        self.strict = strict;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_min_support(self.min_support)
    }
}

pub(crate) fn validate_min_support(min_support: f64) -> Result<()> {
    if !(min_support > 0.0 && min_support <= 1.0) {
        return Err(MiningError::invalid_config(format!(
            "minimum support must be in range (0,1], got {}",
            min_support
        )));
    }
    Ok(())
}

/// Transaction counts are `u32`, so larger inputs are rejected.
pub fn num_transactions(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        MiningError::invalid_config(format!(
            "{} transactions exceeds the supported maximum of {}",
            len,
            u32::MAX
        ))
    })
}

/// Smallest transaction count whose support `count / num_transactions` is
/// at least `min_support`. Computed against the same floating point
/// comparison used for reporting supports, so an itemset whose support is
/// exactly `min_support` is always retained.
pub fn min_count(min_support: f64, num_transactions: u32) -> u32 {
    let n = num_transactions as f64;
    let meets = |count: u32| count as f64 / n >= min_support;
    let mut count = (min_support * n).ceil().max(1.0) as u32;
    while count > 1 && meets(count - 1) {
        count -= 1;
    }
    while count <= num_transactions && !meets(count) {
        count += 1;
    }
    count
}

#[derive(Clone, Debug, PartialEq)]
pub struct RuleConfig {
    pub metric: Metric,
    /// Rules whose `metric` is below this are dropped. Inclusive.
    pub min_threshold: f64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        RuleConfig {
            metric: Metric::Lift,
            min_threshold: 1.1,
        }
    }
}

impl RuleConfig {
    pub fn new(metric: Metric, min_threshold: f64) -> RuleConfig {
        RuleConfig {
            metric,
            min_threshold,
        }
    }

    /// Builds a config from a metric name such as `"confidence"`.
    pub fn from_name(metric: &str, min_threshold: f64) -> Result<RuleConfig> {
        Ok(RuleConfig::new(metric.parse()?, min_threshold))
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_threshold.is_nan() {
            return Err(MiningError::invalid_config(
                "minimum metric threshold must be a number",
            ));
        }
        Ok(())
    }
}
