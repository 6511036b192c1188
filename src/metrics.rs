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

//! Association metrics. All functions take supports in [0,1]; `ac` is the
//! support of the whole rule (antecedent and consequent together), `a` the
//! antecedent's and `c` the consequent's.

use crate::error::{MiningError, Result};
use crate::rule::Rule;
use std::fmt;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    Support,
    Confidence,
    Lift,
    Leverage,
    Conviction,
}

impl Metric {
    pub fn of(&self, rule: &Rule) -> f64 {
        match self {
            Metric::Support => rule.support(),
            Metric::Confidence => rule.confidence(),
            Metric::Lift => rule.lift(),
            Metric::Leverage => rule.leverage(),
            Metric::Conviction => rule.conviction(),
        }
    }
}

impl FromStr for Metric {
    type Err = MiningError;

    fn from_str(s: &str) -> Result<Metric> {
        match s {
            "support" => Ok(Metric::Support),
            "confidence" => Ok(Metric::Confidence),
            "lift" => Ok(Metric::Lift),
            "leverage" => Ok(Metric::Leverage),
            "conviction" => Ok(Metric::Conviction),
            _ => Err(MiningError::invalid_config(format!(
                "unknown metric '{}', expected one of support, confidence, lift, leverage, conviction",
                s
            ))),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Metric::Support => "support",
            Metric::Confidence => "confidence",
            Metric::Lift => "lift",
            Metric::Leverage => "leverage",
            Metric::Conviction => "conviction",
        };
        f.write_str(name)
    }
}

pub fn support(count: u32, num_transactions: u32) -> f64 {
    if num_transactions == 0 {
        return 0.0;
    }
    count as f64 / num_transactions as f64
}

pub fn confidence(ac: f64, a: f64) -> f64 {
    ac / a
}

pub fn lift(ac: f64, a: f64, c: f64) -> f64 {
    confidence(ac, a) / c
}

pub fn leverage(ac: f64, a: f64, c: f64) -> f64 {
    ac - a * c
}

/// (1 - c) / (1 - confidence).
///
/// A rule that is never violated (confidence of exactly 1) has infinite
/// conviction. When the consequent is present in every transaction the
/// ratio degenerates to 0/0; that case is also reported as infinite.
pub fn conviction(ac: f64, a: f64, c: f64) -> f64 {
    let confidence = confidence(ac, a);
    if c >= 1.0 || confidence >= 1.0 {
        return f64::INFINITY;
    }
    (1.0 - c) / (1.0 - confidence)
}
