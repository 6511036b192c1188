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

use crate::error::{MiningError, Result};
use crate::item::Item;
use crate::itemizer::Itemizer;
use crate::itemset::ItemsetCounts;
use crate::metrics;
use crate::vec_sets::union;
use std::hash::{Hash, Hasher};

/// An association rule `antecedent => consequent`. Both sides are sorted
/// and disjoint.
#[derive(Clone, Debug)]
pub struct Rule {
    pub antecedent: Vec<Item>,
    pub consequent: Vec<Item>,
    antecedent_support: f64,
    consequent_support: f64,
    support: f64,
    confidence: f64,
    lift: f64,
    leverage: f64,
    conviction: f64,
}

// Can't derive Eq as f64 doesn't satisfy Eq.
impl Eq for Rule {}

impl PartialEq for Rule {
    fn eq(&self, other: &Rule) -> bool {
        self.antecedent == other.antecedent && self.consequent == other.consequent
    }
}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.antecedent.hash(state);
        self.consequent.hash(state);
    }
}

impl Rule {
    /// Scores `antecedent => consequent` from the counts of frequent
    /// itemsets. Every side of a rule built from a frequent itemset is
    /// itself frequent, so a missing or zero count is a mining bug.
    pub fn make(
        antecedent: Vec<Item>,
        consequent: Vec<Item>,
        itemset_counts: &ItemsetCounts,
        num_transactions: u32,
    ) -> Result<Rule> {
        if antecedent.is_empty() || consequent.is_empty() {
            return Err(MiningError::invariant(
                "rule antecedent and consequent must be non-empty",
            ));
        }
        let ac = union(&antecedent, &consequent);
        if ac.len() != antecedent.len() + consequent.len() {
            return Err(MiningError::invariant(format!(
                "rule sides {:?} and {:?} overlap",
                antecedent, consequent
            )));
        }
        let support_of = |itemset: &Vec<Item>| -> Result<f64> {
            match itemset_counts.get(itemset) {
                Some(&count) if count > 0 => Ok(metrics::support(count, num_transactions)),
                _ => Err(MiningError::invariant(format!(
                    "itemset {:?} has no support but is part of a frequent itemset",
                    itemset
                ))),
            }
        };
        let ac_sup = support_of(&ac)?;
        let a_sup = support_of(&antecedent)?;
        let c_sup = support_of(&consequent)?;

        Ok(Rule {
            antecedent,
            consequent,
            antecedent_support: a_sup,
            consequent_support: c_sup,
            support: ac_sup,
            confidence: metrics::confidence(ac_sup, a_sup),
            lift: metrics::lift(ac_sup, a_sup, c_sup),
            leverage: metrics::leverage(ac_sup, a_sup, c_sup),
            conviction: metrics::conviction(ac_sup, a_sup, c_sup),
        })
    }

    pub fn to_string(&self, itemizer: &Itemizer) -> String {
        format!(
            "{} => {}",
            Item::item_vec_to_string(&self.antecedent, itemizer),
            Item::item_vec_to_string(&self.consequent, itemizer)
        )
    }

    pub fn antecedent_support(&self) -> f64 {
        self.antecedent_support
    }

    pub fn consequent_support(&self) -> f64 {
        self.consequent_support
    }

    pub fn support(&self) -> f64 {
        self.support
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn lift(&self) -> f64 {
        self.lift
    }

    pub fn leverage(&self) -> f64 {
        self.leverage
    }

    /// Infinite when the rule is never violated.
    pub fn conviction(&self) -> f64 {
        self.conviction
    }
}

#[cfg(test)]
mod tests {
    use super::Rule;
    use crate::error::MiningError;
    use crate::item::Item;
    use crate::itemizer::Itemizer;
    use crate::itemset::ItemsetCounts;

    fn items(ids: &[u32]) -> Vec<Item> {
        ids.iter().map(|&i| Item::with_id(i)).collect()
    }

    fn counts() -> ItemsetCounts {
        // [{A,B},{A,B,C},{A},{B,C},{A,B,C}]
        vec![
            (items(&[1]), 4),
            (items(&[2]), 4),
            (items(&[3]), 3),
            (items(&[1, 2]), 3),
            (items(&[1, 3]), 2),
            (items(&[2, 3]), 3),
            (items(&[1, 2, 3]), 2),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_make() {
        let rule = Rule::make(items(&[1, 2]), items(&[3]), &counts(), 5).unwrap();
        assert_eq!(rule.support(), 0.4);
        assert_eq!(rule.antecedent_support(), 0.6);
        assert_eq!(rule.consequent_support(), 0.6);
        assert!((rule.confidence() - 2.0 / 3.0).abs() < 1e-12);
        assert!((rule.lift() - 10.0 / 9.0).abs() < 1e-12);
        assert!((rule.leverage() - 0.04).abs() < 1e-12);
        assert!((rule.conviction() - 1.2).abs() < 1e-12);

        let rule = Rule::make(items(&[3]), items(&[2]), &counts(), 5).unwrap();
        assert_eq!(rule.confidence(), 1.0);
        assert_eq!(rule.conviction(), f64::INFINITY);

        let mut itemizer = Itemizer::new();
        itemizer.to_id_vec(&["A", "B", "C"]);
        let rule = Rule::make(items(&[1, 2]), items(&[3]), &counts(), 5).unwrap();
        assert_eq!(rule.to_string(&itemizer), "A B => C");
    }

    #[test]
    fn test_make_invariants() {
        let mut partial = counts();
        partial.remove(&items(&[1, 3]));
        match Rule::make(items(&[1]), items(&[3]), &partial, 5) {
            Err(MiningError::InternalInvariantViolation(_)) => {}
            other => panic!("expected invariant violation, got {:?}", other),
        }
        assert!(Rule::make(items(&[1]), items(&[1, 2]), &counts(), 5).is_err());
        assert!(Rule::make(vec![], items(&[1]), &counts(), 5).is_err());
    }
}
