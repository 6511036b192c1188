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

use crate::config::RuleConfig;
use crate::error::Result;
use crate::item::Item;
use crate::itemset::{FrequentItemsets, ItemSet, ItemsetCounts};
use crate::metrics::Metric;
use crate::rule::Rule;
use crate::vec_sets::difference;
use itertools::Itertools;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use std::cmp::Reverse;
use tracing::debug;

/// Derives every rule `A => I - A` from each frequent itemset `I` with at
/// least two items, for each non-empty proper subset `A`, and keeps those
/// whose `config.metric` is at least `config.min_threshold`.
///
/// Rules are ordered by decreasing metric, then decreasing support, then
/// by antecedent and consequent item ids.
pub fn generate_rules(itemsets: &FrequentItemsets, config: &RuleConfig) -> Result<Vec<Rule>> {
    config.validate()?;
    let itemset_counts = itemsets.counts();
    let num_transactions = itemsets.num_transactions();

    let per_itemset: Vec<Vec<Rule>> = itemsets
        .itemsets()
        .par_iter()
        .filter(|itemset| itemset.len() > 1)
        .map(|itemset| rules_for_itemset(itemset, &itemset_counts, num_transactions, config))
        .collect::<Result<Vec<Vec<Rule>>>>()?;

    let mut rules: Vec<Rule> = per_itemset.into_iter().flatten().collect();
    sort_rules(&mut rules, config.metric);
    debug!(
        rules = rules.len(),
        metric = %config.metric,
        min_threshold = config.min_threshold,
        "generated rules"
    );
    Ok(rules)
}

fn rules_for_itemset(
    itemset: &ItemSet,
    itemset_counts: &ItemsetCounts,
    num_transactions: u32,
    config: &RuleConfig,
) -> Result<Vec<Rule>> {
    let mut rules = vec![];
    for size in 1..itemset.len() {
        for antecedent in itemset.items.iter().cloned().combinations(size) {
            let consequent: Vec<Item> = difference(&itemset.items, &antecedent);
            let rule = Rule::make(antecedent, consequent, itemset_counts, num_transactions)?;
            if config.metric.of(&rule) >= config.min_threshold {
                rules.push(rule);
            }
        }
    }
    Ok(rules)
}

pub fn sort_rules(rules: &mut [Rule], metric: Metric) {
    rules.sort_by(|a, b| {
        Reverse(OrderedFloat(metric.of(a)))
            .cmp(&Reverse(OrderedFloat(metric.of(b))))
            .then_with(|| OrderedFloat(b.support()).cmp(&OrderedFloat(a.support())))
            .then_with(|| a.antecedent.cmp(&b.antecedent))
            .then_with(|| a.consequent.cmp(&b.consequent))
    });
}
