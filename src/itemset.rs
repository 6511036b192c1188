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
use crate::metrics;
use fnv::FnvHashMap;
use itertools::Itertools;
use ordered_float::OrderedFloat;
use std::cmp;

/// A set of items, kept sorted by item id, with the number of transactions
/// that contain all of them.
#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub struct ItemSet {
    pub items: Vec<Item>,
    pub count: u32,
}

impl Ord for ItemSet {
    fn cmp(&self, other: &ItemSet) -> cmp::Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.items.cmp(&other.items))
            .then_with(|| self.count.cmp(&other.count))
    }
}

impl PartialOrd for ItemSet {
    fn partial_cmp(&self, other: &ItemSet) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl ItemSet {
    pub fn new(items: Vec<Item>, count: u32) -> ItemSet {
        ItemSet {
            items: items.into_iter().sorted().dedup().collect(),
            count,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub type ItemsetCounts = FnvHashMap<Vec<Item>, u32>;

/// The output of a mining run: every itemset meeting the run's minimum
/// support, plus what is needed to interpret it afterwards.
#[derive(Clone, Debug)]
pub struct FrequentItemsets {
    itemsets: Vec<ItemSet>,
    num_transactions: u32,
    min_support: f64,
    itemizer: Itemizer,
    item_counts: Vec<u32>,
}

impl FrequentItemsets {
    /// Itemsets are put in canonical order: by size, then item ids.
    pub fn new(
        mut itemsets: Vec<ItemSet>,
        num_transactions: u32,
        min_support: f64,
        itemizer: Itemizer,
        item_counts: Vec<u32>,
    ) -> FrequentItemsets {
        itemsets.sort();
        FrequentItemsets {
            itemsets,
            num_transactions,
            min_support,
            itemizer,
            item_counts,
        }
    }

    pub fn empty(min_support: f64) -> FrequentItemsets {
        FrequentItemsets::new(vec![], 0, min_support, Itemizer::new(), vec![])
    }

    pub fn itemsets(&self) -> &[ItemSet] {
        &self.itemsets
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemSet> {
        self.itemsets.iter()
    }

    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    pub fn num_transactions(&self) -> u32 {
        self.num_transactions
    }

    pub fn min_support(&self) -> f64 {
        self.min_support
    }

    pub fn itemizer(&self) -> &Itemizer {
        &self.itemizer
    }

    pub fn support(&self, itemset: &ItemSet) -> f64 {
        metrics::support(itemset.count, self.num_transactions)
    }

    /// `(itemset, support)` pairs, in canonical order.
    pub fn supports(&self) -> Vec<(&ItemSet, f64)> {
        self.itemsets
            .iter()
            .map(|itemset| (itemset, self.support(itemset)))
            .collect()
    }

    pub fn labels(&self, itemset: &ItemSet) -> Vec<&str> {
        itemset
            .items
            .iter()
            .map(|&item| self.itemizer.str_of(item))
            .collect()
    }

    /// Support of `labels` taken as an itemset, if it is frequent.
    pub fn support_of(&self, labels: &[&str]) -> Option<f64> {
        let mut items = labels
            .iter()
            .map(|label| self.itemizer.get(label))
            .collect::<Option<Vec<Item>>>()?;
        items.sort();
        items.dedup();
        self.itemsets
            .binary_search_by(|candidate| {
                candidate
                    .len()
                    .cmp(&items.len())
                    .then_with(|| candidate.items.cmp(&items))
            })
            .ok()
            .map(|i| self.support(&self.itemsets[i]))
    }

    /// Support of every item seen in the input, frequent or not, highest
    /// first. Ties are broken by item id.
    pub fn item_supports(&self) -> Vec<(&str, f64)> {
        self.itemizer
            .items()
            .map(|item| {
                let count = self.item_counts.get(item.as_index()).cloned().unwrap_or(0);
                (item, metrics::support(count, self.num_transactions))
            })
            .sorted_by_key(|&(item, support)| (cmp::Reverse(OrderedFloat(support)), item))
            .map(|(item, support)| (self.itemizer.str_of(item), support))
            .collect()
    }

    pub fn counts(&self) -> ItemsetCounts {
        self.itemsets
            .iter()
            .map(|itemset| (itemset.items.clone(), itemset.count))
            .collect()
    }

    /// Checks that every (size - 1) subset of every itemset is present with
    /// a count at least as large, and that every count meets the threshold.
    pub fn check_downward_closure(&self) -> Result<()> {
        let counts = self.counts();
        let min_count = crate::config::min_count(self.min_support, self.num_transactions);
        for itemset in &self.itemsets {
            if itemset.count < min_count || itemset.count > self.num_transactions {
                return Err(MiningError::invariant(format!(
                    "itemset {:?} has count {} outside [{}, {}]",
                    itemset.items, itemset.count, min_count, self.num_transactions
                )));
            }
            if itemset.len() < 2 {
                continue;
            }
            for subset in itemset.items.iter().cloned().combinations(itemset.len() - 1) {
                match counts.get(&subset) {
                    Some(&count) if count >= itemset.count => {}
                    Some(&count) => {
                        return Err(MiningError::invariant(format!(
                            "subset {:?} has count {} below superset {:?} count {}",
                            subset, count, itemset.items, itemset.count
                        )))
                    }
                    None => {
                        return Err(MiningError::invariant(format!(
                            "subset {:?} of frequent itemset {:?} is missing",
                            subset, itemset.items
                        )))
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(ids: &[u32]) -> Vec<Item> {
        ids.iter().map(|&i| Item::with_id(i)).collect()
    }

    fn collection(itemsets: Vec<ItemSet>) -> FrequentItemsets {
        let mut itemizer = Itemizer::new();
        itemizer.to_id_vec(&["a", "b", "c"]);
        FrequentItemsets::new(itemsets, 4, 0.5, itemizer, vec![0, 4, 3, 2])
    }

    #[test]
    fn test_itemset_canonical() {
        let itemset = ItemSet::new(items(&[3, 1, 2, 1]), 7);
        assert_eq!(itemset.items, items(&[1, 2, 3]));
        assert!(ItemSet::new(items(&[5]), 1) < ItemSet::new(items(&[1, 2]), 1));
    }

    #[test]
    fn test_downward_closure() {
        let good = collection(vec![
            ItemSet::new(items(&[1, 2]), 2),
            ItemSet::new(items(&[1]), 4),
            ItemSet::new(items(&[2]), 3),
        ]);
        assert!(good.check_downward_closure().is_ok());
        assert_eq!(good.itemsets()[0].items, items(&[1]));
        assert_eq!(good.support_of(&["b", "a"]), Some(0.5));
        assert_eq!(good.support_of(&["c"]), None);
        assert_eq!(good.support_of(&["zz"]), None);

        let missing = collection(vec![
            ItemSet::new(items(&[1, 2]), 2),
            ItemSet::new(items(&[1]), 4),
        ]);
        match missing.check_downward_closure() {
            Err(MiningError::InternalInvariantViolation(_)) => {}
            other => panic!("expected invariant violation, got {:?}", other),
        }

        let inverted = collection(vec![
            ItemSet::new(items(&[1, 2]), 3),
            ItemSet::new(items(&[1]), 4),
            ItemSet::new(items(&[2]), 2),
        ]);
        assert!(inverted.check_downward_closure().is_err());
    }

    #[test]
    fn test_item_supports() {
        let frequent = collection(vec![ItemSet::new(items(&[1]), 4)]);
        assert_eq!(
            frequent.item_supports(),
            vec![("a", 1.0), ("b", 0.75), ("c", 0.5)]
        );
    }
}
