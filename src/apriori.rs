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

use crate::encoder::EncodedTransactions;
use crate::index::Index;
use crate::item::Item;
use crate::itemset::ItemSet;
use fnv::FnvHashSet;
use rayon::prelude::*;
use tracing::debug;

/// Level-wise frequent itemset mining. Returns every itemset contained in
/// at least `min_count` transactions.
pub fn apriori(encoded: &EncodedTransactions, min_count: u32) -> Vec<ItemSet> {
    let item_count = encoded.item_counts();
    let index = encoded.build_index();

    let mut itemsets: Vec<ItemSet> = item_count
        .items_with_count_at_least(min_count)
        .into_iter()
        .map(|item| ItemSet::new(vec![item], item_count.get(&item)))
        .collect();
    debug!(size = 1, frequent = itemsets.len(), "apriori level mined");

    // Frequent itemsets of the previous level, in lexicographic order.
    let mut level: Vec<Vec<Item>> = itemsets.iter().map(|i| i.items.clone()).collect();
    let mut size = 1;
    while !level.is_empty() {
        size += 1;
        let candidates = generate_candidates(&level);
        let counted = count_candidates(&index, candidates, min_count);
        debug!(size, frequent = counted.len(), "apriori level mined");

        level = counted.iter().map(|i| i.items.clone()).collect();
        itemsets.extend(counted);
    }

    itemsets
}

/// Joins pairs of itemsets sharing all but their last item, then drops any
/// candidate with an infrequent subset. `level` must be sorted, with every
/// itemset the same size and sorted internally.
fn generate_candidates(level: &[Vec<Item>]) -> Vec<Vec<Item>> {
    let frequent: FnvHashSet<&[Item]> = level.iter().map(|v| v.as_slice()).collect();
    let mut candidates = vec![];
    for (i, a) in level.iter().enumerate() {
        let prefix = &a[..a.len() - 1];
        for b in level[i + 1..].iter() {
            if &b[..b.len() - 1] != prefix {
                // Sorted order means no later itemset shares this prefix.
                break;
            }
            let mut candidate = a.clone();
            candidate.push(b[b.len() - 1]);
            if all_subsets_frequent(&candidate, &frequent) {
                candidates.push(candidate);
            }
        }
    }
    candidates
}

fn all_subsets_frequent(candidate: &[Item], frequent: &FnvHashSet<&[Item]>) -> bool {
    // The subsets dropping either of the last two items are the join's
    // parents, and are known frequent.
    let mut subset = Vec::with_capacity(candidate.len() - 1);
    (0..candidate.len().saturating_sub(2)).all(|skip| {
        subset.clear();
        subset.extend_from_slice(&candidate[..skip]);
        subset.extend_from_slice(&candidate[skip + 1..]);
        frequent.contains(subset.as_slice())
    })
}

fn count_candidates(index: &Index, candidates: Vec<Vec<Item>>, min_count: u32) -> Vec<ItemSet> {
    candidates
        .into_par_iter()
        .filter_map(|candidate| {
            let count = index.count(&candidate);
            if count >= min_count {
                Some(ItemSet::new(candidate, count))
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;

    fn items(ids: &[u32]) -> Vec<Item> {
        ids.iter().map(|&i| Item::with_id(i)).collect()
    }

    #[test]
    fn test_generate_candidates() {
        let level = vec![
            items(&[1, 2]),
            items(&[1, 3]),
            items(&[1, 4]),
            items(&[2, 3]),
            items(&[3, 4]),
        ];
        // {1,2,4} is pruned as {2,4} isn't frequent. {2,3,4} is never
        // joined as nothing else shares the prefix [2].
        assert_eq!(
            generate_candidates(&level),
            vec![items(&[1, 2, 3]), items(&[1, 3, 4])]
        );
    }

    #[test]
    fn test_apriori() {
        let encoded = encode(vec![
            vec!["A", "B"],
            vec!["A", "B", "C"],
            vec!["A"],
            vec!["B", "C"],
            vec!["A", "B", "C"],
        ]);
        let mut itemsets = apriori(&encoded, 2);
        itemsets.sort();
        let expected = vec![
            ItemSet::new(items(&[1]), 4),
            ItemSet::new(items(&[2]), 4),
            ItemSet::new(items(&[3]), 3),
            ItemSet::new(items(&[1, 2]), 3),
            ItemSet::new(items(&[1, 3]), 2),
            ItemSet::new(items(&[2, 3]), 3),
            ItemSet::new(items(&[1, 2, 3]), 2),
        ];
        assert_eq!(itemsets, expected);

        let mut itemsets = apriori(&encoded, 3);
        itemsets.sort();
        assert_eq!(
            itemsets,
            vec![
                ItemSet::new(items(&[1]), 4),
                ItemSet::new(items(&[2]), 4),
                ItemSet::new(items(&[3]), 3),
                ItemSet::new(items(&[1, 2]), 3),
                ItemSet::new(items(&[2, 3]), 3),
            ]
        );
    }
}
