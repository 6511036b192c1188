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
use crate::item::Item;
use crate::item_counter::ItemCounter;
use crate::itemset::ItemSet;
use itertools::Itertools;
use rayon::prelude::*;
use tracing::debug;

const ROOT: usize = 0;

#[derive(Debug)]
struct FPNode {
    item: Item,
    count: u32,
    children: Vec<usize>,
    parent: usize,
}

impl FPNode {
    fn new(item: Item, parent: usize) -> FPNode {
        FPNode {
            item,
            count: 0,
            children: Vec::with_capacity(1),
            parent,
        }
    }

    fn is_root(&self) -> bool {
        self.item.is_null()
    }
}

/// Prefix tree over transactions. Nodes live in an arena and refer to each
/// other by index; `item_lists` is the header table, holding the ids of
/// every node carrying each item in insertion order.
pub struct FPTree {
    nodes: Vec<FPNode>,
    item_count: ItemCounter,
    item_lists: Vec<Vec<usize>>,
}

impl Default for FPTree {
    fn default() -> Self {
        FPTree::new()
    }
}

impl FPTree {
    pub fn new() -> FPTree {
        FPTree {
            nodes: vec![FPNode::new(Item::null(), ROOT)],
            item_count: ItemCounter::new(),
            item_lists: Vec::new(),
        }
    }

    fn add_node(&mut self, parent: usize, item: Item) -> usize {
        let id = self.nodes.len();
        self.nodes.push(FPNode::new(item, parent));
        self.nodes[parent].children.push(id);
        let index = item.as_index();
        if index >= self.item_lists.len() {
            self.item_lists.resize(index + 1, vec![]);
        }
        self.item_lists[index].push(id);
        id
    }

    fn child_of(&self, id: usize, item: Item) -> Option<usize> {
        self.nodes[id]
            .children
            .iter()
            .cloned()
            .find(|&child| self.nodes[child].item == item)
    }

    /// Adds `transaction` with weight `count`. Items must arrive in the
    /// tree's item order for prefixes to be shared.
    pub fn insert(&mut self, transaction: &[Item], count: u32) {
        let mut id = ROOT;
        for &item in transaction {
            // Keep a count of item frequencies of what's in the
            // tree to make sorting later easier.
            self.item_count.add(&item, count);
            id = match self.child_of(id, item) {
                Some(child) => child,
                None => self.add_node(id, item),
            };
            self.nodes[id].count += count;
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn item_count(&self) -> &ItemCounter {
        &self.item_count
    }

    fn path_from_root_to_excluding(&self, node_id: usize) -> Vec<Item> {
        let mut path = vec![];
        let mut id = self.nodes[node_id].parent;
        while !self.nodes[id].is_root() {
            path.push(self.nodes[id].item);
            id = self.nodes[id].parent;
        }
        path.reverse();
        path
    }

    /// The prefix paths leading to each node carrying `item`, each weighted
    /// by that node's count.
    pub fn conditional_pattern_base(&self, item: Item) -> Vec<(Vec<Item>, u32)> {
        match self.item_lists.get(item.as_index()) {
            Some(item_list) => item_list
                .iter()
                .map(|&node_id| {
                    (
                        self.path_from_root_to_excluding(node_id),
                        self.nodes[node_id].count,
                    )
                })
                .collect(),
            None => vec![],
        }
    }

    /// Tree over `item`'s conditional pattern base, keeping only the items
    /// that are frequent within that base.
    pub fn construct_conditional_tree(&self, item: Item, min_count: u32) -> FPTree {
        let pattern_base = self.conditional_pattern_base(item);
        let mut base_count = ItemCounter::new();
        for (path, count) in &pattern_base {
            for item in path {
                base_count.add(item, *count);
            }
        }
        let mut conditional_tree = FPTree::new();
        for (path, count) in pattern_base {
            let path: Vec<Item> = path
                .into_iter()
                .filter(|item| base_count.get(item) >= min_count)
                .collect();
            if !path.is_empty() {
                conditional_tree.insert(&path, count);
            }
        }
        conditional_tree
    }

    /// If the tree is a single chain from the root, the chain's items with
    /// their node counts, top down.
    pub fn single_path(&self) -> Option<Vec<(Item, u32)>> {
        let mut path = vec![];
        let mut id = ROOT;
        loop {
            match self.nodes[id].children.as_slice() {
                [] => return Some(path),
                [child] => {
                    id = *child;
                    path.push((self.nodes[id].item, self.nodes[id].count));
                }
                _ => return None,
            }
        }
    }
}

/// Builds the initial tree from transactions, dropping items below
/// `min_count` and ordering the rest by decreasing support.
pub fn build_tree(encoded: &EncodedTransactions, min_count: u32) -> FPTree {
    let item_count = encoded.item_counts();
    let mut tree = FPTree::new();
    for transaction in &encoded.transactions {
        let mut items: Vec<Item> = transaction
            .iter()
            .cloned()
            .filter(|item| item_count.get(item) >= min_count)
            .collect();
        if items.is_empty() {
            continue;
        }
        item_count.sort_descending(&mut items);
        tree.insert(&items, 1);
    }
    tree
}

pub fn fpgrowth(encoded: &EncodedTransactions, min_count: u32) -> Vec<ItemSet> {
    let fptree = build_tree(encoded, min_count);
    debug!(nodes = fptree.num_nodes(), "built initial FPTree");
    fp_growth(&fptree, min_count, &[])
}

/// Mines `fptree`, where every itemset found is extended with `path`, the
/// suffix accumulated by the enclosing calls.
pub fn fp_growth(fptree: &FPTree, min_count: u32, path: &[Item]) -> Vec<ItemSet> {
    if let Some(single_path) = fptree.single_path() {
        return mine_single_path(&single_path, min_count, path);
    }

    // Items in the tree above the minimum support threshold, least
    // frequent first.
    let mut items: Vec<Item> = fptree.item_count().items_with_count_at_least(min_count);
    fptree.item_count().sort_descending(&mut items);
    items.reverse();

    items
        .par_iter()
        .flat_map_iter(|&item| -> Vec<ItemSet> {
            let mut itemset: Vec<Item> = Vec::from(path);
            itemset.push(item);

            let conditional_tree = fptree.construct_conditional_tree(item, min_count);
            let mut result = fp_growth(&conditional_tree, min_count, &itemset);

            result.push(ItemSet::new(itemset, fptree.item_count().get(&item)));
            result
        })
        .collect()
}

// Every non-empty combination of the chain's nodes is frequent. Counts
// never increase going down a chain, so a combination's count is that of
// its deepest node.
fn mine_single_path(single_path: &[(Item, u32)], min_count: u32, path: &[Item]) -> Vec<ItemSet> {
    let nodes: Vec<&(Item, u32)> = single_path
        .iter()
        .filter(|&&(_, count)| count >= min_count)
        .collect();
    (1..=nodes.len())
        .flat_map(|size| nodes.iter().combinations(size))
        .map(|combination| {
            let count = combination.iter().map(|node| node.1).min().unwrap_or(0);
            let items = path
                .iter()
                .cloned()
                .chain(combination.iter().map(|node| node.0))
                .collect();
            ItemSet::new(items, count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apriori::apriori;
    use crate::encoder::encode;

    fn items(ids: &[u32]) -> Vec<Item> {
        ids.iter().map(|&i| Item::with_id(i)).collect()
    }

    #[test]
    fn test_insert_shares_prefixes() {
        let mut tree = FPTree::new();
        tree.insert(&items(&[1, 2, 3]), 1);
        tree.insert(&items(&[1, 2]), 1);
        tree.insert(&items(&[1, 4]), 2);
        assert_eq!(tree.num_nodes(), 4);
        assert_eq!(tree.item_count().get(&Item::with_id(1)), 4);
        assert_eq!(tree.item_count().get(&Item::with_id(2)), 2);
        assert_eq!(tree.single_path(), None);

        assert_eq!(
            tree.conditional_pattern_base(Item::with_id(3)),
            vec![(items(&[1, 2]), 1)]
        );
        assert_eq!(
            tree.conditional_pattern_base(Item::with_id(4)),
            vec![(items(&[1]), 2)]
        );
        assert!(tree.conditional_pattern_base(Item::with_id(9)).is_empty());
    }

    #[test]
    fn test_conditional_tree() {
        let mut tree = FPTree::new();
        tree.insert(&items(&[1, 2, 5]), 2);
        tree.insert(&items(&[1, 3, 5]), 1);
        tree.insert(&items(&[2, 5]), 1);

        // Base for 5 is {1,2}:2, {1,3}:1, {2}:1; 3 is infrequent at 2.
        let conditional = tree.construct_conditional_tree(Item::with_id(5), 2);
        assert_eq!(conditional.item_count().get(&Item::with_id(1)), 3);
        assert_eq!(conditional.item_count().get(&Item::with_id(2)), 3);
        assert_eq!(conditional.item_count().get(&Item::with_id(3)), 0);
        assert_eq!(conditional.num_nodes(), 3);
    }

    #[test]
    fn test_single_path() {
        let mut tree = FPTree::new();
        tree.insert(&items(&[1, 2, 3]), 3);
        tree.insert(&items(&[1, 2]), 1);
        assert_eq!(
            tree.single_path(),
            Some(vec![
                (Item::with_id(1), 4),
                (Item::with_id(2), 4),
                (Item::with_id(3), 3),
            ])
        );

        let mut itemsets = fp_growth(&tree, 1, &items(&[9]));
        itemsets.sort();
        assert_eq!(
            itemsets,
            vec![
                ItemSet::new(items(&[1, 9]), 4),
                ItemSet::new(items(&[2, 9]), 4),
                ItemSet::new(items(&[3, 9]), 3),
                ItemSet::new(items(&[1, 2, 9]), 4),
                ItemSet::new(items(&[1, 3, 9]), 3),
                ItemSet::new(items(&[2, 3, 9]), 3),
                ItemSet::new(items(&[1, 2, 3, 9]), 3),
            ]
        );
        assert!(FPTree::new().single_path().unwrap().is_empty());
    }

    #[test]
    fn test_fpgrowth() {
        // HARM's census2.csv test dataset.
        let encoded = encode(vec![
            vec!["a", "b", "c"],
            vec!["d", "b", "c"],
            vec!["a", "b", "e"],
            vec!["f", "g", "c"],
            vec!["d", "g", "e"],
            vec!["f", "b", "c"],
            vec!["f", "b", "c"],
            vec!["a", "b", "e"],
            vec!["a", "b", "c"],
            vec!["a", "b", "e"],
            vec!["a", "b", "e"],
        ]);
        let mut itemizer = encoded.itemizer.clone();

        // Frequent itemsets generated by HARM with -minsup 0.05.
        let expected: Vec<Vec<Item>> = [
            vec!["a"],
            vec!["a", "b"],
            vec!["b"],
            vec!["c"],
            vec!["b", "c"],
            vec!["a", "c"],
            vec!["a", "b", "c"],
            vec!["d"],
            vec!["b", "d"],
            vec!["c", "d"],
            vec!["b", "c", "d"],
            vec!["d", "e"],
            vec!["e"],
            vec!["b", "e"],
            vec!["a", "e"],
            vec!["a", "b", "e"],
            vec!["f"],
            vec!["c", "f"],
            vec!["b", "f"],
            vec!["b", "c", "f"],
            vec!["g"],
            vec!["c", "g"],
            vec!["d", "g"],
            vec!["d", "e", "g"],
            vec!["e", "g"],
            vec!["f", "g"],
            vec!["c", "f", "g"],
        ]
        .iter()
        .map(|s| itemizer.to_id_vec(s).into_iter().sorted().collect())
        .sorted_by_key(|v: &Vec<Item>| (v.len(), v.clone()))
        .collect();

        let mut fp_itemsets = fpgrowth(&encoded, 1);
        fp_itemsets.sort();
        let mined: Vec<Vec<Item>> = fp_itemsets.iter().map(|i| i.items.clone()).collect();
        assert_eq!(mined, expected);

        let mut apriori_itemsets = apriori(&encoded, 1);
        apriori_itemsets.sort();
        assert_eq!(fp_itemsets, apriori_itemsets);

        for min_count in 2..6 {
            let mut fp_itemsets = fpgrowth(&encoded, min_count);
            let mut apriori_itemsets = apriori(&encoded, min_count);
            fp_itemsets.sort();
            apriori_itemsets.sort();
            assert_eq!(fp_itemsets, apriori_itemsets);
        }
    }
}
