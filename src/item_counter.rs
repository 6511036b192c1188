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

use crate::item::Item;
use std::cmp::Ordering;

/// Dense per-item counts, indexed by item id.
#[derive(Clone, Debug, Default)]
pub struct ItemCounter {
    counter: Vec<u32>,
}

impl ItemCounter {
    pub fn new() -> ItemCounter {
        ItemCounter { counter: vec![] }
    }

    pub fn from_transactions(transactions: &[Vec<Item>]) -> ItemCounter {
        let mut item_count = ItemCounter::new();
        for transaction in transactions {
            for item in transaction {
                item_count.add(item, 1);
            }
        }
        item_count
    }

    pub fn add(&mut self, item: &Item, count: u32) {
        let index = item.as_index();
        if self.counter.len() <= index {
            self.counter.resize(index + 1, 0);
        }
        self.counter[index] += count;
    }

    pub fn get(&self, item: &Item) -> u32 {
        self.counter.get(item.as_index()).cloned().unwrap_or(0)
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.counter
    }

    /// Items with count >= `min_count`, in ascending id order. The null
    /// item is never reported.
    pub fn items_with_count_at_least(&self, min_count: u32) -> Vec<Item> {
        (1..self.counter.len())
            .filter(|&i| self.counter[i] >= min_count && self.counter[i] > 0)
            .map(|i| Item::with_id(i as u32))
            .collect()
    }

    /// Orders by decreasing count, ties broken by increasing item id.
    pub fn cmp_descending(&self, a: &Item, b: &Item) -> Ordering {
        self.get(b).cmp(&self.get(a)).then_with(|| a.cmp(b))
    }

    pub fn sort_descending(&self, v: &mut [Item]) {
        v.sort_by(|a, b| self.cmp_descending(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::ItemCounter;
    use crate::item::Item;

    fn items(ids: &[u32]) -> Vec<Item> {
        ids.iter().map(|&i| Item::with_id(i)).collect()
    }

    #[test]
    fn test_item_counter() {
        let transactions = vec![items(&[1, 2]), items(&[1, 2, 3]), items(&[1]), items(&[4])];
        let counter = ItemCounter::from_transactions(&transactions);
        assert_eq!(counter.get(&Item::with_id(1)), 3);
        assert_eq!(counter.get(&Item::with_id(2)), 2);
        assert_eq!(counter.get(&Item::with_id(9)), 0);
        assert_eq!(counter.items_with_count_at_least(2), items(&[1, 2]));
        assert_eq!(counter.items_with_count_at_least(0), items(&[1, 2, 3, 4]));

        let mut v = items(&[4, 3, 2, 1]);
        counter.sort_descending(&mut v);
        assert_eq!(v, items(&[1, 2, 3, 4]));
    }
}
