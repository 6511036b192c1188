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

use crate::index::Index;
use crate::item::Item;
use crate::item_counter::ItemCounter;
use crate::itemizer::Itemizer;

/// Transactions with their labels replaced by `Item` ids. Each transaction
/// is sorted by id and duplicate free.
#[derive(Clone, Debug, Default)]
pub struct EncodedTransactions {
    pub itemizer: Itemizer,
    pub transactions: Vec<Vec<Item>>,
}

impl EncodedTransactions {
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn num_items(&self) -> usize {
        self.itemizer.len()
    }

    pub fn item_counts(&self) -> ItemCounter {
        ItemCounter::from_transactions(&self.transactions)
    }

    /// Bit-packed occurrence matrix over these transactions.
    pub fn build_index(&self) -> Index {
        let mut index = Index::new();
        for transaction in &self.transactions {
            index.insert(transaction);
        }
        index
    }
}

/// Assigns item ids in first-seen order. Empty transactions are kept, and
/// count toward the support denominator.
pub fn encode<I, T, S>(transactions: I) -> EncodedTransactions
where
    I: IntoIterator<Item = T>,
    T: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut itemizer = Itemizer::new();
    let transactions = transactions
        .into_iter()
        .map(|transaction| {
            let mut items: Vec<Item> = transaction
                .into_iter()
                .map(|label| itemizer.id_of(label.as_ref()))
                .collect();
            // Some input sources have transactions with duplicate items.
            items.sort();
            items.dedup();
            items
        })
        .collect();
    EncodedTransactions {
        itemizer,
        transactions,
    }
}
