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

const WORD_BITS: usize = 64;

/// Bit-packed occurrence matrix. Each item id owns a column bitset with
/// one bit per transaction id.
#[derive(Clone, Debug, Default)]
pub struct Index {
    columns: Vec<Vec<u64>>,
    transaction_count: usize,
}

impl Index {
    pub fn new() -> Index {
        Index::default()
    }

    pub fn insert(&mut self, transaction: &[Item]) {
        let tid = self.transaction_count;
        self.transaction_count += 1;
        let (word, bit) = (tid / WORD_BITS, tid % WORD_BITS);
        for item in transaction {
            let index = item.as_index();
            if self.columns.len() <= index {
                self.columns.resize(index + 1, vec![]);
            }
            let column = &mut self.columns[index];
            if column.len() <= word {
                column.resize(word + 1, 0);
            }
            column[word] |= 1 << bit;
        }
    }

    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }

    /// Number of transactions containing every item in `itemset`.
    pub fn count(&self, itemset: &[Item]) -> u32 {
        if itemset.is_empty() {
            return 0;
        }
        let mut columns = Vec::with_capacity(itemset.len());
        for item in itemset {
            match self.columns.get(item.as_index()) {
                Some(column) if !column.is_empty() => columns.push(column),
                _ => return 0,
            }
        }
        // Columns are only as long as the last transaction that set a bit
        // in them, so the shortest column bounds the intersection.
        let words = columns.iter().map(|c| c.len()).min().unwrap_or(0);
        (0..words)
            .map(|w| {
                columns
                    .iter()
                    .fold(!0u64, |acc, column| acc & column[w])
                    .count_ones()
            })
            .sum()
    }

    pub fn support(&self, itemset: &[Item]) -> f64 {
        if self.transaction_count == 0 {
            return 0.0;
        }
        self.count(itemset) as f64 / self.transaction_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::Index;
    use crate::itemizer::Itemizer;

    #[test]
    fn test_index() {
        let mut index = Index::new();
        let transactions = vec![
            vec!["a", "b", "c", "d", "e", "f"],
            vec!["g", "h", "i", "j", "k", "l"],
            vec!["z", "x"],
            vec!["z", "x"],
            vec!["z", "x", "y"],
            vec!["z", "x", "y", "i"],
        ];
        let mut itemizer: Itemizer = Itemizer::new();
        for line in &transactions {
            let mut transaction = itemizer.to_id_vec(line);
            transaction.sort();
            index.insert(&transaction);
        }

        for single in &["a", "b", "c", "d", "e", "f", "h", "j", "k", "l"] {
            assert_eq!(index.support(&[itemizer.id_of(single)]), 1.0 / 6.0);
        }
        assert_eq!(index.support(&[itemizer.id_of("i")]), 2.0 / 6.0);
        assert_eq!(index.support(&[itemizer.id_of("z")]), 4.0 / 6.0);
        assert_eq!(index.support(&[itemizer.id_of("x")]), 4.0 / 6.0);
        assert_eq!(index.support(&[itemizer.id_of("y")]), 2.0 / 6.0);
        assert_eq!(
            index.support(&[itemizer.id_of("z"), itemizer.id_of("x")]),
            4.0 / 6.0
        );
        assert_eq!(
            index.support(&[itemizer.id_of("z"), itemizer.id_of("x"), itemizer.id_of("y")]),
            2.0 / 6.0
        );
        assert_eq!(index.count(&[itemizer.id_of("a"), itemizer.id_of("z")]), 0);
        assert_eq!(index.count(&[]), 0);
    }

    #[test]
    fn test_index_spans_words() {
        let mut itemizer = Itemizer::new();
        let mut index = Index::new();
        for tid in 0..200 {
            let mut transaction = vec![itemizer.id_of("all")];
            if tid % 3 == 0 {
                transaction.push(itemizer.id_of("third"));
            }
            if tid >= 150 {
                transaction.push(itemizer.id_of("tail"));
            }
            index.insert(&transaction);
        }
        let all = itemizer.id_of("all");
        let third = itemizer.id_of("third");
        let tail = itemizer.id_of("tail");
        assert_eq!(index.count(&[all]), 200);
        assert_eq!(index.count(&[all, third]), 67);
        assert_eq!(index.count(&[third, tail]), 17);
        assert_eq!(index.transaction_count(), 200);
    }
}
