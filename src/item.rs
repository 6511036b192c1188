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

use crate::itemizer::Itemizer;

/// Ordinal handle for an item label. Ids are assigned by the `Itemizer` in
/// first-seen order starting at 1; id 0 is reserved for the FPTree root.
#[derive(Copy, Clone, Hash, PartialOrd, PartialEq, Eq, Ord, Debug, Default)]
pub struct Item {
    id: u32,
}

impl Item {
    pub fn null() -> Item {
        Item { id: 0 }
    }
    pub fn with_id(id: u32) -> Item {
        Item { id }
    }
    pub fn as_index(&self) -> usize {
        self.id as usize
    }
    pub fn is_null(&self) -> bool {
        self.id == 0
    }

    /// The labels of `items`, in label order.
    pub fn sorted_labels<'a>(items: &[Item], itemizer: &'a Itemizer) -> Vec<&'a str> {
        let mut labels: Vec<&str> = items.iter().map(|&item| itemizer.str_of(item)).collect();
        ensure_sorted(&mut labels);
        labels
    }

    /// Space separated labels, for display only. Labels containing spaces
    /// make this ambiguous.
    pub fn item_vec_to_string(items: &[Item], itemizer: &Itemizer) -> String {
        Item::sorted_labels(items, itemizer).join(" ")
    }
}

// If all labels parse as integers, order by that integer,
// otherwise order lexicographically.
fn ensure_sorted(labels: &mut [&str]) {
    let all_labels_are_ints = labels.iter().all(|label| label.parse::<u64>().is_ok());
    if all_labels_are_ints {
        labels.sort_by_key(|label| label.parse::<u64>().unwrap_or(0));
    } else {
        labels.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::ensure_sorted;

    #[test]
    fn test_ensure_sorted() {
        let mut numeric = vec!["10", "9", "100", "1"];
        ensure_sorted(&mut numeric);
        assert_eq!(numeric, vec!["1", "9", "10", "100"]);

        let mut mixed = vec!["milk", "10", "bread", "9"];
        ensure_sorted(&mut mixed);
        assert_eq!(mixed, vec!["10", "9", "bread", "milk"]);
    }
}
