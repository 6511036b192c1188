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
use fnv::FnvHashMap;

/// Bijection between item labels and `Item` ids, assigned in first-seen
/// order. Labels are compared as opaque strings.
#[derive(Clone, Debug, Default)]
pub struct Itemizer {
    item_str_to_id: FnvHashMap<String, Item>,
    item_id_to_str: Vec<String>,
}

impl Itemizer {
    pub fn new() -> Itemizer {
        Itemizer::default()
    }

    pub fn id_of(&mut self, item: &str) -> Item {
        if let Some(&id) = self.item_str_to_id.get(item) {
            return id;
        }
        self.item_id_to_str.push(String::from(item));
        let id = Item::with_id(self.item_id_to_str.len() as u32);
        self.item_str_to_id.insert(String::from(item), id);
        id
    }

    /// Looks up a label without assigning it an id.
    pub fn get(&self, item: &str) -> Option<Item> {
        self.item_str_to_id.get(item).cloned()
    }

    /// The label of `id`, or `None` for the null item and ids this itemizer
    /// never handed out.
    pub fn get_str(&self, id: Item) -> Option<&str> {
        let index = id.as_index().checked_sub(1)?;
        self.item_id_to_str.get(index).map(String::as_str)
    }

    /// # Panics
    ///
    /// If `id` was not assigned by this itemizer, including `Item::null()`.
    pub fn str_of(&self, id: Item) -> &str {
        match self.get_str(id) {
            Some(label) => label,
            None => panic!("item id {} has no label", id.as_index()),
        }
    }

    pub fn to_id_vec(&mut self, items: &[&str]) -> Vec<Item> {
        items.iter().map(|s| self.id_of(s)).collect()
    }

    pub fn len(&self) -> usize {
        self.item_id_to_str.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_id_to_str.is_empty()
    }

    /// All items, in id order.
    pub fn items(&self) -> impl Iterator<Item = Item> {
        (1..=self.item_id_to_str.len() as u32).map(Item::with_id)
    }
}

#[cfg(test)]
mod tests {
    use super::Itemizer;
    use crate::item::Item;

    #[test]
    fn test_first_seen_order() {
        let mut itemizer = Itemizer::new();
        assert_eq!(itemizer.id_of("milk"), Item::with_id(1));
        assert_eq!(itemizer.id_of("bread"), Item::with_id(2));
        assert_eq!(itemizer.id_of("milk"), Item::with_id(1));
        assert_eq!(itemizer.id_of("Milk"), Item::with_id(3));
        assert_eq!(itemizer.len(), 3);
        assert_eq!(itemizer.str_of(Item::with_id(2)), "bread");
        assert_eq!(itemizer.get("eggs"), None);
        assert_eq!(itemizer.get("bread"), Some(Item::with_id(2)));
        assert_eq!(
            itemizer.items().collect::<Vec<Item>>(),
            vec![Item::with_id(1), Item::with_id(2), Item::with_id(3)]
        );
    }

    #[test]
    fn test_get_str() {
        let mut itemizer = Itemizer::new();
        itemizer.id_of("milk");
        assert_eq!(itemizer.get_str(Item::with_id(1)), Some("milk"));
        assert_eq!(itemizer.get_str(Item::null()), None);
        assert_eq!(itemizer.get_str(Item::with_id(2)), None);
    }

    #[test]
    #[should_panic(expected = "item id 0 has no label")]
    fn test_str_of_null_item() {
        let mut itemizer = Itemizer::new();
        itemizer.id_of("milk");
        itemizer.str_of(Item::null());
    }
}
