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

// Set operations over sorted, duplicate free slices.

use std::cmp::Ordering;

pub fn union<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: Ord + Copy,
{
    let mut c: Vec<T> = Vec::with_capacity(a.len() + b.len());
    let mut ap = 0;
    let mut bp = 0;
    while ap < a.len() && bp < b.len() {
        match a[ap].cmp(&b[bp]) {
            Ordering::Less => {
                c.push(a[ap]);
                ap += 1;
            }
            Ordering::Greater => {
                c.push(b[bp]);
                bp += 1;
            }
            Ordering::Equal => {
                c.push(a[ap]);
                ap += 1;
                bp += 1;
            }
        }
    }
    c.extend_from_slice(&a[ap..]);
    c.extend_from_slice(&b[bp..]);
    c
}

// Items in a that aren't in b.
pub fn difference<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: Ord + Copy,
{
    let mut c: Vec<T> = Vec::with_capacity(a.len());
    let mut bp = 0;
    for &x in a {
        while bp < b.len() && b[bp] < x {
            bp += 1;
        }
        if bp == b.len() || b[bp] != x {
            c.push(x);
        }
    }
    c
}

#[cfg(test)]
mod tests {
    use crate::item::Item;

    fn to_item_vec(nums: &[u32]) -> Vec<Item> {
        nums.iter().map(|&i| Item::with_id(i)).collect()
    }

    #[test]
    fn test_union() {
        use super::union;

        let test_cases: Vec<(Vec<Item>, Vec<Item>, Vec<Item>)> = [
            (vec![1, 2, 3], vec![4, 5, 6], vec![1, 2, 3, 4, 5, 6]),
            (vec![1, 2, 3], vec![3, 4, 5, 6], vec![1, 2, 3, 4, 5, 6]),
            (vec![2, 4], vec![1, 3, 5], vec![1, 2, 3, 4, 5]),
            (vec![], vec![1], vec![1]),
            (vec![1], vec![], vec![1]),
        ]
        .iter()
        .map(|(a, b, u)| (to_item_vec(a), to_item_vec(b), to_item_vec(u)))
        .collect();

        for (a, b, c) in &test_cases {
            assert_eq!(&union(a, b), c);
        }
    }

    #[test]
    fn test_difference() {
        use super::difference;

        let cases: Vec<(Vec<u32>, Vec<u32>, Vec<u32>)> = vec![
            (vec![1, 2, 3], vec![2], vec![1, 3]),
            (vec![1, 2, 3], vec![1, 3], vec![2]),
            (vec![1, 2, 3], vec![], vec![1, 2, 3]),
            (vec![1, 2, 3], vec![1, 2, 3], vec![]),
            (vec![1, 5], vec![0, 2, 5, 9], vec![1]),
        ];
        for (a, b, expected) in cases {
            assert_eq!(
                difference(&to_item_vec(&a), &to_item_vec(&b)),
                to_item_vec(&expected)
            );
        }
    }
}
