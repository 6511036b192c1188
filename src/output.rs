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

use crate::csv_record::{list_field, quote};
use basket_miner::{FrequentItemsets, Item, ItemSet, Itemizer, Rule};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::io::{self, Write};

// Each itemset is one field holding its labels as a comma separated record,
// so labels with spaces, commas or quotes keep their boundaries.
fn items_field(items: &[Item], itemizer: &Itemizer) -> String {
    list_field(&Item::sorted_labels(items, itemizer))
}

pub fn write_rules<W: Write>(
    output: &mut W,
    rules: &[Rule],
    itemsets: &FrequentItemsets,
) -> io::Result<()> {
    let itemizer = itemsets.itemizer();
    writeln!(
        output,
        "antecedents,consequents,support,confidence,lift,leverage,conviction"
    )?;
    for rule in rules {
        writeln!(
            output,
            "{},{},{},{},{},{},{}",
            items_field(&rule.antecedent, itemizer),
            items_field(&rule.consequent, itemizer),
            rule.support(),
            rule.confidence(),
            rule.lift(),
            rule.leverage(),
            rule.conviction()
        )?;
    }
    Ok(())
}

/// Highest support first, ties in canonical itemset order.
pub fn write_itemsets<W: Write>(output: &mut W, itemsets: &FrequentItemsets) -> io::Result<()> {
    writeln!(output, "itemset,support")?;
    let sorted: Vec<(&ItemSet, f64)> = itemsets
        .supports()
        .into_iter()
        .sorted_by_key(|&(itemset, support)| (Reverse(OrderedFloat(support)), itemset))
        .collect();
    for (itemset, support) in sorted {
        writeln!(
            output,
            "{},{}",
            items_field(&itemset.items, itemsets.itemizer()),
            support
        )?;
    }
    Ok(())
}

pub fn write_item_supports<W: Write>(output: &mut W, itemsets: &FrequentItemsets) -> io::Result<()> {
    writeln!(output, "item,support")?;
    for (item, support) in itemsets.item_supports() {
        writeln!(output, "{},{}", quote(item), support)?;
    }
    Ok(())
}
