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

//! Frequent itemset mining and association rule generation over market
//! basket transactions.
//!
//! Itemsets are mined with either level-wise Apriori or FPGrowth; the two
//! produce identical itemsets and supports for the same input. Rules are
//! then derived from the itemsets and scored by support, confidence, lift,
//! leverage and conviction.
//!
//! ```
//! use basket_miner::{derive_rules, mine_frequent_itemsets, MiningConfig, RuleConfig, Strategy};
//!
//! let transactions = vec![
//!     vec!["bread", "milk"],
//!     vec!["bread", "milk", "eggs"],
//!     vec!["bread"],
//! ];
//! let itemsets =
//!     mine_frequent_itemsets(transactions, &MiningConfig::new(0.5, Strategy::FpGrowth)).unwrap();
//! assert_eq!(itemsets.support_of(&["milk", "bread"]), Some(2.0 / 3.0));
//!
//! let rules = derive_rules(&itemsets, &RuleConfig::from_name("confidence", 0.9).unwrap()).unwrap();
//! assert_eq!(rules[0].to_string(itemsets.itemizer()), "milk => bread");
//! ```

pub mod apriori;
pub mod config;
pub mod encoder;
pub mod error;
pub mod fptree;
pub mod generate_rules;
pub mod index;
pub mod item;
pub mod item_counter;
pub mod itemizer;
pub mod itemset;
pub mod metrics;
pub mod rule;
pub mod vec_sets;

pub use config::{MiningConfig, RuleConfig, Strategy};
pub use encoder::{encode, EncodedTransactions};
pub use error::{MiningError, Result};
pub use item::Item;
pub use itemizer::Itemizer;
pub use itemset::{FrequentItemsets, ItemSet};
pub use metrics::Metric;
pub use rule::Rule;

use std::time::Instant;
use tracing::info;

/// Mines every itemset whose support is at least `config.min_support`.
///
/// An empty transaction sequence yields an empty collection, or an
/// `InvalidConfiguration` error when `config.strict` is set.
pub fn mine_frequent_itemsets<I, T, S>(transactions: I, config: &MiningConfig) -> Result<FrequentItemsets>
where
    I: IntoIterator<Item = T>,
    T: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    config.validate()?;
    mine_encoded(&encode(transactions), config)
}

/// As `mine_frequent_itemsets`, for transactions that are already encoded.
pub fn mine_encoded(encoded: &EncodedTransactions, config: &MiningConfig) -> Result<FrequentItemsets> {
    config.validate()?;
    if encoded.is_empty() {
        if config.strict {
            return Err(MiningError::invalid_config(
                "no transactions to mine in strict mode",
            ));
        }
        return Ok(FrequentItemsets::empty(config.min_support));
    }

    let num_transactions = config::num_transactions(encoded.len())?;
    let min_count = config::min_count(config.min_support, num_transactions);
    let timer = Instant::now();
    let itemsets = match config.strategy {
        Strategy::Apriori => apriori::apriori(encoded, min_count),
        Strategy::FpGrowth => fptree::fpgrowth(encoded, min_count),
    };
    info!(
        strategy = %config.strategy,
        transactions = num_transactions,
        items = encoded.num_items(),
        min_count,
        itemsets = itemsets.len(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "mined frequent itemsets"
    );

    let frequent = FrequentItemsets::new(
        itemsets,
        num_transactions,
        config.min_support,
        encoded.itemizer.clone(),
        encoded.item_counts().into_vec(),
    );
    frequent.check_downward_closure()?;
    Ok(frequent)
}

/// Derives and scores rules from `itemsets`; see
/// `generate_rules::generate_rules` for the ordering.
pub fn derive_rules(itemsets: &FrequentItemsets, config: &RuleConfig) -> Result<Vec<Rule>> {
    generate_rules::generate_rules(itemsets, config)
}
