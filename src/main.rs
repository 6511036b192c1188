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

mod command_line_args;
mod csv_record;
mod output;
mod transaction_reader;

use basket_miner::{derive_rules, encode, mine_encoded};
use command_line_args::{parse_args_or_exit, Arguments};
use transaction_reader::read_transactions;

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::process;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn create(path: &str) -> Result<BufWriter<File>, Box<dyn Error>> {
    Ok(BufWriter::new(File::create(path)?))
}

fn mine(args: &Arguments) -> Result<(), Box<dyn Error>> {
    let mining_config = args.mining_config()?;
    let rule_config = args.rule_config()?;
    let start = Instant::now();

    info!(path = %args.input_file_path, "reading transactions");
    let timer = Instant::now();
    let transactions = read_transactions(&args.input_file_path, args.format()?)?;
    let encoded = encode(transactions);
    info!(
        transactions = encoded.len(),
        items = encoded.num_items(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "encoded transactions"
    );

    let itemsets = mine_encoded(&encoded, &mining_config)?;

    let timer = Instant::now();
    let rules = derive_rules(&itemsets, &rule_config)?;
    info!(
        rules = rules.len(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "generated rules"
    );

    {
        let mut output = create(&args.output_rules_path)?;
        output::write_rules(&mut output, &rules, &itemsets)?;
        output.flush()?;
    }
    if let Some(path) = &args.output_itemsets_path {
        let mut output = create(path)?;
        output::write_itemsets(&mut output, &itemsets)?;
        output.flush()?;
    }
    if let Some(path) = &args.output_item_support_path {
        let mut output = create(path)?;
        output::write_item_supports(&mut output, &itemsets)?;
        output.flush()?;
    }

    let top_rule = rules
        .first()
        .map(|rule| rule.to_string(itemsets.itemizer()))
        .unwrap_or_default();
    info!(
        transactions = encoded.len(),
        items = encoded.num_items(),
        algorithm = %mining_config.strategy,
        min_support = mining_config.min_support,
        metric = %rule_config.metric,
        min_threshold = rule_config.min_threshold,
        itemsets = itemsets.len(),
        rules = rules.len(),
        top_rule = %top_rule,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "mining complete"
    );

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let arguments = parse_args_or_exit();

    if let Err(err) = mine(&arguments) {
        error!("{}", err);
        process::exit(1);
    }
}
