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

use std::env;
use std::io;
use std::process;

use argparse::{ArgumentParser, Store, StoreOption, StoreTrue};
use basket_miner::{MiningConfig, Result, RuleConfig};

use crate::transaction_reader::InputFormat;

pub struct Arguments {
    pub input_file_path: String,
    pub input_format: String,
    pub output_rules_path: String,
    pub output_itemsets_path: Option<String>,
    pub output_item_support_path: Option<String>,
    pub algorithm: String,
    pub min_support: f64,
    pub metric: String,
    pub min_threshold: f64,
    pub strict: bool,
}

impl Arguments {
    pub fn mining_config(&self) -> Result<MiningConfig> {
        let config = MiningConfig::new(self.min_support, self.algorithm.parse()?).strict(self.strict);
        config.validate()?;
        Ok(config)
    }

    pub fn rule_config(&self) -> Result<RuleConfig> {
        let config = RuleConfig::from_name(&self.metric, self.min_threshold)?;
        config.validate()?;
        Ok(config)
    }

    pub fn format(&self) -> io::Result<InputFormat> {
        self.input_format.parse()
    }
}

pub fn parse_args_or_exit() -> Arguments {
    let mut args: Arguments = Arguments {
        input_file_path: String::new(),
        input_format: String::from("baskets"),
        output_rules_path: String::new(),
        output_itemsets_path: None,
        output_item_support_path: None,
        algorithm: String::from("apriori"),
        min_support: 0.02,
        metric: String::from("lift"),
        min_threshold: 1.1,
        strict: false,
    };

    {
        let mut parser = ArgumentParser::new();
        parser.set_description("Parallel Apriori and FPGrowth association rule mining.");

        parser
            .refer(&mut args.input_file_path)
            .add_option(&["--input"], Store, "Input dataset in CSV format.")
            .metavar("file_path")
            .required();

        parser
            .refer(&mut args.input_format)
            .add_option(
                &["--format"],
                Store,
                "Input layout: 'baskets', one transaction of comma separated items \
                 per line, or 'line-items', rows of order_id,item,quantity with a header.",
            )
            .metavar("format");

        parser
            .refer(&mut args.output_rules_path)
            .add_option(
                &["--output"],
                Store,
                "File path in which to store output rules. Format: antecedents, \
                 consequents, support, confidence, lift, leverage, conviction.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut args.output_itemsets_path)
            .add_option(
                &["--itemsets-output"],
                StoreOption,
                "File path in which to store frequent itemsets with their support.",
            )
            .metavar("file_path");

        parser
            .refer(&mut args.output_item_support_path)
            .add_option(
                &["--item-support-output"],
                StoreOption,
                "File path in which to store the support of every single item.",
            )
            .metavar("file_path");

        parser
            .refer(&mut args.algorithm)
            .add_option(
                &["--algorithm"],
                Store,
                "Itemset mining algorithm, 'apriori' or 'fpgrowth'.",
            )
            .metavar("name");

        parser
            .refer(&mut args.min_support)
            .add_option(
                &["--min-support"],
                Store,
                "Minimum itemset support threshold, in range (0,1].",
            )
            .metavar("threshold");

        parser
            .refer(&mut args.metric)
            .add_option(
                &["--metric"],
                Store,
                "Rule filtering metric: support, confidence, lift, leverage or conviction.",
            )
            .metavar("name");

        parser
            .refer(&mut args.min_threshold)
            .add_option(
                &["--min-threshold"],
                Store,
                "Minimum value of the rule filtering metric.",
            )
            .metavar("threshold");

        parser.refer(&mut args.strict).add_option(
            &["--strict"],
            StoreTrue,
            "Fail instead of writing empty output when the input has no transactions.",
        );

        if env::args().count() == 1 {
            // Nowhere useful to report a failure to print help.
            let _ = parser.print_help("Usage:", &mut io::stderr());
            process::exit(1);
        }

        if let Err(err) = parser.parse_args() {
            process::exit(err);
        }
    }

    args
}
