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

use crate::csv_record::split_record;
use fnv::FnvHashMap;
use std::fs::File;
use std::io::prelude::*;
use std::io::{self, BufReader};
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputFormat {
    /// One transaction per line, items separated by commas. Items holding
    /// commas or quotes are quoted.
    Baskets,
    /// `order_id,item,quantity` rows under a header line; an item is in an
    /// order when any of its rows has a positive quantity.
    LineItems,
}

impl FromStr for InputFormat {
    type Err = io::Error;

    fn from_str(s: &str) -> io::Result<InputFormat> {
        match s {
            "baskets" => Ok(InputFormat::Baskets),
            "line-items" => Ok(InputFormat::LineItems),
            _ => Err(invalid_data(format!(
                "unknown input format '{}', expected 'baskets' or 'line-items'",
                s
            ))),
        }
    }
}

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

fn split_line(line: &str, line_number: usize) -> io::Result<Vec<String>> {
    split_record(line).map_err(|err| invalid_data(format!("line {}: {}", line_number, err)))
}

pub fn read_transactions(path: &str, format: InputFormat) -> io::Result<Vec<Vec<String>>> {
    let reader = BufReader::new(File::open(path)?);
    match format {
        InputFormat::Baskets => TransactionReader::new(reader).collect(),
        InputFormat::LineItems => read_line_items(reader),
    }
}

pub struct TransactionReader<R> {
    reader: R,
    line_number: usize,
}

impl<R: BufRead> TransactionReader<R> {
    pub fn new(reader: R) -> TransactionReader<R> {
        TransactionReader {
            reader,
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for TransactionReader<R> {
    type Item = io::Result<Vec<String>>;

    // Blank lines are skipped rather than read as empty transactions.
    fn next(&mut self) -> Option<io::Result<Vec<String>>> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => return Some(Err(err)),
            }
            self.line_number += 1;
            let items: Vec<String> = match split_line(&line, self.line_number) {
                Ok(fields) => fields.into_iter().filter(|s| !s.is_empty()).collect(),
                Err(err) => return Some(Err(err)),
            };
            if !items.is_empty() {
                return Some(Ok(items));
            }
        }
    }
}

fn read_line_items<R: BufRead>(reader: R) -> io::Result<Vec<Vec<String>>> {
    let mut lines = reader.lines();
    let header = match lines.next() {
        Some(header) => header?,
        None => return Ok(vec![]),
    };
    let columns = split_line(&header, 1)?;
    let column = |name: &str| columns.iter().position(|c| c == name);
    let (order_column, item_column) = match (column("order_id"), column("item")) {
        (Some(order), Some(item)) => (order, item),
        _ => {
            return Err(invalid_data(format!(
                "line item header '{}' needs order_id and item columns",
                header.trim()
            )))
        }
    };
    let quantity_column = column("quantity");

    let mut order_index: FnvHashMap<String, usize> = FnvHashMap::default();
    let mut orders: Vec<Vec<String>> = vec![];
    for (line_number, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_line(&line, line_number + 2)?;
        let field = |index: usize| {
            fields.get(index).map(String::as_str).ok_or_else(|| {
                invalid_data(format!("line {} has too few fields", line_number + 2))
            })
        };
        let order_id = field(order_column)?;
        let item = field(item_column)?;
        let present = match quantity_column {
            Some(index) => {
                let quantity = field(index)?.parse::<f64>().map_err(|err| {
                    invalid_data(format!("line {}: bad quantity: {}", line_number + 2, err))
                })?;
                quantity > 0.0
            }
            None => true,
        };

        let next_index = orders.len();
        let index = *order_index
            .entry(String::from(order_id))
            .or_insert(next_index);
        if index == next_index {
            orders.push(vec![]);
        }
        if present && !orders[index].iter().any(|i| i == item) {
            orders[index].push(String::from(item));
        }
    }
    Ok(orders)
}
