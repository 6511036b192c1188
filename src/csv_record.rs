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

// RFC 4180 style fields, one record per line. Quoted fields may contain
// commas and doubled quotes but not line breaks.

use std::borrow::Cow;
use std::io;
use std::iter::Peekable;
use std::str::Chars;

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// Quotes `field` if it would otherwise not read back as itself.
pub fn quote(field: &str) -> Cow<str> {
    let needs_quotes = field.contains([',', '"', '\n', '\r'])
        || field.starts_with(char::is_whitespace)
        || field.ends_with(char::is_whitespace);
    if needs_quotes {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Encodes `labels` as a single field: the labels as a comma separated
/// record, quoted as a whole when there is more than one.
pub fn list_field(labels: &[&str]) -> String {
    let record = labels.iter().map(|label| quote(label)).collect::<Vec<_>>().join(",");
    quote(&record).into_owned()
}

fn skip_blanks(chars: &mut Peekable<Chars>) {
    while let Some(&c) = chars.peek() {
        if c != ' ' && c != '\t' {
            break;
        }
        chars.next();
    }
}

/// Splits one line into fields. Unquoted fields are trimmed; quoted fields
/// are kept verbatim. A quote inside an unquoted field, text after a
/// closing quote, or an unterminated quote is an error.
pub fn split_record(line: &str) -> io::Result<Vec<String>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut fields = vec![];
    let mut chars = line.chars().peekable();
    loop {
        skip_blanks(&mut chars);
        let mut field = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    Some('"') => break,
                    Some(c) => field.push(c),
                    None => return Err(invalid_data(format!("unterminated quote in '{}'", line))),
                }
            }
            skip_blanks(&mut chars);
            fields.push(field);
            match chars.next() {
                None => return Ok(fields),
                Some(',') => {}
                Some(c) => {
                    return Err(invalid_data(format!(
                        "unexpected '{}' after quoted field in '{}'",
                        c, line
                    )))
                }
            }
        } else {
            loop {
                match chars.next() {
                    None => {
                        fields.push(field.trim().to_string());
                        return Ok(fields);
                    }
                    Some(',') => {
                        fields.push(field.trim().to_string());
                        break;
                    }
                    Some('"') => {
                        return Err(invalid_data(format!("stray quote in '{}'", line)));
                    }
                    Some(c) => field.push(c),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote() {
        assert_eq!(quote("Mouse"), "Mouse");
        assert_eq!(quote("Laptop Bag"), "Laptop Bag");
        assert_eq!(quote("Laptop Bag, XL"), "\"Laptop Bag, XL\"");
        assert_eq!(quote("12\" Sleeve"), "\"12\"\" Sleeve\"");
        assert_eq!(quote(" padded"), "\" padded\"");
    }

    #[test]
    fn test_list_field() {
        assert_eq!(list_field(&["Laptop Bag"]), "Laptop Bag");
        assert_eq!(list_field(&["Laptop Bag", "Mouse"]), "\"Laptop Bag,Mouse\"");
        assert_eq!(list_field(&["Laptop", "Bag", "Mouse"]), "\"Laptop,Bag,Mouse\"");
        assert_eq!(
            list_field(&["Laptop Bag, XL", "Mouse"]),
            "\"\"\"Laptop Bag, XL\"\",Mouse\""
        );
    }

    #[test]
    fn test_split_record() {
        assert_eq!(split_record("a, b ,c\r\n").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(
            split_record("1,\"Laptop Bag, XL\",2").unwrap(),
            vec!["1", "Laptop Bag, XL", "2"]
        );
        assert_eq!(split_record("\"say \"\"hi\"\"\", x").unwrap(), vec!["say \"hi\"", "x"]);
        assert_eq!(split_record("a,,").unwrap(), vec!["a", "", ""]);
        assert_eq!(split_record("").unwrap(), vec![""]);
        assert!(split_record("1,Laptop \"Bag\",2").is_err());
        assert!(split_record("1,\"Laptop Bag").is_err());
        assert!(split_record("\"Laptop\" Bag,2").is_err());
    }

    #[test]
    fn test_list_field_reads_back() {
        for labels in [
            vec!["Laptop Bag", "Mouse"],
            vec!["Laptop", "Bag", "Mouse"],
            vec!["Laptop Bag, XL", "12\" Sleeve"],
            vec!["USB-C Hub"],
        ] {
            let line = format!("{},0.5", list_field(&labels));
            let fields = split_record(&line).unwrap();
            assert_eq!(fields.len(), 2);
            assert_eq!(split_record(&fields[0]).unwrap(), labels);
        }
    }
}
