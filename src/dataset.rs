use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use regex::Regex;
use serde_json::Value;

use crate::{models::Dataset, value_utils::value_to_number};

const PRICE_COLUMNS: [&str; 2] = ["price", "purchase price"];
const QUANTITY_COLUMNS: [&str; 2] = ["quantity", "qty"];

/// Parses raw CSV text into a Dataset.
///
/// The first record is the header and fixes the column order. Fully empty
/// lines are skipped; fields are opportunistically coerced to booleans and
/// numbers. The raw text is captured untouched for later export.
pub fn parse_csv(text: &str) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().context("failed to read CSV header")?;
    let columns: Vec<String> = headers.iter().map(|name| name.to_string()).collect();
    if columns.iter().all(|name| name.trim().is_empty()) {
        bail!("CSV input has no header row");
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to read CSV record")?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        // Trailing fields may be absent; a record wider than the header is
        // structurally broken input.
        if record.len() > columns.len() {
            bail!(
                "row {} has {} fields but the header has {}",
                rows.len() + 1,
                record.len(),
                columns.len()
            );
        }
        let mut row = HashMap::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            let value = record.get(idx).map(coerce_field).unwrap_or(Value::Null);
            row.insert(column.clone(), value);
        }
        rows.push(row);
    }

    let scryfall_column = detect_scryfall_column(&columns);
    Ok(Dataset {
        rows,
        columns,
        raw_csv: text.to_string(),
        scryfall_column,
    })
}

/// Coerces a CSV field to a typed value when unambiguous, else keeps the text.
fn coerce_field(field: &str) -> Value {
    if field.is_empty() {
        return Value::Null;
    }
    match field {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(int) = field.parse::<i64>() {
        return Value::from(int);
    }
    if !field.chars().any(|c| c.is_ascii_alphabetic()) {
        if let Ok(float) = field.parse::<f64>() {
            if float.is_finite() {
                if let Some(number) = serde_json::Number::from_f64(float) {
                    return Value::Number(number);
                }
            }
        }
    }
    Value::String(field.to_string())
}

/// Returns the first column that looks like a Scryfall identifier column.
pub fn detect_scryfall_column(columns: &[String]) -> Option<String> {
    let pattern = Regex::new(r"(?i)scryfall.*id").ok()?;
    columns.iter().find(|name| pattern.is_match(name)).cloned()
}

/// Sums price x quantity over all rows, matching price and quantity columns
/// case-insensitively against a small synonym set. Rows lacking either field
/// or holding non-numeric text contribute zero.
pub fn estimated_value(dataset: &Dataset) -> f64 {
    let price_key = dataset
        .columns
        .iter()
        .find(|name| PRICE_COLUMNS.contains(&name.to_lowercase().as_str()));
    let quantity_key = dataset
        .columns
        .iter()
        .find(|name| QUANTITY_COLUMNS.contains(&name.to_lowercase().as_str()));
    let (Some(price_key), Some(quantity_key)) = (price_key, quantity_key) else {
        return 0.0;
    };

    dataset
        .rows
        .iter()
        .map(|row| {
            let price = row.get(price_key).and_then(value_to_number).unwrap_or(0.0);
            let quantity = row
                .get(quantity_key)
                .and_then(value_to_number)
                .unwrap_or(0.0);
            price * quantity
        })
        .sum()
}

/// Display name for a row, taken from a Name column when one exists.
pub fn row_display_name(row: &HashMap<String, Value>) -> String {
    for key in ["Name", "name"] {
        if let Some(Value::String(text)) = row.get(key) {
            if !text.is_empty() {
                return text.clone();
            }
        }
    }
    "Card".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_preserves_header_order_and_coerces_fields() {
        let csv = "Name,Quantity,Price,Foil\nLoading Zone,1,0.47,false\n\nStarwinder,2,3.19,true\n";
        let dataset = parse_csv(csv).unwrap();
        assert_eq!(dataset.columns, vec!["Name", "Quantity", "Price", "Foil"]);
        assert_eq!(dataset.rows.len(), 2);
        assert_eq!(dataset.rows[0]["Name"], json!("Loading Zone"));
        assert_eq!(dataset.rows[0]["Quantity"], json!(1));
        assert_eq!(dataset.rows[0]["Price"], json!(0.47));
        assert_eq!(dataset.rows[1]["Foil"], json!(true));
        assert_eq!(dataset.raw_csv, csv);
    }

    #[test]
    fn parse_keeps_ambiguous_text_as_strings() {
        let csv = "Id,Note\n0d2c95bd-79af,1e5\n";
        let dataset = parse_csv(csv).unwrap();
        assert_eq!(dataset.rows[0]["Id"], json!("0d2c95bd-79af"));
        assert_eq!(dataset.rows[0]["Note"], json!("1e5"));
    }

    #[test]
    fn parse_treats_missing_fields_as_absent() {
        let csv = "Name,Set,Price\nSacred Foundry,EOE\n";
        let dataset = parse_csv(csv).unwrap();
        assert_eq!(dataset.rows[0]["Price"], serde_json::Value::Null);
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!(parse_csv("").is_err());
        assert!(parse_csv("Name,Set\nLoading Zone,EOE,stray field\n").is_err());
    }

    #[test]
    fn detects_scryfall_column_variants() {
        let columns: Vec<String> = ["Name", "Scryfall ID", "Set"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            detect_scryfall_column(&columns),
            Some("Scryfall ID".to_string())
        );

        let camel: Vec<String> = ["Name", "scryfallId"].iter().map(|s| s.to_string()).collect();
        assert_eq!(detect_scryfall_column(&camel), Some("scryfallId".to_string()));

        let none: Vec<String> = ["Name", "Set"].iter().map(|s| s.to_string()).collect();
        assert_eq!(detect_scryfall_column(&none), None);
    }

    #[test]
    fn estimated_value_sums_price_times_quantity() {
        let csv = "Price,Qty\n2.50,8\n1.25,4\n";
        let dataset = parse_csv(csv).unwrap();
        assert!((estimated_value(&dataset) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn estimated_value_skips_unparseable_rows() {
        let csv = "price,quantity\n2.00,3\nn/a,2\n1.00,\n";
        let dataset = parse_csv(csv).unwrap();
        assert!((estimated_value(&dataset) - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn estimated_value_without_columns_is_zero() {
        let csv = "Name,Set\nLoading Zone,EOE\n";
        let dataset = parse_csv(csv).unwrap();
        assert_eq!(estimated_value(&dataset), 0.0);
    }

    #[test]
    fn display_name_falls_back_to_placeholder() {
        let csv = "Set,Rarity\nEOE,rare\n";
        let dataset = parse_csv(csv).unwrap();
        assert_eq!(row_display_name(&dataset.rows[0]), "Card");

        let named = parse_csv("Name\nStarwinder\n").unwrap();
        assert_eq!(row_display_name(&named.rows[0]), "Starwinder");
    }
}
