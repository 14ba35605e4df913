// ABOUTME: Header-driven reader for the USDA nutrient reference CSV
// ABOUTME: Produces NutrientRecords; file-level problems are fatal, unreadable rows are dropped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::NutrientRecord;
use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Columns every nutrient file must declare
pub const REQUIRED_COLUMNS: [&str; 2] = ["id", "name"];

/// Parse nutrient records from any CSV source
///
/// Columns are matched by header name, so column order and extra columns do
/// not matter. Rows that cannot be decoded are logged and dropped; rows with
/// blank `id` or `name` are kept and left for the importer to skip.
///
/// # Errors
///
/// Returns an error if the header row cannot be read or lacks a required column
pub fn parse_nutrient_csv<R: Read>(source: R) -> Result<Vec<NutrientRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(source);

    let headers = reader
        .headers()
        .context("Failed to read nutrient CSV header")?
        .clone();
    ensure_required_columns(&headers)?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<NutrientRecord>().enumerate() {
        match row {
            Ok(record) => records.push(record),
            Err(e) => {
                // +2: one for the header row, one for 1-based line numbers
                warn!(line = index + 2, "Dropping unreadable nutrient row: {e}");
            }
        }
    }

    debug!("Parsed {} nutrient rows", records.len());
    Ok(records)
}

/// Read nutrient records from a CSV file on disk
///
/// # Errors
///
/// Returns an error if the file cannot be opened or its header is unusable
pub fn read_nutrient_csv(path: impl AsRef<Path>) -> Result<Vec<NutrientRecord>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open nutrient file {}", path.display()))?;
    parse_nutrient_csv(file).with_context(|| format!("Failed to parse {}", path.display()))
}

fn ensure_required_columns(headers: &StringRecord) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            bail!("Nutrient CSV is missing required column '{column}'");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_usda_layout_with_extra_columns() {
        let data = "\
id,name,unit_name,nutrient_nbr,rank
1003,Protein,G,203,600
1093,\"Sodium, Na\",MG,307,5800
2047,Energy (Atwater General Factors),KCAL,957,
";
        let records = parse_nutrient_csv(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0], NutrientRecord::new("1003", "Protein", Some("G"), Some("600")));
        assert_eq!(records[1].name.as_deref(), Some("Sodium, Na"));
        assert_eq!(records[2].rank, None);
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let data = "name,id\nZinc,1095\n";
        let records = parse_nutrient_csv(data.as_bytes()).unwrap();

        assert_eq!(records, vec![NutrientRecord::new("1095", "Zinc", None, None)]);
    }

    #[test]
    fn test_blank_required_fields_are_kept_for_the_importer() {
        let data = "id,name,unit_name\n,Iron,MG\n1089,,MG\n";
        let records = parse_nutrient_csv(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, None);
        assert!(records[0].to_entity().is_none());
        assert!(records[1].to_entity().is_none());
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let data = "id,name,unit_name,rank\n1095,Zinc\n";
        let records = parse_nutrient_csv(data.as_bytes()).unwrap();

        assert_eq!(records[0].unit_name, None);
        assert_eq!(records[0].rank, None);
    }

    #[test]
    fn test_missing_required_column_is_fatal() {
        let data = "nutrient_id,name\n1095,Zinc\n";
        let error = parse_nutrient_csv(data.as_bytes()).unwrap_err();

        assert!(error.to_string().contains("'id'"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = read_nutrient_csv("/nonexistent/nutrient.csv");
        assert!(result.is_err());
    }
}
