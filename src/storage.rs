//! CSV input and CSV/JSON output.
//!
//! Input files have a header row and are read by column position:
//! `label,value` for categories and `group,start,end,weight` for range rows.
//! Numeric cells that fail to parse read as `0`.

use crate::error::{Error, Result};
use crate::models::{Allocation, Category, RangeRow, parse_lenient};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use log::warn;
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input)
}

fn check_header<R: Read>(rdr: &mut csv::Reader<R>, expected: usize) -> Result<()> {
    let found = rdr.headers()?.len();
    if found < expected {
        return Err(Error::MissingColumns { expected, found });
    }
    Ok(())
}

fn records<R: Read>(rdr: &mut csv::Reader<R>, expected: usize) -> Result<Vec<StringRecord>> {
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        if rec.len() < expected {
            warn!("skipping data row {}: {} of {expected} columns", line + 1, rec.len());
            continue;
        }
        out.push(rec);
    }
    Ok(out)
}

/// Read `label,value` rows.
pub fn read_categories<R: Read>(input: R) -> Result<Vec<Category>> {
    let mut rdr = reader(input);
    check_header(&mut rdr, 2)?;
    Ok(records(&mut rdr, 2)?
        .iter()
        .map(|r| Category::new(&r[0], parse_lenient(&r[1])))
        .collect())
}

/// Read `group,start,end,weight` rows.
pub fn read_range_rows<R: Read>(input: R) -> Result<Vec<RangeRow>> {
    let mut rdr = reader(input);
    check_header(&mut rdr, 4)?;
    Ok(records(&mut rdr, 4)?
        .iter()
        .map(|r| {
            RangeRow::new(
                &r[0],
                parse_lenient(&r[1]),
                parse_lenient(&r[2]),
                parse_lenient(&r[3]),
            )
        })
        .collect())
}

pub fn load_categories<P: AsRef<Path>>(path: P) -> Result<Vec<Category>> {
    read_categories(File::open(path)?)
}

pub fn load_range_rows<P: AsRef<Path>>(path: P) -> Result<Vec<RangeRow>> {
    read_range_rows(File::open(path)?)
}

/// Prefix cells that a spreadsheet would run as a formula.
fn sanitize_cell(s: &str) -> String {
    match s.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{s}"),
        _ => s.to_string(),
    }
}

/// Save allocations as CSV with header.
pub fn save_allocations_csv<P: AsRef<Path>>(allocations: &[Allocation], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("label", "value", "proportion", "units", "percentage"))?;
    for a in allocations {
        wtr.serialize((
            sanitize_cell(&a.label),
            a.value,
            a.proportion,
            a.units,
            a.percentage,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write any result as pretty JSON.
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut out: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Save any result as a pretty JSON file.
pub fn save_json<P: AsRef<Path>, T: Serialize + ?Sized>(value: &T, path: P) -> Result<()> {
    write_json(File::create(path)?, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_only_touches_formula_starters() {
        assert_eq!(sanitize_cell("=SUM(A1)"), "'=SUM(A1)");
        assert_eq!(sanitize_cell("@foo"), "'@foo");
        assert_eq!(sanitize_cell("Germany"), "Germany");
        assert_eq!(sanitize_cell(""), "");
    }

    #[test]
    fn short_rows_are_skipped() {
        let csv = "label,value\nA,1\nB\nC,3\n";
        let cats = read_categories(csv.as_bytes()).unwrap();
        let labels: Vec<&str> = cats.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "C"]);
    }
}
