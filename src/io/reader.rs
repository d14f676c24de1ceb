//! Comma-separated cost-matrix reader built on the `csv` crate.

use crate::error::{TspError, TspResult};
use crate::model::CostMatrix;
use csv::{ReaderBuilder, Trim};
use std::path::Path;

/// Parses one matrix row per line, costs separated by commas.
///
/// Blank lines are skipped, fields are trimmed and may be quoted, and a
/// single trailing comma is accepted. An empty field anywhere else is an
/// error.
///
/// # Examples
///
/// ```
/// use u_tsp::io::parse_matrix;
///
/// let matrix = parse_matrix("0,5\n7,0\n").unwrap();
/// assert_eq!(matrix.distance(1, 0), 7.0);
/// ```
pub fn parse_matrix(content: &str) -> TspResult<CostMatrix> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(content.strip_prefix('\u{feff}').unwrap_or(content).as_bytes());

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| {
            let line = e.position().map_or(0, |p| p.line() as usize);
            TspError::parse(line, e.to_string())
        })?;
        let line_num = record.position().map_or(0, |p| p.line() as usize);

        // Whitespace-only line.
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        let mut fields: Vec<&str> = record.iter().collect();
        if fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }

        let mut row = Vec::with_capacity(fields.len());
        for field in fields {
            if field.is_empty() {
                return Err(TspError::parse(line_num, "empty cost field"));
            }
            let cost: f64 = field
                .parse()
                .map_err(|_| TspError::parse(line_num, format!("invalid cost `{field}`")))?;
            row.push(cost);
        }

        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(TspError::parse(
                    line_num,
                    format!("row has {} costs, expected {}", row.len(), first.len()),
                ));
            }
        }
        rows.push(row);
    }

    CostMatrix::new(rows)
}

/// Reads and parses a cost-matrix file.
pub fn load_matrix(path: &Path) -> TspResult<CostMatrix> {
    let content = std::fs::read_to_string(path)?;
    let matrix = parse_matrix(&content)?;
    log::info!(
        "loaded {} cities from {}",
        matrix.len(),
        path.display()
    );
    Ok(matrix)
}
