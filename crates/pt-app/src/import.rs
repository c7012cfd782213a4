//! Import of measured temperature series from text and JSON files.
//!
//! Text files hold one sample per line. A line uses `;` as separator when it
//! contains one and `,` otherwise, so `12,5;20` reads as inlet 12.5 and
//! ambient 20. Cells that are not numbers (headers, units, blanks) are
//! dropped. If any line has two numbers the file is read as two columns
//! (inlet, ambient) and lines with fewer are skipped; otherwise the single
//! column is the inlet series.

use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::request::SimulateRequest;

/// Series read from a file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedSeries {
    pub inlet: Vec<f64>,
    pub ambient: Option<Vec<f64>>,
}

impl ImportedSeries {
    pub fn into_request(self, interval_s: Option<f64>) -> SimulateRequest {
        SimulateRequest::new(self.inlet, self.ambient, interval_s)
    }
}

pub fn parse_series_text(text: &str) -> AppResult<ImportedSeries> {
    let rows: Vec<Vec<f64>> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_row)
        .filter(|row| !row.is_empty())
        .collect();

    let two_columns = rows.iter().any(|row| row.len() >= 2);
    let series = if two_columns {
        let (inlet, ambient) = rows
            .iter()
            .filter(|row| row.len() >= 2)
            .map(|row| (row[0], row[1]))
            .unzip();
        ImportedSeries {
            inlet,
            ambient: Some(ambient),
        }
    } else {
        ImportedSeries {
            inlet: rows.iter().map(|row| row[0]).collect(),
            ambient: None,
        }
    };

    if series.inlet.is_empty() {
        return Err(AppError::InvalidInput(
            "no numeric samples found in file".to_string(),
        ));
    }
    Ok(series)
}

fn parse_row(line: &str) -> Vec<f64> {
    let separator = if line.contains(';') { ';' } else { ',' };
    line.split(separator).filter_map(pt_core::parse_real).collect()
}

/// Load a request from `.csv`/`.txt` series or a `.json` request body.
pub fn load_series(path: &Path) -> AppResult<SimulateRequest> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" | "txt" => Ok(parse_series_text(&content)?.into_request(None)),
        "json" => SimulateRequest::from_json_str(&content),
        _ => Err(AppError::UnsupportedFormat { extension }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_column_is_inlet_only() {
        let s = parse_series_text("temperature\n80\n 79.5 \n\n78\n").unwrap();
        assert_eq!(s.inlet, vec![80.0, 79.5, 78.0]);
        assert!(s.ambient.is_none());
    }

    #[test]
    fn two_columns_with_comma_separator() {
        let s = parse_series_text("inlet,ambient\n80,20\n80,19\n81\n80,18\n").unwrap();
        assert_eq!(s.inlet, vec![80.0, 80.0, 80.0]);
        assert_eq!(s.ambient, Some(vec![20.0, 19.0, 18.0]));
    }

    #[test]
    fn semicolon_rows_accept_decimal_comma() {
        let s = parse_series_text("80,5;20,25\r\n79;19,5\r\n").unwrap();
        assert_eq!(s.inlet, vec![80.5, 79.0]);
        assert_eq!(s.ambient, Some(vec![20.25, 19.5]));
    }

    #[test]
    fn non_numeric_file_is_rejected() {
        let err = parse_series_text("a,b\nc,d\n").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(parse_series_text("").is_err());
    }

    #[test]
    fn imported_series_becomes_request() {
        let req = parse_series_text("1\n2\n").unwrap().into_request(Some(60.0));
        assert_eq!(req.inlet, vec![1.0, 2.0]);
        assert_eq!(req.interval_s, Some(60.0));
    }
}
