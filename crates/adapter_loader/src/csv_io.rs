//! CSV writer and reader for comparison rows.

use std::fs;
use std::path::Path;

use pricer_core::types::Date;
use tracing::{debug, info};

use crate::error::LoaderError;
use crate::row::ComparisonRow;

/// Writes rows with a header line, creating parent directories as needed.
///
/// Returns the number of rows written.
pub fn write_rows(path: impl AsRef<Path>, rows: &[ComparisonRow]) -> Result<usize, LoaderError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = rows.len(), "Comparison written to file");
    Ok(rows.len())
}

/// Reads rows back, checking that each `expiry` agrees with `expiry_dt`.
pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<ComparisonRow>, LoaderError> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;

    let mut rows = Vec::new();
    for (idx, record) in reader.deserialize::<ComparisonRow>().enumerate() {
        let row = record?;
        let line = idx + 1;

        let expiry = Date::parse_exchange(&row.expiry).map_err(|e| LoaderError::InvalidRow {
            line,
            message: e.to_string(),
        })?;
        if expiry != row.expiry_dt {
            return Err(LoaderError::InvalidRow {
                line,
                message: format!("expiry {} disagrees with expiry_dt {}", row.expiry, row.expiry_dt),
            });
        }
        if !row.strike.is_finite() || row.strike <= 0.0 {
            return Err(LoaderError::InvalidRow {
                line,
                message: format!("strike must be positive, got {}", row.strike),
            });
        }

        rows.push(row);
    }

    debug!(path = %path.display(), rows = rows.len(), "Comparison read from file");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::OptionType;

    fn sample() -> Vec<ComparisonRow> {
        let expiry = Date::from_ymd(2025, 8, 28).unwrap();
        vec![
            ComparisonRow {
                strike: 24_500.0,
                option_type: OptionType::Call,
                last_price: 331.1,
                iv: 0.1087,
                expiry: "28-Aug-2025".to_string(),
                expiry_dt: expiry,
                time_to_expiry: 13.0 / 252.0,
                bs_price: 325.4,
                error: 325.4 - 331.1,
                solved_iv: None,
            },
            ComparisonRow {
                strike: 26_500.0,
                option_type: OptionType::Put,
                last_price: 0.0,
                iv: 0.0,
                expiry: "28-Aug-2025".to_string(),
                expiry_dt: expiry,
                time_to_expiry: 13.0 / 252.0,
                bs_price: 1800.0,
                error: 1800.0,
                solved_iv: Some(0.2),
            },
        ]
    }

    #[test]
    fn test_header_and_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_rows(&path, &sample()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "strike,type,last_price,iv,expiry,expiry_dt,time_to_expiry,bs_price,error,solved_iv"
        );
        let first = lines.next().unwrap();
        assert!(first.starts_with("24500.0,call,331.1,0.1087,28-Aug-2025,2025-08-28,"));
        assert!(first.ends_with(','), "unsolved iv should be an empty cell: {}", first);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("nested").join("out.csv");
        assert_eq!(write_rows(&path, &sample()).unwrap(), 2);
        assert!(path.exists());
    }

    #[test]
    fn test_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_rows(&path, &sample()).unwrap();
        assert_eq!(read_rows(&path).unwrap(), sample());
    }

    #[test]
    fn test_rejects_unknown_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(
            &path,
            "strike,type,last_price,iv,expiry,expiry_dt,time_to_expiry,bs_price,error,solved_iv\n\
             24500,straddle,1,0.1,28-Aug-2025,2025-08-28,0.05,1,0,\n",
        )
        .unwrap();
        assert!(matches!(read_rows(&path), Err(LoaderError::Csv(_))));
    }

    #[test]
    fn test_rejects_mismatched_expiry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(
            &path,
            "strike,type,last_price,iv,expiry,expiry_dt,time_to_expiry,bs_price,error,solved_iv\n\
             24500,put,1,0.1,28-Aug-2025,2025-08-21,0.05,1,0,\n",
        )
        .unwrap();
        match read_rows(&path) {
            Err(LoaderError::InvalidRow { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected invalid row, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        assert!(read_rows("no/such/file.csv").is_err());
    }
}
