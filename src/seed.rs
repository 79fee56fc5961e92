use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::*;
use tracing::{debug, info, warn};

use crate::domain::HRError;
use crate::employee::{Employee, Field};

#[derive(Debug, PartialEq)]
enum FileType {
    CSV,
    PARQUET,
    ARROW,
}

/// Resolve `~` and environment variables in a user supplied path.
pub fn expand_path(raw: &str) -> Result<PathBuf, HRError> {
    let expanded =
        shellexpand::full(raw).map_err(|e| HRError::LoadingFailed(e.to_string()))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Read employees from a csv, parquet or arrow file. Every record field is
/// looked up by its key (`firstName`) or its header (`First Name`). Rows with
/// an empty field or a date not written as `YYYY-MM-DD` are skipped, the same
/// way the creation form refuses them.
pub fn load_employees(path: &Path) -> Result<Vec<Employee>, HRError> {
    let file_type = get_file_type(path)?;
    let start_time = Instant::now();

    let frame = match file_type {
        FileType::CSV => load_csv(path)?,
        FileType::PARQUET => load_parquet(path)?,
        FileType::ARROW => load_arrow(path)?,
    };
    let df = frame.collect()?;

    let names: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();
    let mut columns: Vec<(Field, Vec<Option<String>>)> = Vec::with_capacity(Field::ALL.len());
    for field in Field::ALL {
        let name = names
            .iter()
            .find(|n| n.as_str() == field.key() || n.as_str() == field.label())
            .ok_or_else(|| HRError::MissingColumn(field.key().to_string()))?;
        columns.push((field, load_column(&df, name)?));
    }

    let mut employees = Vec::with_capacity(df.height());
    let mut skipped = 0;
    for row in 0..df.height() {
        let mut employee = Employee::default();
        for (field, values) in columns.iter() {
            if let Some(Some(value)) = values.get(row) {
                *employee.field_mut(*field) = value.clone();
            }
        }
        let missing = employee.missing_fields();
        let invalid = employee.invalid_dates();
        if missing.is_empty() && invalid.is_empty() {
            employees.push(employee);
        } else {
            debug!("Skipping row {row}, missing {missing:?}, invalid {invalid:?}");
            skipped += 1;
        }
    }

    if skipped > 0 {
        warn!("Skipped {skipped} incomplete rows in {}", path.display());
    }
    info!(
        "Loaded {} employees from {} in {}ms",
        employees.len(),
        path.display(),
        start_time.elapsed().as_millis()
    );
    Ok(employees)
}

fn load_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, PolarsError> {
    let col = df.column(name)?.cast(&DataType::String)?;
    let series = col.str()?;
    Ok(series
        .into_iter()
        .map(|v| v.map(|s| s.trim().to_string()))
        .collect())
}

fn get_file_type(path: &Path) -> Result<FileType, HRError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => HRError::FileNotFound,
        ErrorKind::PermissionDenied => HRError::PermissionDenied,
        _ => HRError::IoError(e),
    })?;
    if !metadata.is_file() {
        return Err(HRError::LoadingFailed("Not a file!".into()));
    }
    detect_file_type(path)
}

fn detect_file_type(path: &Path) -> Result<FileType, HRError> {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_uppercase())
        .as_deref()
    {
        Some("CSV") => Ok(FileType::CSV),
        Some("PARQUET") | Some("PQ") => Ok(FileType::PARQUET),
        Some("ARROW") | Some("IPC") | Some("FEATHER") => Ok(FileType::ARROW),
        _ => Err(HRError::UnknownFileType),
    }
}

// Schema inference is off so zip codes keep their leading zeros.
fn load_csv(path: &Path) -> Result<LazyFrame, PolarsError> {
    LazyCsvReader::new(PlPath::Local(path.into()))
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()
}

fn load_parquet(path: &Path) -> Result<LazyFrame, PolarsError> {
    LazyFrame::scan_parquet(PlPath::Local(path.into()), ScanArgsParquet::default())
}

fn load_arrow(path: &Path) -> Result<LazyFrame, PolarsError> {
    LazyFrame::scan_ipc(
        PlPath::Local(path.into()),
        polars::io::ipc::IpcScanOptions,
        UnifiedScanArgs::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("hrnet-{}-{name}", std::process::id()));
        let mut file = fs::File::create(&path).expect("create temp file");
        file.write_all(content.as_bytes()).expect("write temp file");
        path
    }

    #[test]
    fn file_types_by_extension() {
        assert_eq!(detect_file_type(Path::new("a.csv")).ok(), Some(FileType::CSV));
        assert_eq!(detect_file_type(Path::new("a.PQ")).ok(), Some(FileType::PARQUET));
        assert_eq!(detect_file_type(Path::new("a.feather")).ok(), Some(FileType::ARROW));
        assert!(matches!(
            detect_file_type(Path::new("a.xlsx")),
            Err(HRError::UnknownFileType)
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let result = load_employees(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(HRError::FileNotFound)));
    }

    #[test]
    fn loads_csv_by_key_and_header() {
        let path = write_temp(
            "staff.csv",
            "firstName,Last Name,startDate,department,dateOfBirth,street,city,state,Zip Code\n\
             Ada,Lovelace,2024-01-02,Engineering,1815-12-10,1 Square,London,NY,02134\n\
             Bob,,2024-01-02,Sales,1980-01-01,2 Road,Paris,CA,90001\n\
             Cy,Young,01/02/2024,Sales,1980-01-01,3 Lane,Austin,TX,73301\n",
        );
        let employees = load_employees(&path).expect("load csv");
        let _ = fs::remove_file(&path);

        // Bob has no last name and Cy a malformed start date.
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].last_name, "Lovelace");
        assert_eq!(employees[0].zip_code, "02134");
    }

    #[test]
    fn missing_column_fails() {
        let path = write_temp("partial.csv", "firstName,lastName\nAda,Lovelace\n");
        let result = load_employees(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(HRError::MissingColumn(c)) if c == "startDate"));
    }
}
