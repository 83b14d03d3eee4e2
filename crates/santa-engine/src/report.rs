use std::fs;
use std::path::Path;

use santa_core::errors::{ErrorInfo, SantaError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::assignment::Assignment;
use crate::exchange::ExchangeReport;

/// Writes any serializable payload as pretty JSON, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), SantaError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            SantaError::Serde(
                ErrorInfo::new("report-mkdir", err.to_string())
                    .with_context("path", parent.display().to_string()),
            )
        })?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|err| {
        SantaError::Serde(
            ErrorInfo::new("serialize-json", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    fs::write(path, json).map_err(|err| {
        SantaError::Serde(
            ErrorInfo::new("report-write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SantaError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        SantaError::Serde(
            ErrorInfo::new("report-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    serde_json::from_str(&contents).map_err(|err| {
        SantaError::Serde(
            ErrorInfo::new("deserialize-json", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

impl ExchangeReport {
    /// Writes the report to a JSON file.
    pub fn write(&self, path: &Path) -> Result<(), SantaError> {
        write_json(path, self)
    }

    /// Loads a report from disk.
    pub fn load(path: &Path) -> Result<Self, SantaError> {
        read_json(path)
    }
}

/// Loads the assignments held in a JSON file.
///
/// Accepts a bare `giver -> givees` object, a single exchange report, or the
/// array of reports a multi-round plan writes. Rounds come back in file
/// order. A report is recognized by its `provenance` object, which a bare
/// assignment cannot contain since every value there is a givee list.
pub fn load_assignments(path: &Path) -> Result<Vec<Assignment>, SantaError> {
    let value: Value = read_json(path)?;
    let parsed = if value.is_array() {
        serde_json::from_value::<Vec<ExchangeReport>>(value).map(|reports| {
            reports
                .into_iter()
                .map(|report| report.generation.assignment)
                .collect()
        })
    } else if is_report(&value) {
        serde_json::from_value::<ExchangeReport>(value)
            .map(|report| vec![report.generation.assignment])
    } else {
        serde_json::from_value::<Assignment>(value).map(|assignment| vec![assignment])
    };
    parsed.map_err(|err| {
        SantaError::Serde(
            ErrorInfo::new("deserialize-json", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

fn is_report(value: &Value) -> bool {
    value
        .get("provenance")
        .map(Value::is_object)
        .unwrap_or(false)
}
