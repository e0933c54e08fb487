// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use crate::error::FactoryError;
use serde_json::Value;
use std::path::Path;

/// Asynchronously loads the raw profile records from a JSON file.
///
/// The file must hold a JSON array. Individual elements are not decoded here,
/// so one bad record cannot prevent the others from being processed.
pub async fn load_records(path: &Path) -> Result<Vec<Value>, FactoryError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FactoryError::io(path, e))?;
    let records = parse_records(&content)?;
    log::info!("Loaded {} profile(s) from {}", records.len(), path.display());
    Ok(records)
}

/// Parses the input collection.
fn parse_records(content: &str) -> Result<Vec<Value>, FactoryError> {
    match serde_json::from_str(content).map_err(FactoryError::MalformedInput)? {
        Value::Array(records) => Ok(records),
        other => Err(FactoryError::NotACollection {
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Asynchronously writes a file, creating any missing parent directories.
pub async fn write_output(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), FactoryError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| FactoryError::io(parent, e))?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| FactoryError::io(path, e))?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}
