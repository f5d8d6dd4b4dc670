//! services/api/src/adapters/json_source.rs
//!
//! This module contains the dataset adapter that reads the static
//! `lounges.json` / `airports.json` files produced by the data pipeline.
//! It implements the `DatasetSource` port from the `core` crate.

use async_trait::async_trait;
use lounge_directory_core::domain::{AirportData, LoungeData};
use lounge_directory_core::ports::{DatasetSource, PortError, PortResult};
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `DatasetSource` port over JSON files on disk.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    lounges_path: PathBuf,
    airports_path: Option<PathBuf>,
}

impl JsonFileSource {
    /// Creates a new `JsonFileSource`.
    pub fn new(lounges_path: PathBuf, airports_path: Option<PathBuf>) -> Self {
        Self {
            lounges_path,
            airports_path,
        }
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> PortResult<T> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            PortError::NotFound(path.display().to_string())
        } else {
            PortError::Unexpected(format!("{}: {}", path.display(), e))
        }
    })?;

    serde_json::from_str(&contents)
        .map_err(|e| PortError::Malformed(format!("{}: {}", path.display(), e)))
}

//=========================================================================================
// `DatasetSource` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatasetSource for JsonFileSource {
    async fn load_lounges(&self) -> PortResult<LoungeData> {
        let data: LoungeData = read_json(&self.lounges_path).await?;
        info!(
            "Loaded {} lounges from {}",
            data.lounges.len(),
            self.lounges_path.display()
        );
        Ok(data)
    }

    async fn load_airports(&self) -> PortResult<Option<AirportData>> {
        let Some(path) = &self.airports_path else {
            return Ok(None);
        };
        let data: AirportData = read_json(path).await?;
        info!("Loaded {} airports from {}", data.airports.len(), path.display());
        Ok(Some(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn loads_lounge_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lounges.json");
        fs::write(
            &path,
            r#"{"total":1,"lounges":[{"id":"ist-1","name":"Turkish Airlines Lounge","airport_code":"IST"}]}"#,
        )
        .unwrap();

        let source = JsonFileSource::new(path, None);
        let data = source.load_lounges().await.unwrap();
        assert_eq!(data.lounges[0].airport_code, "IST");
        assert!(source.load_airports().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("airports.json");
        fs::write(&bad, r#"{"airports": [{"name": "no code"}]}"#).unwrap();

        let source = JsonFileSource::new(dir.path().join("absent.json"), Some(bad));
        assert!(matches!(source.load_lounges().await, Err(PortError::NotFound(_))));
        assert!(matches!(source.load_airports().await, Err(PortError::Malformed(_))));
    }
}
