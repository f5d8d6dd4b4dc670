//! services/api/src/web/state.rs
//!
//! Defines the application state shared by every request handler.

use crate::config::Config;
use crate::error::ApiError;
use lounge_directory_core::{Catalog, DatasetSource};
use std::sync::Arc;
use tracing::info;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Loads both datasets from `source` and validates them into a catalog.
    pub async fn load(config: Arc<Config>, source: &dyn DatasetSource) -> Result<Self, ApiError> {
        let lounges = source.load_lounges().await?;
        let airports = source.load_airports().await?;
        if airports.is_none() {
            info!("No airport dataset configured; aggregating airports from lounges");
        }

        let catalog = Catalog::from_datasets(lounges, airports)?;
        Ok(Self {
            catalog: Arc::new(catalog),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lounge_directory_core::domain::{AirportData, LoungeData};
    use lounge_directory_core::{PortError, PortResult};

    struct FixedSource {
        lounges: serde_json::Value,
    }

    #[async_trait]
    impl DatasetSource for FixedSource {
        async fn load_lounges(&self) -> PortResult<LoungeData> {
            serde_json::from_value(self.lounges.clone())
                .map_err(|e| PortError::Malformed(e.to_string()))
        }

        async fn load_airports(&self) -> PortResult<Option<AirportData>> {
            Ok(None)
        }
    }

    fn config() -> Arc<Config> {
        Arc::new(Config::from_lookup(|_| None).unwrap())
    }

    #[tokio::test]
    async fn aggregates_airports_when_none_are_supplied() {
        let source = FixedSource {
            lounges: serde_json::json!({
                "total": 2,
                "lounges": [
                    { "id": "a", "name": "A", "airport_code": "LHR", "airport_name": "Heathrow" },
                    { "id": "b", "name": "B", "airport_code": "LHR", "airport_name": "Heathrow" }
                ]
            }),
        };

        let state = AppState::load(config(), &source).await.unwrap();
        assert_eq!(state.catalog.airports().len(), 1);
        assert_eq!(state.catalog.airport("LHR").unwrap().lounge_count, 2);
    }

    #[tokio::test]
    async fn schema_violations_fail_at_load() {
        let source = FixedSource {
            lounges: serde_json::json!({
                "lounges": [
                    { "id": "a", "name": "A", "airport_code": "LHR" },
                    { "id": "a", "name": "B", "airport_code": "LHR" }
                ]
            }),
        };

        let result = AppState::load(config(), &source).await;
        assert!(matches!(result, Err(ApiError::Catalog(_))));
    }
}
