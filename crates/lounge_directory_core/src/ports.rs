//! crates/lounge_directory_core/src/ports.rs
//!
//! Defines the service contracts (traits) at the boundary of the core.
//! Storage for persisted selection state and the source of the static
//! datasets are both injected, so the core stays independent of browsers,
//! files and runtimes.

use crate::domain::{AirportData, LoungeData};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Malformed data: {0}")]
    Malformed(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Durable key-value storage for small pieces of client-side state.
///
/// Implementations must make a value written by `set` visible to every later
/// `get` on the same store, including one opened after a restart.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> PortResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> PortResult<()>;

    fn remove(&self, key: &str) -> PortResult<()>;
}

/// Supplies the static lounge and airport collections.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn load_lounges(&self) -> PortResult<LoungeData>;

    /// Returns `None` when no pre-aggregated airport dataset exists; callers
    /// then derive airports from the lounges.
    async fn load_airports(&self) -> PortResult<Option<AirportData>>;
}
