pub mod catalog;
pub mod compare;
pub mod domain;
pub mod facets;
pub mod filter;
pub mod pagination;
pub mod ports;
pub mod store;
pub mod unlock;

#[cfg(test)]
mod test_support;

pub use catalog::{Catalog, CatalogError};
pub use compare::{
    better_rating, CompareRejection, ComparisonSelector, ComparisonView, RatingEdge,
    SelectionState, Subscription,
};
pub use domain::{
    Airport, AirportData, CompareItem, Coordinates, Lounge, LoungeData, LoungeType,
};
pub use facets::{AirportFacets, LoungeFacets};
pub use filter::{AirportFilter, AirportSort, LoungeFilter, LoungeSort};
pub use pagination::{paginate, Page, LOUNGES_PER_PAGE};
pub use ports::{DatasetSource, KeyValueStore, PortError, PortResult};
pub use store::{JsonFileStore, MemoryStore};
pub use unlock::UnlockGate;
