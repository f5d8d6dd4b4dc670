//! services/api/src/web/protocol.rs
//!
//! Defines the query parameters accepted and the JSON bodies returned by the
//! directory endpoints.

use lounge_directory_core::{
    Airport, AirportFacets, AirportFilter, AirportSort, Lounge, LoungeFacets, LoungeFilter,
    LoungeSort, LoungeType, Page, RatingEdge,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

//=========================================================================================
// Query Parameters
//=========================================================================================

/// Filter selections for the lounge listing. Absent values match everything.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoungeQuery {
    /// Case-insensitive match on lounge name, city, airport code or airport name.
    pub search: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    /// Composite airport key, e.g. `LHR - London Heathrow`.
    pub airport: Option<String>,
    pub continent: Option<String>,
    pub access_method: Option<String>,
    /// One of `independent`, `operator`, `centurion`, `partner`.
    #[param(value_type = Option<String>)]
    pub lounge_type: Option<LoungeType>,
    /// One of `featured`, `rating`, `name`.
    #[param(value_type = Option<String>)]
    pub sort: Option<LoungeSort>,
    /// 1-based; clamped to the available pages.
    pub page: Option<usize>,
}

impl LoungeQuery {
    pub fn to_filter(&self) -> LoungeFilter {
        let mut filter = LoungeFilter::new();
        filter.set_search(self.search.clone().unwrap_or_default());
        filter.set_country(self.country.clone().unwrap_or_default());
        filter.set_city(self.city.clone().unwrap_or_default());
        filter.set_airport(self.airport.clone().unwrap_or_default());
        filter.set_continent(self.continent.clone().unwrap_or_default());
        filter.set_access_method(self.access_method.clone().unwrap_or_default());
        filter.set_lounge_type(self.lounge_type);
        filter.set_sort(self.sort.unwrap_or_default());
        // Page last: every setter above resets it.
        filter.set_page(self.page.unwrap_or(1));
        filter
    }
}

/// Filter selections for the airport directory.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AirportQuery {
    /// Case-insensitive match on airport name, code or city.
    pub search: Option<String>,
    pub country: Option<String>,
    pub continent: Option<String>,
    /// One of `lounges`, `rating`, `name`.
    #[param(value_type = Option<String>)]
    pub sort: Option<AirportSort>,
}

impl AirportQuery {
    pub fn to_filter(&self) -> AirportFilter {
        let mut filter = AirportFilter::new();
        filter.set_search(self.search.clone().unwrap_or_default());
        filter.set_country(self.country.clone().unwrap_or_default());
        filter.set_continent(self.continent.clone().unwrap_or_default());
        filter.set_sort(self.sort.unwrap_or_default());
        filter
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompareQuery {
    pub lounge1: Option<String>,
    pub lounge2: Option<String>,
}

//=========================================================================================
// Response Bodies
//=========================================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub lounges: usize,
    pub airports: usize,
}

/// One page of the lounge listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoungePageResponse {
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<Lounge>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
    pub page_numbers: Vec<usize>,
    pub first_item: usize,
    pub last_item: usize,
    pub filters_active: bool,
}

impl LoungePageResponse {
    pub fn from_page(page: &Page<'_, &Lounge>, filters_active: bool) -> Self {
        Self {
            items: page.items().iter().map(|l| (*l).clone()).collect(),
            page: page.current_page(),
            total_pages: page.total_pages(),
            total_items: page.total_items(),
            page_size: page.page_size(),
            page_numbers: page.page_numbers(),
            first_item: page.first_item_number(),
            last_item: page.last_item_number(),
            filters_active,
        }
    }
}

/// A directory card: the airport without its member lounges.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AirportSummary {
    pub code: String,
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub continent: Option<String>,
    pub lounge_count: usize,
    pub avg_rating: f64,
    pub terminal_count: usize,
}

impl From<&Airport> for AirportSummary {
    fn from(airport: &Airport) -> Self {
        Self {
            code: airport.code.clone(),
            name: airport.name.clone(),
            city: airport.city.clone(),
            country: airport.country.clone(),
            continent: airport.continent.clone(),
            lounge_count: airport.lounge_count,
            avg_rating: airport.avg_rating,
            terminal_count: airport.terminal_count(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AirportListResponse {
    pub total: usize,
    pub filters_active: bool,
    pub items: Vec<AirportSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AirportDetailResponse {
    #[schema(value_type = Object)]
    pub airport: Airport,
    pub total_reviews: u64,
    pub related: Vec<AirportSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoungeFacetsResponse {
    pub countries: Vec<String>,
    pub cities: Vec<String>,
    pub continents: Vec<String>,
    pub airports: Vec<String>,
    pub access_methods: Vec<String>,
    pub lounge_types: Vec<String>,
}

impl From<&LoungeFacets> for LoungeFacetsResponse {
    fn from(facets: &LoungeFacets) -> Self {
        Self {
            countries: facets.countries.clone(),
            cities: facets.cities.clone(),
            continents: facets.continents.clone(),
            airports: facets.airports.clone(),
            access_methods: facets.access_methods.clone(),
            lounge_types: facets.lounge_types.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AirportFacetsResponse {
    pub countries: Vec<String>,
    pub continents: Vec<String>,
}

impl From<&AirportFacets> for AirportFacetsResponse {
    fn from(facets: &AirportFacets) -> Self {
        Self {
            countries: facets.countries.clone(),
            continents: facets.continents.clone(),
        }
    }
}

/// Two lounges side by side.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompareResponse {
    #[schema(value_type = Object)]
    pub left: Lounge,
    #[schema(value_type = Object)]
    pub right: Lounge,
    /// `left`, `right` or `equal`.
    #[schema(value_type = String)]
    pub better_rating: RatingEdge,
    pub shared_access_methods: Vec<String>,
}
