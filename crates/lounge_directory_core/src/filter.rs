//! crates/lounge_directory_core/src/filter.rs
//!
//! Filter state and the filter/sort predicate for both listings.
//!
//! A record passes when every active predicate holds; an empty selection on
//! an axis matches everything. The result is a pure function of the dataset
//! and the filter, and sorting is stable, so equal keys keep dataset order.

use crate::domain::{Airport, Lounge, LoungeType};
use crate::facets::locale_cmp;
use serde::{Deserialize, Serialize};

//=========================================================================================
// Sort Keys
//=========================================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoungeSort {
    /// Dataset order.
    #[default]
    Featured,
    Rating,
    Name,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AirportSort {
    /// Lounge count, descending.
    #[default]
    Lounges,
    Rating,
    Name,
}

//=========================================================================================
// Predicates
//=========================================================================================

/// Case-insensitive substring match against any of the candidate fields.
pub fn matches_search(term: &str, fields: &[Option<&str>]) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Exact equality, or no filter at all. A missing value never matches a set filter.
pub fn matches_exact(filter: &str, value: Option<&str>) -> bool {
    filter.is_empty() || value == Some(filter)
}

/// Membership test on a multi-valued field.
pub fn matches_member(filter: &str, values: &[String]) -> bool {
    filter.is_empty() || values.iter().any(|v| v == filter)
}

//=========================================================================================
// Lounge Filter
//=========================================================================================

/// The filter state of the lounge listing.
///
/// Every filter setter sends the listing back to page 1, so a shrunk result
/// set can never be viewed at a stale offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoungeFilter {
    search: String,
    country: String,
    city: String,
    airport: String,
    continent: String,
    access_method: String,
    lounge_type: Option<LoungeType>,
    sort: LoungeSort,
    page: usize,
}

impl Default for LoungeFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            country: String::new(),
            city: String::new(),
            airport: String::new(),
            continent: String::new(),
            access_method: String::new(),
            lounge_type: None,
            sort: LoungeSort::default(),
            page: 1,
        }
    }
}

impl LoungeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// The composite `"{code} - {name}"` airport key.
    pub fn airport(&self) -> &str {
        &self.airport
    }

    pub fn continent(&self) -> &str {
        &self.continent
    }

    pub fn access_method(&self) -> &str {
        &self.access_method
    }

    pub fn lounge_type(&self) -> Option<LoungeType> {
        self.lounge_type
    }

    pub fn sort(&self) -> LoungeSort {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    pub fn set_country(&mut self, country: impl Into<String>) {
        self.country = country.into();
        self.page = 1;
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.city = city.into();
        self.page = 1;
    }

    pub fn set_airport(&mut self, airport_key: impl Into<String>) {
        self.airport = airport_key.into();
        self.page = 1;
    }

    pub fn set_continent(&mut self, continent: impl Into<String>) {
        self.continent = continent.into();
        self.page = 1;
    }

    pub fn set_access_method(&mut self, method: impl Into<String>) {
        self.access_method = method.into();
        self.page = 1;
    }

    /// `None` shows every type.
    pub fn set_lounge_type(&mut self, lounge_type: Option<LoungeType>) {
        self.lounge_type = lounge_type;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: LoungeSort) {
        self.sort = sort;
        self.page = 1;
    }

    /// Moves to `page`; 0 is treated as 1.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Whether any filter (not sort or page) is set.
    pub fn is_active(&self) -> bool {
        self.lounge_type.is_some()
            || [
                &self.search,
                &self.country,
                &self.city,
                &self.airport,
                &self.continent,
                &self.access_method,
            ]
            .iter()
            .any(|value| !value.is_empty())
    }

    /// Resets every field, including sort and page.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, lounge: &Lounge) -> bool {
        matches_search(
            &self.search,
            &[
                Some(lounge.name.as_str()),
                lounge.city.as_deref(),
                Some(lounge.airport_code.as_str()),
                lounge.airport_name.as_deref(),
            ],
        ) && matches_exact(&self.country, lounge.country.as_deref())
            && matches_exact(&self.city, lounge.city.as_deref())
            && matches_exact(&self.airport, lounge.airport_key().as_deref())
            && matches_exact(&self.continent, lounge.continent.as_deref())
            && matches_member(&self.access_method, &lounge.access_methods)
            && self.lounge_type.map_or(true, |t| t == lounge.lounge_type)
    }
}

/// Applies `filter` to `lounges` and orders the survivors.
pub fn filter_lounges<'a>(lounges: &'a [Lounge], filter: &LoungeFilter) -> Vec<&'a Lounge> {
    let mut matched: Vec<&Lounge> = lounges.iter().filter(|l| filter.matches(l)).collect();
    match filter.sort {
        LoungeSort::Featured => {}
        LoungeSort::Rating => matched.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        LoungeSort::Name => matched.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
    }
    matched
}

//=========================================================================================
// Airport Filter
//=========================================================================================

/// The filter state of the airport directory. The directory is not paginated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AirportFilter {
    search: String,
    country: String,
    continent: String,
    sort: AirportSort,
}

impl AirportFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn continent(&self) -> &str {
        &self.continent
    }

    pub fn sort(&self) -> AirportSort {
        self.sort
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn set_country(&mut self, country: impl Into<String>) {
        self.country = country.into();
    }

    pub fn set_continent(&mut self, continent: impl Into<String>) {
        self.continent = continent.into();
    }

    pub fn set_sort(&mut self, sort: AirportSort) {
        self.sort = sort;
    }

    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.country.is_empty() || !self.continent.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, airport: &Airport) -> bool {
        matches_search(
            &self.search,
            &[
                Some(airport.name.as_str()),
                Some(airport.code.as_str()),
                airport.city.as_deref(),
            ],
        ) && matches_exact(&self.country, airport.country.as_deref())
            && matches_exact(&self.continent, airport.continent.as_deref())
    }
}

/// Applies `filter` to `airports` and orders the survivors.
pub fn filter_airports<'a>(airports: &'a [Airport], filter: &AirportFilter) -> Vec<&'a Airport> {
    let mut matched: Vec<&Airport> = airports.iter().filter(|a| filter.matches(a)).collect();
    match filter.sort {
        AirportSort::Lounges => matched.sort_by(|a, b| b.lounge_count.cmp(&a.lounge_count)),
        AirportSort::Rating => matched.sort_by(|a, b| b.avg_rating.total_cmp(&a.avg_rating)),
        AirportSort::Name => matched.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
    }
    matched
}
