//! crates/lounge_directory_core/src/catalog.rs
//!
//! The read-only dataset accessors.
//!
//! Raw JSON records are checked once, when the catalog is built, so the rest
//! of the crate can rely on the invariants below instead of re-checking
//! fields at every use:
//! - every lounge has a non-empty, unique `id`, a `name` and an `airport_code`;
//! - airport codes are unique;
//! - every lounge listed under an airport carries that airport's code;
//! - `lounge_count` equals the number of listed lounges.

use crate::domain::{Airport, AirportData, Lounge, LoungeData};
use crate::facets::{unique_flat_values, AirportFacets, LoungeFacets};
use crate::filter::{filter_airports, filter_lounges, AirportFilter, LoungeFilter};
use std::collections::HashMap;
use tracing::info;

/// Sort key standing in for a missing terminal, so those lounges list last.
const MISSING_TERMINAL_SORT_KEY: &str = "ZZZ";

const COMMON_AMENITY_LIMIT: usize = 10;

/// How many neighbouring airports an airport page suggests.
pub const RELATED_AIRPORT_LIMIT: usize = 3;

/// A violation of the dataset schema found while building a [`Catalog`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Lounge #{index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("Duplicate lounge id: {0}")]
    DuplicateLounge(String),
    #[error("Airport #{0} is missing its code")]
    MissingAirportCode(usize),
    #[error("Duplicate airport code: {0}")]
    DuplicateAirport(String),
    #[error("Lounge {lounge} is listed under airport {airport} but has airport code {found}")]
    AirportMismatch {
        airport: String,
        lounge: String,
        found: String,
    },
    #[error("Airport {code} reports {reported} lounges but lists {actual}")]
    LoungeCountMismatch {
        code: String,
        reported: usize,
        actual: usize,
    },
}

//=========================================================================================
// Catalog
//=========================================================================================

/// The validated lounge and airport collections plus their memoized facets.
#[derive(Debug, Clone)]
pub struct Catalog {
    lounges: Vec<Lounge>,
    airports: Vec<Airport>,
    lounge_index: HashMap<String, usize>,
    airport_index: HashMap<String, usize>,
    lounge_facets: LoungeFacets,
    airport_facets: AirportFacets,
}

impl Catalog {
    /// Builds a catalog from both collections, validating them together.
    pub fn new(lounges: Vec<Lounge>, airports: Vec<Airport>) -> Result<Self, CatalogError> {
        let lounge_index = index_lounges(&lounges)?;

        let mut airport_index = HashMap::with_capacity(airports.len());
        let mut normalized = Vec::with_capacity(airports.len());
        for (index, airport) in airports.into_iter().enumerate() {
            if airport.code.trim().is_empty() {
                return Err(CatalogError::MissingAirportCode(index));
            }
            if airport_index.insert(airport.code.clone(), index).is_some() {
                return Err(CatalogError::DuplicateAirport(airport.code));
            }
            normalized.push(normalize_airport(airport)?);
        }

        let lounge_facets = LoungeFacets::from_lounges(&lounges);
        let airport_facets = AirportFacets::from_airports(&normalized);

        info!(
            "Catalog ready: {} lounges across {} airports",
            lounges.len(),
            normalized.len()
        );

        Ok(Self {
            lounges,
            airports: normalized,
            lounge_index,
            airport_index,
            lounge_facets,
            airport_facets,
        })
    }

    /// Builds a catalog whose airports are aggregated from `lounges`.
    pub fn from_lounges(lounges: Vec<Lounge>) -> Result<Self, CatalogError> {
        let airports = aggregate_airports(&lounges);
        Self::new(lounges, airports)
    }

    /// Builds a catalog from the on-disk envelopes, aggregating airports when
    /// no airport dataset is available.
    pub fn from_datasets(
        lounges: LoungeData,
        airports: Option<AirportData>,
    ) -> Result<Self, CatalogError> {
        match airports {
            Some(data) => Self::new(lounges.lounges, data.airports),
            None => Self::from_lounges(lounges.lounges),
        }
    }

    pub fn lounges(&self) -> &[Lounge] {
        &self.lounges
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn lounge(&self, id: &str) -> Option<&Lounge> {
        self.lounge_index.get(id).map(|&i| &self.lounges[i])
    }

    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.airport_index.get(code).map(|&i| &self.airports[i])
    }

    /// Up to [`RELATED_AIRPORT_LIMIT`] other airports in the same country, in
    /// dataset order.
    pub fn related_airports(&self, code: &str) -> Vec<&Airport> {
        let Some(country) = self.airport(code).and_then(|a| a.country.as_deref()) else {
            return Vec::new();
        };
        self.airports
            .iter()
            .filter(|a| a.code != code && a.country.as_deref() == Some(country))
            .take(RELATED_AIRPORT_LIMIT)
            .collect()
    }

    pub fn lounge_facets(&self) -> &LoungeFacets {
        &self.lounge_facets
    }

    pub fn airport_facets(&self) -> &AirportFacets {
        &self.airport_facets
    }

    pub fn filter_lounges(&self, filter: &LoungeFilter) -> Vec<&Lounge> {
        filter_lounges(&self.lounges, filter)
    }

    pub fn filter_airports(&self, filter: &AirportFilter) -> Vec<&Airport> {
        filter_airports(&self.airports, filter)
    }
}

fn index_lounges(lounges: &[Lounge]) -> Result<HashMap<String, usize>, CatalogError> {
    let mut index = HashMap::with_capacity(lounges.len());
    for (i, lounge) in lounges.iter().enumerate() {
        check_required(i, lounge)?;
        if index.insert(lounge.id.clone(), i).is_some() {
            return Err(CatalogError::DuplicateLounge(lounge.id.clone()));
        }
    }
    Ok(index)
}

fn check_required(index: usize, lounge: &Lounge) -> Result<(), CatalogError> {
    let required = [
        ("id", &lounge.id),
        ("name", &lounge.name),
        ("airport_code", &lounge.airport_code),
    ];
    match required.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(CatalogError::MissingField {
            index,
            field: *field,
        }),
        None => Ok(()),
    }
}

/// Back-fills member lounges from their airport and rebuilds the terminal map.
fn normalize_airport(mut airport: Airport) -> Result<Airport, CatalogError> {
    if airport.lounge_count != airport.lounges.len() {
        return Err(CatalogError::LoungeCountMismatch {
            code: airport.code,
            reported: airport.lounge_count,
            actual: airport.lounges.len(),
        });
    }

    for (index, lounge) in airport.lounges.iter_mut().enumerate() {
        if lounge.airport_code.is_empty() {
            lounge.airport_code = airport.code.clone();
        } else if lounge.airport_code != airport.code {
            return Err(CatalogError::AirportMismatch {
                airport: airport.code.clone(),
                lounge: lounge.id.clone(),
                found: lounge.airport_code.clone(),
            });
        }
        check_required(index, lounge)?;

        if lounge.airport_name.is_none() && !airport.name.is_empty() {
            lounge.airport_name = Some(airport.name.clone());
        }
        lounge.city = lounge.city.take().or_else(|| airport.city.clone());
        lounge.country = lounge.country.take().or_else(|| airport.country.clone());
        lounge.continent = lounge.continent.take().or_else(|| airport.continent.clone());
        lounge.iso_country = lounge.iso_country.take().or_else(|| airport.iso_country.clone());
    }

    airport.terminals = Airport::group_by_terminal(&airport.lounges);
    Ok(airport)
}

//=========================================================================================
// Airport Aggregation
//=========================================================================================

/// Groups lounges into airports by `airport_code`, deriving every aggregate.
///
/// Airports come out ordered by lounge count (descending), then name.
/// Lounges without an airport code are skipped.
pub fn aggregate_airports(lounges: &[Lounge]) -> Vec<Airport> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<Lounge>> = HashMap::new();
    for lounge in lounges.iter().filter(|l| !l.airport_code.is_empty()) {
        let members = groups.entry(lounge.airport_code.as_str()).or_insert_with(|| {
            order.push(lounge.airport_code.as_str());
            Vec::new()
        });
        members.push(lounge.clone());
    }

    let mut airports: Vec<Airport> = order
        .into_iter()
        .filter_map(|code| groups.remove(code).map(|members| build_airport(code, members)))
        .collect();

    airports.sort_by(|a, b| {
        b.lounge_count
            .cmp(&a.lounge_count)
            .then_with(|| a.name.cmp(&b.name))
    });
    airports
}

fn build_airport(code: &str, mut members: Vec<Lounge>) -> Airport {
    let info = members[0].clone();

    members.sort_by(|a, b| {
        let key = |l: &Lounge| l.terminal.clone().unwrap_or_else(|| MISSING_TERMINAL_SORT_KEY.to_string());
        key(a).cmp(&key(b)).then_with(|| a.name.cmp(&b.name))
    });

    Airport {
        code: code.to_string(),
        name: info.airport_name.unwrap_or_default(),
        city: info.city,
        country: info.country,
        continent: info.continent,
        iso_country: info.iso_country,
        coordinates: info.coordinates,
        lounge_count: members.len(),
        avg_rating: average_rating(&members),
        terminals: Airport::group_by_terminal(&members),
        available_access_methods: unique_flat_values(&members, |l| {
            l.access_methods.iter().map(String::as_str)
        }),
        common_amenities: common_amenities(&members),
        lounges: members,
    }
}

/// Mean rating of the rated lounges, rounded to one decimal; 0 when none are rated.
pub fn average_rating(lounges: &[Lounge]) -> f64 {
    let rated: Vec<f64> = lounges.iter().filter(|l| l.is_rated()).map(|l| l.rating).collect();
    if rated.is_empty() {
        return 0.0;
    }
    let mean = rated.iter().sum::<f64>() / rated.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// The most frequent amenities, most common first, ties by name.
fn common_amenities(lounges: &[Lounge]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for amenity in lounges.iter().flat_map(|l| l.amenities.iter()) {
        *counts.entry(amenity.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(COMMON_AMENITY_LIMIT)
        .map(|(amenity, _)| amenity.to_string())
        .collect()
}
