//! crates/lounge_directory_core/src/facets.rs
//!
//! Derives the distinct, sorted option lists behind the filter dropdowns.
//! The datasets never change within a process, so facets are computed once
//! by the catalog and reused.

use crate::domain::{Airport, Lounge};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Locale-aware string ordering.
///
/// Strings are compared by base letters first, ignoring case and accents, so
/// "São Paulo" sorts between "Santiago" and "Sapporo". Ties are broken by
/// accent (unaccented first), then by case (lowercase first).
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| lowercase(a).cmp(lowercase(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn lowercase(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// Every distinct non-empty value of a single-valued field, sorted.
pub fn unique_values<'a, T, F>(records: &'a [T], selector: F) -> Vec<String>
where
    F: Fn(&'a T) -> Option<&'a str>,
{
    collect_sorted(records.iter().filter_map(selector))
}

/// Like [`unique_values`], for fields holding several values per record.
pub fn unique_flat_values<'a, T, F, I>(records: &'a [T], selector: F) -> Vec<String>
where
    F: Fn(&'a T) -> I,
    I: IntoIterator<Item = &'a str>,
{
    collect_sorted(records.iter().flat_map(selector))
}

fn collect_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let set: BTreeSet<&str> = values.filter(|v| !v.trim().is_empty()).collect();
    let mut out: Vec<String> = set.into_iter().map(str::to_string).collect();
    out.sort_by(|a, b| locale_cmp(a, b));
    out
}

//=========================================================================================
// Facet Sets
//=========================================================================================

/// Filter options for the lounge listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoungeFacets {
    pub countries: Vec<String>,
    pub cities: Vec<String>,
    pub continents: Vec<String>,
    /// Composite `"{code} - {name}"` keys.
    pub airports: Vec<String>,
    pub access_methods: Vec<String>,
    pub lounge_types: Vec<String>,
}

impl LoungeFacets {
    pub fn from_lounges(lounges: &[Lounge]) -> Self {
        let airport_keys: Vec<String> = lounges.iter().filter_map(Lounge::airport_key).collect();

        Self {
            countries: unique_values(lounges, |l| l.country.as_deref()),
            cities: unique_values(lounges, |l| l.city.as_deref()),
            continents: unique_values(lounges, |l| l.continent.as_deref()),
            airports: unique_values(&airport_keys, |k| Some(k.as_str())),
            access_methods: unique_flat_values(lounges, |l| {
                l.access_methods.iter().map(String::as_str)
            }),
            lounge_types: unique_values(lounges, |l| Some(l.lounge_type.as_str())),
        }
    }
}

/// Filter options for the airport directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AirportFacets {
    pub countries: Vec<String>,
    pub continents: Vec<String>,
}

impl AirportFacets {
    pub fn from_airports(airports: &[Airport]) -> Self {
        Self {
            countries: unique_values(airports, |a| a.country.as_deref()),
            continents: unique_values(airports, |a| a.continent.as_deref()),
        }
    }
}
