//! crates/lounge_directory_core/src/domain.rs
//!
//! Defines the core data structures for the lounge directory.
//! Records are read-only at runtime: they are produced by the offline data
//! pipeline and loaded once from static JSON.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Terminal bucket used when a lounge carries no terminal name.
pub const UNKNOWN_TERMINAL: &str = "Unknown";

/// Image shown for lounges that ship without photos.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder-lounge.jpg";

//=========================================================================================
// Lounge
//=========================================================================================

/// The category of operator running a lounge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoungeType {
    #[default]
    Independent,
    Operator,
    Centurion,
    Partner,
}

impl LoungeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoungeType::Independent => "independent",
            LoungeType::Operator => "operator",
            LoungeType::Centurion => "centurion",
            LoungeType::Partner => "partner",
        }
    }

    /// Human readable badge text.
    pub fn label(&self) -> &'static str {
        match self {
            LoungeType::Independent => "Independent",
            LoungeType::Operator => "Operator",
            LoungeType::Centurion => "Centurion",
            LoungeType::Partner => "Partner",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A single airport lounge facility.
///
/// `id` is the stable external key: it appears in URLs and in persisted
/// comparison/unlock state. Optional text fields treat an empty string as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lounge {
    pub id: String,
    pub name: String,
    /// Empty only for lounges nested inside an airport record, where the
    /// catalog back-fills it from the parent.
    #[serde(default)]
    pub airport_code: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub airport_name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub iso_country: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub open_hours: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub access_methods: Vec<String>,
    #[serde(default)]
    pub lounge_type: LoungeType,
    /// 0 means "unrated".
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Lounge {
    /// The composite `"{code} - {name}"` key used by the airport dropdown.
    pub fn airport_key(&self) -> Option<String> {
        self.airport_name
            .as_deref()
            .map(|name| format!("{} - {}", self.airport_code, name))
    }

    pub fn is_rated(&self) -> bool {
        self.rating > 0.0
    }

    pub fn terminal_or_unknown(&self) -> &str {
        self.terminal.as_deref().unwrap_or(UNKNOWN_TERMINAL)
    }

    pub fn cover_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE)
    }
}

//=========================================================================================
// Airport
//=========================================================================================

/// An aggregate of lounges sharing one airport code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub iso_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub lounge_count: usize,
    #[serde(default)]
    pub avg_rating: f64,
    /// Rebuilt from `lounges` at load time; never read from input.
    #[serde(default, skip_deserializing)]
    pub terminals: BTreeMap<String, Vec<Lounge>>,
    #[serde(default)]
    pub available_access_methods: Vec<String>,
    #[serde(default)]
    pub common_amenities: Vec<String>,
    #[serde(default)]
    pub lounges: Vec<Lounge>,
}

impl Airport {
    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    pub fn total_reviews(&self) -> u64 {
        self.lounges.iter().map(|l| u64::from(l.review_count)).sum()
    }

    /// Groups member lounges by terminal name.
    pub fn group_by_terminal(lounges: &[Lounge]) -> BTreeMap<String, Vec<Lounge>> {
        let mut terminals: BTreeMap<String, Vec<Lounge>> = BTreeMap::new();
        for lounge in lounges {
            terminals
                .entry(lounge.terminal_or_unknown().to_string())
                .or_default()
                .push(lounge.clone());
        }
        terminals
    }
}

//=========================================================================================
// Dataset Envelopes
//=========================================================================================

/// The on-disk shape of `lounges.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoungeData {
    #[serde(default)]
    pub total: usize,
    pub lounges: Vec<Lounge>,
}

/// The on-disk shape of `airports.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirportData {
    #[serde(default)]
    pub total: usize,
    pub airports: Vec<Airport>,
}

//=========================================================================================
// Comparison Summary
//=========================================================================================

/// The summary kept for each lounge in the comparison selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareItem {
    pub id: String,
    pub name: String,
    pub airport_code: String,
    pub image: String,
}

impl CompareItem {
    pub fn from_lounge(lounge: &Lounge) -> Self {
        Self {
            id: lounge.id.clone(),
            name: lounge.name.clone(),
            airport_code: lounge.airport_code.clone(),
            image: lounge.cover_image().to_string(),
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
