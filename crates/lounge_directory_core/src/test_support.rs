//! Fixture builders shared by the unit tests.

use crate::domain::{Airport, Lounge, LoungeType};
use std::collections::BTreeMap;

pub fn lounge(id: &str, name: &str, airport_code: &str) -> Lounge {
    Lounge {
        id: id.to_string(),
        name: name.to_string(),
        airport_code: airport_code.to_string(),
        airport_name: None,
        city: None,
        country: None,
        continent: None,
        iso_country: None,
        terminal: None,
        location: None,
        open_hours: None,
        description: None,
        amenities: Vec::new(),
        access_methods: Vec::new(),
        lounge_type: LoungeType::Independent,
        rating: 0.0,
        review_count: 0,
        coordinates: None,
        images: Vec::new(),
    }
}

pub fn airport(code: &str, name: &str, lounge_count: usize, avg_rating: f64) -> Airport {
    Airport {
        code: code.to_string(),
        name: name.to_string(),
        city: None,
        country: None,
        continent: None,
        iso_country: None,
        coordinates: None,
        lounge_count,
        avg_rating,
        terminals: BTreeMap::new(),
        available_access_methods: Vec::new(),
        common_amenities: Vec::new(),
        lounges: Vec::new(),
    }
}

impl Lounge {
    pub fn access(mut self, methods: &[&str]) -> Self {
        self.access_methods = methods.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn amenities(mut self, amenities: &[&str]) -> Self {
        self.amenities = amenities.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.city = Some(city.to_string()).filter(|c| !c.trim().is_empty());
        self
    }

    pub fn country(mut self, country: &str) -> Self {
        self.country = Some(country.to_string());
        self
    }

    pub fn continent(mut self, continent: &str) -> Self {
        self.continent = Some(continent.to_string());
        self
    }

    pub fn airport_name(mut self, name: &str) -> Self {
        self.airport_name = Some(name.to_string());
        self
    }

    pub fn terminal(mut self, terminal: &str) -> Self {
        self.terminal = Some(terminal.to_string());
        self
    }

    pub fn typed(mut self, lounge_type: LoungeType) -> Self {
        self.lounge_type = lounge_type;
        self
    }

    pub fn rated(mut self, rating: f64, reviews: u32) -> Self {
        self.rating = rating;
        self.review_count = reviews;
        self
    }
}

impl Airport {
    pub fn located(mut self, city: &str, country: &str, continent: &str) -> Self {
        self.city = Some(city.to_string());
        self.country = Some(country.to_string());
        self.continent = Some(continent.to_string());
        self
    }
}
