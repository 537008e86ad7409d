//! Aggregates derived from the published dataset for display

use crate::core::model::Country;
use std::collections::BTreeSet;

/// One slice of the medals-per-country pie.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub name: String,
    pub value: u64,
}

/// Medals won per edition for a single country.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub name: String,
    pub series: Vec<SeriesPoint>,
}

/// Headline figures shown on a country's detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryStats {
    pub entries: usize,
    pub total_medals: u64,
    pub total_athletes: u64,
}

impl From<&Country> for CountryStats {
    fn from(country: &Country) -> Self {
        CountryStats {
            entries: entries(country),
            total_medals: total_medals(country),
            total_athletes: total_athletes(country),
        }
    }
}

pub fn entries(country: &Country) -> usize {
    country.participations.len()
}

pub fn total_medals(country: &Country) -> u64 {
    country
        .participations
        .iter()
        .map(|p| u64::from(p.medals_count))
        .sum()
}

pub fn total_athletes(country: &Country) -> u64 {
    country
        .participations
        .iter()
        .map(|p| u64::from(p.athlete_count))
        .sum()
}

/// Number of distinct Games editions (years) present anywhere in the dataset.
pub fn distinct_games(countries: &[Country]) -> usize {
    countries
        .iter()
        .flat_map(|c| c.participations.iter().map(|p| p.year))
        .collect::<BTreeSet<_>>()
        .len()
}

pub fn medals_pie(countries: &[Country]) -> Vec<PieSlice> {
    countries
        .iter()
        .map(|c| PieSlice {
            name: c.country.clone(),
            value: total_medals(c),
        })
        .collect()
}

pub fn medals_line(country: &Country) -> LineChart {
    let mut participations: Vec<_> = country.participations.iter().collect();
    participations.sort_by_key(|p| p.year);

    LineChart {
        name: country.country.clone(),
        series: participations
            .into_iter()
            .map(|p| SeriesPoint {
                name: p.year.to_string(),
                value: u64::from(p.medals_count),
            })
            .collect(),
    }
}

/// Share of `value` in `total` as a percentage; zero when there is nothing to share.
pub fn share_pct(value: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (value as f64 / total as f64) * 100.0
    }
}
