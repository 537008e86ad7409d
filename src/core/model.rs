//! Dataset records

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One country's attendance at one edition of the Games.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub id: u32,
    pub year: u16,
    pub city: String,
    pub medals_count: u32,
    pub athlete_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Country {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub country: String,
    pub participations: Vec<Participation>,
}

/// The currently published dataset. Replaced wholesale, never mutated.
pub type Snapshot = Arc<Vec<Country>>;
