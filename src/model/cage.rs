use crate::model::common::parse_variant;
use crate::model::Id;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerStatus {
    #[default]
    Active,
    Down,
}

impl PowerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerStatus::Active => "Active",
            PowerStatus::Down => "Down",
        }
    }
}

impl fmt::Display for PowerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPowerStatus(pub String);

impl FromStr for PowerStatus {
    type Err = UnknownPowerStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &[("Active", PowerStatus::Active), ("Down", PowerStatus::Down)])
            .ok_or_else(|| UnknownPowerStatus(s.to_string()))
    }
}

/// Persisted cage. The number of occupants is never stored here; it is
/// always counted from the dinosaurs that reference the cage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cage {
    pub id: Id,
    pub name: String,
    pub max_capacity: i32,
    pub power_status: PowerStatus,
}

impl Cage {
    /// New cages always start powered.
    pub fn new(name: String, max_capacity: i32) -> Self {
        Self {
            id: 0,
            name,
            max_capacity,
            power_status: PowerStatus::Active,
        }
    }
}

/// Write-side payload for `POST /cages` and `PUT /cages/:id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CageInput {
    pub name: Option<String>,
    pub max_capacity: Option<i32>,
    pub power_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CageResource {
    pub id: Id,
    pub name: String,
    pub max_capacity: i32,
    pub dinosaur_count: usize,
    pub power_status: PowerStatus,
}

impl CageResource {
    pub fn new(cage: &Cage, dinosaur_count: usize) -> Self {
        Self {
            id: cage.id,
            name: cage.name.clone(),
            max_capacity: cage.max_capacity,
            dinosaur_count,
            power_status: cage.power_status,
        }
    }
}
