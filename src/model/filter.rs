use crate::model::{Id, PowerStatus, SpeciesType};
use serde::{Deserialize, Serialize};

// Every field is an exact-match filter; `None` matches anything.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CageFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_status: Option<PowerStatus>,
}

impl CageFilter {
    pub fn by_name(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DinosaurFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub species_id: Option<Id>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cage_id: Option<Id>,

    /// Matches on the diet of the dinosaur's species.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet: Option<SpeciesType>,
}

impl DinosaurFilter {
    pub fn by_name(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn in_cage(cage_id: Id) -> Self {
        Self {
            cage_id: Some(cage_id),
            ..Self::default()
        }
    }

    pub fn of_species(species_id: Id) -> Self {
        Self {
            species_id: Some(species_id),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SpeciesFilter {
    pub fn by_name(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
        }
    }
}
