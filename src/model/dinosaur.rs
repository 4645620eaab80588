use crate::model::Id;
use serde::{Deserialize, Serialize};

/// A dinosaur references its species and, optionally, the cage it lives in.
/// Neither reference is owned: removing either side never cascades.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dinosaur {
    pub id: Id,
    pub name: String,
    pub species_id: Id,
    pub cage_id: Option<Id>,
}

impl Dinosaur {
    /// New dinosaurs are never caged on creation.
    pub fn new(name: String, species_id: Id) -> Self {
        Self {
            id: 0,
            name,
            species_id,
            cage_id: None,
        }
    }

    pub fn is_in_cage(&self, cage_id: Id) -> bool {
        self.cage_id == Some(cage_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DinosaurInput {
    pub name: Option<String>,
    pub species_id: Option<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DinosaurResource {
    pub id: Id,
    pub name: String,
    pub species_id: Id,
    pub species_name: String,
    pub cage_id: Option<Id>,
}

impl DinosaurResource {
    pub fn new(dinosaur: &Dinosaur, species_name: String) -> Self {
        Self {
            id: dinosaur.id,
            name: dinosaur.name.clone(),
            species_id: dinosaur.species_id,
            species_name,
            cage_id: dinosaur.cage_id,
        }
    }
}
