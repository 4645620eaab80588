use crate::model::common::parse_variant;
use crate::model::Id;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Diet type shared by every dinosaur of a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeciesType {
    Carnivore,
    Herbivore,
}

impl SpeciesType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeciesType::Carnivore => "Carnivore",
            SpeciesType::Herbivore => "Herbivore",
        }
    }

    /// The diet that may not share a cage with this one.
    pub fn opposite(&self) -> Self {
        match self {
            SpeciesType::Carnivore => SpeciesType::Herbivore,
            SpeciesType::Herbivore => SpeciesType::Carnivore,
        }
    }

    pub fn from_is_carnivore(is_carnivore: bool) -> Self {
        if is_carnivore {
            SpeciesType::Carnivore
        } else {
            SpeciesType::Herbivore
        }
    }
}

impl fmt::Display for SpeciesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSpeciesType(pub String);

impl FromStr for SpeciesType {
    type Err = UnknownSpeciesType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(
            s,
            &[
                ("Carnivore", SpeciesType::Carnivore),
                ("Herbivore", SpeciesType::Herbivore),
            ],
        )
        .ok_or_else(|| UnknownSpeciesType(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Species {
    pub id: Id,
    pub name: String,
    pub species_type: SpeciesType,
}

impl Species {
    pub fn new(name: String, species_type: SpeciesType) -> Self {
        Self {
            id: 0,
            name,
            species_type,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesInput {
    pub name: Option<String>,
    pub species_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesResource {
    pub id: Id,
    pub name: String,
    pub species_type: SpeciesType,
}

impl From<&Species> for SpeciesResource {
    fn from(species: &Species) -> Self {
        Self {
            id: species.id,
            name: species.name.clone(),
            species_type: species.species_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_diet() {
        assert_eq!(SpeciesType::Carnivore.opposite(), SpeciesType::Herbivore);
        assert_eq!(SpeciesType::Herbivore.opposite(), SpeciesType::Carnivore);
    }

    #[test]
    fn test_species_type_renders_variant_name() {
        assert_eq!(SpeciesType::Carnivore.to_string(), "Carnivore");
        assert_eq!("herbivore".parse::<SpeciesType>(), Ok(SpeciesType::Herbivore));
        assert!("omnivore".parse::<SpeciesType>().is_err());
    }
}
