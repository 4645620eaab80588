use crate::model::Id;
use thiserror::Error;

/// A broken business rule. The display text is the exact message returned
/// to clients with a 400 status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("Body must be supplied.")]
    BodyMissing,
    #[error("Name must be supplied.")]
    NameMissing,
    #[error("Name already exists.")]
    NameTaken,

    #[error("MaxCapacity must be supplied.")]
    MaxCapacityMissing,
    #[error("MaxCapacity is invalid.")]
    MaxCapacityInvalid,
    #[error("MaxCapacity must be higher than DinosaurCount.")]
    MaxCapacityBelowCount,
    #[error("PowerStatus must be supplied.")]
    PowerStatusMissing,
    #[error("PowerStatus must be 'active' or 'down'.")]
    PowerStatusInvalid,
    #[error("PowerStatus cannot be set to 'down' when DinosaurCount > 0.")]
    PowerDownWhileOccupied,
    #[error("Cannot delete cage if DinosaurCount > 0.")]
    CageOccupied,

    #[error("Dinosaur cannot be added if PowerStatus is 'down'.")]
    CagePoweredDown,
    #[error("Cannot put a carnivore and a herbivore in the same cage.")]
    MixedDiet,
    // Kept word for word; existing clients match on this text.
    #[error("Dinosaur cannot cage is at MaxCapacity.")]
    CageFull,

    #[error("SpeciesType must be supplied.")]
    SpeciesTypeMissing,
    #[error("SpeciesType must be 'carnivore' or 'herbivore'.")]
    SpeciesTypeInvalid,
    #[error("SpeciesType cannot be changed.")]
    SpeciesTypeChanged,
    #[error("Cannot delete while Dinosaurs of this species exist.")]
    SpeciesInUse,

    #[error("SpeciesId must be supplied.")]
    SpeciesIdMissing,
    #[error("SpeciesId is invalid.")]
    SpeciesIdInvalid,
    #[error("Species cannot be changed for a dinosaur in a cage.")]
    SpeciesLockedInCage,
}

pub type RuleResult<T = ()> = Result<T, RuleViolation>;

/// Returns the supplied name, rejecting a missing or empty one.
pub fn require_name(name: Option<&str>) -> RuleResult<&str> {
    match name {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(RuleViolation::NameMissing),
    }
}

/// Names are unique per entity type. `owners` are the ids that already
/// carry the requested name; an entity keeping its own name is fine.
pub fn ensure_unique_name(
    owners: impl IntoIterator<Item = Id>,
    updating: Option<Id>,
) -> RuleResult {
    if owners.into_iter().any(|id| Some(id) != updating) {
        return Err(RuleViolation::NameTaken);
    }
    Ok(())
}
