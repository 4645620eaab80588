use crate::logic::violation::{RuleResult, RuleViolation};
use crate::model::{Dinosaur, Id};

pub fn require_species_id(species_id: Option<Id>) -> RuleResult<Id> {
    species_id.ok_or(RuleViolation::SpeciesIdMissing)
}

/// A caged dinosaur keeps its species; otherwise the cage could end up
/// with mixed diets.
pub fn ensure_species_change_allowed(existing: &Dinosaur, species_id: Id) -> RuleResult {
    if existing.cage_id.is_some() && existing.species_id != species_id {
        return Err(RuleViolation::SpeciesLockedInCage);
    }
    Ok(())
}
