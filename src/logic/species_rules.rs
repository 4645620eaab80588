use crate::logic::violation::{RuleResult, RuleViolation};
use crate::model::{Species, SpeciesType};

/// Validate the species type of a payload.
///
/// The text must name a diet, in any letter case. On update it must name
/// the diet the species already has.
pub fn check_species_type(species_type: Option<&str>, existing: Option<&Species>) -> RuleResult<SpeciesType> {
    let raw = match species_type {
        None | Some("") => return Err(RuleViolation::SpeciesTypeMissing),
        Some(raw) => raw,
    };

    let parsed = raw.parse::<SpeciesType>();
    match existing {
        None => parsed.map_err(|_| RuleViolation::SpeciesTypeInvalid),
        Some(species) if parsed == Ok(species.species_type) => Ok(species.species_type),
        Some(_) => Err(RuleViolation::SpeciesTypeChanged),
    }
}

pub fn ensure_species_unused(referencing_dinosaurs: usize) -> RuleResult {
    if referencing_dinosaurs > 0 {
        return Err(RuleViolation::SpeciesInUse);
    }
    Ok(())
}
