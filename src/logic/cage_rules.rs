use crate::logic::violation::{RuleResult, RuleViolation};
use crate::model::{Cage, CageInput, PowerStatus};

/// Check capacity and power settings of a cage payload.
///
/// `occupancy` is `None` when the cage is being created and the derived
/// dinosaur count of the existing cage when it is being updated. Creation
/// only validates the capacity; power status is ignored there because new
/// cages always start `Active`.
///
/// On update, returns the power status the cage should move to.
pub fn check_cage_settings(input: &CageInput, occupancy: Option<usize>) -> RuleResult<Option<PowerStatus>> {
    let max_capacity = input.max_capacity.ok_or(RuleViolation::MaxCapacityMissing)?;
    if max_capacity <= 0 {
        return Err(RuleViolation::MaxCapacityInvalid);
    }

    let Some(dinosaur_count) = occupancy else {
        return Ok(None);
    };

    if exceeds(dinosaur_count, max_capacity) {
        return Err(RuleViolation::MaxCapacityBelowCount);
    }

    let power_status = match input.power_status.as_deref() {
        None | Some("") => return Err(RuleViolation::PowerStatusMissing),
        Some(raw) => raw
            .parse::<PowerStatus>()
            .map_err(|_| RuleViolation::PowerStatusInvalid)?,
    };

    if power_status == PowerStatus::Down && dinosaur_count > 0 {
        return Err(RuleViolation::PowerDownWhileOccupied);
    }

    Ok(Some(power_status))
}

pub fn ensure_cage_empty(dinosaur_count: usize) -> RuleResult {
    if dinosaur_count > 0 {
        return Err(RuleViolation::CageOccupied);
    }
    Ok(())
}

pub fn ensure_cage_powered(cage: &Cage) -> RuleResult {
    if cage.power_status == PowerStatus::Down {
        return Err(RuleViolation::CagePoweredDown);
    }
    Ok(())
}

/// Occupancy facts gathered before a dinosaur is moved into a cage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    /// Every dinosaur currently in the cage.
    pub total: usize,
    /// Occupants whose diet differs from the incoming dinosaur's.
    pub other_diet: usize,
}

/// Diet is checked before capacity, so a full cage of the wrong diet
/// reports the diet conflict.
pub fn check_cage_admission(cage: &Cage, occupancy: Occupancy) -> RuleResult {
    if occupancy.other_diet > 0 {
        return Err(RuleViolation::MixedDiet);
    }
    if !exceeds(occupancy.total + 1, cage.max_capacity) {
        return Ok(());
    }
    Err(RuleViolation::CageFull)
}

fn exceeds(count: usize, max_capacity: i32) -> bool {
    usize::try_from(max_capacity).map_or(true, |max| count > max)
}
