use crate::api::dinosaur_handler::dinosaur_resource;
use crate::api::entity_handler::{EntityHandler, EntityRules};
use crate::api::error::ApiError;
use crate::logic::{
    check_cage_admission, check_cage_settings, ensure_cage_empty, ensure_cage_powered,
    ensure_unique_name, require_name, Occupancy, RuleViolation,
};
use crate::model::{
    Cage, CageFilter, CageInput, CageResource, DinosaurFilter, DinosaurResource, Id, PowerStatus,
};
use crate::store::{CageStore, Stores};

pub type CageHandler = EntityHandler<CageRules>;

/// A cage payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CageDraft {
    pub name: String,
    pub max_capacity: i32,
    /// Only present on update; creates always start `Active`.
    pub power_status: Option<PowerStatus>,
}

pub struct CageRules {
    stores: Stores,
}

#[async_trait::async_trait]
impl EntityRules for CageRules {
    type Entity = Cage;
    type Input = CageInput;
    type Draft = CageDraft;
    type Resource = CageResource;
    type Store = dyn CageStore;

    const NAME: &'static str = "Cage";

    fn store(&self) -> &Self::Store {
        &*self.stores.cages
    }

    fn id_of(cage: &Cage) -> Id {
        cage.id
    }

    async fn validate(&self, input: &CageInput, existing: Option<&Cage>) -> Result<CageDraft, ApiError> {
        let name = require_name(input.name.as_deref())?;
        let same_name = self.stores.cages.search(&CageFilter::by_name(name)).await?;
        ensure_unique_name(same_name.iter().map(|c| c.id), existing.map(|c| c.id))?;

        let occupancy = match existing {
            Some(cage) => Some(self.stores.dinosaurs.count_in_cage(cage.id).await?),
            None => None,
        };
        let power_status = check_cage_settings(input, occupancy)?;

        Ok(CageDraft {
            name: name.to_string(),
            max_capacity: input.max_capacity.unwrap_or_default(),
            power_status,
        })
    }

    fn create(&self, draft: CageDraft) -> Cage {
        Cage::new(draft.name, draft.max_capacity)
    }

    fn apply(&self, cage: &mut Cage, draft: CageDraft) {
        cage.name = draft.name;
        cage.max_capacity = draft.max_capacity;
        if let Some(power_status) = draft.power_status {
            cage.power_status = power_status;
        }
    }

    async fn to_resource(&self, cage: &Cage) -> Result<CageResource, ApiError> {
        let dinosaur_count = self.stores.dinosaurs.count_in_cage(cage.id).await?;
        Ok(CageResource::new(cage, dinosaur_count))
    }

    async fn validate_delete(&self, cage: &Cage) -> Result<(), ApiError> {
        let dinosaur_count = self.stores.dinosaurs.count_in_cage(cage.id).await?;
        Ok(ensure_cage_empty(dinosaur_count)?)
    }
}

impl EntityHandler<CageRules> {
    pub fn for_cages(stores: Stores) -> Self {
        Self::new(CageRules { stores })
    }

    fn stores(&self) -> &Stores {
        &self.rules().stores
    }

    pub async fn search(&self, filter: &CageFilter) -> Result<Vec<CageResource>, ApiError> {
        let cages = self.stores().cages.search(filter).await?;
        let mut resources = Vec::with_capacity(cages.len());
        for cage in &cages {
            resources.push(self.rules().to_resource(cage).await?);
        }
        Ok(resources)
    }

    pub async fn dinosaurs(&self, cage_id: Id) -> Result<Vec<DinosaurResource>, ApiError> {
        let cage = self.fetch(cage_id).await?;
        let occupants = self
            .stores()
            .dinosaurs
            .search(&DinosaurFilter::in_cage(cage.id))
            .await?;

        let mut resources = Vec::with_capacity(occupants.len());
        for dinosaur in &occupants {
            resources.push(dinosaur_resource(self.stores(), dinosaur).await?);
        }
        Ok(resources)
    }

    /// Move a dinosaur into a cage. Repeating the call for a dinosaur that
    /// is already there changes nothing.
    pub async fn add_dinosaur(&self, cage_id: Id, dinosaur_id: Id) -> Result<CageResource, ApiError> {
        let stores = self.stores();
        let cage = self.fetch(cage_id).await?;
        let mut dinosaur = stores
            .dinosaurs
            .get(dinosaur_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Dinosaur"))?;

        ensure_cage_powered(&cage).map_err(|e| rejected_assignment(&cage, dinosaur_id, e))?;

        if dinosaur.is_in_cage(cage.id) {
            return self.rules().to_resource(&cage).await;
        }

        let species = stores
            .species
            .get(dinosaur.species_id)
            .await?
            .ok_or(RuleViolation::SpeciesIdInvalid)?;

        let other_diet = stores
            .dinosaurs
            .search(&DinosaurFilter {
                cage_id: Some(cage.id),
                diet: Some(species.species_type.opposite()),
                ..DinosaurFilter::default()
            })
            .await?
            .len();
        let total = stores.dinosaurs.count_in_cage(cage.id).await?;

        check_cage_admission(&cage, Occupancy { total, other_diet })
            .map_err(|e| rejected_assignment(&cage, dinosaur_id, e))?;

        dinosaur.cage_id = Some(cage.id);
        stores.dinosaurs.update(&dinosaur).await?;
        log::info!("Moved Dinosaur {} into Cage {}", dinosaur.id, cage.id);

        Ok(CageResource::new(&cage, total + 1))
    }

    /// Take a dinosaur out of a cage. A dinosaur that is not in this cage is
    /// left where it is.
    pub async fn remove_dinosaur(&self, cage_id: Id, dinosaur_id: Id) -> Result<CageResource, ApiError> {
        let stores = self.stores();
        let cage = self.fetch(cage_id).await?;
        let mut dinosaur = stores
            .dinosaurs
            .get(dinosaur_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Dinosaur"))?;

        if dinosaur.is_in_cage(cage.id) {
            dinosaur.cage_id = None;
            stores.dinosaurs.update(&dinosaur).await?;
            log::info!("Removed Dinosaur {} from Cage {}", dinosaur.id, cage.id);
        }

        self.rules().to_resource(&cage).await
    }
}

fn rejected_assignment(cage: &Cage, dinosaur_id: Id, violation: RuleViolation) -> ApiError {
    log::debug!("Rejected Dinosaur {} for Cage {}: {}", dinosaur_id, cage.id, violation);
    violation.into()
}
