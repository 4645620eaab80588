use crate::api::dinosaur_handler::dinosaur_resource;
use crate::api::entity_handler::{EntityHandler, EntityRules};
use crate::api::error::ApiError;
use crate::logic::{check_species_type, ensure_species_unused, ensure_unique_name, require_name};
use crate::model::{
    DinosaurFilter, DinosaurResource, Id, Species, SpeciesFilter, SpeciesInput, SpeciesResource,
    SpeciesType,
};
use crate::store::{SpeciesStore, Stores};

pub type SpeciesHandler = EntityHandler<SpeciesRules>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesDraft {
    pub name: String,
    pub species_type: SpeciesType,
}

pub struct SpeciesRules {
    stores: Stores,
}

#[async_trait::async_trait]
impl EntityRules for SpeciesRules {
    type Entity = Species;
    type Input = SpeciesInput;
    type Draft = SpeciesDraft;
    type Resource = SpeciesResource;
    type Store = dyn SpeciesStore;

    const NAME: &'static str = "Species";

    fn store(&self) -> &Self::Store {
        &*self.stores.species
    }

    fn id_of(species: &Species) -> Id {
        species.id
    }

    async fn validate(
        &self,
        input: &SpeciesInput,
        existing: Option<&Species>,
    ) -> Result<SpeciesDraft, ApiError> {
        let name = require_name(input.name.as_deref())?;
        let same_name = self.stores.species.search(&SpeciesFilter::by_name(name)).await?;
        ensure_unique_name(same_name.iter().map(|s| s.id), existing.map(|s| s.id))?;

        let species_type = check_species_type(input.species_type.as_deref(), existing)?;

        Ok(SpeciesDraft {
            name: name.to_string(),
            species_type,
        })
    }

    fn create(&self, draft: SpeciesDraft) -> Species {
        Species::new(draft.name, draft.species_type)
    }

    /// Only the name is mutable.
    fn apply(&self, species: &mut Species, draft: SpeciesDraft) {
        species.name = draft.name;
    }

    async fn to_resource(&self, species: &Species) -> Result<SpeciesResource, ApiError> {
        Ok(SpeciesResource::from(species))
    }

    async fn validate_delete(&self, species: &Species) -> Result<(), ApiError> {
        let members = self
            .stores
            .dinosaurs
            .search(&DinosaurFilter::of_species(species.id))
            .await?;
        Ok(ensure_species_unused(members.len())?)
    }
}

impl EntityHandler<SpeciesRules> {
    pub fn for_species(stores: Stores) -> Self {
        Self::new(SpeciesRules { stores })
    }

    pub async fn search(&self, filter: &SpeciesFilter) -> Result<Vec<SpeciesResource>, ApiError> {
        let species = self.rules().stores.species.search(filter).await?;
        Ok(species.iter().map(SpeciesResource::from).collect())
    }

    pub async fn dinosaurs(&self, species_id: Id) -> Result<Vec<DinosaurResource>, ApiError> {
        let species = self.fetch(species_id).await?;
        let stores = &self.rules().stores;
        let members = stores
            .dinosaurs
            .search(&DinosaurFilter::of_species(species.id))
            .await?;

        let mut resources = Vec::with_capacity(members.len());
        for dinosaur in &members {
            resources.push(dinosaur_resource(stores, dinosaur).await?);
        }
        Ok(resources)
    }
}
