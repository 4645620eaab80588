use crate::api::entity_handler::{EntityHandler, EntityRules};
use crate::api::error::ApiError;
use crate::logic::{
    ensure_species_change_allowed, ensure_unique_name, require_name, require_species_id,
    RuleViolation,
};
use crate::model::{Dinosaur, DinosaurFilter, DinosaurInput, DinosaurResource, Id};
use crate::store::{DinosaurStore, Stores};

pub type DinosaurHandler = EntityHandler<DinosaurRules>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DinosaurDraft {
    pub name: String,
    pub species_id: Id,
}

pub struct DinosaurRules {
    stores: Stores,
}

/// Outbound view of a dinosaur, which carries its species' name.
pub(crate) async fn dinosaur_resource(stores: &Stores, dinosaur: &Dinosaur) -> Result<DinosaurResource, ApiError> {
    let species_name = match stores.species.get(dinosaur.species_id).await? {
        Some(species) => species.name,
        None => {
            log::warn!(
                "Dinosaur {} references missing Species {}",
                dinosaur.id,
                dinosaur.species_id
            );
            String::new()
        }
    };
    Ok(DinosaurResource::new(dinosaur, species_name))
}

#[async_trait::async_trait]
impl EntityRules for DinosaurRules {
    type Entity = Dinosaur;
    type Input = DinosaurInput;
    type Draft = DinosaurDraft;
    type Resource = DinosaurResource;
    type Store = dyn DinosaurStore;

    const NAME: &'static str = "Dinosaur";

    fn store(&self) -> &Self::Store {
        &*self.stores.dinosaurs
    }

    fn id_of(dinosaur: &Dinosaur) -> Id {
        dinosaur.id
    }

    async fn validate(
        &self,
        input: &DinosaurInput,
        existing: Option<&Dinosaur>,
    ) -> Result<DinosaurDraft, ApiError> {
        let name = require_name(input.name.as_deref())?;
        let same_name = self.stores.dinosaurs.search(&DinosaurFilter::by_name(name)).await?;
        ensure_unique_name(same_name.iter().map(|d| d.id), existing.map(|d| d.id))?;

        let species_id = require_species_id(input.species_id)?;
        if self.stores.species.get(species_id).await?.is_none() {
            return Err(RuleViolation::SpeciesIdInvalid.into());
        }

        if let Some(dinosaur) = existing {
            ensure_species_change_allowed(dinosaur, species_id)?;
        }

        Ok(DinosaurDraft {
            name: name.to_string(),
            species_id,
        })
    }

    fn create(&self, draft: DinosaurDraft) -> Dinosaur {
        Dinosaur::new(draft.name, draft.species_id)
    }

    fn apply(&self, dinosaur: &mut Dinosaur, draft: DinosaurDraft) {
        dinosaur.name = draft.name;
        dinosaur.species_id = draft.species_id;
    }

    async fn to_resource(&self, dinosaur: &Dinosaur) -> Result<DinosaurResource, ApiError> {
        dinosaur_resource(&self.stores, dinosaur).await
    }

    // Delete is unconditional.
}

impl EntityHandler<DinosaurRules> {
    pub fn for_dinosaurs(stores: Stores) -> Self {
        Self::new(DinosaurRules { stores })
    }

    pub async fn search(&self, filter: &DinosaurFilter) -> Result<Vec<DinosaurResource>, ApiError> {
        let stores = &self.rules().stores;
        let dinosaurs = stores.dinosaurs.search(filter).await?;

        let mut resources = Vec::with_capacity(dinosaurs.len());
        for dinosaur in &dinosaurs {
            resources.push(dinosaur_resource(stores, dinosaur).await?);
        }
        Ok(resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::park;
    use crate::model::{CageInput, SpeciesInput, SpeciesType};

    fn dinosaur_input(name: Option<&str>, species_id: Option<Id>) -> Option<DinosaurInput> {
        Some(DinosaurInput {
            name: name.map(str::to_string),
            species_id,
        })
    }

    async fn add_species(park: &crate::api::test_support::Park, name: &str, species_type: &str) -> Id {
        park.species
            .add(Some(SpeciesInput {
                name: Some(name.to_string()),
                species_type: Some(species_type.to_string()),
            }))
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_add_creates_uncaged_dinosaur() {
        let park = park();
        let t_rex = add_species(&park, "T-Rex", "Carnivore").await;

        let rex = park.dinosaurs.add(dinosaur_input(Some("Rex"), Some(t_rex))).await.unwrap();
        assert_eq!(rex.name, "Rex");
        assert_eq!(rex.species_id, t_rex);
        assert_eq!(rex.species_name, "T-Rex");
        assert_eq!(rex.cage_id, None);
    }

    #[tokio::test]
    async fn test_add_validation_messages() {
        let park = park();
        let t_rex = add_species(&park, "T-Rex", "Carnivore").await;
        park.dinosaurs.add(dinosaur_input(Some("Rex"), Some(t_rex))).await.unwrap();

        let cases = [
            (None, "Body must be supplied."),
            (dinosaur_input(None, Some(t_rex)), "Name must be supplied."),
            (dinosaur_input(Some(""), Some(t_rex)), "Name must be supplied."),
            (dinosaur_input(Some("Rex"), Some(t_rex)), "Name already exists."),
            (dinosaur_input(Some("Blue"), None), "SpeciesId must be supplied."),
            (dinosaur_input(Some("Blue"), Some(t_rex + 100)), "SpeciesId is invalid."),
        ];
        for (input, expected) in cases {
            let error = park.dinosaurs.add(input).await.unwrap_err();
            assert_eq!(error.to_string(), expected);
        }
    }

    #[tokio::test]
    async fn test_update_rejects_name_of_other_dinosaur() {
        let park = park();
        let t_rex = add_species(&park, "T-Rex", "Carnivore").await;
        park.dinosaurs.add(dinosaur_input(Some("Rex"), Some(t_rex))).await.unwrap();
        let blue = park.dinosaurs.add(dinosaur_input(Some("Blue"), Some(t_rex))).await.unwrap();

        let error = park
            .dinosaurs
            .update(blue.id, dinosaur_input(Some("Rex"), Some(t_rex)))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Name already exists.");
        assert_eq!(park.dinosaurs.get(blue.id).await.unwrap().name, "Blue");

        // Keeping its own name is fine.
        park.dinosaurs
            .update(blue.id, dinosaur_input(Some("Blue"), Some(t_rex)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_species_change_only_while_uncaged() {
        let park = park();
        let t_rex = add_species(&park, "T-Rex", "Carnivore").await;
        let raptor = add_species(&park, "Velociraptor", "Carnivore").await;
        let rex = park.dinosaurs.add(dinosaur_input(Some("Rex"), Some(t_rex))).await.unwrap();

        let changed = park
            .dinosaurs
            .update(rex.id, dinosaur_input(Some("Rex"), Some(raptor)))
            .await
            .unwrap();
        assert_eq!(changed.species_name, "Velociraptor");

        let cage = park
            .cages
            .add(Some(CageInput {
                name: Some("Paddock A".to_string()),
                max_capacity: Some(2),
                power_status: None,
            }))
            .await
            .unwrap();
        park.cages.add_dinosaur(cage.id, rex.id).await.unwrap();

        let error = park
            .dinosaurs
            .update(rex.id, dinosaur_input(Some("Rex"), Some(t_rex)))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Species cannot be changed for a dinosaur in a cage.");

        // Renaming a caged dinosaur is still fine.
        let renamed = park
            .dinosaurs
            .update(rex.id, dinosaur_input(Some("Rexy"), Some(raptor)))
            .await
            .unwrap();
        assert_eq!(renamed.name, "Rexy");
        assert_eq!(renamed.cage_id, Some(cage.id));
    }

    #[tokio::test]
    async fn test_delete_is_unconditional() {
        let park = park();
        let t_rex = add_species(&park, "T-Rex", "Carnivore").await;
        let rex = park.dinosaurs.add(dinosaur_input(Some("Rex"), Some(t_rex))).await.unwrap();
        let cage = park
            .cages
            .add(Some(CageInput {
                name: Some("Paddock A".to_string()),
                max_capacity: Some(2),
                power_status: None,
            }))
            .await
            .unwrap();
        park.cages.add_dinosaur(cage.id, rex.id).await.unwrap();

        park.dinosaurs.delete(rex.id).await.unwrap();
        assert_eq!(park.dinosaurs.get(rex.id).await.unwrap_err().to_string(), "Dinosaur not found.");
        assert_eq!(park.cages.get(cage.id).await.unwrap().dinosaur_count, 0);
    }

    #[tokio::test]
    async fn test_search_by_diet() {
        let park = park();
        let t_rex = add_species(&park, "T-Rex", "Carnivore").await;
        let trike = add_species(&park, "Triceratops", "Herbivore").await;
        park.dinosaurs.add(dinosaur_input(Some("Rex"), Some(t_rex))).await.unwrap();
        park.dinosaurs.add(dinosaur_input(Some("Horns"), Some(trike))).await.unwrap();

        let herbivores = park
            .dinosaurs
            .search(&DinosaurFilter {
                diet: Some(SpeciesType::Herbivore),
                ..DinosaurFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(herbivores.len(), 1);
        assert_eq!(herbivores[0].name, "Horns");
    }
}
