use crate::api::AppState;
use crate::model::{CageInput, DinosaurInput, Id, SpeciesInput};
use anyhow::Result;

/// Helper function to create a species through the normal handler rules
async fn create_species(state: &AppState, name: &str, species_type: &str) -> Result<Id> {
    let species = state
        .species
        .add(Some(SpeciesInput {
            name: Some(name.to_string()),
            species_type: Some(species_type.to_string()),
        }))
        .await?;
    Ok(species.id)
}

async fn create_cage(state: &AppState, name: &str, max_capacity: i32) -> Result<Id> {
    let cage = state
        .cages
        .add(Some(CageInput {
            name: Some(name.to_string()),
            max_capacity: Some(max_capacity),
            power_status: None,
        }))
        .await?;
    Ok(cage.id)
}

async fn create_dinosaur(state: &AppState, name: &str, species_id: Id, cage_id: Option<Id>) -> Result<Id> {
    let dinosaur = state
        .dinosaurs
        .add(Some(DinosaurInput {
            name: Some(name.to_string()),
            species_id: Some(species_id),
        }))
        .await?;

    if let Some(cage_id) = cage_id {
        state.cages.add_dinosaur(cage_id, dinosaur.id).await?;
    }
    Ok(dinosaur.id)
}

/// Load a small demonstration park. Everything goes through the handlers,
/// so running this against a store that already holds these names fails
/// with "Name already exists." instead of creating duplicates.
pub async fn load_seed_data(state: &AppState) -> Result<()> {
    let t_rex = create_species(state, "Tyrannosaurus", "Carnivore").await?;
    let raptor = create_species(state, "Velociraptor", "Carnivore").await?;
    let trike = create_species(state, "Triceratops", "Herbivore").await?;
    let brachio = create_species(state, "Brachiosaurus", "Herbivore").await?;

    let paddock_a = create_cage(state, "Paddock A", 2).await?;
    let paddock_b = create_cage(state, "Paddock B", 4).await?;
    let quarantine = create_cage(state, "Quarantine", 1).await?;

    create_dinosaur(state, "Rexy", t_rex, Some(paddock_a)).await?;
    create_dinosaur(state, "Blue", raptor, Some(paddock_a)).await?;
    create_dinosaur(state, "Sarah", trike, Some(paddock_b)).await?;
    create_dinosaur(state, "Bracky", brachio, Some(paddock_b)).await?;
    create_dinosaur(state, "Delta", raptor, None).await?;

    // Quarantine stays empty and unpowered.
    state
        .cages
        .update(
            quarantine,
            Some(CageInput {
                name: Some("Quarantine".to_string()),
                max_capacity: Some(1),
                power_status: Some("Down".to_string()),
            }),
        )
        .await?;

    log::info!("Seed data loaded");
    Ok(())
}
