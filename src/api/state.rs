use std::sync::Arc;

use crate::api::{CageHandler, DinosaurHandler, SpeciesHandler};
use crate::store::Stores;

/// Shared router state: one handler per entity type, all built on the same
/// injected stores.
#[derive(Clone)]
pub struct AppState {
    pub cages: Arc<CageHandler>,
    pub dinosaurs: Arc<DinosaurHandler>,
    pub species: Arc<SpeciesHandler>,
}

impl AppState {
    pub fn new(stores: Stores) -> Self {
        Self {
            cages: Arc::new(CageHandler::for_cages(stores.clone())),
            dinosaurs: Arc::new(DinosaurHandler::for_dinosaurs(stores.clone())),
            species: Arc::new(SpeciesHandler::for_species(stores)),
        }
    }
}
