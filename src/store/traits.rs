use crate::model::{Cage, CageFilter, Dinosaur, DinosaurFilter, Id, Species, SpeciesFilter};
use anyhow::Result;
use std::sync::Arc;

/// Primary-key persistence shared by every entity type.
///
/// Missing ids are reported as `Ok(None)` / `Ok(false)`, never as errors.
#[async_trait::async_trait]
pub trait EntityStore<T>: Send + Sync {
    async fn get(&self, id: Id) -> Result<Option<T>>;
    /// Persist a new entity and return it with its assigned id.
    async fn add(&self, entity: T) -> Result<T>;
    async fn update(&self, entity: &T) -> Result<()>;
    async fn delete(&self, id: Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait CageStore: EntityStore<Cage> {
    async fn search(&self, filter: &CageFilter) -> Result<Vec<Cage>>;
}

#[async_trait::async_trait]
pub trait DinosaurStore: EntityStore<Dinosaur> {
    async fn search(&self, filter: &DinosaurFilter) -> Result<Vec<Dinosaur>>;

    /// Occupancy is always derived, never stored on the cage.
    async fn count_in_cage(&self, cage_id: Id) -> Result<usize> {
        Ok(self.search(&DinosaurFilter::in_cage(cage_id)).await?.len())
    }
}

#[async_trait::async_trait]
pub trait SpeciesStore: EntityStore<Species> {
    async fn search(&self, filter: &SpeciesFilter) -> Result<Vec<Species>>;
}

/// The store handles injected into the entity handlers.
#[derive(Clone)]
pub struct Stores {
    pub cages: Arc<dyn CageStore>,
    pub dinosaurs: Arc<dyn DinosaurStore>,
    pub species: Arc<dyn SpeciesStore>,
}

impl Stores {
    /// Use one backend for all three entity types.
    pub fn shared<B>(backend: Arc<B>) -> Self
    where
        B: CageStore + DinosaurStore + SpeciesStore + 'static,
    {
        Self {
            cages: backend.clone(),
            dinosaurs: backend.clone(),
            species: backend,
        }
    }
}
