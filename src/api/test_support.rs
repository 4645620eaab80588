//! Handlers wired to an in-memory store, with dinosaur writes counted so
//! tests can assert that no-op operations really skip the store.

use anyhow::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::api::{CageHandler, DinosaurHandler, SpeciesHandler};
use crate::model::{Dinosaur, DinosaurFilter, Id};
use crate::store::{DinosaurStore, EntityStore, MemoryStore, Stores};

struct CountingDinosaurs {
    inner: Arc<MemoryStore>,
    updates: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl EntityStore<Dinosaur> for CountingDinosaurs {
    async fn get(&self, id: Id) -> Result<Option<Dinosaur>> {
        EntityStore::<Dinosaur>::get(&*self.inner, id).await
    }

    async fn add(&self, dinosaur: Dinosaur) -> Result<Dinosaur> {
        EntityStore::<Dinosaur>::add(&*self.inner, dinosaur).await
    }

    async fn update(&self, dinosaur: &Dinosaur) -> Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        EntityStore::<Dinosaur>::update(&*self.inner, dinosaur).await
    }

    async fn delete(&self, id: Id) -> Result<bool> {
        EntityStore::<Dinosaur>::delete(&*self.inner, id).await
    }
}

#[async_trait::async_trait]
impl DinosaurStore for CountingDinosaurs {
    async fn search(&self, filter: &DinosaurFilter) -> Result<Vec<Dinosaur>> {
        DinosaurStore::search(&*self.inner, filter).await
    }
}

pub struct Park {
    pub cages: CageHandler,
    pub dinosaurs: DinosaurHandler,
    pub species: SpeciesHandler,
    updates: Arc<AtomicUsize>,
}

impl Park {
    pub fn dinosaur_updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

pub fn park() -> Park {
    let memory = Arc::new(MemoryStore::new());
    let updates = Arc::new(AtomicUsize::new(0));

    let mut stores = Stores::shared(memory.clone());
    stores.dinosaurs = Arc::new(CountingDinosaurs {
        inner: memory,
        updates: updates.clone(),
    });

    Park {
        cages: CageHandler::for_cages(stores.clone()),
        dinosaurs: DinosaurHandler::for_dinosaurs(stores.clone()),
        species: SpeciesHandler::for_species(stores),
        updates,
    }
}
