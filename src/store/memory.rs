use anyhow::Result;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::model::{Cage, CageFilter, Dinosaur, DinosaurFilter, Id, Species, SpeciesFilter};
use crate::store::traits::{CageStore, DinosaurStore, EntityStore, SpeciesStore};

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<Id, T>,
    next_id: Id,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn insert(&mut self, assign: impl FnOnce(Id) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = assign(id);
        self.rows.insert(id, row.clone());
        row
    }

    /// Updates of ids that were never inserted are ignored, like an
    /// `UPDATE ... WHERE id = $1` that touches no rows.
    fn replace(&mut self, id: Id, row: T) {
        if let Some(slot) = self.rows.get_mut(&id) {
            *slot = row;
        }
    }
}

#[derive(Debug)]
struct Tables {
    cages: Table<Cage>,
    dinosaurs: Table<Dinosaur>,
    species: Table<Species>,
}

/// In-process store backing local development and the test suite.
/// Ids are assigned per table starting at 1 and never reused.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables {
                cages: Table::new(),
                dinosaurs: Table::new(),
                species: Table::new(),
            })),
        }
    }
}

#[async_trait::async_trait]
impl EntityStore<Cage> for MemoryStore {
    async fn get(&self, id: Id) -> Result<Option<Cage>> {
        Ok(self.tables.read().cages.rows.get(&id).cloned())
    }

    async fn add(&self, cage: Cage) -> Result<Cage> {
        Ok(self.tables.write().cages.insert(|id| Cage { id, ..cage }))
    }

    async fn update(&self, cage: &Cage) -> Result<()> {
        self.tables.write().cages.replace(cage.id, cage.clone());
        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<bool> {
        Ok(self.tables.write().cages.rows.remove(&id).is_some())
    }
}

#[async_trait::async_trait]
impl CageStore for MemoryStore {
    async fn search(&self, filter: &CageFilter) -> Result<Vec<Cage>> {
        let tables = self.tables.read();
        Ok(tables
            .cages
            .rows
            .values()
            .filter(|cage| filter.name.as_ref().map_or(true, |name| &cage.name == name))
            .filter(|cage| {
                filter
                    .power_status
                    .map_or(true, |status| cage.power_status == status)
            })
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl EntityStore<Dinosaur> for MemoryStore {
    async fn get(&self, id: Id) -> Result<Option<Dinosaur>> {
        Ok(self.tables.read().dinosaurs.rows.get(&id).cloned())
    }

    async fn add(&self, dinosaur: Dinosaur) -> Result<Dinosaur> {
        Ok(self
            .tables
            .write()
            .dinosaurs
            .insert(|id| Dinosaur { id, ..dinosaur }))
    }

    async fn update(&self, dinosaur: &Dinosaur) -> Result<()> {
        self.tables
            .write()
            .dinosaurs
            .replace(dinosaur.id, dinosaur.clone());
        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<bool> {
        Ok(self.tables.write().dinosaurs.rows.remove(&id).is_some())
    }
}

#[async_trait::async_trait]
impl DinosaurStore for MemoryStore {
    async fn search(&self, filter: &DinosaurFilter) -> Result<Vec<Dinosaur>> {
        let tables = self.tables.read();
        Ok(tables
            .dinosaurs
            .rows
            .values()
            .filter(|d| filter.name.as_ref().map_or(true, |name| &d.name == name))
            .filter(|d| filter.species_id.map_or(true, |id| d.species_id == id))
            .filter(|d| filter.cage_id.map_or(true, |id| d.cage_id == Some(id)))
            .filter(|d| {
                // Inner join semantics: a dangling species reference never matches.
                filter.diet.map_or(true, |diet| {
                    tables
                        .species
                        .rows
                        .get(&d.species_id)
                        .is_some_and(|species| species.species_type == diet)
                })
            })
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl EntityStore<Species> for MemoryStore {
    async fn get(&self, id: Id) -> Result<Option<Species>> {
        Ok(self.tables.read().species.rows.get(&id).cloned())
    }

    async fn add(&self, species: Species) -> Result<Species> {
        Ok(self
            .tables
            .write()
            .species
            .insert(|id| Species { id, ..species }))
    }

    async fn update(&self, species: &Species) -> Result<()> {
        self.tables
            .write()
            .species
            .replace(species.id, species.clone());
        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<bool> {
        Ok(self.tables.write().species.rows.remove(&id).is_some())
    }
}

#[async_trait::async_trait]
impl SpeciesStore for MemoryStore {
    async fn search(&self, filter: &SpeciesFilter) -> Result<Vec<Species>> {
        let tables = self.tables.read();
        Ok(tables
            .species
            .rows
            .values()
            .filter(|s| filter.name.as_ref().map_or(true, |name| &s.name == name))
            .cloned()
            .collect())
    }
}
