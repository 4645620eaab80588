use anyhow::{anyhow, Context, Result};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::model::{
    Cage, CageFilter, Dinosaur, DinosaurFilter, Id, PowerStatus, Species, SpeciesFilter,
    SpeciesType,
};
use crate::store::traits::{CageStore, DinosaurStore, EntityStore, SpeciesStore};

const CREATE_SPECIES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS species (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        species_type TEXT NOT NULL
    )
"#;

const CREATE_CAGES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS cages (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        max_capacity INTEGER NOT NULL,
        power_status TEXT NOT NULL DEFAULT 'Active'
    )
"#;

const CREATE_DINOSAURS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS dinosaurs (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        species_id INTEGER NOT NULL REFERENCES species (id),
        cage_id INTEGER NULL REFERENCES cages (id)
    )
"#;

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Create the park tables when they do not exist yet. Existing tables
    /// are left untouched.
    pub async fn bootstrap_schema(&self) -> Result<()> {
        for statement in [CREATE_SPECIES_TABLE, CREATE_CAGES_TABLE, CREATE_DINOSAURS_TABLE] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .context("Failed to create park tables")?;
        }
        Ok(())
    }
}

fn cage_from_row(row: &PgRow) -> Result<Cage> {
    let power_status: String = row.try_get("power_status")?;
    Ok(Cage {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        max_capacity: row.try_get("max_capacity")?,
        power_status: power_status
            .parse::<PowerStatus>()
            .map_err(|e| anyhow!("Unknown power status '{}' in cages table", e.0))?,
    })
}

fn dinosaur_from_row(row: &PgRow) -> Result<Dinosaur> {
    Ok(Dinosaur {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        species_id: row.try_get("species_id")?,
        cage_id: row.try_get("cage_id")?,
    })
}

fn species_from_row(row: &PgRow) -> Result<Species> {
    let species_type: String = row.try_get("species_type")?;
    Ok(Species {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        species_type: species_type
            .parse::<SpeciesType>()
            .map_err(|e| anyhow!("Unknown species type '{}' in species table", e.0))?,
    })
}

#[async_trait::async_trait]
impl EntityStore<Cage> for PostgresStore {
    async fn get(&self, id: Id) -> Result<Option<Cage>> {
        let row = sqlx::query("SELECT id, name, max_capacity, power_status FROM cages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch cage")?;

        row.as_ref().map(cage_from_row).transpose()
    }

    async fn add(&self, cage: Cage) -> Result<Cage> {
        let row = sqlx::query(
            "INSERT INTO cages (name, max_capacity, power_status) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&cage.name)
        .bind(cage.max_capacity)
        .bind(cage.power_status.as_str())
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert cage")?;

        Ok(Cage {
            id: row.try_get("id")?,
            ..cage
        })
    }

    async fn update(&self, cage: &Cage) -> Result<()> {
        sqlx::query("UPDATE cages SET name = $2, max_capacity = $3, power_status = $4 WHERE id = $1")
            .bind(cage.id)
            .bind(&cage.name)
            .bind(cage.max_capacity)
            .bind(cage.power_status.as_str())
            .execute(&self.pool)
            .await
            .context("Failed to update cage")?;

        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete cage")?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl CageStore for PostgresStore {
    async fn search(&self, filter: &CageFilter) -> Result<Vec<Cage>> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT id, name, max_capacity, power_status FROM cages WHERE TRUE",
        );
        if let Some(name) = &filter.name {
            query.push(" AND name = ").push_bind(name.clone());
        }
        if let Some(power_status) = filter.power_status {
            query.push(" AND power_status = ").push_bind(power_status.as_str());
        }
        query.push(" ORDER BY id");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .context("Failed to search cages")?;

        rows.iter().map(cage_from_row).collect()
    }
}

#[async_trait::async_trait]
impl EntityStore<Dinosaur> for PostgresStore {
    async fn get(&self, id: Id) -> Result<Option<Dinosaur>> {
        let row = sqlx::query("SELECT id, name, species_id, cage_id FROM dinosaurs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch dinosaur")?;

        row.as_ref().map(dinosaur_from_row).transpose()
    }

    async fn add(&self, dinosaur: Dinosaur) -> Result<Dinosaur> {
        let row = sqlx::query(
            "INSERT INTO dinosaurs (name, species_id, cage_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&dinosaur.name)
        .bind(dinosaur.species_id)
        .bind(dinosaur.cage_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert dinosaur")?;

        Ok(Dinosaur {
            id: row.try_get("id")?,
            ..dinosaur
        })
    }

    async fn update(&self, dinosaur: &Dinosaur) -> Result<()> {
        sqlx::query("UPDATE dinosaurs SET name = $2, species_id = $3, cage_id = $4 WHERE id = $1")
            .bind(dinosaur.id)
            .bind(&dinosaur.name)
            .bind(dinosaur.species_id)
            .bind(dinosaur.cage_id)
            .execute(&self.pool)
            .await
            .context("Failed to update dinosaur")?;

        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM dinosaurs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete dinosaur")?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl DinosaurStore for PostgresStore {
    async fn search(&self, filter: &DinosaurFilter) -> Result<Vec<Dinosaur>> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT d.id, d.name, d.species_id, d.cage_id FROM dinosaurs d",
        );
        if filter.diet.is_some() {
            query.push(" JOIN species s ON s.id = d.species_id");
        }
        query.push(" WHERE TRUE");
        if let Some(name) = &filter.name {
            query.push(" AND d.name = ").push_bind(name.clone());
        }
        if let Some(species_id) = filter.species_id {
            query.push(" AND d.species_id = ").push_bind(species_id);
        }
        if let Some(cage_id) = filter.cage_id {
            query.push(" AND d.cage_id = ").push_bind(cage_id);
        }
        if let Some(diet) = filter.diet {
            query.push(" AND s.species_type = ").push_bind(diet.as_str());
        }
        query.push(" ORDER BY d.id");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .context("Failed to search dinosaurs")?;

        rows.iter().map(dinosaur_from_row).collect()
    }

    async fn count_in_cage(&self, cage_id: Id) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dinosaurs WHERE cage_id = $1")
            .bind(cage_id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count dinosaurs in cage")?;

        Ok(usize::try_from(count)?)
    }
}

#[async_trait::async_trait]
impl EntityStore<Species> for PostgresStore {
    async fn get(&self, id: Id) -> Result<Option<Species>> {
        let row = sqlx::query("SELECT id, name, species_type FROM species WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch species")?;

        row.as_ref().map(species_from_row).transpose()
    }

    async fn add(&self, species: Species) -> Result<Species> {
        let row = sqlx::query("INSERT INTO species (name, species_type) VALUES ($1, $2) RETURNING id")
            .bind(&species.name)
            .bind(species.species_type.as_str())
            .fetch_one(&self.pool)
            .await
            .context("Failed to insert species")?;

        Ok(Species {
            id: row.try_get("id")?,
            ..species
        })
    }

    async fn update(&self, species: &Species) -> Result<()> {
        sqlx::query("UPDATE species SET name = $2, species_type = $3 WHERE id = $1")
            .bind(species.id)
            .bind(&species.name)
            .bind(species.species_type.as_str())
            .execute(&self.pool)
            .await
            .context("Failed to update species")?;

        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM species WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete species")?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl SpeciesStore for PostgresStore {
    async fn search(&self, filter: &SpeciesFilter) -> Result<Vec<Species>> {
        let mut query =
            QueryBuilder::<Postgres>::new("SELECT id, name, species_type FROM species WHERE TRUE");
        if let Some(name) = &filter.name {
            query.push(" AND name = ").push_bind(name.clone());
        }
        query.push(" ORDER BY id");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .context("Failed to search species")?;

        rows.iter().map(species_from_row).collect()
    }
}
