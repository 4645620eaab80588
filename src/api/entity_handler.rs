use serde::{de::DeserializeOwned, Serialize};

use crate::api::error::ApiError;
use crate::logic::RuleViolation;
use crate::model::Id;
use crate::store::EntityStore;

/// Entity-specific behaviour plugged into [`EntityHandler`].
///
/// `validate` turns an inbound payload into a `Draft` (or rejects it);
/// `create` and `apply` only ever see drafts that passed validation.
#[async_trait::async_trait]
pub trait EntityRules: Send + Sync + 'static {
    type Entity: Send + Sync;
    type Input: DeserializeOwned + Send + Sync;
    type Draft: Send;
    type Resource: Serialize + Send;
    type Store: EntityStore<Self::Entity> + ?Sized;

    /// Used in not-found messages and logs.
    const NAME: &'static str;

    fn store(&self) -> &Self::Store;

    fn id_of(entity: &Self::Entity) -> Id;

    /// `existing` is `None` for creates and the stored entity for updates.
    async fn validate(
        &self,
        input: &Self::Input,
        existing: Option<&Self::Entity>,
    ) -> Result<Self::Draft, ApiError>;

    fn create(&self, draft: Self::Draft) -> Self::Entity;

    fn apply(&self, entity: &mut Self::Entity, draft: Self::Draft);

    async fn to_resource(&self, entity: &Self::Entity) -> Result<Self::Resource, ApiError>;

    async fn validate_delete(&self, _entity: &Self::Entity) -> Result<(), ApiError> {
        Ok(())
    }
}

/// Add/Get/Update/Delete shared by cages, dinosaurs and species.
pub struct EntityHandler<R> {
    rules: R,
}

impl<R: EntityRules> EntityHandler<R> {
    pub fn new(rules: R) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub async fn add(&self, input: Option<R::Input>) -> Result<R::Resource, ApiError> {
        let input = input.ok_or(RuleViolation::BodyMissing)?;
        let draft = self
            .rules
            .validate(&input, None)
            .await
            .map_err(|e| rejected::<R>("add", e))?;

        let entity = self.rules.store().add(self.rules.create(draft)).await?;
        log::info!("Added {} {}", R::NAME, R::id_of(&entity));

        self.rules.to_resource(&entity).await
    }

    pub async fn get(&self, id: Id) -> Result<R::Resource, ApiError> {
        let entity = self.fetch(id).await?;
        self.rules.to_resource(&entity).await
    }

    pub async fn update(&self, id: Id, input: Option<R::Input>) -> Result<R::Resource, ApiError> {
        let mut entity = self.fetch(id).await?;
        let input = input.ok_or(RuleViolation::BodyMissing)?;
        let draft = self
            .rules
            .validate(&input, Some(&entity))
            .await
            .map_err(|e| rejected::<R>("update", e))?;

        self.rules.apply(&mut entity, draft);
        self.rules.store().update(&entity).await?;
        log::info!("Updated {} {}", R::NAME, id);

        self.rules.to_resource(&entity).await
    }

    pub async fn delete(&self, id: Id) -> Result<(), ApiError> {
        let entity = self.fetch(id).await?;
        self.rules
            .validate_delete(&entity)
            .await
            .map_err(|e| rejected::<R>("delete", e))?;

        self.rules.store().delete(id).await?;
        log::info!("Deleted {} {}", R::NAME, id);

        Ok(())
    }

    /// Load an entity or fail with `"<Entity> not found."`.
    pub async fn fetch(&self, id: Id) -> Result<R::Entity, ApiError> {
        self.rules
            .store()
            .get(id)
            .await?
            .ok_or_else(|| ApiError::not_found(R::NAME))
    }
}

fn rejected<R: EntityRules>(operation: &str, error: ApiError) -> ApiError {
    if !matches!(error, ApiError::Store(_)) {
        log::debug!("Rejected {} {}: {}", R::NAME, operation, error);
    }
    error
}
