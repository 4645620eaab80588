use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::logic::RuleViolation;
use crate::model::{
    CageFilter, CageInput, CageResource, DinosaurFilter, DinosaurInput, DinosaurResource, Id,
    ListResponse, PowerStatus, SpeciesFilter, SpeciesInput, SpeciesResource, SpeciesType,
};

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Decode an optional JSON body. An empty body or a literal `null` counts
/// as absent so the entity handler can answer "Body must be supplied.".
pub fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<Option<T>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<T>>(body).map_err(|e| {
        log::debug!("Unreadable request body: {e}");
        ApiError::BadRequest("Body is invalid.".to_string())
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CageQuery {
    pub name: Option<String>,
    pub power_status: Option<String>,
}

impl CageQuery {
    fn into_filter(self) -> Result<CageFilter, ApiError> {
        let power_status = self
            .power_status
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<PowerStatus>())
            .transpose()
            .map_err(|_| RuleViolation::PowerStatusInvalid)?;

        Ok(CageFilter {
            name: self.name.filter(|s| !s.is_empty()),
            power_status,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DinosaurQuery {
    pub name: Option<String>,
    pub species_id: Option<Id>,
    pub cage_id: Option<Id>,
    pub is_carnivore: Option<bool>,
}

impl From<DinosaurQuery> for DinosaurFilter {
    fn from(query: DinosaurQuery) -> Self {
        Self {
            name: query.name.filter(|s| !s.is_empty()),
            species_id: query.species_id,
            cage_id: query.cage_id,
            diet: query.is_carnivore.map(SpeciesType::from_is_carnivore),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SpeciesQuery {
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Cages
// ---------------------------------------------------------------------------

pub async fn add_cage(State(state): State<AppState>, body: Bytes) -> ApiResult<CageResource> {
    let input = parse_body::<CageInput>(&body)?;
    state.cages.add(input).await.map(Json)
}

pub async fn search_cages(
    State(state): State<AppState>,
    Query(query): Query<CageQuery>,
) -> ApiResult<ListResponse<CageResource>> {
    let cages = state.cages.search(&query.into_filter()?).await?;
    Ok(Json(ListResponse::new(cages)))
}

pub async fn get_cage(State(state): State<AppState>, Path(id): Path<Id>) -> ApiResult<CageResource> {
    state.cages.get(id).await.map(Json)
}

pub async fn update_cage(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    body: Bytes,
) -> ApiResult<CageResource> {
    let input = parse_body::<CageInput>(&body)?;
    state.cages.update(id, input).await.map(Json)
}

pub async fn delete_cage(State(state): State<AppState>, Path(id): Path<Id>) -> Result<StatusCode, ApiError> {
    state.cages.delete(id).await?;
    Ok(StatusCode::OK)
}

pub async fn list_cage_dinosaurs(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<ListResponse<DinosaurResource>> {
    let dinosaurs = state.cages.dinosaurs(id).await?;
    Ok(Json(ListResponse::new(dinosaurs)))
}

pub async fn add_dinosaur_to_cage(
    State(state): State<AppState>,
    Path((id, dinosaur_id)): Path<(Id, Id)>,
) -> ApiResult<CageResource> {
    state.cages.add_dinosaur(id, dinosaur_id).await.map(Json)
}

pub async fn remove_dinosaur_from_cage(
    State(state): State<AppState>,
    Path((id, dinosaur_id)): Path<(Id, Id)>,
) -> ApiResult<CageResource> {
    state.cages.remove_dinosaur(id, dinosaur_id).await.map(Json)
}

// ---------------------------------------------------------------------------
// Dinosaurs
// ---------------------------------------------------------------------------

pub async fn add_dinosaur(State(state): State<AppState>, body: Bytes) -> ApiResult<DinosaurResource> {
    let input = parse_body::<DinosaurInput>(&body)?;
    state.dinosaurs.add(input).await.map(Json)
}

pub async fn search_dinosaurs(
    State(state): State<AppState>,
    Query(query): Query<DinosaurQuery>,
) -> ApiResult<ListResponse<DinosaurResource>> {
    let dinosaurs = state.dinosaurs.search(&query.into()).await?;
    Ok(Json(ListResponse::new(dinosaurs)))
}

pub async fn get_dinosaur(State(state): State<AppState>, Path(id): Path<Id>) -> ApiResult<DinosaurResource> {
    state.dinosaurs.get(id).await.map(Json)
}

pub async fn update_dinosaur(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    body: Bytes,
) -> ApiResult<DinosaurResource> {
    let input = parse_body::<DinosaurInput>(&body)?;
    state.dinosaurs.update(id, input).await.map(Json)
}

pub async fn delete_dinosaur(State(state): State<AppState>, Path(id): Path<Id>) -> Result<StatusCode, ApiError> {
    state.dinosaurs.delete(id).await?;
    Ok(StatusCode::OK)
}

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

pub async fn add_species(State(state): State<AppState>, body: Bytes) -> ApiResult<SpeciesResource> {
    let input = parse_body::<SpeciesInput>(&body)?;
    state.species.add(input).await.map(Json)
}

pub async fn search_species(
    State(state): State<AppState>,
    Query(query): Query<SpeciesQuery>,
) -> ApiResult<ListResponse<SpeciesResource>> {
    let filter = SpeciesFilter {
        name: query.name.filter(|s| !s.is_empty()),
    };
    let species = state.species.search(&filter).await?;
    Ok(Json(ListResponse::new(species)))
}

pub async fn get_species(State(state): State<AppState>, Path(id): Path<Id>) -> ApiResult<SpeciesResource> {
    state.species.get(id).await.map(Json)
}

pub async fn update_species(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    body: Bytes,
) -> ApiResult<SpeciesResource> {
    let input = parse_body::<SpeciesInput>(&body)?;
    state.species.update(id, input).await.map(Json)
}

pub async fn delete_species(State(state): State<AppState>, Path(id): Path<Id>) -> Result<StatusCode, ApiError> {
    state.species.delete(id).await?;
    Ok(StatusCode::OK)
}

pub async fn list_species_dinosaurs(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<ListResponse<DinosaurResource>> {
    let dinosaurs = state.species.dinosaurs(id).await?;
    Ok(Json(ListResponse::new(dinosaurs)))
}
