use axum::{routing::get, Router};

use crate::api::handlers;
use crate::api::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Cages
        .route("/cages", get(handlers::search_cages).post(handlers::add_cage))
        .route(
            "/cages/:id",
            get(handlers::get_cage)
                .put(handlers::update_cage)
                .delete(handlers::delete_cage),
        )
        .route("/cages/:id/dinosaurs", get(handlers::list_cage_dinosaurs))
        .route(
            "/cages/:id/dinosaurs/:dinosaur_id",
            axum::routing::put(handlers::add_dinosaur_to_cage)
                .delete(handlers::remove_dinosaur_from_cage),
        )
        // Dinosaurs
        .route(
            "/dinosaurs",
            get(handlers::search_dinosaurs).post(handlers::add_dinosaur),
        )
        .route(
            "/dinosaurs/:id",
            get(handlers::get_dinosaur)
                .put(handlers::update_dinosaur)
                .delete(handlers::delete_dinosaur),
        )
        // Species
        .route("/species", get(handlers::search_species).post(handlers::add_species))
        .route(
            "/species/:id",
            get(handlers::get_species)
                .put(handlers::update_species)
                .delete(handlers::delete_species),
        )
        .route("/species/:id/dinosaurs", get(handlers::list_species_dinosaurs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, Stores};
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        create_router().with_state(AppState::new(Stores::shared(Arc::new(MemoryStore::new()))))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, String) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_missing_body_is_plain_text_400() {
        let app = app();
        let (status, text) = send(&app, Method::POST, "/cages", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text, "Body must be supplied.");
    }

    #[tokio::test]
    async fn test_not_found_is_plain_text_404() {
        let app = app();
        let (status, text) = send(&app, Method::GET, "/species/12", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(text, "Species not found.");
    }

    #[tokio::test]
    async fn test_cage_lifecycle_over_http() {
        let app = app();
        let (status, text) = send(
            &app,
            Method::POST,
            "/cages",
            Some(json!({"name": "Paddock A", "maxCapacity": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let cage: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(cage["powerStatus"], "Active");
        assert_eq!(cage["dinosaurCount"], 0);

        let id = cage["id"].as_i64().unwrap();
        let (status, text) = send(
            &app,
            Method::PUT,
            &format!("/cages/{id}"),
            Some(json!({"name": "Paddock A", "maxCapacity": 0, "powerStatus": "Active"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text, "MaxCapacity is invalid.");

        let (status, text) = send(&app, Method::GET, "/cages?powerStatus=active", None).await;
        assert_eq!(status, StatusCode::OK);
        let list: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(list["total"], 1);

        let (status, text) = send(&app, Method::DELETE, &format!("/cages/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(text.is_empty());
    }
}
