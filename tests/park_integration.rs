use jurassic_park::{build_app, MemoryStore, Stores};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

// Test client wrapper for making API calls
struct TestClient {
    client: Client,
    base_url: String,
}

impl TestClient {
    fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn post(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    async fn put(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .put(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    async fn put_empty(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .put(&format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .get(&format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    async fn delete(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .delete(&format!("{}{}", self.base_url, path))
            .send()
            .await
    }
}

/// Serve the app over the in-memory store on an ephemeral port.
async fn start_server() -> TestClient {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let address = listener.local_addr().expect("Listener has no address");
    let app = build_app(Stores::shared(Arc::new(MemoryStore::new())));

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server stopped");
    });

    TestClient::new(format!("http://{}", address))
}

async fn expect_json(response: reqwest::Response) -> Value {
    let status = response.status();
    let body = response.text().await.expect("Failed to read body");
    assert_eq!(status, StatusCode::OK, "unexpected response body: {}", body);
    serde_json::from_str(&body).expect("Body is not JSON")
}

async fn expect_error(response: reqwest::Response, status: StatusCode, message: &str) {
    assert_eq!(response.status(), status);
    assert_eq!(response.text().await.expect("Failed to read body"), message);
}

#[tokio::test]
async fn test_park_complete_workflow() {
    let client = start_server().await;

    let health = expect_json(client.get("/health").await.unwrap()).await;
    assert_eq!(health["status"], "healthy");

    // Step 1: create Paddock A
    let cage = expect_json(
        client
            .post("/cages", json!({"name": "Paddock A", "maxCapacity": 2}))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(cage["powerStatus"], "Active");
    assert_eq!(cage["dinosaurCount"], 0);
    let cage_id = cage["id"].as_i64().unwrap();

    // Step 2: species and a carnivore
    let t_rex = expect_json(
        client
            .post("/species", json!({"name": "T-Rex", "speciesType": "Carnivore"}))
            .await
            .unwrap(),
    )
    .await;
    let t_rex_id = t_rex["id"].as_i64().unwrap();

    let rex = expect_json(
        client
            .post("/dinosaurs", json!({"name": "Rex", "speciesId": t_rex_id}))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(rex["speciesName"], "T-Rex");
    assert_eq!(rex["cageId"], Value::Null);
    let rex_id = rex["id"].as_i64().unwrap();

    // Step 3: cage Rex
    let cage = expect_json(
        client
            .put_empty(&format!("/cages/{}/dinosaurs/{}", cage_id, rex_id))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(cage["dinosaurCount"], 1);

    let rex = expect_json(client.get(&format!("/dinosaurs/{}", rex_id)).await.unwrap()).await;
    assert_eq!(rex["cageId"], cage_id);

    // Step 4: a herbivore cannot join
    let trike = expect_json(
        client
            .post("/species", json!({"name": "Triceratops", "speciesType": "herbivore"}))
            .await
            .unwrap(),
    )
    .await;
    let horns = expect_json(
        client
            .post("/dinosaurs", json!({"name": "Horns", "speciesId": trike["id"]}))
            .await
            .unwrap(),
    )
    .await;
    expect_error(
        client
            .put_empty(&format!("/cages/{}/dinosaurs/{}", cage_id, horns["id"]))
            .await
            .unwrap(),
        StatusCode::BAD_REQUEST,
        "Cannot put a carnivore and a herbivore in the same cage.",
    )
    .await;

    // Step 5: cage updates that break the rules
    expect_error(
        client
            .put(
                &format!("/cages/{}", cage_id),
                json!({"name": "Paddock A", "maxCapacity": 0, "powerStatus": "Active"}),
            )
            .await
            .unwrap(),
        StatusCode::BAD_REQUEST,
        "MaxCapacity is invalid.",
    )
    .await;
    expect_error(
        client
            .put(
                &format!("/cages/{}", cage_id),
                json!({"name": "Paddock A", "maxCapacity": 2, "powerStatus": "Down"}),
            )
            .await
            .unwrap(),
        StatusCode::BAD_REQUEST,
        "PowerStatus cannot be set to 'down' when DinosaurCount > 0.",
    )
    .await;

    // Step 6: listing helpers
    let occupants = expect_json(client.get(&format!("/cages/{}/dinosaurs", cage_id)).await.unwrap()).await;
    assert_eq!(occupants["total"], 1);
    assert_eq!(occupants["items"][0]["name"], "Rex");

    let carnivores = expect_json(client.get("/dinosaurs?isCarnivore=true").await.unwrap()).await;
    assert_eq!(carnivores["total"], 1);

    let members = expect_json(client.get(&format!("/species/{}/dinosaurs", t_rex_id)).await.unwrap()).await;
    assert_eq!(members["total"], 1);

    // Step 7: species delete guard
    expect_error(
        client.delete(&format!("/species/{}", t_rex_id)).await.unwrap(),
        StatusCode::BAD_REQUEST,
        "Cannot delete while Dinosaurs of this species exist.",
    )
    .await;

    let response = client.delete(&format!("/dinosaurs/{}", rex_id)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().is_empty());

    let response = client.delete(&format!("/species/{}", t_rex_id)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    expect_error(
        client.get(&format!("/species/{}", t_rex_id)).await.unwrap(),
        StatusCode::NOT_FOUND,
        "Species not found.",
    )
    .await;

    // Rex is gone, so the cage can now be powered down and deleted.
    let cage = expect_json(
        client
            .put(
                &format!("/cages/{}", cage_id),
                json!({"name": "Paddock A", "maxCapacity": 2, "powerStatus": "Down"}),
            )
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(cage["powerStatus"], "Down");

    let response = client.delete(&format!("/cages/{}", cage_id)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_body_handling() {
    let client = start_server().await;

    let response = client
        .client
        .post(&format!("{}/cages", client.base_url))
        .send()
        .await
        .unwrap();
    expect_error(response, StatusCode::BAD_REQUEST, "Body must be supplied.").await;

    let response = client
        .client
        .post(&format!("{}/species", client.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    expect_error(response, StatusCode::BAD_REQUEST, "Body is invalid.").await;

    expect_error(
        client.get("/dinosaurs/404").await.unwrap(),
        StatusCode::NOT_FOUND,
        "Dinosaur not found.",
    )
    .await;
}
