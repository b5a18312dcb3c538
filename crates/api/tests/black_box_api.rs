use std::sync::Arc;

use pharmacy_inventory::InMemoryInventoryStore;
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, fresh store per server, ephemeral port.
        let app = pharmacy_api::app::build_app(Arc::new(InMemoryInventoryStore::new()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn add_medicine(
    client: &reqwest::Client,
    srv: &TestServer,
    body: serde_json::Value,
) -> reqwest::Response {
    client
        .post(srv.url("/medicines"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn get_json(client: &reqwest::Client, url: String) -> (StatusCode, serde_json::Value) {
    let res = client.get(url).send().await.unwrap();
    let status = res.status();
    let body = res.json().await.unwrap();
    (status, body)
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn empty_inventory_lists_as_empty_array() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, srv.url("/medicines")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn added_medicine_appears_in_list_unchanged() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = add_medicine(
        &client,
        &srv,
        json!({ "name": "Ibuprofen", "manufacturer": "Darnytsia", "price": 42.0 }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let ack: serde_json::Value = res.json().await.unwrap();
    assert!(ack["message"].as_str().is_some_and(|m| !m.is_empty()));

    let (status, body) = get_json(&client, srv.url("/medicines")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "name": "Ibuprofen", "manufacturer": "Darnytsia", "price": 42.0 }])
    );
}

#[tokio::test]
async fn list_preserves_insertion_order_and_is_idempotent() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for (name, price) in [("Aspirin", 12.5), ("Ibuprofen", 42.0), ("Aspirin", 12.5), ("Analgin", 7.0)] {
        let res = add_medicine(
            &client,
            &srv,
            json!({ "name": name, "manufacturer": "Farmak", "price": price }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let (_, first) = get_json(&client, srv.url("/medicines")).await;
    let (_, second) = get_json(&client, srv.url("/medicines")).await;
    assert_eq!(first, second);

    let names: Vec<_> = first
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Aspirin", "Ibuprofen", "Aspirin", "Analgin"]);
}

#[tokio::test]
async fn filter_returns_only_records_within_max_price() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for (name, price) in [("Cheap", 10.0), ("Pricey", 50.0)] {
        add_medicine(
            &client,
            &srv,
            json!({ "name": name, "manufacturer": "Darnytsia", "price": price }),
        )
        .await;
    }

    let (status, body) = get_json(&client, srv.url("/medicines/filter?max_price=20")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "name": "Cheap", "manufacturer": "Darnytsia", "price": 10.0 }])
    );

    // Boundary is inclusive.
    let (_, body) = get_json(&client, srv.url("/medicines/filter?max_price=50")).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn filter_rejects_non_positive_max_price_with_400() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for value in ["0", "-1", "-0.5", "-inf"] {
        let (status, body) =
            get_json(&client, srv.url(&format!("/medicines/filter?max_price={value}"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "max_price={value}");
        assert_eq!(body["error"], "invalid_argument");
        assert_eq!(body["message"], "price must be greater than 0");
    }
}

#[tokio::test]
async fn filter_with_infinite_max_price_returns_every_record() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for (name, price) in [("Cheap", 10.0), ("Pricey", 5000.0)] {
        let res = add_medicine(
            &client,
            &srv,
            json!({ "name": name, "manufacturer": "Darnytsia", "price": price }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    // `1e400` overflows to infinity, which is still a number.
    for value in ["inf", "1e400"] {
        let (status, body) =
            get_json(&client, srv.url(&format!("/medicines/filter?max_price={value}"))).await;
        assert_eq!(status, StatusCode::OK, "max_price={value}");
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Cheap", "Pricey"], "max_price={value}");
    }
}

#[tokio::test]
async fn filter_rejects_missing_or_non_numeric_max_price_with_422() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, srv.url("/medicines/filter")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "max_price");

    let (status, body) = get_json(&client, srv.url("/medicines/filter?max_price=abc")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!body["details"].as_array().unwrap().is_empty());

    let (status, body) = get_json(&client, srv.url("/medicines/filter?max_price=NaN")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "max_price");
}

#[tokio::test]
async fn add_rejects_non_positive_price_with_422() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for price in [0.0, -3.0] {
        let res = add_medicine(
            &client,
            &srv,
            json!({ "name": "Ibuprofen", "manufacturer": "Darnytsia", "price": price }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["details"][0]["field"], "price");
    }

    // Rejected requests never reach the store.
    let (_, body) = get_json(&client, srv.url("/medicines")).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn add_rejects_missing_fields_with_422() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let cases = [
        (json!({ "manufacturer": "Darnytsia", "price": 42.0 }), "name"),
        (json!({ "name": "Ibuprofen", "price": 42.0 }), "manufacturer"),
        (json!({ "name": "Ibuprofen", "manufacturer": "Darnytsia" }), "price"),
    ];
    for (body, field) in cases {
        let res = add_medicine(&client, &srv, body).await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY, "missing {field}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["details"][0]["field"], field);
    }
}

#[tokio::test]
async fn add_rejects_blank_text_and_wrong_types_with_422() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = add_medicine(
        &client,
        &srv,
        json!({ "name": "   ", "manufacturer": "Darnytsia", "price": 42.0 }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let res = add_medicine(
        &client,
        &srv,
        json!({ "name": "Ibuprofen", "manufacturer": "Darnytsia", "price": "cheap" }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let res = client
        .post(srv.url("/medicines"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
