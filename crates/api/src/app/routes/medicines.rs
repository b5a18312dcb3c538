use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use pharmacy_inventory::{InventoryStore, ensure_positive_max_price};

use crate::app::dto::{AddMedicineRequest, MessageResponse, PriceFilterQuery};
use crate::app::errors;
use crate::app::extract::{ValidatedJson, ValidatedQuery};

pub const ADDED_MESSAGE: &str = "Medicine added successfully";

pub fn router() -> Router {
    Router::new()
        .route("/", post(add_medicine).get(list_medicines))
        .route("/filter", get(filter_by_price))
}

pub async fn add_medicine(
    Extension(store): Extension<Arc<dyn InventoryStore>>,
    ValidatedJson(medicine): ValidatedJson<AddMedicineRequest>,
) -> axum::response::Response {
    let (name, manufacturer, price) = (
        medicine.name().to_string(),
        medicine.manufacturer().to_string(),
        medicine.price().value(),
    );
    store.append(medicine);
    tracing::info!(
        medicine = %name,
        %manufacturer,
        price,
        total = store.len(),
        "medicine added"
    );

    (StatusCode::OK, Json(MessageResponse::new(ADDED_MESSAGE))).into_response()
}

pub async fn list_medicines(
    Extension(store): Extension<Arc<dyn InventoryStore>>,
) -> axum::response::Response {
    let items = store.all();
    tracing::debug!(count = items.len(), "listing medicines");
    (StatusCode::OK, Json(items)).into_response()
}

pub async fn filter_by_price(
    Extension(store): Extension<Arc<dyn InventoryStore>>,
    ValidatedQuery(query): ValidatedQuery<PriceFilterQuery>,
) -> axum::response::Response {
    let max_price = match ensure_positive_max_price(query.max_price) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(max_price = query.max_price, "rejected non-positive max_price");
            return errors::invalid_argument(&e);
        }
    };

    let items = store.filter_by_max_price(max_price);
    tracing::debug!(max_price, count = items.len(), "filtered medicines");
    (StatusCode::OK, Json(items)).into_response()
}
