use serde::{Deserialize, Serialize};

use pharmacy_inventory::Medicine;

use crate::app::errors::FieldViolation;
use crate::app::extract::Validate;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddMedicineRequest {
    pub name: String,
    pub manufacturer: String,
    pub price: f64,
}

impl Validate for AddMedicineRequest {
    type Valid = Medicine;

    fn validate(self) -> Result<Medicine, Vec<FieldViolation>> {
        Medicine::new(self.name, self.manufacturer, self.price).map_err(|errors| {
            errors
                .iter()
                .map(|e| FieldViolation::from_domain(e.field, &e.error))
                .collect()
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PriceFilterQuery {
    pub max_price: f64,
}

impl Validate for PriceFilterQuery {
    type Valid = Self;

    /// Only the numeric shape is checked here: NaN is not a number to filter
    /// by, while `inf` and `-inf` are. The `> 0` rule is a business rule
    /// enforced by the handler.
    fn validate(self) -> Result<Self, Vec<FieldViolation>> {
        if self.max_price.is_nan() {
            return Err(vec![FieldViolation::new(
                "max_price",
                "max_price must be a number",
            )]);
        }
        Ok(self)
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
