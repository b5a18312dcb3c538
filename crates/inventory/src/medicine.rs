use serde::Serialize;

use pharmacy_core::{DomainError, DomainResult};

/// Retail price of a medicine. Always finite and strictly positive.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if value <= 0.0 {
            return Err(DomainError::validation("price must be greater than 0"));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Business rule for price filters: the upper bound must be positive.
///
/// Any number above zero is accepted, including `inf` (which matches every
/// record).
pub fn ensure_positive_max_price(max_price: f64) -> DomainResult<f64> {
    if max_price <= 0.0 {
        return Err(DomainError::invalid_argument("price must be greater than 0"));
    }
    Ok(max_price)
}

/// A broken field rule, tagged with the field it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub error: DomainError,
}

fn ensure_non_empty(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field,
            error: DomainError::validation(format!("{field} cannot be empty")),
        });
    }
}

/// One inventory entry.
///
/// Records have no identity: two medicines with the same name, manufacturer
/// and price are equal, and duplicates may coexist in the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Medicine {
    name: String,
    manufacturer: String,
    price: Price,
}

impl Medicine {
    /// Build a record, reporting every broken field rule at once.
    pub fn new(
        name: impl Into<String>,
        manufacturer: impl Into<String>,
        price: f64,
    ) -> Result<Self, Vec<FieldError>> {
        let name = name.into();
        let manufacturer = manufacturer.into();

        let mut errors = Vec::new();
        ensure_non_empty("name", &name, &mut errors);
        ensure_non_empty("manufacturer", &manufacturer, &mut errors);
        let price = match Price::new(price) {
            Ok(p) => Some(p),
            Err(error) => {
                errors.push(FieldError { field: "price", error });
                None
            }
        };

        match price {
            Some(price) if errors.is_empty() => Ok(Self {
                name,
                manufacturer,
                price,
            }),
            _ => Err(errors),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Whether this medicine costs at most `max_price`.
    pub fn is_priced_at_most(&self, max_price: f64) -> bool {
        self.price.value() <= max_price
    }
}
