//! Pharmacy inventory domain.
//!
//! Medicine records and the ordered store that holds them for the lifetime
//! of the process (no IO, no HTTP).

pub mod medicine;
pub mod store;

pub use medicine::{FieldError, Medicine, Price, ensure_positive_max_price};
pub use store::{InMemoryInventoryStore, InventoryStore};
