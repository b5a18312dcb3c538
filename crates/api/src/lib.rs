//! HTTP API for the pharmacy inventory: routing, validation and
//! request/response mapping.

pub mod app;
pub mod config;
pub mod middleware;
